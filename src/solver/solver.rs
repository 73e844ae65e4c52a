use crate::Utils::settings::MdeSettings;
use crate::analysis::analyzed_equation::AnalyzedEquation;
use crate::analysis::analyzed_item::{AnalyzedItem, AnalyzedItemEnum};
use crate::math::bounds::Bounds;
use crate::math::points::MultiPointXY;
use crate::solver::solution::{FlagsChange, Solution, SolutionError};
use log::{debug, info, warn};
use std::collections::VecDeque;

/// passes of `solve` before the bounds are taken as settled
pub const MAX_SOLVE_ITERATIONS: usize = 10;

/// State changes of a solver, queued until the caller drains them.
#[derive(Debug, Clone, PartialEq)]
pub enum SolverEvent {
    Added(usize),
    /// name of an equation that was not added
    Rejected(String),
    FlagsChanged { index: usize, change: FlagsChange },
    Removed(usize),
    Cleared,
    Solved { iterations: usize, bounds: Bounds },
}

/// Running show/sonify counts split by coordinate system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShowSonifyCounts {
    pub show_polar: usize,
    pub show_cartesian: usize,
    pub sonify_polar: usize,
    pub sonify_cartesian: usize,
}

impl ShowSonifyCounts {
    fn update(&mut self, polar: bool, show_offset: isize, sonify_offset: isize) {
        let (show, sonify) = if polar {
            (&mut self.show_polar, &mut self.sonify_polar)
        } else {
            (&mut self.show_cartesian, &mut self.sonify_cartesian)
        };
        *show = show.saturating_add_signed(show_offset);
        *sonify = sonify.saturating_add_signed(sonify_offset);
    }

    fn offsets(s: &Solution, change: FlagsChange) -> (isize, isize) {
        let offset = |changed: bool, on: bool| match (changed, on) {
            (false, _) => 0,
            (true, true) => 1,
            (true, false) => -1,
        };
        (
            offset(change.show_changed, s.is_show_graph()),
            offset(change.sonify_changed, s.is_sonify_graph()),
        )
    }
}

////////////////////////////////////////////////////////////////
//  SOLVER - the set of items on one graph
////////////////////////////////////////////////////////////////
/// Keeps the solutions shown on one graph, their show/sonify counts and the shared view bounds.
///
/// At most one polar solution is sonified, and none while a Cartesian solution is shown; the
/// rule is reapplied after every addition and flag change.
#[derive(Debug, Clone)]
pub struct Solver {
    solutions: Vec<Solution>,
    counts: ShowSonifyCounts,
    bounds: Bounds,
    preferred_bounds: Bounds,
    settings: MdeSettings,
    events: VecDeque<SolverEvent>,
}

impl Default for Solver {
    fn default() -> Self {
        Solver::new()
    }
}

impl Solver {
    pub fn new() -> Self {
        Solver::with_settings(MdeSettings::default())
    }

    pub fn with_settings(settings: MdeSettings) -> Self {
        let b = Bounds::square(settings.default_bound);
        Solver {
            solutions: Vec::with_capacity(5),
            counts: ShowSonifyCounts::default(),
            bounds: b,
            preferred_bounds: b,
            settings,
            events: VecDeque::new(),
        }
    }

    pub fn settings(&self) -> &MdeSettings {
        &self.settings
    }

    ////////////////////////////////////////////////////////////////
    //  ADDING AND REMOVING
    ////////////////////////////////////////////////////////////////
    /// Parses and adds an equation, shown and sonified. Returns its index.
    pub fn add_equation(&mut self, equation: &str) -> Result<usize, SolutionError> {
        let ae = AnalyzedEquation::with_settings(equation, &self.settings);
        self.add_item(AnalyzedItemEnum::Equation(ae))
    }

    pub fn add_item(&mut self, item: AnalyzedItemEnum) -> Result<usize, SolutionError> {
        self.add_item_with(item, true, true)
    }

    /// Bad equations and equations in more than two variables are rejected.
    pub fn add_item_with(
        &mut self,
        item: AnalyzedItemEnum,
        show: bool,
        sonify: bool,
    ) -> Result<usize, SolutionError> {
        let mut solution = Solution::new(item);
        if solution.is_bad_equation() {
            let name = solution.name();
            warn!("rejected bad equation {}", name);
            self.events.push_back(SolverEvent::Rejected(name.clone()));
            return Err(SolutionError::BadEquation(name));
        }
        solution.set_show_graph(show);
        solution.set_sonify_graph(sonify)?;
        self.counts
            .update(solution.is_polar(), show as isize, sonify as isize);
        self.solutions.push(solution);
        let index = self.solutions.len() - 1;
        self.events.push_back(SolverEvent::Added(index));
        self.apply_show_sonify_rule();
        Ok(index)
    }

    pub fn remove(&mut self, index: usize) -> Result<Solution, SolutionError> {
        if index >= self.solutions.len() {
            return Err(SolutionError::IndexOutOfRange(index));
        }
        let s = self.solutions.remove(index);
        self.counts.update(
            s.is_polar(),
            -(s.is_show_graph() as isize),
            -(s.is_sonify_graph() as isize),
        );
        self.events.push_back(SolverEvent::Removed(index));
        Ok(s)
    }

    pub fn remove_all(&mut self) {
        self.solutions.clear();
        self.counts = ShowSonifyCounts::default();
        self.events.push_back(SolverEvent::Cleared);
    }

    ////////////////////////////////////////////////////////////////
    //  FLAGS
    ////////////////////////////////////////////////////////////////
    pub fn set_show_graph(&mut self, index: usize, visible: bool) -> Result<FlagsChange, SolutionError> {
        let s = self
            .solutions
            .get_mut(index)
            .ok_or(SolutionError::IndexOutOfRange(index))?;
        let change = s.set_show_graph(visible);
        self.flags_changed(index, change);
        Ok(change)
    }

    pub fn set_sonify_graph(&mut self, index: usize, sonify: bool) -> Result<FlagsChange, SolutionError> {
        let s = self
            .solutions
            .get_mut(index)
            .ok_or(SolutionError::IndexOutOfRange(index))?;
        let change = s.set_sonify_graph(sonify)?;
        self.flags_changed(index, change);
        Ok(change)
    }

    fn flags_changed(&mut self, index: usize, change: FlagsChange) {
        if !change.any() {
            return;
        }
        let s = &self.solutions[index];
        let (show, sonify) = ShowSonifyCounts::offsets(s, change);
        self.counts.update(s.is_polar(), show, sonify);
        self.events
            .push_back(SolverEvent::FlagsChanged { index, change });
        self.apply_show_sonify_rule();
    }

    /// Silences polar solutions, newest first, while a Cartesian solution is shown or more
    /// than one polar solution is sonified.
    fn apply_show_sonify_rule(&mut self) {
        for index in (0..self.solutions.len()).rev() {
            let s = &mut self.solutions[index];
            if s.is_polar()
                && s.is_sonify_graph()
                && (self.counts.show_cartesian > 0 || self.counts.sonify_polar > 1)
            {
                // a shown solution may always be silenced
                if let Ok(change) = s.set_sonify_graph(false) {
                    debug!("silenced polar solution {}", s.name());
                    self.counts.update(true, 0, -1);
                    self.events
                        .push_back(SolverEvent::FlagsChanged { index, change });
                }
            }
        }
    }

    pub fn counts(&self) -> ShowSonifyCounts {
        self.counts
    }

    ////////////////////////////////////////////////////////////////
    //  SOLVING
    ////////////////////////////////////////////////////////////////
    /// Samples and classifies every shown or sonified item in `(left, right, top, bottom)`.
    ///
    /// The bounds start at the first item's preferred bounds and grow to cover every other
    /// item's; growth caused by a later item triggers another pass over all items, up to
    /// `MAX_SOLVE_ITERATIONS` passes.
    pub fn solve(&mut self, left: f64, right: f64, top: f64, bottom: f64) {
        self.bounds = Bounds::new(left, right, top, bottom);
        if self.solutions.is_empty() {
            return;
        }
        let mut iteration = 0;
        loop {
            let mut recompute = false;
            for index in 0..self.solutions.len() {
                let s = &mut self.solutions[index];
                if !(s.is_show_graph() || s.is_sonify_graph()) {
                    continue;
                }
                let item = s.item_mut();
                if iteration == 0 || self.bounds != item.preferred_bounds() {
                    if let Err(e) = item.compute_points(&self.bounds) {
                        warn!("no points for {}: {}", item.name(), e);
                    }
                    item.update_features();
                }
                let pref = item.preferred_bounds();
                if iteration == 0 && index == 0 && self.bounds != pref {
                    self.bounds = pref;
                }
                if self.bounds.maximize(&pref) && index > 0 {
                    info!("bounds grew to {} for {}", self.bounds, item.name());
                    recompute = true;
                }
            }
            iteration += 1;
            if !recompute || iteration >= MAX_SOLVE_ITERATIONS {
                break;
            }
        }
        debug!("solved {} items in {} passes", self.solutions.len(), iteration);
        self.events.push_back(SolverEvent::Solved {
            iterations: iteration,
            bounds: self.bounds,
        });
    }

    /// re-solves in the current bounds
    pub fn solve_current(&mut self) {
        let b = self.bounds;
        self.solve(b.left, b.right, b.top, b.bottom);
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn set_bounds(&mut self, b: Bounds) {
        self.bounds = b;
    }

    pub fn preferred_bounds(&self) -> Bounds {
        self.preferred_bounds
    }

    pub fn set_preferred_bounds(&mut self, b: Bounds) {
        self.preferred_bounds = b;
    }

    ////////////////////////////////////////////////////////////////
    //  LOOKUP
    ////////////////////////////////////////////////////////////////
    pub fn len(&self) -> usize {
        self.solutions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Solution> {
        self.solutions.get(index)
    }

    pub fn solutions(&self) -> impl Iterator<Item = &Solution> {
        self.solutions.iter()
    }

    /// every solution whose item is named `name`
    pub fn get_by_name(&self, name: &str) -> Vec<&Solution> {
        self.solutions.iter().filter(|s| s.name() == name).collect()
    }

    pub fn position(&self, item: &AnalyzedItemEnum) -> Option<usize> {
        self.solutions.iter().position(|s| s.item() == item)
    }

    pub fn contains(&self, item: &AnalyzedItemEnum) -> bool {
        self.position(item).is_some()
    }

    pub fn point_near(&self, index: usize, x: f64) -> Option<&MultiPointXY> {
        self.solutions.get(index)?.point_near(x)
    }

    /// feature tree of one solution as XML, once it has been solved
    pub fn feature_xml(&self, index: usize) -> Option<String> {
        Some(self.solutions.get(index)?.features()?.to_xml())
    }

    /// true when there is nothing to show or something failed to parse
    pub fn any_bad_equations(&self) -> bool {
        self.solutions.is_empty() || self.solutions.iter().any(|s| s.is_bad_equation())
    }

    pub fn any_describable(&self) -> bool {
        self.solutions.iter().any(|s| s.is_describable())
    }

    pub fn any_graphable(&self) -> bool {
        self.solutions.iter().any(|s| s.is_graphable())
    }

    pub fn any_sonifiable(&self) -> bool {
        self.solutions.iter().any(|s| s.is_sonifiable())
    }

    pub fn any_analyzed_data(&self) -> bool {
        self.solutions.iter().any(|s| s.item().as_data().is_some())
    }

    ////////////////////////////////////////////////////////////////
    //  EVENTS
    ////////////////////////////////////////////////////////////////
    pub fn events(&self) -> impl Iterator<Item = &SolverEvent> {
        self.events.iter()
    }

    pub fn drain_events(&mut self) -> Vec<SolverEvent> {
        self.events.drain(..).collect()
    }
}
