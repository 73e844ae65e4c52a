use crate::analysis::analyzed_item::{AnalyzedItem, AnalyzedItemEnum};
use crate::analysis::graph_trail::GraphTrail;
use crate::math::points::MultiPointXY;
use crate::solved::solved_graph::SolvedGraph;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum SolutionError {
    /// a hidden graph cannot be sonified
    SonifyHidden,
    IndexOutOfRange(usize),
    /// input that did not parse, or has more than two variables
    BadEquation(String),
}

impl fmt::Display for SolutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolutionError::SonifyHidden => {
                write!(f, "Graph can not be sonified if it is not shown.")
            }
            SolutionError::IndexOutOfRange(i) => write!(f, "no solution at index {}", i),
            SolutionError::BadEquation(s) => write!(f, "bad equation: {}", s),
        }
    }
}

impl std::error::Error for SolutionError {}

/// Which flags a call actually changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FlagsChange {
    pub show_changed: bool,
    pub sonify_changed: bool,
}

impl FlagsChange {
    pub fn any(&self) -> bool {
        self.show_changed || self.sonify_changed
    }
}

/// One analyzed item with its show/sonify state. Sonify is never on while show is off.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    item: AnalyzedItemEnum,
    show_graph: bool,
    sonify_graph: bool,
}

impl Solution {
    pub fn new(item: AnalyzedItemEnum) -> Self {
        Solution {
            item,
            show_graph: true,
            sonify_graph: true,
        }
    }

    pub fn item(&self) -> &AnalyzedItemEnum {
        &self.item
    }

    pub(crate) fn item_mut(&mut self) -> &mut AnalyzedItemEnum {
        &mut self.item
    }

    pub fn name(&self) -> String {
        self.item.name()
    }

    /// printed equation, None for data
    pub fn input_equation(&self) -> Option<String> {
        self.item.as_equation().map(|ae| ae.print_equation())
    }

    pub fn is_polar(&self) -> bool {
        self.item.is_polar()
    }

    pub fn is_bad_equation(&self) -> bool {
        self.item
            .as_equation()
            .is_some_and(|ae| ae.is_bad() || ae.has_more_than_two_variables())
    }

    pub fn is_describable(&self) -> bool {
        self.features().is_some()
    }

    pub fn is_graphable(&self) -> bool {
        !self.graph_trails().is_empty()
    }

    pub fn is_sonifiable(&self) -> bool {
        !self.points().is_empty()
    }

    pub fn features(&self) -> Option<&SolvedGraph> {
        self.item.features()
    }

    pub fn points(&self) -> &[MultiPointXY] {
        self.item.points()
    }

    pub fn graph_trails(&self) -> &[GraphTrail] {
        self.item.graph_trails()
    }

    pub fn point(&self, index: usize) -> Option<&MultiPointXY> {
        self.item.point(index)
    }

    /// Sample nearest to `x`: the closest resampled point for data, the sample at the relative
    /// position of `x` in the preferred bounds otherwise.
    pub fn point_near(&self, x: f64) -> Option<&MultiPointXY> {
        if let Some(ad) = self.item.as_data() {
            return ad.point_index_near(x).and_then(|i| self.item.point(i));
        }
        let b = self.item.preferred_bounds();
        if x < b.left || x > b.right || b.right <= b.left {
            return None;
        }
        self.item.point_at_position((x - b.left) / (b.right - b.left))
    }

    pub fn is_show_graph(&self) -> bool {
        self.show_graph
    }

    pub fn is_sonify_graph(&self) -> bool {
        self.sonify_graph
    }

    /// Hiding a graph also silences it.
    pub fn set_show_graph(&mut self, visible: bool) -> FlagsChange {
        let change = FlagsChange {
            show_changed: visible != self.show_graph,
            sonify_changed: !visible && self.sonify_graph,
        };
        if !visible {
            self.sonify_graph = false;
        }
        self.show_graph = visible;
        change
    }

    pub fn set_sonify_graph(&mut self, sonify: bool) -> Result<FlagsChange, SolutionError> {
        if sonify && !self.show_graph {
            return Err(SolutionError::SonifyHidden);
        }
        let change = FlagsChange {
            show_changed: false,
            sonify_changed: sonify != self.sonify_graph,
        };
        self.sonify_graph = sonify;
        Ok(change)
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.item {
            AnalyzedItemEnum::Equation(_) => "AnalyzedEquation",
            AnalyzedItemEnum::Data(_) => "AnalyzedData",
        };
        write!(
            f,
            "Solution({}, showGraph={}, sonifyGraph={})",
            kind, self.show_graph, self.sonify_graph
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyzed_data::AnalyzedData;
    use crate::analysis::analyzed_equation::AnalyzedEquation;
    use crate::math::bounds::Bounds;

    fn line() -> Solution {
        Solution::new(AnalyzedItemEnum::Equation(AnalyzedEquation::new("y = 2*x + 3")))
    }

    #[test]
    fn test_flags() {
        let mut s = line();
        assert!(s.is_show_graph() && s.is_sonify_graph());
        let c = s.set_show_graph(false);
        assert_eq!(
            c,
            FlagsChange {
                show_changed: true,
                sonify_changed: true
            }
        );
        assert!(!s.is_sonify_graph());
        assert_eq!(s.set_sonify_graph(true), Err(SolutionError::SonifyHidden));
        assert!(!s.set_show_graph(false).any());
        s.set_show_graph(true);
        assert!(!s.is_sonify_graph());
        assert!(s.set_sonify_graph(true).unwrap().sonify_changed);
        assert!(!s.set_sonify_graph(true).unwrap().any());
    }

    #[test]
    fn test_unsolved_state() {
        let s = line();
        assert!(!s.is_describable());
        assert!(!s.is_graphable());
        assert!(!s.is_sonifiable());
        assert!(!s.is_bad_equation());
        assert!(!s.is_polar());
        assert!(s.input_equation().unwrap().starts_with("y = 2*x"));
        assert_eq!(s.to_string(), "Solution(AnalyzedEquation, showGraph=true, sonifyGraph=true)");
    }

    #[test]
    fn test_point_near() {
        let mut s = line();
        s.item_mut().compute_points(&Bounds::square(10.0)).unwrap();
        let p = s.point_near(0.0).unwrap();
        assert!(p.x.abs() < 0.05);
        assert!(s.point_near(11.0).is_none());

        let d = AnalyzedData::new("t", "v", &[0.0, 1.0, 2.0], &[5.0, 6.0, 7.0]).unwrap();
        let mut s = Solution::new(AnalyzedItemEnum::Data(d));
        s.item_mut().compute_points(&Bounds::new(0.0, 2.0, 7.0, 5.0)).unwrap();
        let p = s.point_near(1.0).unwrap();
        assert!((p.x - 1.0).abs() < 0.01);
        assert!(s.input_equation().is_none());
    }
}
