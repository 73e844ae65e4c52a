use crate::analysis::analyzed_data::{AnalyzedData, DataError};
use crate::analysis::analyzed_equation::AnalyzedEquation;
use crate::analysis::graph_trail::GraphTrail;
use crate::math::bounds::Bounds;
use crate::math::points::MultiPointXY;
use crate::solved::solved_graph::SolvedGraph;
use enum_dispatch::enum_dispatch;

////////////////////////////////////////////////////////////////
//  ANALYZED ITEM - something that can be sampled, drawn and described
////////////////////////////////////////////////////////////////
#[enum_dispatch(AnalyzedItemEnum)]
pub trait AnalyzedItem {
    /// the input equation, or the name of the y data
    fn name(&self) -> String;
    /// samples the item inside `b` and splits the samples into trails
    fn compute_points(&mut self, b: &Bounds) -> Result<(), DataError>;
    /// bounds the item would like to be shown in, updated by `compute_points`
    fn preferred_bounds(&self) -> Bounds;
    /// classifies the item and stores its features
    fn update_features(&mut self);
    fn features(&self) -> Option<&SolvedGraph>;
    fn points(&self) -> &[MultiPointXY];
    fn graph_trails(&self) -> &[GraphTrail];
    fn is_polar(&self) -> bool;

    /// sample at a relative position in `[0, 1]`
    fn point_at_position(&self, position: f64) -> Option<&MultiPointXY> {
        let p = self.points();
        if p.is_empty() || !(0.0..=1.0).contains(&position) {
            return None;
        }
        p.get((position * (p.len() - 1) as f64).floor() as usize)
    }

    fn point(&self, index: usize) -> Option<&MultiPointXY> {
        self.points().get(index)
    }
}

#[enum_dispatch]
#[derive(Debug, Clone, PartialEq)]
pub enum AnalyzedItemEnum {
    Equation(AnalyzedEquation),
    Data(AnalyzedData),
}

impl AnalyzedItemEnum {
    pub fn as_equation(&self) -> Option<&AnalyzedEquation> {
        match self {
            AnalyzedItemEnum::Equation(e) => Some(e),
            AnalyzedItemEnum::Data(_) => None,
        }
    }

    pub fn as_data(&self) -> Option<&AnalyzedData> {
        match self {
            AnalyzedItemEnum::Data(d) => Some(d),
            AnalyzedItemEnum::Equation(_) => None,
        }
    }

    pub fn as_equation_mut(&mut self) -> Option<&mut AnalyzedEquation> {
        match self {
            AnalyzedItemEnum::Equation(e) => Some(e),
            AnalyzedItemEnum::Data(_) => None,
        }
    }
}
