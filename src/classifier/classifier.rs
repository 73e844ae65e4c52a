use crate::analysis::analyzed_data::AnalyzedData;
use crate::analysis::analyzed_equation::AnalyzedEquation;
use crate::analysis::analyzed_item::AnalyzedItem;
use crate::classifier::polar_classifier::PolarClassifier;
use crate::classifier::polynomial_classifier::PolynomialClassifier;
use crate::classifier::quadratic_classifier::QuadraticClassifier;
use crate::classifier::trig_classifier::TrigClassifier;
use crate::math::bounds::Bounds;
use crate::solved::equation_data::solved_data;
use crate::solved::solved_graph::{GraphFeature, SolvedGraph};
use log::{debug, warn};

/// The classifier chosen for an analyzed item. `Default` describes the item without
/// naming a curve family.
#[derive(Debug, Clone)]
pub enum Classifier {
    Default,
    Quadratic(QuadraticClassifier),
    Polynomial(PolynomialClassifier),
    Polar(PolarClassifier),
    Trig(TrigClassifier),
}

impl Classifier {
    pub fn name(&self) -> &'static str {
        match self {
            Classifier::Default => "default",
            Classifier::Quadratic(_) => "quadratic",
            Classifier::Polynomial(_) => "polynomial",
            Classifier::Polar(_) => "polar",
            Classifier::Trig(_) => "trig",
        }
    }

    /// Features of an equation. A builder that rejects the equation falls back to the
    /// default description, so a result is always produced.
    pub fn features_for_equation(&self, ae: &AnalyzedEquation) -> SolvedGraph {
        let result = match self {
            Classifier::Default => Classifier::default_features(ae),
            Classifier::Quadratic(q) => q.features(ae),
            Classifier::Polynomial(p) => p.features(ae),
            Classifier::Polar(p) => p.features(ae),
            Classifier::Trig(t) => t.features(ae),
        };
        let mut features = match result {
            Ok(f) => f,
            Err(e) => {
                warn!(
                    "{} classifier failed on {}: {}; using the default features",
                    self.name(),
                    ae.input_equation(),
                    e
                );
                Classifier::default_features(ae).unwrap_or_else(|e| {
                    warn!("default features failed on {}: {}", ae.input_equation(), e);
                    SolvedGraph::new()
                })
            }
        };
        Classifier::add_graph_boundaries(&ae.preferred_bounds(), &mut features);
        features
    }

    pub fn features_for_data(&self, ad: &AnalyzedData) -> SolvedGraph {
        let mut features = solved_data(ad).unwrap_or_else(|e| {
            warn!("data features failed on {}: {}", ad.y_name(), e);
            SolvedGraph::new()
        });
        Classifier::add_graph_boundaries(&ad.preferred_bounds(), &mut features);
        features
    }

    pub fn default_features(
        ae: &AnalyzedEquation,
    ) -> Result<SolvedGraph, crate::solved::solved_graph::SolveError> {
        SolvedGraph::xy_graph(ae, None)
    }

    pub fn add_graph_boundaries(b: &Bounds, features: &mut SolvedGraph) {
        let text = format!(
            "x = {:?} to {:?} and y = {:?} to {:?}",
            b.left, b.right, b.bottom, b.top
        );
        if let Err(e) = features.put_new_feature(GraphFeature::GraphBoundaries, text) {
            debug!("graph boundaries not stored: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries_text() {
        let mut g = SolvedGraph::new();
        Classifier::add_graph_boundaries(&Bounds::new(-10.0, 10.0, 5.0, -5.0), &mut g);
        assert_eq!(
            g.get_value(GraphFeature::GraphBoundaries).unwrap(),
            "x = -10.0 to 10.0 and y = -5.0 to 5.0"
        );
    }

    #[test]
    fn test_classifier_names() {
        assert_eq!(Classifier::Default.name(), "default");
        assert_eq!(Classifier::Trig(TrigClassifier::new()).name(), "trig");
    }

    #[test]
    fn test_line_features() {
        let ae = AnalyzedEquation::new("y = 2*x + 3");
        let g = ae.classifier().features_for_equation(&ae);
        assert_eq!(g.get_value(GraphFeature::GraphName).unwrap(), "line");
        assert_eq!(g.get_value(GraphFeature::EquationType).unwrap(), "linear equation");
    }
}
