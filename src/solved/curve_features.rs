use crate::math::points::PointXY;
use crate::solved::intervals::{IntervalDescription, IntervalEndpoint};
use crate::solved::solved_graph::GeneralDirection;
use strum_macros::Display;

#[derive(Debug, Clone, PartialEq)]
pub struct LineFeatures {
    /// infinite for a vertical line
    pub slope: f64,
    /// degrees
    pub inclination: f64,
    pub reduced_equation: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParabolaFeatures {
    pub vertex: PointXY,
    pub focus: PointXY,
    pub focal_length: f64,
    pub axis_inclination: f64,
    pub opens: GeneralDirection,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EllipseFeatures {
    pub center: PointXY,
    /// equal semi axes for a circle, zero for a single point
    pub semi_major_axis: f64,
    pub semi_minor_axis: f64,
    pub foci: Vec<PointXY>,
    pub eccentricity: f64,
    pub major_axis_inclination: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HyperbolaFeatures {
    pub center: PointXY,
    pub semi_transverse_axis: f64,
    pub semi_conjugate_axis: f64,
    pub foci: [PointXY; 2],
    pub vertices: [PointXY; 2],
    pub eccentricity: f64,
    pub transverse_axis_inclination: f64,
    /// inclinations of the asymptotes in degrees
    pub asymptotes: [f64; 2],
}

#[derive(Debug, Clone, PartialEq)]
pub struct LinePairFeatures {
    pub inclinations: Vec<f64>,
    /// distance between parallel lines, None when they intersect
    pub separation: Option<f64>,
    pub intersection: Option<PointXY>,
    pub equations: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TrigKind {
    #[strum(serialize = "sine")]
    Sine,
    #[strum(serialize = "cosine")]
    Cosine,
    #[strum(serialize = "tangent")]
    Tangent,
}

/// `y = amplitude * f(frequency * x + shift) + offset`
#[derive(Debug, Clone, PartialEq)]
pub struct TrigFeatures {
    pub kind: TrigKind,
    pub amplitude: f64,
    pub frequency: f64,
    pub shift: f64,
    pub offset: f64,
    pub period: f64,
}

/// `y = scale * f(rate * x + shift) + offset` for square roots and absolute values
#[derive(Debug, Clone, PartialEq)]
pub struct RadicalFeatures {
    pub vertex: PointXY,
    pub scale: f64,
    pub rate: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoseFeatures {
    pub petals: usize,
    pub petal_length: f64,
    /// degrees
    pub petal_inclinations: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LemniscateFeatures {
    pub blade_length: f64,
    pub inclination: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrochoidFeatures {
    pub shape: String,
    pub theta_multiple: usize,
    pub max_length: f64,
    pub min_length: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionAnalysis {
    pub degree: Option<i32>,
    pub endpoints: Vec<IntervalEndpoint>,
    pub intervals: Vec<IntervalDescription>,
}

/// Numeric description of a recognised curve, one variant per family.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CurveFeatures {
    #[default]
    Unclassified,
    Line(LineFeatures),
    Parabola(ParabolaFeatures),
    Ellipse(EllipseFeatures),
    Hyperbola(HyperbolaFeatures),
    TwoLines(LinePairFeatures),
    IntersectingLines(LinePairFeatures),
    Trig(TrigFeatures),
    SquareRoot(RadicalFeatures),
    AbsoluteValue(RadicalFeatures),
    Rose(RoseFeatures),
    Lemniscate(LemniscateFeatures),
    Trochoid(TrochoidFeatures),
    Rational(FunctionAnalysis),
    /// one analysis per graph trail
    EquationData(Vec<FunctionAnalysis>),
}

impl CurveFeatures {
    pub fn vertex(&self) -> Option<PointXY> {
        match self {
            CurveFeatures::Parabola(p) => Some(p.vertex),
            CurveFeatures::SquareRoot(r) | CurveFeatures::AbsoluteValue(r) => Some(r.vertex),
            CurveFeatures::Hyperbola(h) => Some(h.vertices[0]),
            _ => None,
        }
    }

    pub fn slope(&self) -> Option<f64> {
        match self {
            CurveFeatures::Line(l) => Some(l.slope),
            _ => None,
        }
    }

    pub fn focus(&self) -> Option<PointXY> {
        match self {
            CurveFeatures::Parabola(p) => Some(p.focus),
            CurveFeatures::Ellipse(e) => e.foci.first().copied(),
            CurveFeatures::Hyperbola(h) => Some(h.foci[0]),
            _ => None,
        }
    }

    pub fn focal_length(&self) -> Option<f64> {
        match self {
            CurveFeatures::Parabola(p) => Some(p.focal_length),
            _ => None,
        }
    }

    pub fn center(&self) -> Option<PointXY> {
        match self {
            CurveFeatures::Ellipse(e) => Some(e.center),
            CurveFeatures::Hyperbola(h) => Some(h.center),
            _ => None,
        }
    }

    pub fn amplitude(&self) -> Option<f64> {
        match self {
            CurveFeatures::Trig(t) if t.kind != TrigKind::Tangent => Some(t.amplitude.abs()),
            _ => None,
        }
    }

    pub fn period(&self) -> Option<f64> {
        match self {
            CurveFeatures::Trig(t) => Some(t.period),
            _ => None,
        }
    }

    pub fn asymptote_inclinations(&self) -> Option<[f64; 2]> {
        match self {
            CurveFeatures::Hyperbola(h) => Some(h.asymptotes),
            _ => None,
        }
    }

    pub fn function_analysis(&self) -> Option<&FunctionAnalysis> {
        match self {
            CurveFeatures::Rational(f) => Some(f),
            CurveFeatures::EquationData(v) => v.first(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let p = CurveFeatures::Parabola(ParabolaFeatures {
            vertex: PointXY::new(0.0, -4.0),
            focus: PointXY::new(0.0, -3.75),
            focal_length: 0.25,
            axis_inclination: 90.0,
            opens: GeneralDirection::Upwards,
        });
        assert_eq!(p.vertex(), Some(PointXY::new(0.0, -4.0)));
        assert_eq!(p.focal_length(), Some(0.25));
        assert_eq!(p.slope(), None);
        assert_eq!(CurveFeatures::default(), CurveFeatures::Unclassified);
        assert_eq!(TrigKind::Cosine.to_string(), "cosine");
    }
}
