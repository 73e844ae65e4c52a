use crate::math::points::MultiPointXY;
use log::debug;
use nalgebra::DMatrix;

/// rows holding a generator above this magnitude are left out of the fit
const MAX_DATA: f64 = 200.0;
const SVD_MAX_ITERATIONS: usize = 1000;

/// Result of fitting one model signature: `fit` is `log10(s_min / s_max)` of the selected
/// generator columns, `model` the right singular vector of the smallest singular value.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelFit {
    pub fit: f64,
    pub model: Vec<f64>,
}

impl ModelFit {
    pub fn unfit() -> Self {
        ModelFit {
            fit: f64::INFINITY,
            model: Vec::new(),
        }
    }
}

/// Rows of generator values, one row per sample.
#[derive(Debug, Clone, Default)]
pub struct DataModelBuilder {
    data: Vec<Vec<f64>>,
}

fn qualifies(row: &[f64]) -> bool {
    let mut m = 0.0_f64;
    for v in row {
        if v.is_nan() {
            return false;
        }
        m = m.max(v.abs());
    }
    m <= MAX_DATA
}

impl DataModelBuilder {
    pub fn new() -> Self {
        DataModelBuilder { data: Vec::new() }
    }

    pub fn add_row(&mut self, row: Vec<f64>) {
        self.data.push(row);
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Fits the generator columns in `indices`. At least ten qualifying rows per column are
    /// needed, otherwise the fit is infinite.
    pub fn build_model(&self, indices: &[usize]) -> ModelFit {
        let degree = indices.len();
        if degree == 0 {
            return ModelFit::unfit();
        }
        let rows: Vec<Vec<f64>> = self
            .data
            .iter()
            .map(|r| indices.iter().map(|i| r[*i]).collect::<Vec<f64>>())
            .filter(|r| qualifies(r))
            .collect();
        if rows.len() < 10 * degree {
            return ModelFit::unfit();
        }
        let flat: Vec<f64> = rows.iter().flatten().copied().collect();
        let a = DMatrix::from_row_slice(rows.len(), degree, &flat);
        let Some(svd) = a.try_svd(false, true, f64::EPSILON, SVD_MAX_ITERATIONS) else {
            debug!("SVD did not converge for model {:?}", indices);
            return ModelFit::unfit();
        };
        let Some(v_t) = svd.v_t else {
            return ModelFit::unfit();
        };
        let s = &svd.singular_values;
        let (i_min, s_min) = s
            .iter()
            .enumerate()
            .fold((0, f64::INFINITY), |acc, (i, v)| if *v < acc.1 { (i, *v) } else { acc });
        let s_max = s.iter().copied().fold(0.0_f64, f64::max);
        if s_max == 0.0 {
            return ModelFit::unfit();
        }
        let f = s_min / s_max;
        ModelFit {
            fit: if f == 0.0 { f64::NEG_INFINITY } else { f.log10() },
            model: v_t.row(i_min).iter().copied().collect(),
        }
    }
}

/// Anything that can fit a model signature.
pub trait ModelBuilder {
    fn build_model(&self, indices: &[usize]) -> ModelFit;
}

////////////////////////////////////////////////////////////////
//  POLYNOMIAL GENERATORS - x^j * y^i
////////////////////////////////////////////////////////////////
/// Generator `i * (x_degree + 1) + j` holds `x^j * y^i`.
#[derive(Debug, Clone)]
pub struct PolynomialModelBuilder {
    x_degree: usize,
    y_degree: usize,
    builder: DataModelBuilder,
}

impl PolynomialModelBuilder {
    pub fn new(x_degree: usize, y_degree: usize) -> Self {
        PolynomialModelBuilder {
            x_degree,
            y_degree,
            builder: DataModelBuilder::new(),
        }
    }

    pub fn x_degree(&self) -> usize {
        self.x_degree
    }

    pub fn y_degree(&self) -> usize {
        self.y_degree
    }

    pub fn num_generators(&self) -> usize {
        (self.x_degree + 1) * (self.y_degree + 1)
    }

    pub fn add_point(&mut self, x: f64, y: f64) {
        let mut row = Vec::with_capacity(self.num_generators());
        let mut y_power = 1.0;
        for _ in 0..=self.y_degree {
            let mut x_power = 1.0;
            for _ in 0..=self.x_degree {
                row.push(x_power * y_power);
                x_power *= x;
            }
            y_power *= y;
        }
        self.builder.add_row(row);
    }

    pub fn add_multi_point(&mut self, p: &MultiPointXY) {
        for y in &p.y_array {
            self.add_point(p.x, *y);
        }
    }

    pub fn len(&self) -> usize {
        self.builder.len()
    }

    pub fn is_empty(&self) -> bool {
        self.builder.is_empty()
    }
}

impl ModelBuilder for PolynomialModelBuilder {
    fn build_model(&self, indices: &[usize]) -> ModelFit {
        self.builder.build_model(indices)
    }
}

////////////////////////////////////////////////////////////////
//  POLAR GENERATORS
////////////////////////////////////////////////////////////////
pub const POLAR_GENERATORS: usize = 12;
const NUM_RS: usize = 4;
const NUM_THETAS: usize = 4;

/// Generators `1, r, 1/r, r^2` followed by `cos(k*theta), sin(k*theta)` for `k = 1..=4`.
#[derive(Debug, Clone, Default)]
pub struct PolarModelBuilder {
    builder: DataModelBuilder,
}

impl PolarModelBuilder {
    pub fn new() -> Self {
        PolarModelBuilder {
            builder: DataModelBuilder::new(),
        }
    }

    pub fn add_point(&mut self, r: f64, theta: f64) {
        let mut row = Vec::with_capacity(POLAR_GENERATORS);
        row.extend_from_slice(&[1.0, r, 1.0 / r, r * r]);
        debug_assert_eq!(row.len(), NUM_RS);
        for k in 1..=NUM_THETAS {
            let phi = k as f64 * theta;
            row.push(phi.cos());
            row.push(phi.sin());
        }
        self.builder.add_row(row);
    }

    /// samples stored as `(theta, [r...])`
    pub fn add_multi_point(&mut self, p: &MultiPointXY) {
        for r in &p.y_array {
            self.add_point(*r, p.x);
        }
    }

    pub fn len(&self) -> usize {
        self.builder.len()
    }

    pub fn is_empty(&self) -> bool {
        self.builder.is_empty()
    }
}

impl ModelBuilder for PolarModelBuilder {
    fn build_model(&self, indices: &[usize]) -> ModelFit {
        self.builder.build_model(indices)
    }
}

/// Sets every entry smaller than `1e-8` of the largest one to zero and returns how many
/// were zeroed.
pub fn prune_model(model: &mut [f64]) -> usize {
    let u = model.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
    let t = u * 1.0e-8;
    let mut pruned = 0;
    for v in model.iter_mut() {
        if v.abs() < t {
            *v = 0.0;
            pruned += 1;
        }
    }
    pruned
}

/// Fits every signature and keeps the best one; on ties the later signature wins.
/// Returns the fit together with the index of the winning signature.
pub fn best_signature(builder: &impl ModelBuilder, signatures: &[Vec<usize>]) -> (ModelFit, usize) {
    let mut best = ModelFit::unfit();
    let mut which = 0;
    for (i, s) in signatures.iter().enumerate() {
        let m = builder.build_model(s);
        if m.fit <= best.fit {
            best = m;
            which = i;
        }
    }
    (best, which)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_line_fits_exactly() {
        let mut b = PolynomialModelBuilder::new(2, 2);
        for i in 0..100 {
            let x = -5.0 + 0.1 * i as f64;
            b.add_point(x, 2.0 * x + 1.0);
        }
        assert_eq!(b.num_generators(), 9);
        // 1, x, y
        let m = b.build_model(&[0, 1, 3]);
        assert!(m.fit < -12.0);
        let scale = m.model[2];
        assert_relative_eq!(m.model[0] / scale, -1.0, epsilon = 1e-8);
        assert_relative_eq!(m.model[1] / scale, -2.0, epsilon = 1e-8);
    }

    #[test]
    fn test_too_few_rows_is_unfit() {
        let mut b = PolynomialModelBuilder::new(1, 1);
        for i in 0..5 {
            b.add_point(i as f64, i as f64);
        }
        assert_eq!(b.build_model(&[0, 1]).fit, f64::INFINITY);
        // rows with huge generators do not qualify
        let mut d = DataModelBuilder::new();
        for _ in 0..50 {
            d.add_row(vec![1.0, 1000.0]);
        }
        assert_eq!(d.build_model(&[0, 1]).fit, f64::INFINITY);
    }

    #[test]
    fn test_polar_circle_generators() {
        let mut b = PolarModelBuilder::new();
        for i in 0..60 {
            b.add_multi_point(&MultiPointXY::single(0.1 * i as f64, 2.0));
        }
        assert_eq!(b.len(), 60);
        // r - 2 = 0
        let (m, which) = best_signature(&b, &[vec![0, 4, 5], vec![0, 1]]);
        assert_eq!(which, 1);
        assert!(m.fit < -10.0);
        assert_relative_eq!(m.model[0] / m.model[1], -2.0, epsilon = 1e-8);
    }

    #[test]
    fn test_pruning() {
        let mut v = vec![1.0, 1e-12, -0.5, -1e-10];
        assert_eq!(prune_model(&mut v), 2);
        assert_eq!(v, vec![1.0, 0.0, -0.5, 0.0]);
    }
}
