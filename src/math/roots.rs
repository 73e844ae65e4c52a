use log::debug;
use nalgebra::linalg::Schur;
use nalgebra::{Complex, DMatrix};
use std::cmp::Ordering;

/// imaginary parts below this (relative) are treated as numerical noise
const IMAGINARY_TOLERANCE: f64 = 1.0e-5;
/// roots closer than this (relative) are merged into one factor
const CLUSTER_TOLERANCE: f64 = 1.0e-4;
const MAX_NEWTON_ITER: usize = 50;
/// QR sweeps before the Schur form is given up for the Aberth iteration
const MAX_SCHUR_ITER: usize = 1000;
const MAX_ABERTH_ITER: usize = 500;

/// A real root together with how many times it repeats.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RootFactor {
    pub value: f64,
    pub multiplicity: usize,
}

impl RootFactor {
    pub fn new(value: f64, multiplicity: usize) -> Self {
        RootFactor {
            value,
            multiplicity,
        }
    }
}

/// Horner evaluation of a highest-first coefficient vector and of its derivative
fn eval_with_derivative(coeffs: &[f64], x: f64) -> (f64, f64) {
    let mut p = 0.0;
    let mut dp = 0.0;
    for c in coeffs {
        dp = dp * x + p;
        p = p * x + c;
    }
    (p, dp)
}

fn polish(coeffs: &[f64], mut x: f64) -> f64 {
    let (mut p, _) = eval_with_derivative(coeffs, x);
    for _ in 0..MAX_NEWTON_ITER {
        let (_, dp) = eval_with_derivative(coeffs, x);
        if dp == 0.0 || p == 0.0 {
            break;
        }
        let next = x - p / dp;
        let (np, _) = eval_with_derivative(coeffs, next);
        if !next.is_finite() || np.abs() >= p.abs() {
            break;
        }
        x = next;
        p = np;
    }
    x
}

fn is_real(z: &Complex<f64>) -> bool {
    z.im.abs() <= IMAGINARY_TOLERANCE * (1.0 + z.re.abs())
}

/// Eigenvalues of the companion matrix of the polynomial, real ones only. Falls back to
/// `aberth_roots` when the Schur iteration does not converge.
fn companion_real_roots(coeffs: &[f64]) -> Vec<f64> {
    let n = coeffs.len() - 1;
    let lead = coeffs[0];
    let mut companion = DMatrix::<f64>::zeros(n, n);
    for j in 0..n {
        companion[(0, j)] = -coeffs[j + 1] / lead;
    }
    for i in 1..n {
        companion[(i, i - 1)] = 1.0;
    }
    let eigenvalues: Vec<Complex<f64>> = match Schur::try_new(companion, f64::EPSILON, MAX_SCHUR_ITER) {
        Some(schur) => schur.complex_eigenvalues().iter().copied().collect(),
        None => {
            debug!("Schur form of degree {} companion did not converge", n);
            aberth_roots(coeffs)
        }
    };
    eigenvalues
        .iter()
        .filter(|z| is_real(z))
        .map(|z| polish(coeffs, z.re))
        .collect()
}

fn eval_complex(coeffs: &[f64], z: Complex<f64>) -> (Complex<f64>, Complex<f64>) {
    let mut p = Complex::new(0.0, 0.0);
    let mut dp = Complex::new(0.0, 0.0);
    for c in coeffs {
        dp = dp * z + p;
        p = p * z + *c;
    }
    (p, dp)
}

/// All complex roots by the Aberth-Ehrlich iteration, started on a circle whose radius
/// bounds the root moduli.
fn aberth_roots(coeffs: &[f64]) -> Vec<Complex<f64>> {
    let n = coeffs.len() - 1;
    let lead = coeffs[0];
    let radius = coeffs[1..]
        .iter()
        .enumerate()
        .map(|(k, c)| (c / lead).abs().powf(1.0 / (k + 1) as f64))
        .fold(0.0, f64::max)
        .max(f64::MIN_POSITIVE);
    let mut z: Vec<Complex<f64>> = (0..n)
        .map(|k| Complex::from_polar(radius, std::f64::consts::TAU * k as f64 / n as f64 + 0.4))
        .collect();
    for _ in 0..MAX_ABERTH_ITER {
        let mut largest_step: f64 = 0.0;
        for k in 0..n {
            let (p, dp) = eval_complex(coeffs, z[k]);
            if p.norm() == 0.0 {
                continue;
            }
            let ratio = p / dp;
            let repulsion: Complex<f64> = (0..n)
                .filter(|&j| j != k && z[j] != z[k])
                .map(|j| (z[k] - z[j]).inv())
                .sum();
            let step = ratio / (Complex::new(1.0, 0.0) - ratio * repulsion);
            if !step.re.is_finite() || !step.im.is_finite() {
                continue;
            }
            z[k] -= step;
            largest_step = largest_step.max(step.norm() / (1.0 + z[k].norm()));
        }
        if largest_step <= 1.0e-14 {
            break;
        }
    }
    z
}

fn quadratic_roots(a: f64, b: f64, c: f64) -> Vec<RootFactor> {
    let disc = b * b - 4.0 * a * c;
    let scale = b * b + (4.0 * a * c).abs();
    if disc.abs() <= 1.0e-12 * scale {
        return vec![RootFactor::new(-0.5 * b / a, 2)];
    }
    if disc < 0.0 {
        return Vec::new();
    }
    // avoids cancellation between -b and sqrt(disc)
    let q = -0.5 * (b + b.signum() * disc.sqrt());
    if q == 0.0 {
        return vec![RootFactor::new(0.0, 2)];
    }
    let mut r = vec![RootFactor::new(q / a, 1), RootFactor::new(c / q, 1)];
    r.sort_by(|x, y| x.value.partial_cmp(&y.value).unwrap_or(Ordering::Equal));
    r
}

fn cluster(mut values: Vec<f64>) -> Vec<RootFactor> {
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let mut factors: Vec<RootFactor> = Vec::new();
    let mut sums: Vec<f64> = Vec::new();
    for v in values {
        if let Some(last) = factors.last_mut() {
            let mean = sums[sums.len() - 1] / last.multiplicity as f64;
            if (v - mean).abs() <= CLUSTER_TOLERANCE * (1.0 + mean.abs()) {
                last.multiplicity += 1;
                let n = sums.len() - 1;
                sums[n] += v;
                last.value = sums[n] / last.multiplicity as f64;
                continue;
            }
        }
        factors.push(RootFactor::new(v, 1));
        sums.push(v);
    }
    factors
}

/// Real roots of a polynomial given by highest-first coefficients, sorted ascending,
/// with repeated roots merged into one factor.
pub fn real_roots_with_multiplicities(coeffs: &[f64]) -> Vec<RootFactor> {
    let Some(first) = coeffs.iter().position(|c| *c != 0.0) else {
        return Vec::new();
    };
    let mut c: Vec<f64> = coeffs[first..].to_vec();
    let mut zero_multiplicity = 0;
    while c.len() > 1 && c[c.len() - 1] == 0.0 {
        c.pop();
        zero_multiplicity += 1;
    }
    let mut factors = match c.len() {
        0 | 1 => Vec::new(),
        2 => vec![RootFactor::new(-c[1] / c[0], 1)],
        3 => quadratic_roots(c[0], c[1], c[2]),
        _ => cluster(companion_real_roots(&c)),
    };
    if zero_multiplicity > 0 {
        factors.push(RootFactor::new(0.0, zero_multiplicity));
        factors.sort_by(|a, b| a.value.partial_cmp(&b.value).unwrap_or(Ordering::Equal));
    }
    factors
}

/// real roots, a root of multiplicity m repeated m times
pub fn real_roots(coeffs: &[f64]) -> Vec<f64> {
    real_roots_with_multiplicities(coeffs)
        .iter()
        .flat_map(|f| std::iter::repeat_n(f.value, f.multiplicity))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_linear_and_quadratic() {
        let r = real_roots(&[2.0, -4.0]);
        assert_eq!(r, vec![2.0]);
        let r = real_roots(&[1.0, 0.0, -4.0]);
        assert_eq!(r.len(), 2);
        assert_relative_eq!(r[0], -2.0);
        assert_relative_eq!(r[1], 2.0);
        assert!(real_roots(&[1.0, 0.0, 1.0]).is_empty());
        let f = real_roots_with_multiplicities(&[1.0, -2.0, 1.0]);
        assert_eq!(f, vec![RootFactor::new(1.0, 2)]);
    }

    #[test]
    fn test_cubic_with_three_real_roots() {
        // (x+1)(x-2)(x-3)
        let r = real_roots(&[1.0, -4.0, 1.0, 6.0]);
        assert_eq!(r.len(), 3);
        assert_relative_eq!(r[0], -1.0, epsilon = 1e-9);
        assert_relative_eq!(r[1], 2.0, epsilon = 1e-9);
        assert_relative_eq!(r[2], 3.0, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_roots_are_split_off() {
        // x^3 - x^2 = x^2 (x - 1)
        let f = real_roots_with_multiplicities(&[1.0, -1.0, 0.0, 0.0]);
        assert_eq!(f.len(), 2);
        assert_eq!(f[0], RootFactor::new(0.0, 2));
        assert_relative_eq!(f[1].value, 1.0);
    }

    #[test]
    fn test_quartic_with_complex_pair() {
        // (x^2 + 1)(x - 1)(x + 2)
        let r = real_roots(&[1.0, 1.0, -1.0, 1.0, -2.0]);
        assert_eq!(r.len(), 2);
        assert_relative_eq!(r[0], -2.0, epsilon = 1e-9);
        assert_relative_eq!(r[1], 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_random_distinct_integer_roots() {
        use approx::assert_abs_diff_eq;
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..20 {
            let mut roots: Vec<f64> = Vec::new();
            while roots.len() < 4 {
                let r = rng.random_range(-6..=6) as f64;
                if !roots.contains(&r) {
                    roots.push(r);
                }
            }
            roots.sort_by(f64::total_cmp);
            // expand (x - r0)(x - r1)... highest first
            let mut coeffs = vec![1.0];
            for r in &roots {
                let mut next = coeffs.clone();
                next.push(0.0);
                for (i, c) in coeffs.iter().enumerate() {
                    next[i + 1] -= r * c;
                }
                coeffs = next;
            }
            let found = real_roots(&coeffs);
            assert_eq!(found.len(), 4, "roots {:?}", roots);
            for (a, b) in found.iter().zip(&roots) {
                assert_abs_diff_eq!(*a, *b, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn test_quartic_without_real_roots() {
        assert!(real_roots(&[1.0, 0.0, 0.0, 0.0, 1.0]).is_empty());
    }

    #[test]
    fn test_fourth_roots_of_ten() {
        // x^4 - 10 = (x^2 - sqrt 10)(x^2 + sqrt 10)
        let r = real_roots(&[1.0, 0.0, 0.0, 0.0, -10.0]);
        let q = 10f64.powf(0.25);
        assert_eq!(r.len(), 2);
        assert_relative_eq!(r[0], -q, epsilon = 1e-9);
        assert_relative_eq!(r[1], q, epsilon = 1e-9);
    }

    #[test]
    fn test_sixth_roots_of_unity() {
        let r = real_roots(&[1.0, 0.0, 0.0, 0.0, 0.0, 0.0, -1.0]);
        assert_eq!(r.len(), 2);
        assert_relative_eq!(r[0], -1.0, epsilon = 1e-9);
        assert_relative_eq!(r[1], 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_aberth_finds_every_root() {
        // x^5 + x = x (x^4 + 1)
        let z = aberth_roots(&[1.0, 0.0, 0.0, 0.0, 1.0, 0.0]);
        assert_eq!(z.len(), 5);
        let real: Vec<&Complex<f64>> = z.iter().filter(|z| is_real(z)).collect();
        assert_eq!(real.len(), 1);
        assert!(real[0].norm() < 1e-9);
        for w in &z {
            let (p, _) = eval_complex(&[1.0, 0.0, 0.0, 0.0, 1.0, 0.0], *w);
            assert!(p.norm() < 1e-9);
        }
        // (x-1)(x-2)(x-3)(x+4)
        let mut r: Vec<f64> = aberth_roots(&[1.0, -2.0, -13.0, 38.0, -24.0])
            .iter()
            .map(|z| z.re)
            .collect();
        r.sort_by(f64::total_cmp);
        for (a, b) in r.iter().zip([-4.0, 1.0, 2.0, 3.0]) {
            assert_relative_eq!(*a, b, epsilon = 1e-8);
        }
    }
}
