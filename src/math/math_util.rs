use crate::symbolic::rational_expression::ContinuedFraction;
use num::integer::gcd;
use num_traits::ToPrimitive;

/// smallest positive subnormal double, used to keep tolerances strictly positive
pub const DOUBLE_MIN: f64 = 4.9e-324;

/// Format `x` with at most `digits` fraction digits, no grouping and no trailing zeros.
/// Negative `digits` keeps full precision. Never uses exponent notation, so the result
/// can be parsed back into an expression.
pub fn trim_double(x: f64, digits: i32) -> String {
    if x.is_nan() {
        return "NaN".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "infinity" } else { "-infinity" }.to_string();
    }
    let s = if digits < 0 {
        format!("{}", x)
    } else {
        format!("{:.*}", digits as usize, x)
    };
    let s = if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    };
    if s == "-0" { "0".to_string() } else { s }
}

pub fn log2(a: f64) -> f64 {
    a.log2()
}

pub fn log10(a: f64) -> f64 {
    a.log10()
}

/// ln(1 + x), accurate near zero
pub fn log_one_plus_x(x: f64) -> f64 {
    x.ln_1p()
}

/// |v| <= 1e-6 * tolerance; a zero tolerance means "exactly zero"
pub fn is_within_tolerance(v: f64, tolerance: f64) -> bool {
    v.abs() <= 1.0e-6 * tolerance
}

pub fn is_nearly_integer(x: f64) -> bool {
    is_within_tolerance(x - x.round_ties_even(), x.abs())
}

/// Scale a coefficient vector so that its first significant entry is 1, then look for the
/// smallest multiplier up to `lim` turning every entry into an integer.
pub fn make_integer(x: &[f64], lim: usize) -> Vec<f64> {
    let mx = x.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
    let Some(l) = x
        .iter()
        .position(|v| !is_within_tolerance(*v, mx + DOUBLE_MIN))
    else {
        return x.to_vec();
    };
    let t = 1.0 / x[l];
    let scaled: Vec<f64> = x.iter().map(|v| v * t).collect();
    for m in 1..=lim {
        let m = m as f64;
        if scaled.iter().all(|v| is_nearly_integer(m * v)) {
            return scaled.iter().map(|v| (m * v).round_ties_even()).collect();
        }
    }
    scaled
}

/// angle mapped into (-180, 180]
pub fn normalize_angle_in_degrees(angle: f64) -> f64 {
    let num_turns = 0.5 + angle / 360.0;
    let next_turn = num_turns.ceil();
    let fractional_turn = 1.0 + num_turns - next_turn;
    360.0 * (fractional_turn - 0.5)
}

/// integer GCD of a coefficient vector; 1 when an entry does not fit an i64
pub fn gcd_of(r: &[f64]) -> i64 {
    let ints: Option<Vec<i64>> = r.iter().map(|v| v.to_i64()).collect();
    match ints {
        None => 1,
        Some(v) if v.is_empty() => 1,
        Some(v) => v.iter().skip(1).fold(v[0], |acc, b| gcd(acc, *b)),
    }
}

fn as_int_string(v: f64) -> String {
    v.round_ties_even()
        .to_i64()
        .map(|i| i.to_string())
        .unwrap_or_else(|| trim_double(v, 0))
}

/// `n/d` (or `n`) when `x` is a rational with numerator and denominator bounded by `lim`
pub fn equivalent_rational_string(x: f64, lim: i64) -> Option<String> {
    if !x.is_finite() {
        return None;
    }
    let (n, d) = ContinuedFraction::new(x, 20).rational_parts()?;
    let lim = lim as f64;
    if n.abs() > lim || d.abs() > lim {
        return None;
    }
    if d == 1.0 {
        return Some(as_int_string(n));
    }
    Some(format!("{}/{}", as_int_string(n), as_int_string(d)))
}

/// rational string, or `approx. x` with 4 digits
pub fn rational_equivalent(x: f64, lim: i64) -> String {
    equivalent_rational_string(x, lim).unwrap_or_else(|| format!("approx. {}", trim_double(x, 4)))
}

/// the two real roots of x^2 + c1*x + c0, smaller first; None when complex
pub fn monic_quadratic_roots(c0: f64, c1: f64) -> Option<[f64; 2]> {
    let b2 = -0.5 * c1;
    let d2 = b2 * b2 - c0;
    if d2 < 0.0 {
        return None;
    }
    let d = d2.sqrt();
    Some([b2 - d, b2 + d])
}

/// Exact form of `x` as a rational or as a root of an integer quadratic, e.g. `1 - sqrt(2)`.
pub fn quadratic_representation_string(x: f64, lim: i64) -> Option<String> {
    if x == 0.0 {
        return Some("0".to_string());
    }
    if !x.is_finite() {
        return None;
    }
    let mut r = ContinuedFraction::new(x, 20).polynomial_coefficients();
    let limf = lim as f64;
    match r.len() {
        2 => {
            if r[0].abs() > limf || r[1].abs() > limf {
                return None;
            }
            r[1] = -r[1];
            if r[0] < 0.0 {
                r[0] = -r[0];
                r[1] = -r[1];
            }
            if r[0] == 1.0 {
                return Some(as_int_string(r[1]));
            }
            Some(format!("{}/{}", as_int_string(r[1]), as_int_string(r[0])))
        }
        3 => {
            let d = gcd_of(&r);
            if d == 0 {
                return None;
            }
            for v in r.iter_mut() {
                *v /= d as f64;
            }
            if r.iter().any(|v| v.abs() > limf) {
                return None;
            }
            let roots = monic_quadratic_roots(r[2] / r[0], r[1] / r[0])?;
            let which = if (x - roots[0]).abs() < (x - roots[1]).abs() { 0 } else { 1 };
            pretty_print_q_root(r[0], r[1], r[2], which, lim)
        }
        _ => None,
    }
}

/// root `which` (0 = smaller) of a*x^2 + b*x + c written as `h +- sqrt(d)`
pub fn pretty_print_q_root(a: f64, b: f64, c: f64, which: usize, lim: i64) -> Option<String> {
    if a == 0.0 {
        return equivalent_rational_string(-b / c, lim);
    }
    if b == 0.0 {
        let inner = equivalent_rational_string(-c / a, lim)?;
        return Some(if which == 1 {
            format!("sqrt({})", inner)
        } else {
            format!("-sqrt({})", inner)
        });
    }
    let h = -0.5 * b / a;
    let d = h * h - c / a;
    let h_string = equivalent_rational_string(h, lim)?;
    let d_string = equivalent_rational_string(d, lim)?;
    let sign = if which == 1 { " + " } else { " - " };
    Some(format!("{}{}sqrt({})", h_string, sign, d_string))
}
