use crate::math::points::{MultiPointXY, PointRT, PointXY};

/// Points stored as `(theta, r)` converted to cartesian `(x, y)`.
pub fn to_cartesian(polars: &[PointXY]) -> Vec<PointXY> {
    polars
        .iter()
        .map(|p| PointRT::new(p.y, p.x).to_cartesian())
        .collect()
}

/// Exactly `length` points from `x[left..=right]`, with linearly interpolated points spread
/// evenly over the gaps. The first and last data points are kept as they are.
pub fn interpolate_points(
    left: usize,
    right: usize,
    length: usize,
    x: &[f64],
    y: &[f64],
) -> Vec<MultiPointXY> {
    if left == right {
        return fill_points(left, length, x, y);
    }
    let gaps = right - left;
    if length <= gaps + 1 {
        return decimate_points(left, right, length, x, y);
    }
    let spare = length - (gaps + 1);
    let inserted_up_to = |g: usize| (spare * g + gaps / 2) / gaps;
    let mut r = Vec::with_capacity(length);
    r.push(MultiPointXY::single(x[left], y[left]));
    for g in 1..=gaps {
        let k = inserted_up_to(g) - inserted_up_to(g - 1);
        let (x0, y0) = (x[left + g - 1], y[left + g - 1]);
        let (x1, y1) = (x[left + g], y[left + g]);
        let steps = (k + 1) as f64;
        for s in 1..=k {
            let t = s as f64 / steps;
            r.push(MultiPointXY::single(x0 + t * (x1 - x0), y0 + t * (y1 - y0)));
        }
        r.push(MultiPointXY::single(x1, y1));
    }
    r
}

/// `length` points picked from `x[left..=right]` at (rounded) even index steps.
pub fn decimate_points(
    left: usize,
    right: usize,
    length: usize,
    x: &[f64],
    y: &[f64],
) -> Vec<MultiPointXY> {
    if length < 2 {
        return fill_points(left, length, x, y);
    }
    let step = (right - left + 1) as f64 / length as f64;
    let last = length - 1;
    let mut r = Vec::with_capacity(length);
    r.push(MultiPointXY::single(x[left], y[left]));
    for i in 1..last {
        let index = ((left as f64 + i as f64 * step).round() as usize).min(right);
        r.push(MultiPointXY::single(x[index], y[index]));
    }
    r.push(MultiPointXY::single(x[right], y[right]));
    r
}

pub fn copy_points(left: usize, right: usize, x: &[f64], y: &[f64]) -> Vec<MultiPointXY> {
    (left..=right)
        .map(|i| MultiPointXY::single(x[i], y[i]))
        .collect()
}

/// `length` copies of one data point
pub fn fill_points(index: usize, length: usize, x: &[f64], y: &[f64]) -> Vec<MultiPointXY> {
    vec![MultiPointXY::single(x[index], y[index]); length]
}
