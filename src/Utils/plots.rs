use crate::analysis::graph_trail::GraphTrail;
use crate::math::bounds::Bounds;
use std::error::Error;
use std::ops::Range;

/// x and y ranges of the drawing, widened when a side has zero extent
pub fn plot_ranges(b: &Bounds) -> (Range<f64>, Range<f64>) {
    let widen = |lo: f64, hi: f64| {
        if hi > lo { lo..hi } else { lo - 1.0..hi + 1.0 }
    };
    (widen(b.left, b.right), widen(b.bottom, b.top))
}

/// Draws every item's trails into one PNG. `items` pairs a legend label with its trails.
pub fn plot_trails(
    items: &[(String, Vec<GraphTrail>)],
    b: &Bounds,
    x_name: &str,
    y_name: &str,
    filename: &str,
) -> Result<(), Box<dyn Error>> {
    use plotters::prelude::*;
    let root_area = BitMapBackend::new(filename, (800, 600)).into_drawing_area();
    root_area.fill(&WHITE)?;
    let (xr, yr) = plot_ranges(b);
    let mut chart = ChartBuilder::on(&root_area)
        .caption(format!("{} vs {}", y_name, x_name), ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(30)
        .build_cartesian_2d(xr, yr)?;
    chart
        .configure_mesh()
        .x_desc(x_name)
        .y_desc(y_name)
        .draw()?;

    for (col, (label, trails)) in items.iter().enumerate() {
        for (i, trail) in trails.iter().enumerate() {
            let series: Vec<(f64, f64)> = trail.points().iter().map(|p| (p.x, p.y)).collect();
            let drawn = chart.draw_series(LineSeries::new(series, &Palette99::pick(col)))?;
            // one legend entry per item
            if i == 0 {
                drawn.label(label.as_str()).legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], &Palette99::pick(col))
                });
            }
        }
    }
    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    root_area.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plot_ranges() {
        let (x, y) = plot_ranges(&Bounds::new(-10.0, 10.0, 5.0, -5.0));
        assert_eq!(x, -10.0..10.0);
        assert_eq!(y, -5.0..5.0);
        let (x, _) = plot_ranges(&Bounds::new(2.0, 2.0, 1.0, 0.0));
        assert_eq!(x, 1.0..3.0);
    }
}
