use std::ops::Range;
use std::path::Path;

use plotters::prelude::*;

use crate::color::to_rgb_color;
use crate::config::PlotStyle;
use crate::data::error::ConvertError;
use crate::data::model::RotatedFrame;

use super::write_atomically;

/// Render the hysteresis loop of `frame` to `dest` (PNG, written atomically).
///
/// Two curves (M_long, M_trans) against the field axis, with zero guide lines,
/// axis labels and a legend. `title` is usually the source file name.
pub fn export_png(
    frame: &RotatedFrame,
    title: &str,
    dest: &Path,
    style: &PlotStyle,
) -> Result<(), ConvertError> {
    if frame.is_empty() {
        return Err(ConvertError::EmptyTable);
    }
    write_atomically(dest, |tmp| {
        draw_loop(frame, title, tmp.path(), style).map_err(|e| ConvertError::Render(e.to_string()))
    })
}

/// Axis range covering `values` and 0 with a 5% margin on both sides.
pub fn axis_range(values: impl IntoIterator<Item = f64>) -> Range<f64> {
    let (lo, hi) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((0.0_f64, 0.0_f64), |(lo, hi), v| (lo.min(v), hi.max(v)));

    let span = hi - lo;
    if span <= f64::EPSILON {
        return (lo - 1.0)..(hi + 1.0);
    }
    let margin = 0.05 * span;
    (lo - margin)..(hi + margin)
}

fn draw_loop(
    frame: &RotatedFrame,
    title: &str,
    path: &Path,
    style: &PlotStyle,
) -> Result<(), Box<dyn std::error::Error>> {
    let scale = style.scale();
    let px = |v: f64| (v * scale).round() as u32;
    let pt = |v: f64| v * scale;

    let root = BitMapBackend::new(path, (style.width, style.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let x_range = axis_range(frame.field().iter().copied());
    let y_range = axis_range(
        frame
            .m_longitudinal()
            .iter()
            .chain(frame.m_transversal())
            .copied(),
    );
    let (x0, x1) = (x_range.start, x_range.end);
    let (y0, y1) = (y_range.start, y_range.end);

    let mut chart = ChartBuilder::on(&root)
        .margin(px(10.0))
        .caption(title, ("sans-serif", pt(14.0)))
        .set_left_and_bottom_label_area_size(px(45.0))
        .build_cartesian_2d(x_range, y_range)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("H / mT")
        .y_desc("M / Msat")
        .label_style(("sans-serif", pt(10.0)))
        .axis_desc_style(("sans-serif", pt(12.0)))
        .draw()?;

    // zero guide lines
    chart.draw_series(LineSeries::new(vec![(x0, 0.0), (x1, 0.0)], BLACK.stroke_width(1)))?;
    chart.draw_series(LineSeries::new(vec![(0.0, y0), (0.0, y1)], BLACK.stroke_width(1)))?;

    let lw = style.line_width;
    let long = to_rgb_color(style.colors.longitudinal);
    let trans = to_rgb_color(style.colors.transversal);

    chart
        .draw_series(LineSeries::new(frame.longitudinal_points(), long.stroke_width(lw)))?
        .label("M_long")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], long.stroke_width(lw)));

    chart
        .draw_series(LineSeries::new(frame.transversal_points(), trans.stroke_width(lw)))?
        .label("M_trans")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], trans.stroke_width(lw)));

    chart
        .configure_series_labels()
        .label_font(("sans-serif", pt(10.0)))
        .border_style(&BLACK)
        .background_style(&WHITE.mix(0.8))
        .draw()?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::RawTable;
    use crate::data::rotate::rotate;

    #[test]
    fn test_axis_range_includes_zero() {
        let r = axis_range([10.0, 20.0]);
        assert!(r.start < 0.0 && r.end > 20.0);
        assert!((r.start + 1.0).abs() < 1e-12);
        assert!((r.end - 21.0).abs() < 1e-12);

        let r = axis_range([-5.0, -1.0]);
        assert!(r.start < -5.0 && r.end > 0.0);
    }

    #[test]
    fn test_axis_range_degenerate() {
        assert_eq!(axis_range([0.0, 0.0]), -1.0..1.0);
        assert_eq!(axis_range(std::iter::empty()), -1.0..1.0);
    }

    #[test]
    fn test_axis_range_skips_non_finite() {
        let r = axis_range([f64::NAN, 1.0, f64::INFINITY]);
        assert!(r.end.is_finite());
        assert!(r.end > 1.0);
    }

    #[test]
    fn test_empty_frame_is_rejected_before_drawing() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("empty.odt.png");
        let frame = rotate(&RawTable::default(), 0).unwrap();
        let err = export_png(&frame, "empty.odt", &dest, &PlotStyle::default()).unwrap_err();
        assert!(matches!(err, ConvertError::EmptyTable));
        assert!(!dest.exists());
    }
}
