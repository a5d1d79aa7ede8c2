//! Drawing helpers shared by the chart renderers

use crate::style::{fading_segments, RenderContext};
use covid_common::{truncate_string, Result};
use plotters::coord::{CoordTranslate, Shift};
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use plotters::style::text_anchor::{HPos, Pos, VPos};

/// Font size of region and reference labels.
pub const LABEL_FONT_SIZE: u32 = 16;
/// Font size of tick labels.
pub const TICK_FONT_SIZE: u32 = 15;
/// Font size of axis descriptions.
pub const AXIS_FONT_SIZE: u32 = 20;
/// Font size of the attribution corner.
pub const ATTRIBUTION_FONT_SIZE: u32 = 13;

const MAX_LABEL_CHARS: usize = 24;

/// Draws one region: fading segments, a marker on the latest point and the
/// region name next to it in the same colour.
pub fn draw_trajectory<DB, CT>(
    chart: &mut ChartContext<'_, DB, CT>,
    points: &[(f64, f64)],
    label: &str,
    color: RGBColor,
    ctx: &RenderContext,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: std::error::Error + Send + Sync + 'static,
    CT: CoordTranslate<From = (f64, f64)>,
{
    let segments = fading_segments(points, &ctx.fade);
    chart.draw_series(segments.iter().map(|segment| {
        PathElement::new(
            vec![segment.from, segment.to],
            color.mix(segment.alpha).stroke_width(ctx.fade.stroke_width),
        )
    }))?;

    if let Some(last) = segments.last().filter(|s| s.terminal) {
        chart.draw_series(std::iter::once(Circle::new(
            last.to,
            ctx.fade.marker_size,
            color.filled(),
        )))?;
    }

    if let Some(&end) = points.last() {
        draw_end_label(chart, end, label, color, ctx)?;
    }
    Ok(())
}

/// Draws a dashed reference line in the accent colour, labelled at its end.
pub fn draw_reference<DB, CT>(
    chart: &mut ChartContext<'_, DB, CT>,
    points: &[(f64, f64)],
    label: &str,
    ctx: &RenderContext,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: std::error::Error + Send + Sync + 'static,
    CT: CoordTranslate<From = (f64, f64)>,
{
    if points.len() < 2 {
        tracing::debug!(label, "Reference line outside the plotted range, skipped");
        return Ok(());
    }

    chart.draw_series(DashedLineSeries::new(
        points.iter().copied(),
        10,
        6,
        ctx.accent.stroke_width(ctx.fade.stroke_width),
    ))?;

    if let Some(&end) = points.last() {
        draw_end_label(chart, end, label, ctx.accent, ctx)?;
    }
    Ok(())
}

fn draw_end_label<DB, CT>(
    chart: &mut ChartContext<'_, DB, CT>,
    at: (f64, f64),
    label: &str,
    color: RGBColor,
    ctx: &RenderContext,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: std::error::Error + Send + Sync + 'static,
    CT: CoordTranslate<From = (f64, f64)>,
{
    let font = (ctx.font_family.as_str(), LABEL_FONT_SIZE)
        .into_font()
        .color(&color)
        .pos(Pos::new(HPos::Left, VPos::Center));

    chart.draw_series(std::iter::once(
        EmptyElement::at(at) + Text::new(truncate_string(label, MAX_LABEL_CHARS), (8, 0), font),
    ))?;
    Ok(())
}

/// Data source and generation time in the bottom right corner.
pub fn draw_attribution<DB>(root: &DrawingArea<DB, Shift>, ctx: &RenderContext) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: std::error::Error + Send + Sync + 'static,
{
    let (width, height) = root.dim_in_pixel();
    let font = (ctx.font_family.as_str(), ATTRIBUTION_FONT_SIZE)
        .into_font()
        .color(&RGBColor(90, 90, 90))
        .pos(Pos::new(HPos::Right, VPos::Bottom));

    root.draw(&Text::new(
        ctx.attribution_line(),
        (width as i32 - 8, height as i32 - 6),
        font,
    ))?;
    Ok(())
}

/// `(day, value)` points of an aligned sequence.
pub fn day_points(values: &[f64]) -> Vec<(f64, f64)> {
    values
        .iter()
        .enumerate()
        .map(|(day, &value)| (day as f64, value))
        .collect()
}

/// Smallest and largest value, `None` when there are none.
pub fn value_bounds<'a, I>(values: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = &'a f64>,
{
    values.into_iter().fold(None, |bounds, &v| match bounds {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

/// Padded log-axis range around `bounds`. Degenerate or missing bounds get a
/// decade around the value.
pub fn log_axis_range(bounds: Option<(f64, f64)>, fallback: f64) -> std::ops::Range<f64> {
    let (lo, hi) = bounds.unwrap_or((fallback, fallback));
    let lo = if lo > 0.0 { lo } else { fallback.max(f64::MIN_POSITIVE) };
    let hi = hi.max(lo);
    if hi / lo < 1.5 {
        return (lo / 3.0)..(hi * 3.0);
    }
    (lo * 0.8)..(hi * 1.25)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_points() {
        assert_eq!(day_points(&[5.0, 8.0]), vec![(0.0, 5.0), (1.0, 8.0)]);
    }

    #[test]
    fn test_value_bounds() {
        assert_eq!(value_bounds(&[3.0, 1.0, 9.0]), Some((1.0, 9.0)));
        assert_eq!(value_bounds(&[] as &[f64]), None);
    }

    #[test]
    fn test_log_axis_range() {
        let range = log_axis_range(Some((100.0, 10_000.0)), 1.0);
        assert!(range.start < 100.0 && range.start > 0.0);
        assert!(range.end > 10_000.0);

        let flat = log_axis_range(Some((5.0, 5.0)), 1.0);
        assert!(flat.start < 5.0 && flat.end > 5.0);

        let empty = log_axis_range(None, 100.0);
        assert!(empty.start > 0.0 && empty.start < 100.0 && empty.end > 100.0);
    }
}
