//! Test helpers for renderer and pipeline tests.

use crate::style::RenderContext;
use crate::types::AlignedSeries;
use chrono::{TimeZone, Utc};
use covid_common::Region;
use plotters::prelude::*;

/// Render context with a fixed generation time, so output is reproducible.
pub fn render_context(width: u32, height: u32) -> RenderContext {
    let generated_at = Utc
        .with_ymd_and_hms(2020, 3, 14, 12, 0, 0)
        .single()
        .unwrap_or_default();
    let mut ctx = RenderContext::new(width, height, generated_at);
    ctx.attribution = "Test data".to_string();
    ctx
}

/// Two regions already aligned on a threshold of 100.
pub fn sample_series() -> AlignedSeries {
    [
        (
            Region::new("Italy"),
            vec![150.0, 229.0, 322.0, 453.0, 655.0, 888.0, 1128.0, 1694.0, 2036.0, 2502.0],
        ),
        (
            Region::new("Iran"),
            vec![139.0, 245.0, 388.0, 593.0, 978.0, 1501.0, 2336.0],
        ),
    ]
    .into_iter()
    .collect()
}

/// Panics unless text can be drawn on this machine. The `ttf` backend
/// resolves fonts from the system and fails on hosts without any installed,
/// so rendering tests call this first to fail with a clear cause.
pub fn require_fonts() {
    let mut buffer = vec![0u8; 64 * 32 * 3];
    let root = BitMapBackend::with_buffer(&mut buffer, (64, 32)).into_drawing_area();
    if let Err(e) = root.draw(&Text::new("0", (1, 1), ("sans-serif", 12).into_font())) {
        panic!("rendering tests need a system font for 'sans-serif' (install e.g. fonts-dejavu-core): {e}");
    }
}
