//! Render context, colour palette and fading-segment styling

use chrono::{DateTime, Utc};
use covid_common::{attribution_text, CovidError, Result};
use covid_config::{ChartsConfig, FadeConfig};
use plotters::style::RGBColor;

/// Ten-colour category palette, cycled in region order.
pub const CATEGORY_PALETTE: [RGBColor; 10] = [
    RGBColor(31, 119, 180),  // Blue
    RGBColor(255, 127, 14),  // Orange
    RGBColor(44, 160, 44),   // Green
    RGBColor(214, 39, 40),   // Red
    RGBColor(148, 103, 189), // Purple
    RGBColor(140, 86, 75),   // Brown
    RGBColor(227, 119, 194), // Pink
    RGBColor(127, 127, 127), // Gray
    RGBColor(188, 189, 34),  // Olive
    RGBColor(23, 190, 207),  // Cyan
];

/// Accent used for reference curves and their labels.
pub const ACCENT: RGBColor = RGBColor(0, 0, 0);

/// Parses `#RRGGBB`.
pub fn parse_hex_color(value: &str) -> Option<RGBColor> {
    let hex = value.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some(RGBColor(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Cyclic colour assignment. One cycle per rendered chart.
#[derive(Debug, Clone)]
pub struct ColorCycle<'a> {
    palette: &'a [RGBColor],
    next: usize,
}

impl<'a> ColorCycle<'a> {
    pub fn new(palette: &'a [RGBColor]) -> Self {
        Self { palette, next: 0 }
    }

    /// Next colour, wrapping once the palette is exhausted.
    pub fn next_color(&mut self) -> RGBColor {
        if self.palette.is_empty() {
            return ACCENT;
        }
        let color = self.palette[self.next % self.palette.len()];
        self.next += 1;
        color
    }
}

/// Line styling shared by every trajectory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeStyle {
    /// Opacity of the oldest segment.
    pub floor_alpha: f64,
    pub stroke_width: u32,
    /// Terminal marker radius.
    pub marker_size: u32,
}

impl Default for FadeStyle {
    fn default() -> Self {
        Self::from(&FadeConfig::default())
    }
}

impl From<&FadeConfig> for FadeStyle {
    fn from(config: &FadeConfig) -> Self {
        Self {
            floor_alpha: config.floor_alpha,
            stroke_width: config.stroke_width,
            marker_size: config.marker_size,
        }
    }
}

/// One line segment between consecutive points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: (f64, f64),
    pub to: (f64, f64),
    pub alpha: f64,
    /// Set on the most recent segment only; it carries the marker.
    pub terminal: bool,
}

/// Opacity of segment `index` out of `count`: linear up to 1.0, never below `floor`.
pub fn segment_alpha(index: usize, count: usize, floor: f64) -> f64 {
    if count == 0 {
        return 1.0;
    }
    ((index + 1) as f64 / count as f64).max(floor).min(1.0)
}

/// Splits a polyline into segments of increasing opacity.
pub fn fading_segments(points: &[(f64, f64)], style: &FadeStyle) -> Vec<Segment> {
    let count = points.len().saturating_sub(1);
    points
        .windows(2)
        .enumerate()
        .map(|(index, pair)| Segment {
            from: pair[0],
            to: pair[1],
            alpha: segment_alpha(index, count, style.floor_alpha),
            terminal: index + 1 == count,
        })
        .collect()
}

/// Everything a renderer needs besides its data. Built once per run and
/// passed by reference.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub width: u32,
    pub height: u32,
    pub palette: Vec<RGBColor>,
    pub accent: RGBColor,
    pub fade: FadeStyle,
    pub font_family: String,
    /// Data source named in the attribution corner.
    pub attribution: String,
    pub generated_at: DateTime<Utc>,
}

impl RenderContext {
    pub fn new(width: u32, height: u32, generated_at: DateTime<Utc>) -> Self {
        Self {
            width,
            height,
            palette: CATEGORY_PALETTE.to_vec(),
            accent: ACCENT,
            fade: FadeStyle::default(),
            font_family: "sans-serif".to_string(),
            attribution: String::new(),
            generated_at,
        }
    }

    /// Context described by the `charts` section. An empty palette selects
    /// [`CATEGORY_PALETTE`].
    pub fn from_config(config: &ChartsConfig, generated_at: DateTime<Utc>) -> Result<Self> {
        let palette = if config.palette.is_empty() {
            CATEGORY_PALETTE.to_vec()
        } else {
            config
                .palette
                .iter()
                .map(|c| {
                    parse_hex_color(c).ok_or_else(|| {
                        CovidError::validation_field(format!("'{c}' is not a #RRGGBB color"), "charts.palette")
                    })
                })
                .collect::<Result<Vec<_>>>()?
        };

        Ok(Self {
            width: config.width,
            height: config.height,
            palette,
            accent: ACCENT,
            fade: FadeStyle::from(&config.fade),
            font_family: config.font_family.clone(),
            attribution: config.attribution.clone(),
            generated_at,
        })
    }

    /// A fresh colour cycle starting at the first palette entry.
    pub fn color_cycle(&self) -> ColorCycle<'_> {
        ColorCycle::new(&self.palette)
    }

    /// Attribution annotation text.
    pub fn attribution_line(&self) -> String {
        attribution_text(&self.attribution, self.generated_at)
    }

    /// Size of an RGB8 buffer holding one frame.
    pub fn buffer_len(&self) -> usize {
        self.width as usize * self.height as usize * 3
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2020, 3, 14, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#1f77b4"), Some(RGBColor(31, 119, 180)));
        assert_eq!(parse_hex_color("#FFFFFF"), Some(RGBColor(255, 255, 255)));
        assert_eq!(parse_hex_color("1f77b4"), None);
        assert_eq!(parse_hex_color("#zz0000"), None);
        assert_eq!(parse_hex_color("#fff"), None);
    }

    #[test]
    fn test_color_cycle_wraps() {
        let palette = [RGBColor(1, 0, 0), RGBColor(0, 1, 0)];
        let mut cycle = ColorCycle::new(&palette);
        let colors: Vec<RGBColor> = (0..5).map(|_| cycle.next_color()).collect();
        assert_eq!(colors[0], colors[2]);
        assert_eq!(colors[1], colors[3]);
        assert_eq!(colors[4], RGBColor(1, 0, 0));
    }

    #[test]
    fn test_fresh_cycle_per_render() {
        let ctx = RenderContext::new(100, 100, at());
        let mut first = ctx.color_cycle();
        first.next_color();
        first.next_color();
        assert_eq!(ctx.color_cycle().next_color(), CATEGORY_PALETTE[0]);
    }

    #[test]
    fn test_segment_alpha_ramp() {
        let style = FadeStyle { floor_alpha: 0.1, stroke_width: 2, marker_size: 4 };
        let points: Vec<(f64, f64)> = (0..11).map(|i| (i as f64, 100.0 + i as f64)).collect();
        let segments = fading_segments(&points, &style);

        assert_eq!(segments.len(), 10);
        assert!((segments[0].alpha - 0.1).abs() < 1e-12);
        assert_eq!(segments[9].alpha, 1.0);
        assert!(segments.windows(2).all(|w| w[0].alpha <= w[1].alpha));
        assert_eq!(segments.iter().filter(|s| s.terminal).count(), 1);
        assert!(segments[9].terminal);
        assert_eq!(segments[9].to, (10.0, 110.0));
    }

    #[test]
    fn test_floor_applies_to_long_lines() {
        let style = FadeStyle { floor_alpha: 0.1, stroke_width: 2, marker_size: 4 };
        let points: Vec<(f64, f64)> = (0..30).map(|i| (i as f64, 1.0)).collect();
        let segments = fading_segments(&points, &style);
        assert_eq!(segments[0].alpha, 0.1);
    }

    #[test]
    fn test_single_point_has_no_segments() {
        assert!(fading_segments(&[(0.0, 5.0)], &FadeStyle::default()).is_empty());
    }

    #[test]
    fn test_context_from_config() {
        let mut config = ChartsConfig::default();
        config.palette = vec!["#000001".to_string(), "#000002".to_string()];
        let ctx = RenderContext::from_config(&config, at()).unwrap();

        assert_eq!(ctx.palette, vec![RGBColor(0, 0, 1), RGBColor(0, 0, 2)]);
        assert_eq!(ctx.buffer_len(), 1600 * 900 * 3);
        assert_eq!(ctx.accent, ACCENT);
        assert!(ctx.attribution_line().contains("Johns Hopkins"));

        config.palette = vec!["blue".to_string()];
        assert!(RenderContext::from_config(&config, at()).is_err());
    }
}
