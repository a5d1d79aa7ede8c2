//! Confirmed cases against deaths, both on log axes

use crate::drawing::{
    draw_attribution, draw_reference, draw_trajectory, log_axis_range, value_bounds, AXIS_FONT_SIZE,
    TICK_FONT_SIZE,
};
use crate::reference::reference_curve;
use crate::renderer::GraphRenderer;
use crate::sink::ChartArtifact;
use crate::style::RenderContext;
use crate::types::{format_count, AlignedSeries};
use covid_common::{Quantity, Region, Result};
use covid_config::ChartsConfig;
use plotters::prelude::*;

/// Sample points along the case-fatality diagonal.
pub const DIAGONAL_SAMPLES: usize = 16;

/// Trajectory of every region present in both series, deaths on x and
/// confirmed cases on y, with a constant case-fatality diagonal.
#[derive(Debug, Clone)]
pub struct PairwiseRenderer {
    output_id: String,
    case_fatality_ratio: f64,
}

impl PairwiseRenderer {
    pub fn new(output_id: impl Into<String>, case_fatality_ratio: f64) -> Self {
        Self {
            output_id: output_id.into(),
            case_fatality_ratio,
        }
    }

    pub fn from_config(config: &ChartsConfig) -> Self {
        Self::new(&config.pairwise.output_id, config.pairwise.case_fatality_ratio)
    }

    pub fn output_id(&self) -> &str {
        &self.output_id
    }

    /// Legend text of the diagonal, e.g. "3% case fatality".
    pub fn reference_label(&self) -> String {
        format!("{}% case fatality", format_count(self.case_fatality_ratio * 100.0))
    }

    /// `(deaths, cases)` points per common region, each cut to the shorter
    /// of its two sequences. Order follows `cases`.
    pub fn trajectories(
        &self,
        cases: &AlignedSeries,
        deaths: &AlignedSeries,
    ) -> Vec<(Region, Vec<(f64, f64)>)> {
        cases
            .common_regions(deaths)
            .filter_map(|region| {
                let y = cases.get(region.as_str())?;
                let x = deaths.get(region.as_str())?;
                let points = x.iter().copied().zip(y.iter().copied()).collect();
                Some((region.clone(), points))
            })
            .collect()
    }

    /// Diagonal of constant deaths/cases ratio, clipped to the part visible
    /// in both `x_range` and `y_range`. Deaths are sampled geometrically so
    /// the points sit evenly on log axes; empty when nothing is visible.
    pub fn reference_diagonal(
        &self,
        x_range: &std::ops::Range<f64>,
        y_range: &std::ops::Range<f64>,
    ) -> Vec<(f64, f64)> {
        let ratio = self.case_fatality_ratio;
        let lo = x_range.start.max(y_range.start * ratio);
        let hi = x_range.end.min(y_range.end * ratio);
        if !(lo > 0.0 && hi > lo && hi.is_finite()) {
            return Vec::new();
        }

        let step = (hi / lo).powf(1.0 / (DIAGONAL_SAMPLES - 1) as f64);
        reference_curve(lo, step, DIAGONAL_SAMPLES)
            .into_iter()
            .map(|deaths| deaths.min(hi))
            .map(|deaths| (deaths, deaths / ratio))
            .collect()
    }

    /// Renders `cases` against `deaths`.
    pub fn render_pair(
        &self,
        ctx: &RenderContext,
        cases: &AlignedSeries,
        deaths: &AlignedSeries,
    ) -> Result<ChartArtifact> {
        let trajectories = self.trajectories(cases, deaths);

        let x_range = log_axis_range(
            value_bounds(trajectories.iter().flat_map(|(_, p)| p.iter().map(|(x, _)| x))),
            1.0,
        );
        let y_range = log_axis_range(
            value_bounds(trajectories.iter().flat_map(|(_, p)| p.iter().map(|(_, y)| y))),
            1.0 / self.case_fatality_ratio,
        );
        let diagonal = self.reference_diagonal(&x_range, &y_range);

        let mut pixels = vec![0u8; ctx.buffer_len()];
        {
            let root = BitMapBackend::with_buffer(&mut pixels, (ctx.width, ctx.height))
                .into_drawing_area();
            root.fill(&WHITE)?;

            let mut chart = ChartBuilder::on(&root)
                .margin(20)
                .x_label_area_size(60)
                .y_label_area_size(90)
                .build_cartesian_2d(x_range.clone().log_scale(), y_range.clone().log_scale())?;

            let font = ctx.font_family.as_str();
            chart
                .configure_mesh()
                .x_desc(format!("Number of {}", Quantity::Deaths.label()))
                .y_desc(format!("Number of {}", Quantity::Confirmed.label()))
                .x_label_formatter(&|value| format_count(*value))
                .y_label_formatter(&|value| format_count(*value))
                .label_style((font, TICK_FONT_SIZE))
                .axis_desc_style((font, AXIS_FONT_SIZE))
                .light_line_style(BLACK.mix(0.05))
                .draw()?;

            let mut colors = ctx.color_cycle();
            for (region, points) in &trajectories {
                draw_trajectory(&mut chart, points, region.as_str(), colors.next_color(), ctx)?;
            }

            draw_reference(&mut chart, &diagonal, &self.reference_label(), ctx)?;
            draw_attribution(&root, ctx)?;
            root.present()?;
        }

        tracing::info!(
            id = %self.output_id,
            regions = trajectories.len(),
            "Rendered cases vs deaths chart"
        );
        Ok(ChartArtifact::new(&self.output_id, ctx.width, ctx.height, pixels))
    }
}

impl GraphRenderer for PairwiseRenderer {
    /// `(confirmed, deaths)`.
    type Data = (AlignedSeries, AlignedSeries);

    fn render(&self, ctx: &RenderContext, data: &Self::Data) -> Result<ChartArtifact> {
        self.render_pair(ctx, &data.0, &data.1)
    }

    fn name(&self) -> &'static str {
        "cases_vs_deaths"
    }
}
