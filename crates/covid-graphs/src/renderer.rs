//! Graph renderer trait and the aligned growth-curve chart

use crate::drawing::{
    day_points, draw_attribution, draw_reference, draw_trajectory, log_axis_range, value_bounds,
    AXIS_FONT_SIZE, TICK_FONT_SIZE,
};
use crate::reference::ReferenceCurve;
use crate::sink::ChartArtifact;
use crate::style::RenderContext;
use crate::types::{format_count, AlignedSeries, ChartSpec};
use covid_common::{Quantity, Result};
use covid_config::Config;
use plotters::prelude::*;

/// Trait for renderers turning prepared data into a chart image.
pub trait GraphRenderer {
    /// The type of data this renderer expects.
    type Data;

    /// Renders `data` into an in-memory image.
    fn render(&self, ctx: &RenderContext, data: &Self::Data) -> Result<ChartArtifact>;

    /// Gets the name of this graph type.
    fn name(&self) -> &'static str;
}

/// One line per region, aligned on the threshold day, with a growth
/// reference curve on a log value axis.
#[derive(Debug, Clone)]
pub struct ChartRenderer {
    spec: ChartSpec,
    reference: ReferenceCurve,
}

impl ChartRenderer {
    pub fn new(spec: ChartSpec, reference: ReferenceCurve) -> Self {
        Self { spec, reference }
    }

    /// Renderer for `quantity` as described by the `charts` section.
    pub fn for_quantity(config: &Config, quantity: Quantity) -> Self {
        Self::new(
            ChartSpec::from(config.charts.spec(quantity)),
            ReferenceCurve::from_config(&config.charts.reference),
        )
    }

    pub fn spec(&self) -> &ChartSpec {
        &self.spec
    }

    pub fn reference(&self) -> &ReferenceCurve {
        &self.reference
    }
}

impl GraphRenderer for ChartRenderer {
    type Data = AlignedSeries;

    fn render(&self, ctx: &RenderContext, data: &AlignedSeries) -> Result<ChartArtifact> {
        let reference = self.reference.points(self.spec.threshold);

        let last_day = data.max_len().max(reference.len()).saturating_sub(1).max(1);
        // Room to the right of the last point for end labels.
        let x_max = last_day as f64 * 1.15 + 1.0;

        let bounds = value_bounds(
            data.iter()
                .flat_map(|(_, values)| values)
                .chain(reference.iter().map(|(_, v)| v)),
        );
        let y_range = log_axis_range(bounds, self.spec.threshold);

        let mut pixels = vec![0u8; ctx.buffer_len()];
        {
            let root = BitMapBackend::with_buffer(&mut pixels, (ctx.width, ctx.height))
                .into_drawing_area();
            root.fill(&WHITE)?;

            let mut chart = ChartBuilder::on(&root)
                .margin(20)
                .x_label_area_size(60)
                .y_label_area_size(90)
                .build_cartesian_2d(0f64..x_max, y_range.log_scale())?;

            let font = ctx.font_family.as_str();
            chart
                .configure_mesh()
                .x_desc(self.spec.x_desc())
                .y_desc(self.spec.y_desc())
                .x_label_formatter(&|day| format!("{day:.0}"))
                .y_label_formatter(&|value| format_count(*value))
                .label_style((font, TICK_FONT_SIZE))
                .axis_desc_style((font, AXIS_FONT_SIZE))
                .light_line_style(BLACK.mix(0.05))
                .draw()?;

            let mut colors = ctx.color_cycle();
            for (region, values) in data.iter() {
                draw_trajectory(
                    &mut chart,
                    &day_points(values),
                    region.as_str(),
                    colors.next_color(),
                    ctx,
                )?;
            }

            draw_reference(&mut chart, &reference, &self.reference.label, ctx)?;
            draw_attribution(&root, ctx)?;
            root.present()?;
        }

        tracing::info!(
            id = %self.spec.output_id,
            regions = data.len(),
            days = data.max_len(),
            "Rendered chart"
        );
        Ok(ChartArtifact::new(&self.spec.output_id, ctx.width, ctx.height, pixels))
    }

    fn name(&self) -> &'static str {
        "aligned_growth"
    }
}
