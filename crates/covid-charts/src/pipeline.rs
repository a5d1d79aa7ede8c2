//! Batch pipeline: read, align, render and write every chart.

use crate::error::AppResult;
use chrono::{DateTime, Utc};
use covid_common::Quantity;
use covid_config::Config;
use covid_graphs::{
    AlignedSeries, AnimationDriver, ChartRenderer, GraphRenderer, ImageSink, PairwiseRenderer,
    RenderContext, SeriesAligner, TableSource,
};
use std::path::PathBuf;

/// One run over the configured tables.
pub struct ChartPipeline {
    config: Config,
    generated_at: DateTime<Utc>,
}

impl ChartPipeline {
    /// Creates a pipeline stamped with the current time.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            generated_at: Utc::now(),
        }
    }

    /// Overrides the generation time shown in the attribution corner.
    pub fn with_generated_at(mut self, generated_at: DateTime<Utc>) -> Self {
        self.generated_at = generated_at;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Renders every chart and returns the written locations in order:
    /// one chart per quantity (followed by its frames when animated), then
    /// the cases vs deaths chart. The first failure aborts the run.
    pub fn run(&self, source: &dyn TableSource, sink: &mut dyn ImageSink) -> AppResult<Vec<PathBuf>> {
        let config = &self.config;
        let ctx = RenderContext::from_config(&config.charts, self.generated_at)?;
        let aligner = SeriesAligner::from_config(config)?;

        let mut written = Vec::new();
        let mut confirmed = AlignedSeries::new();
        let mut deaths = AlignedSeries::new();

        for quantity in Quantity::ALL {
            let table = source.read(&config.data.path_for(quantity))?;
            let renderer = ChartRenderer::for_quantity(config, quantity);
            let series = aligner.align(&table, renderer.spec().threshold)?;
            tracing::debug!(
                renderer = renderer.name(),
                quantity = %quantity,
                regions = series.len(),
                "Rendering chart"
            );

            written.push(sink.write(&renderer.render(&ctx, &series)?)?);

            if config.animation.enabled && config.animation.quantity == quantity {
                let frames = AnimationDriver::new(&renderer).frames(&ctx, &series);
                tracing::info!(quantity = %quantity, frames = frames.len(), "Writing animation frames");
                for frame in frames {
                    written.push(sink.write(&frame?)?);
                }
            }

            match quantity {
                Quantity::Confirmed => confirmed = series,
                Quantity::Deaths => deaths = series,
                Quantity::Recovered => {}
            }
        }

        if config.charts.pairwise.enabled {
            let pairwise = PairwiseRenderer::from_config(&config.charts);
            tracing::debug!(renderer = pairwise.name(), "Rendering chart");
            written.push(sink.write(&pairwise.render_pair(&ctx, &confirmed, &deaths)?)?);
        }

        tracing::info!(
            charts = written.len(),
            output_dir = %config.charts.output_dir.display(),
            "Chart generation complete"
        );
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use covid_common::test_utils::table_fixtures::{jhu_csv, sample_rows};
    use covid_common::CovidError;
    use covid_graphs::test_utils::require_fonts;
    use covid_graphs::{CsvTableSource, MemorySink, RawTable};
    use std::path::Path;

    /// Serves the same in-memory CSV for every quantity.
    struct FixtureSource {
        csv: String,
    }

    impl TableSource for FixtureSource {
        fn read(&self, path: &Path) -> covid_common::Result<RawTable> {
            CsvTableSource::new("Country/Region", vec!["Province/State".to_string()])
                .read_from(path, self.csv.as_bytes())
        }
    }

    fn config() -> Config {
        let mut config = Config::default();
        config.charts.width = 320;
        config.charts.height = 240;
        config.alignment.min_data_len = 3;
        config.charts.deaths.threshold = 100.0;
        config.charts.recovered.threshold = 100.0;
        config
    }

    #[test]
    fn test_run_writes_every_chart() {
        require_fonts();
        let source = FixtureSource { csv: jhu_csv(&sample_rows()) };
        let mut sink = MemorySink::new();

        let written = ChartPipeline::new(config()).run(&source, &mut sink).unwrap();

        assert_eq!(written.len(), 4);
        assert_eq!(sink.ids(), vec!["confirmed", "deaths", "recovered", "confirmed_vs_deaths"]);
    }

    #[test]
    fn test_missing_excluded_region_aborts() {
        let source = FixtureSource { csv: jhu_csv(&sample_rows()) };
        let mut sink = MemorySink::new();
        let mut config = config();
        config.alignment.excluded_regions = vec!["Diamond Princess".to_string()];

        let err = ChartPipeline::new(config).run(&source, &mut sink).unwrap_err();
        assert!(matches!(
            err,
            crate::AppError::Pipeline(CovidError::MissingRegion { .. })
        ));
        assert!(sink.artifacts().is_empty());
    }
}
