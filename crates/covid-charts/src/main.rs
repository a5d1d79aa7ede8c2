//! Main entry point for covid-charts.

use covid_charts::{AppError, AppResult, ChartPipeline};
use covid_common::init_logging;
use covid_config::ConfigLoader;
use covid_graphs::{CsvTableSource, DirectorySink};
use tracing::{error, info};

fn main() -> AppResult<()> {
    let config = ConfigLoader::load().map_err(AppError::Config)?;
    init_logging(&config.logging).map_err(AppError::Logging)?;

    info!(
        data = %config.data.repo_location.display(),
        output = %config.charts.output_dir.display(),
        "Starting covid-charts"
    );

    let source = CsvTableSource::from_config(&config.data);
    let mut sink = DirectorySink::new(&config.charts.output_dir);
    let pipeline = ChartPipeline::new(config);

    match pipeline.run(&source, &mut sink) {
        Ok(_) => Ok(()),
        Err(e) => {
            error!("Chart generation failed: {}", e);
            Err(e)
        }
    }
}
