//! Default values matching the CSSE repository layout of early 2020.

use crate::schema::*;
use covid_common::{LoggingConfig, Quantity};
use std::path::PathBuf;

/// Default growth factor of the reference curve (about 33% per day).
pub const DEFAULT_GROWTH_RATE: f64 = 1.333_333;

/// Default output identifier of the cases vs deaths chart.
pub const PAIRWISE_OUTPUT_ID: &str = "confirmed_vs_deaths";

impl Default for Config {
    fn default() -> Self {
        Self {
            data: DataConfig::default(),
            alignment: AlignmentConfig::default(),
            charts: ChartsConfig::default(),
            animation: AnimationConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            repo_location: PathBuf::from("COVID-19"),
            time_series_path: PathBuf::from("csse_covid_19_data/csse_covid_19_time_series"),
            confirmed_file: "time_series_19-covid-Confirmed.csv".to_string(),
            deaths_file: "time_series_19-covid-Deaths.csv".to_string(),
            recovered_file: "time_series_19-covid-Recovered.csv".to_string(),
            region_column: "Country/Region".to_string(),
            geo_columns: vec!["Lat".to_string(), "Long".to_string()],
            label_columns: vec!["Province/State".to_string()],
        }
    }
}

impl Default for AlignmentConfig {
    fn default() -> Self {
        Self {
            min_data_len: 10,
            max_data_len: 29,
            // Later CSSE revisions list the same ship as "Diamond Princess".
            excluded_regions: vec!["Cruise Ship".to_string()],
            sort_by_latest: true,
        }
    }
}

impl Default for ChartsConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("out"),
            width: 1600,
            height: 900,
            font_family: "sans-serif".to_string(),
            attribution: "Johns Hopkins CSSE COVID-19 time series".to_string(),
            palette: Vec::new(),
            confirmed: ChartSpecConfig::for_quantity(Quantity::Confirmed, 100.0),
            deaths: ChartSpecConfig::for_quantity(Quantity::Deaths, 3.0),
            recovered: ChartSpecConfig::for_quantity(Quantity::Recovered, 50.0),
            reference: ReferenceConfig::default(),
            pairwise: PairwiseConfig::default(),
            fade: FadeConfig::default(),
        }
    }
}

impl ChartSpecConfig {
    /// Chart parameters labelled and keyed after `quantity`.
    pub fn for_quantity(quantity: Quantity, threshold: f64) -> Self {
        Self {
            threshold,
            label: quantity.label().to_string(),
            output_id: quantity.key().to_string(),
        }
    }
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        Self {
            rate: DEFAULT_GROWTH_RATE,
            length: 20,
            label: "33% daily growth".to_string(),
        }
    }
}

impl Default for PairwiseConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            output_id: PAIRWISE_OUTPUT_ID.to_string(),
            case_fatality_ratio: 0.03,
        }
    }
}

impl Default for FadeConfig {
    fn default() -> Self {
        Self {
            floor_alpha: 0.1,
            stroke_width: 2,
            marker_size: 4,
        }
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            quantity: Quantity::Confirmed,
        }
    }
}
