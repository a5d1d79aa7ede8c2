//! Configuration schema definitions using serde.

use covid_common::{LoggingConfig, Quantity, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure for covid-charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where the time-series tables live.
    pub data: DataConfig,
    /// Threshold alignment parameters shared by every chart.
    pub alignment: AlignmentConfig,
    /// Chart rendering parameters.
    pub charts: ChartsConfig,
    /// Frame sequence output.
    pub animation: AnimationConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Location and layout of the source tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Root of the checked-out COVID-19 data repository.
    pub repo_location: PathBuf,
    /// Time-series directory relative to `repo_location`.
    pub time_series_path: PathBuf,
    /// Confirmed cases table file name.
    pub confirmed_file: String,
    /// Deaths table file name.
    pub deaths_file: String,
    /// Recovered cases table file name.
    pub recovered_file: String,
    /// Column holding the region identifier.
    pub region_column: String,
    /// Latitude/longitude columns dropped before aggregation.
    pub geo_columns: Vec<String>,
    /// Free-text columns ignored when loading.
    pub label_columns: Vec<String>,
}

impl DataConfig {
    /// Full path of the table for `quantity`.
    pub fn path_for(&self, quantity: Quantity) -> PathBuf {
        let file = match quantity {
            Quantity::Confirmed => &self.confirmed_file,
            Quantity::Deaths => &self.deaths_file,
            Quantity::Recovered => &self.recovered_file,
        };
        self.repo_location.join(&self.time_series_path).join(file)
    }
}

/// Alignment configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlignmentConfig {
    /// Regions with fewer post-threshold points are dropped.
    pub min_data_len: usize,
    /// Aligned sequences are cut to at most this many points.
    pub max_data_len: usize,
    /// Outlier regions removed after aggregation. Each must exist in the table.
    pub excluded_regions: Vec<String>,
    /// Order regions by their most recent value, largest first.
    pub sort_by_latest: bool,
}

/// Chart rendering configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartsConfig {
    /// Directory receiving the PNG files.
    pub output_dir: PathBuf,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Font family for labels and captions.
    pub font_family: String,
    /// Data source named in the attribution annotation.
    pub attribution: String,
    /// Region colors as `#RRGGBB`; empty selects the built-in palette.
    pub palette: Vec<String>,
    /// Confirmed cases chart.
    pub confirmed: ChartSpecConfig,
    /// Deaths chart.
    pub deaths: ChartSpecConfig,
    /// Recovered cases chart.
    pub recovered: ChartSpecConfig,
    /// Exponential growth reference curve.
    pub reference: ReferenceConfig,
    /// Cases vs deaths chart.
    pub pairwise: PairwiseConfig,
    /// Fading segment styling.
    pub fade: FadeConfig,
}

impl ChartsConfig {
    /// The chart parameters for `quantity`.
    pub fn spec(&self, quantity: Quantity) -> &ChartSpecConfig {
        match quantity {
            Quantity::Confirmed => &self.confirmed,
            Quantity::Deaths => &self.deaths,
            Quantity::Recovered => &self.recovered,
        }
    }
}

/// Parameters fully determining one per-quantity chart. Keys missing from a
/// file keep the quantity's defaults when loaded through `ConfigLoader`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpecConfig {
    /// Alignment threshold (day 0 is the first day at or above it).
    pub threshold: f64,
    /// Quantity name shown on the axes.
    pub label: String,
    /// Output identifier, used as the file stem.
    pub output_id: String,
}

/// Reference exponential curve configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceConfig {
    /// Daily growth factor.
    pub rate: f64,
    /// Number of points.
    pub length: usize,
    /// Legend text drawn at the end of the curve.
    pub label: String,
}

/// Cases vs deaths chart configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PairwiseConfig {
    /// Whether the chart is rendered.
    pub enabled: bool,
    /// Output identifier.
    pub output_id: String,
    /// Deaths per confirmed case along the reference diagonal.
    pub case_fatality_ratio: f64,
}

/// Fading segment styling configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FadeConfig {
    /// Opacity of the oldest segment.
    pub floor_alpha: f64,
    /// Line width in pixels.
    pub stroke_width: u32,
    /// Radius of the terminal marker.
    pub marker_size: u32,
}

/// Animation frame output configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Whether frames are written.
    pub enabled: bool,
    /// Which quantity is animated.
    pub quantity: Quantity,
}

impl Config {
    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        crate::validator::ConfigValidator::validate(self)
    }
}
