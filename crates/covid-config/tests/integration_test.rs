//! Integration tests for covid-config crate.

use covid_common::test_utils::create_temp_dir;
use covid_common::Quantity;
use covid_config::{Config, ConfigLoader};
use std::path::PathBuf;

#[test]
fn test_default_config_validation() {
    let mut config = Config::default();
    assert!(config.validate().is_ok());

    config.alignment.min_data_len = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_partial_file_keeps_defaults() {
    let dir = create_temp_dir();
    let path = dir.path().join("covid-charts.toml");
    std::fs::write(
        &path,
        r#"
[data]
repo_location = "/srv/COVID-19"
deaths_file = "time_series_covid19_deaths_global.csv"

[alignment]
min_data_len = 7
excluded_regions = ["Diamond Princess", "MS Zaandam"]

[charts.deaths]
threshold = 10.0

[animation]
enabled = true
quantity = "deaths"
"#,
    )
    .unwrap();

    let config = ConfigLoader::load_config(&path).unwrap();
    config.validate().unwrap();

    assert_eq!(
        config.data.path_for(Quantity::Deaths),
        PathBuf::from("/srv/COVID-19/csse_covid_19_data/csse_covid_19_time_series/time_series_covid19_deaths_global.csv")
    );
    assert_eq!(config.alignment.min_data_len, 7);
    assert_eq!(config.alignment.max_data_len, 29);
    assert_eq!(config.alignment.excluded_regions.len(), 2);
    assert_eq!(config.charts.deaths.threshold, 10.0);
    assert_eq!(config.charts.deaths.label, "Deaths");
    assert_eq!(config.charts.deaths.output_id, "deaths");
    assert_eq!(config.charts.confirmed.threshold, 100.0);
    assert!(config.animation.enabled);
    assert_eq!(config.animation.quantity, Quantity::Deaths);
}

#[test]
fn test_malformed_file_is_config_error() {
    let dir = create_temp_dir();
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "[alignment]\nmin_data_len = \"ten\"\n").unwrap();

    assert!(ConfigLoader::load_config(&path).is_err());
    let err = ConfigLoader::load_from_file(&path).unwrap_err();
    assert!(err.to_string().starts_with("Configuration error"));
}

#[test]
fn test_config_round_trips_through_toml() {
    let config = Config::default();
    let text = toml::to_string(&config).unwrap();
    let parsed: Config = toml::from_str(&text).unwrap();
    assert_eq!(parsed, config);
}
