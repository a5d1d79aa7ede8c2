//! Integration tests for covid-common crate.

use covid_common::{attribution_text, CovidError, LoggingConfig, Quantity, Region};
use std::error::Error;

#[test]
fn test_error_taxonomy_messages() {
    let errors = [
        CovidError::missing_region("Diamond Princess"),
        CovidError::source_read("time_series_covid19_deaths_global.csv", "no header row"),
        CovidError::sink_write("out/confirmed.png", "permission denied"),
    ];

    let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
    assert!(messages[0].contains("Diamond Princess"));
    assert!(messages[1].contains("time_series_covid19_deaths_global.csv"));
    assert!(messages[2].contains("out/confirmed.png"));
    assert!(errors.iter().all(|e| e.source().is_none()));
}

#[test]
fn test_domain_types_interoperate() {
    let region = Region::new("Korea, South");
    assert_eq!(format!("{region}: {}", Quantity::Deaths), "Korea, South: Deaths");
}

#[test]
fn test_attribution_uses_source_text() {
    let now = chrono::Utc::now();
    let text = attribution_text("Johns Hopkins CSSE", now);
    assert!(text.starts_with("Data: Johns Hopkins CSSE"));
    assert!(text.ends_with("UTC"));
}

#[test]
fn test_logging_config_round_trips_through_toml() {
    let config = LoggingConfig {
        level: "covid_graphs=debug".to_string(),
        json_format: true,
        ..LoggingConfig::default()
    };
    let text = toml::to_string(&config).unwrap();
    let parsed: LoggingConfig = toml::from_str(&text).unwrap();
    assert_eq!(parsed, config);
}
