//! Runtime validation of a loaded configuration.

use crate::schema::{ChartSpecConfig, Config};
use covid_common::{CovidError, Quantity, Result};
use std::collections::HashSet;

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a configuration, reporting the first offending field.
    pub fn validate(config: &Config) -> Result<()> {
        Self::validate_alignment(config)?;
        Self::validate_charts(config)?;
        Self::validate_output_ids(config)?;
        Ok(())
    }

    fn validate_alignment(config: &Config) -> Result<()> {
        let alignment = &config.alignment;
        if alignment.min_data_len == 0 {
            return Err(CovidError::validation_field(
                "must be at least 1",
                "alignment.min_data_len",
            ));
        }
        if alignment.min_data_len > alignment.max_data_len {
            return Err(CovidError::validation_field(
                format!(
                    "min_data_len ({}) exceeds max_data_len ({})",
                    alignment.min_data_len, alignment.max_data_len
                ),
                "alignment.max_data_len",
            ));
        }
        if alignment.excluded_regions.iter().any(|r| r.trim().is_empty()) {
            return Err(CovidError::validation_field(
                "excluded region names cannot be blank",
                "alignment.excluded_regions",
            ));
        }
        if config.data.region_column.trim().is_empty() {
            return Err(CovidError::validation_field(
                "region column cannot be empty",
                "data.region_column",
            ));
        }
        Ok(())
    }

    fn validate_charts(config: &Config) -> Result<()> {
        let charts = &config.charts;
        if charts.width == 0 || charts.height == 0 {
            return Err(CovidError::validation_field(
                "image dimensions must be positive",
                "charts.width",
            ));
        }

        for quantity in Quantity::ALL {
            let spec = charts.spec(quantity);
            if !(spec.threshold > 0.0 && spec.threshold.is_finite()) {
                return Err(CovidError::validation_field(
                    format!("threshold must be positive, got {}", spec.threshold),
                    format!("charts.{}.threshold", quantity.key()),
                ));
            }
        }

        let reference = &charts.reference;
        if !(reference.rate > 0.0 && reference.rate.is_finite()) {
            return Err(CovidError::validation_field(
                "growth rate must be positive",
                "charts.reference.rate",
            ));
        }
        if reference.length == 0 {
            return Err(CovidError::validation_field(
                "reference curve needs at least one point",
                "charts.reference.length",
            ));
        }

        let cfr = charts.pairwise.case_fatality_ratio;
        if !(cfr > 0.0 && cfr <= 1.0) {
            return Err(CovidError::validation_field(
                format!("case fatality ratio must be in (0, 1], got {cfr}"),
                "charts.pairwise.case_fatality_ratio",
            ));
        }

        if !(0.0..=1.0).contains(&charts.fade.floor_alpha) {
            return Err(CovidError::validation_field(
                "floor alpha must be within [0, 1]",
                "charts.fade.floor_alpha",
            ));
        }

        if let Some(bad) = charts.palette.iter().find(|c| !is_hex_color(c)) {
            return Err(CovidError::validation_field(
                format!("'{bad}' is not a #RRGGBB color"),
                "charts.palette",
            ));
        }
        Ok(())
    }

    fn validate_output_ids(config: &Config) -> Result<()> {
        let charts = &config.charts;
        let ids = Quantity::ALL
            .iter()
            .map(|q| charts.spec(*q))
            .map(|spec: &ChartSpecConfig| spec.output_id.as_str())
            .chain(std::iter::once(charts.pairwise.output_id.as_str()));

        let mut seen = HashSet::new();
        for id in ids {
            if id.trim().is_empty() {
                return Err(CovidError::validation_field(
                    "output identifiers cannot be empty",
                    "charts.output_id",
                ));
            }
            if !seen.insert(id) {
                return Err(CovidError::validation_field(
                    format!("output identifier '{id}' is used twice"),
                    "charts.output_id",
                ));
            }
        }
        Ok(())
    }
}

/// Whether `value` is a `#RRGGBB` hex color.
pub fn is_hex_color(value: &str) -> bool {
    value
        .strip_prefix('#')
        .is_some_and(|hex| hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_of(err: CovidError) -> String {
        match err {
            CovidError::Validation { field, .. } => field.unwrap_or_default(),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_min_len_exceeding_max_len() {
        let mut config = Config::default();
        config.alignment.min_data_len = 30;
        config.alignment.max_data_len = 10;
        let err = ConfigValidator::validate(&config).unwrap_err();
        assert_eq!(field_of(err), "alignment.max_data_len");
    }

    #[test]
    fn test_zero_threshold_rejected() {
        let mut config = Config::default();
        config.charts.deaths.threshold = 0.0;
        let err = ConfigValidator::validate(&config).unwrap_err();
        assert_eq!(field_of(err), "charts.deaths.threshold");
    }

    #[test]
    fn test_bad_palette_rejected() {
        let mut config = Config::default();
        config.charts.palette = vec!["#1f77b4".to_string(), "orange".to_string()];
        let err = ConfigValidator::validate(&config).unwrap_err();
        assert_eq!(field_of(err), "charts.palette");
    }

    #[test]
    fn test_duplicate_output_ids_rejected() {
        let mut config = Config::default();
        config.charts.pairwise.output_id = "deaths".to_string();
        let err = ConfigValidator::validate(&config).unwrap_err();
        assert_eq!(field_of(err), "charts.output_id");
    }

    #[test]
    fn test_case_fatality_ratio_bounds() {
        let mut config = Config::default();
        config.charts.pairwise.case_fatality_ratio = 0.0;
        assert!(ConfigValidator::validate(&config).is_err());
        config.charts.pairwise.case_fatality_ratio = 1.0;
        assert!(ConfigValidator::validate(&config).is_ok());
    }

    #[test]
    fn test_is_hex_color() {
        assert!(is_hex_color("#FF00aa"));
        assert!(!is_hex_color("FF00aa"));
        assert!(!is_hex_color("#FF00a"));
        assert!(!is_hex_color("#GG0000"));
    }
}
