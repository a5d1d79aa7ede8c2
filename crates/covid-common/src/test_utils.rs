//! Test utilities and shared test helpers for covid-charts.
//!
//! Fixtures here produce data in the Johns Hopkins CSSE time-series layout
//! so every crate can exercise its code against the same shapes.

use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// Initialize logging for tests. Safe to call from every test.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// Create a temporary directory for tests that automatically cleans up.
#[cfg(feature = "tempfile")]
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Assert that two floating point numbers are approximately equal within a tolerance.
pub fn assert_approx_eq(left: f64, right: f64, tolerance: f64) {
    let diff = (left - right).abs();
    assert!(
        diff <= tolerance,
        "assertion failed: `{left}` is not approximately equal to `{right}` (tolerance: {tolerance}, diff: {diff})"
    );
}

/// Time-series table fixtures.
pub mod table_fixtures {
    use super::*;

    /// One CSV record: optional province, country, then daily counts.
    #[derive(Debug, Clone)]
    pub struct FixtureRow {
        pub province: Option<String>,
        pub country: String,
        pub counts: Vec<u64>,
    }

    impl FixtureRow {
        /// Row for a whole country.
        pub fn country(country: &str, counts: &[u64]) -> Self {
            Self {
                province: None,
                country: country.to_string(),
                counts: counts.to_vec(),
            }
        }

        /// Row for a province of a country.
        pub fn province(province: &str, country: &str, counts: &[u64]) -> Self {
            Self {
                province: Some(province.to_string()),
                country: country.to_string(),
                counts: counts.to_vec(),
            }
        }
    }

    /// Date header labels starting at 1/22/20, the first day of the CSSE series.
    pub fn date_headers(days: usize) -> Vec<String> {
        let start = chrono::NaiveDate::from_ymd_opt(2020, 1, 22).expect("valid date");
        (0..days)
            .map(|i| {
                let date = start + chrono::Duration::days(i as i64);
                date.format("%-m/%-d/%y").to_string()
            })
            .collect()
    }

    /// Render rows as CSV text in the CSSE layout.
    pub fn jhu_csv(rows: &[FixtureRow]) -> String {
        let days = rows.iter().map(|r| r.counts.len()).max().unwrap_or(0);
        let mut out = String::from("Province/State,Country/Region,Lat,Long");
        for header in date_headers(days) {
            out.push(',');
            out.push_str(&header);
        }
        out.push('\n');

        for row in rows {
            let province = row.province.clone().unwrap_or_default();
            out.push_str(&format!("{province},\"{}\",10.0,20.0", row.country));
            for count in &row.counts {
                out.push_str(&format!(",{count}"));
            }
            out.push('\n');
        }
        out
    }

    /// A small world with a cruise ship, a split country and a slow starter.
    pub fn sample_rows() -> Vec<FixtureRow> {
        vec![
            FixtureRow::country("Italy", &[2, 20, 79, 150, 229, 322, 453, 655, 888, 1128, 1694, 2036]),
            FixtureRow::province("Hubei", "China", &[444, 549, 761, 1058, 1423, 3554, 3554, 4903, 5806, 7153, 11177, 13522]),
            FixtureRow::province("Beijing", "China", &[14, 22, 36, 41, 68, 80, 91, 111, 114, 139, 168, 191]),
            FixtureRow::country("Iceland", &[0, 0, 0, 0, 1, 1, 3, 6, 9, 12, 18, 34]),
            FixtureRow::country("Cruise Ship", &[61, 61, 64, 135, 135, 175, 175, 218, 285, 355, 454, 542]),
        ]
    }

    /// Write a CSV fixture to `dir/name` and return its path.
    pub fn write_csv(dir: &Path, name: &str, rows: &[FixtureRow]) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, jhu_csv(rows)).expect("Failed to write CSV fixture");
        path
    }
}
