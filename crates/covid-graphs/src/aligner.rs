//! Threshold alignment of wide time-series tables
//!
//! Turns a [`RawTable`] into an [`AlignedSeries`]: geo columns dropped, rows
//! summed per region, outliers removed, and every region re-indexed so that
//! day 0 is the first day its cumulative count reached the threshold.

use crate::table::{RawTable, RegionTable};
use crate::types::AlignedSeries;
use covid_common::{CovidError, Region, Result};
use covid_config::Config;

/// Aligns tables on a per-chart threshold.
#[derive(Debug, Clone)]
pub struct SeriesAligner {
    min_len: usize,
    max_len: usize,
    geo_columns: Vec<String>,
    excluded_regions: Vec<Region>,
    sort_by_latest: bool,
}

impl SeriesAligner {
    /// Creates an aligner keeping sequences of `min_len..=max_len` points.
    pub fn new(min_len: usize, max_len: usize) -> Result<Self> {
        if min_len == 0 {
            return Err(CovidError::validation_field("must be at least 1", "min_len"));
        }
        if min_len > max_len {
            return Err(CovidError::validation_field(
                format!("min_len ({min_len}) exceeds max_len ({max_len})"),
                "max_len",
            ));
        }
        Ok(Self {
            min_len,
            max_len,
            geo_columns: vec!["Lat".to_string(), "Long".to_string()],
            excluded_regions: Vec::new(),
            sort_by_latest: false,
        })
    }

    /// Aligner configured from the `data` and `alignment` sections.
    pub fn from_config(config: &Config) -> Result<Self> {
        let alignment = &config.alignment;
        Ok(Self::new(alignment.min_data_len, alignment.max_data_len)?
            .with_geo_columns(config.data.geo_columns.clone())
            .with_excluded_regions(alignment.excluded_regions.iter().map(Region::new))
            .sorted_by_latest(alignment.sort_by_latest))
    }

    /// Columns dropped before aggregation. Each must be present in the table.
    pub fn with_geo_columns(mut self, columns: Vec<String>) -> Self {
        self.geo_columns = columns;
        self
    }

    /// Regions removed after aggregation. Each must be present in the table.
    pub fn with_excluded_regions<I>(mut self, regions: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Region>,
    {
        self.excluded_regions = regions.into_iter().map(Into::into).collect();
        self
    }

    /// Order regions by most recent value, largest first, instead of by name.
    pub fn sorted_by_latest(mut self, enabled: bool) -> Self {
        self.sort_by_latest = enabled;
        self
    }

    pub fn min_len(&self) -> usize {
        self.min_len
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Aligns every region of `table` on `threshold`.
    pub fn align(&self, table: &RawTable, threshold: f64) -> Result<AlignedSeries> {
        if !(threshold > 0.0 && threshold.is_finite()) {
            return Err(CovidError::validation_field(
                format!("threshold must be positive, got {threshold}"),
                "threshold",
            ));
        }

        let table = table.drop_columns(&self.geo_columns)?;
        let mut regions = table.aggregate_by_region();
        self.remove_excluded(&mut regions)?;

        let mut ordered: Vec<(Region, Vec<f64>)> = regions.into_iter().collect();
        if self.sort_by_latest {
            // Stable, so equal latest values stay in name order.
            ordered.sort_by(|(_, a), (_, b)| latest(b).total_cmp(&latest(a)));
        }

        let total = ordered.len();
        let mut aligned = AlignedSeries::new();
        for (region, values) in ordered {
            match align_row(&values, threshold, self.min_len, self.max_len) {
                Some(sequence) => aligned.insert(region, sequence),
                None => tracing::debug!(
                    region = %region,
                    threshold,
                    min_len = self.min_len,
                    "Dropping region with insufficient history"
                ),
            }
        }

        tracing::info!(
            origin = %table.origin().display(),
            threshold,
            kept = aligned.len(),
            dropped = total - aligned.len(),
            "Aligned regions"
        );
        Ok(aligned)
    }

    fn remove_excluded(&self, regions: &mut RegionTable) -> Result<()> {
        for region in &self.excluded_regions {
            if regions.remove(region).is_none() {
                return Err(CovidError::missing_region(region.as_str()));
            }
            tracing::debug!(region = %region, "Excluded outlier region");
        }
        Ok(())
    }
}

/// Aligns a single cumulative row.
///
/// Keeps everything from the first value `>= threshold` through the end of
/// the row (later dips below the threshold stay in), returns `None` when
/// fewer than `min_len` points remain, and cuts the result to `max_len`.
pub fn align_row(values: &[f64], threshold: f64, min_len: usize, max_len: usize) -> Option<Vec<f64>> {
    let start = values.iter().position(|&v| v >= threshold)?;
    let run = &values[start..];
    if run.len() < min_len {
        return None;
    }
    Some(run[..run.len().min(max_len)].to_vec())
}

fn latest(values: &[f64]) -> f64 {
    values.last().copied().unwrap_or(0.0)
}
