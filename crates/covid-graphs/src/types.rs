//! Aligned series and chart parameter types

use covid_common::Region;
use covid_config::ChartSpecConfig;

/// Region to aligned sequence mapping, kept in insertion order.
///
/// Index 0 of every sequence is the first time point at which the region's
/// cumulative count reached the alignment threshold. Iteration order is the
/// order regions were inserted, which is what renderers use for colour and
/// label assignment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlignedSeries {
    entries: Vec<(Region, Vec<f64>)>,
}

impl AlignedSeries {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the sequence for `region`. A replaced region keeps
    /// its original position.
    pub fn insert(&mut self, region: impl Into<Region>, values: Vec<f64>) {
        let region = region.into();
        match self.entries.iter_mut().find(|(r, _)| *r == region) {
            Some((_, existing)) => *existing = values,
            None => self.entries.push((region, values)),
        }
    }

    /// The sequence for `region`, if present.
    pub fn get(&self, region: &str) -> Option<&[f64]> {
        self.entries
            .iter()
            .find(|(r, _)| r.as_str() == region)
            .map(|(_, values)| values.as_slice())
    }

    pub fn contains(&self, region: &str) -> bool {
        self.get(region).is_some()
    }

    /// Regions in iteration order.
    pub fn regions(&self) -> impl Iterator<Item = &Region> {
        self.entries.iter().map(|(r, _)| r)
    }

    /// `(region, sequence)` pairs in iteration order.
    pub fn iter(&self) -> impl Iterator<Item = (&Region, &[f64])> {
        self.entries.iter().map(|(r, v)| (r, v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Length of the longest sequence, 0 when empty.
    pub fn max_len(&self) -> usize {
        self.entries.iter().map(|(_, v)| v.len()).max().unwrap_or(0)
    }

    /// Every sequence cut to at most `len` points, front-aligned. Shorter
    /// sequences are kept whole.
    pub fn truncated(&self, len: usize) -> Self {
        self.entries
            .iter()
            .map(|(r, v)| (r.clone(), v[..v.len().min(len)].to_vec()))
            .collect()
    }

    /// Regions present in both mappings, in `self`'s order.
    pub fn common_regions<'a>(&'a self, other: &'a Self) -> impl Iterator<Item = &'a Region> {
        self.regions().filter(move |r| other.contains(r.as_str()))
    }
}

impl FromIterator<(Region, Vec<f64>)> for AlignedSeries {
    fn from_iter<I: IntoIterator<Item = (Region, Vec<f64>)>>(iter: I) -> Self {
        let mut series = Self::new();
        for (region, values) in iter {
            series.insert(region, values);
        }
        series
    }
}

/// Parameters fully determining one per-quantity chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    /// Alignment threshold, also the start of the reference curve.
    pub threshold: f64,
    /// Quantity name used in the axis labels.
    pub label: String,
    /// Output identifier handed to the sink.
    pub output_id: String,
}

impl ChartSpec {
    pub fn new(threshold: f64, label: impl Into<String>, output_id: impl Into<String>) -> Self {
        Self {
            threshold,
            label: label.into(),
            output_id: output_id.into(),
        }
    }

    /// X axis description.
    pub fn x_desc(&self) -> String {
        format!("Days after reaching {} {}", format_count(self.threshold), self.label)
    }

    /// Y axis description.
    pub fn y_desc(&self) -> String {
        format!("Number of {}", self.label)
    }
}

impl From<&ChartSpecConfig> for ChartSpec {
    fn from(config: &ChartSpecConfig) -> Self {
        Self::new(config.threshold, &config.label, &config.output_id)
    }
}

/// Formats a count for axis ticks and labels: integers without decimals,
/// large values with a k/M suffix.
pub fn format_count(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if abs >= 10_000.0 {
        format!("{:.0}k", value / 1_000.0)
    } else if (value - value.round()).abs() < 1e-9 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AlignedSeries {
        [
            (Region::new("Italy"), vec![150.0, 229.0, 322.0, 453.0]),
            (Region::new("Iran"), vec![139.0, 245.0]),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_insertion_order_preserved() {
        let series = sample();
        let regions: Vec<&str> = series.regions().map(Region::as_str).collect();
        assert_eq!(regions, vec!["Italy", "Iran"]);
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut series = sample();
        series.insert("Italy", vec![1.0]);
        assert_eq!(series.len(), 2);
        assert_eq!(series.get("Italy"), Some(&[1.0][..]));
        assert_eq!(series.regions().next().unwrap().as_str(), "Italy");
    }

    #[test]
    fn test_truncated_front_aligned() {
        let series = sample().truncated(3);
        assert_eq!(series.get("Italy"), Some(&[150.0, 229.0, 322.0][..]));
        assert_eq!(series.get("Iran"), Some(&[139.0, 245.0][..]));
        assert_eq!(series.max_len(), 3);
    }

    #[test]
    fn test_common_regions() {
        let a = sample();
        let b: AlignedSeries = [(Region::new("Iran"), vec![3.0]), (Region::new("Spain"), vec![5.0])]
            .into_iter()
            .collect();
        let common: Vec<&str> = a.common_regions(&b).map(Region::as_str).collect();
        assert_eq!(common, vec!["Iran"]);
    }

    #[test]
    fn test_axis_descriptions() {
        let spec = ChartSpec::new(100.0, "Confirmed Cases", "confirmed");
        assert_eq!(spec.x_desc(), "Days after reaching 100 Confirmed Cases");
        assert_eq!(spec.y_desc(), "Number of Confirmed Cases");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(3.0), "3");
        assert_eq!(format_count(2.5), "2.5");
        assert_eq!(format_count(45_000.0), "45k");
        assert_eq!(format_count(1_240_000.0), "1.2M");
    }
}
