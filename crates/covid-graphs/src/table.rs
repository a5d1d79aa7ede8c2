//! Wide time-series tables and the CSV source that reads them

use covid_common::{CovidError, Region, Result};
use covid_config::DataConfig;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// One source record: a region name and its numeric cells.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    pub region: Region,
    pub values: Vec<f64>,
}

impl RawRow {
    pub fn new(region: impl Into<Region>, values: Vec<f64>) -> Self {
        Self {
            region: region.into(),
            values,
        }
    }
}

/// Aggregated table: one summed row per region, ordered by region name.
pub type RegionTable = BTreeMap<Region, Vec<f64>>;

/// A wide table as read from the source: numeric columns in file order
/// (geo columns included) and one row per record. Several rows may share a
/// region when the source lists sub-regions.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    origin: PathBuf,
    columns: Vec<String>,
    rows: Vec<RawRow>,
}

impl RawTable {
    /// Builds a table, checking that every row has one value per column.
    pub fn new(columns: Vec<String>, rows: Vec<RawRow>) -> Result<Self> {
        Self::with_origin("<memory>", columns, rows)
    }

    /// Builds a table remembering where it was read from.
    pub fn with_origin(
        origin: impl Into<PathBuf>,
        columns: Vec<String>,
        rows: Vec<RawRow>,
    ) -> Result<Self> {
        let origin = origin.into();
        if let Some(row) = rows.iter().find(|r| r.values.len() != columns.len()) {
            return Err(CovidError::source_read(
                origin,
                format!(
                    "row for '{}' has {} values, expected {}",
                    row.region,
                    row.values.len(),
                    columns.len()
                ),
            ));
        }
        Ok(Self {
            origin,
            columns,
            rows,
        })
    }

    pub fn origin(&self) -> &Path {
        &self.origin
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[RawRow] {
        &self.rows
    }

    /// Most recent time point, assuming geo columns were dropped.
    pub fn latest_time_point(&self) -> Option<&str> {
        self.columns.last().map(String::as_str)
    }

    /// Removes the named columns. A name that is not in the table means the
    /// source schema changed, so it is reported as a read failure.
    pub fn drop_columns<S: AsRef<str>>(&self, names: &[S]) -> Result<Self> {
        let mut drop = Vec::with_capacity(names.len());
        for name in names {
            let name = name.as_ref();
            let index = self.columns.iter().position(|c| c == name).ok_or_else(|| {
                CovidError::source_read(&self.origin, format!("missing column '{name}'"))
            })?;
            drop.push(index);
        }

        let keep: Vec<usize> = (0..self.columns.len())
            .filter(|i| !drop.contains(i))
            .collect();

        Ok(Self {
            origin: self.origin.clone(),
            columns: keep.iter().map(|&i| self.columns[i].clone()).collect(),
            rows: self
                .rows
                .iter()
                .map(|row| RawRow {
                    region: row.region.clone(),
                    values: keep.iter().map(|&i| row.values[i]).collect(),
                })
                .collect(),
        })
    }

    /// Sums all rows sharing a region identifier, column by column.
    pub fn aggregate_by_region(&self) -> RegionTable {
        let mut table = RegionTable::new();
        for row in &self.rows {
            let sums = table
                .entry(row.region.clone())
                .or_insert_with(|| vec![0.0; self.columns.len()]);
            for (sum, value) in sums.iter_mut().zip(&row.values) {
                *sum += value;
            }
        }
        table
    }
}

/// Source of raw tables.
pub trait TableSource {
    /// Reads the table at `path`. Blocking, called once per quantity.
    fn read(&self, path: &Path) -> Result<RawTable>;
}

/// Reads tables in the CSSE CSV layout.
#[derive(Debug, Clone)]
pub struct CsvTableSource {
    region_column: String,
    label_columns: Vec<String>,
}

impl CsvTableSource {
    pub fn new(region_column: impl Into<String>, label_columns: Vec<String>) -> Self {
        Self {
            region_column: region_column.into(),
            label_columns,
        }
    }

    pub fn from_config(config: &DataConfig) -> Self {
        Self::new(&config.region_column, config.label_columns.clone())
    }

    /// Parses CSV from any reader. `origin` is only used in error messages.
    pub fn read_from<R: std::io::Read>(&self, origin: &Path, reader: R) -> Result<RawTable> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader
            .headers()
            .map_err(|e| CovidError::source_read_with_source(origin, "invalid header row", e))?
            .clone();

        let region_index = headers
            .iter()
            .position(|h| h == self.region_column)
            .ok_or_else(|| {
                CovidError::source_read(
                    origin,
                    format!("missing region column '{}'", self.region_column),
                )
            })?;

        let numeric: Vec<(usize, String)> = headers
            .iter()
            .enumerate()
            .filter(|(i, h)| *i != region_index && !self.label_columns.iter().any(|l| l == h))
            .map(|(i, h)| (i, h.to_string()))
            .collect();

        let mut rows = Vec::new();
        for (line, record) in reader.records().enumerate() {
            let record = record
                .map_err(|e| CovidError::source_read_with_source(origin, "invalid record", e))?;
            let region = record.get(region_index).unwrap_or_default().to_string();

            let mut values = Vec::with_capacity(numeric.len());
            for (index, column) in &numeric {
                let cell = record.get(*index).unwrap_or_default();
                values.push(parse_cell(cell).ok_or_else(|| {
                    CovidError::source_read(
                        origin,
                        format!("record {}: '{cell}' in column '{column}' is not a number", line + 1),
                    )
                })?);
            }
            rows.push(RawRow::new(region, values));
        }

        let columns = numeric.into_iter().map(|(_, name)| name).collect();
        RawTable::with_origin(origin, columns, rows)
    }
}

impl TableSource for CsvTableSource {
    fn read(&self, path: &Path) -> Result<RawTable> {
        let file = std::fs::File::open(path)
            .map_err(|e| CovidError::source_read_with_source(path, "cannot open file", e))?;
        let table = self.read_from(path, std::io::BufReader::new(file))?;

        tracing::info!(
            path = %path.display(),
            rows = table.rows().len(),
            columns = table.columns().len(),
            "Loaded time-series table"
        );
        Ok(table)
    }
}

/// Empty cells count as zero, matching how a column sum skips missing values.
fn parse_cell(cell: &str) -> Option<f64> {
    if cell.is_empty() {
        return Some(0.0);
    }
    cell.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> CsvTableSource {
        CsvTableSource::new("Country/Region", vec!["Province/State".to_string()])
    }

    const CSV: &str = "\
Province/State,Country/Region,Lat,Long,1/22/20,1/23/20,1/24/20
,Italy,43.0,12.0,0,2,20
Hubei,China,30.97,112.27,444,444,549
Beijing,China,40.18,116.41,14,22,36
";

    #[test]
    fn test_read_csv_layout() {
        let table = source().read_from(Path::new("mem.csv"), CSV.as_bytes()).unwrap();
        assert_eq!(table.columns(), &["Lat", "Long", "1/22/20", "1/23/20", "1/24/20"]);
        assert_eq!(table.rows().len(), 3);
        assert_eq!(table.rows()[1].region.as_str(), "China");
        assert_eq!(table.rows()[1].values, vec![30.97, 112.27, 444.0, 444.0, 549.0]);
    }

    #[test]
    fn test_drop_and_aggregate() {
        let table = source().read_from(Path::new("mem.csv"), CSV.as_bytes()).unwrap();
        let table = table.drop_columns(&["Lat", "Long"]).unwrap();
        assert_eq!(table.latest_time_point(), Some("1/24/20"));

        let aggregated = table.aggregate_by_region();
        let regions: Vec<&str> = aggregated.keys().map(Region::as_str).collect();
        assert_eq!(regions, vec!["China", "Italy"]);
        assert_eq!(aggregated[&Region::new("China")], vec![458.0, 466.0, 585.0]);
    }

    #[test]
    fn test_drop_unknown_column_fails() {
        let table = RawTable::new(vec!["1/22/20".to_string()], vec![RawRow::new("Italy", vec![1.0])]).unwrap();
        let err = table.drop_columns(&["Lat"]).unwrap_err();
        assert!(matches!(err, CovidError::SourceRead { .. }));
        assert!(err.to_string().contains("missing column 'Lat'"));
    }

    #[test]
    fn test_missing_region_column() {
        let csv = "Country,Lat,Long,1/22/20\nItaly,0,0,1\n";
        let err = source().read_from(Path::new("bad.csv"), csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("missing region column"));
    }

    #[test]
    fn test_non_numeric_cell() {
        let csv = "Country/Region,Lat,Long,1/22/20\nItaly,0,0,lots\n";
        let err = source().read_from(Path::new("bad.csv"), csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("'lots' in column '1/22/20'"));
    }

    #[test]
    fn test_empty_cell_is_zero() {
        let csv = "Country/Region,Lat,Long,1/22/20,1/23/20\nItaly,0,0,,4\n";
        let table = source().read_from(Path::new("mem.csv"), csv.as_bytes()).unwrap();
        assert_eq!(table.rows()[0].values, vec![0.0, 0.0, 0.0, 4.0]);
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let err = RawTable::new(
            vec!["a".to_string(), "b".to_string()],
            vec![RawRow::new("Italy", vec![1.0])],
        )
        .unwrap_err();
        assert!(err.to_string().contains("expected 2"));
    }

    #[test]
    fn test_missing_file() {
        let err = source().read(Path::new("/nonexistent/confirmed.csv")).unwrap_err();
        assert!(matches!(err, CovidError::SourceRead { .. }));
    }
}
