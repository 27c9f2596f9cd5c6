use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use arrow::array::Array;
use arrow::util::display::array_value_to_string;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::StringRecord;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;
use serde_json::{Map, Value as JsonValue};

use super::error::LoadError;
use super::model::{Record, SalesDataset};

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

pub const ORDER_DATE: &str = "OrderDate";
pub const ORDER_NUMBER: &str = "FSOrderNumber";
pub const RETAIL_PRICE: &str = "RetailPrice";
pub const CAKE_NAME: &str = "CakeName";

/// Columns every source must provide, in the order [`RowCells`] holds them.
pub const REQUIRED_COLUMNS: [&str; 4] = [ORDER_DATE, ORDER_NUMBER, RETAIL_PRICE, CAKE_NAME];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a sales dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the four schema columns (recommended)
/// * `.json`    – `[{ "OrderDate": "...", "FSOrderNumber": ..., ... }, ...]`
/// * `.parquet` – columns named like the CSV header, any Arrow type
///
/// Rows whose order date cannot be parsed are dropped and counted in
/// [`SalesDataset::rows_dropped`]; everything else that does not fit the
/// schema fails the whole load.
pub fn load_file(path: &Path) -> Result<SalesDataset, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(LoadError::UnsupportedFormat(other.to_string())),
    };

    log::info!(
        "Loaded {} records from {} ({} rows read, {} dropped for bad dates)",
        dataset.len(),
        path.display(),
        dataset.rows_read,
        dataset.rows_dropped
    );
    Ok(dataset)
}

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// Row assembly shared by all formats
// ---------------------------------------------------------------------------

/// Text of the four schema cells of one source row.
struct RowCells<'a> {
    /// 1-based source line (or row number for non-text formats).
    line: usize,
    order_date: &'a str,
    order_number: &'a str,
    retail_price: &'a str,
    cake_name: &'a str,
}

#[derive(Default)]
struct DatasetBuilder {
    records: Vec<Record>,
    rows_read: usize,
    rows_dropped: usize,
}

impl DatasetBuilder {
    fn push(&mut self, row: RowCells<'_>) -> Result<(), LoadError> {
        self.rows_read += 1;

        let Some(order_date) = parse_order_date(row.order_date) else {
            log::debug!(
                "line {}: dropping row with unparseable {ORDER_DATE} '{}'",
                row.line,
                row.order_date
            );
            self.rows_dropped += 1;
            return Ok(());
        };

        // A blank price is a missing value and sums as zero.
        let retail_price = if row.retail_price.trim().is_empty() {
            log::debug!("line {}: blank {RETAIL_PRICE} read as 0", row.line);
            0.0
        } else {
            parse_price(row.retail_price).ok_or_else(|| LoadError::InvalidValue {
                line: row.line,
                column: RETAIL_PRICE,
                value: row.retail_price.to_string(),
            })?
        };

        self.records.push(Record {
            order_date,
            order_number: row.order_number.trim().to_string(),
            retail_price,
            cake_name: row.cake_name.trim().to_string(),
        });
        Ok(())
    }

    fn finish(self) -> SalesDataset {
        SalesDataset::from_records(self.records, self.rows_read, self.rows_dropped)
    }
}

/// Resolve the schema columns against a header, failing with every missing name.
fn resolve_columns<'h>(
    headers: impl IntoIterator<Item = &'h str>,
) -> Result<[usize; 4], LoadError> {
    let index: HashMap<&str, usize> = headers
        .into_iter()
        .enumerate()
        .map(|(i, name)| (normalize_header_name(name), i))
        .collect();

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| !index.contains_key(**col))
        .map(|col| col.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(LoadError::MissingColumns(missing));
    }

    Ok(REQUIRED_COLUMNS.map(|col| index[col]))
}

fn normalize_header_name(name: &str) -> &str {
    // Spreadsheet exports often prefix the first header with a UTF-8 BOM.
    name.trim().trim_start_matches('\u{feff}')
}

// ---------------------------------------------------------------------------
// Cell parsers
// ---------------------------------------------------------------------------

// Two-digit-year forms come before their `%Y` twins, which would read "24" as year 24.
const DATETIME_FORMATS: [&str; 13] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%m/%d/%y %H:%M:%S%.f",
    "%m/%d/%y %H:%M",
    "%m/%d/%y %I:%M:%S %p",
    "%m/%d/%y %I:%M %p",
    "%m/%d/%Y %H:%M:%S%.f",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
    "%Y/%m/%d %H:%M:%S",
];

const DATE_FORMATS: [&str; 11] = [
    "%Y-%m-%d",
    "%m/%d/%y",
    "%m/%d/%Y",
    "%Y/%m/%d",
    "%m-%d-%Y",
    "%d-%b-%Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%b %d %Y",
    "%d %B %Y",
    "%Y%m%d",
];

/// Parse an order date from any common text form; times are truncated.
pub fn parse_order_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.date())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        })
}

/// Parse a non-negative price, tolerating a leading `$` and thousands separators.
pub fn parse_price(s: &str) -> Option<f64> {
    let s = s.trim();
    let s = s.strip_prefix('$').unwrap_or(s);
    let v = s.replace(',', "").parse::<f64>().ok()?;
    if v.is_finite() && v >= 0.0 {
        Some(v)
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// One CSV row, matched to the header by column name; extra columns are ignored.
#[derive(Debug, Deserialize)]
struct CsvRow<'a> {
    #[serde(rename = "OrderDate")]
    order_date: &'a str,
    #[serde(rename = "FSOrderNumber")]
    order_number: &'a str,
    #[serde(rename = "RetailPrice")]
    retail_price: &'a str,
    #[serde(rename = "CakeName")]
    cake_name: &'a str,
}

/// CSV layout: header row with at least the schema columns, any order.
/// A zero-byte or header-only file is an empty dataset.
fn load_csv(path: &Path) -> Result<SalesDataset, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(open(path)?);

    let headers: StringRecord = reader.headers()?.iter().map(normalize_header_name).collect();
    if headers.is_empty() {
        return Ok(SalesDataset::empty());
    }
    resolve_columns(headers.iter())?;

    let mut builder = DatasetBuilder::default();
    for (row_no, result) in reader.records().enumerate() {
        let record = result?;
        let row: CsvRow<'_> = record.deserialize(Some(&headers))?;
        builder.push(RowCells {
            // +2: records start after the header and lines are 1-based.
            line: row_no + 2,
            order_date: row.order_date,
            order_number: row.order_number,
            retail_price: row.retail_price,
            cake_name: row.cake_name,
        })?;
    }

    Ok(builder.finish())
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "OrderDate": "2024-01-01", "FSOrderNumber": 1001,
///     "RetailPrice": 24.99, "CakeName": "Carrot" },
///   ...
/// ]
/// ```
///
/// The first object defines the schema check; keys missing from later
/// objects read as blank cells.
fn load_json(path: &Path) -> Result<SalesDataset, LoadError> {
    let rows: Vec<Map<String, JsonValue>> =
        serde_json::from_reader(BufReader::new(open(path)?))?;

    let Some(first) = rows.first() else {
        return Ok(SalesDataset::empty());
    };
    resolve_columns(first.keys().map(String::as_str))?;

    let mut builder = DatasetBuilder::default();
    for (i, obj) in rows.iter().enumerate() {
        let [date, number, price, cake] = REQUIRED_COLUMNS.map(|col| json_cell(obj.get(col)));
        builder.push(RowCells {
            line: i + 1,
            order_date: &date,
            order_number: &number,
            retail_price: &price,
            cake_name: &cake,
        })?;
    }

    Ok(builder.finish())
}

fn json_cell(val: Option<&JsonValue>) -> String {
    match val {
        None | Some(JsonValue::Null) => String::new(),
        Some(JsonValue::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with the schema columns.
///
/// Every cell is rendered to text through Arrow's display formatting and then
/// goes through the same parsers as CSV, so `Date32`, timestamps, integers
/// and strings all work for any column. Works with files written by both
/// **Pandas** (`df.to_parquet()`) and **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<SalesDataset, LoadError> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(open(path)?)?;
    let schema = builder.schema().clone();
    let columns = resolve_columns(schema.fields().iter().map(|f| f.name().as_str()))?;
    let reader = builder.build()?;

    let mut rows = DatasetBuilder::default();
    let mut row_offset = 0usize;

    for batch_result in reader {
        let batch = batch_result?;
        for row in 0..batch.num_rows() {
            let mut cells: [String; 4] = Default::default();
            for (cell, &col_idx) in cells.iter_mut().zip(columns.iter()) {
                let col = batch.column(col_idx);
                if !col.is_null(row) {
                    *cell = array_value_to_string(col.as_ref(), row)?;
                }
            }
            let [date, number, price, cake] = &cells;
            rows.push(RowCells {
                line: row_offset + row + 1,
                order_date: date,
                order_number: number,
                retail_price: price,
                cake_name: cake,
            })?;
        }
        row_offset += batch.num_rows();
    }

    Ok(rows.finish())
}
