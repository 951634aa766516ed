use std::path::Path;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;

use super::model::{LaunchRecord, LaunchTable};

// ---------------------------------------------------------------------------
// Source schema
// ---------------------------------------------------------------------------

pub const SITE_COLUMN: &str = "Launch Site";
pub const PAYLOAD_COLUMN: &str = "Payload Mass (kg)";
pub const BOOSTER_COLUMN: &str = "Booster Version Category";
pub const CLASS_COLUMN: &str = "class";

const REQUIRED_COLUMNS: [&str; 4] = [SITE_COLUMN, PAYLOAD_COLUMN, BOOSTER_COLUMN, CLASS_COLUMN];

/// Structural problems with the input table. Any of these aborts startup.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("missing column '{0}'")]
    MissingColumn(String),
    #[error("row {row}: class must be 0 or 1, got {value}")]
    InvalidClass { row: usize, value: i64 },
    #[error("row {row}: null value in column '{column}'")]
    NullValue { row: usize, column: String },
    #[error("column '{column}' has unsupported type {data_type}")]
    UnsupportedType { column: String, data_type: DataType },
}

/// One row as it appears in CSV / JSON sources. Unlisted columns are ignored.
#[derive(Debug, Deserialize)]
struct RawLaunchRow {
    #[serde(rename = "Launch Site")]
    site: String,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass_kg: f64,
    #[serde(rename = "Booster Version Category")]
    booster_category: String,
    #[serde(rename = "class")]
    class: i64,
}

impl RawLaunchRow {
    fn into_record(self, row: usize) -> Result<LaunchRecord, SchemaError> {
        Ok(LaunchRecord {
            site: self.site,
            payload_mass_kg: self.payload_mass_kg,
            booster_category: self.booster_category,
            success: success_flag(self.class, row)?,
        })
    }
}

fn success_flag(class: i64, row: usize) -> Result<bool, SchemaError> {
    match class {
        0 => Ok(false),
        1 => Ok(true),
        value => Err(SchemaError::InvalidClass { row, value }),
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the launch table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, one launch per line
/// * `.json`    – `[{ "Launch Site": ..., "Payload Mass (kg)": ..., ... }, ...]`
/// * `.parquet` – one column per field
pub fn load_file(path: &Path) -> Result<LaunchTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let records = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    Ok(LaunchTable::from_records(records))
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Vec<LaunchRecord>> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers = reader.headers().context("reading CSV headers")?.clone();

    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(SchemaError::MissingColumn(column.to_string()).into());
        }
    }

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<RawLaunchRow>().enumerate() {
        let raw = result.with_context(|| format!("CSV row {row_no}"))?;
        records.push(raw.into_record(row_no)?);
    }
    Ok(records)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')` output.
fn load_json(path: &Path) -> Result<Vec<LaunchRecord>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let rows: Vec<RawLaunchRow> = serde_json::from_str(&text).context("parsing JSON")?;

    rows.into_iter()
        .enumerate()
        .map(|(i, raw)| raw.into_record(i).map_err(anyhow::Error::from))
        .collect()
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file whose columns carry the CSV header names.
///
/// Payload may be any integer or float type; `class` may be integer or
/// boolean. Works with files written by Pandas and Polars.
fn load_parquet(path: &Path) -> Result<Vec<LaunchRecord>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let site_col = column_by_name(&batch, SITE_COLUMN)?;
        let payload_col = column_by_name(&batch, PAYLOAD_COLUMN)?;
        let booster_col = column_by_name(&batch, BOOSTER_COLUMN)?;
        let class_col = column_by_name(&batch, CLASS_COLUMN)?;

        let offset = records.len();
        for row in 0..batch.num_rows() {
            let global_row = offset + row;
            records.push(LaunchRecord {
                site: extract_string(site_col, SITE_COLUMN, row, global_row)?,
                payload_mass_kg: extract_f64(payload_col, PAYLOAD_COLUMN, row, global_row)?,
                booster_category: extract_string(booster_col, BOOSTER_COLUMN, row, global_row)?,
                success: extract_class(class_col, row, global_row)?,
            });
        }
    }

    Ok(records)
}

// -- Parquet / Arrow helpers --

fn column_by_name<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a ArrayRef, SchemaError> {
    batch
        .schema()
        .index_of(name)
        .map(|idx| batch.column(idx))
        .map_err(|_| SchemaError::MissingColumn(name.to_string()))
}

fn check_null(col: &ArrayRef, name: &str, row: usize, global_row: usize) -> Result<(), SchemaError> {
    if col.is_null(row) {
        return Err(SchemaError::NullValue {
            row: global_row,
            column: name.to_string(),
        });
    }
    Ok(())
}

fn unsupported(col: &ArrayRef, name: &str) -> SchemaError {
    SchemaError::UnsupportedType {
        column: name.to_string(),
        data_type: col.data_type().clone(),
    }
}

fn extract_string(
    col: &ArrayRef,
    name: &str,
    row: usize,
    global_row: usize,
) -> Result<String, SchemaError> {
    check_null(col, name, row, global_row)?;
    match col.data_type() {
        DataType::Utf8 => Ok(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => Ok(col.as_string::<i64>().value(row).to_string()),
        _ => Err(unsupported(col, name)),
    }
}

fn extract_f64(
    col: &ArrayRef,
    name: &str,
    row: usize,
    global_row: usize,
) -> Result<f64, SchemaError> {
    check_null(col, name, row, global_row)?;
    match col.data_type() {
        DataType::Float64 => Ok(col.as_primitive::<Float64Type>().value(row)),
        DataType::Float32 => Ok(col.as_primitive::<Float32Type>().value(row) as f64),
        DataType::Int64 => Ok(col.as_primitive::<Int64Type>().value(row) as f64),
        DataType::Int32 => Ok(col.as_primitive::<Int32Type>().value(row) as f64),
        _ => Err(unsupported(col, name)),
    }
}

fn extract_class(col: &ArrayRef, row: usize, global_row: usize) -> Result<bool, SchemaError> {
    check_null(col, CLASS_COLUMN, row, global_row)?;
    match col.data_type() {
        DataType::Boolean => Ok(col.as_boolean().value(row)),
        DataType::Int64 => success_flag(col.as_primitive::<Int64Type>().value(row), global_row),
        DataType::Int32 => {
            success_flag(col.as_primitive::<Int32Type>().value(row) as i64, global_row)
        }
        _ => Err(unsupported(col, CLASS_COLUMN)),
    }
}
