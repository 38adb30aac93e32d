use std::io::Read;
use std::path::Path;

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use arrow::util::display::array_value_to_string;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::error::LoadError;
use super::model::{Column, Dataset, Value};
use super::schema::REQUIRED_COLUMNS;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a season table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row plus one record per player season (recommended)
/// * `.json`    – `[{ "player_name": ..., "season": ..., ... }, ...]`
/// * `.parquet` – flat columns of string / integer / float types
///
/// Every format must provide the columns in [`REQUIRED_COLUMNS`].
pub fn load_file(path: &Path) -> Result<Dataset, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => read_csv(open(path)?)?,
        "json" => {
            let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            parse_json(&text)?
        }
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(LoadError::UnsupportedExtension(other.to_string())),
    };

    log::info!(
        "Loaded {} rows x {} columns from {}",
        dataset.len(),
        dataset.columns().len(),
        path.display()
    );
    Ok(dataset)
}

fn open(path: &Path) -> Result<std::fs::File, LoadError> {
    std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Turn column-major cells into a dataset, rejecting sources that lack a
/// required column. All missing columns are reported at once.
fn finish(names: Vec<String>, cells: Vec<Vec<Value>>) -> Result<Dataset, LoadError> {
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|req| !names.iter().any(|n| n.as_str() == **req))
        .map(|req| req.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(LoadError::MissingColumns(missing));
    }

    let columns = names
        .into_iter()
        .zip(cells)
        .map(|(name, values)| Column::new(name, values))
        .collect();
    Dataset::from_columns(columns)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one record per player season.
/// Cell types are guessed per cell, so `draft_number` keeps its `"Undrafted"`
/// entries as text next to integer picks.
pub fn read_csv<R: Read>(source: R) -> Result<Dataset, LoadError> {
    let mut reader = csv::Reader::from_reader(source);
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut cells: Vec<Vec<Value>> = vec![Vec::new(); headers.len()];

    for result in reader.records() {
        let record = result?;
        for (col_idx, field) in record.iter().enumerate() {
            cells[col_idx].push(Value::guess(field));
        }
    }

    finish(headers, cells)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "player_name": "Dennis Rodman", "season": "1996-97", "draft_number": "27", ... },
///   ...
/// ]
/// ```
///
/// A key absent from some record reads as missing for that row.
pub fn parse_json(text: &str) -> Result<Dataset, LoadError> {
    let root: JsonValue = serde_json::from_str(text)?;
    let records = root
        .as_array()
        .ok_or_else(|| LoadError::Malformed("expected a top-level JSON array".into()))?;

    let mut names: Vec<String> = Vec::new();
    let mut objects = Vec::with_capacity(records.len());
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .ok_or_else(|| LoadError::Malformed(format!("row {i} is not a JSON object")))?;
        for key in obj.keys() {
            if !names.contains(key) {
                names.push(key.clone());
            }
        }
        objects.push(obj);
    }

    let cells = names
        .iter()
        .map(|name| {
            objects
                .iter()
                .map(|obj| obj.get(name).map(json_to_value).unwrap_or(Value::Null))
                .collect()
        })
        .collect();

    finish(names, cells)
}

fn json_to_value(val: &JsonValue) -> Value {
    match val {
        // pandas writes mixed columns as strings ("27", "Undrafted").
        JsonValue::String(s) => Value::guess(s),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Integer(i)
            } else if let Some(f) = n.as_f64() {
                Value::Float(f)
            } else {
                Value::String(n.to_string())
            }
        }
        JsonValue::Null => Value::Null,
        other => Value::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file written by pandas (`df.to_parquet()`) or polars.
///
/// String columns are type-guessed cell by cell like CSV fields, so an
/// object-dtype `draft_number` column loads the same way from either format.
fn load_parquet(path: &Path) -> Result<Dataset, LoadError> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(open(path)?)?;
    let names: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build()?;

    let mut cells: Vec<Vec<Value>> = vec![Vec::new(); names.len()];

    for batch_result in reader {
        let batch = batch_result?;
        for (col_idx, col) in batch.columns().iter().enumerate() {
            for row in 0..batch.num_rows() {
                cells[col_idx].push(arrow_cell(col, row));
            }
        }
    }

    finish(names, cells)
}

/// Extract a single cell from an Arrow column at a given row.
fn arrow_cell(col: &ArrayRef, row: usize) -> Value {
    if col.is_null(row) {
        return Value::Null;
    }
    match col.data_type() {
        DataType::Utf8 => Value::guess(col.as_string::<i32>().value(row)),
        DataType::LargeUtf8 => Value::guess(col.as_string::<i64>().value(row)),
        DataType::Int32 => Value::Integer(i64::from(col.as_primitive::<Int32Type>().value(row))),
        DataType::Int64 => Value::Integer(col.as_primitive::<Int64Type>().value(row)),
        DataType::Float32 => Value::Float(f64::from(col.as_primitive::<Float32Type>().value(row))),
        DataType::Float64 => Value::Float(col.as_primitive::<Float64Type>().value(row)),
        _ => match array_value_to_string(col.as_ref(), row) {
            Ok(text) => Value::guess(&text),
            Err(e) => {
                log::warn!("unreadable {:?} cell at row {row}: {e}", col.data_type());
                Value::Null
            }
        },
    }
}
