use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::codes::{
    recode, AGE_COLUMN, CAREER_GOAL_COLUMN, EDUCATION_CODES, EDU_LEVEL_COLUMN, HOST_SITE_CODES,
    HOST_SITE_COLUMN, INDUSTRY_COLUMN, MILESTONE_COLUMN, SALARY_COLUMN,
};
use super::model::{Dataset, Record};

/// Cell texts read as missing, matching the usual dataframe NA markers.
const NA_VALUES: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("cannot access {}: {source}", .path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("missing required column '{0}'")]
    MissingColumn(String),

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("JSON row {row}: {reason}")]
    JsonShape { row: usize, reason: String },

    #[error("malformed Parquet: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("reading Parquet batch: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load and recode a survey export.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv` / `.txt` – comma separated, first column is the row index
/// * `.tsv`          – tab separated, first column is the row index
/// * `.json`         – `[{ "Host Site": "1.0", "Age": "24.0", ... }, ...]`
/// * `.parquet`      – any mix of string / numeric / boolean columns
pub fn load_file(path: &Path) -> Result<Dataset, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "csv" | "txt" => load_delimited(path, b',')?,
        "tsv" => load_delimited(path, b'\t')?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(LoadError::UnsupportedFormat(other.to_string())),
    };

    let dataset = build_dataset(table)?;
    log::info!(
        "Loaded {} respondents from {} across {} host sites",
        dataset.len(),
        path.display(),
        dataset.host_sites.len()
    );
    Ok(dataset)
}

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|source| LoadError::FileAccess {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// Raw table: every cell kept as text, no type inference
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

fn text_cell(s: &str) -> Option<String> {
    if NA_VALUES.contains(&s) {
        None
    } else {
        Some(s.to_string())
    }
}

/// Floats keep their decimal point so `1` stored as a double reads `"1.0"`.
fn float_cell(v: f64) -> Option<String> {
    if v.is_nan() {
        None
    } else {
        Some(format!("{v:?}"))
    }
}

// ---------------------------------------------------------------------------
// Delimited text loader
// ---------------------------------------------------------------------------

/// The first column is the exported row index and is dropped.
fn load_delimited(path: &Path, delimiter: u8) -> Result<RawTable, LoadError> {
    let file = open(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .from_reader(file);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .skip(1)
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        rows.push(record.iter().skip(1).map(text_cell).collect());
    }

    Ok(RawTable { headers, rows })
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records orientation. Headers are the union of keys in first-seen order;
/// a key absent from a row is a missing cell.
fn load_json(path: &Path) -> Result<RawTable, LoadError> {
    let file = open(path)?;
    let root: JsonValue = serde_json::from_reader(std::io::BufReader::new(file))?;

    let records = root.as_array().ok_or_else(|| LoadError::JsonShape {
        row: 0,
        reason: "expected a top-level array of records".to_string(),
    })?;

    let mut table = RawTable::default();
    let mut index: HashMap<String, usize> = HashMap::new();

    for (row_no, rec) in records.iter().enumerate() {
        let obj = rec.as_object().ok_or_else(|| LoadError::JsonShape {
            row: row_no,
            reason: "not a JSON object".to_string(),
        })?;

        let mut row = vec![None; table.headers.len()];
        for (key, val) in obj {
            let col = *index.entry(key.clone()).or_insert_with(|| {
                table.headers.push(key.clone());
                table.headers.len() - 1
            });
            if col >= row.len() {
                row.resize(col + 1, None);
            }
            row[col] = json_cell(val);
        }
        table.rows.push(row);
    }

    Ok(table)
}

fn json_cell(val: &JsonValue) -> Option<String> {
    match val {
        JsonValue::Null => None,
        JsonValue::String(s) => text_cell(s),
        JsonValue::Number(n) => match n.as_i64() {
            Some(i) => Some(i.to_string()),
            None => n.as_f64().and_then(float_cell),
        },
        JsonValue::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Works with files written by both Pandas (`df.to_parquet()`) and Polars.
/// The Pandas index, if stored, is just another ignored column.
fn load_parquet(path: &Path) -> Result<RawTable, LoadError> {
    let file = open(path)?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;

    let mut table = RawTable::default();

    for batch_result in reader {
        let batch = batch_result?;
        if table.headers.is_empty() {
            table.headers = batch
                .schema()
                .fields()
                .iter()
                .map(|f| f.name().clone())
                .collect();
        }

        let columns: Vec<Option<ArrayRef>> = batch
            .schema()
            .fields()
            .iter()
            .zip(batch.columns())
            .map(|(field, col)| readable_column(field.name(), col))
            .collect();

        for row in 0..batch.num_rows() {
            table.rows.push(
                columns
                    .iter()
                    .map(|col| col.as_ref().and_then(|c| arrow_cell(c, row)))
                    .collect(),
            );
        }
    }

    Ok(table)
}

/// Bring a column into one of the types [`arrow_cell`] reads. Dictionaries
/// (pandas `category`) unwrap to their values, narrow and unsigned integers
/// widen to `Int64`, anything else is cast to text. `None` if no cast exists.
fn readable_column(name: &str, col: &ArrayRef) -> Option<ArrayRef> {
    let target = match col.data_type() {
        DataType::Utf8
        | DataType::LargeUtf8
        | DataType::Int32
        | DataType::Int64
        | DataType::Float32
        | DataType::Float64
        | DataType::Boolean => return Some(col.clone()),
        DataType::Dictionary(_, values) => values.as_ref().clone(),
        DataType::Int8
        | DataType::Int16
        | DataType::UInt8
        | DataType::UInt16
        | DataType::UInt32 => DataType::Int64,
        DataType::Float16 => DataType::Float64,
        _ => DataType::Utf8,
    };

    match cast(col.as_ref(), &target) {
        Ok(converted) if converted.data_type() != col.data_type() => {
            readable_column(name, &converted)
        }
        Ok(_) => None,
        Err(e) => {
            log::warn!(
                "Column '{name}': cannot read {:?} values, treating them as missing: {e}",
                col.data_type()
            );
            None
        }
    }
}

fn arrow_cell(col: &ArrayRef, row: usize) -> Option<String> {
    if col.is_null(row) {
        return None;
    }
    match col.data_type() {
        DataType::Utf8 => text_cell(col.as_string::<i32>().value(row)),
        DataType::LargeUtf8 => text_cell(col.as_string::<i64>().value(row)),
        DataType::Int32 => Some(col.as_primitive::<Int32Type>().value(row).to_string()),
        DataType::Int64 => Some(col.as_primitive::<Int64Type>().value(row).to_string()),
        DataType::Float32 => float_cell(f64::from(col.as_primitive::<Float32Type>().value(row))),
        DataType::Float64 => float_cell(col.as_primitive::<Float64Type>().value(row)),
        DataType::Boolean => Some(col.as_boolean().value(row).to_string()),
        other => {
            log::debug!("Unexpected Parquet cell type {other:?}");
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Recoding
// ---------------------------------------------------------------------------

/// Positions of the required headers in a raw table.
struct SourceColumns {
    host_site: usize,
    age: usize,
    education_level: usize,
    milestone: usize,
    industry_interest: usize,
    salary_expectation: usize,
    career_goal: usize,
}

impl SourceColumns {
    fn locate(headers: &[String]) -> Result<Self, LoadError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| LoadError::MissingColumn(name.to_string()))
        };
        Ok(SourceColumns {
            host_site: find(HOST_SITE_COLUMN)?,
            age: find(AGE_COLUMN)?,
            education_level: find(EDU_LEVEL_COLUMN)?,
            milestone: find(MILESTONE_COLUMN)?,
            industry_interest: find(INDUSTRY_COLUMN)?,
            salary_expectation: find(SALARY_COLUMN)?,
            career_goal: find(CAREER_GOAL_COLUMN)?,
        })
    }
}

fn parse_age(raw: &str, row_no: usize) -> Option<f64> {
    match raw.trim().parse::<f64>() {
        Ok(age) if !age.is_nan() => Some(age),
        _ => {
            log::debug!("Row {row_no}: treating Age '{raw}' as missing");
            None
        }
    }
}

/// Recode the coded columns and drop rows without a known Host Site.
fn build_dataset(table: RawTable) -> Result<Dataset, LoadError> {
    let cols = SourceColumns::locate(&table.headers)?;
    let total = table.rows.len();
    let mut records = Vec::with_capacity(total);

    for (row_no, mut row) in table.rows.into_iter().enumerate() {
        let mut take = |idx: usize| row.get_mut(idx).and_then(Option::take);

        let Some(host_site) = take(cols.host_site)
            .as_deref()
            .and_then(|raw| recode(&HOST_SITE_CODES, raw))
        else {
            continue;
        };

        records.push(Record {
            host_site: host_site.to_string(),
            age: take(cols.age).and_then(|raw| parse_age(&raw, row_no)),
            education_level: take(cols.education_level)
                .and_then(|raw| recode(&EDUCATION_CODES, &raw))
                .map(str::to_string),
            milestone: take(cols.milestone),
            industry_interest: take(cols.industry_interest),
            salary_expectation: take(cols.salary_expectation),
            career_goal: take(cols.career_goal),
        });
    }

    let dropped = total - records.len();
    if dropped > 0 {
        log::info!("Dropped {dropped} of {total} rows with a missing or unmapped Host Site");
    }

    Ok(Dataset::from_records(records))
}
