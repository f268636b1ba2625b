use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{
    Array, AsArray, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{CellValue, PassengerTable};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a passenger table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, one passenger per line (the usual `train.csv`)
/// * `.json`    – `[{ "Survived": 0, "Pclass": 3, ... }, ...]`
/// * `.parquet` – flat scalar columns
pub fn load_file(path: &Path) -> Result<PassengerTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    log::info!(
        "Loaded {} passengers with columns {:?}",
        table.len(),
        table.columns().iter().map(|c| c.name.as_str()).collect::<Vec<_>>()
    );
    Ok(table)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, every other row one passenger.
/// Empty cells are missing values.
fn load_csv(path: &Path) -> Result<PassengerTable> {
    let reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .context("opening CSV")?;
    read_csv(reader)
}

fn read_csv<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<PassengerTable> {
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        rows.push(record.iter().map(guess_cell_type).collect());
    }

    Ok(PassengerTable::from_rows(headers, rows))
}

fn guess_cell_type(s: &str) -> CellValue {
    let s = s.trim();
    if s.is_empty() {
        return CellValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return if f.is_nan() {
            CellValue::Null
        } else {
            CellValue::Float(f)
        };
    }
    match s {
        "true" | "True" | "TRUE" => CellValue::Bool(true),
        "false" | "False" | "FALSE" => CellValue::Bool(false),
        _ => CellValue::String(s.to_string()),
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "PassengerId": 1, "Survived": 0, "Sex": "male", "Age": 22.0, ... },
///   ...
/// ]
/// ```
///
/// Column order follows first appearance across the records.
fn load_json(path: &Path) -> Result<PassengerTable> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json(&text)
}

fn parse_json(text: &str) -> Result<PassengerTable> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;

    let records = root.as_array().context("Expected top-level JSON array")?;

    let mut headers: Vec<String> = Vec::new();
    let mut objects = Vec::with_capacity(records.len());
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;
        for key in obj.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
        objects.push(obj);
    }

    let rows = objects
        .iter()
        .map(|obj| {
            headers
                .iter()
                .map(|h| obj.get(h).map(json_to_cell).unwrap_or(CellValue::Null))
                .collect()
        })
        .collect();

    Ok(PassengerTable::from_rows(headers, rows))
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Null => CellValue::Null,
        other => {
            log::warn!("nested JSON value {other} kept as text");
            CellValue::String(other.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file of passengers, one scalar column per field.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<PassengerTable> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let headers: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        for row in 0..batch.num_rows() {
            rows.push(
                batch
                    .columns()
                    .iter()
                    .map(|col| extract_cell_value(col, row))
                    .collect(),
            );
        }
    }

    Ok(PassengerTable::from_rows(headers, rows))
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_cell_value(col: &Arc<dyn Array>, row: usize) -> CellValue {
    if col.is_null(row) {
        return CellValue::Null;
    }
    match col.data_type() {
        DataType::Utf8 => match col.as_any().downcast_ref::<StringArray>() {
            Some(s) => CellValue::String(s.value(row).to_string()),
            None => CellValue::Null,
        },
        DataType::LargeUtf8 => CellValue::String(col.as_string::<i64>().value(row).to_string()),
        DataType::Int32 => col
            .as_any()
            .downcast_ref::<Int32Array>()
            .map_or(CellValue::Null, |a| CellValue::Integer(a.value(row) as i64)),
        DataType::Int64 => col
            .as_any()
            .downcast_ref::<Int64Array>()
            .map_or(CellValue::Null, |a| CellValue::Integer(a.value(row))),
        DataType::Float32 => col
            .as_any()
            .downcast_ref::<Float32Array>()
            .map_or(CellValue::Null, |a| float_cell(a.value(row) as f64)),
        DataType::Float64 => col
            .as_any()
            .downcast_ref::<Float64Array>()
            .map_or(CellValue::Null, |a| float_cell(a.value(row))),
        DataType::Boolean => col
            .as_any()
            .downcast_ref::<BooleanArray>()
            .map_or(CellValue::Null, |a| CellValue::Bool(a.value(row))),
        other => {
            log::warn!("unsupported parquet type {other:?} kept as text");
            CellValue::String(format!("{other:?}"))
        }
    }
}

fn float_cell(v: f64) -> CellValue {
    if v.is_nan() {
        CellValue::Null
    } else {
        CellValue::Float(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::ColumnType;

    const SAMPLE: &str = "\
PassengerId,Survived,Pclass,Name,Sex,Age,SibSp,Parch,Fare
1,0,3,\"Braund, Mr. Owen Harris\",male,22,1,0,7.25
2,1,1,\"Cumings, Mrs. John Bradley\",female,38,1,0,71.2833
3,1,3,\"Heikkinen, Miss. Laina\",female,,0,0,7.925
";

    fn sample_table() -> PassengerTable {
        read_csv(csv::Reader::from_reader(SAMPLE.as_bytes())).unwrap()
    }

    #[test]
    fn csv_dtypes_follow_pandas_inference() {
        let table = sample_table();
        let dtype = |name: &str| table.columns()[table.column_index(name).unwrap()].dtype;

        assert_eq!(table.len(), 3);
        assert_eq!(dtype("Survived"), ColumnType::Int64);
        assert_eq!(dtype("Name"), ColumnType::Object);
        assert_eq!(dtype("Sex"), ColumnType::Object);
        assert_eq!(dtype("Age"), ColumnType::Float64);
        assert_eq!(dtype("Fare"), ColumnType::Float64);
    }

    #[test]
    fn empty_csv_cell_is_missing() {
        let table = sample_table();
        let age = table.column_index("Age").unwrap();
        assert_eq!(table.numeric_series(age), vec![Some(22.0), Some(38.0), None]);
    }

    #[test]
    fn guesses_cell_types() {
        assert_eq!(guess_cell_type(""), CellValue::Null);
        assert_eq!(guess_cell_type("3"), CellValue::Integer(3));
        assert_eq!(guess_cell_type("7.25"), CellValue::Float(7.25));
        assert_eq!(guess_cell_type("True"), CellValue::Bool(true));
        assert_eq!(guess_cell_type("S"), CellValue::String("S".into()));
    }

    #[test]
    fn json_records_fill_missing_keys_with_null() {
        let table = parse_json(
            r#"[{"Survived": 1, "Sex": "female", "Age": 29.0},
                {"Survived": 0, "Sex": "male"}]"#,
        )
        .unwrap();
        let age = table.column_index("Age").unwrap();
        assert_eq!(table.numeric_series(age), vec![Some(29.0), None]);
        assert_eq!(table.columns()[age].dtype, ColumnType::Float64);
    }

    #[test]
    fn json_must_be_an_array() {
        assert!(parse_json(r#"{"Survived": 1}"#).is_err());
    }

    #[test]
    fn rejects_unknown_extension() {
        let err = load_file(Path::new("passengers.xlsx")).unwrap_err();
        assert!(format!("{err:#}").contains(".xlsx"));
    }

    #[test]
    fn loads_csv_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("train.csv");
        std::fs::write(&path, SAMPLE).unwrap();
        let table = load_file(&path).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.columns().len(), 9);
    }
}
