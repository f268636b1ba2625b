use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::error::EdaError;
use crate::pipeline::Step;

// ---------------------------------------------------------------------------
// CellValue – a single cell of the passenger table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring the scalar dtypes pandas infers
/// from a CSV. Used as a `BTreeMap` key for grouping, so it must be `Ord`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

// -- Manual Eq/Ord so we can group by CellValue --

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use CellValue::*;
        fn discriminant(v: &CellValue) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                String(_) => 4,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (String(a), String(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl std::hash::Hash for CellValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            CellValue::String(s) => s.hash(state),
            CellValue::Integer(i) => i.hash(state),
            CellValue::Float(f) => f.to_bits().hash(state),
            CellValue::Bool(b) => b.hash(state),
            CellValue::Null => {}
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, "NaN"),
        }
    }
}

impl CellValue {
    /// Interpret the value as an `f64` for numeric computations.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) if !v.is_nan() => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        match self {
            CellValue::Null => true,
            CellValue::Float(v) => v.is_nan(),
            _ => false,
        }
    }
}

// ---------------------------------------------------------------------------
// ColumnType – inferred dtype of a whole column
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ColumnType {
    Int64,
    Float64,
    Bool,
    Object,
}

impl ColumnType {
    /// Infer the column dtype from its cells.
    ///
    /// Integers without gaps stay `Int64`; a missing value or any float
    /// promotes the column to `Float64`. Anything textual makes it `Object`.
    pub fn infer<'a>(cells: impl IntoIterator<Item = &'a CellValue>) -> Self {
        let mut has_int = false;
        let mut has_float = false;
        let mut has_bool = false;
        let mut has_null = false;
        let mut has_text = false;

        for cell in cells {
            match cell {
                CellValue::Integer(_) => has_int = true,
                CellValue::Float(_) => has_float = true,
                CellValue::Bool(_) => has_bool = true,
                CellValue::Null => has_null = true,
                CellValue::String(_) => has_text = true,
            }
        }

        if has_text || (has_bool && (has_int || has_float)) {
            ColumnType::Object
        } else if has_bool {
            if has_null {
                ColumnType::Object
            } else {
                ColumnType::Bool
            }
        } else if has_float || (has_int && has_null) {
            ColumnType::Float64
        } else if has_int {
            ColumnType::Int64
        } else {
            // Entirely empty column: pandas reads it as float64 full of NaN.
            ColumnType::Float64
        }
    }

    /// Numeric in the `select_dtypes(include=['number'])` sense.
    pub fn is_numeric(self) -> bool {
        matches!(self, ColumnType::Int64 | ColumnType::Float64)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::Int64 => "int64",
            ColumnType::Float64 => "float64",
            ColumnType::Bool => "bool",
            ColumnType::Object => "object",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// PassengerTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// A named, typed column header.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub dtype: ColumnType,
}

/// Row-oriented table loaded once and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct PassengerTable {
    columns: Vec<Column>,
    rows: Vec<Vec<CellValue>>,
}

impl PassengerTable {
    /// Build a table from a header and rows, inferring every column dtype.
    ///
    /// Rows shorter than the header are padded with nulls, longer rows are
    /// truncated.
    pub fn from_rows(names: Vec<String>, mut rows: Vec<Vec<CellValue>>) -> Self {
        let width = names.len();
        for row in &mut rows {
            row.resize(width, CellValue::Null);
        }

        let columns = names
            .into_iter()
            .enumerate()
            .map(|(idx, name)| Column {
                dtype: ColumnType::infer(rows.iter().map(|r| &r[idx])),
                name,
            })
            .collect();

        PassengerTable { columns, rows }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Resolve a column a pipeline step depends on.
    pub fn require(&self, step: Step, name: &str) -> Result<usize, EdaError> {
        self.column_index(name)
            .ok_or_else(|| EdaError::MissingColumn {
                step,
                column: name.to_string(),
            })
    }

    /// Cells of one column, in row order.
    pub fn values(&self, idx: usize) -> impl Iterator<Item = &CellValue> + '_ {
        self.rows.iter().map(move |row| &row[idx])
    }

    /// Numeric view of a column; `None` marks a missing or non-numeric cell.
    pub fn numeric_series(&self, idx: usize) -> Vec<Option<f64>> {
        self.values(idx).map(CellValue::as_f64).collect()
    }

    /// Indices of the numeric columns, in table order.
    pub fn numeric_columns(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.dtype.is_numeric())
            .map(|(i, _)| i)
            .collect()
    }

    /// Count of non-null cells per column name.
    pub fn non_null_counts(&self) -> BTreeMap<&str, usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(idx, c)| {
                let n = self.values(idx).filter(|v| !v.is_null()).count();
                (c.name.as_str(), n)
            })
            .collect()
    }
}
