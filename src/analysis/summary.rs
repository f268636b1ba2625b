use std::collections::BTreeMap;

use serde::Serialize;

use super::stats::{self, present};
use crate::data::model::{CellValue, ColumnType, PassengerTable};

// ---------------------------------------------------------------------------
// Schema overview (`DataFrame.info`)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnInfo {
    pub name: String,
    pub non_null: usize,
    pub dtype: ColumnType,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableInfo {
    pub rows: usize,
    pub columns: Vec<ColumnInfo>,
}

pub fn info(table: &PassengerTable) -> TableInfo {
    let non_null = table.non_null_counts();
    TableInfo {
        rows: table.len(),
        columns: table
            .columns()
            .iter()
            .map(|c| ColumnInfo {
                name: c.name.clone(),
                non_null: non_null.get(c.name.as_str()).copied().unwrap_or(0),
                dtype: c.dtype,
            })
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Descriptive statistics (`DataFrame.describe`)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Describe {
    pub column: String,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub q50: f64,
    pub q75: f64,
    pub max: f64,
}

impl Describe {
    /// Row labels in print order, paired with the value for this column.
    pub fn rows(&self) -> [(&'static str, f64); 8] {
        [
            ("count", self.count as f64),
            ("mean", self.mean),
            ("std", self.std),
            ("min", self.min),
            ("25%", self.q25),
            ("50%", self.q50),
            ("75%", self.q75),
            ("max", self.max),
        ]
    }
}

/// Describe every numeric column over its non-missing values.
pub fn describe(table: &PassengerTable) -> Vec<Describe> {
    table
        .numeric_columns()
        .into_iter()
        .map(|idx| {
            let values = stats::sorted(&present(&table.numeric_series(idx)));
            Describe {
                column: table.columns()[idx].name.clone(),
                count: values.len(),
                mean: stats::mean(&values),
                std: stats::std_dev(&values),
                min: values.first().copied().unwrap_or(f64::NAN),
                q25: stats::quantile_sorted(&values, 0.25),
                q50: stats::quantile_sorted(&values, 0.5),
                q75: stats::quantile_sorted(&values, 0.75),
                max: values.last().copied().unwrap_or(f64::NAN),
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Value counts
// ---------------------------------------------------------------------------

/// Occurrences per distinct non-missing value, most frequent first.
pub fn value_counts(table: &PassengerTable, idx: usize) -> Vec<(CellValue, usize)> {
    let mut counts: BTreeMap<&CellValue, usize> = BTreeMap::new();
    for v in table.values(idx).filter(|v| !v.is_null()) {
        *counts.entry(v).or_default() += 1;
    }
    let mut out: Vec<(CellValue, usize)> =
        counts.into_iter().map(|(v, n)| (v.clone(), n)).collect();
    // stable sort keeps ascending key order among ties
    out.sort_by(|a, b| b.1.cmp(&a.1));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> PassengerTable {
        let row = |s: i64, sex: &str, age: Option<f64>| {
            vec![
                CellValue::Integer(s),
                CellValue::String(sex.into()),
                age.map_or(CellValue::Null, CellValue::Float),
            ]
        };
        PassengerTable::from_rows(
            vec!["Survived".into(), "Sex".into(), "Age".into()],
            vec![
                row(0, "male", Some(22.0)),
                row(1, "female", Some(38.0)),
                row(1, "female", None),
                row(0, "male", Some(35.0)),
                row(0, "male", Some(54.0)),
            ],
        )
    }

    #[test]
    fn value_counts_sum_to_row_count() {
        let t = table();
        let counts = value_counts(&t, 0);
        assert_eq!(counts, vec![(CellValue::Integer(0), 3), (CellValue::Integer(1), 2)]);
        assert_eq!(counts.iter().map(|c| c.1).sum::<usize>(), t.len());
    }

    #[test]
    fn describe_skips_text_and_missing() {
        let d = describe(&table());
        assert_eq!(d.len(), 2);
        let age = &d[1];
        assert_eq!(age.column, "Age");
        assert_eq!(age.count, 4);
        assert!((age.mean - 37.25).abs() < 1e-9);
        assert_eq!(age.min, 22.0);
        assert_eq!(age.max, 54.0);
        assert!((age.q50 - 36.5).abs() < 1e-9);
    }

    #[test]
    fn info_reports_non_null_counts() {
        let i = info(&table());
        assert_eq!(i.rows, 5);
        assert_eq!(i.columns[2].non_null, 4);
        assert_eq!(i.columns[1].dtype, ColumnType::Object);
    }
}
