use serde::Serialize;

use super::stats::pearson;
use crate::data::model::PassengerTable;
use crate::error::EdaError;
use crate::pipeline::Step;

/// Square Pearson correlation matrix with labels along both axes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub labels: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

#[cfg(test)]
impl CorrelationMatrix {
    pub fn get(&self, row: &str, col: &str) -> Option<f64> {
        let r = self.labels.iter().position(|l| l == row)?;
        let c = self.labels.iter().position(|l| l == col)?;
        Some(self.values[r][c])
    }
}

/// Correlate every numeric column of the table with every other.
///
/// Non-numeric columns are filtered out before the computation.
pub fn numeric_correlation(table: &PassengerTable) -> Result<CorrelationMatrix, EdaError> {
    correlate(table, &table.numeric_columns())
}

/// Correlate the given columns, rejecting any that are not numeric.
pub fn correlate(table: &PassengerTable, columns: &[usize]) -> Result<CorrelationMatrix, EdaError> {
    for &idx in columns {
        let col = &table.columns()[idx];
        if !col.dtype.is_numeric() {
            return Err(EdaError::TypeMismatch {
                step: Step::CorrelationHeatmap,
                column: col.name.clone(),
            });
        }
    }

    let series: Vec<Vec<Option<f64>>> = columns.iter().map(|&i| table.numeric_series(i)).collect();
    let values = (0..series.len())
        .map(|i| {
            (0..series.len())
                .map(|j| {
                    let r = pearson(&series[i], &series[j]);
                    // self-correlation is exactly one unless the column is constant
                    if i == j && !r.is_nan() {
                        1.0
                    } else {
                        r
                    }
                })
                .collect()
        })
        .collect();

    Ok(CorrelationMatrix {
        labels: columns
            .iter()
            .map(|&i| table.columns()[i].name.clone())
            .collect(),
        values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CellValue;

    fn table() -> PassengerTable {
        let row = |s: i64, name: &str, fare: f64| {
            vec![
                CellValue::Integer(s),
                CellValue::String(name.into()),
                CellValue::Float(fare),
            ]
        };
        PassengerTable::from_rows(
            vec!["Survived".into(), "Name".into(), "Fare".into()],
            vec![
                row(1, "Allen", 100.0),
                row(0, "Braund", 7.0),
                row(1, "Cumings", 80.0),
                row(0, "Dooley", 8.0),
            ],
        )
    }

    #[test]
    fn excludes_text_columns() {
        let m = numeric_correlation(&table()).unwrap();
        assert_eq!(m.labels, vec!["Survived".to_string(), "Fare".to_string()]);
        assert!(m.get("Name", "Fare").is_none());
        assert_eq!(m.get("Fare", "Fare"), Some(1.0));
        let r = m.get("Survived", "Fare").unwrap();
        assert!(r > 0.9 && r <= 1.0);
        assert_eq!(m.get("Survived", "Fare"), m.get("Fare", "Survived"));
    }

    #[test]
    fn constant_column_has_nan_diagonal() {
        let t = PassengerTable::from_rows(
            vec!["Parch".into(), "Fare".into()],
            vec![
                vec![CellValue::Integer(0), CellValue::Float(7.25)],
                vec![CellValue::Integer(0), CellValue::Float(71.28)],
                vec![CellValue::Integer(0), CellValue::Float(8.05)],
            ],
        );
        let m = numeric_correlation(&t).unwrap();
        assert!(m.get("Parch", "Parch").unwrap().is_nan());
        assert!(m.get("Parch", "Fare").unwrap().is_nan());
        assert_eq!(m.get("Fare", "Fare"), Some(1.0));
    }

    #[test]
    fn rejects_text_column_when_unfiltered() {
        let t = table();
        let err = correlate(&t, &[0, 1, 2]).unwrap_err();
        assert_eq!(
            err,
            EdaError::TypeMismatch {
                step: Step::CorrelationHeatmap,
                column: "Name".into()
            }
        );
    }
}
