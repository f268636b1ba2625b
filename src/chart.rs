use serde::Serialize;

use crate::analysis::stats::{BoxSummary, Histogram};

// ---------------------------------------------------------------------------
// Chart requests handed to a rendering sink
// ---------------------------------------------------------------------------

/// A fully computed chart: sinks only draw, they never touch the table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub kind: ChartKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChartKind {
    /// Grid of panels over a set of columns.
    PairGrid {
        columns: Vec<String>,
        /// `cells[row][col]`, histogram on the diagonal.
        cells: Vec<Vec<PairCell>>,
    },
    /// Annotated square matrix, values expected in `[-1, 1]`.
    Heatmap {
        labels: Vec<String>,
        values: Vec<Vec<f64>>,
    },
    Histogram(Histogram),
    BoxPlot { groups: Vec<BoxGroup> },
    Scatter { groups: Vec<ScatterGroup> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PairCell {
    Histogram(Histogram),
    /// Points `[x, y]` where `x` comes from the panel's column.
    Scatter(Vec<[f64; 2]>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxGroup {
    pub label: String,
    pub summary: BoxSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterGroup {
    pub label: String,
    pub points: Vec<[f64; 2]>,
}

impl Chart {
    pub fn new(title: &str, x_label: &str, y_label: &str, kind: ChartKind) -> Self {
        Chart {
            title: title.to_string(),
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            kind,
        }
    }

    /// Lower-case, underscore-separated title for use in file names.
    pub fn slug(&self) -> String {
        let mut slug = String::with_capacity(self.title.len());
        for ch in self.title.chars() {
            if ch.is_ascii_alphanumeric() {
                slug.push(ch.to_ascii_lowercase());
            } else if !slug.ends_with('_') {
                slug.push('_');
            }
        }
        slug.trim_matches('_').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_collapses_punctuation() {
        let chart = Chart::new(
            "Age vs Fare Colored by Survival",
            "Age",
            "Fare",
            ChartKind::Scatter { groups: vec![] },
        );
        assert_eq!(chart.slug(), "age_vs_fare_colored_by_survival");
    }

    #[test]
    fn serialises_with_kind_tag() {
        let chart = Chart::new(
            "Correlation Heatmap",
            "",
            "",
            ChartKind::Heatmap {
                labels: vec!["Fare".into()],
                values: vec![vec![1.0]],
            },
        );
        let json = serde_json::to_value(&chart).unwrap();
        assert_eq!(json["kind"]["type"], "heatmap");
        assert_eq!(json["kind"]["labels"][0], "Fare");
    }
}
