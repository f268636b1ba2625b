use std::path::PathBuf;

use thiserror::Error;

use crate::pipeline::Step;

/// Fatal conditions of an analysis run. None of them are retried.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EdaError {
    #[error(
        "passenger dataset not found; tried {}. \
         Place 'train.csv' in one of these locations or pass --data <PATH>",
        display_paths(.attempted)
    )]
    DatasetNotFound { attempted: Vec<PathBuf> },

    #[error("step '{step}' needs column '{column}', which is not in the table")]
    MissingColumn { step: Step, column: String },

    #[error("step '{step}' needs numeric data but column '{column}' is not numeric")]
    TypeMismatch { step: Step, column: String },

    #[error("cannot split '{column}' into 4 quantile bins: edges {edges:?} are not unique")]
    DegenerateBins { column: String, edges: Vec<f64> },
}

fn display_paths(paths: &[PathBuf]) -> String {
    if paths.is_empty() {
        return "no locations".to_string();
    }
    paths
        .iter()
        .map(|p| format!("'{}'", p.display()))
        .collect::<Vec<_>>()
        .join(", ")
}
