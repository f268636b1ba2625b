use std::path::PathBuf;

use clap::Parser;

use crate::data::locator::CandidatePaths;

/// Exploratory data analysis of the Titanic passenger table.
///
/// Looks for `train.csv` in the usual places, prints summary tables and
/// survival rates, and shows each chart in a window. Close a window to move
/// on to the next chart.
///
/// Examples:
///   titanic-eda
///   titanic-eda --data ~/datasets/titanic/train.csv
///   titanic-eda --save-charts charts/
///   titanic-eda --no-charts
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Dataset to analyse instead of searching the default locations
    ///
    /// Accepts .csv, .json (records) and .parquet files.
    #[arg(short, long, value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// Write each chart as PNG + JSON into this directory instead of
    /// opening windows
    #[arg(short, long, value_name = "DIR", conflicts_with = "no_charts")]
    pub save_charts: Option<PathBuf>,

    /// Skip charts and print only the text report
    #[arg(long)]
    pub no_charts: bool,
}

impl Args {
    /// Candidate dataset locations, in search order.
    pub fn candidates(&self) -> CandidatePaths {
        match &self.data {
            Some(path) => CandidatePaths::new([path.clone()]),
            None => CandidatePaths::standard(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_data_is_the_only_candidate() {
        let args = Args::parse_from(["titanic-eda", "--data", "elsewhere/passengers.csv"]);
        assert_eq!(
            args.candidates().paths(),
            &[PathBuf::from("elsewhere/passengers.csv")]
        );
    }

    #[test]
    fn defaults_to_standard_search() {
        let args = Args::parse_from(["titanic-eda"]);
        assert_eq!(args.candidates(), CandidatePaths::standard());
        assert!(!args.no_charts);
        assert!(args.save_charts.is_none());
    }

    #[test]
    fn save_and_skip_conflict() {
        let parsed = Args::try_parse_from(["titanic-eda", "--save-charts", "out", "--no-charts"]);
        assert!(parsed.is_err());
    }
}
