use std::collections::BTreeMap;
use std::fmt;

use anyhow::{Context, Result};

use crate::analysis::correlation::numeric_correlation;
use crate::analysis::grouping::{rate_by_column, rate_by_quantile, GroupedAggregate, QUARTILES};
use crate::analysis::stats::{present, BoxSummary, Histogram};
use crate::analysis::summary::{describe, info, value_counts};
use crate::chart::{BoxGroup, Chart, ChartKind, PairCell, ScatterGroup};
use crate::data::model::{CellValue, PassengerTable};
use crate::error::EdaError;
use crate::report::{fmt_float, ReportItem, TextTable};
use crate::sink::{RenderSink, ReportSink};

pub const SURVIVED: &str = "Survived";
pub const PCLASS: &str = "Pclass";
pub const SEX: &str = "Sex";
pub const AGE: &str = "Age";
pub const SIBSP: &str = "SibSp";
pub const PARCH: &str = "Parch";
pub const FARE: &str = "Fare";

/// Columns shown in the pairwise relationship grid.
pub const PAIR_COLUMNS: [&str; 6] = [SURVIVED, PCLASS, AGE, SIBSP, PARCH, FARE];

const DISTRIBUTION_BINS: usize = 30;
const PAIR_DIAGONAL_BINS: usize = 10;

/// Closing remarks printed after the tables. Fixed text, not derived from
/// the data.
pub const DEFAULT_INSIGHTS: [&str; 5] = [
    "Higher class passengers had higher survival rates.",
    "Females had significantly higher survival rates than males.",
    "Passengers with fewer family members aboard had better survival chances.",
    "Higher fare paying passengers tended to survive more often.",
    "Age distribution varies across classes, with younger passengers more likely to survive.",
];

// ---------------------------------------------------------------------------
// Steps
// ---------------------------------------------------------------------------

/// The analysis steps, in presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    Summary,
    TargetDistribution,
    PairwiseRelationships,
    CorrelationHeatmap,
    Distributions,
    GroupedBoxplots,
    ColoredScatter,
    SurvivalRates,
    Insights,
}

impl Step {
    pub const ALL: [Step; 9] = [
        Step::Summary,
        Step::TargetDistribution,
        Step::PairwiseRelationships,
        Step::CorrelationHeatmap,
        Step::Distributions,
        Step::GroupedBoxplots,
        Step::ColoredScatter,
        Step::SurvivalRates,
        Step::Insights,
    ];
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::Summary => "summary",
            Step::TargetDistribution => "target distribution",
            Step::PairwiseRelationships => "pairwise relationships",
            Step::CorrelationHeatmap => "correlation heatmap",
            Step::Distributions => "distributions",
            Step::GroupedBoxplots => "grouped boxplots",
            Step::ColoredScatter => "colored scatter",
            Step::SurvivalRates => "survival rates",
            Step::Insights => "insights",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Runs every step over one table. Steps do not feed each other; the first
/// failure aborts the run.
#[derive(Debug, Clone)]
pub struct Pipeline {
    insights: Vec<String>,
}

impl Default for Pipeline {
    fn default() -> Self {
        Pipeline::with_insights(DEFAULT_INSIGHTS)
    }
}

impl Pipeline {
    pub fn with_insights(insights: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Pipeline {
            insights: insights.into_iter().map(Into::into).collect(),
        }
    }

    pub fn run(
        &self,
        table: &PassengerTable,
        render: &mut dyn RenderSink,
        report: &mut dyn ReportSink,
    ) -> Result<()> {
        for step in Step::ALL {
            log::debug!("running step '{step}'");
            let mut out = Output {
                step,
                render: &mut *render,
                report: &mut *report,
            };
            match step {
                Step::Summary => summary(table, &mut out)?,
                Step::TargetDistribution => target_distribution(table, &mut out)?,
                Step::PairwiseRelationships => pairwise(table, &mut out)?,
                Step::CorrelationHeatmap => correlation(table, &mut out)?,
                Step::Distributions => distributions(table, &mut out)?,
                Step::GroupedBoxplots => boxplots(table, &mut out)?,
                Step::ColoredScatter => colored_scatter(table, &mut out)?,
                Step::SurvivalRates => survival_rates(table, &mut out)?,
                Step::Insights => self.emit_insights(&mut out)?,
            }
        }
        Ok(())
    }

    fn emit_insights(&self, out: &mut Output<'_>) -> Result<()> {
        out.emit(ReportItem::Blank)?;
        out.emit(ReportItem::Heading("Insights".into()))?;
        for line in &self.insights {
            out.emit(ReportItem::Line(format!("- {line}")))?;
        }
        Ok(())
    }
}

/// Both sinks, tagged with the step writing to them.
struct Output<'a> {
    step: Step,
    render: &'a mut dyn RenderSink,
    report: &'a mut dyn ReportSink,
}

impl Output<'_> {
    fn emit(&mut self, item: ReportItem) -> Result<()> {
        self.report
            .emit(&item)
            .with_context(|| format!("step '{}' could not write its report", self.step))
    }

    fn chart(&mut self, chart: Chart) -> Result<()> {
        self.render
            .render(&chart)
            .with_context(|| format!("step '{}' could not render '{}'", self.step, chart.title))
    }
}

// ---------------------------------------------------------------------------
// Textual steps
// ---------------------------------------------------------------------------

fn summary(table: &PassengerTable, out: &mut Output<'_>) -> Result<()> {
    let info = info(table);
    out.emit(ReportItem::Heading("Data Info".into()))?;
    let range = match info.rows {
        0 => "RangeIndex: 0 entries".to_string(),
        n => format!("RangeIndex: {n} entries, 0 to {}", n - 1),
    };
    out.emit(ReportItem::Line(range))?;
    out.emit(ReportItem::Line(format!(
        "Data columns (total {} columns):",
        info.columns.len()
    )))?;
    let mut columns = TextTable::new(["#", "Column", "Non-Null Count", "Dtype"]);
    for (i, c) in info.columns.iter().enumerate() {
        columns = columns.row([
            i.to_string(),
            c.name.clone(),
            format!("{} non-null", c.non_null),
            c.dtype.to_string(),
        ]);
    }
    let mut dtype_counts: BTreeMap<String, usize> = BTreeMap::new();
    for c in &info.columns {
        *dtype_counts.entry(c.dtype.to_string()).or_default() += 1;
    }
    let dtypes: Vec<String> = dtype_counts
        .iter()
        .map(|(d, n)| format!("{d}({n})"))
        .collect();
    out.emit(ReportItem::Table(
        columns.footer(format!("dtypes: {}", dtypes.join(", "))),
    ))?;

    out.emit(ReportItem::Blank)?;
    out.emit(ReportItem::Heading("Data Description".into()))?;
    let described = describe(table);
    let mut stats = TextTable::new(
        std::iter::once(String::new()).chain(described.iter().map(|d| d.column.clone())),
    );
    for (i, label) in ["count", "mean", "std", "min", "25%", "50%", "75%", "max"]
        .into_iter()
        .enumerate()
    {
        stats = stats.row(
            std::iter::once(label.to_string())
                .chain(described.iter().map(|d| fmt_float(d.rows()[i].1))),
        );
    }
    out.emit(ReportItem::Table(stats))
}

fn target_distribution(table: &PassengerTable, out: &mut Output<'_>) -> Result<()> {
    let survived = table.require(out.step, SURVIVED)?;
    out.emit(ReportItem::Blank)?;
    out.emit(ReportItem::Heading(format!("Value Counts for '{SURVIVED}'")))?;
    let mut counts = TextTable::new([SURVIVED, "count"]);
    for (value, n) in value_counts(table, survived) {
        counts = counts.row([value.to_string(), n.to_string()]);
    }
    out.emit(ReportItem::Table(counts.footer("Name: count, dtype: int64")))
}

fn survival_rates(table: &PassengerTable, out: &mut Output<'_>) -> Result<()> {
    let step = out.step;
    let survived = table.require(step, SURVIVED)?;
    let by_column = [
        (PCLASS, "Survival Rate by Passenger Class"),
        (SEX, "Survival Rate by Sex"),
        (SIBSP, "Survival Rate by Number of Siblings/Spouses Aboard"),
        (PARCH, "Survival Rate by Number of Parents/Children Aboard"),
    ]
    .into_iter()
    .map(|(column, title)| Ok((table.require(step, column)?, title)))
    .collect::<Result<Vec<_>, EdaError>>()?;
    let fare = table.require(step, FARE)?;
    // nothing is printed until every fallible lookup has succeeded
    let bins = rate_by_quantile(table, fare, survived, QUARTILES)?;

    for (key, title) in by_column {
        emit_rates(out, title, &rate_by_column(table, key, survived))?;
    }
    emit_rates(out, "Survival Rate by Fare Bins", &bins)
}

fn emit_rates<K: Ord + fmt::Display>(
    out: &mut Output<'_>,
    title: &str,
    agg: &GroupedAggregate<K>,
) -> Result<()> {
    out.emit(ReportItem::Blank)?;
    out.emit(ReportItem::Heading(title.to_string()))?;
    let mut rates = TextTable::new([agg.key_column.as_str(), SURVIVED]);
    for (key, rate) in &agg.groups {
        rates = rates.row([key.to_string(), fmt_float(rate.mean())]);
    }
    out.emit(ReportItem::Table(
        rates.footer(format!("Name: {SURVIVED}, dtype: float64")),
    ))
}

// ---------------------------------------------------------------------------
// Chart steps
// ---------------------------------------------------------------------------

fn pairwise(table: &PassengerTable, out: &mut Output<'_>) -> Result<()> {
    let step = out.step;
    let series = PAIR_COLUMNS
        .iter()
        .map(|c| Ok(table.numeric_series(table.require(step, c)?)))
        .collect::<Result<Vec<_>, EdaError>>()?;

    let cells = (0..series.len())
        .map(|r| {
            (0..series.len())
                .map(|c| {
                    if r == c {
                        PairCell::Histogram(Histogram::equal_width(
                            &present(&series[r]),
                            PAIR_DIAGONAL_BINS,
                        ))
                    } else {
                        PairCell::Scatter(paired_points(&series[c], &series[r]))
                    }
                })
                .collect()
        })
        .collect();

    out.chart(Chart::new(
        "Pairplot of Selected Features",
        "",
        "",
        ChartKind::PairGrid {
            columns: PAIR_COLUMNS.iter().map(|c| c.to_string()).collect(),
            cells,
        },
    ))
}

fn correlation(table: &PassengerTable, out: &mut Output<'_>) -> Result<()> {
    let matrix = numeric_correlation(table)?;
    out.chart(Chart::new(
        "Correlation Heatmap",
        "",
        "",
        ChartKind::Heatmap {
            labels: matrix.labels,
            values: matrix.values,
        },
    ))
}

fn distributions(table: &PassengerTable, out: &mut Output<'_>) -> Result<()> {
    let step = out.step;
    let columns = [(AGE, "Age Distribution"), (FARE, "Fare Distribution")]
        .into_iter()
        .map(|(column, title)| Ok((column, title, table.require(step, column)?)))
        .collect::<Result<Vec<_>, EdaError>>()?;
    for (column, title, idx) in columns {
        let values = present(&table.numeric_series(idx));
        let hist = Histogram::equal_width(&values, DISTRIBUTION_BINS);
        log::debug!("{column}: {} of {} rows binned", hist.total(), table.len());
        out.chart(Chart::new(title, column, "Count", ChartKind::Histogram(hist)))?;
    }
    Ok(())
}

fn boxplots(table: &PassengerTable, out: &mut Output<'_>) -> Result<()> {
    let step = out.step;
    let pairs = [
        (PCLASS, AGE, "Age Distribution by Passenger Class"),
        (SURVIVED, FARE, "Fare Distribution by Survival"),
    ]
    .into_iter()
    .map(|(key_col, value_col, title)| {
        let key = table.require(step, key_col)?;
        let value = table.require(step, value_col)?;
        Ok((key_col, value_col, title, key, value))
    })
    .collect::<Result<Vec<_>, EdaError>>()?;
    for (key_col, value_col, title, key, value) in pairs {
        let groups = grouped_values(table, key, value)
            .into_iter()
            .filter_map(|(k, values)| {
                Some(BoxGroup {
                    label: k.to_string(),
                    summary: BoxSummary::from_values(&values)?,
                })
            })
            .collect();
        out.chart(Chart::new(title, key_col, value_col, ChartKind::BoxPlot { groups }))?;
    }
    Ok(())
}

fn colored_scatter(table: &PassengerTable, out: &mut Output<'_>) -> Result<()> {
    let survived = table.require(out.step, SURVIVED)?;
    let age = table.require(out.step, AGE)?;
    let fare = table.require(out.step, FARE)?;

    let ages = table.numeric_series(age);
    let fares = table.numeric_series(fare);
    let mut groups: BTreeMap<&CellValue, Vec<[f64; 2]>> = BTreeMap::new();
    for (i, key) in table.values(survived).enumerate() {
        if let (false, Some(a), Some(f)) = (key.is_null(), ages[i], fares[i]) {
            groups.entry(key).or_default().push([a, f]);
        }
    }
    let groups = groups
        .into_iter()
        .map(|(k, points)| ScatterGroup {
            label: k.to_string(),
            points,
        })
        .collect();

    out.chart(Chart::new(
        "Age vs Fare Colored by Survival",
        AGE,
        FARE,
        ChartKind::Scatter { groups },
    ))
}

/// `[x, y]` for rows where both series are present.
fn paired_points(x: &[Option<f64>], y: &[Option<f64>]) -> Vec<[f64; 2]> {
    x.iter()
        .zip(y)
        .filter_map(|(a, b)| Some([(*a)?, (*b)?]))
        .collect()
}

/// Non-missing values of `value_idx` per distinct non-missing key.
fn grouped_values(
    table: &PassengerTable,
    key_idx: usize,
    value_idx: usize,
) -> BTreeMap<CellValue, Vec<f64>> {
    let values = table.numeric_series(value_idx);
    let mut groups: BTreeMap<CellValue, Vec<f64>> = BTreeMap::new();
    for (key, v) in table.values(key_idx).zip(values) {
        if let (false, Some(v)) = (key.is_null(), v) {
            groups.entry(key.clone()).or_default().push(v);
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Captures everything the pipeline emits.
    #[derive(Default)]
    struct Recorder {
        charts: Vec<Chart>,
        items: Vec<ReportItem>,
    }

    impl RenderSink for Recorder {
        fn render(&mut self, chart: &Chart) -> Result<()> {
            self.charts.push(chart.clone());
            Ok(())
        }
    }

    impl ReportSink for Recorder {
        fn emit(&mut self, item: &ReportItem) -> Result<()> {
            self.items.push(item.clone());
            Ok(())
        }
    }

    impl Recorder {
        fn table_after(&self, heading: &str) -> &TextTable {
            let pos = self
                .items
                .iter()
                .position(|i| *i == ReportItem::Heading(heading.to_string()))
                .unwrap_or_else(|| panic!("no heading {heading}"));
            self.items[pos + 1..]
                .iter()
                .find_map(|i| match i {
                    ReportItem::Table(t) => Some(t),
                    _ => None,
                })
                .unwrap()
        }

        fn chart(&self, title: &str) -> &Chart {
            self.charts.iter().find(|c| c.title == title).unwrap()
        }
    }

    const HEADER: [&str; 8] = ["Name", "Survived", "Pclass", "Sex", "Age", "SibSp", "Parch", "Fare"];

    fn header() -> Vec<String> {
        HEADER.iter().map(|h| h.to_string()).collect()
    }

    fn passenger(
        name: &str,
        survived: i64,
        pclass: i64,
        sex: &str,
        age: Option<f64>,
        sibsp: i64,
        fare: f64,
    ) -> Vec<CellValue> {
        vec![
            CellValue::String(name.into()),
            CellValue::Integer(survived),
            CellValue::Integer(pclass),
            CellValue::String(sex.into()),
            age.map_or(CellValue::Null, CellValue::Float),
            CellValue::Integer(sibsp),
            CellValue::Integer(0),
            CellValue::Float(fare),
        ]
    }

    fn four_passengers() -> PassengerTable {
        PassengerTable::from_rows(
            header(),
            vec![
                passenger("Allen", 1, 1, "female", Some(29.0), 0, 100.0),
                passenger("Braund", 0, 3, "male", Some(22.0), 1, 7.0),
                passenger("Cumings", 1, 1, "female", Some(35.0), 1, 80.0),
                passenger("Dooley", 0, 3, "male", Some(28.0), 0, 8.0),
            ],
        )
    }

    fn run(table: &PassengerTable) -> (Recorder, Result<()>) {
        let mut charts = Recorder::default();
        let mut report = Recorder::default();
        let result = Pipeline::default().run(table, &mut charts, &mut report);
        report.charts = charts.charts;
        (report, result)
    }

    #[test]
    fn survival_rates_by_class_and_sex() {
        let (rec, result) = run(&four_passengers());
        result.unwrap();

        let by_class = rec.table_after("Survival Rate by Passenger Class");
        assert_eq!(by_class.rows, vec![vec!["1", "1.000000"], vec!["3", "0.000000"]]);
        let by_sex = rec.table_after("Survival Rate by Sex");
        assert_eq!(
            by_sex.rows,
            vec![vec!["female", "1.000000"], vec!["male", "0.000000"]]
        );
        let by_fare = rec.table_after("Survival Rate by Fare Bins");
        assert_eq!(by_fare.rows.len(), 4);
    }

    #[test]
    fn emits_every_chart_in_order() {
        let (rec, _) = run(&four_passengers());
        let titles: Vec<&str> = rec.charts.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Pairplot of Selected Features",
                "Correlation Heatmap",
                "Age Distribution",
                "Fare Distribution",
                "Age Distribution by Passenger Class",
                "Fare Distribution by Survival",
                "Age vs Fare Colored by Survival",
            ]
        );
    }

    #[test]
    fn heatmap_leaves_out_text_columns() {
        let (rec, _) = run(&four_passengers());
        let ChartKind::Heatmap { labels, values } = &rec.chart("Correlation Heatmap").kind else {
            panic!("not a heatmap");
        };
        assert!(!labels.iter().any(|l| l == "Name" || l == "Sex"));
        assert_eq!(labels.len(), 6);
        assert_eq!(values.len(), 6);
    }

    #[test]
    fn target_counts_sum_to_rows() {
        let (rec, _) = run(&four_passengers());
        let counts = rec.table_after("Value Counts for 'Survived'");
        let total: usize = counts.rows.iter().map(|r| r[1].parse::<usize>().unwrap()).sum();
        assert_eq!(total, 4);
    }

    #[test]
    fn missing_ages_are_left_out_of_histogram() {
        let mut rows = four_passengers_rows();
        rows.push(passenger("Moran", 0, 3, "male", None, 0, 8.4583));
        rows.push(passenger("Nasser", 1, 2, "female", None, 1, 30.0708));
        let table = PassengerTable::from_rows(header(), rows);

        let (rec, result) = run(&table);
        result.unwrap();
        let ChartKind::Histogram(age) = &rec.chart("Age Distribution").kind else {
            panic!("not a histogram");
        };
        assert_eq!(age.total(), 4);
        assert_eq!(age.counts.len(), 30);
        // no zero-filled value drags the range down
        assert_eq!(age.edges[0], 22.0);

        let ChartKind::Histogram(fare) = &rec.chart("Fare Distribution").kind else {
            panic!("not a histogram");
        };
        assert_eq!(fare.total(), 6);
    }

    fn four_passengers_rows() -> Vec<Vec<CellValue>> {
        vec![
            passenger("Allen", 1, 1, "female", Some(29.0), 0, 100.0),
            passenger("Braund", 0, 3, "male", Some(22.0), 1, 7.0),
            passenger("Cumings", 1, 1, "female", Some(35.0), 1, 80.0),
            passenger("Dooley", 0, 3, "male", Some(28.0), 0, 8.0),
        ]
    }

    #[test]
    fn missing_column_aborts_with_step_name() {
        let header = ["Survived", "Pclass", "Age", "SibSp", "Parch", "Fare"];
        let table = PassengerTable::from_rows(
            header.iter().map(|h| h.to_string()).collect(),
            vec![vec![CellValue::Integer(1); 6], vec![CellValue::Integer(0); 6]],
        );
        let (rec, result) = run(&table);
        let err = result.unwrap_err();
        assert_eq!(
            err.downcast_ref::<EdaError>(),
            Some(&EdaError::MissingColumn {
                step: Step::SurvivalRates,
                column: "Sex".into()
            })
        );
        assert!(err.to_string().contains("survival rates"));
        // earlier steps already ran, insights never did
        assert_eq!(rec.charts.len(), 7);
        assert!(!rec.items.contains(&ReportItem::Heading("Insights".into())));
    }

    #[test]
    fn failing_step_prints_nothing_of_its_own() {
        let header = ["Survived", "Pclass", "Age", "SibSp", "Parch", "Fare"];
        let table = PassengerTable::from_rows(
            header.iter().map(|h| h.to_string()).collect(),
            vec![vec![CellValue::Integer(1); 6], vec![CellValue::Integer(0); 6]],
        );
        let (rec, result) = run(&table);
        assert!(result.is_err());
        let survival_headings = rec
            .items
            .iter()
            .filter(|i| matches!(i, ReportItem::Heading(h) if h.starts_with("Survival Rate")))
            .count();
        assert_eq!(survival_headings, 0);
    }

    #[test]
    fn degenerate_fare_bins_abort_before_any_rate_table() {
        let rows = (0..4)
            .map(|i| passenger("Moran", i % 2, 3, "male", Some(30.0), 0, 8.05))
            .collect();
        let (rec, result) = run(&PassengerTable::from_rows(header(), rows));
        let err = result.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<EdaError>(),
            Some(EdaError::DegenerateBins { .. })
        ));
        assert!(!rec
            .items
            .iter()
            .any(|i| matches!(i, ReportItem::Heading(h) if h.starts_with("Survival Rate"))));
    }

    #[test]
    fn distributions_check_both_columns_before_charting() {
        let table = PassengerTable::from_rows(
            vec!["Age".into()],
            vec![vec![CellValue::Float(22.0)], vec![CellValue::Float(38.0)]],
        );
        let mut charts = Recorder::default();
        let mut report = Recorder::default();
        let mut out = Output {
            step: Step::Distributions,
            render: &mut charts,
            report: &mut report,
        };
        let err = distributions(&table, &mut out).unwrap_err();
        assert_eq!(
            err.downcast_ref::<EdaError>(),
            Some(&EdaError::MissingColumn {
                step: Step::Distributions,
                column: "Fare".into()
            })
        );
        assert!(charts.charts.is_empty());
    }

    #[test]
    fn empty_table_reports_bare_range_index() {
        let (rec, _) = run(&PassengerTable::from_rows(header(), vec![]));
        assert!(rec
            .items
            .contains(&ReportItem::Line("RangeIndex: 0 entries".into())));
        let (rec, _) = run(&four_passengers());
        assert!(rec
            .items
            .contains(&ReportItem::Line("RangeIndex: 4 entries, 0 to 3".into())));
    }

    #[test]
    fn insights_are_printed_verbatim() {
        let (rec, _) = run(&four_passengers());
        let pos = rec
            .items
            .iter()
            .position(|i| *i == ReportItem::Heading("Insights".into()))
            .unwrap();
        let lines: Vec<ReportItem> = DEFAULT_INSIGHTS
            .iter()
            .map(|l| ReportItem::Line(format!("- {l}")))
            .collect();
        assert_eq!(&rec.items[pos + 1..], lines.as_slice());
    }

    #[test]
    fn custom_insights_replace_defaults() {
        let mut charts = Recorder::default();
        let mut report = Recorder::default();
        Pipeline::with_insights(["Only line."])
            .run(&four_passengers(), &mut charts, &mut report)
            .unwrap();
        assert_eq!(report.items.last(), Some(&ReportItem::Line("- Only line.".into())));
    }

    #[test]
    fn boxplots_group_by_key_value() {
        let (rec, _) = run(&four_passengers());
        let ChartKind::BoxPlot { groups } = &rec.chart("Age Distribution by Passenger Class").kind
        else {
            panic!("not a box plot");
        };
        let labels: Vec<&str> = groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, vec!["1", "3"]);
        assert_eq!(groups[0].summary.median, 32.0);
    }

    #[test]
    fn scatter_splits_by_survival() {
        let (rec, _) = run(&four_passengers());
        let ChartKind::Scatter { groups } = &rec.chart("Age vs Fare Colored by Survival").kind else {
            panic!("not a scatter");
        };
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[1].label, "1");
        assert_eq!(groups[1].points, vec![[29.0, 100.0], [35.0, 80.0]]);
    }
}
