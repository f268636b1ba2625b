use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use super::stats::{quantile_sorted, sorted};
use crate::data::model::{CellValue, PassengerTable};
use crate::error::EdaError;

// ---------------------------------------------------------------------------
// Grouped survival rate
// ---------------------------------------------------------------------------

/// Outcome tally for one group key.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GroupRate {
    pub rows: usize,
    pub survivors: usize,
}

impl GroupRate {
    /// Mean of the binary outcome, always within `[0, 1]`.
    pub fn mean(&self) -> f64 {
        if self.rows == 0 {
            return f64::NAN;
        }
        self.survivors as f64 / self.rows as f64
    }
}

/// Mean outcome per group key, keys in ascending order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupedAggregate<K: Ord> {
    pub key_column: String,
    pub groups: BTreeMap<K, GroupRate>,
}

/// Group the rows by `keys` and average `outcome` within each group.
///
/// Rows with a missing key or a missing outcome are skipped. Any non-zero
/// outcome counts as a survivor.
pub fn group_rates<K: Ord + Clone>(
    key_column: &str,
    keys: impl IntoIterator<Item = Option<K>>,
    outcome: &[Option<f64>],
) -> GroupedAggregate<K> {
    let mut groups: BTreeMap<K, GroupRate> = BTreeMap::new();
    for (key, y) in keys.into_iter().zip(outcome) {
        let (Some(key), Some(y)) = (key, y) else {
            continue;
        };
        let g = groups.entry(key).or_insert(GroupRate {
            rows: 0,
            survivors: 0,
        });
        g.rows += 1;
        if *y != 0.0 {
            g.survivors += 1;
        }
    }
    GroupedAggregate {
        key_column: key_column.to_string(),
        groups,
    }
}

/// Survival rate by the distinct values of a table column.
pub fn rate_by_column(
    table: &PassengerTable,
    key_idx: usize,
    outcome_idx: usize,
) -> GroupedAggregate<CellValue> {
    let keys = table
        .values(key_idx)
        .map(|v| (!v.is_null()).then(|| v.clone()));
    group_rates(
        &table.columns()[key_idx].name,
        keys,
        &table.numeric_series(outcome_idx),
    )
}

// ---------------------------------------------------------------------------
// Quantile binning
// ---------------------------------------------------------------------------

/// Number of quantile bins used for fares.
pub const QUARTILES: usize = 4;

/// One right-closed interval of a quantile binning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QuantileBin {
    pub index: usize,
    pub lower: f64,
    pub upper: f64,
}

impl Eq for QuantileBin {}

impl PartialOrd for QuantileBin {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QuantileBin {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.index.cmp(&other.index)
    }
}

impl fmt::Display for QuantileBin {
    /// Printed like a pandas interval; the first bin's open lower edge is
    /// nudged down by 0.001 because it actually includes its minimum.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lower = if self.index == 0 {
            self.lower - 0.001
        } else {
            self.lower
        };
        write!(f, "({}, {}]", fmt_edge(lower), fmt_edge(self.upper))
    }
}

fn fmt_edge(v: f64) -> String {
    let rounded = (v * 1000.0).round() / 1000.0;
    if rounded.fract() == 0.0 {
        format!("{rounded:.1}")
    } else {
        format!("{rounded}")
    }
}

/// Quantile bin edges derived from the data, `q + 1` strictly increasing values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuantileBins {
    pub edges: Vec<f64>,
}

impl QuantileBins {
    /// Split `values` into `q` equal-population bins.
    pub fn new(column: &str, values: &[Option<f64>], q: usize) -> Result<Self, EdaError> {
        let data = sorted(&values.iter().flatten().copied().collect::<Vec<_>>());
        let edges: Vec<f64> = (0..=q)
            .map(|i| quantile_sorted(&data, i as f64 / q as f64))
            .collect();

        let unique = q > 0 && !data.is_empty() && edges.windows(2).all(|w| w[0] < w[1]);
        if !unique {
            return Err(EdaError::DegenerateBins {
                column: column.to_string(),
                edges,
            });
        }
        Ok(QuantileBins { edges })
    }

    pub fn len(&self) -> usize {
        self.edges.len() - 1
    }

    pub fn bin(&self, index: usize) -> QuantileBin {
        QuantileBin {
            index,
            lower: self.edges[index],
            upper: self.edges[index + 1],
        }
    }

    /// The bin holding `v`, or `None` when it lies outside every edge.
    pub fn assign(&self, v: f64) -> Option<QuantileBin> {
        let first = self.edges[0];
        let last = self.edges[self.len()];
        if v.is_nan() || v < first || v > last {
            return None;
        }
        let index = self.edges[1..].partition_point(|e| *e < v);
        Some(self.bin(index.min(self.len() - 1)))
    }
}

/// Survival rate per quantile bin of `value_idx`.
pub fn rate_by_quantile(
    table: &PassengerTable,
    value_idx: usize,
    outcome_idx: usize,
    q: usize,
) -> Result<GroupedAggregate<QuantileBin>, EdaError> {
    let name = &table.columns()[value_idx].name;
    let values = table.numeric_series(value_idx);
    let bins = QuantileBins::new(name, &values, q)?;
    let keys = values.iter().map(|v| v.and_then(|v| bins.assign(v)));
    Ok(group_rates(name, keys, &table.numeric_series(outcome_idx)))
}
