//! Summary statistics over simulated damage columns

pub mod analytic;

use crate::error::{DprError, Result};
use crate::simulation::{Column, TrialTable};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// mean, min, quartiles and max of one column
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub mean: f64,
    pub min: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub max: f64,
}

impl Summary {
    /// Row labels in display order
    pub const LABELS: [&'static str; 6] = ["mean", "min", "25%", "50%", "75%", "max"];

    /// Values in the same order as `LABELS`
    pub fn values(&self) -> [f64; 6] {
        [self.mean, self.min, self.p25, self.p50, self.p75, self.max]
    }
}

/// Describe a column of values
///
/// Percentiles interpolate linearly between the two closest ranks.
pub fn describe(values: &[i32]) -> Result<Summary> {
    if values.is_empty() {
        return Err(DprError::validation("cannot summarise an empty column"));
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    let mean = sorted.iter().map(|&v| f64::from(v)).sum::<f64>() / sorted.len() as f64;
    Ok(Summary {
        mean,
        min: percentile(&sorted, 0.0),
        p25: percentile(&sorted, 0.25),
        p50: percentile(&sorted, 0.5),
        p75: percentile(&sorted, 0.75),
        max: percentile(&sorted, 1.0),
    })
}

fn percentile(sorted: &[i32], q: f64) -> f64 {
    let rank = q * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let low = f64::from(sorted[lower]);
    let high = f64::from(sorted[upper]);
    low + (high - low) * (rank - lower as f64)
}

/// Per-column summaries of a table, round index excluded
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableSummary {
    pub columns: Vec<(Column, Summary)>,
}

impl TableSummary {
    pub fn get(&self, column: Column) -> Option<&Summary> {
        self.columns.iter().find(|(c, _)| *c == column).map(|(_, s)| s)
    }

    /// Summary of the total damage column
    pub fn damage(&self) -> Option<&Summary> {
        self.get(Column::Damage)
    }
}

/// Describe every column of a table except the round index
pub fn describe_table(table: &TrialTable) -> Result<TableSummary> {
    let columns = table
        .columns()
        .filter(|&c| c != Column::Round)
        .map(|c| Ok((c, describe(table.column(c).unwrap_or(&[]))?)))
        .collect::<Result<Vec<_>>>()?;
    Ok(TableSummary { columns })
}

/// Normalised value -> probability table of a column
pub fn distribution(values: &[i32]) -> BTreeMap<i32, f64> {
    let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
    for &v in values {
        *counts.entry(v).or_insert(0) += 1;
    }
    let total = values.len() as f64;
    counts.into_iter().map(|(v, c)| (v, c as f64 / total)).collect()
}
