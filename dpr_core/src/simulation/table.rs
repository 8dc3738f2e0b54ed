//! TrialTable - Column-oriented per-trial results

use super::attack::AttackRolls;
use super::damage::DamageRolls;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A per-trial result column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Column {
    Round,
    Damage,
    DamageFromHit,
    DamageFromCrit,
    DamageMissFail,
    AttackRoll,
    AttackDie,
    Hit,
    HitNonCrit,
    HitCrit,
}

impl Column {
    /// Every column in table order
    pub const ALL: [Column; 10] = [
        Column::Round,
        Column::Damage,
        Column::DamageFromHit,
        Column::DamageFromCrit,
        Column::DamageMissFail,
        Column::AttackRoll,
        Column::AttackDie,
        Column::Hit,
        Column::HitNonCrit,
        Column::HitCrit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Column::Round => "Round",
            Column::Damage => "Damage",
            Column::DamageFromHit => "Damage (From Hit)",
            Column::DamageFromCrit => "Damage (From Crit)",
            Column::DamageMissFail => "Damage (Miss/Fail)",
            Column::AttackRoll => "Attack Roll",
            Column::AttackDie => "Attack Roll (Die)",
            Column::Hit => "Hit",
            Column::HitNonCrit => "Hit (Non-Crit)",
            Column::HitCrit => "Hit (Crit)",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Named integer columns of equal length, one row per trial
///
/// Flag columns hold 0 or 1 per attack; once tables are summed per round
/// they hold counts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrialTable {
    columns: Vec<(Column, Vec<i32>)>,
}

impl TrialTable {
    /// Build the full ten-column table for one simulated attack
    pub fn from_rolls(attack: &AttackRolls, damage: &DamageRolls) -> Self {
        let n = attack.len();
        let flag = |mask: &[bool]| mask.iter().map(|&m| i32::from(m)).collect::<Vec<_>>();
        let non_crit: Vec<bool> = attack.hit.iter().zip(&attack.crit).map(|(h, c)| h != c).collect();
        let rounds = (1..=n).map(|r| i32::try_from(r).unwrap_or(i32::MAX)).collect();

        TrialTable {
            columns: vec![
                (Column::Round, rounds),
                (Column::Damage, damage.total.clone()),
                (Column::DamageFromHit, damage.hit.clone()),
                (Column::DamageFromCrit, damage.crit.clone()),
                (Column::DamageMissFail, damage.miss.clone()),
                (Column::AttackRoll, attack.totals.clone()),
                (Column::AttackDie, attack.dice.clone()),
                (Column::Hit, flag(&attack.hit)),
                (Column::HitNonCrit, flag(&non_crit)),
                (Column::HitCrit, flag(&attack.crit)),
            ],
        }
    }

    /// `rows` rows of zeros in the given columns
    pub fn zeros(rows: usize, columns: &[Column]) -> Self {
        TrialTable {
            columns: columns.iter().map(|&c| (c, vec![0; rows])).collect(),
        }
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.columns.first().map_or(0, |(_, values)| values.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Columns present, in table order
    pub fn columns(&self) -> impl Iterator<Item = Column> + '_ {
        self.columns.iter().map(|(c, _)| *c)
    }

    pub fn column(&self, column: Column) -> Option<&[i32]> {
        self.columns
            .iter()
            .find(|(c, _)| *c == column)
            .map(|(_, values)| values.as_slice())
    }

    /// The total damage column
    pub fn damage(&self) -> &[i32] {
        self.column(Column::Damage).unwrap_or(&[])
    }

    /// Mean of a column, `None` when absent or empty
    pub fn mean(&self, column: Column) -> Option<f64> {
        let values = self.column(column)?;
        if values.is_empty() {
            return None;
        }
        Some(values.iter().map(|&v| f64::from(v)).sum::<f64>() / values.len() as f64)
    }

    /// Append another table's rows below this one
    ///
    /// Columns the other table lacks are padded with zeros.
    pub fn append(&mut self, other: &TrialTable) {
        let (own_rows, other_rows) = (self.len(), other.len());
        if self.columns.is_empty() {
            self.columns = other.columns.clone();
            return;
        }
        for (column, values) in &mut self.columns {
            match other.column(*column) {
                Some(more) => values.extend_from_slice(more),
                None => values.resize(own_rows + other_rows, 0),
            }
        }
    }

    /// Add another table row by row
    ///
    /// Missing rows and columns on either side count as zero.
    pub fn add_rows(&mut self, other: &TrialTable) {
        let rows = self.len().max(other.len());
        for (column, more) in &other.columns {
            if self.column(*column).is_none() {
                let own_rows = self.len();
                self.columns.push((*column, vec![0; own_rows]));
            }
            if let Some((_, values)) = self.columns.iter_mut().find(|(c, _)| c == column) {
                if values.len() < more.len() {
                    values.resize(more.len(), 0);
                }
                for (v, m) in values.iter_mut().zip(more) {
                    *v += m;
                }
            }
        }
        for (_, values) in &mut self.columns {
            values.resize(rows, 0);
        }
    }

    /// Keep only the listed columns
    pub fn retain(&mut self, keep: &[Column]) {
        self.columns.retain(|(c, _)| keep.contains(c));
    }

    pub fn drop_column(&mut self, column: Column) {
        self.columns.retain(|(c, _)| *c != column);
    }

    /// Replace the round column with 1..=len, placing it first
    pub fn set_round_index(&mut self) {
        let rows = self.len();
        self.drop_column(Column::Round);
        let rounds = (1..=rows).map(|r| i32::try_from(r).unwrap_or(i32::MAX)).collect();
        self.columns.insert(0, (Column::Round, rounds));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TrialTable {
        let attack = AttackRolls {
            totals: vec![25, 10, 29],
            dice: vec![16, 1, 20],
            hit: vec![true, false, true],
            crit: vec![false, false, true],
        };
        let damage = DamageRolls {
            total: vec![12, 0, 20],
            hit: vec![12, 0, 11],
            crit: vec![0, 0, 9],
            miss: vec![0, 0, 0],
        };
        TrialTable::from_rolls(&attack, &damage)
    }

    #[test]
    fn test_from_rolls_columns() {
        let table = sample();
        assert_eq!(table.len(), 3);
        assert_eq!(table.columns().collect::<Vec<_>>(), Column::ALL.to_vec());
        assert_eq!(table.column(Column::Round), Some(&[1, 2, 3][..]));
        assert_eq!(table.column(Column::Hit), Some(&[1, 0, 1][..]));
        assert_eq!(table.column(Column::HitNonCrit), Some(&[1, 0, 0][..]));
        assert_eq!(table.column(Column::HitCrit), Some(&[0, 0, 1][..]));
        assert_eq!(table.damage(), &[12, 0, 20]);
    }

    #[test]
    fn test_append_concatenates() {
        let mut table = sample();
        table.append(&sample());
        assert_eq!(table.len(), 6);
        assert_eq!(table.damage(), &[12, 0, 20, 12, 0, 20]);
    }

    #[test]
    fn test_add_rows_sums_per_round() {
        let mut total = TrialTable::zeros(3, &Column::ALL);
        total.add_rows(&sample());
        total.add_rows(&sample());
        total.set_round_index();
        assert_eq!(total.damage(), &[24, 0, 40]);
        assert_eq!(total.column(Column::Hit), Some(&[2, 0, 2][..]));
        assert_eq!(total.column(Column::Round), Some(&[1, 2, 3][..]));
    }

    #[test]
    fn test_retain_damage_only() {
        let mut table = sample();
        table.retain(&[Column::Damage]);
        assert_eq!(table.columns().count(), 1);
        assert_eq!(table.len(), 3);
        assert!(table.column(Column::Hit).is_none());
    }

    #[test]
    fn test_mean() {
        let table = sample();
        assert_eq!(table.mean(Column::Hit), Some(2.0 / 3.0));
        assert_eq!(TrialTable::default().mean(Column::Damage), None);
    }

    #[test]
    fn test_labels() {
        assert_eq!(Column::DamageMissFail.to_string(), "Damage (Miss/Fail)");
        assert_eq!(Column::AttackDie.label(), "Attack Roll (Die)");
    }
}
