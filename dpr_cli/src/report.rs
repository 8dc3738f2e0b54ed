//! Plain-text tables for simulation results

use std::fmt::Write;

use dpr_core::simulation::{CharacterReport, Column, SweepRow};
use dpr_core::summary::analytic::CritChance;
use dpr_core::summary::Summary;

const LABEL_WIDTH: usize = 32;

fn header(out: &mut String, first: &str) {
    let _ = write!(out, "{:<width$}", first, width = LABEL_WIDTH);
    for label in Summary::LABELS {
        let _ = write!(out, "{:>9}", label);
    }
    out.push('\n');
}

fn summary_row(out: &mut String, label: &str, summary: &Summary) {
    let _ = write!(out, "{:<width$}", label, width = LABEL_WIDTH);
    for value in summary.values() {
        let _ = write!(out, "{:>9.2}", value);
    }
    out.push('\n');
}

/// Damage per attack and per round for one character
pub fn character_table(report: &CharacterReport) -> dpr_core::Result<String> {
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", report.name);
    header(&mut out, "Damage");
    for attack in &report.per_attack_summary {
        if let Some(summary) = attack.summary.damage() {
            summary_row(&mut out, &attack.name, summary);
        }
    }
    let per_round = report.per_round_summary()?;
    if let Some(summary) = per_round.damage() {
        summary_row(&mut out, "Per round", summary);
    }
    if let (Some(hits), Some(crits)) = (per_round.get(Column::Hit), per_round.get(Column::HitCrit)) {
        let _ = writeln!(out, "Hits per round {:.3}, crits per round {:.3}", hits.mean, crits.mean);
    }
    out.push('\n');
    Ok(out)
}

/// One line per character (or character and attack) and armor class
pub fn sweep_table(rows: &[SweepRow]) -> String {
    let mut out = String::new();
    let _ = write!(out, "{:>4} ", "AC");
    header(&mut out, "Damage");
    for row in rows {
        let _ = write!(out, "{:>4} ", row.armor_class);
        summary_row(&mut out, &row.label(), &row.damage);
    }
    out
}

pub fn crit_chart_table(chart: &[CritChance]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:>8}{:>10}{:>16}", "crit_on", "chance", "with advantage");
    for row in chart {
        let _ = writeln!(out, "{:>8}{:>10.4}{:>16.4}", row.crit_on, row.chance, row.with_advantage);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use dpr_core::prelude::*;

    fn fighter() -> Character {
        Character::new(
            "Fighter",
            5,
            AbilityScores {
                strength: 16,
                ..Default::default()
            },
            vec![Attack::new("Longsword", AttackType::WeaponMelee, "1d8")],
        )
    }

    #[test]
    fn test_character_table() {
        let report = Simulator::seeded(1)
            .simulate_character_rounds(&[fighter()], &Enemy::default(), 200, false)
            .unwrap()
            .remove(0);
        let text = character_table(&report).unwrap();
        assert!(text.starts_with("== Fighter =="));
        assert!(text.contains("Longsword"));
        assert!(text.contains("Per round"));
        assert!(text.contains("75%"));
    }

    #[test]
    fn test_sweep_table() {
        let rows = Simulator::seeded(1)
            .simulate_across_armor_classes(&[fighter()], &Enemy::default(), &[12, 16], 100, SweepGrouping::ByAttack)
            .unwrap();
        let text = sweep_table(&rows);
        assert_eq!(text.lines().count(), 3);
        assert!(text.contains("Fighter-Longsword"));
    }

    #[test]
    fn test_crit_chart_table() {
        let text = crit_chart_table(&dpr_core::summary::analytic::crit_chart());
        assert_eq!(text.lines().count(), 9);
        assert!(text.contains("0.0975"));
    }
}
