//! Report aggregation for the budget ledger.
//!
//! Sums scheduled hours per activity name and compares them against each
//! template's weekly quota.

use std::collections::BTreeMap;

use crate::models::block::ScheduledBlock;
use crate::models::template::ActivityTemplate;

/// One row of the budget ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct QuotaStatus {
    pub name: String,
    pub color: String,
    pub actual_hours: f32,
    pub quota_hours: Option<f32>,
    /// Fill ratio for the progress bar, capped at 1.0.
    pub progress: f32,
    pub over: bool,
}

/// Total scheduled hours per activity name.
pub fn aggregate_hours(blocks: &[ScheduledBlock]) -> BTreeMap<String, f32> {
    let mut totals = BTreeMap::new();
    for block in blocks {
        *totals.entry(block.name.clone()).or_insert(0.0) += block.duration_minutes as f32 / 60.0;
    }
    totals
}

/// Ledger rows for every palette template, in palette order.
pub fn quota_status(
    templates: &[ActivityTemplate],
    blocks: &[ScheduledBlock],
) -> Vec<QuotaStatus> {
    let totals = aggregate_hours(blocks);
    templates
        .iter()
        .map(|tpl| {
            let actual = totals.get(&tpl.name).copied().unwrap_or(0.0);
            let (progress, over) = match tpl.quota_hours {
                Some(quota) if quota > 0.0 => ((actual / quota).min(1.0), actual > quota),
                _ => (0.0, false),
            };
            QuotaStatus {
                name: tpl.name.clone(),
                color: tpl.color.clone(),
                actual_hours: actual,
                quota_hours: tpl.quota_hours,
                progress: if progress.is_finite() { progress } else { 0.0 },
                over,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(name: &str, minutes: i64) -> ScheduledBlock {
        ScheduledBlock {
            id: format!("b-{}-{}", name, minutes),
            name: name.into(),
            color: "#10B981".into(),
            duration_minutes: minutes,
            start_slot: 0,
            day_index: 0,
            date: None,
        }
    }

    #[test]
    fn test_sums_hours_by_block_name() {
        let blocks = vec![
            block("Deep Work", 120),
            block("Deep Work", 60),
            block("Reading", 30),
        ];
        let totals = aggregate_hours(&blocks);
        assert!((totals["Deep Work"] - 3.0).abs() < f32::EPSILON);
        assert!((totals["Reading"] - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_quota_status_flags_over_budget() {
        let tpl = ActivityTemplate::new("Play", "#EF4444", 60)
            .unwrap()
            .with_quota(2.0);
        let blocks = vec![block("Play", 90), block("Play", 60)];
        let rows = quota_status(&[tpl], &blocks);
        assert_eq!(rows.len(), 1);
        assert!(rows[0].over);
        assert!((rows[0].actual_hours - 2.5).abs() < f32::EPSILON);
        assert_eq!(rows[0].progress, 1.0); // capped
    }

    #[test]
    fn test_quota_status_without_quota() {
        let tpl = ActivityTemplate::new("Errands", "#64748B", 30).unwrap();
        let rows = quota_status(&[tpl], &[]);
        assert!(!rows[0].over);
        assert_eq!(rows[0].progress, 0.0);
        assert_eq!(rows[0].actual_hours, 0.0);
    }
}
