//! Impact history aggregation

use crate::{round_to, ImpactResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One past disposal as stored by the history collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub waste_type: String,
    pub item_count: u64,
    pub disposal_method: String,
    pub date: NaiveDate,
    pub co2_saved: f64,
    #[serde(default)]
    pub energy_saved: u64,
    #[serde(default)]
    pub water_saved: f64,
    pub points_earned: u64,
}

impl HistoryEntry {
    pub fn from_impact(user_id: Option<String>, impact: &ImpactResult, date: NaiveDate) -> Self {
        Self {
            user_id,
            waste_type: impact.waste_type.clone(),
            item_count: impact.item_count,
            disposal_method: impact.disposal_method.clone(),
            date,
            co2_saved: impact.co2_saved,
            energy_saved: impact.energy_saved,
            water_saved: impact.water_saved,
            points_earned: impact.points_earned,
        }
    }
}

/// Totals over a set of history entries
///
/// Integer totals saturate at `u64::MAX`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImpactSummary {
    pub total_items: u64,
    /// 2 decimals
    pub total_co2_saved: f64,
    pub total_energy_saved: u64,
    /// 2 decimals
    pub total_water_saved: f64,
    pub total_points: u64,
    pub entries_count: usize,
}

impl ImpactSummary {
    pub fn from_entries(entries: &[HistoryEntry]) -> Self {
        let mut summary = entries.iter().fold(Self::default(), |mut acc, e| {
            acc.total_items = acc.total_items.saturating_add(e.item_count);
            acc.total_co2_saved += e.co2_saved;
            acc.total_energy_saved = acc.total_energy_saved.saturating_add(e.energy_saved);
            acc.total_water_saved += e.water_saved;
            acc.total_points = acc.total_points.saturating_add(e.points_earned);
            acc
        });

        summary.total_co2_saved = round_to(summary.total_co2_saved, 2);
        summary.total_water_saved = round_to(summary.total_water_saved, 2);
        summary.entries_count = entries.len();
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MatchingFacade;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 9, d).unwrap()
    }

    #[test]
    fn test_summary_of_recorded_history() {
        let json = r#"[
            {"userId": "u1", "wasteType": "plastic", "itemCount": 2, "disposalMethod": "recycling", "date": "2024-09-08", "co2Saved": 2.1, "pointsEarned": 15},
            {"userId": "u1", "wasteType": "electronic", "itemCount": 1, "disposalMethod": "certified_recycling", "date": "2024-09-07", "co2Saved": 12.5, "pointsEarned": 25},
            {"userId": "u1", "wasteType": "organic", "itemCount": 3, "disposalMethod": "composting", "date": "2024-09-06", "co2Saved": 1.8, "pointsEarned": 18},
            {"userId": "u1", "wasteType": "clothing", "itemCount": 2, "disposalMethod": "donation", "date": "2024-09-05", "co2Saved": 9.2, "pointsEarned": 40}
        ]"#;
        let entries: Vec<HistoryEntry> = serde_json::from_str(json).unwrap();
        let summary = ImpactSummary::from_entries(&entries);

        assert_eq!(summary.total_items, 8);
        assert_eq!(summary.total_co2_saved, 25.6);
        assert_eq!(summary.total_points, 98);
        assert_eq!(summary.entries_count, 4);
        assert_eq!(summary.total_energy_saved, 0);
    }

    #[test]
    fn test_summary_from_scored_disposals() {
        let facade = MatchingFacade::with_defaults();
        let entries: Vec<HistoryEntry> = [("plastic", 2), ("metal", 1)]
            .iter()
            .enumerate()
            .map(|(i, (waste, n))| {
                let scored = facade.score_disposal(waste, *n, "recycling").unwrap();
                HistoryEntry::from_impact(None, &scored.impact, date(1 + i as u32))
            })
            .collect();

        let summary = ImpactSummary::from_entries(&entries);
        assert_eq!(summary.total_items, 3);
        assert_eq!(summary.total_co2_saved, 8.4);
        assert_eq!(summary.total_energy_saved, 4400 + 6500);
        assert_eq!(summary.total_water_saved, 2.6);
        assert_eq!(summary.total_points, 35);
    }

    #[test]
    fn test_summary_saturates_integer_totals() {
        let json = r#"[
            {"wasteType": "plastic", "itemCount": 18446744073709551615, "disposalMethod": "recycling",
             "date": "2024-09-08", "co2Saved": 1.0, "energySaved": 18446744073709551615,
             "pointsEarned": 18446744073709551615},
            {"wasteType": "plastic", "itemCount": 1, "disposalMethod": "recycling",
             "date": "2024-09-09", "co2Saved": 1.0, "energySaved": 1, "pointsEarned": 1}
        ]"#;
        let entries: Vec<HistoryEntry> = serde_json::from_str(json).unwrap();
        let summary = ImpactSummary::from_entries(&entries);

        assert_eq!(summary.total_items, u64::MAX);
        assert_eq!(summary.total_energy_saved, u64::MAX);
        assert_eq!(summary.total_points, u64::MAX);
        assert_eq!(summary.total_co2_saved, 2.0);
        assert_eq!(summary.entries_count, 2);
    }

    #[test]
    fn test_empty_history() {
        assert_eq!(ImpactSummary::from_entries(&[]), ImpactSummary::default());
    }
}
