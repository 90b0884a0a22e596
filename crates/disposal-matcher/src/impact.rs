//! Environmental impact scoring
//!
//! Impact is linear in item count and depends only on the waste type's
//! per-unit factors. The disposal method is validated and echoed back but
//! does not weight the result.

use crate::{round_to, ValidationError, WasteTaxonomy};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Impact of disposing of `item_count` items of one waste type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactResult {
    /// Resolved taxonomy key (`general` for unknown types)
    pub waste_type: String,
    pub item_count: u64,
    pub disposal_method: String,
    /// kg CO2, 2 decimals
    pub co2_saved: f64,
    pub energy_saved: u64,
    /// 2 decimals
    pub water_saved: f64,
    pub points_earned: u64,
}

/// Pure impact calculator over a taxonomy
#[derive(Debug, Clone, Copy)]
pub struct ImpactCalculator<'a> {
    taxonomy: &'a WasteTaxonomy,
}

impl<'a> ImpactCalculator<'a> {
    pub fn new(taxonomy: &'a WasteTaxonomy) -> Self {
        Self { taxonomy }
    }

    /// Compute impact metrics for a disposal
    pub fn compute_impact(
        &self,
        waste_type_key: &str,
        item_count: i64,
        disposal_method: &str,
    ) -> Result<ImpactResult, ValidationError> {
        if item_count <= 0 {
            return Err(ValidationError::InvalidItemCount(item_count));
        }
        let disposal_method = disposal_method.trim();
        if disposal_method.is_empty() {
            return Err(ValidationError::EmptyDisposalMethod);
        }

        let profile = self.taxonomy.classify(waste_type_key);
        let factors = &profile.impact_factors;
        let count = item_count as u64;
        let n = count as f64;

        let result = ImpactResult {
            waste_type: profile.key.clone(),
            item_count: count,
            disposal_method: disposal_method.to_string(),
            co2_saved: round_to(factors.co2_per_unit * n, 2),
            energy_saved: factors.energy_per_unit.saturating_mul(count),
            water_saved: round_to(factors.water_per_unit * n, 2),
            // Factors are non-negative, so round() is half-up here
            points_earned: (factors.base_points_per_unit * n).round() as u64,
        };

        debug!(
            "Impact for {} x{} via {}: co2={:.2} energy={} water={:.2} points={}",
            result.waste_type,
            count,
            result.disposal_method,
            result.co2_saved,
            result.energy_saved,
            result.water_saved,
            result.points_earned
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use waste_taxonomy::{ImpactFactors, WasteTypeProfile};

    #[test]
    fn test_plastic_linearity() {
        let taxonomy = WasteTaxonomy::with_defaults();
        let calc = ImpactCalculator::new(&taxonomy);

        let one = calc.compute_impact("plastic", 1, "recycling").unwrap();
        let two = calc.compute_impact("plastic", 2, "recycling").unwrap();

        assert_eq!(one.points_earned, 10);
        assert_eq!(two.points_earned, 20);
        assert_eq!(two.points_earned, 2 * one.points_earned);
        assert_eq!(two.co2_saved, 4.2);
        assert_eq!(two.energy_saved, 4400);
        assert_eq!(two.water_saved, 1.2);
    }

    #[test]
    fn test_rejects_non_positive_count() {
        let taxonomy = WasteTaxonomy::with_defaults();
        let calc = ImpactCalculator::new(&taxonomy);

        assert_eq!(
            calc.compute_impact("plastic", 0, "recycling"),
            Err(ValidationError::InvalidItemCount(0))
        );
        assert_eq!(
            calc.compute_impact("plastic", -4, "recycling"),
            Err(ValidationError::InvalidItemCount(-4))
        );
    }

    #[test]
    fn test_rejects_empty_method() {
        let taxonomy = WasteTaxonomy::with_defaults();
        let calc = ImpactCalculator::new(&taxonomy);
        assert_eq!(
            calc.compute_impact("plastic", 1, "  "),
            Err(ValidationError::EmptyDisposalMethod)
        );
    }

    #[test]
    fn test_method_does_not_change_score() {
        let taxonomy = WasteTaxonomy::with_defaults();
        let calc = ImpactCalculator::new(&taxonomy);

        let recycled = calc.compute_impact("metal", 3, "recycling").unwrap();
        let dealt = calc.compute_impact("metal", 3, "scrap_dealer").unwrap();

        assert_eq!(recycled.disposal_method, "recycling");
        assert_eq!(dealt.disposal_method, "scrap_dealer");
        assert_eq!(recycled.co2_saved, dealt.co2_saved);
        assert_eq!(recycled.points_earned, dealt.points_earned);
    }

    #[test]
    fn test_unknown_type_scores_zero() {
        let taxonomy = WasteTaxonomy::with_defaults();
        let calc = ImpactCalculator::new(&taxonomy);

        let result = calc.compute_impact("unobtainium", 5, "landfill").unwrap();
        assert_eq!(result.waste_type, "general");
        assert_eq!(result.co2_saved, 0.0);
        assert_eq!(result.energy_saved, 0);
        assert_eq!(result.points_earned, 0);
    }

    #[test]
    fn test_rounding() {
        let mut profile = WasteTypeProfile::general();
        profile.key = "widget".to_string();
        profile.category = waste_taxonomy::WasteCategory::Recyclable;
        profile.impact_factors = ImpactFactors {
            co2_per_unit: 0.333,
            energy_per_unit: 7,
            water_per_unit: 0.125,
            base_points_per_unit: 2.5,
        };
        let taxonomy = WasteTaxonomy::from_profiles(vec![profile]).unwrap();
        let calc = ImpactCalculator::new(&taxonomy);

        let result = calc.compute_impact("widget", 3, "recycling").unwrap();
        assert_eq!(result.co2_saved, 1.0);
        assert_eq!(result.energy_saved, 21);
        // 0.375 rounds half-up at 2 decimals
        assert_eq!(result.water_saved, 0.38);
        // 7.5 rounds half-up
        assert_eq!(result.points_earned, 8);
    }

    #[test]
    fn test_deterministic() {
        let taxonomy = WasteTaxonomy::with_defaults();
        let calc = ImpactCalculator::new(&taxonomy);
        assert_eq!(
            calc.compute_impact("Phone", 2, "trade_in"),
            calc.compute_impact("phone ", 2, "trade_in")
        );
    }

    #[test]
    fn test_json_field_names() {
        let taxonomy = WasteTaxonomy::with_defaults();
        let result = ImpactCalculator::new(&taxonomy)
            .compute_impact("glass", 1, "recycling")
            .unwrap();
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["co2Saved"], 0.6);
        assert_eq!(json["pointsEarned"], 12);
        assert_eq!(json["disposalMethod"], "recycling");
    }
}
