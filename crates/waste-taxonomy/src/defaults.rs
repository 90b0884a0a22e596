//! Built-in waste-type table

use crate::{
    EnvironmentalImpact, ImpactFactors, PrepComplexity, SafetyLevel, WasteCategory,
    WasteTypeProfile,
};

use EnvironmentalImpact as Env;
use PrepComplexity as Prep;
use SafetyLevel as Safety;
use WasteCategory as Cat;

#[allow(clippy::too_many_arguments)]
fn profile(
    key: &str,
    category: WasteCategory,
    methods: &[&str],
    safety_level: SafetyLevel,
    prep_complexity: PrepComplexity,
    environmental_impact: EnvironmentalImpact,
    co2: f64,
    energy: u64,
    water: f64,
    base_points: f64,
) -> WasteTypeProfile {
    WasteTypeProfile {
        key: key.to_string(),
        category,
        priority_methods: methods.iter().map(|m| m.to_string()).collect(),
        safety_level,
        prep_complexity,
        environmental_impact,
        impact_factors: ImpactFactors {
            co2_per_unit: co2,
            energy_per_unit: energy,
            water_per_unit: water,
            base_points_per_unit: base_points,
        },
    }
}

#[rustfmt::skip]
pub(crate) fn default_profiles() -> Vec<WasteTypeProfile> {
    vec![
        // Recyclables
        profile("plastic", Cat::Recyclable, &["prevention", "reuse", "recycling"],
            Safety::Low, Prep::Simple, Env::High, 2.1, 2200, 0.6, 10.0),
        profile("metal", Cat::Recyclable, &["recycling", "reuse", "scrap_dealer"],
            Safety::Low, Prep::Simple, Env::VeryHigh, 4.2, 6500, 1.4, 15.0),
        profile("glass", Cat::Recyclable, &["recycling", "reuse", "craft_projects"],
            Safety::Medium, Prep::Simple, Env::High, 0.6, 1300, 0.3, 12.0),
        profile("paper", Cat::Recyclable, &["recycling", "composting", "reuse"],
            Safety::Low, Prep::VerySimple, Env::Medium, 3.3, 4000, 7.2, 8.0),
        // Electronics
        profile("electronic", Cat::SpecialHandling,
            &["certified_recycling", "donation", "manufacturer_takeback"],
            Safety::Medium, Prep::Medium, Env::VeryHigh, 12.5, 18000, 6.8, 25.0),
        profile("phone", Cat::SpecialHandling, &["trade_in", "donation", "certified_recycling"],
            Safety::Medium, Prep::Medium, Env::VeryHigh, 15.2, 22000, 8.0, 30.0),
        profile("battery", Cat::Hazardous, &["specialized_recycling", "retailer_takeback"],
            Safety::High, Prep::Simple, Env::VeryHigh, 8.5, 12000, 4.2, 20.0),
        // Organics
        profile("organic", Cat::Compostable, &["composting", "municipal_organics", "biogas"],
            Safety::Low, Prep::Simple, Env::High, 1.8, 800, 0.4, 6.0),
        profile("food", Cat::Compostable, &["prevention", "donation", "composting"],
            Safety::Low, Prep::Simple, Env::VeryHigh, 2.2, 1000, 0.5, 8.0),
        // Textiles
        profile("textile", Cat::Reusable, &["donation", "textile_recycling", "upcycling"],
            Safety::Low, Prep::Simple, Env::High, 8.5, 12000, 20.0, 18.0),
        profile("clothing", Cat::Reusable, &["donation", "consignment", "textile_recycling"],
            Safety::Low, Prep::Simple, Env::VeryHigh, 9.2, 13500, 22.0, 20.0),
        // Hazardous materials
        profile("hazardous", Cat::Hazardous, &["hazmat_facility", "special_collection"],
            Safety::VeryHigh, Prep::Complex, Env::Critical, 18.0, 25000, 12.5, 30.0),
        profile("paint", Cat::Hazardous, &["hazmat_facility", "dried_disposal", "donation"],
            Safety::High, Prep::Medium, Env::High, 12.0, 15000, 8.0, 25.0),
    ]
}
