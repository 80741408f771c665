//! Local carbon accounting for the offline path.
//!
//! When `POST /transactions` cannot reach the backend, the queued entry
//! still needs a plausible carbon figure. The factors and thresholds here
//! are the ones the backend itself applies, so a queued transaction looks
//! the same as a server-computed one.

use crate::types::{ImpactLevel, NewTransaction};

/// Factor applied when the category has no entry in the table.
pub const DEFAULT_CARBON_FACTOR: f64 = 0.1;

/// Carbon factor (kg CO2 per unit amount) for a spending category.
pub fn carbon_factor(category: &str) -> f64 {
    match category {
        "Cotton" => 0.08,
        "Glass" => 0.15,
        "Petroleum Products" => 0.8,
        "Plastic" => 0.6,
        "Steel" => 0.5,
        "Timber" => 0.1,
        "Wheat" => 0.05,
        _ => DEFAULT_CARBON_FACTOR,
    }
}

/// Classify a carbon figure the way the backend does.
pub fn impact_for(carbon: f64) -> ImpactLevel {
    if carbon < 0.1 {
        ImpactLevel::Low
    } else if carbon < 0.3 {
        ImpactLevel::Medium
    } else {
        ImpactLevel::High
    }
}

/// Estimate carbon and impact for a transaction not yet seen by the server.
pub fn estimate(tx: &NewTransaction) -> (f64, ImpactLevel) {
    let carbon = tx.amount * carbon_factor(&tx.category);
    (carbon, impact_for(carbon))
}
