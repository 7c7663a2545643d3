//! Configuration snapshot for the Shipping Engine.
//!
//! The engine never talks to a database.  The persistence
//! collaborator hands it a [`RateSnapshot`]: a read-only, in-memory
//! copy of every active configuration record, taken once before a
//! resolution call is entered.  A snapshot is immutable for the
//! duration of a call, so any number of quote computations may share
//! one behind an `Arc` without locking.
//!
//! The order of the `zones` and `charges` lists is significant: it is
//! the stable configuration order used for zone tie-breaking and for
//! charge application.

use crate::models::{
    AdditionalCharge, Country, DimensionalFactor, ServiceType, WeightRateTier, Zone,
};
use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The full rate configuration consumed by a resolution call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RateSnapshot {
    pub countries: Vec<Country>,
    pub zones: Vec<Zone>,
    pub service_types: Vec<ServiceType>,
    #[serde(default)]
    pub dimensional_factors: Vec<DimensionalFactor>,
    pub tiers: Vec<WeightRateTier>,
    #[serde(default)]
    pub charges: Vec<AdditionalCharge>,
}

impl RateSnapshot {
    /// Looks up a country by code, active or not.  Distinguishing an
    /// unknown code from a deactivated record is the caller's job.
    pub fn country(&self, code: &str) -> Option<&Country> {
        self.countries.iter().find(|c| c.code == code)
    }

    /// Looks up an active service type by identifier.
    pub fn active_service_type(&self, id: &str) -> Option<&ServiceType> {
        self.service_types.iter().find(|s| s.id == id && s.active)
    }

    /// The configured dimensional divisor for a service type, if any.
    /// Non-positive factors are ignored rather than fed into a
    /// division.
    pub fn dimensional_factor(&self, service_type_id: &str) -> Option<Decimal> {
        self.dimensional_factors
            .iter()
            .find(|f| f.service_type_id == service_type_id && f.active && f.factor > Decimal::ZERO)
            .map(|f| f.factor)
    }

    /// Active tiers for one zone/service pair, in configuration order.
    pub fn tiers_for(&self, zone_id: &str, service_type_id: &str) -> Vec<&WeightRateTier> {
        self.tiers
            .iter()
            .filter(|t| t.active && t.zone_id == zone_id && t.service_type_id == service_type_id)
            .collect()
    }

    /// Returns true if any active tier anywhere serves the given
    /// zone/service pair.
    pub fn has_tiers_for(&self, zone_id: &str, service_type_id: &str) -> bool {
        self.tiers
            .iter()
            .any(|t| t.active && t.zone_id == zone_id && t.service_type_id == service_type_id)
    }
}

/// Load a snapshot from a JSON document on disk.
///
/// The shipping configuration is relational (tiers and charges
/// reference zones and services), so the whole snapshot lives in one
/// document and is read atomically; there is no per-entity file scan.
pub fn load_snapshot_from_file(path: &Path) -> Result<RateSnapshot> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read snapshot file {:?}", path))?;
    let snapshot: RateSnapshot = serde_json::from_str(&data)
        .with_context(|| format!("failed to parse snapshot file {:?}", path))?;
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const SNAPSHOT_JSON: &str = r#"{
        "countries": [
            {"code": "AE", "name": "United Arab Emirates", "roles": ["DEPARTURE"]},
            {"code": "IN", "name": "India", "roles": ["DESTINATION"], "active": false}
        ],
        "zones": [
            {"id": "GULF-SA", "name": "Gulf to South Asia",
             "departure_countries": ["AE"], "destination_countries": ["IN"]}
        ],
        "service_types": [
            {"id": "EXPRESS", "name": "Express", "transit_time": "1-2 business days"}
        ],
        "dimensional_factors": [
            {"service_type_id": "EXPRESS", "factor": 5000}
        ],
        "tiers": [
            {"zone_id": "GULF-SA", "service_type_id": "EXPRESS",
             "min_weight": 0, "max_weight": 5, "base_rate": 20, "per_kg_rate": 4}
        ],
        "charges": [
            {"id": "FUEL", "label": "Fuel Surcharge", "kind": "FIXED",
             "value": 5, "scope": "all"}
        ]
    }"#;

    #[test]
    fn parses_a_full_snapshot_document() {
        let snapshot: RateSnapshot = serde_json::from_str(SNAPSHOT_JSON).unwrap();
        assert_eq!(snapshot.countries.len(), 2);
        assert!(snapshot.country("AE").unwrap().active);
        assert!(!snapshot.country("IN").unwrap().active);
        assert!(snapshot.country("XX").is_none());
        assert!(snapshot.active_service_type("EXPRESS").is_some());
        assert_eq!(snapshot.dimensional_factor("EXPRESS"), Some(dec!(5000)));
        assert_eq!(snapshot.tiers_for("GULF-SA", "EXPRESS").len(), 1);
        assert!(snapshot.has_tiers_for("GULF-SA", "EXPRESS"));
        assert!(!snapshot.has_tiers_for("GULF-SA", "ECONOMY"));
    }

    #[test]
    fn non_positive_factor_is_treated_as_unconfigured() {
        let mut snapshot: RateSnapshot = serde_json::from_str(SNAPSHOT_JSON).unwrap();
        snapshot.dimensional_factors[0].factor = dec!(0);
        assert_eq!(snapshot.dimensional_factor("EXPRESS"), None);
    }

    #[test]
    fn inactive_tiers_are_filtered_out() {
        let mut snapshot: RateSnapshot = serde_json::from_str(SNAPSHOT_JSON).unwrap();
        snapshot.tiers[0].active = false;
        assert!(snapshot.tiers_for("GULF-SA", "EXPRESS").is_empty());
        assert!(!snapshot.has_tiers_for("GULF-SA", "EXPRESS"));
    }
}
