//! Data models for the Shipping Engine.
//!
//! The `models` module defines a set of serialisable structs and
//! enums representing countries, shipping zones, service types, rate
//! tiers and additional charges, together with the transient request
//! and quote types.  These data types derive `Serialize` and
//! `Deserialize` so that a configuration snapshot can be loaded from
//! disk or transmitted over a network.  They form the basis of the
//! engine's input and output structures.
//!
//! Monetary amounts and weights are represented as
//! [`rust_decimal::Decimal`] throughout; a quote must reproduce to the
//! cent for identical inputs, which rules out binary floating point.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The role a country plays in a shipping corridor.  A country record
/// may hold both roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CountryRole {
    /// Shipments may depart from this country.
    Departure,
    /// Shipments may be delivered to this country.
    Destination,
}

/// A country known to the rate configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Country {
    /// ISO-style short code, unique within the snapshot.  Codes are
    /// compared verbatim; the configuration collaborator is expected
    /// to store them uppercased.
    pub code: String,
    /// Human-readable display name.
    pub name: String,
    /// The set of roles this country may play.  Validation fails with
    /// a role mismatch when a requested origin lacks
    /// [`CountryRole::Departure`] or a destination lacks
    /// [`CountryRole::Destination`].
    pub roles: Vec<CountryRole>,
    /// Inactive records stay in the snapshot so that a stale request
    /// can be told apart from an unknown one.
    #[serde(default = "default_active")]
    pub active: bool,
}

impl Country {
    /// Returns true if this country may play the given role.
    pub fn has_role(&self, role: CountryRole) -> bool {
        self.roles.contains(&role)
    }
}

/// A named grouping of departure and destination countries sharing a
/// rate structure.  Several zones may cover the same corridor (for
/// example a broad corridor and a narrower express-specific one); the
/// position of a zone in the snapshot's zone list is its stable
/// configuration order, used for tie-breaking downstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Zone {
    /// Zone identifier, unique within the snapshot.
    pub id: String,
    /// Human-readable label.
    pub name: String,
    /// Codes of countries shipments may depart from under this zone.
    /// Non-empty for active zones.
    pub departure_countries: Vec<String>,
    /// Codes of countries shipments may be delivered to under this
    /// zone.  Non-empty for active zones.
    pub destination_countries: Vec<String>,
    #[serde(default = "default_active")]
    pub active: bool,
}

impl Zone {
    /// Returns true if this zone covers the given corridor.
    pub fn covers(&self, origin: &str, destination: &str) -> bool {
        self.departure_countries.iter().any(|c| c == origin)
            && self.destination_countries.iter().any(|c| c == destination)
    }
}

/// A service level offered over a zone, e.g. EXPRESS or ECONOMY.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceType {
    /// Service identifier, unique within the snapshot.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Nominal transit-time bounds, e.g. `"2-3 business days"`.  This
    /// is informational only and never enters pricing math.
    #[serde(default)]
    pub transit_time: String,
    #[serde(default = "default_active")]
    pub active: bool,
}

/// Divisor for volumetric weight, configured per service type.  A
/// factor of 5000 means `length * width * height / 5000` kilograms.
/// Services without an active factor bill on actual weight alone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DimensionalFactor {
    pub service_type_id: String,
    pub factor: Decimal,
    #[serde(default = "default_active")]
    pub active: bool,
}

/// A weight-range-scoped rate definition for one zone/service pair.
///
/// The weight range is a closed interval on both ends: a billable
/// weight exactly equal to `max_weight` belongs to this tier, not the
/// next one up.  Within one zone/service pair the configured tiers
/// must not overlap for any reachable weight; the resolver reports
/// such overlaps as a configuration defect rather than picking one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightRateTier {
    pub zone_id: String,
    pub service_type_id: String,
    /// Inclusive lower bound in kilograms.
    pub min_weight: Decimal,
    /// Inclusive upper bound in kilograms.
    pub max_weight: Decimal,
    /// Flat amount for any shipment falling in this tier.
    pub base_rate: Decimal,
    /// Amount per kilogram, multiplied by the full billable weight.
    pub per_kg_rate: Decimal,
    #[serde(default = "default_active")]
    pub active: bool,
}

impl WeightRateTier {
    /// Returns true if the closed interval `[min_weight, max_weight]`
    /// contains the given weight.
    pub fn covers(&self, weight: Decimal) -> bool {
        self.min_weight <= weight && weight <= self.max_weight
    }

    /// Returns true if this tier and `other` price differently.  Two
    /// zones resolving tiers with identical pricing are not treated
    /// as conflicting configuration.
    pub fn conflicts_with(&self, other: &WeightRateTier) -> bool {
        self.base_rate != other.base_rate || self.per_kg_rate != other.per_kg_rate
    }
}

/// How an additional charge contributes to the total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChargeKind {
    /// A flat monetary add-on; `value` is the amount itself.
    Fixed,
    /// A fractional add-on; `value` is a fraction (0.01 for 1%)
    /// applied to the pre-charge subtotal, i.e. base rate plus
    /// weight cost.
    Percentage,
}

/// Which zone/service combinations an additional charge applies to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChargeScope {
    /// The charge applies to every zone/service combination.
    All,
    /// The charge applies only to the listed combinations.
    Pairs(Vec<ScopePair>),
}

/// One zone/service combination within a charge scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopePair {
    pub zone_id: String,
    pub service_type_id: String,
}

impl ChargeScope {
    /// Returns true if the scope includes the given combination.
    pub fn includes(&self, zone_id: &str, service_type_id: &str) -> bool {
        match self {
            ChargeScope::All => true,
            ChargeScope::Pairs(pairs) => pairs
                .iter()
                .any(|p| p.zone_id == zone_id && p.service_type_id == service_type_id),
        }
    }
}

/// A supplementary charge layered on top of the resolved rate, e.g. a
/// fuel surcharge or insurance.  Charges apply in the order they
/// appear in the snapshot's charge list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdditionalCharge {
    /// Charge identifier, unique within the snapshot.
    pub id: String,
    /// Label reproduced verbatim on the quote's itemised charge list.
    pub label: String,
    pub kind: ChargeKind,
    /// Absolute amount for [`ChargeKind::Fixed`]; fraction for
    /// [`ChargeKind::Percentage`].
    pub value: Decimal,
    pub scope: ChargeScope,
    #[serde(default = "default_active")]
    pub active: bool,
}

/// Input to the quote engine.  Transient; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteRequest {
    /// Code of the country the shipment departs from.
    pub origin_country: String,
    /// Code of the country the shipment is delivered to.
    pub destination_country: String,
    /// Actual weight in kilograms.  Must be strictly positive.
    pub weight: Decimal,
    /// Package dimensions in centimetres.  Must be strictly positive.
    pub length: Decimal,
    pub width: Decimal,
    pub height: Decimal,
    /// Identifier of the requested service type.
    pub service_type: String,
}

/// One applied charge on a quote, in application order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargeLine {
    pub label: String,
    pub amount: Decimal,
}

/// The resolved tier, echoed on the quote for auditability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierSummary {
    pub min_weight: Decimal,
    pub max_weight: Decimal,
    pub per_kg_rate: Decimal,
}

/// The result of one rate resolution.  Transient; the engine never
/// persists quotes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// The weight the shipment was billed on: the greater of actual
    /// and dimensional weight.
    pub billable_weight: Decimal,
    /// Identifier of the zone that resolved the rate.
    pub zone: String,
    /// Identifier of the service type quoted.
    pub service_type: String,
    /// The weight tier the billable weight fell into.
    pub tier: TierSummary,
    /// Flat amount from the resolved tier.
    pub base_rate: Decimal,
    /// `per_kg_rate * billable_weight`.
    pub weight_cost: Decimal,
    /// Applied charges in configuration order.
    pub charges: Vec<ChargeLine>,
    /// `base_rate + weight_cost + sum of charges`.
    pub total: Decimal,
}

fn default_active() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn charge_scope_matching() {
        let all = ChargeScope::All;
        assert!(all.includes("Z1", "EXPRESS"));

        let pairs = ChargeScope::Pairs(vec![ScopePair {
            zone_id: "Z1".into(),
            service_type_id: "EXPRESS".into(),
        }]);
        assert!(pairs.includes("Z1", "EXPRESS"));
        assert!(!pairs.includes("Z1", "ECONOMY"));
        assert!(!pairs.includes("Z2", "EXPRESS"));
    }

    #[test]
    fn tier_interval_is_closed_on_both_ends() {
        let tier = WeightRateTier {
            zone_id: "Z1".into(),
            service_type_id: "EXPRESS".into(),
            min_weight: dec!(0),
            max_weight: dec!(5),
            base_rate: dec!(20),
            per_kg_rate: dec!(4),
            active: true,
        };
        assert!(tier.covers(dec!(0)));
        assert!(tier.covers(dec!(5)));
        assert!(!tier.covers(dec!(5.01)));
    }

    #[test]
    fn country_roles_deserialize_from_uppercase() {
        let country: Country = serde_json::from_str(
            r#"{"code":"AE","name":"United Arab Emirates","roles":["DEPARTURE","DESTINATION"]}"#,
        )
        .unwrap();
        assert!(country.has_role(CountryRole::Departure));
        assert!(country.has_role(CountryRole::Destination));
        // `active` defaults to true when the record omits it.
        assert!(country.active);
    }
}
