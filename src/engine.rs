//! Rate resolution engine.
//!
//! The `engine` module is responsible for turning a [`QuoteRequest`]
//! and a [`RateSnapshot`] into a [`Quote`].  Resolution runs in a
//! fixed order: validate the countries, match the corridor to its
//! candidate zones, select the billable weight, resolve the weight
//! tier, apply additional charges, and sum the total.  Every stage is
//! a pure function of its inputs; a failure at any stage propagates
//! unchanged and no stage performs I/O, so identical inputs always
//! produce identical results.
//!
//! The multi-service comparison uses the [`rayon`] crate to price all
//! service levels of a corridor across multiple CPU cores.

use crate::charges::apply_charges;
use crate::error::QuoteError;
use crate::models::{CountryRole, Quote, QuoteRequest, TierSummary, WeightRateTier, Zone};
use crate::snapshot::RateSnapshot;
use crate::weight::billable_weight;
use rayon::prelude::*;
use rust_decimal::Decimal;

/// Checks that a corridor's endpoints are known, active, and hold the
/// roles the request puts them in.  Pure lookup; no side effects.
pub fn validate_route(
    snapshot: &RateSnapshot,
    origin: &str,
    destination: &str,
) -> Result<(), QuoteError> {
    check_country(snapshot, origin, CountryRole::Departure, "DEPARTURE")?;
    check_country(snapshot, destination, CountryRole::Destination, "DESTINATION")?;
    Ok(())
}

fn check_country(
    snapshot: &RateSnapshot,
    code: &str,
    role: CountryRole,
    role_name: &'static str,
) -> Result<(), QuoteError> {
    let country = snapshot
        .country(code)
        .ok_or_else(|| QuoteError::UnknownCountry(code.to_string()))?;
    if !country.active {
        return Err(QuoteError::InactiveCountry(code.to_string()));
    }
    if !country.has_role(role) {
        return Err(QuoteError::RoleMismatch {
            code: code.to_string(),
            role: role_name,
        });
    }
    Ok(())
}

/// Returns every active zone covering the corridor, in configuration
/// order.  Overlapping zones are legal here; no service-type
/// filtering happens at this stage.  Disambiguation is the tier
/// resolver's job.
pub fn match_zones<'a>(
    snapshot: &'a RateSnapshot,
    origin: &str,
    destination: &str,
) -> Result<Vec<&'a Zone>, QuoteError> {
    let candidates: Vec<&Zone> = snapshot
        .zones
        .iter()
        .filter(|z| z.active && z.covers(origin, destination))
        .collect();
    if candidates.is_empty() {
        return Err(QuoteError::NoZoneConfigured {
            origin: origin.to_string(),
            destination: destination.to_string(),
        });
    }
    Ok(candidates)
}

/// Finds the tier pricing the billable weight across the candidate
/// zones.
///
/// Every candidate zone is examined, in configuration order.  A zone
/// holding two or more tiers that both cover the weight is a
/// configuration defect and fails the whole resolution; so is a pair
/// of zones resolving tiers with different pricing.  Zones resolving
/// identically priced tiers are not in conflict and the first one
/// wins.
pub fn resolve_tier<'a>(
    snapshot: &'a RateSnapshot,
    candidates: &[&'a Zone],
    service_type_id: &str,
    billable: Decimal,
) -> Result<(&'a Zone, &'a WeightRateTier), QuoteError> {
    if snapshot.active_service_type(service_type_id).is_none() {
        return Err(QuoteError::NoMatchingServiceType(
            service_type_id.to_string(),
        ));
    }

    let mut service_offered = false;
    let mut resolved: Vec<(&Zone, &WeightRateTier)> = Vec::new();
    for &zone in candidates {
        let tiers = snapshot.tiers_for(&zone.id, service_type_id);
        if !tiers.is_empty() {
            service_offered = true;
        }
        let matching: Vec<&WeightRateTier> =
            tiers.into_iter().filter(|t| t.covers(billable)).collect();
        match matching.len() {
            0 => continue,
            1 => resolved.push((zone, matching[0])),
            _ => {
                return Err(QuoteError::AmbiguousTierConfiguration {
                    zone: zone.id.clone(),
                    service_type: service_type_id.to_string(),
                    weight: billable,
                })
            }
        }
    }

    let Some(&(zone, tier)) = resolved.first() else {
        if service_offered {
            return Err(QuoteError::NoTierForWeight {
                service_type: service_type_id.to_string(),
                weight: billable,
            });
        }
        return Err(QuoteError::NoMatchingServiceType(
            service_type_id.to_string(),
        ));
    };
    for (other_zone, other_tier) in &resolved[1..] {
        if tier.conflicts_with(other_tier) {
            return Err(QuoteError::AmbiguousZoneConfiguration {
                first: zone.id.clone(),
                second: other_zone.id.clone(),
                service_type: service_type_id.to_string(),
                weight: billable,
            });
        }
    }
    Ok((zone, tier))
}

/// Computes an itemised quote for a single request.
///
/// This is the engine's one entry point for callers: a pure function
/// of the request and the configuration snapshot, safe to invoke
/// concurrently against a shared snapshot.
pub fn compute_quote(request: &QuoteRequest, snapshot: &RateSnapshot) -> Result<Quote, QuoteError> {
    validate_route(
        snapshot,
        &request.origin_country,
        &request.destination_country,
    )?;
    let candidates = match_zones(
        snapshot,
        &request.origin_country,
        &request.destination_country,
    )?;
    let billable = billable_weight(
        request.weight,
        request.length,
        request.width,
        request.height,
        snapshot.dimensional_factor(&request.service_type),
    )?;
    let (zone, tier) = resolve_tier(snapshot, &candidates, &request.service_type, billable)?;

    // The full billable weight is multiplied, not the delta above the
    // tier minimum.
    let weight_cost = tier.per_kg_rate * billable;
    let charges = apply_charges(
        &snapshot.charges,
        &zone.id,
        &request.service_type,
        tier.base_rate,
        weight_cost,
    );
    let charges_total: Decimal = charges.iter().map(|l| l.amount).sum();

    Ok(Quote {
        billable_weight: billable,
        zone: zone.id.clone(),
        service_type: request.service_type.clone(),
        tier: TierSummary {
            min_weight: tier.min_weight,
            max_weight: tier.max_weight,
            per_kg_rate: tier.per_kg_rate,
        },
        base_rate: tier.base_rate,
        weight_cost,
        charges,
        total: tier.base_rate + weight_cost + charges_total,
    })
}

/// Prices one corridor across every active service level.
///
/// Service types that fail to resolve (no zone, no tier, bad factor
/// coverage) are skipped rather than failing the comparison; the
/// surviving quotes come back sorted ascending by total, with the
/// snapshot's service order breaking ties.  An empty result is legal.
pub fn compare_services(request: &QuoteRequest, snapshot: &RateSnapshot) -> Vec<Quote> {
    let mut quotes: Vec<Quote> = snapshot
        .service_types
        .par_iter()
        .filter(|s| s.active)
        .filter_map(|service| {
            let candidate = QuoteRequest {
                service_type: service.id.clone(),
                ..request.clone()
            };
            compute_quote(&candidate, snapshot).ok()
        })
        .collect();
    quotes.sort_by(|a, b| a.total.cmp(&b.total));
    quotes
}
