//! Error taxonomy for the Shipping Engine.
//!
//! Every failure the engine can produce is a structured value of
//! [`QuoteError`]; nothing is panicked or logged from inside a
//! resolution call.  All variants are deterministic for a given
//! (request, snapshot) pair and none of them is retriable without
//! correcting either the request or the configuration, so callers
//! must not retry blindly.  Translating an error kind into a
//! user-facing message and transport status is the HTTP layer's job.

use rust_decimal::Decimal;
use thiserror::Error;

/// A failed rate resolution.
///
/// The first three variants concern the country stage, the rest the
/// zone, weight and tier stages.  The two `Ambiguous*` variants are
/// configuration defects surfaced to operators rather than silently
/// resolved: picking a tier by arbitrary preference would make
/// pricing non-auditable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuoteError {
    /// No country record carries the given code.
    #[error("unknown country code {0:?}")]
    UnknownCountry(String),

    /// A country record exists but is deactivated.
    #[error("country {0:?} is not active")]
    InactiveCountry(String),

    /// The origin cannot act as a departure country, or the
    /// destination cannot act as a destination country.
    #[error("country {code:?} has no {role} role")]
    RoleMismatch { code: String, role: &'static str },

    /// No active zone covers the requested corridor.
    #[error("no shipping zone configured for {origin:?} -> {destination:?}")]
    NoZoneConfigured { origin: String, destination: String },

    /// Two or more zones cover the corridor and resolve conflicting
    /// tiers for the same service and weight.
    #[error("zones {first:?} and {second:?} both price {service_type:?} at {weight} kg")]
    AmbiguousZoneConfiguration {
        first: String,
        second: String,
        service_type: String,
        weight: Decimal,
    },

    /// A physical measurement on the request is zero or negative.
    #[error("{field} must be strictly positive, got {value}")]
    InvalidDimensions { field: &'static str, value: Decimal },

    /// Tiers for the service exist over the corridor but none covers
    /// the billable weight.
    #[error("no rate tier covers {weight} kg for service {service_type:?}")]
    NoTierForWeight {
        service_type: String,
        weight: Decimal,
    },

    /// One zone holds overlapping tiers for the same service at the
    /// billable weight.
    #[error("zone {zone:?} has overlapping tiers for {service_type:?} at {weight} kg")]
    AmbiguousTierConfiguration {
        zone: String,
        service_type: String,
        weight: Decimal,
    },

    /// The requested service type is inactive, unknown, or absent
    /// from every zone covering the corridor.
    #[error("service type {0:?} is not available on this corridor")]
    NoMatchingServiceType(String),
}

impl QuoteError {
    /// Stable machine-readable code for this error kind, used by the
    /// HTTP layer and suitable for client-side dispatch.
    pub fn code(&self) -> &'static str {
        match self {
            QuoteError::UnknownCountry(_) => "UNKNOWN_COUNTRY",
            QuoteError::InactiveCountry(_) => "INACTIVE_COUNTRY",
            QuoteError::RoleMismatch { .. } => "ROLE_MISMATCH",
            QuoteError::NoZoneConfigured { .. } => "NO_ZONE_CONFIGURED",
            QuoteError::AmbiguousZoneConfiguration { .. } => "AMBIGUOUS_ZONE_CONFIGURATION",
            QuoteError::InvalidDimensions { .. } => "INVALID_DIMENSIONS",
            QuoteError::NoTierForWeight { .. } => "NO_TIER_FOR_WEIGHT",
            QuoteError::AmbiguousTierConfiguration { .. } => "AMBIGUOUS_TIER_CONFIGURATION",
            QuoteError::NoMatchingServiceType(_) => "NO_MATCHING_SERVICE_TYPE",
        }
    }

    /// Returns true for errors caused by the configuration rather
    /// than by the request.  The HTTP layer maps these to a server
    /// error status so that operators, not callers, get the signal.
    pub fn is_configuration_defect(&self) -> bool {
        matches!(
            self,
            QuoteError::AmbiguousZoneConfiguration { .. }
                | QuoteError::AmbiguousTierConfiguration { .. }
        )
    }
}
