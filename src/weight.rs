//! Billable weight selection.
//!
//! Carriers charge on whichever is greater: the scale weight of a
//! package or its volume-derived equivalent, `(length * width *
//! height) / factor`.  The divisor is configuration, not a constant;
//! the orchestrator injects the factor configured for the requested
//! service type.  No rounding happens here: the quotient is kept
//! exact so that boundary matching at the tier stage does not
//! compound error.

use crate::error::QuoteError;
use rust_decimal::Decimal;

/// Computes the weight a shipment is billed on.
///
/// All physical measurements must be strictly positive.  When no
/// dimensional factor is configured for the service, the dimensional
/// path is skipped and the actual weight is billable as-is.
pub fn billable_weight(
    actual_weight: Decimal,
    length: Decimal,
    width: Decimal,
    height: Decimal,
    dim_factor: Option<Decimal>,
) -> Result<Decimal, QuoteError> {
    check_positive("weight", actual_weight)?;
    check_positive("length", length)?;
    check_positive("width", width)?;
    check_positive("height", height)?;

    let billable = match dim_factor {
        Some(factor) => {
            let dimensional = length * width * height / factor;
            actual_weight.max(dimensional)
        }
        None => actual_weight,
    };
    Ok(billable)
}

fn check_positive(field: &'static str, value: Decimal) -> Result<(), QuoteError> {
    if value <= Decimal::ZERO {
        return Err(QuoteError::InvalidDimensions { field, value });
    }
    Ok(())
}
