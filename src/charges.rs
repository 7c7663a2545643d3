//! Additional charge application.
//!
//! Once a tier has resolved, supplementary charges configured for the
//! zone/service combination are layered on top: fuel surcharges,
//! express handling fees, insurance and the like.  Charges apply in
//! the order they appear in the snapshot's charge list, and the
//! itemised lines come back in that same order so a quote can be
//! audited against the configuration.
//!
//! A percentage charge is computed against the pre-charge subtotal,
//! `base_rate + weight_cost`.  Weight cost is part of the base;
//! previously applied charges are not, so charge order never changes
//! any amount, only the order of the lines.

use crate::models::{AdditionalCharge, ChargeKind, ChargeLine};
use rust_decimal::Decimal;

/// Selects and computes every applicable charge.
///
/// A charge applies when it is active and its scope is `all` or
/// includes the given zone/service pair.
pub fn apply_charges(
    charges: &[AdditionalCharge],
    zone_id: &str,
    service_type_id: &str,
    base_rate: Decimal,
    weight_cost: Decimal,
) -> Vec<ChargeLine> {
    let subtotal = base_rate + weight_cost;
    charges
        .iter()
        .filter(|c| c.active && c.scope.includes(zone_id, service_type_id))
        .map(|c| ChargeLine {
            label: c.label.clone(),
            amount: match c.kind {
                ChargeKind::Fixed => c.value,
                ChargeKind::Percentage => c.value * subtotal,
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ChargeScope, ScopePair};
    use rust_decimal_macros::dec;

    fn fixed(id: &str, label: &str, value: Decimal, scope: ChargeScope) -> AdditionalCharge {
        AdditionalCharge {
            id: id.into(),
            label: label.into(),
            kind: ChargeKind::Fixed,
            value,
            scope,
            active: true,
        }
    }

    fn percentage(id: &str, label: &str, value: Decimal, scope: ChargeScope) -> AdditionalCharge {
        AdditionalCharge {
            id: id.into(),
            label: label.into(),
            kind: ChargeKind::Percentage,
            value,
            scope,
            active: true,
        }
    }

    #[test]
    fn percentage_applies_to_base_plus_weight_cost() {
        let charges = vec![percentage(
            "INS",
            "Insurance",
            dec!(0.01),
            ChargeScope::All,
        )];
        let lines = apply_charges(&charges, "Z1", "EXPRESS", dec!(20), dec!(12));
        assert_eq!(lines.len(), 1);
        // 1% of (20 + 12), not 1% of 20.
        assert_eq!(lines[0].amount, dec!(0.32));
    }

    #[test]
    fn fixed_contributes_its_value_verbatim() {
        let charges = vec![fixed("FUEL", "Fuel Surcharge", dec!(5), ChargeScope::All)];
        let lines = apply_charges(&charges, "Z1", "EXPRESS", dec!(20), dec!(12));
        assert_eq!(
            lines,
            vec![ChargeLine {
                label: "Fuel Surcharge".into(),
                amount: dec!(5),
            }]
        );
    }

    #[test]
    fn lines_come_back_in_configuration_order() {
        let charges = vec![
            fixed("FUEL", "Fuel Surcharge", dec!(5), ChargeScope::All),
            fixed("HANDLING", "Express Handling", dec!(15), ChargeScope::All),
            percentage("INS", "Insurance", dec!(0.01), ChargeScope::All),
        ];
        let lines = apply_charges(&charges, "Z1", "EXPRESS", dec!(35), dec!(42));
        let labels: Vec<&str> = lines.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Fuel Surcharge", "Express Handling", "Insurance"]
        );
        assert_eq!(lines[2].amount, dec!(0.77));
    }

    #[test]
    fn out_of_scope_and_inactive_charges_are_skipped() {
        let mut dormant = fixed("FUEL", "Fuel Surcharge", dec!(5), ChargeScope::All);
        dormant.active = false;
        let charges = vec![
            dormant,
            fixed(
                "REMOTE",
                "Remote Area Fee",
                dec!(9),
                ChargeScope::Pairs(vec![ScopePair {
                    zone_id: "Z2".into(),
                    service_type_id: "EXPRESS".into(),
                }]),
            ),
            fixed(
                "HANDLING",
                "Express Handling",
                dec!(15),
                ChargeScope::Pairs(vec![ScopePair {
                    zone_id: "Z1".into(),
                    service_type_id: "EXPRESS".into(),
                }]),
            ),
        ];
        let lines = apply_charges(&charges, "Z1", "EXPRESS", dec!(35), dec!(42));
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].label, "Express Handling");
    }

    #[test]
    fn charge_order_never_changes_amounts() {
        let forward = vec![
            fixed("FUEL", "Fuel Surcharge", dec!(5), ChargeScope::All),
            percentage("INS", "Insurance", dec!(0.01), ChargeScope::All),
        ];
        let reversed: Vec<AdditionalCharge> = forward.iter().rev().cloned().collect();

        let a = apply_charges(&forward, "Z1", "EXPRESS", dec!(20), dec!(12));
        let b = apply_charges(&reversed, "Z1", "EXPRESS", dec!(20), dec!(12));
        let total_a: Decimal = a.iter().map(|l| l.amount).sum();
        let total_b: Decimal = b.iter().map(|l| l.amount).sum();
        assert_eq!(total_a, total_b);
    }
}
