//! Progressive slab walk.
//!
//! This module distributes taxable income over the ordered slab table and
//! charges each slab's marginal rate on the portion that falls inside it.

use rust_decimal::Decimal;

use crate::config::TaxSlab;
use crate::models::{AuditStep, LineKind, SlabLineItem};

use super::common::{format_inr, format_rupees, round_whole};

/// The section reference for the new regime slab rates.
pub const SLAB_RATES_SECTION: &str = "115BAC(1A)";

/// The result of walking the slab table.
#[derive(Debug, Clone)]
pub struct SlabWalkResult {
    /// One tax band row per visited slab.
    pub line_items: Vec<SlabLineItem>,
    /// Sum of the tax charged across all visited slabs.
    pub tax: Decimal,
    /// One audit step per visited slab.
    pub audit_steps: Vec<AuditStep>,
}

/// Walks the slab table for the given taxable income.
///
/// For each slab, the amount taxed is `min(remaining, upper - previous_upper)`
/// (the whole remainder for the unbounded slab). The walk stops as soon as
/// nothing remains, so a remainder exhausted exactly at a slab boundary does
/// not visit the next slab, and zero taxable income visits none.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use tax_engine::calculation::walk_slabs;
/// use tax_engine::config::TaxRegimeConfig;
///
/// let config = TaxRegimeConfig::fy2025_26();
/// let result = walk_slabs(Decimal::from(925_000), &config.slabs, 2);
///
/// assert_eq!(result.line_items.len(), 3);
/// assert_eq!(result.tax, Decimal::from(32_500));
/// assert_eq!(result.audit_steps[0].step_number, 2);
/// ```
pub fn walk_slabs(taxable_income: Decimal, slabs: &[TaxSlab], first_step: u32) -> SlabWalkResult {
    let mut line_items = Vec::new();
    let mut audit_steps = Vec::new();
    let mut tax = Decimal::ZERO;
    let mut remaining = taxable_income;
    let mut previous_bound = Decimal::ZERO;
    let mut step_number = first_step;

    for slab in slabs {
        if remaining <= Decimal::ZERO {
            break;
        }

        let taxable_in_slab = match slab.upper_bound {
            Some(upper) => remaining.min(upper - previous_bound),
            None => remaining,
        };
        let tax_in_slab = taxable_in_slab * slab.rate;
        let percent = (slab.rate * Decimal::ONE_HUNDRED).normalize();

        let lower_label = format_inr(previous_bound + Decimal::ONE);
        let upper_label = slab
            .upper_bound
            .map(format_inr)
            .unwrap_or_else(|| "∞".to_string());
        let range_label = format!("{} - {}", lower_label, upper_label);

        audit_steps.push(AuditStep {
            step_number,
            rule_id: "slab_tax".to_string(),
            rule_name: "Slab Tax".to_string(),
            section_ref: SLAB_RATES_SECTION.to_string(),
            input: serde_json::json!({
                "lower_bound": previous_bound.normalize().to_string(),
                "upper_bound": slab.upper_bound.map(|u| u.normalize().to_string()),
                "rate": slab.rate.normalize().to_string(),
                "remaining_income": remaining.normalize().to_string()
            }),
            output: serde_json::json!({
                "taxable_in_slab": taxable_in_slab.normalize().to_string(),
                "tax_in_slab": tax_in_slab.normalize().to_string()
            }),
            reasoning: format!(
                "Income ₹{} - ₹{} → Taxable: {}, Rate: {}% → Tax: {}",
                lower_label,
                upper_label,
                format_rupees(taxable_in_slab),
                percent,
                format_rupees(round_whole(tax_in_slab))
            ),
        });

        line_items.push(SlabLineItem {
            range_label,
            rate: Some(percent),
            taxable_amount: taxable_in_slab,
            tax_amount: tax_in_slab,
            kind: LineKind::TaxBand,
        });

        tax += tax_in_slab;
        remaining -= taxable_in_slab;
        step_number += 1;
        if let Some(upper) = slab.upper_bound {
            previous_bound = upper;
        }
    }

    SlabWalkResult {
        line_items,
        tax,
        audit_steps,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TaxRegimeConfig;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn slabs() -> Vec<TaxSlab> {
        TaxRegimeConfig::fy2025_26().slabs
    }

    #[test]
    fn test_zero_taxable_income_visits_no_slab() {
        let result = walk_slabs(dec("0"), &slabs(), 1);
        assert!(result.line_items.is_empty());
        assert!(result.audit_steps.is_empty());
        assert_eq!(result.tax, dec("0"));
    }

    #[test]
    fn test_income_within_first_slab() {
        let result = walk_slabs(dec("250000"), &slabs(), 1);
        assert_eq!(result.line_items.len(), 1);
        assert_eq!(result.line_items[0].taxable_amount, dec("250000"));
        assert_eq!(result.line_items[0].range_label, "1 - 4,00,000");
        assert_eq!(result.tax, dec("0"));
    }

    #[test]
    fn test_exhausted_at_boundary_stops_walk() {
        let result = walk_slabs(dec("800000"), &slabs(), 1);
        assert_eq!(result.line_items.len(), 2);
        assert_eq!(result.line_items[1].taxable_amount, dec("400000"));
        assert_eq!(result.tax, dec("20000"));
    }

    #[test]
    fn test_925000_taxable() {
        let result = walk_slabs(dec("925000"), &slabs(), 1);
        let taxed: Vec<Decimal> = result.line_items.iter().map(|l| l.taxable_amount).collect();
        assert_eq!(taxed, vec![dec("400000"), dec("400000"), dec("125000")]);
        assert_eq!(result.tax, dec("32500"));
    }

    #[test]
    fn test_1425000_taxable() {
        let result = walk_slabs(dec("1425000"), &slabs(), 1);
        assert_eq!(result.line_items.len(), 4);
        assert_eq!(result.line_items[3].taxable_amount, dec("225000"));
        assert_eq!(result.line_items[3].tax_amount, dec("33750"));
        assert_eq!(result.tax, dec("93750"));
    }

    #[test]
    fn test_unbounded_slab_takes_remainder() {
        let result = walk_slabs(dec("3000000"), &slabs(), 1);
        assert_eq!(result.line_items.len(), 7);
        let top = &result.line_items[6];
        assert_eq!(top.taxable_amount, dec("600000"));
        assert_eq!(top.range_label, "24,00,001 - ∞");
        assert_eq!(top.rate, Some(dec("30")));
        // 20000 + 40000 + 60000 + 80000 + 100000 + 180000
        assert_eq!(result.tax, dec("480000"));
    }

    #[test]
    fn test_line_items_sum_to_taxable_income() {
        let taxable = dec("5123456.78");
        let result = walk_slabs(taxable, &slabs(), 1);
        let sum: Decimal = result.line_items.iter().map(|l| l.taxable_amount).sum();
        assert_eq!(sum, taxable);
    }

    #[test]
    fn test_range_labels_and_reasoning() {
        let result = walk_slabs(dec("925000"), &slabs(), 1);
        assert_eq!(result.line_items[1].range_label, "4,00,001 - 8,00,000");
        assert_eq!(
            result.audit_steps[1].reasoning,
            "Income ₹4,00,001 - ₹8,00,000 → Taxable: ₹4,00,000, Rate: 5% → Tax: ₹20,000"
        );
        assert_eq!(
            result.audit_steps[2].reasoning,
            "Income ₹8,00,001 - ₹12,00,000 → Taxable: ₹1,25,000, Rate: 10% → Tax: ₹12,500"
        );
    }

    #[test]
    fn test_step_numbers_are_sequential() {
        let result = walk_slabs(dec("1425000"), &slabs(), 2);
        let numbers: Vec<u32> = result.audit_steps.iter().map(|s| s.step_number).collect();
        assert_eq!(numbers, vec![2, 3, 4, 5]);
        assert!(result.audit_steps.iter().all(|s| s.rule_id == "slab_tax"));
    }
}
