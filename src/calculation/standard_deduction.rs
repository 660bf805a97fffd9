//! Standard deduction functionality.
//!
//! This module applies the standard deduction under section 16(ia) to the
//! gross amount, yielding the taxable income the slab walk starts from.

use rust_decimal::Decimal;

use crate::config::DeductionPolicy;
use crate::models::AuditStep;

use super::common::{format_rupees, round_whole};

/// The section reference for the standard deduction.
pub const STANDARD_DEDUCTION_SECTION: &str = "16(ia)";

/// The result of applying the standard deduction.
#[derive(Debug, Clone)]
pub struct StandardDeductionResult {
    /// The deduction granted.
    pub deduction: Decimal,
    /// Income left after the deduction, never negative.
    pub taxable_income: Decimal,
    /// The audit step recording this deduction.
    pub audit_step: AuditStep,
}

/// Applies the standard deduction to a gross amount.
///
/// - `Fixed { amount }` deducts `amount`, leaving `max(0, income - amount)`
/// - `Capped { cap, floor }` deducts the income above `floor`, at most `cap`
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use tax_engine::calculation::apply_standard_deduction;
/// use tax_engine::config::DeductionPolicy;
///
/// let policy = DeductionPolicy::Fixed { amount: Decimal::from(75_000) };
/// let result = apply_standard_deduction(Decimal::from(1_000_000), &policy, 1);
///
/// assert_eq!(result.deduction, Decimal::from(75_000));
/// assert_eq!(result.taxable_income, Decimal::from(925_000));
/// assert_eq!(
///     result.audit_step.reasoning,
///     "Standard Deduction applied: ₹75,000 → Taxable Income: ₹9,25,000"
/// );
/// ```
pub fn apply_standard_deduction(
    income: Decimal,
    policy: &DeductionPolicy,
    step_number: u32,
) -> StandardDeductionResult {
    let deduction = policy.deduction_for(income);
    let taxable_income = (income - deduction).max(Decimal::ZERO);

    let mut input = serde_json::json!({
        "income": income.normalize().to_string(),
        "policy": policy.name(),
    });
    match *policy {
        DeductionPolicy::Fixed { amount } => {
            input["amount"] = serde_json::json!(amount.normalize().to_string());
        }
        DeductionPolicy::Capped { cap, floor } => {
            input["cap"] = serde_json::json!(cap.normalize().to_string());
            input["floor"] = serde_json::json!(floor.normalize().to_string());
        }
    }

    let audit_step = AuditStep {
        step_number,
        rule_id: "standard_deduction".to_string(),
        rule_name: "Standard Deduction".to_string(),
        section_ref: STANDARD_DEDUCTION_SECTION.to_string(),
        input,
        output: serde_json::json!({
            "deduction": round_whole(deduction).to_string(),
            "taxable_income": taxable_income.normalize().to_string()
        }),
        reasoning: format!(
            "Standard Deduction applied: {} → Taxable Income: {}",
            format_rupees(deduction),
            format_rupees(taxable_income)
        ),
    };

    StandardDeductionResult {
        deduction,
        taxable_income,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn fixed() -> DeductionPolicy {
        DeductionPolicy::Fixed {
            amount: dec("75000"),
        }
    }

    fn capped() -> DeductionPolicy {
        DeductionPolicy::Capped {
            cap: dec("75000"),
            floor: dec("300000"),
        }
    }

    #[test]
    fn test_fixed_deduction_on_large_income() {
        let result = apply_standard_deduction(dec("1500000"), &fixed(), 1);
        assert_eq!(result.deduction, dec("75000"));
        assert_eq!(result.taxable_income, dec("1425000"));
    }

    #[test]
    fn test_fixed_deduction_on_small_income_leaves_zero() {
        let result = apply_standard_deduction(dec("50000"), &fixed(), 1);
        assert_eq!(result.deduction, dec("50000"));
        assert_eq!(result.taxable_income, dec("0"));
    }

    #[test]
    fn test_capped_deduction_between_floor_and_cap() {
        let result = apply_standard_deduction(dec("350000"), &capped(), 1);
        assert_eq!(result.deduction, dec("50000"));
        assert_eq!(result.taxable_income, dec("300000"));
    }

    #[test]
    fn test_capped_deduction_below_floor() {
        let result = apply_standard_deduction(dec("200000"), &capped(), 1);
        assert_eq!(result.deduction, dec("0"));
        assert_eq!(result.taxable_income, dec("200000"));
    }

    #[test]
    fn test_fractional_income_is_kept_exact() {
        let result = apply_standard_deduction(dec("1000000.75"), &fixed(), 1);
        assert_eq!(result.taxable_income, dec("925000.75"));
    }

    #[test]
    fn test_audit_step_fields() {
        let result = apply_standard_deduction(dec("1000000"), &capped(), 3);
        let step = &result.audit_step;

        assert_eq!(step.step_number, 3);
        assert_eq!(step.rule_id, "standard_deduction");
        assert_eq!(step.section_ref, "16(ia)");
        assert_eq!(step.input["policy"], "capped");
        assert_eq!(step.input["floor"], "300000");
        assert_eq!(step.output["deduction"], "75000");
        assert_eq!(step.output["taxable_income"], "925000");
    }
}
