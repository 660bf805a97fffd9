//! Section 87A rebate and marginal relief.
//!
//! The rebate forgives tax, up to a cap, when taxable income is at or below
//! the rebate threshold. Marginal relief then stops income just above the
//! threshold from paying more tax than the income over the threshold.

use rust_decimal::Decimal;

use crate::config::{MarginalReliefConfig, RebateConfig};
use crate::models::AuditStep;

use super::common::format_rupees;

/// The result of applying the rebate.
#[derive(Debug, Clone)]
pub struct RebateResult {
    /// The rebate granted (zero when not eligible).
    pub rebate: Decimal,
    /// Tax remaining after the rebate.
    pub tax_after_rebate: Decimal,
    /// The audit step, present only when taxable income is within the threshold.
    pub audit_step: Option<AuditStep>,
}

/// The result of applying marginal relief.
#[derive(Debug, Clone)]
pub struct MarginalReliefResult {
    /// Tax reduction granted by the relief (zero when not applied).
    pub relief: Decimal,
    /// Tax remaining after relief.
    pub tax_after_relief: Decimal,
    /// The audit step, present only when the relief lowered the tax.
    pub audit_step: Option<AuditStep>,
}

/// Applies the rebate as a capped subtraction.
///
/// When `taxable_income <= threshold`, the tax is reduced by
/// `min(cap, tax)`. The rebate is never applied as a blanket zeroing, so a
/// regime whose threshold tax exceeds the cap still leaves the excess due.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use tax_engine::calculation::apply_rebate;
/// use tax_engine::config::TaxRegimeConfig;
///
/// let config = TaxRegimeConfig::fy2025_26();
/// let result = apply_rebate(Decimal::from(32_500), Decimal::from(925_000), &config.rebate, 5);
///
/// assert_eq!(result.rebate, Decimal::from(32_500));
/// assert_eq!(result.tax_after_rebate, Decimal::ZERO);
/// assert!(result.audit_step.is_some());
/// ```
pub fn apply_rebate(
    tax: Decimal,
    taxable_income: Decimal,
    rebate: &RebateConfig,
    step_number: u32,
) -> RebateResult {
    if taxable_income > rebate.income_threshold {
        return RebateResult {
            rebate: Decimal::ZERO,
            tax_after_rebate: tax,
            audit_step: None,
        };
    }

    let granted = rebate.cap.min(tax);
    let tax_after_rebate = tax - granted;

    let audit_step = AuditStep {
        step_number,
        rule_id: "rebate_87a".to_string(),
        rule_name: "Section 87A Rebate".to_string(),
        section_ref: rebate.section.clone(),
        input: serde_json::json!({
            "tax": tax.normalize().to_string(),
            "taxable_income": taxable_income.normalize().to_string(),
            "income_threshold": rebate.income_threshold.normalize().to_string(),
            "cap": rebate.cap.normalize().to_string()
        }),
        output: serde_json::json!({
            "rebate": granted.normalize().to_string(),
            "tax_after_rebate": tax_after_rebate.normalize().to_string(),
            "cap_applied": tax > rebate.cap
        }),
        reasoning: format!(
            "Section {} rebate applied: {} → Tax after rebate: {}",
            rebate.section,
            format_rupees(granted),
            format_rupees(tax_after_rebate)
        ),
    };

    RebateResult {
        rebate: granted,
        tax_after_rebate,
        audit_step: Some(audit_step),
    }
}

/// Applies marginal relief above the rebate threshold.
///
/// When `threshold < taxable_income <= ceiling` and the tax exceeds the
/// income over the threshold, the tax is capped at that excess.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use tax_engine::calculation::apply_marginal_relief;
/// use tax_engine::config::TaxRegimeConfig;
///
/// let config = TaxRegimeConfig::fy2025_26();
/// let result = apply_marginal_relief(
///     Decimal::from(60_000),
///     Decimal::from(1_200_001),
///     &config.rebate,
///     &config.marginal_relief,
///     6,
/// );
///
/// assert_eq!(result.tax_after_relief, Decimal::ONE);
/// ```
pub fn apply_marginal_relief(
    tax: Decimal,
    taxable_income: Decimal,
    rebate: &RebateConfig,
    relief: &MarginalReliefConfig,
    step_number: u32,
) -> MarginalReliefResult {
    let within_band =
        taxable_income > rebate.income_threshold && taxable_income <= relief.ceiling;
    let excess = taxable_income - rebate.income_threshold;

    if !within_band || tax <= excess {
        return MarginalReliefResult {
            relief: Decimal::ZERO,
            tax_after_relief: tax,
            audit_step: None,
        };
    }

    let audit_step = AuditStep {
        step_number,
        rule_id: "marginal_relief".to_string(),
        rule_name: "Marginal Relief".to_string(),
        section_ref: rebate.section.clone(),
        input: serde_json::json!({
            "tax": tax.normalize().to_string(),
            "taxable_income": taxable_income.normalize().to_string(),
            "income_threshold": rebate.income_threshold.normalize().to_string(),
            "ceiling": relief.ceiling.normalize().to_string()
        }),
        output: serde_json::json!({
            "relief": (tax - excess).normalize().to_string(),
            "tax_after_relief": excess.normalize().to_string()
        }),
        reasoning: format!(
            "Marginal Relief applied → Tax reduced to excess over {} = {}",
            format_rupees(rebate.income_threshold),
            format_rupees(excess)
        ),
    };

    MarginalReliefResult {
        relief: tax - excess,
        tax_after_relief: excess,
        audit_step: Some(audit_step),
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

    fn rebate_config() -> RebateConfig {
        TaxRegimeConfig::fy2025_26().rebate
    }

    fn relief_config() -> MarginalReliefConfig {
        TaxRegimeConfig::fy2025_26().marginal_relief
    }

    #[test]
    fn test_rebate_forgives_tax_below_cap() {
        let result = apply_rebate(dec("32500"), dec("925000"), &rebate_config(), 1);
        assert_eq!(result.rebate, dec("32500"));
        assert_eq!(result.tax_after_rebate, dec("0"));
    }

    #[test]
    fn test_rebate_at_threshold() {
        let result = apply_rebate(dec("60000"), dec("1200000"), &rebate_config(), 1);
        assert_eq!(result.rebate, dec("60000"));
        assert_eq!(result.tax_after_rebate, dec("0"));
    }

    #[test]
    fn test_rebate_is_capped_subtraction() {
        let mut config = rebate_config();
        config.cap = dec("25000");
        let result = apply_rebate(dec("32500"), dec("925000"), &config, 1);
        assert_eq!(result.rebate, dec("25000"));
        assert_eq!(result.tax_after_rebate, dec("7500"));
        assert_eq!(result.audit_step.unwrap().output["cap_applied"], true);
    }

    #[test]
    fn test_rebate_not_applied_above_threshold() {
        let result = apply_rebate(dec("60000.15"), dec("1200001"), &rebate_config(), 1);
        assert_eq!(result.rebate, dec("0"));
        assert_eq!(result.tax_after_rebate, dec("60000.15"));
        assert!(result.audit_step.is_none());
    }

    #[test]
    fn test_rebate_step_emitted_even_for_zero_tax() {
        let result = apply_rebate(dec("0"), dec("300000"), &rebate_config(), 4);
        let step = result.audit_step.unwrap();
        assert_eq!(step.step_number, 4);
        assert_eq!(
            step.reasoning,
            "Section 87A rebate applied: ₹0 → Tax after rebate: ₹0"
        );
    }

    #[test]
    fn test_relief_caps_tax_just_above_threshold() {
        let result = apply_marginal_relief(
            dec("60000.15"),
            dec("1200001"),
            &rebate_config(),
            &relief_config(),
            1,
        );
        assert_eq!(result.tax_after_relief, dec("1"));
        assert_eq!(result.relief, dec("59999.15"));
        assert_eq!(
            result.audit_step.unwrap().reasoning,
            "Marginal Relief applied → Tax reduced to excess over ₹12,00,000 = ₹1"
        );
    }

    #[test]
    fn test_relief_not_applied_when_tax_below_excess() {
        // 12,72,000 taxable: slab tax 70,800 < excess 72,000
        let result = apply_marginal_relief(
            dec("70800"),
            dec("1272000"),
            &rebate_config(),
            &relief_config(),
            1,
        );
        assert_eq!(result.relief, dec("0"));
        assert_eq!(result.tax_after_relief, dec("70800"));
        assert!(result.audit_step.is_none());
    }

    #[test]
    fn test_relief_not_applied_above_ceiling() {
        let result = apply_marginal_relief(
            dec("71250"),
            dec("1275001"),
            &rebate_config(),
            &relief_config(),
            1,
        );
        assert!(result.audit_step.is_none());
        assert_eq!(result.tax_after_relief, dec("71250"));
    }

    #[test]
    fn test_relief_not_applied_at_threshold() {
        let result = apply_marginal_relief(
            dec("0"),
            dec("1200000"),
            &rebate_config(),
            &relief_config(),
            1,
        );
        assert!(result.audit_step.is_none());
    }
}
