//! Slab tax calculation.
//!
//! [`SlabTaxCalculator`] chains the stages in their statutory order:
//! standard deduction, slab walk, rebate, marginal relief, cess. It then
//! derives the presented totals. Rounding happens once, on the final tax.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::{DeductionPolicy, TaxRegimeConfig};
use crate::models::{AuditStep, LineKind, SlabLineItem, TaxResult};

use super::cess::apply_cess;
use super::common::{
    amount_from_f64, format_rupees, round_percent, round_whole, validate_amount,
};
use super::rebate::{apply_marginal_relief, apply_rebate};
use super::slab_walk::walk_slabs;
use super::standard_deduction::apply_standard_deduction;

/// Computes income tax under a regime.
///
/// The calculator borrows the regime; it is cheap to build and holds no
/// state between calls, so it can be invoked on every input change.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use tax_engine::calculation::SlabTaxCalculator;
/// use tax_engine::config::TaxRegimeConfig;
///
/// let config = TaxRegimeConfig::fy2025_26();
/// let result = SlabTaxCalculator::new(&config)
///     .compute(Decimal::from(1_500_000))
///     .unwrap();
///
/// assert_eq!(result.taxable_income, Decimal::from(1_425_000));
/// assert_eq!(result.total_tax, Decimal::from(97_500));
/// assert_eq!(result.net_income, Decimal::from(1_402_500));
///
/// assert!(SlabTaxCalculator::new(&config).compute(Decimal::ZERO).is_none());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SlabTaxCalculator<'a> {
    config: &'a TaxRegimeConfig,
    policy: DeductionPolicy,
}

impl<'a> SlabTaxCalculator<'a> {
    /// Creates a calculator using the regime's own deduction policy.
    pub fn new(config: &'a TaxRegimeConfig) -> Self {
        Self {
            config,
            policy: config.standard_deduction,
        }
    }

    /// Overrides the standard deduction policy.
    pub fn with_policy(mut self, policy: DeductionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Computes tax on `amount`.
    ///
    /// Returns `None` when the amount is not strictly positive or exceeds
    /// [`MAX_INPUT_AMOUNT`](super::MAX_INPUT_AMOUNT).
    pub fn compute(&self, amount: Decimal) -> Option<TaxResult> {
        let Some(income) = validate_amount(amount) else {
            debug!(amount = %amount, "Rejected tax input");
            return None;
        };

        let mut steps: Vec<AuditStep> = Vec::new();
        let mut step_number: u32 = 1;

        let deduction = apply_standard_deduction(income, &self.policy, step_number);
        steps.push(deduction.audit_step);
        step_number += 1;

        let mut slab_breakdown = vec![SlabLineItem {
            range_label: "Standard Deduction".to_string(),
            rate: None,
            taxable_amount: deduction.deduction,
            tax_amount: Decimal::ZERO,
            kind: LineKind::Deduction,
        }];

        let walk = walk_slabs(deduction.taxable_income, &self.config.slabs, step_number);
        step_number += walk.audit_steps.len() as u32;
        steps.extend(walk.audit_steps);
        slab_breakdown.extend(walk.line_items);

        let rebate = apply_rebate(
            walk.tax,
            deduction.taxable_income,
            &self.config.rebate,
            step_number,
        );
        if let Some(step) = rebate.audit_step {
            steps.push(step);
            step_number += 1;
        }

        let relief = apply_marginal_relief(
            rebate.tax_after_rebate,
            deduction.taxable_income,
            &self.config.rebate,
            &self.config.marginal_relief,
            step_number,
        );
        if let Some(step) = relief.audit_step {
            steps.push(step);
            step_number += 1;
        }

        let cess = apply_cess(relief.tax_after_relief, &self.config.cess, step_number);
        steps.push(cess.audit_step);
        step_number += 1;

        let total_tax = round_whole(cess.tax_with_cess);
        let net_income = round_whole(income - total_tax);
        let effective_rate = round_percent(cess.tax_with_cess / income * Decimal::ONE_HUNDRED);

        steps.push(AuditStep {
            step_number,
            rule_id: "net_income".to_string(),
            rule_name: "Net Income".to_string(),
            section_ref: "-".to_string(),
            input: serde_json::json!({
                "income": income.normalize().to_string(),
                "total_tax": total_tax.to_string()
            }),
            output: serde_json::json!({
                "net_income": net_income.to_string(),
                "effective_rate": effective_rate.to_string()
            }),
            reasoning: format!("Final Net Income: {}", format_rupees(net_income)),
        });

        debug!(
            regime = %self.config.code(),
            income = %income,
            taxable_income = %deduction.taxable_income,
            total_tax = %total_tax,
            "Computed slab tax"
        );

        Some(TaxResult {
            regime_code: self.config.code().to_string(),
            income,
            standard_deduction: deduction.deduction,
            taxable_income: deduction.taxable_income,
            slab_breakdown,
            slab_tax: walk.tax,
            rebate: rebate.rebate,
            marginal_relief: relief.relief,
            pre_cess_tax: relief.tax_after_relief,
            cess: cess.cess,
            total_tax,
            net_income,
            effective_rate,
            steps,
        })
    }
}

/// Computes tax on `amount` under `config` with its own deduction policy.
///
/// `None` is the "no computation" state for invalid input.
pub fn compute_tax(config: &TaxRegimeConfig, amount: Decimal) -> Option<TaxResult> {
    SlabTaxCalculator::new(config).compute(amount)
}

/// Computes tax on a floating point `amount`.
///
/// NaN, infinities and non-positive values give `None`.
///
/// # Examples
///
/// ```
/// use tax_engine::calculation::compute_tax_f64;
/// use tax_engine::config::TaxRegimeConfig;
///
/// let config = TaxRegimeConfig::fy2025_26();
/// assert!(compute_tax_f64(&config, 1_500_000.0).is_some());
/// assert!(compute_tax_f64(&config, f64::NAN).is_none());
/// ```
pub fn compute_tax_f64(config: &TaxRegimeConfig, amount: f64) -> Option<TaxResult> {
    amount_from_f64(amount).and_then(|amount| compute_tax(config, amount))
}
