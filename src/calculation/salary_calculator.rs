//! Salary breakdown calculation.
//!
//! [`SalaryBreakdownCalculator`] splits a CTC into its earning components
//! using the regime's fixed percentages, taxes the gross through
//! [`SlabTaxCalculator`], and subtracts the statutory deductions.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::TaxRegimeConfig;
use crate::models::SalaryBreakdown;

use super::common::{amount_from_f64, round_whole, validate_amount};
use super::tax_calculator::SlabTaxCalculator;

const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// Derives take-home pay from a CTC.
///
/// Derivation order:
/// - `basic = basic_of_ctc × ctc`
/// - `hra`, `da`, `lta` as fractions of basic
/// - `bonus = bonus_of_ctc × ctc`
/// - `special_allowance = ctc − (basic + hra + da + lta + bonus)`
/// - `gross` = sum of all earnings (equals the CTC)
/// - `pf = pf_of_basic × basic`; professional tax when `ctc > threshold`
/// - `tax` = total tax on the gross
/// - `net_annual = max(0, gross − deductions)`, `net_monthly = net_annual / 12`
///
/// All arithmetic is exact; every field is rounded to whole rupees on output.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use tax_engine::calculation::SalaryBreakdownCalculator;
/// use tax_engine::config::TaxRegimeConfig;
///
/// let config = TaxRegimeConfig::fy2025_26();
/// let breakdown = SalaryBreakdownCalculator::new(&config)
///     .compute(Decimal::from(1_200_000))
///     .unwrap();
///
/// assert_eq!(breakdown.basic, Decimal::from(480_000));
/// assert_eq!(breakdown.special_allowance, Decimal::from(288_000));
/// assert_eq!(breakdown.net_annual, Decimal::from(1_140_000));
/// assert_eq!(breakdown.net_monthly, Decimal::from(95_000));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SalaryBreakdownCalculator<'a> {
    config: &'a TaxRegimeConfig,
}

impl<'a> SalaryBreakdownCalculator<'a> {
    /// Creates a calculator for the given regime.
    pub fn new(config: &'a TaxRegimeConfig) -> Self {
        Self { config }
    }

    /// Computes the breakdown for `ctc`.
    ///
    /// Returns `None` when the CTC is not strictly positive or exceeds
    /// [`MAX_INPUT_AMOUNT`](super::MAX_INPUT_AMOUNT).
    pub fn compute(&self, ctc: Decimal) -> Option<SalaryBreakdown> {
        let Some(ctc) = validate_amount(ctc) else {
            debug!(ctc = %ctc, "Rejected salary input");
            return None;
        };

        let structure = &self.config.salary;
        let basic = ctc * structure.basic_of_ctc;
        let hra = basic * structure.hra_of_basic;
        let da = basic * structure.da_of_basic;
        let lta = basic * structure.lta_of_basic;
        let bonus = ctc * structure.bonus_of_ctc;
        let special_allowance = ctc - (basic + hra + da + lta + bonus);
        let gross = basic + hra + da + lta + special_allowance + bonus;

        let pf = basic * structure.pf_of_basic;
        let professional_tax = if ctc > self.config.professional_tax.threshold {
            self.config.professional_tax.annual_amount
        } else {
            Decimal::ZERO
        };

        // The gross equals the CTC, so it always passes validation.
        let tax_detail = SlabTaxCalculator::new(self.config).compute(gross)?;
        let tax = tax_detail.total_tax;

        let total_deductions = pf + professional_tax + tax;
        let net_annual = (gross - total_deductions).max(Decimal::ZERO);
        let net_monthly = net_annual / MONTHS_PER_YEAR;

        if special_allowance < Decimal::ZERO {
            debug!(
                ctc = %ctc,
                special_allowance = %special_allowance,
                "Fixed salary components exceed CTC"
            );
        }

        debug!(
            regime = %self.config.code(),
            ctc = %ctc,
            gross = %gross,
            tax = %tax,
            net_annual = %net_annual,
            "Computed salary breakdown"
        );

        Some(SalaryBreakdown {
            regime_code: self.config.code().to_string(),
            ctc,
            basic: round_whole(basic),
            hra: round_whole(hra),
            da: round_whole(da),
            lta: round_whole(lta),
            bonus: round_whole(bonus),
            special_allowance: round_whole(special_allowance),
            gross: round_whole(gross),
            pf: round_whole(pf),
            professional_tax: round_whole(professional_tax),
            tax,
            total_deductions: round_whole(total_deductions),
            net_annual: round_whole(net_annual),
            net_monthly: round_whole(net_monthly),
            tax_detail,
        })
    }
}

/// Computes the salary breakdown for `ctc` under `config`.
///
/// `None` is the "no computation" state for invalid input.
pub fn compute_salary_breakdown(config: &TaxRegimeConfig, ctc: Decimal) -> Option<SalaryBreakdown> {
    SalaryBreakdownCalculator::new(config).compute(ctc)
}

/// Computes the salary breakdown for a floating point `ctc`.
///
/// NaN, infinities and non-positive values give `None`.
pub fn compute_salary_breakdown_f64(config: &TaxRegimeConfig, ctc: f64) -> Option<SalaryBreakdown> {
    amount_from_f64(ctc).and_then(|ctc| compute_salary_breakdown(config, ctc))
}
