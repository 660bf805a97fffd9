//! Health and education cess.
//!
//! The cess is a flat surcharge on the tax left after rebate and relief.

use rust_decimal::Decimal;

use crate::config::CessConfig;
use crate::models::AuditStep;

use super::common::{format_rupees, round_whole};

/// The section reference for the cess.
pub const CESS_SECTION: &str = "Finance Act, s.2(11)";

/// The result of applying the cess.
#[derive(Debug, Clone)]
pub struct CessResult {
    /// Cess charged, exact.
    pub cess: Decimal,
    /// `tax + cess`, exact.
    pub tax_with_cess: Decimal,
    /// The audit step recording the cess.
    pub audit_step: AuditStep,
}

/// Applies the cess to the post-rebate, post-relief tax.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use tax_engine::calculation::apply_cess;
/// use tax_engine::config::TaxRegimeConfig;
///
/// let config = TaxRegimeConfig::fy2025_26();
/// let result = apply_cess(Decimal::from(93_750), &config.cess, 7);
///
/// assert_eq!(result.cess, Decimal::from(3_750));
/// assert_eq!(result.tax_with_cess, Decimal::from(97_500));
/// ```
pub fn apply_cess(tax: Decimal, cess: &CessConfig, step_number: u32) -> CessResult {
    let charged = tax * cess.rate;
    let tax_with_cess = tax + charged;
    let percent = (cess.rate * Decimal::ONE_HUNDRED).normalize();

    let audit_step = AuditStep {
        step_number,
        rule_id: "cess".to_string(),
        rule_name: cess.label.clone(),
        section_ref: CESS_SECTION.to_string(),
        input: serde_json::json!({
            "tax": tax.normalize().to_string(),
            "rate": cess.rate.normalize().to_string()
        }),
        output: serde_json::json!({
            "cess": charged.normalize().to_string(),
            "total_tax": round_whole(tax_with_cess).to_string()
        }),
        reasoning: format!(
            "{}% {} applied → Total Tax Payable: {}",
            percent,
            cess.label,
            format_rupees(tax_with_cess)
        ),
    };

    CessResult {
        cess: charged,
        tax_with_cess,
        audit_step,
    }
}
