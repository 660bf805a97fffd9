//! Tax result models.
//!
//! This module contains the [`TaxResult`] type and its associated structures
//! that capture every output of a slab tax computation, including the
//! itemized slab breakdown and the step trace.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Distinguishes the deduction row from the tax band rows of a breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    /// The standard deduction row.
    Deduction,
    /// A slab row carrying tax.
    TaxBand,
}

/// A single row of the slab-wise breakdown.
///
/// # Example
///
/// ```
/// use rust_decimal::Decimal;
/// use tax_engine::models::{LineKind, SlabLineItem};
///
/// let line = SlabLineItem {
///     range_label: "4,00,001 - 8,00,000".to_string(),
///     rate: Some(Decimal::from(5)),
///     taxable_amount: Decimal::from(400_000),
///     tax_amount: Decimal::from(20_000),
///     kind: LineKind::TaxBand,
/// };
/// assert_eq!(line.rate_label(), "5%");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlabLineItem {
    /// Human-readable range ("1 - 4,00,000") or "Standard Deduction".
    pub range_label: String,
    /// Rate as a percentage, `None` for the deduction row.
    pub rate: Option<Decimal>,
    /// Amount of income falling in this row.
    pub taxable_amount: Decimal,
    /// Tax charged on this row, before rebate, relief and cess.
    pub tax_amount: Decimal,
    /// Whether this is the deduction row or a tax band.
    pub kind: LineKind,
}

impl SlabLineItem {
    /// Returns the rate as displayed ("5%"), or "-" for the deduction row.
    pub fn rate_label(&self) -> String {
        match self.rate {
            Some(rate) => format!("{}%", rate.normalize()),
            None => "-".to_string(),
        }
    }
}

/// A single step in the computation trace.
///
/// The `reasoning` field is the human-readable line shown to users; the
/// structured `input`/`output` fields carry the same values for auditing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number, starting at 1.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// Reference to the Income-tax Act section for this rule.
    pub section_ref: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the step.
    pub reasoning: String,
}

/// The complete result of a slab tax computation.
///
/// Built fresh on every call and never mutated afterwards. Deduction,
/// taxable income and slab rows are exact; `total_tax` and `net_income`
/// are rounded to whole rupees and `effective_rate` to two decimals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxResult {
    /// Code of the regime used.
    pub regime_code: String,
    /// The gross amount the computation started from.
    pub income: Decimal,
    /// Standard deduction granted.
    pub standard_deduction: Decimal,
    /// Income left after the standard deduction.
    pub taxable_income: Decimal,
    /// Deduction row followed by one row per visited slab.
    pub slab_breakdown: Vec<SlabLineItem>,
    /// Tax from the slab walk, before rebate and relief.
    pub slab_tax: Decimal,
    /// Section 87A rebate granted.
    pub rebate: Decimal,
    /// Marginal relief granted.
    pub marginal_relief: Decimal,
    /// Tax after rebate and relief, before cess.
    pub pre_cess_tax: Decimal,
    /// Cess charged on `pre_cess_tax`.
    pub cess: Decimal,
    /// Total tax payable including cess, in whole rupees.
    pub total_tax: Decimal,
    /// `income - total_tax`, in whole rupees.
    pub net_income: Decimal,
    /// Total tax as a percentage of income.
    pub effective_rate: Decimal,
    /// Ordered computation trace.
    pub steps: Vec<AuditStep>,
}

impl TaxResult {
    /// Returns the human-readable step trace, one line per step.
    pub fn step_lines(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.reasoning.as_str()).collect()
    }

    /// Returns only the tax band rows of the breakdown.
    pub fn tax_bands(&self) -> impl Iterator<Item = &SlabLineItem> {
        self.slab_breakdown
            .iter()
            .filter(|line| line.kind == LineKind::TaxBand)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn line(kind: LineKind, rate: Option<&str>) -> SlabLineItem {
        SlabLineItem {
            range_label: "x".to_string(),
            rate: rate.map(dec),
            taxable_amount: dec("100"),
            tax_amount: dec("0"),
            kind,
        }
    }

    fn step(n: u32, text: &str) -> AuditStep {
        AuditStep {
            step_number: n,
            rule_id: "rule".to_string(),
            rule_name: "Rule".to_string(),
            section_ref: "16(ia)".to_string(),
            input: serde_json::json!({}),
            output: serde_json::json!({}),
            reasoning: text.to_string(),
        }
    }

    #[test]
    fn test_rate_label_for_deduction_is_dash() {
        assert_eq!(line(LineKind::Deduction, None).rate_label(), "-");
    }

    #[test]
    fn test_rate_label_strips_trailing_zeros() {
        assert_eq!(line(LineKind::TaxBand, Some("10.00")).rate_label(), "10%");
        assert_eq!(line(LineKind::TaxBand, Some("0")).rate_label(), "0%");
    }

    #[test]
    fn test_line_kind_serializes_snake_case() {
        let json = serde_json::to_string(&LineKind::TaxBand).unwrap();
        assert_eq!(json, "\"tax_band\"");
    }

    #[test]
    fn test_step_lines_and_tax_bands() {
        let result = TaxResult {
            regime_code: "FY2025-26".to_string(),
            income: dec("100"),
            standard_deduction: dec("0"),
            taxable_income: dec("100"),
            slab_breakdown: vec![
                line(LineKind::Deduction, None),
                line(LineKind::TaxBand, Some("0")),
            ],
            slab_tax: dec("0"),
            rebate: dec("0"),
            marginal_relief: dec("0"),
            pre_cess_tax: dec("0"),
            cess: dec("0"),
            total_tax: dec("0"),
            net_income: dec("100"),
            effective_rate: dec("0"),
            steps: vec![step(1, "first"), step(2, "second")],
        };

        assert_eq!(result.step_lines(), vec!["first", "second"]);
        assert_eq!(result.tax_bands().count(), 1);
    }
}
