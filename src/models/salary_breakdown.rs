//! Salary breakdown model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::TaxResult;

/// A CTC split into earnings, deductions and take-home pay.
///
/// Every field is derived from `ctc`; the whole struct is recomputed when
/// the CTC changes. All amounts are rounded to whole rupees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryBreakdown {
    /// Code of the regime used.
    pub regime_code: String,
    /// Cost to company the breakdown was derived from.
    pub ctc: Decimal,
    /// Basic salary.
    pub basic: Decimal,
    /// House rent allowance.
    pub hra: Decimal,
    /// Dearness allowance.
    pub da: Decimal,
    /// Leave travel allowance.
    pub lta: Decimal,
    /// Performance bonus.
    pub bonus: Decimal,
    /// Balancing component; negative when the fixed components exceed the CTC.
    pub special_allowance: Decimal,
    /// Sum of all earnings.
    pub gross: Decimal,
    /// Employee provident fund contribution.
    pub pf: Decimal,
    /// Professional tax.
    pub professional_tax: Decimal,
    /// Income tax on the gross.
    pub tax: Decimal,
    /// `pf + professional_tax + tax`.
    pub total_deductions: Decimal,
    /// Annual take-home pay, never negative.
    pub net_annual: Decimal,
    /// Monthly take-home pay.
    pub net_monthly: Decimal,
    /// The tax computation behind `tax`.
    pub tax_detail: TaxResult,
}

impl SalaryBreakdown {
    /// Returns the earning components in display order with their labels.
    pub fn earnings(&self) -> [(&'static str, Decimal); 6] {
        [
            ("Basic Salary", self.basic),
            ("HRA", self.hra),
            ("DA", self.da),
            ("LTA", self.lta),
            ("Special Allowance", self.special_allowance),
            ("Performance Bonus", self.bonus),
        ]
    }

    /// Returns the deduction components in display order with their labels.
    pub fn deductions(&self) -> [(&'static str, Decimal); 3] {
        [
            ("EPF (Employee)", self.pf),
            ("Professional Tax", self.professional_tax),
            ("Income Tax", self.tax),
        ]
    }
}
