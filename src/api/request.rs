//! Request types for the tax engine API.
//!
//! Amounts are accepted as JSON strings (`"1500000"`) or numbers; strings
//! are preferred since they keep fractional rupees exact.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::DeductionPolicy;

/// Request body for `POST /tax` and `POST /tax/export`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxRequest {
    /// Gross annual income.
    pub amount: Decimal,
    /// Regime code (e.g. "FY2025-26"). Defaults to the regime in force today.
    #[serde(default)]
    pub regime: Option<String>,
    /// Overrides the regime's standard deduction policy.
    #[serde(default)]
    pub deduction_policy: Option<DeductionPolicy>,
}

/// Request body for `POST /salary` and `POST /salary/export`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalaryRequest {
    /// Annual cost to company.
    pub ctc: Decimal,
    /// Regime code. Defaults to the regime in force today.
    #[serde(default)]
    pub regime: Option<String>,
}
