//! Calculation logic for the tax engine.
//!
//! Each stage of the tax computation lives in its own module and returns a
//! result struct carrying the audit step(s) it produced: standard deduction,
//! the progressive slab walk, the Section 87A rebate with marginal relief,
//! and the health and education cess. [`SlabTaxCalculator`] chains them;
//! [`SalaryBreakdownCalculator`] builds a CTC breakdown on top.

mod cess;
mod common;
mod rebate;
mod salary_calculator;
mod slab_walk;
mod standard_deduction;
mod tax_calculator;

pub use cess::{CESS_SECTION, CessResult, apply_cess};
pub use common::{
    MAX_INPUT_AMOUNT, amount_from_f64, format_inr, format_rupees, parse_amount, round_percent,
    round_whole, validate_amount,
};
pub use rebate::{MarginalReliefResult, RebateResult, apply_marginal_relief, apply_rebate};
pub use salary_calculator::{
    SalaryBreakdownCalculator, compute_salary_breakdown, compute_salary_breakdown_f64,
};
pub use slab_walk::{SLAB_RATES_SECTION, SlabWalkResult, walk_slabs};
pub use standard_deduction::{
    STANDARD_DEDUCTION_SECTION, StandardDeductionResult, apply_standard_deduction,
};
pub use tax_calculator::{SlabTaxCalculator, compute_tax, compute_tax_f64};
