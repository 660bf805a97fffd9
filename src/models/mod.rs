//! Core data models for the tax engine.
//!
//! This module contains the result types returned by the calculators.

mod salary_breakdown;
mod tax_result;

pub use salary_breakdown::SalaryBreakdown;
pub use tax_result::{AuditStep, LineKind, SlabLineItem, TaxResult};
