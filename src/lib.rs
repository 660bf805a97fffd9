//! Income tax and salary breakdown engine for the Indian new tax regime
//!
//! This crate computes income tax on an annual income by walking a
//! progressive slab table (standard deduction, Section 87A rebate, marginal
//! relief, health and education cess), and derives take-home pay from a
//! cost-to-company figure. Regime values are loaded from versioned YAML files.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod export;
pub mod models;

pub use calculation::{
    compute_salary_breakdown, compute_salary_breakdown_f64, compute_tax, compute_tax_f64,
};
