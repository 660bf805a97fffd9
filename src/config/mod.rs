//! Configuration loading and management for the tax engine.
//!
//! A tax regime bundles every constant the engine needs: the slab table,
//! the standard deduction policy, the rebate and marginal relief limits,
//! the cess rate, the salary structure and the professional tax rule.
//! Regimes are loaded from YAML files, or built in code with
//! [`TaxRegimeConfig::fy2025_26`].
//!
//! # Example
//!
//! ```no_run
//! use tax_engine::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/regimes").unwrap();
//! println!("Latest regime: {}", loader.latest().unwrap().metadata.name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    CessConfig, DeductionPolicy, MarginalReliefConfig, ProfessionalTaxConfig, RebateConfig,
    RegimeMetadata, SalaryStructure, TaxRegimeConfig, TaxSlab,
};
