//! Configuration types for tax regimes.
//!
//! This module contains the strongly-typed regime structures that are
//! deserialized from YAML files, plus the built-in FY 2025-26 regime.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Metadata identifying a regime version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegimeMetadata {
    /// Short regime code (e.g., "FY2025-26").
    pub code: String,
    /// Human-readable name of the regime.
    pub name: String,
    /// The financial year label (e.g., "2025-26").
    pub financial_year: String,
    /// First day the regime applies.
    pub effective_from: NaiveDate,
    /// Last day the regime applies, if it has been superseded.
    #[serde(default)]
    pub effective_to: Option<NaiveDate>,
    /// Where the rates were taken from.
    #[serde(default)]
    pub source_url: String,
}

/// A single income band taxed at one marginal rate.
///
/// Slabs are kept in ascending order; each slab covers the income between
/// the previous slab's upper bound and its own. `upper_bound: None` marks the
/// final, unbounded slab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxSlab {
    /// Upper bound of the band, or `None` for the unbounded top band.
    #[serde(default)]
    pub upper_bound: Option<Decimal>,
    /// Marginal rate as a fraction (0.05 = 5%).
    pub rate: Decimal,
}

impl TaxSlab {
    /// Creates a bounded slab.
    pub fn bounded(upper_bound: Decimal, rate: Decimal) -> Self {
        Self {
            upper_bound: Some(upper_bound),
            rate,
        }
    }

    /// Creates the unbounded top slab.
    pub fn unbounded(rate: Decimal) -> Self {
        Self {
            upper_bound: None,
            rate,
        }
    }
}

/// How the standard deduction is derived from the gross amount.
///
/// # Example
///
/// ```
/// use rust_decimal::Decimal;
/// use tax_engine::config::DeductionPolicy;
///
/// let fixed = DeductionPolicy::Fixed { amount: Decimal::from(75_000) };
/// assert_eq!(fixed.deduction_for(Decimal::from(1_000_000)), Decimal::from(75_000));
///
/// let capped = DeductionPolicy::Capped {
///     cap: Decimal::from(75_000),
///     floor: Decimal::from(300_000),
/// };
/// assert_eq!(capped.deduction_for(Decimal::from(340_000)), Decimal::from(40_000));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum DeductionPolicy {
    /// A flat amount, never more than the income itself.
    Fixed {
        /// The deduction amount.
        amount: Decimal,
    },
    /// The income above `floor`, limited to `cap` and never negative.
    Capped {
        /// Maximum deduction.
        cap: Decimal,
        /// Income below which no deduction is granted.
        floor: Decimal,
    },
}

impl DeductionPolicy {
    /// Returns the deduction granted on `income`.
    pub fn deduction_for(&self, income: Decimal) -> Decimal {
        match *self {
            DeductionPolicy::Fixed { amount } => amount.min(income).max(Decimal::ZERO),
            DeductionPolicy::Capped { cap, floor } => {
                (income - floor).min(cap).max(Decimal::ZERO)
            }
        }
    }

    /// Returns the largest deduction this policy can grant.
    pub fn cap(&self) -> Decimal {
        match *self {
            DeductionPolicy::Fixed { amount } => amount,
            DeductionPolicy::Capped { cap, .. } => cap,
        }
    }

    /// Checks that the policy's amounts are non-negative.
    pub fn validate(&self) -> EngineResult<()> {
        non_negative("standard_deduction", self.cap())?;
        if let DeductionPolicy::Capped { floor, .. } = *self {
            non_negative("standard_deduction.floor", floor)?;
        }
        Ok(())
    }

    /// Short identifier used in audit steps.
    pub fn name(&self) -> &'static str {
        match self {
            DeductionPolicy::Fixed { .. } => "fixed",
            DeductionPolicy::Capped { .. } => "capped",
        }
    }
}

/// Rebate configuration (Section 87A).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RebateConfig {
    /// Taxable income at or below which the rebate applies.
    pub income_threshold: Decimal,
    /// Maximum rebate amount.
    pub cap: Decimal,
    /// Statutory section reference.
    #[serde(default = "default_rebate_section")]
    pub section: String,
}

fn default_rebate_section() -> String {
    "87A".to_string()
}

/// Marginal relief configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarginalReliefConfig {
    /// Taxable income up to which relief over the rebate threshold applies.
    pub ceiling: Decimal,
}

/// Cess configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CessConfig {
    /// Cess rate as a fraction of the computed tax (0.04 = 4%).
    pub rate: Decimal,
    /// Display label for the cess.
    #[serde(default = "default_cess_label")]
    pub label: String,
}

fn default_cess_label() -> String {
    "Health & Education Cess".to_string()
}

/// Fixed-percentage salary structure used to split a CTC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryStructure {
    /// Basic salary as a fraction of CTC.
    pub basic_of_ctc: Decimal,
    /// House rent allowance as a fraction of basic.
    pub hra_of_basic: Decimal,
    /// Dearness allowance as a fraction of basic.
    pub da_of_basic: Decimal,
    /// Leave travel allowance as a fraction of basic.
    pub lta_of_basic: Decimal,
    /// Performance bonus as a fraction of CTC.
    pub bonus_of_ctc: Decimal,
    /// Employee provident fund contribution as a fraction of basic.
    pub pf_of_basic: Decimal,
}

/// Professional tax rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfessionalTaxConfig {
    /// CTC above which professional tax is charged.
    pub threshold: Decimal,
    /// Flat annual amount charged above the threshold.
    pub annual_amount: Decimal,
}

/// A complete, versioned tax regime.
///
/// Constructed once (from YAML or [`TaxRegimeConfig::fy2025_26`]) and passed
/// by reference into both calculators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRegimeConfig {
    /// Regime metadata.
    pub metadata: RegimeMetadata,
    /// Ordered slab table.
    pub slabs: Vec<TaxSlab>,
    /// Standard deduction policy.
    pub standard_deduction: DeductionPolicy,
    /// Section 87A rebate.
    pub rebate: RebateConfig,
    /// Marginal relief above the rebate threshold.
    pub marginal_relief: MarginalReliefConfig,
    /// Cess applied on the final tax.
    pub cess: CessConfig,
    /// CTC split percentages.
    pub salary: SalaryStructure,
    /// Professional tax rule.
    pub professional_tax: ProfessionalTaxConfig,
}

impl TaxRegimeConfig {
    /// The new tax regime for FY 2025-26 (AY 2026-27).
    pub fn fy2025_26() -> Self {
        let lakh = |n: i64| Decimal::from(n * 100_000);
        let pct = |n: i64| Decimal::new(n, 2);

        Self {
            metadata: RegimeMetadata {
                code: "FY2025-26".to_string(),
                name: "New Tax Regime (Section 115BAC)".to_string(),
                financial_year: "2025-26".to_string(),
                effective_from: NaiveDate::from_ymd_opt(2025, 4, 1).expect("valid calendar date"),
                effective_to: NaiveDate::from_ymd_opt(2026, 3, 31),
                source_url: "https://incometaxindia.gov.in".to_string(),
            },
            slabs: vec![
                TaxSlab::bounded(lakh(4), pct(0)),
                TaxSlab::bounded(lakh(8), pct(5)),
                TaxSlab::bounded(lakh(12), pct(10)),
                TaxSlab::bounded(lakh(16), pct(15)),
                TaxSlab::bounded(lakh(20), pct(20)),
                TaxSlab::bounded(lakh(24), pct(25)),
                TaxSlab::unbounded(pct(30)),
            ],
            standard_deduction: DeductionPolicy::Fixed {
                amount: Decimal::from(75_000),
            },
            rebate: RebateConfig {
                income_threshold: lakh(12),
                cap: Decimal::from(60_000),
                section: default_rebate_section(),
            },
            marginal_relief: MarginalReliefConfig {
                ceiling: Decimal::from(1_275_000),
            },
            cess: CessConfig {
                rate: pct(4),
                label: default_cess_label(),
            },
            salary: SalaryStructure {
                basic_of_ctc: pct(40),
                hra_of_basic: pct(50),
                da_of_basic: pct(10),
                lta_of_basic: pct(5),
                bonus_of_ctc: pct(10),
                pf_of_basic: pct(12),
            },
            professional_tax: ProfessionalTaxConfig {
                threshold: Decimal::from(5_000),
                annual_amount: Decimal::from(2_400),
            },
        }
    }

    /// Returns the regime code.
    pub fn code(&self) -> &str {
        &self.metadata.code
    }

    /// Returns true if the regime is in force on `date`.
    pub fn is_effective_on(&self, date: NaiveDate) -> bool {
        self.metadata.effective_from <= date
            && self.metadata.effective_to.is_none_or(|to| date <= to)
    }

    /// Checks the slab table and the other regime invariants.
    pub fn validate(&self) -> EngineResult<()> {
        self.validate_slabs()?;

        self.standard_deduction.validate()?;
        non_negative("rebate.income_threshold", self.rebate.income_threshold)?;
        non_negative("rebate.cap", self.rebate.cap)?;
        fraction("cess.rate", self.cess.rate)?;

        if self.marginal_relief.ceiling < self.rebate.income_threshold {
            return Err(invalid(
                "marginal_relief.ceiling",
                "must not be below rebate.income_threshold",
            ));
        }

        let salary = &self.salary;
        fraction("salary.basic_of_ctc", salary.basic_of_ctc)?;
        fraction("salary.hra_of_basic", salary.hra_of_basic)?;
        fraction("salary.da_of_basic", salary.da_of_basic)?;
        fraction("salary.lta_of_basic", salary.lta_of_basic)?;
        fraction("salary.bonus_of_ctc", salary.bonus_of_ctc)?;
        fraction("salary.pf_of_basic", salary.pf_of_basic)?;
        non_negative("professional_tax.threshold", self.professional_tax.threshold)?;
        non_negative(
            "professional_tax.annual_amount",
            self.professional_tax.annual_amount,
        )?;

        if let Some(to) = self.metadata.effective_to {
            if to < self.metadata.effective_from {
                return Err(invalid(
                    "metadata.effective_to",
                    "must not be before effective_from",
                ));
            }
        }

        Ok(())
    }

    fn validate_slabs(&self) -> EngineResult<()> {
        let Some((last, bounded)) = self.slabs.split_last() else {
            return Err(invalid("slabs", "slab table is empty"));
        };

        if last.upper_bound.is_some() {
            return Err(invalid("slabs", "final slab must be unbounded"));
        }

        let mut previous_bound = Decimal::ZERO;
        let mut previous_rate = Decimal::ZERO;
        for (index, slab) in self.slabs.iter().enumerate() {
            fraction(&format!("slabs[{index}].rate"), slab.rate)?;
            if slab.rate < previous_rate {
                return Err(invalid(
                    &format!("slabs[{index}].rate"),
                    "rates must be non-decreasing",
                ));
            }
            previous_rate = slab.rate;

            if index < bounded.len() {
                let Some(bound) = slab.upper_bound else {
                    return Err(invalid(
                        &format!("slabs[{index}].upper_bound"),
                        "only the final slab may be unbounded",
                    ));
                };
                if bound <= previous_bound {
                    return Err(invalid(
                        &format!("slabs[{index}].upper_bound"),
                        "upper bounds must be strictly ascending and positive",
                    ));
                }
                previous_bound = bound;
            }
        }

        Ok(())
    }
}

fn invalid(field: &str, message: &str) -> EngineError {
    EngineError::InvalidConfig {
        field: field.to_string(),
        message: message.to_string(),
    }
}

fn non_negative(field: &str, value: Decimal) -> EngineResult<()> {
    if value < Decimal::ZERO {
        return Err(invalid(field, "must not be negative"));
    }
    Ok(())
}

fn fraction(field: &str, value: Decimal) -> EngineResult<()> {
    non_negative(field, value)?;
    if value > Decimal::ONE {
        return Err(invalid(field, "must be a fraction between 0 and 1"));
    }
    Ok(())
}
