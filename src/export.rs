//! Tabular export of tax and salary results.
//!
//! Rows are built in a fixed order and written with the `csv` crate. The
//! header row comes from the serialized field names.

use std::io::Write;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{SalaryBreakdown, TaxResult};

/// One row of a tax export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxExportRow {
    /// Row label.
    #[serde(rename = "Component")]
    pub component: String,
    /// Amount taxed in the row, empty for the totals.
    #[serde(rename = "Taxable")]
    pub taxable: Option<Decimal>,
    /// Tax charged in the row. The "Net Income" row carries net income here.
    #[serde(rename = "Tax")]
    pub tax: Decimal,
}

/// One row of a salary export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryExportRow {
    /// Row label.
    #[serde(rename = "Component")]
    pub component: String,
    /// Annual amount, or the monthly amount for the last row.
    #[serde(rename = "Amount")]
    pub amount: Decimal,
}

/// Builds the tax export rows.
///
/// Order: the standard deduction, each tax band in ascending order, the total
/// tax payable and the net income.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use tax_engine::compute_tax;
/// use tax_engine::config::TaxRegimeConfig;
/// use tax_engine::export::tax_export_rows;
///
/// let result = compute_tax(&TaxRegimeConfig::fy2025_26(), Decimal::from(1_000_000)).unwrap();
/// let rows = tax_export_rows(&result);
///
/// assert_eq!(rows.first().unwrap().component, "Standard Deduction");
/// assert_eq!(rows.last().unwrap().component, "Net Income");
/// ```
pub fn tax_export_rows(result: &TaxResult) -> Vec<TaxExportRow> {
    let mut rows = vec![TaxExportRow {
        component: "Standard Deduction".to_string(),
        taxable: Some(result.standard_deduction.normalize()),
        tax: Decimal::ZERO,
    }];

    rows.extend(result.tax_bands().map(|line| TaxExportRow {
        component: format!("Slab {}", line.range_label),
        taxable: Some(line.taxable_amount.normalize()),
        tax: line.tax_amount.normalize(),
    }));

    rows.push(TaxExportRow {
        component: "Total Tax Payable (incl. Cess)".to_string(),
        taxable: None,
        tax: result.total_tax,
    });
    rows.push(TaxExportRow {
        component: "Net Income".to_string(),
        taxable: None,
        tax: result.net_income,
    });
    rows
}

/// Builds the salary export rows: earnings, gross, deductions, then net pay.
pub fn salary_export_rows(breakdown: &SalaryBreakdown) -> Vec<SalaryExportRow> {
    breakdown
        .earnings()
        .into_iter()
        .chain([("Gross Salary", breakdown.gross)])
        .chain(breakdown.deductions())
        .chain([
            ("Total Deductions", breakdown.total_deductions),
            ("Net Annual Salary", breakdown.net_annual),
            ("Net Monthly Salary", breakdown.net_monthly),
        ])
        .map(|(component, amount)| SalaryExportRow {
            component: component.to_string(),
            amount,
        })
        .collect()
}

/// Writes rows as CSV, header first.
pub fn write_csv<I, R, W>(rows: I, writer: W) -> EngineResult<()>
where
    I: IntoIterator<Item = R>,
    R: Serialize,
    W: Write,
{
    let mut wtr = csv::Writer::from_writer(writer);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush().map_err(|e| EngineError::ExportError {
        message: e.to_string(),
    })?;
    Ok(())
}

/// Renders rows as a CSV string.
pub fn to_csv_string<I, R>(rows: I) -> EngineResult<String>
where
    I: IntoIterator<Item = R>,
    R: Serialize,
{
    let mut buffer = Vec::new();
    write_csv(rows, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| EngineError::ExportError {
        message: e.to_string(),
    })
}
