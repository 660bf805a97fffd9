use std::io;
use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use tax_engine::api::{AppState, create_router};
use tax_engine::calculation::{
    SalaryBreakdownCalculator, SlabTaxCalculator, format_rupees, parse_amount,
};
use tax_engine::config::{ConfigLoader, DeductionPolicy, TaxRegimeConfig};
use tax_engine::export::{salary_export_rows, tax_export_rows, write_csv};
use tax_engine::models::{SalaryBreakdown, TaxResult};

/// Income tax and salary breakdown calculator (Indian new tax regime).
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    /// Directory holding the regime YAML files.
    #[arg(long, global = true, env = "TAX_ENGINE_CONFIG", default_value = "config/regimes")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compute income tax on an annual income.
    Tax {
        /// Gross annual income, digits only (commas allowed).
        amount: String,
        /// Regime code, e.g. FY2025-26. Defaults to the regime in force today.
        #[arg(long)]
        regime: Option<String>,
        /// Grant the standard deduction only on income above this floor.
        #[arg(long)]
        deduction_floor: Option<Decimal>,
        /// Print CSV rows instead of the report.
        #[arg(long)]
        csv: bool,
    },
    /// Break a CTC down into salary components and take-home pay.
    Salary {
        /// Annual cost to company, digits only (commas allowed).
        ctc: String,
        /// Regime code. Defaults to the regime in force today.
        #[arg(long)]
        regime: Option<String>,
        /// Print CSV rows instead of the report.
        #[arg(long)]
        csv: bool,
    },
    /// Run the HTTP API.
    Serve {
        /// Address to listen on.
        #[arg(long, default_value = "127.0.0.1:3000")]
        addr: SocketAddr,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let loader = ConfigLoader::load(&cli.config)
        .with_context(|| format!("loading regimes from {}", cli.config.display()))?;
    debug!(regimes = loader.regimes().len(), "Loaded regime configuration");

    match cli.command {
        Command::Tax {
            amount,
            regime,
            deduction_floor,
            csv,
        } => {
            let state = AppState::new(loader);
            let config = state.regime(regime.as_deref())?;
            let result = run_tax(config, &amount, deduction_floor)?;
            if csv {
                write_csv(tax_export_rows(&result), io::stdout())?;
            } else {
                print_tax(config, &result);
            }
        }
        Command::Salary { ctc, regime, csv } => {
            let state = AppState::new(loader);
            let config = state.regime(regime.as_deref())?;
            let breakdown = run_salary(config, &ctc)?;
            if csv {
                write_csv(salary_export_rows(&breakdown), io::stdout())?;
            } else {
                print_salary(config, &breakdown);
            }
        }
        Command::Serve { addr } => {
            let router = create_router(AppState::new(loader));
            let listener = tokio::net::TcpListener::bind(addr)
                .await
                .with_context(|| format!("binding {}", addr))?;
            info!(%addr, "Tax engine API listening");
            axum::serve(listener, router).await?;
        }
    }

    Ok(())
}

fn run_tax(
    config: &TaxRegimeConfig,
    amount: &str,
    deduction_floor: Option<Decimal>,
) -> anyhow::Result<TaxResult> {
    let mut calculator = SlabTaxCalculator::new(config);
    if let Some(floor) = deduction_floor {
        let policy = DeductionPolicy::Capped {
            cap: config.standard_deduction.cap(),
            floor,
        };
        policy.validate()?;
        calculator = calculator.with_policy(policy);
    }

    match parse_amount(amount).and_then(|income| calculator.compute(income)) {
        Some(result) => Ok(result),
        None => bail!("no computation: '{}' is not a valid income", amount),
    }
}

fn run_salary(config: &TaxRegimeConfig, ctc: &str) -> anyhow::Result<SalaryBreakdown> {
    match parse_amount(ctc).and_then(|ctc| SalaryBreakdownCalculator::new(config).compute(ctc)) {
        Some(breakdown) => Ok(breakdown),
        None => bail!("no computation: '{}' is not a valid CTC", ctc),
    }
}

fn print_tax(config: &TaxRegimeConfig, result: &TaxResult) {
    println!("{}", config.metadata.name);
    println!();
    println!("Total Tax Payable: {}", format_rupees(result.total_tax));
    println!("Net Income:        {}", format_rupees(result.net_income));
    println!("Effective Rate:    {}%", result.effective_rate);
    println!();

    println!("Steps:");
    for line in result.step_lines() {
        println!("  {}", line);
    }
    println!();

    println!("{:<28} {:>6} {:>16} {:>12}", "Slab", "Rate", "Taxable", "Tax");
    for line in &result.slab_breakdown {
        println!(
            "{:<28} {:>6} {:>16} {:>12}",
            line.range_label,
            line.rate_label(),
            format_rupees(line.taxable_amount),
            format_rupees(line.tax_amount)
        );
    }
}

fn print_salary(config: &TaxRegimeConfig, breakdown: &SalaryBreakdown) {
    println!("{} (CTC {})", config.metadata.name, format_rupees(breakdown.ctc));
    println!();

    println!("Earnings:");
    for (label, amount) in breakdown.earnings() {
        println!("  {:<20} {:>14}", label, format_rupees(amount));
    }
    println!("  {:<20} {:>14}", "Gross Salary", format_rupees(breakdown.gross));
    println!();

    println!("Deductions:");
    for (label, amount) in breakdown.deductions() {
        println!("  {:<20} {:>14}", label, format_rupees(amount));
    }
    println!(
        "  {:<20} {:>14}",
        "Total Deductions",
        format_rupees(breakdown.total_deductions)
    );
    println!();

    println!("Net Annual Salary:  {}", format_rupees(breakdown.net_annual));
    println!("Net Monthly Salary: {}", format_rupees(breakdown.net_monthly));
}
