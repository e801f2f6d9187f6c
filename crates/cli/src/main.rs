//! Command Line Interface for the HODL versus LP backtester.
use amm_lp_data::{CsvPriceSource, PriceSource};
use amm_lp_simulation::prelude::*;
use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use dotenv::dotenv;
use prettytable::{Table, row};
use rust_decimal::Decimal;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "amm-lp")]
#[command(
    about = "Compare holding two assets against providing constant-product liquidity",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Value HODL and LP strategies over one price series
    Simulate {
        /// CSV file with a `date` (or `timestamp`) and a `price` column
        #[arg(short, long)]
        data: PathBuf,

        #[command(flatten)]
        run: RunArgs,

        /// Number of trailing rows to print
        #[arg(long, default_value_t = 10)]
        rows: usize,
    },
    /// Run independent simulations over several price series
    Compare {
        /// CSV files, one per asset
        #[arg(short, long, required = true, num_args = 1..)]
        data: Vec<PathBuf>,

        #[command(flatten)]
        run: RunArgs,
    },
}

#[derive(Args, Clone)]
struct RunArgs {
    /// Initial investment in the quote asset
    #[arg(long, env = "AMM_LP_INVESTMENT", default_value = "10000")]
    investment: Decimal,

    /// Fee tier as a fraction of traded value (0.003 = 0.3%)
    #[arg(long, env = "AMM_LP_FEE_TIER", default_value = "0.003")]
    fee_tier: Decimal,

    /// Daily volume as a fraction of pool liquidity
    #[arg(long, env = "AMM_LP_DAILY_VOLUME", default_value = "0.10")]
    daily_volume: Decimal,

    /// Scale each row's volume by the time elapsed since the previous row
    #[arg(long)]
    elapsed: bool,

    /// Print JSON instead of tables
    #[arg(long)]
    json: bool,
}

impl RunArgs {
    fn params(&self) -> SimulationParameters {
        let params = SimulationParameters::new(self.investment, self.fee_tier, self.daily_volume);
        if self.elapsed {
            params.with_fee_accrual(FeeAccrual::daily())
        } else {
            params
        }
    }
}

#[derive(Serialize)]
struct SimulationReport<'a> {
    summary: &'a SimulationSummary,
    series: &'a ResultSeries,
}

#[derive(Serialize)]
struct ComparisonEntry {
    data: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<SimulationSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Simulate { data, run, rows } => {
            let params = run.params();
            let (series, summary) = simulate_file(data, &params)?;

            if run.json {
                let report = SimulationReport {
                    summary: &summary,
                    series: &series,
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_summary(&summary);
                print_rows(&series, *rows);
            }
        }
        Commands::Compare { data, run } => {
            let params = run.params();
            let entries: Vec<ComparisonEntry> = data
                .iter()
                .map(|path| match simulate_file(path, &params) {
                    Ok((_, summary)) => ComparisonEntry {
                        data: path.clone(),
                        summary: Some(summary),
                        error: None,
                    },
                    Err(e) => {
                        error!(
                            path = %path.display(),
                            error = %format!("{e:#}"),
                            "Simulation failed"
                        );
                        ComparisonEntry {
                            data: path.clone(),
                            summary: None,
                            error: Some(format!("{e:#}")),
                        }
                    }
                })
                .collect();

            if run.json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                print_comparison(&entries);
            }

            let failed = entries.iter().filter(|e| e.error.is_some()).count();
            if failed > 0 {
                bail!("{failed} of {} simulations failed", entries.len());
            }
        }
    }

    Ok(())
}

/// Loads `path` and runs one valuation over it.
fn simulate_file(
    path: &Path,
    params: &SimulationParameters,
) -> Result<(ResultSeries, SimulationSummary)> {
    let prices = CsvPriceSource::new(path)
        .load()
        .with_context(|| format!("loading price series from {}", path.display()))?;

    info!(path = %path.display(), rows = prices.len(), "Simulating");

    let series = ValuationEngine::new()
        .run(&prices, params)
        .with_context(|| format!("valuing price series from {}", path.display()))?;
    let summary = series.summary()?;

    Ok((series, summary))
}

fn usd(value: Decimal) -> String {
    format!("${value:.2}")
}

fn pct(fraction: Decimal) -> String {
    format!("{:.2}%", fraction * Decimal::ONE_HUNDRED)
}

fn opt_pct(fraction: Option<Decimal>) -> String {
    fraction.map_or_else(|| "n/a".to_string(), pct)
}

fn print_summary(summary: &SimulationSummary) {
    println!("\n📊 Simulation Results");

    let mut table = Table::new();
    table.add_row(row!["Metric", "Value"]);
    table.add_row(row!["Initial Investment", usd(summary.initial_investment)]);
    table.add_row(row![
        "Price",
        format!("{:.4} -> {:.4}", summary.entry_price, summary.final_price)
    ]);
    table.add_row(row![
        "Period",
        format!("{} rows over {:.1} days", summary.total_rows, summary.elapsed_days)
    ]);
    table.add_row(row![
        "Final HODL Value",
        format!("{} (P&L {})", usd(summary.final_hodl_value), pct(summary.hodl_pnl_pct))
    ]);
    table.add_row(row![
        "Final LP Value",
        format!("{} (P&L {})", usd(summary.final_lp_value), pct(summary.lp_pnl_pct))
    ]);
    table.add_row(row!["Total Fees Earned", usd(summary.total_fees)]);
    table.add_row(row![
        "Impermanent Loss",
        format!(
            "{} ({})",
            usd(summary.final_impermanent_loss),
            pct(summary.final_impermanent_loss_pct)
        )
    ]);
    table.add_row(row!["Worst Impermanent Loss", usd(summary.max_impermanent_loss)]);
    table.add_row(row![
        "LP vs HODL",
        format!("{} ({})", usd(summary.lp_vs_hodl), pct(summary.lp_vs_hodl_pct))
    ]);
    table.add_row(row!["Fee APR", opt_pct(summary.fee_apr)]);
    table.add_row(row!["Annualized Volatility", opt_pct(summary.annualized_volatility)]);
    table.printstd();

    if summary.lp_outperformed() {
        println!("✅ Fees outweighed impermanent loss over the period.");
    } else {
        println!("❌ Holding beat providing liquidity over the period.");
    }
}

fn print_rows(series: &ResultSeries, count: usize) {
    if count == 0 {
        return;
    }

    let skip = series.len().saturating_sub(count);
    let mut table = Table::new();
    table.add_row(row![
        "Date",
        "Price",
        "HODL",
        "LP (no fees)",
        "Impermanent Loss",
        "Fees Earned",
        "LP Total"
    ]);
    for r in series.iter().skip(skip) {
        table.add_row(row![
            r.timestamp.format("%Y-%m-%d %H:%M"),
            format!("{:.4}", r.price),
            usd(r.hodl_value),
            usd(r.lp_value_no_fees),
            usd(r.impermanent_loss),
            usd(r.fees_earned),
            usd(r.total_lp_value)
        ]);
    }

    println!("\n🧾 Last {} of {} rows", series.len() - skip, series.len());
    table.printstd();
}

fn print_comparison(entries: &[ComparisonEntry]) {
    let mut table = Table::new();
    table.add_row(row![
        "Data",
        "Final HODL",
        "Final LP",
        "Fees",
        "Impermanent Loss",
        "LP vs HODL",
        "Volatility"
    ]);

    for entry in entries {
        let name = entry.data.display().to_string();
        match (&entry.summary, &entry.error) {
            (Some(s), _) => {
                table.add_row(row![
                    name,
                    usd(s.final_hodl_value),
                    usd(s.final_lp_value),
                    usd(s.total_fees),
                    usd(s.final_impermanent_loss),
                    format!("{} ({})", usd(s.lp_vs_hodl), pct(s.lp_vs_hodl_pct)),
                    opt_pct(s.annualized_volatility)
                ]);
            }
            (None, error) => {
                let message = format!("error: {}", error.as_deref().unwrap_or("unknown"));
                table.add_row(row![name, message, "", "", "", "", ""]);
            }
        }
    }

    println!("\n📊 Strategy Comparison");
    table.printstd();
}
