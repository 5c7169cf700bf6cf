//! Price command implementation
//!
//! Runs the Monte Carlo engine in the requested mode(s), prints Monte Carlo
//! and Black-Scholes prices side by side, and exports the downsampled paths
//! of the last run.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use clap::{Args, ValueEnum};
use pricer_core::types::{SimulationParameters, MAX_STEPS};
use pricer_pricing::mc::{ExecutionMode, PricingResult, RunReport, Simulation};
use serde::Serialize;
use tracing::info;

use crate::config::{CliConfig, RunMode};
use crate::prompt::{collect_parameters, Prompter};
use crate::{CliError, Result};

/// Market and algorithm inputs; any left out are prompted for
#[derive(Debug, Clone, Default, Args)]
pub struct ParameterArgs {
    /// Current asset price
    #[arg(long)]
    pub spot: Option<f64>,

    /// Strike price
    #[arg(long)]
    pub strike: Option<f64>,

    /// Time to expiration in years
    #[arg(long)]
    pub expiry: Option<f64>,

    /// Volatility as a decimal (0.2 for 20%)
    #[arg(long)]
    pub volatility: Option<f64>,

    /// Risk-free rate as a decimal (0.05 for 5%)
    #[arg(long, allow_hyphen_values = true)]
    pub rate: Option<f64>,

    /// Number of simulated paths
    #[arg(long)]
    pub paths: Option<usize>,

    /// Time steps per path (capped at 1000)
    #[arg(long)]
    pub steps: Option<usize>,
}

/// Report format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
}

/// Arguments of `gbm-pricer price`
#[derive(Debug, Clone, Default, Args)]
pub struct PriceArgs {
    #[command(flatten)]
    pub params: ParameterArgs,

    /// Generator(s) to run [default: config, else both]
    #[arg(short, long, value_enum)]
    pub mode: Option<RunMode>,

    /// Base seed for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,

    /// Parallel worker threads
    #[arg(long)]
    pub threads: Option<usize>,

    /// CSV export path [default: config, else dist/paths.csv]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Skip the CSV export
    #[arg(long)]
    pub no_export: bool,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

/// Run the price command
pub fn run<R: BufRead, W: Write>(
    args: &PriceArgs,
    config: &CliConfig,
    input: R,
    out: &mut W,
) -> Result<()> {
    let mode = args.mode.unwrap_or(config.mode);
    let seed = args.seed.or(config.seed);
    let threads = args.threads.or(config.threads);
    if threads == Some(0) {
        return Err(CliError::InvalidArgument(
            "--threads must be at least 1".to_string(),
        ));
    }
    let output = args.output.clone().unwrap_or_else(|| config.output.clone());

    let builder = {
        let mut prompter = Prompter::new(input, &mut *out);
        collect_parameters(&args.params, &mut prompter)?
    };
    let params = builder.maybe_seed(seed).build()?;

    if params.steps_capped() {
        writeln!(
            out,
            "Note: {} time steps requested; capped at {}.",
            params.requested_steps(),
            MAX_STEPS
        )?;
    }

    info!(
        mode = ?mode,
        num_paths = params.num_paths(),
        num_steps = params.num_steps(),
        "Starting pricing..."
    );

    let mut sim = Simulation::new(params)?.with_threads(threads);
    let mut runs = Vec::with_capacity(2);
    for &execution in mode.execution_modes() {
        let report = sim.run(execution)?;
        let result = sim.pricing_result()?;
        runs.push(RunSummary::new(report, result));
    }

    let export = if args.no_export {
        None
    } else {
        let series = sim.export_csv(&output)?;
        Some(ExportSummary {
            path: output.display().to_string(),
            series: series.num_columns(),
            paths_per_series: series.batch_size(),
        })
    };

    let report = PriceReport::new(sim.parameters(), runs, export)?;
    match args.format {
        OutputFormat::Table => report.write_table(out)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &report)?;
            writeln!(out)?;
        }
    }

    info!("Pricing complete");
    Ok(())
}

/// One generator run
#[derive(Debug, Serialize)]
struct RunSummary {
    requested: ExecutionMode,
    executed: ExecutionMode,
    seed: u64,
    elapsed_ms: f64,
    result: PricingResult,
}

impl RunSummary {
    fn new(report: RunReport, result: PricingResult) -> Self {
        Self {
            requested: report.requested,
            executed: report.executed,
            seed: report.seed,
            elapsed_ms: report.elapsed.as_secs_f64() * 1e3,
            result,
        }
    }
}

#[derive(Debug, Serialize)]
struct AnalyticSummary {
    call: f64,
    put: f64,
}

#[derive(Debug, Serialize)]
struct ExportSummary {
    path: String,
    series: usize,
    paths_per_series: usize,
}

#[derive(Debug, Serialize)]
struct PriceReport<'a> {
    parameters: &'a SimulationParameters,
    analytic: AnalyticSummary,
    runs: Vec<RunSummary>,
    /// sequential / parallel wall time, when both ran
    speedup: Option<f64>,
    export: Option<ExportSummary>,
}

impl<'a> PriceReport<'a> {
    fn new(
        parameters: &'a SimulationParameters,
        runs: Vec<RunSummary>,
        export: Option<ExportSummary>,
    ) -> Result<Self> {
        let first = runs
            .first()
            .ok_or_else(|| CliError::InvalidArgument("no execution mode selected".to_string()))?;
        let analytic = AnalyticSummary {
            call: first.result.analytic_call,
            put: first.result.analytic_put,
        };

        // A parallel request that fell back is timed as sequential work
        let elapsed = |mode: ExecutionMode| {
            runs.iter()
                .find(|r| r.executed == mode)
                .map(|r| r.elapsed_ms)
        };
        let speedup = match (
            elapsed(ExecutionMode::Sequential),
            elapsed(ExecutionMode::Parallel),
        ) {
            (Some(seq), Some(par)) if par > 0.0 => Some(seq / par),
            _ => None,
        };

        Ok(Self {
            parameters,
            analytic,
            runs,
            speedup,
            export,
        })
    }

    fn write_table<W: Write>(&self, out: &mut W) -> Result<()> {
        const LABEL: usize = 26;
        const VALUE: usize = 12;
        let rule = |left: &str, mid: &str, right: &str| {
            format!(
                "{}{}{}{}{}{}{}{}{}",
                left,
                "─".repeat(LABEL + 2),
                mid,
                "─".repeat(VALUE + 2),
                mid,
                "─".repeat(VALUE + 2),
                mid,
                "─".repeat(VALUE + 2),
                right
            )
        };

        let p = self.parameters;
        writeln!(
            out,
            "\nResults (S={}, K={}, T={}, σ={}, r={}; {} paths × {} steps)",
            p.asset_price(),
            p.strike_price(),
            p.time_to_expiration(),
            p.volatility(),
            p.interest_rate(),
            p.num_paths(),
            p.num_steps()
        )?;
        writeln!(out, "{}", rule("┌", "┬", "┐"))?;
        writeln!(
            out,
            "│ {:<LABEL$} │ {:>VALUE$} │ {:>VALUE$} │ {:>VALUE$} │",
            "Engine", "Call", "Put", "Time (ms)"
        )?;
        writeln!(out, "{}", rule("├", "┼", "┤"))?;
        for run in &self.runs {
            let label = format!("Monte Carlo ({})", run.executed);
            writeln!(
                out,
                "│ {:<LABEL$} │ {:>VALUE$.4} │ {:>VALUE$.4} │ {:>VALUE$.2} │",
                label, run.result.monte_carlo_call, run.result.monte_carlo_put, run.elapsed_ms
            )?;
        }
        writeln!(
            out,
            "│ {:<LABEL$} │ {:>VALUE$.4} │ {:>VALUE$.4} │ {:>VALUE$} │",
            "Black-Scholes", self.analytic.call, self.analytic.put, ""
        )?;
        writeln!(out, "{}", rule("└", "┴", "┘"))?;

        for run in &self.runs {
            let (call_ci, put_ci) = run.result.confidence_95();
            writeln!(
                out,
                "{} (seed {}): call {:+.4} ± {:.4}, put {:+.4} ± {:.4} vs Black-Scholes (95%)",
                run.executed,
                run.seed,
                run.result.call_error(),
                call_ci,
                run.result.put_error(),
                put_ci
            )?;
            if run.requested != run.executed {
                writeln!(
                    out,
                    "  {} requested; parallel backend unavailable, ran sequentially",
                    run.requested
                )?;
            }
        }

        if let Some(speedup) = self.speedup {
            writeln!(out, "Speedup (sequential / parallel): {:.2}x", speedup)?;
        }
        if let Some(export) = &self.export {
            writeln!(
                out,
                "Paths exported to {} ({} series, {} path(s) each)",
                export.path, export.series, export.paths_per_series
            )?;
        }
        Ok(())
    }
}
