//! Analytic command: Black-Scholes prices without simulation.

use std::io::Write;

use clap::Args;
use pricer_models::analytical::BlackScholes;

use crate::Result;

/// Arguments of `gbm-pricer analytic`
#[derive(Debug, Clone, Args)]
pub struct AnalyticArgs {
    /// Current asset price
    #[arg(long)]
    pub spot: f64,

    /// Strike price
    #[arg(long)]
    pub strike: f64,

    /// Time to expiration in years
    #[arg(long)]
    pub expiry: f64,

    /// Volatility as a decimal
    #[arg(long)]
    pub volatility: f64,

    /// Risk-free rate as a decimal
    #[arg(long, allow_hyphen_values = true)]
    pub rate: f64,
}

/// Run the analytic command
pub fn run<W: Write>(args: &AnalyticArgs, out: &mut W) -> Result<()> {
    let model = BlackScholes::new(args.spot, args.rate, args.volatility)?;
    let prices = model.prices(args.strike, args.expiry)?;

    writeln!(
        out,
        "Black-Scholes (S={}, K={}, T={}, σ={}, r={})",
        args.spot, args.strike, args.expiry, args.volatility, args.rate
    )?;
    writeln!(out, "  call: {:.4}", prices.call)?;
    writeln!(out, "  put:  {:.4}", prices.put)?;
    writeln!(out, "  d1:   {:.6}", model.d1(args.strike, args.expiry))?;
    writeln!(out, "  d2:   {:.6}", model.d2(args.strike, args.expiry))?;
    Ok(())
}
