//! Interactive parameter collection.
//!
//! Values not supplied on the command line are asked for in a fixed order:
//! asset price, strike, expiry, volatility, rate, then path and step counts.
//! Unparseable or out-of-domain answers are re-asked; end of input is an error.

use std::io::{BufRead, Write};
use std::str::FromStr;

use pricer_core::types::{SimulationParameters, SimulationParametersBuilder};

use crate::commands::price::ParameterArgs;
use crate::{CliError, Result};

/// Line-oriented question/answer loop over any reader and writer.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// Create a prompter
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print an informational line
    pub fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    /// Ask until the answer parses and passes `check`.
    ///
    /// `check` returns the reason an answer is rejected, or `None`.
    pub fn ask<T, F>(&mut self, question: &str, check: F) -> Result<T>
    where
        T: FromStr,
        F: Fn(&T) -> Option<&'static str>,
    {
        loop {
            writeln!(self.output, "{}", question)?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(CliError::input(format!(
                    "input ended before an answer to \"{}\"",
                    question.trim_end()
                )));
            }

            let answer = line.trim();
            match answer.parse::<T>() {
                Ok(value) => match check(&value) {
                    None => return Ok(value),
                    Some(reason) => {
                        writeln!(self.output, "Invalid value: {}. Please try again.", reason)?
                    }
                },
                Err(_) => writeln!(
                    self.output,
                    "Could not read '{}' as a number. Please try again.",
                    answer
                )?,
            }
        }
    }
}

fn positive(x: &f64) -> Option<&'static str> {
    (!(*x > 0.0 && x.is_finite())).then_some("must be a positive number")
}

fn finite(x: &f64) -> Option<&'static str> {
    (!x.is_finite()).then_some("must be a finite number")
}

fn at_least_one(n: &usize) -> Option<&'static str> {
    (*n == 0).then_some("must be at least 1")
}

/// Fills every parameter missing from `known` by prompting, in input order.
pub fn collect_parameters<R: BufRead, W: Write>(
    known: &ParameterArgs,
    prompter: &mut Prompter<R, W>,
) -> Result<SimulationParametersBuilder> {
    let spot = match known.spot {
        Some(v) => v,
        None => prompter.ask("Enter the current asset price: ", positive)?,
    };
    let strike = match known.strike {
        Some(v) => v,
        None => prompter.ask("Enter the strike price: ", positive)?,
    };
    let expiry = match known.expiry {
        Some(v) => v,
        None => prompter.ask(
            "Enter the time to expiration (in years, e.g., 0.5 for 6 months): ",
            positive,
        )?,
    };
    let volatility = match known.volatility {
        Some(v) => v,
        None => prompter.ask(
            "Enter the volatility (as a decimal, e.g., 0.2 for 20%): ",
            positive,
        )?,
    };
    let rate = match known.rate {
        Some(v) => v,
        None => prompter.ask(
            "Enter the risk-free interest rate (as a decimal, e.g., 0.05 for 5%): ",
            finite,
        )?,
    };

    if known.paths.is_none() || known.steps.is_none() {
        prompter.say("Algorithm Tuning Parameters:")?;
    }
    let paths = match known.paths {
        Some(v) => v,
        None => prompter.ask(
            "Enter the number of simulation paths (e.g., 100000): ",
            at_least_one,
        )?,
    };
    let steps = match known.steps {
        Some(v) => v,
        None => prompter.ask(
            "Enter the number of time steps per path (e.g., 252): ",
            at_least_one,
        )?,
    };

    Ok(SimulationParameters::builder()
        .asset_price(spot)
        .strike_price(strike)
        .time_to_expiration(expiry)
        .volatility(volatility)
        .interest_rate(rate)
        .num_paths(paths)
        .num_steps(steps))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn transcript<R>(prompter: Prompter<R, Vec<u8>>) -> String {
        String::from_utf8(prompter.output).unwrap()
    }

    #[test]
    fn test_ask_parses_answer() {
        let mut p = prompter("42.5\n");
        let value: f64 = p.ask("Price?", positive).unwrap();
        assert_eq!(value, 42.5);
    }

    #[test]
    fn test_ask_retries_on_bad_input() {
        let mut p = prompter("abc\n-3\n7\n");
        let value: f64 = p.ask("Price?", positive).unwrap();
        assert_eq!(value, 7.0);

        let text = transcript(p);
        assert_eq!(text.matches("Price?").count(), 3);
        assert!(text.contains("Could not read 'abc'"));
        assert!(text.contains("must be a positive number"));
    }

    #[test]
    fn test_ask_fails_at_end_of_input() {
        let mut p = prompter("");
        let result: Result<usize> = p.ask("Paths?", at_least_one);
        assert!(matches!(result, Err(CliError::Input(_))));
    }

    #[test]
    fn test_collect_all_in_order() {
        let mut p = prompter("100\n105\n0.5\n0.25\n0.03\n1000\n252\n");
        let params = collect_parameters(&ParameterArgs::default(), &mut p)
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(params.asset_price(), 100.0);
        assert_eq!(params.strike_price(), 105.0);
        assert_eq!(params.time_to_expiration(), 0.5);
        assert_eq!(params.volatility(), 0.25);
        assert_eq!(params.interest_rate(), 0.03);
        assert_eq!(params.num_paths(), 1000);
        assert_eq!(params.num_steps(), 252);

        let text = transcript(p);
        let asset = text.find("asset price").unwrap();
        let rate = text.find("interest rate").unwrap();
        let tuning = text.find("Algorithm Tuning Parameters").unwrap();
        let steps = text.find("time steps").unwrap();
        assert!(asset < rate && rate < tuning && tuning < steps);
    }

    #[test]
    fn test_collect_only_missing() {
        let known = ParameterArgs {
            spot: Some(100.0),
            strike: Some(100.0),
            expiry: Some(1.0),
            volatility: Some(0.2),
            rate: Some(-0.01),
            paths: None,
            steps: Some(10),
        };
        let mut p = prompter("500\n");
        let params = collect_parameters(&known, &mut p).unwrap().build().unwrap();

        assert_eq!(params.num_paths(), 500);
        assert_eq!(params.interest_rate(), -0.01);
        let text = transcript(p);
        assert!(!text.contains("asset price"));
        assert!(text.contains("simulation paths"));
    }

    #[test]
    fn test_collect_nothing_missing_prints_nothing() {
        let known = ParameterArgs {
            spot: Some(100.0),
            strike: Some(100.0),
            expiry: Some(1.0),
            volatility: Some(0.2),
            rate: Some(0.05),
            paths: Some(10),
            steps: Some(10),
        };
        let mut p = prompter("");
        assert!(collect_parameters(&known, &mut p).is_ok());
        assert!(transcript(p).is_empty());
    }
}
