mod commands;
mod input;
mod logging;
mod output;

use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};
use colored::Colorize;
use std::process;

use commands::calculate::LoanArgs;
use loan_calc_core::LoanCalcError;

/// Loan repayment calculator
#[derive(Parser)]
#[command(
    name = "creditcalc",
    version,
    about = "Annuity and differentiated loan repayment calculator",
    long_about = "Solves for whichever of principal, monthly payment or number of periods \
                  is omitted, given an annual interest rate. Annuity loans have a fixed \
                  monthly payment; differentiated loans repay equal slices of principal \
                  and print the full monthly schedule."
)]
struct Cli {
    #[command(flatten)]
    loan: LoanArgs,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    output: OutputFormat,

    /// Log solver decisions and rejection reasons to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Table,
    Csv,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            _ => {
                logging::init(false);
                tracing::debug!(error = %e, "argument parsing failed");
                reject_parameters();
            }
        },
    };

    logging::init(cli.verbose);

    match commands::calculate::run(&cli.loan) {
        Ok(output) => {
            output::format_output(&cli.output, &output);
            process::exit(0);
        }
        Err(e) => {
            if let Some(loan_err) = e.downcast_ref::<LoanCalcError>() {
                if loan_err.is_invalid_parameters() {
                    if cli.verbose {
                        eprintln!("{}: {}", "rejected".yellow().bold(), loan_err);
                    }
                    reject_parameters();
                }
            }
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}

/// Every parameter failure is reported the same way and is not a process
/// failure.
fn reject_parameters() -> ! {
    println!("Incorrect parameters");
    process::exit(0);
}
