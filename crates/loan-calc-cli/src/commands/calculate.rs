use clap::Args;
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::debug;

use loan_calc_core::loan::validation;
use loan_calc_core::{ComputationOutput, LoanRequest, SolverResult};

use crate::input::{self, RequestSource};

/// Loan parameters. Exactly one of principal, payment or periods is left
/// out for an annuity; a differentiated schedule takes principal and periods.
#[derive(Args, Debug, Default)]
pub struct LoanArgs {
    /// Path to a JSON loan request, or `-` to read one from stdin
    /// (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Payment schedule: `annuity` or `diff`
    #[arg(long = "type")]
    pub payment_type: Option<String>,

    /// Loan principal
    #[arg(long, value_parser = parse_amount, allow_negative_numbers = true)]
    pub principal: Option<Decimal>,

    /// Number of monthly payments
    #[arg(long, allow_negative_numbers = true)]
    pub periods: Option<i64>,

    /// Monthly payment (annuity only)
    #[arg(long, value_parser = parse_amount, allow_negative_numbers = true)]
    pub payment: Option<Decimal>,

    /// Annual interest rate, without the percent sign
    #[arg(long, value_parser = parse_amount, allow_negative_numbers = true)]
    pub interest: Option<Decimal>,
}

pub fn run(
    args: &LoanArgs,
) -> Result<ComputationOutput<SolverResult>, Box<dyn std::error::Error>> {
    let request = build_request(args)?;
    debug!(?request, "loan request assembled");
    Ok(loan_calc_core::solve(&request)?)
}

fn build_request(args: &LoanArgs) -> Result<LoanRequest, Box<dyn std::error::Error>> {
    match args.input.as_deref() {
        Some(arg) => input::read_request(RequestSource::from_arg(arg)),
        None => Ok(LoanRequest {
            payment_type: validation::parse_payment_type(args.payment_type.as_deref())?,
            principal: args.principal,
            payment: args.payment,
            periods: args.periods,
            interest: args.interest,
        }),
    }
}

/// Accepts plain decimals (`8722.34`) and scientific notation (`1e6`).
fn parse_amount(raw: &str) -> Result<Decimal, String> {
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|e| format!("'{raw}' is not a number: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use loan_calc_core::{LoanCalcError, PaymentType};
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_amount_plain_and_scientific() {
        assert_eq!(parse_amount("8722.34").unwrap(), dec!(8722.34));
        assert_eq!(parse_amount("1e6").unwrap(), dec!(1_000_000));
        assert_eq!(parse_amount("-5").unwrap(), dec!(-5));
        assert!(parse_amount("ten").is_err());
    }

    #[test]
    fn test_build_request_from_flags() {
        let args = LoanArgs {
            payment_type: Some("annuity".into()),
            principal: Some(dec!(1_000_000)),
            periods: Some(60),
            interest: Some(dec!(10)),
            ..Default::default()
        };
        let req = build_request(&args).unwrap();
        assert_eq!(req.payment_type, PaymentType::Annuity);
        assert_eq!(req.payment, None);
        assert_eq!(req.periods, Some(60));
    }

    #[test]
    fn test_unknown_type_is_a_parameter_failure() {
        let args = LoanArgs {
            payment_type: Some("balloon".into()),
            principal: Some(dec!(1000)),
            periods: Some(12),
            interest: Some(dec!(10)),
            ..Default::default()
        };
        let err = run(&args).unwrap_err();
        let loan_err = err.downcast_ref::<LoanCalcError>().unwrap();
        assert!(loan_err.is_invalid_parameters());
    }

    #[test]
    fn test_run_diff_schedule() {
        let args = LoanArgs {
            payment_type: Some("diff".into()),
            principal: Some(dec!(1_000_000)),
            periods: Some(10),
            interest: Some(dec!(10)),
            ..Default::default()
        };
        let out = run(&args).unwrap();
        assert_eq!(out.result.overpayment(), 45_837);
    }
}
