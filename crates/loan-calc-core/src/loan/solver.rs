use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use crate::loan::annuity::{self, AnnuityPaymentOutput, PeriodsOutput, PrincipalOutput};
use crate::loan::differentiated::{self, ScheduleOutput};
use crate::loan::request::{LoanQuery, LoanRequest};
use crate::loan::validation;
use crate::types::*;
use crate::LoanResult;

/// Terms beyond this many months add a warning to the output.
const LONG_TERM_WARNING_PERIODS: u32 = 600;

/// What the solver derived, keyed by the quantity that was missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "solved_for", rename_all = "snake_case")]
pub enum SolverResult {
    Payment(AnnuityPaymentOutput),
    Principal(PrincipalOutput),
    Periods(PeriodsOutput),
    Schedule(ScheduleOutput),
}

impl SolverResult {
    /// Total paid minus principal, in whole units.
    pub fn overpayment(&self) -> WholeUnits {
        match self {
            SolverResult::Payment(o) => o.overpayment,
            SolverResult::Principal(o) => o.overpayment,
            SolverResult::Periods(o) => o.overpayment,
            SolverResult::Schedule(o) => o.overpayment,
        }
    }
}

/// Validate a request, solve for its missing quantity and wrap the answer
/// in the standard computation envelope.
pub fn solve(request: &LoanRequest) -> LoanResult<ComputationOutput<SolverResult>> {
    let start = Instant::now();
    let query = validation::validate(request)?;
    debug!(
        payment_type = %query.payment_type(),
        solving_for = query.solving_for(),
        "dispatching loan solver"
    );

    let mut warnings: Vec<String> = Vec::new();
    let (methodology, result) = dispatch(&query)?;

    let periods = term_of(&result, &query);
    if periods > LONG_TERM_WARNING_PERIODS {
        warnings.push(format!(
            "Loan term of {periods} months exceeds 50 years; check the inputs."
        ));
    }

    let rate = query.rate();
    let assumptions = serde_json::json!({
        "payment_type": query.payment_type().to_string(),
        "solving_for": query.solving_for(),
        "annual_interest_pct": rate.annual_percent().to_string(),
        "monthly_rate": rate.value().round_dp(10).to_string(),
        "principal": request.principal.map(|v| v.to_string()),
        "payment": request.payment.map(|v| v.to_string()),
        "periods": request.periods,
    });

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(methodology, &assumptions, warnings, elapsed, result))
}

fn dispatch(query: &LoanQuery) -> LoanResult<(&'static str, SolverResult)> {
    match *query {
        LoanQuery::AnnuityPayment {
            principal,
            periods,
            rate,
        } => Ok((
            "Annuity level payment (rounded up)",
            SolverResult::Payment(annuity::solve_payment(principal, periods, rate)?),
        )),
        LoanQuery::AnnuityPrincipal {
            payment,
            periods,
            rate,
        } => Ok((
            "Annuity present value of level payments (rounded down)",
            SolverResult::Principal(annuity::solve_principal(payment, periods, rate)?),
        )),
        LoanQuery::AnnuityPeriods {
            principal,
            payment,
            rate,
        } => Ok((
            "Annuity term by logarithm (rounded up to whole months)",
            SolverResult::Periods(annuity::solve_periods(principal, payment, rate)?),
        )),
        LoanQuery::Differentiated {
            principal,
            periods,
            rate,
        } => Ok((
            "Differentiated schedule (equal principal, declining interest)",
            SolverResult::Schedule(differentiated::solve_schedule(principal, periods, rate)?),
        )),
    }
}

fn term_of(result: &SolverResult, query: &LoanQuery) -> u32 {
    match (result, query) {
        (SolverResult::Periods(o), _) => o.periods,
        (_, LoanQuery::AnnuityPayment { periods, .. })
        | (_, LoanQuery::AnnuityPrincipal { periods, .. })
        | (_, LoanQuery::Differentiated { periods, .. }) => *periods,
        // AnnuityPeriods always yields SolverResult::Periods
        (_, LoanQuery::AnnuityPeriods { .. }) => 0,
    }
}
