use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::time_value::{annuity_factor, remaining_balance, to_whole_units, MonthlyRate};
use crate::types::{Money, WholeUnits};
use crate::{LoanCalcError, LoanResult};

/// Balance below which a loan counts as retired; absorbs decimal noise in
/// `ln` and `powi`.
const RETIRED_BALANCE_TOLERANCE: Decimal = dec!(0.0000001);

const MONTHS_PER_YEAR: u32 = 12;

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnuityPaymentOutput {
    /// Level payment, rounded up to the next whole unit.
    pub monthly_payment: WholeUnits,
    pub total_paid: WholeUnits,
    pub overpayment: WholeUnits,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrincipalOutput {
    /// Largest whole principal the payment services.
    pub principal: WholeUnits,
    pub total_paid: Money,
    pub overpayment: WholeUnits,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodsOutput {
    pub periods: u32,
    pub years: u32,
    pub months: u32,
    pub total_paid: Money,
    pub overpayment: WholeUnits,
}

impl PeriodsOutput {
    fn from_periods(periods: u32, total_paid: Money, overpayment: WholeUnits) -> Self {
        Self {
            periods,
            years: periods / MONTHS_PER_YEAR,
            months: periods % MONTHS_PER_YEAR,
            total_paid,
            overpayment,
        }
    }
}

// ---------------------------------------------------------------------------
// Solvers
// ---------------------------------------------------------------------------

/// Level monthly payment for a known principal and term.
///
/// `A = P * i * (1+i)^n / ((1+i)^n - 1)`, rounded up so the lender is never
/// short-paid.
pub fn solve_payment(
    principal: Money,
    periods: u32,
    rate: MonthlyRate,
) -> LoanResult<AnnuityPaymentOutput> {
    let factor = annuity_factor(rate, periods)?;
    let exact = principal
        .checked_mul(factor)
        .ok_or_else(|| LoanCalcError::overflow("annuity payment"))?;
    let payment = exact.ceil();

    let total = payment
        .checked_mul(Decimal::from(periods))
        .ok_or_else(|| LoanCalcError::overflow("total paid"))?;

    Ok(AnnuityPaymentOutput {
        monthly_payment: to_whole_units(payment, "monthly payment")?,
        total_paid: to_whole_units(total, "total paid")?,
        overpayment: to_whole_units(total - principal, "overpayment")?,
    })
}

/// Principal that a known payment retires over a known term, rounded down.
pub fn solve_principal(
    payment: Money,
    periods: u32,
    rate: MonthlyRate,
) -> LoanResult<PrincipalOutput> {
    let factor = annuity_factor(rate, periods)?;
    let principal = payment
        .checked_div(factor)
        .ok_or_else(|| LoanCalcError::overflow("loan principal"))?
        .floor();

    let total = payment
        .checked_mul(Decimal::from(periods))
        .ok_or_else(|| LoanCalcError::overflow("total paid"))?;

    Ok(PrincipalOutput {
        principal: to_whole_units(principal, "principal")?,
        total_paid: total,
        overpayment: to_whole_units(total - principal, "overpayment")?,
    })
}

/// Number of whole months needed to retire a principal at a known payment.
///
/// `n = log_{1+i}(A / (A - i*P))`, rounded up. Fails with `DivergentLoan`
/// when the payment does not exceed the first month's interest.
pub fn solve_periods(
    principal: Money,
    payment: Money,
    rate: MonthlyRate,
) -> LoanResult<PeriodsOutput> {
    let interest = rate.interest_on(principal)?;
    if payment <= interest {
        return Err(LoanCalcError::DivergentLoan { payment, interest });
    }

    let ratio = payment
        .checked_div(payment - interest)
        .ok_or_else(|| LoanCalcError::overflow("payment to amortisation ratio"))?;
    let exact = log_periods(ratio, rate)?;
    let mut periods = ceil_to_u32(exact)?;

    // ln/powi noise can push an exact term just past an integer
    if periods > 1
        && remaining_balance(principal, payment, rate, periods - 1)?
            <= RETIRED_BALANCE_TOLERANCE
    {
        periods -= 1;
    }

    let total = payment
        .checked_mul(Decimal::from(periods))
        .ok_or_else(|| LoanCalcError::overflow("total paid"))?;

    Ok(PeriodsOutput::from_periods(
        periods,
        total,
        to_whole_units(total - principal, "overpayment")?,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn log_periods(ratio: Decimal, rate: MonthlyRate) -> LoanResult<Decimal> {
    use rust_decimal::MathematicalOps;

    let base = (Decimal::ONE + rate.value()).ln();
    if base <= Decimal::ZERO {
        return Err(LoanCalcError::invalid(
            "interest",
            "Interest rate is too small to solve for the loan term.",
        ));
    }
    Ok(ratio.ln() / base)
}

fn ceil_to_u32(value: Decimal) -> LoanResult<u32> {
    use rust_decimal::prelude::ToPrimitive;

    value
        .ceil()
        .to_u32()
        .ok_or_else(|| LoanCalcError::overflow("loan term"))
}
