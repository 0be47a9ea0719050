use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::time_value::{to_whole_units, MonthlyRate, MONTHLY_PERCENT_DIVISOR};
use crate::types::{Money, WholeUnits};
use crate::{LoanCalcError, LoanResult};

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledPayment {
    /// 1-based month index.
    pub month: u32,
    pub payment: WholeUnits,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleOutput {
    pub payments: Vec<ScheduledPayment>,
    pub total_paid: WholeUnits,
    pub overpayment: WholeUnits,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Build the full differentiated repayment schedule.
///
/// Each month repays `P/n` of principal plus one month of interest on the
/// balance still outstanding. Every payment is rounded up on its own, so the
/// rounded schedule is not an exact arithmetic sequence.
pub fn solve_schedule(
    principal: Money,
    periods: u32,
    rate: MonthlyRate,
) -> LoanResult<ScheduleOutput> {
    let mut payments = Vec::with_capacity(periods as usize);
    let mut total = Decimal::ZERO;

    for month in 1..=periods {
        let rounded = exact_payment(principal, periods, rate, month)?.ceil();
        total = total
            .checked_add(rounded)
            .ok_or_else(|| LoanCalcError::overflow("schedule total"))?;
        payments.push(ScheduledPayment {
            month,
            payment: to_whole_units(rounded, "scheduled payment")?,
        });
    }

    Ok(ScheduleOutput {
        payments,
        total_paid: to_whole_units(total, "total paid")?,
        overpayment: to_whole_units(total - principal, "overpayment")?,
    })
}

/// Un-rounded payment due in `month` (1-based):
/// `D_m = P/n + i * (P - P*(m-1)/n)`.
///
/// Evaluated as `P * (1200 + annual * (n-m+1)) / (1200 * n)` so the only
/// rounding is the final division.
pub fn exact_payment(
    principal: Money,
    periods: u32,
    rate: MonthlyRate,
    month: u32,
) -> LoanResult<Money> {
    if periods == 0 || month == 0 || month > periods {
        return Err(LoanCalcError::invalid(
            "month",
            format!("Month {month} is outside a {periods}-month schedule."),
        ));
    }
    let remaining_slices = Decimal::from(periods - month + 1);

    let numerator = rate
        .annual_percent()
        .checked_mul(remaining_slices)
        .and_then(|v| v.checked_add(MONTHLY_PERCENT_DIVISOR))
        .and_then(|v| v.checked_mul(principal))
        .ok_or_else(|| LoanCalcError::overflow("scheduled payment"))?;
    let denominator = MONTHLY_PERCENT_DIVISOR
        .checked_mul(Decimal::from(periods))
        .ok_or_else(|| LoanCalcError::overflow("scheduled payment"))?;

    numerator
        .checked_div(denominator)
        .ok_or_else(|| LoanCalcError::overflow("scheduled payment"))
}
