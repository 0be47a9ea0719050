use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::LoanCalcError;
use crate::types::{Money, Rate, WholeUnits};
use crate::LoanResult;

/// Twelve months times one hundred percent.
pub(crate) const MONTHLY_PERCENT_DIVISOR: Decimal = dec!(1200);

/// Monthly compounding rate derived from an annual percentage.
///
/// Keeps the annual percent rather than the divided value so that
/// `interest_on` can multiply first and divide once, which keeps results
/// exact whenever the true answer is a terminating decimal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyRate {
    annual_percent: Rate,
}

impl MonthlyRate {
    pub fn from_annual_percent(annual_percent: Rate) -> Self {
        Self { annual_percent }
    }

    pub fn annual_percent(&self) -> Rate {
        self.annual_percent
    }

    /// Per-period rate `i = annual / 1200`.
    pub fn value(&self) -> Decimal {
        self.annual_percent / MONTHLY_PERCENT_DIVISOR
    }

    /// One month of interest accrued on `amount`.
    pub fn interest_on(&self, amount: Money) -> LoanResult<Money> {
        amount
            .checked_mul(self.annual_percent)
            .map(|v| v / MONTHLY_PERCENT_DIVISOR)
            .ok_or_else(|| LoanCalcError::overflow("monthly interest"))
    }
}

/// Compound growth factor `(1 + i)^n`.
pub fn growth_factor(rate: MonthlyRate, periods: u32) -> LoanResult<Decimal> {
    (Decimal::ONE + rate.value())
        .checked_powi(i64::from(periods))
        .ok_or_else(|| LoanCalcError::overflow(format!("growth factor over {periods} periods")))
}

/// Level payment per unit of principal: `i * g / (g - 1)`.
pub fn annuity_factor(rate: MonthlyRate, periods: u32) -> LoanResult<Decimal> {
    let g = growth_factor(rate, periods)?;
    let denom = g - Decimal::ONE;
    if denom.is_zero() {
        return Err(LoanCalcError::invalid(
            "interest",
            "Interest rate is too small to compound over the loan term.",
        ));
    }
    rate.value()
        .checked_mul(g)
        .map(|v| v / denom)
        .ok_or_else(|| LoanCalcError::overflow("annuity factor"))
}

/// Outstanding balance after `periods_paid` level payments.
///
/// `B_k = P * g_k - A * (g_k - 1) / i`. Zero or negative means the loan has
/// been retired.
pub fn remaining_balance(
    principal: Money,
    payment: Money,
    rate: MonthlyRate,
    periods_paid: u32,
) -> LoanResult<Money> {
    let g = growth_factor(rate, periods_paid)?;
    let i = rate.value();
    if i.is_zero() {
        return Err(LoanCalcError::invalid(
            "interest",
            "Interest rate must be positive.",
        ));
    }
    let accrued = principal
        .checked_mul(g)
        .ok_or_else(|| LoanCalcError::overflow("accrued principal"))?;
    let repaid = payment
        .checked_mul(g - Decimal::ONE)
        .map(|v| v / i)
        .ok_or_else(|| LoanCalcError::overflow("accumulated payments"))?;
    Ok(accrued - repaid)
}

/// Convert an already-rounded amount to whole currency units.
pub fn to_whole_units(value: Decimal, context: &str) -> LoanResult<WholeUnits> {
    value
        .trunc()
        .to_i64()
        .ok_or_else(|| LoanCalcError::overflow(context))
}
