use rust_decimal::Decimal;
use tracing::debug;

use crate::loan::request::{LoanQuery, LoanRequest, PaymentType};
use crate::time_value::MonthlyRate;
use crate::types::Money;
use crate::{LoanCalcError, LoanResult};

/// Upper bound on the loan term in months.
pub const MAX_PERIODS: i64 = 100_000;

/// Parse the raw `--type` value. A missing type is rejected like an
/// unknown one.
pub fn parse_payment_type(raw: Option<&str>) -> LoanResult<PaymentType> {
    match raw {
        Some(s) => s.parse(),
        None => Err(LoanCalcError::invalid(
            "type",
            "Payment type is required ('annuity' or 'diff').",
        )),
    }
}

/// Check a request and determine what it asks to solve for.
pub fn validate(request: &LoanRequest) -> LoanResult<LoanQuery> {
    let result = validate_inner(request);
    if let Err(ref e) = result {
        debug!(error = %e, "loan request rejected");
    }
    result
}

fn validate_inner(request: &LoanRequest) -> LoanResult<LoanQuery> {
    let rate = match request.interest {
        None => {
            return Err(LoanCalcError::invalid(
                "interest",
                "Interest rate is required.",
            ))
        }
        Some(r) if r <= Decimal::ZERO => {
            return Err(LoanCalcError::invalid(
                "interest",
                "Interest rate must be positive.",
            ))
        }
        Some(r) => MonthlyRate::from_annual_percent(r),
    };

    let principal = positive_amount("principal", request.principal)?;
    let payment = positive_amount("payment", request.payment)?;
    let periods = period_count(request.periods)?;

    match request.payment_type {
        PaymentType::Annuity => match (principal, payment, periods) {
            (Some(principal), None, Some(periods)) => Ok(LoanQuery::AnnuityPayment {
                principal,
                periods,
                rate,
            }),
            (None, Some(payment), Some(periods)) => Ok(LoanQuery::AnnuityPrincipal {
                payment,
                periods,
                rate,
            }),
            (Some(principal), Some(payment), None) => Ok(LoanQuery::AnnuityPeriods {
                principal,
                payment,
                rate,
            }),
            (Some(_), Some(_), Some(_)) => Err(LoanCalcError::invalid(
                "principal/payment/periods",
                "Nothing to solve for: omit exactly one of principal, payment or periods.",
            )),
            _ => Err(LoanCalcError::invalid(
                "principal/payment/periods",
                "Only one of principal, payment or periods may be omitted.",
            )),
        },
        PaymentType::Differentiated => {
            if payment.is_some() {
                return Err(LoanCalcError::invalid(
                    "payment",
                    "Differentiated payments are derived per month and cannot be supplied.",
                ));
            }
            match (principal, periods) {
                (Some(principal), Some(periods)) => Ok(LoanQuery::Differentiated {
                    principal,
                    periods,
                    rate,
                }),
                (None, _) => Err(LoanCalcError::invalid(
                    "principal",
                    "Principal is required for a differentiated schedule.",
                )),
                (_, None) => Err(LoanCalcError::invalid(
                    "periods",
                    "Periods are required for a differentiated schedule.",
                )),
            }
        }
    }
}

fn positive_amount(field: &str, value: Option<Money>) -> LoanResult<Option<Money>> {
    match value {
        Some(v) if v <= Decimal::ZERO => Err(LoanCalcError::invalid(
            field,
            format!("{field} must be positive when supplied."),
        )),
        other => Ok(other),
    }
}

fn period_count(value: Option<i64>) -> LoanResult<Option<u32>> {
    match value {
        None => Ok(None),
        Some(n) if n <= 0 => Err(LoanCalcError::invalid(
            "periods",
            "periods must be positive when supplied.",
        )),
        Some(n) if n > MAX_PERIODS => Err(LoanCalcError::invalid(
            "periods",
            format!("periods may not exceed {MAX_PERIODS}."),
        )),
        // Bounded by MAX_PERIODS above
        Some(n) => Ok(Some(n as u32)),
    }
}
