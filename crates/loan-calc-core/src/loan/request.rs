use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::time_value::MonthlyRate;
use crate::types::{Money, Rate};
use crate::LoanCalcError;

// ---------------------------------------------------------------------------
// Payment schedule
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentType {
    /// Level payment every month.
    #[serde(rename = "annuity")]
    Annuity,
    /// Equal principal slices plus interest on the outstanding balance.
    #[serde(rename = "diff", alias = "differentiated")]
    Differentiated,
}

impl fmt::Display for PaymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentType::Annuity => write!(f, "annuity"),
            PaymentType::Differentiated => write!(f, "diff"),
        }
    }
}

impl FromStr for PaymentType {
    type Err = LoanCalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "annuity" => Ok(PaymentType::Annuity),
            "diff" | "differentiated" => Ok(PaymentType::Differentiated),
            other => Err(LoanCalcError::invalid(
                "type",
                format!("Unknown payment type '{other}'; expected 'annuity' or 'diff'."),
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// Raw request
// ---------------------------------------------------------------------------

/// A loan calculation request as supplied by the caller.
///
/// Every numeric field is optional: which one is missing decides what the
/// solver computes. Presence is explicit, so a supplied `0` is kept as a
/// value (and rejected by validation) rather than read as "absent".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanRequest {
    #[serde(rename = "type")]
    pub payment_type: PaymentType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub principal: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment: Option<Money>,
    /// Signed so that a negative count reaches validation instead of
    /// failing to parse.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub periods: Option<i64>,
    /// Annual interest in percent (10 = 10%).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interest: Option<Rate>,
}

// ---------------------------------------------------------------------------
// Validated query
// ---------------------------------------------------------------------------

/// A request that passed validation, keyed by the quantity to solve for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoanQuery {
    AnnuityPayment {
        principal: Money,
        periods: u32,
        rate: MonthlyRate,
    },
    AnnuityPrincipal {
        payment: Money,
        periods: u32,
        rate: MonthlyRate,
    },
    AnnuityPeriods {
        principal: Money,
        payment: Money,
        rate: MonthlyRate,
    },
    Differentiated {
        principal: Money,
        periods: u32,
        rate: MonthlyRate,
    },
}

impl LoanQuery {
    pub fn payment_type(&self) -> PaymentType {
        match self {
            LoanQuery::Differentiated { .. } => PaymentType::Differentiated,
            _ => PaymentType::Annuity,
        }
    }

    pub fn rate(&self) -> MonthlyRate {
        match *self {
            LoanQuery::AnnuityPayment { rate, .. }
            | LoanQuery::AnnuityPrincipal { rate, .. }
            | LoanQuery::AnnuityPeriods { rate, .. }
            | LoanQuery::Differentiated { rate, .. } => rate,
        }
    }

    /// Name of the quantity being derived.
    pub fn solving_for(&self) -> &'static str {
        match self {
            LoanQuery::AnnuityPayment { .. } => "payment",
            LoanQuery::AnnuityPrincipal { .. } => "principal",
            LoanQuery::AnnuityPeriods { .. } => "periods",
            LoanQuery::Differentiated { .. } => "schedule",
        }
    }
}
