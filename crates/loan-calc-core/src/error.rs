use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoanCalcError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Divergent loan: a payment of {payment} never covers the monthly interest of {interest}")]
    DivergentLoan { payment: Decimal, interest: Decimal },

    #[error("Arithmetic overflow in {context}")]
    ArithmeticOverflow { context: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl LoanCalcError {
    /// Whether the user-facing boundary reports this as `Incorrect parameters`.
    ///
    /// Every rejection the solver can produce collapses into that one outcome;
    /// only serialisation failures are reported as genuine errors.
    pub fn is_invalid_parameters(&self) -> bool {
        !matches!(self, LoanCalcError::SerializationError(_))
    }

    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        LoanCalcError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn overflow(context: impl Into<String>) -> Self {
        LoanCalcError::ArithmeticOverflow {
            context: context.into(),
        }
    }
}

impl From<serde_json::Error> for LoanCalcError {
    fn from(e: serde_json::Error) -> Self {
        LoanCalcError::SerializationError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_solver_errors_map_to_invalid_parameters() {
        assert!(LoanCalcError::invalid("interest", "missing").is_invalid_parameters());
        assert!(LoanCalcError::overflow("growth factor").is_invalid_parameters());
        let divergent = LoanCalcError::DivergentLoan {
            payment: dec!(100),
            interest: dec!(250),
        };
        assert!(divergent.is_invalid_parameters());
    }

    #[test]
    fn test_serialization_error_is_not_a_parameter_failure() {
        let err = LoanCalcError::SerializationError("bad json".into());
        assert!(!err.is_invalid_parameters());
    }

    #[test]
    fn test_display_names_the_field() {
        let err = LoanCalcError::invalid("periods", "Periods must be positive.");
        assert_eq!(
            err.to_string(),
            "Invalid input: periods — Periods must be positive."
        );
    }
}
