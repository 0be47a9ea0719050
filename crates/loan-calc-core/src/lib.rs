pub mod error;
pub mod loan;
pub mod time_value;
pub mod types;

pub use error::LoanCalcError;
pub use loan::request::{LoanRequest, PaymentType};
pub use loan::solver::{solve, SolverResult};
pub use types::*;

/// Standard result type for all loan-calc operations
pub type LoanResult<T> = Result<T, LoanCalcError>;
