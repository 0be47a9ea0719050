pub mod annuity;
pub mod differentiated;
pub mod request;
pub mod solver;
pub mod validation;
