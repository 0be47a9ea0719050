use loan_calc_core::{ComputationOutput, SolverResult};

/// Pretty-print the full computation envelope as JSON.
pub fn print_json(output: &ComputationOutput<SolverResult>) {
    match serde_json::to_string_pretty(output) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("JSON serialization error: {}", e),
    }
}
