pub mod csv_out;
pub mod json;
pub mod table;
pub mod text;

use loan_calc_core::{ComputationOutput, SolverResult};
use serde_json::Value;

use crate::OutputFormat;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, output: &ComputationOutput<SolverResult>) {
    match format {
        OutputFormat::Text => text::print_text(&output.result),
        OutputFormat::Json => json::print_json(output),
        OutputFormat::Table => table::print_table(output),
        OutputFormat::Csv => csv_out::print_csv(&output.result),
    }
}

/// Scalar result fields as (name, display value), schedule rows excluded.
pub(crate) fn summary_fields(result: &SolverResult) -> Vec<(String, String)> {
    match serde_json::to_value(result) {
        Ok(Value::Object(map)) => map
            .into_iter()
            .filter(|(key, _)| key != "payments")
            .map(|(key, val)| (key, format_value(&val)))
            .collect(),
        _ => Vec::new(),
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
