use loan_calc_core::{ComputationOutput, SolverResult};
use tabled::{builder::Builder, Table};

use super::summary_fields;

/// Format output as tables using the tabled crate.
pub fn print_table(output: &ComputationOutput<SolverResult>) {
    println!("{}", render_table(output));
}

pub fn render_table(output: &ComputationOutput<SolverResult>) -> String {
    let mut sections: Vec<String> = Vec::new();

    if let SolverResult::Schedule(schedule) = &output.result {
        let mut builder = Builder::default();
        builder.push_record(["Month", "Payment"]);
        for row in &schedule.payments {
            builder.push_record([row.month.to_string(), row.payment.to_string()]);
        }
        sections.push(Table::from(builder).to_string());
    }

    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in summary_fields(&output.result) {
        builder.push_record([key, val]);
    }
    sections.push(Table::from(builder).to_string());

    if !output.warnings.is_empty() {
        let mut lines = vec!["Warnings:".to_string()];
        lines.extend(output.warnings.iter().map(|w| format!("  - {w}")));
        sections.push(lines.join("\n"));
    }

    sections.push(format!("Methodology: {}", output.methodology));
    sections.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use loan_calc_core::{solve, LoanRequest, PaymentType};
    use rust_decimal_macros::dec;

    #[test]
    fn test_schedule_table_lists_every_month() {
        let req = LoanRequest {
            payment_type: PaymentType::Differentiated,
            principal: Some(dec!(500_000)),
            payment: None,
            periods: Some(8),
            interest: Some(dec!(7.8)),
        };
        let rendered = render_table(&solve(&req).unwrap());
        assert!(rendered.contains("Month"));
        assert!(rendered.contains("65750"));
        assert!(rendered.contains("62907"));
        assert!(rendered.contains("overpayment"));
        assert!(rendered.contains("Methodology: Differentiated"));
    }

    #[test]
    fn test_periods_table_has_years_and_months() {
        let req = LoanRequest {
            payment_type: PaymentType::Annuity,
            principal: Some(dec!(350_000)),
            payment: Some(dec!(2_500)),
            periods: None,
            interest: Some(dec!(5)),
        };
        let rendered = render_table(&solve(&req).unwrap());
        assert!(rendered.contains("years"));
        assert!(rendered.contains("17"));
        assert!(!rendered.contains("Warnings:"));
    }
}
