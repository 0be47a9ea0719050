use loan_calc_core::SolverResult;

use super::summary_fields;

/// Write the result as CSV to stdout.
pub fn print_csv(result: &SolverResult) {
    match render_csv(result) {
        Ok(s) => print!("{}", s),
        Err(e) => eprintln!("CSV serialization error: {}", e),
    }
}

/// `month,payment` rows for a schedule followed by its totals; otherwise a
/// two-column `field,value` listing.
pub fn render_csv(result: &SolverResult) -> Result<String, Box<dyn std::error::Error>> {
    let mut wtr = csv::Writer::from_writer(Vec::new());

    if let SolverResult::Schedule(schedule) = result {
        wtr.write_record(["month", "payment"])?;
        for row in &schedule.payments {
            wtr.write_record([row.month.to_string(), row.payment.to_string()])?;
        }
        wtr.write_record(["total_paid".to_string(), schedule.total_paid.to_string()])?;
        wtr.write_record(["overpayment".to_string(), schedule.overpayment.to_string()])?;
    } else {
        wtr.write_record(["field", "value"])?;
        for (key, val) in summary_fields(result) {
            wtr.write_record([key, val])?;
        }
    }

    let bytes = wtr.into_inner().map_err(|e| e.to_string())?;
    Ok(String::from_utf8(bytes)?)
}
