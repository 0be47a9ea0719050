use loan_calc_core::loan::annuity::PeriodsOutput;
use loan_calc_core::SolverResult;

/// Print the plain-text answer expected by the end user.
pub fn print_text(result: &SolverResult) {
    print!("{}", render_text(result));
}

pub fn render_text(result: &SolverResult) -> String {
    let mut out = String::new();
    match result {
        SolverResult::Payment(p) => {
            out.push_str(&format!("Your monthly payment = {}!\n", p.monthly_payment));
        }
        SolverResult::Principal(p) => {
            out.push_str(&format!("Your loan principal = {}!\n", p.principal));
        }
        SolverResult::Periods(p) => {
            out.push_str(&format!("It will take {} to repay this loan!\n", term_phrase(p)));
        }
        SolverResult::Schedule(s) => {
            for row in &s.payments {
                out.push_str(&format!("Month {}: payment is {}\n", row.month, row.payment));
            }
            out.push('\n');
        }
    }
    out.push_str(&format!("Overpayment = {}\n", result.overpayment()));
    out
}

fn term_phrase(p: &PeriodsOutput) -> String {
    match (p.years, p.months) {
        (y, m) if y > 0 && m > 0 => format!("{y} years and {m} months"),
        (y, _) if y > 0 => format!("{y} years"),
        (_, m) => format!("{m} months"),
    }
}
