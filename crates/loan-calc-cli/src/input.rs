use std::fs;
use std::io::{self, Read};
use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;

use loan_calc_core::loan::validation;
use loan_calc_core::LoanRequest;

/// Where a JSON loan request comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestSource<'a> {
    Stdin,
    File(&'a Path),
}

impl<'a> RequestSource<'a> {
    /// `-` means stdin, anything else is a path.
    pub fn from_arg(arg: &'a str) -> Self {
        if arg == "-" {
            RequestSource::Stdin
        } else {
            RequestSource::File(Path::new(arg))
        }
    }
}

/// JSON shape of a request. `type` stays a raw string so an unknown or
/// missing payment type is rejected by validation, as it is for flags.
#[derive(Debug, Deserialize)]
struct RequestDocument {
    #[serde(rename = "type", default)]
    payment_type: Option<String>,
    #[serde(default)]
    principal: Option<Decimal>,
    #[serde(default)]
    payment: Option<Decimal>,
    #[serde(default)]
    periods: Option<i64>,
    #[serde(default)]
    interest: Option<Decimal>,
}

/// Read and deserialise a loan request.
pub fn read_request(source: RequestSource<'_>) -> Result<LoanRequest, Box<dyn std::error::Error>> {
    let (origin, contents) = match source {
        RequestSource::Stdin => {
            if atty::is(atty::Stream::Stdin) {
                return Err("--input - expects a JSON loan request piped on stdin".into());
            }
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            ("stdin".to_string(), buffer)
        }
        RequestSource::File(path) => {
            if !path.is_file() {
                return Err(format!("Not a readable file: {}", path.display()).into());
            }
            let contents = fs::read_to_string(path)
                .map_err(|e| format!("Failed to read '{}': {}", path.display(), e))?;
            (format!("'{}'", path.display()), contents)
        }
    };

    parse_request(&origin, &contents)
}

fn parse_request(origin: &str, contents: &str) -> Result<LoanRequest, Box<dyn std::error::Error>> {
    let trimmed = contents.trim();
    if trimmed.is_empty() {
        return Err(format!("No loan request found in {origin}").into());
    }
    let doc: RequestDocument = serde_json::from_str(trimmed)
        .map_err(|e| format!("Failed to parse loan request from {origin}: {e}"))?;

    Ok(LoanRequest {
        payment_type: validation::parse_payment_type(doc.payment_type.as_deref())?,
        principal: doc.principal,
        payment: doc.payment,
        periods: doc.periods,
        interest: doc.interest,
    })
}
