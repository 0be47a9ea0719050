use pretty_assertions::assert_eq;
use std::io::Write;
use std::process::{Command, Output, Stdio};

fn creditcalc(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_creditcalc"))
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::null())
        .output()
        .expect("failed to run creditcalc")
}

fn stdout_of(args: &[&str]) -> String {
    let out = creditcalc(args);
    assert!(out.status.success(), "exit status {:?}", out.status);
    String::from_utf8(out.stdout).unwrap()
}

// ===========================================================================
// Annuity
// ===========================================================================

#[test]
fn test_annuity_payment() {
    let stdout = stdout_of(&[
        "--type=annuity",
        "--principal=1000000",
        "--periods=60",
        "--interest=10",
    ]);
    assert_eq!(stdout, "Your monthly payment = 21248!\nOverpayment = 274880\n");
}

#[test]
fn test_annuity_principal() {
    let stdout = stdout_of(&[
        "--type=annuity",
        "--payment=8722.34",
        "--periods=120",
        "--interest=5.6",
    ]);
    assert_eq!(stdout, "Your loan principal = 800049!\nOverpayment = 246631\n");
}

#[test]
fn test_annuity_periods() {
    let stdout = stdout_of(&[
        "--type=annuity",
        "--principal=500000",
        "--payment=23000",
        "--interest=7.8",
    ]);
    assert_eq!(
        stdout,
        "It will take 2 years to repay this loan!\nOverpayment = 52000\n"
    );
}

#[test]
fn test_space_separated_flags() {
    let stdout = stdout_of(&[
        "--type", "annuity", "--principal", "350000", "--payment", "2500", "--interest", "5",
    ]);
    assert_eq!(
        stdout,
        "It will take 17 years and 7 months to repay this loan!\nOverpayment = 177500\n"
    );
}

// ===========================================================================
// Differentiated
// ===========================================================================

#[test]
fn test_diff_schedule() {
    let stdout = stdout_of(&[
        "--type=diff",
        "--principal=500000",
        "--periods=8",
        "--interest=7.8",
    ]);
    let expected = "\
Month 1: payment is 65750
Month 2: payment is 65344
Month 3: payment is 64938
Month 4: payment is 64532
Month 5: payment is 64125
Month 6: payment is 63719
Month 7: payment is 63313
Month 8: payment is 62907

Overpayment = 14628
";
    assert_eq!(stdout, expected);
}

// ===========================================================================
// Rejection
// ===========================================================================

#[test]
fn test_rejections_print_incorrect_parameters() {
    let cases: [&[&str]; 8] = [
        // interest missing
        &["--type=annuity", "--principal=1000000", "--periods=60"],
        // two fields missing
        &["--type=annuity", "--principal=1000000", "--interest=10"],
        // unknown type
        &["--type=fixed", "--principal=1000000", "--periods=60", "--interest=10"],
        // negative periods
        &["--type=diff", "--principal=30000", "--periods=-14", "--interest=10"],
        // payment supplied for a differentiated schedule
        &[
            "--type=diff",
            "--principal=1000000",
            "--payment=100000",
            "--periods=10",
            "--interest=10",
        ],
        // unparseable number
        &["--type=annuity", "--principal=lots", "--periods=60", "--interest=10"],
        // payment never covers the interest
        &["--type=annuity", "--principal=1000000", "--payment=5000", "--interest=12"],
        // schedule arithmetic overflows
        &[
            "--type=diff",
            "--principal=79228162514264337593543950335",
            "--periods=1",
            "--interest=1",
        ],
    ];
    for args in cases {
        let out = creditcalc(args);
        assert!(out.status.success(), "{args:?} exited with {:?}", out.status);
        assert_eq!(
            String::from_utf8(out.stdout).unwrap(),
            "Incorrect parameters\n",
            "{args:?}"
        );
    }
}

// ===========================================================================
// Supplementary inputs and formats
// ===========================================================================

#[test]
fn test_json_output() {
    let stdout = stdout_of(&[
        "--type=annuity",
        "--principal=1000000",
        "--periods=60",
        "--interest=10",
        "--output=json",
    ]);
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["result"]["solved_for"], "payment");
    assert_eq!(value["result"]["monthly_payment"], 21248);
    assert_eq!(value["metadata"]["precision"], "rust_decimal_128bit");
}

fn creditcalc_with_stdin(request: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_creditcalc"))
        .args(["--input", "-"])
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn creditcalc");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(request.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

#[test]
fn test_request_from_stdin() {
    let out = creditcalc_with_stdin(
        r#"{"type": "diff", "principal": 1000000, "periods": 10, "interest": 10}"#,
    );
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.starts_with("Month 1: payment is 108334\n"));
    assert!(stdout.ends_with("\nOverpayment = 45837\n"));
}

#[test]
fn test_stdin_request_with_bad_type_is_rejected() {
    for request in [
        r#"{"type": "balloon", "principal": 1000000, "periods": 10, "interest": 10}"#,
        r#"{"principal": 1000000, "periods": 10, "interest": 10}"#,
    ] {
        let out = creditcalc_with_stdin(request);
        assert!(out.status.success(), "{request} exited with {:?}", out.status);
        assert_eq!(
            String::from_utf8(out.stdout).unwrap(),
            "Incorrect parameters\n",
            "{request}"
        );
    }
}

#[test]
fn test_missing_input_file_is_an_error() {
    let out = creditcalc(&["--input", "/definitely/not/here.json"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
}
