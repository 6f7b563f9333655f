//! FILENAME: tests/test_shell.rs
//! Integration tests driving the console shell end to end.

mod common;

use app_lib::run_shell;
use common::TestHarness;
use std::io::Cursor;

fn run(harness: &TestHarness, script: &str) -> String {
    let mut session = harness.session();
    let mut out = Vec::new();
    run_shell(&mut session, Cursor::new(script.to_string()), &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_save_then_retrieve() {
    let harness = TestHarness::new();
    let output = run(
        &harness,
        "vehicle KA-01-1234\n\
         add 450.00 Oil Change\n\
         add 150.50 Tyre Rotation\n\
         save\n\
         retrieve INV001\n\
         list\n\
         quit\n",
    );

    assert!(output.contains("Total: ₹600.50"));
    assert!(output.contains("Invoice INV001 saved successfully! Total: ₹600.50"));
    assert!(output.contains("Bill No: INV002"));
    assert!(output.contains("2. Tyre Rotation - ₹150.50"));
    assert!(output.contains("signature_INV001.ps"));
    assert!(harness.signatures().exists(&app_lib::InvoiceId::first()));
}

#[test]
fn test_errors_are_reported_and_loop_continues() {
    let harness = TestHarness::new();
    let output = run(
        &harness,
        "add abc Labor\n\
         save\n\
         retrieve INV009\n\
         bogus\n\
         next\n",
    );

    assert!(output.contains("Error: Input error: Amount must be a number: abc"));
    assert!(output.contains("Error: Input error: Vehicle number is required"));
    assert!(output.contains("Error: No invoice found with Bill No: INV009"));
    assert!(output.contains("Unknown command 'bogus'"));
    assert!(output.ends_with("Bill No: INV001\n"));
    assert_eq!(harness.row_count(), 0);
}

#[test]
fn test_list_empty_ledger() {
    let harness = TestHarness::new();
    let output = run(&harness, "list\n");
    assert!(output.contains("No invoices saved yet"));
}
