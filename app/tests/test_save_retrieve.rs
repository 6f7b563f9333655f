//! FILENAME: tests/test_save_retrieve.rs
//! Integration tests for saving and retrieving invoices through the ledger.

mod common;

use app_lib::{Decimal, InvoiceId, LedgerError, LineItems, SignatureRef, ValidationError};
use common::{items, TestHarness};
use std::str::FromStr;

// ============================================================================
// SAVE TESTS
// ============================================================================

#[test]
fn test_save_requires_vehicle() {
    let harness = TestHarness::new();
    let ledger = harness.ledger();
    let id = InvoiceId::first();

    let err = ledger
        .save_invoice(&id, "   ", &items(&[("Labor", "10")]), SignatureRef::for_invoice(&id))
        .unwrap_err();
    assert!(matches!(err, LedgerError::Validation(ValidationError::MissingVehicle)));
    assert_eq!(harness.row_count(), 0);
}

#[test]
fn test_save_requires_items() {
    let harness = TestHarness::new();
    let ledger = harness.ledger();
    let id = InvoiceId::first();

    let err = ledger
        .save_invoice(&id, "KA-01", &LineItems::new(), SignatureRef::for_invoice(&id))
        .unwrap_err();
    assert!(matches!(err, LedgerError::Validation(ValidationError::NoLineItems)));
    assert_eq!(harness.row_count(), 0);
}

#[test]
fn test_save_requires_identifier() {
    let harness = TestHarness::new();
    let err = harness
        .ledger()
        .save_invoice(&InvoiceId::new(""), "KA-01", &items(&[("Labor", "10")]), SignatureRef::default())
        .unwrap_err();
    assert!(matches!(err, LedgerError::Validation(ValidationError::MissingIdentifier)));
}

#[test]
fn test_duplicate_identifier_rejected() {
    let harness = TestHarness::new();
    let ledger = harness.ledger();
    let id = InvoiceId::first();
    let list = items(&[("Labor", "10")]);

    ledger
        .save_invoice(&id, "KA-01", &list, SignatureRef::for_invoice(&id))
        .unwrap();
    let err = ledger
        .save_invoice(&id, "KA-02", &list, SignatureRef::for_invoice(&id))
        .unwrap_err();

    assert!(matches!(err, LedgerError::DuplicateIdentifier(ref dup) if dup == &id));
    assert_eq!(harness.row_count(), 1);
    assert_eq!(ledger.retrieve_invoice("INV001").unwrap().vehicle, "KA-01");
}

#[test]
fn test_save_returns_total() {
    let harness = TestHarness::new();
    let ledger = harness.ledger();
    let id = ledger.next_identifier().unwrap();

    let total = ledger
        .save_invoice(
            &id,
            "KA-01",
            &items(&[("Oil Change", "450.00"), ("Tyre Rotation", "150.50")]),
            SignatureRef::for_invoice(&id),
        )
        .unwrap();
    assert_eq!(total, Decimal::from_str("600.50").unwrap());
}

// ============================================================================
// RETRIEVE TESTS
// ============================================================================

#[test]
fn test_retrieve_unknown_identifier() {
    let harness = TestHarness::with_invoices(&["INV001"]);
    let err = harness.ledger().retrieve_invoice("INV404").unwrap_err();
    assert!(matches!(err, LedgerError::NotFound(ref id) if id == "INV404"));
}

#[test]
fn test_retrieve_from_missing_table() {
    let harness = TestHarness::new();
    let err = app_lib::Ledger::new(harness.table_path())
        .retrieve_invoice("INV001")
        .unwrap_err();
    assert!(matches!(err, LedgerError::NotFound(_)));
}

#[test]
fn test_round_trip() {
    let harness = TestHarness::new();
    let ledger = harness.ledger();
    let id = ledger.next_identifier().unwrap();
    let list = items(&[("Bearing replacement", "300.0"), ("Labor", "200.0")]);

    ledger
        .save_invoice(&id, "TN-22-0042", &list, SignatureRef::for_invoice(&id))
        .unwrap();

    let record = ledger.retrieve_invoice(id.as_str()).unwrap();
    assert_eq!(record.id, id);
    assert_eq!(record.vehicle, "TN-22-0042");
    assert_eq!(record.items, list);
    assert_eq!(record.total(), Decimal::from(500));
    assert_eq!(record.signature.as_str(), "signature_INV001.ps");
}

#[test]
fn test_round_trip_keeps_delimiter_in_description() {
    let harness = TestHarness::new();
    let ledger = harness.ledger();
    let id = InvoiceId::first();
    let list = items(&[("Brakes; pads and discs", "120.25"), ("Labor; 2 hours", "80")]);

    ledger
        .save_invoice(&id, "KA-01", &list, SignatureRef::for_invoice(&id))
        .unwrap();

    let record = ledger.retrieve_invoice("INV001").unwrap();
    assert_eq!(record.items, list);
    assert_eq!(record.total(), Decimal::from_str("200.25").unwrap());
}

#[test]
fn test_retrieve_legacy_row() {
    let harness = TestHarness::with_legacy_rows(&[(
        "INV001",
        "MH-12-9999",
        "Oil Change; Tyre Rotation",
        "450.00; 150.50",
        600.5,
    )]);

    let record = harness.ledger().retrieve_invoice("INV001").unwrap();
    assert_eq!(record.vehicle, "MH-12-9999");
    assert_eq!(record.items.len(), 2);
    assert_eq!(record.items.as_slice()[0].description, "Oil Change");
    assert_eq!(record.total(), Decimal::from_str("600.50").unwrap());
}

#[test]
fn test_legacy_rows_are_preserved_on_append() {
    let harness = TestHarness::with_legacy_rows(&[("INV001", "MH-12", "Welding", "80.00", 80.0)]);
    let ledger = harness.ledger();
    let id = ledger.next_identifier().unwrap();
    assert_eq!(id.as_str(), "INV002");

    ledger
        .save_invoice(&id, "MH-13", &items(&[("Labor", "20")]), SignatureRef::for_invoice(&id))
        .unwrap();

    let ids: Vec<String> = ledger.identifiers().unwrap().iter().map(|i| i.to_string()).collect();
    assert_eq!(ids, vec!["INV001", "INV002"]);
    assert_eq!(ledger.retrieve_invoice("INV001").unwrap().total(), Decimal::from(80));
}

#[test]
fn test_retrieve_returns_first_match() {
    let harness = TestHarness::with_legacy_rows(&[
        ("INV001", "FIRST", "Labor", "10.00", 10.0),
        ("INV001", "SECOND", "Labor", "20.00", 20.0),
    ]);
    assert_eq!(harness.ledger().retrieve_invoice("INV001").unwrap().vehicle, "FIRST");
}
