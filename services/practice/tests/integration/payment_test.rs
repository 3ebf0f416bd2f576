use docket_practice::domain::types::PaymentStatus;
use docket_practice::error::PracticeServiceError;
use docket_practice::usecase::payment::{
    CreateInvoiceInput, CreateInvoiceUseCase, GetInvoiceUseCase, VerifyPaymentInput,
    VerifyPaymentUseCase,
};

use crate::helpers::{MockInvoiceRepo, date, decimal};

async fn issue(repo: &MockInvoiceRepo, number: &str, amount: &str) {
    CreateInvoiceUseCase { repo: repo.clone() }
        .execute(CreateInvoiceInput {
            invoice_number: number.to_owned(),
            client: "Grace Hopper".to_owned(),
            amount: decimal(amount),
            due_date: date(2025, 9, 30),
        })
        .await
        .unwrap();
}

fn callback(number: &str, amount: &str, status: &str) -> VerifyPaymentInput {
    VerifyPaymentInput {
        reference: Some("PSK-REF-001".to_owned()),
        invoice_number: Some(number.to_owned()),
        amount: Some(decimal(amount)),
        status: Some(status.to_owned()),
    }
}

#[tokio::test]
async fn should_mark_issued_invoice_paid_and_store_reference() {
    let repo = MockInvoiceRepo::default();
    issue(&repo, "INV-100", "500").await;

    let invoice = VerifyPaymentUseCase { repo: repo.clone() }
        .execute(callback("INV-100", "500.00", "success"))
        .await
        .unwrap();

    assert_eq!(invoice.payment_status, PaymentStatus::Paid);
    assert_eq!(invoice.payment_reference.as_deref(), Some("PSK-REF-001"));

    let stored = GetInvoiceUseCase { repo }.execute("INV-100").await.unwrap();
    assert_eq!(stored.payment_status, PaymentStatus::Paid);
}

#[tokio::test]
async fn should_keep_invoice_pending_on_amount_mismatch() {
    let repo = MockInvoiceRepo::default();
    issue(&repo, "INV-101", "500.00").await;

    let result = VerifyPaymentUseCase { repo: repo.clone() }
        .execute(callback("INV-101", "450.00", "success"))
        .await;

    assert!(
        matches!(result, Err(PracticeServiceError::AmountMismatch)),
        "expected AmountMismatch, got {result:?}"
    );
    let stored = repo.get("INV-101").unwrap();
    assert_eq!(stored.payment_status, PaymentStatus::Pending);
    assert!(stored.payment_reference.is_none());
}

#[tokio::test]
async fn should_record_failed_gateway_status() {
    let repo = MockInvoiceRepo::default();
    issue(&repo, "INV-102", "75.50").await;

    let invoice = VerifyPaymentUseCase { repo }
        .execute(callback("INV-102", "75.5", "failed"))
        .await
        .unwrap();

    assert_eq!(invoice.payment_status, PaymentStatus::Failed);
}

#[tokio::test]
async fn should_refuse_duplicate_invoice_number() {
    let repo = MockInvoiceRepo::default();
    issue(&repo, "INV-103", "10").await;

    let result = CreateInvoiceUseCase { repo }
        .execute(CreateInvoiceInput {
            invoice_number: " INV-103 ".to_owned(),
            client: "Someone Else".to_owned(),
            amount: decimal("20"),
            due_date: date(2025, 10, 1),
        })
        .await;

    assert!(matches!(
        result,
        Err(PracticeServiceError::InvoiceAlreadyExists)
    ));
}

#[tokio::test]
async fn should_report_unknown_invoice_number() {
    let result = GetInvoiceUseCase {
        repo: MockInvoiceRepo::default(),
    }
    .execute("INV-404")
    .await;

    assert!(matches!(result, Err(PracticeServiceError::InvoiceNotFound)));
}

#[tokio::test]
async fn should_treat_zero_amount_as_missing() {
    let repo = MockInvoiceRepo::default();
    issue(&repo, "INV-103", "120.00").await;

    let result = VerifyPaymentUseCase { repo: repo.clone() }
        .execute(callback("INV-103", "0.00", "success"))
        .await;

    assert!(matches!(result, Err(PracticeServiceError::MissingData)));
    assert_eq!(
        repo.get("INV-103").unwrap().payment_status,
        PaymentStatus::Pending
    );
}
