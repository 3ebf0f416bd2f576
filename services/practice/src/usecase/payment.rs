use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use docket_domain::id::InvoiceId;

use crate::domain::repository::InvoiceRepository;
use crate::domain::types::{Invoice, PaymentStatus};
use crate::error::PracticeServiceError;

// ── VerifyPayment ────────────────────────────────────────────────────────────

/// Gateway callback payload. Every field is required; a zero amount counts as missing.
pub struct VerifyPaymentInput {
    pub reference: Option<String>,
    pub invoice_number: Option<String>,
    pub amount: Option<Decimal>,
    pub status: Option<String>,
}

pub struct VerifyPaymentUseCase<R: InvoiceRepository> {
    pub repo: R,
}

impl<R: InvoiceRepository> VerifyPaymentUseCase<R> {
    /// Checks run in order: required fields, invoice lookup, amount, gateway status.
    /// Replays rewrite the same status and reference.
    pub async fn execute(&self, input: VerifyPaymentInput) -> Result<Invoice, PracticeServiceError> {
        let non_blank = |v: Option<String>| v.map(|s| s.trim().to_owned()).filter(|s| !s.is_empty());
        let (Some(reference), Some(invoice_number), Some(amount), Some(status)) = (
            non_blank(input.reference),
            non_blank(input.invoice_number),
            input.amount.filter(|a| !a.is_zero()),
            non_blank(input.status),
        ) else {
            return Err(PracticeServiceError::MissingData);
        };

        let invoice = self
            .repo
            .find_by_number(&invoice_number)
            .await?
            .ok_or(PracticeServiceError::InvoiceNotFound)?;

        if amount != invoice.amount {
            tracing::warn!(
                invoice_number = %invoice_number,
                expected = %invoice.amount,
                received = %amount,
                "payment amount mismatch"
            );
            return Err(PracticeServiceError::AmountMismatch);
        }

        let payment_status =
            PaymentStatus::from_gateway(&status).ok_or(PracticeServiceError::InvalidPaymentStatus)?;

        let invoice = self
            .repo
            .record_payment(&invoice_number, payment_status, &reference)
            .await?
            .ok_or(PracticeServiceError::InvoiceNotFound)?;
        tracing::info!(
            invoice_number = %invoice_number,
            status = payment_status.as_str(),
            "payment recorded"
        );
        Ok(invoice)
    }
}

// ── GetInvoice ───────────────────────────────────────────────────────────────

pub struct GetInvoiceUseCase<R: InvoiceRepository> {
    pub repo: R,
}

impl<R: InvoiceRepository> GetInvoiceUseCase<R> {
    pub async fn execute(&self, invoice_number: &str) -> Result<Invoice, PracticeServiceError> {
        self.repo
            .find_by_number(invoice_number)
            .await?
            .ok_or(PracticeServiceError::InvoiceNotFound)
    }
}

// ── ListInvoices ─────────────────────────────────────────────────────────────

pub struct ListInvoicesUseCase<R: InvoiceRepository> {
    pub repo: R,
}

impl<R: InvoiceRepository> ListInvoicesUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<Invoice>, PracticeServiceError> {
        self.repo.list().await
    }
}

// ── CreateTestInvoice ────────────────────────────────────────────────────────

pub struct CreateInvoiceInput {
    pub invoice_number: String,
    pub client: String,
    pub amount: Decimal,
    pub due_date: NaiveDate,
}

pub struct CreateInvoiceUseCase<R: InvoiceRepository> {
    pub repo: R,
}

impl<R: InvoiceRepository> CreateInvoiceUseCase<R> {
    pub async fn execute(&self, input: CreateInvoiceInput) -> Result<Invoice, PracticeServiceError> {
        let invoice_number = input.invoice_number.trim().to_owned();
        let client = input.client.trim().to_owned();
        if invoice_number.is_empty() || client.is_empty() {
            return Err(PracticeServiceError::MissingData);
        }
        if self.repo.find_by_number(&invoice_number).await?.is_some() {
            return Err(PracticeServiceError::InvoiceAlreadyExists);
        }

        let now = Utc::now();
        let invoice = Invoice {
            id: InvoiceId(Uuid::now_v7()),
            invoice_number,
            client,
            amount: input.amount,
            due_date: input.due_date,
            payment_status: PaymentStatus::Pending,
            payment_reference: None,
            created_at: now,
            updated_at: now,
        };
        self.repo.create(&invoice).await?;
        Ok(invoice)
    }
}
