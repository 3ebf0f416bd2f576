use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use docket_domain::id::InvoiceId;

use crate::domain::types::{Invoice, PaymentStatus};
use crate::error::PracticeServiceError;
use crate::state::AppState;
use crate::usecase::payment::{
    CreateInvoiceInput, CreateInvoiceUseCase, GetInvoiceUseCase, ListInvoicesUseCase,
    VerifyPaymentInput, VerifyPaymentUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct InvoiceResponse {
    pub id: InvoiceId,
    pub invoice_number: String,
    pub client: String,
    /// Exact decimal rendered as a string, e.g. `"500.00"`.
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub due_date: NaiveDate,
    pub payment_status: PaymentStatus,
    pub payment_reference: Option<String>,
    #[serde(serialize_with = "docket_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "docket_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Invoice> for InvoiceResponse {
    fn from(i: Invoice) -> Self {
        Self {
            id: i.id,
            invoice_number: i.invoice_number,
            client: i.client,
            amount: i.amount,
            due_date: i.due_date,
            payment_status: i.payment_status,
            payment_reference: i.payment_reference,
            created_at: i.created_at,
            updated_at: i.updated_at,
        }
    }
}

#[derive(Serialize)]
pub struct VerifyPaymentResponse {
    pub message: &'static str,
    pub invoice: InvoiceResponse,
}

// ── POST /api/payments/verify ────────────────────────────────────────────────

/// Gateway callback. Fields are optional here so a missing one surfaces as
/// `MISSING_DATA` rather than an extractor rejection. `amount` accepts a JSON
/// number or a decimal string.
#[derive(Deserialize)]
pub struct VerifyPaymentRequest {
    pub reference: Option<String>,
    pub invoice_number: Option<String>,
    pub amount: Option<Decimal>,
    pub status: Option<String>,
}

pub async fn verify_payment(
    State(state): State<AppState>,
    Json(body): Json<VerifyPaymentRequest>,
) -> Result<Json<VerifyPaymentResponse>, PracticeServiceError> {
    let usecase = VerifyPaymentUseCase {
        repo: state.invoice_repo(),
    };
    let invoice = usecase
        .execute(VerifyPaymentInput {
            reference: body.reference,
            invoice_number: body.invoice_number,
            amount: body.amount,
            status: body.status,
        })
        .await?;
    Ok(Json(VerifyPaymentResponse {
        message: "Payment verified",
        invoice: invoice.into(),
    }))
}

// ── GET /api/payments/invoice/{number} ───────────────────────────────────────

pub async fn get_invoice(
    State(state): State<AppState>,
    Path(number): Path<String>,
) -> Result<Json<InvoiceResponse>, PracticeServiceError> {
    let usecase = GetInvoiceUseCase {
        repo: state.invoice_repo(),
    };
    Ok(Json(usecase.execute(&number).await?.into()))
}

// ── GET /api/payments/invoices ───────────────────────────────────────────────

pub async fn list_invoices(
    State(state): State<AppState>,
) -> Result<Json<Vec<InvoiceResponse>>, PracticeServiceError> {
    let usecase = ListInvoicesUseCase {
        repo: state.invoice_repo(),
    };
    let invoices = usecase.execute().await?;
    Ok(Json(invoices.into_iter().map(Into::into).collect()))
}

// ── POST /api/payments/test-invoice ──────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateInvoiceRequest {
    pub invoice_number: String,
    pub client: String,
    pub amount: Decimal,
    pub due_date: NaiveDate,
}

pub async fn create_test_invoice(
    State(state): State<AppState>,
    Json(body): Json<CreateInvoiceRequest>,
) -> Result<(StatusCode, Json<InvoiceResponse>), PracticeServiceError> {
    let usecase = CreateInvoiceUseCase {
        repo: state.invoice_repo(),
    };
    let invoice = usecase
        .execute(CreateInvoiceInput {
            invoice_number: body.invoice_number,
            client: body.client,
            amount: body.amount,
            due_date: body.due_date,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(invoice.into())))
}
