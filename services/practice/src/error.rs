use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use docket_core::error::error_response;

/// Practice service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum PracticeServiceError {
    #[error("user not found")]
    UserNotFound,
    #[error("case not found")]
    CaseNotFound,
    #[error("appointment not found")]
    AppointmentNotFound,
    #[error("message not found")]
    MessageNotFound,
    #[error("notification not found")]
    NotificationNotFound,
    #[error("invoice not found")]
    InvoiceNotFound,
    #[error("user already exists")]
    UserAlreadyExists,
    #[error("invoice already exists")]
    InvoiceAlreadyExists,
    #[error("time slot already booked")]
    SlotAlreadyBooked,
    #[error("invalid client id")]
    InvalidClient,
    #[error("invalid lawyer id")]
    InvalidLawyer,
    #[error("invalid case id")]
    InvalidCase,
    #[error("invalid sender id")]
    InvalidSender,
    #[error("invalid receiver id")]
    InvalidReceiver,
    #[error("invalid message ids")]
    InvalidMessageIds,
    #[error("invalid related entity")]
    InvalidRelatedEntity,
    #[error("payment amount does not match invoice amount")]
    AmountMismatch,
    #[error("invalid payment status")]
    InvalidPaymentStatus,
    #[error("missing data")]
    MissingData,
    #[error("forbidden")]
    Forbidden,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl PracticeServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::CaseNotFound => "CASE_NOT_FOUND",
            Self::AppointmentNotFound => "APPOINTMENT_NOT_FOUND",
            Self::MessageNotFound => "MESSAGE_NOT_FOUND",
            Self::NotificationNotFound => "NOTIFICATION_NOT_FOUND",
            Self::InvoiceNotFound => "INVOICE_NOT_FOUND",
            Self::UserAlreadyExists => "USER_ALREADY_EXISTS",
            Self::InvoiceAlreadyExists => "INVOICE_ALREADY_EXISTS",
            Self::SlotAlreadyBooked => "SLOT_ALREADY_BOOKED",
            Self::InvalidClient => "INVALID_CLIENT",
            Self::InvalidLawyer => "INVALID_LAWYER",
            Self::InvalidCase => "INVALID_CASE",
            Self::InvalidSender => "INVALID_SENDER",
            Self::InvalidReceiver => "INVALID_RECEIVER",
            Self::InvalidMessageIds => "INVALID_MESSAGE_IDS",
            Self::InvalidRelatedEntity => "INVALID_RELATED_ENTITY",
            Self::AmountMismatch => "AMOUNT_MISMATCH",
            Self::InvalidPaymentStatus => "INVALID_PAYMENT_STATUS",
            Self::MissingData => "MISSING_DATA",
            Self::Forbidden => "FORBIDDEN",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::UserNotFound
            | Self::CaseNotFound
            | Self::AppointmentNotFound
            | Self::MessageNotFound
            | Self::NotificationNotFound
            | Self::InvoiceNotFound => StatusCode::NOT_FOUND,
            Self::UserAlreadyExists | Self::InvoiceAlreadyExists | Self::SlotAlreadyBooked => {
                StatusCode::CONFLICT
            }
            Self::InvalidClient
            | Self::InvalidLawyer
            | Self::InvalidCase
            | Self::InvalidSender
            | Self::InvalidReceiver
            | Self::InvalidMessageIds
            | Self::InvalidRelatedEntity
            | Self::AmountMismatch
            | Self::InvalidPaymentStatus
            | Self::MissingData => StatusCode::BAD_REQUEST,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for PracticeServiceError {
    fn into_response(self) -> Response {
        if let Self::Internal(ref e) = self {
            tracing::error!(error = ?e, kind = "INTERNAL", "internal error");
        }
        error_response(self.status(), self.kind(), self.to_string())
    }
}
