use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use docket_domain::account::AccountType;
use docket_domain::id::{AppointmentId, CaseId, InvoiceId, MessageId};
use docket_domain::pagination::Window;
use docket_domain::priority::Priority;

use crate::error::PracticeServiceError;

// ── Users ────────────────────────────────────────────────────────────────────

/// Practice account. `auth_subject` is the identity provider's subject id.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub auth_subject: String,
    pub email: String,
    pub full_name: String,
    pub account_type: AccountType,
    pub phone_number: Option<String>,
    pub profile_picture: String,
    pub is_active: bool,
    pub last_login: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// First word of the full name.
    pub fn display_name(&self) -> &str {
        self.full_name.split_whitespace().next().unwrap_or_default()
    }

    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            full_name: self.full_name.clone(),
            email: self.email.clone(),
            account_type: self.account_type,
            phone_number: self.phone_number.clone(),
        }
    }
}

/// Display fields attached wherever a user is referenced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSummary {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub account_type: AccountType,
    pub phone_number: Option<String>,
}

/// Partial user update. `None` leaves the field untouched.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub account_type: Option<AccountType>,
    pub phone_number: Option<String>,
    pub profile_picture: Option<String>,
    pub is_active: Option<bool>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.full_name.is_none()
            && self.account_type.is_none()
            && self.phone_number.is_none()
            && self.profile_picture.is_none()
            && self.is_active.is_none()
    }

    /// Apply the storage normalization rules: emails lowercased and trimmed, names and
    /// phone numbers trimmed.
    pub fn normalized(self) -> Self {
        Self {
            email: self.email.map(|e| normalize_email(&e)),
            full_name: self.full_name.map(|n| n.trim().to_owned()),
            phone_number: self.phone_number.map(|p| p.trim().to_owned()),
            ..self
        }
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Trim, mapping blank input to `None`.
pub fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

// ── Cases ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseType {
    Criminal,
    Civil,
    Family,
    Corporate,
    RealEstate,
    Employment,
    IntellectualProperty,
    #[default]
    Other,
}

impl CaseType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Criminal => "criminal",
            Self::Civil => "civil",
            Self::Family => "family",
            Self::Corporate => "corporate",
            Self::RealEstate => "real_estate",
            Self::Employment => "employment",
            Self::IntellectualProperty => "intellectual_property",
            Self::Other => "other",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "criminal" => Some(Self::Criminal),
            "civil" => Some(Self::Civil),
            "family" => Some(Self::Family),
            "corporate" => Some(Self::Corporate),
            "real_estate" => Some(Self::RealEstate),
            "employment" => Some(Self::Employment),
            "intellectual_property" => Some(Self::IntellectualProperty),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    #[default]
    Active,
    Pending,
    Review,
    Completed,
    Closed,
}

impl CaseStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Pending => "pending",
            Self::Review => "review",
            Self::Completed => "completed",
            Self::Closed => "closed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(Self::Active),
            "pending" => Some(Self::Pending),
            "review" => Some(Self::Review),
            "completed" => Some(Self::Completed),
            "closed" => Some(Self::Closed),
            _ => None,
        }
    }

    /// Still being worked on.
    pub fn is_active(self) -> bool {
        matches!(self, Self::Active | Self::Pending | Self::Review)
    }
}

#[derive(Debug, Clone)]
pub struct Case {
    pub id: CaseId,
    pub title: String,
    pub description: Option<String>,
    pub client_id: Uuid,
    pub lawyer_id: Uuid,
    pub case_type: CaseType,
    pub status: CaseStatus,
    pub priority: Priority,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub estimated_completion: Option<NaiveDate>,
    /// Upload order.
    pub documents: Vec<CaseDocument>,
    /// Creation order.
    pub notes: Vec<CaseNote>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Case {
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    pub fn summary(&self) -> CaseSummary {
        CaseSummary {
            id: self.id,
            title: self.title.clone(),
            case_type: self.case_type,
            status: self.status,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseDocument {
    pub id: Uuid,
    pub name: String,
    pub url: String,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseNote {
    pub id: Uuid,
    pub content: String,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct CasePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub client_id: Option<Uuid>,
    pub lawyer_id: Option<Uuid>,
    pub case_type: Option<CaseType>,
    pub status: Option<CaseStatus>,
    pub priority: Option<Priority>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub estimated_completion: Option<NaiveDate>,
}

impl CasePatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.client_id.is_none()
            && self.lawyer_id.is_none()
            && self.case_type.is_none()
            && self.status.is_none()
            && self.priority.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.estimated_completion.is_none()
    }
}

/// Display fields attached wherever a case is referenced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseSummary {
    pub id: CaseId,
    pub title: String,
    pub case_type: CaseType,
    pub status: CaseStatus,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CaseFilter {
    pub client_id: Option<Uuid>,
    pub lawyer_id: Option<Uuid>,
    pub status: Option<CaseStatus>,
}

// ── Appointments ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    #[default]
    Scheduled,
    Completed,
    Canceled,
}

impl AppointmentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Completed => "completed",
            Self::Canceled => "canceled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "scheduled" => Some(Self::Scheduled),
            "completed" => Some(Self::Completed),
            "canceled" => Some(Self::Canceled),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Appointment {
    pub id: AppointmentId,
    pub client_id: Uuid,
    pub lawyer_id: Uuid,
    pub case_id: CaseId,
    pub date: NaiveDate,
    /// Slot label, e.g. `"2:30 PM"`.
    pub time: String,
    pub status: AppointmentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct AppointmentPatch {
    pub client_id: Option<Uuid>,
    pub lawyer_id: Option<Uuid>,
    pub case_id: Option<CaseId>,
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
    pub status: Option<AppointmentStatus>,
}

impl AppointmentPatch {
    pub fn is_empty(&self) -> bool {
        self.client_id.is_none()
            && self.lawyer_id.is_none()
            && self.case_id.is_none()
            && self.date.is_none()
            && self.time.is_none()
            && self.status.is_none()
    }

}

/// Conjunctive filter; `date_from`/`date_to` are inclusive.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppointmentFilter {
    pub client_id: Option<Uuid>,
    pub lawyer_id: Option<Uuid>,
    pub case_id: Option<CaseId>,
    pub status: Option<AppointmentStatus>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

/// Canonical slots minus the booked ones, canonical order preserved.
pub fn available_slots(canonical: &[String], booked: &[String]) -> Vec<String> {
    let booked: HashSet<&str> = booked.iter().map(String::as_str).collect();
    canonical
        .iter()
        .filter(|slot| !booked.contains(slot.as_str()))
        .cloned()
        .collect()
}

// ── Messages ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    #[default]
    Text,
    File,
    System,
}

impl MessageKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::File => "file",
            Self::System => "system",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "text" => Some(Self::Text),
            "file" => Some(Self::File),
            "system" => Some(Self::System),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: MessageId,
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub case_id: Option<CaseId>,
    pub content: String,
    pub kind: MessageKind,
    pub file_url: Option<String>,
    pub file_name: Option<String>,
    pub is_read: bool,
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Which side of a participant's messages to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mailbox {
    Sent,
    Received,
    #[default]
    Both,
}

pub const DEFAULT_CONVERSATION_LIMIT: u64 = 50;

/// Message listings. All variants are ordered newest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageQuery {
    All,
    Participant { user_id: Uuid, mailbox: Mailbox },
    /// Unread messages addressed to the user.
    Unread { receiver_id: Uuid },
    /// Both directions between two users; symmetric in `a` and `b`.
    Conversation {
        a: Uuid,
        b: Uuid,
        case_id: Option<CaseId>,
        limit: u64,
    },
}

impl MessageQuery {
    /// Conversation between `a` and `b`; a missing or zero limit falls back to
    /// [`DEFAULT_CONVERSATION_LIMIT`].
    pub fn conversation(a: Uuid, b: Uuid, case_id: Option<CaseId>, limit: Option<u64>) -> Self {
        Self::Conversation {
            a,
            b,
            case_id,
            limit: limit
                .filter(|l| *l > 0)
                .unwrap_or(DEFAULT_CONVERSATION_LIMIT),
        }
    }

    pub fn limit(&self) -> Option<u64> {
        match *self {
            Self::Conversation { limit, .. } => Some(limit),
            _ => None,
        }
    }
}

// ── Notifications ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Case,
    Appointment,
    Message,
    Payment,
    System,
    Document,
}

impl NotificationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Case => "case",
            Self::Appointment => "appointment",
            Self::Message => "message",
            Self::Payment => "payment",
            Self::System => "system",
            Self::Document => "document",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "case" => Some(Self::Case),
            "appointment" => Some(Self::Appointment),
            "message" => Some(Self::Message),
            "payment" => Some(Self::Payment),
            "system" => Some(Self::System),
            "document" => Some(Self::Document),
            _ => None,
        }
    }
}

/// Entity a notification points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelatedEntity {
    Case(CaseId),
    Appointment(AppointmentId),
    Message(MessageId),
    Invoice(InvoiceId),
}

impl RelatedEntity {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Case(_) => "Case",
            Self::Appointment(_) => "Appointment",
            Self::Message(_) => "Message",
            Self::Invoice(_) => "Invoice",
        }
    }

    pub fn id(&self) -> Uuid {
        match *self {
            Self::Case(id) => id.0,
            Self::Appointment(id) => id.0,
            Self::Message(id) => id.0,
            Self::Invoice(id) => id.0,
        }
    }

    /// Build from the stored `(type, id)` pair. Both or neither must be present.
    pub fn from_parts(
        kind: Option<&str>,
        id: Option<Uuid>,
    ) -> Result<Option<Self>, PracticeServiceError> {
        match (kind, id) {
            (None, None) => Ok(None),
            (Some("Case"), Some(id)) => Ok(Some(Self::Case(CaseId(id)))),
            (Some("Appointment"), Some(id)) => Ok(Some(Self::Appointment(AppointmentId(id)))),
            (Some("Message"), Some(id)) => Ok(Some(Self::Message(MessageId(id)))),
            (Some("Invoice"), Some(id)) => Ok(Some(Self::Invoice(InvoiceId(id)))),
            _ => Err(PracticeServiceError::InvalidRelatedEntity),
        }
    }
}

/// Related entity resolved for display.
#[derive(Debug, Clone)]
pub enum RelatedSummary {
    Case(CaseSummary),
    Appointment(Appointment),
    Message(Message),
    Invoice(Invoice),
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub body: String,
    pub kind: NotificationKind,
    pub related: Option<RelatedEntity>,
    pub is_read: bool,
    pub priority: Priority,
    pub action_url: Option<String>,
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NotificationQuery {
    pub unread_only: bool,
    pub kind: Option<NotificationKind>,
    pub window: Window,
}

// ── Invoices ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Failed => "failed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "paid" => Some(Self::Paid),
            "failed" => Some(Self::Failed),
            _ => None,
        }
    }

    /// Map the gateway's callback status onto the ledger. Only `success` and `failed`
    /// are meaningful.
    pub fn from_gateway(status: &str) -> Option<Self> {
        match status {
            "success" => Some(Self::Paid),
            "failed" => Some(Self::Failed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invoice {
    pub id: InvoiceId,
    pub invoice_number: String,
    /// Client display name as printed on the invoice.
    pub client: String,
    pub amount: Decimal,
    pub due_date: NaiveDate,
    pub payment_status: PaymentStatus,
    pub payment_reference: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
