#![allow(async_fn_in_trait)]

use uuid::Uuid;

use docket_domain::account::AccountType;
use docket_domain::id::{AppointmentId, CaseId, MessageId};

use crate::domain::types::{
    Appointment, AppointmentFilter, AppointmentPatch, Case, CaseDocument, CaseFilter, CaseNote,
    CasePatch, CaseSummary, Invoice, Message, MessageQuery, Notification, NotificationQuery,
    PaymentStatus, RelatedEntity, RelatedSummary, User, UserPatch,
};
use crate::error::PracticeServiceError;

/// Repository for practice accounts.
pub trait UserRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<User>, PracticeServiceError>;

    async fn list_by_account_type(
        &self,
        account_type: AccountType,
    ) -> Result<Vec<User>, PracticeServiceError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, PracticeServiceError>;

    async fn find_by_auth_subject(
        &self,
        subject: &str,
    ) -> Result<Option<User>, PracticeServiceError>;

    /// Any user holding either the subject or the (normalized) email.
    async fn find_by_subject_or_email(
        &self,
        subject: &str,
        email: &str,
    ) -> Result<Option<User>, PracticeServiceError>;

    /// Users among `ids`; unknown ids are skipped.
    async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<User>, PracticeServiceError>;

    /// Fails with `UserAlreadyExists` when the subject or email is taken.
    async fn create(&self, user: &User) -> Result<(), PracticeServiceError>;

    /// Returns `None` if the user does not exist.
    async fn update(
        &self,
        id: Uuid,
        patch: &UserPatch,
    ) -> Result<Option<User>, PracticeServiceError>;

    /// Clear the active flag. Returns `false` if the user does not exist.
    async fn deactivate(&self, id: Uuid) -> Result<bool, PracticeServiceError>;

    /// Returns `false` if the user does not exist.
    async fn delete(&self, id: Uuid) -> Result<bool, PracticeServiceError>;
}

/// Repository for cases and their documents and notes.
pub trait CaseRepository: Send + Sync {
    /// Newest first, with documents and notes attached.
    async fn list(&self, filter: CaseFilter) -> Result<Vec<Case>, PracticeServiceError>;

    async fn find_by_id(&self, id: CaseId) -> Result<Option<Case>, PracticeServiceError>;

    async fn exists(&self, id: CaseId) -> Result<bool, PracticeServiceError>;

    /// Summaries among `ids`; unknown ids are skipped.
    async fn find_summaries(&self, ids: &[CaseId])
    -> Result<Vec<CaseSummary>, PracticeServiceError>;

    async fn create(&self, case: &Case) -> Result<(), PracticeServiceError>;

    /// Returns `None` if the case does not exist.
    async fn update(
        &self,
        id: CaseId,
        patch: &CasePatch,
    ) -> Result<Option<Case>, PracticeServiceError>;

    /// Deletes the case with its documents and notes. Returns `false` if it did not exist.
    async fn delete(&self, id: CaseId) -> Result<bool, PracticeServiceError>;

    /// Fails with `CaseNotFound` when the case does not exist.
    async fn append_document(
        &self,
        id: CaseId,
        document: &CaseDocument,
    ) -> Result<(), PracticeServiceError>;

    /// Fails with `CaseNotFound` when the case does not exist.
    async fn append_note(&self, id: CaseId, note: &CaseNote) -> Result<(), PracticeServiceError>;
}

/// Repository for appointments.
///
/// Writes that would leave two `scheduled` appointments on the same
/// `(lawyer_id, date, time)` fail with `SlotAlreadyBooked`.
pub trait AppointmentRepository: Send + Sync {
    /// Sorted by date then time, ascending.
    async fn list(
        &self,
        filter: AppointmentFilter,
    ) -> Result<Vec<Appointment>, PracticeServiceError>;

    async fn find_by_id(
        &self,
        id: AppointmentId,
    ) -> Result<Option<Appointment>, PracticeServiceError>;

    /// The scheduled appointment occupying a slot, if any.
    async fn find_scheduled(
        &self,
        lawyer_id: Uuid,
        date: chrono::NaiveDate,
        time: &str,
    ) -> Result<Option<Appointment>, PracticeServiceError>;

    /// Slot labels of the lawyer's scheduled appointments on `date`.
    async fn booked_times(
        &self,
        lawyer_id: Uuid,
        date: chrono::NaiveDate,
    ) -> Result<Vec<String>, PracticeServiceError>;

    async fn create(&self, appointment: &Appointment) -> Result<(), PracticeServiceError>;

    /// Returns `None` if the appointment does not exist.
    async fn update(
        &self,
        id: AppointmentId,
        patch: &AppointmentPatch,
    ) -> Result<Option<Appointment>, PracticeServiceError>;

    async fn delete(&self, id: AppointmentId) -> Result<bool, PracticeServiceError>;
}

/// Repository for direct messages.
pub trait MessageRepository: Send + Sync {
    /// Newest first; conversation queries are truncated to their limit.
    async fn list(&self, query: MessageQuery) -> Result<Vec<Message>, PracticeServiceError>;

    async fn find_by_id(&self, id: MessageId) -> Result<Option<Message>, PracticeServiceError>;

    async fn create(&self, message: &Message) -> Result<(), PracticeServiceError>;

    /// Set read and stamp `read_at`. Returns `None` if the message does not exist.
    async fn mark_read(&self, id: MessageId) -> Result<Option<Message>, PracticeServiceError>;

    /// Mark every listed message read regardless of owner or current state.
    /// Returns the number of rows touched.
    async fn mark_many_read(&self, ids: &[MessageId]) -> Result<u64, PracticeServiceError>;

    async fn delete(&self, id: MessageId) -> Result<bool, PracticeServiceError>;
}

/// Repository for a user's notification feed. Every call is scoped to `user_id`.
pub trait NotificationRepository: Send + Sync {
    /// Newest first, windowed by `query.window`.
    async fn list(
        &self,
        user_id: Uuid,
        query: NotificationQuery,
    ) -> Result<Vec<Notification>, PracticeServiceError>;

    async fn count(&self, user_id: Uuid) -> Result<u64, PracticeServiceError>;

    async fn count_unread(&self, user_id: Uuid) -> Result<u64, PracticeServiceError>;

    async fn create(&self, notification: &Notification) -> Result<(), PracticeServiceError>;

    /// Mark unread notifications read: the listed ones, or all when `ids` is `None`.
    /// Returns the number of rows touched.
    async fn mark_read(
        &self,
        user_id: Uuid,
        ids: Option<&[Uuid]>,
    ) -> Result<u64, PracticeServiceError>;

    /// Returns `false` if the notification does not exist or belongs to someone else.
    async fn mark_one_read(&self, user_id: Uuid, id: Uuid) -> Result<bool, PracticeServiceError>;

    /// Returns `false` if the notification does not exist or belongs to someone else.
    async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<bool, PracticeServiceError>;

    async fn delete_all(&self, user_id: Uuid) -> Result<u64, PracticeServiceError>;
}

/// Resolves a notification's related entity into display data.
pub trait RelatedEntityResolver: Send + Sync {
    /// `None` when the referenced entity no longer exists.
    async fn resolve(
        &self,
        entity: RelatedEntity,
    ) -> Result<Option<RelatedSummary>, PracticeServiceError>;
}

/// Repository for invoices.
pub trait InvoiceRepository: Send + Sync {
    /// Newest first.
    async fn list(&self) -> Result<Vec<Invoice>, PracticeServiceError>;

    async fn find_by_number(&self, number: &str)
    -> Result<Option<Invoice>, PracticeServiceError>;

    /// Fails with `InvoiceAlreadyExists` when the number is taken.
    async fn create(&self, invoice: &Invoice) -> Result<(), PracticeServiceError>;

    /// Persist status and reference together.
    async fn record_payment(
        &self,
        invoice_number: &str,
        status: PaymentStatus,
        reference: &str,
    ) -> Result<Option<Invoice>, PracticeServiceError>;
}
