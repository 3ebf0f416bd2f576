use std::sync::{Arc, Mutex};

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use docket_domain::account::AccountType;
use docket_domain::id::{AppointmentId, CaseId, InvoiceId, MessageId};
use docket_domain::priority::Priority;

use docket_practice::domain::repository::{
    AppointmentRepository, CaseRepository, InvoiceRepository, MessageRepository,
    NotificationRepository, RelatedEntityResolver, UserRepository,
};
use docket_practice::domain::types::{
    Appointment, AppointmentFilter, AppointmentPatch, AppointmentStatus, Case, CaseDocument,
    CaseFilter, CaseNote, CasePatch, CaseStatus, CaseSummary, CaseType, Invoice, Mailbox, Message,
    MessageKind, MessageQuery, Notification, NotificationKind, NotificationQuery, PaymentStatus,
    RelatedEntity, RelatedSummary, User, UserPatch,
};
use docket_practice::error::PracticeServiceError;

// ── In-memory query semantics ───────────────────────────────────────────────

/// Same occupied slot: both scheduled, same lawyer, date and time.
fn slot_conflict(existing: &Appointment, candidate: &Appointment) -> bool {
    existing.id != candidate.id
        && existing.status == AppointmentStatus::Scheduled
        && candidate.status == AppointmentStatus::Scheduled
        && existing.lawyer_id == candidate.lawyer_id
        && existing.date == candidate.date
        && existing.time == candidate.time
}

fn apply_patch(patch: &AppointmentPatch, appointment: &mut Appointment) {
    if let Some(client_id) = patch.client_id {
        appointment.client_id = client_id;
    }
    if let Some(lawyer_id) = patch.lawyer_id {
        appointment.lawyer_id = lawyer_id;
    }
    if let Some(case_id) = patch.case_id {
        appointment.case_id = case_id;
    }
    if let Some(date) = patch.date {
        appointment.date = date;
    }
    if let Some(ref time) = patch.time {
        appointment.time = time.clone();
    }
    if let Some(status) = patch.status {
        appointment.status = status;
    }
}

fn appointment_matches(filter: &AppointmentFilter, a: &Appointment) -> bool {
    filter.client_id.is_none_or(|id| a.client_id == id)
        && filter.lawyer_id.is_none_or(|id| a.lawyer_id == id)
        && filter.case_id.is_none_or(|id| a.case_id == id)
        && filter.status.is_none_or(|s| a.status == s)
        && filter.date_from.is_none_or(|d| a.date >= d)
        && filter.date_to.is_none_or(|d| a.date <= d)
}

fn message_matches(query: &MessageQuery, m: &Message) -> bool {
    match *query {
        MessageQuery::All => true,
        MessageQuery::Participant { user_id, mailbox } => match mailbox {
            Mailbox::Sent => m.sender_id == user_id,
            Mailbox::Received => m.receiver_id == user_id,
            Mailbox::Both => m.sender_id == user_id || m.receiver_id == user_id,
        },
        MessageQuery::Unread { receiver_id } => m.receiver_id == receiver_id && !m.is_read,
        MessageQuery::Conversation { a, b, case_id, .. } => {
            let between = (m.sender_id == a && m.receiver_id == b)
                || (m.sender_id == b && m.receiver_id == a);
            between && case_id.is_none_or(|c| m.case_id == Some(c))
        }
    }
}

fn notification_matches(query: &NotificationQuery, n: &Notification) -> bool {
    (!query.unread_only || !n.is_read) && query.kind.is_none_or(|k| n.kind == k)
}

// ── Fixtures ─────────────────────────────────────────────────────────────────

pub fn test_user(account_type: AccountType) -> User {
    let id = Uuid::now_v7();
    User {
        id,
        auth_subject: format!("subject-{id}"),
        email: format!("{id}@example.com"),
        full_name: "Test User".to_owned(),
        account_type,
        phone_number: None,
        profile_picture: String::new(),
        is_active: true,
        last_login: Utc::now(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn test_case(client_id: Uuid, lawyer_id: Uuid) -> Case {
    Case {
        id: CaseId(Uuid::now_v7()),
        title: "Tenancy dispute".to_owned(),
        description: None,
        client_id,
        lawyer_id,
        case_type: CaseType::Civil,
        status: CaseStatus::Active,
        priority: Priority::Medium,
        start_date: date(2025, 1, 6),
        end_date: None,
        estimated_completion: None,
        documents: vec![],
        notes: vec![],
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn test_invoice(number: &str, amount: &str) -> Invoice {
    Invoice {
        id: InvoiceId(Uuid::now_v7()),
        invoice_number: number.to_owned(),
        client: "Ada Lovelace".to_owned(),
        amount: amount.parse().unwrap(),
        due_date: date(2025, 7, 1),
        payment_status: PaymentStatus::Pending,
        payment_reference: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn test_notification(user_id: Uuid, is_read: bool) -> Notification {
    Notification {
        id: Uuid::now_v7(),
        user_id,
        title: "Hearing moved".to_owned(),
        body: "The hearing was moved to Monday.".to_owned(),
        kind: NotificationKind::Case,
        related: None,
        is_read,
        priority: Priority::Medium,
        action_url: None,
        metadata: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn canonical_slots() -> Arc<[String]> {
    ["9:00 AM", "10:30 AM", "12:00 PM", "2:30 PM", "4:00 PM", "5:30 PM"]
        .into_iter()
        .map(str::to_owned)
        .collect()
}

/// A client, a lawyer and a case between them, already stored.
pub struct Practice {
    pub users: MockUserRepo,
    pub cases: MockCaseRepo,
    pub client: User,
    pub lawyer: User,
    pub case: Case,
}

impl Practice {
    pub fn new() -> Self {
        let client = test_user(AccountType::Client);
        let lawyer = test_user(AccountType::Lawyer);
        let case = test_case(client.id, lawyer.id);
        Self {
            users: MockUserRepo::new(vec![client.clone(), lawyer.clone()]),
            cases: MockCaseRepo::new(vec![case.clone()]),
            client,
            lawyer,
            case,
        }
    }
}

// ── MockUserRepo ─────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockUserRepo {
    pub users: Arc<Mutex<Vec<User>>>,
}

impl MockUserRepo {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: Arc::new(Mutex::new(users)),
        }
    }
}

impl UserRepository for MockUserRepo {
    async fn list(&self) -> Result<Vec<User>, PracticeServiceError> {
        Ok(self.users.lock().unwrap().clone())
    }

    async fn list_by_account_type(
        &self,
        account_type: AccountType,
    ) -> Result<Vec<User>, PracticeServiceError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.account_type == account_type)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, PracticeServiceError> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_auth_subject(
        &self,
        subject: &str,
    ) -> Result<Option<User>, PracticeServiceError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.auth_subject == subject)
            .cloned())
    }

    async fn find_by_subject_or_email(
        &self,
        subject: &str,
        email: &str,
    ) -> Result<Option<User>, PracticeServiceError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.auth_subject == subject || u.email == email)
            .cloned())
    }

    async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<User>, PracticeServiceError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| ids.contains(&u.id))
            .cloned()
            .collect())
    }

    async fn create(&self, user: &User) -> Result<(), PracticeServiceError> {
        self.users.lock().unwrap().push(user.clone());
        Ok(())
    }

    async fn update(
        &self,
        id: Uuid,
        patch: &UserPatch,
    ) -> Result<Option<User>, PracticeServiceError> {
        let mut users = self.users.lock().unwrap();
        let Some(user) = users.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };
        if let Some(ref full_name) = patch.full_name {
            user.full_name = full_name.clone();
        }
        if let Some(ref email) = patch.email {
            user.email = email.clone();
        }
        if let Some(account_type) = patch.account_type {
            user.account_type = account_type;
        }
        if let Some(is_active) = patch.is_active {
            user.is_active = is_active;
        }
        Ok(Some(user.clone()))
    }

    async fn deactivate(&self, id: Uuid) -> Result<bool, PracticeServiceError> {
        let mut users = self.users.lock().unwrap();
        match users.iter_mut().find(|u| u.id == id) {
            Some(user) => {
                user.is_active = false;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, PracticeServiceError> {
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.id != id);
        Ok(users.len() < before)
    }
}

// ── MockCaseRepo ─────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockCaseRepo {
    pub cases: Arc<Mutex<Vec<Case>>>,
}

impl MockCaseRepo {
    pub fn new(cases: Vec<Case>) -> Self {
        Self {
            cases: Arc::new(Mutex::new(cases)),
        }
    }

    pub fn len(&self) -> usize {
        self.cases.lock().unwrap().len()
    }
}

impl CaseRepository for MockCaseRepo {
    async fn list(&self, filter: CaseFilter) -> Result<Vec<Case>, PracticeServiceError> {
        let mut cases: Vec<Case> = self
            .cases
            .lock()
            .unwrap()
            .iter()
            .filter(|c| filter.client_id.is_none_or(|id| c.client_id == id))
            .filter(|c| filter.lawyer_id.is_none_or(|id| c.lawyer_id == id))
            .filter(|c| filter.status.is_none_or(|s| c.status == s))
            .cloned()
            .collect();
        cases.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(cases)
    }

    async fn find_by_id(&self, id: CaseId) -> Result<Option<Case>, PracticeServiceError> {
        Ok(self.cases.lock().unwrap().iter().find(|c| c.id == id).cloned())
    }

    async fn exists(&self, id: CaseId) -> Result<bool, PracticeServiceError> {
        Ok(self.cases.lock().unwrap().iter().any(|c| c.id == id))
    }

    async fn find_summaries(
        &self,
        ids: &[CaseId],
    ) -> Result<Vec<CaseSummary>, PracticeServiceError> {
        Ok(self
            .cases
            .lock()
            .unwrap()
            .iter()
            .filter(|c| ids.contains(&c.id))
            .map(Case::summary)
            .collect())
    }

    async fn create(&self, case: &Case) -> Result<(), PracticeServiceError> {
        self.cases.lock().unwrap().push(case.clone());
        Ok(())
    }

    async fn update(
        &self,
        id: CaseId,
        patch: &CasePatch,
    ) -> Result<Option<Case>, PracticeServiceError> {
        let mut cases = self.cases.lock().unwrap();
        let Some(case) = cases.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        if let Some(ref title) = patch.title {
            case.title = title.clone();
        }
        if let Some(ref description) = patch.description {
            case.description = Some(description.clone());
        }
        if let Some(client_id) = patch.client_id {
            case.client_id = client_id;
        }
        if let Some(lawyer_id) = patch.lawyer_id {
            case.lawyer_id = lawyer_id;
        }
        if let Some(status) = patch.status {
            case.status = status;
        }
        if let Some(priority) = patch.priority {
            case.priority = priority;
        }
        case.updated_at = Utc::now();
        Ok(Some(case.clone()))
    }

    async fn delete(&self, id: CaseId) -> Result<bool, PracticeServiceError> {
        let mut cases = self.cases.lock().unwrap();
        let before = cases.len();
        cases.retain(|c| c.id != id);
        Ok(cases.len() < before)
    }

    async fn append_document(
        &self,
        id: CaseId,
        document: &CaseDocument,
    ) -> Result<(), PracticeServiceError> {
        let mut cases = self.cases.lock().unwrap();
        let case = cases
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(PracticeServiceError::CaseNotFound)?;
        case.documents.push(document.clone());
        case.updated_at = Utc::now();
        Ok(())
    }

    async fn append_note(&self, id: CaseId, note: &CaseNote) -> Result<(), PracticeServiceError> {
        let mut cases = self.cases.lock().unwrap();
        let case = cases
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(PracticeServiceError::CaseNotFound)?;
        case.notes.push(note.clone());
        case.updated_at = Utc::now();
        Ok(())
    }
}

// ── MockAppointmentRepo ──────────────────────────────────────────────────────

/// Enforces the one-scheduled-appointment-per-slot rule the way the store's
/// partial unique index does.
#[derive(Clone, Default)]
pub struct MockAppointmentRepo {
    pub appointments: Arc<Mutex<Vec<Appointment>>>,
}

impl MockAppointmentRepo {
    pub fn new(appointments: Vec<Appointment>) -> Self {
        Self {
            appointments: Arc::new(Mutex::new(appointments)),
        }
    }

    pub fn len(&self) -> usize {
        self.appointments.lock().unwrap().len()
    }
}

impl AppointmentRepository for MockAppointmentRepo {
    async fn list(
        &self,
        filter: AppointmentFilter,
    ) -> Result<Vec<Appointment>, PracticeServiceError> {
        let mut appointments: Vec<Appointment> = self
            .appointments
            .lock()
            .unwrap()
            .iter()
            .filter(|a| appointment_matches(&filter, a))
            .cloned()
            .collect();
        appointments.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.time.cmp(&b.time)));
        Ok(appointments)
    }

    async fn find_by_id(
        &self,
        id: AppointmentId,
    ) -> Result<Option<Appointment>, PracticeServiceError> {
        Ok(self
            .appointments
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == id)
            .cloned())
    }

    async fn find_scheduled(
        &self,
        lawyer_id: Uuid,
        date: NaiveDate,
        time: &str,
    ) -> Result<Option<Appointment>, PracticeServiceError> {
        Ok(self
            .appointments
            .lock()
            .unwrap()
            .iter()
            .find(|a| {
                a.lawyer_id == lawyer_id
                    && a.date == date
                    && a.time == time
                    && a.status == AppointmentStatus::Scheduled
            })
            .cloned())
    }

    async fn booked_times(
        &self,
        lawyer_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<String>, PracticeServiceError> {
        Ok(self
            .appointments
            .lock()
            .unwrap()
            .iter()
            .filter(|a| {
                a.lawyer_id == lawyer_id
                    && a.date == date
                    && a.status == AppointmentStatus::Scheduled
            })
            .map(|a| a.time.clone())
            .collect())
    }

    async fn create(&self, appointment: &Appointment) -> Result<(), PracticeServiceError> {
        let mut appointments = self.appointments.lock().unwrap();
        if appointments.iter().any(|a| slot_conflict(a, appointment)) {
            return Err(PracticeServiceError::SlotAlreadyBooked);
        }
        appointments.push(appointment.clone());
        Ok(())
    }

    async fn update(
        &self,
        id: AppointmentId,
        patch: &AppointmentPatch,
    ) -> Result<Option<Appointment>, PracticeServiceError> {
        let mut appointments = self.appointments.lock().unwrap();
        let Some(current) = appointments.iter().find(|a| a.id == id).cloned() else {
            return Ok(None);
        };
        let mut updated = current;
        apply_patch(patch, &mut updated);
        updated.updated_at = Utc::now();
        if appointments.iter().any(|a| slot_conflict(a, &updated)) {
            return Err(PracticeServiceError::SlotAlreadyBooked);
        }
        if let Some(slot) = appointments.iter_mut().find(|a| a.id == id) {
            *slot = updated.clone();
        }
        Ok(Some(updated))
    }

    async fn delete(&self, id: AppointmentId) -> Result<bool, PracticeServiceError> {
        let mut appointments = self.appointments.lock().unwrap();
        let before = appointments.len();
        appointments.retain(|a| a.id != id);
        Ok(appointments.len() < before)
    }
}

// ── MockMessageRepo ──────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockMessageRepo {
    pub messages: Arc<Mutex<Vec<Message>>>,
}

impl MockMessageRepo {
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages: Arc::new(Mutex::new(messages)),
        }
    }
}

impl MessageRepository for MockMessageRepo {
    async fn list(&self, query: MessageQuery) -> Result<Vec<Message>, PracticeServiceError> {
        let mut messages: Vec<Message> = self
            .messages
            .lock()
            .unwrap()
            .iter()
            .filter(|m| message_matches(&query, m))
            .cloned()
            .collect();
        messages.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.0.cmp(&a.id.0))
        });
        if let Some(limit) = query.limit() {
            messages.truncate(limit as usize);
        }
        Ok(messages)
    }

    async fn find_by_id(&self, id: MessageId) -> Result<Option<Message>, PracticeServiceError> {
        Ok(self
            .messages
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.id == id)
            .cloned())
    }

    async fn create(&self, message: &Message) -> Result<(), PracticeServiceError> {
        self.messages.lock().unwrap().push(message.clone());
        Ok(())
    }

    async fn mark_read(&self, id: MessageId) -> Result<Option<Message>, PracticeServiceError> {
        let mut messages = self.messages.lock().unwrap();
        let Some(message) = messages.iter_mut().find(|m| m.id == id) else {
            return Ok(None);
        };
        message.is_read = true;
        message.read_at = Some(Utc::now());
        Ok(Some(message.clone()))
    }

    async fn mark_many_read(&self, ids: &[MessageId]) -> Result<u64, PracticeServiceError> {
        let mut messages = self.messages.lock().unwrap();
        let now = Utc::now();
        let mut touched = 0;
        for message in messages.iter_mut().filter(|m| ids.contains(&m.id)) {
            message.is_read = true;
            message.read_at = Some(now);
            touched += 1;
        }
        Ok(touched)
    }

    async fn delete(&self, id: MessageId) -> Result<bool, PracticeServiceError> {
        let mut messages = self.messages.lock().unwrap();
        let before = messages.len();
        messages.retain(|m| m.id != id);
        Ok(messages.len() < before)
    }
}

pub fn test_message(sender_id: Uuid, receiver_id: Uuid, content: &str) -> Message {
    let now = Utc::now();
    Message {
        id: MessageId(Uuid::now_v7()),
        sender_id,
        receiver_id,
        case_id: None,
        content: content.to_owned(),
        kind: MessageKind::Text,
        file_url: None,
        file_name: None,
        is_read: false,
        read_at: None,
        created_at: now,
        updated_at: now,
    }
}

// ── MockNotificationRepo ─────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockNotificationRepo {
    pub notifications: Arc<Mutex<Vec<Notification>>>,
}

impl MockNotificationRepo {
    pub fn new(notifications: Vec<Notification>) -> Self {
        Self {
            notifications: Arc::new(Mutex::new(notifications)),
        }
    }
}

impl NotificationRepository for MockNotificationRepo {
    async fn list(
        &self,
        user_id: Uuid,
        query: NotificationQuery,
    ) -> Result<Vec<Notification>, PracticeServiceError> {
        let mut notifications: Vec<Notification> = self
            .notifications
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.user_id == user_id && notification_matches(&query, n))
            .cloned()
            .collect();
        notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(notifications
            .into_iter()
            .skip(query.window.skip as usize)
            .take(query.window.limit as usize)
            .collect())
    }

    async fn count(&self, user_id: Uuid) -> Result<u64, PracticeServiceError> {
        Ok(self
            .notifications
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.user_id == user_id)
            .count() as u64)
    }

    async fn count_unread(&self, user_id: Uuid) -> Result<u64, PracticeServiceError> {
        Ok(self
            .notifications
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.user_id == user_id && !n.is_read)
            .count() as u64)
    }

    async fn create(&self, notification: &Notification) -> Result<(), PracticeServiceError> {
        self.notifications.lock().unwrap().push(notification.clone());
        Ok(())
    }

    async fn mark_read(
        &self,
        user_id: Uuid,
        ids: Option<&[Uuid]>,
    ) -> Result<u64, PracticeServiceError> {
        let mut notifications = self.notifications.lock().unwrap();
        let mut touched = 0;
        for n in notifications
            .iter_mut()
            .filter(|n| n.user_id == user_id && !n.is_read)
            .filter(|n| ids.is_none_or(|ids| ids.contains(&n.id)))
        {
            n.is_read = true;
            touched += 1;
        }
        Ok(touched)
    }

    async fn mark_one_read(&self, user_id: Uuid, id: Uuid) -> Result<bool, PracticeServiceError> {
        let mut notifications = self.notifications.lock().unwrap();
        match notifications
            .iter_mut()
            .find(|n| n.id == id && n.user_id == user_id)
        {
            Some(n) => {
                n.is_read = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<bool, PracticeServiceError> {
        let mut notifications = self.notifications.lock().unwrap();
        let before = notifications.len();
        notifications.retain(|n| !(n.id == id && n.user_id == user_id));
        Ok(notifications.len() < before)
    }

    async fn delete_all(&self, user_id: Uuid) -> Result<u64, PracticeServiceError> {
        let mut notifications = self.notifications.lock().unwrap();
        let before = notifications.len();
        notifications.retain(|n| n.user_id != user_id);
        Ok((before - notifications.len()) as u64)
    }
}

// ── FailingNotificationRepo ──────────────────────────────────────────────────

/// Every call fails the way an unreachable store does.
#[derive(Clone, Default)]
pub struct FailingNotificationRepo;

fn store_down() -> PracticeServiceError {
    PracticeServiceError::Internal(anyhow::anyhow!("connection refused"))
}

impl NotificationRepository for FailingNotificationRepo {
    async fn list(
        &self,
        _user_id: Uuid,
        _query: NotificationQuery,
    ) -> Result<Vec<Notification>, PracticeServiceError> {
        Err(store_down())
    }

    async fn count(&self, _user_id: Uuid) -> Result<u64, PracticeServiceError> {
        Err(store_down())
    }

    async fn count_unread(&self, _user_id: Uuid) -> Result<u64, PracticeServiceError> {
        Err(store_down())
    }

    async fn create(&self, _notification: &Notification) -> Result<(), PracticeServiceError> {
        Err(store_down())
    }

    async fn mark_read(
        &self,
        _user_id: Uuid,
        _ids: Option<&[Uuid]>,
    ) -> Result<u64, PracticeServiceError> {
        Err(store_down())
    }

    async fn mark_one_read(&self, _user_id: Uuid, _id: Uuid) -> Result<bool, PracticeServiceError> {
        Err(store_down())
    }

    async fn delete(&self, _user_id: Uuid, _id: Uuid) -> Result<bool, PracticeServiceError> {
        Err(store_down())
    }

    async fn delete_all(&self, _user_id: Uuid) -> Result<u64, PracticeServiceError> {
        Err(store_down())
    }
}

// ── MockRelatedResolver ──────────────────────────────────────────────────────

/// Resolves cases and invoices from the shared mocks; other kinds resolve to nothing.
#[derive(Clone, Default)]
pub struct MockRelatedResolver {
    pub cases: MockCaseRepo,
    pub invoices: MockInvoiceRepo,
}

impl RelatedEntityResolver for MockRelatedResolver {
    async fn resolve(
        &self,
        entity: RelatedEntity,
    ) -> Result<Option<RelatedSummary>, PracticeServiceError> {
        Ok(match entity {
            RelatedEntity::Case(id) => self
                .cases
                .find_by_id(id)
                .await?
                .map(|c| RelatedSummary::Case(c.summary())),
            RelatedEntity::Invoice(id) => self
                .invoices
                .invoices
                .lock()
                .unwrap()
                .iter()
                .find(|i| i.id == id)
                .cloned()
                .map(RelatedSummary::Invoice),
            RelatedEntity::Appointment(_) | RelatedEntity::Message(_) => None,
        })
    }
}

// ── MockInvoiceRepo ──────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockInvoiceRepo {
    pub invoices: Arc<Mutex<Vec<Invoice>>>,
}

impl MockInvoiceRepo {
    pub fn new(invoices: Vec<Invoice>) -> Self {
        Self {
            invoices: Arc::new(Mutex::new(invoices)),
        }
    }

    pub fn get(&self, number: &str) -> Option<Invoice> {
        self.invoices
            .lock()
            .unwrap()
            .iter()
            .find(|i| i.invoice_number == number)
            .cloned()
    }
}

impl InvoiceRepository for MockInvoiceRepo {
    async fn list(&self) -> Result<Vec<Invoice>, PracticeServiceError> {
        let mut invoices = self.invoices.lock().unwrap().clone();
        invoices.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(invoices)
    }

    async fn find_by_number(
        &self,
        number: &str,
    ) -> Result<Option<Invoice>, PracticeServiceError> {
        Ok(self.get(number))
    }

    async fn create(&self, invoice: &Invoice) -> Result<(), PracticeServiceError> {
        let mut invoices = self.invoices.lock().unwrap();
        if invoices
            .iter()
            .any(|i| i.invoice_number == invoice.invoice_number)
        {
            return Err(PracticeServiceError::InvoiceAlreadyExists);
        }
        invoices.push(invoice.clone());
        Ok(())
    }

    async fn record_payment(
        &self,
        invoice_number: &str,
        status: PaymentStatus,
        reference: &str,
    ) -> Result<Option<Invoice>, PracticeServiceError> {
        let mut invoices = self.invoices.lock().unwrap();
        let Some(invoice) = invoices
            .iter_mut()
            .find(|i| i.invoice_number == invoice_number)
        else {
            return Ok(None);
        };
        invoice.payment_status = status;
        invoice.payment_reference = Some(reference.to_owned());
        invoice.updated_at = Utc::now();
        Ok(Some(invoice.clone()))
    }
}

pub fn decimal(s: &str) -> Decimal {
    s.parse().unwrap()
}
