use std::collections::HashMap;

use anyhow::Context as _;
use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection, DbErr,
    EntityTrait, IntoActiveModel as _, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    sea_query::Expr,
};
use uuid::Uuid;

use docket_core::sea_ext::DbErrExt;
use docket_domain::account::AccountType;
use docket_domain::id::{AppointmentId, CaseId, InvoiceId, MessageId};
use docket_domain::priority::Priority;
use docket_practice_schema::{
    appointments, case_documents, case_notes, cases, invoices, messages, notifications, users,
};

use crate::domain::repository::{
    AppointmentRepository, CaseRepository, InvoiceRepository, MessageRepository,
    NotificationRepository, RelatedEntityResolver, UserRepository,
};
use crate::domain::types::{
    Appointment, AppointmentFilter, AppointmentPatch, AppointmentStatus, Case, CaseDocument,
    CaseFilter, CaseNote, CasePatch, CaseStatus, CaseSummary, CaseType, Invoice, Mailbox, Message,
    MessageKind, MessageQuery, Notification, NotificationKind, NotificationQuery, PaymentStatus,
    RelatedEntity, RelatedSummary, User, UserPatch,
};
use crate::error::PracticeServiceError;

/// Map a write error: a unique violation becomes `on_conflict`, anything else is internal.
fn conflict_or_internal(
    err: DbErr,
    on_conflict: PracticeServiceError,
    what: &'static str,
) -> PracticeServiceError {
    if err.is_unique_violation() {
        on_conflict
    } else {
        anyhow::Error::new(err).context(what).into()
    }
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn list(&self) -> Result<Vec<User>, PracticeServiceError> {
        let models = users::Entity::find()
            .order_by_desc(users::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list users")?;
        Ok(models
            .into_iter()
            .map(user_from_model)
            .collect::<anyhow::Result<_>>()?)
    }

    async fn list_by_account_type(
        &self,
        account_type: AccountType,
    ) -> Result<Vec<User>, PracticeServiceError> {
        let models = users::Entity::find()
            .filter(users::Column::AccountType.eq(account_type.as_str()))
            .order_by_desc(users::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list users by account type")?;
        Ok(models
            .into_iter()
            .map(user_from_model)
            .collect::<anyhow::Result<_>>()?)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, PracticeServiceError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model).transpose()?)
    }

    async fn find_by_auth_subject(
        &self,
        subject: &str,
    ) -> Result<Option<User>, PracticeServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::AuthSubject.eq(subject))
            .one(&self.db)
            .await
            .context("find user by auth subject")?;
        Ok(model.map(user_from_model).transpose()?)
    }

    async fn find_by_subject_or_email(
        &self,
        subject: &str,
        email: &str,
    ) -> Result<Option<User>, PracticeServiceError> {
        let model = users::Entity::find()
            .filter(
                Condition::any()
                    .add(users::Column::AuthSubject.eq(subject))
                    .add(users::Column::Email.eq(email)),
            )
            .one(&self.db)
            .await
            .context("find user by subject or email")?;
        Ok(model.map(user_from_model).transpose()?)
    }

    async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<User>, PracticeServiceError> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let models = users::Entity::find()
            .filter(users::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .context("find users by ids")?;
        Ok(models
            .into_iter()
            .map(user_from_model)
            .collect::<anyhow::Result<_>>()?)
    }

    async fn create(&self, user: &User) -> Result<(), PracticeServiceError> {
        users::ActiveModel {
            id: Set(user.id),
            auth_subject: Set(user.auth_subject.clone()),
            email: Set(user.email.clone()),
            full_name: Set(user.full_name.clone()),
            account_type: Set(user.account_type.as_str().to_owned()),
            phone_number: Set(user.phone_number.clone()),
            profile_picture: Set(user.profile_picture.clone()),
            is_active: Set(user.is_active),
            last_login: Set(user.last_login),
            created_at: Set(user.created_at),
            updated_at: Set(user.updated_at),
        }
        .insert(&self.db)
        .await
        .map_err(|e| conflict_or_internal(e, PracticeServiceError::UserAlreadyExists, "create user"))?;
        Ok(())
    }

    async fn update(
        &self,
        id: Uuid,
        patch: &UserPatch,
    ) -> Result<Option<User>, PracticeServiceError> {
        let Some(model) = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user for update")?
        else {
            return Ok(None);
        };

        let mut am = model.into_active_model();
        if let Some(email) = &patch.email {
            am.email = Set(email.clone());
        }
        if let Some(full_name) = &patch.full_name {
            am.full_name = Set(full_name.clone());
        }
        if let Some(account_type) = patch.account_type {
            am.account_type = Set(account_type.as_str().to_owned());
        }
        if let Some(phone_number) = &patch.phone_number {
            am.phone_number = Set(Some(phone_number.clone()).filter(|p| !p.is_empty()));
        }
        if let Some(profile_picture) = &patch.profile_picture {
            am.profile_picture = Set(profile_picture.clone());
        }
        if let Some(is_active) = patch.is_active {
            am.is_active = Set(is_active);
        }
        am.updated_at = Set(Utc::now());

        let model = am
            .update(&self.db)
            .await
            .map_err(|e| conflict_or_internal(e, PracticeServiceError::UserAlreadyExists, "update user"))?;
        Ok(Some(user_from_model(model)?))
    }

    async fn deactivate(&self, id: Uuid) -> Result<bool, PracticeServiceError> {
        let result = users::Entity::update_many()
            .col_expr(users::Column::IsActive, Expr::value(false))
            .col_expr(users::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(users::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("deactivate user")?;
        Ok(result.rows_affected > 0)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, PracticeServiceError> {
        let result = users::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete user")?;
        Ok(result.rows_affected > 0)
    }
}

fn user_from_model(model: users::Model) -> anyhow::Result<User> {
    let account_type = model
        .account_type
        .parse::<AccountType>()
        .context("stored account type")?;
    Ok(User {
        id: model.id,
        auth_subject: model.auth_subject,
        email: model.email,
        full_name: model.full_name,
        account_type,
        phone_number: model.phone_number,
        profile_picture: model.profile_picture,
        is_active: model.is_active,
        last_login: model.last_login,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

// ── Case repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCaseRepository {
    pub db: DatabaseConnection,
}

type CaseChildren = (
    HashMap<Uuid, Vec<CaseDocument>>,
    HashMap<Uuid, Vec<CaseNote>>,
);

impl DbCaseRepository {
    /// Documents and notes of every listed case, two queries total.
    async fn load_children(&self, case_ids: &[Uuid]) -> Result<CaseChildren, PracticeServiceError> {
        let mut documents: HashMap<Uuid, Vec<CaseDocument>> = HashMap::new();
        let mut notes: HashMap<Uuid, Vec<CaseNote>> = HashMap::new();
        if case_ids.is_empty() {
            return Ok((documents, notes));
        }

        let document_models = case_documents::Entity::find()
            .filter(case_documents::Column::CaseId.is_in(case_ids.iter().copied()))
            .order_by_asc(case_documents::Column::UploadedAt)
            .order_by_asc(case_documents::Column::Id)
            .all(&self.db)
            .await
            .context("load case documents")?;
        for m in document_models {
            documents.entry(m.case_id).or_default().push(CaseDocument {
                id: m.id,
                name: m.name,
                url: m.url,
                uploaded_at: m.uploaded_at,
            });
        }

        let note_models = case_notes::Entity::find()
            .filter(case_notes::Column::CaseId.is_in(case_ids.iter().copied()))
            .order_by_asc(case_notes::Column::CreatedAt)
            .order_by_asc(case_notes::Column::Id)
            .all(&self.db)
            .await
            .context("load case notes")?;
        for m in note_models {
            notes.entry(m.case_id).or_default().push(CaseNote {
                id: m.id,
                content: m.content,
                created_by: m.created_by,
                created_at: m.created_at,
            });
        }

        Ok((documents, notes))
    }

    async fn with_children(&self, model: cases::Model) -> Result<Case, PracticeServiceError> {
        let (mut documents, mut notes) = self.load_children(&[model.id]).await?;
        let id = model.id;
        Ok(case_from_model(
            model,
            documents.remove(&id).unwrap_or_default(),
            notes.remove(&id).unwrap_or_default(),
        )?)
    }

    /// Bump `updated_at`; `false` when the case does not exist.
    async fn touch(&self, id: CaseId) -> Result<bool, PracticeServiceError> {
        let result = cases::Entity::update_many()
            .col_expr(cases::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(cases::Column::Id.eq(id.0))
            .exec(&self.db)
            .await
            .context("touch case")?;
        Ok(result.rows_affected > 0)
    }
}

/// A child insert whose parent case vanished in between reports `CaseNotFound`.
fn child_insert_error(err: DbErr, what: &'static str) -> PracticeServiceError {
    if err.is_foreign_key_violation() {
        PracticeServiceError::CaseNotFound
    } else {
        anyhow::Error::new(err).context(what).into()
    }
}

impl CaseRepository for DbCaseRepository {
    async fn list(&self, filter: CaseFilter) -> Result<Vec<Case>, PracticeServiceError> {
        let mut query = cases::Entity::find();
        if let Some(client_id) = filter.client_id {
            query = query.filter(cases::Column::ClientId.eq(client_id));
        }
        if let Some(lawyer_id) = filter.lawyer_id {
            query = query.filter(cases::Column::LawyerId.eq(lawyer_id));
        }
        if let Some(status) = filter.status {
            query = query.filter(cases::Column::Status.eq(status.as_str()));
        }
        let models = query
            .order_by_desc(cases::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list cases")?;

        let ids: Vec<Uuid> = models.iter().map(|m| m.id).collect();
        let (mut documents, mut notes) = self.load_children(&ids).await?;
        let cases = models
            .into_iter()
            .map(|m| {
                let id = m.id;
                case_from_model(
                    m,
                    documents.remove(&id).unwrap_or_default(),
                    notes.remove(&id).unwrap_or_default(),
                )
            })
            .collect::<anyhow::Result<_>>()?;
        Ok(cases)
    }

    async fn find_by_id(&self, id: CaseId) -> Result<Option<Case>, PracticeServiceError> {
        let model = cases::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find case by id")?;
        match model {
            Some(model) => Ok(Some(self.with_children(model).await?)),
            None => Ok(None),
        }
    }

    async fn exists(&self, id: CaseId) -> Result<bool, PracticeServiceError> {
        let count = cases::Entity::find_by_id(id.0)
            .count(&self.db)
            .await
            .context("check case exists")?;
        Ok(count > 0)
    }

    async fn find_summaries(
        &self,
        ids: &[CaseId],
    ) -> Result<Vec<CaseSummary>, PracticeServiceError> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let models = cases::Entity::find()
            .filter(cases::Column::Id.is_in(ids.iter().map(|id| id.0)))
            .all(&self.db)
            .await
            .context("find case summaries")?;
        Ok(models
            .into_iter()
            .map(case_summary_from_model)
            .collect::<anyhow::Result<_>>()?)
    }

    async fn create(&self, case: &Case) -> Result<(), PracticeServiceError> {
        cases::ActiveModel {
            id: Set(case.id.0),
            title: Set(case.title.clone()),
            description: Set(case.description.clone()),
            client_id: Set(case.client_id),
            lawyer_id: Set(case.lawyer_id),
            case_type: Set(case.case_type.as_str().to_owned()),
            status: Set(case.status.as_str().to_owned()),
            priority: Set(case.priority.as_str().to_owned()),
            start_date: Set(case.start_date),
            end_date: Set(case.end_date),
            estimated_completion: Set(case.estimated_completion),
            created_at: Set(case.created_at),
            updated_at: Set(case.updated_at),
        }
        .insert(&self.db)
        .await
        .context("create case")?;
        Ok(())
    }

    async fn update(
        &self,
        id: CaseId,
        patch: &CasePatch,
    ) -> Result<Option<Case>, PracticeServiceError> {
        let Some(model) = cases::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find case for update")?
        else {
            return Ok(None);
        };

        let mut am = model.into_active_model();
        if let Some(title) = &patch.title {
            am.title = Set(title.clone());
        }
        if let Some(description) = &patch.description {
            am.description = Set(Some(description.clone()).filter(|d| !d.is_empty()));
        }
        if let Some(client_id) = patch.client_id {
            am.client_id = Set(client_id);
        }
        if let Some(lawyer_id) = patch.lawyer_id {
            am.lawyer_id = Set(lawyer_id);
        }
        if let Some(case_type) = patch.case_type {
            am.case_type = Set(case_type.as_str().to_owned());
        }
        if let Some(status) = patch.status {
            am.status = Set(status.as_str().to_owned());
        }
        if let Some(priority) = patch.priority {
            am.priority = Set(priority.as_str().to_owned());
        }
        if let Some(start_date) = patch.start_date {
            am.start_date = Set(start_date);
        }
        if let Some(end_date) = patch.end_date {
            am.end_date = Set(Some(end_date));
        }
        if let Some(estimated_completion) = patch.estimated_completion {
            am.estimated_completion = Set(Some(estimated_completion));
        }
        am.updated_at = Set(Utc::now());

        let model = am.update(&self.db).await.context("update case")?;
        Ok(Some(self.with_children(model).await?))
    }

    async fn delete(&self, id: CaseId) -> Result<bool, PracticeServiceError> {
        // documents and notes go with it (ON DELETE CASCADE)
        let result = cases::Entity::delete_by_id(id.0)
            .exec(&self.db)
            .await
            .context("delete case")?;
        Ok(result.rows_affected > 0)
    }

    async fn append_document(
        &self,
        id: CaseId,
        document: &CaseDocument,
    ) -> Result<(), PracticeServiceError> {
        if !self.touch(id).await? {
            return Err(PracticeServiceError::CaseNotFound);
        }
        case_documents::ActiveModel {
            id: Set(document.id),
            case_id: Set(id.0),
            name: Set(document.name.clone()),
            url: Set(document.url.clone()),
            uploaded_at: Set(document.uploaded_at),
        }
        .insert(&self.db)
        .await
        .map_err(|e| child_insert_error(e, "append case document"))?;
        Ok(())
    }

    async fn append_note(&self, id: CaseId, note: &CaseNote) -> Result<(), PracticeServiceError> {
        if !self.touch(id).await? {
            return Err(PracticeServiceError::CaseNotFound);
        }
        case_notes::ActiveModel {
            id: Set(note.id),
            case_id: Set(id.0),
            content: Set(note.content.clone()),
            created_by: Set(note.created_by),
            created_at: Set(note.created_at),
        }
        .insert(&self.db)
        .await
        .map_err(|e| child_insert_error(e, "append case note"))?;
        Ok(())
    }
}

fn case_from_model(
    model: cases::Model,
    documents: Vec<CaseDocument>,
    notes: Vec<CaseNote>,
) -> anyhow::Result<Case> {
    Ok(Case {
        id: CaseId(model.id),
        case_type: CaseType::parse(&model.case_type)
            .with_context(|| format!("unknown case type {:?}", model.case_type))?,
        status: CaseStatus::parse(&model.status)
            .with_context(|| format!("unknown case status {:?}", model.status))?,
        priority: Priority::parse(&model.priority)
            .with_context(|| format!("unknown priority {:?}", model.priority))?,
        title: model.title,
        description: model.description,
        client_id: model.client_id,
        lawyer_id: model.lawyer_id,
        start_date: model.start_date,
        end_date: model.end_date,
        estimated_completion: model.estimated_completion,
        documents,
        notes,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

fn case_summary_from_model(model: cases::Model) -> anyhow::Result<CaseSummary> {
    Ok(CaseSummary {
        id: CaseId(model.id),
        case_type: CaseType::parse(&model.case_type)
            .with_context(|| format!("unknown case type {:?}", model.case_type))?,
        status: CaseStatus::parse(&model.status)
            .with_context(|| format!("unknown case status {:?}", model.status))?,
        title: model.title,
    })
}

// ── Appointment repository ───────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbAppointmentRepository {
    pub db: DatabaseConnection,
}

impl AppointmentRepository for DbAppointmentRepository {
    async fn list(
        &self,
        filter: AppointmentFilter,
    ) -> Result<Vec<Appointment>, PracticeServiceError> {
        let mut query = appointments::Entity::find();
        if let Some(client_id) = filter.client_id {
            query = query.filter(appointments::Column::ClientId.eq(client_id));
        }
        if let Some(lawyer_id) = filter.lawyer_id {
            query = query.filter(appointments::Column::LawyerId.eq(lawyer_id));
        }
        if let Some(case_id) = filter.case_id {
            query = query.filter(appointments::Column::CaseId.eq(case_id.0));
        }
        if let Some(status) = filter.status {
            query = query.filter(appointments::Column::Status.eq(status.as_str()));
        }
        if let Some(from) = filter.date_from {
            query = query.filter(appointments::Column::Date.gte(from));
        }
        if let Some(to) = filter.date_to {
            query = query.filter(appointments::Column::Date.lte(to));
        }
        let models = query
            .order_by_asc(appointments::Column::Date)
            .order_by_asc(appointments::Column::Time)
            .all(&self.db)
            .await
            .context("list appointments")?;
        Ok(models
            .into_iter()
            .map(appointment_from_model)
            .collect::<anyhow::Result<_>>()?)
    }

    async fn find_by_id(
        &self,
        id: AppointmentId,
    ) -> Result<Option<Appointment>, PracticeServiceError> {
        let model = appointments::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find appointment by id")?;
        Ok(model.map(appointment_from_model).transpose()?)
    }

    async fn find_scheduled(
        &self,
        lawyer_id: Uuid,
        date: NaiveDate,
        time: &str,
    ) -> Result<Option<Appointment>, PracticeServiceError> {
        let model = appointments::Entity::find()
            .filter(appointments::Column::LawyerId.eq(lawyer_id))
            .filter(appointments::Column::Date.eq(date))
            .filter(appointments::Column::Time.eq(time))
            .filter(appointments::Column::Status.eq(AppointmentStatus::Scheduled.as_str()))
            .one(&self.db)
            .await
            .context("find scheduled appointment")?;
        Ok(model.map(appointment_from_model).transpose()?)
    }

    async fn booked_times(
        &self,
        lawyer_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<String>, PracticeServiceError> {
        let times = appointments::Entity::find()
            .select_only()
            .column(appointments::Column::Time)
            .filter(appointments::Column::LawyerId.eq(lawyer_id))
            .filter(appointments::Column::Date.eq(date))
            .filter(appointments::Column::Status.eq(AppointmentStatus::Scheduled.as_str()))
            .into_tuple::<String>()
            .all(&self.db)
            .await
            .context("list booked times")?;
        Ok(times)
    }

    async fn create(&self, appointment: &Appointment) -> Result<(), PracticeServiceError> {
        appointments::ActiveModel {
            id: Set(appointment.id.0),
            client_id: Set(appointment.client_id),
            lawyer_id: Set(appointment.lawyer_id),
            case_id: Set(appointment.case_id.0),
            date: Set(appointment.date),
            time: Set(appointment.time.clone()),
            status: Set(appointment.status.as_str().to_owned()),
            created_at: Set(appointment.created_at),
            updated_at: Set(appointment.updated_at),
        }
        .insert(&self.db)
        .await
        .map_err(|e| {
            conflict_or_internal(e, PracticeServiceError::SlotAlreadyBooked, "create appointment")
        })?;
        Ok(())
    }

    async fn update(
        &self,
        id: AppointmentId,
        patch: &AppointmentPatch,
    ) -> Result<Option<Appointment>, PracticeServiceError> {
        let Some(model) = appointments::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find appointment for update")?
        else {
            return Ok(None);
        };

        let mut am = model.into_active_model();
        if let Some(client_id) = patch.client_id {
            am.client_id = Set(client_id);
        }
        if let Some(lawyer_id) = patch.lawyer_id {
            am.lawyer_id = Set(lawyer_id);
        }
        if let Some(case_id) = patch.case_id {
            am.case_id = Set(case_id.0);
        }
        if let Some(date) = patch.date {
            am.date = Set(date);
        }
        if let Some(time) = &patch.time {
            am.time = Set(time.clone());
        }
        if let Some(status) = patch.status {
            am.status = Set(status.as_str().to_owned());
        }
        am.updated_at = Set(Utc::now());

        let model = am.update(&self.db).await.map_err(|e| {
            conflict_or_internal(e, PracticeServiceError::SlotAlreadyBooked, "update appointment")
        })?;
        Ok(Some(appointment_from_model(model)?))
    }

    async fn delete(&self, id: AppointmentId) -> Result<bool, PracticeServiceError> {
        let result = appointments::Entity::delete_by_id(id.0)
            .exec(&self.db)
            .await
            .context("delete appointment")?;
        Ok(result.rows_affected > 0)
    }
}

fn appointment_from_model(model: appointments::Model) -> anyhow::Result<Appointment> {
    Ok(Appointment {
        id: AppointmentId(model.id),
        status: AppointmentStatus::parse(&model.status)
            .with_context(|| format!("unknown appointment status {:?}", model.status))?,
        client_id: model.client_id,
        lawyer_id: model.lawyer_id,
        case_id: CaseId(model.case_id),
        date: model.date,
        time: model.time,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

// ── Message repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbMessageRepository {
    pub db: DatabaseConnection,
}

impl MessageRepository for DbMessageRepository {
    async fn list(&self, query: MessageQuery) -> Result<Vec<Message>, PracticeServiceError> {
        let mut select = messages::Entity::find();
        match query {
            MessageQuery::All => {}
            MessageQuery::Participant { user_id, mailbox } => {
                select = match mailbox {
                    Mailbox::Sent => select.filter(messages::Column::SenderId.eq(user_id)),
                    Mailbox::Received => select.filter(messages::Column::ReceiverId.eq(user_id)),
                    Mailbox::Both => select.filter(
                        Condition::any()
                            .add(messages::Column::SenderId.eq(user_id))
                            .add(messages::Column::ReceiverId.eq(user_id)),
                    ),
                };
            }
            MessageQuery::Unread { receiver_id } => {
                select = select
                    .filter(messages::Column::ReceiverId.eq(receiver_id))
                    .filter(messages::Column::IsRead.eq(false));
            }
            MessageQuery::Conversation { a, b, case_id, .. } => {
                select = select.filter(
                    Condition::any()
                        .add(
                            Condition::all()
                                .add(messages::Column::SenderId.eq(a))
                                .add(messages::Column::ReceiverId.eq(b)),
                        )
                        .add(
                            Condition::all()
                                .add(messages::Column::SenderId.eq(b))
                                .add(messages::Column::ReceiverId.eq(a)),
                        ),
                );
                if let Some(case_id) = case_id {
                    select = select.filter(messages::Column::CaseId.eq(case_id.0));
                }
            }
        }
        select = select
            .order_by_desc(messages::Column::CreatedAt)
            .order_by_desc(messages::Column::Id);
        if let Some(limit) = query.limit() {
            select = select.limit(limit);
        }

        let models = select.all(&self.db).await.context("list messages")?;
        Ok(models
            .into_iter()
            .map(message_from_model)
            .collect::<anyhow::Result<_>>()?)
    }

    async fn find_by_id(&self, id: MessageId) -> Result<Option<Message>, PracticeServiceError> {
        let model = messages::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find message by id")?;
        Ok(model.map(message_from_model).transpose()?)
    }

    async fn create(&self, message: &Message) -> Result<(), PracticeServiceError> {
        messages::ActiveModel {
            id: Set(message.id.0),
            sender_id: Set(message.sender_id),
            receiver_id: Set(message.receiver_id),
            case_id: Set(message.case_id.map(|c| c.0)),
            content: Set(message.content.clone()),
            message_type: Set(message.kind.as_str().to_owned()),
            file_url: Set(message.file_url.clone()),
            file_name: Set(message.file_name.clone()),
            is_read: Set(message.is_read),
            read_at: Set(message.read_at),
            created_at: Set(message.created_at),
            updated_at: Set(message.updated_at),
        }
        .insert(&self.db)
        .await
        .context("create message")?;
        Ok(())
    }

    async fn mark_read(&self, id: MessageId) -> Result<Option<Message>, PracticeServiceError> {
        let Some(model) = messages::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find message for read")?
        else {
            return Ok(None);
        };
        let now = Utc::now();
        let mut am = model.into_active_model();
        am.is_read = Set(true);
        am.read_at = Set(Some(now));
        am.updated_at = Set(now);
        let model = am.update(&self.db).await.context("mark message read")?;
        Ok(Some(message_from_model(model)?))
    }

    async fn mark_many_read(&self, ids: &[MessageId]) -> Result<u64, PracticeServiceError> {
        if ids.is_empty() {
            return Ok(0);
        }
        let now = Utc::now();
        let result = messages::Entity::update_many()
            .col_expr(messages::Column::IsRead, Expr::value(true))
            .col_expr(messages::Column::ReadAt, Expr::value(now))
            .col_expr(messages::Column::UpdatedAt, Expr::value(now))
            .filter(messages::Column::Id.is_in(ids.iter().map(|id| id.0)))
            .exec(&self.db)
            .await
            .context("mark messages read")?;
        Ok(result.rows_affected)
    }

    async fn delete(&self, id: MessageId) -> Result<bool, PracticeServiceError> {
        let result = messages::Entity::delete_by_id(id.0)
            .exec(&self.db)
            .await
            .context("delete message")?;
        Ok(result.rows_affected > 0)
    }
}

fn message_from_model(model: messages::Model) -> anyhow::Result<Message> {
    Ok(Message {
        id: MessageId(model.id),
        kind: MessageKind::parse(&model.message_type)
            .with_context(|| format!("unknown message type {:?}", model.message_type))?,
        sender_id: model.sender_id,
        receiver_id: model.receiver_id,
        case_id: model.case_id.map(CaseId),
        content: model.content,
        file_url: model.file_url,
        file_name: model.file_name,
        is_read: model.is_read,
        read_at: model.read_at,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

// ── Notification repository ──────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbNotificationRepository {
    pub db: DatabaseConnection,
}

impl NotificationRepository for DbNotificationRepository {
    async fn list(
        &self,
        user_id: Uuid,
        query: NotificationQuery,
    ) -> Result<Vec<Notification>, PracticeServiceError> {
        let mut select =
            notifications::Entity::find().filter(notifications::Column::UserId.eq(user_id));
        if query.unread_only {
            select = select.filter(notifications::Column::IsRead.eq(false));
        }
        if let Some(kind) = query.kind {
            select = select.filter(notifications::Column::NotificationType.eq(kind.as_str()));
        }
        let models = select
            .order_by_desc(notifications::Column::CreatedAt)
            .order_by_desc(notifications::Column::Id)
            .offset(query.window.skip)
            .limit(query.window.limit)
            .all(&self.db)
            .await
            .context("list notifications")?;
        Ok(models
            .into_iter()
            .map(notification_from_model)
            .collect::<anyhow::Result<_>>()?)
    }

    async fn count(&self, user_id: Uuid) -> Result<u64, PracticeServiceError> {
        let count = notifications::Entity::find()
            .filter(notifications::Column::UserId.eq(user_id))
            .count(&self.db)
            .await
            .context("count notifications")?;
        Ok(count)
    }

    async fn count_unread(&self, user_id: Uuid) -> Result<u64, PracticeServiceError> {
        let count = notifications::Entity::find()
            .filter(notifications::Column::UserId.eq(user_id))
            .filter(notifications::Column::IsRead.eq(false))
            .count(&self.db)
            .await
            .context("count unread notifications")?;
        Ok(count)
    }

    async fn create(&self, notification: &Notification) -> Result<(), PracticeServiceError> {
        notifications::ActiveModel {
            id: Set(notification.id),
            user_id: Set(notification.user_id),
            title: Set(notification.title.clone()),
            message: Set(notification.body.clone()),
            notification_type: Set(notification.kind.as_str().to_owned()),
            related_entity_type: Set(notification.related.map(|r| r.kind().to_owned())),
            related_entity_id: Set(notification.related.map(|r| r.id())),
            is_read: Set(notification.is_read),
            priority: Set(notification.priority.as_str().to_owned()),
            action_url: Set(notification.action_url.clone()),
            metadata: Set(notification
                .metadata
                .clone()
                .map(serde_json::Value::Object)),
            created_at: Set(notification.created_at),
            updated_at: Set(notification.updated_at),
        }
        .insert(&self.db)
        .await
        .context("create notification")?;
        Ok(())
    }

    async fn mark_read(
        &self,
        user_id: Uuid,
        ids: Option<&[Uuid]>,
    ) -> Result<u64, PracticeServiceError> {
        let mut update = notifications::Entity::update_many()
            .col_expr(notifications::Column::IsRead, Expr::value(true))
            .col_expr(notifications::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(notifications::Column::UserId.eq(user_id))
            .filter(notifications::Column::IsRead.eq(false));
        if let Some(ids) = ids {
            if ids.is_empty() {
                return Ok(0);
            }
            update = update.filter(notifications::Column::Id.is_in(ids.iter().copied()));
        }
        let result = update
            .exec(&self.db)
            .await
            .context("mark notifications read")?;
        Ok(result.rows_affected)
    }

    async fn mark_one_read(&self, user_id: Uuid, id: Uuid) -> Result<bool, PracticeServiceError> {
        let result = notifications::Entity::update_many()
            .col_expr(notifications::Column::IsRead, Expr::value(true))
            .col_expr(notifications::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(notifications::Column::Id.eq(id))
            .filter(notifications::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .context("mark notification read")?;
        Ok(result.rows_affected > 0)
    }

    async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<bool, PracticeServiceError> {
        let result = notifications::Entity::delete_many()
            .filter(notifications::Column::Id.eq(id))
            .filter(notifications::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .context("delete notification")?;
        Ok(result.rows_affected > 0)
    }

    async fn delete_all(&self, user_id: Uuid) -> Result<u64, PracticeServiceError> {
        let result = notifications::Entity::delete_many()
            .filter(notifications::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .context("clear notifications")?;
        Ok(result.rows_affected)
    }
}

fn notification_from_model(model: notifications::Model) -> anyhow::Result<Notification> {
    let related = RelatedEntity::from_parts(
        model.related_entity_type.as_deref(),
        model.related_entity_id,
    )
    .map_err(|_| {
        anyhow::anyhow!(
            "malformed related entity {:?}/{:?}",
            model.related_entity_type,
            model.related_entity_id
        )
    })?;
    Ok(Notification {
        id: model.id,
        user_id: model.user_id,
        kind: NotificationKind::parse(&model.notification_type)
            .with_context(|| format!("unknown notification type {:?}", model.notification_type))?,
        priority: Priority::parse(&model.priority)
            .with_context(|| format!("unknown priority {:?}", model.priority))?,
        related,
        title: model.title,
        body: model.message,
        is_read: model.is_read,
        action_url: model.action_url,
        metadata: match model.metadata {
            Some(serde_json::Value::Object(map)) => Some(map),
            _ => None,
        },
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

// ── Related entity resolver ──────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbRelatedEntityResolver {
    pub db: DatabaseConnection,
}

impl RelatedEntityResolver for DbRelatedEntityResolver {
    async fn resolve(
        &self,
        entity: RelatedEntity,
    ) -> Result<Option<RelatedSummary>, PracticeServiceError> {
        let summary = match entity {
            RelatedEntity::Case(id) => cases::Entity::find_by_id(id.0)
                .one(&self.db)
                .await
                .context("resolve related case")?
                .map(case_summary_from_model)
                .transpose()?
                .map(RelatedSummary::Case),
            RelatedEntity::Appointment(id) => appointments::Entity::find_by_id(id.0)
                .one(&self.db)
                .await
                .context("resolve related appointment")?
                .map(appointment_from_model)
                .transpose()?
                .map(RelatedSummary::Appointment),
            RelatedEntity::Message(id) => messages::Entity::find_by_id(id.0)
                .one(&self.db)
                .await
                .context("resolve related message")?
                .map(message_from_model)
                .transpose()?
                .map(RelatedSummary::Message),
            RelatedEntity::Invoice(id) => invoices::Entity::find_by_id(id.0)
                .one(&self.db)
                .await
                .context("resolve related invoice")?
                .map(invoice_from_model)
                .transpose()?
                .map(RelatedSummary::Invoice),
        };
        Ok(summary)
    }
}

// ── Invoice repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbInvoiceRepository {
    pub db: DatabaseConnection,
}

impl InvoiceRepository for DbInvoiceRepository {
    async fn list(&self) -> Result<Vec<Invoice>, PracticeServiceError> {
        let models = invoices::Entity::find()
            .order_by_desc(invoices::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list invoices")?;
        Ok(models
            .into_iter()
            .map(invoice_from_model)
            .collect::<anyhow::Result<_>>()?)
    }

    async fn find_by_number(
        &self,
        number: &str,
    ) -> Result<Option<Invoice>, PracticeServiceError> {
        let model = invoices::Entity::find()
            .filter(invoices::Column::InvoiceNumber.eq(number))
            .one(&self.db)
            .await
            .context("find invoice by number")?;
        Ok(model.map(invoice_from_model).transpose()?)
    }

    async fn create(&self, invoice: &Invoice) -> Result<(), PracticeServiceError> {
        invoices::ActiveModel {
            id: Set(invoice.id.0),
            invoice_number: Set(invoice.invoice_number.clone()),
            client: Set(invoice.client.clone()),
            amount: Set(invoice.amount),
            due_date: Set(invoice.due_date),
            payment_status: Set(invoice.payment_status.as_str().to_owned()),
            payment_reference: Set(invoice.payment_reference.clone()),
            created_at: Set(invoice.created_at),
            updated_at: Set(invoice.updated_at),
        }
        .insert(&self.db)
        .await
        .map_err(|e| {
            conflict_or_internal(e, PracticeServiceError::InvoiceAlreadyExists, "create invoice")
        })?;
        Ok(())
    }

    async fn record_payment(
        &self,
        invoice_number: &str,
        status: PaymentStatus,
        reference: &str,
    ) -> Result<Option<Invoice>, PracticeServiceError> {
        let result = invoices::Entity::update_many()
            .col_expr(invoices::Column::PaymentStatus, Expr::value(status.as_str()))
            .col_expr(invoices::Column::PaymentReference, Expr::value(reference))
            .col_expr(invoices::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(invoices::Column::InvoiceNumber.eq(invoice_number))
            .exec(&self.db)
            .await
            .context("record invoice payment")?;
        if result.rows_affected == 0 {
            return Ok(None);
        }
        self.find_by_number(invoice_number).await
    }
}

fn invoice_from_model(model: invoices::Model) -> anyhow::Result<Invoice> {
    Ok(Invoice {
        id: InvoiceId(model.id),
        payment_status: PaymentStatus::parse(&model.payment_status)
            .with_context(|| format!("unknown payment status {:?}", model.payment_status))?,
        invoice_number: model.invoice_number,
        client: model.client,
        amount: model.amount,
        due_date: model.due_date,
        payment_reference: model.payment_reference,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}
