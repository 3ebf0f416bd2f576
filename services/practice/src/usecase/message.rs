use chrono::Utc;
use uuid::Uuid;

use docket_domain::id::{CaseId, MessageId};

use crate::domain::repository::{CaseRepository, MessageRepository, UserRepository};
use crate::domain::types::{Message, MessageKind, MessageQuery, trimmed};
use crate::error::PracticeServiceError;
use crate::usecase::populate::{MessageView, message_view, message_views};

// ── SendMessage ──────────────────────────────────────────────────────────────

pub struct SendMessageInput {
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub case_id: Option<CaseId>,
    pub content: String,
    pub kind: Option<MessageKind>,
    pub file_url: Option<String>,
    pub file_name: Option<String>,
}

pub struct SendMessageUseCase<U, C, M>
where
    U: UserRepository,
    C: CaseRepository,
    M: MessageRepository,
{
    pub users: U,
    pub cases: C,
    pub messages: M,
}

impl<U, C, M> SendMessageUseCase<U, C, M>
where
    U: UserRepository,
    C: CaseRepository,
    M: MessageRepository,
{
    pub async fn execute(&self, input: SendMessageInput) -> Result<MessageView, PracticeServiceError> {
        let content = input.content.trim().to_owned();
        if content.is_empty() {
            return Err(PracticeServiceError::MissingData);
        }
        if self.users.find_by_id(input.sender_id).await?.is_none() {
            return Err(PracticeServiceError::InvalidSender);
        }
        if self.users.find_by_id(input.receiver_id).await?.is_none() {
            return Err(PracticeServiceError::InvalidReceiver);
        }
        if let Some(case_id) = input.case_id {
            if !self.cases.exists(case_id).await? {
                return Err(PracticeServiceError::InvalidCase);
            }
        }

        let now = Utc::now();
        let message = Message {
            id: MessageId(Uuid::now_v7()),
            sender_id: input.sender_id,
            receiver_id: input.receiver_id,
            case_id: input.case_id,
            content,
            kind: input.kind.unwrap_or_default(),
            file_url: trimmed(input.file_url),
            file_name: trimmed(input.file_name),
            is_read: false,
            read_at: None,
            created_at: now,
            updated_at: now,
        };
        self.messages.create(&message).await?;
        message_view(&self.users, &self.cases, message).await
    }
}

// ── GetMessage ───────────────────────────────────────────────────────────────

pub struct GetMessageUseCase<U, C, M>
where
    U: UserRepository,
    C: CaseRepository,
    M: MessageRepository,
{
    pub users: U,
    pub cases: C,
    pub messages: M,
}

impl<U, C, M> GetMessageUseCase<U, C, M>
where
    U: UserRepository,
    C: CaseRepository,
    M: MessageRepository,
{
    pub async fn execute(&self, id: MessageId) -> Result<MessageView, PracticeServiceError> {
        let message = self
            .messages
            .find_by_id(id)
            .await?
            .ok_or(PracticeServiceError::MessageNotFound)?;
        message_view(&self.users, &self.cases, message).await
    }
}

// ── ListMessages ─────────────────────────────────────────────────────────────

/// Serves the inbox, outbox, unread and conversation views.
pub struct ListMessagesUseCase<U, C, M>
where
    U: UserRepository,
    C: CaseRepository,
    M: MessageRepository,
{
    pub users: U,
    pub cases: C,
    pub messages: M,
}

impl<U, C, M> ListMessagesUseCase<U, C, M>
where
    U: UserRepository,
    C: CaseRepository,
    M: MessageRepository,
{
    pub async fn execute(
        &self,
        query: MessageQuery,
    ) -> Result<Vec<MessageView>, PracticeServiceError> {
        let messages = self.messages.list(query).await?;
        message_views(&self.users, &self.cases, messages).await
    }
}

// ── MarkMessageRead ──────────────────────────────────────────────────────────

pub struct MarkMessageReadUseCase<U, C, M>
where
    U: UserRepository,
    C: CaseRepository,
    M: MessageRepository,
{
    pub users: U,
    pub cases: C,
    pub messages: M,
}

impl<U, C, M> MarkMessageReadUseCase<U, C, M>
where
    U: UserRepository,
    C: CaseRepository,
    M: MessageRepository,
{
    /// Idempotent; a second call only refreshes `read_at`.
    pub async fn execute(&self, id: MessageId) -> Result<MessageView, PracticeServiceError> {
        let message = self
            .messages
            .mark_read(id)
            .await?
            .ok_or(PracticeServiceError::MessageNotFound)?;
        message_view(&self.users, &self.cases, message).await
    }
}

// ── MarkMessagesRead ─────────────────────────────────────────────────────────

pub struct MarkMessagesReadUseCase<M: MessageRepository> {
    pub messages: M,
}

impl<M: MessageRepository> MarkMessagesReadUseCase<M> {
    /// Returns the number of messages touched.
    pub async fn execute(&self, ids: &[MessageId]) -> Result<u64, PracticeServiceError> {
        if ids.is_empty() {
            return Err(PracticeServiceError::InvalidMessageIds);
        }
        self.messages.mark_many_read(ids).await
    }
}

// ── DeleteMessage ────────────────────────────────────────────────────────────

pub struct DeleteMessageUseCase<M: MessageRepository> {
    pub messages: M,
}

impl<M: MessageRepository> DeleteMessageUseCase<M> {
    pub async fn execute(&self, id: MessageId) -> Result<(), PracticeServiceError> {
        if !self.messages.delete(id).await? {
            return Err(PracticeServiceError::MessageNotFound);
        }
        Ok(())
    }
}
