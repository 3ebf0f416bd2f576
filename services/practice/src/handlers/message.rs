use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::Response,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use docket_auth_types::identity::IdentityHeaders;
use docket_core::error::message_response;
use docket_domain::id::{CaseId, MessageId};

use crate::domain::types::{Mailbox, MessageKind, MessageQuery};
use crate::error::PracticeServiceError;
use crate::handlers::summary::{CaseSummaryResponse, ModifiedResponse, UserSummaryResponse};
use crate::state::AppState;
use crate::usecase::message::{
    DeleteMessageUseCase, GetMessageUseCase, ListMessagesUseCase, MarkMessageReadUseCase,
    MarkMessagesReadUseCase, SendMessageInput, SendMessageUseCase,
};
use crate::usecase::populate::MessageView;

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct MessageResponse {
    pub id: MessageId,
    pub sender_id: Uuid,
    pub sender: Option<UserSummaryResponse>,
    pub receiver_id: Uuid,
    pub receiver: Option<UserSummaryResponse>,
    pub case_id: Option<CaseId>,
    pub case: Option<CaseSummaryResponse>,
    pub content: String,
    pub message_type: MessageKind,
    pub file_url: Option<String>,
    pub file_name: Option<String>,
    pub is_read: bool,
    #[serde(serialize_with = "docket_core::serde::to_rfc3339_ms_opt")]
    pub read_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(serialize_with = "docket_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "docket_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<MessageView> for MessageResponse {
    fn from(view: MessageView) -> Self {
        let m = view.message;
        Self {
            id: m.id,
            sender_id: m.sender_id,
            sender: view.sender.map(Into::into),
            receiver_id: m.receiver_id,
            receiver: view.receiver.map(Into::into),
            case_id: m.case_id,
            case: view.case.map(Into::into),
            content: m.content,
            message_type: m.kind,
            file_url: m.file_url,
            file_name: m.file_name,
            is_read: m.is_read,
            read_at: m.read_at,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

// ── Query params ─────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct ConversationQuery {
    pub case_id: Option<Uuid>,
    pub limit: Option<u64>,
}

#[derive(Deserialize, Default)]
pub struct MailboxQuery {
    #[serde(rename = "type", default)]
    pub mailbox: Mailbox,
}

async fn list_with(
    state: &AppState,
    query: MessageQuery,
) -> Result<Json<Vec<MessageResponse>>, PracticeServiceError> {
    let usecase = ListMessagesUseCase {
        users: state.user_repo(),
        cases: state.case_repo(),
        messages: state.message_repo(),
    };
    let views = usecase.execute(query).await?;
    Ok(Json(views.into_iter().map(MessageResponse::from).collect()))
}

// ── GET /api/messages ────────────────────────────────────────────────────────

pub async fn list_messages(
    State(state): State<AppState>,
) -> Result<Json<Vec<MessageResponse>>, PracticeServiceError> {
    list_with(&state, MessageQuery::All).await
}

// ── GET /api/messages/user/{id} ──────────────────────────────────────────────

pub async fn list_user_messages(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Query(query): Query<MailboxQuery>,
) -> Result<Json<Vec<MessageResponse>>, PracticeServiceError> {
    list_with(
        &state,
        MessageQuery::Participant {
            user_id,
            mailbox: query.mailbox,
        },
    )
    .await
}

// ── GET /api/messages/user/{id}/unread ───────────────────────────────────────

pub async fn list_unread_messages(
    State(state): State<AppState>,
    Path(receiver_id): Path<Uuid>,
) -> Result<Json<Vec<MessageResponse>>, PracticeServiceError> {
    list_with(&state, MessageQuery::Unread { receiver_id }).await
}

// ── GET /api/messages/conversation/{a}/{b} ───────────────────────────────────

pub async fn get_conversation(
    State(state): State<AppState>,
    Path((a, b)): Path<(Uuid, Uuid)>,
    Query(query): Query<ConversationQuery>,
) -> Result<Json<Vec<MessageResponse>>, PracticeServiceError> {
    list_with(
        &state,
        MessageQuery::conversation(a, b, query.case_id.map(CaseId), query.limit),
    )
    .await
}

// ── POST /api/messages ───────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SendMessageRequest {
    pub receiver_id: Uuid,
    pub case_id: Option<Uuid>,
    pub content: String,
    pub message_type: Option<MessageKind>,
    pub file_url: Option<String>,
    pub file_name: Option<String>,
}

/// The caller is always the sender.
pub async fn send_message(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<SendMessageRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), PracticeServiceError> {
    let usecase = SendMessageUseCase {
        users: state.user_repo(),
        cases: state.case_repo(),
        messages: state.message_repo(),
    };
    let view = usecase
        .execute(SendMessageInput {
            sender_id: identity.user_id,
            receiver_id: body.receiver_id,
            case_id: body.case_id.map(CaseId),
            content: body.content,
            kind: body.message_type,
            file_url: body.file_url,
            file_name: body.file_name,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(view.into())))
}

// ── GET /api/messages/{id} ───────────────────────────────────────────────────

pub async fn get_message(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, PracticeServiceError> {
    let usecase = GetMessageUseCase {
        users: state.user_repo(),
        cases: state.case_repo(),
        messages: state.message_repo(),
    };
    Ok(Json(usecase.execute(MessageId(id)).await?.into()))
}

// ── PATCH /api/messages/{id}/read ────────────────────────────────────────────

pub async fn mark_message_read(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, PracticeServiceError> {
    let usecase = MarkMessageReadUseCase {
        users: state.user_repo(),
        cases: state.case_repo(),
        messages: state.message_repo(),
    };
    Ok(Json(usecase.execute(MessageId(id)).await?.into()))
}

// ── PATCH /api/messages/read-multiple ────────────────────────────────────────

#[derive(Deserialize)]
pub struct MarkMultipleRequest {
    #[serde(default)]
    pub message_ids: Vec<Uuid>,
}

pub async fn mark_messages_read(
    State(state): State<AppState>,
    Json(body): Json<MarkMultipleRequest>,
) -> Result<Json<ModifiedResponse>, PracticeServiceError> {
    let usecase = MarkMessagesReadUseCase {
        messages: state.message_repo(),
    };
    let ids: Vec<MessageId> = body.message_ids.into_iter().map(MessageId).collect();
    let modified_count = usecase.execute(&ids).await?;
    Ok(Json(ModifiedResponse {
        message: "Messages marked as read",
        modified_count,
    }))
}

// ── DELETE /api/messages/{id} ────────────────────────────────────────────────

pub async fn delete_message(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, PracticeServiceError> {
    let usecase = DeleteMessageUseCase {
        messages: state.message_repo(),
    };
    usecase.execute(MessageId(id)).await?;
    Ok(message_response("Message deleted successfully"))
}
