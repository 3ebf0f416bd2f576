use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::Response,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use docket_auth_types::identity::IdentityHeaders;
use docket_core::error::message_response;
use docket_domain::pagination::Window;
use docket_domain::priority::Priority;

use crate::domain::types::{
    AppointmentStatus, NotificationKind, NotificationQuery, PaymentStatus, RelatedSummary,
};
use crate::error::PracticeServiceError;
use crate::handlers::summary::{CaseSummaryResponse, ModifiedResponse};
use crate::state::AppState;
use crate::usecase::notification::{
    ClearNotificationsUseCase, CreateNotificationInput, CreateNotificationUseCase,
    DeleteNotificationUseCase, ListNotificationsUseCase, MarkNotificationReadUseCase,
    MarkNotificationsReadUseCase, NotificationView, UnreadCountUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct NotificationResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub related_entity_type: Option<&'static str>,
    pub related_entity_id: Option<Uuid>,
    /// `null` when absent or when the referenced record is gone.
    pub related_entity: Option<RelatedResponse>,
    pub is_read: bool,
    pub priority: Priority,
    pub action_url: Option<String>,
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(serialize_with = "docket_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "docket_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<NotificationView> for NotificationResponse {
    fn from(view: NotificationView) -> Self {
        let n = view.notification;
        Self {
            id: n.id,
            user_id: n.user_id,
            title: n.title,
            message: n.body,
            kind: n.kind,
            related_entity_type: n.related.map(|r| r.kind()),
            related_entity_id: n.related.map(|r| r.id()),
            related_entity: view.related.map(RelatedResponse::from),
            is_read: n.is_read,
            priority: n.priority,
            action_url: n.action_url,
            metadata: n.metadata,
            created_at: n.created_at,
            updated_at: n.updated_at,
        }
    }
}

#[derive(Serialize)]
#[serde(tag = "type", content = "summary")]
pub enum RelatedResponse {
    Case(CaseSummaryResponse),
    Appointment {
        id: Uuid,
        date: NaiveDate,
        time: String,
        status: AppointmentStatus,
    },
    Message {
        id: Uuid,
        content: String,
        sender_id: Uuid,
        is_read: bool,
    },
    Invoice {
        id: Uuid,
        invoice_number: String,
        #[serde(with = "rust_decimal::serde::str")]
        amount: Decimal,
        payment_status: PaymentStatus,
    },
}

impl From<RelatedSummary> for RelatedResponse {
    fn from(summary: RelatedSummary) -> Self {
        match summary {
            RelatedSummary::Case(c) => Self::Case(c.into()),
            RelatedSummary::Appointment(a) => Self::Appointment {
                id: a.id.0,
                date: a.date,
                time: a.time,
                status: a.status,
            },
            RelatedSummary::Message(m) => Self::Message {
                id: m.id.0,
                content: m.content,
                sender_id: m.sender_id,
                is_read: m.is_read,
            },
            RelatedSummary::Invoice(i) => Self::Invoice {
                id: i.id.0,
                invoice_number: i.invoice_number,
                amount: i.amount,
                payment_status: i.payment_status,
            },
        }
    }
}

#[derive(Serialize)]
pub struct NotificationPageResponse {
    pub notifications: Vec<NotificationResponse>,
    pub total: u64,
    pub limit: u64,
    pub skip: u64,
}

#[derive(Serialize)]
pub struct UnreadCountResponse {
    pub unread_count: u64,
}

// ── Query params ─────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct NotificationListQuery {
    pub limit: Option<u64>,
    pub skip: Option<u64>,
    #[serde(default)]
    pub unread_only: bool,
    #[serde(rename = "type")]
    pub kind: Option<NotificationKind>,
}

// ── GET /api/notifications ───────────────────────────────────────────────────

pub async fn list_notifications(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Query(query): Query<NotificationListQuery>,
) -> Result<Json<NotificationPageResponse>, PracticeServiceError> {
    let defaults = Window::default();
    let window = Window {
        limit: query.limit.unwrap_or(defaults.limit),
        skip: query.skip.unwrap_or(defaults.skip),
    };
    let usecase = ListNotificationsUseCase {
        notifications: state.notification_repo(),
        resolver: state.related_resolver(),
    };
    let page = usecase
        .execute(
            identity.user_id,
            NotificationQuery {
                unread_only: query.unread_only,
                kind: query.kind,
                window,
            },
        )
        .await?;
    Ok(Json(NotificationPageResponse {
        notifications: page.items.into_iter().map(Into::into).collect(),
        total: page.total,
        limit: page.window.limit,
        skip: page.window.skip,
    }))
}

// ── POST /api/notifications ──────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateNotificationRequest {
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub related_entity_type: Option<String>,
    pub related_entity_id: Option<Uuid>,
    pub priority: Option<Priority>,
    pub action_url: Option<String>,
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
}

pub async fn create_notification(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<CreateNotificationRequest>,
) -> Result<(StatusCode, Json<NotificationResponse>), PracticeServiceError> {
    let usecase = CreateNotificationUseCase {
        notifications: state.notification_repo(),
        resolver: state.related_resolver(),
    };
    let view = usecase
        .execute(
            identity.user_id,
            CreateNotificationInput {
                title: body.title,
                body: body.message,
                kind: body.kind,
                related_entity_type: body.related_entity_type,
                related_entity_id: body.related_entity_id,
                priority: body.priority,
                action_url: body.action_url,
                metadata: body.metadata,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(view.into())))
}

// ── GET /api/notifications/unread-count ──────────────────────────────────────

pub async fn unread_count(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Json<UnreadCountResponse>, PracticeServiceError> {
    let usecase = UnreadCountUseCase {
        notifications: state.notification_repo(),
    };
    let unread_count = usecase.execute(identity.user_id).await?;
    Ok(Json(UnreadCountResponse { unread_count }))
}

// ── PUT /api/notifications/mark-read ─────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct MarkReadRequest {
    /// Every unread notification when absent.
    pub notification_ids: Option<Vec<Uuid>>,
}

pub async fn mark_notifications_read(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    body: Option<Json<MarkReadRequest>>,
) -> Result<Json<ModifiedResponse>, PracticeServiceError> {
    let body = body.map(|Json(b)| b).unwrap_or_default();
    let usecase = MarkNotificationsReadUseCase {
        notifications: state.notification_repo(),
    };
    let modified_count = usecase
        .execute(identity.user_id, body.notification_ids)
        .await?;
    Ok(Json(ModifiedResponse {
        message: "Notifications marked as read",
        modified_count,
    }))
}

// ── PUT /api/notifications/{id}/read ─────────────────────────────────────────

pub async fn mark_notification_read(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, PracticeServiceError> {
    let usecase = MarkNotificationReadUseCase {
        notifications: state.notification_repo(),
    };
    usecase.execute(identity.user_id, id).await?;
    Ok(message_response("Notification marked as read"))
}

// ── DELETE /api/notifications/{id} ───────────────────────────────────────────

pub async fn delete_notification(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, PracticeServiceError> {
    let usecase = DeleteNotificationUseCase {
        notifications: state.notification_repo(),
    };
    usecase.execute(identity.user_id, id).await?;
    Ok(message_response("Notification deleted successfully"))
}

// ── DELETE /api/notifications ────────────────────────────────────────────────

pub async fn clear_notifications(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Json<ModifiedResponse>, PracticeServiceError> {
    let usecase = ClearNotificationsUseCase {
        notifications: state.notification_repo(),
    };
    let modified_count = usecase.execute(identity.user_id).await?;
    Ok(Json(ModifiedResponse {
        message: "All notifications deleted",
        modified_count,
    }))
}
