use chrono::Utc;
use uuid::Uuid;

use docket_domain::pagination::Window;
use docket_domain::priority::Priority;

use crate::domain::repository::{NotificationRepository, RelatedEntityResolver};
use crate::domain::types::{
    Notification, NotificationKind, NotificationQuery, RelatedEntity, RelatedSummary, trimmed,
};
use crate::error::PracticeServiceError;

#[derive(Debug, Clone)]
pub struct NotificationView {
    pub notification: Notification,
    pub related: Option<RelatedSummary>,
}

#[derive(Debug, Clone)]
pub struct NotificationPage {
    pub items: Vec<NotificationView>,
    /// Every notification the user owns, regardless of filters.
    pub total: u64,
    pub window: Window,
}

async fn resolve<R: RelatedEntityResolver>(
    resolver: &R,
    notification: Notification,
) -> Result<NotificationView, PracticeServiceError> {
    let related = match notification.related {
        Some(entity) => resolver.resolve(entity).await?,
        None => None,
    };
    Ok(NotificationView {
        notification,
        related,
    })
}

// ── CreateNotification ───────────────────────────────────────────────────────

pub struct CreateNotificationInput {
    pub title: String,
    pub body: String,
    pub kind: NotificationKind,
    pub related_entity_type: Option<String>,
    pub related_entity_id: Option<Uuid>,
    pub priority: Option<Priority>,
    pub action_url: Option<String>,
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
}

pub struct CreateNotificationUseCase<N: NotificationRepository, R: RelatedEntityResolver> {
    pub notifications: N,
    pub resolver: R,
}

impl<N: NotificationRepository, R: RelatedEntityResolver> CreateNotificationUseCase<N, R> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        input: CreateNotificationInput,
    ) -> Result<NotificationView, PracticeServiceError> {
        let title = input.title.trim().to_owned();
        let body = input.body.trim().to_owned();
        if title.is_empty() || body.is_empty() {
            return Err(PracticeServiceError::MissingData);
        }
        let related = RelatedEntity::from_parts(
            input.related_entity_type.as_deref(),
            input.related_entity_id,
        )?;

        let now = Utc::now();
        let notification = Notification {
            id: Uuid::now_v7(),
            user_id,
            title,
            body,
            kind: input.kind,
            related,
            is_read: false,
            priority: input.priority.unwrap_or_default(),
            action_url: trimmed(input.action_url),
            metadata: input.metadata,
            created_at: now,
            updated_at: now,
        };
        self.notifications.create(&notification).await?;
        resolve(&self.resolver, notification).await
    }
}

// ── ListNotifications ────────────────────────────────────────────────────────

pub struct ListNotificationsUseCase<N: NotificationRepository, R: RelatedEntityResolver> {
    pub notifications: N,
    pub resolver: R,
}

impl<N: NotificationRepository, R: RelatedEntityResolver> ListNotificationsUseCase<N, R> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        query: NotificationQuery,
    ) -> Result<NotificationPage, PracticeServiceError> {
        let query = NotificationQuery {
            window: query.window.clamped(),
            ..query
        };
        let notifications = self.notifications.list(user_id, query).await?;
        let total = self.notifications.count(user_id).await?;

        let mut items = Vec::with_capacity(notifications.len());
        for notification in notifications {
            items.push(resolve(&self.resolver, notification).await?);
        }
        Ok(NotificationPage {
            items,
            total,
            window: query.window,
        })
    }
}

// ── UnreadCount ──────────────────────────────────────────────────────────────

pub struct UnreadCountUseCase<N: NotificationRepository> {
    pub notifications: N,
}

impl<N: NotificationRepository> UnreadCountUseCase<N> {
    pub async fn execute(&self, user_id: Uuid) -> Result<u64, PracticeServiceError> {
        self.notifications.count_unread(user_id).await
    }
}

// ── MarkNotificationsRead ────────────────────────────────────────────────────

pub struct MarkNotificationsReadUseCase<N: NotificationRepository> {
    pub notifications: N,
}

impl<N: NotificationRepository> MarkNotificationsReadUseCase<N> {
    /// Marks the caller's listed notifications, or all of them when `ids` is `None`.
    /// Ids that are unknown, already read or owned by someone else are skipped.
    pub async fn execute(
        &self,
        user_id: Uuid,
        ids: Option<Vec<Uuid>>,
    ) -> Result<u64, PracticeServiceError> {
        self.notifications.mark_read(user_id, ids.as_deref()).await
    }
}

// ── MarkNotificationRead ─────────────────────────────────────────────────────

pub struct MarkNotificationReadUseCase<N: NotificationRepository> {
    pub notifications: N,
}

impl<N: NotificationRepository> MarkNotificationReadUseCase<N> {
    pub async fn execute(&self, user_id: Uuid, id: Uuid) -> Result<(), PracticeServiceError> {
        if !self.notifications.mark_one_read(user_id, id).await? {
            return Err(PracticeServiceError::NotificationNotFound);
        }
        Ok(())
    }
}

// ── DeleteNotification ───────────────────────────────────────────────────────

pub struct DeleteNotificationUseCase<N: NotificationRepository> {
    pub notifications: N,
}

impl<N: NotificationRepository> DeleteNotificationUseCase<N> {
    pub async fn execute(&self, user_id: Uuid, id: Uuid) -> Result<(), PracticeServiceError> {
        if !self.notifications.delete(user_id, id).await? {
            return Err(PracticeServiceError::NotificationNotFound);
        }
        Ok(())
    }
}

// ── ClearNotifications ───────────────────────────────────────────────────────

pub struct ClearNotificationsUseCase<N: NotificationRepository> {
    pub notifications: N,
}

impl<N: NotificationRepository> ClearNotificationsUseCase<N> {
    pub async fn execute(&self, user_id: Uuid) -> Result<u64, PracticeServiceError> {
        self.notifications.delete_all(user_id).await
    }
}
