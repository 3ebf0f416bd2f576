use std::sync::Arc;

use axum::extract::FromRef;
use sea_orm::DatabaseConnection;

use crate::infra::db::{
    DbAppointmentRepository, DbCaseRepository, DbInvoiceRepository, DbMessageRepository,
    DbNotificationRepository, DbRelatedEntityResolver, DbUserRepository,
};

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    /// Canonical appointment slot labels.
    pub slots: Arc<[String]>,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn case_repo(&self) -> DbCaseRepository {
        DbCaseRepository {
            db: self.db.clone(),
        }
    }

    pub fn appointment_repo(&self) -> DbAppointmentRepository {
        DbAppointmentRepository {
            db: self.db.clone(),
        }
    }

    pub fn message_repo(&self) -> DbMessageRepository {
        DbMessageRepository {
            db: self.db.clone(),
        }
    }

    pub fn notification_repo(&self) -> DbNotificationRepository {
        DbNotificationRepository {
            db: self.db.clone(),
        }
    }

    pub fn related_resolver(&self) -> DbRelatedEntityResolver {
        DbRelatedEntityResolver {
            db: self.db.clone(),
        }
    }

    pub fn invoice_repo(&self) -> DbInvoiceRepository {
        DbInvoiceRepository {
            db: self.db.clone(),
        }
    }
}

impl FromRef<AppState> for DatabaseConnection {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}
