use axum::extract::State;
use axum::http::StatusCode;
use sea_orm::DatabaseConnection;

/// Handler for `GET /healthz`: liveness check.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Handler for `GET /readyz`: ready once the store answers a ping.
///
/// Mount on a router whose state implements `FromRef<_>` for `DatabaseConnection`.
pub async fn readyz(State(db): State<DatabaseConnection>) -> StatusCode {
    match db.ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "database ping failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
