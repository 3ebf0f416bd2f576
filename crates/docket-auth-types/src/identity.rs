//! Gateway-injected identity headers extractor.

use axum::extract::FromRequestParts;
use http::StatusCode;
use http::request::Parts;
use uuid::Uuid;

use docket_domain::account::AccountType;

pub const X_DOCKET_USER_ID: &str = "x-docket-user-id";
pub const X_DOCKET_ACCOUNT_TYPE: &str = "x-docket-account-type";

/// Caller identity injected by the gateway via `x-docket-user-id` and
/// `x-docket-account-type` headers.
///
/// Returns 401 if either header is absent or unparsable.
/// Role enforcement (403) is done by handlers after extraction.
#[derive(Debug, Clone)]
pub struct IdentityHeaders {
    pub user_id: Uuid,
    pub account_type: AccountType,
}

impl IdentityHeaders {
    /// True when the caller holds one of `roles`.
    pub fn has_any_role(&self, roles: &[AccountType]) -> bool {
        roles.contains(&self.account_type)
    }
}

impl<S> FromRequestParts<S> for IdentityHeaders
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    // axum-core 0.5 declares this as `fn -> impl Future + Send`; read the headers
    // synchronously and hand back a 'static future.
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let user_id = parts
            .headers
            .get(X_DOCKET_USER_ID)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<Uuid>().ok());

        let account_type = parts
            .headers
            .get(X_DOCKET_ACCOUNT_TYPE)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<AccountType>().ok());

        async move {
            let user_id = user_id.ok_or(StatusCode::UNAUTHORIZED)?;
            let account_type = account_type.ok_or(StatusCode::UNAUTHORIZED)?;
            Ok(Self {
                user_id,
                account_type,
            })
        }
    }
}
