//! Mock identity helpers for integration tests.
//!
//! Services behind the gateway receive `x-docket-user-id` + `x-docket-account-type` headers.
//! In tests, `MockAuth` produces these headers directly so no real gateway is needed.

use axum::http::{HeaderMap, HeaderName, HeaderValue};
use uuid::Uuid;

use docket_auth_types::identity::{X_DOCKET_ACCOUNT_TYPE, X_DOCKET_USER_ID};
use docket_domain::account::AccountType;

/// Configurable identity injected into test requests.
#[derive(Debug, Clone, Copy)]
pub struct MockAuth {
    pub user_id: Uuid,
    pub account_type: AccountType,
}

impl MockAuth {
    pub fn new(user_id: Uuid, account_type: AccountType) -> Self {
        Self {
            user_id,
            account_type,
        }
    }

    pub fn client() -> Self {
        Self::new(Uuid::now_v7(), AccountType::Client)
    }

    pub fn lawyer() -> Self {
        Self::new(Uuid::now_v7(), AccountType::Lawyer)
    }

    pub fn admin() -> Self {
        Self::new(Uuid::now_v7(), AccountType::Admin)
    }

    /// Return headers as if the gateway injected them.
    pub fn headers(&self) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(HeaderName::from_static(X_DOCKET_USER_ID), self.user_id_value());
        map.insert(
            HeaderName::from_static(X_DOCKET_ACCOUNT_TYPE),
            HeaderValue::from_static(self.account_type.as_str()),
        );
        map
    }

    pub fn user_id_value(&self) -> HeaderValue {
        HeaderValue::from_str(&self.user_id.to_string()).unwrap()
    }

    pub fn account_type_value(&self) -> HeaderValue {
        HeaderValue::from_static(self.account_type.as_str())
    }
}
