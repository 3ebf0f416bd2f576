//! Response bodies shared by several handlers.

use serde::Serialize;
use uuid::Uuid;

use docket_domain::account::AccountType;
use docket_domain::id::CaseId;

use crate::domain::types::{CaseStatus, CaseSummary, CaseType, UserSummary};

#[derive(Serialize)]
pub struct UserSummaryResponse {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub account_type: AccountType,
    pub phone_number: Option<String>,
}

impl From<UserSummary> for UserSummaryResponse {
    fn from(u: UserSummary) -> Self {
        Self {
            id: u.id,
            full_name: u.full_name,
            email: u.email,
            account_type: u.account_type,
            phone_number: u.phone_number,
        }
    }
}

#[derive(Serialize)]
pub struct CaseSummaryResponse {
    pub id: CaseId,
    pub title: String,
    pub case_type: CaseType,
    pub status: CaseStatus,
}

impl From<CaseSummary> for CaseSummaryResponse {
    fn from(c: CaseSummary) -> Self {
        Self {
            id: c.id,
            title: c.title,
            case_type: c.case_type,
            status: c.status,
        }
    }
}

/// Outcome of a bulk update or delete.
#[derive(Serialize)]
pub struct ModifiedResponse {
    pub message: &'static str,
    pub modified_count: u64,
}
