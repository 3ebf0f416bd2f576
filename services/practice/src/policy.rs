//! Account types allowed to perform restricted operations.

use docket_auth_types::identity::IdentityHeaders;
use docket_domain::account::AccountType;

use crate::error::PracticeServiceError;

pub const CREATE_CASE: &[AccountType] = &[AccountType::Lawyer, AccountType::Admin];
pub const DELETE_CASE: &[AccountType] = &[AccountType::Lawyer, AccountType::Admin];

/// `Forbidden` unless the caller holds one of `roles`.
pub fn require(identity: &IdentityHeaders, roles: &[AccountType]) -> Result<(), PracticeServiceError> {
    if identity.has_any_role(roles) {
        Ok(())
    } else {
        Err(PracticeServiceError::Forbidden)
    }
}
