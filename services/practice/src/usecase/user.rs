use chrono::Utc;
use uuid::Uuid;

use docket_domain::account::AccountType;

use crate::domain::repository::UserRepository;
use crate::domain::types::{User, UserPatch, normalize_email, trimmed};
use crate::error::PracticeServiceError;

// ── CreateUser ───────────────────────────────────────────────────────────────

pub struct CreateUserInput {
    pub auth_subject: String,
    pub email: String,
    pub full_name: String,
    pub account_type: Option<AccountType>,
    pub phone_number: Option<String>,
    pub profile_picture: Option<String>,
}

pub struct CreateUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> CreateUserUseCase<R> {
    pub async fn execute(&self, input: CreateUserInput) -> Result<User, PracticeServiceError> {
        let auth_subject = input.auth_subject.trim().to_owned();
        let email = normalize_email(&input.email);
        let full_name = input.full_name.trim().to_owned();
        if auth_subject.is_empty() || email.is_empty() || full_name.is_empty() {
            return Err(PracticeServiceError::MissingData);
        }

        if self
            .repo
            .find_by_subject_or_email(&auth_subject, &email)
            .await?
            .is_some()
        {
            return Err(PracticeServiceError::UserAlreadyExists);
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::now_v7(),
            auth_subject,
            email,
            full_name,
            account_type: input.account_type.unwrap_or_default(),
            phone_number: trimmed(input.phone_number),
            profile_picture: input.profile_picture.unwrap_or_default(),
            is_active: true,
            last_login: now,
            created_at: now,
            updated_at: now,
        };
        self.repo.create(&user).await?;
        Ok(user)
    }
}

// ── GetUser ──────────────────────────────────────────────────────────────────

pub struct GetUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> GetUserUseCase<R> {
    pub async fn execute(&self, user_id: Uuid) -> Result<User, PracticeServiceError> {
        self.repo
            .find_by_id(user_id)
            .await?
            .ok_or(PracticeServiceError::UserNotFound)
    }
}

// ── GetUserByAuthSubject ─────────────────────────────────────────────────────

pub struct GetUserByAuthSubjectUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> GetUserByAuthSubjectUseCase<R> {
    pub async fn execute(&self, subject: &str) -> Result<User, PracticeServiceError> {
        self.repo
            .find_by_auth_subject(subject)
            .await?
            .ok_or(PracticeServiceError::UserNotFound)
    }
}

// ── ListUsers ────────────────────────────────────────────────────────────────

pub struct ListUsersUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> ListUsersUseCase<R> {
    pub async fn execute(
        &self,
        account_type: Option<AccountType>,
    ) -> Result<Vec<User>, PracticeServiceError> {
        match account_type {
            Some(t) => self.repo.list_by_account_type(t).await,
            None => self.repo.list().await,
        }
    }
}

// ── UpdateUser ───────────────────────────────────────────────────────────────

pub struct UpdateUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> UpdateUserUseCase<R> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        patch: UserPatch,
    ) -> Result<User, PracticeServiceError> {
        apply_patch(&self.repo, user_id, patch).await
    }
}

async fn apply_patch<R: UserRepository>(
    repo: &R,
    user_id: Uuid,
    patch: UserPatch,
) -> Result<User, PracticeServiceError> {
    if patch.is_empty() {
        return Err(PracticeServiceError::MissingData);
    }
    let patch = patch.normalized();
    if patch.email.as_deref() == Some("") || patch.full_name.as_deref() == Some("") {
        return Err(PracticeServiceError::MissingData);
    }
    repo.update(user_id, &patch)
        .await?
        .ok_or(PracticeServiceError::UserNotFound)
}

// ── UpdateProfile ────────────────────────────────────────────────────────────

/// Self-service subset of the user record.
pub struct UpdateProfileInput {
    pub full_name: Option<String>,
    pub phone_number: Option<String>,
    pub profile_picture: Option<String>,
}

pub struct UpdateProfileUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> UpdateProfileUseCase<R> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        input: UpdateProfileInput,
    ) -> Result<User, PracticeServiceError> {
        let patch = UserPatch {
            full_name: input.full_name,
            phone_number: input.phone_number,
            profile_picture: input.profile_picture,
            ..Default::default()
        };
        apply_patch(&self.repo, user_id, patch).await
    }
}

// ── DeactivateUser ───────────────────────────────────────────────────────────

pub struct DeactivateUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> DeactivateUserUseCase<R> {
    pub async fn execute(&self, user_id: Uuid) -> Result<(), PracticeServiceError> {
        if !self.repo.deactivate(user_id).await? {
            return Err(PracticeServiceError::UserNotFound);
        }
        tracing::info!(%user_id, "user deactivated");
        Ok(())
    }
}

// ── DeleteUser ───────────────────────────────────────────────────────────────

pub struct DeleteUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> DeleteUserUseCase<R> {
    pub async fn execute(&self, user_id: Uuid) -> Result<(), PracticeServiceError> {
        if !self.repo.delete(user_id).await? {
            return Err(PracticeServiceError::UserNotFound);
        }
        Ok(())
    }
}
