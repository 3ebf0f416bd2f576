use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::Response,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use docket_core::error::message_response;
use docket_domain::account::AccountType;

use crate::domain::types::{User, UserPatch};
use crate::error::PracticeServiceError;
use crate::state::AppState;
use crate::usecase::user::{
    CreateUserInput, CreateUserUseCase, DeactivateUserUseCase, DeleteUserUseCase,
    GetUserByAuthSubjectUseCase, GetUserUseCase, ListUsersUseCase, UpdateProfileInput,
    UpdateProfileUseCase, UpdateUserUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub auth_subject: String,
    pub email: String,
    pub full_name: String,
    pub display_name: String,
    pub account_type: AccountType,
    pub phone_number: Option<String>,
    pub profile_picture: String,
    pub is_active: bool,
    #[serde(serialize_with = "docket_core::serde::to_rfc3339_ms")]
    pub last_login: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "docket_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "docket_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            display_name: user.display_name().to_owned(),
            id: user.id,
            auth_subject: user.auth_subject,
            email: user.email,
            full_name: user.full_name,
            account_type: user.account_type,
            phone_number: user.phone_number,
            profile_picture: user.profile_picture,
            is_active: user.is_active,
            last_login: user.last_login,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

fn user_list(users: Vec<User>) -> Json<Vec<UserResponse>> {
    Json(users.into_iter().map(UserResponse::from).collect())
}

// ── GET /api/users ───────────────────────────────────────────────────────────

pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, PracticeServiceError> {
    let usecase = ListUsersUseCase {
        repo: state.user_repo(),
    };
    Ok(user_list(usecase.execute(None).await?))
}

// ── GET /api/users/type/{account_type} ───────────────────────────────────────

pub async fn list_users_by_type(
    State(state): State<AppState>,
    Path(account_type): Path<AccountType>,
) -> Result<Json<Vec<UserResponse>>, PracticeServiceError> {
    let usecase = ListUsersUseCase {
        repo: state.user_repo(),
    };
    Ok(user_list(usecase.execute(Some(account_type)).await?))
}

// ── POST /api/users ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub auth_subject: String,
    pub email: String,
    pub full_name: String,
    pub account_type: Option<AccountType>,
    pub phone_number: Option<String>,
    pub profile_picture: Option<String>,
}

pub async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), PracticeServiceError> {
    let usecase = CreateUserUseCase {
        repo: state.user_repo(),
    };
    let user = usecase
        .execute(CreateUserInput {
            auth_subject: body.auth_subject,
            email: body.email,
            full_name: body.full_name,
            account_type: body.account_type,
            phone_number: body.phone_number,
            profile_picture: body.profile_picture,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

// ── GET /api/users/{id} ──────────────────────────────────────────────────────

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserResponse>, PracticeServiceError> {
    let usecase = GetUserUseCase {
        repo: state.user_repo(),
    };
    Ok(Json(usecase.execute(id).await?.into()))
}

// ── GET /api/users/auth/{subject} ────────────────────────────────────────────

pub async fn get_user_by_auth_subject(
    State(state): State<AppState>,
    Path(subject): Path<String>,
) -> Result<Json<UserResponse>, PracticeServiceError> {
    let usecase = GetUserByAuthSubjectUseCase {
        repo: state.user_repo(),
    };
    Ok(Json(usecase.execute(&subject).await?.into()))
}

// ── PUT /api/users/{id} ──────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub account_type: Option<AccountType>,
    pub phone_number: Option<String>,
    pub profile_picture: Option<String>,
    pub is_active: Option<bool>,
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, PracticeServiceError> {
    let usecase = UpdateUserUseCase {
        repo: state.user_repo(),
    };
    let user = usecase
        .execute(
            id,
            UserPatch {
                email: body.email,
                full_name: body.full_name,
                account_type: body.account_type,
                phone_number: body.phone_number,
                profile_picture: body.profile_picture,
                is_active: body.is_active,
            },
        )
        .await?;
    Ok(Json(user.into()))
}

// ── PUT /api/users/{id}/profile ──────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateProfileRequest {
    pub full_name: Option<String>,
    pub phone_number: Option<String>,
    pub profile_picture: Option<String>,
}

pub async fn update_profile(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateProfileRequest>,
) -> Result<Json<UserResponse>, PracticeServiceError> {
    let usecase = UpdateProfileUseCase {
        repo: state.user_repo(),
    };
    let user = usecase
        .execute(
            id,
            UpdateProfileInput {
                full_name: body.full_name,
                phone_number: body.phone_number,
                profile_picture: body.profile_picture,
            },
        )
        .await?;
    Ok(Json(user.into()))
}

// ── PUT /api/users/{id}/deactivate ───────────────────────────────────────────

pub async fn deactivate_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, PracticeServiceError> {
    let usecase = DeactivateUserUseCase {
        repo: state.user_repo(),
    };
    usecase.execute(id).await?;
    Ok(message_response("User deactivated successfully"))
}

// ── DELETE /api/users/{id} ───────────────────────────────────────────────────

pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, PracticeServiceError> {
    let usecase = DeleteUserUseCase {
        repo: state.user_repo(),
    };
    usecase.execute(id).await?;
    Ok(message_response("User deleted successfully"))
}
