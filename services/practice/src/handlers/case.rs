use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::Response,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use docket_auth_types::identity::IdentityHeaders;
use docket_core::error::message_response;
use docket_domain::id::CaseId;
use docket_domain::priority::Priority;

use crate::domain::types::{CaseDocument, CaseFilter, CaseNote, CasePatch, CaseStatus, CaseType};
use crate::error::PracticeServiceError;
use crate::handlers::summary::UserSummaryResponse;
use crate::policy;
use crate::state::AppState;
use crate::usecase::case::{
    AddCaseDocumentInput, AddCaseDocumentUseCase, AddCaseNoteInput, AddCaseNoteUseCase,
    CreateCaseInput, CreateCaseUseCase, DeleteCaseUseCase, GetCaseUseCase, ListCasesUseCase,
    UpdateCaseUseCase,
};
use crate::usecase::populate::CaseView;

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct CaseResponse {
    pub id: CaseId,
    pub title: String,
    pub description: Option<String>,
    pub client_id: Uuid,
    pub client: Option<UserSummaryResponse>,
    pub lawyer_id: Uuid,
    pub lawyer: Option<UserSummaryResponse>,
    pub case_type: CaseType,
    pub status: CaseStatus,
    pub is_active: bool,
    pub priority: Priority,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub estimated_completion: Option<NaiveDate>,
    pub documents: Vec<DocumentResponse>,
    pub notes: Vec<NoteResponse>,
    #[serde(serialize_with = "docket_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "docket_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<CaseView> for CaseResponse {
    fn from(view: CaseView) -> Self {
        let case = view.case;
        Self {
            is_active: case.is_active(),
            id: case.id,
            title: case.title,
            description: case.description,
            client_id: case.client_id,
            client: view.client.map(Into::into),
            lawyer_id: case.lawyer_id,
            lawyer: view.lawyer.map(Into::into),
            case_type: case.case_type,
            status: case.status,
            priority: case.priority,
            start_date: case.start_date,
            end_date: case.end_date,
            estimated_completion: case.estimated_completion,
            documents: case.documents.into_iter().map(Into::into).collect(),
            notes: case.notes.into_iter().map(Into::into).collect(),
            created_at: case.created_at,
            updated_at: case.updated_at,
        }
    }
}

#[derive(Serialize)]
pub struct DocumentResponse {
    pub id: Uuid,
    pub name: String,
    pub url: String,
    #[serde(serialize_with = "docket_core::serde::to_rfc3339_ms")]
    pub uploaded_at: chrono::DateTime<chrono::Utc>,
}

impl From<CaseDocument> for DocumentResponse {
    fn from(d: CaseDocument) -> Self {
        Self {
            id: d.id,
            name: d.name,
            url: d.url,
            uploaded_at: d.uploaded_at,
        }
    }
}

#[derive(Serialize)]
pub struct NoteResponse {
    pub id: Uuid,
    pub content: String,
    pub created_by: Option<Uuid>,
    #[serde(serialize_with = "docket_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<CaseNote> for NoteResponse {
    fn from(n: CaseNote) -> Self {
        Self {
            id: n.id,
            content: n.content,
            created_by: n.created_by,
            created_at: n.created_at,
        }
    }
}

async fn list_with(
    state: &AppState,
    filter: CaseFilter,
) -> Result<Json<Vec<CaseResponse>>, PracticeServiceError> {
    let usecase = ListCasesUseCase {
        users: state.user_repo(),
        cases: state.case_repo(),
    };
    let views = usecase.execute(filter).await?;
    Ok(Json(views.into_iter().map(CaseResponse::from).collect()))
}

// ── GET /api/cases ───────────────────────────────────────────────────────────

pub async fn list_cases(
    State(state): State<AppState>,
) -> Result<Json<Vec<CaseResponse>>, PracticeServiceError> {
    list_with(&state, CaseFilter::default()).await
}

// ── GET /api/cases/client/{id} ───────────────────────────────────────────────

pub async fn list_client_cases(
    State(state): State<AppState>,
    Path(client_id): Path<Uuid>,
) -> Result<Json<Vec<CaseResponse>>, PracticeServiceError> {
    let filter = CaseFilter {
        client_id: Some(client_id),
        ..Default::default()
    };
    list_with(&state, filter).await
}

// ── GET /api/cases/lawyer/{id} ───────────────────────────────────────────────

pub async fn list_lawyer_cases(
    State(state): State<AppState>,
    Path(lawyer_id): Path<Uuid>,
) -> Result<Json<Vec<CaseResponse>>, PracticeServiceError> {
    let filter = CaseFilter {
        lawyer_id: Some(lawyer_id),
        ..Default::default()
    };
    list_with(&state, filter).await
}

// ── GET /api/cases/status/{status} ───────────────────────────────────────────

pub async fn list_cases_by_status(
    State(state): State<AppState>,
    Path(status): Path<CaseStatus>,
) -> Result<Json<Vec<CaseResponse>>, PracticeServiceError> {
    let filter = CaseFilter {
        status: Some(status),
        ..Default::default()
    };
    list_with(&state, filter).await
}

// ── POST /api/cases ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateCaseRequest {
    pub title: String,
    pub description: Option<String>,
    pub client_id: Uuid,
    pub lawyer_id: Uuid,
    pub case_type: Option<CaseType>,
    pub priority: Option<Priority>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub estimated_completion: Option<NaiveDate>,
}

pub async fn create_case(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<CreateCaseRequest>,
) -> Result<(StatusCode, Json<CaseResponse>), PracticeServiceError> {
    policy::require(&identity, policy::CREATE_CASE)?;
    let usecase = CreateCaseUseCase {
        users: state.user_repo(),
        cases: state.case_repo(),
    };
    let view = usecase
        .execute(CreateCaseInput {
            title: body.title,
            description: body.description,
            client_id: body.client_id,
            lawyer_id: body.lawyer_id,
            case_type: body.case_type,
            priority: body.priority,
            start_date: body.start_date,
            end_date: body.end_date,
            estimated_completion: body.estimated_completion,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(view.into())))
}

// ── GET /api/cases/{id} ──────────────────────────────────────────────────────

pub async fn get_case(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CaseResponse>, PracticeServiceError> {
    let usecase = GetCaseUseCase {
        users: state.user_repo(),
        cases: state.case_repo(),
    };
    Ok(Json(usecase.execute(CaseId(id)).await?.into()))
}

// ── PUT /api/cases/{id} ──────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateCaseRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub client_id: Option<Uuid>,
    pub lawyer_id: Option<Uuid>,
    pub case_type: Option<CaseType>,
    pub status: Option<CaseStatus>,
    pub priority: Option<Priority>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub estimated_completion: Option<NaiveDate>,
}

pub async fn update_case(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateCaseRequest>,
) -> Result<Json<CaseResponse>, PracticeServiceError> {
    let usecase = UpdateCaseUseCase {
        users: state.user_repo(),
        cases: state.case_repo(),
    };
    let view = usecase
        .execute(
            CaseId(id),
            CasePatch {
                title: body.title,
                description: body.description,
                client_id: body.client_id,
                lawyer_id: body.lawyer_id,
                case_type: body.case_type,
                status: body.status,
                priority: body.priority,
                start_date: body.start_date,
                end_date: body.end_date,
                estimated_completion: body.estimated_completion,
            },
        )
        .await?;
    Ok(Json(view.into()))
}

// ── DELETE /api/cases/{id} ───────────────────────────────────────────────────

pub async fn delete_case(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, PracticeServiceError> {
    policy::require(&identity, policy::DELETE_CASE)?;
    let usecase = DeleteCaseUseCase {
        cases: state.case_repo(),
    };
    usecase.execute(CaseId(id)).await?;
    Ok(message_response("Case deleted successfully"))
}

// ── POST /api/cases/{id}/documents ───────────────────────────────────────────

#[derive(Deserialize)]
pub struct AddDocumentRequest {
    pub name: String,
    pub url: String,
}

pub async fn add_case_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<AddDocumentRequest>,
) -> Result<(StatusCode, Json<DocumentResponse>), PracticeServiceError> {
    let usecase = AddCaseDocumentUseCase {
        cases: state.case_repo(),
    };
    let document = usecase
        .execute(
            CaseId(id),
            AddCaseDocumentInput {
                name: body.name,
                url: body.url,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(document.into())))
}

// ── POST /api/cases/{id}/notes ───────────────────────────────────────────────

#[derive(Deserialize)]
pub struct AddNoteRequest {
    pub content: String,
    /// Defaults to the caller.
    pub created_by: Option<Uuid>,
}

pub async fn add_case_note(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<AddNoteRequest>,
) -> Result<(StatusCode, Json<NoteResponse>), PracticeServiceError> {
    let usecase = AddCaseNoteUseCase {
        cases: state.case_repo(),
    };
    let note = usecase
        .execute(
            CaseId(id),
            AddCaseNoteInput {
                content: body.content,
                created_by: Some(body.created_by.unwrap_or(identity.user_id)),
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(note.into())))
}
