use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::Response,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use docket_core::error::message_response;
use docket_domain::id::{AppointmentId, CaseId};

use crate::domain::types::{AppointmentFilter, AppointmentPatch, AppointmentStatus};
use crate::error::PracticeServiceError;
use crate::handlers::summary::{CaseSummaryResponse, UserSummaryResponse};
use crate::state::AppState;
use crate::usecase::appointment::{
    AvailableSlotsUseCase, CreateAppointmentInput, CreateAppointmentUseCase,
    DeleteAppointmentUseCase, GetAppointmentUseCase, ListAppointmentsUseCase,
    UpdateAppointmentUseCase, participant_filter,
};
use crate::usecase::populate::AppointmentView;

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct AppointmentResponse {
    pub id: AppointmentId,
    pub client_id: Uuid,
    pub client: Option<UserSummaryResponse>,
    pub lawyer_id: Uuid,
    pub lawyer: Option<UserSummaryResponse>,
    pub case_id: CaseId,
    pub case: Option<CaseSummaryResponse>,
    pub date: NaiveDate,
    pub time: String,
    pub status: AppointmentStatus,
    #[serde(serialize_with = "docket_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "docket_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<AppointmentView> for AppointmentResponse {
    fn from(view: AppointmentView) -> Self {
        let a = view.appointment;
        Self {
            id: a.id,
            client_id: a.client_id,
            client: view.client.map(Into::into),
            lawyer_id: a.lawyer_id,
            lawyer: view.lawyer.map(Into::into),
            case_id: a.case_id,
            case: view.case.map(Into::into),
            date: a.date,
            time: a.time,
            status: a.status,
            created_at: a.created_at,
            updated_at: a.updated_at,
        }
    }
}

#[derive(Serialize)]
pub struct AvailableSlotsResponse {
    pub lawyer_id: Uuid,
    pub date: NaiveDate,
    pub available_slots: Vec<String>,
}

// ── Query params ─────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct ParticipantQuery {
    pub status: Option<AppointmentStatus>,
    #[serde(default)]
    pub upcoming: bool,
}

#[derive(Deserialize, Default)]
pub struct DateRangeQuery {
    pub lawyer_id: Option<Uuid>,
    pub client_id: Option<Uuid>,
}

async fn list_with(
    state: &AppState,
    filter: AppointmentFilter,
) -> Result<Json<Vec<AppointmentResponse>>, PracticeServiceError> {
    let usecase = ListAppointmentsUseCase {
        users: state.user_repo(),
        cases: state.case_repo(),
        appointments: state.appointment_repo(),
    };
    let views = usecase.execute(filter).await?;
    Ok(Json(views.into_iter().map(AppointmentResponse::from).collect()))
}

// ── GET /api/appointments ────────────────────────────────────────────────────

pub async fn list_appointments(
    State(state): State<AppState>,
) -> Result<Json<Vec<AppointmentResponse>>, PracticeServiceError> {
    list_with(&state, AppointmentFilter::default()).await
}

// ── GET /api/appointments/client/{id} ────────────────────────────────────────

pub async fn list_client_appointments(
    State(state): State<AppState>,
    Path(client_id): Path<Uuid>,
    Query(query): Query<ParticipantQuery>,
) -> Result<Json<Vec<AppointmentResponse>>, PracticeServiceError> {
    let filter = participant_filter(Some(client_id), None, query.status, query.upcoming);
    list_with(&state, filter).await
}

// ── GET /api/appointments/lawyer/{id} ────────────────────────────────────────

pub async fn list_lawyer_appointments(
    State(state): State<AppState>,
    Path(lawyer_id): Path<Uuid>,
    Query(query): Query<ParticipantQuery>,
) -> Result<Json<Vec<AppointmentResponse>>, PracticeServiceError> {
    let filter = participant_filter(None, Some(lawyer_id), query.status, query.upcoming);
    list_with(&state, filter).await
}

// ── GET /api/appointments/date-range/{start}/{end} ───────────────────────────

pub async fn list_appointments_in_range(
    State(state): State<AppState>,
    Path((start, end)): Path<(NaiveDate, NaiveDate)>,
    Query(query): Query<DateRangeQuery>,
) -> Result<Json<Vec<AppointmentResponse>>, PracticeServiceError> {
    let filter = AppointmentFilter {
        client_id: query.client_id,
        lawyer_id: query.lawyer_id,
        date_from: Some(start),
        date_to: Some(end),
        ..Default::default()
    };
    list_with(&state, filter).await
}

// ── GET /api/cases/{id}/appointments ─────────────────────────────────────────

pub async fn list_case_appointments(
    State(state): State<AppState>,
    Path(case_id): Path<Uuid>,
) -> Result<Json<Vec<AppointmentResponse>>, PracticeServiceError> {
    let usecase = ListAppointmentsUseCase {
        users: state.user_repo(),
        cases: state.case_repo(),
        appointments: state.appointment_repo(),
    };
    let views = usecase.for_case(CaseId(case_id)).await?;
    Ok(Json(views.into_iter().map(AppointmentResponse::from).collect()))
}

// ── GET /api/appointments/available-slots/{lawyer_id}/{date} ─────────────────

pub async fn available_slots(
    State(state): State<AppState>,
    Path((lawyer_id, date)): Path<(Uuid, NaiveDate)>,
) -> Result<Json<AvailableSlotsResponse>, PracticeServiceError> {
    let usecase = AvailableSlotsUseCase {
        appointments: state.appointment_repo(),
        slots: state.slots.clone(),
    };
    let available_slots = usecase.execute(lawyer_id, date).await?;
    Ok(Json(AvailableSlotsResponse {
        lawyer_id,
        date,
        available_slots,
    }))
}

// ── POST /api/appointments ───────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateAppointmentRequest {
    pub client_id: Uuid,
    pub lawyer_id: Uuid,
    pub case_id: Uuid,
    pub date: NaiveDate,
    pub time: String,
}

pub async fn create_appointment(
    State(state): State<AppState>,
    Json(body): Json<CreateAppointmentRequest>,
) -> Result<(StatusCode, Json<AppointmentResponse>), PracticeServiceError> {
    let usecase = CreateAppointmentUseCase {
        users: state.user_repo(),
        cases: state.case_repo(),
        appointments: state.appointment_repo(),
    };
    let view = usecase
        .execute(CreateAppointmentInput {
            client_id: body.client_id,
            lawyer_id: body.lawyer_id,
            case_id: CaseId(body.case_id),
            date: body.date,
            time: body.time,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(view.into())))
}

// ── GET /api/appointments/{id} ───────────────────────────────────────────────

pub async fn get_appointment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AppointmentResponse>, PracticeServiceError> {
    let usecase = GetAppointmentUseCase {
        users: state.user_repo(),
        cases: state.case_repo(),
        appointments: state.appointment_repo(),
    };
    Ok(Json(usecase.execute(AppointmentId(id)).await?.into()))
}

// ── PUT /api/appointments/{id} ───────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateAppointmentRequest {
    pub client_id: Option<Uuid>,
    pub lawyer_id: Option<Uuid>,
    pub case_id: Option<Uuid>,
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
    pub status: Option<AppointmentStatus>,
}

pub async fn update_appointment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateAppointmentRequest>,
) -> Result<Json<AppointmentResponse>, PracticeServiceError> {
    let usecase = UpdateAppointmentUseCase {
        users: state.user_repo(),
        cases: state.case_repo(),
        appointments: state.appointment_repo(),
    };
    let view = usecase
        .execute(
            AppointmentId(id),
            AppointmentPatch {
                client_id: body.client_id,
                lawyer_id: body.lawyer_id,
                case_id: body.case_id.map(CaseId),
                date: body.date,
                time: body.time,
                status: body.status,
            },
        )
        .await?;
    Ok(Json(view.into()))
}

// ── PATCH /api/appointments/{id}/status ──────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateStatusRequest {
    pub status: AppointmentStatus,
}

pub async fn update_appointment_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateStatusRequest>,
) -> Result<Json<AppointmentResponse>, PracticeServiceError> {
    let usecase = UpdateAppointmentUseCase {
        users: state.user_repo(),
        cases: state.case_repo(),
        appointments: state.appointment_repo(),
    };
    let view = usecase.set_status(AppointmentId(id), body.status).await?;
    Ok(Json(view.into()))
}

// ── DELETE /api/appointments/{id} ────────────────────────────────────────────

pub async fn delete_appointment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, PracticeServiceError> {
    let usecase = DeleteAppointmentUseCase {
        appointments: state.appointment_repo(),
    };
    usecase.execute(AppointmentId(id)).await?;
    Ok(message_response("Appointment deleted successfully"))
}
