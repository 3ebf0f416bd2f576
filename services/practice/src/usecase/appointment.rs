use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use docket_domain::account::AccountType;
use docket_domain::id::{AppointmentId, CaseId};

use crate::domain::repository::{AppointmentRepository, CaseRepository, UserRepository};
use crate::domain::types::{
    Appointment, AppointmentFilter, AppointmentPatch, AppointmentStatus, available_slots,
};
use crate::error::PracticeServiceError;
use crate::usecase::populate::{AppointmentView, appointment_view, appointment_views};

// ── CreateAppointment ────────────────────────────────────────────────────────

pub struct CreateAppointmentInput {
    pub client_id: Uuid,
    pub lawyer_id: Uuid,
    pub case_id: CaseId,
    pub date: NaiveDate,
    pub time: String,
}

pub struct CreateAppointmentUseCase<U, C, A>
where
    U: UserRepository,
    C: CaseRepository,
    A: AppointmentRepository,
{
    pub users: U,
    pub cases: C,
    pub appointments: A,
}

impl<U, C, A> CreateAppointmentUseCase<U, C, A>
where
    U: UserRepository,
    C: CaseRepository,
    A: AppointmentRepository,
{
    pub async fn execute(
        &self,
        input: CreateAppointmentInput,
    ) -> Result<AppointmentView, PracticeServiceError> {
        let time = input.time.trim().to_owned();
        if time.is_empty() {
            return Err(PracticeServiceError::MissingData);
        }

        let client = self.users.find_by_id(input.client_id).await?;
        if !client.is_some_and(|u| u.account_type == AccountType::Client && u.is_active) {
            return Err(PracticeServiceError::InvalidClient);
        }
        let lawyer = self.users.find_by_id(input.lawyer_id).await?;
        if !lawyer.is_some_and(|u| u.account_type == AccountType::Lawyer) {
            return Err(PracticeServiceError::InvalidLawyer);
        }
        if !self.cases.exists(input.case_id).await? {
            return Err(PracticeServiceError::InvalidCase);
        }

        // Fast path; the store's unique index still decides concurrent bookings.
        if self
            .appointments
            .find_scheduled(input.lawyer_id, input.date, &time)
            .await?
            .is_some()
        {
            return Err(PracticeServiceError::SlotAlreadyBooked);
        }

        let now = Utc::now();
        let appointment = Appointment {
            id: AppointmentId(Uuid::now_v7()),
            client_id: input.client_id,
            lawyer_id: input.lawyer_id,
            case_id: input.case_id,
            date: input.date,
            time,
            status: AppointmentStatus::Scheduled,
            created_at: now,
            updated_at: now,
        };
        self.appointments.create(&appointment).await?;
        tracing::info!(
            appointment_id = %appointment.id,
            lawyer_id = %appointment.lawyer_id,
            date = %appointment.date,
            time = %appointment.time,
            "appointment booked"
        );
        appointment_view(&self.users, &self.cases, appointment).await
    }
}

// ── GetAppointment ───────────────────────────────────────────────────────────

pub struct GetAppointmentUseCase<U, C, A>
where
    U: UserRepository,
    C: CaseRepository,
    A: AppointmentRepository,
{
    pub users: U,
    pub cases: C,
    pub appointments: A,
}

impl<U, C, A> GetAppointmentUseCase<U, C, A>
where
    U: UserRepository,
    C: CaseRepository,
    A: AppointmentRepository,
{
    pub async fn execute(&self, id: AppointmentId) -> Result<AppointmentView, PracticeServiceError> {
        let appointment = self
            .appointments
            .find_by_id(id)
            .await?
            .ok_or(PracticeServiceError::AppointmentNotFound)?;
        appointment_view(&self.users, &self.cases, appointment).await
    }
}

// ── ListAppointments ─────────────────────────────────────────────────────────

pub struct ListAppointmentsUseCase<U, C, A>
where
    U: UserRepository,
    C: CaseRepository,
    A: AppointmentRepository,
{
    pub users: U,
    pub cases: C,
    pub appointments: A,
}

impl<U, C, A> ListAppointmentsUseCase<U, C, A>
where
    U: UserRepository,
    C: CaseRepository,
    A: AppointmentRepository,
{
    pub async fn execute(
        &self,
        filter: AppointmentFilter,
    ) -> Result<Vec<AppointmentView>, PracticeServiceError> {
        let appointments = self.appointments.list(filter).await?;
        appointment_views(&self.users, &self.cases, appointments).await
    }

    /// Appointments of one case; the case must exist.
    pub async fn for_case(
        &self,
        case_id: CaseId,
    ) -> Result<Vec<AppointmentView>, PracticeServiceError> {
        if !self.cases.exists(case_id).await? {
            return Err(PracticeServiceError::CaseNotFound);
        }
        self.execute(AppointmentFilter {
            case_id: Some(case_id),
            ..Default::default()
        })
        .await
    }
}

/// Filter for a participant's appointments. `upcoming` keeps dates from today on.
pub fn participant_filter(
    client_id: Option<Uuid>,
    lawyer_id: Option<Uuid>,
    status: Option<AppointmentStatus>,
    upcoming: bool,
) -> AppointmentFilter {
    AppointmentFilter {
        client_id,
        lawyer_id,
        status,
        date_from: upcoming.then(|| Utc::now().date_naive()),
        ..Default::default()
    }
}

// ── UpdateAppointment ────────────────────────────────────────────────────────

pub struct UpdateAppointmentUseCase<U, C, A>
where
    U: UserRepository,
    C: CaseRepository,
    A: AppointmentRepository,
{
    pub users: U,
    pub cases: C,
    pub appointments: A,
}

impl<U, C, A> UpdateAppointmentUseCase<U, C, A>
where
    U: UserRepository,
    C: CaseRepository,
    A: AppointmentRepository,
{
    pub async fn execute(
        &self,
        id: AppointmentId,
        mut patch: AppointmentPatch,
    ) -> Result<AppointmentView, PracticeServiceError> {
        if patch.is_empty() {
            return Err(PracticeServiceError::MissingData);
        }
        if let Some(time) = patch.time.take() {
            let time = time.trim().to_owned();
            if time.is_empty() {
                return Err(PracticeServiceError::MissingData);
            }
            patch.time = Some(time);
        }
        let appointment = self
            .appointments
            .update(id, &patch)
            .await?
            .ok_or(PracticeServiceError::AppointmentNotFound)?;
        appointment_view(&self.users, &self.cases, appointment).await
    }

    pub async fn set_status(
        &self,
        id: AppointmentId,
        status: AppointmentStatus,
    ) -> Result<AppointmentView, PracticeServiceError> {
        self.execute(
            id,
            AppointmentPatch {
                status: Some(status),
                ..Default::default()
            },
        )
        .await
    }
}

// ── DeleteAppointment ────────────────────────────────────────────────────────

pub struct DeleteAppointmentUseCase<A: AppointmentRepository> {
    pub appointments: A,
}

impl<A: AppointmentRepository> DeleteAppointmentUseCase<A> {
    pub async fn execute(&self, id: AppointmentId) -> Result<(), PracticeServiceError> {
        if !self.appointments.delete(id).await? {
            return Err(PracticeServiceError::AppointmentNotFound);
        }
        Ok(())
    }
}

// ── AvailableSlots ───────────────────────────────────────────────────────────

pub struct AvailableSlotsUseCase<A: AppointmentRepository> {
    pub appointments: A,
    /// Canonical slot labels in display order.
    pub slots: Arc<[String]>,
}

impl<A: AppointmentRepository> AvailableSlotsUseCase<A> {
    pub async fn execute(
        &self,
        lawyer_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<String>, PracticeServiceError> {
        let booked = self.appointments.booked_times(lawyer_id, date).await?;
        Ok(available_slots(&self.slots, &booked))
    }
}
