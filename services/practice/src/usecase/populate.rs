//! Attach display fields (user and case summaries) to referenced ids.
//!
//! One batched lookup per entity kind, whatever the size of the listing.

use std::collections::HashMap;

use uuid::Uuid;

use docket_domain::id::CaseId;

use crate::domain::repository::{CaseRepository, UserRepository};
use crate::domain::types::{Appointment, Case, CaseSummary, Message, UserSummary};
use crate::error::PracticeServiceError;

#[derive(Debug, Clone)]
pub struct CaseView {
    pub case: Case,
    pub client: Option<UserSummary>,
    pub lawyer: Option<UserSummary>,
}

#[derive(Debug, Clone)]
pub struct AppointmentView {
    pub appointment: Appointment,
    pub client: Option<UserSummary>,
    pub lawyer: Option<UserSummary>,
    pub case: Option<CaseSummary>,
}

#[derive(Debug, Clone)]
pub struct MessageView {
    pub message: Message,
    pub sender: Option<UserSummary>,
    pub receiver: Option<UserSummary>,
    pub case: Option<CaseSummary>,
}

async fn user_index<U: UserRepository>(
    users: &U,
    mut ids: Vec<Uuid>,
) -> Result<HashMap<Uuid, UserSummary>, PracticeServiceError> {
    ids.sort_unstable();
    ids.dedup();
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    Ok(users
        .find_many(&ids)
        .await?
        .iter()
        .map(|u| (u.id, u.summary()))
        .collect())
}

async fn case_index<C: CaseRepository>(
    cases: &C,
    mut ids: Vec<CaseId>,
) -> Result<HashMap<CaseId, CaseSummary>, PracticeServiceError> {
    ids.sort_unstable_by_key(|id| id.0);
    ids.dedup();
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    Ok(cases
        .find_summaries(&ids)
        .await?
        .into_iter()
        .map(|c| (c.id, c))
        .collect())
}

pub async fn case_views<U: UserRepository>(
    users: &U,
    cases: Vec<Case>,
) -> Result<Vec<CaseView>, PracticeServiceError> {
    let index = user_index(
        users,
        cases
            .iter()
            .flat_map(|c| [c.client_id, c.lawyer_id])
            .collect(),
    )
    .await?;
    Ok(cases
        .into_iter()
        .map(|case| CaseView {
            client: index.get(&case.client_id).cloned(),
            lawyer: index.get(&case.lawyer_id).cloned(),
            case,
        })
        .collect())
}

pub async fn case_view<U: UserRepository>(
    users: &U,
    case: Case,
) -> Result<CaseView, PracticeServiceError> {
    let mut views = case_views(users, vec![case]).await?;
    views
        .pop()
        .ok_or_else(|| anyhow::anyhow!("case view lost during populate").into())
}

pub async fn appointment_views<U: UserRepository, C: CaseRepository>(
    users: &U,
    cases: &C,
    appointments: Vec<Appointment>,
) -> Result<Vec<AppointmentView>, PracticeServiceError> {
    let user_index = user_index(
        users,
        appointments
            .iter()
            .flat_map(|a| [a.client_id, a.lawyer_id])
            .collect(),
    )
    .await?;
    let case_index = case_index(cases, appointments.iter().map(|a| a.case_id).collect()).await?;
    Ok(appointments
        .into_iter()
        .map(|appointment| AppointmentView {
            client: user_index.get(&appointment.client_id).cloned(),
            lawyer: user_index.get(&appointment.lawyer_id).cloned(),
            case: case_index.get(&appointment.case_id).cloned(),
            appointment,
        })
        .collect())
}

pub async fn appointment_view<U: UserRepository, C: CaseRepository>(
    users: &U,
    cases: &C,
    appointment: Appointment,
) -> Result<AppointmentView, PracticeServiceError> {
    let mut views = appointment_views(users, cases, vec![appointment]).await?;
    views
        .pop()
        .ok_or_else(|| anyhow::anyhow!("appointment view lost during populate").into())
}

pub async fn message_views<U: UserRepository, C: CaseRepository>(
    users: &U,
    cases: &C,
    messages: Vec<Message>,
) -> Result<Vec<MessageView>, PracticeServiceError> {
    let user_index = user_index(
        users,
        messages
            .iter()
            .flat_map(|m| [m.sender_id, m.receiver_id])
            .collect(),
    )
    .await?;
    let case_index = case_index(cases, messages.iter().filter_map(|m| m.case_id).collect()).await?;
    Ok(messages
        .into_iter()
        .map(|message| MessageView {
            sender: user_index.get(&message.sender_id).cloned(),
            receiver: user_index.get(&message.receiver_id).cloned(),
            case: message.case_id.and_then(|id| case_index.get(&id).cloned()),
            message,
        })
        .collect())
}

pub async fn message_view<U: UserRepository, C: CaseRepository>(
    users: &U,
    cases: &C,
    message: Message,
) -> Result<MessageView, PracticeServiceError> {
    let mut views = message_views(users, cases, vec![message]).await?;
    views
        .pop()
        .ok_or_else(|| anyhow::anyhow!("message view lost during populate").into())
}
