use uuid::Uuid;

use docket_domain::account::AccountType;
use docket_domain::id::CaseId;

use docket_practice::domain::types::{AppointmentPatch, AppointmentStatus};
use docket_practice::error::PracticeServiceError;
use docket_practice::usecase::appointment::{
    AvailableSlotsUseCase, CreateAppointmentInput, CreateAppointmentUseCase,
    ListAppointmentsUseCase, UpdateAppointmentUseCase,
};

use crate::helpers::{
    MockAppointmentRepo, MockCaseRepo, MockUserRepo, Practice, canonical_slots, date, test_user,
};

fn booking(practice: &Practice, time: &str) -> CreateAppointmentInput {
    CreateAppointmentInput {
        client_id: practice.client.id,
        lawyer_id: practice.lawyer.id,
        case_id: practice.case.id,
        date: date(2025, 6, 2),
        time: time.to_owned(),
    }
}

fn create_usecase(
    practice: &Practice,
    appointments: &MockAppointmentRepo,
) -> CreateAppointmentUseCase<MockUserRepo, MockCaseRepo, MockAppointmentRepo> {
    CreateAppointmentUseCase {
        users: practice.users.clone(),
        cases: practice.cases.clone(),
        appointments: appointments.clone(),
    }
}

#[tokio::test]
async fn should_book_appointment_with_participant_summaries() {
    let practice = Practice::new();
    let appointments = MockAppointmentRepo::default();

    let view = create_usecase(&practice, &appointments)
        .execute(booking(&practice, " 9:00 AM "))
        .await
        .unwrap();

    assert_eq!(view.appointment.time, "9:00 AM");
    assert_eq!(view.appointment.status, AppointmentStatus::Scheduled);
    assert_eq!(view.client.map(|c| c.id), Some(practice.client.id));
    assert_eq!(view.lawyer.map(|l| l.id), Some(practice.lawyer.id));
    assert_eq!(view.case.map(|c| c.id), Some(practice.case.id));
    assert_eq!(appointments.len(), 1);
}

#[tokio::test]
async fn should_reject_second_booking_of_same_slot() {
    let practice = Practice::new();
    let appointments = MockAppointmentRepo::default();
    let usecase = create_usecase(&practice, &appointments);

    usecase.execute(booking(&practice, "9:00 AM")).await.unwrap();
    let result = usecase.execute(booking(&practice, "9:00 AM")).await;

    assert!(
        matches!(result, Err(PracticeServiceError::SlotAlreadyBooked)),
        "expected SlotAlreadyBooked, got {result:?}"
    );
    assert_eq!(appointments.len(), 1);
}

#[tokio::test]
async fn should_allow_rebooking_a_canceled_slot() {
    let practice = Practice::new();
    let appointments = MockAppointmentRepo::default();
    let first = create_usecase(&practice, &appointments)
        .execute(booking(&practice, "10:30 AM"))
        .await
        .unwrap();

    UpdateAppointmentUseCase {
        users: practice.users.clone(),
        cases: practice.cases.clone(),
        appointments: appointments.clone(),
    }
    .set_status(first.appointment.id, AppointmentStatus::Canceled)
    .await
    .unwrap();

    create_usecase(&practice, &appointments)
        .execute(booking(&practice, "10:30 AM"))
        .await
        .unwrap();
    assert_eq!(appointments.len(), 2);
}

#[tokio::test]
async fn should_reject_client_with_wrong_account_type() {
    let practice = Practice::new();
    let appointments = MockAppointmentRepo::default();
    let mut input = booking(&practice, "9:00 AM");
    input.client_id = practice.lawyer.id;

    let result = create_usecase(&practice, &appointments).execute(input).await;

    assert!(matches!(result, Err(PracticeServiceError::InvalidClient)));
    assert_eq!(appointments.len(), 0);
}

#[tokio::test]
async fn should_reject_inactive_client() {
    let practice = Practice::new();
    let mut inactive = test_user(AccountType::Client);
    inactive.is_active = false;
    practice.users.users.lock().unwrap().push(inactive.clone());
    let appointments = MockAppointmentRepo::default();
    let mut input = booking(&practice, "9:00 AM");
    input.client_id = inactive.id;

    let result = create_usecase(&practice, &appointments).execute(input).await;

    assert!(matches!(result, Err(PracticeServiceError::InvalidClient)));
}

#[tokio::test]
async fn should_reject_unknown_case() {
    let practice = Practice::new();
    let appointments = MockAppointmentRepo::default();
    let mut input = booking(&practice, "9:00 AM");
    input.case_id = CaseId(Uuid::now_v7());

    let result = create_usecase(&practice, &appointments).execute(input).await;

    assert!(matches!(result, Err(PracticeServiceError::InvalidCase)));
}

#[tokio::test]
async fn should_list_remaining_slots_in_canonical_order() {
    let practice = Practice::new();
    let appointments = MockAppointmentRepo::default();
    let usecase = create_usecase(&practice, &appointments);
    usecase.execute(booking(&practice, "2:30 PM")).await.unwrap();
    usecase.execute(booking(&practice, "9:00 AM")).await.unwrap();

    let slots = AvailableSlotsUseCase {
        appointments: appointments.clone(),
        slots: canonical_slots(),
    }
    .execute(practice.lawyer.id, date(2025, 6, 2))
    .await
    .unwrap();

    assert_eq!(slots, vec!["10:30 AM", "12:00 PM", "4:00 PM", "5:30 PM"]);
}

#[tokio::test]
async fn should_offer_every_slot_on_a_free_day() {
    let slots = AvailableSlotsUseCase {
        appointments: MockAppointmentRepo::default(),
        slots: canonical_slots(),
    }
    .execute(Uuid::now_v7(), date(2025, 6, 3))
    .await
    .unwrap();

    assert_eq!(slots.len(), 6);
    assert_eq!(slots[0], "9:00 AM");
}

#[tokio::test]
async fn should_reject_update_into_a_booked_slot() {
    let practice = Practice::new();
    let appointments = MockAppointmentRepo::default();
    let usecase = create_usecase(&practice, &appointments);
    usecase.execute(booking(&practice, "9:00 AM")).await.unwrap();
    let second = usecase.execute(booking(&practice, "12:00 PM")).await.unwrap();

    let result = UpdateAppointmentUseCase {
        users: practice.users.clone(),
        cases: practice.cases.clone(),
        appointments: appointments.clone(),
    }
    .execute(
        second.appointment.id,
        AppointmentPatch {
            time: Some("9:00 AM".to_owned()),
            ..Default::default()
        },
    )
    .await;

    assert!(matches!(result, Err(PracticeServiceError::SlotAlreadyBooked)));
}

#[tokio::test]
async fn should_reject_empty_appointment_patch() {
    let practice = Practice::new();
    let appointments = MockAppointmentRepo::default();
    let booked = create_usecase(&practice, &appointments)
        .execute(booking(&practice, "9:00 AM"))
        .await
        .unwrap();

    let result = UpdateAppointmentUseCase {
        users: practice.users.clone(),
        cases: practice.cases.clone(),
        appointments,
    }
    .execute(booked.appointment.id, AppointmentPatch::default())
    .await;

    assert!(matches!(result, Err(PracticeServiceError::MissingData)));
}

#[tokio::test]
async fn should_list_case_appointments_by_date_then_time() {
    let practice = Practice::new();
    let appointments = MockAppointmentRepo::default();
    let usecase = create_usecase(&practice, &appointments);
    usecase.execute(booking(&practice, "4:00 PM")).await.unwrap();
    let mut earlier = booking(&practice, "4:00 PM");
    earlier.date = date(2025, 6, 1);
    usecase.execute(earlier).await.unwrap();

    let views = ListAppointmentsUseCase {
        users: practice.users.clone(),
        cases: practice.cases.clone(),
        appointments,
    }
    .for_case(practice.case.id)
    .await
    .unwrap();

    let dates: Vec<_> = views.iter().map(|v| v.appointment.date).collect();
    assert_eq!(dates, vec![date(2025, 6, 1), date(2025, 6, 2)]);
}

#[tokio::test]
async fn should_fail_case_listing_for_unknown_case() {
    let practice = Practice::new();
    let result = ListAppointmentsUseCase {
        users: practice.users.clone(),
        cases: practice.cases.clone(),
        appointments: MockAppointmentRepo::default(),
    }
    .for_case(CaseId(Uuid::now_v7()))
    .await;

    assert!(matches!(result, Err(PracticeServiceError::CaseNotFound)));
}
