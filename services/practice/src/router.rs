use axum::{
    Router, middleware,
    routing::{get, patch, post, put},
};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use docket_auth_types::identity::IdentityHeaders;
use docket_core::health::{healthz, readyz};
use docket_core::middleware::{propagate_request_id_layer, request_id_layer, trace_layer};

use crate::handlers::{
    appointment::{
        available_slots, create_appointment, delete_appointment, get_appointment,
        list_appointments, list_appointments_in_range, list_case_appointments,
        list_client_appointments, list_lawyer_appointments, update_appointment,
        update_appointment_status,
    },
    case::{
        add_case_document, add_case_note, create_case, delete_case, get_case, list_cases,
        list_cases_by_status, list_client_cases, list_lawyer_cases, update_case,
    },
    message::{
        delete_message, get_conversation, get_message, list_messages, list_unread_messages,
        list_user_messages, mark_message_read, mark_messages_read, send_message,
    },
    notification::{
        clear_notifications, create_notification, delete_notification, list_notifications,
        mark_notification_read, mark_notifications_read, unread_count,
    },
    payment::{create_test_invoice, get_invoice, list_invoices, verify_payment},
    user::{
        create_user, deactivate_user, delete_user, get_user, get_user_by_auth_subject,
        list_users, list_users_by_type, update_profile, update_user,
    },
};
use crate::state::AppState;

pub fn build_router(state: AppState, cors_permissive: bool) -> Router {
    // Everything under /api needs gateway identity headers, except the payment
    // gateway's own callback.
    let protected = Router::new()
        // Users
        .route("/api/users", get(list_users).post(create_user))
        .route(
            "/api/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/api/users/auth/{subject}", get(get_user_by_auth_subject))
        .route("/api/users/type/{account_type}", get(list_users_by_type))
        .route("/api/users/{id}/deactivate", put(deactivate_user))
        .route("/api/users/{id}/profile", put(update_profile))
        // Cases
        .route("/api/cases", get(list_cases).post(create_case))
        .route(
            "/api/cases/{id}",
            get(get_case).put(update_case).delete(delete_case),
        )
        .route("/api/cases/client/{id}", get(list_client_cases))
        .route("/api/cases/lawyer/{id}", get(list_lawyer_cases))
        .route("/api/cases/status/{status}", get(list_cases_by_status))
        .route("/api/cases/{id}/documents", post(add_case_document))
        .route("/api/cases/{id}/notes", post(add_case_note))
        .route("/api/cases/{id}/appointments", get(list_case_appointments))
        // Appointments
        .route(
            "/api/appointments",
            get(list_appointments).post(create_appointment),
        )
        .route(
            "/api/appointments/{id}",
            get(get_appointment)
                .put(update_appointment)
                .delete(delete_appointment),
        )
        .route(
            "/api/appointments/{id}/status",
            patch(update_appointment_status),
        )
        .route(
            "/api/appointments/client/{id}",
            get(list_client_appointments),
        )
        .route(
            "/api/appointments/lawyer/{id}",
            get(list_lawyer_appointments),
        )
        .route(
            "/api/appointments/date-range/{start}/{end}",
            get(list_appointments_in_range),
        )
        .route(
            "/api/appointments/available-slots/{lawyer_id}/{date}",
            get(available_slots),
        )
        // Messages
        .route("/api/messages", get(list_messages).post(send_message))
        .route(
            "/api/messages/{id}",
            get(get_message).delete(delete_message),
        )
        .route("/api/messages/{id}/read", patch(mark_message_read))
        .route("/api/messages/read-multiple", patch(mark_messages_read))
        .route(
            "/api/messages/conversation/{a}/{b}",
            get(get_conversation),
        )
        .route("/api/messages/user/{id}", get(list_user_messages))
        .route("/api/messages/user/{id}/unread", get(list_unread_messages))
        // Notifications
        .route(
            "/api/notifications",
            get(list_notifications)
                .post(create_notification)
                .delete(clear_notifications),
        )
        .route("/api/notifications/unread-count", get(unread_count))
        .route("/api/notifications/mark-read", put(mark_notifications_read))
        .route("/api/notifications/{id}/read", put(mark_notification_read))
        .route(
            "/api/notifications/{id}",
            axum::routing::delete(delete_notification),
        )
        // Invoices
        .route("/api/payments/invoice/{number}", get(get_invoice))
        .route("/api/payments/invoices", get(list_invoices))
        .route("/api/payments/test-invoice", post(create_test_invoice))
        .route_layer(middleware::from_extractor::<IdentityHeaders>());

    let public = Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Payment gateway callback
        .route("/api/payments/verify", post(verify_payment));

    let router = Router::new()
        .merge(public)
        .merge(protected)
        .layer(
            ServiceBuilder::new()
                .layer(request_id_layer())
                .layer(trace_layer())
                .layer(propagate_request_id_layer()),
        );
    let router = if cors_permissive {
        router.layer(CorsLayer::permissive())
    } else {
        router
    };
    router.with_state(state)
}
