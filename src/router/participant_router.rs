use axum::{middleware, routing::{get, post, put}, Router};
use std::sync::Arc;

use crate::handler::participant_handler::{
    check_in_handler, complete_registration_handler, delete_my_account_handler, event_stats_handler,
    get_my_profile_handler, get_participant_handler, list_participants_handler, rsvp_handler,
    set_participant_status_handler, update_my_profile_handler,
};
use crate::middlewares::admin_middleware::{require_staff, StaffAuthState};
use crate::middlewares::auth_middleware::{require_session, SessionAuthState};
use crate::service::participant_service::ParticipantServiceImpl;

pub fn participant_router(
    service: Arc<ParticipantServiceImpl>,
    session_state: Arc<SessionAuthState>,
    staff_state: Arc<StaffAuthState>,
    admin_state: Arc<StaffAuthState>,
) -> Router {
    // Any signed-in user
    let session = Router::new()
        .route(
            "/participants/me",
            post(complete_registration_handler)
                .get(get_my_profile_handler)
                .put(update_my_profile_handler)
                .delete(delete_my_account_handler),
        )
        .route("/participants/me/rsvp", post(rsvp_handler))
        .route_layer(middleware::from_fn_with_state(session_state, require_session));

    // Volunteers and above
    let staff = Router::new()
        .route("/admin/stats", get(event_stats_handler))
        .route("/admin/participants", get(list_participants_handler))
        .route("/admin/participants/{id}", get(get_participant_handler))
        .route("/admin/participants/{id}/check-in", post(check_in_handler))
        .route_layer(middleware::from_fn_with_state(staff_state, require_staff));

    // Admins and above
    let admin = Router::new()
        .route("/admin/participants/{id}/status", put(set_participant_status_handler))
        .route_layer(middleware::from_fn_with_state(admin_state, require_staff));

    session.merge(staff).merge(admin).with_state(service)
}
