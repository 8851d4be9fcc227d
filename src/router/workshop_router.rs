use axum::{middleware, routing::{get, post, put}, Router};
use std::sync::Arc;

use crate::handler::workshop_handler::{
    admin_list_workshops_handler, create_workshop_handler, delete_workshop_handler, get_workshop_handler,
    list_workshops_handler, my_workshops_handler, register_workshop_handler, unregister_workshop_handler,
    update_workshop_handler, workshop_registrants_handler,
};
use crate::middlewares::admin_middleware::{require_staff, StaffAuthState};
use crate::middlewares::auth_middleware::{require_session, SessionAuthState};
use crate::service::workshop_service::WorkshopServiceImpl;

pub fn workshop_router(
    service: Arc<WorkshopServiceImpl>,
    session_state: Arc<SessionAuthState>,
    admin_state: Arc<StaffAuthState>,
) -> Router {
    let session = Router::new()
        .route("/workshops", get(list_workshops_handler))
        .route("/workshops/{id}", get(get_workshop_handler))
        .route(
            "/workshops/{id}/registration",
            post(register_workshop_handler).delete(unregister_workshop_handler),
        )
        .route("/participants/me/workshops", get(my_workshops_handler))
        .route_layer(middleware::from_fn_with_state(session_state, require_session));

    let admin = Router::new()
        .route("/admin/workshops", get(admin_list_workshops_handler).post(create_workshop_handler))
        .route("/admin/workshops/{id}", put(update_workshop_handler).delete(delete_workshop_handler))
        .route("/admin/workshops/{id}/registrations", get(workshop_registrants_handler))
        .route_layer(middleware::from_fn_with_state(admin_state, require_staff));

    session.merge(admin).with_state(service)
}
