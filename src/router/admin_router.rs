use axum::{middleware, routing::{delete, get, post, put}, Router};
use std::sync::Arc;

use crate::handler::admin_handler::{
    admin_me_handler, change_role_handler, change_status_handler, create_admin_handler, list_admins_handler,
    promote_participant_handler, remove_admin_handler,
};
use crate::middlewares::admin_middleware::{require_staff, StaffAuthState};
use crate::service::admin_service::AdminServiceImpl;

pub fn admin_router(
    service: Arc<AdminServiceImpl>,
    staff_state: Arc<StaffAuthState>,
    admin_state: Arc<StaffAuthState>,
) -> Router {
    let staff = Router::new()
        .route("/admin/me", get(admin_me_handler))
        .route_layer(middleware::from_fn_with_state(staff_state, require_staff));

    // Role management, further gated per target by the role policy
    let admin = Router::new()
        .route("/admin/admins", get(list_admins_handler).post(create_admin_handler))
        .route("/admin/admins/promote", post(promote_participant_handler))
        .route("/admin/admins/{id}/role", put(change_role_handler))
        .route("/admin/admins/{id}/status", put(change_status_handler))
        .route("/admin/admins/{id}", delete(remove_admin_handler))
        .route_layer(middleware::from_fn_with_state(admin_state, require_staff));

    staff.merge(admin).with_state(service)
}
