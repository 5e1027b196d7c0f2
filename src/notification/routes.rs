use axum::{
    middleware,
    routing::get,
    Router,
};

use crate::{middleware::auth_middleware, state::AppState};
use super::notification_handlers::{
    create_notification, list_notifications, mark_all_read, mark_as_read, recent_notifications,
};

pub fn notification_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/notifications/",
            get(list_notifications).post(create_notification),
        )
        .route("/notifications/get-notifications/", get(recent_notifications))
        .route("/notifications/mark-as-read/:id/", get(mark_as_read))
        .route("/notifications/mark-all-read/", get(mark_all_read))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}
