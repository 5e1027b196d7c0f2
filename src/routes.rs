use crate::{
    notification::{
        notification_dto::{
            CreateNotificationRequest, NotificationListResponse, NotificationPayload,
            RecentNotificationsResponse, StatusResponse,
        },
        notification_handlers, notification_routes, Notification, NotificationType, RelatedObject,
    },
    state::AppState,
};
use axum::Router;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        notification_handlers::list_notifications,
        notification_handlers::recent_notifications,
        notification_handlers::mark_as_read,
        notification_handlers::mark_all_read,
        notification_handlers::create_notification,
    ),
    components(
        schemas(
            Notification,
            NotificationType,
            RelatedObject,
            NotificationPayload,
            NotificationListResponse,
            RecentNotificationsResponse,
            StatusResponse,
            CreateNotificationRequest,
        )
    ),
    tags(
        (name = "notifications", description = "Notification endpoints")
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::Http::new(
                        utoipa::openapi::security::HttpAuthScheme::Bearer,
                    ),
                ),
            )
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(notification_routes(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
