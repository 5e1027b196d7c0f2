use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use validator::Validate;

use crate::{
    error::Result,
    middleware::AuthUser,
    renderer::NOTIFICATIONS_PATH,
    state::AppState,
};
use super::{
    notification_dto::{
        CreateNotificationRequest, ListQuery, NotificationListResponse, NotificationPayload,
        RecentNotificationsResponse, StatusResponse,
    },
    notification_models::Notification,
    notification_page::render_page,
};

/// Ajax callers get JSON; plain browser navigation gets HTML or a redirect.
pub fn wants_json(headers: &HeaderMap) -> bool {
    let xhr = headers
        .get("X-Requested-With")
        .and_then(|h| h.to_str().ok())
        .is_some_and(|v| v.eq_ignore_ascii_case("XMLHttpRequest"));
    let accepts_json = headers
        .get(header::ACCEPT)
        .and_then(|h| h.to_str().ok())
        .is_some_and(|v| v.contains("application/json"));

    xhr || accepts_json
}

fn done(headers: &HeaderMap) -> Response {
    if wants_json(headers) {
        Json(StatusResponse::success()).into_response()
    } else {
        Redirect::to(NOTIFICATIONS_PATH).into_response()
    }
}

/// List the authenticated user's notifications
#[utoipa::path(
    get,
    path = "/notifications/",
    params(
        ("page" = Option<String>, Query, description = "Page number")
    ),
    responses(
        (status = 200, description = "Paginated notifications (HTML unless JSON is requested)", body = NotificationListResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "notifications",
    security(("bearer_auth" = []))
)]
pub async fn list_notifications(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> Result<Response> {
    let page = state
        .notification_service
        .list_page(user_id, query.page.as_deref(), state.config.page_size)
        .await?;

    if wants_json(&headers) {
        return Ok(Json(NotificationListResponse {
            notifications: page.notifications.iter().map(NotificationPayload::from).collect(),
            page: page.page,
            total_pages: page.total_pages,
            total_count: page.total_count,
            unread_count: page.unread_count,
        })
        .into_response());
    }

    Ok(Html(render_page(&page)?).into_response())
}

/// Newest unread notifications, for badge/dropdown widgets
#[utoipa::path(
    get,
    path = "/notifications/get-notifications/",
    responses(
        (status = 200, description = "Recent unread notifications", body = RecentNotificationsResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "notifications",
    security(("bearer_auth" = []))
)]
pub async fn recent_notifications(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<RecentNotificationsResponse>> {
    let (notifications, unread_count) = state
        .notification_service
        .recent_unread(user_id, state.config.recent_limit)
        .await?;

    Ok(Json(RecentNotificationsResponse {
        notifications: notifications.iter().map(NotificationPayload::from).collect(),
        unread_count,
    }))
}

/// Mark notification as read
#[utoipa::path(
    get,
    path = "/notifications/mark-as-read/{id}/",
    params(
        ("id" = i64, Path, description = "Notification ID")
    ),
    responses(
        (status = 200, description = "Marked as read (ajax)", body = StatusResponse),
        (status = 303, description = "Marked as read, redirect to the list"),
        (status = 404, description = "Notification not found"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "notifications",
    security(("bearer_auth" = []))
)]
pub async fn mark_as_read(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    headers: HeaderMap,
    Path(notification_id): Path<i64>,
) -> Result<Response> {
    state
        .notification_service
        .mark_as_read(notification_id, user_id)
        .await?;

    Ok(done(&headers))
}

/// Mark every notification of the user as read
#[utoipa::path(
    get,
    path = "/notifications/mark-all-read/",
    responses(
        (status = 200, description = "All marked as read (ajax)", body = StatusResponse),
        (status = 303, description = "All marked as read, redirect to the list"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "notifications",
    security(("bearer_auth" = []))
)]
pub async fn mark_all_read(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    headers: HeaderMap,
) -> Result<Response> {
    state.notification_service.mark_all_read(user_id).await?;

    Ok(done(&headers))
}

/// Create a notification for a recipient
#[utoipa::path(
    post,
    path = "/notifications/",
    request_body = CreateNotificationRequest,
    responses(
        (status = 201, description = "Notification created", body = Notification),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "notifications",
    security(("bearer_auth" = []))
)]
pub async fn create_notification(
    State(state): State<AppState>,
    Json(payload): Json<CreateNotificationRequest>,
) -> Result<(StatusCode, Json<Notification>)> {
    payload.validate()?;

    let notification = state
        .notification_service
        .notify(
            payload.recipient_id,
            payload.notification_type,
            &payload.title,
            &payload.message,
            payload.related,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(notification)))
}
