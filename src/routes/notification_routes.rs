use axum::{
    extract::{Path, State},
    routing::{delete, get},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::notification_controller::NotificationController;
use crate::middleware::auth_middleware::{auth_middleware, CurrentUser};
use crate::models::notification::Notification;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_notification_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(list_notifications))
        .route("/:id", delete(dismiss_notification))
        .route_layer(axum::middleware::from_fn_with_state(state, auth_middleware))
}

async fn list_notifications(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Json<Vec<Notification>> {
    let controller = NotificationController::new(state.notifications.clone());
    Json(controller.list(&user).await)
}

async fn dismiss_notification(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = NotificationController::new(state.notifications.clone());
    controller.dismiss(&user, id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Notificación cerrada"
    })))
}
