use axum::{
    extract::{Path, State},
    routing::get,
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::tracking_controller::TrackingController;
use crate::dto::tracking_dto::TrackingResponse;
use crate::middleware::auth_middleware::{auth_middleware, CurrentUser};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_tracking_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/:order_id", get(get_tracking))
        .route_layer(axum::middleware::from_fn_with_state(state, auth_middleware))
}

async fn get_tracking(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<TrackingResponse>, AppError> {
    let controller = TrackingController::new(state.tracking.clone(), state.orders.clone());
    let response = controller.get(order_id, &user).await?;
    Ok(Json(response))
}
