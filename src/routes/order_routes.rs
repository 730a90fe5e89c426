use axum::{
    extract::{Path, State},
    routing::get,
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::order_controller::OrderController;
use crate::dto::order_dto::OrderResponse;
use crate::middleware::auth_middleware::{auth_middleware, CurrentUser};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_order_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(list_orders))
        .route("/:id", get(get_order))
        .route_layer(axum::middleware::from_fn_with_state(state, auth_middleware))
}

async fn list_orders(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Json<Vec<OrderResponse>> {
    let controller = OrderController::new(state.orders.clone());
    Json(controller.list(&user).await)
}

async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<OrderResponse>, AppError> {
    let controller = OrderController::new(state.orders.clone());
    let response = controller.get_by_id(id, &user).await?;
    Ok(Json(response))
}
