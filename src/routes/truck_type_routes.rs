use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::controllers::truck_type_controller::TruckTypeController;
use crate::dto::truck_type_dto::TruckTypeResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_truck_type_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_truck_types))
        .route("/:id", get(get_truck_type))
}

async fn list_truck_types(State(state): State<AppState>) -> Json<Vec<TruckTypeResponse>> {
    let controller = TruckTypeController::new(state.pricing.clone());
    Json(controller.list())
}

async fn get_truck_type(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TruckTypeResponse>, AppError> {
    let controller = TruckTypeController::new(state.pricing.clone());
    let response = controller.get_by_id(&id)?;
    Ok(Json(response))
}
