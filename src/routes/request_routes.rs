use axum::{
    extract::{Path, State},
    routing::{get, post},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::request_controller::RequestController;
use crate::dto::common::ApiResponse;
use crate::dto::order_dto::OrderResponse;
use crate::dto::request_dto::{
    SelectVehicleRequest, SetLocationsRequest, SubmitRequestBody, WorkflowStatusResponse,
};
use crate::middleware::auth_middleware::{customer_middleware, CurrentUser};
use crate::models::offer::TruckOffer;
use crate::models::request::RequestDetails;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Workflow de solicitud/ofertas - solo clientes
pub fn create_request_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/start", post(start_request))
        .route("/vehicle", post(select_vehicle))
        .route("/locations", post(set_locations))
        .route("/submit", post(submit_request))
        .route("/current", get(current_state))
        .route("/offers", get(list_offers))
        .route("/offers/:id/accept", post(accept_offer))
        .route_layer(axum::middleware::from_fn_with_state(
            state,
            customer_middleware,
        ))
}

async fn start_request(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Json<WorkflowStatusResponse> {
    let controller = RequestController::new(state.workflow.clone());
    Json(controller.start(&user).await)
}

async fn select_vehicle(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(request): Json<SelectVehicleRequest>,
) -> Result<Json<WorkflowStatusResponse>, AppError> {
    let controller = RequestController::new(state.workflow.clone());
    let response = controller.select_vehicle(&user, request).await?;
    Ok(Json(response))
}

async fn set_locations(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(request): Json<SetLocationsRequest>,
) -> Result<Json<WorkflowStatusResponse>, AppError> {
    let controller = RequestController::new(state.workflow.clone());
    let response = controller.set_locations(&user, request).await?;
    Ok(Json(response))
}

async fn submit_request(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(request): Json<SubmitRequestBody>,
) -> Result<Json<ApiResponse<RequestDetails>>, AppError> {
    let controller = RequestController::new(state.workflow.clone());
    let response = controller.submit(&user, request).await?;
    Ok(Json(response))
}

async fn current_state(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Json<WorkflowStatusResponse> {
    let controller = RequestController::new(state.workflow.clone());
    Json(controller.current(&user).await)
}

async fn list_offers(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Json<Vec<TruckOffer>> {
    let controller = RequestController::new(state.workflow.clone());
    Json(controller.offers(&user).await)
}

async fn accept_offer(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(offer_id): Path<Uuid>,
) -> Result<Json<ApiResponse<OrderResponse>>, AppError> {
    let controller = RequestController::new(state.workflow.clone());
    let response = controller.accept_offer(&user, offer_id).await?;
    Ok(Json(response))
}
