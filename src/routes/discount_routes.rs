use axum::{
    extract::State,
    routing::{get, post},
    Extension, Json, Router,
};

use crate::controllers::discount_controller::DiscountController;
use crate::dto::discount_dto::{CouponResponse, DiscountStatusResponse};
use crate::middleware::auth_middleware::{customer_middleware, CurrentUser};
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Descuento por fidelidad - solo clientes
pub fn create_discount_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(discount_status))
        .route("/coupon", post(apply_coupon))
        .route_layer(axum::middleware::from_fn_with_state(
            state,
            customer_middleware,
        ))
}

async fn discount_status(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<DiscountStatusResponse>, AppError> {
    let controller = DiscountController::new(state.discount.clone());
    let response = controller.status(&user).await?;
    Ok(Json(response))
}

async fn apply_coupon(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<CouponResponse>, AppError> {
    let controller = DiscountController::new(state.discount.clone());
    let response = controller.apply_coupon(&user).await?;
    Ok(Json(response))
}
