use axum::{
    extract::{Path, State},
    routing::{get, post},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::chat_controller::ChatController;
use crate::dto::chat_dto::{PostMessageRequest, PostQuoteRequest, SelectPaymentMethodRequest};
use crate::middleware::auth_middleware::{auth_middleware, CurrentUser};
use crate::models::chat::ChatMessage;
use crate::models::order::PaymentMethod;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Chat y negociación de presupuestos - clientes y conductores
pub fn create_chat_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/:chat_id/messages", get(list_messages).post(post_message))
        .route("/:chat_id/quotes", post(post_quote))
        .route("/:chat_id/quotes/:message_id/accept", post(accept_quote))
        .route("/:chat_id/payment-method", post(select_payment_method))
        .route_layer(axum::middleware::from_fn_with_state(state, auth_middleware))
}

async fn list_messages(
    State(state): State<AppState>,
    Path(chat_id): Path<String>,
) -> Result<Json<Vec<ChatMessage>>, AppError> {
    let controller = ChatController::new(state.chat.clone());
    let messages = controller.messages(&chat_id).await?;
    Ok(Json(messages))
}

async fn post_message(
    State(state): State<AppState>,
    Path(chat_id): Path<String>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(request): Json<PostMessageRequest>,
) -> Result<Json<ChatMessage>, AppError> {
    let controller = ChatController::new(state.chat.clone());
    let message = controller.post_message(&chat_id, &user, request).await?;
    Ok(Json(message))
}

async fn post_quote(
    State(state): State<AppState>,
    Path(chat_id): Path<String>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(request): Json<PostQuoteRequest>,
) -> Result<Json<ChatMessage>, AppError> {
    let controller = ChatController::new(state.chat.clone());
    let message = controller.post_quote(&chat_id, &user, request).await?;
    Ok(Json(message))
}

async fn accept_quote(
    State(state): State<AppState>,
    Path((chat_id, message_id)): Path<(String, Uuid)>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<ChatMessage>, AppError> {
    let controller = ChatController::new(state.chat.clone());
    let message = controller.accept_quote(&chat_id, message_id, &user).await?;
    Ok(Json(message))
}

async fn select_payment_method(
    State(state): State<AppState>,
    Path(chat_id): Path<String>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(request): Json<SelectPaymentMethodRequest>,
) -> Result<Json<PaymentMethod>, AppError> {
    let controller = ChatController::new(state.chat.clone());
    let method = controller
        .select_payment_method(&chat_id, &user, request)
        .await?;
    Ok(Json(method))
}
