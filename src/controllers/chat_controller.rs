use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::dto::chat_dto::{PostMessageRequest, PostQuoteRequest, SelectPaymentMethodRequest};
use crate::models::chat::ChatMessage;
use crate::models::order::PaymentMethod;
use crate::models::user::User;
use crate::services::chat_service::ChatService;
use crate::utils::errors::AppError;

pub struct ChatController {
    chat: Arc<ChatService>,
}

impl ChatController {
    pub fn new(chat: Arc<ChatService>) -> Self {
        Self { chat }
    }

    pub async fn messages(&self, chat_id: &str) -> Result<Vec<ChatMessage>, AppError> {
        self.chat.messages(chat_id).await
    }

    pub async fn post_message(
        &self,
        chat_id: &str,
        user: &User,
        request: PostMessageRequest,
    ) -> Result<ChatMessage, AppError> {
        request.validate()?;
        self.chat.post_message(chat_id, user, request.content).await
    }

    pub async fn post_quote(
        &self,
        chat_id: &str,
        user: &User,
        request: PostQuoteRequest,
    ) -> Result<ChatMessage, AppError> {
        request.validate()?;
        self.chat
            .post_quote(chat_id, user, request.content, request.amount)
            .await
    }

    pub async fn accept_quote(
        &self,
        chat_id: &str,
        message_id: Uuid,
        user: &User,
    ) -> Result<ChatMessage, AppError> {
        self.chat.accept_quote(chat_id, message_id, user).await
    }

    pub async fn select_payment_method(
        &self,
        chat_id: &str,
        user: &User,
        request: SelectPaymentMethodRequest,
    ) -> Result<PaymentMethod, AppError> {
        self.chat
            .select_payment_method(chat_id, user, request.method)
            .await
    }
}
