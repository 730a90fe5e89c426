//! Servicio de chat y negociación de presupuestos
//!
//! Lista de mensajes append-only por chat_id, espejada en el almacén
//! clave-valor (el cliente web hacía lo mismo contra localStorage).
//! Un conductor propone un presupuesto; la otra parte lo acepta y elige
//! método de pago. Se asume un único escritor por chat.

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::chat::ChatMessage;
use crate::models::order::PaymentMethod;
use crate::models::user::{User, UserRole};
use crate::services::notification_service::NotificationService;
use crate::storage::{get_json, set_json, SharedStore, StoreKeys};
use crate::utils::errors::{AppError, AppResult};
use std::sync::Arc;

pub struct ChatService {
    store: SharedStore,
    notifications: Arc<NotificationService>,
}

impl ChatService {
    pub fn new(store: SharedStore, notifications: Arc<NotificationService>) -> Self {
        Self {
            store,
            notifications,
        }
    }

    async fn load(&self, chat_id: &str) -> AppResult<Vec<ChatMessage>> {
        let messages: Option<Vec<ChatMessage>> =
            get_json(self.store.as_ref(), &StoreKeys::chat_messages(chat_id)).await?;
        Ok(messages.unwrap_or_default())
    }

    async fn save(&self, chat_id: &str, messages: &[ChatMessage]) -> AppResult<()> {
        set_json(
            self.store.as_ref(),
            &StoreKeys::chat_messages(chat_id),
            &messages,
        )
        .await?;
        Ok(())
    }

    /// Mensajes del chat en orden de llegada
    pub async fn messages(&self, chat_id: &str) -> AppResult<Vec<ChatMessage>> {
        self.load(chat_id).await
    }

    /// Añadir un mensaje normal
    pub async fn post_message(
        &self,
        chat_id: &str,
        sender: &User,
        content: String,
    ) -> AppResult<ChatMessage> {
        if content.trim().is_empty() {
            return Err(AppError::BadRequest("Message content is required".to_string()));
        }

        let message = ChatMessage::new(chat_id, &sender.id, &sender.full_name, content);
        let mut messages = self.load(chat_id).await?;
        messages.push(message.clone());
        self.save(chat_id, &messages).await?;
        Ok(message)
    }

    /// Añadir un presupuesto (solo conductores)
    pub async fn post_quote(
        &self,
        chat_id: &str,
        sender: &User,
        content: String,
        amount: Decimal,
    ) -> AppResult<ChatMessage> {
        match sender.role {
            UserRole::Driver => {}
            UserRole::Customer | UserRole::Admin => {
                return Err(AppError::Forbidden(
                    "Only drivers can send price quotes".to_string(),
                ));
            }
        }
        if amount <= Decimal::ZERO {
            return Err(AppError::BadRequest("Quote amount must be positive".to_string()));
        }

        let message =
            ChatMessage::new_quote(chat_id, &sender.id, &sender.full_name, content, amount);
        let mut messages = self.load(chat_id).await?;
        messages.push(message.clone());
        self.save(chat_id, &messages).await?;
        Ok(message)
    }

    /// Aceptar un presupuesto.
    ///
    /// Solo puede aceptarlo alguien distinto del emisor; el contenido y
    /// el importe no cambian, solo el flag de aceptación.
    pub async fn accept_quote(
        &self,
        chat_id: &str,
        message_id: Uuid,
        acceptor: &User,
    ) -> AppResult<ChatMessage> {
        let mut messages = self.load(chat_id).await?;
        let message = messages
            .iter_mut()
            .find(|m| m.id == message_id)
            .ok_or_else(|| AppError::NotFound("Quote message not found".to_string()))?;

        if !message.is_quote {
            return Err(AppError::BadRequest("Message is not a quote".to_string()));
        }
        if message.sender_id == acceptor.id {
            return Err(AppError::Forbidden(
                "A quote cannot be accepted by its sender".to_string(),
            ));
        }
        if message.is_accepted {
            return Err(AppError::Conflict("Quote is already accepted".to_string()));
        }

        message.is_accepted = true;
        let accepted = message.clone();
        let sender_id = accepted.sender_id.clone();
        self.save(chat_id, &messages).await?;

        self.notifications
            .push(
                &sender_id,
                "Quote accepted",
                &format!("{} accepted your quote", acceptor.full_name),
                false,
            )
            .await;
        Ok(accepted)
    }

    /// Elegir método de pago tras aceptar un presupuesto
    pub async fn select_payment_method(
        &self,
        chat_id: &str,
        user: &User,
        method: PaymentMethod,
    ) -> AppResult<PaymentMethod> {
        let messages = self.load(chat_id).await?;
        let has_accepted_quote = messages.iter().any(|m| m.is_quote && m.is_accepted);
        if !has_accepted_quote {
            return Err(AppError::BadRequest(
                "No accepted quote in this chat yet".to_string(),
            ));
        }

        set_json(
            self.store.as_ref(),
            &StoreKeys::chat_payment_method(chat_id),
            &method,
        )
        .await?;
        self.notifications
            .push(
                &user.id,
                "Payment method selected",
                &format!("Payment by {}", method.as_str()),
                false,
            )
            .await;
        Ok(method)
    }

    /// Método de pago elegido en el chat, si lo hay
    pub async fn payment_method(&self, chat_id: &str) -> AppResult<Option<PaymentMethod>> {
        let method: Option<PaymentMethod> =
            get_json(self.store.as_ref(), &StoreKeys::chat_payment_method(chat_id)).await?;
        Ok(method)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use chrono::Utc;

    fn user(id: &str, role: UserRole) -> User {
        User {
            id: id.to_string(),
            full_name: format!("User {}", id),
            email: format!("{}@example.com", id),
            phone: "0501234567".to_string(),
            role,
            password_hash: String::new(),
            created_at: Utc::now(),
        }
    }

    fn service() -> ChatService {
        ChatService::new(
            Arc::new(MemoryStore::new()),
            Arc::new(NotificationService::new()),
        )
    }

    #[tokio::test]
    async fn test_messages_append_in_order() {
        let service = service();
        let driver = user("drv-1", UserRole::Driver);
        let customer = user("cus-1", UserRole::Customer);

        service
            .post_message("chat-1", &customer, "Can you do it cheaper?".to_string())
            .await
            .unwrap();
        service
            .post_message("chat-1", &driver, "Let me check".to_string())
            .await
            .unwrap();

        let messages = service.messages("chat-1").await.unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].sender_id, "cus-1");
        assert_eq!(messages[1].sender_id, "drv-1");
    }

    #[tokio::test]
    async fn test_only_drivers_can_quote() {
        let service = service();
        let customer = user("cus-1", UserRole::Customer);

        let result = service
            .post_quote("chat-1", &customer, "my offer".to_string(), Decimal::from(140))
            .await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_quote_roundtrip_preserves_content_and_amount() {
        let service = service();
        let driver = user("drv-1", UserRole::Driver);
        let customer = user("cus-1", UserRole::Customer);

        let quote = service
            .post_quote(
                "chat-1",
                &driver,
                "I can do it for 140".to_string(),
                Decimal::from(140),
            )
            .await
            .unwrap();
        assert!(!quote.is_accepted);

        // El emisor no puede aceptar su propio presupuesto
        let self_accept = service.accept_quote("chat-1", quote.id, &driver).await;
        assert!(matches!(self_accept, Err(AppError::Forbidden(_))));

        let accepted = service
            .accept_quote("chat-1", quote.id, &customer)
            .await
            .unwrap();
        assert!(accepted.is_accepted);
        assert_eq!(accepted.content, "I can do it for 140");
        assert_eq!(accepted.quote_amount, Some(Decimal::from(140)));

        // Doble aceptación es conflicto
        let again = service.accept_quote("chat-1", quote.id, &customer).await;
        assert!(matches!(again, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_payment_method_requires_accepted_quote() {
        let service = service();
        let driver = user("drv-1", UserRole::Driver);
        let customer = user("cus-1", UserRole::Customer);

        let early = service
            .select_payment_method("chat-1", &customer, PaymentMethod::Cash)
            .await;
        assert!(matches!(early, Err(AppError::BadRequest(_))));

        let quote = service
            .post_quote("chat-1", &driver, "quote".to_string(), Decimal::from(100))
            .await
            .unwrap();
        service
            .accept_quote("chat-1", quote.id, &customer)
            .await
            .unwrap();

        let method = service
            .select_payment_method("chat-1", &customer, PaymentMethod::Card)
            .await
            .unwrap();
        assert_eq!(method, PaymentMethod::Card);
        assert_eq!(
            service.payment_method("chat-1").await.unwrap(),
            Some(PaymentMethod::Card)
        );
    }
}
