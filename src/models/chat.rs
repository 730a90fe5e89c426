//! Modelo de chat y presupuestos
//!
//! Lista de mensajes append-only por chat_id. Un mensaje puede ser un
//! presupuesto (is_quote + quote_amount); la aceptación no toca ni el
//! contenido ni el importe, solo el flag.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Mensaje de chat
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub chat_id: String,
    pub sender_id: String,
    pub sender_name: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub is_quote: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote_amount: Option<Decimal>,
    pub is_accepted: bool,
}

impl ChatMessage {
    pub fn new(chat_id: &str, sender_id: &str, sender_name: &str, content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            chat_id: chat_id.to_string(),
            sender_id: sender_id.to_string(),
            sender_name: sender_name.to_string(),
            content,
            timestamp: Utc::now(),
            is_quote: false,
            quote_amount: None,
            is_accepted: false,
        }
    }

    pub fn new_quote(
        chat_id: &str,
        sender_id: &str,
        sender_name: &str,
        content: String,
        amount: Decimal,
    ) -> Self {
        let mut message = Self::new(chat_id, sender_id, sender_name, content);
        message.is_quote = true;
        message.quote_amount = Some(amount);
        message
    }
}
