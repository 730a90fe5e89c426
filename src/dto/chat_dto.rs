use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use crate::models::order::PaymentMethod;

/// Request para enviar un mensaje normal
#[derive(Debug, Deserialize, Validate)]
pub struct PostMessageRequest {
    #[validate(length(min = 1, max = 2000))]
    pub content: String,
}

/// Request para enviar un presupuesto (solo conductores)
#[derive(Debug, Deserialize, Validate)]
pub struct PostQuoteRequest {
    #[validate(length(min = 1, max = 2000))]
    pub content: String,

    pub amount: Decimal,
}

/// Request para elegir método de pago
#[derive(Debug, Deserialize)]
pub struct SelectPaymentMethodRequest {
    pub method: PaymentMethod,
}
