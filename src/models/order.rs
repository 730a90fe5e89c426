//! Modelo de pedido y factura
//!
//! Un pedido nace al aceptar una oferta: número secuencial, factura con
//! el desglose del descuento y estado de pago que se liquida cuando la
//! entrega simulada llega a destino.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::offer::TruckOffer;
use super::request::RequestDetails;

/// Estado de pago del pedido
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Paid,
}

/// Método de pago elegido tras aceptar un presupuesto
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Card,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Card => "card",
        }
    }
}

/// Factura emitida al confirmar el pedido
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    pub invoice_number: String,
    /// Importe bruto (sin descuento)
    pub subtotal: Decimal,
    /// Importe descontado por el cupón (0 si no había cupón)
    pub discount_amount: Decimal,
    /// Importe final a pagar
    pub total: Decimal,
    pub issued_at: DateTime<Utc>,
}

/// Pedido confirmado
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub order_number: String,
    pub customer_id: String,
    pub driver_id: String,
    pub driver_name: String,
    pub request: RequestDetails,
    pub accepted_offer: TruckOffer,
    pub price: Decimal,
    pub payment_status: PaymentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    pub invoice: Invoice,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivered_at: Option<DateTime<Utc>>,
}
