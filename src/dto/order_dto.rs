use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::models::order::{Invoice, Order, PaymentMethod, PaymentStatus};

/// Response de pedido para la API
#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub id: Uuid,
    pub order_number: String,
    pub customer_id: String,
    pub driver_id: String,
    pub driver_name: String,
    pub truck_type_id: String,
    pub start_location: String,
    pub destination: String,
    pub distance_km: u32,
    pub price: Decimal,
    pub payment_status: PaymentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    pub invoice: Invoice,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivered_at: Option<DateTime<Utc>>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            order_number: order.order_number,
            customer_id: order.customer_id,
            driver_id: order.driver_id,
            driver_name: order.driver_name,
            truck_type_id: order.request.truck_type_id.clone(),
            start_location: order.request.start_location.clone(),
            destination: order.request.destination.clone(),
            distance_km: order.request.distance_km,
            price: order.price,
            payment_status: order.payment_status,
            payment_method: order.payment_method,
            invoice: order.invoice,
            created_at: order.created_at,
            delivered_at: order.delivered_at,
        }
    }
}
