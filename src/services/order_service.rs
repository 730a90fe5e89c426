//! Servicio de pedidos y facturación
//!
//! Registro en memoria de pedidos confirmados. El número de pedido es
//! secuencial y se persiste en el almacén para sobrevivir al registro.

use chrono::Utc;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::models::offer::TruckOffer;
use crate::models::order::{Invoice, Order, PaymentMethod, PaymentStatus};
use crate::models::request::RequestDetails;
use crate::models::user::{User, UserRole};
use crate::storage::{get_json, set_json, SharedStore, StoreKeys};
use crate::utils::errors::{AppError, AppResult};

pub struct OrderService {
    store: SharedStore,
    orders: Arc<RwLock<HashMap<Uuid, Order>>>,
}

impl OrderService {
    pub fn new(store: SharedStore) -> Self {
        Self {
            store,
            orders: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Asignar el siguiente número de pedido secuencial
    async fn next_order_number(&self) -> AppResult<String> {
        let key = StoreKeys::last_order_number();
        let last: u64 = get_json(self.store.as_ref(), &key).await?.unwrap_or(0);
        let next = last + 1;
        set_json(self.store.as_ref(), &key, &next).await?;
        Ok(format!("ORD-{:06}", next))
    }

    /// Crear el pedido (con factura) a partir de la oferta aceptada
    pub async fn create_order(
        &self,
        request: &RequestDetails,
        offer: &TruckOffer,
    ) -> AppResult<Order> {
        let order_number = self.next_order_number().await?;

        // El descuento se aplicó sobre el estimado; la oferta hereda ese
        // neto, así que el bruto de la factura se reconstruye con la misma
        // diferencia bruto-neto del estimado.
        let discount_amount = if request.coupon_applied {
            request.undiscounted_price - request.estimated_price
        } else {
            Decimal::ZERO
        };
        let subtotal = offer.price + discount_amount;

        let order = Order {
            id: Uuid::new_v4(),
            order_number: order_number.clone(),
            customer_id: request.customer_id.clone(),
            driver_id: offer.driver_id.clone(),
            driver_name: offer.driver_name.clone(),
            request: request.clone(),
            accepted_offer: offer.clone(),
            price: offer.price,
            payment_status: PaymentStatus::Pending,
            payment_method: None,
            invoice: Invoice {
                invoice_number: format!("INV-{}", order_number.trim_start_matches("ORD-")),
                subtotal,
                discount_amount,
                total: offer.price,
                issued_at: Utc::now(),
            },
            created_at: Utc::now(),
            delivered_at: None,
        };

        let mut orders = self.orders.write().await;
        orders.insert(order.id, order.clone());
        info!("🧾 Pedido {} creado para {}", order.order_number, order.customer_id);
        Ok(order)
    }

    pub async fn get(&self, order_id: Uuid) -> Option<Order> {
        let orders = self.orders.read().await;
        orders.get(&order_id).cloned()
    }

    /// Obtener un pedido comprobando que el usuario puede verlo
    pub async fn get_for_user(&self, order_id: Uuid, user: &User) -> AppResult<Order> {
        let order = self
            .get(order_id)
            .await
            .ok_or_else(|| AppError::NotFound("Order not found".to_string()))?;

        let allowed = match user.role {
            UserRole::Customer => order.customer_id == user.id,
            UserRole::Driver => order.driver_id == user.id,
            UserRole::Admin => true,
        };
        if !allowed {
            return Err(AppError::Forbidden(
                "You do not have access to this order".to_string(),
            ));
        }
        Ok(order)
    }

    /// Pedidos visibles para un usuario, más reciente primero
    pub async fn list_for_user(&self, user: &User) -> Vec<Order> {
        let orders = self.orders.read().await;
        let mut visible: Vec<Order> = orders
            .values()
            .filter(|order| match user.role {
                UserRole::Customer => order.customer_id == user.id,
                UserRole::Driver => order.driver_id == user.id,
                UserRole::Admin => true,
            })
            .cloned()
            .collect();
        visible.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        visible
    }

    /// Marcar el pedido como entregado y liquidar el pago
    pub async fn mark_delivered(&self, order_id: Uuid) -> AppResult<Order> {
        let mut orders = self.orders.write().await;
        let order = orders
            .get_mut(&order_id)
            .ok_or_else(|| AppError::NotFound("Order not found".to_string()))?;
        order.payment_status = PaymentStatus::Paid;
        order.delivered_at = Some(Utc::now());
        info!("✅ Pedido {} entregado", order.order_number);
        Ok(order.clone())
    }

    /// Registrar el método de pago elegido en la negociación
    pub async fn set_payment_method(
        &self,
        order_id: Uuid,
        method: PaymentMethod,
    ) -> AppResult<Order> {
        let mut orders = self.orders.write().await;
        let order = orders
            .get_mut(&order_id)
            .ok_or_else(|| AppError::NotFound("Order not found".to_string()))?;
        order.payment_method = Some(method);
        Ok(order.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::request::RequestModifiers;
    use crate::storage::MemoryStore;

    fn fixture_request(coupon: bool) -> RequestDetails {
        RequestDetails {
            id: Uuid::new_v4(),
            customer_id: "cus-1".to_string(),
            truck_type_id: "refrigerated".to_string(),
            start_location: "Riyadh".to_string(),
            destination: "Jeddah".to_string(),
            map_location: None,
            distance_km: 11,
            modifiers: RequestModifiers::default(),
            estimated_price: Decimal::from(if coupon { 131 } else { 154 }),
            undiscounted_price: Decimal::from(154),
            coupon_applied: coupon,
            created_at: Utc::now(),
        }
    }

    fn fixture_offer(request: &RequestDetails, price: i64) -> TruckOffer {
        TruckOffer {
            id: Uuid::new_v4(),
            request_id: request.id,
            driver_id: "drv-1001".to_string(),
            driver_name: "Ahmed Al-Harbi".to_string(),
            distance_to_pickup_km: 3.2,
            rating: 4.8,
            price: Decimal::from(price),
            estimated_arrival: "15 min".to_string(),
            truck_type_id: request.truck_type_id.clone(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_order_numbers_are_sequential() {
        let service = OrderService::new(Arc::new(MemoryStore::new()));
        let request = fixture_request(false);
        let offer = fixture_offer(&request, 144);

        let first = service.create_order(&request, &offer).await.unwrap();
        let second = service.create_order(&request, &offer).await.unwrap();
        assert_eq!(first.order_number, "ORD-000001");
        assert_eq!(second.order_number, "ORD-000002");
    }

    #[tokio::test]
    async fn test_invoice_breaks_down_discount() {
        let service = OrderService::new(Arc::new(MemoryStore::new()));
        let request = fixture_request(true);
        let offer = fixture_offer(&request, 121); // 131 - 10

        let order = service.create_order(&request, &offer).await.unwrap();
        assert_eq!(order.invoice.discount_amount, Decimal::from(23)); // 154 - 131
        assert_eq!(order.invoice.subtotal, Decimal::from(144));
        assert_eq!(order.invoice.total, Decimal::from(121));
    }

    #[tokio::test]
    async fn test_mark_delivered_settles_payment() {
        let service = OrderService::new(Arc::new(MemoryStore::new()));
        let request = fixture_request(false);
        let offer = fixture_offer(&request, 149);

        let order = service.create_order(&request, &offer).await.unwrap();
        assert_eq!(order.payment_status, PaymentStatus::Pending);

        let delivered = service.mark_delivered(order.id).await.unwrap();
        assert_eq!(delivered.payment_status, PaymentStatus::Paid);
        assert!(delivered.delivered_at.is_some());
    }

    #[tokio::test]
    async fn test_order_access_by_role() {
        let service = OrderService::new(Arc::new(MemoryStore::new()));
        let request = fixture_request(false);
        let offer = fixture_offer(&request, 149);
        let order = service.create_order(&request, &offer).await.unwrap();

        let customer = User {
            id: "cus-1".to_string(),
            full_name: "Customer".to_string(),
            email: "c@example.com".to_string(),
            phone: "0500000001".to_string(),
            role: UserRole::Customer,
            password_hash: String::new(),
            created_at: Utc::now(),
        };
        let stranger = User {
            id: "cus-2".to_string(),
            role: UserRole::Customer,
            ..customer.clone()
        };

        assert!(service.get_for_user(order.id, &customer).await.is_ok());
        assert!(service.get_for_user(order.id, &stranger).await.is_err());
    }
}
