//! Servicio de tracking simulado
//!
//! Simulación por temporizador de la aproximación del camión: cada tick
//! la distancia baja 0.1 km (suelo en 0) y otra cadencia independiente
//! perturba la rotación del marcador. Cada tarea pertenece a su pedido y
//! se cancela al pararla; no quedan temporizadores colgando tocando
//! estado ajeno. Un feed GPS real sustituiría este servicio manteniendo
//! el mismo contrato de umbrales y notificaciones.

use rand::Rng;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::order::Order;
use crate::models::tracking::{
    estimated_minutes, DriverStatus, TrackingState, STATUS_THRESHOLDS_KM,
};
use crate::services::discount_service::DiscountService;
use crate::services::notification_service::NotificationService;
use crate::services::order_service::OrderService;

/// Km que avanza la simulación en cada tick
const STEP_KM: f64 = 0.1;

pub struct TrackingService {
    states: Arc<RwLock<HashMap<Uuid, TrackingState>>>,
    tasks: Arc<RwLock<HashMap<Uuid, JoinHandle<()>>>>,
    orders: Arc<OrderService>,
    discount: Arc<DiscountService>,
    notifications: Arc<NotificationService>,
    tick: Duration,
    rotation_tick: Duration,
}

impl TrackingService {
    pub fn new(
        orders: Arc<OrderService>,
        discount: Arc<DiscountService>,
        notifications: Arc<NotificationService>,
        tick: Duration,
        rotation_tick: Duration,
    ) -> Self {
        Self {
            states: Arc::new(RwLock::new(HashMap::new())),
            tasks: Arc::new(RwLock::new(HashMap::new())),
            orders,
            discount,
            notifications,
            tick,
            rotation_tick,
        }
    }

    /// Arrancar la simulación de un pedido recién confirmado
    pub async fn start_tracking(&self, order: &Order) {
        self.start_with_distance(order, order.request.distance_km as f64)
            .await;
    }

    /// Arrancar la simulación con una distancia inicial explícita
    pub async fn start_with_distance(&self, order: &Order, initial_distance_km: f64) {
        let order_id = order.id;

        // Si había una simulación anterior para este pedido, fuera
        self.stop(order_id).await;

        let state = TrackingState::new(&order.order_number, initial_distance_km);
        self.states.write().await.insert(order_id, state);
        info!(
            "🚚 Tracking iniciado para {} a {:.1} km",
            order.order_number, initial_distance_km
        );

        let states = self.states.clone();
        let tasks = self.tasks.clone();
        let orders = self.orders.clone();
        let discount = self.discount.clone();
        let notifications = self.notifications.clone();
        let customer_id = order.customer_id.clone();
        let order_number = order.order_number.clone();
        let tick = self.tick;
        let rotation_tick = self.rotation_tick;

        let handle = tokio::spawn(async move {
            let mut movement = tokio::time::interval(tick);
            let mut rotation = tokio::time::interval(rotation_tick);
            // El primer tick de un interval es inmediato
            movement.tick().await;
            rotation.tick().await;

            loop {
                tokio::select! {
                    _ = movement.tick() => {
                        let completed = {
                            let mut states = states.write().await;
                            let Some(state) = states.get_mut(&order_id) else { break };

                            state.distance_km = (state.distance_km - STEP_KM).max(0.0);
                            state.estimated_minutes = estimated_minutes(state.distance_km);
                            state.updated_at = chrono::Utc::now();

                            for (index, threshold) in STATUS_THRESHOLDS_KM.iter().enumerate() {
                                if !state.fired_thresholds[index] && state.distance_km <= *threshold {
                                    state.fired_thresholds[index] = true;
                                    state.status = DriverStatus::for_threshold(index);
                                    let sticky = index == STATUS_THRESHOLDS_KM.len() - 1;
                                    notifications
                                        .push(
                                            &customer_id,
                                            state.status.label(),
                                            &format!(
                                                "Order {}: {}",
                                                order_number,
                                                state.status.label()
                                            ),
                                            sticky,
                                        )
                                        .await;
                                }
                            }

                            if state.distance_km <= 0.0 {
                                state.completed = true;
                            }
                            state.completed
                        };

                        if completed {
                            if let Err(e) = orders.mark_delivered(order_id).await {
                                warn!("⚠️ No se pudo liquidar el pedido {}: {}", order_number, e);
                            }
                            match discount.record_completed_order(&customer_id).await {
                                Ok(total) => info!(
                                    "🏁 Entrega {} completada ({} pedidos del cliente)",
                                    order_number, total
                                ),
                                Err(e) => warn!(
                                    "⚠️ No se pudo incrementar el contador de {}: {}",
                                    customer_id, e
                                ),
                            }
                            notifications
                                .push(
                                    &customer_id,
                                    "Delivery completed",
                                    &format!("Order {} has been delivered", order_number),
                                    false,
                                )
                                .await;
                            tasks.write().await.remove(&order_id);
                            break;
                        }
                    }
                    _ = rotation.tick() => {
                        let mut states = states.write().await;
                        let Some(state) = states.get_mut(&order_id) else { break };
                        let delta: f64 = rand::thread_rng().gen_range(-15.0..=15.0);
                        state.rotation = (state.rotation + delta).rem_euclid(360.0);
                    }
                }
            }
        });

        self.tasks.write().await.insert(order_id, handle);
    }

    /// Estado actual de la simulación de un pedido
    pub async fn get(&self, order_id: Uuid) -> Option<TrackingState> {
        self.states.read().await.get(&order_id).cloned()
    }

    /// Parar la simulación de un pedido (cancela su tarea)
    pub async fn stop(&self, order_id: Uuid) {
        if let Some(handle) = self.tasks.write().await.remove(&order_id) {
            handle.abort();
            info!("🛑 Tracking cancelado para el pedido {}", order_id);
        }
    }

    /// Número de simulaciones vivas (para diagnósticos)
    pub async fn active_count(&self) -> usize {
        self.tasks.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::offer::TruckOffer;
    use crate::models::request::{RequestDetails, RequestModifiers};
    use crate::storage::{MemoryStore, SharedStore};
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn fixtures() -> (Arc<OrderService>, Arc<DiscountService>, Arc<NotificationService>) {
        let store: SharedStore = Arc::new(MemoryStore::new());
        let notifications = Arc::new(NotificationService::new());
        let orders = Arc::new(OrderService::new(store.clone()));
        let discount = Arc::new(DiscountService::new(
            store,
            notifications.clone(),
            7,
            15,
        ));
        (orders, discount, notifications)
    }

    async fn make_order(orders: &OrderService) -> Order {
        let request = RequestDetails {
            id: Uuid::new_v4(),
            customer_id: "cus-1".to_string(),
            truck_type_id: "refrigerated".to_string(),
            start_location: "Riyadh".to_string(),
            destination: "Jeddah".to_string(),
            map_location: None,
            distance_km: 1,
            modifiers: RequestModifiers::default(),
            estimated_price: Decimal::from(14),
            undiscounted_price: Decimal::from(14),
            coupon_applied: false,
            created_at: Utc::now(),
        };
        let offer = TruckOffer {
            id: Uuid::new_v4(),
            request_id: request.id,
            driver_id: "drv-1001".to_string(),
            driver_name: "Ahmed Al-Harbi".to_string(),
            distance_to_pickup_km: 3.2,
            rating: 4.8,
            price: Decimal::from(14),
            estimated_arrival: "15 min".to_string(),
            truck_type_id: "refrigerated".to_string(),
            created_at: Utc::now(),
        };
        orders.create_order(&request, &offer).await.unwrap()
    }

    #[tokio::test]
    async fn test_simulation_runs_to_completion() {
        let (orders, discount, notifications) = fixtures();
        let service = TrackingService::new(
            orders.clone(),
            discount.clone(),
            notifications.clone(),
            Duration::from_millis(5),
            Duration::from_millis(3),
        );

        let order = make_order(&orders).await;
        service.start_with_distance(&order, 0.5).await;

        // 0.5 km a 0.1 por tick de 5ms: debería terminar holgadamente
        tokio::time::sleep(Duration::from_millis(200)).await;

        let state = service.get(order.id).await.unwrap();
        assert!(state.completed);
        assert_eq!(state.status, DriverStatus::Arrived);
        assert_eq!(state.distance_km, 0.0);

        // La entrega liquida el pago e incrementa el contador del cliente
        let delivered = orders.get(order.id).await.unwrap();
        assert!(delivered.delivered_at.is_some());
        assert_eq!(discount.completed_orders("cus-1").await.unwrap(), 1);

        // La tarea terminó y se retiró sola
        assert_eq!(service.active_count().await, 0);
    }

    #[tokio::test]
    async fn test_stop_cancels_the_task() {
        let (orders, discount, notifications) = fixtures();
        let service = TrackingService::new(
            orders.clone(),
            discount.clone(),
            notifications,
            Duration::from_millis(50),
            Duration::from_millis(50),
        );

        let order = make_order(&orders).await;
        service.start_with_distance(&order, 5.0).await;
        assert_eq!(service.active_count().await, 1);

        service.stop(order.id).await;
        assert_eq!(service.active_count().await, 0);

        // Sin tarea no hay más progreso ni contador incrementado
        tokio::time::sleep(Duration::from_millis(120)).await;
        assert_eq!(discount.completed_orders("cus-1").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_final_threshold_notification_is_sticky() {
        let (orders, discount, notifications) = fixtures();
        let service = TrackingService::new(
            orders.clone(),
            discount,
            notifications.clone(),
            Duration::from_millis(5),
            Duration::from_millis(3),
        );

        let order = make_order(&orders).await;
        service.start_with_distance(&order, 0.3).await;
        tokio::time::sleep(Duration::from_millis(150)).await;

        let delivered = notifications.list("cus-1").await;
        assert!(delivered.iter().any(|n| n.sticky));

        // Tras entregarlas, solo la sticky sobrevive al feed
        let remaining = notifications.list("cus-1").await;
        assert_eq!(remaining.len(), 1);
        assert!(remaining[0].sticky);
    }
}
