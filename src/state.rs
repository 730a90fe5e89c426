//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum: configuración, almacén clave-valor y
//! los servicios del marketplace.

use std::sync::Arc;
use tracing::info;

use crate::config::environment::EnvironmentConfig;
use crate::services::auth_service::AuthService;
use crate::services::chat_service::ChatService;
use crate::services::discount_service::DiscountService;
use crate::services::distance_service::DistanceService;
use crate::services::jwt_service::JwtService;
use crate::services::notification_service::NotificationService;
use crate::services::offer_service::OfferService;
use crate::services::order_service::OrderService;
use crate::services::pricing_service::PricingService;
use crate::services::tracking_service::TrackingService;
use crate::services::workflow_service::WorkflowService;
use crate::storage::{MemoryStore, SharedStore};

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub store: SharedStore,
    pub auth: Arc<AuthService>,
    pub pricing: Arc<PricingService>,
    pub distance: Arc<DistanceService>,
    pub discount: Arc<DiscountService>,
    pub notifications: Arc<NotificationService>,
    pub orders: Arc<OrderService>,
    pub tracking: Arc<TrackingService>,
    pub chat: Arc<ChatService>,
    pub workflow: Arc<WorkflowService>,
}

impl AppState {
    pub fn new(config: EnvironmentConfig) -> Self {
        let store: SharedStore = Arc::new(MemoryStore::new());

        let jwt_service = JwtService::new(&config.jwt_secret, config.jwt_expiration_hours);
        let auth = Arc::new(AuthService::new(jwt_service, store.clone()));

        let pricing = Arc::new(PricingService::new());
        let distance = Arc::new(DistanceService::new());
        let notifications = Arc::new(NotificationService::new());
        let discount = Arc::new(DiscountService::new(
            store.clone(),
            notifications.clone(),
            config.discount_threshold,
            config.discount_percent,
        ));
        let orders = Arc::new(OrderService::new(store.clone()));
        let tracking = Arc::new(TrackingService::new(
            orders.clone(),
            discount.clone(),
            notifications.clone(),
            config.tracking_tick(),
            config.tracking_rotation(),
        ));
        let chat = Arc::new(ChatService::new(store.clone(), notifications.clone()));
        let workflow = Arc::new(WorkflowService::new(
            pricing.clone(),
            distance.clone(),
            discount.clone(),
            Arc::new(OfferService::new()),
            orders.clone(),
            tracking.clone(),
            notifications.clone(),
            config.submit_delay(),
            config.offer_delay(),
            config.accept_delay(),
        ));

        Self {
            config,
            store,
            auth,
            pricing,
            distance,
            discount,
            notifications,
            orders,
            tracking,
            chat,
            workflow,
        }
    }

    /// Sembrar datos demo (usuarios y contadores de fidelidad) en
    /// entornos de desarrollo
    pub async fn seed_demo_data(&self) -> anyhow::Result<()> {
        let seeded = self.auth.seed_demo_users().await;
        for user in &seeded {
            if user.role == crate::models::user::UserRole::Customer {
                // El cliente demo ya supera el umbral para poder probar
                // el cupón sin completar pedidos
                self.discount
                    .seed_completed_orders(&user.id, self.config.discount_threshold)
                    .await?;
            }
        }
        info!("🌱 Datos demo sembrados");
        Ok(())
    }
}
