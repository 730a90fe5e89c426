use std::sync::Arc;
use uuid::Uuid;

use crate::dto::tracking_dto::TrackingResponse;
use crate::models::user::User;
use crate::services::order_service::OrderService;
use crate::services::tracking_service::TrackingService;
use crate::utils::errors::AppError;

pub struct TrackingController {
    tracking: Arc<TrackingService>,
    orders: Arc<OrderService>,
}

impl TrackingController {
    pub fn new(tracking: Arc<TrackingService>, orders: Arc<OrderService>) -> Self {
        Self { tracking, orders }
    }

    /// Estado de tracking de un pedido, comprobando que el usuario
    /// puede ver ese pedido
    pub async fn get(&self, order_id: Uuid, user: &User) -> Result<TrackingResponse, AppError> {
        // La autorización por rol vive en el servicio de pedidos
        self.orders.get_for_user(order_id, user).await?;

        let state = self.tracking.get(order_id).await.ok_or_else(|| {
            AppError::NotFound("No tracking in progress for this order".to_string())
        })?;
        Ok(state.into())
    }
}
