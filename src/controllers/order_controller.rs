use std::sync::Arc;
use uuid::Uuid;

use crate::dto::order_dto::OrderResponse;
use crate::models::user::User;
use crate::services::order_service::OrderService;
use crate::utils::errors::AppError;

pub struct OrderController {
    orders: Arc<OrderService>,
}

impl OrderController {
    pub fn new(orders: Arc<OrderService>) -> Self {
        Self { orders }
    }

    pub async fn list(&self, user: &User) -> Vec<OrderResponse> {
        self.orders
            .list_for_user(user)
            .await
            .into_iter()
            .map(OrderResponse::from)
            .collect()
    }

    pub async fn get_by_id(&self, order_id: Uuid, user: &User) -> Result<OrderResponse, AppError> {
        let order = self.orders.get_for_user(order_id, user).await?;
        Ok(order.into())
    }
}
