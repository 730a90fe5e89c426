use std::sync::Arc;
use uuid::Uuid;

use crate::models::notification::Notification;
use crate::models::user::User;
use crate::services::notification_service::NotificationService;
use crate::utils::errors::AppError;

pub struct NotificationController {
    notifications: Arc<NotificationService>,
}

impl NotificationController {
    pub fn new(notifications: Arc<NotificationService>) -> Self {
        Self { notifications }
    }

    pub async fn list(&self, user: &User) -> Vec<Notification> {
        self.notifications.list(&user.id).await
    }

    pub async fn dismiss(&self, user: &User, notification_id: Uuid) -> Result<(), AppError> {
        self.notifications.dismiss(&user.id, notification_id).await
    }
}
