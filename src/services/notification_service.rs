//! Servicio de notificaciones
//!
//! Feed en memoria por usuario. Ocupa el lugar del push real (FCM o
//! similar): los clientes lo consultan por HTTP y las one-shot se
//! descartan al entregarse; las sticky esperan un cierre explícito.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::models::notification::Notification;
use crate::utils::errors::{AppError, AppResult};

pub struct NotificationService {
    feed: Arc<RwLock<HashMap<String, Vec<Notification>>>>,
}

impl NotificationService {
    pub fn new() -> Self {
        Self {
            feed: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Publicar una notificación para un usuario
    pub async fn push(&self, user_id: &str, title: &str, body: &str, sticky: bool) -> Notification {
        let notification = Notification::new(user_id, title, body, sticky);
        info!("🔔 Notificación para {}: {} - {}", user_id, title, body);

        let mut feed = self.feed.write().await;
        feed.entry(user_id.to_string())
            .or_default()
            .push(notification.clone());
        notification
    }

    /// Listar las notificaciones pendientes de un usuario.
    ///
    /// Entregar una notificación one-shot la descarta; las sticky
    /// permanecen hasta `dismiss`.
    pub async fn list(&self, user_id: &str) -> Vec<Notification> {
        let mut feed = self.feed.write().await;
        match feed.get_mut(user_id) {
            Some(items) => {
                let delivered = items.clone();
                items.retain(|n| n.sticky);
                delivered
            }
            None => Vec::new(),
        }
    }

    /// Cerrar explícitamente una notificación (necesario para las sticky)
    pub async fn dismiss(&self, user_id: &str, notification_id: Uuid) -> AppResult<()> {
        let mut feed = self.feed.write().await;
        let items = feed
            .get_mut(user_id)
            .ok_or_else(|| AppError::NotFound("Notification not found".to_string()))?;

        let before = items.len();
        items.retain(|n| n.id != notification_id);
        if items.len() == before {
            return Err(AppError::NotFound("Notification not found".to_string()));
        }
        Ok(())
    }

    /// Número de notificaciones pendientes (para tests y diagnósticos)
    pub async fn pending_count(&self, user_id: &str) -> usize {
        let feed = self.feed.read().await;
        feed.get(user_id).map(|v| v.len()).unwrap_or(0)
    }
}

impl Default for NotificationService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_one_shot_notifications_drain_on_list() {
        let service = NotificationService::new();
        service.push("u1", "Offers", "3 offers received", false).await;

        let first = service.list("u1").await;
        assert_eq!(first.len(), 1);
        let second = service.list("u1").await;
        assert!(second.is_empty());
    }

    #[tokio::test]
    async fn test_sticky_survives_until_dismissed() {
        let service = NotificationService::new();
        let sticky = service.push("u1", "Arrived", "Driver has arrived", true).await;

        assert_eq!(service.list("u1").await.len(), 1);
        assert_eq!(service.list("u1").await.len(), 1);

        service.dismiss("u1", sticky.id).await.unwrap();
        assert!(service.list("u1").await.is_empty());
    }

    #[tokio::test]
    async fn test_dismiss_unknown_notification_fails() {
        let service = NotificationService::new();
        let result = service.dismiss("u1", Uuid::new_v4()).await;
        assert!(result.is_err());
    }
}
