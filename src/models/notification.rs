//! Modelo de notificación
//!
//! Feed en memoria por usuario. Las notificaciones one-shot se descartan
//! tras entregarse; las sticky permanecen hasta que el usuario las cierra.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Notificación para un usuario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub user_id: String,
    pub title: String,
    pub body: String,
    /// Una notificación sticky no se auto-descarta al listarla
    pub sticky: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(user_id: &str, title: &str, body: &str, sticky: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            title: title.to_string(),
            body: body.to_string(),
            sticky,
            created_at: Utc::now(),
        }
    }
}
