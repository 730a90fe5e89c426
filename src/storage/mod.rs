//! Almacenamiento clave-valor
//!
//! Este módulo define la abstracción de almacenamiento inyectable.
//! El cliente (web) persistía estos datos en localStorage; aquí el mismo
//! contrato get/set/remove vive detrás de un trait para poder cambiar el
//! backing por una persistencia real sin tocar los servicios.

pub mod memory_store;

use anyhow::Result;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;

pub use memory_store::MemoryStore;

/// Operaciones del almacén clave-valor
#[async_trait::async_trait]
pub trait StoreOperations: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn set(&self, key: &str, value: String) -> Result<()>;
    async fn remove(&self, key: &str) -> Result<()>;
    async fn exists(&self, key: &str) -> Result<bool>;
}

/// Almacén compartido entre servicios
pub type SharedStore = Arc<dyn StoreOperations>;

/// Leer un valor JSON tipado del almacén
pub async fn get_json<T: DeserializeOwned>(
    store: &dyn StoreOperations,
    key: &str,
) -> Result<Option<T>> {
    match store.get(key).await? {
        Some(raw) => {
            let deserialized: T = serde_json::from_str(&raw)?;
            Ok(Some(deserialized))
        }
        None => Ok(None),
    }
}

/// Guardar un valor JSON tipado en el almacén
pub async fn set_json<T: Serialize + Sync>(
    store: &dyn StoreOperations,
    key: &str,
    value: &T,
) -> Result<()> {
    let serialized = serde_json::to_string(value)?;
    store.set(key, serialized).await
}

/// Claves del almacén (el "schema" de facto heredado del cliente web)
pub struct StoreKeys;

impl StoreKeys {
    fn make_key(prefix: &str, identifier: &str) -> String {
        format!("truck_marketplace:{}:{}", prefix, identifier)
    }

    pub fn chat_messages(chat_id: &str) -> String {
        Self::make_key("chat_messages", chat_id)
    }

    pub fn chat_payment_method(chat_id: &str) -> String {
        Self::make_key("chat_payment_method", chat_id)
    }

    pub fn completed_orders(user_id: &str) -> String {
        Self::make_key("completed_orders", user_id)
    }

    pub fn coupon_applied(user_id: &str) -> String {
        Self::make_key("coupon_applied", user_id)
    }

    pub fn last_activity(user_id: &str) -> String {
        Self::make_key("last_activity", user_id)
    }

    pub fn last_order_number() -> String {
        "truck_marketplace:last_order_number".to_string()
    }

    pub fn remembered_email() -> String {
        "truck_marketplace:remembered_email".to_string()
    }
}
