//! Almacén en memoria
//!
//! Backing por defecto del trait de almacenamiento: un HashMap protegido
//! por RwLock. Los datos viven lo que vive el proceso.

use anyhow::Result;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use super::StoreOperations;

/// Almacén clave-valor en memoria
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Número de claves almacenadas (para diagnósticos)
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait::async_trait]
impl StoreOperations for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.read().await;
        match entries.get(key) {
            Some(value) => {
                debug!("📥 Store HIT para clave: {}", key);
                Ok(Some(value.clone()))
            }
            None => {
                debug!("❌ Store MISS para clave: {}", key);
                Ok(None)
            }
        }
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), value);
        debug!("💾 Store SET para clave: {}", key);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.write().await;
        let removed = entries.remove(key).is_some();
        debug!("🗑️ Store DELETE para clave: {} (existía: {})", key, removed);
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        let entries = self.entries.read().await;
        Ok(entries.contains_key(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_remove() {
        let store = MemoryStore::new();

        store.set("k1", "v1".to_string()).await.unwrap();
        assert_eq!(store.get("k1").await.unwrap(), Some("v1".to_string()));
        assert!(store.exists("k1").await.unwrap());

        store.remove("k1").await.unwrap();
        assert_eq!(store.get("k1").await.unwrap(), None);
        assert!(!store.exists("k1").await.unwrap());
    }

    #[tokio::test]
    async fn test_json_roundtrip() {
        let store = MemoryStore::new();

        crate::storage::set_json(&store, "nums", &vec![1u32, 2, 3])
            .await
            .unwrap();
        let loaded: Option<Vec<u32>> = crate::storage::get_json(&store, "nums").await.unwrap();
        assert_eq!(loaded, Some(vec![1, 2, 3]));
    }
}
