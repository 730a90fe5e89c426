//! Servicio de descuentos por fidelidad
//!
//! El contador de pedidos completados es real y persistido en el almacén
//! (se incrementa cuando una entrega llega a destino), no un número
//! derivado del id del usuario. Umbral y porcentaje vienen de
//! configuración: nada de 7 en un sitio y 8 en otro.

use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::info;

use crate::models::discount::{CouponOutcome, DiscountState};
use crate::services::notification_service::NotificationService;
use crate::storage::{get_json, set_json, SharedStore, StoreKeys};
use crate::utils::errors::AppResult;

pub struct DiscountService {
    store: SharedStore,
    notifications: Arc<NotificationService>,
    threshold: u32,
    percent: u32,
}

impl DiscountService {
    pub fn new(
        store: SharedStore,
        notifications: Arc<NotificationService>,
        threshold: u32,
        percent: u32,
    ) -> Self {
        Self {
            store,
            notifications,
            threshold,
            percent,
        }
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    pub fn percent(&self) -> u32 {
        self.percent
    }

    /// Pedidos completados del cliente
    pub async fn completed_orders(&self, user_id: &str) -> AppResult<u32> {
        let count: Option<u32> =
            get_json(self.store.as_ref(), &StoreKeys::completed_orders(user_id)).await?;
        Ok(count.unwrap_or(0))
    }

    /// Registrar un pedido completado y devolver el nuevo total
    pub async fn record_completed_order(&self, user_id: &str) -> AppResult<u32> {
        let next = self.completed_orders(user_id).await? + 1;
        set_json(
            self.store.as_ref(),
            &StoreKeys::completed_orders(user_id),
            &next,
        )
        .await?;
        info!("📈 Pedidos completados de {}: {}", user_id, next);
        Ok(next)
    }

    /// Sembrar un contador inicial (solo si no existe - datos demo)
    pub async fn seed_completed_orders(&self, user_id: &str, count: u32) -> AppResult<()> {
        let key = StoreKeys::completed_orders(user_id);
        if !self.store.exists(&key).await? {
            set_json(self.store.as_ref(), &key, &count).await?;
        }
        Ok(())
    }

    pub async fn coupon_applied(&self, user_id: &str) -> AppResult<bool> {
        let applied: Option<bool> =
            get_json(self.store.as_ref(), &StoreKeys::coupon_applied(user_id)).await?;
        Ok(applied.unwrap_or(false))
    }

    /// Estado de descuento completo del cliente
    pub async fn state(&self, user_id: &str) -> AppResult<DiscountState> {
        let completed_orders = self.completed_orders(user_id).await?;
        Ok(DiscountState {
            completed_orders,
            has_discount: completed_orders >= self.threshold,
            coupon_applied: self.coupon_applied(user_id).await?,
            threshold: self.threshold,
            percent: self.percent,
        })
    }

    /// Fracción de descuento efectiva para calcular precios
    /// (percent/100 con cupón aplicado, 0 en caso contrario)
    pub async fn discount_fraction(&self, user_id: &str) -> AppResult<Decimal> {
        if self.coupon_applied(user_id).await? {
            Ok(Decimal::from(self.percent) / Decimal::from(100u32))
        } else {
            Ok(Decimal::ZERO)
        }
    }

    /// Intentar aplicar el cupón de cliente recurrente.
    ///
    /// Idempotente tras la primera aplicación: repetir solo produce el
    /// aviso de "ya aplicado".
    pub async fn apply_coupon(&self, user_id: &str) -> AppResult<CouponOutcome> {
        let state = self.state(user_id).await?;

        if state.coupon_applied {
            self.notifications
                .push(
                    user_id,
                    "Coupon already applied",
                    &format!("Your {}% discount is already active", self.percent),
                    false,
                )
                .await;
            return Ok(CouponOutcome::AlreadyApplied);
        }

        if !state.has_discount {
            self.notifications
                .push(
                    user_id,
                    "Coupon not available yet",
                    &format!(
                        "Complete more orders to unlock the discount ({}/{})",
                        state.completed_orders, self.threshold
                    ),
                    false,
                )
                .await;
            return Ok(CouponOutcome::NotEligible {
                completed_orders: state.completed_orders,
                threshold: self.threshold,
            });
        }

        set_json(
            self.store.as_ref(),
            &StoreKeys::coupon_applied(user_id),
            &true,
        )
        .await?;
        info!("🎟️ Cupón aplicado para {}", user_id);
        self.notifications
            .push(
                user_id,
                "Coupon applied",
                &format!("A {}% discount will be applied to your next request", self.percent),
                false,
            )
            .await;
        Ok(CouponOutcome::Applied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn service() -> DiscountService {
        let store: SharedStore = Arc::new(MemoryStore::new());
        DiscountService::new(store, Arc::new(NotificationService::new()), 7, 15)
    }

    #[tokio::test]
    async fn test_counter_starts_at_zero_and_increments() {
        let service = service();
        assert_eq!(service.completed_orders("u1").await.unwrap(), 0);
        assert_eq!(service.record_completed_order("u1").await.unwrap(), 1);
        assert_eq!(service.record_completed_order("u1").await.unwrap(), 2);
        assert_eq!(service.completed_orders("u1").await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_seed_does_not_overwrite() {
        let service = service();
        service.seed_completed_orders("u1", 8).await.unwrap();
        assert_eq!(service.completed_orders("u1").await.unwrap(), 8);
        service.seed_completed_orders("u1", 3).await.unwrap();
        assert_eq!(service.completed_orders("u1").await.unwrap(), 8);
    }

    #[tokio::test]
    async fn test_coupon_requires_threshold() {
        let service = service();
        let outcome = service.apply_coupon("u1").await.unwrap();
        assert_eq!(
            outcome,
            CouponOutcome::NotEligible {
                completed_orders: 0,
                threshold: 7
            }
        );
        assert!(!service.coupon_applied("u1").await.unwrap());
    }

    #[tokio::test]
    async fn test_coupon_application_is_idempotent() {
        let service = service();
        service.seed_completed_orders("u1", 7).await.unwrap();

        assert_eq!(
            service.apply_coupon("u1").await.unwrap(),
            CouponOutcome::Applied
        );
        assert!(service.coupon_applied("u1").await.unwrap());

        // Segunda aplicación: aviso, sin cambio de estado
        assert_eq!(
            service.apply_coupon("u1").await.unwrap(),
            CouponOutcome::AlreadyApplied
        );
        assert!(service.coupon_applied("u1").await.unwrap());
    }

    #[tokio::test]
    async fn test_discount_fraction() {
        let service = service();
        assert_eq!(
            service.discount_fraction("u1").await.unwrap(),
            Decimal::ZERO
        );

        service.seed_completed_orders("u1", 9).await.unwrap();
        service.apply_coupon("u1").await.unwrap();
        assert_eq!(
            service.discount_fraction("u1").await.unwrap(),
            Decimal::new(15, 2)
        );
    }
}
