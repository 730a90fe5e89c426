//! Modelo de descuento por fidelidad

use serde::{Deserialize, Serialize};

/// Estado de descuento de un cliente
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscountState {
    pub completed_orders: u32,
    pub has_discount: bool,
    pub coupon_applied: bool,
    /// Pedidos completados necesarios para el cupón
    pub threshold: u32,
    /// Porcentaje de descuento vigente
    pub percent: u32,
}

/// Resultado de intentar aplicar el cupón
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum CouponOutcome {
    Applied,
    AlreadyApplied,
    NotEligible { completed_orders: u32, threshold: u32 },
}
