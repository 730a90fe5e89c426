use serde::Serialize;

use crate::models::discount::{CouponOutcome, DiscountState};

/// Estado de descuento del cliente para la API
#[derive(Debug, Serialize)]
pub struct DiscountStatusResponse {
    pub completed_orders: u32,
    pub has_discount: bool,
    pub coupon_applied: bool,
    pub threshold: u32,
    pub percent: u32,
}

impl From<DiscountState> for DiscountStatusResponse {
    fn from(state: DiscountState) -> Self {
        Self {
            completed_orders: state.completed_orders,
            has_discount: state.has_discount,
            coupon_applied: state.coupon_applied,
            threshold: state.threshold,
            percent: state.percent,
        }
    }
}

/// Resultado de aplicar el cupón
#[derive(Debug, Serialize)]
pub struct CouponResponse {
    #[serde(flatten)]
    pub outcome: CouponOutcome,
    pub coupon_applied: bool,
}
