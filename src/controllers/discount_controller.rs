use std::sync::Arc;

use crate::dto::discount_dto::{CouponResponse, DiscountStatusResponse};
use crate::models::discount::CouponOutcome;
use crate::models::user::User;
use crate::services::discount_service::DiscountService;
use crate::utils::errors::AppError;

pub struct DiscountController {
    discount: Arc<DiscountService>,
}

impl DiscountController {
    pub fn new(discount: Arc<DiscountService>) -> Self {
        Self { discount }
    }

    pub async fn status(&self, user: &User) -> Result<DiscountStatusResponse, AppError> {
        let state = self.discount.state(&user.id).await?;
        Ok(state.into())
    }

    pub async fn apply_coupon(&self, user: &User) -> Result<CouponResponse, AppError> {
        let outcome = self.discount.apply_coupon(&user.id).await?;
        let coupon_applied = matches!(
            outcome,
            CouponOutcome::Applied | CouponOutcome::AlreadyApplied
        );
        Ok(CouponResponse {
            outcome,
            coupon_applied,
        })
    }
}
