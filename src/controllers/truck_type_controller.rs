use std::sync::Arc;

use crate::dto::truck_type_dto::TruckTypeResponse;
use crate::services::pricing_service::PricingService;
use crate::utils::errors::AppError;

pub struct TruckTypeController {
    pricing: Arc<PricingService>,
}

impl TruckTypeController {
    pub fn new(pricing: Arc<PricingService>) -> Self {
        Self { pricing }
    }

    pub fn list(&self) -> Vec<TruckTypeResponse> {
        self.pricing
            .truck_types()
            .into_iter()
            .map(TruckTypeResponse::from)
            .collect()
    }

    pub fn get_by_id(&self, id: &str) -> Result<TruckTypeResponse, AppError> {
        self.pricing
            .find(id)
            .map(TruckTypeResponse::from)
            .ok_or_else(|| AppError::NotFound(format!("Truck type '{}' not found", id)))
    }
}
