use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::truck_type::{PricingMode, TruckType};

/// Response de tipo de camión para la API
#[derive(Debug, Serialize)]
pub struct TruckTypeResponse {
    pub id: String,
    pub name_en: String,
    pub name_ar: String,
    pub pricing_mode: PricingMode,
    pub base_rate: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overage_rate: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub free_km: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<&TruckType> for TruckTypeResponse {
    fn from(truck_type: &TruckType) -> Self {
        Self {
            id: truck_type.id.clone(),
            name_en: truck_type.name_en.clone(),
            name_ar: truck_type.name_ar.clone(),
            pricing_mode: truck_type.pricing_mode,
            base_rate: truck_type.base_rate,
            overage_rate: truck_type.overage_rate,
            free_km: truck_type.free_km,
            description: truck_type.description.clone(),
        }
    }
}
