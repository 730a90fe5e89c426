//! Modelo de tipo de camión
//!
//! Catálogo estático de referencia: se construye al arrancar y nunca se
//! muta. Cada tipo lleva su modo de tarificación y tarifa base en
//! unidades enteras de moneda (SAR).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Modo de tarificación - determina cómo se combina la tarifa base
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingMode {
    PerDistance,
    PerDay,
    PerTrip,
    PerService,
}

/// Tarifa base por defecto para ids desconocidos (por unidad de distancia)
pub const DEFAULT_BASE_RATE: u32 = 100;

/// Tipo de camión del catálogo
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TruckType {
    pub id: String,
    pub name_en: String,
    pub name_ar: String,
    pub pricing_mode: PricingMode,
    pub base_rate: Decimal,
    /// Solo para per-trip: tarifa por km por encima del umbral libre
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overage_rate: Option<Decimal>,
    /// Solo para per-trip: kms incluidos en la tarifa fija
    #[serde(skip_serializing_if = "Option::is_none")]
    pub free_km: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TruckType {
    fn new(
        id: &str,
        name_en: &str,
        name_ar: &str,
        pricing_mode: PricingMode,
        base_rate: u32,
    ) -> Self {
        Self {
            id: id.to_string(),
            name_en: name_en.to_string(),
            name_ar: name_ar.to_string(),
            pricing_mode,
            base_rate: Decimal::from(base_rate),
            overage_rate: None,
            free_km: None,
            description: None,
        }
    }

    fn with_overage(mut self, overage_rate: u32, free_km: u32) -> Self {
        self.overage_rate = Some(Decimal::from(overage_rate));
        self.free_km = Some(Decimal::from(free_km));
        self
    }

    fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }
}

/// Catálogo por defecto del marketplace
pub fn default_catalog() -> Vec<TruckType> {
    vec![
        TruckType::new(
            "refrigerated",
            "Refrigerated Truck",
            "شاحنة مبردة",
            PricingMode::PerDistance,
            14,
        )
        .with_description("Temperature-controlled transport for perishables"),
        TruckType::new(
            "freezer",
            "Freezer Truck",
            "شاحنة تجميد",
            PricingMode::PerDistance,
            16,
        )
        .with_description("Deep-freeze transport down to -18C"),
        TruckType::new(
            "flatbed",
            "Flatbed Truck",
            "شاحنة مسطحة",
            PricingMode::PerDistance,
            12,
        ),
        TruckType::new(
            "lowbed",
            "Lowbed Transport",
            "لوبد نقل معدات",
            PricingMode::PerTrip,
            500,
        )
        .with_overage(8, 10)
        .with_description("Fixed-fee equipment transport, overage billed per km"),
        TruckType::new(
            "excavator",
            "Excavator",
            "حفارة",
            PricingMode::PerDay,
            350,
        ),
        TruckType::new(
            "crane",
            "Mobile Crane",
            "رافعة متنقلة",
            PricingMode::PerDay,
            420,
        ),
        TruckType::new(
            "loading_crew",
            "Loading Crew",
            "عمال تحميل",
            PricingMode::PerService,
            250,
        )
        .with_description("Flat-rate loading and unloading service"),
    ]
}
