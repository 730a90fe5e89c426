//! Servicio de tarificación
//!
//! Catálogo de tipos de camión más la calculadora de precio estimado.
//! Función pura de sus entradas: el estado de descuento entra como
//! fracción ya resuelta por el servicio de descuentos.

use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::HashMap;
use tracing::warn;

use crate::models::request::RequestModifiers;
use crate::models::truck_type::{default_catalog, PricingMode, TruckType, DEFAULT_BASE_RATE};

/// Precio estimado de una solicitud
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceEstimate {
    /// Importe bruto, sin descuento
    pub undiscounted: Decimal,
    /// Importe final con el descuento aplicado (igual al bruto sin cupón)
    pub total: Decimal,
}

pub struct PricingService {
    catalog: HashMap<String, TruckType>,
    ordered_ids: Vec<String>,
}

impl PricingService {
    pub fn new() -> Self {
        let types = default_catalog();
        let ordered_ids = types.iter().map(|t| t.id.clone()).collect();
        let catalog = types.into_iter().map(|t| (t.id.clone(), t)).collect();
        Self {
            catalog,
            ordered_ids,
        }
    }

    /// Listado del catálogo en orden estable
    pub fn truck_types(&self) -> Vec<&TruckType> {
        self.ordered_ids
            .iter()
            .filter_map(|id| self.catalog.get(id))
            .collect()
    }

    pub fn find(&self, truck_type_id: &str) -> Option<&TruckType> {
        self.catalog.get(truck_type_id)
    }

    /// Calcular el precio estimado.
    ///
    /// `discount_fraction` es 0 sin cupón, o percent/100 con cupón aplicado.
    /// El redondeo a unidad entera de moneda se hace una sola vez al final
    /// (mitad hacia afuera).
    pub fn estimate_price(
        &self,
        truck_type_id: &str,
        distance_km: u32,
        modifiers: &RequestModifiers,
        discount_fraction: Decimal,
    ) -> PriceEstimate {
        let distance = Decimal::from(distance_km);
        let days = Decimal::from(modifiers.days_selected.unwrap_or(1).max(1));

        let raw = match self.catalog.get(truck_type_id) {
            Some(truck_type) => match truck_type.pricing_mode {
                PricingMode::PerDistance => truck_type.base_rate * distance,
                PricingMode::PerDay => truck_type.base_rate * days,
                PricingMode::PerTrip => {
                    let free_km = truck_type.free_km.unwrap_or(Decimal::ZERO);
                    let overage_rate = truck_type.overage_rate.unwrap_or(Decimal::ZERO);
                    let overage_km = (distance - free_km).max(Decimal::ZERO);
                    truck_type.base_rate + round_to_unit(overage_rate * overage_km)
                }
                PricingMode::PerService => truck_type.base_rate,
            },
            None => {
                // Ids desconocidos degradan a la tarifa base por defecto
                warn!("⚠️ Tipo de camión desconocido '{}', usando tarifa por defecto", truck_type_id);
                Decimal::from(DEFAULT_BASE_RATE) * distance
            }
        };

        let undiscounted = round_to_unit(raw);
        let total = round_to_unit(raw * (Decimal::ONE - discount_fraction));

        PriceEstimate { undiscounted, total }
    }
}

impl Default for PricingService {
    fn default() -> Self {
        Self::new()
    }
}

/// Redondear a la unidad entera de moneda (mitad hacia afuera)
fn round_to_unit(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_modifiers() -> RequestModifiers {
        RequestModifiers::default()
    }

    fn fraction(percent: u32) -> Decimal {
        Decimal::from(percent) / Decimal::from(100u32)
    }

    #[test]
    fn test_per_distance_price() {
        let service = PricingService::new();
        let estimate = service.estimate_price("refrigerated", 11, &no_modifiers(), Decimal::ZERO);
        assert_eq!(estimate.total, Decimal::from(154));
        assert_eq!(estimate.undiscounted, Decimal::from(154));
    }

    #[test]
    fn test_spec_example_with_discount() {
        // refrigerated a 14/km, distancia 11 -> 154; con 15% -> 131
        let service = PricingService::new();
        let estimate = service.estimate_price("refrigerated", 11, &no_modifiers(), fraction(15));
        assert_eq!(estimate.undiscounted, Decimal::from(154));
        assert_eq!(estimate.total, Decimal::from(131));
    }

    #[test]
    fn test_per_day_price_uses_days() {
        let service = PricingService::new();
        let modifiers = RequestModifiers {
            days_selected: Some(3),
            ..Default::default()
        };
        let estimate = service.estimate_price("excavator", 5, &modifiers, Decimal::ZERO);
        assert_eq!(estimate.total, Decimal::from(1050));

        // Sin días seleccionados degrada a 1 día
        let estimate = service.estimate_price("excavator", 5, &no_modifiers(), Decimal::ZERO);
        assert_eq!(estimate.total, Decimal::from(350));
    }

    #[test]
    fn test_per_trip_price_with_overage() {
        let service = PricingService::new();
        // Dentro del umbral libre: solo tarifa fija
        let estimate = service.estimate_price("lowbed", 8, &no_modifiers(), Decimal::ZERO);
        assert_eq!(estimate.total, Decimal::from(500));

        // Por encima del umbral: 500 + 8 x (20 - 10) = 580
        let estimate = service.estimate_price("lowbed", 20, &no_modifiers(), Decimal::ZERO);
        assert_eq!(estimate.total, Decimal::from(580));
    }

    #[test]
    fn test_per_service_price_ignores_distance() {
        let service = PricingService::new();
        let near = service.estimate_price("loading_crew", 1, &no_modifiers(), Decimal::ZERO);
        let far = service.estimate_price("loading_crew", 20, &no_modifiers(), Decimal::ZERO);
        assert_eq!(near.total, far.total);
        assert_eq!(near.total, Decimal::from(250));
    }

    #[test]
    fn test_unknown_type_falls_back_to_default_rate() {
        let service = PricingService::new();
        let estimate = service.estimate_price("hovercraft", 3, &no_modifiers(), Decimal::ZERO);
        assert_eq!(estimate.total, Decimal::from(300));
    }

    #[test]
    fn test_price_monotonic_in_distance() {
        let service = PricingService::new();
        for truck_type in ["refrigerated", "flatbed", "lowbed", "hovercraft"] {
            let mut previous = Decimal::MIN;
            for distance in 1..=20 {
                let estimate =
                    service.estimate_price(truck_type, distance, &no_modifiers(), fraction(15));
                assert!(
                    estimate.total >= previous,
                    "precio no monótono para {} en distancia {}",
                    truck_type,
                    distance
                );
                previous = estimate.total;
            }
        }
    }

    #[test]
    fn test_price_monotonic_in_days() {
        let service = PricingService::new();
        let mut previous = Decimal::MIN;
        for days in 1..=14 {
            let modifiers = RequestModifiers {
                days_selected: Some(days),
                ..Default::default()
            };
            let estimate = service.estimate_price("crane", 5, &modifiers, Decimal::ZERO);
            assert!(estimate.total >= previous);
            previous = estimate.total;
        }
    }

    #[test]
    fn test_discount_reduces_by_exact_fraction() {
        let service = PricingService::new();
        let gross = service.estimate_price("freezer", 10, &no_modifiers(), Decimal::ZERO);
        let net = service.estimate_price("freezer", 10, &no_modifiers(), fraction(18));
        // 160 * 0.82 = 131.2 -> 131
        assert_eq!(gross.total, Decimal::from(160));
        assert_eq!(net.total, Decimal::from(131));
    }

    #[test]
    fn test_catalog_listing_is_stable() {
        let service = PricingService::new();
        let first: Vec<_> = service.truck_types().iter().map(|t| t.id.clone()).collect();
        let second: Vec<_> = service.truck_types().iter().map(|t| t.id.clone()).collect();
        assert_eq!(first, second);
        assert!(first.contains(&"refrigerated".to_string()));
    }
}
