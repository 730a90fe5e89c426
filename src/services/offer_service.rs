//! Servicio de generación de ofertas
//!
//! Genera el lote de 3 ofertas simuladas para una solicitud. Los precios
//! son deterministas respecto al estimado (-10, -5, +15, en ese orden) y
//! los conductores salen de fixtures fijos; el matching real contra
//! conductores conectados queda fuera de este servicio.

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::offer::TruckOffer;
use crate::models::request::RequestDetails;

/// Desviaciones de precio respecto al estimado, en orden de generación
const OFFER_PRICE_DELTAS: [i64; 3] = [-10, -5, 15];

struct DriverFixture {
    driver_id: &'static str,
    driver_name: &'static str,
    distance_to_pickup_km: f64,
    rating: f32,
    estimated_arrival: &'static str,
}

const DRIVER_FIXTURES: [DriverFixture; 3] = [
    DriverFixture {
        driver_id: "drv-1001",
        driver_name: "Ahmed Al-Harbi",
        distance_to_pickup_km: 3.2,
        rating: 4.8,
        estimated_arrival: "15 min",
    },
    DriverFixture {
        driver_id: "drv-1002",
        driver_name: "Khalid Al-Otaibi",
        distance_to_pickup_km: 5.8,
        rating: 4.5,
        estimated_arrival: "25 min",
    },
    DriverFixture {
        driver_id: "drv-1003",
        driver_name: "Saleh Al-Qahtani",
        distance_to_pickup_km: 2.4,
        rating: 4.9,
        estimated_arrival: "10 min",
    },
];

pub struct OfferService;

impl OfferService {
    pub fn new() -> Self {
        Self
    }

    /// Generar el lote de ofertas para una solicitud finalizada.
    ///
    /// El tipo de camión de cada oferta es el de la solicitud por
    /// construcción.
    pub fn generate_offers(&self, request: &RequestDetails) -> Vec<TruckOffer> {
        let offers: Vec<TruckOffer> = DRIVER_FIXTURES
            .iter()
            .zip(OFFER_PRICE_DELTAS)
            .map(|(fixture, delta)| TruckOffer {
                id: Uuid::new_v4(),
                request_id: request.id,
                driver_id: fixture.driver_id.to_string(),
                driver_name: fixture.driver_name.to_string(),
                distance_to_pickup_km: fixture.distance_to_pickup_km,
                rating: fixture.rating,
                price: request.estimated_price + Decimal::from(delta),
                estimated_arrival: fixture.estimated_arrival.to_string(),
                truck_type_id: request.truck_type_id.clone(),
                created_at: Utc::now(),
            })
            .collect();

        log::info!(
            "📦 {} ofertas generadas para la solicitud {}",
            offers.len(),
            request.id
        );
        offers
    }
}

impl Default for OfferService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::request::RequestModifiers;

    fn request_with_price(price: i64) -> RequestDetails {
        RequestDetails {
            id: Uuid::new_v4(),
            customer_id: "cus-1".to_string(),
            truck_type_id: "refrigerated".to_string(),
            start_location: "Riyadh".to_string(),
            destination: "Jeddah".to_string(),
            map_location: None,
            distance_km: 11,
            modifiers: RequestModifiers::default(),
            estimated_price: Decimal::from(price),
            undiscounted_price: Decimal::from(price),
            coupon_applied: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_exactly_three_offers_with_deterministic_prices() {
        let service = OfferService::new();
        let request = request_with_price(154);
        let offers = service.generate_offers(&request);

        assert_eq!(offers.len(), 3);
        assert_eq!(offers[0].price, Decimal::from(144));
        assert_eq!(offers[1].price, Decimal::from(149));
        assert_eq!(offers[2].price, Decimal::from(169));
    }

    #[test]
    fn test_offers_inherit_truck_type_and_request_id() {
        let service = OfferService::new();
        let request = request_with_price(200);
        for offer in service.generate_offers(&request) {
            assert_eq!(offer.truck_type_id, request.truck_type_id);
            assert_eq!(offer.request_id, request.id);
            assert!((1.0..=5.0).contains(&offer.rating));
        }
    }
}
