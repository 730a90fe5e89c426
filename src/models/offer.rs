//! Modelo de oferta de conductor
//!
//! Las ofertas se generan en lote (3 por solicitud) y no se mutan:
//! se aceptan por id o se descartan cuando llega una solicitud nueva.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Oferta de un conductor para una solicitud
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TruckOffer {
    pub id: Uuid,
    pub request_id: Uuid,
    pub driver_id: String,
    pub driver_name: String,
    /// Distancia del conductor al punto de recogida
    pub distance_to_pickup_km: f64,
    /// Valoración media del conductor (1-5)
    pub rating: f32,
    /// Precio ofertado - puede divergir del estimado
    pub price: Decimal,
    pub estimated_arrival: String,
    pub truck_type_id: String,
    pub created_at: DateTime<Utc>,
}
