//! Modelo de solicitud de transporte
//!
//! Una RequestDetails se congela al enviarse el formulario: de ahí en
//! adelante es de solo lectura hasta que una nueva solicitud la sustituye.
//! Cada sesión de cliente tiene como máximo una solicitud activa.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Punto seleccionado en el mapa
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MapLocation {
    pub lat: f64,
    pub lng: f64,
}

/// Tamaño de camión solicitado
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TruckSize {
    Small,
    Medium,
    Large,
}

/// Cabezal de la excavadora
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExcavatorHeadType {
    Bucket,
    Hammer,
}

/// Modalidad de entrega para camión plano
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlatbedDeliveryOption {
    SingleDropoff,
    MultipleDropoffs,
}

/// Modalidad de frío para camión refrigerado
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefrigeratedOption {
    Chilled,
    Frozen,
}

/// Modificadores opcionales de la solicitud
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestModifiers {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_selected: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub truck_size: Option<TruckSize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excavator_head_type: Option<ExcavatorHeadType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flatbed_delivery_option: Option<FlatbedDeliveryOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refrigerated_option: Option<RefrigeratedOption>,
}

/// Solicitud de transporte finalizada
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestDetails {
    pub id: Uuid,
    pub customer_id: String,
    pub truck_type_id: String,
    pub start_location: String,
    pub destination: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map_location: Option<MapLocation>,
    pub distance_km: u32,
    pub modifiers: RequestModifiers,
    /// Precio estimado neto (con descuento aplicado si había cupón)
    pub estimated_price: Decimal,
    /// Precio estimado bruto, sin descuento
    pub undiscounted_price: Decimal,
    pub coupon_applied: bool,
    pub created_at: DateTime<Utc>,
}

/// Etapa del workflow de solicitud/oferta de cada cliente
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStage {
    Idle,
    CollectingVehicle,
    CollectingLocation,
    CollectingTripDetails,
    Submitted,
    OffersReceived,
    OfferAccepted,
    Tracking,
}

/// Borrador que se va completando durante los pasos del formulario
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestDraft {
    pub truck_type_id: Option<String>,
    pub start_location: String,
    pub destination: String,
    pub map_location: Option<MapLocation>,
    pub modifiers: RequestModifiers,
}
