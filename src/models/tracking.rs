//! Modelo de tracking simulado
//!
//! Estado de la aproximación del camión: distancia que decrece por ticks,
//! rotación del marcador y etiqueta de estado del conductor que avanza al
//! cruzar cada umbral de distancia.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Umbrales de distancia (km) que disparan notificaciones de estado,
/// en orden de cruce descendente. El último es sticky.
pub const STATUS_THRESHOLDS_KM: [f64; 4] = [2.0, 1.0, 0.5, 0.1];

/// Estado del conductor visible para el cliente
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriverStatus {
    EnRoute,
    Approaching,
    Nearby,
    AlmostThere,
    Arrived,
}

impl DriverStatus {
    /// Etiqueta mostrada al cliente
    pub fn label(&self) -> &'static str {
        match self {
            DriverStatus::EnRoute => "Driver is on the way",
            DriverStatus::Approaching => "Driver is approaching",
            DriverStatus::Nearby => "Driver is nearby",
            DriverStatus::AlmostThere => "Driver is almost there",
            DriverStatus::Arrived => "Driver has arrived",
        }
    }

    /// Estado que corresponde al umbral i-ésimo de STATUS_THRESHOLDS_KM
    pub fn for_threshold(index: usize) -> DriverStatus {
        match index {
            0 => DriverStatus::Approaching,
            1 => DriverStatus::Nearby,
            2 => DriverStatus::AlmostThere,
            _ => DriverStatus::Arrived,
        }
    }
}

/// Estado de la simulación de un pedido
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackingState {
    pub order_number: String,
    pub distance_km: f64,
    /// Rotación del marcador en grados (solo animación)
    pub rotation: f64,
    pub status: DriverStatus,
    pub estimated_minutes: u32,
    pub completed: bool,
    #[serde(skip)]
    pub fired_thresholds: [bool; 4],
    pub updated_at: DateTime<Utc>,
}

impl TrackingState {
    pub fn new(order_number: &str, distance_km: f64) -> Self {
        Self {
            order_number: order_number.to_string(),
            distance_km,
            rotation: 0.0,
            status: DriverStatus::EnRoute,
            estimated_minutes: estimated_minutes(distance_km),
            completed: false,
            fired_thresholds: [false; 4],
            updated_at: Utc::now(),
        }
    }
}

/// Minutos estimados de llegada derivados de la distancia
pub fn estimated_minutes(distance_km: f64) -> u32 {
    ((distance_km * 5.0).floor() as u32).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimated_minutes() {
        assert_eq!(estimated_minutes(11.0), 55);
        assert_eq!(estimated_minutes(0.3), 1);
        assert_eq!(estimated_minutes(0.0), 1);
        assert_eq!(estimated_minutes(1.9), 9);
    }

    #[test]
    fn test_threshold_status_order() {
        assert_eq!(DriverStatus::for_threshold(0), DriverStatus::Approaching);
        assert_eq!(DriverStatus::for_threshold(3), DriverStatus::Arrived);
    }
}
