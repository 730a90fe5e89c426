use serde::Serialize;

use crate::models::tracking::{DriverStatus, TrackingState};

/// Estado de tracking para la API
#[derive(Debug, Serialize)]
pub struct TrackingResponse {
    pub order_number: String,
    pub distance_km: f64,
    pub rotation: f64,
    pub status: DriverStatus,
    pub status_label: &'static str,
    pub estimated_minutes: u32,
    pub completed: bool,
}

impl From<TrackingState> for TrackingResponse {
    fn from(state: TrackingState) -> Self {
        Self {
            order_number: state.order_number,
            distance_km: state.distance_km,
            rotation: state.rotation,
            status: state.status,
            status_label: state.status.label(),
            estimated_minutes: state.estimated_minutes,
            completed: state.completed,
        }
    }
}
