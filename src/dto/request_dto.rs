use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::offer::TruckOffer;
use crate::models::request::{
    MapLocation, RequestDetails, RequestDraft, RequestModifiers, WorkflowStage,
};
use crate::services::workflow_service::WorkflowSnapshot;

/// Paso 1: selección de vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct SelectVehicleRequest {
    #[validate(length(min = 1, max = 50))]
    pub truck_type_id: String,

    #[serde(default)]
    pub modifiers: Option<RequestModifiers>,
}

/// Paso 2: ubicaciones
#[derive(Debug, Deserialize)]
pub struct SetLocationsRequest {
    #[serde(default)]
    pub start_location: String,
    #[serde(default)]
    pub destination: String,
    #[serde(default)]
    pub map_location: Option<MapLocation>,
}

/// Paso 3: detalles del viaje y envío
#[derive(Debug, Deserialize)]
pub struct SubmitRequestBody {
    #[serde(default)]
    pub modifiers: Option<RequestModifiers>,
}

/// Estado del workflow para el cliente
#[derive(Debug, Serialize)]
pub struct WorkflowStatusResponse {
    pub stage: WorkflowStage,
    pub draft: RequestDraft,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request: Option<RequestDetails>,
    pub offers: Vec<TruckOffer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accepted_offer_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<Uuid>,
}

impl From<WorkflowSnapshot> for WorkflowStatusResponse {
    fn from(snapshot: WorkflowSnapshot) -> Self {
        Self {
            stage: snapshot.stage,
            draft: snapshot.draft,
            request: snapshot.request,
            offers: snapshot.offers,
            accepted_offer_id: snapshot.accepted_offer_id,
            order_id: snapshot.order_id,
        }
    }
}
