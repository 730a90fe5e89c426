use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::dto::common::ApiResponse;
use crate::dto::order_dto::OrderResponse;
use crate::dto::request_dto::{
    SelectVehicleRequest, SetLocationsRequest, SubmitRequestBody, WorkflowStatusResponse,
};
use crate::models::offer::TruckOffer;
use crate::models::request::RequestDetails;
use crate::models::user::User;
use crate::services::workflow_service::WorkflowService;
use crate::utils::errors::AppError;

pub struct RequestController {
    workflow: Arc<WorkflowService>,
}

impl RequestController {
    pub fn new(workflow: Arc<WorkflowService>) -> Self {
        Self { workflow }
    }

    pub async fn start(&self, user: &User) -> WorkflowStatusResponse {
        self.workflow.start_request(&user.id).await.into()
    }

    pub async fn select_vehicle(
        &self,
        user: &User,
        request: SelectVehicleRequest,
    ) -> Result<WorkflowStatusResponse, AppError> {
        request.validate()?;
        let snapshot = self
            .workflow
            .select_truck_type(&user.id, &request.truck_type_id, request.modifiers)
            .await?;
        Ok(snapshot.into())
    }

    pub async fn set_locations(
        &self,
        user: &User,
        request: SetLocationsRequest,
    ) -> Result<WorkflowStatusResponse, AppError> {
        let snapshot = self
            .workflow
            .set_locations(
                &user.id,
                request.start_location,
                request.destination,
                request.map_location,
            )
            .await?;
        Ok(snapshot.into())
    }

    pub async fn submit(
        &self,
        user: &User,
        request: SubmitRequestBody,
    ) -> Result<ApiResponse<RequestDetails>, AppError> {
        let details = self
            .workflow
            .submit_request(&user.id, request.modifiers)
            .await?;
        Ok(ApiResponse::success_with_message(
            details,
            "Solicitud enviada - buscando conductores".to_string(),
        ))
    }

    pub async fn current(&self, user: &User) -> WorkflowStatusResponse {
        self.workflow.current(&user.id).await.into()
    }

    pub async fn offers(&self, user: &User) -> Vec<TruckOffer> {
        self.workflow.offers(&user.id).await
    }

    pub async fn accept_offer(
        &self,
        user: &User,
        offer_id: Uuid,
    ) -> Result<ApiResponse<OrderResponse>, AppError> {
        let order = self.workflow.accept_offer(&user.id, offer_id).await?;
        Ok(ApiResponse::success_with_message(
            OrderResponse::from(order),
            "Oferta aceptada exitosamente".to_string(),
        ))
    }
}
