//! Workflow de solicitud y ofertas
//!
//! Máquina de estados por cliente: formulario en tres pasos, envío,
//! generación diferida de ofertas, aceptación y paso a tracking. Cada
//! sesión tiene como máximo una solicitud activa; una solicitud nueva
//! invalida cualquier generación de ofertas pendiente (contador de
//! generación + abort de la tarea) para que nunca aparezcan ofertas
//! obsoletas de un envío anterior.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::info;
use uuid::Uuid;

use crate::models::offer::TruckOffer;
use crate::models::order::Order;
use crate::models::request::{
    MapLocation, RequestDetails, RequestDraft, RequestModifiers, WorkflowStage,
};
use crate::services::discount_service::DiscountService;
use crate::services::distance_service::DistanceService;
use crate::services::notification_service::NotificationService;
use crate::services::offer_service::OfferService;
use crate::services::order_service::OrderService;
use crate::services::pricing_service::PricingService;
use crate::services::tracking_service::TrackingService;
use crate::utils::errors::{AppError, AppResult};

/// Estado del workflow de un cliente
struct CustomerWorkflow {
    stage: WorkflowStage,
    draft: RequestDraft,
    request: Option<RequestDetails>,
    offers: Vec<TruckOffer>,
    accepted_offer_id: Option<Uuid>,
    order_id: Option<Uuid>,
    /// Generación vigente - las tareas diferidas de generaciones
    /// anteriores se descartan al despertar
    generation: u64,
    pending_task: Option<JoinHandle<()>>,
}

impl Default for CustomerWorkflow {
    fn default() -> Self {
        Self {
            stage: WorkflowStage::Idle,
            draft: RequestDraft::default(),
            request: None,
            offers: Vec::new(),
            accepted_offer_id: None,
            order_id: None,
            generation: 0,
            pending_task: None,
        }
    }
}

/// Vista inmutable del workflow para la capa HTTP
#[derive(Debug, Clone)]
pub struct WorkflowSnapshot {
    pub stage: WorkflowStage,
    pub draft: RequestDraft,
    pub request: Option<RequestDetails>,
    pub offers: Vec<TruckOffer>,
    pub accepted_offer_id: Option<Uuid>,
    pub order_id: Option<Uuid>,
}

impl CustomerWorkflow {
    fn snapshot(&self) -> WorkflowSnapshot {
        WorkflowSnapshot {
            stage: self.stage,
            draft: self.draft.clone(),
            request: self.request.clone(),
            offers: self.offers.clone(),
            accepted_offer_id: self.accepted_offer_id,
            order_id: self.order_id,
        }
    }

    fn is_collecting(&self) -> bool {
        matches!(
            self.stage,
            WorkflowStage::CollectingVehicle
                | WorkflowStage::CollectingLocation
                | WorkflowStage::CollectingTripDetails
        )
    }
}

pub struct WorkflowService {
    sessions: Arc<RwLock<HashMap<String, CustomerWorkflow>>>,
    pricing: Arc<PricingService>,
    distance: Arc<DistanceService>,
    discount: Arc<DiscountService>,
    offer_service: Arc<OfferService>,
    orders: Arc<OrderService>,
    tracking: Arc<TrackingService>,
    notifications: Arc<NotificationService>,
    submit_delay: Duration,
    offer_delay: Duration,
    accept_delay: Duration,
}

impl WorkflowService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        pricing: Arc<PricingService>,
        distance: Arc<DistanceService>,
        discount: Arc<DiscountService>,
        offer_service: Arc<OfferService>,
        orders: Arc<OrderService>,
        tracking: Arc<TrackingService>,
        notifications: Arc<NotificationService>,
        submit_delay: Duration,
        offer_delay: Duration,
        accept_delay: Duration,
    ) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            pricing,
            distance,
            discount,
            offer_service,
            orders,
            tracking,
            notifications,
            submit_delay,
            offer_delay,
            accept_delay,
        }
    }

    /// Empezar una solicitud nueva (paso 1: vehículo).
    ///
    /// Descarta la solicitud activa anterior, sus ofertas y cualquier
    /// generación pendiente.
    pub async fn start_request(&self, customer_id: &str) -> WorkflowSnapshot {
        let mut sessions = self.sessions.write().await;
        let workflow = sessions.entry(customer_id.to_string()).or_default();

        if let Some(task) = workflow.pending_task.take() {
            task.abort();
        }
        workflow.generation += 1;
        workflow.stage = WorkflowStage::CollectingVehicle;
        workflow.draft = RequestDraft::default();
        workflow.request = None;
        workflow.offers.clear();
        workflow.accepted_offer_id = None;
        workflow.order_id = None;

        info!("📝 Nueva solicitud iniciada para {}", customer_id);
        workflow.snapshot()
    }

    /// Paso 1: elegir tipo de camión. La selección avanza al paso de
    /// ubicaciones (el auto-avance de 300ms del cliente era cosmético).
    pub async fn select_truck_type(
        &self,
        customer_id: &str,
        truck_type_id: &str,
        modifiers: Option<RequestModifiers>,
    ) -> AppResult<WorkflowSnapshot> {
        let mut sessions = self.sessions.write().await;
        let workflow = sessions
            .get_mut(customer_id)
            .filter(|w| w.is_collecting())
            .ok_or_else(|| {
                AppError::BadRequest("No active request form - start a new request first".to_string())
            })?;

        if self.pricing.find(truck_type_id).is_none() {
            // Ids desconocidos se aceptan: la tarificación degrada a la
            // tarifa por defecto
            tracing::warn!("⚠️ Tipo de camión fuera de catálogo: {}", truck_type_id);
        }

        workflow.draft.truck_type_id = Some(truck_type_id.to_string());
        if let Some(modifiers) = modifiers {
            workflow.draft.modifiers = modifiers;
        }
        if workflow.stage == WorkflowStage::CollectingVehicle {
            workflow.stage = WorkflowStage::CollectingLocation;
        }
        Ok(workflow.snapshot())
    }

    /// Paso 2: ubicaciones. El paso solo avanza con destino informado,
    /// escrito o seleccionado en el mapa.
    pub async fn set_locations(
        &self,
        customer_id: &str,
        start_location: String,
        destination: String,
        map_location: Option<MapLocation>,
    ) -> AppResult<WorkflowSnapshot> {
        let mut sessions = self.sessions.write().await;
        let workflow = sessions
            .get_mut(customer_id)
            .filter(|w| w.is_collecting())
            .ok_or_else(|| {
                AppError::BadRequest("No active request form - start a new request first".to_string())
            })?;

        if workflow.stage == WorkflowStage::CollectingVehicle {
            return Err(AppError::BadRequest(
                "Select a truck type before setting locations".to_string(),
            ));
        }

        if destination.trim().is_empty() && map_location.is_none() {
            return Err(AppError::BadRequest(
                "Destination is required - type it or pick it on the map".to_string(),
            ));
        }

        workflow.draft.start_location = start_location;
        workflow.draft.destination = destination;
        workflow.draft.map_location = map_location;
        if workflow.stage == WorkflowStage::CollectingLocation {
            workflow.stage = WorkflowStage::CollectingTripDetails;
        }
        Ok(workflow.snapshot())
    }

    /// Paso 3 + envío: finaliza la solicitud y programa la generación
    /// de ofertas en una tarea cancelable.
    pub async fn submit_request(
        &self,
        customer_id: &str,
        modifiers: Option<RequestModifiers>,
    ) -> AppResult<RequestDetails> {
        let mut sessions = self.sessions.write().await;
        let workflow = sessions.get_mut(customer_id).ok_or_else(|| {
            AppError::BadRequest("No active request form - start a new request first".to_string())
        })?;

        if workflow.stage != WorkflowStage::CollectingTripDetails {
            return Err(AppError::BadRequest(
                "Complete the vehicle and location steps before submitting".to_string(),
            ));
        }

        let truck_type_id = workflow.draft.truck_type_id.clone().ok_or_else(|| {
            AppError::BadRequest("Select a truck type before submitting".to_string())
        })?;

        if let Some(modifiers) = modifiers {
            workflow.draft.modifiers = modifiers;
        }

        let distance_km = self
            .distance
            .estimate_distance(&workflow.draft.start_location, &workflow.draft.destination);
        let discount_fraction = self.discount.discount_fraction(customer_id).await?;
        let estimate = self.pricing.estimate_price(
            &truck_type_id,
            distance_km,
            &workflow.draft.modifiers,
            discount_fraction,
        );

        let request = RequestDetails {
            id: Uuid::new_v4(),
            customer_id: customer_id.to_string(),
            truck_type_id,
            start_location: workflow.draft.start_location.clone(),
            destination: workflow.draft.destination.clone(),
            map_location: workflow.draft.map_location,
            distance_km,
            modifiers: workflow.draft.modifiers.clone(),
            estimated_price: estimate.total,
            undiscounted_price: estimate.undiscounted,
            coupon_applied: !discount_fraction.is_zero(),
            created_at: chrono::Utc::now(),
        };

        // La solicitud sustituye a cualquier envío anterior
        if let Some(task) = workflow.pending_task.take() {
            task.abort();
        }
        workflow.generation += 1;
        let generation = workflow.generation;
        workflow.request = Some(request.clone());
        workflow.offers.clear();
        workflow.accepted_offer_id = None;
        workflow.order_id = None;
        workflow.stage = WorkflowStage::Submitted;

        info!(
            "🚛 Solicitud {} enviada: {} -> {} ({} km, {} SAR)",
            request.id, request.start_location, request.destination,
            request.distance_km, request.estimated_price
        );

        let sessions_handle = self.sessions.clone();
        let offer_service = self.offer_service.clone();
        let notifications = self.notifications.clone();
        let customer = customer_id.to_string();
        let pending_request = request.clone();
        let submit_delay = self.submit_delay;
        let offer_delay = self.offer_delay;

        let handle = tokio::spawn(async move {
            // Procesado del envío + espera de respuestas de conductores
            tokio::time::sleep(submit_delay).await;
            tokio::time::sleep(offer_delay).await;

            let mut sessions = sessions_handle.write().await;
            let Some(workflow) = sessions.get_mut(&customer) else { return };
            // Si llegó otra solicitud mientras dormíamos, esta generación
            // ya no cuenta
            if workflow.generation != generation || workflow.stage != WorkflowStage::Submitted {
                return;
            }

            workflow.offers = offer_service.generate_offers(&pending_request);
            workflow.stage = WorkflowStage::OffersReceived;
            let count = workflow.offers.len();
            drop(sessions);

            notifications
                .push(
                    &customer,
                    "Offers received",
                    &format!("{} drivers responded to your request", count),
                    false,
                )
                .await;
        });
        workflow.pending_task = Some(handle);

        Ok(request)
    }

    /// Estado actual del workflow del cliente
    pub async fn current(&self, customer_id: &str) -> WorkflowSnapshot {
        let sessions = self.sessions.read().await;
        sessions
            .get(customer_id)
            .map(|w| w.snapshot())
            .unwrap_or_else(|| CustomerWorkflow::default().snapshot())
    }

    /// Ofertas de la solicitud activa
    pub async fn offers(&self, customer_id: &str) -> Vec<TruckOffer> {
        let sessions = self.sessions.read().await;
        sessions
            .get(customer_id)
            .map(|w| w.offers.clone())
            .unwrap_or_default()
    }

    /// Aceptar una oferta por id.
    ///
    /// Como máximo una oferta aceptada por solicitud; para volver a
    /// empezar hace falta una solicitud nueva.
    pub async fn accept_offer(&self, customer_id: &str, offer_id: Uuid) -> AppResult<Order> {
        let mut sessions = self.sessions.write().await;
        let workflow = sessions.get_mut(customer_id).ok_or_else(|| {
            AppError::BadRequest("No active request for this session".to_string())
        })?;

        if workflow.accepted_offer_id.is_some() {
            return Err(AppError::Conflict(
                "An offer has already been accepted for this request".to_string(),
            ));
        }
        if workflow.stage != WorkflowStage::OffersReceived {
            return Err(AppError::BadRequest(
                "There are no offers to accept yet".to_string(),
            ));
        }

        let offer = workflow
            .offers
            .iter()
            .find(|o| o.id == offer_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound("Offer not found".to_string()))?;
        let request = workflow
            .request
            .clone()
            .ok_or_else(|| AppError::Internal("Workflow has offers but no request".to_string()))?;

        let order = self.orders.create_order(&request, &offer).await?;

        workflow.accepted_offer_id = Some(offer.id);
        workflow.order_id = Some(order.id);
        workflow.stage = WorkflowStage::OfferAccepted;
        let generation = workflow.generation;

        info!(
            "🤝 Oferta {} de {} aceptada - pedido {}",
            offer.id, offer.driver_name, order.order_number
        );

        self.notifications
            .push(
                customer_id,
                "Order confirmed",
                &format!(
                    "Order {} confirmed with {} for {} SAR",
                    order.order_number, order.driver_name, order.price
                ),
                false,
            )
            .await;
        if request.coupon_applied {
            self.notifications
                .push(
                    customer_id,
                    "Discount applied",
                    &format!(
                        "Your loyalty discount saved you {} SAR on this order",
                        order.invoice.discount_amount
                    ),
                    false,
                )
                .await;
        }

        // Transición diferida a tracking, también atada a la generación
        let sessions_handle = self.sessions.clone();
        let tracking = self.tracking.clone();
        let notifications = self.notifications.clone();
        let customer = customer_id.to_string();
        let accepted_order = order.clone();
        let accept_delay = self.accept_delay;

        let handle = tokio::spawn(async move {
            tokio::time::sleep(accept_delay).await;

            let mut sessions = sessions_handle.write().await;
            let Some(workflow) = sessions.get_mut(&customer) else { return };
            if workflow.generation != generation
                || workflow.stage != WorkflowStage::OfferAccepted
            {
                return;
            }
            workflow.stage = WorkflowStage::Tracking;
            drop(sessions);

            tracking.start_tracking(&accepted_order).await;
            notifications
                .push(
                    &customer,
                    "Driver is on the way",
                    &format!("{} is heading to the pickup point", accepted_order.driver_name),
                    false,
                )
                .await;
        });
        workflow.pending_task = Some(handle);

        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, SharedStore};
    use rust_decimal::Decimal;
    use std::time::Duration;

    fn service() -> (WorkflowService, Arc<DiscountService>, Arc<TrackingService>) {
        let store: SharedStore = Arc::new(MemoryStore::new());
        let notifications = Arc::new(NotificationService::new());
        let discount = Arc::new(DiscountService::new(
            store.clone(),
            notifications.clone(),
            7,
            15,
        ));
        let orders = Arc::new(OrderService::new(store));
        let tracking = Arc::new(TrackingService::new(
            orders.clone(),
            discount.clone(),
            notifications.clone(),
            Duration::from_millis(10),
            Duration::from_millis(5),
        ));
        let workflow = WorkflowService::new(
            Arc::new(PricingService::new()),
            Arc::new(DistanceService::new()),
            discount.clone(),
            Arc::new(OfferService::new()),
            orders,
            tracking.clone(),
            notifications,
            Duration::from_millis(5),
            Duration::from_millis(10),
            Duration::from_millis(5),
        );
        (workflow, discount, tracking)
    }

    async fn drive_to_submitted(workflow: &WorkflowService, customer: &str) -> RequestDetails {
        workflow.start_request(customer).await;
        workflow
            .select_truck_type(customer, "refrigerated", None)
            .await
            .unwrap();
        workflow
            .set_locations(customer, "A".to_string(), "BCDEFGHIJ".to_string(), None)
            .await
            .unwrap();
        workflow.submit_request(customer, None).await.unwrap()
    }

    #[tokio::test]
    async fn test_full_flow_to_tracking() {
        let (workflow, _discount, tracking) = service();

        let request = drive_to_submitted(&workflow, "cus-1").await;
        assert_eq!(request.distance_km, 11);
        assert_eq!(request.estimated_price, Decimal::from(154));
        assert_eq!(workflow.current("cus-1").await.stage, WorkflowStage::Submitted);

        // Esperar la generación diferida de ofertas
        tokio::time::sleep(Duration::from_millis(80)).await;
        let snapshot = workflow.current("cus-1").await;
        assert_eq!(snapshot.stage, WorkflowStage::OffersReceived);
        assert_eq!(snapshot.offers.len(), 3);
        assert_eq!(snapshot.offers[0].price, Decimal::from(144));
        assert_eq!(snapshot.offers[1].price, Decimal::from(149));
        assert_eq!(snapshot.offers[2].price, Decimal::from(169));

        let chosen = snapshot.offers[1].id;
        let order = workflow.accept_offer("cus-1", chosen).await.unwrap();
        assert_eq!(order.price, Decimal::from(149));
        assert_eq!(order.order_number, "ORD-000001");

        // Aceptar otra oferta distinta ya no es posible
        let again = workflow
            .accept_offer("cus-1", snapshot.offers[2].id)
            .await;
        assert!(matches!(again, Err(AppError::Conflict(_))));

        // Transición diferida a tracking
        tokio::time::sleep(Duration::from_millis(60)).await;
        let snapshot = workflow.current("cus-1").await;
        assert_eq!(snapshot.stage, WorkflowStage::Tracking);
        assert!(tracking.get(order.id).await.is_some());
    }

    #[tokio::test]
    async fn test_new_request_discards_stale_offer_generation() {
        let (workflow, _discount, _tracking) = service();

        drive_to_submitted(&workflow, "cus-1").await;
        // Antes de que lleguen las ofertas, el cliente empieza de nuevo
        workflow.start_request("cus-1").await;

        tokio::time::sleep(Duration::from_millis(80)).await;
        let snapshot = workflow.current("cus-1").await;
        // La generación antigua no debe haber colado sus ofertas
        assert_eq!(snapshot.stage, WorkflowStage::CollectingVehicle);
        assert!(snapshot.offers.is_empty());
    }

    #[tokio::test]
    async fn test_location_step_requires_destination() {
        let (workflow, _discount, _tracking) = service();

        workflow.start_request("cus-1").await;
        workflow
            .select_truck_type("cus-1", "flatbed", None)
            .await
            .unwrap();

        let missing = workflow
            .set_locations("cus-1", "Riyadh".to_string(), "  ".to_string(), None)
            .await;
        assert!(matches!(missing, Err(AppError::BadRequest(_))));

        // Seleccionar en el mapa satisface la puerta aunque no haya texto
        let with_map = workflow
            .set_locations(
                "cus-1",
                "Riyadh".to_string(),
                String::new(),
                Some(MapLocation { lat: 24.7136, lng: 46.6753 }),
            )
            .await
            .unwrap();
        assert_eq!(with_map.stage, WorkflowStage::CollectingTripDetails);
    }

    #[tokio::test]
    async fn test_submit_requires_completed_steps() {
        let (workflow, _discount, _tracking) = service();

        workflow.start_request("cus-1").await;
        let too_early = workflow.submit_request("cus-1", None).await;
        assert!(matches!(too_early, Err(AppError::BadRequest(_))));

        let no_form = workflow.submit_request("cus-2", None).await;
        assert!(matches!(no_form, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_coupon_discounts_the_estimate() {
        let (workflow, discount, _tracking) = service();

        discount.seed_completed_orders("cus-1", 7).await.unwrap();
        discount.apply_coupon("cus-1").await.unwrap();

        let request = drive_to_submitted(&workflow, "cus-1").await;
        assert!(request.coupon_applied);
        assert_eq!(request.undiscounted_price, Decimal::from(154));
        assert_eq!(request.estimated_price, Decimal::from(131));
    }
}
