//! Marketplace de transporte de camiones
//!
//! Backend del marketplace bilingüe que conecta clientes que necesitan
//! transporte (camiones refrigerados y vehículos especializados) con
//! conductores: tarificación, descuentos, workflow de solicitud/oferta,
//! tracking simulado, chat con presupuestos, pedidos y facturación.

pub mod config;
pub mod controllers;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod storage;
pub mod utils;

use axum::Router;

use crate::state::AppState;

/// Crear el router principal de la API
pub fn create_api_router(state: AppState) -> Router<AppState> {
    Router::new()
        .nest("/api/auth", routes::auth_routes::create_auth_router(state.clone()))
        .nest(
            "/api/truck-types",
            routes::truck_type_routes::create_truck_type_router(),
        )
        .nest(
            "/api/requests",
            routes::request_routes::create_request_router(state.clone()),
        )
        .nest(
            "/api/discount",
            routes::discount_routes::create_discount_router(state.clone()),
        )
        .nest(
            "/api/chat",
            routes::chat_routes::create_chat_router(state.clone()),
        )
        .nest(
            "/api/tracking",
            routes::tracking_routes::create_tracking_router(state.clone()),
        )
        .nest(
            "/api/orders",
            routes::order_routes::create_order_router(state.clone()),
        )
        .nest(
            "/api/notifications",
            routes::notification_routes::create_notification_router(state),
        )
}
