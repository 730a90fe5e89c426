//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos del marketplace:
//! tipos de camión, solicitudes, ofertas, pedidos, chat y tracking.

pub mod chat;
pub mod discount;
pub mod notification;
pub mod offer;
pub mod order;
pub mod request;
pub mod tracking;
pub mod truck_type;
pub mod user;
