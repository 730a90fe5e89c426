//! Controllers
//!
//! Orquestación por request: validan, delegan en los servicios y arman
//! la respuesta de la API.

pub mod auth_controller;
pub mod chat_controller;
pub mod discount_controller;
pub mod notification_controller;
pub mod order_controller;
pub mod request_controller;
pub mod tracking_controller;
pub mod truck_type_controller;
