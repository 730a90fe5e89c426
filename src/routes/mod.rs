pub mod auth_routes;
pub mod chat_routes;
pub mod discount_routes;
pub mod notification_routes;
pub mod order_routes;
pub mod request_routes;
pub mod tracking_routes;
pub mod truck_type_routes;
