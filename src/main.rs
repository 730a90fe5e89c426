use anyhow::Result;
use axum::{response::Json, routing::get, Router};
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};
use dotenvy::dotenv;
use serde_json::json;

use truck_marketplace::config::environment::EnvironmentConfig;
use truck_marketplace::create_api_router;
use truck_marketplace::middleware::cors::cors_for;
use truck_marketplace::middleware::rate_limit::{rate_limit_middleware, RateLimitState};
use truck_marketplace::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚚 Truck Marketplace - Backend API");
    info!("==================================");

    let config = EnvironmentConfig::default();
    let app_state = AppState::new(config.clone());

    // Sembrar datos demo en desarrollo
    if config.is_development() {
        if let Err(e) = app_state.seed_demo_data().await {
            error!("❌ Error sembrando datos demo: {}", e);
        }
    }

    let rate_limit_state = RateLimitState::new(&config);

    let app = Router::new()
        .route("/test", get(test_endpoint))
        .merge(create_api_router(app_state.clone()))
        .layer(axum::middleware::from_fn_with_state(
            rate_limit_state,
            rate_limit_middleware,
        ))
        .layer(cors_for(&config))
        .with_state(app_state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /test - Endpoint de prueba");
    info!("🔐 Auth:");
    info!("   POST /api/auth/register - Registrar usuario");
    info!("   POST /api/auth/login - Login");
    info!("   POST /api/auth/logout - Logout");
    info!("   POST /api/auth/reset-password - Reset de contraseña");
    info!("   GET  /api/auth/me - Usuario actual");
    info!("🚛 Catálogo:");
    info!("   GET  /api/truck-types - Listar tipos de camión");
    info!("   GET  /api/truck-types/:id - Detalle de tipo");
    info!("📝 Solicitudes (workflow):");
    info!("   POST /api/requests/start - Empezar solicitud");
    info!("   POST /api/requests/vehicle - Paso 1: vehículo");
    info!("   POST /api/requests/locations - Paso 2: ubicaciones");
    info!("   POST /api/requests/submit - Paso 3: enviar");
    info!("   GET  /api/requests/current - Estado del workflow");
    info!("   GET  /api/requests/offers - Ofertas recibidas");
    info!("   POST /api/requests/offers/:id/accept - Aceptar oferta");
    info!("🎟️ Descuentos:");
    info!("   GET  /api/discount - Estado del descuento");
    info!("   POST /api/discount/coupon - Aplicar cupón");
    info!("💬 Chat:");
    info!("   GET  /api/chat/:chat_id/messages - Mensajes");
    info!("   POST /api/chat/:chat_id/messages - Enviar mensaje");
    info!("   POST /api/chat/:chat_id/quotes - Enviar presupuesto");
    info!("   POST /api/chat/:chat_id/quotes/:message_id/accept - Aceptar presupuesto");
    info!("   POST /api/chat/:chat_id/payment-method - Elegir método de pago");
    info!("📦 Pedidos y tracking:");
    info!("   GET  /api/orders - Pedidos del usuario");
    info!("   GET  /api/orders/:id - Detalle con factura");
    info!("   GET  /api/tracking/:order_id - Tracking del pedido");
    info!("🔔 Notificaciones:");
    info!("   GET  /api/notifications - Feed de notificaciones");
    info!("   DELETE /api/notifications/:id - Cerrar notificación");

    // Iniciar servidor en background
    let server_handle = tokio::spawn(async move {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                error!("❌ Error del servidor: {}", e);
                anyhow::Error::from(e)
            })
    });

    // Esperar a que el servidor termine
    if let Err(e) = server_handle.await? {
        error!("❌ Servidor terminó con error: {}", e);
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Endpoint de prueba simple
async fn test_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "message": "¡Truck Marketplace API funcionando correctamente!",
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
