//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.
//! Los umbrales de descuento y los retardos simulados del workflow viven aquí
//! para que ninguna otra parte del código los tenga hardcodeados.

use std::env;
use std::time::Duration;

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub cors_origins: Vec<String>,
    pub rate_limit_requests: u32,
    pub rate_limit_window: u64,
    // Reglas de descuento (unificadas - antes había 7/8 y 15%/18% según el sitio)
    pub discount_threshold: u32,
    pub discount_percent: u32,
    // Retardos simulados del workflow de ofertas
    pub submit_delay_ms: u64,
    pub offer_delay_ms: u64,
    pub accept_delay_ms: u64,
    // Ritmo de la simulación de tracking
    pub tracking_tick_ms: u64,
    pub tracking_rotation_ms: u64,
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            port: env_parse("PORT", 3000),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            jwt_secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| "your-super-secret-jwt-key-change-in-production".to_string()),
            jwt_expiration_hours: env_parse("JWT_EXPIRATION_HOURS", 24),
            cors_origins: env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| "*".to_string())
                .split(',')
                .map(|s| s.trim().to_string())
                .collect(),
            rate_limit_requests: env_parse("RATE_LIMIT_REQUESTS", 120),
            rate_limit_window: env_parse("RATE_LIMIT_WINDOW", 60),
            discount_threshold: env_parse("DISCOUNT_THRESHOLD", 7),
            discount_percent: env_parse("DISCOUNT_PERCENT", 15),
            submit_delay_ms: env_parse("SUBMIT_DELAY_MS", 1500),
            offer_delay_ms: env_parse("OFFER_DELAY_MS", 5000),
            accept_delay_ms: env_parse("ACCEPT_DELAY_MS", 1500),
            tracking_tick_ms: env_parse("TRACKING_TICK_MS", 5000),
            tracking_rotation_ms: env_parse("TRACKING_ROTATION_MS", 3000),
        }
    }
}

impl EnvironmentConfig {
    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn offer_delay(&self) -> Duration {
        Duration::from_millis(self.offer_delay_ms)
    }

    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }

    pub fn accept_delay(&self) -> Duration {
        Duration::from_millis(self.accept_delay_ms)
    }

    pub fn tracking_tick(&self) -> Duration {
        Duration::from_millis(self.tracking_tick_ms)
    }

    pub fn tracking_rotation(&self) -> Duration {
        Duration::from_millis(self.tracking_rotation_ms)
    }

    /// Configuración con retardos mínimos para tests
    pub fn for_tests() -> Self {
        Self {
            environment: "test".to_string(),
            port: 0,
            host: "127.0.0.1".to_string(),
            jwt_secret: "test-secret".to_string(),
            jwt_expiration_hours: 1,
            cors_origins: vec!["*".to_string()],
            rate_limit_requests: 10_000,
            rate_limit_window: 60,
            discount_threshold: 7,
            discount_percent: 15,
            submit_delay_ms: 5,
            offer_delay_ms: 10,
            accept_delay_ms: 5,
            tracking_tick_ms: 10,
            tracking_rotation_ms: 5,
        }
    }
}
