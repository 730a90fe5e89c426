//! Middleware de autenticación
//!
//! Extrae el bearer token, valida la sesión y deja el usuario en las
//! extensiones del request para que los handlers lo reciban tipado.

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::models::user::{User, UserRole};
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Usuario autenticado del request actual
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let auth_header = headers
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing Authorization header".to_string()))?;

    auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized("Authorization header must be a Bearer token".to_string()))
}

/// Middleware de autenticación
pub async fn auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_bearer_token(&headers)?;
    let user = state.auth.validate_token(token).await?;

    request.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(request).await)
}

/// Middleware que además exige rol de cliente
pub async fn customer_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_bearer_token(&headers)?;
    let user = state.auth.validate_token(token).await?;

    match user.role {
        UserRole::Customer => {}
        UserRole::Driver | UserRole::Admin => {
            return Err(AppError::Forbidden(
                "This endpoint is for customers only".to_string(),
            ));
        }
    }

    request.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(request).await)
}

/// Extraer el bearer token de los headers (para logout)
pub fn bearer_token(headers: &HeaderMap) -> Result<String, AppError> {
    extract_bearer_token(headers).map(|t| t.to_string())
}
