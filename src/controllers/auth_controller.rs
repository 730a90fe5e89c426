use std::sync::Arc;
use validator::Validate;

use crate::dto::auth_dto::{AuthResponse, LoginRequest, RegisterRequest, ResetPasswordRequest};
use crate::dto::common::ApiResponse;
use crate::models::user::{User, UserInfo};
use crate::services::auth_service::{AuthOutcome, AuthService, NewUser};
use crate::utils::errors::AppError;

pub struct AuthController {
    auth: Arc<AuthService>,
}

impl AuthController {
    pub fn new(auth: Arc<AuthService>) -> Self {
        Self { auth }
    }

    fn to_response(outcome: AuthOutcome) -> AuthResponse {
        AuthResponse {
            token: outcome.token,
            user: UserInfo::from(&outcome.user),
            expires_at: outcome.expires_at,
        }
    }

    pub async fn register(
        &self,
        request: RegisterRequest,
    ) -> Result<ApiResponse<AuthResponse>, AppError> {
        request.validate()?;

        let outcome = self
            .auth
            .register(NewUser {
                full_name: request.full_name,
                email: request.email,
                phone: request.phone,
                password: request.password,
                role: request.role,
            })
            .await?;

        Ok(ApiResponse::success_with_message(
            Self::to_response(outcome),
            "Cuenta creada exitosamente".to_string(),
        ))
    }

    pub async fn login(
        &self,
        request: LoginRequest,
    ) -> Result<ApiResponse<AuthResponse>, AppError> {
        request.validate()?;

        let outcome = self
            .auth
            .login(
                &request.email,
                &request.password,
                request.role,
                request.remember_me,
            )
            .await?;

        Ok(ApiResponse::success(Self::to_response(outcome)))
    }

    pub async fn logout(&self, token: &str) -> Result<ApiResponse<()>, AppError> {
        self.auth.logout(token).await?;
        Ok(ApiResponse {
            success: true,
            message: Some("Sesión cerrada exitosamente".to_string()),
            data: None,
        })
    }

    pub async fn reset_password(
        &self,
        request: ResetPasswordRequest,
    ) -> Result<ApiResponse<String>, AppError> {
        request.validate()?;
        let message = self.auth.reset_password(&request.email).await?;
        Ok(ApiResponse::success(message))
    }

    pub fn me(&self, user: &User) -> UserInfo {
        UserInfo::from(user)
    }
}
