//! Servicio de autenticación
//!
//! Registro de usuarios en memoria (en producción sería una BD real),
//! hashes bcrypt, emisión de tokens JWT y registro de sesiones activas
//! con marca de última actividad.

use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::user::{SessionInfo, User, UserRole};
use crate::services::jwt_service::JwtService;
use crate::storage::{SharedStore, StoreKeys};
use crate::utils::errors::{AppError, AppResult};

/// Resultado de un login o registro correcto
#[derive(Debug, Clone)]
pub struct AuthOutcome {
    pub user: User,
    pub token: String,
    pub expires_at: chrono::DateTime<Utc>,
}

/// Datos de registro ya validados por el DTO
#[derive(Debug, Clone)]
pub struct NewUser {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub role: UserRole,
}

pub struct AuthService {
    jwt_service: JwtService,
    store: SharedStore,
    // Usuarios por email (en producción sería una BD real)
    users: RwLock<HashMap<String, User>>,
    // Sesiones activas por token
    active_sessions: RwLock<HashMap<String, SessionInfo>>,
}

impl AuthService {
    pub fn new(jwt_service: JwtService, store: SharedStore) -> Self {
        Self {
            jwt_service,
            store,
            users: RwLock::new(HashMap::new()),
            active_sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Sembrar las cuentas demo del entorno de desarrollo
    pub async fn seed_demo_users(&self) -> Vec<User> {
        let demo = [
            ("Mohammed Al-Salem", "customer@example.com", "0500000001", "customer123", UserRole::Customer),
            ("Ahmed Al-Harbi", "driver@example.com", "0500000002", "driver123", UserRole::Driver),
            ("Admin", "admin@example.com", "0500000003", "admin123", UserRole::Admin),
        ];

        let mut seeded = Vec::new();
        for (full_name, email, phone, password, role) in demo {
            let user = User {
                id: Uuid::new_v4().to_string(),
                full_name: full_name.to_string(),
                email: email.to_string(),
                phone: phone.to_string(),
                role,
                password_hash: hash(password, DEFAULT_COST).expect("bcrypt hash of demo password"),
                created_at: Utc::now(),
            };
            self.users
                .write()
                .await
                .insert(user.email.clone(), user.clone());
            seeded.push(user);
        }
        info!("👥 {} usuarios demo sembrados", seeded.len());
        seeded
    }

    /// Registrar un usuario nuevo
    pub async fn register(&self, new_user: NewUser) -> AppResult<AuthOutcome> {
        let mut users = self.users.write().await;
        if users.contains_key(&new_user.email) {
            return Err(AppError::Conflict(format!(
                "An account with email '{}' already exists",
                new_user.email
            )));
        }

        let password_hash =
            hash(&new_user.password, DEFAULT_COST).map_err(|e| AppError::Hash(e.to_string()))?;

        let user = User {
            id: Uuid::new_v4().to_string(),
            full_name: new_user.full_name,
            email: new_user.email.clone(),
            phone: new_user.phone,
            role: new_user.role,
            password_hash,
            created_at: Utc::now(),
        };
        users.insert(new_user.email, user.clone());
        drop(users);

        info!("🆕 Usuario registrado: {} ({})", user.email, user.role.as_str());
        self.open_session(user).await
    }

    /// Autenticar un usuario existente.
    ///
    /// El rol pedido debe coincidir con el de la cuenta: un cliente no
    /// entra por el login de conductores.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        role: UserRole,
        remember_me: bool,
    ) -> AppResult<AuthOutcome> {
        let users = self.users.read().await;
        let user = users
            .get(email)
            .ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))?
            .clone();
        drop(users);

        let password_ok =
            verify(password, &user.password_hash).map_err(|e| AppError::Hash(e.to_string()))?;
        if !password_ok {
            warn!("🔒 Credenciales inválidas para {}", email);
            return Err(AppError::Unauthorized("Invalid credentials".to_string()));
        }

        if user.role != role {
            return Err(AppError::Unauthorized(format!(
                "This account is not registered as {}",
                role.as_str()
            )));
        }

        if remember_me {
            self.store
                .set(&StoreKeys::remembered_email(), email.to_string())
                .await?;
        }

        info!("✅ Login correcto: {} ({})", email, role.as_str());
        self.open_session(user).await
    }

    async fn open_session(&self, user: User) -> AppResult<AuthOutcome> {
        let token = self
            .jwt_service
            .generate_access_token(&user)
            .map_err(AppError::Jwt)?;
        let now = Utc::now();
        let expires_at = now + self.jwt_service.access_token_duration();

        let session = SessionInfo {
            user_id: user.id.clone(),
            email: user.email.clone(),
            role: user.role,
            created_at: now,
            last_activity: now,
            is_active: true,
        };
        self.active_sessions
            .write()
            .await
            .insert(token.clone(), session);

        self.store
            .set(
                &StoreKeys::last_activity(&user.id),
                now.to_rfc3339(),
            )
            .await?;

        Ok(AuthOutcome {
            user,
            token,
            expires_at,
        })
    }

    /// Cerrar la sesión asociada a un token
    pub async fn logout(&self, token: &str) -> AppResult<()> {
        let removed = self.active_sessions.write().await.remove(token);
        match removed {
            Some(session) => {
                info!("👋 Sesión cerrada para {}", session.email);
                Ok(())
            }
            None => Err(AppError::Unauthorized("Session not found".to_string())),
        }
    }

    /// Restablecer contraseña (simulado - no hay transporte de correo)
    pub async fn reset_password(&self, email: &str) -> AppResult<String> {
        let users = self.users.read().await;
        if !users.contains_key(email) {
            return Err(AppError::NotFound(format!(
                "No account registered with email '{}'",
                email
            )));
        }
        info!("📧 Reset de contraseña solicitado para {}", email);
        Ok(format!("Password reset instructions sent to {}", email))
    }

    /// Validar un token y devolver el usuario, renovando la marca de
    /// actividad de la sesión
    pub async fn validate_token(&self, token: &str) -> AppResult<User> {
        let claims = self.jwt_service.validate_token(token).map_err(AppError::Jwt)?;

        let mut sessions = self.active_sessions.write().await;
        let session = sessions
            .get_mut(token)
            .ok_or_else(|| AppError::Unauthorized("Session expired or closed".to_string()))?;
        session.last_activity = Utc::now();
        drop(sessions);

        let users = self.users.read().await;
        users
            .values()
            .find(|u| u.id == claims.sub)
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("User no longer exists".to_string()))
    }

    /// Email recordado del último login con remember_me
    pub async fn remembered_email(&self) -> AppResult<Option<String>> {
        Ok(self.store.get(&StoreKeys::remembered_email()).await?)
    }

    /// Limpiar sesiones inactivas
    pub async fn cleanup_expired_sessions(&self) {
        let mut sessions = self.active_sessions.write().await;
        sessions.retain(|token, _| !self.jwt_service.is_token_expired(token));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn service() -> AuthService {
        AuthService::new(
            JwtService::new("test-secret", 1),
            Arc::new(MemoryStore::new()),
        )
    }

    fn new_customer(email: &str) -> NewUser {
        NewUser {
            full_name: "Test Customer".to_string(),
            email: email.to_string(),
            phone: "0501234567".to_string(),
            password: "secret123".to_string(),
            role: UserRole::Customer,
        }
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let service = service();
        let outcome = service.register(new_customer("a@example.com")).await.unwrap();
        assert_eq!(outcome.user.role, UserRole::Customer);
        assert!(!outcome.token.is_empty());

        let login = service
            .login("a@example.com", "secret123", UserRole::Customer, false)
            .await
            .unwrap();
        assert_eq!(login.user.id, outcome.user.id);
    }

    #[tokio::test]
    async fn test_duplicate_registration_conflicts() {
        let service = service();
        service.register(new_customer("a@example.com")).await.unwrap();
        let second = service.register(new_customer("a@example.com")).await;
        assert!(matches!(second, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_login_rejects_wrong_password_and_role() {
        let service = service();
        service.register(new_customer("a@example.com")).await.unwrap();

        let wrong_password = service
            .login("a@example.com", "nope", UserRole::Customer, false)
            .await;
        assert!(matches!(wrong_password, Err(AppError::Unauthorized(_))));

        let wrong_role = service
            .login("a@example.com", "secret123", UserRole::Driver, false)
            .await;
        assert!(matches!(wrong_role, Err(AppError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_logout_invalidates_session() {
        let service = service();
        let outcome = service.register(new_customer("a@example.com")).await.unwrap();

        assert!(service.validate_token(&outcome.token).await.is_ok());
        service.logout(&outcome.token).await.unwrap();
        assert!(service.validate_token(&outcome.token).await.is_err());
    }

    #[tokio::test]
    async fn test_remember_me_persists_email() {
        let service = service();
        service.register(new_customer("a@example.com")).await.unwrap();
        service
            .login("a@example.com", "secret123", UserRole::Customer, true)
            .await
            .unwrap();
        assert_eq!(
            service.remembered_email().await.unwrap(),
            Some("a@example.com".to_string())
        );
    }

    #[tokio::test]
    async fn test_reset_password_requires_known_email() {
        let service = service();
        assert!(service.reset_password("ghost@example.com").await.is_err());

        service.register(new_customer("a@example.com")).await.unwrap();
        let message = service.reset_password("a@example.com").await.unwrap();
        assert!(message.contains("a@example.com"));
    }
}
