//! Servicio JWT

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::models::user::{JwtClaims, User, UserRole};

/// Configuración JWT
pub struct JwtConfig {
    pub secret: String,
    pub algorithm: Algorithm,
    pub access_token_duration: Duration,
}

impl JwtConfig {
    pub fn new(secret: String, expiration_hours: i64) -> Self {
        Self {
            secret,
            algorithm: Algorithm::HS256,
            access_token_duration: Duration::hours(expiration_hours),
        }
    }
}

/// Servicio JWT
pub struct JwtService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    pub fn new(secret: &str, expiration_hours: i64) -> Self {
        let config = JwtConfig::new(secret.to_string(), expiration_hours);
        let encoding_key = EncodingKey::from_secret(config.secret.as_ref());
        let decoding_key = DecodingKey::from_secret(config.secret.as_ref());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Genera un token de acceso
    pub fn generate_access_token(&self, user: &User) -> Result<String, String> {
        let now = Utc::now();
        let exp = now + self.config.access_token_duration;

        let claims = JwtClaims {
            sub: user.id.clone(),
            email: user.email.clone(),
            role: user.role.as_str().to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::new(self.config.algorithm), &claims, &self.encoding_key)
            .map_err(|e| format!("Error generating access token: {}", e))
    }

    /// Valida y decodifica un token
    pub fn validate_token(&self, token: &str) -> Result<JwtClaims, String> {
        let validation = Validation::new(self.config.algorithm);

        decode::<JwtClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| format!("Invalid token: {}", e))
    }

    /// Verifica si un token está expirado
    pub fn is_token_expired(&self, token: &str) -> bool {
        match self.validate_token(token) {
            Ok(claims) => {
                let now = Utc::now().timestamp();
                now >= claims.exp
            }
            Err(_) => true, // Si no se puede decodificar, considerarlo expirado
        }
    }

    /// Extrae el user_id del token
    pub fn get_user_id(&self, token: &str) -> Result<String, String> {
        let claims = self.validate_token(token)?;
        Ok(claims.sub)
    }

    /// Extrae el role del token
    pub fn get_user_role(&self, token: &str) -> Result<UserRole, String> {
        let claims = self.validate_token(token)?;
        UserRole::from_str(&claims.role).ok_or("Invalid role in token".to_string())
    }

    /// Duración de acceso configurada
    pub fn access_token_duration(&self) -> Duration {
        self.config.access_token_duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn test_user(role: UserRole) -> User {
        User {
            id: "test_user_123".to_string(),
            full_name: "Test User".to_string(),
            email: "test@example.com".to_string(),
            phone: "0501234567".to_string(),
            role,
            password_hash: "irrelevant".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_generate_and_validate_token() {
        let jwt_service = JwtService::new("test-secret", 24);

        let user = test_user(UserRole::Customer);

        // Generar token
        let token = jwt_service.generate_access_token(&user).unwrap();
        assert!(!token.is_empty());

        // Validar token
        let claims = jwt_service.validate_token(&token).unwrap();
        assert_eq!(claims.sub, "test_user_123");
        assert_eq!(claims.email, "test@example.com");
        assert_eq!(claims.role, "customer");
    }

    #[test]
    fn test_token_expiration() {
        let jwt_service = JwtService::new("test-secret", 24);

        let user = test_user(UserRole::Driver);
        let token = jwt_service.generate_access_token(&user).unwrap();

        // Token recién creado no debería estar expirado
        assert!(!jwt_service.is_token_expired(&token));
        assert_eq!(jwt_service.get_user_role(&token).unwrap(), UserRole::Driver);
    }

    #[test]
    fn test_invalid_token_rejected() {
        let jwt_service = JwtService::new("test-secret", 24);
        assert!(jwt_service.validate_token("not-a-token").is_err());

        // Token firmado con otro secreto
        let other = JwtService::new("other-secret", 24);
        let token = other
            .generate_access_token(&test_user(UserRole::Admin))
            .unwrap();
        assert!(jwt_service.validate_token(&token).is_err());
    }
}
