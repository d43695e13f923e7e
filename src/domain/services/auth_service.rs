use crate::config::Config;
use crate::domain::models::{auth::Claims, user::UserAccount};
use crate::error::AppError;
use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, SaltString};
use argon2::{Argon2, PasswordVerifier};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::{distributions::Alphanumeric, Rng};
use uuid::Uuid;

pub const TOKEN_AUDIENCE: &str = "scheduler-ui";

pub struct AuthService {
    issuer: String,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl AuthService {
    pub fn new(config: &Config) -> Self {
        Self {
            issuer: config.auth_issuer.clone(),
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        }
    }

    /// Issues a 12-hour access token plus the CSRF token that mutating
    /// requests must echo in `X-CSRF-Token`.
    pub fn issue_token(&self, user: &UserAccount) -> Result<(String, String), AppError> {
        let csrf_token: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(32)
            .map(char::from)
            .collect();
        let now = Utc::now();

        let claims = Claims {
            iss: self.issuer.clone(),
            sub: user.email.clone(),
            aud: TOKEN_AUDIENCE.to_string(),
            exp: (now + Duration::hours(12)).timestamp() as usize,
            iat: now.timestamp() as usize,
            jti: Uuid::new_v4().to_string(),
            role: user.role,
            trainer_name: user.trainer_name.clone(),
            csrf_token: csrf_token.clone(),
        };

        let token =
            encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
                tracing::error!("JWT encoding failed: {}", e);
                AppError::Internal
            })?;
        Ok((token, csrf_token))
    }

    pub fn verify_token(&self, token: &str) -> Result<Claims, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[TOKEN_AUDIENCE]);
        validation.set_issuer(&[&self.issuer]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|_| AppError::Unauthorized)
    }

    pub fn hash_password(password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| {
                tracing::error!("Password hashing failed: {}", e);
                AppError::Internal
            })
    }

    pub fn verify_password(password: &str, stored_hash: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(stored_hash) else {
            return false;
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}
