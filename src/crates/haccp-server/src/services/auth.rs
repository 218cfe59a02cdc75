//! Authentication service
//!
//! Issues and verifies HS256 JWTs and hashes passwords with bcrypt.

use chrono::Utc;
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::server::MIN_JWT_SECRET_LEN;
use crate::db::models::User;

/// `iss` claim of every token this server issues
pub const TOKEN_ISSUER: &str = "haccp-server";

/// Shortest accepted password
pub const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("JWT secret must be at least {MIN_JWT_SECRET_LEN} characters")]
    WeakSecret,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Password hashing failed: {0}")]
    Hashing(String),
}

/// Token claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    pub email: String,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
    pub iss: String,
}

/// JWT token management
pub struct JwtManager {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl_secs: u64,
}

impl JwtManager {
    /// Create a new JWT manager
    pub fn new(secret: &str, ttl_secs: u64) -> Result<Self, AuthError> {
        if secret.len() < MIN_JWT_SECRET_LEN {
            return Err(AuthError::WeakSecret);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[TOKEN_ISSUER]);

        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl_secs,
        })
    }

    pub fn ttl_secs(&self) -> u64 {
        self.ttl_secs
    }

    /// Claims for a fresh token for `user`
    pub fn claims_for(&self, user: &User) -> Claims {
        let now = Utc::now().timestamp();
        Claims {
            sub: user.id.clone(),
            email: user.email.clone(),
            role: user.role.clone(),
            iat: now,
            exp: now.saturating_add(i64::try_from(self.ttl_secs).unwrap_or(i64::MAX)),
            iss: TOKEN_ISSUER.to_string(),
        }
    }

    /// Generate a signed token for a user
    pub fn issue(&self, user: &User) -> Result<String, AuthError> {
        self.encode(&self.claims_for(user))
    }

    /// Sign arbitrary claims
    pub fn encode(&self, claims: &Claims) -> Result<String, AuthError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))
    }

    /// Verify signature, issuer and expiry
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => {
                    debug!("Token rejected: {}", e);
                    AuthError::InvalidToken(e.to_string())
                }
            })
    }
}

/// Tokens plus password hashing
pub struct AuthService {
    jwt: JwtManager,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(jwt: JwtManager, bcrypt_cost: u32) -> Self {
        Self { jwt, bcrypt_cost }
    }

    pub fn jwt(&self) -> &JwtManager {
        &self.jwt
    }

    /// Hash a password off the async runtime
    pub async fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let password = password.to_string();
        let cost = self.bcrypt_cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| AuthError::Hashing(e.to_string()))?
            .map_err(|e| AuthError::Hashing(e.to_string()))
    }

    /// Check a password against a stored hash; a malformed hash never matches
    pub async fn verify_password(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        let password = password.to_string();
        let hash = hash.to_string();
        let verified = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| AuthError::Hashing(e.to_string()))?;
        Ok(verified.unwrap_or(false))
    }
}
