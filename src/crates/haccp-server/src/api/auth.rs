//! Authenticated caller extractors
//!
//! `AuthUser` verifies the bearer JWT and loads the account; `AdminUser`
//! additionally requires the `admin` role. Tenancy checks live here too:
//! a missing row is 404, another tenant's row is 403 unless the caller is
//! an administrator.

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use tracing::warn;

use crate::api::error::{ApiError, ApiResult};
use crate::api::routes::AppState;
use crate::db::models::User;
use crate::db::repositories::UserRepository;

/// The authenticated, active caller
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user: User,
}

impl AuthUser {
    pub fn id(&self) -> &str {
        &self.user.id
    }

    pub fn is_admin(&self) -> bool {
        self.user.is_admin()
    }

    /// Owner filter for tenant-scoped queries; `None` for administrators
    pub fn scope(&self) -> Option<&str> {
        if self.is_admin() {
            None
        } else {
            Some(self.id())
        }
    }

    /// Check access to a row given its owning user id (`None` when the row does not exist)
    pub fn authorize(&self, owner: Option<String>, resource: &str, id: &str) -> ApiResult<()> {
        match owner {
            None => Err(ApiError::NotFound(format!("{} not found: {}", resource, id))),
            Some(owner) if owner == self.user.id || self.is_admin() => Ok(()),
            Some(_) => {
                warn!("User {} denied access to {} {}", self.user.id, resource, id);
                Err(ApiError::Forbidden(format!("No access to {} {}", resource, id)))
            }
        }
    }
}

fn bearer_token(parts: &Parts) -> ApiResult<&str> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| ApiError::Unauthorized("Missing bearer token".to_string()))
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let claims = state.auth.jwt().verify(token).map_err(|e| {
            warn!("Rejected bearer token: {}", e);
            ApiError::from(e)
        })?;

        let user = UserRepository::get_by_id(state.db.pool(), &claims.sub)
            .await?
            .ok_or_else(|| ApiError::Unauthorized("Unknown account".to_string()))?;

        if !user.is_active {
            warn!("Disabled account {} attempted access", user.id);
            return Err(ApiError::Forbidden("Account is disabled".to_string()));
        }

        Ok(AuthUser { user })
    }
}

/// An authenticated administrator
#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthUser);

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let caller = AuthUser::from_request_parts(parts, state).await?;
        if !caller.is_admin() {
            warn!("User {} attempted an admin operation", caller.id());
            return Err(ApiError::Forbidden("Administrator role required".to_string()));
        }
        Ok(AdminUser(caller))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn caller(id: &str, role: &str) -> AuthUser {
        AuthUser {
            user: User {
                id: id.to_string(),
                email: format!("{id}@example.bg"),
                password_hash: String::new(),
                full_name: id.to_string(),
                role: role.to_string(),
                is_active: true,
                created_at: String::new(),
                updated_at: String::new(),
            },
        }
    }

    #[test]
    fn test_scope() {
        assert_eq!(caller("u1", "user").scope(), Some("u1"));
        assert_eq!(caller("a1", "admin").scope(), None);
    }

    #[test]
    fn test_authorize() {
        let owner = caller("u1", "user");
        assert!(owner.authorize(Some("u1".into()), "Business", "b1").is_ok());

        let other = owner.authorize(Some("u2".into()), "Business", "b1").unwrap_err();
        assert_eq!(other.status_code(), StatusCode::FORBIDDEN);

        let missing = owner.authorize(None, "Business", "b1").unwrap_err();
        assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);

        let admin = caller("a1", "admin");
        assert!(admin.authorize(Some("u2".into()), "Business", "b1").is_ok());
        assert!(admin.authorize(None, "Business", "b1").is_err());
    }
}
