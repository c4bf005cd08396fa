use axum::{extract::FromRequestParts, http::header};
use jsonwebtoken::{DecodingKey, Validation, decode};
use uuid::Uuid;

use crate::{dto::auth::Claims, entity::enums::UserRole, error::AppError};

#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub role: UserRole,
}

pub fn ensure_role(user: &AuthUser, allowed: &[UserRole]) -> Result<(), AppError> {
    if !allowed.contains(&user.role) {
        tracing::warn!(user_id = %user.user_id, role = user.role.as_str(), "role check failed");
        return Err(AppError::Forbidden);
    }
    Ok(())
}

pub fn ensure_admin(user: &AuthUser) -> Result<(), AppError> {
    ensure_role(user, &[UserRole::Admin])
}

/// Staff or administrator.
pub fn ensure_operator(user: &AuthUser) -> Result<(), AppError> {
    ensure_role(user, &[UserRole::Admin, UserRole::Staff])
}

pub fn ensure_customer(user: &AuthUser) -> Result<(), AppError> {
    ensure_role(user, &[UserRole::Customer])
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;
    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or_else(|| AppError::BadRequest("Missing Authorization header".into()))?;

        let auth_str = auth_header
            .to_str()
            .map_err(|_| AppError::BadRequest("Invalid Authorization header".into()))?;

        let token = auth_str
            .strip_prefix("Bearer ")
            .map(str::trim)
            .ok_or_else(|| AppError::BadRequest("Invalid Authorization scheme".into()))?;

        let secret = std::env::var("JWT_SECRET")
            .map_err(|_| AppError::Internal(anyhow::anyhow!("JWT_SECRET is not set")))?;

        let decoded = decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|_| AppError::BadRequest("Invalid or expired token".into()))?;

        let user_id = Uuid::parse_str(&decoded.claims.sub)
            .map_err(|_| AppError::BadRequest("Invalid user id in token".into()))?;
        let role = UserRole::parse(&decoded.claims.role)
            .ok_or_else(|| AppError::BadRequest("Invalid role in token".into()))?;

        Ok(AuthUser { user_id, role })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: UserRole) -> AuthUser {
        AuthUser {
            user_id: Uuid::new_v4(),
            role,
        }
    }

    #[test]
    fn operator_gate_admits_staff_and_admin_only() {
        assert!(ensure_operator(&user(UserRole::Admin)).is_ok());
        assert!(ensure_operator(&user(UserRole::Staff)).is_ok());
        assert!(matches!(
            ensure_operator(&user(UserRole::Customer)),
            Err(AppError::Forbidden)
        ));
    }

    #[test]
    fn admin_gate_rejects_staff() {
        assert!(matches!(
            ensure_admin(&user(UserRole::Staff)),
            Err(AppError::Forbidden)
        ));
    }
}
