use axum::{
    extract::{FromRef, FromRequestParts},
    http::header,
};

use crate::{error::AppError, models::Role, state::AppState};

/// Identity carried by a verified bearer token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: i32,
    pub email: String,
    pub role: Role,
}

pub fn ensure_role(user: &AuthUser, role: Role) -> Result<(), AppError> {
    if user.role != role {
        return Err(AppError::Forbidden);
    }
    Ok(())
}

pub fn ensure_admin(user: &AuthUser) -> Result<(), AppError> {
    ensure_role(user, Role::Admin)
}

pub fn ensure_client(user: &AuthUser) -> Result<(), AppError> {
    ensure_role(user, Role::Client)
}

/// Pull the token out of an `Authorization: Bearer <token>` header value.
pub fn bearer_token(header_value: Option<&str>) -> Result<&str, AppError> {
    let auth_str =
        header_value.ok_or_else(|| AppError::Unauthorized("missing bearer token".into()))?;

    let token = auth_str
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized("invalid authorization scheme".into()))?
        .trim();

    if token.is_empty() {
        return Err(AppError::Unauthorized("missing bearer token".into()));
    }
    Ok(token)
}

impl<S> FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let header_value = match parts.headers.get(header::AUTHORIZATION) {
            Some(value) => Some(
                value
                    .to_str()
                    .map_err(|_| AppError::Unauthorized("invalid authorization header".into()))?,
            ),
            None => None,
        };
        let token = bearer_token(header_value)?;

        let state = AppState::from_ref(state);
        let claims = state.tokens.verify(token)?;

        Ok(AuthUser {
            user_id: claims.id,
            email: claims.email,
            role: claims.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role) -> AuthUser {
        AuthUser {
            user_id: 1,
            email: "someone@example.com".into(),
            role,
        }
    }

    #[test]
    fn role_guards() {
        assert!(ensure_admin(&user(Role::Admin)).is_ok());
        assert!(matches!(
            ensure_admin(&user(Role::Client)),
            Err(AppError::Forbidden)
        ));
        assert!(ensure_client(&user(Role::Client)).is_ok());
        assert!(matches!(
            ensure_client(&user(Role::Admin)),
            Err(AppError::Forbidden)
        ));
    }

    #[test]
    fn bearer_header_parsing() {
        assert_eq!(bearer_token(Some("Bearer abc.def")).unwrap(), "abc.def");
        assert!(matches!(
            bearer_token(None),
            Err(AppError::Unauthorized(_))
        ));
        assert!(matches!(
            bearer_token(Some("Basic dXNlcjpwYXNz")),
            Err(AppError::Unauthorized(_))
        ));
        assert!(matches!(
            bearer_token(Some("Bearer   ")),
            Err(AppError::Unauthorized(_))
        ));
    }
}
