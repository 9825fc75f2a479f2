use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use password_hash::rand_core::OsRng;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

use crate::{
    audit::{self, AuditAction},
    dto::auth::{Claims, LoginRequest, LoginResponse},
    entity::users::{Column as UserCol, Entity as Users, Model as UserModel},
    error::{AppError, AppResult},
    models::User,
    response::{ApiResponse, Meta},
    state::AppState,
};

/// Signing material and lifetime for bearer tokens.
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenKeys {
    pub fn new(secret: &[u8], ttl_hours: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl: Duration::hours(ttl_hours.max(1)),
        }
    }

    pub fn issue(&self, user: &UserModel) -> AppResult<(String, DateTime<Utc>)> {
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;

        let claims = Claims {
            sub: user.id.to_string(),
            id: user.id,
            email: user.email.clone(),
            role: user.role,
            iat: now.timestamp() as usize,
            exp: expires_at.timestamp() as usize,
        };

        Ok((self.sign(&claims)?, expires_at))
    }

    pub fn sign(&self, claims: &Claims) -> AppResult<String> {
        encode(&Header::default(), claims, &self.encoding)
            .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
    }

    pub fn verify(&self, token: &str) -> AppResult<Claims> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|_| AppError::InvalidToken)
    }
}

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        .to_string();
    Ok(hash)
}

pub fn verify_password(password: &str, password_hash: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub async fn login_user(
    state: &AppState,
    payload: LoginRequest,
) -> AppResult<ApiResponse<LoginResponse>> {
    let LoginRequest { email, password } = payload;
    let email = normalize_email(&email);

    let user = Users::find()
        .filter(UserCol::Email.eq(email.as_str()))
        .one(&state.orm)
        .await?;

    let user = match user {
        Some(u) => u,
        None => {
            tracing::info!(email = %email, "login rejected: unknown email");
            return Err(AppError::InvalidCredentials);
        }
    };

    if !verify_password(&password, &user.password_hash)? {
        tracing::info!(user_id = user.id, "login rejected: wrong password");
        return Err(AppError::InvalidCredentials);
    }

    let (token, expires_at) = state.tokens.issue(&user)?;

    audit::record(
        &state.pool,
        Some(user.id),
        AuditAction::Login,
        serde_json::json!({ "user_id": user.id }),
    )
    .await;

    let resp = LoginResponse {
        token,
        token_type: "Bearer".to_string(),
        expires_at,
        user: User::from(user),
    };

    Ok(ApiResponse::success("Logged in", resp, Some(Meta::empty())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    fn user_model(role: Role) -> UserModel {
        UserModel {
            id: 7,
            email: "chef@example.com".into(),
            password_hash: String::new(),
            role,
            created_at: Utc::now().into(),
        }
    }

    #[test]
    fn issued_token_verifies_with_identity() {
        let keys = TokenKeys::new(b"test-secret", 8);
        let (token, expires_at) = keys.issue(&user_model(Role::Admin)).unwrap();

        let claims = keys.verify(&token).unwrap();
        assert_eq!(claims.id, 7);
        assert_eq!(claims.sub, "7");
        assert_eq!(claims.email, "chef@example.com");
        assert_eq!(claims.role, Role::Admin);
        assert_eq!(claims.exp, expires_at.timestamp() as usize);
        assert_eq!(claims.exp - claims.iat, 8 * 3600);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let issuer = TokenKeys::new(b"one-secret", 8);
        let verifier = TokenKeys::new(b"another-secret", 8);
        let (token, _) = issuer.issue(&user_model(Role::Client)).unwrap();

        assert!(matches!(verifier.verify(&token), Err(AppError::InvalidToken)));
        assert!(matches!(verifier.verify("not-a-jwt"), Err(AppError::InvalidToken)));
    }

    #[test]
    fn expired_token_is_rejected() {
        let keys = TokenKeys::new(b"test-secret", 8);
        let issued = Utc::now() - Duration::hours(10);
        let claims = Claims {
            sub: "7".into(),
            id: 7,
            email: "chef@example.com".into(),
            role: Role::Client,
            iat: issued.timestamp() as usize,
            exp: (issued + Duration::hours(8)).timestamp() as usize,
        };
        let token = keys.sign(&claims).unwrap();

        assert!(matches!(keys.verify(&token), Err(AppError::InvalidToken)));
    }

    #[test]
    fn password_hash_round_trip() {
        let hash = hash_password("s3cret").unwrap();
        assert_ne!(hash, "s3cret");
        assert!(verify_password("s3cret", &hash).unwrap());
        assert!(!verify_password("wrong", &hash).unwrap());
    }

    #[test]
    fn emails_are_normalized() {
        assert_eq!(normalize_email("  Chef@Example.COM "), "chef@example.com");
    }
}
