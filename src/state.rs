use std::sync::Arc;

use crate::{
    config::AppConfig,
    db::{DbPool, OrmConn, create_orm_conn},
    services::auth_service::TokenKeys,
};

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub orm: OrmConn,
    pub tokens: Arc<TokenKeys>,
}

impl AppState {
    pub fn new(pool: DbPool, tokens: TokenKeys) -> Self {
        let orm = create_orm_conn(&pool);
        Self {
            pool,
            orm,
            tokens: Arc::new(tokens),
        }
    }

    pub fn from_config(pool: DbPool, config: &AppConfig) -> Self {
        Self::new(
            pool,
            TokenKeys::new(config.jwt_secret.as_bytes(), config.jwt_ttl_hours),
        )
    }
}
