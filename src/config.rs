// src/config.rs

use crate::{
    common::i18n::I18nStore,
    db::{CatalogRepository, InquiryRepository, TenancyRepository},
    middleware::rate_limit::FixedWindowLimiter,
    services::{
        auth_service::AuthService, catalog_service::CatalogService,
        inquiry_service::InquiryService, notification_service::NotificationService,
        tenancy_service::TenancyService,
    },
};
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, sync::Arc, time::Duration};

const RATE_LIMIT_MAX_DEFAULT: u32 = 5;
const RATE_LIMIT_WINDOW_SECS_DEFAULT: u64 = 60;

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub i18n_store: I18nStore,
    pub tenancy_service: TenancyService,
    pub auth_service: AuthService,
    pub catalog_service: CatalogService,
    pub inquiry_service: InquiryService,
    pub inquiry_rate_limiter: Arc<FixedWindowLimiter>,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");
        let tenant_slug = env::var("TENANT_SLUG").expect("TENANT_SLUG deve ser definido");

        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let tenancy_repo = TenancyRepository::new(db_pool.clone());
        let catalog_repo = CatalogRepository::new(db_pool.clone());
        let inquiry_repo = InquiryRepository::new(db_pool.clone());

        let tenancy_service =
            TenancyService::new(tenancy_repo.clone(), catalog_repo.clone(), tenant_slug);
        let auth_service = AuthService::new(tenancy_repo, jwt_secret);
        let catalog_service = CatalogService::new(catalog_repo);
        let notification_service = NotificationService::from_env()?;
        let inquiry_service = InquiryService::new(inquiry_repo, notification_service);

        let max_requests = env_u32("RATE_LIMIT_MAX", RATE_LIMIT_MAX_DEFAULT);
        let window_secs = env_u64("RATE_LIMIT_WINDOW_SECS", RATE_LIMIT_WINDOW_SECS_DEFAULT);
        let inquiry_rate_limiter = Arc::new(FixedWindowLimiter::new(
            max_requests,
            Duration::from_secs(window_secs),
        ));

        Ok(Self {
            db_pool,
            i18n_store: I18nStore::new(),
            tenancy_service,
            auth_service,
            catalog_service,
            inquiry_service,
            inquiry_rate_limiter,
        })
    }
}

fn env_u32(key: &str, default: u32) -> u32 {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_u64(key: &str, default: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
