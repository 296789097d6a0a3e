// src/db/tenancy_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::common::error::AppError;
use crate::models::{auth::AdminUser, tenancy::Tenant};

// ---
// Repositório SEM escopo de tenant
// ---
// Este é o único tipo com acesso não filtrado ao banco, e ele só expõe
// o que os caminhos de resolução e autorização precisam: achar o tenant
// pelo slug e carregar administradores. Todo acesso a dados de negócio
// passa pelos repositórios escopados (ver catalog_repo / inquiry_repo).
#[derive(Clone)]
pub struct TenancyRepository {
    pool: PgPool,
}

impl TenancyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Busca o tenant ativo pelo slug configurado no deployment.
    /// `None` aqui significa deployment mal configurado, não 404.
    pub async fn find_active_by_slug(&self, slug: &str) -> Result<Option<Tenant>, AppError> {
        let tenant = sqlx::query_as::<_, Tenant>(
            "SELECT * FROM tenants WHERE slug = $1 AND is_active = TRUE",
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        Ok(tenant)
    }

    // Busca um administrador pelo e-mail (login)
    pub async fn find_admin_by_email(&self, email: &str) -> Result<Option<AdminUser>, AppError> {
        let admin = sqlx::query_as::<_, AdminUser>(
            "SELECT * FROM admin_users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(admin)
    }

    // Busca um administrador pelo ID (validação de token)
    pub async fn find_admin_by_id(&self, id: Uuid) -> Result<Option<AdminUser>, AppError> {
        let admin = sqlx::query_as::<_, AdminUser>(
            "SELECT * FROM admin_users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(admin)
    }
}
