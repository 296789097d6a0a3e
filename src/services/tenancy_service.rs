// src/services/tenancy_service.rs

use crate::{
    common::error::AppError,
    db::{CatalogRepository, TenancyRepository},
    models::tenancy::{Tenant, UsageReport, UsageSlot},
};

#[derive(Clone)]
pub struct TenancyService {
    tenancy_repo: TenancyRepository,
    catalog_repo: CatalogRepository,
    // Slug do deployment, lido do ambiente uma vez na inicialização
    tenant_slug: String,
}

impl TenancyService {
    pub fn new(
        tenancy_repo: TenancyRepository,
        catalog_repo: CatalogRepository,
        tenant_slug: String,
    ) -> Self {
        Self {
            tenancy_repo,
            catalog_repo,
            tenant_slug,
        }
    }

    /// Resolve o tenant ativo do deployment. Ausência ou inatividade é
    /// erro FATAL de configuração (nunca um 404 suave): responder com
    /// um tenant "vazio" poderia expor ou misturar dados entre tenants.
    ///
    /// Chamado uma vez por requisição pelo middleware de resolução; o
    /// resultado vive nas extensions da requisição, então os demais
    /// call sites não geram novas consultas.
    pub async fn resolve_tenant(&self) -> Result<Tenant, AppError> {
        self.tenancy_repo
            .find_active_by_slug(&self.tenant_slug)
            .await?
            .ok_or_else(|| {
                AppError::TenantConfig(format!(
                    "nenhum tenant ativo para o slug '{}'",
                    self.tenant_slug
                ))
            })
    }

    /// Conta o uso atual do tenant e compara com os limites do plano.
    /// Somente leitura e consultivo: quem bloqueia a escrita é o
    /// chamador, olhando para `can_add`.
    pub async fn check_usage_limits(&self, tenant: &Tenant) -> Result<UsageReport, AppError> {
        let catalog = self.catalog_repo.for_tenant(tenant);

        let product_count = catalog.count_products(None, None).await?;
        let category_count = catalog.count_categories().await?;

        Ok(UsageReport {
            products: UsageSlot::new(product_count, tenant.limits.max_products),
            categories: UsageSlot::new(category_count, tenant.limits.max_categories),
        })
    }
}
