// src/services/catalog_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::CatalogRepository,
    models::{
        catalog::{
            Category, CreateCategoryPayload, CreateProductPayload, Product, ProductPage,
            UpdateProductPayload,
        },
        tenancy::Tenant,
    },
};

// Página do catálogo público, como no front original
pub const PRODUCTS_PER_PAGE: i64 = 12;

#[derive(Clone)]
pub struct CatalogService {
    catalog_repo: CatalogRepository,
}

impl CatalogService {
    pub fn new(catalog_repo: CatalogRepository) -> Self {
        Self { catalog_repo }
    }

    pub async fn list_categories(&self, tenant: &Tenant) -> Result<Vec<Category>, AppError> {
        self.catalog_repo.for_tenant(tenant).list_categories().await
    }

    /// Listagem pública com filtro por slug de categoria, busca por
    /// nome e paginação fixa de 12 itens.
    pub async fn list_products(
        &self,
        tenant: &Tenant,
        category_slug: Option<&str>,
        search: Option<&str>,
        page: i64,
    ) -> Result<ProductPage, AppError> {
        let repo = self.catalog_repo.for_tenant(tenant);

        let category_id = match category_slug {
            Some(slug) => Some(
                repo.find_category_by_slug(slug)
                    .await?
                    .ok_or(AppError::NotFound("catalog.category_not_found"))?
                    .id,
            ),
            None => None,
        };

        let page = page.max(1);
        let offset = (page - 1) * PRODUCTS_PER_PAGE;

        let total = repo.count_products(category_id, search).await?;
        let products = repo
            .list_products(category_id, search, PRODUCTS_PER_PAGE, offset)
            .await?;

        Ok(ProductPage {
            products,
            total,
            page,
            per_page: PRODUCTS_PER_PAGE,
        })
    }

    pub async fn get_product(&self, tenant: &Tenant, id: Uuid) -> Result<Product, AppError> {
        self.catalog_repo
            .for_tenant(tenant)
            .find_product(id)
            .await?
            .ok_or(AppError::NotFound("catalog.product_not_found"))
    }

    /// Criação administrativa. A categoria precisa existir DENTRO do
    /// tenant: um id de categoria de outro tenant é indistinguível de
    /// inexistente.
    pub async fn create_product(
        &self,
        tenant: &Tenant,
        payload: CreateProductPayload,
    ) -> Result<Product, AppError> {
        let repo = self.catalog_repo.for_tenant(tenant);

        repo.find_category(payload.category_id)
            .await?
            .ok_or(AppError::NotFound("catalog.category_not_found"))?;

        repo.create_product(
            payload.category_id,
            &payload.name,
            &payload.description,
            payload.price,
            payload.image_url.as_deref(),
            payload.badge.as_deref(),
            payload.specs,
        )
        .await
    }

    pub async fn update_product(
        &self,
        tenant: &Tenant,
        id: Uuid,
        payload: UpdateProductPayload,
    ) -> Result<Product, AppError> {
        let repo = self.catalog_repo.for_tenant(tenant);

        repo.find_category(payload.category_id)
            .await?
            .ok_or(AppError::NotFound("catalog.category_not_found"))?;

        repo.update_product(
            id,
            payload.category_id,
            &payload.name,
            &payload.description,
            payload.price,
            payload.image_url.as_deref(),
            payload.badge.as_deref(),
            payload.specs,
        )
        .await?
        .ok_or(AppError::NotFound("catalog.product_not_found"))
    }

    pub async fn delete_product(&self, tenant: &Tenant, id: Uuid) -> Result<(), AppError> {
        let deleted = self.catalog_repo.for_tenant(tenant).delete_product(id).await?;
        if deleted == 0 {
            return Err(AppError::NotFound("catalog.product_not_found"));
        }
        Ok(())
    }

    pub async fn create_category(
        &self,
        tenant: &Tenant,
        payload: CreateCategoryPayload,
    ) -> Result<Category, AppError> {
        self.catalog_repo
            .for_tenant(tenant)
            .create_category(&payload.name, &payload.slug)
            .await
    }

    pub async fn delete_category(&self, tenant: &Tenant, id: Uuid) -> Result<(), AppError> {
        let deleted = self
            .catalog_repo
            .for_tenant(tenant)
            .delete_category(id)
            .await?;
        if deleted == 0 {
            return Err(AppError::NotFound("catalog.category_not_found"));
        }
        Ok(())
    }
}
