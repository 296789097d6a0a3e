// src/db/catalog_repo.rs

use sqlx::{types::Json, PgPool};
use std::collections::HashMap;
use uuid::Uuid;

use crate::common::error::AppError;
use crate::models::{
    catalog::{Category, Product},
    tenancy::Tenant,
};

// ---
// Repositório do catálogo (produtos + categorias)
// ---
// Não existe operação sem escopo aqui: o tipo base só sabe produzir um
// handle já amarrado a um tenant, e o handle anexa `tenant_id = $1` a
// TODA consulta. Esquecer o filtro deixa de ser possível no call site.
#[derive(Clone)]
pub struct CatalogRepository {
    pool: PgPool,
}

impl CatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn for_tenant(&self, tenant: &Tenant) -> ScopedCatalogRepository {
        ScopedCatalogRepository {
            pool: self.pool.clone(),
            tenant_id: tenant.id,
        }
    }
}

pub struct ScopedCatalogRepository {
    pool: PgPool,
    tenant_id: Uuid,
}

impl ScopedCatalogRepository {
    pub fn tenant_id(&self) -> Uuid {
        self.tenant_id
    }

    // --- Categorias ---

    pub async fn list_categories(&self) -> Result<Vec<Category>, AppError> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT * FROM categories WHERE tenant_id = $1 ORDER BY name",
        )
        .bind(self.tenant_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    pub async fn find_category(&self, id: Uuid) -> Result<Option<Category>, AppError> {
        let category = sqlx::query_as::<_, Category>(
            "SELECT * FROM categories WHERE tenant_id = $1 AND id = $2",
        )
        .bind(self.tenant_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    pub async fn find_category_by_slug(&self, slug: &str) -> Result<Option<Category>, AppError> {
        let category = sqlx::query_as::<_, Category>(
            "SELECT * FROM categories WHERE tenant_id = $1 AND slug = $2",
        )
        .bind(self.tenant_id)
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    pub async fn create_category(&self, name: &str, slug: &str) -> Result<Category, AppError> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (tenant_id, name, slug)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(self.tenant_id)
        .bind(name)
        .bind(slug)
        .fetch_one(&self.pool)
        .await?;

        Ok(category)
    }

    pub async fn delete_category(&self, id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM categories WHERE tenant_id = $1 AND id = $2")
            .bind(self.tenant_id)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn count_categories(&self) -> Result<i64, AppError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM categories WHERE tenant_id = $1")
                .bind(self.tenant_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }

    // --- Produtos ---

    pub async fn list_products(
        &self,
        category_id: Option<Uuid>,
        search: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Product>, AppError> {
        let pattern = search.map(|s| format!("%{}%", s));

        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT * FROM products
            WHERE tenant_id = $1
              AND ($2::uuid IS NULL OR category_id = $2)
              AND ($3::text IS NULL OR name ILIKE $3)
            ORDER BY created_at DESC
            LIMIT $4 OFFSET $5
            "#,
        )
        .bind(self.tenant_id)
        .bind(category_id)
        .bind(pattern)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    pub async fn count_products(
        &self,
        category_id: Option<Uuid>,
        search: Option<&str>,
    ) -> Result<i64, AppError> {
        let pattern = search.map(|s| format!("%{}%", s));

        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM products
            WHERE tenant_id = $1
              AND ($2::uuid IS NULL OR category_id = $2)
              AND ($3::text IS NULL OR name ILIKE $3)
            "#,
        )
        .bind(self.tenant_id)
        .bind(category_id)
        .bind(pattern)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    pub async fn find_product(&self, id: Uuid) -> Result<Option<Product>, AppError> {
        let product = sqlx::query_as::<_, Product>(
            "SELECT * FROM products WHERE tenant_id = $1 AND id = $2",
        )
        .bind(self.tenant_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create_product(
        &self,
        category_id: Uuid,
        name: &str,
        description: &str,
        price: i64,
        image_url: Option<&str>,
        badge: Option<&str>,
        specs: Option<HashMap<String, String>>,
    ) -> Result<Product, AppError> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (tenant_id, category_id, name, description, price, image_url, badge, specs)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(self.tenant_id)
        .bind(category_id)
        .bind(name)
        .bind(description)
        .bind(price)
        .bind(image_url)
        .bind(badge)
        .bind(specs.map(Json))
        .fetch_one(&self.pool)
        .await?;

        Ok(product)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update_product(
        &self,
        id: Uuid,
        category_id: Uuid,
        name: &str,
        description: &str,
        price: i64,
        image_url: Option<&str>,
        badge: Option<&str>,
        specs: Option<HashMap<String, String>>,
    ) -> Result<Option<Product>, AppError> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET category_id = $3, name = $4, description = $5, price = $6,
                image_url = $7, badge = $8, specs = $9
            WHERE tenant_id = $1 AND id = $2
            RETURNING *
            "#,
        )
        .bind(self.tenant_id)
        .bind(id)
        .bind(category_id)
        .bind(name)
        .bind(description)
        .bind(price)
        .bind(image_url)
        .bind(badge)
        .bind(specs.map(Json))
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    pub async fn delete_product(&self, id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM products WHERE tenant_id = $1 AND id = $2")
            .bind(self.tenant_id)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::postgres::PgPoolOptions;

    // Roda apenas com um Postgres de teste disponível; sem a variável o
    // teste retorna cedo (visto como "passed" pelo harness).
    async fn test_pool() -> Option<PgPool> {
        let url = std::env::var("TEST_DATABASE_URL").ok()?;
        let pool = PgPoolOptions::new()
            .max_connections(2)
            .connect(&url)
            .await
            .expect("falha ao conectar no banco de teste");
        sqlx::migrate!()
            .run(&pool)
            .await
            .expect("falha ao migrar o banco de teste");
        Some(pool)
    }

    async fn seed_tenant(pool: &PgPool, slug: &str) -> Tenant {
        sqlx::query_as::<_, Tenant>(
            r#"
            INSERT INTO tenants (slug, name)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(slug)
        .bind(format!("Loja {}", slug))
        .fetch_one(pool)
        .await
        .expect("falha ao semear tenant")
    }

    #[tokio::test]
    async fn leituras_escopadas_nunca_vazam_entre_tenants() {
        let Some(pool) = test_pool().await else {
            return;
        };

        let suffix = Uuid::new_v4().simple().to_string();
        let tenant_a = seed_tenant(&pool, &format!("loja-a-{}", suffix)).await;
        let tenant_b = seed_tenant(&pool, &format!("loja-b-{}", suffix)).await;

        let repo = CatalogRepository::new(pool.clone());
        let scoped_a = repo.for_tenant(&tenant_a);
        let scoped_b = repo.for_tenant(&tenant_b);

        let cat_a = scoped_a
            .create_category("Bombas", "bombas")
            .await
            .expect("categoria A");
        let cat_b = scoped_b
            .create_category("Válvulas", "valvulas")
            .await
            .expect("categoria B");

        let prod_a = scoped_a
            .create_product(cat_a.id, "Bomba centrífuga", "", 150_000, None, None, None)
            .await
            .expect("produto A");
        scoped_b
            .create_product(cat_b.id, "Válvula gaveta", "", 80_000, None, None, None)
            .await
            .expect("produto B");

        // Cada tenant enxerga exatamente seu próprio catálogo
        let products_a = scoped_a.list_products(None, None, 50, 0).await.unwrap();
        let products_b = scoped_b.list_products(None, None, 50, 0).await.unwrap();
        assert!(products_a.iter().all(|p| p.name != "Válvula gaveta"));
        assert!(products_b.iter().all(|p| p.name != "Bomba centrífuga"));

        // Busca por ID de outro tenant responde None, não o registro alheio
        assert!(scoped_b.find_product(prod_a.id).await.unwrap().is_none());
        assert!(scoped_b.find_category(cat_a.id).await.unwrap().is_none());

        // Mutação cruzada não afeta linha nenhuma
        assert_eq!(scoped_b.delete_product(prod_a.id).await.unwrap(), 0);
        assert!(scoped_a.find_product(prod_a.id).await.unwrap().is_some());

        // Contagens de uso também são por tenant
        assert_eq!(scoped_a.count_products(None, None).await.unwrap(), 1);
        assert_eq!(scoped_a.count_categories().await.unwrap(), 1);

        sqlx::query("DELETE FROM tenants WHERE id = $1 OR id = $2")
            .bind(tenant_a.id)
            .bind(tenant_b.id)
            .execute(&pool)
            .await
            .unwrap();
    }
}
