// src/db/inquiry_repo.rs

use sqlx::{types::Json, PgPool};
use uuid::Uuid;

use crate::common::error::AppError;
use crate::models::{
    inquiry::{Inquiry, InquiryItem, InquiryStatus},
    tenancy::Tenant,
};

// Mesma disciplina do catálogo: só existe acesso já escopado ao tenant.
#[derive(Clone)]
pub struct InquiryRepository {
    pool: PgPool,
}

impl InquiryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn for_tenant(&self, tenant: &Tenant) -> ScopedInquiryRepository {
        ScopedInquiryRepository {
            pool: self.pool.clone(),
            tenant_id: tenant.id,
        }
    }
}

pub struct ScopedInquiryRepository {
    pool: PgPool,
    tenant_id: Uuid,
}

impl ScopedInquiryRepository {
    /// Persiste uma nova consulta com status `pending`.
    pub async fn create(
        &self,
        customer_name: &str,
        customer_contact: &str,
        message: Option<&str>,
        items: &[InquiryItem],
        total_amount: i64,
    ) -> Result<Inquiry, AppError> {
        let inquiry = sqlx::query_as::<_, Inquiry>(
            r#"
            INSERT INTO inquiries (tenant_id, customer_name, customer_contact, message, items, total_amount, status)
            VALUES ($1, $2, $3, $4, $5, $6, 'pending')
            RETURNING *
            "#,
        )
        .bind(self.tenant_id)
        .bind(customer_name)
        .bind(customer_contact)
        .bind(message)
        .bind(Json(items))
        .bind(total_amount)
        .fetch_one(&self.pool)
        .await?;

        Ok(inquiry)
    }

    pub async fn list(&self, status: Option<InquiryStatus>) -> Result<Vec<Inquiry>, AppError> {
        let inquiries = sqlx::query_as::<_, Inquiry>(
            r#"
            SELECT * FROM inquiries
            WHERE tenant_id = $1
              AND ($2::inquiry_status IS NULL OR status = $2)
            ORDER BY created_at DESC
            "#,
        )
        .bind(self.tenant_id)
        .bind(status)
        .fetch_all(&self.pool)
        .await?;

        Ok(inquiries)
    }

    /// Atualiza status e/ou nota. `None` devolvido = consulta não existe
    /// NESTE tenant (pode existir em outro; para este chamador é 404).
    pub async fn update(
        &self,
        id: Uuid,
        status: Option<InquiryStatus>,
        admin_note: Option<&str>,
    ) -> Result<Option<Inquiry>, AppError> {
        let inquiry = sqlx::query_as::<_, Inquiry>(
            r#"
            UPDATE inquiries
            SET status = COALESCE($3, status),
                admin_note = COALESCE($4, admin_note)
            WHERE tenant_id = $1 AND id = $2
            RETURNING *
            "#,
        )
        .bind(self.tenant_id)
        .bind(id)
        .bind(status)
        .bind(admin_note)
        .fetch_optional(&self.pool)
        .await?;

        Ok(inquiry)
    }
}
