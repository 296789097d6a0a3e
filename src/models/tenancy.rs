// src/models/tenancy.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::{types::Json, FromRow};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::quotation::CompanyInfo;

// ---
// 1. Plano do tenant
// ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "tenant_plan", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    Free,
    Pro,
    Enterprise,
}

// Limites configurados por plano, guardados como JSONB na linha do tenant.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlanLimits {
    pub max_products: i64,
    pub max_categories: i64,
    pub max_quotations_per_month: i64,
}

// ---
// 2. Tenant (a instância isolada de um cliente da plataforma)
// ---
// Identificado externamente pelo slug estável; resolvido uma vez por
// requisição a partir da configuração do deployment. Somente leitura
// do ponto de vista da aplicação.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub domain: Option<String>,
    // Branding livre (cores, logo...), consumido pelo front
    pub theme: Json<Value>,
    // Dados da empresa usados como emissor padrão dos orçamentos
    pub company_info: Json<CompanyInfo>,
    pub plan: Plan,
    pub limits: Json<PlanLimits>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Resumo seguro para expor em /api/admin/me.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TenantSummary {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub plan: Plan,
}

impl Tenant {
    pub fn summary(&self) -> TenantSummary {
        TenantSummary {
            id: self.id,
            slug: self.slug.clone(),
            name: self.name.clone(),
            plan: self.plan,
        }
    }
}

// ---
// 3. Relatório de uso vs. limites do plano
// ---
// Consultivo: quem decide bloquear a escrita é o chamador.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UsageSlot {
    pub current: i64,
    pub max: i64,
    pub can_add: bool,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UsageReport {
    pub products: UsageSlot,
    pub categories: UsageSlot,
}

impl UsageSlot {
    pub fn new(current: i64, max: i64) -> Self {
        Self {
            current,
            max,
            can_add: current < max,
        }
    }
}
