// src/models/catalog.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use std::collections::HashMap;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// ---
// 1. Categoria
// ---
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Uuid,
    #[serde(skip_serializing)]
    pub tenant_id: Uuid,
    pub name: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,
}

// ---
// 2. Produto
// ---
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    #[serde(skip_serializing)]
    pub tenant_id: Uuid,
    pub category_id: Uuid,
    pub name: String,
    pub description: String,
    // Unidades inteiras de moeda
    pub price: i64,
    pub image_url: Option<String>,
    pub badge: Option<String>,
    // Especificações técnicas livres (chave -> valor)
    #[schema(value_type = Object)]
    pub specs: Option<Json<HashMap<String, String>>>,
    pub created_at: DateTime<Utc>,
}

// Página de produtos do catálogo público.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
}

// ---
// 3. Payloads administrativos
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductPayload {
    #[validate(length(min = 1, message = "O nome do produto é obrigatório."))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[validate(range(min = 0, message = "O preço não pode ser negativo."))]
    pub price: i64,
    pub category_id: Uuid,
    pub image_url: Option<String>,
    pub badge: Option<String>,
    #[schema(value_type = Object)]
    pub specs: Option<HashMap<String, String>>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductPayload {
    #[validate(length(min = 1, message = "O nome do produto é obrigatório."))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[validate(range(min = 0, message = "O preço não pode ser negativo."))]
    pub price: i64,
    pub category_id: Uuid,
    pub image_url: Option<String>,
    pub badge: Option<String>,
    #[schema(value_type = Object)]
    pub specs: Option<HashMap<String, String>>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryPayload {
    #[validate(length(min = 1, message = "O nome da categoria é obrigatório."))]
    pub name: String,
    #[validate(length(min = 1, message = "O slug da categoria é obrigatório."))]
    pub slug: String,
}
