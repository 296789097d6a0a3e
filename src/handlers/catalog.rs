// src/handlers/catalog.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::{i18n::Locale, tenancy::CurrentTenant},
};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ProductListQuery {
    // Slug da categoria (ex: "power-tools")
    pub category: Option<String>,
    // Busca por nome (ILIKE)
    pub search: Option<String>,
    pub page: Option<i64>,
}

// GET /api/categories
#[utoipa::path(
    get,
    path = "/api/categories",
    responses((status = 200, description = "Categorias do tenant", body = [crate::models::catalog::Category]))
)]
pub async fn list_categories(
    State(app_state): State<AppState>,
    locale: Locale,
    CurrentTenant(tenant): CurrentTenant,
) -> Result<impl IntoResponse, ApiError> {
    let categories = app_state
        .catalog_service
        .list_categories(&tenant)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(categories)))
}

// GET /api/products
#[utoipa::path(
    get,
    path = "/api/products",
    params(ProductListQuery),
    responses((status = 200, description = "Página de produtos", body = crate::models::catalog::ProductPage))
)]
pub async fn list_products(
    State(app_state): State<AppState>,
    locale: Locale,
    CurrentTenant(tenant): CurrentTenant,
    Query(query): Query<ProductListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let page = app_state
        .catalog_service
        .list_products(
            &tenant,
            query.category.as_deref(),
            query.search.as_deref(),
            query.page.unwrap_or(1),
        )
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(page)))
}

// GET /api/products/{id}
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(("id" = Uuid, Path, description = "ID do produto")),
    responses(
        (status = 200, description = "Produto", body = crate::models::catalog::Product),
        (status = 404, description = "Produto não encontrado")
    )
)]
pub async fn get_product(
    State(app_state): State<AppState>,
    locale: Locale,
    CurrentTenant(tenant): CurrentTenant,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let product = app_state
        .catalog_service
        .get_product(&tenant, id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(product)))
}
