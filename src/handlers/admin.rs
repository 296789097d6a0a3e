// src/handlers/admin.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{i18n::Locale, tenancy::CurrentTenant},
    models::{
        catalog::{CreateCategoryPayload, CreateProductPayload, UpdateProductPayload},
        inquiry::UpdateInquiryPayload,
    },
};

// ---
// Produtos
// ---

// POST /api/admin/products
#[utoipa::path(
    post,
    path = "/api/admin/products",
    request_body = CreateProductPayload,
    responses(
        (status = 201, description = "Produto criado", body = crate::models::catalog::Product),
        (status = 400, description = "Payload inválido ou limite do plano atingido")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_product(
    State(app_state): State<AppState>,
    locale: Locale,
    CurrentTenant(tenant): CurrentTenant,
    Json(payload): Json<CreateProductPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let to_api = |e: AppError| e.to_api_error(&locale, &app_state.i18n_store);

    payload.validate().map_err(|e| to_api(AppError::ValidationError(e)))?;

    // O relatório de uso é consultivo; aqui (o chamador) decidimos bloquear
    let usage = app_state
        .tenancy_service
        .check_usage_limits(&tenant)
        .await
        .map_err(to_api)?;
    if !usage.products.can_add {
        return Err(to_api(AppError::LimitReached("limit.products_reached")));
    }

    let product = app_state
        .catalog_service
        .create_product(&tenant, payload)
        .await
        .map_err(to_api)?;

    Ok((StatusCode::CREATED, Json(product)))
}

// PUT /api/admin/products/{id}
#[utoipa::path(
    put,
    path = "/api/admin/products/{id}",
    params(("id" = Uuid, Path, description = "ID do produto")),
    request_body = UpdateProductPayload,
    responses(
        (status = 200, description = "Produto atualizado", body = crate::models::catalog::Product),
        (status = 404, description = "Produto não encontrado")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_product(
    State(app_state): State<AppState>,
    locale: Locale,
    CurrentTenant(tenant): CurrentTenant,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProductPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let to_api = |e: AppError| e.to_api_error(&locale, &app_state.i18n_store);

    payload.validate().map_err(|e| to_api(AppError::ValidationError(e)))?;

    let product = app_state
        .catalog_service
        .update_product(&tenant, id, payload)
        .await
        .map_err(to_api)?;

    Ok((StatusCode::OK, Json(product)))
}

// DELETE /api/admin/products/{id}
#[utoipa::path(
    delete,
    path = "/api/admin/products/{id}",
    params(("id" = Uuid, Path, description = "ID do produto")),
    responses(
        (status = 204, description = "Produto removido"),
        (status = 404, description = "Produto não encontrado")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_product(
    State(app_state): State<AppState>,
    locale: Locale,
    CurrentTenant(tenant): CurrentTenant,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .catalog_service
        .delete_product(&tenant, id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}

// ---
// Categorias
// ---

// POST /api/admin/categories
#[utoipa::path(
    post,
    path = "/api/admin/categories",
    request_body = CreateCategoryPayload,
    responses(
        (status = 201, description = "Categoria criada", body = crate::models::catalog::Category),
        (status = 400, description = "Payload inválido ou limite do plano atingido")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_category(
    State(app_state): State<AppState>,
    locale: Locale,
    CurrentTenant(tenant): CurrentTenant,
    Json(payload): Json<CreateCategoryPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let to_api = |e: AppError| e.to_api_error(&locale, &app_state.i18n_store);

    payload.validate().map_err(|e| to_api(AppError::ValidationError(e)))?;

    let usage = app_state
        .tenancy_service
        .check_usage_limits(&tenant)
        .await
        .map_err(to_api)?;
    if !usage.categories.can_add {
        return Err(to_api(AppError::LimitReached("limit.categories_reached")));
    }

    let category = app_state
        .catalog_service
        .create_category(&tenant, payload)
        .await
        .map_err(to_api)?;

    Ok((StatusCode::CREATED, Json(category)))
}

// DELETE /api/admin/categories/{id}
#[utoipa::path(
    delete,
    path = "/api/admin/categories/{id}",
    params(("id" = Uuid, Path, description = "ID da categoria")),
    responses(
        (status = 204, description = "Categoria removida"),
        (status = 404, description = "Categoria não encontrada")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_category(
    State(app_state): State<AppState>,
    locale: Locale,
    CurrentTenant(tenant): CurrentTenant,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .catalog_service
        .delete_category(&tenant, id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}

// ---
// Consultas
// ---

#[derive(Debug, Deserialize, IntoParams)]
pub struct InquiryListQuery {
    // Filtro por status (pending|contacted|completed|cancelled)
    pub status: Option<String>,
}

// GET /api/admin/inquiries
#[utoipa::path(
    get,
    path = "/api/admin/inquiries",
    params(InquiryListQuery),
    responses((status = 200, description = "Consultas do tenant", body = [crate::models::inquiry::Inquiry])),
    security(("bearer_auth" = []))
)]
pub async fn list_inquiries(
    State(app_state): State<AppState>,
    locale: Locale,
    CurrentTenant(tenant): CurrentTenant,
    Query(query): Query<InquiryListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let inquiries = app_state
        .inquiry_service
        .list(&tenant, query.status.as_deref())
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(inquiries)))
}

// PATCH /api/admin/inquiries/{id}
#[utoipa::path(
    patch,
    path = "/api/admin/inquiries/{id}",
    params(("id" = Uuid, Path, description = "ID da consulta")),
    request_body = UpdateInquiryPayload,
    responses(
        (status = 200, description = "Consulta atualizada", body = crate::models::inquiry::Inquiry),
        (status = 400, description = "Status inválido ou nada a atualizar"),
        (status = 404, description = "Consulta não encontrada")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_inquiry(
    State(app_state): State<AppState>,
    locale: Locale,
    CurrentTenant(tenant): CurrentTenant,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateInquiryPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let inquiry = app_state
        .inquiry_service
        .update(&tenant, id, payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(inquiry)))
}

// ---
// Limites do plano
// ---

// GET /api/admin/limits
#[utoipa::path(
    get,
    path = "/api/admin/limits",
    responses((status = 200, description = "Uso atual vs. limites do plano", body = crate::models::tenancy::UsageReport)),
    security(("bearer_auth" = []))
)]
pub async fn get_usage_limits(
    State(app_state): State<AppState>,
    locale: Locale,
    CurrentTenant(tenant): CurrentTenant,
) -> Result<impl IntoResponse, ApiError> {
    let usage = app_state
        .tenancy_service
        .check_usage_limits(&tenant)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(usage)))
}
