// src/handlers/quotation.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::Local;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{i18n::Locale, tenancy::CurrentTenant},
    models::quotation::{CartLine, GenerateQuotationPayload},
    services::quotation_service,
};

// POST /api/quotations
//
// Gera um documento novo a cada chamada (número novo, data de agora);
// o carrinho nunca é persistido aqui. Carrinho vazio é válido e produz
// um documento com totais zerados.
#[utoipa::path(
    post,
    path = "/api/quotations",
    request_body = GenerateQuotationPayload,
    responses(
        (status = 200, description = "Documento de orçamento gerado", body = crate::models::quotation::QuotationDocument),
        (status = 400, description = "Payload inválido")
    )
)]
pub async fn generate_quotation(
    State(app_state): State<AppState>,
    locale: Locale,
    CurrentTenant(tenant): CurrentTenant,
    Json(payload): Json<GenerateQuotationPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let cart: Vec<CartLine> = payload
        .items
        .into_iter()
        .map(|line| line.into_cart_line())
        .collect();
    let recipient = payload.recipient.into_recipient();

    // O emissor é sempre a empresa cadastrada no tenant resolvido
    let company = tenant.company_info.0.clone();

    let document = quotation_service::generate_document(
        &cart,
        recipient,
        company,
        Local::now().naive_local(),
    );

    tracing::info!(
        tenant = %tenant.slug,
        numero = %document.metadata.number,
        itens = document.items.len(),
        "Orçamento gerado"
    );

    Ok((StatusCode::OK, Json(document)))
}
