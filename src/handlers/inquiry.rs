// src/handlers/inquiry.rs

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{i18n::Locale, rate_limit::client_ip, tenancy::CurrentTenant},
    models::inquiry::{CreateInquiryPayload, CreateInquiryResponse},
    services::inquiry_service::CreateOutcome,
};

// POST /api/inquiries
//
// Rota pública, protegida por rate limit por IP e honeypot. O honeypot
// responde 201 com inquiry_id "blocked" sem persistir nada.
#[utoipa::path(
    post,
    path = "/api/inquiries",
    request_body = CreateInquiryPayload,
    responses(
        (status = 201, description = "Consulta registrada", body = CreateInquiryResponse),
        (status = 400, description = "Payload inválido"),
        (status = 429, description = "Limite de requisições excedido")
    )
)]
pub async fn create_inquiry(
    State(app_state): State<AppState>,
    locale: Locale,
    headers: HeaderMap,
    CurrentTenant(tenant): CurrentTenant,
    Json(payload): Json<CreateInquiryPayload>,
) -> Result<impl IntoResponse, ApiError> {
    // Rate limit antes de qualquer validação ou acesso ao banco
    let ip = client_ip(&headers);
    let decision = app_state.inquiry_rate_limiter.check(&ip);
    if !decision.allowed {
        return Err(AppError::RateLimited {
            retry_after: decision.retry_after_secs,
        }
        .to_api_error(&locale, &app_state.i18n_store));
    }

    let outcome = app_state
        .inquiry_service
        .create(&tenant, payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let response = match outcome {
        CreateOutcome::Blocked => CreateInquiryResponse {
            success: true,
            inquiry_id: "blocked".to_string(),
        },
        CreateOutcome::Created(inquiry) => CreateInquiryResponse {
            success: true,
            inquiry_id: inquiry.id.to_string(),
        },
    };

    Ok((StatusCode::CREATED, Json(response)))
}
