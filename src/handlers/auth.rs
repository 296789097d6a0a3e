// src/handlers/auth.rs

use axum::{extract::State, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{auth::CurrentAdmin, i18n::Locale, tenancy::CurrentTenant},
    models::auth::{AuthResponse, LoginPayload, MeResponse},
};

// POST /api/admin/login
#[utoipa::path(
    post,
    path = "/api/admin/login",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Token de sessão", body = AuthResponse),
        (status = 401, description = "Credenciais inválidas"),
        (status = 403, description = "Admin de outro tenant")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    locale: Locale,
    CurrentTenant(tenant): CurrentTenant,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<AuthResponse>, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let token = app_state
        .auth_service
        .login(&payload.email, &payload.password, &tenant)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(AuthResponse { token }))
}

// GET /api/admin/me
#[utoipa::path(
    get,
    path = "/api/admin/me",
    responses((status = 200, description = "Administrador autenticado", body = MeResponse)),
    security(("bearer_auth" = []))
)]
pub async fn get_me(
    CurrentTenant(tenant): CurrentTenant,
    CurrentAdmin(admin): CurrentAdmin,
) -> impl IntoResponse {
    Json(MeResponse {
        email: admin.email,
        role: admin.role,
        tenant: tenant.summary(),
    })
}
