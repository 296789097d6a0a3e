// src/middleware/auth.rs

use axum::{
    extract::{FromRequestParts, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::i18n::Locale,
    models::{auth::AdminUser, tenancy::Tenant},
};

// ---
// Guarda das rotas administrativas
// ---
// Valida o Bearer token, carrega o administrador e verifica a
// autorização contra o tenant resolvido (super_admin passa em qualquer
// tenant). Roda DEPOIS do tenant_resolver, que já populou as extensions.
pub async fn auth_guard(
    State(app_state): State<AppState>,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let locale = Locale::from_headers(request.headers());
    let to_api = |e: AppError| e.to_api_error(&locale, &app_state.i18n_store);

    let token = request
        .headers()
        .get("Authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(AppError::InvalidToken)
        .map_err(to_api)?;

    let admin = app_state
        .auth_service
        .validate_token(token)
        .await
        .map_err(to_api)?;

    let tenant = request
        .extensions()
        .get::<Tenant>()
        .cloned()
        .ok_or_else(|| AppError::TenantConfig("auth_guard sem tenant_resolver na rota".into()))
        .map_err(to_api)?;

    // A verificação de autorização em duas fases (super_admin ignora o
    // vínculo de tenant; admin comum precisa casar com o tenant resolvido)
    if !crate::services::auth_service::is_authorized_admin(&admin, &tenant) {
        return Err(to_api(AppError::Forbidden));
    }

    request.extensions_mut().insert(admin);
    Ok(next.run(request).await)
}

// Extrator para obter o administrador autenticado diretamente nos handlers
pub struct CurrentAdmin(pub AdminUser);

impl FromRequestParts<AppState> for CurrentAdmin {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AdminUser>()
            .cloned()
            .map(CurrentAdmin)
            // Rota protegida sem o auth_guard: mesma resposta 401
            // traduzida que o guard daria para um token ausente.
            .ok_or_else(|| {
                let locale = Locale::from_headers(&parts.headers);
                AppError::InvalidToken.to_api_error(&locale, &state.i18n_store)
            })
    }
}
