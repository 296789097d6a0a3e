// src/middleware/tenancy.rs

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
    models::tenancy::Tenant,
};

// ---
// Resolução do tenant, uma única vez por requisição
// ---
// O slug vem da configuração do deployment (TENANT_SLUG), nunca de
// cabeçalho ou parâmetro do cliente. O tenant resolvido entra nas
// extensions e todos os pontos da requisição observam o MESMO valor,
// sem novas consultas ao banco.
//
// Tenant ausente ou inativo é erro de configuração: a requisição é
// abortada com 500 genérico (o detalhe vai para o log). Cair para um
// "tenant vazio" arriscaria misturar dados entre tenants.
pub async fn tenant_resolver(
    State(app_state): State<AppState>,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let locale = Locale::from_headers(request.headers());

    let tenant = app_state
        .tenancy_service
        .resolve_tenant()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    request.extensions_mut().insert(tenant);
    Ok(next.run(request).await)
}

// Extrator do tenant já resolvido pelo middleware.
#[derive(Debug, Clone)]
pub struct CurrentTenant(pub Tenant);

impl FromRequestParts<AppState> for CurrentTenant {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Tenant>()
            .cloned()
            .map(CurrentTenant)
            // Só acontece se uma rota esquecer o layer de resolução:
            // bug de roteamento, não erro do cliente. Mensagem genérica
            // traduzida; o detalhe vai para o log.
            .ok_or_else(|| {
                let locale = Locale::from_headers(&parts.headers);
                AppError::TenantConfig("rota sem o layer de resolução de tenant".to_string())
                    .to_api_error(&locale, &state.i18n_store)
            })
    }
}
