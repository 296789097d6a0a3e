// src/common/error.rs

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::common::i18n::I18nStore;
use crate::middleware::i18n::Locale;

// Nosso tipo de erro de domínio, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // Erro 400 com mensagem localizada (a variante carrega a chave i18n)
    #[error("Requisição inválida: {0}")]
    BadRequest(&'static str),

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Acesso negado")]
    Forbidden,

    // 404 com chave i18n (produto, categoria, consulta...)
    #[error("Recurso não encontrado: {0}")]
    NotFound(&'static str),

    #[error("Status de consulta inválido: {0}")]
    InvalidStatus(String),

    // Limite do plano atingido (chave i18n do recurso esgotado)
    #[error("Limite do plano atingido: {0}")]
    LimitReached(&'static str),

    #[error("Limite de requisições excedido")]
    RateLimited { retry_after: u64 },

    // Tenant ausente ou inativo: erro de configuração do deployment.
    // Nunca degrada para um tenant vazio; a requisição é abortada.
    #[error("Configuração de tenant inválida: {0}")]
    TenantConfig(String),

    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

// O erro que atravessa a fronteira HTTP: status + mensagem já traduzida.
// Detalhes internos ficam no log, nunca no corpo da resposta.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub details: Option<Value>,
    pub retry_after: Option<u64>,
}

impl ApiError {
    pub fn new(status: StatusCode, error: impl Into<String>) -> Self {
        Self {
            status,
            error: error.into(),
            details: None,
            retry_after: None,
        }
    }
}

impl AppError {
    /// Converte o erro de domínio em resposta HTTP, traduzindo a
    /// mensagem para o idioma pedido pelo cliente.
    pub fn to_api_error(&self, locale: &Locale, store: &I18nStore) -> ApiError {
        match self {
            AppError::ValidationError(errors) => {
                let mut details = serde_json::Map::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<Value> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| Value::String(m.to_string())))
                        .collect();
                    details.insert(field.to_string(), Value::Array(messages));
                }
                ApiError {
                    status: StatusCode::BAD_REQUEST,
                    error: store.t(locale, "validation.invalid_fields"),
                    details: Some(Value::Object(details)),
                    retry_after: None,
                }
            }
            AppError::BadRequest(key) => {
                ApiError::new(StatusCode::BAD_REQUEST, store.t(locale, key))
            }
            AppError::InvalidCredentials => {
                ApiError::new(StatusCode::UNAUTHORIZED, store.t(locale, "auth.invalid_credentials"))
            }
            AppError::InvalidToken => {
                ApiError::new(StatusCode::UNAUTHORIZED, store.t(locale, "auth.invalid_token"))
            }
            AppError::Forbidden => {
                ApiError::new(StatusCode::FORBIDDEN, store.t(locale, "auth.forbidden"))
            }
            AppError::NotFound(key) => ApiError::new(StatusCode::NOT_FOUND, store.t(locale, key)),
            AppError::InvalidStatus(value) => {
                tracing::warn!("Status de consulta rejeitado: {:?}", value);
                ApiError::new(StatusCode::BAD_REQUEST, store.t(locale, "inquiry.invalid_status"))
            }
            AppError::LimitReached(key) => {
                ApiError::new(StatusCode::BAD_REQUEST, store.t(locale, key))
            }
            AppError::RateLimited { retry_after } => ApiError {
                status: StatusCode::TOO_MANY_REQUESTS,
                error: store.t(locale, "inquiry.rate_limited"),
                details: None,
                retry_after: Some(*retry_after),
            },
            AppError::TenantConfig(detail) => {
                // Detalhe completo no log; resposta genérica para o cliente.
                tracing::error!("Falha na resolução do tenant: {}", detail);
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, store.t(locale, "error.internal"))
            }
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, store.t(locale, "error.internal"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejeicoes_dos_extratores_usam_o_catalogo_de_mensagens() {
        let store = I18nStore::new();

        // Admin ausente nas extensions -> 401 com a mensagem traduzida
        let api = AppError::InvalidToken.to_api_error(&Locale("pt".to_string()), &store);
        assert_eq!(api.status, StatusCode::UNAUTHORIZED);
        assert_eq!(api.error, "Token de autenticação inválido ou ausente.");

        // Tenant ausente nas extensions -> 500 genérico traduzido,
        // nunca o detalhe interno
        let api = AppError::TenantConfig("detalhe interno".to_string())
            .to_api_error(&Locale("en".to_string()), &store);
        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api.error, "An unexpected error occurred.");
        assert!(!api.error.contains("detalhe interno"));
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut body = json!({ "error": self.error });
        if let Some(details) = self.details {
            body["details"] = details;
        }
        if let Some(secs) = self.retry_after {
            body["retryAfter"] = json!(secs);
        }

        let mut response = (self.status, Json(body)).into_response();
        if let Some(secs) = self.retry_after {
            if let Ok(value) = secs.to_string().parse() {
                response.headers_mut().insert(header::RETRY_AFTER, value);
            }
        }
        response
    }
}
