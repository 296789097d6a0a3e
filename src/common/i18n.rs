// src/common/i18n.rs

use std::collections::HashMap;

use crate::middleware::i18n::Locale;

const DEFAULT_LANG: &str = "en";

/// Catálogo de mensagens voltadas ao usuário. Mensagens de erro de
/// validação e autorização são traduzidas; erros internos sempre viram
/// uma mensagem genérica (o detalhe fica no log do servidor).
#[derive(Clone)]
pub struct I18nStore {
    messages: HashMap<&'static str, HashMap<&'static str, &'static str>>,
}

impl I18nStore {
    pub fn new() -> Self {
        let mut messages: HashMap<&'static str, HashMap<&'static str, &'static str>> =
            HashMap::new();

        messages.insert(
            "en",
            HashMap::from([
                ("validation.invalid_fields", "One or more fields are invalid."),
                ("auth.invalid_credentials", "Invalid e-mail or password."),
                ("auth.invalid_token", "Missing or invalid authentication token."),
                ("auth.forbidden", "You are not an administrator of this tenant."),
                ("inquiry.name_too_short", "Name/company must be at least 2 characters."),
                ("inquiry.contact_required", "Please provide a contact."),
                ("inquiry.cart_empty", "The cart is empty."),
                ("inquiry.invalid_status", "Invalid inquiry status."),
                ("inquiry.nothing_to_update", "Nothing to update."),
                ("inquiry.not_found", "Inquiry not found."),
                ("inquiry.rate_limited", "Too many requests. Please try again later."),
                ("catalog.product_not_found", "Product not found."),
                ("catalog.category_not_found", "Category not found."),
                ("limit.products_reached", "Product limit for the current plan reached."),
                ("limit.categories_reached", "Category limit for the current plan reached."),
                ("error.internal", "An unexpected error occurred."),
            ]),
        );

        messages.insert(
            "pt",
            HashMap::from([
                ("validation.invalid_fields", "Um ou mais campos são inválidos."),
                ("auth.invalid_credentials", "E-mail ou senha inválidos."),
                ("auth.invalid_token", "Token de autenticação inválido ou ausente."),
                ("auth.forbidden", "Você não é administrador deste tenant."),
                ("inquiry.name_too_short", "O nome/empresa deve ter no mínimo 2 caracteres."),
                ("inquiry.contact_required", "Informe um contato."),
                ("inquiry.cart_empty", "O carrinho está vazio."),
                ("inquiry.invalid_status", "Status de consulta inválido."),
                ("inquiry.nothing_to_update", "Não há nada para atualizar."),
                ("inquiry.not_found", "Consulta não encontrada."),
                ("inquiry.rate_limited", "Muitas requisições. Tente novamente em instantes."),
                ("catalog.product_not_found", "Produto não encontrado."),
                ("catalog.category_not_found", "Categoria não encontrada."),
                ("limit.products_reached", "Limite de produtos do plano atual atingido."),
                ("limit.categories_reached", "Limite de categorias do plano atual atingido."),
                ("error.internal", "Ocorreu um erro inesperado."),
            ]),
        );

        messages.insert(
            "ko",
            HashMap::from([
                ("validation.invalid_fields", "하나 이상의 필드가 유효하지 않습니다."),
                ("auth.invalid_credentials", "이메일 또는 비밀번호가 올바르지 않습니다."),
                ("auth.invalid_token", "인증 토큰이 없거나 유효하지 않습니다."),
                ("auth.forbidden", "이 테넌트의 관리자가 아닙니다."),
                ("inquiry.name_too_short", "이름/회사명은 최소 2자 이상이어야 합니다."),
                ("inquiry.contact_required", "연락처를 입력해주세요."),
                ("inquiry.cart_empty", "장바구니가 비어있습니다."),
                ("inquiry.invalid_status", "유효하지 않은 상태입니다."),
                ("inquiry.nothing_to_update", "업데이트할 내용이 없습니다."),
                ("inquiry.not_found", "문의를 찾을 수 없습니다."),
                ("inquiry.rate_limited", "요청이 너무 많습니다. 잠시 후 다시 시도해주세요."),
                ("catalog.product_not_found", "제품을 찾을 수 없습니다."),
                ("catalog.category_not_found", "카테고리를 찾을 수 없습니다."),
                ("limit.products_reached", "현재 플랜의 제품 한도에 도달했습니다."),
                ("limit.categories_reached", "현재 플랜의 카테고리 한도에 도달했습니다."),
                ("error.internal", "예기치 않은 오류가 발생했습니다."),
            ]),
        );

        Self { messages }
    }

    /// Busca a mensagem para o idioma pedido; cai para o inglês e, em
    /// último caso, devolve a própria chave (bug de catálogo visível no log).
    pub fn t(&self, locale: &Locale, key: &str) -> String {
        let lang = if self.messages.contains_key(locale.0.as_str()) {
            locale.0.as_str()
        } else {
            DEFAULT_LANG
        };

        self.messages
            .get(lang)
            .and_then(|table| table.get(key))
            .or_else(|| self.messages.get(DEFAULT_LANG).and_then(|t| t.get(key)))
            .map(|m| m.to_string())
            .unwrap_or_else(|| {
                tracing::warn!("Chave i18n ausente no catálogo: {}", key);
                key.to_string()
            })
    }
}

impl Default for I18nStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn traduz_para_o_idioma_pedido() {
        let store = I18nStore::new();
        let msg = store.t(&Locale("pt".into()), "inquiry.cart_empty");
        assert_eq!(msg, "O carrinho está vazio.");
    }

    #[test]
    fn idioma_desconhecido_cai_para_ingles() {
        let store = I18nStore::new();
        let msg = store.t(&Locale("fr".into()), "inquiry.cart_empty");
        assert_eq!(msg, "The cart is empty.");
    }

    #[test]
    fn chave_ausente_vira_a_propria_chave() {
        let store = I18nStore::new();
        assert_eq!(store.t(&Locale("en".into()), "nao.existe"), "nao.existe");
    }
}
