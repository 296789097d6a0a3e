// src/models/quotation.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

// ---
// 1. Carrinho (estado efêmero vindo do cliente)
// ---
// O carrinho vive no cliente; só chega ao servidor no momento de gerar
// o orçamento ou registrar uma consulta.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartProduct {
    pub name: String,
    // Vira o campo "spec" do item do orçamento (string vazia se ausente)
    pub description: Option<String>,
    // Preço unitário em unidades inteiras de moeda (sem centavos neste locale)
    pub price: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product: CartProduct,
    pub quantity: u32,
}

// ---
// 2. Itens e metadados do documento gerado
// ---
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuotationItem {
    // Posição no carrinho, começando em 1. Nunca reordenado.
    pub seq: u32,
    pub name: String,
    // Descrição do produto, verbatim. Vazia, nunca nula.
    pub spec: String,
    pub quantity: u32,
    pub unit_price: i64,
    // Invariante: supply_price = unit_price * quantity, exato.
    pub supply_price: i64,
    // Imposto calculado por linha (nunca rateado de um agregado).
    pub tax_amount: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuotationMetadata {
    // Formato YYYYMMDD-HHMMSS (ex: 20250117-143025)
    pub number: String,
    // Formato ISO YYYY-MM-DD
    pub date: String,
}

// Dados da empresa emissora, vindos do cadastro do tenant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CompanyInfo {
    pub business_number: String,
    pub name: String,
    pub representative: String,
    pub address: String,
    pub business_type: String,
    pub business_category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seal_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_image: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipientInfo {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_person: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

// ---
// 3. O documento completo
// ---
// Montado uma única vez por ação de "gerar"; imutável depois disso.
// Uma nova impressão gera um documento novo (com número novo).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuotationDocument {
    pub metadata: QuotationMetadata,
    pub company: CompanyInfo,
    pub recipient: RecipientInfo,
    pub items: Vec<QuotationItem>,
    pub total_supply_price: i64,
    pub total_tax_amount: i64,
    pub total_amount: i64,
}

// Resultado do cálculo de imposto sobre um valor de fornecimento.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaxBreakdown {
    pub supply_price: i64,
    pub tax_amount: i64,
    pub total_amount: i64,
}

// ---
// 4. Payload da rota POST /api/quotations
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQuotationPayload {
    #[validate(nested)]
    pub items: Vec<CartLinePayload>,

    #[validate(nested)]
    pub recipient: RecipientPayload,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartLinePayload {
    #[validate(length(min = 1, message = "O nome do produto é obrigatório."))]
    pub name: String,
    pub description: Option<String>,
    #[validate(range(min = 0, message = "O preço não pode ser negativo."))]
    pub price: i64,
    #[validate(range(min = 1, message = "A quantidade mínima é 1."))]
    pub quantity: u32,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipientPayload {
    #[validate(length(min = 1, message = "O nome do destinatário é obrigatório."))]
    pub name: String,
    pub contact_person: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl CartLinePayload {
    pub fn into_cart_line(self) -> CartLine {
        CartLine {
            product: CartProduct {
                name: self.name,
                description: self.description,
                price: self.price,
            },
            quantity: self.quantity,
        }
    }
}

impl RecipientPayload {
    pub fn into_recipient(self) -> RecipientInfo {
        RecipientInfo {
            name: self.name,
            contact_person: self.contact_person,
            phone: self.phone,
            address: self.address,
        }
    }
}
