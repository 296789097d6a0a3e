// src/models/inquiry.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

// ---
// 1. Status da consulta
// ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "inquiry_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum InquiryStatus {
    Pending,
    Contacted,
    Completed,
    Cancelled,
}

// O PATCH administrativo recebe o status como string livre; qualquer
// valor fora do conjunto é rejeitado com 400.
impl FromStr for InquiryStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "contacted" => Ok(Self::Contacted),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(()),
        }
    }
}

// ---
// 2. Itens da consulta (snapshot do carrinho, guardado como JSONB)
// ---
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InquiryItem {
    pub product_id: Uuid,
    pub product_name: String,
    pub product_price: i64,
    pub quantity: u32,
    pub subtotal: i64,
}

// ---
// 3. A consulta persistida
// ---
// Campos no mesmo formato do contrato de criação (snake_case).
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct Inquiry {
    pub id: Uuid,
    #[serde(skip_serializing)]
    pub tenant_id: Uuid,
    pub customer_name: String,
    pub customer_contact: String,
    pub message: Option<String>,
    #[schema(value_type = Vec<InquiryItem>)]
    pub items: Json<Vec<InquiryItem>>,
    pub total_amount: i64,
    pub status: InquiryStatus,
    pub admin_note: Option<String>,
    pub created_at: DateTime<Utc>,
}

// ---
// 4. Payloads
// ---
// Criação pública. O campo `website` é um honeypot: usuários legítimos
// nunca o preenchem; valor não-vazio indica submissão automatizada.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateInquiryPayload {
    pub customer_name: String,
    pub customer_contact: String,
    pub message: Option<String>,
    pub items: Vec<InquiryItem>,
    pub total_amount: i64,
    #[serde(default)]
    pub website: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateInquiryPayload {
    pub status: Option<String>,
    pub admin_note: Option<String>,
}

// Resposta de criação: `inquiry_id` é "blocked" quando o honeypot
// dispara (a resposta finge sucesso, nada é persistido).
#[derive(Debug, Serialize, ToSchema)]
pub struct CreateInquiryResponse {
    pub success: bool,
    pub inquiry_id: String,
}
