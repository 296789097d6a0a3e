// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Catálogo ---
        handlers::catalog::list_categories,
        handlers::catalog::list_products,
        handlers::catalog::get_product,

        // --- Orçamentos ---
        handlers::quotation::generate_quotation,

        // --- Consultas ---
        handlers::inquiry::create_inquiry,

        // --- Auth ---
        handlers::auth::login,
        handlers::auth::get_me,

        // --- Admin ---
        handlers::admin::create_product,
        handlers::admin::update_product,
        handlers::admin::delete_product,
        handlers::admin::create_category,
        handlers::admin::delete_category,
        handlers::admin::list_inquiries,
        handlers::admin::update_inquiry,
        handlers::admin::get_usage_limits,
    ),
    components(
        schemas(
            // --- Catálogo ---
            models::catalog::Category,
            models::catalog::Product,
            models::catalog::ProductPage,
            models::catalog::CreateProductPayload,
            models::catalog::UpdateProductPayload,
            models::catalog::CreateCategoryPayload,

            // --- Orçamentos ---
            models::quotation::CartProduct,
            models::quotation::CartLine,
            models::quotation::QuotationItem,
            models::quotation::QuotationMetadata,
            models::quotation::CompanyInfo,
            models::quotation::RecipientInfo,
            models::quotation::QuotationDocument,
            models::quotation::GenerateQuotationPayload,
            models::quotation::CartLinePayload,
            models::quotation::RecipientPayload,

            // --- Consultas ---
            models::inquiry::InquiryStatus,
            models::inquiry::InquiryItem,
            models::inquiry::Inquiry,
            models::inquiry::CreateInquiryPayload,
            models::inquiry::UpdateInquiryPayload,
            models::inquiry::CreateInquiryResponse,

            // --- Auth ---
            models::auth::AdminRole,
            models::auth::LoginPayload,
            models::auth::AuthResponse,
            models::auth::MeResponse,

            // --- Tenancy ---
            models::tenancy::Plan,
            models::tenancy::TenantSummary,
            models::tenancy::UsageSlot,
            models::tenancy::UsageReport,
        )
    ),
    tags(
        (name = "Catalog", description = "Catálogo público de produtos e categorias"),
        (name = "Quotations", description = "Geração de documentos de orçamento"),
        (name = "Inquiries", description = "Consultas de clientes (carrinho)"),
        (name = "Auth", description = "Autenticação de administradores"),
        (name = "Admin", description = "Gestão do catálogo e das consultas")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}
