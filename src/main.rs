//src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, patch, post},
    Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// Declaração dos nossos módulos
mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::auth::auth_guard;
use crate::middleware::tenancy::tenant_resolver;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Rotas públicas da vitrine (catálogo, orçamentos, consultas)
    let public_routes = Router::new()
        .route("/categories", get(handlers::catalog::list_categories))
        .route("/products", get(handlers::catalog::list_products))
        .route("/products/{id}", get(handlers::catalog::get_product))
        .route("/quotations", post(handlers::quotation::generate_quotation))
        .route("/inquiries", post(handlers::inquiry::create_inquiry));

    // Login é a única rota de admin sem o guard (mas ainda precisa do tenant)
    let admin_public_routes = Router::new().route("/login", post(handlers::auth::login));

    // Rotas de admin protegidas pelo middleware de autenticação
    let admin_routes = Router::new()
        .route("/me", get(handlers::auth::get_me))
        .route("/products", post(handlers::admin::create_product))
        .route(
            "/products/{id}",
            axum::routing::put(handlers::admin::update_product)
                .delete(handlers::admin::delete_product),
        )
        .route("/categories", post(handlers::admin::create_category))
        .route(
            "/categories/{id}",
            axum::routing::delete(handlers::admin::delete_category),
        )
        .route("/inquiries", get(handlers::admin::list_inquiries))
        .route("/inquiries/{id}", patch(handlers::admin::update_inquiry))
        .route("/limits", get(handlers::admin::get_usage_limits))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Tudo sob /api passa pelo resolvedor de tenant; o guard de auth
    // roda DEPOIS dele (camadas externas executam primeiro)
    let api_routes = Router::new()
        .merge(public_routes)
        .nest("/admin", admin_public_routes.merge(admin_routes))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            tenant_resolver,
        ));

    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api", api_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .with_state(app_state);

    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}
