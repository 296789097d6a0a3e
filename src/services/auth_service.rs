// src/services/auth_service.rs

use bcrypt::verify;
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::TenancyRepository,
    models::{
        auth::{AdminRole, AdminUser, Claims},
        tenancy::Tenant,
    },
};

// Token de sessão do painel expira em 24h
const TOKEN_TTL_SECS: i64 = 60 * 60 * 24;

/// Verificação de autorização em duas fases, pura e sem I/O:
/// 1. super_admin não tem vínculo de tenant e é autorizado em QUALQUER
///    tenant (o bypass vale para a autorização; os dados da requisição
///    continuam amarrados ao único tenant resolvido).
/// 2. admin comum precisa estar vinculado exatamente ao tenant resolvido.
pub fn is_authorized_admin(admin: &AdminUser, tenant: &Tenant) -> bool {
    match admin.role {
        AdminRole::SuperAdmin => true,
        AdminRole::Admin => admin.tenant_id == Some(tenant.id),
    }
}

#[derive(Clone)]
pub struct AuthService {
    tenancy_repo: TenancyRepository,
    jwt_secret: String,
}

impl AuthService {
    pub fn new(tenancy_repo: TenancyRepository, jwt_secret: String) -> Self {
        Self {
            tenancy_repo,
            jwt_secret,
        }
    }

    /// Login do painel: confere a senha e emite o token. A autorização
    /// contra o tenant resolvido acontece aqui também — um admin de
    /// outro tenant não ganha token neste deployment.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        tenant: &Tenant,
    ) -> Result<String, AppError> {
        let admin = self
            .tenancy_repo
            .find_admin_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        // bcrypt é custoso de propósito; fora do executor async
        let password = password.to_owned();
        let password_hash = admin.password_hash.clone();
        let valid = tokio::task::spawn_blocking(move || verify(&password, &password_hash))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !valid {
            return Err(AppError::InvalidCredentials);
        }

        if !is_authorized_admin(&admin, tenant) {
            return Err(AppError::Forbidden);
        }

        self.create_token(admin.id)
    }

    /// Valida o Bearer token e carrega o administrador correspondente.
    pub async fn validate_token(&self, token: &str) -> Result<AdminUser, AppError> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|_| AppError::InvalidToken)?;

        self.tenancy_repo
            .find_admin_by_id(token_data.claims.sub)
            .await?
            .ok_or(AppError::InvalidToken)
    }

    fn create_token(&self, admin_id: Uuid) -> Result<String, AppError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: admin_id,
            iat: now as usize,
            exp: (now + TOKEN_TTL_SECS) as usize,
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )?;

        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::quotation::CompanyInfo;
    use crate::models::tenancy::{Plan, PlanLimits};
    use chrono::Utc;
    use sqlx::types::Json;

    fn tenant(id: Uuid) -> Tenant {
        Tenant {
            id,
            slug: "loja".to_string(),
            name: "Loja".to_string(),
            domain: Some("loja.example.com".to_string()),
            theme: Json(serde_json::json!({})),
            company_info: Json(CompanyInfo::default()),
            plan: Plan::Free,
            limits: Json(PlanLimits {
                max_products: 50,
                max_categories: 10,
                max_quotations_per_month: 100,
            }),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn admin(role: AdminRole, tenant_id: Option<Uuid>) -> AdminUser {
        AdminUser {
            id: Uuid::new_v4(),
            email: "admin@example.com".to_string(),
            password_hash: "$2b$12$hash".to_string(),
            role,
            tenant_id,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn super_admin_passa_em_qualquer_tenant() {
        let a = tenant(Uuid::new_v4());
        let b = tenant(Uuid::new_v4());
        let root = admin(AdminRole::SuperAdmin, None);

        assert!(is_authorized_admin(&root, &a));
        assert!(is_authorized_admin(&root, &b));
    }

    #[test]
    fn admin_comum_so_passa_no_proprio_tenant() {
        let a = tenant(Uuid::new_v4());
        let b = tenant(Uuid::new_v4());
        let admin_de_a = admin(AdminRole::Admin, Some(a.id));

        assert!(is_authorized_admin(&admin_de_a, &a));
        assert!(!is_authorized_admin(&admin_de_a, &b));
    }

    #[test]
    fn admin_sem_vinculo_nao_passa() {
        let a = tenant(Uuid::new_v4());
        let orfao = admin(AdminRole::Admin, None);

        assert!(!is_authorized_admin(&orfao, &a));
    }
}
