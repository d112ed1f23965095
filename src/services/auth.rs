// src/services/auth.rs

use std::sync::Arc;

use validator::Validate;

use crate::{
    common::error::AppError,
    db::auth_repo::AuthRepository,
    middleware::rbac::{landing, View},
    models::auth::{Identity, LoginPayload, ProfilePayload},
    services::session::SessionStore,
};

#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub identity: Identity,
    pub landing: View,
    // Sugestão do backend; a navegação usa sempre o destino do papel
    pub redirect_url: Option<String>,
}

#[derive(Clone)]
pub struct AuthService {
    auth_repo: AuthRepository,
    session: Arc<SessionStore>,
}

impl AuthService {
    pub fn new(auth_repo: AuthRepository, session: Arc<SessionStore>) -> Self {
        Self { auth_repo, session }
    }

    pub async fn login(&self, payload: LoginPayload) -> Result<LoginOutcome, AppError> {
        // 1. Validação local (nada vai para a rede com campo vazio)
        payload.validate()?;

        // 2. Chamada anônima ao /login
        let response = self.auth_repo.login(&payload).await?;

        // 3. Identidade + token gravados juntos
        let identity = response.user;
        self.session.set_auth(identity.clone(), response.access_token)?;

        Ok(LoginOutcome {
            landing: landing(identity.role),
            identity,
            redirect_url: response.redirect_url,
        })
    }

    // O backend pode falhar à vontade: a sessão local é encerrada de qualquer jeito
    pub async fn logout(&self) -> Result<(), AppError> {
        if self.session.is_authenticated() {
            if let Err(e) = self.auth_repo.logout().await {
                tracing::warn!("⚠️ Logout no backend falhou, limpando só a sessão local: {}", e);
            }
        }
        self.session.clear_auth()
    }

    // Edição de perfil é apenas local: troca o nome exibido
    pub fn update_profile(&self, payload: ProfilePayload) -> Result<Identity, AppError> {
        payload.validate()?;

        let mut identity = self
            .session
            .snapshot()
            .identity()
            .cloned()
            .ok_or(AppError::NotAuthenticated)?;

        identity.nama_lengkap = Some(payload.nama_lengkap.trim().to_string());
        self.session.update_identity(identity.clone())?;
        tracing::info!("👤 Perfil de '{}' atualizado", identity.username);
        Ok(identity)
    }
}
