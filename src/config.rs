// src/config.rs

use std::{env, path::PathBuf, sync::Arc};

use anyhow::Context;

use crate::{
    db::{
        kv_store::FileStore,
        resource_repo::{ResourceApi, RestRepository},
        session_repo::SessionRepository,
        ApiClient, AuthRepository,
    },
    middleware::i18n::Locale,
    models::resource::Resource,
    services::{auth::AuthService, resource_list::ResourceListController, session::SessionStore},
};

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000/api";
pub const DEFAULT_LANG: &str = "id";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_url: String,
    pub session_file: PathBuf,
    pub lang: String,
    // Só aparece no banner de login
    pub frontend_url: Option<String>,
}

impl AppConfig {
    // .env + variáveis de ambiente, com padrões para tudo
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let api_url = env::var("INVENTARIS_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let session_file = env::var("INVENTARIS_SESSION_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_session_file());
        let lang = env::var("INVENTARIS_LANG").unwrap_or_else(|_| DEFAULT_LANG.to_string());
        let frontend_url = env::var("INVENTARIS_FRONTEND_URL").ok().filter(|s| !s.is_empty());

        Self { api_url, session_file, lang, frontend_url }
    }

    // Flags da linha de comando vencem o ambiente
    pub fn with_overrides(
        mut self,
        api_url: Option<String>,
        session_file: Option<PathBuf>,
        lang: Option<String>,
    ) -> Self {
        if let Some(api_url) = api_url {
            self.api_url = api_url;
        }
        if let Some(session_file) = session_file {
            self.session_file = session_file;
        }
        if let Some(lang) = lang {
            self.lang = lang;
        }
        self
    }
}

fn default_session_file() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("inventaris")
        .join("session.json")
}

// O estado compartilhado que os handlers recebem
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub locale: Locale,
    pub session: Arc<SessionStore>,
    pub client: ApiClient,
    pub auth_service: AuthService,
}

impl AppState {
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        let locale = Locale::negotiate(&config.lang);

        // --- Sessão persistida ---
        let kv = Arc::new(FileStore::new(&config.session_file));
        let session = Arc::new(SessionStore::open(SessionRepository::new(kv)));
        tracing::debug!(file = %config.session_file.display(), "arquivo de sessão");

        // --- Cliente REST e serviços ---
        let client = ApiClient::new(&config.api_url, locale, session.clone())
            .context("Falha ao montar o cliente HTTP")?;
        let auth_service = AuthService::new(AuthRepository::new(client.clone()), session.clone());

        tracing::debug!(api = %config.api_url, lang = locale.tag(), "estado da aplicação montado");

        Ok(Self { config, locale, session, client, auth_service })
    }

    pub fn repository<R: Resource>(&self) -> Arc<dyn ResourceApi<R>> {
        Arc::new(RestRepository::<R>::new(self.client.clone()))
    }

    pub fn controller<R: Resource>(&self) -> ResourceListController<R> {
        ResourceListController::new(self.repository::<R>(), self.locale)
    }
}
