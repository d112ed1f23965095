// src/db/session_repo.rs

use std::sync::Arc;

use crate::{
    common::error::AppError,
    db::kv_store::KeyValueStore,
    models::auth::Identity,
};

// Layout no armazenamento: token cru numa chave, usuário serializado na outra
pub const TOKEN_KEY: &str = "access_token";
pub const USER_KEY: &str = "user";

// O que foi lido do disco. `identity` pode faltar mesmo com token presente.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoredSession {
    pub token: Option<String>,
    pub identity: Option<Identity>,
}

#[derive(Clone)]
pub struct SessionRepository {
    store: Arc<dyn KeyValueStore>,
}

impl SessionRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn load(&self) -> Result<StoredSession, AppError> {
        // Token é opaco: volta exatamente como foi gravado
        let token = self.store.get(TOKEN_KEY)?;

        let identity = match self.store.get(USER_KEY)? {
            Some(raw) => match serde_json::from_str::<Identity>(&raw) {
                Ok(identity) => Some(identity),
                Err(e) => {
                    tracing::warn!("⚠️ Usuário salvo inválido, tratado como ausente: {}", e);
                    None
                }
            },
            None => None,
        };

        Ok(StoredSession { token, identity })
    }

    // Token e usuário sempre no mesmo lote
    pub fn save(&self, identity: &Identity, token: &str) -> Result<(), AppError> {
        let user = serde_json::to_string(identity)?;
        self.store.set_many(&[(TOKEN_KEY, token), (USER_KEY, user.as_str())])
    }

    pub fn save_identity(&self, identity: &Identity) -> Result<(), AppError> {
        let user = serde_json::to_string(identity)?;
        self.store.set_many(&[(USER_KEY, user.as_str())])
    }

    pub fn clear(&self) -> Result<(), AppError> {
        self.store.remove_many(&[TOKEN_KEY, USER_KEY])
    }
}
