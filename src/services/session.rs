// src/services/session.rs

use parking_lot::RwLock;

use crate::{
    common::error::AppError,
    db::session_repo::SessionRepository,
    models::auth::{Identity, Session},
};

/// Dono único da sessão autenticada.
///
/// Toda mutação passa por `set_auth`, `clear_auth` ou `update_identity`.
/// O lock de escrita fica preso durante a gravação no disco, então nenhum
/// leitor vê identidade e token de sessões diferentes.
pub struct SessionStore {
    repo: SessionRepository,
    state: RwLock<Session>,
}

impl SessionStore {
    // Começa vazio; chame `rehydrate` para ler o disco
    pub fn new(repo: SessionRepository) -> Self {
        Self { repo, state: RwLock::new(Session::anonymous()) }
    }

    // Construção usada na inicialização do processo
    pub fn open(repo: SessionRepository) -> Self {
        let store = Self::new(repo);
        store.rehydrate();
        store
    }

    pub fn snapshot(&self) -> Session {
        self.state.read().clone()
    }

    pub fn token(&self) -> Option<String> {
        self.state.read().token().map(str::to_string)
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.read().authenticated()
    }

    pub fn set_auth(&self, identity: Identity, token: String) -> Result<(), AppError> {
        let mut state = self.state.write();
        // Disco primeiro: se falhar, a memória continua como estava
        self.repo.save(&identity, &token)?;
        tracing::info!("🔐 Sessão iniciada para '{}' ({})", identity.username, identity.role);
        *state = Session::new(Some(identity), Some(token));
        Ok(())
    }

    // Idempotente. A memória é zerada mesmo se a remoção no disco falhar.
    pub fn clear_auth(&self) -> Result<(), AppError> {
        let mut state = self.state.write();
        let was_authenticated = state.authenticated();
        *state = Session::anonymous();
        self.repo.clear()?;
        if was_authenticated {
            tracing::info!("🔓 Sessão encerrada");
        }
        Ok(())
    }

    // Troca só a identidade; o token fica intacto
    pub fn update_identity(&self, identity: Identity) -> Result<(), AppError> {
        let mut state = self.state.write();
        self.repo.save_identity(&identity)?;
        let token = state.token().map(str::to_string);
        *state = Session::new(Some(identity), token);
        Ok(())
    }

    /// Lê os dois valores persistidos e substitui o estado em memória.
    ///
    /// Nunca falha: erro de leitura vira sessão vazia e usuário ilegível vira
    /// identidade ausente. `authenticated` segue apenas o token persistido.
    pub fn rehydrate(&self) -> Session {
        let stored = match self.repo.load() {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!("⚠️ Falha ao ler a sessão salva, seguindo sem sessão: {}", e);
                Default::default()
            }
        };

        if stored.token.is_some() && stored.identity.is_none() {
            tracing::warn!("⚠️ Token salvo sem usuário válido");
        }

        let session = Session::new(stored.identity, stored.token);
        *self.state.write() = session.clone();
        tracing::debug!(authenticated = session.authenticated(), "sessão reidratada");
        session
    }

    // Chamado a cada navegação: capta logout feito por outro processo
    pub fn sync_from_storage(&self) -> Session {
        self.rehydrate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::{
            kv_store::{FileStore, KeyValueStore, MemoryStore},
            session_repo::{TOKEN_KEY, USER_KEY},
        },
        models::auth::Role,
    };
    use std::sync::Arc;
    use tempfile::TempDir;

    fn identity(role: Role) -> Identity {
        Identity {
            id_user: "7".into(),
            username: "siti".into(),
            email: None,
            role,
            nama_lengkap: Some("Siti".into()),
        }
    }

    fn memory_store() -> (Arc<MemoryStore>, SessionStore) {
        let kv = Arc::new(MemoryStore::new());
        let store = SessionStore::new(SessionRepository::new(kv.clone()));
        (kv, store)
    }

    fn assert_invariant(session: &Session) {
        assert_eq!(session.authenticated(), session.token().is_some());
    }

    #[test]
    fn set_auth_persists_and_authenticates() {
        let (kv, store) = memory_store();
        store.set_auth(identity(Role::Admin), "tok".into()).unwrap();

        let session = store.snapshot();
        assert!(session.authenticated());
        assert_eq!(session.role(), Some(Role::Admin));
        assert_invariant(&session);
        assert_eq!(kv.get(TOKEN_KEY).unwrap().as_deref(), Some("tok"));
        assert!(kv.get(USER_KEY).unwrap().is_some());
    }

    #[test]
    fn clear_auth_is_idempotent() {
        let (kv, store) = memory_store();
        store.set_auth(identity(Role::Admin), "tok".into()).unwrap();

        store.clear_auth().unwrap();
        let once = store.snapshot();
        store.clear_auth().unwrap();
        let twice = store.snapshot();

        assert_eq!(once, twice);
        assert_eq!(once, Session::anonymous());
        assert_invariant(&twice);
        assert!(kv.get(TOKEN_KEY).unwrap().is_none());
        assert!(kv.get(USER_KEY).unwrap().is_none());
    }

    #[test]
    fn update_identity_keeps_token() {
        let (_kv, store) = memory_store();
        store.set_auth(identity(Role::Retriever), "tok".into()).unwrap();

        let mut renamed = identity(Role::Retriever);
        renamed.nama_lengkap = Some("Siti Rahma".into());
        store.update_identity(renamed.clone()).unwrap();

        let session = store.snapshot();
        assert_eq!(session.token(), Some("tok"));
        assert_eq!(session.identity(), Some(&renamed));
    }

    #[test]
    fn rehydrate_after_reload_reproduces_session() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");

        let first = SessionStore::new(SessionRepository::new(Arc::new(FileStore::new(&path))));
        first.set_auth(identity(Role::KepalaGudang), "tok-123".into()).unwrap();

        // Novo processo, mesmo arquivo
        let second = SessionStore::open(SessionRepository::new(Arc::new(FileStore::new(&path))));
        let session = second.snapshot();
        assert_eq!(session.token(), Some("tok-123"));
        assert_eq!(session.identity(), Some(&identity(Role::KepalaGudang)));
        assert_invariant(&session);
    }

    #[test]
    fn empty_token_survives_reload() {
        let (kv, store) = memory_store();
        store.set_auth(identity(Role::Admin), String::new()).unwrap();
        let before = store.snapshot();

        let reloaded = SessionStore::open(SessionRepository::new(kv));
        let after = reloaded.snapshot();
        assert_eq!(after.token(), Some(""));
        assert_eq!(after.authenticated(), before.authenticated());
        assert_invariant(&after);
    }

    #[test]
    fn rehydrate_with_malformed_user_keeps_token_authenticated() {
        let kv = Arc::new(MemoryStore::with_entries(&[(TOKEN_KEY, "tok"), (USER_KEY, "???")]));
        let store = SessionStore::open(SessionRepository::new(kv));

        let session = store.snapshot();
        assert!(session.authenticated());
        assert!(session.identity().is_none());
        assert_invariant(&session);
    }

    #[test]
    fn rehydrate_with_nothing_stored() {
        let (_kv, store) = memory_store();
        let session = store.rehydrate();
        assert!(!session.authenticated());
        assert_invariant(&session);
    }

    #[test]
    fn sync_observes_logout_from_another_process() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        let a = SessionStore::new(SessionRepository::new(Arc::new(FileStore::new(&path))));
        let b = SessionStore::new(SessionRepository::new(Arc::new(FileStore::new(&path))));

        a.set_auth(identity(Role::Admin), "tok".into()).unwrap();
        assert!(b.sync_from_storage().authenticated());

        a.clear_auth().unwrap();
        // b ainda acha que está logado até a próxima navegação
        assert!(b.is_authenticated());
        assert!(!b.sync_from_storage().authenticated());
    }
}
