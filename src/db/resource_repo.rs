// src/db/resource_repo.rs

use async_trait::async_trait;
use std::marker::PhantomData;

use crate::{
    common::error::AppError,
    db::{
        client::{decode_item, decode_list, ApiClient},
        user_repo::UserRepository,
    },
    models::{
        auth::Role,
        resource::Resource,
        users::{RegistrationLink, ToggleStatus},
    },
};

// Fronteira de acesso a dados que a controller de listagem enxerga.
// Nos testes, é implementada por um backend em memória.
#[async_trait]
pub trait ResourceApi<R: Resource>: Send + Sync {
    async fn list(&self) -> Result<Vec<R>, AppError>;
    async fn get(&self, id: &str) -> Result<R, AppError>;
    async fn create(&self, payload: &R::Payload) -> Result<R, AppError>;
    async fn update(&self, id: &str, payload: &R::Payload) -> Result<R, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
    async fn toggle_status(&self, id: &str) -> Result<ToggleStatus, AppError>;
    async fn registration_link(&self, role: Role) -> Result<RegistrationLink, AppError>;
}

// Implementação REST uniforme, parametrizada pelo PATH do recurso
pub struct RestRepository<R> {
    client: ApiClient,
    users: UserRepository,
    _resource: PhantomData<fn() -> R>,
}

impl<R> Clone for RestRepository<R> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            users: self.users.clone(),
            _resource: PhantomData,
        }
    }
}

impl<R: Resource> RestRepository<R> {
    pub fn new(client: ApiClient) -> Self {
        let users = UserRepository::new(client.clone());
        Self { client, users, _resource: PhantomData }
    }

    fn item_path(id: &str) -> String {
        format!("{}/{}", R::PATH, id)
    }
}

#[async_trait]
impl<R: Resource> ResourceApi<R> for RestRepository<R> {
    async fn list(&self) -> Result<Vec<R>, AppError> {
        let body = self.client.get(R::PATH).await?;
        decode_list(body)
    }

    async fn get(&self, id: &str) -> Result<R, AppError> {
        let body = self.client.get(&Self::item_path(id)).await?;
        decode_item(body)
    }

    async fn create(&self, payload: &R::Payload) -> Result<R, AppError> {
        if !R::MUTATIONS.create {
            return Err(AppError::Unsupported("create"));
        }
        let body = self.client.post(R::PATH, Some(serde_json::to_value(payload)?)).await?;
        decode_item(body)
    }

    async fn update(&self, id: &str, payload: &R::Payload) -> Result<R, AppError> {
        let body = self.client.put(&Self::item_path(id), serde_json::to_value(payload)?).await?;
        decode_item(body)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        self.client.delete(&Self::item_path(id)).await?;
        Ok(())
    }

    async fn toggle_status(&self, id: &str) -> Result<ToggleStatus, AppError> {
        if !R::MUTATIONS.toggle {
            return Err(AppError::Unsupported("toggle-status"));
        }
        let body = self.client.patch(&format!("{}/toggle-status", Self::item_path(id))).await?;
        // Alguns endpoints respondem sem corpo
        if body.is_null() {
            return Ok(ToggleStatus::default());
        }
        decode_item(body)
    }

    async fn registration_link(&self, role: Role) -> Result<RegistrationLink, AppError> {
        self.users.create_registration_link(role).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::{kv_store::MemoryStore, session_repo::SessionRepository},
        middleware::i18n::Locale,
        models::{
            inventory::{Kategori, KategoriPayload},
            users::{AdminAccount, RetrieverAccount},
        },
        services::session::SessionStore,
    };
    use serde_json::json;
    use std::sync::Arc;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn repo<R: Resource>(server: &MockServer) -> RestRepository<R> {
        let session = Arc::new(SessionStore::new(SessionRepository::new(Arc::new(MemoryStore::new()))));
        let client = ApiClient::new(&server.uri(), Locale::Id, session).unwrap();
        RestRepository::new(client)
    }

    #[tokio::test]
    async fn list_accepts_bare_array() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/kategori"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id_kategori": 1, "nama_kategori": "Elektronik", "created_at": "2024-01-01T00:00:00Z"},
                {"id_kategori": 2, "nama_kategori": "ATK", "created_at": null}
            ])))
            .mount(&server)
            .await;

        let items = repo::<Kategori>(&server).list().await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].nama_kategori, "ATK");
    }

    #[tokio::test]
    async fn list_with_null_data_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/retriever"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": null})))
            .mount(&server)
            .await;

        let err = repo::<RetrieverAccount>(&server).list().await.unwrap_err();
        assert!(matches!(err, AppError::UnexpectedEnvelope(_)));
    }

    #[tokio::test]
    async fn create_posts_payload_and_unwraps_data() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/kategori"))
            .and(body_json(json!({"nama_kategori": "Elektronik"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "data": {"id_kategori": "K9", "nama_kategori": "Elektronik"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let created = repo::<Kategori>(&server)
            .create(&KategoriPayload { nama_kategori: "Elektronik".into() })
            .await
            .unwrap();
        assert_eq!(created.id_kategori, "K9");
    }

    #[tokio::test]
    async fn toggle_hits_patch_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/admin-manager/4/toggle-status"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "inactive"})))
            .expect(1)
            .mount(&server)
            .await;

        let outcome = repo::<AdminAccount>(&server).toggle_status("4").await.unwrap();
        assert_eq!(outcome.status.as_deref(), Some("inactive"));
    }

    #[tokio::test]
    async fn unsupported_mutations_never_reach_the_backend() {
        let server = MockServer::start().await;
        let err = repo::<Kategori>(&server).toggle_status("1").await.unwrap_err();
        assert!(matches!(err, AppError::Unsupported(_)));
        assert!(server.received_requests().await.unwrap_or_default().is_empty());
    }
}
