// src/db/auth_repo.rs

use reqwest::Method;

use crate::{
    common::error::AppError,
    db::client::{decode_item, ApiClient, Auth},
    models::auth::{LoginPayload, LoginResponse},
};

#[derive(Clone)]
pub struct AuthRepository {
    client: ApiClient,
}

impl AuthRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    // O login é anônimo: um 401 aqui é credencial errada, não sessão expirada
    pub async fn login(&self, payload: &LoginPayload) -> Result<LoginResponse, AppError> {
        let body = serde_json::to_value(payload)?;
        let response = self
            .client
            .send(Method::POST, "/login", Some(body), Auth::Anonymous)
            .await?;
        decode_item(response)
    }

    pub async fn logout(&self) -> Result<(), AppError> {
        self.client.post("/logout", None).await?;
        Ok(())
    }
}
