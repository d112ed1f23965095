// src/db/user_repo.rs

use crate::{
    common::error::AppError,
    db::client::{decode_item, ApiClient},
    models::{
        auth::Role,
        users::{RegistrationLink, RegistrationLinkRequest},
    },
};

// Endpoints de contas que não seguem o CRUD uniforme
#[derive(Clone)]
pub struct UserRepository {
    client: ApiClient,
}

impl UserRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    // POST /registration-links { role } -> { message, registration_link }
    pub async fn create_registration_link(&self, role: Role) -> Result<RegistrationLink, AppError> {
        let body = serde_json::to_value(RegistrationLinkRequest { role })?;
        let response = self.client.post("/registration-links", Some(body)).await?;
        decode_item(response)
    }
}
