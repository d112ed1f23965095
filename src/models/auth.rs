// src/models/auth.rs

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use validator::Validate;

use crate::models::wire::de_id;

// Os três papéis conhecidos. Todo `match` sobre Role deve ser exaustivo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    KepalaGudang,
    Retriever,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::KepalaGudang, Role::Retriever];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::KepalaGudang => "kepala_gudang",
            Role::Retriever => "retriever",
        }
    }

    // Rótulo exibido no topo e no perfil
    pub fn label(self) -> &'static str {
        match self {
            Role::Admin => "Administrator",
            Role::KepalaGudang => "Kepala Gudang",
            Role::Retriever => "Retriever",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "admin" => Ok(Role::Admin),
            "kepala_gudang" => Ok(Role::KepalaGudang),
            "retriever" => Ok(Role::Retriever),
            other => Err(format!("papel desconhecido: {other}")),
        }
    }
}

// Usuário autenticado, do jeito que vem do /login e fica salvo no disco
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    #[serde(deserialize_with = "de_id")]
    pub id_user: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nama_lengkap: Option<String>,
}

impl Identity {
    pub fn display_name(&self) -> &str {
        self.nama_lengkap.as_deref().unwrap_or(&self.username)
    }
}

// Dados para login. `identifier` aceita username ou e-mail.
#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct LoginPayload {
    #[validate(length(min = 1, message = "Username/email dan password wajib diisi"))]
    pub identifier: String,
    #[validate(length(min = 1, message = "Username/email dan password wajib diisi"))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    pub user: Identity,
    #[serde(default)]
    pub redirect_url: Option<String>,
}

#[derive(Debug, Clone, Default, Validate)]
pub struct ProfilePayload {
    #[validate(length(min = 1, message = "Nama lengkap wajib diisi"))]
    pub nama_lengkap: String,
}

// Retrato da sessão. `authenticated` é sempre derivado do token.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    identity: Option<Identity>,
    token: Option<String>,
}

impl Session {
    pub fn new(identity: Option<Identity>, token: Option<String>) -> Self {
        Self { identity, token }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn role(&self) -> Option<Role> {
        self.identity.as_ref().map(|i| i.role)
    }
}
