// src/models/users.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{
    auth::Role,
    resource::{Mutations, Resource},
    wire::{de_id, de_opt_id, de_timestamp},
};

// O backend aninha os dados de login em `user` e resolve o rusun vinculado.
// As structs públicas são a versão "achatada".
#[derive(Debug, Clone, Default, Deserialize)]
struct LinkedUser {
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    is_active: Option<bool>,
    #[serde(default, deserialize_with = "de_timestamp")]
    created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct LinkedRusun {
    #[serde(default)]
    nama_rusun: Option<String>,
}

// --- Admin ---
#[derive(Debug, Clone, Deserialize)]
struct AdminRow {
    #[serde(deserialize_with = "de_id")]
    id_admin: String,
    #[serde(default, deserialize_with = "de_opt_id")]
    id_user: Option<String>,
    #[serde(default)]
    nama_lengkap: String,
    #[serde(default)]
    user: Option<LinkedUser>,
    #[serde(default, deserialize_with = "de_timestamp")]
    created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "AdminRow")]
pub struct AdminAccount {
    pub id_admin: String,
    pub id_user: Option<String>,
    pub nama_lengkap: String,
    pub username: Option<String>,
    pub email: Option<String>,
    pub is_active: bool,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<AdminRow> for AdminAccount {
    fn from(row: AdminRow) -> Self {
        let user = row.user.unwrap_or_default();
        Self {
            id_admin: row.id_admin,
            id_user: row.id_user,
            nama_lengkap: row.nama_lengkap,
            username: user.username,
            email: user.email,
            is_active: user.is_active.unwrap_or(false),
            created_at: user.created_at.or(row.created_at),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
pub struct AdminPayload {
    #[validate(length(min = 1, message = "Nama lengkap wajib diisi"))]
    pub nama_lengkap: String,
    #[validate(email(message = "Format email tidak valid"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Resource for AdminAccount {
    type Payload = AdminPayload;

    const PATH: &'static str = "/admin-manager";
    const LABEL: &'static str = "admin";
    const MUTATIONS: Mutations = Mutations::ACCOUNT;

    fn id(&self) -> &str {
        &self.id_admin
    }

    fn name(&self) -> &str {
        &self.nama_lengkap
    }

    fn search_keys(&self) -> Vec<&str> {
        vec![self.nama_lengkap.as_str(), self.username.as_deref().unwrap_or("")]
    }

    fn is_active(&self) -> Option<bool> {
        Some(self.is_active)
    }

    fn to_payload(&self) -> AdminPayload {
        AdminPayload {
            nama_lengkap: self.nama_lengkap.clone(),
            email: self.email.clone(),
        }
    }
}

// --- Kepala gudang ---
#[derive(Debug, Clone, Deserialize)]
struct KepalaGudangRow {
    #[serde(deserialize_with = "de_id")]
    id_kepala_gudang: String,
    #[serde(default, deserialize_with = "de_opt_id")]
    id_user: Option<String>,
    #[serde(default)]
    nama_lengkap: String,
    #[serde(default)]
    unit_kerja: Option<String>,
    #[serde(default, deserialize_with = "de_opt_id")]
    id_rusun: Option<String>,
    #[serde(default)]
    rusun: Option<LinkedRusun>,
    #[serde(default)]
    user: Option<LinkedUser>,
    #[serde(default, deserialize_with = "de_timestamp")]
    created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "KepalaGudangRow")]
pub struct KepalaGudangAccount {
    pub id_kepala_gudang: String,
    pub id_user: Option<String>,
    pub nama_lengkap: String,
    pub username: Option<String>,
    pub email: Option<String>,
    pub unit_kerja: Option<String>,
    pub rusun: Option<String>,
    pub id_rusun: Option<String>,
    pub is_active: bool,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<KepalaGudangRow> for KepalaGudangAccount {
    fn from(row: KepalaGudangRow) -> Self {
        let user = row.user.unwrap_or_default();
        Self {
            id_kepala_gudang: row.id_kepala_gudang,
            id_user: row.id_user,
            nama_lengkap: row.nama_lengkap,
            username: user.username,
            email: user.email,
            unit_kerja: row.unit_kerja,
            rusun: row.rusun.and_then(|r| r.nama_rusun),
            id_rusun: row.id_rusun,
            is_active: user.is_active.unwrap_or(false),
            created_at: user.created_at.or(row.created_at),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
pub struct KepalaGudangPayload {
    #[validate(length(min = 1, message = "Nama lengkap wajib diisi"))]
    pub nama_lengkap: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_kerja: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_rusun: Option<String>,
}

impl Resource for KepalaGudangAccount {
    type Payload = KepalaGudangPayload;

    const PATH: &'static str = "/kepala-gudang";
    const LABEL: &'static str = "kepala gudang";
    const MUTATIONS: Mutations = Mutations::ACCOUNT;
    const FILTERS: &'static [&'static str] = &["rusun"];
    const REGISTRATION_ROLE: Option<Role> = Some(Role::KepalaGudang);

    fn id(&self) -> &str {
        &self.id_kepala_gudang
    }

    fn name(&self) -> &str {
        &self.nama_lengkap
    }

    fn search_keys(&self) -> Vec<&str> {
        vec![self.nama_lengkap.as_str(), self.username.as_deref().unwrap_or("")]
    }

    fn is_active(&self) -> Option<bool> {
        Some(self.is_active)
    }

    fn field(&self, filter: &str) -> Option<&str> {
        match filter {
            "rusun" => self.rusun.as_deref(),
            _ => None,
        }
    }

    fn to_payload(&self) -> KepalaGudangPayload {
        KepalaGudangPayload {
            nama_lengkap: self.nama_lengkap.clone(),
            unit_kerja: self.unit_kerja.clone(),
            id_rusun: self.id_rusun.clone(),
        }
    }
}

// --- Retriever ---
#[derive(Debug, Clone, Deserialize)]
struct RetrieverRow {
    #[serde(deserialize_with = "de_id")]
    id_retriever: String,
    #[serde(default, deserialize_with = "de_opt_id")]
    id_user: Option<String>,
    #[serde(default)]
    nama_lengkap: String,
    #[serde(default)]
    kategori: Option<String>,
    #[serde(default)]
    deskripsi: Option<String>,
    #[serde(default, deserialize_with = "de_opt_id")]
    id_rusun: Option<String>,
    #[serde(default)]
    rusun: Option<LinkedRusun>,
    #[serde(default)]
    user: Option<LinkedUser>,
    #[serde(default, deserialize_with = "de_timestamp")]
    created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RetrieverRow")]
pub struct RetrieverAccount {
    pub id_retriever: String,
    pub id_user: Option<String>,
    pub nama_lengkap: String,
    pub username: Option<String>,
    pub email: Option<String>,
    pub rusun: Option<String>,
    pub id_rusun: Option<String>,
    pub kategori: Option<String>,
    pub deskripsi: Option<String>,
    pub is_active: bool,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<RetrieverRow> for RetrieverAccount {
    fn from(row: RetrieverRow) -> Self {
        let user = row.user.unwrap_or_default();
        Self {
            id_retriever: row.id_retriever,
            id_user: row.id_user,
            nama_lengkap: row.nama_lengkap,
            username: user.username,
            email: user.email,
            rusun: row.rusun.and_then(|r| r.nama_rusun),
            id_rusun: row.id_rusun,
            kategori: row.kategori,
            deskripsi: row.deskripsi,
            is_active: user.is_active.unwrap_or(false),
            created_at: user.created_at.or(row.created_at),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
pub struct RetrieverPayload {
    #[validate(length(min = 1, message = "Nama lengkap wajib diisi"))]
    pub nama_lengkap: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kategori: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deskripsi: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_rusun: Option<String>,
}

impl Resource for RetrieverAccount {
    type Payload = RetrieverPayload;

    const PATH: &'static str = "/retriever";
    const LABEL: &'static str = "retriever";
    const MUTATIONS: Mutations = Mutations::ACCOUNT;
    const FILTERS: &'static [&'static str] = &["kategori"];
    const REGISTRATION_ROLE: Option<Role> = Some(Role::Retriever);

    fn id(&self) -> &str {
        &self.id_retriever
    }

    fn name(&self) -> &str {
        &self.nama_lengkap
    }

    fn search_keys(&self) -> Vec<&str> {
        vec![self.nama_lengkap.as_str(), self.username.as_deref().unwrap_or("")]
    }

    fn is_active(&self) -> Option<bool> {
        Some(self.is_active)
    }

    fn field(&self, filter: &str) -> Option<&str> {
        match filter {
            "kategori" => self.kategori.as_deref(),
            _ => None,
        }
    }

    fn to_payload(&self) -> RetrieverPayload {
        RetrieverPayload {
            nama_lengkap: self.nama_lengkap.clone(),
            kategori: self.kategori.clone(),
            deskripsi: self.deskripsi.clone(),
            id_rusun: self.id_rusun.clone(),
        }
    }
}

// --- Links de cadastro ---
#[derive(Debug, Clone, Serialize)]
pub struct RegistrationLinkRequest {
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RegistrationLink {
    #[serde(default)]
    pub message: Option<String>,
    pub registration_link: String,
}

// Resposta do PATCH toggle-status
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ToggleStatus {
    #[serde(default)]
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flattens_nested_user_and_rusun() {
        let r: RetrieverAccount = serde_json::from_value(serde_json::json!({
            "id_retriever": 5,
            "id_user": 9,
            "nama_lengkap": "Siti Aminah",
            "kategori": "Kebersihan",
            "id_rusun": 2,
            "rusun": {"nama_rusun": "Rusun Pulo Gebang"},
            "user": {
                "username": "siti",
                "email": "siti@example.com",
                "is_active": true,
                "created_at": "2024-05-01T08:00:00Z"
            }
        }))
        .unwrap();
        assert_eq!(r.id(), "5");
        assert_eq!(r.id_user.as_deref(), Some("9"));
        assert_eq!(r.username.as_deref(), Some("siti"));
        assert_eq!(r.rusun.as_deref(), Some("Rusun Pulo Gebang"));
        assert_eq!(r.field("kategori"), Some("Kebersihan"));
        assert_eq!(r.is_active(), Some(true));
        assert!(r.created_at.is_some());
    }

    #[test]
    fn missing_user_means_inactive() {
        let k: KepalaGudangAccount = serde_json::from_value(serde_json::json!({
            "id_kepala_gudang": "KG-1",
            "nama_lengkap": "Joko",
            "user": null
        }))
        .unwrap();
        assert!(!k.is_active);
        assert!(k.username.is_none());
        assert_eq!(k.search_keys(), vec!["Joko", ""]);
        assert_eq!(k.field("rusun"), None);
    }

    #[test]
    fn admin_payload_rejects_bad_email() {
        let form = AdminPayload { nama_lengkap: "Ani".into(), email: Some("bukan-email".into()) };
        assert!(form.validate().is_err());
        let form = AdminPayload { nama_lengkap: "Ani".into(), email: None };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn registration_request_uses_wire_role() {
        let body = serde_json::to_value(RegistrationLinkRequest { role: Role::KepalaGudang }).unwrap();
        assert_eq!(body, serde_json::json!({"role": "kepala_gudang"}));
    }
}
