// src/models/inventory.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{
    resource::{Mutations, Resource},
    wire::{de_id, de_timestamp},
};

// --- 1. Gudang (armazém) ---
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Gudang {
    #[serde(deserialize_with = "de_id")]
    pub id_gudang: String,
    pub nama_gudang: String,
    #[serde(default)]
    pub alamat: String,
    #[serde(default)]
    pub deskripsi: Option<String>,
    #[serde(default, deserialize_with = "de_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "de_timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
pub struct GudangPayload {
    #[validate(length(min = 1, message = "Nama gudang wajib diisi"))]
    pub nama_gudang: String,
    #[validate(length(min = 1, message = "Alamat wajib diisi"))]
    pub alamat: String,
    pub deskripsi: Option<String>,
}

impl Resource for Gudang {
    type Payload = GudangPayload;

    const PATH: &'static str = "/gudang";
    const LABEL: &'static str = "Gudang";
    const MUTATIONS: Mutations = Mutations::CRUD;

    fn id(&self) -> &str {
        &self.id_gudang
    }

    fn name(&self) -> &str {
        &self.nama_gudang
    }

    fn search_keys(&self) -> Vec<&str> {
        vec![self.nama_gudang.as_str(), self.alamat.as_str()]
    }

    fn to_payload(&self) -> GudangPayload {
        GudangPayload {
            nama_gudang: self.nama_gudang.clone(),
            alamat: self.alamat.clone(),
            deskripsi: self.deskripsi.clone(),
        }
    }
}

// --- 2. Kategori ---
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Kategori {
    #[serde(deserialize_with = "de_id")]
    pub id_kategori: String,
    pub nama_kategori: String,
    #[serde(default, deserialize_with = "de_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
pub struct KategoriPayload {
    #[validate(length(min = 1, message = "Nama kategori wajib diisi"))]
    pub nama_kategori: String,
}

impl Resource for Kategori {
    type Payload = KategoriPayload;

    const PATH: &'static str = "/kategori";
    const LABEL: &'static str = "Kategori";
    const MUTATIONS: Mutations = Mutations::CRUD;

    fn id(&self) -> &str {
        &self.id_kategori
    }

    fn name(&self) -> &str {
        &self.nama_kategori
    }

    fn to_payload(&self) -> KategoriPayload {
        KategoriPayload { nama_kategori: self.nama_kategori.clone() }
    }
}

// --- 3. Rusun (bloco habitacional) ---
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Rusun {
    #[serde(deserialize_with = "de_id")]
    pub id_rusun: String,
    pub nama_rusun: String,
    #[serde(default)]
    pub alamat: String,
    #[serde(default)]
    pub deskripsi: Option<String>,
    #[serde(default, deserialize_with = "de_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "de_timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
pub struct RusunPayload {
    #[validate(length(min = 1, message = "Nama rusun wajib diisi"))]
    pub nama_rusun: String,
    #[validate(length(min = 1, message = "Alamat wajib diisi"))]
    pub alamat: String,
    pub deskripsi: Option<String>,
}

impl Resource for Rusun {
    type Payload = RusunPayload;

    const PATH: &'static str = "/rusun";
    const LABEL: &'static str = "Rusun";
    const MUTATIONS: Mutations = Mutations::CRUD;

    fn id(&self) -> &str {
        &self.id_rusun
    }

    fn name(&self) -> &str {
        &self.nama_rusun
    }

    fn search_keys(&self) -> Vec<&str> {
        vec![self.nama_rusun.as_str(), self.alamat.as_str()]
    }

    fn to_payload(&self) -> RusunPayload {
        RusunPayload {
            nama_rusun: self.nama_rusun.clone(),
            alamat: self.alamat.clone(),
            deskripsi: self.deskripsi.clone(),
        }
    }
}
