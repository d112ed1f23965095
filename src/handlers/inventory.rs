// src/handlers/inventory.rs

use crate::{
    common::format::{format_optional_date, or_dash, truncate},
    handlers::resources::{optional, unknown_field, FormFields, TableRow},
    models::inventory::{Gudang, GudangPayload, Kategori, KategoriPayload, Rusun, RusunPayload},
};

// --- Gudang ---
impl TableRow for Gudang {
    const SCREEN: &'static str = "/admin/gudang";

    fn headers() -> &'static [&'static str] {
        &["ID", "Nama Gudang", "Alamat", "Deskripsi", "Dibuat"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id_gudang.clone(),
            self.nama_gudang.clone(),
            truncate(&self.alamat, 40),
            truncate(&or_dash(self.deskripsi.as_deref()), 40),
            format_optional_date(self.created_at.as_ref()),
        ]
    }
}

impl FormFields for GudangPayload {
    fn set_field(&mut self, name: &str, value: &str) -> Result<(), String> {
        match name {
            "nama_gudang" | "nama" => self.nama_gudang = value.to_string(),
            "alamat" => self.alamat = value.to_string(),
            "deskripsi" => self.deskripsi = optional(value),
            other => return Err(unknown_field(other)),
        }
        Ok(())
    }
}

// --- Kategori ---
impl TableRow for Kategori {
    const SCREEN: &'static str = "/admin/kategori";

    fn headers() -> &'static [&'static str] {
        &["ID", "Nama Kategori", "Dibuat"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id_kategori.clone(),
            self.nama_kategori.clone(),
            format_optional_date(self.created_at.as_ref()),
        ]
    }
}

impl FormFields for KategoriPayload {
    fn set_field(&mut self, name: &str, value: &str) -> Result<(), String> {
        match name {
            "nama_kategori" | "nama" => self.nama_kategori = value.to_string(),
            other => return Err(unknown_field(other)),
        }
        Ok(())
    }
}

// --- Rusun ---
impl TableRow for Rusun {
    const SCREEN: &'static str = "/admin/rusun";

    fn headers() -> &'static [&'static str] {
        &["ID", "Nama Rusun", "Alamat", "Deskripsi", "Dibuat"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id_rusun.clone(),
            self.nama_rusun.clone(),
            truncate(&self.alamat, 40),
            truncate(&or_dash(self.deskripsi.as_deref()), 40),
            format_optional_date(self.created_at.as_ref()),
        ]
    }
}

impl FormFields for RusunPayload {
    fn set_field(&mut self, name: &str, value: &str) -> Result<(), String> {
        match name {
            "nama_rusun" | "nama" => self.nama_rusun = value.to_string(),
            "alamat" => self.alamat = value.to_string(),
            "deskripsi" => self.deskripsi = optional(value),
            other => return Err(unknown_field(other)),
        }
        Ok(())
    }
}
