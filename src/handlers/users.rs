// src/handlers/users.rs

use crate::{
    common::format::{format_optional_date, or_dash},
    handlers::resources::{optional, unknown_field, FormFields, TableRow},
    models::users::{
        AdminAccount, AdminPayload, KepalaGudangAccount, KepalaGudangPayload, RetrieverAccount,
        RetrieverPayload,
    },
};

fn status_cell(active: bool) -> String {
    if active { "Aktif" } else { "Nonaktif" }.to_string()
}

// --- Admin ---
impl TableRow for AdminAccount {
    const SCREEN: &'static str = "/admin/admin";

    fn headers() -> &'static [&'static str] {
        &["ID", "Nama Lengkap", "Username", "Email", "Status", "Dibuat"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id_admin.clone(),
            self.nama_lengkap.clone(),
            or_dash(self.username.as_deref()),
            or_dash(self.email.as_deref()),
            status_cell(self.is_active),
            format_optional_date(self.created_at.as_ref()),
        ]
    }
}

impl FormFields for AdminPayload {
    fn set_field(&mut self, name: &str, value: &str) -> Result<(), String> {
        match name {
            "nama_lengkap" | "nama" => self.nama_lengkap = value.to_string(),
            "email" => self.email = optional(value),
            other => return Err(unknown_field(other)),
        }
        Ok(())
    }
}

// --- Kepala gudang ---
impl TableRow for KepalaGudangAccount {
    const SCREEN: &'static str = "/admin/kepala-gudang";

    fn headers() -> &'static [&'static str] {
        &["ID", "Nama Lengkap", "Username", "Unit Kerja", "Rusun", "Status", "Dibuat"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id_kepala_gudang.clone(),
            self.nama_lengkap.clone(),
            or_dash(self.username.as_deref()),
            or_dash(self.unit_kerja.as_deref()),
            or_dash(self.rusun.as_deref()),
            status_cell(self.is_active),
            format_optional_date(self.created_at.as_ref()),
        ]
    }
}

impl FormFields for KepalaGudangPayload {
    fn set_field(&mut self, name: &str, value: &str) -> Result<(), String> {
        match name {
            "nama_lengkap" | "nama" => self.nama_lengkap = value.to_string(),
            "unit_kerja" => self.unit_kerja = optional(value),
            "id_rusun" | "rusun" => self.id_rusun = optional(value),
            other => return Err(unknown_field(other)),
        }
        Ok(())
    }
}

// --- Retriever ---
impl TableRow for RetrieverAccount {
    const SCREEN: &'static str = "/admin/retriever";

    fn headers() -> &'static [&'static str] {
        &["ID", "Nama Lengkap", "Username", "Kategori", "Rusun", "Status", "Dibuat"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id_retriever.clone(),
            self.nama_lengkap.clone(),
            or_dash(self.username.as_deref()),
            or_dash(self.kategori.as_deref()),
            or_dash(self.rusun.as_deref()),
            status_cell(self.is_active),
            format_optional_date(self.created_at.as_ref()),
        ]
    }
}

impl FormFields for RetrieverPayload {
    fn set_field(&mut self, name: &str, value: &str) -> Result<(), String> {
        match name {
            "nama_lengkap" | "nama" => self.nama_lengkap = value.to_string(),
            "kategori" => self.kategori = optional(value),
            "deskripsi" => self.deskripsi = optional(value),
            "id_rusun" | "rusun" => self.id_rusun = optional(value),
            other => return Err(unknown_field(other)),
        }
        Ok(())
    }
}
