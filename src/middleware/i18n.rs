// src/middleware/i18n.rs

// Idiomas suportados pelo catálogo de mensagens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    Id,
    En,
}

impl Locale {
    // Recebe uma preferência no formato do header Accept-Language
    // (ex: "en-US,en;q=0.8") e escolhe o primeiro idioma suportado.
    pub fn negotiate(preference: &str) -> Self {
        accept_language::parse(preference)
            .iter()
            .filter_map(|tag| {
                // "en-US" -> "en"
                let primary = tag.split('-').next().unwrap_or(tag);
                Self::from_primary(primary)
            })
            .next()
            .unwrap_or_default()
    }

    fn from_primary(tag: &str) -> Option<Self> {
        match tag.to_ascii_lowercase().as_str() {
            "id" | "in" => Some(Locale::Id),
            "en" => Some(Locale::En),
            _ => None,
        }
    }

    // Valor enviado no header Accept-Language das requisições
    pub fn tag(self) -> &'static str {
        match self {
            Locale::Id => "id",
            Locale::En => "en",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    RequestFailed,
    NetworkError,
    SessionExpired,
    StorageError,
    InvalidInput,
    LoadFailed,
    CredentialsRequired,
    LoginSuccess,
    LoginFailed,
    LogoutSuccess,
    ProfileUpdated,
    Created,
    Updated,
    Deleted,
    Deactivated,
    StatusUpdated,
    LinkCreated,
    Forbidden,
    NotFound,
    Empty,
}

impl Message {
    pub fn text(self, locale: Locale) -> &'static str {
        match locale {
            Locale::Id => self.id(),
            Locale::En => self.en(),
        }
    }

    // Substitui o marcador {label} pelo nome do recurso.
    pub fn render(self, locale: Locale, label: &str) -> String {
        self.text(locale).replace("{label}", label)
    }

    fn id(self) -> &'static str {
        match self {
            Message::RequestFailed => "Permintaan gagal",
            Message::NetworkError => "Kesalahan jaringan. Coba lagi nanti.",
            Message::SessionExpired => "Sesi berakhir, silakan login kembali",
            Message::StorageError => "Gagal menyimpan sesi",
            Message::InvalidInput => "Data yang diisi tidak valid",
            Message::LoadFailed => "Gagal memuat data {label}",
            Message::CredentialsRequired => "Username/email dan password wajib diisi",
            Message::LoginSuccess => "Login berhasil!",
            Message::LoginFailed => {
                "Login gagal. Periksa kembali username/email dan password Anda."
            }
            Message::LogoutSuccess => "Logout berhasil",
            Message::ProfileUpdated => "Profile berhasil diperbarui",
            Message::Created => "{label} berhasil ditambahkan",
            Message::Updated => "{label} diperbarui",
            Message::Deleted => "{label} dihapus",
            Message::Deactivated => "Akun {label} dinonaktifkan",
            Message::StatusUpdated => "Status diperbarui",
            Message::LinkCreated => "Link berhasil dibuat",
            Message::Forbidden => "Anda tidak memiliki akses ke halaman ini",
            Message::NotFound => "Halaman tidak ditemukan",
            Message::Empty => "Tidak ada data",
        }
    }

    fn en(self) -> &'static str {
        match self {
            Message::RequestFailed => "Request failed",
            Message::NetworkError => "Network error. Please try again later.",
            Message::SessionExpired => "Session expired, please log in again",
            Message::StorageError => "Could not store the session",
            Message::InvalidInput => "The submitted data is invalid",
            Message::LoadFailed => "Failed to load {label} data",
            Message::CredentialsRequired => "Username/email and password are required",
            Message::LoginSuccess => "Logged in!",
            Message::LoginFailed => "Login failed. Check your username/email and password.",
            Message::LogoutSuccess => "Logged out",
            Message::ProfileUpdated => "Profile updated",
            Message::Created => "{label} created",
            Message::Updated => "{label} updated",
            Message::Deleted => "{label} deleted",
            Message::Deactivated => "{label} account deactivated",
            Message::StatusUpdated => "Status updated",
            Message::LinkCreated => "Link created",
            Message::Forbidden => "You do not have access to this page",
            Message::NotFound => "Page not found",
            Message::Empty => "No data",
        }
    }
}

// Linha de rodapé da tabela: "Menampilkan 1 - 20 dari 45 (halaman 1/3)"
pub fn page_summary(locale: Locale, first: usize, last: usize, total: usize, page: usize, pages: usize) -> String {
    match locale {
        Locale::Id => format!("Menampilkan {first} - {last} dari {total} (halaman {page}/{pages})"),
        Locale::En => format!("Showing {first} - {last} of {total} (page {page}/{pages})"),
    }
}
