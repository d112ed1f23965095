// src/middleware/rbac.rs

use crate::{
    middleware::auth::{decide, Decision, Redirect},
    models::auth::{Role, Session},
};

// ---
// TELAS E ÁREAS
// ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Dashboard,
    Profile,
    AdminAccounts,
    KepalaGudangAccounts,
    RetrieverAccounts,
    Kategori,
    Rusun,
    Gudang,
    // Visão somente-leitura do kepala gudang
    GudangInfo,
}

impl Screen {
    pub fn segment(self) -> &'static str {
        match self {
            Screen::Dashboard => "dashboard",
            Screen::Profile => "profile",
            Screen::AdminAccounts => "admin",
            Screen::KepalaGudangAccounts => "kepala-gudang",
            Screen::RetrieverAccounts => "retriever",
            Screen::Kategori => "kategori",
            Screen::Rusun => "rusun",
            Screen::Gudang | Screen::GudangInfo => "gudang",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Screen::Dashboard => "Dashboard",
            Screen::Profile => "Profile",
            Screen::AdminAccounts => "Admin",
            Screen::KepalaGudangAccounts => "Kepala Gudang",
            Screen::RetrieverAccounts => "Retriever",
            Screen::Kategori => "Kategori Barang",
            Screen::Rusun => "Rusun",
            Screen::Gudang => "Gudang",
            Screen::GudangInfo => "Info Gudang",
        }
    }
}

// Cada papel tem sua área e só ela
pub fn area_prefix(role: Role) -> &'static str {
    match role {
        Role::Admin => "/admin",
        Role::KepalaGudang => "/kepala",
        Role::Retriever => "/retriever",
    }
}

pub fn screens_for(role: Role) -> &'static [Screen] {
    match role {
        Role::Admin => &[
            Screen::Dashboard,
            Screen::Profile,
            Screen::RetrieverAccounts,
            Screen::AdminAccounts,
            Screen::KepalaGudangAccounts,
            Screen::Kategori,
            Screen::Rusun,
            Screen::Gudang,
        ],
        Role::KepalaGudang => &[Screen::Dashboard, Screen::Profile, Screen::GudangInfo],
        Role::Retriever => &[Screen::Dashboard, Screen::Profile],
    }
}

fn required_roles(role: Role) -> &'static [Role] {
    match role {
        Role::Admin => &[Role::Admin],
        Role::KepalaGudang => &[Role::KepalaGudang],
        Role::Retriever => &[Role::Retriever],
    }
}

fn role_for_area(segment: &str) -> Option<Role> {
    Role::ALL
        .into_iter()
        .find(|role| area_prefix(*role).trim_start_matches('/') == segment)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Root,
    Login,
    Forbidden,
    NotFound,
    // `screen: None` = caminho desconhecido dentro da área (ainda protegido)
    Area { role: Role, screen: Option<Screen> },
}

impl View {
    pub fn parse(path: &str) -> View {
        let segments: Vec<&str> = path
            .trim()
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        match segments.as_slice() {
            [] => View::Root,
            ["login"] => View::Login,
            ["forbidden"] => View::Forbidden,
            [area, rest @ ..] => match role_for_area(area) {
                Some(role) => {
                    let screen = match rest {
                        [segment] => screens_for(role)
                            .iter()
                            .copied()
                            .find(|s| s.segment() == *segment),
                        _ => None,
                    };
                    View::Area { role, screen }
                }
                None => View::NotFound,
            },
        }
    }

    pub fn path(&self) -> String {
        match self {
            View::Root => "/".to_string(),
            View::Login => "/login".to_string(),
            View::Forbidden => "/forbidden".to_string(),
            View::NotFound => "/404".to_string(),
            View::Area { role, screen: Some(screen) } => {
                format!("{}/{}", area_prefix(*role), screen.segment())
            }
            View::Area { role, screen: None } => format!("{}/404", area_prefix(*role)),
        }
    }

    pub fn required_roles(&self) -> &'static [Role] {
        match self {
            View::Area { role, .. } => required_roles(*role),
            _ => &[],
        }
    }
}

pub fn landing(role: Role) -> View {
    View::Area { role, screen: Some(Screen::Dashboard) }
}

impl From<Redirect> for View {
    fn from(redirect: Redirect) -> Self {
        match redirect {
            Redirect::Login => View::Login,
            Redirect::Forbidden => View::Forbidden,
        }
    }
}

// ---
// ROTEADOR
// ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Render(View),
    Redirect(View),
}

impl Navigation {
    pub fn view(&self) -> View {
        match self {
            Navigation::Render(v) | Navigation::Redirect(v) => *v,
        }
    }
}

fn landing_for(session: &Session) -> Option<View> {
    session
        .identity()
        .filter(|_| session.authenticated())
        .map(|identity| landing(identity.role))
}

/// Resolve um caminho contra a sessão atual. Nada é guardado entre chamadas.
pub fn resolve(session: &Session, path: &str) -> Navigation {
    match View::parse(path) {
        View::Root => Navigation::Redirect(landing_for(session).unwrap_or(View::Login)),
        View::Login => match landing_for(session) {
            Some(view) => Navigation::Redirect(view),
            None => Navigation::Render(View::Login),
        },
        view @ View::Area { .. } => match decide(session, view.required_roles()) {
            Decision::Render => Navigation::Render(view),
            Decision::Redirect(redirect) => Navigation::Redirect(redirect.into()),
        },
        other => Navigation::Render(other),
    }
}

// ---
// MENU LATERAL
// ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuItem {
    pub label: &'static str,
    pub path: Option<&'static str>,
    pub children: &'static [MenuItem],
}

static ADMIN_MENU: [MenuItem; 7] = [
    MenuItem { label: "Dashboard", path: Some("/admin/dashboard"), children: &[] },
    MenuItem {
        label: "Pengguna",
        path: None,
        children: &[
            MenuItem { label: "Admin", path: Some("/admin/admin"), children: &[] },
            MenuItem { label: "Kepala Gudang", path: Some("/admin/kepala-gudang"), children: &[] },
            MenuItem { label: "Retriever", path: Some("/admin/retriever"), children: &[] },
        ],
    },
    MenuItem {
        label: "Barang",
        path: None,
        children: &[
            MenuItem { label: "Data Barang", path: Some("/admin/barang"), children: &[] },
            MenuItem { label: "Tambah Barang", path: Some("/admin/barang/tambah"), children: &[] },
            MenuItem { label: "Kategori Barang", path: Some("/admin/kategori"), children: &[] },
        ],
    },
    MenuItem { label: "Rusun", path: Some("/admin/rusun"), children: &[] },
    MenuItem { label: "Gudang", path: Some("/admin/gudang"), children: &[] },
    MenuItem { label: "Mutasi", path: Some("/admin/mutasi"), children: &[] },
    MenuItem { label: "Laporan", path: Some("/admin/laporan"), children: &[] },
];

static KEPALA_MENU: [MenuItem; 6] = [
    MenuItem { label: "Dashboard", path: Some("/kepala/dashboard"), children: &[] },
    MenuItem { label: "Permintaan", path: Some("/kepala/permintaan"), children: &[] },
    MenuItem { label: "Barang", path: Some("/kepala/barang"), children: &[] },
    MenuItem { label: "Mutasi", path: Some("/kepala/mutasi"), children: &[] },
    MenuItem { label: "Log Transaksi", path: Some("/kepala/transaksi"), children: &[] },
    MenuItem {
        label: "Lainnya",
        path: None,
        children: &[MenuItem { label: "Info Gudang", path: Some("/kepala/gudang"), children: &[] }],
    },
];

static RETRIEVER_MENU: [MenuItem; 4] = [
    MenuItem { label: "Dashboard", path: Some("/retriever/dashboard"), children: &[] },
    MenuItem { label: "Buat Permintaan", path: Some("/retriever/permintaan/create"), children: &[] },
    MenuItem { label: "Lihat Gudang", path: Some("/retriever/gudang"), children: &[] },
    MenuItem { label: "Permintaan Saya", path: Some("/retriever/permintaan"), children: &[] },
];

pub fn menu_for(role: Role) -> &'static [MenuItem] {
    match role {
        Role::Admin => &ADMIN_MENU,
        Role::KepalaGudang => &KEPALA_MENU,
        Role::Retriever => &RETRIEVER_MENU,
    }
}

// Grupo que deve abrir sozinho porque um filho está ativo
pub fn open_group_for(role: Role, current_path: &str) -> Option<&'static str> {
    menu_for(role)
        .iter()
        .find(|item| item.children.iter().any(|child| child.path == Some(current_path)))
        .map(|item| item.label)
}
