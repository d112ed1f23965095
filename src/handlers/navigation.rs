// src/handlers/navigation.rs

use crate::{
    config::AppState,
    handlers::{auth::print_profile, resources},
    middleware::{
        i18n::Message,
        rbac::{menu_for, open_group_for, resolve, MenuItem, Navigation, Screen, View},
    },
    models::{
        auth::{Role, Session},
        inventory::{Gudang, Kategori, Rusun},
        users::{AdminAccount, KepalaGudangAccount, RetrieverAccount},
    },
};

/// Porta de entrada de toda tela: relê a sessão do disco (pega logout feito
/// por outro processo) e roda o guardião. `None` = houve redirecionamento.
pub fn enter(state: &AppState, path: &str) -> Option<View> {
    let session = state.session.sync_from_storage();
    match resolve(&session, path) {
        Navigation::Render(view) => Some(view),
        Navigation::Redirect(target) => {
            announce_redirect(state, target);
            None
        }
    }
}

pub fn announce_redirect(state: &AppState, target: View) {
    match target {
        View::Login => println!("✘ {}", Message::SessionExpired.text(state.locale)),
        View::Forbidden => println!("✘ {}", Message::Forbidden.text(state.locale)),
        _ => {}
    }
    println!("↪ {}", target.path());
}

// `inventaris open <caminho>`: segue no máximo um redirecionamento
pub async fn open(state: &AppState, path: &str) -> anyhow::Result<bool> {
    let session = state.session.sync_from_storage();

    let view = match resolve(&session, path) {
        Navigation::Render(view) => view,
        Navigation::Redirect(target) => {
            println!("↪ {}", target.path());
            resolve(&session, &target.path()).view()
        }
    };

    render(state, &session, view).await
}

async fn render(state: &AppState, session: &Session, view: View) -> anyhow::Result<bool> {
    let locale = state.locale;

    let (role, screen) = match view {
        View::Area { role, screen: Some(screen) } => (role, screen),
        View::Login => {
            println!("inventaris login <username|email> --password <password>");
            return Ok(false);
        }
        View::Forbidden => {
            println!("✘ {}", Message::Forbidden.text(locale));
            return Ok(false);
        }
        View::Root | View::NotFound | View::Area { screen: None, .. } => {
            println!("✘ {}", Message::NotFound.text(locale));
            return Ok(false);
        }
    };

    println!("== {} ==", screen.title());
    let args = resources::ListArgs::default();

    let ok = match screen {
        Screen::Dashboard => {
            if let Some(identity) = session.identity() {
                println!("Selamat datang, {} ({})", identity.display_name(), role.label());
            }
            print_menu(role, &view.path());
            true
        }
        Screen::Profile => match session.identity() {
            Some(identity) => {
                print_profile(identity);
                true
            }
            None => false,
        },
        Screen::AdminAccounts => resources::render_list::<AdminAccount>(state, &args).await,
        Screen::KepalaGudangAccounts => {
            resources::render_list::<KepalaGudangAccount>(state, &args).await
        }
        Screen::RetrieverAccounts => resources::render_list::<RetrieverAccount>(state, &args).await,
        Screen::Kategori => resources::render_list::<Kategori>(state, &args).await,
        Screen::Rusun => resources::render_list::<Rusun>(state, &args).await,
        Screen::Gudang | Screen::GudangInfo => resources::render_list::<Gudang>(state, &args).await,
    };

    Ok(ok)
}

// `inventaris menu [--current <caminho>]`
pub fn menu(state: &AppState, current: Option<&str>) -> anyhow::Result<bool> {
    let session = state.session.sync_from_storage();
    let Some(role) = session.role().filter(|_| session.authenticated()) else {
        announce_redirect(state, View::Login);
        return Ok(false);
    };

    println!("{}", role.label());
    print_menu(role, current.unwrap_or_default());
    Ok(true)
}

fn print_menu(role: Role, current: &str) {
    let open_group = open_group_for(role, current);
    for item in menu_for(role) {
        print_item(item, current, 0);
        if item.children.is_empty() {
            continue;
        }
        // Grupos fechados mostram só o título, como no menu lateral
        let expanded = open_group == Some(item.label) || current.is_empty();
        if expanded {
            for child in item.children {
                print_item(child, current, 1);
            }
        }
    }
}

fn print_item(item: &MenuItem, current: &str, depth: usize) {
    let marker = if item.path == Some(current) { "▸" } else { " " };
    let indent = "  ".repeat(depth);
    match item.path {
        Some(path) => println!("{marker} {indent}{:<20} {path}", item.label),
        None => println!("{marker} {indent}{} ▾", item.label),
    }
}
