// src/handlers/auth.rs

use crate::{
    common::{
        error::AppError,
        format::{initials, or_dash},
    },
    config::AppState,
    handlers::navigation,
    middleware::{
        i18n::{Locale, Message},
        rbac::{area_prefix, resolve, Navigation, View},
    },
    models::auth::{Identity, LoginPayload, ProfilePayload},
};

// Handler de login
pub async fn login(state: &AppState, identifier: String, password: String) -> anyhow::Result<bool> {
    let locale = state.locale;

    // Já logado: /login manda direto para a página inicial do papel
    let session = state.session.sync_from_storage();
    if let Navigation::Redirect(landing) = resolve(&session, View::Login.path().as_str()) {
        println!("↪ {}", landing.path());
        return Ok(true);
    }

    if let Some(url) = &state.config.frontend_url {
        println!("🌐 {url}");
    }

    match state.auth_service.login(LoginPayload { identifier, password }).await {
        Ok(outcome) => {
            println!("✔ {}", Message::LoginSuccess.text(locale));
            println!("{} ({})", outcome.identity.display_name(), outcome.identity.role.label());
            println!("↪ {}", outcome.landing.path());
            Ok(true)
        }
        Err(e) => {
            tracing::warn!("⚠️ Login recusado: {}", e);
            println!("✘ {}", login_error_text(&e, locale));
            Ok(false)
        }
    }
}

// Sem mensagem do backend, o texto é o de login inválido, não o genérico
fn login_error_text(error: &AppError, locale: Locale) -> String {
    match error {
        AppError::Rejected { message: None, .. } | AppError::Unauthorized { message: None } => {
            Message::LoginFailed.text(locale).to_string()
        }
        other => other.user_message(locale),
    }
}

pub async fn logout(state: &AppState) -> anyhow::Result<bool> {
    state.session.sync_from_storage();
    state.auth_service.logout().await?;
    println!("✔ {}", Message::LogoutSuccess.text(state.locale));
    println!("↪ {}", View::Login.path());
    Ok(true)
}

pub fn whoami(state: &AppState) -> anyhow::Result<bool> {
    let session = state.session.sync_from_storage();
    match session.identity().filter(|_| session.authenticated()) {
        Some(identity) => {
            print_profile(identity);
            Ok(true)
        }
        None => {
            navigation::announce_redirect(state, View::Login);
            Ok(false)
        }
    }
}

// `inventaris profile [--nama-lengkap ...]`
pub fn profile(state: &AppState, nama_lengkap: Option<String>) -> anyhow::Result<bool> {
    let session = state.session.sync_from_storage();
    let Some(role) = session.role().filter(|_| session.authenticated()) else {
        navigation::announce_redirect(state, View::Login);
        return Ok(false);
    };
    if navigation::enter(state, &format!("{}/profile", area_prefix(role))).is_none() {
        return Ok(false);
    }

    let identity = match nama_lengkap {
        Some(nama_lengkap) => match state.auth_service.update_profile(ProfilePayload { nama_lengkap }) {
            Ok(identity) => {
                println!("✔ {}", Message::ProfileUpdated.text(state.locale));
                identity
            }
            Err(e) => {
                println!("✘ {}", e.user_message(state.locale));
                return Ok(false);
            }
        },
        None => match state.session.snapshot().identity() {
            Some(identity) => identity.clone(),
            None => return Ok(false),
        },
    };

    print_profile(&identity);
    Ok(true)
}

pub fn print_profile(identity: &Identity) {
    let initials = initials(identity.display_name());
    println!("[{initials}] {}", identity.display_name());
    println!("  Username  {}", identity.username);
    println!("  Email     {}", or_dash(identity.email.as_deref()));
    println!("  Role      {}", identity.role.label());
    println!("  ID        {}", identity.id_user);
}
