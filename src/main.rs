//src/main.rs

use std::{path::PathBuf, process::ExitCode};

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use inventaris::{
    config::{AppConfig, AppState},
    handlers::{
        self,
        resources::{ResourceAction, TableRow},
    },
    models::{
        inventory::{Gudang, Kategori, Rusun},
        users::{AdminAccount, KepalaGudangAccount, RetrieverAccount},
    },
};

#[derive(Debug, Parser)]
#[command(name = "inventaris", version, about = "Cliente do sistema de inventário (gudang, rusun, contas)")]
struct Cli {
    /// URL base da API REST (sobrescreve INVENTARIS_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Arquivo onde a sessão fica salva (sobrescreve INVENTARIS_SESSION_FILE)
    #[arg(long, global = true)]
    session_file: Option<PathBuf>,

    /// Preferência de idioma, ex: "id" ou "en-US,en;q=0.8"
    #[arg(long, global = true)]
    lang: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Entra com username ou e-mail
    Login {
        identifier: String,
        #[arg(long, short)]
        password: String,
    },
    Logout,
    /// Mostra o usuário da sessão atual
    Whoami,
    /// Mostra ou edita o perfil (só o nome exibido)
    Profile {
        #[arg(long)]
        nama_lengkap: Option<String>,
    },
    /// Navega para um caminho, ex: /admin/kategori
    Open { path: String },
    /// Menu lateral do papel atual
    Menu {
        #[arg(long)]
        current: Option<String>,
    },
    Gudang(ResourceCommand),
    Kategori(ResourceCommand),
    Rusun(ResourceCommand),
    Admin(ResourceCommand),
    KepalaGudang(ResourceCommand),
    Retriever(ResourceCommand),
}

#[derive(Debug, Args)]
struct ResourceCommand {
    #[command(subcommand)]
    action: ResourceAction,
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_target(false)
        .compact()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("inventaris=info")),
        )
        // stdout fica só com a saída das telas
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            tracing::error!("🔥 {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<bool> {
    let config = AppConfig::from_env().with_overrides(cli.api_url, cli.session_file, cli.lang);
    let state = AppState::new(config)?;

    match cli.command {
        Command::Login { identifier, password } => {
            handlers::auth::login(&state, identifier, password).await
        }
        Command::Logout => handlers::auth::logout(&state).await,
        Command::Whoami => handlers::auth::whoami(&state),
        Command::Profile { nama_lengkap } => handlers::auth::profile(&state, nama_lengkap),
        Command::Open { path } => handlers::navigation::open(&state, &path).await,
        Command::Menu { current } => handlers::navigation::menu(&state, current.as_deref()),
        Command::Gudang(cmd) => resource::<Gudang>(&state, cmd).await,
        Command::Kategori(cmd) => resource::<Kategori>(&state, cmd).await,
        Command::Rusun(cmd) => resource::<Rusun>(&state, cmd).await,
        Command::Admin(cmd) => resource::<AdminAccount>(&state, cmd).await,
        Command::KepalaGudang(cmd) => resource::<KepalaGudangAccount>(&state, cmd).await,
        Command::Retriever(cmd) => resource::<RetrieverAccount>(&state, cmd).await,
    }
}

async fn resource<R>(state: &AppState, cmd: ResourceCommand) -> anyhow::Result<bool>
where
    R: TableRow,
    R::Payload: handlers::resources::FormFields,
{
    handlers::resources::run::<R>(state, cmd.action).await
}
