// src/handlers/resources.rs

use clap::{Args, Subcommand};

use crate::{
    common::error::AppError,
    config::AppState,
    handlers::navigation,
    middleware::{
        i18n::{page_summary, Locale, Message},
        rbac::View,
    },
    models::resource::Resource,
    services::resource_list::{ListView, NoticeLevel, ResourceListController},
};

// ---
// ARGUMENTOS COMUNS A TODAS AS TELAS
// ---

#[derive(Debug, Clone, Default, Args)]
pub struct ListArgs {
    /// Busca por nome (e username, nas contas)
    #[arg(long, short)]
    pub search: Option<String>,

    /// all | active | inactive
    #[arg(long)]
    pub status: Option<String>,

    /// Filtro categórico, ex: --filter kategori=Kebersihan
    #[arg(long = "filter", value_name = "NOME=VALOR")]
    pub filters: Vec<String>,

    #[arg(long, default_value_t = 1)]
    pub page: usize,
}

#[derive(Debug, Clone, Subcommand)]
pub enum ResourceAction {
    /// Lista com busca, filtros e paginação
    List(ListArgs),
    Show {
        id: String,
    },
    Create {
        #[arg(long = "set", value_name = "CAMPO=VALOR")]
        fields: Vec<String>,
    },
    Update {
        id: String,
        #[arg(long = "set", value_name = "CAMPO=VALOR")]
        fields: Vec<String>,
    },
    Delete {
        id: String,
    },
    /// Ativa/desativa a conta
    Toggle {
        id: String,
    },
    /// Gera um link de cadastro (exibido uma única vez)
    Link,
}

// Como um recurso aparece na tabela de texto
pub trait TableRow: Resource {
    // Tela protegida onde o recurso é gerenciado
    const SCREEN: &'static str;

    fn headers() -> &'static [&'static str];

    fn cells(&self) -> Vec<String>;
}

// Preenchimento do formulário a partir de `--set campo=valor`
pub trait FormFields {
    fn set_field(&mut self, name: &str, value: &str) -> Result<(), String>;
}

pub fn split_pair(raw: &str) -> Option<(&str, &str)> {
    raw.split_once('=').map(|(k, v)| (k.trim(), v.trim()))
}

// Campo opcional: vazio vira ausente
pub fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

pub fn unknown_field(name: &str) -> String {
    format!("campo desconhecido: {name}")
}

// ---
// DESPACHO
// ---

pub async fn run<R>(state: &AppState, action: ResourceAction) -> anyhow::Result<bool>
where
    R: TableRow,
    R::Payload: FormFields,
{
    if navigation::enter(state, R::SCREEN).is_none() {
        return Ok(false);
    }

    let locale = state.locale;
    let mut controller = state.controller::<R>();

    let ok = match action {
        ResourceAction::List(args) => list(&mut controller, locale, &args).await,
        ResourceAction::Show { id } => show(&mut controller, &id).await,
        ResourceAction::Create { fields } => {
            if controller.open_create() {
                fill(&mut controller, &fields) && controller.submit().await
            } else {
                unsupported(locale, "create")
            }
        }
        ResourceAction::Update { id, fields } => {
            controller.mount().await;
            if controller.open_edit(&id) {
                fill(&mut controller, &fields) && controller.submit().await
            } else {
                println!("✘ {}", Message::NotFound.text(locale));
                false
            }
        }
        ResourceAction::Delete { id } => controller.delete(&id).await,
        ResourceAction::Toggle { id } => {
            if R::MUTATIONS.toggle {
                controller.toggle_active(&id).await
            } else {
                unsupported(locale, "toggle-status")
            }
        }
        ResourceAction::Link => {
            if R::REGISTRATION_ROLE.is_none() {
                unsupported(locale, "registration-link")
            } else if controller.generate_registration_link().await {
                if let Some(link) = controller.registration_link() {
                    println!("{link}");
                }
                controller.dismiss_link_dialog();
                true
            } else {
                false
            }
        }
    };

    flush(&mut controller);
    if controller.needs_login() {
        println!("↪ {}", View::Login.path());
    }

    Ok(ok)
}

// Usada também pelo `open`, depois que o guardião já liberou a tela
pub async fn render_list<R: TableRow>(state: &AppState, args: &ListArgs) -> bool {
    let mut controller = state.controller::<R>();
    let ok = list(&mut controller, state.locale, args).await;
    flush(&mut controller);
    ok
}

async fn list<R: TableRow>(
    controller: &mut ResourceListController<R>,
    locale: Locale,
    args: &ListArgs,
) -> bool {
    controller.mount().await;

    if let Some(status) = &args.status {
        if !controller.set_filter("status", status) {
            println!("✘ status: all | active | inactive");
            return false;
        }
    }
    for raw in &args.filters {
        let applied = split_pair(raw).is_some_and(|(name, value)| controller.set_filter(name, value));
        if !applied {
            println!("✘ filtro inválido '{raw}' (disponíveis: status {})", R::FILTERS.join(" "));
            return false;
        }
    }
    if let Some(search) = &args.search {
        controller.set_search(search);
    }
    // Página por último: filtros e busca voltam para a página 1
    controller.set_page(args.page);

    let view = controller.view();
    print_table(&view, locale);
    !view.error
}

async fn show<R: TableRow>(controller: &mut ResourceListController<R>, id: &str) -> bool {
    let Some(record) = controller.detail(id).await else {
        return false;
    };
    let headers = R::headers();
    let width = headers.iter().map(|h| h.chars().count()).max().unwrap_or(0);
    for (header, cell) in headers.iter().zip(record.cells()) {
        println!("{header:<width$}  {cell}");
    }
    true
}

fn fill<R: Resource>(controller: &mut ResourceListController<R>, fields: &[String]) -> bool
where
    R::Payload: FormFields,
{
    let Some(form) = controller.form_mut() else {
        return false;
    };
    for raw in fields {
        let Some((name, value)) = split_pair(raw) else {
            println!("✘ esperado CAMPO=VALOR, veio '{raw}'");
            return false;
        };
        if let Err(e) = form.set_field(name, value) {
            println!("✘ {e}");
            return false;
        }
    }
    true
}

fn unsupported(locale: Locale, operation: &'static str) -> bool {
    tracing::debug!(operation, "operação não exposta por esta tela");
    println!("✘ {}", AppError::Unsupported(operation).user_message(locale));
    false
}

// Notificações (toasts) viram linhas na saída
fn flush<R: Resource>(controller: &mut ResourceListController<R>) {
    for notice in controller.drain_notifications() {
        let mark = match notice.level {
            NoticeLevel::Success => "✔",
            NoticeLevel::Error => "✘",
        };
        println!("{mark} {}", notice.text);
    }
}

pub fn format_table(headers: &[&str], rows: &[Vec<String>]) -> Vec<String> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = vec![line(headers.to_vec())];
    lines.push(widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("  "));
    lines.extend(rows.iter().map(|row| line(row.iter().map(String::as_str).collect())));
    lines
}

fn print_table<R: TableRow>(view: &ListView<'_, R>, locale: Locale) {
    if view.items.is_empty() {
        println!("{}", Message::Empty.text(locale));
    } else {
        let rows: Vec<Vec<String>> = view.items.iter().map(|record| record.cells()).collect();
        for line in format_table(R::headers(), &rows) {
            println!("{line}");
        }
    }
    println!(
        "{}",
        page_summary(locale, view.range.first, view.range.last, view.range.total, view.page, view.total_pages)
    );
}
