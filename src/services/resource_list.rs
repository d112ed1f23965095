// src/services/resource_list.rs

use std::{collections::BTreeMap, future::Future, str::FromStr, sync::Arc};

use validator::Validate;

use crate::{
    common::{
        error::AppError,
        pagination::{clamp_page, page_range, paginate, total_pages, PageRange, PAGE_SIZE},
    },
    db::resource_repo::ResourceApi,
    middleware::i18n::{Locale, Message},
    models::resource::Resource,
};

// Nome reservado do filtro de ativação
pub const STATUS_FILTER: &str = "status";
// Valor que desliga um filtro, de status ou categórico
pub const ALL: &str = "all";

// ---
// FILTROS
// ---

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Inactive,
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ALL => Ok(StatusFilter::All),
            "active" | "aktif" => Ok(StatusFilter::Active),
            "inactive" | "nonaktif" => Ok(StatusFilter::Inactive),
            other => Err(format!("status desconhecido: {other}")),
        }
    }
}

/// Um predicado sobre um registro. Um registro aparece na lista se passa em
/// todos os predicados ativos, então a ordem de aplicação não importa.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    Status(StatusFilter),
    Field { name: String, value: String },
    Search(String),
}

impl Predicate {
    pub fn accepts<R: Resource>(&self, record: &R) -> bool {
        match self {
            Predicate::Status(StatusFilter::All) => true,
            // Recurso sem flag de ativação não é afetado
            Predicate::Status(wanted) => record
                .is_active()
                .is_none_or(|active| active == (*wanted == StatusFilter::Active)),
            Predicate::Field { value, .. } if value == ALL => true,
            // Igualdade exata, sem normalizar caixa nem espaços
            Predicate::Field { name, value } => record.field(name).is_some_and(|field| field == value),
            Predicate::Search(term) if term.trim().is_empty() => true,
            Predicate::Search(term) => {
                let needle = term.trim().to_lowercase();
                record
                    .search_keys()
                    .iter()
                    .any(|key| key.to_lowercase().contains(&needle))
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub search: String,
    pub status: StatusFilter,
    pub fields: BTreeMap<String, String>,
}

impl FilterState {
    pub fn predicates(&self) -> Vec<Predicate> {
        let mut predicates = vec![Predicate::Status(self.status)];
        predicates.extend(self.fields.iter().map(|(name, value)| Predicate::Field {
            name: name.clone(),
            value: value.clone(),
        }));
        predicates.push(Predicate::Search(self.search.clone()));
        predicates
    }

    // Mantém a ordem recebida do backend
    pub fn apply<'a, R: Resource>(&self, items: &'a [R]) -> Vec<&'a R> {
        let predicates = self.predicates();
        items
            .iter()
            .filter(|record| predicates.iter().all(|p| p.accepts(*record)))
            .collect()
    }
}

// ---
// ESTADO DA TELA
// ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListStatus {
    Idle,
    Loading,
    Ready,
    Mutating,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NoticeLevel,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogMode {
    Create,
    Edit(String),
}

#[derive(Debug, Clone)]
pub struct Dialog<P> {
    pub mode: DialogMode,
    pub form: P,
}

// O que a camada de apresentação consome
#[derive(Debug)]
pub struct ListView<'a, R> {
    pub items: Vec<&'a R>,
    pub page: usize,
    pub total_pages: usize,
    pub range: PageRange,
    pub loading: bool,
    pub error: bool,
}

/// Controller genérica de uma tela de gerenciamento: busca a coleção,
/// filtra, pagina e executa as mutações.
///
/// Falhas nunca escapam como `Err`: viram coleção vazia, `error = true`
/// ou uma notificação, e as mutações devolvem só `bool`.
pub struct ResourceListController<R: Resource> {
    api: Arc<dyn ResourceApi<R>>,
    locale: Locale,
    collection: Vec<R>,
    status: ListStatus,
    error: bool,
    stale: bool,
    filters: FilterState,
    page: usize,
    dialog: Option<Dialog<R::Payload>>,
    registration_link: Option<String>,
    notifications: Vec<Notification>,
    needs_login: bool,
}

impl<R: Resource> ResourceListController<R> {
    pub fn new(api: Arc<dyn ResourceApi<R>>, locale: Locale) -> Self {
        Self {
            api,
            locale,
            collection: Vec::new(),
            status: ListStatus::Idle,
            error: false,
            stale: true,
            filters: FilterState::default(),
            page: 1,
            dialog: None,
            registration_link: None,
            notifications: Vec::new(),
            needs_login: false,
        }
    }

    // --- BUSCA ---

    pub async fn mount(&mut self) {
        self.fetch().await;
    }

    pub async fn fetch(&mut self) {
        self.status = ListStatus::Loading;

        match self.api.list().await {
            Ok(items) => {
                tracing::debug!(resource = R::PATH, count = items.len(), "coleção carregada");
                self.collection = items;
                self.error = false;
                self.status = ListStatus::Ready;
            }
            Err(e) => {
                tracing::warn!("⚠️ Falha ao carregar {}: {}", R::PATH, e);
                // Nada de dado velho na tela
                self.collection.clear();
                self.error = true;
                self.status = ListStatus::Error;
                self.report(&e, Message::LoadFailed.render(self.locale, R::LABEL));
            }
        }

        self.stale = false;
        self.page = clamp_page(self.page, self.filtered().len(), PAGE_SIZE);
    }

    pub fn invalidate(&mut self) {
        self.stale = true;
    }

    pub fn is_stale(&self) -> bool {
        self.stale
    }

    pub async fn refresh_if_stale(&mut self) {
        if self.stale {
            self.fetch().await;
        }
    }

    // --- FILTROS E PÁGINA ---

    pub fn set_search(&mut self, term: &str) {
        self.filters.search = term.to_string();
        self.page = 1;
    }

    /// Aplica `status` ou um dos filtros categóricos do recurso.
    /// Devolve `false` (sem mexer em nada) para nome ou valor desconhecido.
    pub fn set_filter(&mut self, name: &str, value: &str) -> bool {
        if name == STATUS_FILTER {
            let Ok(status) = value.parse::<StatusFilter>() else {
                return false;
            };
            self.filters.status = status;
        } else if R::FILTERS.contains(&name) {
            self.filters.fields.insert(name.to_string(), value.to_string());
        } else {
            return false;
        }

        self.page = 1;
        true
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = clamp_page(page, self.filtered().len(), PAGE_SIZE);
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn filtered(&self) -> Vec<&R> {
        self.filters.apply(&self.collection)
    }

    // Valores distintos de um filtro categórico, para montar o seletor
    pub fn filter_options(&self, name: &str) -> Vec<String> {
        let mut options: Vec<String> = self
            .collection
            .iter()
            .filter_map(|record| record.field(name))
            .map(str::to_string)
            .collect();
        options.sort();
        options.dedup();
        options
    }

    pub fn view(&self) -> ListView<'_, R> {
        let filtered = self.filtered();
        let count = filtered.len();
        let page = clamp_page(self.page, count, PAGE_SIZE);

        ListView {
            items: paginate(&filtered, page, PAGE_SIZE).to_vec(),
            page,
            total_pages: total_pages(count, PAGE_SIZE),
            range: page_range(page, count, PAGE_SIZE),
            loading: self.status == ListStatus::Loading,
            error: self.error,
        }
    }

    pub fn status(&self) -> ListStatus {
        self.status
    }

    pub fn collection(&self) -> &[R] {
        &self.collection
    }

    pub fn find(&self, id: &str) -> Option<&R> {
        self.collection.iter().find(|record| record.id() == id)
    }

    // --- DIÁLOGO DE FORMULÁRIO ---

    pub fn open_create(&mut self) -> bool {
        if !R::MUTATIONS.create {
            return false;
        }
        self.dialog = Some(Dialog { mode: DialogMode::Create, form: R::Payload::default() });
        true
    }

    // Pré-preenche com o registro atual
    pub fn open_edit(&mut self, id: &str) -> bool {
        if !R::MUTATIONS.update {
            return false;
        }
        let Some(form) = self.find(id).map(R::to_payload) else {
            return false;
        };
        self.dialog = Some(Dialog { mode: DialogMode::Edit(id.to_string()), form });
        true
    }

    pub fn dialog(&self) -> Option<&Dialog<R::Payload>> {
        self.dialog.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut R::Payload> {
        self.dialog.as_mut().map(|d| &mut d.form)
    }

    // Fechar sempre descarta o que foi digitado
    pub fn close_dialog(&mut self) {
        self.dialog = None;
    }

    pub async fn submit(&mut self) -> bool {
        let Some(dialog) = self.dialog.clone() else {
            return false;
        };
        match dialog.mode {
            DialogMode::Create => self.create(dialog.form).await,
            DialogMode::Edit(id) => self.update(&id, dialog.form).await,
        }
    }

    // --- MUTAÇÕES ---

    pub async fn create(&mut self, payload: R::Payload) -> bool {
        if let Err(e) = payload.validate() {
            self.report_validation(e);
            return false;
        }
        let api = self.api.clone();
        let success = Message::Created.render(self.locale, R::LABEL);
        self.mutate(async move { api.create(&payload).await }, success)
            .await
            .is_some()
    }

    pub async fn update(&mut self, id: &str, payload: R::Payload) -> bool {
        if let Err(e) = payload.validate() {
            self.report_validation(e);
            return false;
        }
        let api = self.api.clone();
        let id = id.to_string();
        let success = Message::Updated.render(self.locale, R::LABEL);
        self.mutate(async move { api.update(&id, &payload).await }, success)
            .await
            .is_some()
    }

    pub async fn delete(&mut self, id: &str) -> bool {
        let api = self.api.clone();
        let id = id.to_string();
        // Conta de usuário não some: é desativada
        let message = if R::MUTATIONS.toggle { Message::Deactivated } else { Message::Deleted };
        let success = message.render(self.locale, R::LABEL);
        self.mutate(async move { api.delete(&id).await }, success)
            .await
            .is_some()
    }

    pub async fn toggle_active(&mut self, id: &str) -> bool {
        let api = self.api.clone();
        let id = id.to_string();
        let success = Message::StatusUpdated.text(self.locale).to_string();
        self.mutate(async move { api.toggle_status(&id).await }, success)
            .await
            .is_some()
    }

    // Uma chamada, e em caso de sucesso: invalida, fecha o diálogo, recarrega.
    // Em caso de falha a coleção fica como estava e o diálogo continua aberto.
    async fn mutate<T>(
        &mut self,
        operation: impl Future<Output = Result<T, AppError>>,
        success: String,
    ) -> Option<T> {
        let previous = self.status;
        self.status = ListStatus::Mutating;

        match operation.await {
            Ok(value) => {
                tracing::info!("✅ {}", success);
                self.invalidate();
                self.close_dialog();
                self.notify(NoticeLevel::Success, success);
                self.fetch().await;
                Some(value)
            }
            Err(e) => {
                tracing::warn!("⚠️ Mutação em {} falhou: {}", R::PATH, e);
                self.status = if previous == ListStatus::Error { ListStatus::Error } else { ListStatus::Ready };
                let text = e.user_message(self.locale);
                self.report(&e, text);
                None
            }
        }
    }

    // --- DETALHE ---

    pub async fn detail(&mut self, id: &str) -> Option<R> {
        match self.api.get(id).await {
            Ok(record) => Some(record),
            Err(e) => {
                let text = e.user_message(self.locale);
                self.report(&e, text);
                None
            }
        }
    }

    // --- LINK DE CADASTRO ---

    pub async fn generate_registration_link(&mut self) -> bool {
        let Some(role) = R::REGISTRATION_ROLE else {
            return false;
        };

        match self.api.registration_link(role).await {
            Ok(link) => {
                tracing::info!("🔗 Link de cadastro gerado para {}", role);
                self.registration_link = Some(link.registration_link);
                self.notify(NoticeLevel::Success, Message::LinkCreated.text(self.locale).to_string());
                true
            }
            Err(e) => {
                let text = e.user_message(self.locale);
                self.report(&e, text);
                false
            }
        }
    }

    // Exibido uma vez; some quando o diálogo fecha
    pub fn registration_link(&self) -> Option<&str> {
        self.registration_link.as_deref()
    }

    pub fn dismiss_link_dialog(&mut self) {
        self.registration_link = None;
    }

    // --- NOTIFICAÇÕES ---

    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    // Algum 401 derrubou a sessão; a tela deve ir para o login
    pub fn needs_login(&self) -> bool {
        self.needs_login
    }

    fn notify(&mut self, level: NoticeLevel, text: String) {
        self.notifications.push(Notification { level, text });
    }

    fn report(&mut self, error: &AppError, text: String) {
        if error.is_unauthorized() {
            self.needs_login = true;
        }
        self.notify(NoticeLevel::Error, text);
    }

    fn report_validation(&mut self, errors: validator::ValidationErrors) {
        let error = AppError::from(errors);
        let text = error.user_message(self.locale);
        self.notify(NoticeLevel::Error, text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        auth::Role,
        inventory::{Kategori, KategoriPayload},
        users::{RegistrationLink, RetrieverAccount, RetrieverPayload, ToggleStatus},
    };
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    // Backend em memória. `build` cria o registro a partir do formulário.
    struct FakeApi<R: Resource> {
        records: Mutex<Vec<R>>,
        build: fn(String, &R::Payload) -> R,
        fail_list: AtomicBool,
        fail_mutations: AtomicBool,
        list_calls: AtomicUsize,
    }

    impl<R: Resource> FakeApi<R> {
        fn new(records: Vec<R>, build: fn(String, &R::Payload) -> R) -> Arc<Self> {
            Arc::new(Self {
                records: Mutex::new(records),
                build,
                fail_list: AtomicBool::new(false),
                fail_mutations: AtomicBool::new(false),
                list_calls: AtomicUsize::new(0),
            })
        }

        fn check_mutation(&self) -> Result<(), AppError> {
            if self.fail_mutations.load(Ordering::SeqCst) {
                return Err(AppError::Rejected {
                    status: 422,
                    message: Some("Nama sudah dipakai".into()),
                });
            }
            Ok(())
        }
    }

    #[async_trait]
    impl<R: Resource> ResourceApi<R> for FakeApi<R> {
        async fn list(&self) -> Result<Vec<R>, AppError> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_list.load(Ordering::SeqCst) {
                return Err(AppError::UnexpectedEnvelope("data: null".into()));
            }
            Ok(self.records.lock().clone())
        }

        async fn get(&self, id: &str) -> Result<R, AppError> {
            self.records
                .lock()
                .iter()
                .find(|r| r.id() == id)
                .cloned()
                .ok_or(AppError::Rejected { status: 404, message: None })
        }

        async fn create(&self, payload: &R::Payload) -> Result<R, AppError> {
            self.check_mutation()?;
            let mut records = self.records.lock();
            let record = (self.build)(format!("new-{}", records.len()), payload);
            records.push(record.clone());
            Ok(record)
        }

        async fn update(&self, id: &str, payload: &R::Payload) -> Result<R, AppError> {
            self.check_mutation()?;
            let mut records = self.records.lock();
            let slot = records
                .iter_mut()
                .find(|r| r.id() == id)
                .ok_or(AppError::Rejected { status: 404, message: None })?;
            *slot = (self.build)(id.to_string(), payload);
            Ok(slot.clone())
        }

        async fn delete(&self, id: &str) -> Result<(), AppError> {
            self.check_mutation()?;
            self.records.lock().retain(|r| r.id() != id);
            Ok(())
        }

        async fn toggle_status(&self, _id: &str) -> Result<ToggleStatus, AppError> {
            self.check_mutation()?;
            Ok(ToggleStatus::default())
        }

        async fn registration_link(&self, role: Role) -> Result<RegistrationLink, AppError> {
            Ok(RegistrationLink {
                message: None,
                registration_link: format!("https://app.test/register?role={role}"),
            })
        }
    }

    fn kategori(id: String, payload: &KategoriPayload) -> Kategori {
        Kategori { id_kategori: id, nama_kategori: payload.nama_kategori.clone(), created_at: None }
    }

    fn retriever(id: String, payload: &RetrieverPayload) -> RetrieverAccount {
        RetrieverAccount {
            id_retriever: id,
            id_user: None,
            nama_lengkap: payload.nama_lengkap.clone(),
            username: None,
            email: None,
            rusun: None,
            id_rusun: payload.id_rusun.clone(),
            kategori: payload.kategori.clone(),
            deskripsi: payload.deskripsi.clone(),
            is_active: true,
            created_at: None,
        }
    }

    // 45 retrievers, 23 ativos (índices pares), kategori alternando
    fn retrievers() -> Vec<RetrieverAccount> {
        (0..45)
            .map(|i| {
                let mut r = retriever(
                    i.to_string(),
                    &RetrieverPayload {
                        nama_lengkap: format!("Retriever {i:02}"),
                        kategori: Some(if i % 3 == 0 { "Kebersihan" } else { "Keamanan" }.into()),
                        ..Default::default()
                    },
                );
                r.username = Some(format!("user{i}"));
                r.is_active = i % 2 == 0;
                r
            })
            .collect()
    }

    async fn mounted<R: Resource>(api: Arc<FakeApi<R>>) -> ResourceListController<R> {
        let mut controller = ResourceListController::new(api, Locale::Id);
        controller.mount().await;
        controller
    }

    #[tokio::test]
    async fn status_filter_and_pagination() {
        let mut c = mounted(FakeApi::new(retrievers(), retriever)).await;
        assert!(c.set_filter("status", "active"));

        let page1 = c.view();
        assert_eq!(page1.total_pages, 2);
        assert_eq!(page1.items.len(), 20);
        assert_eq!(page1.items[0].id(), "0");
        assert_eq!(page1.range, PageRange { first: 1, last: 20, total: 23 });

        c.set_page(2);
        let page2 = c.view();
        assert_eq!(page2.items.len(), 3);
        assert_eq!(page2.items[0].id(), "40");
        assert_eq!(page2.range, PageRange { first: 21, last: 23, total: 23 });

        // Fora do intervalo é ajustado
        c.set_page(99);
        assert_eq!(c.view().page, 2);
    }

    #[tokio::test]
    async fn predicates_commute() {
        let c = mounted(FakeApi::new(retrievers(), retriever)).await;
        let status = Predicate::Status(StatusFilter::Inactive);
        let kategori = Predicate::Field { name: "kategori".into(), value: "Keamanan".into() };
        let search = Predicate::Search("RETRIEVER 1".into());

        let orders = [
            vec![&status, &kategori, &search],
            vec![&search, &status, &kategori],
            vec![&kategori, &search, &status],
        ];
        let results: Vec<Vec<&str>> = orders
            .iter()
            .map(|order| {
                c.collection()
                    .iter()
                    .filter(|r| order.iter().all(|p| p.accepts(*r)))
                    .map(|r| r.id())
                    .collect()
            })
            .collect();

        assert_eq!(results[0], vec!["11", "13", "17", "19"]);
        assert!(results.iter().all(|r| *r == results[0]));
    }

    #[tokio::test]
    async fn search_probes_username_too() {
        let mut c = mounted(FakeApi::new(retrievers(), retriever)).await;
        c.set_search("USER44");
        let view = c.view();
        assert_eq!(view.items.len(), 1);
        assert_eq!(view.items[0].id(), "44");
    }

    #[tokio::test]
    async fn filter_changes_reset_page() {
        let mut c = mounted(FakeApi::new(retrievers(), retriever)).await;
        c.set_page(3);
        assert_eq!(c.view().page, 3);

        c.set_search("");
        assert_eq!(c.view().page, 1);

        c.set_page(2);
        assert!(c.set_filter("kategori", "Kebersihan"));
        assert_eq!(c.view().page, 1);

        // Filtro que o recurso não conhece não mexe em nada
        c.set_page(1);
        assert!(!c.set_filter("rusun", "X"));
        assert!(!c.set_filter("status", "talvez"));
        assert_eq!(c.filters().status, StatusFilter::All);
    }

    #[tokio::test]
    async fn categorical_filter_is_exact_match() {
        let mut c = mounted(FakeApi::new(retrievers(), retriever)).await;

        assert!(c.set_filter("kategori", "Kebersihan"));
        assert_eq!(c.filtered().len(), 15);

        // Caixa ou espaços diferentes não casam com nada
        assert!(c.set_filter("kategori", "KEBERSIHAN"));
        assert!(c.filtered().is_empty());
        assert!(c.set_filter("kategori", " Kebersihan "));
        assert!(c.filtered().is_empty());
        assert_eq!(c.filters().fields["kategori"], " Kebersihan ");
    }

    #[tokio::test]
    async fn only_lowercase_all_disables_a_filter() {
        let mut c = mounted(FakeApi::new(retrievers(), retriever)).await;

        assert!(c.set_filter("kategori", "all"));
        assert!(c.set_filter("status", "all"));
        assert_eq!(c.filtered().len(), 45);

        // "ALL" é um valor de kategori como outro qualquer
        assert!(c.set_filter("kategori", "ALL"));
        assert!(c.filtered().is_empty());
        assert!(!c.set_filter("status", "ALL"));
        assert!(!c.set_filter("status", "semua"));
        assert_eq!(c.filters().status, StatusFilter::All);
    }

    #[tokio::test]
    async fn create_refetches_and_resets_form() {
        let api = FakeApi::new(Vec::new(), kategori);
        let mut c = mounted(api.clone()).await;
        assert_eq!(api.list_calls.load(Ordering::SeqCst), 1);

        assert!(c.open_create());
        c.form_mut().unwrap().nama_kategori = "Elektronik".into();
        assert!(c.submit().await);

        assert_eq!(api.list_calls.load(Ordering::SeqCst), 2);
        assert!(c.collection().iter().any(|k| k.nama_kategori == "Elektronik"));
        assert!(c.dialog().is_none());
        assert!(!c.is_stale());
        assert_eq!(c.status(), ListStatus::Ready);

        // Reabrir mostra o formulário vazio
        assert!(c.open_create());
        assert_eq!(c.dialog().unwrap().form.nama_kategori, "");

        let notes = c.drain_notifications();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].text, "Kategori berhasil ditambahkan");
        assert!(c.drain_notifications().is_empty());
    }

    #[tokio::test]
    async fn failed_mutation_keeps_dialog_and_collection() {
        let seed = vec![kategori("1".into(), &KategoriPayload { nama_kategori: "ATK".into() })];
        let api = FakeApi::new(seed, kategori);
        let mut c = mounted(api.clone()).await;
        api.fail_mutations.store(true, Ordering::SeqCst);

        assert!(c.open_edit("1"));
        assert_eq!(c.dialog().unwrap().form.nama_kategori, "ATK");
        c.form_mut().unwrap().nama_kategori = "Alat Tulis".into();
        assert!(!c.submit().await);

        assert_eq!(c.collection()[0].nama_kategori, "ATK");
        assert_eq!(c.dialog().unwrap().form.nama_kategori, "Alat Tulis");
        assert_eq!(c.status(), ListStatus::Ready);
        assert_eq!(api.list_calls.load(Ordering::SeqCst), 1);

        let notes = c.drain_notifications();
        assert_eq!(notes[0].level, NoticeLevel::Error);
        assert_eq!(notes[0].text, "Nama sudah dipakai");
    }

    #[tokio::test]
    async fn invalid_form_never_reaches_backend() {
        let api = FakeApi::new(Vec::new(), kategori);
        let mut c = mounted(api.clone()).await;
        assert!(c.open_create());
        assert!(!c.submit().await);
        assert!(c.dialog().is_some());
        assert!(api.records.lock().is_empty());
        assert_eq!(c.drain_notifications()[0].text, "Nama kategori wajib diisi");
    }

    #[tokio::test]
    async fn failed_fetch_yields_empty_collection() {
        let api = FakeApi::new(retrievers(), retriever);
        let mut c = mounted(api.clone()).await;
        assert_eq!(c.collection().len(), 45);

        api.fail_list.store(true, Ordering::SeqCst);
        c.fetch().await;

        let view = c.view();
        assert!(view.error);
        assert!(view.items.is_empty());
        assert_eq!(view.total_pages, 1);
        assert_eq!(c.status(), ListStatus::Error);
        assert_eq!(c.drain_notifications()[0].text, "Gagal memuat data retriever");
    }

    #[tokio::test]
    async fn account_delete_and_toggle_messages() {
        let mut c = mounted(FakeApi::new(retrievers(), retriever)).await;
        assert!(!c.open_create());

        assert!(c.toggle_active("3").await);
        assert!(c.delete("3").await);
        assert!(c.find("3").is_none());

        let texts: Vec<String> = c.drain_notifications().into_iter().map(|n| n.text).collect();
        assert_eq!(texts, vec!["Status diperbarui", "Akun retriever dinonaktifkan"]);
    }

    #[tokio::test]
    async fn registration_link_is_shown_once() {
        let mut c = mounted(FakeApi::new(retrievers(), retriever)).await;
        assert!(c.generate_registration_link().await);
        assert_eq!(c.registration_link(), Some("https://app.test/register?role=retriever"));

        c.dismiss_link_dialog();
        assert!(c.registration_link().is_none());

        // Kategori não gera convites
        let mut k = mounted(FakeApi::new(Vec::new(), kategori)).await;
        assert!(!k.generate_registration_link().await);
    }

    #[tokio::test]
    async fn detail_and_filter_options() {
        let mut c = mounted(FakeApi::new(retrievers(), retriever)).await;
        assert_eq!(c.detail("7").await.unwrap().nama_lengkap, "Retriever 07");
        assert!(c.detail("nope").await.is_none());
        assert_eq!(c.filter_options("kategori"), vec!["Keamanan", "Kebersihan"]);
    }
}
