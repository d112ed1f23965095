// src/models/resource.rs

use serde::{de::DeserializeOwned, Serialize};
use validator::Validate;

use crate::models::auth::Role;

// Quais intenções de mutação a tela de um recurso expõe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mutations {
    pub create: bool,
    pub update: bool,
    pub delete: bool,
    pub toggle: bool,
}

impl Mutations {
    pub const CRUD: Mutations = Mutations { create: true, update: true, delete: true, toggle: false };
    pub const ACCOUNT: Mutations = Mutations { create: false, update: true, delete: true, toggle: true };
}

/// Um tipo de entidade gerenciado pelo backend via endpoints REST uniformes
/// (`GET/POST /{path}`, `GET/PUT/DELETE /{path}/{id}`, `PATCH /{path}/{id}/toggle-status`).
///
/// A controller genérica de listagem só conhece o recurso pelos acessores abaixo.
pub trait Resource: DeserializeOwned + Clone + Send + Sync + 'static {
    /// Corpo enviado no create/update; `Default` é o formulário vazio.
    type Payload: Serialize + Validate + Default + Clone + Send + Sync + 'static;

    const PATH: &'static str;
    const LABEL: &'static str;
    const MUTATIONS: Mutations;

    /// Filtros categóricos aceitos por `field` (além de "status").
    const FILTERS: &'static [&'static str] = &[];

    /// Papel usado no `POST /registration-links`, quando a tela gera convites.
    const REGISTRATION_ROLE: Option<Role> = None;

    fn id(&self) -> &str;

    fn name(&self) -> &str;

    /// Campos comparados pela busca textual (OR entre eles).
    fn search_keys(&self) -> Vec<&str> {
        vec![self.name()]
    }

    fn is_active(&self) -> Option<bool> {
        None
    }

    fn field(&self, _filter: &str) -> Option<&str> {
        None
    }

    /// Pré-preenche o formulário de edição.
    fn to_payload(&self) -> Self::Payload;
}
