// src/db/client.rs

use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE},
    Method,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

use crate::{
    common::error::AppError,
    middleware::i18n::Locale,
    services::session::SessionStore,
};

// Chamadas autenticadas levam o Bearer e limpam a sessão em qualquer 401.
// Chamadas anônimas (o próprio /login) não mexem na sessão.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Auth {
    Bearer,
    Anonymous,
}

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<SessionStore>,
}

impl ApiClient {
    // Sem timeout de propósito: requisição pendurada deixa a tela em "loading"
    pub fn new(base_url: &str, locale: Locale, session: Arc<SessionStore>) -> Result<Self, AppError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(locale.tag()));

        let http = reqwest::Client::builder().default_headers(headers).build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }

    /// Envia a requisição e devolve o corpo JSON (ou `Value::Null` se vazio).
    ///
    /// Qualquer status fora de 2xx vira erro. O campo `message` do corpo,
    /// se existir, é guardado para ser mostrado ao usuário.
    pub async fn send(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<Value>,
        auth: Auth,
    ) -> Result<Value, AppError> {
        let url = self.url(endpoint);
        let mut request = self.http.request(method.clone(), &url);

        if auth == Auth::Bearer {
            if let Some(token) = self.session.token() {
                request = request.bearer_auth(token);
            }
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        tracing::debug!(%method, endpoint, status = status.as_u16(), "resposta do backend");

        if !status.is_success() {
            // Corpo de erro ilegível não impede de reportar o status
            let message = serde_json::from_str::<Value>(&text)
                .ok()
                .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string));

            if status.as_u16() == 401 && auth == Auth::Bearer {
                tracing::warn!("⚠️ 401 em {} {}: encerrando a sessão local", method, endpoint);
                if let Err(e) = self.session.clear_auth() {
                    tracing::error!("🔥 Falha ao limpar a sessão após 401: {}", e);
                }
                return Err(AppError::Unauthorized { message });
            }

            return Err(AppError::Rejected { status: status.as_u16(), message });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }

    pub async fn get(&self, endpoint: &str) -> Result<Value, AppError> {
        self.send(Method::GET, endpoint, None, Auth::Bearer).await
    }

    pub async fn post(&self, endpoint: &str, body: Option<Value>) -> Result<Value, AppError> {
        self.send(Method::POST, endpoint, body, Auth::Bearer).await
    }

    pub async fn put(&self, endpoint: &str, body: Value) -> Result<Value, AppError> {
        self.send(Method::PUT, endpoint, Some(body), Auth::Bearer).await
    }

    pub async fn patch(&self, endpoint: &str) -> Result<Value, AppError> {
        self.send(Method::PATCH, endpoint, None, Auth::Bearer).await
    }

    pub async fn delete(&self, endpoint: &str) -> Result<Value, AppError> {
        self.send(Method::DELETE, endpoint, None, Auth::Bearer).await
    }
}

// Aceita `[...]` ou `{ "data": [...] }`. Qualquer outra forma é erro.
pub fn unwrap_list(body: Value) -> Result<Vec<Value>, AppError> {
    match body {
        Value::Array(items) => Ok(items),
        Value::Object(mut obj) => match obj.remove("data") {
            Some(Value::Array(items)) => Ok(items),
            Some(other) => Err(AppError::UnexpectedEnvelope(format!(
                "campo 'data' não é uma lista: {other}"
            ))),
            None => Err(AppError::UnexpectedEnvelope("objeto sem campo 'data'".into())),
        },
        other => Err(AppError::UnexpectedEnvelope(format!("esperava uma lista, veio {other}"))),
    }
}

// `data ?? corpo`
pub fn unwrap_item(body: Value) -> Value {
    match body {
        Value::Object(mut obj) if obj.get("data").is_some_and(|d| !d.is_null()) => {
            obj.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

pub fn decode_list<T: DeserializeOwned>(body: Value) -> Result<Vec<T>, AppError> {
    let items = unwrap_list(body)?;
    Ok(serde_json::from_value(Value::Array(items))?)
}

pub fn decode_item<T: DeserializeOwned>(body: Value) -> Result<T, AppError> {
    Ok(serde_json::from_value(unwrap_item(body))?)
}
