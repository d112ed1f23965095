// src/common/error.rs

use thiserror::Error;

use crate::middleware::i18n::{Locale, Message};

// Taxonomia de erros do cliente. Tudo que sai da camada de acesso a dados
// passa por aqui antes de virar texto para o usuário.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // Rede inacessível, conexão recusada, etc.
    #[error("Falha de transporte: {0}")]
    Transport(#[from] reqwest::Error),

    // Corpo não-JSON ou JSON que não bate com o modelo
    #[error("Resposta ilegível: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Envelope de resposta inesperado: {0}")]
    UnexpectedEnvelope(String),

    #[error("Requisição rejeitada pelo backend (HTTP {status})")]
    Rejected { status: u16, message: Option<String> },

    // Sempre HTTP 401 numa chamada autenticada
    #[error("Sessão expirada ou inválida")]
    Unauthorized { message: Option<String> },

    #[error("Nenhuma sessão ativa")]
    NotAuthenticated,

    #[error("Operação não suportada por este recurso: {0}")]
    Unsupported(&'static str),

    #[error("Erro no armazenamento da sessão: {0}")]
    Storage(#[from] std::io::Error),
}

impl AppError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, AppError::Unauthorized { .. } | AppError::NotAuthenticated)
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Rejected { status, .. } => Some(*status),
            AppError::Unauthorized { .. } => Some(401),
            _ => None,
        }
    }

    // Texto exibido ao usuário. A mensagem do backend tem prioridade;
    // sem ela, cai no texto genérico do idioma atual.
    pub fn user_message(&self, locale: Locale) -> String {
        match self {
            AppError::ValidationError(errors) => first_validation_message(errors)
                .unwrap_or_else(|| Message::InvalidInput.text(locale).to_string()),
            AppError::Transport(_) | AppError::Decode(_) | AppError::UnexpectedEnvelope(_) => {
                Message::NetworkError.text(locale).to_string()
            }
            AppError::Rejected { message, .. } => message
                .clone()
                .unwrap_or_else(|| Message::RequestFailed.text(locale).to_string()),
            AppError::Unauthorized { message } => message
                .clone()
                .unwrap_or_else(|| Message::SessionExpired.text(locale).to_string()),
            AppError::NotAuthenticated => Message::SessionExpired.text(locale).to_string(),
            AppError::Unsupported(_) => Message::RequestFailed.text(locale).to_string(),
            AppError::Storage(_) => Message::StorageError.text(locale).to_string(),
        }
    }
}

// Pega a primeira mensagem de campo, em ordem alfabética para ser estável.
fn first_validation_message(errors: &validator::ValidationErrors) -> Option<String> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));
    fields
        .into_iter()
        .flat_map(|(_, errs)| errs.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Form {
        #[validate(length(min = 1, message = "Nama wajib diisi"))]
        nama: String,
    }

    #[test]
    fn backend_message_wins_over_fallback() {
        let err = AppError::Rejected {
            status: 422,
            message: Some("Nama kategori sudah dipakai".into()),
        };
        assert_eq!(err.user_message(Locale::Id), "Nama kategori sudah dipakai");
        assert_eq!(err.status(), Some(422));
    }

    #[test]
    fn rejected_without_message_uses_localized_fallback() {
        let err = AppError::Rejected { status: 500, message: None };
        assert_eq!(err.user_message(Locale::Id), Message::RequestFailed.text(Locale::Id));
        assert_eq!(err.user_message(Locale::En), Message::RequestFailed.text(Locale::En));
    }

    #[test]
    fn validation_error_surfaces_field_message() {
        let err: AppError = Form { nama: String::new() }.validate().unwrap_err().into();
        assert_eq!(err.user_message(Locale::Id), "Nama wajib diisi");
    }

    #[test]
    fn unauthorized_is_flagged() {
        assert!(AppError::Unauthorized { message: None }.is_unauthorized());
        assert!(AppError::NotAuthenticated.is_unauthorized());
        assert!(!AppError::Rejected { status: 403, message: None }.is_unauthorized());
    }
}
