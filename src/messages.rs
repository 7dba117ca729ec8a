//! User-facing messages
//!
//! Error texts shown on screen, in the app's language.

use workout_core::{AuthError, SyncError, ValidationError};

pub fn auth_message(err: &AuthError) -> String {
    match err {
        AuthError::Validation(ValidationError::MissingField("email")) => "Informe o e-mail".to_string(),
        AuthError::Validation(ValidationError::MissingField("password")) => "Informe a senha".to_string(),
        AuthError::Validation(other) => other.to_string(),
        AuthError::PasswordMismatch => "As senhas não coincidem".to_string(),
        AuthError::InvalidCredentials => "E-mail ou senha inválidos".to_string(),
        AuthError::EmailInUse => "Este e-mail já está cadastrado".to_string(),
        AuthError::WeakPassword { min } => format!("A senha precisa ter pelo menos {} caracteres", min),
        AuthError::InvalidEmail => "E-mail inválido".to_string(),
        AuthError::Provider(message) if message.is_empty() => "Erro ao fazer login".to_string(),
        AuthError::Provider(message) => message.clone(),
    }
}

pub fn sync_message(err: &SyncError) -> String {
    match err {
        SyncError::Validation(ValidationError::EmptyText) => "Digite uma tarefa antes de adicionar".to_string(),
        SyncError::Validation(ValidationError::MissingOwner) => "Faça login para salvar".to_string(),
        SyncError::Validation(other) => other.to_string(),
        SyncError::RemoteWrite(remote) => format!("Não foi possível salvar: {}", remote),
        SyncError::UnknownItem(_) => "Item não encontrado na lista".to_string(),
    }
}
