// src/common/error.rs

use thiserror::Error;

// Nosso tipo de erro único, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Data inválida: {0}")]
    FechaInvalida(String),

    #[error("Cliente {0} não encontrado")]
    ClienteNotFound(i64),

    #[error("Instalação {0} não encontrada")]
    InstalacionNotFound(i64),

    #[error("Instalação {0} não tem frequência de manutenção definida")]
    FrecuenciaNoDefinida(i64),

    #[error("Usuário sem empresa associada")]
    EmpresaNoDefinida,

    // Um segundo "resolver" no mesmo item enquanto o primeiro ainda voa.
    #[error("Já existe uma resolução em andamento para este item")]
    ResolucionEnCurso,

    // Falha de transporte (rede, TLS, timeout) falando com a API
    #[error("Falha de comunicação com a API")]
    RemoteError(#[from] reqwest::Error),

    // A API respondeu, mas recusou a operação
    #[error("API recusou a operação ({status}): {message}")]
    ApiRejection { status: u16, message: String },

    #[error("Payload JSON inesperado")]
    JsonError(#[from] serde_json::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno")]
    InternalServerError(#[from] anyhow::Error),
}
