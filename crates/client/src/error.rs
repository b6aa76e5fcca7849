use thiserror::Error;

/// Every variant renders as the message shown to the user.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Erro de conexão com o servidor.")]
    Network(#[from] reqwest::Error),

    #[error("{message}")]
    Http { status: u16, message: String },

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Domain(String),

    #[error("Resposta inválida do servidor: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Falha ao acessar o armazenamento local: {0}")]
    Storage(#[from] std::io::Error),
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
