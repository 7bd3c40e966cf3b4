use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClienteError {
    #[error("Config directory not found at {0}. Run 'clientes init' to create it.")]
    ConfigNotFound(PathBuf),

    #[error("Config file not found: {0}")]
    ConfigFileNotFound(PathBuf),

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config directory already exists at {0}")]
    AlreadyInitialized(PathBuf),

    /// First failing field of a create/update payload
    #[error("{mensaje}")]
    Validation { campo: &'static str, mensaje: String },

    #[error("El correo electrónico ya está registrado.")]
    DuplicateEmail(String),

    #[error("El correo electrónico ya está registrado por otro cliente.")]
    DuplicateEmailOtherClient(String),

    #[error("Cliente no encontrado.")]
    NotFound(String),

    #[error("{0}")]
    InvalidFilter(String),

    #[error("Cuerpo de la petición inválido: {0}")]
    InvalidBody(String),

    #[error("Failed to access data file {path}: {source}")]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse data file {path}: {source}")]
    DataParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to start server: {0}")]
    Server(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClienteError {
    pub(crate) fn validation(campo: &'static str, mensaje: &str) -> Self {
        ClienteError::Validation {
            campo,
            mensaje: mensaje.to_string(),
        }
    }

    /// HTTP status code the error is reported with
    pub fn status_code(&self) -> u16 {
        match self {
            ClienteError::Validation { .. }
            | ClienteError::DuplicateEmail(_)
            | ClienteError::DuplicateEmailOtherClient(_)
            | ClienteError::InvalidFilter(_)
            | ClienteError::InvalidBody(_) => 400,
            ClienteError::NotFound(_) => 404,
            _ => 500,
        }
    }
}

pub type Result<T> = std::result::Result<T, ClienteError>;
