pub mod cliente;
pub mod config;
pub mod error;
pub mod http;
pub mod store;

pub use cliente::{CambiosCliente, Campo, Cliente, ClienteService, EstadoCliente, ListFilter, NuevoCliente};
pub use config::{Config, ServerSettings, StorageSettings};
pub use error::{ClienteError, Result};
pub use store::{ClienteStore, JsonFileStore, MemoryStore};
