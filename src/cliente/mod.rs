mod filter;
mod merge;
mod model;
mod service;
mod validation;

pub use filter::ListFilter;
pub use merge::{aplicar, politica, Politica, POLITICAS};
pub use model::{CambiosCliente, Campo, Cliente, EstadoCliente, NuevoCliente};
pub use service::ClienteService;
pub use validation::{
    parse_fecha, validar_cambios, validar_campo, validar_nuevo, ClienteValidado,
};
