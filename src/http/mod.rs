//! HTTP surface for `/clientes`.
//!
//! [`handle`] maps a method, URL and body to an [`ApiResponse`] without any
//! I/O, so routes can be tested directly. [`Server`] feeds it from a socket.

mod server;

pub use server::{serve, Server};

use serde_json::{json, Value};
use url::Url;

use crate::cliente::{CambiosCliente, ClienteService, ListFilter, NuevoCliente};
use crate::error::ClienteError;
use crate::store::ClienteStore;

/// Status code plus JSON body
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    pub fn mensaje(status: u16, mensaje: &str) -> Self {
        Self::new(status, json!({ "mensaje": mensaje }))
    }
}

impl From<ClienteError> for ApiResponse {
    fn from(err: ClienteError) -> Self {
        let status = err.status_code();
        match err {
            ClienteError::Validation { campo, mensaje } => {
                Self::new(status, json!({ "mensaje": mensaje, "campo": campo }))
            }
            err if status >= 500 => {
                log::error!("Request failed: {err}");
                Self::mensaje(status, "Error interno del servidor.")
            }
            err => Self::mensaje(status, &err.to_string()),
        }
    }
}

/// Route one request
pub fn handle<S: ClienteStore>(
    service: &ClienteService<S>,
    method: &str,
    url: &str,
    body: &str,
) -> ApiResponse {
    let parsed = match Url::parse("http://localhost/").and_then(|base| base.join(url)) {
        Ok(parsed) => parsed,
        Err(_) => return ApiResponse::mensaje(400, "URL inválida."),
    };

    let segments: Vec<&str> = parsed
        .path_segments()
        .map(|s| s.filter(|seg| !seg.is_empty()).collect())
        .unwrap_or_default();

    let result = match (method, segments.as_slice()) {
        ("POST", ["clientes"]) => crear(service, body),
        ("GET", ["clientes"]) => listar(service, &parsed),
        ("GET", ["clientes", id]) => service
            .get_by_id(id)
            .map(|cliente| ApiResponse::new(200, json!(cliente))),
        ("PUT", ["clientes", id]) => actualizar(service, id, body),
        ("DELETE", ["clientes", id]) => service
            .delete(id)
            .map(|()| ApiResponse::mensaje(200, "Cliente eliminado exitosamente.")),
        (_, ["clientes"]) | (_, ["clientes", _]) => {
            Ok(ApiResponse::mensaje(405, "Método no permitido."))
        }
        _ => Ok(ApiResponse::mensaje(404, "Ruta no encontrada.")),
    };

    result.unwrap_or_else(ApiResponse::from)
}

fn parse_body(body: &str) -> crate::Result<Value> {
    if body.trim().is_empty() {
        return Ok(json!({}));
    }
    serde_json::from_str(body).map_err(|e| ClienteError::InvalidBody(e.to_string()))
}

fn crear<S: ClienteStore>(service: &ClienteService<S>, body: &str) -> crate::Result<ApiResponse> {
    let input: NuevoCliente = serde_json::from_value(parse_body(body)?)
        .map_err(|e| ClienteError::InvalidBody(e.to_string()))?;
    let cliente = service.create(input)?;
    Ok(ApiResponse::new(
        201,
        json!({ "mensaje": "Cliente creado exitosamente.", "cliente": cliente }),
    ))
}

fn listar<S: ClienteStore>(service: &ClienteService<S>, url: &Url) -> crate::Result<ApiResponse> {
    let filter = ListFilter::from_query(url.query_pairs())?;
    let clientes = service.list(&filter)?;
    Ok(ApiResponse::new(200, json!(clientes)))
}

fn actualizar<S: ClienteStore>(
    service: &ClienteService<S>,
    id: &str,
    body: &str,
) -> crate::Result<ApiResponse> {
    let cambios = match parse_body(body)? {
        Value::Object(objeto) => CambiosCliente::from_json(&objeto)?,
        _ => {
            return Err(ClienteError::InvalidBody(
                "se esperaba un objeto JSON".to_string(),
            ))
        }
    };
    let cliente = service.update(id, cambios)?;
    Ok(ApiResponse::new(
        200,
        json!({ "mensaje": "Cliente actualizado exitosamente.", "cliente": cliente }),
    ))
}
