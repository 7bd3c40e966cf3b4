use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{ClienteError, Result};

/// A persisted customer record
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Cliente {
    pub id: String,
    pub nombre: String,
    pub correo: String,
    pub telefono: String,
    #[serde(default)]
    pub empresa: String,
    pub pais: String,
    /// ISO-8601 date or date-time, stored exactly as received
    pub fecha_contacto: String,
    pub estado_cliente: EstadoCliente,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum EstadoCliente {
    #[serde(rename = "Nuevo")]
    Nuevo,
    #[serde(rename = "En negociación")]
    EnNegociacion,
    #[serde(rename = "Ganado")]
    Ganado,
    #[serde(rename = "Perdido")]
    Perdido,
}

impl EstadoCliente {
    pub const ALL: [EstadoCliente; 4] = [
        EstadoCliente::Nuevo,
        EstadoCliente::EnNegociacion,
        EstadoCliente::Ganado,
        EstadoCliente::Perdido,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EstadoCliente::Nuevo => "Nuevo",
            EstadoCliente::EnNegociacion => "En negociación",
            EstadoCliente::Ganado => "Ganado",
            EstadoCliente::Perdido => "Perdido",
        }
    }

    /// Exact, case-sensitive match against the four allowed labels
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.as_str() == value)
    }
}

impl fmt::Display for EstadoCliente {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Writable fields of a record, in validation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Campo {
    Nombre,
    Correo,
    Telefono,
    Empresa,
    Pais,
    FechaContacto,
    EstadoCliente,
}

impl Campo {
    pub const ALL: [Campo; 7] = [
        Campo::Nombre,
        Campo::Correo,
        Campo::Telefono,
        Campo::Empresa,
        Campo::Pais,
        Campo::FechaContacto,
        Campo::EstadoCliente,
    ];

    /// JSON key of the field
    pub fn clave(&self) -> &'static str {
        match self {
            Campo::Nombre => "nombre",
            Campo::Correo => "correo",
            Campo::Telefono => "telefono",
            Campo::Empresa => "empresa",
            Campo::Pais => "pais",
            Campo::FechaContacto => "fechaContacto",
            Campo::EstadoCliente => "estadoCliente",
        }
    }

    pub fn from_clave(clave: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.clave() == clave)
    }

    pub fn obligatorio(&self) -> bool {
        !matches!(self, Campo::Empresa)
    }

    pub fn escribir(&self, cliente: &mut Cliente, valor: String) -> Result<()> {
        match self {
            Campo::Nombre => cliente.nombre = valor,
            Campo::Correo => cliente.correo = valor,
            Campo::Telefono => cliente.telefono = valor,
            Campo::Empresa => cliente.empresa = valor,
            Campo::Pais => cliente.pais = valor,
            Campo::FechaContacto => cliente.fecha_contacto = valor,
            Campo::EstadoCliente => {
                cliente.estado_cliente = EstadoCliente::parse(&valor).ok_or_else(|| {
                    ClienteError::validation(
                        "estadoCliente",
                        "El estado del cliente debe ser uno de los valores predefinidos.",
                    )
                })?
            }
        }
        Ok(())
    }
}

/// Create payload. Every field is optional here so validation can report
/// the first missing one.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct NuevoCliente {
    pub nombre: Option<String>,
    pub correo: Option<String>,
    pub telefono: Option<String>,
    pub empresa: Option<String>,
    pub pais: Option<String>,
    pub fecha_contacto: Option<String>,
    pub estado_cliente: Option<String>,
}

impl NuevoCliente {
    pub fn valor(&self, campo: Campo) -> Option<&str> {
        let valor = match campo {
            Campo::Nombre => &self.nombre,
            Campo::Correo => &self.correo,
            Campo::Telefono => &self.telefono,
            Campo::Empresa => &self.empresa,
            Campo::Pais => &self.pais,
            Campo::FechaContacto => &self.fecha_contacto,
            Campo::EstadoCliente => &self.estado_cliente,
        };
        valor.as_deref()
    }
}

/// Partial update payload: the fields the caller actually sent.
///
/// Keys absent from the map were not sent. JSON `null` counts as not sent,
/// unknown keys (including `id`) are ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CambiosCliente {
    valores: BTreeMap<Campo, String>,
}

impl CambiosCliente {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, campo: Campo, valor: impl Into<String>) -> Self {
        self.valores.insert(campo, valor.into());
        self
    }

    pub fn get(&self, campo: Campo) -> Option<&str> {
        self.valores.get(&campo).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.valores.is_empty()
    }

    /// Build from a decoded JSON object, rejecting non-string field values
    pub fn from_json(objeto: &serde_json::Map<String, serde_json::Value>) -> Result<Self> {
        let mut cambios = Self::new();
        for (clave, valor) in objeto {
            let Some(campo) = Campo::from_clave(clave) else {
                continue;
            };
            match valor {
                serde_json::Value::Null => {}
                serde_json::Value::String(s) => {
                    cambios.valores.insert(campo, s.clone());
                }
                other => {
                    return Err(ClienteError::InvalidBody(format!(
                        "el campo '{clave}' debe ser texto, se recibió {other}"
                    )))
                }
            }
        }
        Ok(cambios)
    }
}
