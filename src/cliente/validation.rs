use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use validator::ValidateEmail;

use super::model::{CambiosCliente, Campo, Cliente, EstadoCliente, NuevoCliente};
use crate::error::{ClienteError, Result};

static NOMBRE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\p{L}\s]+$").unwrap());
static TELEFONO_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+34-[0-9]{3}-[0-9]{3}-[0-9]{3}$").unwrap());

const ESTADO_INVALIDO: &str = "El estado del cliente debe ser uno de los valores predefinidos.";

fn mensaje_obligatorio(campo: Campo) -> &'static str {
    match campo {
        Campo::Nombre => "El nombre es obligatorio.",
        Campo::Correo => "El correo electrónico es obligatorio.",
        Campo::Telefono => "El teléfono es obligatorio.",
        Campo::Empresa => "La empresa es obligatoria.",
        Campo::Pais => "El país es obligatorio.",
        Campo::FechaContacto => "La fecha de contacto es obligatoria.",
        Campo::EstadoCliente => "El estado del cliente es obligatorio.",
    }
}

fn obligatorio(campo: Campo) -> ClienteError {
    ClienteError::validation(campo.clave(), mensaje_obligatorio(campo))
}

fn en_blanco(valor: &str) -> bool {
    valor.trim().is_empty()
}

/// A create payload that passed every field rule
#[derive(Debug, Clone, PartialEq)]
pub struct ClienteValidado {
    pub nombre: String,
    pub correo: String,
    pub telefono: String,
    pub empresa: String,
    pub pais: String,
    pub fecha_contacto: String,
    pub estado_cliente: EstadoCliente,
}

impl ClienteValidado {
    pub fn into_cliente(self, id: String) -> Cliente {
        Cliente {
            id,
            nombre: self.nombre,
            correo: self.correo,
            telefono: self.telefono,
            empresa: self.empresa,
            pais: self.pais,
            fecha_contacto: self.fecha_contacto,
            estado_cliente: self.estado_cliente,
        }
    }
}

fn requerido(input: &NuevoCliente, campo: Campo, now: DateTime<Utc>) -> Result<String> {
    let valor = input.valor(campo).ok_or_else(|| obligatorio(campo))?;
    validar_campo(campo, valor, now)?;
    Ok(valor.to_string())
}

/// Validate a create payload, stopping at the first failing field
pub fn validar_nuevo(input: &NuevoCliente, now: DateTime<Utc>) -> Result<ClienteValidado> {
    let nombre = requerido(input, Campo::Nombre, now)?;
    let correo = requerido(input, Campo::Correo, now)?;
    let telefono = requerido(input, Campo::Telefono, now)?;
    let empresa = match input.valor(Campo::Empresa) {
        Some(valor) => {
            validar_campo(Campo::Empresa, valor, now)?;
            valor.to_string()
        }
        None => String::new(),
    };
    let pais = requerido(input, Campo::Pais, now)?;
    let fecha_contacto = requerido(input, Campo::FechaContacto, now)?;

    let estado = input
        .valor(Campo::EstadoCliente)
        .filter(|v| !en_blanco(v))
        .ok_or_else(|| obligatorio(Campo::EstadoCliente))?;
    let estado_cliente = EstadoCliente::parse(estado).ok_or_else(|| {
        ClienteError::validation(Campo::EstadoCliente.clave(), ESTADO_INVALIDO)
    })?;

    Ok(ClienteValidado {
        nombre,
        correo,
        telefono,
        empresa,
        pais,
        fecha_contacto,
        estado_cliente,
    })
}

/// Validate only the fields an update actually changes.
///
/// Empty strings are skipped, matching the merge, which keeps the stored
/// value for them. Whitespace-only values are validated and rejected.
pub fn validar_cambios(cambios: &CambiosCliente, now: DateTime<Utc>) -> Result<()> {
    for campo in Campo::ALL {
        if let Some(valor) = cambios.get(campo) {
            if campo.obligatorio() && valor.is_empty() {
                continue;
            }
            validar_campo(campo, valor, now)?;
        }
    }
    Ok(())
}

/// `validate_email` accepts empty dot-separated segments in the local part
fn correo_valido(valor: &str) -> bool {
    let local_ok = valor
        .rsplit_once('@')
        .is_some_and(|(local, _)| local.split('.').all(|parte| !parte.is_empty()));
    local_ok && valor.validate_email()
}

/// Rule for a single field value. Blank required fields are rejected.
pub fn validar_campo(campo: Campo, valor: &str, now: DateTime<Utc>) -> Result<()> {
    if campo.obligatorio() && en_blanco(valor) {
        return Err(obligatorio(campo));
    }

    let falla = |mensaje: &str| Err(ClienteError::validation(campo.clave(), mensaje));

    match campo {
        Campo::Nombre => {
            let largo = valor.chars().count();
            if largo < 3 {
                return falla("El nombre debe tener al menos 3 caracteres.");
            }
            if largo > 100 {
                return falla("El nombre no debe exceder los 100 caracteres.");
            }
            if !NOMBRE_RE.is_match(valor) {
                return falla("El nombre debe contener solo letras y espacios.");
            }
        }
        Campo::Correo => {
            if !correo_valido(valor) {
                return falla("Debe ser un correo electrónico válido.");
            }
        }
        Campo::Telefono => {
            if !TELEFONO_RE.is_match(valor) {
                return falla("El teléfono debe tener el formato +34-XXX-XXX-XXX.");
            }
        }
        Campo::Empresa => {
            if valor.chars().count() > 100 {
                return falla("La empresa no debe exceder los 100 caracteres.");
            }
        }
        Campo::Pais => {
            let largo = valor.chars().count();
            if !(2..=56).contains(&largo) {
                return falla("Debe ser un país válido.");
            }
        }
        Campo::FechaContacto => match parse_fecha(valor) {
            None => return falla("Debe ser una fecha válida."),
            Some(fecha) if fecha > now => {
                return falla("La fecha de contacto no puede ser futura.")
            }
            Some(_) => {}
        },
        Campo::EstadoCliente => {
            if EstadoCliente::parse(valor).is_none() {
                return falla(ESTADO_INVALIDO);
            }
        }
    }
    Ok(())
}

/// Parse an ISO-8601 date (`2023-08-15`, midnight UTC) or date-time.
/// Date-times without an offset are read as UTC.
pub fn parse_fecha(valor: &str) -> Option<DateTime<Utc>> {
    let valor = valor.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(valor) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(valor, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(valor, fmt).ok())
        .map(|dt| dt.and_utc())
}

/// True for a bare `YYYY-MM-DD` value
pub fn es_solo_fecha(valor: &str) -> bool {
    NaiveDate::parse_from_str(valor.trim(), "%Y-%m-%d").is_ok()
}
