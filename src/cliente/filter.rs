use chrono::{DateTime, NaiveTime, Utc};

use super::model::{Cliente, EstadoCliente};
use super::validation::{es_solo_fecha, parse_fecha};
use crate::error::{ClienteError, Result};

/// Conjunctive filters for listing. Empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListFilter {
    pub estado: Option<EstadoCliente>,
    /// Case-insensitive substring of `empresa`
    pub empresa: Option<String>,
    /// Inclusive lower bound on `fechaContacto`
    pub desde: Option<DateTime<Utc>>,
    /// Inclusive upper bound; a bare date covers that whole day
    pub hasta: Option<DateTime<Utc>>,
}

impl ListFilter {
    /// Build from query-string pairs (`estadoCliente`, `empresa`,
    /// `fechaInicio`, `fechaFin`). Empty values and unknown keys are ignored.
    pub fn from_query<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut filter = ListFilter::default();
        for (clave, valor) in pairs {
            let valor = valor.as_ref().trim();
            if valor.is_empty() {
                continue;
            }
            match clave.as_ref() {
                "estadoCliente" => filter = filter.with_estado(valor)?,
                "empresa" => filter.empresa = Some(valor.to_string()),
                "fechaInicio" => filter = filter.with_desde(valor)?,
                "fechaFin" => filter = filter.with_hasta(valor)?,
                _ => {}
            }
        }
        Ok(filter)
    }

    pub fn with_estado(mut self, valor: &str) -> Result<Self> {
        let estado = EstadoCliente::parse(valor)
            .ok_or_else(|| ClienteError::InvalidFilter("Estado de cliente inválido.".into()))?;
        self.estado = Some(estado);
        Ok(self)
    }

    pub fn with_desde(mut self, valor: &str) -> Result<Self> {
        let desde = parse_fecha(valor)
            .ok_or_else(|| ClienteError::InvalidFilter("Fecha de inicio inválida.".into()))?;
        self.desde = Some(desde);
        Ok(self)
    }

    pub fn with_hasta(mut self, valor: &str) -> Result<Self> {
        let mut hasta = parse_fecha(valor)
            .ok_or_else(|| ClienteError::InvalidFilter("Fecha de fin inválida.".into()))?;
        if es_solo_fecha(valor) {
            if let Some(fin_del_dia) = NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999) {
                hasta = hasta.date_naive().and_time(fin_del_dia).and_utc();
            }
        }
        self.hasta = Some(hasta);
        Ok(self)
    }

    pub fn matches(&self, cliente: &Cliente) -> bool {
        if let Some(estado) = self.estado {
            if cliente.estado_cliente != estado {
                return false;
            }
        }

        if let Some(ref empresa) = self.empresa {
            if !cliente
                .empresa
                .to_lowercase()
                .contains(&empresa.to_lowercase())
            {
                return false;
            }
        }

        if self.desde.is_some() || self.hasta.is_some() {
            // Records with an unreadable date never fall inside a range
            let Some(fecha) = parse_fecha(&cliente.fecha_contacto) else {
                return false;
            };
            if self.desde.map_or(false, |d| fecha < d) {
                return false;
            }
            if self.hasta.map_or(false, |h| fecha > h) {
                return false;
            }
        }

        true
    }

    /// Keep matching records in their stored order
    pub fn apply(&self, clientes: Vec<Cliente>) -> Vec<Cliente> {
        clientes.into_iter().filter(|c| self.matches(c)).collect()
    }
}
