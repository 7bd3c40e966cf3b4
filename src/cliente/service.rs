use chrono::Utc;
use uuid::Uuid;

use super::filter::ListFilter;
use super::merge::{aplicar, valor_efectivo};
use super::model::{CambiosCliente, Campo, Cliente, NuevoCliente};
use super::validation::{validar_cambios, validar_nuevo};
use crate::error::{ClienteError, Result};
use crate::store::ClienteStore;

/// Customer operations over a whole-list store.
///
/// Each call is one load, an in-memory change, and (for writes) one save.
pub struct ClienteService<S> {
    store: S,
}

impl<S: ClienteStore> ClienteService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Validate, enforce unique email, assign an id and append
    pub fn create(&self, input: NuevoCliente) -> Result<Cliente> {
        let validado = validar_nuevo(&input, Utc::now())?;

        let mut clientes = self.store.load()?;

        if clientes.iter().any(|c| c.correo == validado.correo) {
            return Err(ClienteError::DuplicateEmail(validado.correo));
        }

        let cliente = validado.into_cliente(Uuid::new_v4().to_string());
        clientes.push(cliente.clone());
        self.store.save(&clientes)?;

        log::info!("Created cliente {} <{}>", cliente.id, cliente.correo);
        Ok(cliente)
    }

    pub fn get_by_id(&self, id: &str) -> Result<Cliente> {
        self.store
            .load()?
            .into_iter()
            .find(|c| c.id == id)
            .ok_or_else(|| ClienteError::NotFound(id.to_string()))
    }

    /// Matching records in storage order
    pub fn list(&self, filter: &ListFilter) -> Result<Vec<Cliente>> {
        let clientes = self.store.load()?;
        Ok(filter.apply(clientes))
    }

    /// Merge the sent fields over the stored record and replace it in place
    pub fn update(&self, id: &str, cambios: CambiosCliente) -> Result<Cliente> {
        validar_cambios(&cambios, Utc::now())?;

        let mut clientes = self.store.load()?;
        let index = clientes
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| ClienteError::NotFound(id.to_string()))?;

        if let Some(correo) = valor_efectivo(&cambios, Campo::Correo) {
            if clientes.iter().any(|c| c.correo == correo && c.id != id) {
                return Err(ClienteError::DuplicateEmailOtherClient(correo.to_string()));
            }
        }

        let merged = aplicar(&clientes[index], &cambios)?;
        clientes[index] = merged.clone();
        self.store.save(&clientes)?;

        log::info!("Updated cliente {}", id);
        Ok(merged)
    }

    pub fn delete(&self, id: &str) -> Result<()> {
        let mut clientes = self.store.load()?;
        let index = clientes
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| ClienteError::NotFound(id.to_string()))?;

        let removed = clientes.remove(index);
        self.store.save(&clientes)?;

        log::info!("Deleted cliente {} <{}>", removed.id, removed.correo);
        Ok(())
    }
}
