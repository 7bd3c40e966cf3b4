mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use crate::cliente::Cliente;
use crate::error::Result;

/// Whole-list persistence for customer records.
///
/// Every operation reads the full list and writes it back in full. There is
/// no locking between callers; concurrent writers race and the last save wins.
pub trait ClienteStore {
    fn load(&self) -> Result<Vec<Cliente>>;
    fn save(&self, clientes: &[Cliente]) -> Result<()>;
}

impl<S: ClienteStore + ?Sized> ClienteStore for &S {
    fn load(&self) -> Result<Vec<Cliente>> {
        (**self).load()
    }

    fn save(&self, clientes: &[Cliente]) -> Result<()> {
        (**self).save(clientes)
    }
}
