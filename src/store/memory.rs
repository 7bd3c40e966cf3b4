use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use super::ClienteStore;
use crate::cliente::Cliente;
use crate::error::{ClienteError, Result};

/// In-memory store for tests and dry runs
#[derive(Debug, Default)]
pub struct MemoryStore {
    clientes: Mutex<Vec<Cliente>>,
    loads: AtomicUsize,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_clientes(clientes: Vec<Cliente>) -> Self {
        Self {
            clientes: Mutex::new(clientes),
            ..Self::default()
        }
    }

    /// Snapshot of the stored list. Panics if a writer panicked while
    /// holding the lock.
    pub fn clientes(&self) -> Vec<Cliente> {
        self.clientes
            .lock()
            .expect("memory store lock poisoned")
            .clone()
    }

    /// Number of `load` calls so far
    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

fn poisoned() -> ClienteError {
    ClienteError::Io(std::io::Error::new(
        std::io::ErrorKind::Other,
        "memory store lock poisoned",
    ))
}

impl ClienteStore for MemoryStore {
    fn load(&self) -> Result<Vec<Cliente>> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        self.clientes
            .lock()
            .map(|c| c.clone())
            .map_err(|_| poisoned())
    }

    fn save(&self, clientes: &[Cliente]) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(ClienteError::Persistence {
                path: "<memory>".into(),
                source: std::io::Error::new(std::io::ErrorKind::Other, "write refused"),
            });
        }
        let mut guard = self.clientes.lock().map_err(|_| poisoned())?;
        *guard = clientes.to_vec();
        Ok(())
    }
}
