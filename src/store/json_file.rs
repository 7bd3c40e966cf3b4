use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::ClienteStore;
use crate::cliente::Cliente;
use crate::error::{ClienteError, Result};

/// Stores the record list as a pretty-printed JSON array in a single file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ClienteStore for JsonFileStore {
    /// A missing file is an empty list. Unreadable or corrupt files are errors.
    fn load(&self) -> Result<Vec<Cliente>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("{} does not exist yet, starting empty", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => {
                log::error!("Error reading {}: {}", self.path.display(), e);
                return Err(ClienteError::Persistence {
                    path: self.path.clone(),
                    source: e,
                });
            }
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&content).map_err(|e| {
            log::error!("Error parsing {}: {}", self.path.display(), e);
            ClienteError::DataParse {
                path: self.path.clone(),
                source: e,
            }
        })
    }

    fn save(&self, clientes: &[Cliente]) -> Result<()> {
        let persistence = |e: std::io::Error| {
            log::error!("Error writing {}: {}", self.path.display(), e);
            ClienteError::Persistence {
                path: self.path.clone(),
                source: e,
            }
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(persistence)?;
        }

        let content = serde_json::to_string_pretty(clientes).map_err(|e| {
            persistence(std::io::Error::new(ErrorKind::InvalidData, e.to_string()))
        })?;
        fs::write(&self.path, content).map_err(persistence)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cliente::EstadoCliente;
    use tempfile::TempDir;

    fn cliente() -> Cliente {
        Cliente {
            id: "1".into(),
            nombre: "Ana Torres".into(),
            correo: "ana@example.com".into(),
            telefono: "+34-600-000-001".into(),
            empresa: String::new(),
            pais: "España".into(),
            fecha_contacto: "2023-01-02".into(),
            estado_cliente: EstadoCliente::Nuevo,
        }
    }

    #[test]
    fn missing_file_loads_empty() {
        let temp = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp.path().join("clientes.json"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn save_creates_parent_dirs_and_pretty_prints() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("data").join("clientes.json");
        let store = JsonFileStore::new(&path);

        store.save(&[cliente()]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("[\n"));
        assert!(content.contains("\"fechaContacto\": \"2023-01-02\""));
        assert_eq!(store.load().unwrap(), vec![cliente()]);
    }

    #[test]
    fn corrupt_file_is_an_error_not_an_empty_list() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("clientes.json");
        fs::write(&path, "{ not json").unwrap();

        let err = JsonFileStore::new(&path).load().unwrap_err();
        assert!(matches!(err, ClienteError::DataParse { .. }));
        assert_eq!(err.status_code(), 500);
    }

    #[test]
    fn unwritable_path_is_an_error() {
        let temp = TempDir::new().unwrap();
        // A directory where the file should be
        let path = temp.path().join("clientes.json");
        fs::create_dir(&path).unwrap();

        let err = JsonFileStore::new(&path).save(&[cliente()]).unwrap_err();
        assert!(matches!(err, ClienteError::Persistence { .. }));
    }
}
