use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn clientes_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("clientes"));
    cmd.env_remove("PORT").env_remove("RUST_LOG");
    cmd
}

fn init(config_path: &Path) {
    clientes_cmd()
        .args(["-C", config_path.to_str().unwrap(), "init"])
        .assert()
        .success();
}

fn create(config_path: &Path, correo: &str, empresa: &str, estado: &str) -> String {
    let output = clientes_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "create",
            "--nombre",
            "Nicolas Avila",
            "--correo",
            correo,
            "--telefono",
            "+34-342-456-789",
            "--empresa",
            empresa,
            "--pais",
            "España",
            "--fecha",
            "2023-08-15",
            "--estado",
            estado,
        ])
        .output()
        .unwrap();
    assert!(output.status.success(), "{output:?}");

    String::from_utf8(output.stdout)
        .unwrap()
        .lines()
        .find_map(|line| line.trim().strip_prefix("Id:").map(|id| id.trim().to_string()))
        .expect("create prints the new id")
}

fn data_file(config_path: &Path) -> serde_json::Value {
    let content = fs::read_to_string(config_path.join("data").join("clientes.json")).unwrap();
    serde_json::from_str(&content).unwrap()
}

#[test]
fn test_help() {
    clientes_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Customer records service"));
}

#[test]
fn test_init_creates_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("clientes-config");

    clientes_cmd()
        .args(["-C", config_path.to_str().unwrap(), "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized clientes config"));

    assert!(config_path.join("config.toml").exists());
    assert_eq!(data_file(&config_path), serde_json::json!([]));
}

#[test]
fn test_init_fails_if_exists() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("clientes-config");

    init(&config_path);

    clientes_cmd()
        .args(["-C", config_path.to_str().unwrap(), "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_status_without_init() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("nonexistent");

    clientes_cmd()
        .args(["-C", config_path.to_str().unwrap(), "status"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_create_and_get() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("clientes-config");
    init(&config_path);

    let id = create(&config_path, "NicoAv@gmail.com", "Universidad del Valle", "Nuevo");

    clientes_cmd()
        .args(["-C", config_path.to_str().unwrap(), "get", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("NicoAv@gmail.com"))
        .stdout(predicate::str::contains("Universidad del Valle"));

    let stored = data_file(&config_path);
    assert_eq!(stored[0]["id"], id.as_str());
    assert_eq!(stored[0]["fechaContacto"], "2023-08-15");
}

#[test]
fn test_create_short_name() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("clientes-config");
    init(&config_path);

    clientes_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "create",
            "--nombre",
            "EA",
            "--correo",
            "test@gmail.com",
            "--telefono",
            "+34-123-456-789",
            "--pais",
            "España",
            "--fecha",
            "2023-09-15",
            "--estado",
            "Nuevo",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "El nombre debe tener al menos 3 caracteres",
        ));

    assert_eq!(data_file(&config_path), serde_json::json!([]));
}

#[test]
fn test_create_duplicate_email() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("clientes-config");
    init(&config_path);

    create(&config_path, "test@gmail.com", "", "Nuevo");

    clientes_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "create",
            "--nombre",
            "Carlos Coronado",
            "--correo",
            "test@gmail.com",
            "--telefono",
            "+34-123-456-789",
            "--pais",
            "España",
            "--fecha",
            "2023-09-15",
            "--estado",
            "Nuevo",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "El correo electrónico ya está registrado",
        ));
}

#[test]
fn test_get_missing() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("clientes-config");
    init(&config_path);

    clientes_cmd()
        .args(["-C", config_path.to_str().unwrap(), "get", "inexistente-id"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cliente no encontrado"));
}

#[test]
fn test_list_with_filters() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("clientes-config");
    init(&config_path);

    create(&config_path, "a@example.com", "Universidad del Valle", "Nuevo");
    create(&config_path, "b@example.com", "Acme", "Ganado");

    clientes_cmd()
        .args(["-C", config_path.to_str().unwrap(), "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CORREO"))
        .stdout(predicate::str::contains("Total: 2 clientes"));

    clientes_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "list",
            "--empresa",
            "valle",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("a@example.com"))
        .stdout(predicate::str::contains("b@example.com").not());

    clientes_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "list",
            "--estado",
            "Ganado",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("b@example.com"))
        .stdout(predicate::str::contains("a@example.com").not());

    clientes_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "list",
            "--estado",
            "Pendiente",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Estado de cliente inválido"));
}

#[test]
fn test_update_and_delete() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("clientes-config");
    init(&config_path);

    let id = create(&config_path, "a@example.com", "Acme", "Nuevo");
    create(&config_path, "b@example.com", "", "Nuevo");

    clientes_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "update",
            &id,
            "--correo",
            "b@example.com",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("registrado por otro cliente"));

    clientes_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "update",
            &id,
            "--empresa",
            "",
            "--estado",
            "Ganado",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cliente actualizado exitosamente"));

    let stored = data_file(&config_path);
    assert_eq!(stored[0]["empresa"], "");
    assert_eq!(stored[0]["estadoCliente"], "Ganado");
    assert_eq!(stored[0]["correo"], "a@example.com");

    clientes_cmd()
        .args(["-C", config_path.to_str().unwrap(), "delete", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cliente no encontrado"));
    assert_eq!(data_file(&config_path).as_array().unwrap().len(), 2);

    clientes_cmd()
        .args(["-C", config_path.to_str().unwrap(), "delete", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cliente eliminado exitosamente"));
    assert_eq!(data_file(&config_path).as_array().unwrap().len(), 1);
}

#[test]
fn test_status_counts() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("clientes-config");
    init(&config_path);
    create(&config_path, "a@example.com", "", "Ganado");

    clientes_cmd()
        .args(["-C", config_path.to_str().unwrap(), "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Clientes Status"))
        .stdout(predicate::str::contains("Clientes:         1"))
        .stdout(predicate::str::contains("127.0.0.1:3000"));
}

#[test]
fn test_corrupt_data_file_is_reported() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("clientes-config");
    init(&config_path);
    fs::write(config_path.join("data").join("clientes.json"), "{ broken").unwrap();

    clientes_cmd()
        .args(["-C", config_path.to_str().unwrap(), "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse data file"));
}
