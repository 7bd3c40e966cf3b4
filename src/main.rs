use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tabled::{settings::Style, Table, Tabled};

use clientes::config::{config_dir, init_config_dir, load_config, resolve_data_file};
use clientes::error::{ClienteError, Result};
use clientes::http::serve;
use clientes::{
    CambiosCliente, Campo, Cliente, ClienteService, ClienteStore, EstadoCliente, JsonFileStore,
    ListFilter, NuevoCliente,
};

#[derive(Parser)]
#[command(name = "clientes")]
#[command(version, about = "Customer records service backed by a JSON file", long_about = None)]
struct Cli {
    /// Path to config directory (default: XDG config dir or ~/.clientes)
    #[arg(short = 'C', long, global = true)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize config directory with a template config and an empty data file
    Init,

    /// Serve the /clientes HTTP API
    Serve {
        /// Override the configured host
        #[arg(long)]
        host: Option<String>,

        /// Override the configured port (PORT env var also works)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Show config and record counts
    Status,

    /// Create a customer
    Create(FieldArgs),

    /// Show one customer
    Get {
        /// Customer id
        id: String,
    },

    /// List customers, optionally filtered
    List {
        /// Exact status (Nuevo, "En negociación", Ganado, Perdido)
        #[arg(long)]
        estado: Option<String>,

        /// Case-insensitive substring of the company
        #[arg(long)]
        empresa: Option<String>,

        /// Contact date from (inclusive, ISO-8601)
        #[arg(long)]
        desde: Option<String>,

        /// Contact date to (inclusive, ISO-8601)
        #[arg(long)]
        hasta: Option<String>,
    },

    /// Update some fields of a customer
    Update {
        /// Customer id
        id: String,

        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Delete a customer
    Delete {
        /// Customer id
        id: String,
    },
}

#[derive(Args)]
struct FieldArgs {
    /// Full name (letters and spaces, 3-100 chars)
    #[arg(long)]
    nombre: Option<String>,

    /// Email address
    #[arg(long)]
    correo: Option<String>,

    /// Phone in +34-XXX-XXX-XXX format
    #[arg(long)]
    telefono: Option<String>,

    /// Company (an empty value clears it on update)
    #[arg(long)]
    empresa: Option<String>,

    /// Country
    #[arg(long)]
    pais: Option<String>,

    /// Contact date (ISO-8601, not in the future)
    #[arg(long = "fecha")]
    fecha_contacto: Option<String>,

    /// Status (Nuevo, "En negociación", Ganado, Perdido)
    #[arg(long = "estado")]
    estado_cliente: Option<String>,
}

impl FieldArgs {
    fn into_nuevo(self) -> NuevoCliente {
        NuevoCliente {
            nombre: self.nombre,
            correo: self.correo,
            telefono: self.telefono,
            empresa: self.empresa,
            pais: self.pais,
            fecha_contacto: self.fecha_contacto,
            estado_cliente: self.estado_cliente,
        }
    }

    fn into_cambios(self) -> CambiosCliente {
        let nuevo = self.into_nuevo();
        Campo::ALL
            .into_iter()
            .fold(CambiosCliente::new(), |cambios, campo| match nuevo.valor(campo) {
                Some(valor) => cambios.with(campo, valor),
                None => cambios,
            })
    }
}

fn main() {
    let cli = Cli::parse();

    let default_level = match cli.command {
        Commands::Serve { .. } => "info",
        _ => "warn",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let cfg_dir = match cli.config_dir {
        Some(p) => p,
        None => config_dir()?,
    };

    match cli.command {
        Commands::Init => cmd_init(&cfg_dir),
        Commands::Serve { host, port } => cmd_serve(&cfg_dir, host, port),
        Commands::Status => cmd_status(&cfg_dir),
        Commands::Create(fields) => cmd_create(&cfg_dir, fields),
        Commands::Get { id } => cmd_get(&cfg_dir, &id),
        Commands::List {
            estado,
            empresa,
            desde,
            hasta,
        } => cmd_list(&cfg_dir, estado, empresa, desde, hasta),
        Commands::Update { id, fields } => cmd_update(&cfg_dir, &id, fields),
        Commands::Delete { id } => cmd_delete(&cfg_dir, &id),
    }
}

fn open_service(cfg_dir: &Path) -> Result<ClienteService<JsonFileStore>> {
    let config = load_config(cfg_dir)?;
    let data_file = resolve_data_file(&config.storage.data_file, cfg_dir);
    Ok(ClienteService::new(JsonFileStore::new(data_file)))
}

/// Initialize config directory with template files
fn cmd_init(cfg_dir: &Path) -> Result<()> {
    let data_file = init_config_dir(cfg_dir)?;

    println!("Initialized clientes config at: {}", cfg_dir.display());
    println!("  Config: {}", cfg_dir.join("config.toml").display());
    println!("  Data:   {}", data_file.display());
    println!();
    println!("Start the API with:");
    println!("  clientes serve");

    Ok(())
}

fn cmd_serve(cfg_dir: &Path, host: Option<String>, port: Option<u16>) -> Result<()> {
    let mut config = load_config(cfg_dir)?;
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    serve(&config, cfg_dir)
}

fn cmd_status(cfg_dir: &Path) -> Result<()> {
    let config = load_config(cfg_dir)?;
    let data_file = resolve_data_file(&config.storage.data_file, cfg_dir);
    let clientes = JsonFileStore::new(&data_file).load()?;

    println!("Clientes Status");
    println!("{}", "-".repeat(50));
    println!("Config directory: {}", cfg_dir.display());
    println!("Data file:        {}", data_file.display());
    println!("Server address:   {}", config.server.bind_addr());
    println!("Clientes:         {}", clientes.len());

    if !clientes.is_empty() {
        println!();
        for estado in EstadoCliente::ALL {
            let count = clientes.iter().filter(|c| c.estado_cliente == estado).count();
            println!("  {:<16} {}", estado.as_str(), count);
        }
    }

    Ok(())
}

#[derive(Tabled)]
struct ClienteRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "NOMBRE")]
    nombre: String,
    #[tabled(rename = "CORREO")]
    correo: String,
    #[tabled(rename = "EMPRESA")]
    empresa: String,
    #[tabled(rename = "ESTADO")]
    estado: String,
    #[tabled(rename = "CONTACTO")]
    fecha: String,
}

impl From<&Cliente> for ClienteRow {
    fn from(c: &Cliente) -> Self {
        Self {
            id: c.id.clone(),
            nombre: c.nombre.clone(),
            correo: c.correo.clone(),
            empresa: c.empresa.clone(),
            estado: c.estado_cliente.to_string(),
            fecha: c.fecha_contacto.clone(),
        }
    }
}

fn print_cliente(cliente: &Cliente) {
    println!("  Id:       {}", cliente.id);
    println!("  Nombre:   {}", cliente.nombre);
    println!("  Correo:   {}", cliente.correo);
    println!("  Teléfono: {}", cliente.telefono);
    println!("  Empresa:  {}", cliente.empresa);
    println!("  País:     {}", cliente.pais);
    println!("  Contacto: {}", cliente.fecha_contacto);
    println!("  Estado:   {}", cliente.estado_cliente);
}

fn cmd_create(cfg_dir: &Path, fields: FieldArgs) -> Result<()> {
    let service = open_service(cfg_dir)?;
    let cliente = service.create(fields.into_nuevo())?;

    println!("Cliente creado exitosamente.");
    print_cliente(&cliente);
    Ok(())
}

fn cmd_get(cfg_dir: &Path, id: &str) -> Result<()> {
    let service = open_service(cfg_dir)?;
    let cliente = service.get_by_id(id)?;

    println!("Cliente {}", cliente.id);
    print_cliente(&cliente);
    Ok(())
}

fn cmd_list(
    cfg_dir: &Path,
    estado: Option<String>,
    empresa: Option<String>,
    desde: Option<String>,
    hasta: Option<String>,
) -> Result<()> {
    let query = [
        ("estadoCliente", estado),
        ("empresa", empresa),
        ("fechaInicio", desde),
        ("fechaFin", hasta),
    ];
    let filter = ListFilter::from_query(
        query
            .iter()
            .filter_map(|(k, v)| v.as_deref().map(|v| (*k, v))),
    )?;

    let service = open_service(cfg_dir)?;
    let clientes = service.list(&filter)?;

    if clientes.is_empty() {
        println!("No clientes found.");
        return Ok(());
    }

    let rows: Vec<ClienteRow> = clientes.iter().map(ClienteRow::from).collect();
    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");
    println!();
    println!("Total: {} clientes", clientes.len());

    Ok(())
}

fn cmd_update(cfg_dir: &Path, id: &str, fields: FieldArgs) -> Result<()> {
    let cambios = fields.into_cambios();
    if cambios.is_empty() {
        return Err(ClienteError::InvalidBody(
            "no se indicó ningún campo para actualizar".to_string(),
        ));
    }

    let service = open_service(cfg_dir)?;
    let cliente = service.update(id, cambios)?;

    println!("Cliente actualizado exitosamente.");
    print_cliente(&cliente);
    Ok(())
}

fn cmd_delete(cfg_dir: &Path, id: &str) -> Result<()> {
    let service = open_service(cfg_dir)?;
    service.delete(id)?;

    println!("Cliente eliminado exitosamente.");
    Ok(())
}
