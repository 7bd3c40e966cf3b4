use std::io::Read;
use std::net::SocketAddr;
use std::path::Path;

use tiny_http::{Header, Response};

use super::{handle, ApiResponse};
use crate::cliente::ClienteService;
use crate::config::{resolve_data_file, Config};
use crate::error::{ClienteError, Result};
use crate::store::{ClienteStore, JsonFileStore};

/// Blocking HTTP server. Requests are handled one at a time.
pub struct Server {
    inner: tiny_http::Server,
}

impl Server {
    pub fn bind(addr: &str) -> Result<Self> {
        let inner = tiny_http::Server::http(addr)
            .map_err(|e| ClienteError::Server(format!("{addr}: {e}")))?;
        Ok(Self { inner })
    }

    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.inner.server_addr().to_ip()
    }

    /// Serve until the listener shuts down
    pub fn run<S: ClienteStore>(self, service: &ClienteService<S>) -> Result<()> {
        for mut request in self.inner.incoming_requests() {
            let method = request.method().to_string();
            let url = request.url().to_string();

            let mut body = String::new();
            let response = match request.as_reader().read_to_string(&mut body) {
                Ok(_) => handle(service, &method, &url, &body),
                Err(e) => {
                    log::warn!("Could not read body of {method} {url}: {e}");
                    ApiResponse::mensaje(400, "Cuerpo de la petición ilegible.")
                }
            };

            log::info!("{method} {url} -> {}", response.status);

            if let Err(e) = request.respond(into_http(response)) {
                log::warn!("Failed to send response for {method} {url}: {e}");
            }
        }
        Ok(())
    }
}

fn into_http(response: ApiResponse) -> Response<std::io::Cursor<Vec<u8>>> {
    let mut http = Response::from_string(response.body.to_string()).with_status_code(response.status);
    if let Ok(header) = "Content-Type: application/json; charset=utf-8".parse::<Header>() {
        http = http.with_header(header);
    }
    http
}

/// Bind the configured address and serve the configured data file
pub fn serve(config: &Config, cfg_dir: &Path) -> Result<()> {
    let data_file = resolve_data_file(&config.storage.data_file, cfg_dir);
    let service = ClienteService::new(JsonFileStore::new(&data_file));

    let server = Server::bind(&config.server.bind_addr())?;
    let addr = server
        .local_addr()
        .map(|a| a.to_string())
        .unwrap_or_else(|| config.server.bind_addr());

    log::info!("Server is running on {addr}");
    log::info!("Data file: {}", data_file.display());
    println!("Listening on http://{addr}/clientes");

    server.run(&service)
}
