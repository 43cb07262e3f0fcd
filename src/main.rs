// --- Motor de decisión por etapas - Archivo principal ---

use optiestudio::config::AppConfig;
use optiestudio::logging::init_logging;
use optiestudio::run_server;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    init_logging();
    let config = match AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "configuración inválida");
            return Err(std::io::Error::other(e.to_string()));
        }
    };
    tracing::info!("=== Motor de decisión por etapas (API) ===");
    run_server(config).await
}
