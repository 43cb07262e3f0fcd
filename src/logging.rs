/// Inicializa el logging estructurado con tracing.
/// Se llama una vez al arrancar; RUST_LOG controla el filtro (por defecto `info`).
pub fn init_logging() {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let result = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .try_init();

    if let Err(e) = result {
        eprintln!("logging ya inicializado: {}", e);
        return;
    }

    tracing::info!("logging inicializado");
}
