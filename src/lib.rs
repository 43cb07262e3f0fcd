// Biblioteca raíz del crate `optiestudio`.
// El núcleo de cálculo vive en `models` y `algorithm`; el resto son los bordes
// del servicio (payloads del solver, cliente HTTP, servidor, configuración).
pub mod models;
pub mod algorithm;
pub mod api_json;
pub mod config;
pub mod error;
pub mod logging;
pub mod solver;
pub mod server;
mod server_handlers;

/// Ejecuta el servidor HTTP (reexport para facilitar uso desde `main`)
pub use server::run_server;
pub use error::EngineError;
