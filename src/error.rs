use thiserror::Error;

/// Errores de los bordes del servicio (payloads, solver externo, configuración).
/// El núcleo de cálculo no falla: sus cortes tempranos viajan en `StopReason`.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("payload inválido: {0}")]
    InvalidPayload(String),

    #[error("error del solver: {0}")]
    Solver(String),

    #[error("configuración inválida: {0}")]
    Config(String),
}

impl From<serde_json::Error> for EngineError {
    fn from(e: serde_json::Error) -> Self {
        EngineError::InvalidPayload(e.to_string())
    }
}

impl From<reqwest::Error> for EngineError {
    fn from(e: reqwest::Error) -> Self {
        EngineError::Solver(e.to_string())
    }
}
