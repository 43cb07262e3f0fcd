pub mod tabla;
pub mod ruta;
pub mod optimizar;
pub mod docs;

pub use tabla::*;
pub use ruta::*;
pub use optimizar::*;
pub use docs::*;

use actix_web::HttpResponse;
use serde_json::json;

use crate::error::EngineError;

/// Respuesta JSON de error con el mismo formato en todos los handlers.
pub(crate) fn error_response(e: &EngineError) -> HttpResponse {
    match e {
        EngineError::InvalidPayload(_) => HttpResponse::BadRequest().json(json!({"error": e.to_string()})),
        EngineError::Solver(_) => HttpResponse::BadGateway().json(json!({"error": e.to_string()})),
        EngineError::Config(_) => HttpResponse::InternalServerError().json(json!({"error": e.to_string()})),
    }
}

/// Deserializa el cuerpo ya leído como JSON genérico al tipo esperado.
pub(crate) fn parse_body<T: serde::de::DeserializeOwned>(body: serde_json::Value) -> Result<T, EngineError> {
    Ok(serde_json::from_value::<T>(body)?)
}
