use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

use crate::algorithm::{format, reconstruct_path};
use crate::api_json::ReconstructParams;
use crate::server_handlers::{error_response, parse_body};

/// POST /ruta/reconstruir
/// Recibe la respuesta del solver de cursos y el estado inicial, reproduce el
/// camino óptimo y devuelve la vista explicativa.
pub async fn reconstruct_handler(body: web::Json<serde_json::Value>) -> impl Responder {
    let params: ReconstructParams = match parse_body(body.into_inner()) {
        Ok(p) => p,
        Err(e) => return error_response(&e),
    };

    let table = match params.respuesta.into_decision_table() {
        Ok(t) => t,
        Err(e) => return error_response(&e),
    };

    let path = reconstruct_path(&table, params.estado_inicial);
    let bundle = format(&table, &[], &path);

    if let Some(reason) = &path.stop {
        tracing::info!(etapas = table.stage_count(), pasos = path.len(), motivo = %reason, "camino parcial");
    }

    HttpResponse::Ok().json(json!({
        "status": "ok",
        "etapas": table.stage_count(),
        "completo": bundle.complete,
        "camino": path,
        "vista": bundle
    }))
}
