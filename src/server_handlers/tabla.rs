use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

use crate::algorithm::illustrate;
use crate::api_json::GenerateParams;
use crate::models::{default_items, total_weight};
use crate::server::AppState;
use crate::server_handlers::{error_response, parse_body};

/// POST /tabla/generar
/// Genera la tabla ilustrativa para los items recibidos y devuelve además la
/// reproducción del camino desde el presupuesto total.
pub async fn generate_table_handler(state: web::Data<AppState>, body: web::Json<serde_json::Value>) -> impl Responder {
    let params: GenerateParams = match parse_body(body.into_inner()) {
        Ok(p) => p,
        Err(e) => return error_response(&e),
    };

    let range = match params.validated_range(state.config.decision_range) {
        Ok(r) => r,
        Err(e) => return error_response(&e),
    };
    let (generated, bundle) = illustrate(&params.items, params.dias_disponibles, range);

    tracing::info!(
        items = params.items.len(),
        dias = params.dias_disponibles,
        pasos = bundle.path.len(),
        "tabla generada"
    );

    HttpResponse::Ok().json(json!({
        "status": "ok",
        "peso_total": total_weight(&params.items),
        "tabla": generated,
        "vista": bundle
    }))
}

/// GET /temas/ejemplo
/// Temas por defecto del formulario, con su peso total.
pub async fn sample_topics_handler() -> impl Responder {
    let items = default_items();
    HttpResponse::Ok().json(json!({
        "items": items,
        "peso_total": total_weight(&items)
    }))
}
