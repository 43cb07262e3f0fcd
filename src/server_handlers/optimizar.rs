use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

use crate::algorithm::{format, reconstruct_path};
use crate::api_json::{CourseSolverRequest, TopicParams, TopicSolverRequest};
use crate::server::AppState;
use crate::server_handlers::{error_response, parse_body};

/// POST /optimizar/temas
/// Reenvía los temas al solver externo y devuelve el calendario con los días
/// y temas ya ordenados para la vista.
pub async fn optimize_topics_handler(state: web::Data<AppState>, body: web::Json<serde_json::Value>) -> impl Responder {
    let params: TopicParams = match parse_body(body.into_inner()) {
        Ok(p) => p,
        Err(e) => return error_response(&e),
    };

    let req = TopicSolverRequest::from_items(&params.items, params.dias_disponibles, params.tiempo_por_dia);
    match state.solver.optimize_topics(&req).await {
        Ok(resp) => HttpResponse::Ok().json(json!({
            "dias": resp.dias(),
            "temas": resp.temas(),
            "resultado": resp
        })),
        Err(e) => {
            tracing::error!(error = %e, "fallo al optimizar temas");
            error_response(&e)
        }
    }
}

/// POST /optimizar/cursos
/// Pide la tabla de decisiones al solver y la reproduce desde `dias_disponibles`.
pub async fn optimize_courses_handler(state: web::Data<AppState>, body: web::Json<serde_json::Value>) -> impl Responder {
    let req: CourseSolverRequest = match parse_body(body.into_inner()) {
        Ok(p) => p,
        Err(e) => return error_response(&e),
    };

    let resp = match state.solver.optimize_courses(&req).await {
        Ok(r) => r,
        Err(e) => {
            tracing::error!(error = %e, "fallo al optimizar cursos");
            return error_response(&e);
        }
    };

    let asignacion = resp.asignacion.clone();
    let table = match resp.into_decision_table() {
        Ok(t) => t,
        Err(e) => return error_response(&e),
    };
    let path = reconstruct_path(&table, req.dias_disponibles);
    let bundle = format(&table, &[], &path);

    HttpResponse::Ok().json(json!({
        "status": "ok",
        "asignacion": asignacion,
        "vista": bundle
    }))
}
