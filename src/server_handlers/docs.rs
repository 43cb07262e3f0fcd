use actix_web::{HttpResponse, Responder};
use serde_json::json;

use crate::api_json::GenerateParams;
use crate::models::default_items;

pub async fn help_handler() -> impl Responder {
    let example = GenerateParams {
        items: default_items(),
        dias_disponibles: 5,
        decision_min: Some(1),
        decision_max: Some(4),
    };

    let help = json!({
        "description": "API del motor de decisión por etapas. POST /tabla/generar arma una tabla ilustrativa (ver 'generar_example'). POST /ruta/reconstruir reproduce la tabla de un solver de cursos desde 'estado_inicial'. POST /optimizar/temas y /optimizar/cursos consultan al solver externo.",
        "generar_example": example,
        "reconstruir_example": {
            "estado_inicial": 5,
            "respuesta": {
                "status": "ok",
                "tabla_decisiones": [
                    {"etapa": 0, "item": "Cálculo", "filas": [{"estado": 5, "decisiones": [], "valor_optimo": 40, "decision_optima": 3}]},
                    {"etapa": 1, "item": "Álgebra", "filas": [{"estado": 2, "decisiones": [], "valor_optimo": 25, "decision_optima": 2}]}
                ]
            }
        },
        "note": "Un camino más corto que el número de etapas indica que la tabla no tenía fila para el recurso restante; el motivo viene en 'camino.stop'."
    });

    HttpResponse::Ok().json(help)
}
