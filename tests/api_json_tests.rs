use actix_web::{test, web, App, HttpResponse, HttpServer};
use optiestudio::config::AppConfig;
use optiestudio::server::{configure, AppState};
use serde_json::{json, Value};

fn state() -> web::Data<AppState> {
    web::Data::new(AppState::new(AppConfig::default()).expect("estado"))
}

fn state_with_solver(solver_url: String) -> web::Data<AppState> {
    let config = AppConfig { solver_url, ..AppConfig::default() };
    web::Data::new(AppState::new(config).expect("estado"))
}

// Cuerpo escrito a mano para fijar el orden de las claves del calendario.
const TOPIC_SOLVER_BODY: &str = r#"{
    "status": "success",
    "nota_esperada": 6.2,
    "calendario": {
        "Día 1": [{"tema": "Matemáticas", "horas": 5}, {"tema": "Física", "horas": 3}],
        "Día 2": [{"tema": "Física", "horas": 8}],
        "Día 10": [{"tema": "Matemáticas", "horas": 8}]
    },
    "resumen_temas": {
        "Matemáticas": {"horas_totales": 13, "peso": 60, "dificultad": 8, "eficiencia": 6},
        "Física": {"horas_totales": 11, "peso": 40, "dificultad": 7, "eficiencia": 5}
    }
}"#;

async fn solver_topics_ok() -> HttpResponse {
    HttpResponse::Ok().content_type("application/json").body(TOPIC_SOLVER_BODY)
}

async fn solver_courses_ok() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "asignacion": [{"curso": "Cálculo", "unidades": 3}, {"curso": "Álgebra", "unidades": 2}],
        "tabla_decisiones": [
            {"etapa": 0, "item": "Cálculo", "filas": [
                {"estado": 5, "decisiones": [{"unidades": 1, "valor": 10}, {"unidades": 3, "valor": 40}], "valor_optimo": 40, "decision_optima": 3}
            ]},
            {"etapa": 1, "item": "Álgebra", "filas": [
                {"estado": 2, "decisiones": [{"unidades": 1, "valor": 12}, {"unidades": 2, "valor": 25}], "valor_optimo": 25, "decision_optima": 2}
            ]}
        ],
        "matriz_puntajes": [[10, 12], [20, 25], [40, 30]],
        "estados_explorados": []
    }))
}

async fn solver_down() -> HttpResponse {
    HttpResponse::InternalServerError().json(json!({"error": "solver sin memoria"}))
}

/// Levanta un solver de prueba en un puerto libre y devuelve su URL base.
fn start_solver(healthy: bool) -> String {
    let server = HttpServer::new(move || {
        if healthy {
            App::new()
                .route("/api/optimizar", web::post().to(solver_topics_ok))
                .route("/api/optimizar-cursos", web::post().to(solver_courses_ok))
        } else {
            App::new()
                .route("/api/optimizar", web::post().to(solver_down))
                .route("/api/optimizar-cursos", web::post().to(solver_down))
        }
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .expect("bind solver de prueba");

    let addr = server.addrs()[0];
    actix_web::rt::spawn(server.run());
    format!("http://{}", addr)
}

#[actix_web::test]
async fn test_generate_table_endpoint() {
    let app = test::init_service(App::new().app_data(state()).configure(configure)).await;

    let req = test::TestRequest::post()
        .uri("/tabla/generar")
        .set_json(json!({
            "items": [{"name": "Matemáticas", "weight": 30, "difficulty": 8, "efficiency": 6}],
            "dias_disponibles": 3
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["peso_total"], 30.0);
    let cells = body["tabla"]["table"]["stages"][0]["cells"].as_array().expect("celdas");
    assert_eq!(cells.len(), 3);
    assert_eq!(cells[2]["optimal_decision"], 4);
    assert_eq!(cells[2]["optimal_value"], 156.0);
    assert_eq!(body["vista"]["cumulative_series"][0]["value"], 0.0);
}

#[actix_web::test]
async fn test_generate_table_rejects_malformed_body() {
    let app = test::init_service(App::new().app_data(state()).configure(configure)).await;

    let req = test::TestRequest::post()
        .uri("/tabla/generar")
        .set_json(json!({"items": "no es una lista"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().is_some());
}

#[actix_web::test]
async fn test_generate_table_rejects_oversized_budget_and_range() {
    let app = test::init_service(App::new().app_data(state()).configure(configure)).await;

    let bodies = [
        json!({"items": [], "dias_disponibles": 31}),
        json!({"items": [], "dias_disponibles": 4294967295u32}),
        json!({"items": [], "dias_disponibles": 0}),
        json!({"items": [], "dias_disponibles": 5, "decision_min": 0, "decision_max": 4294967295u32}),
        json!({"items": [], "dias_disponibles": 5, "decision_min": 3, "decision_max": 2}),
    ];
    for body in bodies {
        let req = test::TestRequest::post().uri("/tabla/generar").set_json(&body).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 400, "cuerpo {}", body);

        let out: Value = test::read_body_json(resp).await;
        assert!(out["error"].as_str().is_some_and(|e| e.contains("inválid") || e.contains("fuera de rango")));
    }
}

#[actix_web::test]
async fn test_optimize_courses_replays_solver_table() {
    let app = test::init_service(
        App::new().app_data(state_with_solver(start_solver(true))).configure(configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/optimizar/cursos")
        .set_json(json!({
            "dias_disponibles": 5,
            "matriz_puntajes": [[10, 12], [20, 25], [40, 30]],
            "decision_min": 1,
            "decision_max": 4
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["asignacion"].as_array().map(|a| a.len()), Some(2));
    assert_eq!(body["vista"]["complete"], true);

    let steps = body["vista"]["path"]["steps"].as_array().expect("pasos");
    assert_eq!(steps.len(), 2);
    assert_eq!(steps[0]["item"], "Cálculo");
    assert_eq!(steps[0]["decision_taken"], 3);
    // puntajes desde la matriz [decision-1][etapa]
    assert_eq!(steps[0]["score_at_step"], 40.0);
    assert_eq!(steps[1]["decision_taken"], 2);
    assert_eq!(steps[1]["score_at_step"], 25.0);
    assert_eq!(steps[1]["cumulative_score"], 65.0);

    let series = body["vista"]["cumulative_series"].as_array().expect("serie");
    assert_eq!(series.len(), 3);
    assert_eq!(series[0]["value"], 0.0);
}

#[actix_web::test]
async fn test_optimize_topics_keeps_solver_order() {
    let app = test::init_service(
        App::new().app_data(state_with_solver(start_solver(true))).configure(configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/optimizar/temas")
        .set_json(json!({
            "dias_disponibles": 10,
            "tiempo_por_dia": 8,
            "items": [
                {"name": "Matemáticas", "weight": 60, "difficulty": 8, "efficiency": 6},
                {"name": "Física", "weight": 40, "difficulty": 7, "efficiency": 5}
            ]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["dias"], json!(["Día 1", "Día 2", "Día 10"]));
    assert_eq!(body["temas"], json!(["Matemáticas", "Física"]));
    assert_eq!(body["resultado"]["status"], "success");
}

#[actix_web::test]
async fn test_solver_failure_maps_to_bad_gateway() {
    let app = test::init_service(
        App::new().app_data(state_with_solver(start_solver(false))).configure(configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/optimizar/cursos")
        .set_json(json!({"dias_disponibles": 5, "matriz_puntajes": [], "decision_min": 1, "decision_max": 4}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 502);
    let body: Value = test::read_body_json(resp).await;
    let msg = body["error"].as_str().expect("mensaje de error");
    assert!(msg.contains("solver sin memoria"));
    assert!(!msg.contains('{'));

    let req = test::TestRequest::post()
        .uri("/optimizar/temas")
        .set_json(json!({"dias_disponibles": 5, "tiempo_por_dia": 8, "items": []}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 502);
}

#[actix_web::test]
async fn test_reconstruct_endpoint_two_stages() {
    let app = test::init_service(App::new().app_data(state()).configure(configure)).await;

    let req = test::TestRequest::post()
        .uri("/ruta/reconstruir")
        .set_json(json!({
            "estado_inicial": 5,
            "respuesta": {
                "status": "ok",
                "tabla_decisiones": [
                    {"etapa": 0, "item": "Cálculo", "filas": [{"estado": 5, "decisiones": [], "valor_optimo": 40, "decision_optima": 3}]},
                    {"etapa": 1, "item": "Álgebra", "filas": [{"estado": 2, "decisiones": [], "valor_optimo": 25, "decision_optima": 2}]}
                ]
            }
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["completo"], true);
    let steps = body["camino"]["steps"].as_array().expect("pasos");
    assert_eq!(steps.len(), 2);
    assert_eq!(steps[0]["decision_taken"], 3);
    assert_eq!(steps[0]["cumulative_score"], 40.0);
    assert_eq!(steps[1]["decision_taken"], 2);
    assert_eq!(steps[1]["cumulative_score"], 65.0);
    assert_eq!(body["vista"]["edges"][0]["x1"], 130.0);
    assert_eq!(body["vista"]["edges"][0]["x2"], 220.0);
}

#[actix_web::test]
async fn test_reconstruct_endpoint_reports_partial_path() {
    let app = test::init_service(App::new().app_data(state()).configure(configure)).await;

    let req = test::TestRequest::post()
        .uri("/ruta/reconstruir")
        .set_json(json!({
            "estado_inicial": 4,
            "respuesta": {
                "status": "ok",
                "tabla_decisiones": [
                    {"etapa": 0, "item": "Cálculo", "filas": [{"estado": 5, "decisiones": [], "valor_optimo": 40, "decision_optima": 3}]}
                ]
            }
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["completo"], false);
    assert_eq!(body["camino"]["steps"].as_array().map(|s| s.len()), Some(0));
    assert_eq!(body["camino"]["stop"]["kind"], "missing_state");
    assert_eq!(body["camino"]["stop"]["state"], 4);
}

#[actix_web::test]
async fn test_sample_topics_and_help() {
    let app = test::init_service(App::new().app_data(state()).configure(configure)).await;

    let req = test::TestRequest::get().uri("/temas/ejemplo").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["items"].as_array().map(|a| a.len()), Some(4));
    assert_eq!(body["peso_total"], 100.0);

    let req = test::TestRequest::get().uri("/help").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert!(body["description"].as_str().is_some());
}
