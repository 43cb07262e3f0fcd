use actix_cors::Cors;
use actix_web::{web, App, HttpServer};

use crate::config::AppConfig;
use crate::error::EngineError;
use crate::server_handlers::{
    generate_table_handler, help_handler, optimize_courses_handler, optimize_topics_handler,
    reconstruct_handler, sample_topics_handler,
};
use crate::solver::SolverClient;

/// Estado compartido (sólo lectura) entre workers: configuración y cliente del solver.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub solver: SolverClient,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self, EngineError> {
        let solver = SolverClient::new(&config.solver_url)?;
        Ok(AppState { config, solver })
    }
}

/// Registra las rutas de la API. Se usa tanto en `run_server` como en los tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/tabla/generar", web::post().to(generate_table_handler))
        .route("/ruta/reconstruir", web::post().to(reconstruct_handler))
        .route("/optimizar/temas", web::post().to(optimize_topics_handler))
        .route("/optimizar/cursos", web::post().to(optimize_courses_handler))
        .route("/temas/ejemplo", web::get().to(sample_topics_handler))
        .route("/help", web::get().to(help_handler));
}

pub async fn run_server(config: AppConfig) -> std::io::Result<()> {
    let bind_addr = config.bind_addr.clone();
    let state = AppState::new(config).map_err(|e| std::io::Error::other(e.to_string()))?;
    let data = web::Data::new(state);

    tracing::info!(bind = %bind_addr, solver = %data.config.solver_url, "iniciando servidor");

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .app_data(data.clone())
            .configure(configure)
    })
    .bind(bind_addr)?
    .run()
    .await
}
