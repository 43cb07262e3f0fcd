//! Cliente HTTP del solver externo de optimización.
//!
//! El núcleo no hace I/O: este cliente sólo trae la tabla de decisiones que
//! luego se reproduce con `reconstruct_path`.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::{Duration, Instant};

use crate::api_json::{CourseSolverRequest, CourseSolverResponse, TopicSolverRequest, TopicSolverResponse};
use crate::error::EngineError;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const TOPICS_PATH: &str = "/api/optimizar";
pub const COURSES_PATH: &str = "/api/optimizar-cursos";

#[derive(Debug, Clone)]
pub struct SolverClient {
    base_url: String,
    http: Client,
}

impl SolverClient {
    pub fn new(base_url: &str) -> Result<Self, EngineError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()?;
        Ok(SolverClient { base_url: base_url.trim_end_matches('/').to_string(), http })
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn optimize_topics(&self, req: &TopicSolverRequest) -> Result<TopicSolverResponse, EngineError> {
        self.post_json(TOPICS_PATH, req).await
    }

    pub async fn optimize_courses(&self, req: &CourseSolverRequest) -> Result<CourseSolverResponse, EngineError> {
        self.post_json(COURSES_PATH, req).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, EngineError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path);
        let start = Instant::now();
        let resp = self.http.post(&url).json(body).send().await?;
        let status = resp.status();
        let latency_ms = start.elapsed().as_millis() as u64;

        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            let detail = solver_error_detail(&text);
            tracing::warn!(url = %url, status = status.as_u16(), latency_ms, detail = %detail, "solver respondió con error");
            return Err(EngineError::Solver(format!("{} devolvió {}: {}", url, status, detail)));
        }

        tracing::info!(url = %url, latency_ms, "respuesta del solver");
        Ok(resp.json::<T>().await?)
    }
}

/// Mensaje de un cuerpo de error del solver: el campo `error` cuando el
/// cuerpo es `{"error": ...}`, si no el texto tal cual.
pub fn solver_error_detail(body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(v) => match v.get("error") {
            Some(serde_json::Value::String(msg)) => msg.clone(),
            Some(other) => other.to_string(),
            None => body.trim().to_string(),
        },
        Err(_) => body.trim().to_string(),
    }
}
