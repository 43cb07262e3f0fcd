use std::env;

use crate::error::EngineError;
use crate::models::DecisionRange;

pub const DEFAULT_BIND: &str = "127.0.0.1:8080";
pub const DEFAULT_SOLVER_URL: &str = "http://localhost:5000";

/// Configuración del servicio, leída del entorno (y de `.env` si existe).
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub bind_addr: String,
    pub solver_url: String,
    pub decision_range: DecisionRange,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            bind_addr: DEFAULT_BIND.to_string(),
            solver_url: DEFAULT_SOLVER_URL.to_string(),
            decision_range: DecisionRange::default(),
        }
    }
}

impl AppConfig {
    /// Honra OPTIESTUDIO_BIND, OPTIESTUDIO_SOLVER_URL, OPTIESTUDIO_DECISION_MIN
    /// y OPTIESTUDIO_DECISION_MAX.
    pub fn from_env() -> Result<Self, EngineError> {
        let _ = dotenv::dotenv();
        Self::from_lookup(|k| env::var(k).ok())
    }

    /// Versión parametrizable para pruebas: recibe la función de búsqueda de
    /// variables en lugar de leer el entorno del proceso.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, EngineError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = AppConfig::default();
        let bind_addr = lookup("OPTIESTUDIO_BIND").unwrap_or(defaults.bind_addr);
        let solver_url = lookup("OPTIESTUDIO_SOLVER_URL")
            .map(|u| u.trim_end_matches('/').to_string())
            .unwrap_or(defaults.solver_url);

        let min = parse_u32(&lookup, "OPTIESTUDIO_DECISION_MIN", defaults.decision_range.min)?;
        let max = parse_u32(&lookup, "OPTIESTUDIO_DECISION_MAX", defaults.decision_range.max)?;
        if min > max {
            return Err(EngineError::Config(format!(
                "OPTIESTUDIO_DECISION_MIN ({}) mayor que OPTIESTUDIO_DECISION_MAX ({})",
                min, max
            )));
        }

        Ok(AppConfig { bind_addr, solver_url, decision_range: DecisionRange::new(min, max) })
    }
}

fn parse_u32<F>(lookup: &F, key: &str, default: u32) -> Result<u32, EngineError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<u32>()
            .map_err(|e| EngineError::Config(format!("{}='{}': {}", key, raw, e))),
        _ => Ok(default),
    }
}
