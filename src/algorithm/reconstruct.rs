use crate::models::{DecisionTable, OptimalCell, PathStep, ReconstructedPath, StopReason};

/// Reproduce hacia adelante una tabla de decisiones calculada hacia atrás.
///
/// Parte con `initial_state` unidades y recorre las etapas en orden, tomando en
/// cada una la decisión óptima registrada para el estado actual. No busca nada:
/// confía en la tabla y es O(etapas).
///
/// El camino puede terminar antes de la última etapa; el motivo queda en
/// `ReconstructedPath::stop` y nunca se devuelve como error.
pub fn reconstruct_path(table: &DecisionTable, initial_state: u32) -> ReconstructedPath {
    let mut steps: Vec<PathStep> = Vec::new();
    let mut remaining = initial_state;
    let mut cumulative = 0.0;

    for stage_table in table.stages.iter() {
        let stage = stage_table.stage;

        if remaining == 0 {
            return stopped(steps, StopReason::ResourceExhausted { stage });
        }

        let Some(cell) = stage_table.cell(remaining) else {
            return stopped(steps, StopReason::MissingState { stage, state: remaining });
        };

        // Decisión 0 o ausente: la etapa no aporta ni consume recurso
        let decision = match cell.optimal_decision {
            Some(d) if d > 0 => d,
            _ => continue,
        };

        if !cell.decisions.is_empty() && cell.value_of(decision).is_none() {
            return stopped(steps, StopReason::InconsistentDecision { stage, state: remaining, decision });
        }
        if decision > remaining {
            return stopped(steps, StopReason::InsufficientResource { stage, state: remaining, decision });
        }

        let score = step_score(table, cell, decision);
        cumulative += score;
        steps.push(PathStep {
            stage,
            item: stage_table.item.clone(),
            state_before: remaining,
            decision_taken: decision,
            score_at_step: score,
            cumulative_score: cumulative,
        });
        remaining -= decision;
    }

    ReconstructedPath { steps, stop: None }
}

/// Puntaje de una etapa: la matriz del solver cuando existe, si no el valor de
/// la propia fila para esa decisión.
fn step_score(table: &DecisionTable, cell: &OptimalCell, decision: u32) -> f64 {
    if let Some(matrix) = &table.score_matrix {
        if let Some(v) = matrix.score(decision, cell.stage) {
            return v;
        }
    }
    cell.value_of(decision).unwrap_or(cell.optimal_value)
}

fn stopped(steps: Vec<PathStep>, reason: StopReason) -> ReconstructedPath {
    tracing::debug!(pasos = steps.len(), motivo = %reason, "reconstrucción detenida");
    ReconstructedPath { steps, stop: Some(reason) }
}
