// Estructuras de datos principales del motor de decisión por etapas

use serde::{Deserialize, Serialize};

/// Unidad asignable de trabajo (un tema de estudio o un curso).
///
/// `weight` se espera en 0-100 y la suma de todos los items de una solicitud
/// debería ser 100, pero el motor no lo exige: consume los valores tal cual.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub weight: f64,
    pub difficulty: f64,
    pub efficiency: f64,
}

impl Item {
    pub fn new(name: &str, weight: f64, difficulty: f64, efficiency: f64) -> Self {
        Item { name: name.to_string(), weight, difficulty, efficiency }
    }
}

/// Temas por defecto del formulario de estudio.
pub fn default_items() -> Vec<Item> {
    vec![
        Item::new("Matemáticas", 30.0, 8.0, 6.0),
        Item::new("Física", 25.0, 7.0, 5.0),
        Item::new("Programación", 25.0, 6.0, 8.0),
        Item::new("Historia", 20.0, 4.0, 7.0),
    ]
}

/// Suma de pesos de los items. Sirve para avisar cuando no suma 100.
pub fn total_weight(items: &[Item]) -> f64 {
    items.iter().map(|it| it.weight).sum()
}

/// Rango cerrado de decisiones permitidas por etapa (unidades de recurso).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionRange {
    pub min: u32,
    pub max: u32,
}

impl DecisionRange {
    pub fn new(min: u32, max: u32) -> Self {
        DecisionRange { min, max }
    }

    pub fn iter(&self) -> std::ops::RangeInclusive<u32> {
        self.min..=self.max
    }

    pub fn len(&self) -> usize {
        if self.max < self.min { 0 } else { ((self.max - self.min) as usize).saturating_add(1) }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, decision: u32) -> bool {
        decision >= self.min && decision <= self.max
    }
}

impl Default for DecisionRange {
    fn default() -> Self {
        DecisionRange { min: 1, max: 4 }
    }
}

/// Puntaje atribuido a tomar `decision` unidades con `state` unidades restantes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueCell {
    pub stage: usize,
    pub state: u32,
    pub decision: u32,
    pub value: f64,
}

/// Una opción evaluada dentro de una fila de la tabla de decisiones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionValue {
    pub decision: u32,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,
}

/// Mejor decisión para un par (etapa, estado).
///
/// `decisions` guarda las opciones evaluadas en orden ascendente de decisión;
/// puede venir vacío cuando el solver sólo entrega el óptimo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimalCell {
    pub stage: usize,
    pub state: u32,
    pub optimal_decision: Option<u32>,
    pub optimal_value: f64,
    #[serde(default)]
    pub decisions: Vec<DecisionValue>,
}

impl OptimalCell {
    /// Valor registrado para `decision` en esta fila, si existe.
    pub fn value_of(&self, decision: u32) -> Option<f64> {
        self.decisions.iter().find(|d| d.decision == decision).map(|d| d.value)
    }
}

/// Celdas óptimas de una etapa, una por estado alcanzable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageTable {
    pub stage: usize,
    pub item: String,
    pub cells: Vec<OptimalCell>,
}

impl StageTable {
    /// Acceso orientado por estado: la fila de esta etapa para `state`.
    pub fn cell(&self, state: u32) -> Option<&OptimalCell> {
        self.cells.iter().find(|c| c.state == state)
    }
}

/// Matriz plana de puntajes del solver de cursos, indexada `[decision-1][stage]`.
///
/// La orientación es la inversa de las filas por etapa; el acceso sólo se hace
/// vía `score(decision, stage)` para no transponer índices a mano.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreMatrix {
    rows: Vec<Vec<f64>>,
}

impl ScoreMatrix {
    pub fn new(rows: Vec<Vec<f64>>) -> Self {
        ScoreMatrix { rows }
    }

    /// Puntaje de asignar `decision` unidades (>= 1) al item de `stage`.
    pub fn score(&self, decision: u32, stage: usize) -> Option<f64> {
        let row = (decision as usize).checked_sub(1)?;
        self.rows.get(row)?.get(stage).copied()
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }
}

/// Tabla de decisiones completa: etapa -> celdas óptimas, más la matriz de
/// puntajes cuando la entrega el solver de cursos.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DecisionTable {
    pub stages: Vec<StageTable>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score_matrix: Option<ScoreMatrix>,
}

impl DecisionTable {
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Acceso orientado por etapa y estado.
    pub fn cell(&self, stage: usize, state: u32) -> Option<&OptimalCell> {
        self.stages.get(stage)?.cell(state)
    }
}

/// Un paso del camino reconstruido.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathStep {
    pub stage: usize,
    pub item: String,
    pub state_before: u32,
    pub decision_taken: u32,
    pub score_at_step: f64,
    pub cumulative_score: f64,
}

/// Motivo por el cual la reconstrucción terminó antes de recorrer todas las etapas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StopReason {
    #[error("no hay fila para el estado {state} en la etapa {stage}")]
    MissingState { stage: usize, state: u32 },
    #[error("la decisión {decision} no pertenece a las opciones de la etapa {stage} (estado {state})")]
    InconsistentDecision { stage: usize, state: u32, decision: u32 },
    #[error("la decisión {decision} excede el recurso restante {state} en la etapa {stage}")]
    InsufficientResource { stage: usize, state: u32, decision: u32 },
    #[error("recurso agotado antes de la etapa {stage}")]
    ResourceExhausted { stage: usize },
}

/// Camino reconstruido. `stop` es `None` cuando se recorrieron todas las etapas.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReconstructedPath {
    pub steps: Vec<PathStep>,
    pub stop: Option<StopReason>,
}

impl ReconstructedPath {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn final_score(&self) -> f64 {
        self.steps.last().map(|s| s.cumulative_score).unwrap_or(0.0)
    }

    pub fn total_units(&self) -> u32 {
        self.steps.iter().map(|s| s.decision_taken).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_matrix_uses_decision_rows() {
        // fila = decision - 1, columna = etapa
        let m = ScoreMatrix::new(vec![vec![1.0, 2.0], vec![10.0, 20.0]]);
        assert_eq!(m.score(1, 0), Some(1.0));
        assert_eq!(m.score(2, 1), Some(20.0));
        assert_eq!(m.score(0, 0), None);
        assert_eq!(m.score(3, 0), None);
        assert_eq!(m.score(1, 5), None);
    }

    #[test]
    fn default_items_sum_to_100() {
        assert_eq!(total_weight(&default_items()), 100.0);
    }

    #[test]
    fn decision_range_bounds() {
        let r = DecisionRange::default();
        assert_eq!(r.len(), 4);
        assert!(r.contains(1) && r.contains(4));
        assert!(!r.contains(0) && !r.contains(5));
        assert!(DecisionRange::new(3, 2).is_empty());
        assert_eq!(DecisionRange::new(0, u32::MAX).len(), (u32::MAX as usize).saturating_add(1));
    }
}
