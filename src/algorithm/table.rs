use serde::Serialize;

use crate::algorithm::scoring::{ScoringFunction, SqrtStateScore};
use crate::models::{DecisionRange, DecisionTable, DecisionValue, Item, OptimalCell, StageTable, ValueCell};

/// Resultado del generador: la tabla de óptimos y todas las celdas evaluadas.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedTable {
    pub table: DecisionTable,
    pub values: Vec<ValueCell>,
    pub resource_budget: u32,
    pub decision_range: DecisionRange,
}

/// Genera la tabla ilustrativa `valor[etapa][estado][decision]` con el puntaje
/// por defecto (`SqrtStateScore`).
pub fn generate_table(items: &[Item], resource_budget: u32, decision_range: DecisionRange) -> GeneratedTable {
    generate_table_with(&SqrtStateScore, items, resource_budget, decision_range)
}

/// Igual que `generate_table` pero con una función de puntaje arbitraria.
///
/// Para cada etapa (un item) y cada estado 1..=presupuesto se evalúan todas las
/// decisiones del rango. La óptima es la primera que supera estrictamente al
/// mejor valor visto, partiendo de 0: los empates se quedan con la decisión
/// menor y una fila sin valores positivos no tiene óptima.
pub fn generate_table_with<S: ScoringFunction + ?Sized>(
    scorer: &S,
    items: &[Item],
    resource_budget: u32,
    decision_range: DecisionRange,
) -> GeneratedTable {
    let mut stages: Vec<StageTable> = Vec::with_capacity(items.len());
    let mut values: Vec<ValueCell> = Vec::new();

    for (stage, item) in items.iter().enumerate() {
        let mut cells: Vec<OptimalCell> = Vec::new();

        for state in 1..=resource_budget {
            let mut best_value = 0.0;
            let mut best_decision: Option<u32> = None;
            let mut decisions: Vec<DecisionValue> = Vec::new();

            for decision in decision_range.iter() {
                let value = stage_value(scorer, items, stage, state, decision);
                values.push(ValueCell { stage, state, decision, value });
                decisions.push(DecisionValue {
                    decision,
                    value,
                    formula: scorer.describe(items.get(stage), state, decision),
                });

                if value > best_value {
                    best_value = value;
                    best_decision = Some(decision);
                }
            }

            cells.push(OptimalCell {
                stage,
                state,
                optimal_decision: best_decision,
                optimal_value: best_value,
                decisions,
            });
        }

        stages.push(StageTable { stage, item: item.name.clone(), cells });
    }

    tracing::debug!(
        stages = stages.len(),
        budget = resource_budget,
        cells = values.len(),
        "tabla ilustrativa generada"
    );

    GeneratedTable {
        table: DecisionTable { stages, score_matrix: None },
        values,
        resource_budget,
        decision_range,
    }
}

/// Valor de una celda; una etapa sin item correspondiente vale 0.
pub fn stage_value<S: ScoringFunction + ?Sized>(
    scorer: &S,
    items: &[Item],
    stage: usize,
    state: u32,
    decision: u32,
) -> f64 {
    match items.get(stage) {
        Some(item) => scorer.score(Some(item), state, decision),
        None => 0.0,
    }
}
