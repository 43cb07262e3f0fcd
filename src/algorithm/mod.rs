// Núcleo del motor de decisión por etapas: generación de tablas, reconstrucción
// del camino óptimo y armado de la vista explicativa.
pub mod explain;
pub mod reconstruct;
pub mod scoring;
pub mod table;

pub use explain::{format, is_optimal_cell, DisplayBundle};
pub use reconstruct::reconstruct_path;
pub use scoring::{ScoringFunction, SqrtStateScore};
pub use table::{generate_table, generate_table_with, GeneratedTable};

use crate::models::{DecisionRange, Item};

/// Vista ilustrativa completa: genera la tabla, la reproduce desde el
/// presupuesto total y arma el paquete de visualización.
pub fn illustrate(items: &[Item], resource_budget: u32, decision_range: DecisionRange) -> (GeneratedTable, DisplayBundle) {
	let generated = generate_table(items, resource_budget, decision_range);
	let path = reconstruct_path(&generated.table, resource_budget);
	let bundle = format(&generated.table, &generated.values, &path);
	(generated, bundle)
}
