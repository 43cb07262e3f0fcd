use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::Serialize;

use crate::models::{DecisionTable, OptimalCell, ReconstructedPath, ValueCell};

/// Separación horizontal entre etapas del diagrama.
pub const STAGE_SPACING: f64 = 150.0;
/// Coordenada x del borde izquierdo del primer nodo.
pub const NODE_LEFT: f64 = 70.0;
/// Ancho de cada nodo del diagrama.
pub const NODE_WIDTH: f64 = 60.0;
/// Fila vertical fija donde se dibujan los nodos.
pub const NODE_Y: f64 = 100.0;

/// Fila de la grilla de una etapa: un valor por decisión del rango.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridRow {
    pub state: u32,
    pub values: Vec<Option<f64>>,
    pub optimal_value: f64,
    pub optimal_decision: Option<u32>,
    /// Marca de celda óptima, alineada con `values`.
    pub highlighted: Vec<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageGrid {
    pub stage: usize,
    pub item: String,
    pub decisions: Vec<u32>,
    pub rows: Vec<GridRow>,
}

/// Punto de la serie acumulada (gráfico de línea).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub label: String,
    pub value: f64,
}

/// Arista del diagrama de etapas de izquierda a derecha.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagramEdge {
    pub from_stage: usize,
    pub to_stage: usize,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub decision: Option<u32>,
    pub score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagramNode {
    pub stage: usize,
    pub label: String,
    pub x: f64,
    pub y: f64,
    pub on_path: bool,
}

/// Todo lo que necesita la capa de visualización para una solicitud.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayBundle {
    pub grids: Vec<StageGrid>,
    pub cumulative_series: Vec<SeriesPoint>,
    pub nodes: Vec<DiagramNode>,
    pub edges: Vec<DiagramEdge>,
    pub path: ReconstructedPath,
    pub complete: bool,
}

/// Una celda se resalta sólo si su valor es el óptimo de la fila y además es
/// la decisión registrada como óptima (dos decisiones empatadas no se marcan).
pub fn is_optimal_cell(row: &OptimalCell, decision: u32, value: f64) -> bool {
    row.optimal_decision == Some(decision) && value == row.optimal_value
}

/// Arma el paquete de visualización a partir de la tabla, sus celdas y el camino.
///
/// Los valores de la grilla salen de `value_cells`; si una etapa no tiene
/// celdas (tabla del solver) se usan las opciones registradas en cada fila.
pub fn format(table: &DecisionTable, value_cells: &[ValueCell], path: &ReconstructedPath) -> DisplayBundle {
    let grids: Vec<StageGrid> = table
        .stages
        .iter()
        .map(|st| {
            let decisions = decision_columns(&st.cells, value_cells, st.stage);
            let rows = st
                .cells
                .iter()
                .map(|cell| {
                    let values: Vec<Option<f64>> = decisions
                        .iter()
                        .map(|&d| lookup_value(value_cells, cell, d))
                        .collect();
                    let highlighted = decisions
                        .iter()
                        .zip(values.iter())
                        .map(|(&d, v)| v.is_some_and(|v| is_optimal_cell(cell, d, v)))
                        .collect();
                    GridRow {
                        state: cell.state,
                        values,
                        optimal_value: cell.optimal_value,
                        optimal_decision: cell.optimal_decision,
                        highlighted,
                    }
                })
                .collect();
            StageGrid { stage: st.stage, item: st.item.clone(), decisions, rows }
        })
        .collect();

    let (nodes, edges) = stage_diagram(table, path);

    DisplayBundle {
        grids,
        cumulative_series: cumulative_series(path),
        nodes,
        edges,
        path: path.clone(),
        complete: path.stop.is_none(),
    }
}

/// Serie acumulada con el punto inicial en 0 y uno por paso del camino.
pub fn cumulative_series(path: &ReconstructedPath) -> Vec<SeriesPoint> {
    let mut out = Vec::with_capacity(path.len() + 1);
    out.push(SeriesPoint { label: "Inicio".to_string(), value: 0.0 });
    for step in path.steps.iter() {
        out.push(SeriesPoint { label: step.item.clone(), value: step.cumulative_score });
    }
    out
}

/// Construye el diagrama de etapas como grafo dirigido y lo aplana en nodos y
/// aristas con coordenadas fijas (`x1 = 130 + i*150`, `x2 = 70 + (i+1)*150`).
pub fn stage_diagram(table: &DecisionTable, path: &ReconstructedPath) -> (Vec<DiagramNode>, Vec<DiagramEdge>) {
    let mut graph: DiGraph<usize, Option<(u32, f64)>> = DiGraph::new();
    let idx: Vec<NodeIndex> = table.stages.iter().map(|st| graph.add_node(st.stage)).collect();

    for (i, pair) in idx.windows(2).enumerate() {
        let crossing = path
            .steps
            .iter()
            .find(|s| s.stage == table.stages[i].stage)
            .map(|s| (s.decision_taken, s.score_at_step));
        graph.add_edge(pair[0], pair[1], crossing);
    }

    let nodes = idx
        .iter()
        .enumerate()
        .map(|(i, &n)| {
            let stage = graph[n];
            DiagramNode {
                stage,
                label: table.stages[i].item.clone(),
                x: NODE_LEFT + i as f64 * STAGE_SPACING,
                y: NODE_Y,
                on_path: path.steps.iter().any(|s| s.stage == stage),
            }
        })
        .collect();

    let mut edges: Vec<DiagramEdge> = graph
        .edge_references()
        .map(|e| {
            let i = e.source().index();
            DiagramEdge {
                from_stage: graph[e.source()],
                to_stage: graph[e.target()],
                x1: NODE_LEFT + NODE_WIDTH + i as f64 * STAGE_SPACING,
                y1: NODE_Y,
                x2: NODE_LEFT + (i + 1) as f64 * STAGE_SPACING,
                y2: NODE_Y,
                decision: e.weight().map(|(d, _)| d),
                score: e.weight().map(|(_, s)| s),
            }
        })
        .collect();
    edges.sort_by_key(|e| e.from_stage);

    (nodes, edges)
}

fn decision_columns(cells: &[OptimalCell], value_cells: &[ValueCell], stage: usize) -> Vec<u32> {
    let mut decisions: Vec<u32> = value_cells
        .iter()
        .filter(|v| v.stage == stage)
        .map(|v| v.decision)
        .chain(cells.iter().flat_map(|c| c.decisions.iter().map(|d| d.decision)))
        .collect();
    decisions.sort_unstable();
    decisions.dedup();
    decisions
}

fn lookup_value(value_cells: &[ValueCell], cell: &OptimalCell, decision: u32) -> Option<f64> {
    value_cells
        .iter()
        .find(|v| v.stage == cell.stage && v.state == cell.state && v.decision == decision)
        .map(|v| v.value)
        .or_else(|| cell.value_of(decision))
}
