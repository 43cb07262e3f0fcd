use serde::{Deserialize, Serialize};
use indexmap::IndexMap;

use crate::error::EngineError;
use crate::models::{DecisionRange, DecisionTable, DecisionValue, Item, OptimalCell, ScoreMatrix, StageTable};

/// Solicitud al solver externo para la variante de temas de estudio.
///
/// # Estructura del JSON:
/// ```json
/// {
///   "dias_disponibles": 5,
///   "tiempo_por_dia": 8,
///   "temas": ["Matemáticas", "Física"],
///   "pesos_temas": [60, 40],
///   "dificultad_temas": [8, 7],
///   "eficiencia_temas": [6, 5]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicSolverRequest {
	pub dias_disponibles: u32,
	pub tiempo_por_dia: u32,
	pub temas: Vec<String>,
	pub pesos_temas: Vec<f64>,
	pub dificultad_temas: Vec<f64>,
	pub eficiencia_temas: Vec<f64>,
}

impl TopicSolverRequest {
	/// Aplana la lista de items en los arreglos paralelos que espera el solver.
	pub fn from_items(items: &[Item], dias_disponibles: u32, tiempo_por_dia: u32) -> Self {
		TopicSolverRequest {
			dias_disponibles,
			tiempo_por_dia,
			temas: items.iter().map(|t| t.name.clone()).collect(),
			pesos_temas: items.iter().map(|t| t.weight).collect(),
			dificultad_temas: items.iter().map(|t| t.difficulty).collect(),
			eficiencia_temas: items.iter().map(|t| t.efficiency).collect(),
		}
	}
}

/// Horas asignadas a un tema en un día del calendario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicAllocation {
	pub tema: String,
	pub horas: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicSummary {
	pub horas_totales: f64,
	pub peso: f64,
	pub dificultad: f64,
	pub eficiencia: f64,
}

/// Respuesta del solver para la variante de temas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicSolverResponse {
	pub status: String,
	#[serde(default)]
	pub nota_esperada: f64,
	#[serde(default)]
	pub calendario: IndexMap<String, Vec<TopicAllocation>>,
	#[serde(default)]
	pub resumen_temas: IndexMap<String, TopicSummary>,
}

impl TopicSolverResponse {
	/// Días del calendario en el mismo orden en que los entrega el solver.
	pub fn dias(&self) -> Vec<String> {
		self.calendario.keys().cloned().collect()
	}

	pub fn temas(&self) -> Vec<String> {
		self.resumen_temas.keys().cloned().collect()
	}

	/// Horas asignadas a `tema` en `dia` (0 si no aparece).
	pub fn horas(&self, dia: &str, tema: &str) -> f64 {
		self.calendario
			.get(dia)
			.map(|asig| asig.iter().filter(|a| a.tema == tema).map(|a| a.horas).sum())
			.unwrap_or(0.0)
	}
}

/// Solicitud al solver para la variante de asignación de cursos.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseSolverRequest {
	pub dias_disponibles: u32,
	/// Indexada `[decision-1][etapa]`.
	pub matriz_puntajes: Vec<Vec<f64>>,
	pub decision_min: u32,
	pub decision_max: u32,
}

impl CourseSolverRequest {
	pub fn new(dias_disponibles: u32, matriz: ScoreMatrix, range: DecisionRange) -> Self {
		CourseSolverRequest {
			dias_disponibles,
			matriz_puntajes: matriz.rows().to_vec(),
			decision_min: range.min,
			decision_max: range.max,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseAssignment {
	pub curso: String,
	pub unidades: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireDecision {
	pub unidades: u32,
	pub valor: f64,
	#[serde(default)]
	pub formula: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireRow {
	pub estado: u32,
	#[serde(default)]
	pub decisiones: Vec<WireDecision>,
	pub valor_optimo: f64,
	pub decision_optima: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireStage {
	pub etapa: usize,
	pub item: String,
	pub filas: Vec<WireRow>,
}

/// Respuesta del solver para la variante de cursos.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseSolverResponse {
	pub status: String,
	#[serde(default)]
	pub asignacion: Vec<CourseAssignment>,
	pub tabla_decisiones: Vec<WireStage>,
	#[serde(default)]
	pub matriz_puntajes: Vec<Vec<f64>>,
	#[serde(default)]
	pub estados_explorados: Vec<serde_json::Value>,
}

impl CourseSolverResponse {
	/// Convierte la tabla del solver en la representación interna.
	///
	/// Las etapas se ordenan por `etapa`; una etapa repetida es un payload inválido.
	/// Una matriz de puntajes vacía se trata como ausente.
	pub fn into_decision_table(self) -> Result<DecisionTable, EngineError> {
		let mut wire = self.tabla_decisiones;
		wire.sort_by_key(|s| s.etapa);
		if let Some(dup) = wire.windows(2).find(|w| w[0].etapa == w[1].etapa) {
			return Err(EngineError::InvalidPayload(format!("etapa {} repetida en tabla_decisiones", dup[0].etapa)));
		}

		let stages = wire
			.into_iter()
			.map(|st| {
				let stage = st.etapa;
				let cells = st
					.filas
					.into_iter()
					.map(|fila| {
						let mut decisions: Vec<DecisionValue> = fila
							.decisiones
							.into_iter()
							.map(|d| DecisionValue { decision: d.unidades, value: d.valor, formula: d.formula })
							.collect();
						decisions.sort_by_key(|d| d.decision);
						OptimalCell {
							stage,
							state: fila.estado,
							optimal_decision: fila.decision_optima,
							optimal_value: fila.valor_optimo,
							decisions,
						}
					})
					.collect();
				StageTable { stage, item: st.item, cells }
			})
			.collect();

		let score_matrix = if self.matriz_puntajes.is_empty() {
			None
		} else {
			Some(ScoreMatrix::new(self.matriz_puntajes))
		};

		Ok(DecisionTable { stages, score_matrix })
	}
}

pub fn parse_course_response(json_str: &str) -> Result<CourseSolverResponse, EngineError> {
	Ok(serde_json::from_str::<CourseSolverResponse>(json_str)?)
}

pub fn parse_topic_response(json_str: &str) -> Result<TopicSolverResponse, EngineError> {
	Ok(serde_json::from_str::<TopicSolverResponse>(json_str)?)
}

/// Cuerpo de POST /tabla/generar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateParams {
	pub items: Vec<Item>,
	pub dias_disponibles: u32,
	#[serde(default)]
	pub decision_min: Option<u32>,
	#[serde(default)]
	pub decision_max: Option<u32>,
}

/// Límites del formulario de estudio: 1 a 30 días disponibles.
pub const MIN_DIAS: u32 = 1;
pub const MAX_DIAS: u32 = 30;

impl GenerateParams {
	/// Rango pedido, completando los extremos faltantes con `fallback`.
	pub fn decision_range(&self, fallback: DecisionRange) -> DecisionRange {
		DecisionRange::new(
			self.decision_min.unwrap_or(fallback.min),
			self.decision_max.unwrap_or(fallback.max),
		)
	}

	/// Verifica `dias_disponibles` y el rango de decisiones antes de generar la
	/// tabla y devuelve el rango efectivo.
	///
	/// Los días van de `MIN_DIAS` a `MAX_DIAS`; las decisiones de 1 a `MAX_DIAS`
	/// con mínimo <= máximo.
	pub fn validated_range(&self, fallback: DecisionRange) -> Result<DecisionRange, EngineError> {
		if !(MIN_DIAS..=MAX_DIAS).contains(&self.dias_disponibles) {
			return Err(EngineError::InvalidPayload(format!(
				"dias_disponibles={} fuera de rango [{}, {}]",
				self.dias_disponibles, MIN_DIAS, MAX_DIAS
			)));
		}

		let range = self.decision_range(fallback);
		if range.min < 1 || range.max > MAX_DIAS || range.min > range.max {
			return Err(EngineError::InvalidPayload(format!(
				"rango de decisiones [{}, {}] inválido: debe estar dentro de [1, {}] con mínimo <= máximo",
				range.min, range.max, MAX_DIAS
			)));
		}
		Ok(range)
	}
}

/// Cuerpo de POST /ruta/reconstruir.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconstructParams {
	pub respuesta: CourseSolverResponse,
	pub estado_inicial: u32,
}

/// Cuerpo de POST /optimizar/temas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicParams {
	pub dias_disponibles: u32,
	pub tiempo_por_dia: u32,
	pub items: Vec<Item>,
}
