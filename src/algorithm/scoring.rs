use crate::models::Item;

/// Función de puntaje intercambiable para el generador de tablas.
///
/// Recibe el item de la etapa (o `None` si la etapa no tiene item), el estado
/// (unidades restantes) y la decisión (unidades asignadas).
pub trait ScoringFunction {
    fn score(&self, item: Option<&Item>, state: u32, decision: u32) -> f64;

    /// Texto legible de cómo se obtuvo el valor, para mostrar en la tabla.
    fn describe(&self, _item: Option<&Item>, _state: u32, _decision: u32) -> Option<String> {
        None
    }
}

/// Puntaje ilustrativo: `round(d * eficiencia * peso / dificultad * sqrt(estado))`.
///
/// No representa el objetivo del solver real; sólo llena una tabla con la misma
/// forma que produciría una mochila de elección múltiple.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqrtStateScore;

impl ScoringFunction for SqrtStateScore {
    fn score(&self, item: Option<&Item>, state: u32, decision: u32) -> f64 {
        let Some(it) = item else { return 0.0 };
        let raw = decision as f64 * it.efficiency * it.weight / it.difficulty * (state as f64).sqrt();
        raw.round()
    }

    fn describe(&self, item: Option<&Item>, state: u32, decision: u32) -> Option<String> {
        let it = item?;
        Some(format!(
            "{} * {} * {} / {} * sqrt({})",
            decision, it.efficiency, it.weight, it.difficulty, state
        ))
    }
}

impl<F> ScoringFunction for F
where
    F: Fn(Option<&Item>, u32, u32) -> f64,
{
    fn score(&self, item: Option<&Item>, state: u32, decision: u32) -> f64 {
        self(item, state, decision)
    }
}
