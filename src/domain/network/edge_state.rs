use serde::Serialize;

/// Mutable per-edge record, addressed by `EdgeKey`.
///
/// `blocked` is user controlled and survives recalculation;
/// `flow` and `overloaded` are rewritten by every cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct EdgeState {
    pub blocked: bool,
    pub flow: f64,
    pub overloaded: bool,
}

impl EdgeState {
    pub fn clear(&mut self) {
        *self = EdgeState::default();
    }
}
