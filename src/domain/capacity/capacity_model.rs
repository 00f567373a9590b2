use std::collections::HashMap;

use crate::domain::network::edge::EdgeKey;

/// Per original edge flow under the idealised "no blocks, main edges only"
/// assignment of the current cycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BaselineFlow {
    flows: HashMap<EdgeKey, f64>,
}

impl BaselineFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: EdgeKey, amount: f64) {
        *self.flows.entry(key).or_insert(0.0) += amount;
    }

    pub fn get(&self, key: &EdgeKey) -> f64 {
        self.flows.get(key).copied().unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&EdgeKey, &f64)> {
        self.flows.iter()
    }

    pub fn len(&self) -> usize {
        self.flows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flows.is_empty()
    }

    /// Element at index `len / 2` of the sorted strictly positive flows.
    pub fn positive_median(&self) -> Option<f64> {
        let mut values: Vec<f64> = self.flows.values().copied().filter(|v| *v > 0.0).collect();
        if values.is_empty() {
            return None;
        }

        values.sort_by(|a, b| a.total_cmp(b));
        Some(values[values.len() / 2])
    }
}

/// Logical capacity of an edge derived from the baseline load.
///
/// An edge that carries baseline traffic gets `baseline * capacity_factor`.
/// Idle edges are sized from the network's overall load level
/// (`median * idle_share * capacity_factor`), so the first unit of detour
/// traffic does not overload them. Nothing goes below `minimum_capacity`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapacityModel {
    pub capacity_factor: f64,
    pub minimum_capacity: f64,
    pub idle_share: f64,
}

impl Default for CapacityModel {
    fn default() -> Self {
        CapacityModel { capacity_factor: 1.35, minimum_capacity: 8.0, idle_share: 0.6 }
    }
}

impl CapacityModel {
    pub fn capacity_of(&self, key: &EdgeKey, baseline: &BaselineFlow) -> f64 {
        let median = baseline.positive_median().unwrap_or(self.minimum_capacity);
        self.capacity_for(baseline.get(key), median)
    }

    /// Computes the median once and returns a table valid for one cycle.
    pub fn evaluate<'a>(&self, baseline: &'a BaselineFlow) -> CapacityTable<'a> {
        let median = baseline.positive_median().unwrap_or(self.minimum_capacity);
        CapacityTable { model: *self, baseline, median }
    }

    fn capacity_for(&self, baseline_flow: f64, median: f64) -> f64 {
        let reference = if baseline_flow > 0.0 { baseline_flow } else { median * self.idle_share };
        self.minimum_capacity.max(reference * self.capacity_factor)
    }

    /// Overloaded strictly above capacity; flow equal to capacity is fine.
    pub fn is_overloaded(flow: f64, capacity: f64) -> bool {
        flow > capacity
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CapacityTable<'a> {
    model: CapacityModel,
    baseline: &'a BaselineFlow,
    median: f64,
}

impl CapacityTable<'_> {
    pub fn capacity_of(&self, key: &EdgeKey) -> f64 {
        self.model.capacity_for(self.baseline.get(key), self.median)
    }
}
