//! Result model: a pure, serializable snapshot of every computed result,
//! built once by walking the tree leaves-first. Renderer and reporting
//! collaborators consume this value; they never touch `FaultTree` directly.

use std::collections::HashMap;

use serde::Serialize;

use super::model::{Dimension, FaultTree};

#[derive(Debug, Clone, Serialize)]
pub struct CutSetReport {
    pub event_ids: Vec<String>,
    pub order: u32,
    pub quantity: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct GateReport {
    pub id: String,
    pub label: String,
    pub gate_type: String,
    pub is_paged: bool,
    pub input_ids: Vec<String>,
    pub mcs: Vec<CutSetReport>,
    pub quantity_value: f64,
    pub quantity_unit: String,
    pub contributions: HashMap<String, f64>,
    pub importances: HashMap<String, f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EventReport {
    pub id: String,
    pub label: String,
    pub quantity_kind: String,
    pub quantity_value: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub time_unit: Option<String>,
    pub events: Vec<EventReport>,
    pub gates: Vec<GateReport>,
    pub top_gate_ids: Vec<String>,
}

fn quantity_unit(dimension: Dimension, time_unit: &Option<String>) -> String {
    match dimension {
        Dimension::Probability => "probability".to_string(),
        Dimension::Rate => {
            let unit = time_unit.as_deref().unwrap_or("t");
            format!("rate({}^-1)", unit)
        }
    }
}

/// Builds the full report eagerly, in leaves-first order, so every gate's
/// memoised results are already warm by the time its report is written.
pub fn build_report(tree: &FaultTree) -> AnalysisReport {
    let events = tree
        .events
        .iter()
        .map(|event| EventReport {
            id: event.id.clone(),
            label: event.label_or_id().to_string(),
            quantity_kind: match event.quantity.dimension() {
                Dimension::Probability => "probability".to_string(),
                Dimension::Rate => "rate".to_string(),
            },
            quantity_value: event.quantity.value(),
        })
        .collect();

    let mut gates = vec![None; tree.gates.len()];
    for gate_idx in tree.topological_gate_order() {
        gates[gate_idx] = Some(build_gate_report(tree, gate_idx));
    }
    let gates: Vec<GateReport> = gates.into_iter().map(|g| g.expect("every gate visited")).collect();

    let top_gate_ids = tree.top_gates().into_iter().map(|idx| tree.gates[idx].id.clone()).collect();

    AnalysisReport { time_unit: tree.time_unit.clone(), events, gates, top_gate_ids }
}

fn build_gate_report(tree: &FaultTree, gate_idx: usize) -> GateReport {
    let gate = &tree.gates[gate_idx];
    let mcs = tree.mcs(gate_idx);
    let gate_quantity = tree.quantity(gate_idx);
    let contributions = tree.contributions(gate_idx);

    let mcs_reports = mcs
        .iter()
        .map(|cutset| CutSetReport {
            event_ids: cutset.bits().map(|bit| tree.events[bit].id.clone()).collect(),
            order: cutset.popcount(),
            quantity: super::quantity::cutset_quantity(tree, cutset).value,
        })
        .collect();

    let mut contribution_by_id = HashMap::with_capacity(contributions.len());
    let mut importance_by_id = HashMap::with_capacity(contributions.len());
    for (&event_idx, &contribution) in contributions.iter() {
        let id = tree.events[event_idx].id.clone();
        importance_by_id.insert(id.clone(), tree.importance(gate_idx, event_idx));
        contribution_by_id.insert(id, contribution);
    }

    GateReport {
        id: gate.id.clone(),
        label: gate.label_or_id().to_string(),
        gate_type: match gate.gate_type {
            super::model::GateType::And => "AND".to_string(),
            super::model::GateType::Or => "OR".to_string(),
        },
        is_paged: gate.is_paged,
        input_ids: gate.input_ids.clone(),
        mcs: mcs_reports,
        quantity_value: gate_quantity.value,
        quantity_unit: quantity_unit(gate_quantity.dimension, &tree.time_unit),
        contributions: contribution_by_id,
        importances: importance_by_id,
    }
}
