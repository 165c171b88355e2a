//! The validated, immutable fault tree and its lazily memoised derived
//! results. Construction happens once, in [`crate::fta::builder`];
//! everything here is read-only except for interior-mutable caches.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::mask::CutSet;
use super::mcs;
use super::quantity::{self, GateQuantity};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Probability,
    Rate,
}

/// An event's own quantity: exactly one of a dimensionless probability or
/// a per-unit-time rate.
#[derive(Debug, Clone, Copy)]
pub enum Quantity {
    Probability(f64),
    Rate(f64),
}

impl Quantity {
    pub fn value(&self) -> f64 {
        match *self {
            Quantity::Probability(v) | Quantity::Rate(v) => v,
        }
    }

    pub fn dimension(&self) -> Dimension {
        match self {
            Quantity::Probability(_) => Dimension::Probability,
            Quantity::Rate(_) => Dimension::Rate,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Event {
    pub id: String,
    /// Ordinal position in declaration order; the bit this event occupies
    /// in every `EventMask`.
    pub bit_index: usize,
    pub label: Option<String>,
    pub comment: Option<String>,
    pub quantity: Quantity,
}

impl Event {
    pub fn label_or_id(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateType {
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeRef {
    Event(usize),
    Gate(usize),
}

#[derive(Debug, Clone)]
pub struct Gate {
    pub id: String,
    pub gate_type: GateType,
    /// Input identifiers in declared order, before resolution.
    pub input_ids: Vec<String>,
    /// The same inputs, resolved to events or gates, same order.
    pub inputs: Vec<NodeRef>,
    pub label: Option<String>,
    pub comment: Option<String>,
    pub is_paged: bool,
}

impl Gate {
    pub fn label_or_id(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.id)
    }
}

/// The top-level, immutable container. Queries memoise their results
/// the first time they are requested; dropping a `FaultTree` releases the
/// tree and every cached computation with it.
pub struct FaultTree {
    pub time_unit: Option<String>,
    pub events: Vec<Event>,
    pub gates: Vec<Gate>,
    pub event_by_id: HashMap<String, usize>,
    pub gate_by_id: HashMap<String, usize>,

    mcs_cache: RefCell<HashMap<usize, Rc<Vec<CutSet>>>>,
    quantity_cache: RefCell<HashMap<usize, GateQuantity>>,
    contribution_cache: RefCell<HashMap<usize, Rc<HashMap<usize, f64>>>>,
}

impl FaultTree {
    pub(crate) fn new(
        time_unit: Option<String>,
        events: Vec<Event>,
        gates: Vec<Gate>,
        event_by_id: HashMap<String, usize>,
        gate_by_id: HashMap<String, usize>,
    ) -> Self {
        Self {
            time_unit,
            events,
            gates,
            event_by_id,
            gate_by_id,
            mcs_cache: RefCell::new(HashMap::new()),
            quantity_cache: RefCell::new(HashMap::new()),
            contribution_cache: RefCell::new(HashMap::new()),
        }
    }

    /// Gates that are not an input of any other gate.
    pub fn top_gates(&self) -> Vec<usize> {
        let mut referenced = vec![false; self.gates.len()];
        for gate in &self.gates {
            for input in &gate.inputs {
                if let NodeRef::Gate(idx) = input {
                    referenced[*idx] = true;
                }
            }
        }
        (0..self.gates.len()).filter(|&idx| !referenced[idx]).collect()
    }

    /// Gate indices in dependency order, leaves first. The builder has
    /// already rejected cycles, so the sort never fails.
    pub fn topological_gate_order(&self) -> Vec<usize> {
        use petgraph::algo::toposort;
        use petgraph::graph::DiGraph;

        let mut graph = DiGraph::<usize, ()>::with_capacity(self.gates.len(), 0);
        let nodes: Vec<_> = (0..self.gates.len()).map(|i| graph.add_node(i)).collect();
        for (gate_idx, gate) in self.gates.iter().enumerate() {
            for input in &gate.inputs {
                if let NodeRef::Gate(dep_idx) = input {
                    graph.add_edge(nodes[*dep_idx], nodes[gate_idx], ());
                }
            }
        }

        toposort(&graph, None)
            .expect("builder rejects cyclic gate graphs")
            .into_iter()
            .map(|node| graph[node])
            .collect()
    }

    /// Minimal cut sets of `gate_idx`, computed once and memoised
    /// thereafter, sorted deterministically (popcount, then mask value).
    pub fn mcs(&self, gate_idx: usize) -> Rc<Vec<CutSet>> {
        if let Some(cached) = self.mcs_cache.borrow().get(&gate_idx) {
            return Rc::clone(cached);
        }
        let computed = Rc::new(mcs::minimal_cut_sets(self, gate_idx));
        self.mcs_cache.borrow_mut().insert(gate_idx, Rc::clone(&computed));
        computed
    }

    /// Aggregated quantity of `gate_idx` under the rare-event approximation.
    pub fn quantity(&self, gate_idx: usize) -> GateQuantity {
        if let Some(cached) = self.quantity_cache.borrow().get(&gate_idx) {
            return *cached;
        }
        let mcs = self.mcs(gate_idx);
        let computed = quantity::gate_quantity(self, &mcs);
        self.quantity_cache.borrow_mut().insert(gate_idx, computed);
        computed
    }

    /// `contribution(e, gate_idx)` for every event appearing in some MCS of `gate_idx`.
    pub fn contributions(&self, gate_idx: usize) -> Rc<HashMap<usize, f64>> {
        if let Some(cached) = self.contribution_cache.borrow().get(&gate_idx) {
            return Rc::clone(cached);
        }
        let mcs = self.mcs(gate_idx);
        let computed = Rc::new(quantity::contributions(self, &mcs));
        self.contribution_cache.borrow_mut().insert(gate_idx, Rc::clone(&computed));
        computed
    }

    /// `importance(e, gate_idx) = contribution(e, gate_idx) / quantity(gate_idx)`.
    pub fn importance(&self, gate_idx: usize, event_idx: usize) -> f64 {
        let contribution = self.contributions(gate_idx).get(&event_idx).copied().unwrap_or(0.0);
        let gate_quantity = self.quantity(gate_idx).value;
        quantity::importance(contribution, gate_quantity)
    }
}
