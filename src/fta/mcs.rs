//! Minimal cut set engine. Computes, for one gate, the canonical
//! disjunctive-normal form of its sub-formula: a deterministically
//! ordered, duplicate-free, pairwise-incomparable list of `EventMask`s.
//!
//! The two building blocks are OR-combine (multiset union + absorption)
//! and AND-combine (pairwise union + absorption); gates fold their inputs
//! through one or the other. Absorption is what keeps the list minimal:
//! `A * (A + B) = A` falls out of it for free.

use std::collections::HashSet;
use std::rc::Rc;

use super::mask::{cutset_cmp, CutSet};
use super::model::{FaultTree, GateType, NodeRef};

pub fn minimal_cut_sets(tree: &FaultTree, gate_idx: usize) -> Vec<CutSet> {
    let gate = &tree.gates[gate_idx];

    let mut acc: Option<Vec<CutSet>> = None;
    for &input in &gate.inputs {
        let input_mcs = node_mcs(tree, input);
        acc = Some(match acc {
            None => (*input_mcs).clone(),
            Some(current) => match gate.gate_type {
                GateType::Or => or_combine(&current, &input_mcs),
                GateType::And => and_combine(&current, &input_mcs),
            },
        });
    }

    // The builder rejects gates with no inputs, so this only fires for a
    // gate that somehow slipped through without one.
    acc.unwrap_or_default()
}

fn node_mcs(tree: &FaultTree, node: NodeRef) -> Rc<Vec<CutSet>> {
    match node {
        NodeRef::Event(idx) => Rc::new(vec![CutSet::singleton(tree.events[idx].bit_index)]),
        NodeRef::Gate(idx) => tree.mcs(idx),
    }
}

/// `A ⊕ B`: multiset union, then absorb.
pub fn or_combine(a: &[CutSet], b: &[CutSet]) -> Vec<CutSet> {
    let mut combined = Vec::with_capacity(a.len() + b.len());
    combined.extend_from_slice(a);
    combined.extend_from_slice(b);
    absorb(combined)
}

/// `A ⊗ B`: every pairwise union, then absorb.
pub fn and_combine(a: &[CutSet], b: &[CutSet]) -> Vec<CutSet> {
    let mut combined = Vec::with_capacity(a.len() * b.len().max(1));
    for x in a {
        for y in b {
            combined.push(x.union(y));
        }
    }
    absorb(combined)
}

/// Dedup equal masks, then drop any mask that is a proper superset of a
/// smaller retained mask. Scanning in ascending (popcount, value) order
/// means every mask a candidate could be absorbed by has already been
/// decided by the time we reach it.
fn absorb(masks: Vec<CutSet>) -> Vec<CutSet> {
    let mut seen = HashSet::with_capacity(masks.len());
    let mut unique: Vec<CutSet> = masks.into_iter().filter(|m| seen.insert(m.clone())).collect();
    unique.sort_by(cutset_cmp);

    let mut minimal: Vec<CutSet> = Vec::with_capacity(unique.len());
    for candidate in unique {
        let absorbed = minimal.iter().any(|retained| retained.is_subset_of(&candidate));
        if !absorbed {
            minimal.push(candidate);
        }
    }
    minimal
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(bits: &[usize]) -> CutSet {
        bits.iter().fold(CutSet::empty(), |acc, &b| acc.union(&CutSet::singleton(b)))
    }

    #[test]
    fn or_combine_deduplicates_and_absorbs() {
        let a = vec![m(&[0]), m(&[0, 1])];
        let b = vec![m(&[0])];
        let result = or_combine(&a, &b);
        assert_eq!(result, vec![m(&[0])]);
    }

    #[test]
    fn and_combine_is_pairwise_union() {
        let a = vec![m(&[0]), m(&[1])];
        let b = vec![m(&[2])];
        let mut result = and_combine(&a, &b);
        result.sort_by(cutset_cmp);
        assert_eq!(result, vec![m(&[0, 2]), m(&[1, 2])]);
    }

    #[test]
    fn and_of_or_absorbs_to_the_common_term() {
        // A AND (A OR B) absorbs down to A.
        let or_ab = or_combine(&[m(&[0])], &[m(&[1])]);
        let result = and_combine(&or_ab, &[m(&[0])]);
        assert_eq!(result, vec![m(&[0])]);
    }

    #[test]
    fn idempotent_or_of_identical_lists() {
        let a = vec![m(&[0]), m(&[1, 2])];
        let result = or_combine(&a, &a);
        let mut expected = a;
        expected.sort_by(cutset_cmp);
        assert_eq!(result, expected);
    }
}
