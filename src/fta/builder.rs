//! Validator & builder: folds the parser's raw declarations into a
//! validated, immutable [`FaultTree`] — resolving gate inputs, checking
//! structural invariants, and assigning each event its bit index.

use std::collections::HashMap;

use super::ast::{Declarations, RawObject, RawProperty};
use super::error::FtaError;
use super::lexer::HeaderKind;
use super::model::{Event, FaultTree, Gate, GateType, NodeRef, Quantity};

pub fn build(decls: Declarations) -> Result<FaultTree, FtaError> {
    let time_unit = decls.global.time_unit.as_ref().map(|p| p.value.clone());

    let mut events = Vec::new();
    let mut event_by_id = HashMap::new();
    let mut gate_objs: Vec<&RawObject> = Vec::new();

    for obj in &decls.objects {
        match obj.kind {
            HeaderKind::Event => {
                let event = build_event(obj, events.len())?;
                event_by_id.insert(event.id.clone(), events.len());
                events.push(event);
            }
            HeaderKind::Gate => gate_objs.push(obj),
        }
    }

    let mut gate_by_id = HashMap::new();
    for (i, obj) in gate_objs.iter().enumerate() {
        gate_by_id.insert(obj.id.clone(), i);
    }

    let mut gates = Vec::with_capacity(gate_objs.len());
    let mut gate_lines = Vec::with_capacity(gate_objs.len());
    for obj in &gate_objs {
        gates.push(build_gate(obj, &event_by_id, &gate_by_id)?);
        gate_lines.push(obj.line);
    }

    detect_cycle(&gates, &gate_lines)?;

    Ok(FaultTree::new(time_unit, events, gates, event_by_id, gate_by_id))
}

fn build_event(obj: &RawObject, bit_index: usize) -> Result<Event, FtaError> {
    let label = obj.get("label").map(|p| p.value.clone());
    let comment = obj.get("comment").map(|p| p.value.clone());

    let quantity = match (obj.get("probability"), obj.get("rate")) {
        (Some(p), None) => Quantity::Probability(parse_probability(p)?),
        (None, Some(r)) => Quantity::Rate(parse_rate(r)?),
        (Some(p), Some(_)) => {
            return Err(FtaError::value(p.line, format!("event {:?} declares both probability and rate", obj.id)))
        }
        (None, None) => {
            return Err(FtaError::value(obj.line, format!("event {:?} has neither probability nor rate", obj.id)))
        }
    };

    Ok(Event { id: obj.id.clone(), bit_index, label, comment, quantity })
}

fn parse_probability(prop: &RawProperty) -> Result<f64, FtaError> {
    let value: f64 = prop
        .value
        .parse()
        .map_err(|_| FtaError::syntax(prop.line, format!("malformed number: {:?}", prop.value)))?;

    if value.is_nan() {
        return Ok(value);
    }
    if !(0.0..=1.0).contains(&value) {
        return Err(FtaError::value(prop.line, format!("probability {} is out of range [0, 1]", value)));
    }
    Ok(value)
}

fn parse_rate(prop: &RawProperty) -> Result<f64, FtaError> {
    let value: f64 = prop
        .value
        .parse()
        .map_err(|_| FtaError::syntax(prop.line, format!("malformed number: {:?}", prop.value)))?;

    if value.is_nan() {
        return Ok(value);
    }
    if value < 0.0 {
        return Err(FtaError::value(prop.line, format!("rate {} is out of range [0, inf]", value)));
    }
    Ok(value)
}

fn build_gate(
    obj: &RawObject,
    event_by_id: &HashMap<String, usize>,
    gate_by_id: &HashMap<String, usize>,
) -> Result<Gate, FtaError> {
    let label = obj.get("label").map(|p| p.value.clone());
    let comment = obj.get("comment").map(|p| p.value.clone());

    let type_prop = obj
        .get("type")
        .ok_or_else(|| FtaError::value(obj.line, format!("gate {:?} is missing type", obj.id)))?;
    let gate_type = match type_prop.value.as_str() {
        "AND" => GateType::And,
        "OR" => GateType::Or,
        other => return Err(FtaError::value(type_prop.line, format!("gate type must be AND or OR, got {:?}", other))),
    };

    let inputs_prop = obj
        .get("inputs")
        .ok_or_else(|| FtaError::value(obj.line, format!("gate {:?} is missing inputs", obj.id)))?;
    let input_ids: Vec<String> = inputs_prop
        .value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if input_ids.is_empty() {
        return Err(FtaError::structure(inputs_prop.line, format!("gate {:?} has an empty inputs list", obj.id)));
    }

    let mut inputs = Vec::with_capacity(input_ids.len());
    for id in &input_ids {
        if let Some(&idx) = event_by_id.get(id) {
            inputs.push(NodeRef::Event(idx));
        } else if let Some(&idx) = gate_by_id.get(id) {
            inputs.push(NodeRef::Gate(idx));
        } else {
            return Err(FtaError::reference(
                inputs_prop.line,
                format!("gate {:?} references undefined id {:?}", obj.id, id),
            ));
        }
    }

    let is_paged = match obj.get("is_paged") {
        None => false,
        Some(p) => match p.value.as_str() {
            "True" => true,
            "False" => false,
            other => return Err(FtaError::value(p.line, format!("is_paged must be True or False, got {:?}", other))),
        },
    };

    Ok(Gate { id: obj.id.clone(), gate_type, input_ids, inputs, label, comment, is_paged })
}

#[derive(Clone, Copy, PartialEq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

/// DFS cycle detection: a back-edge to a gate still on the current path
/// names a cycle, reported as the full participant chain.
fn detect_cycle(gates: &[Gate], gate_lines: &[usize]) -> Result<(), FtaError> {
    let mut marks = vec![Mark::Unvisited; gates.len()];
    let mut path = Vec::new();

    for start in 0..gates.len() {
        if marks[start] == Mark::Unvisited {
            visit(start, gates, gate_lines, &mut marks, &mut path)?;
        }
    }
    Ok(())
}

fn visit(
    node: usize,
    gates: &[Gate],
    gate_lines: &[usize],
    marks: &mut [Mark],
    path: &mut Vec<usize>,
) -> Result<(), FtaError> {
    marks[node] = Mark::InProgress;
    path.push(node);

    for input in &gates[node].inputs {
        if let NodeRef::Gate(next) = *input {
            match marks[next] {
                Mark::Unvisited => visit(next, gates, gate_lines, marks, path)?,
                Mark::InProgress => {
                    let start = path.iter().position(|&n| n == next).expect("back-edge target is on the path");
                    let cycle: Vec<&str> = path[start..].iter().map(|&i| gates[i].id.as_str()).collect();
                    return Err(FtaError::structure(
                        gate_lines[node],
                        format!("cycle among gates: {} -> {}", cycle.join(" -> "), gates[next].id),
                    ));
                }
                Mark::Done => {}
            }
        }
    }

    path.pop();
    marks[node] = Mark::Done;
    Ok(())
}
