//! Prerequisite cycle detection
//!
//! Only hard prerequisites take part: co-requisites may legitimately point
//! at each other since both courses are taken in the same term. Detection
//! is a maintenance check over the whole catalog, and the same reachability
//! walk backs the pre-insertion check used before a new edge is accepted.

use crate::{
    error::{EngineError, Result},
    graph::CourseGraph,
};
use log::warn;
use models::{course::CourseId, requisite::PrerequisiteEdge};
use std::collections::{BTreeSet, VecDeque};

/// Finds back-edges in the hard prerequisite graph
///
/// Runs an iterative depth-first walk from every unvisited course in
/// ascending id order. An edge from a course to a prerequisite that is
/// already on the current path closes a cycle and is reported as
/// `(course, required_course)`.
///
/// # Returns
/// Every back-edge in discovery order; empty when the graph is acyclic
pub fn detect_cycles(graph: &CourseGraph) -> Vec<(CourseId, CourseId)> {
    let mut visited = BTreeSet::new();
    let mut on_path = BTreeSet::new();
    let mut back_edges = Vec::new();

    for start in graph.course_ids() {
        if !visited.insert(start) {
            continue;
        }

        on_path.insert(start);
        let mut stack = vec![(start, graph.hard_prerequisites(start).iter())];

        while let Some((node, children)) = stack.last_mut() {
            let node = *node;

            match children.next() {
                Some(&required) if on_path.contains(&required) => {
                    back_edges.push((node, required));
                }
                Some(&required) => {
                    if visited.insert(required) {
                        on_path.insert(required);
                        stack.push((required, graph.hard_prerequisites(required).iter()));
                    }
                }
                None => {
                    on_path.remove(&node);
                    stack.pop();
                }
            }
        }
    }

    if !back_edges.is_empty() {
        warn!(
            "Detected {} prerequisite back-edge(s): {:?}",
            back_edges.len(),
            back_edges
        );
    }

    back_edges
}

/// Fails with [`EngineError::CyclicPrerequisites`] when the graph has a cycle
pub fn ensure_acyclic(graph: &CourseGraph) -> Result<()> {
    let back_edges = detect_cycles(graph);
    if back_edges.is_empty() {
        Ok(())
    } else {
        Err(EngineError::CyclicPrerequisites(back_edges))
    }
}

/// Whether adding `edge` to `graph` would close a hard prerequisite cycle
///
/// A self loop always does. A co-requisite never does. A hard edge
/// `course -> required` closes a cycle exactly when `course` is already a
/// transitive hard prerequisite of `required`.
pub fn would_create_cycle(graph: &CourseGraph, edge: &PrerequisiteEdge) -> bool {
    if edge.is_self_loop() {
        return true;
    }
    if !edge.is_hard() {
        return false;
    }

    let mut visited = BTreeSet::from([edge.required]);
    let mut queue = VecDeque::from([edge.required]);

    while let Some(current) = queue.pop_front() {
        for &prerequisite in graph.hard_prerequisites(current) {
            if prerequisite == edge.course {
                return true;
            }
            if visited.insert(prerequisite) {
                queue.push_back(prerequisite);
            }
        }
    }

    false
}

/// Checks a new requisite edge before it is stored
///
/// # Returns
/// `Ok(())` if the edge keeps the catalog acyclic, otherwise the matching
/// data-integrity error with the rejected edge as the offending pair
pub fn validate_new_edge(graph: &CourseGraph, edge: &PrerequisiteEdge) -> Result<()> {
    if edge.is_self_loop() {
        return Err(EngineError::SelfReferentialPrerequisite(edge.course));
    }
    if would_create_cycle(graph, edge) {
        return Err(EngineError::CyclicPrerequisites(vec![(
            edge.course,
            edge.required,
        )]));
    }

    Ok(())
}
