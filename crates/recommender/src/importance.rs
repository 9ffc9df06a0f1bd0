use crate::graph::CourseGraph;
use models::course::CourseId;
use std::collections::{BTreeMap, BTreeSet, VecDeque};

/// Scores every candidate by how many other candidates depend on it
///
/// The score is the number of distinct candidates reachable from the course
/// by following hard dependents, direct and indirect alike. Foundational
/// courses that gate long chains score higher regardless of credit weight.
/// Ties are left to the ranker.
pub fn score_importance(
    graph: &CourseGraph,
    candidates: &BTreeSet<CourseId>,
) -> BTreeMap<CourseId, u32> {
    candidates
        .iter()
        .map(|&course| {
            let reachable = transitive_dependents(graph, course, candidates);
            (course, reachable.len() as u32)
        })
        .collect()
}

/// Courses in `within` that transitively require `course`
///
/// Breadth-first over hard dependents, never leaving `within` and never
/// revisiting a course, so it terminates even on cyclic data. `course`
/// itself is never part of the result.
pub fn transitive_dependents(
    graph: &CourseGraph,
    course: CourseId,
    within: &BTreeSet<CourseId>,
) -> BTreeSet<CourseId> {
    let mut visited = BTreeSet::from([course]);
    let mut queue = VecDeque::from([course]);

    while let Some(current) = queue.pop_front() {
        for &dependent in graph.hard_dependents(current) {
            if within.contains(&dependent) && visited.insert(dependent) {
                queue.push_back(dependent);
            }
        }
    }

    visited.remove(&course);
    visited
}
