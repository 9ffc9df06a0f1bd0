use crate::graph::CourseGraph;
use log::warn;
use models::{course::CourseId, grade::Grade};
use std::collections::{BTreeMap, BTreeSet};

/// Candidates the student can select right now
///
/// A candidate is eligible when every hard prerequisite is in `passed` and
/// the candidate itself is neither passed nor already selected.
/// Co-requisites never block. Candidates missing from the graph are left out.
pub fn eligible_courses(
    graph: &CourseGraph,
    candidates: &BTreeSet<CourseId>,
    passed: &BTreeSet<CourseId>,
    selected: &BTreeSet<CourseId>,
) -> BTreeSet<CourseId> {
    eligible_by(graph, candidates, selected, |course| passed.contains(&course), |_, required| {
        passed.contains(&required)
    })
}

/// Like [`eligible_courses`], but also enforces per-edge minimum grades
///
/// # Arguments
/// * `passed_grades` - Best grade for every course the student has passed
pub fn eligible_courses_with_grades(
    graph: &CourseGraph,
    candidates: &BTreeSet<CourseId>,
    passed_grades: &BTreeMap<CourseId, Grade>,
    selected: &BTreeSet<CourseId>,
) -> BTreeSet<CourseId> {
    eligible_by(
        graph,
        candidates,
        selected,
        |course| passed_grades.contains_key(&course),
        |course, required| {
            passed_grades.get(&required).is_some_and(|&grade| {
                graph
                    .min_grade(course, required)
                    .is_none_or(|threshold| grade >= threshold)
            })
        },
    )
}

/// Hard prerequisites of `course` that are not in `passed`
pub fn missing_prerequisites(
    graph: &CourseGraph,
    course: CourseId,
    passed: &BTreeSet<CourseId>,
) -> Vec<CourseId> {
    graph
        .hard_prerequisites(course)
        .iter()
        .filter(|required| !passed.contains(required))
        .copied()
        .collect()
}

fn eligible_by(
    graph: &CourseGraph,
    candidates: &BTreeSet<CourseId>,
    selected: &BTreeSet<CourseId>,
    is_passed: impl Fn(CourseId) -> bool,
    satisfies: impl Fn(CourseId, CourseId) -> bool,
) -> BTreeSet<CourseId> {
    candidates
        .iter()
        .copied()
        .filter(|&course| {
            if !graph.contains(course) {
                warn!("Candidate course {course} is not in the catalog graph, skipping");
                return false;
            }

            !is_passed(course)
                && !selected.contains(&course)
                && graph
                    .hard_prerequisites(course)
                    .iter()
                    .all(|&required| satisfies(course, required))
        })
        .collect()
}
