use crate::error::{EngineError, Result};
use log::debug;
use models::{
    course::{Course, CourseId},
    grade::Grade,
    requisite::{PrerequisiteEdge, RequisiteKind},
};
use std::collections::{BTreeMap, BTreeSet};

static EMPTY: BTreeSet<CourseId> = BTreeSet::new();

/// Requisite links of a single course, split by kind
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Adjacency {
    hard_prerequisites: BTreeSet<CourseId>,
    corequisites: BTreeSet<CourseId>,
    hard_dependents: BTreeSet<CourseId>,
    co_dependents: BTreeSet<CourseId>,
    /// Grade thresholds keyed by required course and edge kind
    min_grades: BTreeMap<(CourseId, RequisiteKind), Grade>,
}

/// Read-only requisite graph over a set of courses
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseGraph {
    courses: BTreeMap<CourseId, Course>,
    adjacency: BTreeMap<CourseId, Adjacency>,
    edge_count: usize,
}

/// Builds the requisite graph for `courses`
///
/// Edges with an endpoint outside `courses` are skipped, and repeated edges
/// collapse into one. When duplicates disagree on the minimum grade, the
/// strictest threshold is kept.
///
/// # Arguments
/// * `courses` - The course set the graph covers (a chart, or the whole catalog)
/// * `edges` - Requisite relations, possibly covering more courses than `courses`
///
/// # Returns
/// The graph, or [`EngineError::SelfReferentialPrerequisite`] if any edge is a self loop
pub fn build_graph(courses: &[Course], edges: &[PrerequisiteEdge]) -> Result<CourseGraph> {
    let mut graph = CourseGraph {
        courses: courses
            .iter()
            .map(|course| (course.id, course.clone()))
            .collect(),
        adjacency: courses
            .iter()
            .map(|course| (course.id, Adjacency::default()))
            .collect(),
        edge_count: 0,
    };

    let mut skipped = 0;
    for edge in edges {
        if edge.is_self_loop() {
            return Err(EngineError::SelfReferentialPrerequisite(edge.course));
        }

        if !graph.contains(edge.course) || !graph.contains(edge.required) {
            skipped += 1;
            continue;
        }

        graph.insert_edge(edge);
    }

    if skipped > 0 {
        debug!("Skipped {skipped} requisite edge(s) referencing courses outside the graph");
    }
    debug!(
        "Built course graph with {} course(s) and {} edge(s)",
        graph.len(),
        graph.edge_count
    );

    Ok(graph)
}

impl CourseGraph {
    fn insert_edge(&mut self, edge: &PrerequisiteEdge) {
        let inserted = {
            let Some(node) = self.adjacency.get_mut(&edge.course) else {
                return;
            };

            if let Some(grade) = edge.min_grade {
                node.min_grades
                    .entry((edge.required, edge.kind))
                    .and_modify(|current| *current = (*current).max(grade))
                    .or_insert(grade);
            }

            match edge.kind {
                RequisiteKind::Prerequisite => node.hard_prerequisites.insert(edge.required),
                RequisiteKind::Corequisite => node.corequisites.insert(edge.required),
            }
        };

        if let Some(required) = self.adjacency.get_mut(&edge.required) {
            match edge.kind {
                RequisiteKind::Prerequisite => required.hard_dependents.insert(edge.course),
                RequisiteKind::Corequisite => required.co_dependents.insert(edge.course),
            };
        }

        if inserted {
            self.edge_count += 1;
        }
    }

    pub fn contains(&self, id: CourseId) -> bool {
        self.courses.contains_key(&id)
    }

    pub fn course(&self, id: CourseId) -> Option<&Course> {
        self.courses.get(&id)
    }

    /// Course ids in ascending order
    pub fn course_ids(&self) -> impl Iterator<Item = CourseId> + '_ {
        self.courses.keys().copied()
    }

    pub fn courses(&self) -> impl Iterator<Item = &Course> {
        self.courses.values()
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Number of distinct edges kept in the graph
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Courses that must be passed before `id`
    pub fn hard_prerequisites(&self, id: CourseId) -> &BTreeSet<CourseId> {
        self.adjacency
            .get(&id)
            .map_or(&EMPTY, |node| &node.hard_prerequisites)
    }

    /// Courses that may be taken alongside `id`
    pub fn corequisites(&self, id: CourseId) -> &BTreeSet<CourseId> {
        self.adjacency
            .get(&id)
            .map_or(&EMPTY, |node| &node.corequisites)
    }

    /// Courses that list `id` as a hard prerequisite
    pub fn hard_dependents(&self, id: CourseId) -> &BTreeSet<CourseId> {
        self.adjacency
            .get(&id)
            .map_or(&EMPTY, |node| &node.hard_dependents)
    }

    /// Courses that list `id` as a co-requisite
    pub fn co_dependents(&self, id: CourseId) -> &BTreeSet<CourseId> {
        self.adjacency
            .get(&id)
            .map_or(&EMPTY, |node| &node.co_dependents)
    }

    /// Minimum grade `course` demands in its hard prerequisite `required`, if one was set
    pub fn min_grade(&self, course: CourseId, required: CourseId) -> Option<Grade> {
        self.requisite_min_grade(course, required, RequisiteKind::Prerequisite)
    }

    /// Minimum grade attached to the `kind` edge from `course` to `required`
    pub fn requisite_min_grade(
        &self,
        course: CourseId,
        required: CourseId,
        kind: RequisiteKind,
    ) -> Option<Grade> {
        self.adjacency
            .get(&course)
            .and_then(|node| node.min_grades.get(&(required, kind)))
            .copied()
    }

    /// Hard and co-requisite edges of `id`, rebuilt as records
    pub fn prerequisite_edges(&self, id: CourseId) -> Vec<PrerequisiteEdge> {
        let hard = self.hard_prerequisites(id).iter().map(|&required| PrerequisiteEdge {
            course: id,
            required,
            kind: RequisiteKind::Prerequisite,
            min_grade: self.min_grade(id, required),
        });
        let co = self.corequisites(id).iter().map(|&required| PrerequisiteEdge {
            course: id,
            required,
            kind: RequisiteKind::Corequisite,
            min_grade: self.requisite_min_grade(id, required, RequisiteKind::Corequisite),
        });

        hard.chain(co).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Course> {
        vec![
            Course::new(1, "MATH101", "Calculus I", 3),
            Course::new(2, "MATH201", "Calculus II", 3),
            Course::new(3, "PHYS101", "Physics I", 3),
            Course::new(4, "PHYS101L", "Physics Lab", 1),
        ]
    }

    #[test]
    fn test_build_graph_queries() {
        let edges = vec![
            PrerequisiteEdge::hard(CourseId(2), CourseId(1)),
            PrerequisiteEdge::hard(CourseId(3), CourseId(1)),
            PrerequisiteEdge::corequisite(CourseId(4), CourseId(3)),
        ];
        let graph = build_graph(&catalog(), &edges).unwrap();

        assert_eq!(graph.len(), 4);
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(
            graph.hard_dependents(CourseId(1)),
            &BTreeSet::from([CourseId(2), CourseId(3)])
        );
        assert_eq!(
            graph.hard_prerequisites(CourseId(2)),
            &BTreeSet::from([CourseId(1)])
        );
        assert!(graph.hard_prerequisites(CourseId(4)).is_empty());
        assert_eq!(graph.corequisites(CourseId(4)), &BTreeSet::from([CourseId(3)]));
        assert_eq!(graph.co_dependents(CourseId(3)), &BTreeSet::from([CourseId(4)]));
    }

    #[test]
    fn test_build_graph_without_edges() {
        let graph = build_graph(&catalog(), &[]).unwrap();

        assert_eq!(graph.edge_count(), 0);
        assert!(graph.course_ids().all(|id| graph.hard_prerequisites(id).is_empty()));

        let empty = build_graph(&[], &[]).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_duplicate_edges_are_idempotent() {
        let edge = PrerequisiteEdge::hard(CourseId(2), CourseId(1));
        let once = build_graph(&catalog(), &[edge.clone()]).unwrap();
        let twice = build_graph(&catalog(), &[edge.clone(), edge]).unwrap();

        assert_eq!(once, twice);
        assert_eq!(twice.edge_count(), 1);
    }

    #[test]
    fn test_duplicate_edges_keep_strictest_grade() {
        let edges = vec![
            PrerequisiteEdge::hard(CourseId(2), CourseId(1)).with_min_grade(Grade::C),
            PrerequisiteEdge::hard(CourseId(2), CourseId(1)).with_min_grade(Grade::B),
            PrerequisiteEdge::hard(CourseId(2), CourseId(1)),
        ];
        let graph = build_graph(&catalog(), &edges).unwrap();

        assert_eq!(graph.min_grade(CourseId(2), CourseId(1)), Some(Grade::B));
        assert_eq!(graph.min_grade(CourseId(3), CourseId(1)), None);
        assert_eq!(
            graph.prerequisite_edges(CourseId(2)),
            vec![PrerequisiteEdge::hard(CourseId(2), CourseId(1)).with_min_grade(Grade::B)]
        );
    }

    #[test]
    fn test_grade_thresholds_kept_per_edge_kind() {
        let edges = vec![
            PrerequisiteEdge::corequisite(CourseId(4), CourseId(3)).with_min_grade(Grade::A),
            PrerequisiteEdge::hard(CourseId(4), CourseId(3)),
        ];
        let graph = build_graph(&catalog(), &edges).unwrap();

        assert_eq!(graph.min_grade(CourseId(4), CourseId(3)), None);
        assert_eq!(
            graph.requisite_min_grade(CourseId(4), CourseId(3), RequisiteKind::Corequisite),
            Some(Grade::A)
        );
        assert_eq!(
            graph.prerequisite_edges(CourseId(4)),
            vec![
                PrerequisiteEdge::hard(CourseId(4), CourseId(3)),
                PrerequisiteEdge::corequisite(CourseId(4), CourseId(3)).with_min_grade(Grade::A),
            ]
        );
    }

    #[test]
    fn test_edges_outside_course_set_are_skipped() {
        let edges = vec![
            PrerequisiteEdge::hard(CourseId(2), CourseId(99)),
            PrerequisiteEdge::hard(CourseId(99), CourseId(1)),
        ];
        let graph = build_graph(&catalog(), &edges).unwrap();

        assert_eq!(graph.edge_count(), 0);
        assert!(graph.hard_prerequisites(CourseId(2)).is_empty());
        assert!(graph.hard_dependents(CourseId(1)).is_empty());
        assert!(graph.hard_dependents(CourseId(99)).is_empty());
    }

    #[test]
    fn test_self_loop_rejected() {
        let edges = vec![PrerequisiteEdge::hard(CourseId(1), CourseId(1))];
        assert_eq!(
            build_graph(&catalog(), &edges),
            Err(EngineError::SelfReferentialPrerequisite(CourseId(1)))
        );

        let co_loop = vec![PrerequisiteEdge::corequisite(CourseId(3), CourseId(3))];
        assert!(build_graph(&catalog(), &co_loop).is_err());
    }
}
