use crate::{
    candidates::CandidatePool,
    error::Result,
    graph::CourseGraph,
    policy::PassPolicy,
    ranker::{RankingPolicy, RecommendationSet, recommend_with_grades},
};
use log::debug;
use models::{
    course::CourseId,
    grade::Grade,
    history::{HistoryRecord, StudentId, selected_courses, terms_taken},
    snapshot::StudentSnapshot,
};
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use std::collections::{BTreeMap, BTreeSet};

/// Chart semester a student is about to enter
///
/// Every distinct term with a history record counts as one completed semester.
pub fn next_semester(history: &[HistoryRecord]) -> u32 {
    terms_taken(history).len() as u32 + 1
}

/// Everything the ranker needs to know about one student
#[derive(Debug, Clone, PartialEq)]
pub struct StudentRequest {
    pub student: StudentId,
    /// Passed courses with the grade that counts, per the pass policy
    pub passed: BTreeMap<CourseId, Grade>,
    pub selected: BTreeSet<CourseId>,
    pub target_semester: u32,
}

impl StudentRequest {
    /// Derives passed and selected sets from an exported student record
    ///
    /// Selections are taken from `upcoming_term`, or from the latest term any
    /// selection was made for when the snapshot has none.
    pub fn from_snapshot(snapshot: &StudentSnapshot, pass_policy: &PassPolicy) -> Self {
        let term = snapshot
            .upcoming_term
            .or_else(|| snapshot.selections.iter().map(|selection| selection.term).max());
        let selected = term
            .map(|term| selected_courses(&snapshot.selections, term))
            .unwrap_or_default();

        Self {
            student: snapshot.student_id.clone(),
            passed: pass_policy.passed_grades(&snapshot.history),
            selected,
            target_semester: next_semester(&snapshot.history),
        }
    }
}

/// Outcome of one student's request in a batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentRecommendations {
    pub student: StudentId,
    pub result: Result<RecommendationSet>,
}

/// Ranks recommendations for many students of the same chart in parallel
///
/// # Returns
/// One entry per request, in input order. A failing request does not affect
/// the others.
pub fn recommend_for_students(
    graph: &CourseGraph,
    pool: &CandidatePool,
    requests: &[StudentRequest],
    limit: Option<usize>,
    policy: &RankingPolicy,
) -> Vec<StudentRecommendations> {
    debug!("Ranking recommendations for {} student(s)", requests.len());

    requests
        .par_iter()
        .map(|request| StudentRecommendations {
            student: request.student.clone(),
            result: recommend_with_grades(
                graph,
                pool,
                &request.passed,
                &request.selected,
                request.target_semester,
                limit,
                policy,
            ),
        })
        .collect()
}
