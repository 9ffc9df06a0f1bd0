use crate::{course::CourseId, grade::Grade, term::Term};
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeSet,
    fmt::{Display, Formatter, Result as FmtResult},
};

/// Student number as issued by the registrar
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId(pub String);

impl Display for StudentId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

/// One attempt at a course, unique per (student, course, term)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub student: StudentId,
    pub course: CourseId,
    pub term: Term,
    pub grade: Grade,
    /// Pass flag as stored by the history service
    pub is_passed: bool,
    /// Credits earned, 0 when failed
    #[serde(default)]
    pub credits_earned: u8,
}

/// A course the student intends to take in an upcoming term
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub student: StudentId,
    pub course: CourseId,
    pub term: Term,
    #[serde(default)]
    pub confirmed: bool,
}

/// Distinct terms that appear in a history, oldest first
pub fn terms_taken(history: &[HistoryRecord]) -> BTreeSet<Term> {
    history.iter().map(|record| record.term).collect()
}

/// Selected course ids for `term`
pub fn selected_courses(selections: &[Selection], term: Term) -> BTreeSet<CourseId> {
    selections
        .iter()
        .filter(|selection| selection.term == term)
        .map(|selection| selection.course)
        .collect()
}
