use crate::{course::CourseId, grade::Grade};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// How a required course must relate to the course that requires it
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
    Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum RequisiteKind {
    /// Must be passed in an earlier term
    #[default]
    Prerequisite,
    /// May be taken in the same term
    Corequisite,
}

impl RequisiteKind {
    pub fn is_hard(self) -> bool {
        matches!(self, Self::Prerequisite)
    }
}

/// A single requisite relation: `course` requires `required`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PrerequisiteEdge {
    /// The course that has the requirement
    pub course: CourseId,
    /// The course that must be completed (or taken alongside)
    pub required: CourseId,
    #[serde(default)]
    pub kind: RequisiteKind,
    /// Minimum grade needed in `required`, when stricter than a plain pass
    #[serde(default)]
    pub min_grade: Option<Grade>,
}

impl PrerequisiteEdge {
    /// A hard prerequisite with no grade threshold
    pub fn hard(course: CourseId, required: CourseId) -> Self {
        Self {
            course,
            required,
            kind: RequisiteKind::Prerequisite,
            min_grade: None,
        }
    }

    pub fn corequisite(course: CourseId, required: CourseId) -> Self {
        Self {
            course,
            required,
            kind: RequisiteKind::Corequisite,
            min_grade: None,
        }
    }

    pub fn with_min_grade(mut self, grade: Grade) -> Self {
        self.min_grade = Some(grade);
        self
    }

    pub fn is_hard(&self) -> bool {
        self.kind.is_hard()
    }

    pub fn is_self_loop(&self) -> bool {
        self.course == self.required
    }

    /// Whether `grade` in the required course satisfies this edge
    pub fn accepts(&self, grade: Grade) -> bool {
        grade.meets(self.min_grade.unwrap_or(Grade::LOWEST_PASSING))
    }
}
