//! The one place that decides whether a course counts as passed
//!
//! History records carry both a stored pass flag and a grade, and retakes
//! produce several records per course. Eligibility, scoring and ranking all
//! go through [`PassPolicy`] so they never disagree.

use models::{
    course::CourseId,
    grade::Grade,
    history::HistoryRecord,
};
use std::{
    collections::{BTreeMap, BTreeSet},
    str::FromStr,
};
use strum::{Display, EnumString};

/// Decides whether a single attempt counts as a pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassRule {
    /// Trust the stored `is_passed` flag
    Flag,
    /// Require at least this grade; F and W never pass
    MinimumGrade(Grade),
}

impl Default for PassRule {
    fn default() -> Self {
        Self::MinimumGrade(Grade::LOWEST_PASSING)
    }
}

impl PassRule {
    pub fn passes(&self, record: &HistoryRecord) -> bool {
        match self {
            Self::Flag => record.is_passed,
            Self::MinimumGrade(threshold) => record.grade.meets(*threshold),
        }
    }
}

impl FromStr for PassRule {
    type Err = strum::ParseError;

    /// Parses `"flag"` or a grade letter such as `"C"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("flag") {
            return Ok(Self::Flag);
        }

        Grade::from_str(s).map(Self::MinimumGrade)
    }
}

/// Which attempt decides the outcome when a course was taken more than once
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum RetakePolicy {
    /// Passed if any attempt passed
    #[default]
    #[strum(serialize = "any")]
    AnyPassing,
    /// Only the latest term counts
    #[strum(serialize = "recent")]
    MostRecent,
    /// Only the attempt with the highest grade counts
    #[strum(serialize = "best")]
    Best,
}

/// Canonical "passed" predicate applied to a student's whole history
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassPolicy {
    pub rule: PassRule,
    pub retakes: RetakePolicy,
}

impl PassPolicy {
    pub fn new(rule: PassRule, retakes: RetakePolicy) -> Self {
        Self { rule, retakes }
    }

    /// Ids of every course the student has passed
    pub fn passed_courses(&self, history: &[HistoryRecord]) -> BTreeSet<CourseId> {
        self.passed_grades(history).into_keys().collect()
    }

    /// Passed courses with the grade that counts for each
    ///
    /// # Returns
    /// For [`RetakePolicy::AnyPassing`] the best passing grade; otherwise the
    /// grade of the deciding attempt, included only if that attempt passes
    pub fn passed_grades(&self, history: &[HistoryRecord]) -> BTreeMap<CourseId, Grade> {
        let mut attempts: BTreeMap<CourseId, Vec<&HistoryRecord>> = BTreeMap::new();
        for record in history {
            attempts.entry(record.course).or_default().push(record);
        }

        attempts
            .into_iter()
            .filter_map(|(course, records)| {
                self.deciding_grade(&records).map(|grade| (course, grade))
            })
            .collect()
    }

    fn deciding_grade(&self, records: &[&HistoryRecord]) -> Option<Grade> {
        match self.retakes {
            RetakePolicy::AnyPassing => records
                .iter()
                .filter(|record| self.rule.passes(record))
                .map(|record| record.grade)
                .max(),
            RetakePolicy::MostRecent => records
                .iter()
                .max_by_key(|record| record.term)
                .filter(|record| self.rule.passes(record))
                .map(|record| record.grade),
            RetakePolicy::Best => records
                .iter()
                .max_by_key(|record| (record.grade, record.term))
                .filter(|record| self.rule.passes(record))
                .map(|record| record.grade),
        }
    }
}
