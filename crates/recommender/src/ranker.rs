use crate::{
    candidates::{Candidate, CandidatePool},
    eligibility::{eligible_courses, eligible_courses_with_grades, missing_prerequisites},
    error::{EngineError, Result},
    graph::CourseGraph,
    importance::score_importance,
};
use log::{debug, warn};
use models::{
    course::{Course, CourseId},
    grade::Grade,
};
use serde::Serialize;
use std::{
    cmp::Reverse,
    collections::{BTreeMap, BTreeSet},
};
use strum::{Display, EnumString};

/// Highest priority a recommendation can carry
pub const MAX_SCORE: u32 = 100;

/// Terms of the priority formula
///
/// `base + dependents * per_dependent + semester_alignment + elective`,
/// capped at [`MAX_SCORE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoringWeights {
    pub base: u32,
    pub per_dependent: u32,
    /// Added when the chart schedules the course in the target semester
    pub semester_alignment: u32,
    /// Added for elective courses
    pub elective: u32,
}

impl ScoringWeights {
    /// Semester-aware formula
    pub const fn weighted() -> Self {
        Self {
            base: 50,
            per_dependent: 10,
            semester_alignment: 25,
            elective: 10,
        }
    }

    /// Dependents only, no semester or elective bonus
    pub const fn simple() -> Self {
        Self {
            semester_alignment: 0,
            elective: 0,
            ..Self::weighted()
        }
    }

    pub fn total(&self, dependents: u32, aligned: bool, elective: bool) -> u32 {
        let mut total = self
            .base
            .saturating_add(dependents.saturating_mul(self.per_dependent));
        if aligned {
            total = total.saturating_add(self.semester_alignment);
        }
        if elective {
            total = total.saturating_add(self.elective);
        }

        total.min(MAX_SCORE)
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self::weighted()
    }
}

/// What to do with candidates whose hard prerequisites are not all passed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum BlockedPolicy {
    /// Leave them out of the list
    #[default]
    Exclude,
    /// Keep them with score 0 and `prerequisites_met = false`
    Flag,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RankingPolicy {
    pub weights: ScoringWeights,
    pub blocked: BlockedPolicy,
}

/// A ranked course suggestion with its explanation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub course_id: CourseId,
    pub code: String,
    pub name: String,
    pub credits: u8,
    /// Priority in `0..=100`
    pub score: u32,
    pub reason: String,
    /// Courses that become selectable once this one is passed
    pub unlocks: Vec<CourseId>,
    pub prerequisites_met: bool,
    pub is_mandatory: bool,
    pub is_elective: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationStatus {
    Ready,
    /// The target semester is past the end of the chart
    CurriculumComplete,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecommendationSet {
    pub target_semester: u32,
    pub status: RecommendationStatus,
    pub recommendations: Vec<Recommendation>,
}

impl RecommendationSet {
    fn complete(target_semester: u32) -> Self {
        Self {
            target_semester,
            status: RecommendationStatus::CurriculumComplete,
            recommendations: Vec::new(),
        }
    }
}

/// Ranks the open courses of a chart for one student and one semester
///
/// # Arguments
/// * `graph` - Requisite graph covering at least the pool's courses
/// * `candidates` - Courses the chart offers
/// * `passed` - Courses the student passed, per the pass policy
/// * `selected` - Courses already selected for the target term
/// * `target_semester` - 1-based chart semester being planned
/// * `limit` - Maximum number of entries, `None` for all
/// * `policy` - Formula weights and blocked-course handling
///
/// # Returns
/// At most `limit` recommendations, score descending then code ascending.
/// A target past the chart's last semester yields an empty
/// [`RecommendationStatus::CurriculumComplete`] set.
pub fn recommend(
    graph: &CourseGraph,
    candidates: &CandidatePool,
    passed: &BTreeSet<CourseId>,
    selected: &BTreeSet<CourseId>,
    target_semester: u32,
    limit: Option<usize>,
    policy: &RankingPolicy,
) -> Result<RecommendationSet> {
    let request = RankRequest::new(graph, candidates, passed, selected, target_semester, limit)?;
    let Some(open) = request.open_courses() else {
        return Ok(RecommendationSet::complete(target_semester));
    };

    let eligible = eligible_courses(graph, &open, passed, selected);
    Ok(request.rank(&open, &eligible, policy))
}

/// Like [`recommend`], with per-edge minimum grades checked against `passed_grades`
pub fn recommend_with_grades(
    graph: &CourseGraph,
    candidates: &CandidatePool,
    passed_grades: &BTreeMap<CourseId, Grade>,
    selected: &BTreeSet<CourseId>,
    target_semester: u32,
    limit: Option<usize>,
    policy: &RankingPolicy,
) -> Result<RecommendationSet> {
    let passed: BTreeSet<CourseId> = passed_grades.keys().copied().collect();
    let mut request =
        RankRequest::new(graph, candidates, &passed, selected, target_semester, limit)?;
    request.passed_grades = Some(passed_grades);
    let Some(open) = request.open_courses() else {
        return Ok(RecommendationSet::complete(target_semester));
    };

    let eligible = eligible_courses_with_grades(graph, &open, passed_grades, selected);
    Ok(request.rank(&open, &eligible, policy))
}

/// Validated inputs shared by both entry points
struct RankRequest<'a> {
    graph: &'a CourseGraph,
    candidates: &'a CandidatePool,
    passed: &'a BTreeSet<CourseId>,
    /// Present when per-edge minimum grades are enforced
    passed_grades: Option<&'a BTreeMap<CourseId, Grade>>,
    selected: &'a BTreeSet<CourseId>,
    target_semester: u32,
    limit: Option<usize>,
}

impl<'a> RankRequest<'a> {
    fn new(
        graph: &'a CourseGraph,
        candidates: &'a CandidatePool,
        passed: &'a BTreeSet<CourseId>,
        selected: &'a BTreeSet<CourseId>,
        target_semester: u32,
        limit: Option<usize>,
    ) -> Result<Self> {
        if target_semester == 0 {
            return Err(EngineError::InvalidArgument(
                "target semester is 1-based, got 0".to_string(),
            ));
        }
        if limit == Some(0) {
            return Err(EngineError::InvalidArgument(
                "limit must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            graph,
            candidates,
            passed,
            passed_grades: None,
            selected,
            target_semester,
            limit,
        })
    }

    /// Chart courses the student still has to take, `None` once the chart is finished
    ///
    /// Elective-only courses drop out once the student has passed or selected
    /// enough members of their groups to fill every slot.
    fn open_courses(&self) -> Option<BTreeSet<CourseId>> {
        if self.target_semester > self.candidates.semester_count() {
            debug!(
                "Target semester {} is past the chart's {} semester(s)",
                self.target_semester,
                self.candidates.semester_count()
            );
            return None;
        }

        let open = self
            .candidates
            .iter()
            .map(|candidate| candidate.course)
            .filter(|course| !self.passed.contains(course))
            .filter(|&course| {
                let filled = self
                    .candidates
                    .is_slot_filled(course, |member| {
                        self.passed.contains(&member) || self.selected.contains(&member)
                    });
                if filled {
                    debug!("Elective slots for {course} are already filled");
                }
                !filled
            })
            .filter(|&course| {
                let known = self.graph.contains(course);
                if !known {
                    warn!("Chart course {course} has no catalog entry, skipping");
                }
                known
            })
            .collect();

        Some(open)
    }

    fn rank(
        &self,
        open: &BTreeSet<CourseId>,
        eligible: &BTreeSet<CourseId>,
        policy: &RankingPolicy,
    ) -> RecommendationSet {
        let dependents = score_importance(self.graph, open);

        let mut recommendations: Vec<Recommendation> = open
            .iter()
            .filter(|course| !self.selected.contains(course))
            .filter_map(|&course_id| {
                let prerequisites_met = eligible.contains(&course_id);
                if !prerequisites_met && policy.blocked == BlockedPolicy::Exclude {
                    return None;
                }

                let course = self.graph.course(course_id)?;
                let candidate = self.candidates.get(course_id)?;
                let dependent_count = dependents.get(&course_id).copied().unwrap_or_default();

                Some(self.build(
                    course,
                    candidate,
                    dependent_count,
                    prerequisites_met,
                    open,
                    &policy.weights,
                ))
            })
            .collect();

        recommendations.sort_by(|a, b| {
            Reverse(a.score)
                .cmp(&Reverse(b.score))
                .then_with(|| a.code.cmp(&b.code))
        });
        if let Some(limit) = self.limit {
            recommendations.truncate(limit);
        }

        debug!(
            "Ranked {} recommendation(s) for semester {} from {} open course(s)",
            recommendations.len(),
            self.target_semester,
            open.len()
        );

        RecommendationSet {
            target_semester: self.target_semester,
            status: RecommendationStatus::Ready,
            recommendations,
        }
    }

    fn build(
        &self,
        course: &Course,
        candidate: &Candidate,
        dependent_count: u32,
        prerequisites_met: bool,
        open: &BTreeSet<CourseId>,
        weights: &ScoringWeights,
    ) -> Recommendation {
        let aligned = candidate.is_scheduled_in(self.target_semester);
        let is_elective = course.is_elective || candidate.is_elective_only();

        let (score, reason) = if prerequisites_met {
            (
                weights.total(dependent_count, aligned, is_elective),
                self.reason(dependent_count, aligned, is_elective),
            )
        } else {
            (0, self.blocked_reason(course.id))
        };

        Recommendation {
            course_id: course.id,
            code: course.code.clone(),
            name: course.name.clone(),
            credits: course.credits,
            score,
            reason,
            unlocks: self.unlocks(course.id, open),
            prerequisites_met,
            is_mandatory: !is_elective,
            is_elective,
        }
    }

    /// Open, unselected dependents whose other hard prerequisites are already satisfied
    fn unlocks(&self, course: CourseId, open: &BTreeSet<CourseId>) -> Vec<CourseId> {
        let mut unlocked: Vec<&Course> = self
            .graph
            .hard_dependents(course)
            .iter()
            .filter(|dependent| open.contains(dependent) && !self.selected.contains(dependent))
            .filter(|&&dependent| {
                self.graph
                    .hard_prerequisites(dependent)
                    .iter()
                    .all(|&required| required == course || self.satisfies(dependent, required))
            })
            .filter_map(|&dependent| self.graph.course(dependent))
            .collect();

        unlocked.sort_by(|a, b| a.code.cmp(&b.code));
        unlocked.into_iter().map(|course| course.id).collect()
    }

    /// Whether the student's record in `required` is enough for `dependent`
    fn satisfies(&self, dependent: CourseId, required: CourseId) -> bool {
        match self.passed_grades {
            Some(grades) => grades.get(&required).is_some_and(|&grade| {
                self.graph
                    .min_grade(dependent, required)
                    .is_none_or(|threshold| grade >= threshold)
            }),
            None => self.passed.contains(&required),
        }
    }

    fn reason(&self, dependent_count: u32, aligned: bool, is_elective: bool) -> String {
        let mut parts = Vec::new();
        if dependent_count > 0 {
            parts.push(format!("prerequisite for {dependent_count} course(s)"));
        }
        if aligned {
            parts.push(format!("scheduled for semester {}", self.target_semester));
        }
        if is_elective {
            parts.push("elective".to_string());
        }

        if parts.is_empty() {
            "core course".to_string()
        } else {
            parts.join(" | ")
        }
    }

    fn blocked_reason(&self, course: CourseId) -> String {
        let missing: Vec<&str> = missing_prerequisites(self.graph, course, self.passed)
            .into_iter()
            .filter_map(|required| self.graph.course(required))
            .map(|required| required.code.as_str())
            .collect();

        if missing.is_empty() {
            "prerequisite grades below the required minimum".to_string()
        } else {
            format!("missing prerequisites: {}", missing.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::build_graph;
    use models::{
        chart::{ChartNodeRecord, DegreeChart, ElectiveGroup},
        course::GroupId,
        requisite::PrerequisiteEdge,
    };

    const MATH101: CourseId = CourseId(1);
    const MATH201: CourseId = CourseId(2);
    const HIST101: CourseId = CourseId(3);

    fn scenario() -> (CourseGraph, CandidatePool) {
        let courses = vec![
            Course::new(1, "MATH101", "Calculus I", 3),
            Course::new(2, "MATH201", "Calculus II", 3),
            Course::new(3, "HIST101", "World History", 2),
        ];
        let edges = vec![PrerequisiteEdge::hard(MATH201, MATH101)];
        let graph = build_graph(&courses, &edges).unwrap();

        (graph, chart_pool(&[(MATH101, 1), (HIST101, 1), (MATH201, 2)]))
    }

    fn chart_pool(schedule: &[(CourseId, u32)]) -> CandidatePool {
        let nodes: Vec<ChartNodeRecord> = schedule
            .iter()
            .enumerate()
            .map(|(position, &(course, semester))| ChartNodeRecord {
                semester,
                position: position as u32,
                course: Some(course),
                group: None,
            })
            .collect();
        let chart = DegreeChart::from_records("TEST", "Test", &nodes, &[]).unwrap();

        CandidatePool::from_chart(&chart)
    }

    fn none() -> BTreeSet<CourseId> {
        BTreeSet::new()
    }

    #[test]
    fn test_first_semester_scenario() {
        let (graph, pool) = scenario();
        let set = recommend(&graph, &pool, &none(), &none(), 1, None, &RankingPolicy::default())
            .unwrap();

        assert_eq!(set.status, RecommendationStatus::Ready);
        let codes: Vec<&str> = set.recommendations.iter().map(|r| r.code.as_str()).collect();
        assert_eq!(codes, vec!["MATH101", "HIST101"]);

        let math = &set.recommendations[0];
        let hist = &set.recommendations[1];
        assert!(math.score > hist.score);
        // 50 base + 10 for MATH201 + 25 alignment
        assert_eq!(math.score, 85);
        assert_eq!(hist.score, 75);
        assert_eq!(math.unlocks, vec![MATH201]);
        assert!(hist.unlocks.is_empty());
        assert_eq!(math.reason, "prerequisite for 1 course(s) | scheduled for semester 1");
        assert_eq!(hist.reason, "scheduled for semester 1");
        assert!(math.prerequisites_met && math.is_mandatory && !math.is_elective);
    }

    #[test]
    fn test_second_semester_scenario() {
        let (graph, pool) = scenario();
        let passed = BTreeSet::from([MATH101]);
        let set = recommend(&graph, &pool, &passed, &none(), 2, None, &RankingPolicy::default())
            .unwrap();

        let math201 = set
            .recommendations
            .iter()
            .find(|r| r.course_id == MATH201)
            .unwrap();
        assert!(math201.prerequisites_met);
        assert_eq!(math201.score, 75);
        assert!(set.recommendations.iter().all(|r| r.course_id != MATH101));
    }

    #[test]
    fn test_blocked_policies() {
        let (graph, pool) = scenario();

        let excluded = recommend(&graph, &pool, &none(), &none(), 2, None, &RankingPolicy::default())
            .unwrap();
        assert!(excluded.recommendations.iter().all(|r| r.course_id != MATH201));

        let policy = RankingPolicy {
            blocked: BlockedPolicy::Flag,
            ..RankingPolicy::default()
        };
        let flagged = recommend(&graph, &pool, &none(), &none(), 2, None, &policy).unwrap();
        let blocked = flagged.recommendations.last().unwrap();

        assert_eq!(blocked.course_id, MATH201);
        assert_eq!(blocked.score, 0);
        assert!(!blocked.prerequisites_met);
        assert_eq!(blocked.reason, "missing prerequisites: MATH101");
    }

    #[test]
    fn test_selected_courses_not_recommended() {
        let (graph, pool) = scenario();
        let selected = BTreeSet::from([HIST101]);
        let set = recommend(&graph, &pool, &none(), &selected, 1, None, &RankingPolicy::default())
            .unwrap();

        assert_eq!(set.recommendations.len(), 1);
        assert_eq!(set.recommendations[0].course_id, MATH101);
    }

    #[test]
    fn test_limit_and_ordering() {
        let courses: Vec<Course> = (1..=6)
            .map(|id| Course::new(id, &format!("GEN{id:03}"), "General", 2))
            .collect();
        let edges = vec![PrerequisiteEdge::hard(CourseId(6), CourseId(4))];
        let graph = build_graph(&courses, &edges).unwrap();
        let pool = CandidatePool::from_courses(1, (1..=6).map(CourseId));

        let set = recommend(&graph, &pool, &none(), &none(), 1, Some(3), &RankingPolicy::default())
            .unwrap();
        let codes: Vec<&str> = set.recommendations.iter().map(|r| r.code.as_str()).collect();

        assert_eq!(codes, vec!["GEN004", "GEN001", "GEN002"]);
        assert!(set
            .recommendations
            .windows(2)
            .all(|pair| pair[0].score >= pair[1].score));
    }

    #[test]
    fn test_recommend_is_idempotent() {
        let (graph, pool) = scenario();
        let policy = RankingPolicy {
            blocked: BlockedPolicy::Flag,
            ..RankingPolicy::default()
        };

        let first = recommend(&graph, &pool, &none(), &none(), 1, Some(5), &policy).unwrap();
        let second = recommend(&graph, &pool, &none(), &none(), 1, Some(5), &policy).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_curriculum_complete() {
        let (graph, pool) = scenario();
        let set = recommend(&graph, &pool, &none(), &none(), 3, Some(10), &RankingPolicy::default())
            .unwrap();

        assert_eq!(set.status, RecommendationStatus::CurriculumComplete);
        assert!(set.recommendations.is_empty());
        assert_eq!(set.target_semester, 3);
    }

    #[test]
    fn test_invalid_arguments() {
        let (graph, pool) = scenario();
        let policy = RankingPolicy::default();

        assert!(matches!(
            recommend(&graph, &pool, &none(), &none(), 0, None, &policy),
            Err(EngineError::InvalidArgument(_))
        ));
        assert!(matches!(
            recommend(&graph, &pool, &none(), &none(), 1, Some(0), &policy),
            Err(EngineError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_empty_inputs() {
        let graph = build_graph(&[], &[]).unwrap();
        let pool = CandidatePool::from_courses(4, Vec::new());
        let set = recommend(&graph, &pool, &none(), &none(), 1, None, &RankingPolicy::default())
            .unwrap();

        assert_eq!(set.status, RecommendationStatus::Ready);
        assert!(set.recommendations.is_empty());
    }

    #[test]
    fn test_score_is_capped() {
        let courses: Vec<Course> = (1..=8)
            .map(|id| Course::new(id, &format!("CS{id:03}"), "Computing", 3))
            .collect();
        let edges: Vec<PrerequisiteEdge> = (2..=8)
            .map(|id| PrerequisiteEdge::hard(CourseId(id), CourseId(1)))
            .collect();
        let graph = build_graph(&courses, &edges).unwrap();
        let pool = CandidatePool::from_courses(1, (1..=8).map(CourseId));

        let set = recommend(&graph, &pool, &none(), &none(), 1, Some(1), &RankingPolicy::default())
            .unwrap();
        assert_eq!(set.recommendations[0].course_id, CourseId(1));
        assert_eq!(set.recommendations[0].score, MAX_SCORE);
        assert_eq!(set.recommendations[0].unlocks.len(), 7);
    }

    #[test]
    fn test_elective_bonus_and_simple_preset() {
        let courses = vec![
            Course::new(1, "ART101", "Drawing", 2).elective(),
            Course::new(2, "BIO101", "Biology", 3),
        ];
        let graph = build_graph(&courses, &[]).unwrap();
        let pool = CandidatePool::from_courses(1, [CourseId(1), CourseId(2)]);

        let weighted = recommend(&graph, &pool, &none(), &none(), 1, None, &RankingPolicy::default())
            .unwrap();
        let art = &weighted.recommendations[0];
        assert_eq!(art.code, "ART101");
        assert_eq!(art.score, 60);
        assert!(art.is_elective && !art.is_mandatory);
        assert_eq!(art.reason, "elective");
        assert_eq!(weighted.recommendations[1].reason, "core course");

        let simple = RankingPolicy {
            weights: ScoringWeights::simple(),
            ..RankingPolicy::default()
        };
        let set = recommend(&graph, &pool, &none(), &none(), 1, None, &simple).unwrap();
        assert!(set.recommendations.iter().all(|r| r.score == 50));
        // Equal scores fall back to course code
        assert_eq!(set.recommendations[0].code, "ART101");
    }

    #[test]
    fn test_recommend_with_grades() {
        let courses = vec![
            Course::new(1, "MATH101", "Calculus I", 3),
            Course::new(2, "MATH201", "Calculus II", 3),
        ];
        let edges = vec![PrerequisiteEdge::hard(MATH201, MATH101).with_min_grade(Grade::C)];
        let graph = build_graph(&courses, &edges).unwrap();
        let pool = CandidatePool::from_courses(2, [MATH101, MATH201]);
        let policy = RankingPolicy {
            blocked: BlockedPolicy::Flag,
            ..RankingPolicy::default()
        };

        let low = BTreeMap::from([(MATH101, Grade::D)]);
        let set = recommend_with_grades(&graph, &pool, &low, &none(), 2, None, &policy).unwrap();
        assert!(!set.recommendations[0].prerequisites_met);
        assert_eq!(
            set.recommendations[0].reason,
            "prerequisite grades below the required minimum"
        );

        let good = BTreeMap::from([(MATH101, Grade::B)]);
        let set = recommend_with_grades(&graph, &pool, &good, &none(), 2, None, &policy).unwrap();
        assert!(set.recommendations[0].prerequisites_met);
    }

    #[test]
    fn test_filled_elective_slot_not_recommended() {
        let courses = vec![
            Course::new(1, "ART101", "Drawing", 2).elective(),
            Course::new(2, "ART102", "Painting", 2).elective(),
            Course::new(3, "CS201", "Data Structures", 3),
        ];
        let graph = build_graph(&courses, &[]).unwrap();
        let nodes = vec![
            ChartNodeRecord {
                semester: 1,
                position: 0,
                course: None,
                group: Some(GroupId(1)),
            },
            ChartNodeRecord {
                semester: 2,
                position: 0,
                course: Some(CourseId(3)),
                group: None,
            },
        ];
        let groups = vec![ElectiveGroup {
            id: GroupId(1),
            name: "Arts".to_string(),
            courses: vec![CourseId(1), CourseId(2)],
        }];
        let chart = DegreeChart::from_records("CS", "Computer Science", &nodes, &groups).unwrap();
        let pool = CandidatePool::from_chart(&chart);
        let policy = RankingPolicy::default();

        let open = recommend(&graph, &pool, &none(), &none(), 1, None, &policy).unwrap();
        let codes: Vec<&str> = open.recommendations.iter().map(|r| r.code.as_str()).collect();
        assert_eq!(codes, vec!["ART101", "ART102", "CS201"]);

        let passed = BTreeSet::from([CourseId(1)]);
        let set = recommend(&graph, &pool, &passed, &none(), 1, None, &policy).unwrap();
        let codes: Vec<&str> = set.recommendations.iter().map(|r| r.code.as_str()).collect();
        assert_eq!(codes, vec!["CS201"]);

        let selected = BTreeSet::from([CourseId(2)]);
        let set = recommend(&graph, &pool, &none(), &selected, 1, None, &policy).unwrap();
        let codes: Vec<&str> = set.recommendations.iter().map(|r| r.code.as_str()).collect();
        assert_eq!(codes, vec!["CS201"]);
    }

    #[test]
    fn test_unlocks_respect_minimum_grades() {
        let courses = vec![
            Course::new(1, "MATH101", "Calculus I", 3),
            Course::new(2, "MATH201", "Calculus II", 3),
            Course::new(3, "PHYS101", "Physics I", 3),
        ];
        let edges = vec![
            PrerequisiteEdge::hard(MATH201, MATH101).with_min_grade(Grade::C),
            PrerequisiteEdge::hard(MATH201, CourseId(3)),
        ];
        let graph = build_graph(&courses, &edges).unwrap();
        let pool = CandidatePool::from_courses(1, [MATH101, MATH201, CourseId(3)]);
        let policy = RankingPolicy::default();

        let low = BTreeMap::from([(MATH101, Grade::D)]);
        let set = recommend_with_grades(&graph, &pool, &low, &none(), 1, None, &policy).unwrap();
        let physics = &set.recommendations[0];
        assert_eq!(physics.code, "PHYS101");
        assert!(physics.unlocks.is_empty());

        let good = BTreeMap::from([(MATH101, Grade::B)]);
        let set = recommend_with_grades(&graph, &pool, &good, &none(), 1, None, &policy).unwrap();
        assert_eq!(set.recommendations[0].unlocks, vec![MATH201]);
    }

    #[test]
    fn test_unlocks_skip_selected_courses() {
        let (graph, pool) = scenario();
        let selected = BTreeSet::from([MATH201]);
        let set = recommend(&graph, &pool, &none(), &selected, 1, None, &RankingPolicy::default())
            .unwrap();

        let math = &set.recommendations[0];
        assert_eq!(math.course_id, MATH101);
        assert!(math.unlocks.is_empty());
    }

    #[test]
    fn test_recommendation_serializes() {
        let (graph, pool) = scenario();
        let set = recommend(&graph, &pool, &none(), &none(), 1, Some(1), &RankingPolicy::default())
            .unwrap();
        let json = serde_json::to_value(&set).unwrap();

        assert_eq!(json["status"], "ready");
        assert_eq!(json["recommendations"][0]["course_id"], 1);
        assert_eq!(json["recommendations"][0]["unlocks"][0], 2);
    }
}
