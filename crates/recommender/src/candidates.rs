use models::{
    chart::{ChartSlot, DegreeChart},
    course::{CourseId, GroupId},
};
use std::collections::{BTreeMap, BTreeSet};

/// A course a chart offers, with where the chart schedules it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub course: CourseId,
    /// Semesters that have a slot this course can fill
    pub semesters: BTreeSet<u32>,
    /// Listed directly as a required course somewhere in the chart
    pub required_slot: bool,
    /// Member of an elective group used by the chart
    pub elective_slot: bool,
    /// Elective groups whose slots this course can fill
    pub groups: BTreeSet<GroupId>,
}

impl Candidate {
    pub fn is_scheduled_in(&self, semester: u32) -> bool {
        self.semesters.contains(&semester)
    }

    /// Only reachable through elective groups
    pub fn is_elective_only(&self) -> bool {
        self.elective_slot && !self.required_slot
    }
}

/// How many chart slots an elective group fills, and with which courses
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct GroupSlots {
    slots: u32,
    members: BTreeSet<CourseId>,
}

/// Courses a student could be recommended from one degree chart
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidatePool {
    semester_count: u32,
    candidates: BTreeMap<CourseId, Candidate>,
    groups: BTreeMap<GroupId, GroupSlots>,
}

impl CandidatePool {
    /// Collects every required course and every elective group member in `chart`
    pub fn from_chart(chart: &DegreeChart) -> Self {
        let mut pool = Self {
            semester_count: chart.semester_count(),
            ..Self::default()
        };

        for (semester, slot) in chart.slots() {
            let courses = chart.slot_courses(slot);
            match *slot {
                ChartSlot::RequiredCourse(course) => {
                    let candidate = pool.entry(course);
                    candidate.semesters.insert(semester);
                    candidate.required_slot = true;
                }
                ChartSlot::ElectiveSlot(group) => {
                    let slots = pool.groups.entry(group).or_default();
                    slots.slots += 1;
                    slots.members.extend(courses.iter().copied());

                    for course in courses {
                        let candidate = pool.entry(course);
                        candidate.semesters.insert(semester);
                        candidate.elective_slot = true;
                        candidate.groups.insert(group);
                    }
                }
            }
        }

        pool
    }

    /// A pool of unscheduled required courses, for callers without a chart
    pub fn from_courses(semester_count: u32, courses: impl IntoIterator<Item = CourseId>) -> Self {
        let mut pool = Self {
            semester_count,
            ..Self::default()
        };
        for course in courses {
            pool.entry(course).required_slot = true;
        }

        pool
    }

    fn entry(&mut self, course: CourseId) -> &mut Candidate {
        self.candidates.entry(course).or_insert_with(|| Candidate {
            course,
            semesters: BTreeSet::new(),
            required_slot: false,
            elective_slot: false,
            groups: BTreeSet::new(),
        })
    }

    /// Number of chart slots `group` fills
    pub fn group_slots(&self, group: GroupId) -> u32 {
        self.groups.get(&group).map_or(0, |slots| slots.slots)
    }

    /// Whether every group `course` could fill is already full
    ///
    /// A group is full once `taken` holds as many of its other members as the
    /// group has slots. Courses listed as required anywhere are never filled.
    ///
    /// # Arguments
    /// * `course` - Candidate to check
    /// * `taken` - Whether a course is passed or selected
    pub fn is_slot_filled(&self, course: CourseId, taken: impl Fn(CourseId) -> bool) -> bool {
        let Some(candidate) = self.get(course) else {
            return false;
        };
        if !candidate.is_elective_only() {
            return false;
        }

        candidate.groups.iter().all(|group| {
            self.groups.get(group).is_some_and(|slots| {
                let filled = slots
                    .members
                    .iter()
                    .filter(|&&member| member != course && taken(member))
                    .count();
                filled >= slots.slots as usize
            })
        })
    }

    pub fn semester_count(&self) -> u32 {
        self.semester_count
    }

    pub fn get(&self, course: CourseId) -> Option<&Candidate> {
        self.candidates.get(&course)
    }

    /// Candidates in ascending course id order
    pub fn iter(&self) -> impl Iterator<Item = &Candidate> {
        self.candidates.values()
    }

    pub fn ids(&self) -> BTreeSet<CourseId> {
        self.candidates.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}
