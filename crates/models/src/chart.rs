use crate::course::{CourseId, GroupId};
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fmt::{Display, Formatter, Result as FmtResult},
};

/// Highest semester number a chart may use
pub const MAX_SEMESTER: u32 = 24;

/// Errors raised while assembling a degree chart from stored nodes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartError {
    /// A node sets both a course and a group, or neither
    MalformedNode { semester: u32, position: u32 },
    /// Semesters are numbered from 1 up to [`MAX_SEMESTER`]
    InvalidSemester { semester: u32, position: u32 },
    /// A node points at a group that was not supplied
    UnknownGroup(GroupId),
}

impl Display for ChartError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::MalformedNode { semester, position } => write!(
                f,
                "Chart node at semester {semester}, position {position} must reference exactly one of a course or an elective group"
            ),
            Self::InvalidSemester { semester, position } => write!(
                f,
                "Chart node at position {position} has semester {semester}, expected 1..={MAX_SEMESTER}"
            ),
            Self::UnknownGroup(group) => write!(f, "Chart references unknown {group}"),
        }
    }
}

impl std::error::Error for ChartError {}

/// A named set of interchangeable courses, one of which fills a slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectiveGroup {
    pub id: GroupId,
    pub name: String,
    pub courses: Vec<CourseId>,
}

/// A chart node as stored by the curriculum service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartNodeRecord {
    pub semester: u32,
    #[serde(default)]
    pub position: u32,
    #[serde(default)]
    pub course: Option<CourseId>,
    #[serde(default)]
    pub group: Option<GroupId>,
}

/// One slot of a chart semester
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum ChartSlot {
    /// A specific course every student takes
    RequiredCourse(CourseId),
    /// Any one course from an elective group
    ElectiveSlot(GroupId),
}

impl TryFrom<&ChartNodeRecord> for ChartSlot {
    type Error = ChartError;

    fn try_from(node: &ChartNodeRecord) -> Result<Self, Self::Error> {
        match (node.course, node.group) {
            (Some(course), None) => Ok(Self::RequiredCourse(course)),
            (None, Some(group)) => Ok(Self::ElectiveSlot(group)),
            _ => Err(ChartError::MalformedNode {
                semester: node.semester,
                position: node.position,
            }),
        }
    }
}

/// Slots scheduled for one semester of the chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSemester {
    /// 1-based semester number
    pub number: u32,
    pub slots: Vec<ChartSlot>,
}

/// An ordered curriculum for one degree program
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DegreeChart {
    pub code: String,
    pub name: String,
    semesters: Vec<ChartSemester>,
    groups: BTreeMap<GroupId, ElectiveGroup>,
}

impl DegreeChart {
    /// Builds a chart from stored nodes, validating every slot
    ///
    /// # Arguments
    /// * `code` - Unique chart code
    /// * `name` - Display name of the program
    /// * `nodes` - Stored chart nodes, in any order
    /// * `groups` - Elective groups the nodes may reference
    ///
    /// # Returns
    /// The chart with semesters `1..=max(semester)`; semesters without nodes are empty
    pub fn from_records(
        code: &str,
        name: &str,
        nodes: &[ChartNodeRecord],
        groups: &[ElectiveGroup],
    ) -> Result<Self, ChartError> {
        let available: BTreeMap<GroupId, &ElectiveGroup> =
            groups.iter().map(|group| (group.id, group)).collect();

        if let Some(node) = nodes
            .iter()
            .find(|node| node.semester == 0 || node.semester > MAX_SEMESTER)
        {
            return Err(ChartError::InvalidSemester {
                semester: node.semester,
                position: node.position,
            });
        }

        let mut sorted: Vec<&ChartNodeRecord> = nodes.iter().collect();
        sorted.sort_by_key(|node| (node.semester, node.position));

        let semester_count = sorted.last().map_or(0, |node| node.semester);
        let mut semesters: Vec<ChartSemester> = (1..=semester_count)
            .map(|number| ChartSemester {
                number,
                slots: Vec::new(),
            })
            .collect();
        let mut referenced = BTreeMap::new();

        for node in sorted {
            let slot = ChartSlot::try_from(node)?;
            if let ChartSlot::ElectiveSlot(group_id) = slot {
                let group = available
                    .get(&group_id)
                    .ok_or(ChartError::UnknownGroup(group_id))?;
                referenced.insert(group_id, (*group).clone());
            }

            semesters[(node.semester - 1) as usize].slots.push(slot);
        }

        Ok(Self {
            code: code.to_string(),
            name: name.to_string(),
            semesters,
            groups: referenced,
        })
    }

    /// Number of semesters in the chart
    pub fn semester_count(&self) -> u32 {
        self.semesters.len() as u32
    }

    pub fn semesters(&self) -> &[ChartSemester] {
        &self.semesters
    }

    pub fn semester(&self, number: u32) -> Option<&ChartSemester> {
        number
            .checked_sub(1)
            .and_then(|index| self.semesters.get(index as usize))
    }

    pub fn group(&self, id: GroupId) -> Option<&ElectiveGroup> {
        self.groups.get(&id)
    }

    /// Every `(semester, slot)` pair in chart order
    pub fn slots(&self) -> impl Iterator<Item = (u32, &ChartSlot)> {
        self.semesters
            .iter()
            .flat_map(|semester| semester.slots.iter().map(move |slot| (semester.number, slot)))
    }

    /// Courses a slot can be filled with
    pub fn slot_courses(&self, slot: &ChartSlot) -> Vec<CourseId> {
        match slot {
            ChartSlot::RequiredCourse(course) => vec![*course],
            ChartSlot::ElectiveSlot(group) => self
                .groups
                .get(group)
                .map(|group| group.courses.clone())
                .unwrap_or_default(),
        }
    }
}
