use crate::{
    chart::{ChartError, ChartNodeRecord, DegreeChart, ElectiveGroup},
    course::Course,
    history::{HistoryRecord, Selection, StudentId},
    requisite::PrerequisiteEdge,
    term::Term,
};
use serde::{Deserialize, Serialize};

/// A stored chart before validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartRecord {
    pub code: String,
    pub name: String,
    pub nodes: Vec<ChartNodeRecord>,
}

/// Everything the catalog service exports at one point in time
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    pub courses: Vec<Course>,
    #[serde(default)]
    pub requisites: Vec<PrerequisiteEdge>,
    #[serde(default)]
    pub groups: Vec<ElectiveGroup>,
    #[serde(default)]
    pub charts: Vec<ChartRecord>,
}

impl CatalogSnapshot {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Validates and returns the chart with `code`, if the snapshot has one
    pub fn chart(&self, code: &str) -> Result<Option<DegreeChart>, ChartError> {
        self.charts
            .iter()
            .find(|chart| chart.code == code)
            .map(|chart| self.build_chart(chart))
            .transpose()
    }

    /// Validates every chart in the snapshot
    pub fn all_charts(&self) -> Result<Vec<DegreeChart>, ChartError> {
        self.charts
            .iter()
            .map(|chart| self.build_chart(chart))
            .collect()
    }

    fn build_chart(&self, record: &ChartRecord) -> Result<DegreeChart, ChartError> {
        DegreeChart::from_records(&record.code, &record.name, &record.nodes, &self.groups)
    }
}

/// One student's history and pending selections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentSnapshot {
    pub student_id: StudentId,
    /// Code of the degree chart the student follows
    pub chart_code: String,
    #[serde(default)]
    pub history: Vec<HistoryRecord>,
    #[serde(default)]
    pub selections: Vec<Selection>,
    /// Term the selections are being made for
    #[serde(default)]
    pub upcoming_term: Option<Term>,
}

impl StudentSnapshot {
    pub fn list_from_json(json: &str) -> serde_json::Result<Vec<Self>> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::course::{CourseId, GroupId};

    const CATALOG: &str = r#"{
        "courses": [
            {"id": 1, "code": "MATH101", "name": "Calculus I", "credits": 3},
            {"id": 2, "code": "MATH201", "name": "Calculus II", "credits": 3},
            {"id": 3, "code": "HIST101", "name": "World History", "credits": 2, "is_elective": true}
        ],
        "requisites": [{"course": 2, "required": 1}],
        "groups": [{"id": 1, "name": "Humanities", "courses": [3]}],
        "charts": [
            {
                "code": "CS",
                "name": "Computer Science",
                "nodes": [
                    {"semester": 1, "position": 0, "course": 1},
                    {"semester": 1, "position": 1, "group": 1},
                    {"semester": 2, "position": 0, "course": 2}
                ]
            },
            {
                "code": "BROKEN",
                "name": "Broken",
                "nodes": [{"semester": 1, "course": 1, "group": 1}]
            }
        ]
    }"#;

    #[test]
    fn test_catalog_from_json() {
        let catalog = CatalogSnapshot::from_json(CATALOG).unwrap();
        assert_eq!(catalog.courses.len(), 3);
        assert_eq!(catalog.requisites.len(), 1);

        let chart = catalog.chart("CS").unwrap().unwrap();
        assert_eq!(chart.semester_count(), 2);
        assert_eq!(chart.group(GroupId(1)).unwrap().courses, vec![CourseId(3)]);
    }

    #[test]
    fn test_catalog_chart_errors() {
        let catalog = CatalogSnapshot::from_json(CATALOG).unwrap();

        assert!(catalog.chart("EE").unwrap().is_none());
        assert!(matches!(
            catalog.chart("BROKEN"),
            Err(ChartError::MalformedNode { .. })
        ));
        assert!(catalog.all_charts().is_err());
    }

    #[test]
    fn test_student_snapshot_defaults() {
        let json = r#"[{"student_id": "40121", "chart_code": "CS"}]"#;
        let students = StudentSnapshot::list_from_json(json).unwrap();

        assert_eq!(students.len(), 1);
        assert!(students[0].history.is_empty());
        assert!(students[0].upcoming_term.is_none());
    }
}
