use crate::util::ToolError;
use log::{info, warn};
use models::{
    course::{Course, CourseId},
    requisite::{PrerequisiteEdge, RequisiteKind},
    snapshot::CatalogSnapshot,
};
use recommender::{CandidatePool, CourseGraph, build_graph, detect_cycles, validate_new_edge};
use serde::Serialize;

/// A hard prerequisite that closes a cycle, by course code
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackEdge {
    pub course: String,
    pub required: String,
}

/// Integrity findings for one catalog snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CatalogReport {
    pub course_count: usize,
    pub edge_count: usize,
    pub back_edges: Vec<BackEdge>,
    /// `(chart code, error)` for charts that fail validation
    pub chart_errors: Vec<(String, String)>,
    /// `(chart code, course id)` for chart courses missing from the catalog
    pub orphaned_courses: Vec<(String, CourseId)>,
}

impl CatalogReport {
    pub fn is_clean(&self) -> bool {
        self.back_edges.is_empty() && self.chart_errors.is_empty() && self.orphaned_courses.is_empty()
    }
}

fn code_of(graph: &CourseGraph, id: CourseId) -> String {
    graph
        .course(id)
        .map(|course| course.code.clone())
        .unwrap_or_else(|| id.to_string())
}

/// Checks the whole catalog for cycles and broken charts
///
/// # Returns
/// A report of every finding, or an error when the requisite table contains
/// a self-referential edge and no graph can be built
pub fn validate_catalog(catalog: &CatalogSnapshot) -> Result<CatalogReport, ToolError> {
    let graph = build_graph(&catalog.courses, &catalog.requisites)?;
    let mut report = CatalogReport {
        course_count: graph.len(),
        edge_count: graph.edge_count(),
        ..CatalogReport::default()
    };

    report.back_edges = detect_cycles(&graph)
        .into_iter()
        .map(|(course, required)| BackEdge {
            course: code_of(&graph, course),
            required: code_of(&graph, required),
        })
        .collect();

    for record in &catalog.charts {
        match catalog.chart(&record.code) {
            Ok(Some(chart)) => {
                let pool = CandidatePool::from_chart(&chart);
                report.orphaned_courses.extend(
                    pool.iter()
                        .filter(|candidate| !graph.contains(candidate.course))
                        .map(|candidate| (record.code.clone(), candidate.course)),
                );
            }
            Ok(None) => {}
            Err(error) => {
                warn!("Chart {} is malformed: {error}", record.code);
                report.chart_errors.push((record.code.clone(), error.to_string()));
            }
        }
    }

    info!(
        "Validated {} course(s) and {} edge(s): {} back-edge(s), {} chart error(s), {} orphan(s)",
        report.course_count,
        report.edge_count,
        report.back_edges.len(),
        report.chart_errors.len(),
        report.orphaned_courses.len()
    );

    Ok(report)
}

fn find_by_code<'a>(catalog: &'a CatalogSnapshot, code: &str) -> Result<&'a Course, ToolError> {
    catalog
        .courses
        .iter()
        .find(|course| course.code.eq_ignore_ascii_case(code))
        .ok_or_else(|| ToolError::UnknownCourse(code.to_string()))
}

/// Checks whether `course` may require `required` without closing a cycle
///
/// # Arguments
/// * `course` - Code of the dependent course
/// * `required` - Code of the prerequisite to add
pub fn check_new_prerequisite(
    catalog: &CatalogSnapshot,
    course: &str,
    required: &str,
) -> Result<(), ToolError> {
    let graph = build_graph(&catalog.courses, &catalog.requisites)?;
    let edge = PrerequisiteEdge {
        course: find_by_code(catalog, course)?.id,
        required: find_by_code(catalog, required)?.id,
        kind: RequisiteKind::Prerequisite,
        min_grade: None,
    };

    validate_new_edge(&graph, &edge)?;
    Ok(())
}
