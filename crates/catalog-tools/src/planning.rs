use crate::util::ToolError;
use log::{info, warn};
use models::{
    history::StudentId,
    snapshot::{CatalogSnapshot, StudentSnapshot},
};
use recommender::{
    CandidatePool, EngineConfig, RecommendationSet, StudentRequest, build_graph,
    recommend_for_students,
};
use serde::Serialize;
use std::collections::BTreeMap;

/// Recommendation output for one student, as printed by the `recommend` binary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentReport {
    pub student: StudentId,
    pub chart_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<RecommendationSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StudentReport {
    fn failed(student: &StudentSnapshot, error: String) -> Self {
        Self {
            student: student.student_id.clone(),
            chart_code: student.chart_code.clone(),
            recommendations: None,
            error: Some(error),
        }
    }
}

/// Ranks recommendations for every student in the snapshot
///
/// Students are grouped by chart so each chart is validated and expanded
/// once. A student whose chart is missing or malformed gets an error entry
/// instead of recommendations.
///
/// # Returns
/// One report per student, in input order
pub fn plan_students(
    catalog: &CatalogSnapshot,
    students: &[StudentSnapshot],
    config: &EngineConfig,
) -> Result<Vec<StudentReport>, ToolError> {
    let graph = build_graph(&catalog.courses, &catalog.requisites)?;
    let pass_policy = config.pass_policy();
    let ranking_policy = config.ranking_policy();

    let mut by_chart: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (index, student) in students.iter().enumerate() {
        by_chart.entry(student.chart_code.as_str()).or_default().push(index);
    }

    let mut reports: Vec<Option<StudentReport>> = vec![None; students.len()];
    for (chart_code, indices) in by_chart {
        let chart = match catalog.chart(chart_code) {
            Ok(Some(chart)) => chart,
            Ok(None) => {
                warn!("No chart {chart_code} in catalog, skipping {} student(s)", indices.len());
                for &index in &indices {
                    let error = format!("unknown chart {chart_code}");
                    reports[index] = Some(StudentReport::failed(&students[index], error));
                }
                continue;
            }
            Err(error) => {
                warn!("Chart {chart_code} is malformed: {error}");
                for &index in &indices {
                    reports[index] = Some(StudentReport::failed(&students[index], error.to_string()));
                }
                continue;
            }
        };

        let pool = CandidatePool::from_chart(&chart);
        let requests: Vec<StudentRequest> = indices
            .iter()
            .map(|&index| StudentRequest::from_snapshot(&students[index], &pass_policy))
            .collect();

        let outcomes =
            recommend_for_students(&graph, &pool, &requests, Some(config.limit), &ranking_policy);
        for (&index, outcome) in indices.iter().zip(outcomes) {
            let (recommendations, error) = match outcome.result {
                Ok(set) => (Some(set), None),
                Err(error) => (None, Some(error.to_string())),
            };
            reports[index] = Some(StudentReport {
                student: outcome.student,
                chart_code: chart_code.to_string(),
                recommendations,
                error,
            });
        }
    }

    info!("Planned {} student(s)", students.len());
    Ok(reports.into_iter().flatten().collect())
}
