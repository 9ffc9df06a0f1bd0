use crate::config::ConfigError;
use models::{chart::ChartError, course::CourseId};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineError>;

/// Failures surfaced by the recommendation engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A requisite edge where a course requires itself
    #[error("course {0} cannot be its own prerequisite")]
    SelfReferentialPrerequisite(CourseId),

    /// Back-edges `(course, required_course)` found in the hard prerequisite graph
    #[error("prerequisite graph contains a cycle ({} back-edge(s), first {:?})", .0.len(), .0.first())]
    CyclicPrerequisites(Vec<(CourseId, CourseId)>),

    #[error("malformed degree chart: {0}")]
    Chart(#[from] ChartError),

    /// The caller passed an argument outside the accepted range
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl EngineError {
    /// Whether the error points at corrupt curriculum data rather than a bad call
    pub fn is_data_integrity(&self) -> bool {
        matches!(
            self,
            Self::SelfReferentialPrerequisite(_) | Self::CyclicPrerequisites(_) | Self::Chart(_)
        )
    }
}
