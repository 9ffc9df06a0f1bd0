pub mod batch;
pub mod candidates;
pub mod config;
pub mod cycles;
pub mod eligibility;
pub mod error;
pub mod graph;
pub mod importance;
pub mod policy;
pub mod ranker;

pub use batch::{StudentRecommendations, StudentRequest, next_semester, recommend_for_students};
pub use candidates::{Candidate, CandidatePool};
pub use config::{ConfigError, EngineConfig};
pub use cycles::{detect_cycles, ensure_acyclic, validate_new_edge, would_create_cycle};
pub use eligibility::{eligible_courses, eligible_courses_with_grades, missing_prerequisites};
pub use error::{EngineError, Result};
pub use graph::{CourseGraph, build_graph};
pub use importance::score_importance;
pub use policy::{PassPolicy, PassRule, RetakePolicy};
pub use ranker::{
    BlockedPolicy, RankingPolicy, Recommendation, RecommendationSet, RecommendationStatus,
    ScoringWeights, recommend, recommend_with_grades,
};
