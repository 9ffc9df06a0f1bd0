pub mod chart;
pub mod course;
pub mod grade;
pub mod history;
pub mod requisite;
pub mod snapshot;
pub mod term;
