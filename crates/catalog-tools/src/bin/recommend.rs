use catalog_tools::{
    planning::plan_students,
    util::{CATALOG_PATH_VAR, STUDENTS_PATH_VAR, ToolError, env_path, load_catalog, load_students},
};
use log::error;
use recommender::EngineConfig;
use std::process::ExitCode;

/// Prints recommendations for the students at `STUDENTS_PATH`
///
/// An optional student id argument restricts the output to that student.
fn run() -> Result<(), ToolError> {
    let config = EngineConfig::from_env()?;
    let catalog = load_catalog(&env_path(CATALOG_PATH_VAR)?)?;
    let students_path = env_path(STUDENTS_PATH_VAR)?;
    let mut students = load_students(&students_path)?;

    if let Some(student) = std::env::args().nth(1) {
        students.retain(|snapshot| snapshot.student_id.0 == student);
    }

    let reports = plan_students(&catalog, &students, &config)?;
    let output = serde_json::to_string_pretty(&reports).map_err(|source| ToolError::Json {
        path: students_path,
        source,
    })?;
    println!("{output}");

    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!("{error}");
            ExitCode::FAILURE
        }
    }
}
