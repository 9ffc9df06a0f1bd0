use catalog_tools::{
    util::{CATALOG_PATH_VAR, ToolError, env_path, load_catalog},
    validation::{check_new_prerequisite, validate_catalog},
};
use log::{error, info};
use std::process::ExitCode;

/// Validates the catalog at `CATALOG_PATH`
///
/// With two course codes as arguments, checks whether the first may require
/// the second instead of validating the whole catalog.
fn run() -> Result<bool, ToolError> {
    let catalog = load_catalog(&env_path(CATALOG_PATH_VAR)?)?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    if let [course, required] = args.as_slice() {
        return match check_new_prerequisite(&catalog, course, required) {
            Ok(()) => {
                info!("{course} may require {required}");
                Ok(true)
            }
            Err(ToolError::Engine(error)) if error.is_data_integrity() => {
                error!("{course} cannot require {required}: {error}");
                Ok(false)
            }
            Err(error) => Err(error),
        };
    }

    let report = validate_catalog(&catalog)?;
    let output = serde_json::to_string_pretty(&report).map_err(|source| ToolError::Json {
        path: CATALOG_PATH_VAR.into(),
        source,
    })?;
    println!("{output}");

    Ok(report.is_clean())
}

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(error) => {
            error!("{error}");
            ExitCode::FAILURE
        }
    }
}
