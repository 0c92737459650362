//! Subcommand handlers.

use clap::Args;
use propdev_core::{
    merge_project_data, migrate_many, migrate_to_project_schema, migrate_update, validate_project,
    InMemoryProjectRepository, ProjectService, ServiceError,
};
use serde::Serialize;
use serde_json::{json, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::Read;
use std::process::ExitCode;

const STDIN_MARKER: &str = "-";

/// CLI failure surfaced as exit code 2.
#[derive(Debug)]
pub enum CliError {
    Io { path: String, source: std::io::Error },
    Json { path: String, source: serde_json::Error },
    Logging(String),
    Service(ServiceError),
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "failed to read `{path}`: {source}"),
            Self::Json { path, source } => write!(f, "invalid JSON in `{path}`: {source}"),
            Self::Logging(message) => write!(f, "logging setup failed: {message}"),
            Self::Service(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::Logging(_) => None,
            Self::Service(err) => Some(err),
        }
    }
}

impl From<ServiceError> for CliError {
    fn from(value: ServiceError) -> Self {
        Self::Service(value)
    }
}

#[derive(Args)]
pub struct InputArgs {
    /// JSON file to read, or `-` for stdin
    pub input: String,
}

#[derive(Args)]
pub struct NormalizeArgs {
    /// JSON file to read, or `-` for stdin
    pub input: String,
    /// Treat the input as a collection (array or id-keyed object)
    #[arg(long)]
    pub many: bool,
    /// Attach a validation report to each project
    #[arg(long)]
    pub validate: bool,
}

#[derive(Args)]
pub struct MergeArgs {
    /// Existing project record (legacy or canonical)
    pub existing: String,
    /// Partial update as a JSON object (legacy spellings accepted)
    pub updates: String,
}

pub fn normalize(args: &NormalizeArgs) -> Result<ExitCode, CliError> {
    let source = read_json(&args.input)?;
    let projects = if args.many {
        migrate_many(&source)
    } else {
        vec![migrate_to_project_schema(&source)]
    };

    let rendered: Vec<Value> = projects
        .iter()
        .map(|project| {
            if args.validate {
                json!({ "project": project, "validation": validate_project(project) })
            } else {
                json!(project)
            }
        })
        .collect();

    if args.many {
        print_json(&args.input, &rendered)?;
    } else if let Some(single) = rendered.first() {
        print_json(&args.input, single)?;
    }
    Ok(ExitCode::SUCCESS)
}

pub fn validate(args: &InputArgs) -> Result<ExitCode, CliError> {
    let source = read_json(&args.input)?;
    let report = validate_project(&migrate_to_project_schema(&source));
    print_json(&args.input, &report)?;
    Ok(if report.is_valid() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

pub fn merge(args: &MergeArgs) -> Result<ExitCode, CliError> {
    let existing = migrate_to_project_schema(&read_json(&args.existing)?);
    let updates = migrate_update(&read_json(&args.updates)?);

    let merged = merge_project_data(&existing, updates);
    print_json(&args.existing, &merged)?;
    Ok(ExitCode::SUCCESS)
}

pub fn summary(args: &InputArgs) -> Result<ExitCode, CliError> {
    let source = read_json(&args.input)?;
    let service = ProjectService::new(InMemoryProjectRepository::new());
    let import = service.import_legacy_batch(&source)?;
    let portfolio = service.portfolio_summary()?;

    print_json(
        &args.input,
        &json!({ "portfolio": portfolio, "import": import }),
    )?;
    Ok(ExitCode::SUCCESS)
}

fn read_json(path: &str) -> Result<Value, CliError> {
    let text = if path == STDIN_MARKER {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|source| CliError::Io {
                path: path.to_string(),
                source,
            })?;
        buffer
    } else {
        std::fs::read_to_string(path).map_err(|source| CliError::Io {
            path: path.to_string(),
            source,
        })?
    };

    serde_json::from_str(&text).map_err(|source| CliError::Json {
        path: path.to_string(),
        source,
    })
}

fn print_json<T: Serialize>(path: &str, value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value).map_err(|source| CliError::Json {
        path: path.to_string(),
        source,
    })?;
    println!("{rendered}");
    Ok(())
}
