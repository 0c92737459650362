//! Required-field and positivity checks for canonical projects.
//!
//! # Invariants
//! - Validation is pure and never fails; every violated rule is reported.
//! - Violations are reported in rule order: title, location, type, budget.

use crate::model::project::Project;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// One violated project rule.
#[derive(Debug, Clone, PartialEq)]
pub enum ProjectValidationError {
    MissingTitle,
    MissingLocation,
    MissingType,
    /// Budget is present but not strictly positive (NaN included).
    NonPositiveBudget(f64),
}

impl Display for ProjectValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingTitle => write!(f, "Project title is required"),
            Self::MissingLocation => write!(f, "Project location is required"),
            Self::MissingType => write!(f, "Project type is required"),
            Self::NonPositiveBudget(budget) => {
                write!(f, "Budget must be greater than zero (got {budget})")
            }
        }
    }
}

impl Error for ProjectValidationError {}

/// Aggregate validation outcome.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    violations: Vec<ProjectValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Typed violations in rule order.
    pub fn violations(&self) -> &[ProjectValidationError] {
        &self.violations
    }

    /// Human-readable violation messages in rule order.
    pub fn errors(&self) -> Vec<String> {
        self.violations.iter().map(ToString::to_string).collect()
    }
}

impl Display for ValidationReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_valid() {
            return write!(f, "project is valid");
        }
        write!(f, "{}", self.errors().join("; "))
    }
}

impl Serialize for ValidationReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ValidationReport", 2)?;
        state.serialize_field("isValid", &self.is_valid())?;
        state.serialize_field("errors", &self.errors())?;
        state.end()
    }
}

/// Checks the required fields and budget constraint of `project`.
pub fn validate_project(project: &Project) -> ValidationReport {
    let mut violations = Vec::new();

    if project.title.trim().is_empty() {
        violations.push(ProjectValidationError::MissingTitle);
    }
    if project.location.trim().is_empty() {
        violations.push(ProjectValidationError::MissingLocation);
    }
    if project.kind.is_none() {
        violations.push(ProjectValidationError::MissingType);
    }
    if let Some(budget) = project.budget {
        // `!(x > 0)` also rejects NaN.
        if !(budget > 0.0) {
            violations.push(ProjectValidationError::NonPositiveBudget(budget));
        }
    }

    ValidationReport { violations }
}
