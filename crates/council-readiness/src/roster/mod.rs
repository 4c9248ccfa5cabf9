//! Delegate roster ingestion: registrations in, per-department metrics out.

mod aggregate;
pub mod domain;
pub mod eligibility;
mod parser;

pub use aggregate::RosterAggregator;
pub use domain::{DelegateRecord, Department, Gender, UnknownGender};
pub use eligibility::{
    validate_delegate, EligibilityCheck, EligibilityRules, EligibilityVerdict, RuleSetting,
};

use std::fs::File;
use std::io::Read;
use std::path::Path;

#[derive(Debug)]
pub enum RosterError {
    Io(std::io::Error),
    Csv(csv::Error),
    Rules(serde_yaml::Error),
    DuplicateStudent(String),
}

impl std::fmt::Display for RosterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterError::Io(err) => write!(f, "failed to read roster data: {}", err),
            RosterError::Csv(err) => write!(f, "invalid roster CSV data: {}", err),
            RosterError::Rules(err) => write!(f, "invalid eligibility rules: {}", err),
            RosterError::DuplicateStudent(student_id) => {
                write!(f, "student '{}' is registered more than once", student_id)
            }
        }
    }
}

impl std::error::Error for RosterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RosterError::Io(err) => Some(err),
            RosterError::Csv(err) => Some(err),
            RosterError::Rules(err) => Some(err),
            RosterError::DuplicateStudent(_) => None,
        }
    }
}

impl From<std::io::Error> for RosterError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for RosterError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Loads delegate and department exports from CSV.
pub struct RosterImporter;

impl RosterImporter {
    pub fn delegates_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<DelegateRecord>, RosterError> {
        let file = File::open(path)?;
        Self::delegates_from_reader(file)
    }

    pub fn delegates_from_reader<R: Read>(reader: R) -> Result<Vec<DelegateRecord>, RosterError> {
        Ok(parser::parse_delegates(reader)?)
    }

    pub fn departments_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Department>, RosterError> {
        let file = File::open(path)?;
        Self::departments_from_reader(file)
    }

    pub fn departments_from_reader<R: Read>(reader: R) -> Result<Vec<Department>, RosterError> {
        Ok(parser::parse_departments(reader)?)
    }
}
