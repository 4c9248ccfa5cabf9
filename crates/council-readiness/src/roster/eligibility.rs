use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::Path;

use super::domain::DelegateRecord;
use super::RosterError;

/// A single eligibility threshold together with the constitution clause that imposes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSetting<T> {
    pub value: T,
    #[serde(default)]
    pub citation: String,
}

impl<T> RuleSetting<T> {
    pub fn new(value: T, citation: impl Into<String>) -> Self {
        Self {
            value,
            citation: citation.into(),
        }
    }
}

/// Eligibility rules applied to every delegate before they count as qualified.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EligibilityRules {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_min: Option<RuleSetting<u8>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpa_min: Option<RuleSetting<f32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disciplinary_clear: Option<RuleSetting<bool>>,
}

impl EligibilityRules {
    /// Load rules from a YAML or JSON file. A missing file means no rules apply.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, RosterError> {
        match std::fs::read_to_string(path.as_ref()) {
            Ok(raw) => Self::from_document(&raw),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(RosterError::Io(err)),
        }
    }

    /// Parse either a bare rule set or a constitution rules document that nests the rules
    /// under `eligibility` next to its other sections. Unrecognised rule names are errors.
    pub fn from_document(raw: &str) -> Result<Self, RosterError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }

        match serde_yaml::from_str::<RulesDocument>(raw).map_err(RosterError::Rules)? {
            RulesDocument::Bare(rules) => Ok(rules),
            RulesDocument::Constitution { eligibility } => Ok(eligibility),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.year_min.is_none() && self.gpa_min.is_none() && self.disciplinary_clear.is_none()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RulesDocument {
    Bare(EligibilityRules),
    Constitution { eligibility: EligibilityRules },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityCheck {
    pub rule: String,
    pub passed: bool,
    pub detail: String,
    pub citation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityVerdict {
    pub eligibility_checks: Vec<EligibilityCheck>,
    pub overall_passed: bool,
}

/// Run every configured rule against a delegate.
///
/// Rules whose input the registration form did not capture are recorded as passed with a
/// "not tracked" detail, so a missing field never disqualifies a delegate.
pub fn validate_delegate(delegate: &DelegateRecord, rules: &EligibilityRules) -> EligibilityVerdict {
    let mut checks = Vec::new();

    if let Some(setting) = &rules.year_min {
        checks.push(EligibilityCheck {
            rule: "year_min".to_string(),
            passed: delegate.year_of_study >= setting.value,
            detail: format!("Year >= {}", setting.value),
            citation: setting.citation.clone(),
        });
    }

    if let Some(setting) = &rules.gpa_min {
        let (passed, detail) = match delegate.gpa {
            Some(gpa) => (gpa >= setting.value, format!("GPA >= {}", setting.value)),
            None => (true, format!("GPA >= {} (not tracked)", setting.value)),
        };
        checks.push(EligibilityCheck {
            rule: "gpa_min".to_string(),
            passed,
            detail,
            citation: setting.citation.clone(),
        });
    }

    if let Some(setting) = &rules.disciplinary_clear {
        let (passed, detail) = match delegate.disciplinary_clear {
            Some(clear) => (
                !setting.value || clear,
                "No disciplinary record".to_string(),
            ),
            None => (true, "No disciplinary record (not tracked)".to_string()),
        };
        checks.push(EligibilityCheck {
            rule: "disciplinary_clear".to_string(),
            passed,
            detail,
            citation: setting.citation.clone(),
        });
    }

    let overall_passed = checks.iter().all(|check| check.passed);
    EligibilityVerdict {
        eligibility_checks: checks,
        overall_passed,
    }
}
