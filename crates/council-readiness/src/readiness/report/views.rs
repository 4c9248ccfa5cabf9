use super::super::domain::DepartmentStatus;
use super::super::scorer::ScoreResult;
use serde::Serialize;

/// Dashboard bucket for the aggregate score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessBand {
    Excellent,
    Good,
    Fair,
    Critical,
}

impl ReadinessBand {
    pub fn from_score(score: f64) -> Self {
        if score >= 85.0 {
            Self::Excellent
        } else if score >= 70.0 {
            Self::Good
        } else if score >= 50.0 {
            Self::Fair
        } else {
            Self::Critical
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Critical => "Critical",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadinessSummary {
    pub departments: usize,
    pub total_candidates: u64,
    pub total_qualified: u64,
    pub total_target: u64,
    pub departments_under_min: usize,
    pub departments_with_gender_gap: usize,
    pub departments_fully_compliant: usize,
    pub critical_departments: usize,
    pub at_risk_departments: usize,
    pub strong_departments: usize,
    pub band: ReadinessBand,
    pub band_label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadinessInsights {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus_department: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub critical_actions: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub at_risk_watch: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub gender_actions: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub observations: Vec<String>,
}

/// Everything the strategic dashboard renders for one snapshot of department counts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadinessReport {
    pub departments: Vec<DepartmentStatus>,
    pub score: ScoreResult,
    pub summary: ReadinessSummary,
    pub insights: ReadinessInsights,
}
