use serde::{Deserialize, Serialize};

/// Delegate counts for one academic department, as fetched from the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentMetric {
    #[serde(rename = "department", alias = "department_name")]
    pub department_name: String,
    #[serde(rename = "code", alias = "department_code")]
    pub department_code: String,
    pub total_candidates: u32,
    pub qualified: u32,
    pub target_min: u32,
    #[serde(default)]
    pub male: u32,
    #[serde(default)]
    pub female: u32,
}

impl DepartmentMetric {
    /// Shortfall of qualified delegates against the department minimum.
    pub fn gap_to_min(&self) -> u32 {
        self.target_min.saturating_sub(self.qualified)
    }

    /// Surplus of qualified delegates above the department minimum.
    pub fn buffer(&self) -> u32 {
        self.qualified.saturating_sub(self.target_min)
    }

    /// Female share of the gendered delegates; 0 when nobody is counted.
    pub fn gender_ratio_female(&self) -> f64 {
        let gendered = u64::from(self.male) + u64::from(self.female);
        if gendered == 0 {
            return 0.0;
        }
        f64::from(self.female) / gendered as f64
    }

    pub fn gender_gap(&self, gender_target_female: f64) -> f64 {
        (self.gender_ratio_female() - gender_target_female).abs()
    }

    /// Check the ingestion invariants that unsigned counts cannot express.
    pub fn validate(&self) -> Result<(), MetricViolation> {
        if self.department_code.trim().is_empty() {
            return Err(MetricViolation::MissingCode);
        }

        if self.qualified > self.total_candidates {
            return Err(MetricViolation::QualifiedExceedsTotal {
                qualified: self.qualified,
                total: self.total_candidates,
            });
        }

        let gendered = u64::from(self.male) + u64::from(self.female);
        if gendered > u64::from(self.total_candidates) {
            return Err(MetricViolation::GenderCountsExceedTotal {
                male: self.male,
                female: self.female,
                total: self.total_candidates,
            });
        }

        Ok(())
    }
}

/// Invariant violations detected on a single department metric.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MetricViolation {
    #[error("department code is empty")]
    MissingCode,
    #[error("qualified count {qualified} exceeds total candidates {total}")]
    QualifiedExceedsTotal { qualified: u32, total: u32 },
    #[error("gender counts (male {male}, female {female}) exceed total candidates {total}")]
    GenderCountsExceedTotal { male: u32, female: u32, total: u32 },
}

/// Severity of a department's shortfall against its minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MinimumLevel {
    Compliant,
    AtRisk,
    Critical,
}

impl MinimumLevel {
    pub const fn from_gap(gap_to_min: u32) -> Self {
        match gap_to_min {
            0 => Self::Compliant,
            1 => Self::AtRisk,
            _ => Self::Critical,
        }
    }
}

/// Display label derived from the minimum and gender flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusLabel {
    Compliant,
    AtRisk,
    Critical,
    GenderGap,
}

impl StatusLabel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Compliant => "Compliant",
            Self::AtRisk => "At Risk",
            Self::Critical => "Critical",
            Self::GenderGap => "Gender Gap",
        }
    }
}

/// Per-department view combining the raw counts with the derived compliance flags.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentStatus {
    #[serde(flatten)]
    pub metric: DepartmentMetric,
    pub gap_to_min: u32,
    pub buffer: u32,
    pub gender_ratio_female: f64,
    pub gender_target_female: f64,
    pub gender_gap: f64,
    pub meets_minimum: bool,
    pub meets_gender_target: bool,
    pub minimum_level: MinimumLevel,
    pub labels: Vec<StatusLabel>,
}

impl DepartmentStatus {
    pub fn is_compliant(&self) -> bool {
        self.meets_minimum && self.meets_gender_target
    }

    pub fn has_label(&self, label: StatusLabel) -> bool {
        self.labels.contains(&label)
    }

    /// Labels shown for a department: `Compliant` alone, or every unmet condition.
    pub(crate) fn derive_labels(
        meets_gender_target: bool,
        minimum_level: MinimumLevel,
    ) -> Vec<StatusLabel> {
        let mut labels = Vec::with_capacity(2);
        match minimum_level {
            MinimumLevel::Compliant => {}
            MinimumLevel::AtRisk => labels.push(StatusLabel::AtRisk),
            MinimumLevel::Critical => labels.push(StatusLabel::Critical),
        }
        if !meets_gender_target {
            labels.push(StatusLabel::GenderGap);
        }
        if labels.is_empty() {
            labels.push(StatusLabel::Compliant);
        }
        labels
    }
}
