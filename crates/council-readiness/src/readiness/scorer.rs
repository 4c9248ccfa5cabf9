use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::{DepartmentMetric, DepartmentStatus, MetricViolation, MinimumLevel};
use super::policy::{ReadinessPolicy, ScoreWeights};
use super::report::ReadinessReport;

/// Errors raised while aggregating department metrics into a score.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ReadinessError {
    #[error("invalid metric for department '{code}': {violation}")]
    InvalidMetric {
        code: String,
        #[source]
        violation: MetricViolation,
    },
    #[error("department code '{0}' appears more than once")]
    DuplicateDepartment(String),
    #[error("cannot compute a readiness score without departments")]
    EmptyInput,
    #[error("score weights must be finite and non-negative (got {0:?})")]
    InvalidWeights(ScoreWeights),
}

/// Each readiness sum scaled by the configured normalization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedSums {
    pub min_gap: f64,
    pub gender_gap: f64,
    pub buffer: f64,
}

/// Raw sums behind a score, kept so the published number can be audited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponents {
    pub departments: usize,
    pub min_gap_sum: u64,
    pub gender_gap_sum: f64,
    pub buffer_sum: u64,
    pub normalized: NormalizedSums,
    pub weights: ScoreWeights,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub score: f64,
    pub components: ScoreComponents,
}

/// Stateless scorer applying a readiness policy to department metrics.
#[derive(Debug, Clone, Default)]
pub struct ReadinessScorer {
    policy: ReadinessPolicy,
}

impl ReadinessScorer {
    pub fn new(policy: ReadinessPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &ReadinessPolicy {
        &self.policy
    }

    /// Classify one department against its minimum and the gender target.
    pub fn department_status(&self, metric: &DepartmentMetric) -> DepartmentStatus {
        let gender_target_female = self.policy.gender_target_female();
        let gap_to_min = metric.gap_to_min();
        let gender_gap = metric.gender_gap(gender_target_female);
        let meets_gender_target = gender_gap <= self.policy.gender_tolerance();
        let minimum_level = MinimumLevel::from_gap(gap_to_min);

        DepartmentStatus {
            metric: metric.clone(),
            gap_to_min,
            buffer: metric.buffer(),
            gender_ratio_female: metric.gender_ratio_female(),
            gender_target_female,
            gender_gap,
            meets_minimum: gap_to_min == 0,
            meets_gender_target,
            minimum_level,
            labels: DepartmentStatus::derive_labels(meets_gender_target, minimum_level),
        }
    }

    /// Aggregate every department into one 0-100 score.
    ///
    /// Sums are accumulated in department-code order so the result does not depend on the
    /// order the metrics arrive in.
    pub fn compute_score(
        &self,
        metrics: &[DepartmentMetric],
        weights: &ScoreWeights,
    ) -> Result<ScoreResult, ReadinessError> {
        if !weights.is_valid() {
            return Err(ReadinessError::InvalidWeights(*weights));
        }

        validate_metrics(metrics)?;

        if metrics.is_empty() {
            return Err(ReadinessError::EmptyInput);
        }

        let mut ordered: Vec<&DepartmentMetric> = metrics.iter().collect();
        ordered.sort_by(|left, right| left.department_code.cmp(&right.department_code));

        let gender_target_female = self.policy.gender_target_female();
        let mut min_gap_sum: u64 = 0;
        let mut gender_gap_sum = 0.0_f64;
        let mut buffer_sum: u64 = 0;
        for metric in ordered {
            min_gap_sum += u64::from(metric.gap_to_min());
            gender_gap_sum += metric.gender_gap(gender_target_female);
            buffer_sum += u64::from(metric.buffer());
        }

        let departments = metrics.len();
        let normalization = self.policy.normalization();
        let normalized = NormalizedSums {
            min_gap: normalization.normalize(
                min_gap_sum as f64,
                normalization.min_gap_scale(),
                departments,
            ),
            gender_gap: normalization.normalize(
                gender_gap_sum,
                normalization.gender_gap_scale(),
                departments,
            ),
            buffer: normalization.normalize(
                buffer_sum as f64,
                normalization.buffer_scale(),
                departments,
            ),
        };

        let raw = 100.0
            * (1.0 - weights.w_min * normalized.min_gap - weights.w_gender * normalized.gender_gap
                + weights.w_buffer * normalized.buffer);
        // Overflowing penalty and bonus terms cancel to NaN; treat that as no readiness.
        let score = if raw.is_nan() {
            0.0
        } else {
            raw.clamp(0.0, 100.0)
        };

        debug!(
            departments,
            min_gap_sum, gender_gap_sum, buffer_sum, score, "computed readiness score"
        );

        Ok(ScoreResult {
            score,
            components: ScoreComponents {
                departments,
                min_gap_sum,
                gender_gap_sum,
                buffer_sum,
                normalized,
                weights: *weights,
            },
        })
    }

    /// Score the departments and build the full dashboard report around the result.
    pub fn evaluate(
        &self,
        metrics: &[DepartmentMetric],
        weights: &ScoreWeights,
    ) -> Result<ReadinessReport, ReadinessError> {
        let score = self.compute_score(metrics, weights)?;
        let departments = metrics
            .iter()
            .map(|metric| self.department_status(metric))
            .collect();
        Ok(ReadinessReport::assemble(departments, score))
    }
}

fn validate_metrics(metrics: &[DepartmentMetric]) -> Result<(), ReadinessError> {
    let mut seen = HashSet::with_capacity(metrics.len());
    for metric in metrics {
        metric
            .validate()
            .map_err(|violation| ReadinessError::InvalidMetric {
                code: metric.department_code.clone(),
                violation,
            })?;

        if !seen.insert(metric.department_code.as_str()) {
            return Err(ReadinessError::DuplicateDepartment(
                metric.department_code.clone(),
            ));
        }
    }
    Ok(())
}
