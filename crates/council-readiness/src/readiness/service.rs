use tracing::info;

use super::domain::{DepartmentMetric, DepartmentStatus};
use super::policy::ScoreWeights;
use super::report::ReadinessReport;
use super::scorer::{ReadinessError, ReadinessScorer, ScoreResult};
use crate::roster::{DelegateRecord, Department, EligibilityRules, RosterAggregator, RosterError};

/// Service composing the scorer, the eligibility rules and the roster aggregator.
pub struct ReadinessService {
    scorer: ReadinessScorer,
    aggregator: RosterAggregator,
    rules: EligibilityRules,
}

impl ReadinessService {
    pub fn new(scorer: ReadinessScorer, aggregator: RosterAggregator, rules: EligibilityRules) -> Self {
        Self {
            scorer,
            aggregator,
            rules,
        }
    }

    pub fn scorer(&self) -> &ReadinessScorer {
        &self.scorer
    }

    pub fn rules(&self) -> &EligibilityRules {
        &self.rules
    }

    pub fn department_status(&self, metric: &DepartmentMetric) -> DepartmentStatus {
        self.scorer.department_status(metric)
    }

    pub fn score(
        &self,
        metrics: &[DepartmentMetric],
        weights: Option<ScoreWeights>,
    ) -> Result<ScoreResult, ReadinessError> {
        let weights = self.weights_or_default(weights);
        self.scorer.compute_score(metrics, &weights)
    }

    pub fn report(
        &self,
        metrics: &[DepartmentMetric],
        weights: Option<ScoreWeights>,
    ) -> Result<ReadinessReport, ReadinessError> {
        let weights = self.weights_or_default(weights);
        let report = self.scorer.evaluate(metrics, &weights)?;

        info!(
            departments = report.summary.departments,
            score = report.score.score,
            band = report.summary.band_label,
            "readiness report generated"
        );

        Ok(report)
    }

    /// Aggregate a delegate roster and report on the resulting department metrics.
    pub fn roster_report(
        &self,
        delegates: &[DelegateRecord],
        departments: &[Department],
        weights: Option<ScoreWeights>,
    ) -> Result<ReadinessReport, ReadinessServiceError> {
        let metrics = self.aggregator.aggregate(delegates, departments, &self.rules)?;
        Ok(self.report(&metrics, weights)?)
    }

    fn weights_or_default(&self, weights: Option<ScoreWeights>) -> ScoreWeights {
        weights.unwrap_or_else(|| self.scorer.policy().weights())
    }
}

impl Default for ReadinessService {
    fn default() -> Self {
        Self::new(
            ReadinessScorer::default(),
            RosterAggregator::default(),
            EligibilityRules::default(),
        )
    }
}

/// Error raised by the readiness service.
#[derive(Debug, thiserror::Error)]
pub enum ReadinessServiceError {
    #[error(transparent)]
    Readiness(#[from] ReadinessError),
    #[error(transparent)]
    Roster(#[from] RosterError),
}
