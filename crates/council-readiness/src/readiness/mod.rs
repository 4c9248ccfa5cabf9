//! Department readiness scoring for the strategic election dashboard.
//!
//! Every view here is recomputed from a fresh snapshot of department counts; nothing is
//! cached or persisted between calls.

pub mod domain;
pub mod policy;
pub mod report;
pub mod router;
pub mod scorer;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{DepartmentMetric, DepartmentStatus, MetricViolation, MinimumLevel, StatusLabel};
pub use policy::{Normalization, ReadinessPolicy, ScoreWeights};
pub use report::{ReadinessBand, ReadinessInsights, ReadinessReport, ReadinessSummary};
pub use router::{readiness_router, RosterRequest, ScoreRequest};
pub use scorer::{NormalizedSums, ReadinessError, ReadinessScorer, ScoreComponents, ScoreResult};
pub use service::{ReadinessService, ReadinessServiceError};
