use council_readiness::config::ReadinessConfig;
use council_readiness::readiness::{ReadinessScorer, ReadinessService};
use council_readiness::roster::{EligibilityRules, RosterAggregator, RosterError};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Build the readiness service from configuration. `rules_override` wins over the
/// configured rules path.
pub(crate) fn readiness_service(
    config: &ReadinessConfig,
    rules_override: Option<&Path>,
) -> Result<ReadinessService, RosterError> {
    let rules_path = rules_override.or(config.rules_path.as_deref());
    let rules = match rules_path {
        Some(path) => EligibilityRules::from_path(path)?,
        None => EligibilityRules::default(),
    };

    if let Some(path) = rules_path {
        info!(path = %path.display(), active = !rules.is_empty(), "eligibility rules loaded");
    }

    Ok(ReadinessService::new(
        ReadinessScorer::new(config.policy()),
        RosterAggregator::new(config.target_min),
        rules,
    ))
}
