mod insights;
mod summary;
pub mod views;

pub use views::{ReadinessBand, ReadinessInsights, ReadinessReport, ReadinessSummary};

pub(crate) use insights::generate_insights;
