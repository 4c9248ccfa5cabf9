use super::super::domain::{DepartmentStatus, MinimumLevel};
use super::super::scorer::ScoreResult;
use super::views::{ReadinessBand, ReadinessReport, ReadinessSummary};

impl ReadinessReport {
    pub(crate) fn assemble(departments: Vec<DepartmentStatus>, score: ScoreResult) -> Self {
        let summary = summarize(&departments, &score);
        let insights = super::generate_insights(&summary, &departments);

        Self {
            departments,
            score,
            summary,
            insights,
        }
    }
}

fn summarize(departments: &[DepartmentStatus], score: &ScoreResult) -> ReadinessSummary {
    let mut summary = ReadinessSummary {
        departments: departments.len(),
        total_candidates: 0,
        total_qualified: 0,
        total_target: 0,
        departments_under_min: 0,
        departments_with_gender_gap: 0,
        departments_fully_compliant: 0,
        critical_departments: 0,
        at_risk_departments: 0,
        strong_departments: 0,
        band: ReadinessBand::from_score(score.score),
        band_label: ReadinessBand::from_score(score.score).label(),
    };

    for status in departments {
        summary.total_candidates += u64::from(status.metric.total_candidates);
        summary.total_qualified += u64::from(status.metric.qualified);
        summary.total_target += u64::from(status.metric.target_min);

        if !status.meets_minimum {
            summary.departments_under_min += 1;
        }
        if !status.meets_gender_target {
            summary.departments_with_gender_gap += 1;
        }
        if status.is_compliant() {
            summary.departments_fully_compliant += 1;
        }

        match status.minimum_level {
            MinimumLevel::Critical => summary.critical_departments += 1,
            MinimumLevel::AtRisk => summary.at_risk_departments += 1,
            MinimumLevel::Compliant => summary.strong_departments += 1,
        }
    }

    summary
}
