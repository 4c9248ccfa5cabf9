use super::super::domain::{DepartmentStatus, MinimumLevel};
use super::views::{ReadinessBand, ReadinessInsights, ReadinessSummary};

pub(crate) fn generate_insights(
    summary: &ReadinessSummary,
    departments: &[DepartmentStatus],
) -> ReadinessInsights {
    let focus = departments
        .iter()
        .filter(|status| status.gap_to_min > 0)
        .max_by(|left, right| {
            left.gap_to_min
                .cmp(&right.gap_to_min)
                .then_with(|| right.metric.department_code.cmp(&left.metric.department_code))
        });

    let critical_actions: Vec<String> = departments
        .iter()
        .filter(|status| status.minimum_level == MinimumLevel::Critical)
        .map(|status| {
            format!(
                "{}: recruit {} more qualified delegates",
                status.metric.department_name, status.gap_to_min
            )
        })
        .collect();

    let at_risk_watch: Vec<String> = departments
        .iter()
        .filter(|status| status.minimum_level == MinimumLevel::AtRisk)
        .map(|status| {
            format!(
                "{}: one qualified delegate short of {}",
                status.metric.department_name, status.metric.target_min
            )
        })
        .collect();

    let mut gender_actions = Vec::new();
    if summary.departments_with_gender_gap > 0 {
        let below_target = departments.iter().any(|status| {
            !status.meets_gender_target && status.gender_ratio_female < status.gender_target_female
        });
        gender_actions.push(format!(
            "{} department{} outside the gender balance tolerance; focus on recruiting more {} delegates",
            summary.departments_with_gender_gap,
            if summary.departments_with_gender_gap == 1 { " is" } else { "s are" },
            if below_target { "female" } else { "male" }
        ));
    }

    let mut observations = Vec::new();
    if summary.departments > 0 {
        observations.push(format!(
            "{} of {} departments fully compliant ({} readiness)",
            summary.departments_fully_compliant,
            summary.departments,
            summary.band_label
        ));
    }

    if summary.total_qualified < summary.total_target {
        observations.push(format!(
            "{} qualified delegates against a combined minimum of {}",
            summary.total_qualified, summary.total_target
        ));
    }

    if summary.band == ReadinessBand::Critical {
        observations.push(
            "Readiness is critical; prioritise departments with the largest shortfall".to_string(),
        );
    }

    if critical_actions.is_empty() && at_risk_watch.is_empty() && gender_actions.is_empty() {
        observations.push("No blockers detected; every department meets its targets".to_string());
    }

    ReadinessInsights {
        focus_department: focus.map(|status| status.metric.department_name.clone()),
        critical_actions,
        at_risk_watch,
        gender_actions,
        observations,
    }
}
