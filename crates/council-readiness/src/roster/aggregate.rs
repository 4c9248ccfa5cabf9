use std::collections::{BTreeMap, HashSet};

use tracing::debug;

use super::domain::{DelegateRecord, Department, Gender};
use super::eligibility::{validate_delegate, EligibilityRules};
use super::RosterError;
use crate::readiness::policy::DEFAULT_TARGET_MIN;
use crate::readiness::DepartmentMetric;

/// Rolls individual delegate registrations up into per-department metrics.
#[derive(Debug, Clone)]
pub struct RosterAggregator {
    default_target_min: u32,
}

impl Default for RosterAggregator {
    fn default() -> Self {
        Self::new(DEFAULT_TARGET_MIN)
    }
}

#[derive(Default)]
struct Tally {
    name: String,
    target_min: Option<u32>,
    total_candidates: u32,
    qualified: u32,
    male: u32,
    female: u32,
}

impl RosterAggregator {
    pub fn new(default_target_min: u32) -> Self {
        Self { default_target_min }
    }

    /// Count delegates per department.
    ///
    /// Registry departments are always emitted, even without delegates; unknown codes seen
    /// in the roster are added with the delegate's department name. Gender counts cover
    /// qualified delegates only. Output is ordered by department code.
    pub fn aggregate(
        &self,
        delegates: &[DelegateRecord],
        departments: &[Department],
        rules: &EligibilityRules,
    ) -> Result<Vec<DepartmentMetric>, RosterError> {
        let mut tallies: BTreeMap<String, Tally> = BTreeMap::new();
        for department in departments {
            let tally = tallies.entry(department.code.clone()).or_default();
            tally.name = department.name.clone();
            tally.target_min = department.target_min;
        }

        let mut seen_students = HashSet::with_capacity(delegates.len());
        for delegate in delegates {
            if !seen_students.insert(delegate.student_id.as_str()) {
                return Err(RosterError::DuplicateStudent(delegate.student_id.clone()));
            }

            let tally = tallies
                .entry(delegate.department_code.clone())
                .or_insert_with(|| Tally {
                    name: delegate.department_name.clone(),
                    ..Tally::default()
                });
            tally.total_candidates += 1;

            let verdict = validate_delegate(delegate, rules);
            if !verdict.overall_passed {
                continue;
            }

            tally.qualified += 1;
            match delegate.gender {
                Gender::Male => tally.male += 1,
                Gender::Female => tally.female += 1,
                Gender::Other => {}
            }
        }

        debug!(
            delegates = delegates.len(),
            departments = tallies.len(),
            "aggregated delegate roster"
        );

        Ok(tallies
            .into_iter()
            .map(|(code, tally)| DepartmentMetric {
                department_name: tally.name,
                department_code: code,
                total_candidates: tally.total_candidates,
                qualified: tally.qualified,
                target_min: tally.target_min.unwrap_or(self.default_target_min),
                male: tally.male,
                female: tally.female,
            })
            .collect())
    }
}
