use axum::response::Response;
use serde_json::Value;

use crate::readiness::{DepartmentMetric, ReadinessScorer, ScoreWeights};
use crate::roster::{DelegateRecord, Gender};

pub(super) fn metric(code: &str, qualified: u32, target_min: u32, male: u32, female: u32) -> DepartmentMetric {
    DepartmentMetric {
        department_name: format!("Department {}", code.to_uppercase()),
        department_code: code.to_string(),
        total_candidates: qualified.max(male + female),
        qualified,
        target_min,
        male,
        female,
    }
}

/// A department that meets its minimum with a female share close to the default target.
pub(super) fn balanced(code: &str) -> DepartmentMetric {
    metric(code, 3, 3, 2, 1)
}

pub(super) fn scorer() -> ReadinessScorer {
    ReadinessScorer::default()
}

pub(super) fn weights() -> ScoreWeights {
    ScoreWeights::default()
}

pub(super) fn delegate(student_id: &str, code: &str, gender: Gender, year_of_study: u8) -> DelegateRecord {
    DelegateRecord {
        full_name: format!("Delegate {student_id}"),
        student_id: student_id.to_string(),
        department_code: code.to_string(),
        department_name: format!("Department {}", code.to_uppercase()),
        gender,
        year_of_study,
        gpa: None,
        disciplinary_clear: None,
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
