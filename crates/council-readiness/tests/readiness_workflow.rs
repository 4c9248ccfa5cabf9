//! End-to-end readiness scenarios driven through the public roster importer, service facade
//! and HTTP router.

use std::io::Cursor;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use tower::ServiceExt;

use council_readiness::readiness::{
    readiness_router, ReadinessBand, ReadinessScorer, ReadinessService, StatusLabel,
};
use council_readiness::roster::{
    EligibilityRules, RosterAggregator, RosterImporter, RuleSetting,
};

const ROSTER: &str = "\
full_name,student_id,department_code,department_name,gender,year_of_study,gpa,disciplinary_clear
Achieng Otieno,SCT-001,cs,Computer Science,Female,3,3.4,yes
Brian Mwangi,SCT-002,cs,Computer Science,Male,2,2.9,yes
Caleb Kiprop,SCT-003,cs,Computer Science,M,4,,
Dina Wanjiru,LAW-001,law,Law,female,1,3.8,yes
Evans Ouma,LAW-002,law,Law,male,3,2.1,yes
Faith Njeri,MED-001,med,Medicine,F,5,3.0,no
";

const REGISTRY: &str = "\
department_code,department_name,course_name,target_min
cs,Computer Science,BSc Computer Science,3
cs,Computer Science,BSc Software Engineering,
law,Law,LLB,2
med,Medicine,MBChB,
eng,Engineering,BSc Civil Engineering,
";

fn constitution_rules() -> EligibilityRules {
    EligibilityRules {
        year_min: Some(RuleSetting::new(2, "Art. 12(3)")),
        gpa_min: Some(RuleSetting::new(2.5, "Art. 12(4)")),
        disciplinary_clear: Some(RuleSetting::new(true, "Art. 12(5)")),
    }
}

fn service() -> ReadinessService {
    ReadinessService::new(
        ReadinessScorer::default(),
        RosterAggregator::new(3),
        constitution_rules(),
    )
}

#[test]
fn imported_roster_produces_department_report() {
    let delegates =
        RosterImporter::delegates_from_reader(Cursor::new(ROSTER)).expect("roster imports");
    let departments =
        RosterImporter::departments_from_reader(Cursor::new(REGISTRY)).expect("registry imports");

    assert_eq!(delegates.len(), 6);
    assert_eq!(departments.len(), 4);

    let report = service()
        .roster_report(&delegates, &departments, None)
        .expect("report builds");

    let codes: Vec<&str> = report
        .departments
        .iter()
        .map(|status| status.metric.department_code.as_str())
        .collect();
    assert_eq!(codes, vec!["cs", "eng", "law", "med"]);

    let cs = &report.departments[0];
    assert_eq!(cs.metric.total_candidates, 3);
    assert_eq!(cs.metric.qualified, 3);
    assert!(cs.meets_minimum);
    assert!(cs.is_compliant());

    let eng = &report.departments[1];
    assert_eq!(eng.metric.total_candidates, 0);
    assert_eq!(eng.gap_to_min, 3);
    assert!(eng.has_label(StatusLabel::Critical));

    let law = &report.departments[2];
    assert_eq!(law.metric.target_min, 2);
    assert_eq!(law.metric.qualified, 0);
    assert!(law.has_label(StatusLabel::Critical));

    let med = &report.departments[3];
    assert_eq!(med.metric.qualified, 0);

    assert_eq!(report.summary.strong_departments, 1);
    assert_eq!(report.summary.band, ReadinessBand::from_score(report.score.score));
    assert_eq!(report.insights.focus_department.as_deref(), Some("Engineering"));
}

#[test]
fn rules_file_is_optional() {
    let rules = EligibilityRules::from_path("/nonexistent/eligibility.json").expect("defaults");
    assert!(rules.is_empty());
}

#[tokio::test]
async fn report_endpoint_scores_posted_metrics() {
    let router = readiness_router(Arc::new(service()));
    let payload = serde_json::json!({
        "departments": [
            { "department": "Computer Science", "code": "cs", "total_candidates": 4,
              "qualified": 3, "target_min": 3, "male": 2, "female": 1 },
            { "department": "Law", "code": "law", "total_candidates": 1,
              "qualified": 1, "target_min": 3, "male": 1, "female": 0 }
        ],
        "weights": { "w_min": 0.5, "w_gender": 0.3, "w_buffer": 0.2 }
    });

    let response = router
        .oneshot(
            Request::post("/api/v1/readiness/report")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&payload).unwrap()))
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    let report: serde_json::Value = serde_json::from_slice(&body).expect("json payload");

    let score = report["score"]["score"].as_f64().expect("score present");
    assert!((0.0..=100.0).contains(&score));
    assert_eq!(report["score"]["components"]["min_gap_sum"], 2);
    assert_eq!(report["departments"][1]["labels"][0], "CRITICAL");
}
