use super::common::*;
use crate::readiness::{
    DepartmentMetric, MetricViolation, Normalization, ReadinessError, ReadinessPolicy,
    ReadinessScorer, ScoreWeights,
};

#[test]
fn empty_input_is_rejected() {
    match scorer().compute_score(&[], &weights()) {
        Err(ReadinessError::EmptyInput) => {}
        other => panic!("expected empty input error, got {other:?}"),
    }
}

#[test]
fn single_balanced_department_scores_near_full_marks() {
    let result = scorer()
        .compute_score(&[balanced("cs")], &weights())
        .expect("score computes");

    assert_eq!(result.components.min_gap_sum, 0);
    assert_eq!(result.components.buffer_sum, 0);
    assert!(result.components.gender_gap_sum < 0.004);
    assert!(result.score > 99.8 && result.score < 100.0);
    assert_eq!(result.components.weights, weights());
}

#[test]
fn score_follows_the_documented_formula() {
    let metrics = vec![balanced("cs"), metric("law", 1, 3, 1, 0)];

    let result = scorer()
        .compute_score(&metrics, &weights())
        .expect("score computes");

    assert_eq!(result.components.departments, 2);
    assert_eq!(result.components.min_gap_sum, 2);
    assert!((result.components.gender_gap_sum - 1.0 / 3.0).abs() < 1e-9);
    assert!((result.components.normalized.min_gap - 1.0 / 3.0).abs() < 1e-9);
    assert!((result.components.normalized.gender_gap - 1.0 / 6.0).abs() < 1e-9);
    assert_eq!(result.components.normalized.buffer, 0.0);
    let expected = 100.0 * (1.0 - 0.5 / 3.0 - 0.3 / 6.0);
    assert!((result.score - expected).abs() < 1e-9);
}

#[test]
fn surplus_delegates_raise_the_score() {
    let lean = scorer()
        .compute_score(&[metric("cs", 3, 3, 2, 1), metric("law", 1, 3, 1, 0)], &weights())
        .expect("score computes");
    let deep = scorer()
        .compute_score(&[metric("cs", 6, 3, 4, 2), metric("law", 1, 3, 1, 0)], &weights())
        .expect("score computes");

    assert_eq!(deep.components.buffer_sum, 3);
    assert!(deep.score > lean.score);
}

#[test]
fn score_is_identical_for_repeated_and_reordered_input() {
    let metrics = vec![
        metric("cs", 3, 3, 2, 1),
        metric("law", 1, 3, 1, 0),
        metric("med", 5, 3, 2, 3),
        metric("eng", 2, 3, 2, 0),
    ];
    let mut reversed = metrics.clone();
    reversed.reverse();

    let first = scorer().compute_score(&metrics, &weights()).expect("score");
    let second = scorer().compute_score(&metrics, &weights()).expect("score");
    let reordered = scorer().compute_score(&reversed, &weights()).expect("score");

    assert_eq!(first, second);
    assert_eq!(first.score.to_bits(), reordered.score.to_bits());
    assert_eq!(first, reordered);
}

#[test]
fn score_never_improves_as_the_minimum_gap_grows() {
    let mut previous = f64::INFINITY;
    for qualified in (0..=6).rev() {
        let metrics = vec![
            balanced("cs"),
            DepartmentMetric {
                total_candidates: 6,
                ..metric("law", qualified, 4, 2, 1)
            },
        ];
        let result = scorer().compute_score(&metrics, &weights()).expect("score");
        assert!(
            result.score <= previous,
            "score rose to {} at qualified={qualified}",
            result.score
        );
        previous = result.score;
    }
}

#[test]
fn score_never_improves_as_the_gender_gap_grows() {
    let mut previous = f64::INFINITY;
    for female in (0..=3).rev() {
        let metrics = vec![
            balanced("cs"),
            DepartmentMetric {
                total_candidates: 10,
                ..metric("law", 9, 3, 9 - female, female)
            },
        ];
        let result = scorer().compute_score(&metrics, &weights()).expect("score");
        assert!(result.score <= previous);
        previous = result.score;
    }
}

#[test]
fn score_is_clamped_for_extreme_inputs() {
    let starved = scorer()
        .compute_score(&[metric("cs", 0, 1_000_000, 0, 0)], &weights())
        .expect("score computes");
    assert_eq!(starved.score, 0.0);

    let flooded = scorer()
        .compute_score(
            &[metric("cs", 1_000_000, 0, 330_000, 670_000)],
            &ScoreWeights::new(0.0, 0.0, 1.0),
        )
        .expect("score computes");
    assert_eq!(flooded.score, 100.0);
}

#[test]
fn overflowing_weight_terms_still_yield_a_bounded_score() {
    let metrics = vec![metric("law", 0, 30, 0, 0), metric("eng", 30, 0, 30, 0)];

    let result = scorer()
        .compute_score(&metrics, &ScoreWeights::new(f64::MAX, 0.0, f64::MAX))
        .expect("score computes");

    assert!(!result.score.is_nan());
    assert!((0.0..=100.0).contains(&result.score));
    assert_eq!(result.score, 0.0);
    let value = serde_json::to_value(&result).expect("result serializes");
    assert!(value["score"].is_f64());
}

#[test]
fn invalid_metrics_fail_fast() {
    let mut broken = balanced("law");
    broken.qualified = broken.total_candidates + 1;

    match scorer().compute_score(&[balanced("cs"), broken], &weights()) {
        Err(ReadinessError::InvalidMetric { code, violation }) => {
            assert_eq!(code, "law");
            assert!(matches!(
                violation,
                MetricViolation::QualifiedExceedsTotal { .. }
            ));
        }
        other => panic!("expected invalid metric error, got {other:?}"),
    }
}

#[test]
fn gender_counts_above_total_are_rejected() {
    let broken = DepartmentMetric {
        total_candidates: 2,
        ..metric("cs", 2, 3, 2, 2)
    };

    assert!(matches!(
        scorer().compute_score(&[broken], &weights()),
        Err(ReadinessError::InvalidMetric {
            violation: MetricViolation::GenderCountsExceedTotal { .. },
            ..
        })
    ));
}

#[test]
fn duplicate_department_codes_are_rejected() {
    match scorer().compute_score(&[balanced("cs"), balanced("cs")], &weights()) {
        Err(ReadinessError::DuplicateDepartment(code)) => assert_eq!(code, "cs"),
        other => panic!("expected duplicate department error, got {other:?}"),
    }
}

#[test]
fn non_finite_or_negative_weights_are_rejected() {
    for bad in [
        ScoreWeights::new(f64::NAN, 0.3, 0.2),
        ScoreWeights::new(0.5, -0.1, 0.2),
        ScoreWeights::new(0.5, 0.3, f64::INFINITY),
    ] {
        assert!(matches!(
            scorer().compute_score(&[balanced("cs")], &bad),
            Err(ReadinessError::InvalidWeights(_))
        ));
    }
}

#[test]
fn weights_need_not_sum_to_one() {
    let metrics = vec![metric("law", 1, 3, 1, 0)];
    let heavy = ScoreWeights::new(1.0, 1.0, 0.0);

    let default_result = scorer().compute_score(&metrics, &weights()).expect("score");
    let heavy_result = scorer().compute_score(&metrics, &heavy).expect("score");

    assert!(heavy_result.score < default_result.score);
}

#[test]
fn normalization_scale_is_configurable() {
    let strict = ReadinessScorer::new(ReadinessPolicy::new(
        0.33,
        0.05,
        Normalization::new(1.0, 1.0, 3.0),
        ScoreWeights::default(),
    ));
    let metrics = vec![metric("law", 2, 3, 1, 1)];

    let lenient = scorer().compute_score(&metrics, &weights()).expect("score");
    let strict = strict.compute_score(&metrics, &weights()).expect("score");

    assert!((strict.components.normalized.min_gap - 1.0).abs() < 1e-12);
    assert!((lenient.components.normalized.min_gap - 1.0 / 3.0).abs() < 1e-12);
    assert!(strict.score < lenient.score);
}
