use serde::{Deserialize, Serialize};

pub const DEFAULT_GENDER_TARGET_FEMALE: f64 = 0.33;
pub const DEFAULT_GENDER_TOLERANCE: f64 = 0.05;
pub const DEFAULT_TARGET_MIN: u32 = 3;

/// Weights applied to the normalized readiness sums.
///
/// The defaults sum to 1.0 but nothing enforces that; callers may tilt the score as long as
/// every weight is finite and non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    #[serde(alias = "w_min_gap")]
    pub w_min: f64,
    #[serde(alias = "w_gender_gap")]
    pub w_gender: f64,
    pub w_buffer: f64,
}

impl ScoreWeights {
    pub const fn new(w_min: f64, w_gender: f64, w_buffer: f64) -> Self {
        Self {
            w_min,
            w_gender,
            w_buffer,
        }
    }

    pub fn sum(&self) -> f64 {
        self.w_min + self.w_gender + self.w_buffer
    }

    pub fn is_valid(&self) -> bool {
        [self.w_min, self.w_gender, self.w_buffer]
            .iter()
            .all(|weight| weight.is_finite() && *weight >= 0.0)
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self::new(0.5, 0.3, 0.2)
    }
}

/// Per-department scale for each readiness sum.
///
/// A sum is divided by `departments * scale`, so one department reaching `scale` on a sum
/// contributes a full unit. With the defaults a department missing three qualified delegates
/// saturates the minimum term, the gender gap is used as-is since it is already a ratio, and
/// three surplus delegates saturate the buffer term.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Normalization {
    min_gap_scale: f64,
    gender_gap_scale: f64,
    buffer_scale: f64,
}

impl Normalization {
    pub fn new(min_gap_scale: f64, gender_gap_scale: f64, buffer_scale: f64) -> Self {
        let defaults = Self::default();
        Self {
            min_gap_scale: sanitize_scale(min_gap_scale, defaults.min_gap_scale),
            gender_gap_scale: sanitize_scale(gender_gap_scale, defaults.gender_gap_scale),
            buffer_scale: sanitize_scale(buffer_scale, defaults.buffer_scale),
        }
    }

    pub fn min_gap_scale(&self) -> f64 {
        self.min_gap_scale
    }

    pub fn gender_gap_scale(&self) -> f64 {
        self.gender_gap_scale
    }

    pub fn buffer_scale(&self) -> f64 {
        self.buffer_scale
    }

    pub(crate) fn normalize(&self, sum: f64, scale: f64, departments: usize) -> f64 {
        if departments == 0 {
            return 0.0;
        }
        sum / (departments as f64 * scale)
    }
}

impl Default for Normalization {
    fn default() -> Self {
        Self {
            min_gap_scale: 3.0,
            gender_gap_scale: 1.0,
            buffer_scale: 3.0,
        }
    }
}

fn sanitize_scale(value: f64, fallback: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        fallback
    }
}

/// Policy dials shared by the status classification and the aggregate score.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadinessPolicy {
    gender_target_female: f64,
    gender_tolerance: f64,
    normalization: Normalization,
    weights: ScoreWeights,
}

impl ReadinessPolicy {
    /// Out-of-range targets and tolerances fall back to the defaults; invalid weights are
    /// replaced by the default weights.
    pub fn new(
        gender_target_female: f64,
        gender_tolerance: f64,
        normalization: Normalization,
        weights: ScoreWeights,
    ) -> Self {
        let gender_target_female =
            if gender_target_female.is_finite() && (0.0..=1.0).contains(&gender_target_female) {
                gender_target_female
            } else {
                DEFAULT_GENDER_TARGET_FEMALE
            };

        let gender_tolerance = if gender_tolerance.is_finite() && gender_tolerance >= 0.0 {
            gender_tolerance
        } else {
            DEFAULT_GENDER_TOLERANCE
        };

        let weights = if weights.is_valid() {
            weights
        } else {
            ScoreWeights::default()
        };

        Self {
            gender_target_female,
            gender_tolerance,
            normalization,
            weights,
        }
    }

    pub fn gender_target_female(&self) -> f64 {
        self.gender_target_female
    }

    pub fn gender_tolerance(&self) -> f64 {
        self.gender_tolerance
    }

    pub fn normalization(&self) -> &Normalization {
        &self.normalization
    }

    /// Weights used when a request does not supply its own.
    pub fn weights(&self) -> ScoreWeights {
        self.weights
    }
}

impl Default for ReadinessPolicy {
    fn default() -> Self {
        Self::new(
            DEFAULT_GENDER_TARGET_FEMALE,
            DEFAULT_GENDER_TOLERANCE,
            Normalization::default(),
            ScoreWeights::default(),
        )
    }
}
