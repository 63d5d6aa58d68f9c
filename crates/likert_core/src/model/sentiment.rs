//! Sentiment classification over a rating histogram.
//!
//! With `low = n1 + n2`, `mid = n3` and `high = n4 + n5`, the first matching
//! rule wins:
//!
//! 1. no responses -> `Neutral`
//! 2. only midpoint responses -> `Neutral`
//! 3. `low == 0`, `high > 0` -> `Positive`
//! 4. `high == 0`, `low > 0` -> `Negative`
//! 5. both extremes, empty midpoint -> `Bimodal`
//! 6. anything else -> `Mixed`

use crate::model::histogram::RatingCounts;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Aggregate sentiment label for one question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Positive,
    Negative,
    Bimodal,
    Mixed,
    Neutral,
}

impl Sentiment {
    /// Classifies a histogram. Depends on nothing but the five counts.
    pub fn classify(counts: &RatingCounts) -> Self {
        let bands = counts.bands();
        match (bands.low, bands.mid, bands.high) {
            // Empty histogram or midpoint-only.
            (0, _, 0) => Self::Neutral,
            (0, _, _) => Self::Positive,
            (_, _, 0) => Self::Negative,
            (_, 0, _) => Self::Bimodal,
            _ => Self::Mixed,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Bimodal => "bimodal",
            Self::Mixed => "mixed",
            Self::Neutral => "neutral",
        }
    }
}

impl Display for Sentiment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl RatingCounts {
    pub fn sentiment(&self) -> Sentiment {
        Sentiment::classify(self)
    }
}

#[cfg(test)]
mod tests {
    use super::Sentiment;
    use crate::model::histogram::RatingCounts;

    fn classify(counts: [u64; 5]) -> Sentiment {
        Sentiment::classify(&RatingCounts::from(counts))
    }

    #[test]
    fn no_responses_is_neutral() {
        assert_eq!(classify([0, 0, 0, 0, 0]), Sentiment::Neutral);
    }

    #[test]
    fn midpoint_only_is_neutral() {
        assert_eq!(classify([0, 0, 3, 0, 0]), Sentiment::Neutral);
    }

    #[test]
    fn upper_band_without_lower_band_is_positive() {
        assert_eq!(classify([0, 0, 0, 1, 1]), Sentiment::Positive);
        assert_eq!(classify([0, 0, 0, 0, 2]), Sentiment::Positive);
        assert_eq!(classify([0, 0, 4, 1, 0]), Sentiment::Positive);
    }

    #[test]
    fn lower_band_without_upper_band_is_negative() {
        assert_eq!(classify([1, 1, 0, 0, 0]), Sentiment::Negative);
        assert_eq!(classify([0, 2, 1, 0, 0]), Sentiment::Negative);
    }

    #[test]
    fn both_extremes_without_midpoint_is_bimodal() {
        assert_eq!(classify([1, 0, 0, 0, 1]), Sentiment::Bimodal);
        assert_eq!(classify([1, 0, 0, 0, 2]), Sentiment::Bimodal);
    }

    #[test]
    fn all_three_bands_is_mixed() {
        assert_eq!(classify([0, 1, 1, 1, 0]), Sentiment::Mixed);
        assert_eq!(classify([5, 5, 1, 5, 5]), Sentiment::Mixed);
    }

    #[test]
    fn serializes_as_lowercase_label() {
        let json = serde_json::to_string(&Sentiment::Bimodal).expect("serialize sentiment");
        assert_eq!(json, "\"bimodal\"");
        assert_eq!(Sentiment::Mixed.to_string(), "mixed");
    }
}
