//! Five-bucket rating histogram.

use crate::model::rating::Rating;
use std::collections::BTreeMap;

/// Occurrence count for each rating `1..=5` of one question.
///
/// Position `r - 1` holds the count for rating `r`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RatingCounts([u64; 5]);

/// Histogram collapsed into the three bands used for sentiment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RatingBands {
    /// Ratings 1 and 2.
    pub low: u64,
    /// Rating 3.
    pub mid: u64,
    /// Ratings 4 and 5.
    pub high: u64,
}

impl RatingBands {
    pub fn total(&self) -> u64 {
        self.low + self.mid + self.high
    }
}

impl RatingCounts {
    /// Builds a histogram from individual ratings in any order.
    pub fn from_ratings<I>(ratings: I) -> Self
    where
        I: IntoIterator<Item = Rating>,
    {
        let mut counts = Self::default();
        for rating in ratings {
            counts.record(rating);
        }
        counts
    }

    pub fn record(&mut self, rating: Rating) {
        self.0[rating.bucket()] += 1;
    }

    pub fn count(&self, rating: Rating) -> u64 {
        self.0[rating.bucket()]
    }

    /// Dense positional form `[n1, n2, n3, n4, n5]`.
    pub fn as_array(&self) -> [u64; 5] {
        self.0
    }

    /// Keyed form `{1: n1, .., 5: n5}`; all five keys are always present.
    pub fn to_map(&self) -> BTreeMap<u8, u64> {
        Rating::ALL
            .iter()
            .map(|rating| (rating.value(), self.count(*rating)))
            .collect()
    }

    pub fn total(&self) -> u64 {
        self.0.iter().sum()
    }

    pub fn bands(&self) -> RatingBands {
        let [one, two, three, four, five] = self.0;
        RatingBands {
            low: one + two,
            mid: three,
            high: four + five,
        }
    }
}

impl From<[u64; 5]> for RatingCounts {
    fn from(value: [u64; 5]) -> Self {
        Self(value)
    }
}
