//! Result aggregation use-case service.
//!
//! # Responsibility
//! - Build the rating histogram of one question from its stored responses.
//! - Classify the histogram into a `Sentiment`.
//!
//! # Invariants
//! - Nothing is cached; every call reads the current responses.
//! - Keyed and positional histogram forms come from the same `RatingCounts`.

use crate::model::histogram::RatingCounts;
use crate::model::sentiment::Sentiment;
use crate::model::survey::QuestionId;
use crate::repo::response_repo::ResponseRepository;
use crate::repo::survey_repo::RepoResult;
use log::debug;
use std::collections::BTreeMap;

/// Aggregation facade over response repositories.
pub struct ResultsService<R: ResponseRepository> {
    repo: R,
}

impl<R: ResponseRepository> ResultsService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Histogram of the current responses to one question.
    pub fn rating_counts(&self, question_uuid: QuestionId) -> RepoResult<RatingCounts> {
        let responses = self.repo.list_responses(question_uuid)?;
        let counts = RatingCounts::from_ratings(responses.iter().map(|response| response.choice));
        debug!(
            "event=results_aggregate module=aggregation status=ok question={question_uuid} total={}",
            counts.total()
        );
        Ok(counts)
    }

    /// Keyed histogram `{1: n1, .., 5: n5}`.
    pub fn question_results(&self, question_uuid: QuestionId) -> RepoResult<BTreeMap<u8, u64>> {
        Ok(self.rating_counts(question_uuid)?.to_map())
    }

    /// Positional histogram `[n1, n2, n3, n4, n5]`.
    pub fn question_response_counts(&self, question_uuid: QuestionId) -> RepoResult<[u64; 5]> {
        Ok(self.rating_counts(question_uuid)?.as_array())
    }

    /// Sentiment label of one question's current histogram.
    pub fn analyze_sentiment(&self, question_uuid: QuestionId) -> RepoResult<Sentiment> {
        Ok(self.rating_counts(question_uuid)?.sentiment())
    }
}
