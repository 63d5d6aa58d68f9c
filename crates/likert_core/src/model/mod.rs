//! Survey domain model.
//!
//! # Responsibility
//! - Define the survey, question and response records shared by all layers.
//! - Own rating validation and the histogram/sentiment rules derived from it.
//!
//! # Invariants
//! - Surveys and questions are identified by stable UUIDs.
//! - A `Rating` value is always a whole number in `1..=5`.
//! - Sentiment is a pure function of a `RatingCounts` histogram.

pub mod histogram;
pub mod rating;
pub mod sentiment;
pub mod survey;
