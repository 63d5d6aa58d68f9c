//! Core domain logic for Likert surveys.
//! This crate is the single source of truth for survey, response and
//! aggregation invariants.

pub mod concept;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use concept::{
    Acknowledged, ActionResult, AddQuestionArgs, CreateSurveyArgs, ErrorEnvelope, LikertSurvey,
    QuestionAdded, QuestionArgs, RespondArgs, SentimentRow, SqliteLikertSurvey, SurveyArgs,
    SurveyCreated,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::histogram::{RatingBands, RatingCounts};
pub use model::rating::{InvalidChoice, Rating};
pub use model::sentiment::Sentiment;
pub use model::survey::{
    ActorId, Question, QuestionId, Response, Survey, SurveyId, SurveyValidationError,
};
pub use repo::response_repo::{ResponseRepository, SqliteResponseRepository};
pub use repo::survey_repo::{
    QuestionRemoval, RepoError, RepoResult, SqliteSurveyRepository, SurveyRepository,
};
pub use service::response_service::{ResponseService, ResponseServiceError};
pub use service::results_service::ResultsService;
pub use service::survey_service::{SurveyService, SurveyServiceError};

/// Minimal health-check API.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
