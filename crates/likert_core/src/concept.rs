//! Request/response facade over the survey services.
//!
//! # Responsibility
//! - Expose the survey actions and queries with JSON-shaped arguments and
//!   results for API layers, scripts and the CLI.
//! - Turn domain rule violations into `{ "error": message }` values.
//!
//! # Invariants
//! - Actions return `Ok(ActionResult::Err(..))` for domain failures; only
//!   record store failures surface as the outer `Err`.
//! - Queries always return a sequence; single-value queries return exactly one
//!   row.

use crate::model::sentiment::Sentiment;
use crate::model::survey::{ActorId, Question, QuestionId, SurveyId};
use crate::repo::response_repo::{ResponseRepository, SqliteResponseRepository};
use crate::repo::survey_repo::{RepoResult, SqliteSurveyRepository, SurveyRepository};
use crate::service::response_service::{ResponseService, ResponseServiceError};
use crate::service::results_service::ResultsService;
use crate::service::survey_service::{SurveyService, SurveyServiceError};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Arguments of `create_survey`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSurveyArgs {
    pub title: String,
    pub owner: ActorId,
}

/// Arguments of `add_question`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddQuestionArgs {
    pub stem: String,
    pub survey: SurveyId,
}

/// Arguments of `respond_to_question`.
///
/// `choice` is kept as a raw number so fractional input reaches validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RespondArgs {
    pub question: QuestionId,
    pub responder: ActorId,
    pub choice: f64,
}

/// Arguments naming one survey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyArgs {
    pub survey: SurveyId,
}

/// Arguments naming one question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionArgs {
    pub question: QuestionId,
}

/// Success payload of `create_survey`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyCreated {
    pub survey: SurveyId,
}

/// Success payload of `add_question`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionAdded {
    pub question: QuestionId,
}

/// Empty success payload, serialized as `{}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acknowledged {}

/// Domain failure payload, serialized as `{ "error": message }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: String,
}

/// Row returned by `analyze_sentiment`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentRow {
    pub sentiment: Sentiment,
}

/// Action outcome: the success payload or an error envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ActionResult<T> {
    Ok(T),
    Err(ErrorEnvelope),
}

impl<T> ActionResult<T> {
    fn error(message: impl ToString) -> Self {
        Self::Err(ErrorEnvelope {
            error: message.to_string(),
        })
    }

    pub fn is_err(&self) -> bool {
        matches!(self, Self::Err(_))
    }

    /// Returns the error message, if this outcome is a failure.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Ok(_) => None,
            Self::Err(envelope) => Some(envelope.error.as_str()),
        }
    }

    pub fn into_result(self) -> Result<T, ErrorEnvelope> {
        match self {
            Self::Ok(value) => Ok(value),
            Self::Err(envelope) => Err(envelope),
        }
    }
}

/// Likert survey facade wiring registry, ledger and aggregation together.
pub struct LikertSurvey<S, R>
where
    S: SurveyRepository,
    R: ResponseRepository + Clone,
{
    registry: SurveyService<S>,
    ledger: ResponseService<R>,
    results: ResultsService<R>,
}

/// Facade over one SQLite connection.
pub type SqliteLikertSurvey<'conn> =
    LikertSurvey<SqliteSurveyRepository<'conn>, SqliteResponseRepository<'conn>>;

impl<'conn> SqliteLikertSurvey<'conn> {
    /// Builds the facade over one migrated SQLite connection.
    pub fn open(conn: &'conn Connection) -> RepoResult<Self> {
        Ok(Self::new(
            SqliteSurveyRepository::try_new(conn)?,
            SqliteResponseRepository::try_new(conn)?,
        ))
    }
}

impl<S, R> LikertSurvey<S, R>
where
    S: SurveyRepository,
    R: ResponseRepository + Clone,
{
    /// Creates the facade from injected record store implementations.
    pub fn new(surveys: S, responses: R) -> Self {
        Self {
            registry: SurveyService::new(surveys),
            ledger: ResponseService::new(responses.clone()),
            results: ResultsService::new(responses),
        }
    }

    pub fn registry(&self) -> &SurveyService<S> {
        &self.registry
    }

    pub fn ledger(&self) -> &ResponseService<R> {
        &self.ledger
    }

    pub fn results(&self) -> &ResultsService<R> {
        &self.results
    }

    pub fn create_survey(&self, args: CreateSurveyArgs) -> RepoResult<ActionResult<SurveyCreated>> {
        match self.registry.create_survey(args.title, args.owner) {
            Ok(survey) => Ok(ActionResult::Ok(SurveyCreated { survey })),
            Err(err) => registry_failure(err),
        }
    }

    pub fn add_question(&self, args: AddQuestionArgs) -> RepoResult<ActionResult<QuestionAdded>> {
        match self.registry.add_question(args.stem, args.survey) {
            Ok(question) => Ok(ActionResult::Ok(QuestionAdded { question })),
            Err(err) => registry_failure(err),
        }
    }

    /// Never fails for unknown questions.
    pub fn remove_question(&self, args: QuestionArgs) -> RepoResult<ActionResult<Acknowledged>> {
        self.registry.remove_question(args.question)?;
        Ok(ActionResult::Ok(Acknowledged {}))
    }

    pub fn respond_to_question(&self, args: RespondArgs) -> RepoResult<ActionResult<Acknowledged>> {
        match self
            .ledger
            .respond_to_question(args.question, args.responder, args.choice)
        {
            Ok(()) => Ok(ActionResult::Ok(Acknowledged {})),
            Err(ResponseServiceError::InvalidChoice(err)) => Ok(ActionResult::error(err)),
            Err(ResponseServiceError::Repo(err)) => Err(err),
        }
    }

    pub fn get_survey_questions(&self, args: SurveyArgs) -> RepoResult<Vec<Question>> {
        self.registry.list_survey_questions(args.survey)
    }

    /// One row: `{1: n1, 2: n2, 3: n3, 4: n4, 5: n5}`.
    pub fn get_question_results(&self, args: QuestionArgs) -> RepoResult<Vec<BTreeMap<u8, u64>>> {
        Ok(vec![self.results.question_results(args.question)?])
    }

    /// One row: `[n1, n2, n3, n4, n5]`.
    pub fn get_question_response_counts(&self, args: QuestionArgs) -> RepoResult<Vec<[u64; 5]>> {
        Ok(vec![self.results.question_response_counts(args.question)?])
    }

    /// One row: `{sentiment: label}`.
    pub fn analyze_sentiment(&self, args: QuestionArgs) -> RepoResult<Vec<SentimentRow>> {
        let sentiment = self.results.analyze_sentiment(args.question)?;
        Ok(vec![SentimentRow { sentiment }])
    }
}

fn registry_failure<T>(err: SurveyServiceError) -> RepoResult<ActionResult<T>> {
    match err {
        SurveyServiceError::Repo(err) => Err(err),
        domain @ (SurveyServiceError::EmptyTitle | SurveyServiceError::SurveyNotFound(_)) => {
            Ok(ActionResult::error(domain))
        }
    }
}
