//! Response ledger use-case service.
//!
//! # Responsibility
//! - Validate ratings and record one live response per respondent/question.
//!
//! # Invariants
//! - The choice is validated before any repository call.
//! - Recording does not check that the question exists; responses to unknown
//!   ids are stored and later cleared by `SurveyService::remove_question`.

use crate::model::rating::{InvalidChoice, Rating};
use crate::model::survey::{QuestionId, Response};
use crate::repo::response_repo::ResponseRepository;
use crate::repo::survey_repo::{RepoError, RepoResult};
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from response ledger operations.
#[derive(Debug)]
pub enum ResponseServiceError {
    /// Choice is not a whole number in `1..=5`.
    InvalidChoice(InvalidChoice),
    /// Repository-level failure.
    Repo(RepoError),
}

impl Display for ResponseServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidChoice(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ResponseServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidChoice(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<InvalidChoice> for ResponseServiceError {
    fn from(value: InvalidChoice) -> Self {
        Self::InvalidChoice(value)
    }
}

impl From<RepoError> for ResponseServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Response ledger facade over repository implementations.
pub struct ResponseService<R: ResponseRepository> {
    repo: R,
}

impl<R: ResponseRepository> ResponseService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Records `responder`'s rating for `question_uuid`, replacing any earlier
    /// rating from the same responder.
    ///
    /// # Contract
    /// - `choice` accepts integers, floats and `Rating`; anything that is not
    ///   a whole number in `1..=5` fails with `InvalidChoice` and nothing is
    ///   written.
    pub fn respond_to_question<C>(
        &self,
        question_uuid: QuestionId,
        responder: impl Into<String>,
        choice: C,
    ) -> Result<(), ResponseServiceError>
    where
        C: TryInto<Rating>,
    {
        let Ok(choice) = choice.try_into() else {
            debug!(
                "event=response_record module=ledger status=rejected reason=invalid_choice question={question_uuid}"
            );
            return Err(InvalidChoice.into());
        };

        let response = Response::new(question_uuid, responder, choice);
        self.repo.upsert_response(&response)?;
        info!("event=response_record module=ledger status=ok question={question_uuid}");
        Ok(())
    }

    /// Gets the live response of one responder to one question.
    pub fn get_response(
        &self,
        question_uuid: QuestionId,
        responder: &str,
    ) -> RepoResult<Option<Response>> {
        self.repo.get_response(question_uuid, responder)
    }

    /// Counts responses for one question, optionally for one responder only.
    pub fn count_responses(
        &self,
        question_uuid: QuestionId,
        responder: Option<&str>,
    ) -> RepoResult<u64> {
        self.repo.count_responses(question_uuid, responder)
    }
}
