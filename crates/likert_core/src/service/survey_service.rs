//! Survey registry use-case service.
//!
//! # Responsibility
//! - Validate and create surveys and questions.
//! - Remove questions together with their responses.
//!
//! # Invariants
//! - A question can only be added to a survey that exists at call time.
//! - `remove_question` succeeds for unknown question ids and still clears any
//!   responses keyed by that id.

use crate::model::survey::{Question, QuestionId, Survey, SurveyId, SurveyValidationError};
use crate::repo::survey_repo::{QuestionRemoval, RepoError, RepoResult, SurveyRepository};
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from survey registry operations.
#[derive(Debug)]
pub enum SurveyServiceError {
    /// Title is blank after trim.
    EmptyTitle,
    /// Referenced survey does not exist.
    SurveyNotFound(SurveyId),
    /// Repository-level failure.
    Repo(RepoError),
}

impl Display for SurveyServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "{}", SurveyValidationError::EmptyTitle),
            Self::SurveyNotFound(_) => write!(f, "Survey not found."),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SurveyServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SurveyValidationError> for SurveyServiceError {
    fn from(value: SurveyValidationError) -> Self {
        match value {
            SurveyValidationError::EmptyTitle => Self::EmptyTitle,
        }
    }
}

impl From<RepoError> for SurveyServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => err.into(),
            other => Self::Repo(other),
        }
    }
}

/// Survey registry facade over repository implementations.
pub struct SurveyService<R: SurveyRepository> {
    repo: R,
}

impl<R: SurveyRepository> SurveyService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates one survey and returns its generated id.
    ///
    /// # Contract
    /// - Fails with `EmptyTitle` when `title` is empty or whitespace-only.
    /// - `owner` is stored as given.
    pub fn create_survey(
        &self,
        title: impl Into<String>,
        owner: impl Into<String>,
    ) -> Result<SurveyId, SurveyServiceError> {
        let survey = Survey::new(title, owner);
        if let Err(err) = survey.validate() {
            debug!("event=survey_create module=registry status=rejected reason=empty_title");
            return Err(err.into());
        }

        let survey_uuid = self.repo.create_survey(&survey)?;
        info!("event=survey_create module=registry status=ok survey={survey_uuid}");
        Ok(survey_uuid)
    }

    /// Adds one question to an existing survey.
    ///
    /// # Contract
    /// - Fails with `SurveyNotFound` when `survey_uuid` does not exist.
    /// - A survey that disappears between the check and the insert trips the
    ///   `questions.survey_uuid` foreign key and surfaces as `Repo`.
    /// - `stem` is stored verbatim.
    pub fn add_question(
        &self,
        stem: impl Into<String>,
        survey_uuid: SurveyId,
    ) -> Result<QuestionId, SurveyServiceError> {
        if self.repo.get_survey(survey_uuid)?.is_none() {
            debug!(
                "event=question_add module=registry status=rejected reason=survey_not_found survey={survey_uuid}"
            );
            return Err(SurveyServiceError::SurveyNotFound(survey_uuid));
        }

        let question = Question::new(survey_uuid, stem);
        let question_uuid = self.repo.create_question(&question)?;
        info!(
            "event=question_add module=registry status=ok survey={survey_uuid} question={question_uuid}"
        );
        Ok(question_uuid)
    }

    /// Removes one question and every response keyed by its id.
    ///
    /// Idempotent: unknown ids are not an error.
    pub fn remove_question(&self, question_uuid: QuestionId) -> RepoResult<QuestionRemoval> {
        let removal = self.repo.delete_question(question_uuid)?;
        info!(
            "event=question_remove module=registry status=ok question={question_uuid} question_deleted={} responses_deleted={}",
            removal.question_deleted, removal.responses_deleted
        );
        Ok(removal)
    }

    /// Gets one survey by id.
    pub fn get_survey(&self, survey_uuid: SurveyId) -> RepoResult<Option<Survey>> {
        self.repo.get_survey(survey_uuid)
    }

    /// Gets one question by id.
    pub fn get_question(&self, question_uuid: QuestionId) -> RepoResult<Option<Question>> {
        self.repo.get_question(question_uuid)
    }

    /// Lists questions of one survey in insertion order.
    ///
    /// Unknown surveys yield an empty list.
    pub fn list_survey_questions(&self, survey_uuid: SurveyId) -> RepoResult<Vec<Question>> {
        self.repo.list_questions(survey_uuid)
    }

    /// Lists surveys created by one owner, oldest first.
    pub fn list_surveys_by_owner(&self, owner: &str) -> RepoResult<Vec<Survey>> {
        self.repo.list_surveys_by_owner(owner)
    }
}
