//! Survey, question and response records.
//!
//! # Invariants
//! - `Survey::title` is non-empty after trimming once persisted.
//! - `Question::stem` and `Survey::owner` are stored verbatim.
//! - A `Response` is keyed by `(question_uuid, responder)`.

use crate::model::rating::Rating;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable survey identifier.
pub type SurveyId = Uuid;

/// Stable question identifier.
pub type QuestionId = Uuid;

/// Opaque owner/responder identifier supplied by callers (for example
/// `user:Alice`). Never interpreted by core.
pub type ActorId = String;

/// Validation failures for survey records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurveyValidationError {
    /// Title is empty or whitespace-only.
    EmptyTitle,
}

impl Display for SurveyValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "Survey title cannot be empty."),
        }
    }
}

impl Error for SurveyValidationError {}

/// A named collection of Likert questions owned by one actor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Survey {
    #[serde(rename = "id")]
    pub uuid: SurveyId,
    pub title: String,
    pub owner: ActorId,
}

impl Survey {
    /// Creates a survey with a freshly generated id.
    pub fn new(title: impl Into<String>, owner: impl Into<ActorId>) -> Self {
        Self::with_id(Uuid::new_v4(), title, owner)
    }

    /// Creates a survey with a caller-provided id.
    pub fn with_id(uuid: SurveyId, title: impl Into<String>, owner: impl Into<ActorId>) -> Self {
        Self {
            uuid,
            title: title.into(),
            owner: owner.into(),
        }
    }

    /// Checks record invariants before persistence.
    pub fn validate(&self) -> Result<(), SurveyValidationError> {
        if self.title.trim().is_empty() {
            return Err(SurveyValidationError::EmptyTitle);
        }
        Ok(())
    }
}

/// One rateable statement belonging to a survey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "id")]
    pub uuid: QuestionId,
    pub stem: String,
    #[serde(rename = "survey")]
    pub survey_uuid: SurveyId,
}

impl Question {
    /// Creates a question with a freshly generated id.
    pub fn new(survey_uuid: SurveyId, stem: impl Into<String>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            stem: stem.into(),
            survey_uuid,
        }
    }
}

/// One responder's current rating for one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    #[serde(rename = "question")]
    pub question_uuid: QuestionId,
    pub responder: ActorId,
    pub choice: Rating,
}

impl Response {
    pub fn new(question_uuid: QuestionId, responder: impl Into<ActorId>, choice: Rating) -> Self {
        Self {
            question_uuid,
            responder: responder.into(),
            choice,
        }
    }
}
