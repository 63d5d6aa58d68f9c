//! Survey/question repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist surveys and their questions.
//! - Own the question removal cascade over `responses`.
//!
//! # Invariants
//! - `create_survey` calls `Survey::validate()` before SQL mutations.
//! - `questions.survey_uuid` is a foreign key to `surveys.uuid`.
//! - `delete_question` removes the question row and every response row keyed
//!   by its id inside one immediate transaction, whether or not the question
//!   row exists.
//! - Question listing is deterministic: `created_at ASC, rowid ASC`.

use crate::db::DbError;
use crate::model::survey::{
    ActorId, Question, QuestionId, Survey, SurveyId, SurveyValidationError,
};
use crate::repo::schema::{ensure_schema_version, ensure_table};
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const SURVEY_SELECT_SQL: &str = "SELECT uuid, title, owner FROM surveys";
const QUESTION_SELECT_SQL: &str = "SELECT uuid, survey_uuid, stem FROM questions";

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for survey record persistence and queries.
#[derive(Debug)]
pub enum RepoError {
    /// Record failed model validation before persistence.
    Validation(SurveyValidationError),
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// Persisted row cannot be converted to a valid record.
    InvalidData(String),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
    /// Required column is missing from expected table.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted survey data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "survey repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "survey repository requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "survey repository requires column `{column}` in table `{table}`"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SurveyValidationError> for RepoError {
    fn from(value: SurveyValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Outcome of a question removal cascade.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuestionRemoval {
    /// Whether a question row existed and was deleted.
    pub question_deleted: bool,
    /// Number of response rows deleted for the question id.
    pub responses_deleted: u64,
}

/// Repository interface for surveys and questions.
pub trait SurveyRepository {
    /// Inserts one survey and returns its id.
    fn create_survey(&self, survey: &Survey) -> RepoResult<SurveyId>;
    /// Point lookup by survey id.
    fn get_survey(&self, survey_uuid: SurveyId) -> RepoResult<Option<Survey>>;
    /// Lists surveys owned by one actor, oldest first.
    fn list_surveys_by_owner(&self, owner: &str) -> RepoResult<Vec<Survey>>;
    /// Inserts one question and returns its id.
    fn create_question(&self, question: &Question) -> RepoResult<QuestionId>;
    /// Point lookup by question id.
    fn get_question(&self, question_uuid: QuestionId) -> RepoResult<Option<Question>>;
    /// Lists questions of one survey in insertion order.
    fn list_questions(&self, survey_uuid: SurveyId) -> RepoResult<Vec<Question>>;
    /// Deletes one question together with all responses keyed by its id.
    fn delete_question(&self, question_uuid: QuestionId) -> RepoResult<QuestionRemoval>;
}

/// SQLite-backed survey repository.
#[derive(Clone, Copy)]
pub struct SqliteSurveyRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSurveyRepository<'conn> {
    /// Creates repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_version(conn)?;
        ensure_table(conn, "surveys", &["uuid", "title", "owner", "created_at"])?;
        ensure_table(
            conn,
            "questions",
            &["uuid", "survey_uuid", "stem", "created_at"],
        )?;
        ensure_table(conn, "responses", &["question_uuid", "responder"])?;
        Ok(Self { conn })
    }
}

impl SurveyRepository for SqliteSurveyRepository<'_> {
    fn create_survey(&self, survey: &Survey) -> RepoResult<SurveyId> {
        survey.validate()?;

        self.conn.execute(
            "INSERT INTO surveys (uuid, title, owner) VALUES (?1, ?2, ?3);",
            params![
                survey.uuid.to_string(),
                survey.title.as_str(),
                survey.owner.as_str()
            ],
        )?;

        Ok(survey.uuid)
    }

    fn get_survey(&self, survey_uuid: SurveyId) -> RepoResult<Option<Survey>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SURVEY_SELECT_SQL} WHERE uuid = ?1;"))?;
        let mut rows = stmt.query([survey_uuid.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_survey_row(row)?));
        }
        Ok(None)
    }

    fn list_surveys_by_owner(&self, owner: &str) -> RepoResult<Vec<Survey>> {
        let mut stmt = self.conn.prepare(&format!(
            "{SURVEY_SELECT_SQL} WHERE owner = ?1 ORDER BY created_at ASC, rowid ASC;"
        ))?;
        let mut rows = stmt.query([owner])?;
        let mut surveys = Vec::new();
        while let Some(row) = rows.next()? {
            surveys.push(parse_survey_row(row)?);
        }
        Ok(surveys)
    }

    fn create_question(&self, question: &Question) -> RepoResult<QuestionId> {
        self.conn.execute(
            "INSERT INTO questions (uuid, survey_uuid, stem) VALUES (?1, ?2, ?3);",
            params![
                question.uuid.to_string(),
                question.survey_uuid.to_string(),
                question.stem.as_str()
            ],
        )?;

        Ok(question.uuid)
    }

    fn get_question(&self, question_uuid: QuestionId) -> RepoResult<Option<Question>> {
        let question = self
            .conn
            .query_row(
                &format!("{QUESTION_SELECT_SQL} WHERE uuid = ?1;"),
                [question_uuid.to_string()],
                |row| {
                    Ok((
                        row.get::<_, String>("uuid")?,
                        row.get::<_, String>("survey_uuid")?,
                        row.get::<_, String>("stem")?,
                    ))
                },
            )
            .optional()?;

        question
            .map(|(uuid, survey_uuid, stem)| build_question(&uuid, &survey_uuid, stem))
            .transpose()
    }

    fn list_questions(&self, survey_uuid: SurveyId) -> RepoResult<Vec<Question>> {
        let mut stmt = self.conn.prepare(&format!(
            "{QUESTION_SELECT_SQL} WHERE survey_uuid = ?1 ORDER BY created_at ASC, rowid ASC;"
        ))?;
        let mut rows = stmt.query([survey_uuid.to_string()])?;
        let mut questions = Vec::new();
        while let Some(row) = rows.next()? {
            questions.push(parse_question_row(row)?);
        }
        Ok(questions)
    }

    fn delete_question(&self, question_uuid: QuestionId) -> RepoResult<QuestionRemoval> {
        let question_text = question_uuid.to_string();
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;

        let responses_deleted = tx.execute(
            "DELETE FROM responses WHERE question_uuid = ?1;",
            [question_text.as_str()],
        )?;
        let questions_deleted = tx.execute(
            "DELETE FROM questions WHERE uuid = ?1;",
            [question_text.as_str()],
        )?;

        tx.commit()?;
        Ok(QuestionRemoval {
            question_deleted: questions_deleted > 0,
            responses_deleted: responses_deleted as u64,
        })
    }
}

fn parse_survey_row(row: &Row<'_>) -> RepoResult<Survey> {
    let uuid_text: String = row.get("uuid")?;
    let owner: ActorId = row.get("owner")?;
    let survey = Survey::with_id(
        parse_uuid(&uuid_text, "surveys.uuid")?,
        row.get::<_, String>("title")?,
        owner,
    );
    survey.validate().map_err(|err| {
        RepoError::InvalidData(format!("survey `{uuid_text}` failed validation: {err}"))
    })?;
    Ok(survey)
}

fn parse_question_row(row: &Row<'_>) -> RepoResult<Question> {
    let uuid_text: String = row.get("uuid")?;
    let survey_text: String = row.get("survey_uuid")?;
    build_question(&uuid_text, &survey_text, row.get("stem")?)
}

fn build_question(uuid_text: &str, survey_text: &str, stem: String) -> RepoResult<Question> {
    Ok(Question {
        uuid: parse_uuid(uuid_text, "questions.uuid")?,
        stem,
        survey_uuid: parse_uuid(survey_text, "questions.survey_uuid")?,
    })
}

pub(crate) fn parse_uuid(value: &str, column: &'static str) -> RepoResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid `{value}` in {column}")))
}
