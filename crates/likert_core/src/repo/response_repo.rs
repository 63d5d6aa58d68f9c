//! Response repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Upsert one rating per `(question, responder)` pair.
//! - Provide filtered reads/counts used by result aggregation.
//!
//! # Invariants
//! - `(question_uuid, responder)` is the primary key; a second write for the
//!   same pair overwrites `choice` in place.
//! - Only validated `Rating` values are written; rows read back with a choice
//!   outside `1..=5` are reported as `RepoError::InvalidData`.
//! - No check is made that `question_uuid` names an existing question.

use crate::model::rating::Rating;
use crate::model::survey::{QuestionId, Response};
use crate::repo::schema::{ensure_schema_version, ensure_table};
use crate::repo::survey_repo::{parse_uuid, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const RESPONSE_SELECT_SQL: &str = "SELECT question_uuid, responder, choice FROM responses";

/// Repository interface for response records.
pub trait ResponseRepository {
    /// Inserts or overwrites the response for `(question, responder)`.
    fn upsert_response(&self, response: &Response) -> RepoResult<()>;
    /// Point lookup by `(question, responder)`.
    fn get_response(
        &self,
        question_uuid: QuestionId,
        responder: &str,
    ) -> RepoResult<Option<Response>>;
    /// Lists every response for one question, ordered by responder.
    fn list_responses(&self, question_uuid: QuestionId) -> RepoResult<Vec<Response>>;
    /// Counts responses for one question, optionally for one responder only.
    fn count_responses(
        &self,
        question_uuid: QuestionId,
        responder: Option<&str>,
    ) -> RepoResult<u64>;
}

/// SQLite-backed response repository.
#[derive(Clone, Copy)]
pub struct SqliteResponseRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteResponseRepository<'conn> {
    /// Creates repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_version(conn)?;
        ensure_table(
            conn,
            "responses",
            &["question_uuid", "responder", "choice", "updated_at"],
        )?;
        Ok(Self { conn })
    }
}

impl ResponseRepository for SqliteResponseRepository<'_> {
    fn upsert_response(&self, response: &Response) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO responses (question_uuid, responder, choice)
             VALUES (?1, ?2, ?3)
             ON CONFLICT (question_uuid, responder) DO UPDATE
             SET
                choice = excluded.choice,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![
                response.question_uuid.to_string(),
                response.responder.as_str(),
                i64::from(response.choice),
            ],
        )?;
        Ok(())
    }

    fn get_response(
        &self,
        question_uuid: QuestionId,
        responder: &str,
    ) -> RepoResult<Option<Response>> {
        let mut stmt = self.conn.prepare(&format!(
            "{RESPONSE_SELECT_SQL} WHERE question_uuid = ?1 AND responder = ?2;"
        ))?;
        let mut rows = stmt.query(params![question_uuid.to_string(), responder])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_response_row(row)?));
        }
        Ok(None)
    }

    fn list_responses(&self, question_uuid: QuestionId) -> RepoResult<Vec<Response>> {
        let mut stmt = self.conn.prepare(&format!(
            "{RESPONSE_SELECT_SQL} WHERE question_uuid = ?1 ORDER BY responder ASC;"
        ))?;
        let mut rows = stmt.query([question_uuid.to_string()])?;
        let mut responses = Vec::new();
        while let Some(row) = rows.next()? {
            responses.push(parse_response_row(row)?);
        }
        Ok(responses)
    }

    fn count_responses(
        &self,
        question_uuid: QuestionId,
        responder: Option<&str>,
    ) -> RepoResult<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*)
             FROM responses
             WHERE question_uuid = ?1
               AND (?2 IS NULL OR responder = ?2);",
            params![question_uuid.to_string(), responder],
            |row| row.get(0),
        )?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative response count `{count}`")))
    }
}

fn parse_response_row(row: &Row<'_>) -> RepoResult<Response> {
    let question_text: String = row.get("question_uuid")?;
    let choice_value: i64 = row.get("choice")?;
    let choice = Rating::try_from(choice_value).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid choice value `{choice_value}` in responses.choice"
        ))
    })?;

    Ok(Response {
        question_uuid: parse_uuid(&question_text, "responses.question_uuid")?,
        responder: row.get("responder")?,
        choice,
    })
}
