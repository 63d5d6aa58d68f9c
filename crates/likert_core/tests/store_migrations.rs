use likert_core::db::migrations::latest_version;
use likert_core::db::{open_db, open_db_in_memory, DbError};
use likert_core::{RepoError, SqliteResponseRepository, SqliteSurveyRepository};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "surveys");
    assert_table_exists(&conn, "questions");
    assert_table_exists(&conn, "responses");
}

#[test]
fn opening_same_database_twice_is_idempotent_and_keeps_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("likert.sqlite3");

    let conn_first = open_db(&path).unwrap();
    conn_first
        .execute(
            "INSERT INTO surveys (uuid, title, owner) VALUES ('s-1', 'Kept', 'user:Alice');",
            [],
        )
        .unwrap();
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    let count: i64 = conn_second
        .query_row("SELECT COUNT(*) FROM surveys;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn repositories_reject_unmigrated_connections() {
    let conn = Connection::open_in_memory().unwrap();

    let survey_err = SqliteSurveyRepository::try_new(&conn).err().unwrap();
    assert!(matches!(
        survey_err,
        RepoError::UninitializedConnection {
            actual_version: 0,
            ..
        }
    ));

    let response_err = SqliteResponseRepository::try_new(&conn).err().unwrap();
    assert!(matches!(
        response_err,
        RepoError::UninitializedConnection { .. }
    ));
}

#[test]
fn schema_rejects_out_of_range_choice_and_orphan_questions() {
    let conn = open_db_in_memory().unwrap();

    let bad_choice = conn.execute(
        "INSERT INTO responses (question_uuid, responder, choice) VALUES ('q', 'user:Bob', 6);",
        [],
    );
    assert!(bad_choice.is_err());

    let orphan = conn.execute(
        "INSERT INTO questions (uuid, survey_uuid, stem) VALUES ('q', 'missing', 'stem');",
        [],
    );
    assert!(orphan.is_err());
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
