use likert_core::db::open_db_in_memory;
use likert_core::{
    ResponseRepository, ResponseService, SqliteResponseRepository, SqliteSurveyRepository,
    SurveyRepository, SurveyService, SurveyServiceError,
};
use rusqlite::Connection;
use uuid::Uuid;

const ALICE: &str = "user:Alice";
const BOB: &str = "user:Bob";

fn setup() -> Connection {
    open_db_in_memory().unwrap()
}

fn registry(conn: &Connection) -> SurveyService<SqliteSurveyRepository<'_>> {
    SurveyService::new(SqliteSurveyRepository::try_new(conn).unwrap())
}

fn ledger(conn: &Connection) -> ResponseService<SqliteResponseRepository<'_>> {
    ResponseService::new(SqliteResponseRepository::try_new(conn).unwrap())
}

#[test]
fn create_survey_persists_title_and_owner() {
    let conn = setup();
    let service = registry(&conn);

    let survey_id = service.create_survey("Customer Feedback", ALICE).unwrap();

    let stored = service.get_survey(survey_id).unwrap().unwrap();
    assert_eq!(stored.uuid, survey_id);
    assert_eq!(stored.title, "Customer Feedback");
    assert_eq!(stored.owner, ALICE);
}

#[test]
fn create_survey_rejects_blank_titles_without_writing() {
    let conn = setup();
    let service = registry(&conn);

    for title in ["", "   ", "\t\n"] {
        let err = service.create_survey(title, ALICE).unwrap_err();
        assert!(matches!(err, SurveyServiceError::EmptyTitle));
        assert_eq!(err.to_string(), "Survey title cannot be empty.");
    }

    assert!(service.list_surveys_by_owner(ALICE).unwrap().is_empty());
}

#[test]
fn create_survey_accepts_any_owner_value() {
    let conn = setup();
    let service = registry(&conn);

    let survey_id = service.create_survey("Anonymous", "").unwrap();
    assert_eq!(service.get_survey(survey_id).unwrap().unwrap().owner, "");
}

#[test]
fn add_question_links_question_to_existing_survey() {
    let conn = setup();
    let service = registry(&conn);
    let survey_id = service.create_survey("Team Morale", BOB).unwrap();

    let question_id = service
        .add_question("How is the work-life balance?", survey_id)
        .unwrap();

    let stored = service.get_question(question_id).unwrap().unwrap();
    assert_eq!(stored.stem, "How is the work-life balance?");
    assert_eq!(stored.survey_uuid, survey_id);
}

#[test]
fn add_question_fails_for_unknown_survey() {
    let conn = setup();
    let service = registry(&conn);
    let missing = Uuid::new_v4();

    let err = service.add_question("A valid question", missing).unwrap_err();
    assert!(matches!(err, SurveyServiceError::SurveyNotFound(id) if id == missing));
    assert_eq!(err.to_string(), "Survey not found.");
    assert!(service.list_survey_questions(missing).unwrap().is_empty());
}

#[test]
fn question_insert_for_unknown_survey_is_rejected_by_store() {
    let conn = setup();
    let repo = SqliteSurveyRepository::try_new(&conn).unwrap();
    let orphan = likert_core::Question::new(Uuid::new_v4(), "Orphan");

    let err = repo.create_question(&orphan).unwrap_err();
    assert!(matches!(err, likert_core::RepoError::Db(_)));
    assert!(repo.get_question(orphan.uuid).unwrap().is_none());
}

#[test]
fn add_question_stores_stem_verbatim_including_blank() {
    let conn = setup();
    let service = registry(&conn);
    let survey_id = service.create_survey("Verbatim", ALICE).unwrap();

    let padded = service.add_question("  spaced  ", survey_id).unwrap();
    let blank = service.add_question("", survey_id).unwrap();

    assert_eq!(service.get_question(padded).unwrap().unwrap().stem, "  spaced  ");
    assert_eq!(service.get_question(blank).unwrap().unwrap().stem, "");
}

#[test]
fn list_survey_questions_keeps_insertion_order_per_survey() {
    let conn = setup();
    let service = registry(&conn);
    let first_survey = service.create_survey("First", ALICE).unwrap();
    let second_survey = service.create_survey("Second", ALICE).unwrap();

    let q1 = service.add_question("one", first_survey).unwrap();
    let other = service.add_question("other", second_survey).unwrap();
    let q2 = service.add_question("two", first_survey).unwrap();
    let q3 = service.add_question("three", first_survey).unwrap();

    let listed: Vec<_> = service
        .list_survey_questions(first_survey)
        .unwrap()
        .into_iter()
        .map(|question| question.uuid)
        .collect();
    assert_eq!(listed, vec![q1, q2, q3]);

    let second: Vec<_> = service
        .list_survey_questions(second_survey)
        .unwrap()
        .into_iter()
        .map(|question| question.uuid)
        .collect();
    assert_eq!(second, vec![other]);
}

#[test]
fn remove_question_deletes_question_and_its_responses_only() {
    let conn = setup();
    let service = registry(&conn);
    let responses = ledger(&conn);
    let survey_id = service.create_survey("Test Survey", ALICE).unwrap();
    let removed = service.add_question("Test Question", survey_id).unwrap();
    let kept = service.add_question("Other Question", survey_id).unwrap();

    responses.respond_to_question(removed, BOB, 4).unwrap();
    responses.respond_to_question(removed, ALICE, 2).unwrap();
    responses.respond_to_question(kept, BOB, 5).unwrap();

    let removal = service.remove_question(removed).unwrap();
    assert!(removal.question_deleted);
    assert_eq!(removal.responses_deleted, 2);

    assert!(service.get_question(removed).unwrap().is_none());
    assert_eq!(responses.count_responses(removed, None).unwrap(), 0);
    assert!(service.get_question(kept).unwrap().is_some());
    assert_eq!(responses.count_responses(kept, None).unwrap(), 1);
}

#[test]
fn remove_question_is_idempotent_and_clears_dangling_responses() {
    let conn = setup();
    let service = registry(&conn);
    let responses = ledger(&conn);
    let never_created = Uuid::new_v4();

    responses.respond_to_question(never_created, BOB, 3).unwrap();

    let first = service.remove_question(never_created).unwrap();
    assert!(!first.question_deleted);
    assert_eq!(first.responses_deleted, 1);

    let second = service.remove_question(never_created).unwrap();
    assert!(!second.question_deleted);
    assert_eq!(second.responses_deleted, 0);

    let repo = SqliteResponseRepository::try_new(&conn).unwrap();
    assert!(repo.list_responses(never_created).unwrap().is_empty());
}

#[test]
fn failed_question_delete_rolls_back_response_deletes() {
    let conn = setup();
    let service = registry(&conn);
    let responses = ledger(&conn);
    let survey_id = service.create_survey("Test Survey", ALICE).unwrap();
    let question = service.add_question("Test Question", survey_id).unwrap();
    responses.respond_to_question(question, BOB, 4).unwrap();

    conn.execute_batch(
        "CREATE TRIGGER questions_block_delete
         BEFORE DELETE ON questions
         BEGIN
             SELECT RAISE(ABORT, 'question delete blocked');
         END;",
    )
    .unwrap();

    let err = service.remove_question(question).unwrap_err();
    assert!(matches!(err, likert_core::RepoError::Db(_)));

    assert!(conn.is_autocommit());
    assert_eq!(responses.count_responses(question, None).unwrap(), 1);
    assert!(service.get_question(question).unwrap().is_some());
}

#[test]
fn list_surveys_by_owner_filters_owner() {
    let conn = setup();
    let service = registry(&conn);
    let alice_first = service.create_survey("A1", ALICE).unwrap();
    service.create_survey("B1", BOB).unwrap();
    let alice_second = service.create_survey("A2", ALICE).unwrap();

    let ids: Vec<_> = service
        .list_surveys_by_owner(ALICE)
        .unwrap()
        .into_iter()
        .map(|survey| survey.uuid)
        .collect();
    assert_eq!(ids, vec![alice_first, alice_second]);
}

#[test]
fn repository_rejects_invalid_survey_record() {
    let conn = setup();
    let repo = SqliteSurveyRepository::try_new(&conn).unwrap();

    let err = repo
        .create_survey(&likert_core::Survey::new(" ", ALICE))
        .unwrap_err();
    assert!(matches!(err, likert_core::RepoError::Validation(_)));
}
