//! Sample survey seeding.
//!
//! # Responsibility
//! - Create the "Vibe Coding Sentiment Analysis" survey for one owner.
//! - Add the bundled question list, skipping questions the registry rejects.

use likert_core::{
    ActionResult, AddQuestionArgs, CreateSurveyArgs, LikertSurvey, RepoResult,
    ResponseRepository, SurveyId, SurveyRepository,
};
use log::{info, warn};
use serde::Serialize;

pub const VIBE_SURVEY_TITLE: &str = "Vibe Coding Sentiment Analysis";
const PROGRESS_EVERY: usize = 10;

const VIBE_QUESTIONS: &str = include_str!("data/vibe_questions.txt");

/// Summary printed after seeding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub survey: SurveyId,
    pub added: usize,
    pub failed: usize,
    pub total: usize,
}

/// Bundled question stems, one per non-empty line.
pub fn vibe_questions() -> impl Iterator<Item = &'static str> {
    VIBE_QUESTIONS
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
}

/// Creates the sample survey and adds every bundled question.
///
/// A rejected survey is returned as the error envelope. Rejected questions are
/// logged and counted in `failed`; store failures abort the run.
pub fn seed_vibe_survey<S, R>(
    likert: &LikertSurvey<S, R>,
    owner: &str,
) -> RepoResult<ActionResult<SeedReport>>
where
    S: SurveyRepository,
    R: ResponseRepository + Clone,
{
    let survey = match likert
        .create_survey(CreateSurveyArgs {
            title: VIBE_SURVEY_TITLE.to_string(),
            owner: owner.to_string(),
        })?
        .into_result()
    {
        Ok(created) => created.survey,
        Err(envelope) => return Ok(ActionResult::Err(envelope)),
    };

    let total = vibe_questions().count();
    let mut added = 0;
    let mut failed = 0;
    for stem in vibe_questions() {
        let outcome = likert.add_question(AddQuestionArgs {
            stem: stem.to_string(),
            survey,
        })?;
        if let Some(message) = outcome.error_message() {
            failed += 1;
            warn!(
                "event=seed_question module=cli status=error survey={} error={}",
                survey, message
            );
            continue;
        }

        added += 1;
        if added % PROGRESS_EVERY == 0 {
            info!(
                "event=seed_progress module=cli status=ok survey={} added={} total={}",
                survey, added, total
            );
        }
    }

    info!(
        "event=seed_done module=cli status=ok survey={} added={} failed={}",
        survey, added, failed
    );
    Ok(ActionResult::Ok(SeedReport {
        survey,
        added,
        failed,
        total,
    }))
}

#[cfg(test)]
mod tests {
    use super::{seed_vibe_survey, vibe_questions, VIBE_SURVEY_TITLE};
    use likert_core::db::open_db_in_memory;
    use likert_core::{ActionResult, SqliteLikertSurvey, SurveyArgs};

    #[test]
    fn bundled_questions_are_non_empty_and_unique() {
        let stems = vibe_questions().collect::<Vec<_>>();
        assert!(stems.len() >= 80);
        let mut sorted = stems.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), stems.len());
    }

    #[test]
    fn seeding_adds_every_question_in_order() {
        let conn = open_db_in_memory().unwrap();
        let likert = SqliteLikertSurvey::open(&conn).unwrap();

        let report = seed_vibe_survey(&likert, "user:Alice")
            .unwrap()
            .into_result()
            .unwrap();
        assert_eq!(report.failed, 0);
        assert_eq!(report.added, report.total);

        let survey = likert
            .registry()
            .get_survey(report.survey)
            .unwrap()
            .unwrap();
        assert_eq!(survey.title, VIBE_SURVEY_TITLE);
        assert_eq!(survey.owner, "user:Alice");

        let stems = likert
            .get_survey_questions(SurveyArgs {
                survey: report.survey,
            })
            .unwrap()
            .into_iter()
            .map(|question| question.stem)
            .collect::<Vec<_>>();
        assert_eq!(stems, vibe_questions().collect::<Vec<_>>());
    }

    #[test]
    fn seeding_twice_creates_two_surveys() {
        let conn = open_db_in_memory().unwrap();
        let likert = SqliteLikertSurvey::open(&conn).unwrap();

        let first = seed_vibe_survey(&likert, "user:Alice").unwrap();
        let second = seed_vibe_survey(&likert, "user:Alice").unwrap();
        let (ActionResult::Ok(first), ActionResult::Ok(second)) = (first, second) else {
            panic!("seeding should succeed");
        };
        assert_ne!(first.survey, second.survey);
        assert_eq!(
            likert
                .registry()
                .list_surveys_by_owner("user:Alice")
                .unwrap()
                .len(),
            2
        );
    }
}
