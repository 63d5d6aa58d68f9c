//! `likert` command line entry point.
//!
//! # Responsibility
//! - Open (and migrate) one SQLite survey database per invocation.
//! - Map each subcommand onto one facade action or query.
//! - Print the facade's JSON payload on stdout.
//!
//! # Exit codes
//! - `0`: action succeeded or query returned.
//! - `1`: action returned an `{ "error": .. }` payload.
//! - `2`: database, logging or output failure (message on stderr).

mod seed;

use clap::{Parser, Subcommand};
use likert_core::db::{open_db, DbError};
use likert_core::{
    default_log_level, init_logging, AddQuestionArgs, CreateSurveyArgs, QuestionArgs,
    QuestionId, RepoError, RespondArgs, SqliteLikertSurvey, SurveyArgs, SurveyId,
};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

const DEFAULT_DB_PATH: &str = "likert.sqlite3";

/// Likert survey store: surveys, questions, responses and results.
#[derive(Debug, Parser)]
#[command(name = "likert")]
#[command(version)]
#[command(about = "Create Likert surveys, record responses and analyze results")]
#[command(propagate_version = true)]
struct Cli {
    /// SQLite database file, created and migrated on first use.
    #[arg(long, global = true, default_value = DEFAULT_DB_PATH)]
    db: PathBuf,

    /// Log level (trace|debug|info|warn|error); requires `--log-dir`.
    #[arg(long, global = true, requires = "log_dir")]
    log_level: Option<String>,

    /// Absolute directory for rotated log files; logging is off without it.
    #[arg(long, global = true)]
    log_dir: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create or migrate the database and report the core version.
    Init,
    /// Create a survey owned by an actor.
    CreateSurvey {
        #[arg(long)]
        title: String,
        #[arg(long)]
        owner: String,
    },
    /// Add a question to an existing survey.
    AddQuestion {
        #[arg(long)]
        survey: SurveyId,
        #[arg(long)]
        stem: String,
    },
    /// Remove a question and every response to it.
    RemoveQuestion {
        #[arg(long)]
        question: QuestionId,
    },
    /// Record or replace a responder's rating (1-5) for a question.
    Respond {
        #[arg(long)]
        question: QuestionId,
        #[arg(long)]
        responder: String,
        #[arg(long, allow_hyphen_values = true)]
        choice: f64,
    },
    /// List the surveys owned by an actor.
    Surveys {
        #[arg(long)]
        owner: String,
    },
    /// List the questions of a survey.
    Questions {
        #[arg(long)]
        survey: SurveyId,
    },
    /// Per-rating counts as a map keyed 1..5.
    Results {
        #[arg(long)]
        question: QuestionId,
    },
    /// Per-rating counts as a five-element array.
    Counts {
        #[arg(long)]
        question: QuestionId,
    },
    /// Sentiment label of a question's rating distribution.
    Sentiment {
        #[arg(long)]
        question: QuestionId,
    },
    /// Create the sample "Vibe Coding Sentiment Analysis" survey.
    SeedVibe {
        #[arg(long)]
        owner: String,
    },
}

#[derive(Debug)]
enum CliError {
    Logging(String),
    Db(DbError),
    Repo(RepoError),
    Output(serde_json::Error),
    Io(std::io::Error),
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Logging(message) => write!(f, "logging setup failed: {message}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::Output(err) => write!(f, "failed to render output: {err}"),
            Self::Io(err) => write!(f, "failed to write output: {err}"),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Logging(_) => None,
            Self::Db(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::Output(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<DbError> for CliError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<RepoError> for CliError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Output(value)
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Whether the printed payload reports success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Done,
    Rejected,
}

#[derive(Serialize)]
struct InitReport {
    db: String,
    version: &'static str,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let stdout = std::io::stdout();
    match run(cli, &mut stdout.lock()) {
        Ok(Outcome::Done) => ExitCode::SUCCESS,
        Ok(Outcome::Rejected) => ExitCode::from(1),
        Err(err) => {
            eprintln!("likert: {err}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli, out: &mut impl Write) -> Result<Outcome, CliError> {
    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir).map_err(CliError::Logging)?;
    }

    let conn = open_db(&cli.db)?;
    let likert = SqliteLikertSurvey::open(&conn)?;

    match cli.command {
        Commands::Init => print(
            out,
            &InitReport {
                db: cli.db.display().to_string(),
                version: likert_core::core_version(),
            },
        ),
        Commands::CreateSurvey { title, owner } => {
            let outcome = likert.create_survey(CreateSurveyArgs { title, owner })?;
            print_action(out, &outcome, outcome.is_err())
        }
        Commands::AddQuestion { survey, stem } => {
            let outcome = likert.add_question(AddQuestionArgs { stem, survey })?;
            print_action(out, &outcome, outcome.is_err())
        }
        Commands::RemoveQuestion { question } => {
            let outcome = likert.remove_question(QuestionArgs { question })?;
            print_action(out, &outcome, outcome.is_err())
        }
        Commands::Respond {
            question,
            responder,
            choice,
        } => {
            let outcome = likert.respond_to_question(RespondArgs {
                question,
                responder,
                choice,
            })?;
            print_action(out, &outcome, outcome.is_err())
        }
        Commands::Surveys { owner } => {
            print(out, &likert.registry().list_surveys_by_owner(&owner)?)
        }
        Commands::Questions { survey } => {
            print(out, &likert.get_survey_questions(SurveyArgs { survey })?)
        }
        Commands::Results { question } => print(
            out,
            &likert.get_question_results(QuestionArgs { question })?,
        ),
        Commands::Counts { question } => print(
            out,
            &likert.get_question_response_counts(QuestionArgs { question })?,
        ),
        Commands::Sentiment { question } => {
            print(out, &likert.analyze_sentiment(QuestionArgs { question })?)
        }
        Commands::SeedVibe { owner } => {
            let outcome = seed::seed_vibe_survey(&likert, &owner)?;
            print_action(out, &outcome, outcome.is_err())
        }
    }
}

fn print(out: &mut impl Write, payload: &impl Serialize) -> Result<Outcome, CliError> {
    serde_json::to_writer_pretty(&mut *out, payload)?;
    writeln!(out)?;
    Ok(Outcome::Done)
}

fn print_action(
    out: &mut impl Write,
    payload: &impl Serialize,
    rejected: bool,
) -> Result<Outcome, CliError> {
    print(out, payload)?;
    Ok(if rejected {
        Outcome::Rejected
    } else {
        Outcome::Done
    })
}
