/// The musician SQL challenges.
///
/// This crate wires the shipped challenge set to the grader: it seeds an
/// in-memory SQLite fixture, runs each challenge query in order, and prints
/// the outcome of every scenario it reaches.
pub mod records;

use std::io::Write;
use std::path::Path;

use anyhow::Context;
use sqlquiz_fixture::{Fixture, SqliteBackend};
use sqlquiz_grader::{Scenario, Suite, SuiteReport};

use records::{InstrumentNameRow, InstrumentRow, MusicianRow, NumberOfTrianglesRow};

pub const DEFAULT_SEED: &str = "musician.db.sql";
pub const DEFAULT_CHALLENGES: &str = "challenges";

/// The five challenges, in the order they are graded.
pub fn challenges<P: AsRef<Path>>(challenges_dir: P) -> Suite {
    Suite::new(challenges_dir.as_ref())
        .with(Scenario::new(
            "#1: Get all musicians",
            "01select_star.sql",
            vec![
                MusicianRow::new(1, "Sun Ra"),
                MusicianRow::new(2, "Weird Guy Down the Street"),
                MusicianRow::new(3, "Julie"),
            ],
        ))
        .with(Scenario::new(
            "#2: Get the Names of the Instruments played by \"Julie\"",
            "02julies_instruments.sql",
            vec![
                InstrumentNameRow::new("Triangle"),
                InstrumentNameRow::new("Upright Bass"),
            ],
        ))
        .with(Scenario::new(
            "#3: Get the number of people that play Triangle",
            "03num_trianglers.sql",
            vec![NumberOfTrianglesRow {
                number_of_trianglers: 2,
            }],
        ))
        .with(Scenario::new(
            "#4 Get the musician with the id of 2",
            "04musician_number_2.sql",
            vec![MusicianRow::new(2, "Weird Guy Down the Street")],
        ))
        .with(Scenario::new(
            "#5 Get Instruments in alphabetical order",
            "05instruments_in_order.sql",
            vec![
                InstrumentRow::new(5, "Fiddle", 2),
                InstrumentRow::new(1, "Recorder", 1),
                InstrumentRow::new(2, "Triangle", 1),
                InstrumentRow::new(3, "Trumpet", 2),
                InstrumentRow::new(4, "Upright Bass", 2),
            ],
        ))
}

/// Seeds a fresh fixture from `seed`, grades every challenge under
/// `challenges_dir`, and closes the fixture again.
///
/// Grading failures are part of the returned report; an `Err` means the
/// fixture itself could not be set up or torn down.
pub fn grade<P, Q>(seed: P, challenges_dir: Q, out: &mut dyn Write) -> anyhow::Result<SuiteReport>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let backend = SqliteBackend::open_in_memory().context("open in-memory database")?;
    let fixture = Fixture::setup(backend, seed)?;
    let suite = challenges(challenges_dir);
    fixture.scoped(|f| Ok(suite.run(f.backend(), out)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlquiz_grader::reconcile::reconcile_all;
    use sqlquiz_grader::runner::run_query;
    use sqlquiz_grader::{GradeError, ReconcileError, Record};
    use std::fs;
    use std::path::PathBuf;

    fn crate_path(rel: &str) -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join(rel)
    }

    fn seeded() -> Fixture<SqliteBackend> {
        Fixture::setup(
            SqliteBackend::open_in_memory().unwrap(),
            crate_path(DEFAULT_SEED),
        )
        .unwrap()
    }

    fn solve<R: Record>(fixture: &mut Fixture<SqliteBackend>, file: &str) -> Vec<R> {
        let path = crate_path("solutions").join(file);
        let raw = run_query(fixture.backend(), &path, &mut Vec::<u8>::new()).unwrap();
        reconcile_all::<R>(&raw).unwrap()
    }

    /// Copies the reference solutions into a scratch directory so single
    /// files can be broken without touching the shipped ones.
    fn scratch_solutions() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for entry in fs::read_dir(crate_path("solutions")).unwrap() {
            let entry = entry.unwrap();
            fs::copy(entry.path(), dir.path().join(entry.file_name())).unwrap();
        }
        dir
    }

    #[test]
    fn select_star_returns_musicians_in_id_order() {
        let mut fixture = seeded();
        let rows: Vec<MusicianRow> = solve(&mut fixture, "01select_star.sql");
        assert_eq!(
            rows,
            vec![
                MusicianRow::new(1, "Sun Ra"),
                MusicianRow::new(2, "Weird Guy Down the Street"),
                MusicianRow::new(3, "Julie"),
            ]
        );
    }

    #[test]
    fn julies_instruments() {
        let mut fixture = seeded();
        let rows: Vec<InstrumentNameRow> = solve(&mut fixture, "02julies_instruments.sql");
        assert_eq!(
            rows,
            vec![
                InstrumentNameRow::new("Triangle"),
                InstrumentNameRow::new("Upright Bass"),
            ]
        );
    }

    #[test]
    fn two_people_play_triangle() {
        let mut fixture = seeded();
        let rows: Vec<NumberOfTrianglesRow> = solve(&mut fixture, "03num_trianglers.sql");
        assert_eq!(
            rows,
            vec![NumberOfTrianglesRow {
                number_of_trianglers: 2
            }]
        );
    }

    #[test]
    fn musician_number_two() {
        let mut fixture = seeded();
        let rows: Vec<MusicianRow> = solve(&mut fixture, "04musician_number_2.sql");
        assert_eq!(rows, vec![MusicianRow::new(2, "Weird Guy Down the Street")]);
    }

    #[test]
    fn instruments_sorted_by_name() {
        let mut fixture = seeded();
        let rows: Vec<InstrumentRow> = solve(&mut fixture, "05instruments_in_order.sql");
        let names: Vec<&str> = rows.iter().map(|r| r.instrument_name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Fiddle", "Recorder", "Triangle", "Trumpet", "Upright Bass"]
        );
        assert_eq!(rows[0], InstrumentRow::new(5, "Fiddle", 2));
    }

    #[test]
    fn reference_solutions_pass_every_challenge() {
        let mut out: Vec<u8> = Vec::new();
        let report = grade(crate_path(DEFAULT_SEED), crate_path("solutions"), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(report.is_success(), "{text}");
        assert_eq!(report.total, 5);
        assert_eq!(report.passed, 5);
        assert_eq!(text.matches("Correct!").count(), 5);
    }

    #[test]
    fn insertion_order_fails_the_ordering_challenge() {
        let dir = scratch_solutions();
        fs::write(
            dir.path().join("05instruments_in_order.sql"),
            "SELECT * FROM Instrument;",
        )
        .unwrap();

        let mut out: Vec<u8> = Vec::new();
        let report = grade(crate_path(DEFAULT_SEED), dir.path(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(report.passed, 4);
        let failure = report.failure.unwrap();
        assert_eq!(failure.title, "#5 Get Instruments in alphabetical order");
        assert!(matches!(
            failure.error,
            GradeError::ComparisonMismatch { row: 0 }
        ));
        assert!(text.contains("Query is not quite right!"));
        assert!(text.contains("Expected Results:"));
    }

    #[test]
    fn broken_first_query_stops_the_run() {
        let dir = scratch_solutions();
        fs::write(dir.path().join("01select_star.sql"), "SELECT * FROM Musicians;").unwrap();

        let mut out: Vec<u8> = Vec::new();
        let report = grade(crate_path(DEFAULT_SEED), dir.path(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(report.passed, 0);
        assert!(matches!(
            report.failure.unwrap().error,
            GradeError::QueryExecution(_)
        ));
        assert!(text.contains("Query caused following error - "));
        assert!(!text.contains("#2:"));
    }

    #[test]
    fn trailing_statement_fails_the_challenge() {
        let dir = scratch_solutions();
        fs::write(
            dir.path().join("04musician_number_2.sql"),
            "SELECT * FROM Musician WHERE MusicianId = 2; SELECT nonsense FROM nowhere;",
        )
        .unwrap();

        let mut out: Vec<u8> = Vec::new();
        let report = grade(crate_path(DEFAULT_SEED), dir.path(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(!report.is_success());
        assert_eq!(report.passed, 3);
        let failure = report.failure.unwrap();
        assert_eq!(failure.title, "#4 Get the musician with the id of 2");
        assert!(matches!(failure.error, GradeError::QueryExecution(_)));
        assert!(text.contains("Query caused following error - You can only execute one statement"));
    }

    #[test]
    fn trailing_comment_still_passes() {
        let dir = scratch_solutions();
        fs::write(
            dir.path().join("04musician_number_2.sql"),
            "SELECT * FROM Musician WHERE MusicianId = 2; -- done\n",
        )
        .unwrap();

        let report = grade(crate_path(DEFAULT_SEED), dir.path(), &mut Vec::<u8>::new()).unwrap();
        assert!(report.is_success());
    }

    #[test]
    fn shipped_templates_show_both_tables() {
        let mut out: Vec<u8> = Vec::new();
        let report = grade(
            crate_path(DEFAULT_SEED),
            crate_path(DEFAULT_CHALLENGES),
            &mut out,
        )
        .unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(report.passed, 0);
        let failure = report.failure.unwrap();
        assert_eq!(failure.title, "#1: Get all musicians");
        assert!(matches!(
            failure.error,
            GradeError::Reconcile(ReconcileError::MissingColumn { ref column }) if column == "MusicianId"
        ));
        assert!(!text.contains("Query caused following error"), "{text}");
        assert!(text.contains("Query was missing the following column: MusicianId"));
        assert!(text.contains("Query is not quite right!"));
        let yours = text.find("Your Results:").unwrap();
        let theirs = text.find("Expected Results:").unwrap();
        assert!(text[yours..theirs].contains("(no columns)"));
        assert!(text[theirs..].contains("Weird Guy Down the Street"));
        assert!(!text.contains("#2:"));
    }

    #[test]
    fn missing_seed_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = grade(dir.path().join("nope.sql"), crate_path("solutions"), &mut Vec::<u8>::new());
        assert!(result.is_err());
    }

    #[test]
    fn suite_lists_challenges_in_order() {
        let suite = challenges(DEFAULT_CHALLENGES);
        let titles: Vec<&str> = suite.titles().collect();
        assert_eq!(titles.len(), 5);
        assert!(titles[0].starts_with("#1"));
        assert!(titles[4].starts_with("#5"));
    }
}
