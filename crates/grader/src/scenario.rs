//! Scenarios and the sequential suite driver.
//!
//! A scenario is one titled grading unit: a query file and the records it
//! must produce. A [`Suite`] runs its scenarios one at a time, in declared
//! order, against a single shared backend, and stops at the first scenario
//! that fails for any reason (execution error, missing column, or a result
//! mismatch). Every failure prints its diagnostic block before the run stops.

use std::io::Write;
use std::path::{Path, PathBuf};

use sqlquiz_fixture::Backend;
use tracing::{info, warn};

use crate::compare::{compare, Verdict};
use crate::error::GradeError;
use crate::reconcile::{reconcile_all, ReconcileError};
use crate::record::Record;
use crate::report::{write_mismatch, write_title, CORRECT};
use crate::runner::run_query;

/// A scenario with its record type erased, so a suite can hold scenarios of
/// different shapes.
pub trait Grade {
    fn title(&self) -> &str;

    fn query_file(&self) -> &Path;

    /// Runs the query at `path` and prints the outcome to `out`.
    fn grade(&self, backend: &mut dyn Backend, path: &Path, out: &mut dyn Write)
        -> Result<(), GradeError>;
}

#[derive(Debug, Clone)]
pub struct Scenario<R: Record> {
    title: String,
    query_file: PathBuf,
    expected: Vec<R>,
}

impl<R: Record> Scenario<R> {
    pub fn new(title: impl Into<String>, query_file: impl Into<PathBuf>, expected: Vec<R>) -> Self {
        Self {
            title: title.into(),
            query_file: query_file.into(),
            expected,
        }
    }

    pub fn expected(&self) -> &[R] {
        &self.expected
    }
}

impl<R: Record> Grade for Scenario<R> {
    fn title(&self) -> &str {
        &self.title
    }

    fn query_file(&self) -> &Path {
        &self.query_file
    }

    fn grade(
        &self,
        backend: &mut dyn Backend,
        path: &Path,
        out: &mut dyn Write,
    ) -> Result<(), GradeError> {
        write_title(out, &self.title)?;
        let raw = run_query(backend, path, out)?;

        let actual = match reconcile_all::<R>(&raw) {
            Ok(records) => records,
            Err(err) => {
                match &err {
                    ReconcileError::MissingColumn { column } => {
                        writeln!(out, "Query was missing the following column: {column}")?
                    }
                    ReconcileError::TypeMismatch {
                        column,
                        expected,
                        found,
                    } => writeln!(
                        out,
                        "Column {column} should hold {expected} values but held {found}"
                    )?,
                }
                write_mismatch(out, &raw, &self.expected)?;
                return Err(err.into());
            }
        };

        match compare(&actual, &self.expected) {
            Verdict::Correct => {
                writeln!(out, "{CORRECT}")?;
                Ok(())
            }
            Verdict::Mismatch { row } => {
                write_mismatch(out, &raw, &self.expected)?;
                Err(GradeError::ComparisonMismatch { row })
            }
        }
    }
}

/// The scenario that stopped a run and why.
#[derive(Debug)]
pub struct ScenarioFailure {
    pub title: String,
    pub error: GradeError,
}

#[derive(Debug)]
pub struct SuiteReport {
    pub total: usize,
    pub passed: usize,
    pub failure: Option<ScenarioFailure>,
}

impl SuiteReport {
    pub fn is_success(&self) -> bool {
        self.failure.is_none() && self.passed == self.total
    }
}

/// An ordered list of scenarios whose query files live under one directory.
pub struct Suite {
    challenges_dir: PathBuf,
    scenarios: Vec<Box<dyn Grade>>,
}

impl Suite {
    pub fn new(challenges_dir: impl Into<PathBuf>) -> Self {
        Self {
            challenges_dir: challenges_dir.into(),
            scenarios: Vec::new(),
        }
    }

    pub fn push<R: Record + 'static>(&mut self, scenario: Scenario<R>) {
        self.scenarios.push(Box::new(scenario));
    }

    pub fn with<R: Record + 'static>(mut self, scenario: Scenario<R>) -> Self {
        self.push(scenario);
        self
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.scenarios.iter().map(|s| s.title())
    }

    /// Grades every scenario in order, stopping at the first failure.
    pub fn run(&self, backend: &mut dyn Backend, out: &mut dyn Write) -> SuiteReport {
        let mut passed = 0;
        for scenario in &self.scenarios {
            let path = self.challenges_dir.join(scenario.query_file());
            match scenario.grade(backend, &path, out) {
                Ok(()) => {
                    info!(title = scenario.title(), "scenario passed");
                    passed += 1;
                }
                Err(error) => {
                    warn!(title = scenario.title(), %error, "scenario failed; stopping");
                    return SuiteReport {
                        total: self.scenarios.len(),
                        passed,
                        failure: Some(ScenarioFailure {
                            title: scenario.title().to_string(),
                            error,
                        }),
                    };
                }
            }
        }
        SuiteReport {
            total: self.scenarios.len(),
            passed,
            failure: None,
        }
    }
}
