//! In-memory database fixture for grading SQL challenges.
//!
//! This crate provides:
//! - `Value`: scalar cells returned by the engine
//! - `ResultSet` / `Row`: positional rows with by-name column addressing
//! - `Backend`: the engine adapter seam, implemented by `SqliteBackend`
//! - `Fixture`: a seeded database with an explicit setup/teardown lifecycle

pub mod sqlite;
pub mod value;

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

pub use sqlite::SqliteBackend;
pub use value::{Value, ValueKind};

/// An error raised by the engine while executing SQL.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ExecutionError {
    message: String,
}

impl ExecutionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<rusqlite::Error> for ExecutionError {
    fn from(err: rusqlite::Error) -> Self {
        Self::new(err.to_string())
    }
}

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("could not read seed script {}: {source}", path.display())]
    ReadSeed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("seed script failed: {0}")]
    Seed(#[source] ExecutionError),
    #[error("could not close database: {0}")]
    Teardown(#[source] ExecutionError),
}

/// The rows of one executed statement together with its column description.
///
/// `columns` is populated even when `rows` is empty. Statements that produce
/// no result columns (DDL, DML) have an empty `columns`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResultSet {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl ResultSet {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        Self { columns, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterates rows as name-addressable views.
    pub fn iter(&self) -> impl Iterator<Item = Row<'_>> {
        self.rows.iter().map(|values| Row {
            columns: &self.columns,
            values,
        })
    }
}

/// A single result row addressable by column name as well as by position.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    columns: &'a [String],
    values: &'a [Value],
}

impl<'a> Row<'a> {
    /// Looks up a column by exact name. With duplicate names the last
    /// column wins.
    pub fn get(&self, column: &str) -> Option<&'a Value> {
        self.columns
            .iter()
            .rposition(|c| c == column)
            .and_then(|idx| self.values.get(idx))
    }

    pub fn get_index(&self, idx: usize) -> Option<&'a Value> {
        self.values.get(idx)
    }

    pub fn columns(&self) -> &'a [String] {
        self.columns
    }

    pub fn values(&self) -> &'a [Value] {
        self.values
    }
}

/// A relational engine the fixture can be seeded into and queried through.
pub trait Backend {
    /// Run one or more statements, discarding any rows.
    fn execute_script(&mut self, script: &str) -> Result<(), ExecutionError>;

    /// Run a single statement and collect its rows.
    fn query(&mut self, sql: &str) -> Result<ResultSet, ExecutionError>;

    /// Release the engine.
    fn close(self) -> Result<(), ExecutionError>
    where
        Self: Sized;
}

/// A seeded database shared by every scenario of a grading run.
pub struct Fixture<B: Backend> {
    backend: B,
}

impl<B: Backend> Fixture<B> {
    /// Reads the seed script at `seed_path` and runs it once against `backend`.
    pub fn setup<P: AsRef<Path>>(backend: B, seed_path: P) -> Result<Self, FixtureError> {
        let path = seed_path.as_ref();
        let script = std::fs::read_to_string(path).map_err(|source| FixtureError::ReadSeed {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "seeding fixture");
        Self::from_script(backend, &script)
    }

    pub fn from_script(mut backend: B, script: &str) -> Result<Self, FixtureError> {
        backend.execute_script(script).map_err(FixtureError::Seed)?;
        debug!(bytes = script.len(), "seed script applied");
        Ok(Self { backend })
    }

    pub fn backend(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn teardown(self) -> Result<(), FixtureError> {
        self.backend.close().map_err(FixtureError::Teardown)?;
        info!("fixture closed");
        Ok(())
    }

    /// Runs `f` against the fixture and tears it down afterwards, whatever
    /// `f` returned. An error from `f` takes precedence over a teardown error.
    pub fn scoped<T, E>(mut self, f: impl FnOnce(&mut Self) -> Result<T, E>) -> Result<T, E>
    where
        E: From<FixtureError>,
    {
        let outcome = f(&mut self);
        match (outcome, self.teardown()) {
            (Ok(value), Ok(())) => Ok(value),
            (Ok(_), Err(err)) => Err(err.into()),
            (Err(err), closed) => {
                if let Err(close_err) = closed {
                    warn!(error = %close_err, "teardown failed after an earlier error");
                }
                Err(err)
            }
        }
    }
}
