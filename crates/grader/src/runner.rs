/// Reads a query file and executes it against the fixture.
use std::io::Write;
use std::path::Path;

use sqlquiz_fixture::{Backend, ResultSet};
use tracing::{debug, warn};

use crate::error::GradeError;

/// Executes the contents of `path` verbatim.
///
/// The file is read on every call so it can be edited between runs.
/// Execution errors are written to `out` and then returned unchanged.
pub fn run_query<B: Backend + ?Sized>(
    backend: &mut B,
    path: &Path,
    out: &mut dyn Write,
) -> Result<ResultSet, GradeError> {
    let sql = std::fs::read_to_string(path).map_err(|source| GradeError::ReadQuery {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "executing query");

    match backend.query(&sql) {
        Ok(result) => Ok(result),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "query failed");
            writeln!(out, "Query caused following error - {err}")?;
            Err(GradeError::QueryExecution(err))
        }
    }
}
