use std::io;
use std::path::PathBuf;

use sqlquiz_fixture::ExecutionError;
use thiserror::Error;

use crate::reconcile::ReconcileError;

/// Why a scenario was graded as failed.
#[derive(Debug, Error)]
pub enum GradeError {
    #[error("could not read query file {}: {source}", path.display())]
    ReadQuery {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("query failed: {0}")]
    QueryExecution(#[from] ExecutionError),
    #[error(transparent)]
    Reconcile(#[from] ReconcileError),
    #[error("results differ from the expected rows starting at row {row}")]
    ComparisonMismatch { row: usize },
    #[error("could not write report: {0}")]
    Output(#[from] io::Error),
}
