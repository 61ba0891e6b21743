/// Row reconciliation: converts name-addressable rows into records.
///
/// Reconciliation is by name and partial. Extra columns in a row are
/// ignored, but every column the record shape declares must be present.
use sqlquiz_fixture::{ResultSet, Row, ValueKind};
use thiserror::Error;
use tracing::debug;

use crate::record::{FromValue, Record};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReconcileError {
    #[error("query was missing the following column: {column}")]
    MissingColumn { column: String },
    #[error("column {column} should hold {expected} values but held {found}")]
    TypeMismatch {
        column: String,
        expected: ValueKind,
        found: ValueKind,
    },
}

/// Pulls a single named column out of `row` as `T`.
pub fn pull<T: FromValue>(row: &Row<'_>, column: &str) -> Result<T, ReconcileError> {
    let value = row
        .get(column)
        .ok_or_else(|| ReconcileError::MissingColumn {
            column: column.to_string(),
        })?;
    T::from_value(value).ok_or_else(|| ReconcileError::TypeMismatch {
        column: column.to_string(),
        expected: T::KIND,
        found: value.kind(),
    })
}

pub fn reconcile<R: Record>(row: &Row<'_>) -> Result<R, ReconcileError> {
    R::from_row(row)
}

/// Reconciles every row of `result` against `R`'s shape.
///
/// The shape is checked against the column description first, so a missing
/// column is reported even when the query returned no rows.
pub fn reconcile_all<R: Record>(result: &ResultSet) -> Result<Vec<R>, ReconcileError> {
    if let Some(column) = R::SHAPE
        .columns()
        .find(|name| !result.columns.iter().any(|c| c == name))
    {
        debug!(shape = R::SHAPE.name, column, "result lacks a declared column");
        return Err(ReconcileError::MissingColumn {
            column: column.to_string(),
        });
    }

    result.iter().map(|row| reconcile::<R>(&row)).collect()
}
