/// Grading of SQL challenge queries against a seeded fixture.
///
/// Modules:
/// - `record`: statically declared record shapes (`Record`, `record!`)
/// - `reconcile`: by-name conversion of result rows into records
/// - `compare`: ordered structural comparison of records
/// - `report`: titles and side-by-side result tables
/// - `runner`: reading and executing query files
/// - `scenario`: titled scenarios and the sequential suite driver

pub mod compare;
pub mod error;
pub mod reconcile;
pub mod record;
pub mod report;
pub mod runner;
pub mod scenario;

pub use error::GradeError;
pub use reconcile::ReconcileError;
pub use record::{Field, FromValue, Record, Shape};
pub use scenario::{Grade, Scenario, ScenarioFailure, Suite, SuiteReport};
pub use sqlquiz_fixture::{Backend, ResultSet, Row, Value, ValueKind};
