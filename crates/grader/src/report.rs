/// Human-readable grading output: scenario titles and result tables.
use std::fmt::Display;
use std::io::{self, Write};

use sqlquiz_fixture::ResultSet;
use tabled::builder::Builder;
use tabled::settings::Style;

use crate::record::Record;

pub const CORRECT: &str = "Correct!";
pub const NOT_QUITE_RIGHT: &str = "Query is not quite right!";

/// Writes `title` framed by dashes of the same length.
pub fn write_title(out: &mut dyn Write, title: &str) -> io::Result<()> {
    let rule = "-".repeat(title.chars().count());
    writeln!(out)?;
    writeln!(out, "{rule}")?;
    writeln!(out, "{title}")?;
    writeln!(out, "{rule}")
}

pub fn render_table<H, C, R>(headers: H, rows: R) -> String
where
    H: IntoIterator,
    H::Item: Display,
    R: IntoIterator,
    R::Item: IntoIterator<Item = C>,
    C: Display,
{
    let headers: Vec<String> = headers.into_iter().map(|h| h.to_string()).collect();
    if headers.is_empty() {
        return "(no columns)".to_string();
    }

    let mut builder = Builder::default();
    builder.push_record(headers);
    for row in rows {
        builder.push_record(row.into_iter().map(|cell| cell.to_string()));
    }
    let mut table = builder.build();
    table.with(Style::ascii());
    table.to_string()
}

/// Every column the query actually returned, including ones the expected
/// shape does not declare.
pub fn render_actual(result: &ResultSet) -> String {
    render_table(&result.columns, &result.rows)
}

/// Only the declared columns of `R`, one row per expected record.
pub fn render_expected<R: Record>(expected: &[R]) -> String {
    render_table(R::SHAPE.columns(), expected.iter().map(Record::values))
}

/// Writes the failure notice followed by the actual and expected tables.
pub fn write_mismatch<R: Record>(
    out: &mut dyn Write,
    actual: &ResultSet,
    expected: &[R],
) -> io::Result<()> {
    writeln!(out, "{NOT_QUITE_RIGHT}")?;
    writeln!(out)?;
    writeln!(out, "Your Results:")?;
    writeln!(out, "{}", render_actual(actual))?;
    writeln!(out)?;
    writeln!(out, "Expected Results:")?;
    writeln!(out, "{}", render_expected(expected))
}
