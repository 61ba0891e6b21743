/// SQLite engine adapter backed by `rusqlite`.
use rusqlite::{Batch, Connection};
use tracing::debug;

use crate::{Backend, ExecutionError, ResultSet, Value};

pub struct SqliteBackend {
    conn: Connection,
}

impl SqliteBackend {
    /// Open a private in-memory SQLite database.
    pub fn open_in_memory() -> Result<Self, ExecutionError> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }
}

impl Backend for SqliteBackend {
    fn execute_script(&mut self, script: &str) -> Result<(), ExecutionError> {
        self.conn.execute_batch(script)?;
        Ok(())
    }

    fn query(&mut self, sql: &str) -> Result<ResultSet, ExecutionError> {
        // Blank and comment-only text runs as an empty statement.
        if is_blank_sql(sql) {
            debug!("query has no statement");
            return Ok(ResultSet::default());
        }

        let mut batch = Batch::new(&self.conn, sql);
        let Some(mut stmt) = batch.next()? else {
            return Ok(ResultSet::default());
        };
        // Only trailing whitespace and comments may follow the first
        // statement. Nothing is executed otherwise.
        if !matches!(batch.next(), Ok(None)) {
            return Err(ExecutionError::new(
                "You can only execute one statement at a time.",
            ));
        }

        // Column names come from the prepared statement so that empty
        // results still carry their description.
        let columns: Vec<String> = stmt
            .column_names()
            .into_iter()
            .map(str::to_string)
            .collect();
        let col_count = columns.len();

        let mut rows = stmt.query([])?;
        let mut collected = Vec::new();
        while let Some(row) = rows.next()? {
            let mut values = Vec::with_capacity(col_count);
            for idx in 0..col_count {
                values.push(Value::from(row.get_ref(idx)?));
            }
            collected.push(values);
        }

        debug!(columns = col_count, rows = collected.len(), "query returned");
        Ok(ResultSet::new(columns, collected))
    }

    fn close(self) -> Result<(), ExecutionError> {
        self.conn.close().map_err(|(_, err)| err.into())
    }
}

/// True when `sql` holds nothing but whitespace, `;`, and comments.
fn is_blank_sql(sql: &str) -> bool {
    let mut rest = sql.trim_start();
    loop {
        if rest.is_empty() {
            return true;
        }
        if let Some(after) = rest.strip_prefix("--") {
            rest = after.find('\n').map_or("", |idx| &after[idx + 1..]);
        } else if let Some(after) = rest.strip_prefix("/*") {
            rest = after.find("*/").map_or("", |idx| &after[idx + 2..]);
        } else if let Some(after) = rest.strip_prefix(';') {
            rest = after;
        } else {
            return false;
        }
        rest = rest.trim_start();
    }
}
