//! In-memory driver.
//!
//! [`MemCursor`] and [`MemExecutor`] implement the external boundary traits
//! over plain vectors, so integration tests, benches and examples can run
//! without a live database. They double as reference implementations for
//! driver authors.

use crate::builder::CompiledStatement;
use crate::cursor::{ColumnDescriptor, DriverCursor};
use crate::error::{RowsetError, RowsetResult};
use crate::reduce::{Executor, Outcome};
use crate::value::Value;
use std::collections::VecDeque;

/// Forward-only cursor over in-memory rows.
pub struct MemCursor {
    columns: Vec<ColumnDescriptor>,
    rows: std::vec::IntoIter<Vec<Value>>,
    current: Option<Vec<Value>>,
}

impl MemCursor {
    pub fn new(columns: Vec<ColumnDescriptor>, rows: Vec<Vec<Value>>) -> Self {
        Self {
            columns,
            rows: rows.into_iter(),
            current: None,
        }
    }
}

impl DriverCursor for MemCursor {
    fn column_meta(&self) -> RowsetResult<Vec<ColumnDescriptor>> {
        Ok(self.columns.clone())
    }

    fn advance(&mut self) -> RowsetResult<bool> {
        self.current = self.rows.next();
        Ok(self.current.is_some())
    }

    fn value_at(&self, index: usize) -> RowsetResult<Value> {
        let row = self
            .current
            .as_ref()
            .ok_or_else(|| RowsetError::driver("cursor is not positioned on a row"))?;
        row.get(index)
            .cloned()
            .ok_or_else(|| RowsetError::column_not_found(index.to_string()))
    }
}

enum MemOutcome {
    Rows {
        columns: Vec<ColumnDescriptor>,
        rows: Vec<Vec<Value>>,
    },
    Updated(u64),
}

/// Scripted executor: hands out queued outcomes in order and records every
/// statement it was asked to run.
#[derive(Default)]
pub struct MemExecutor {
    outcomes: VecDeque<MemOutcome>,
    executed: Vec<CompiledStatement>,
}

impl MemExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a row-producing outcome.
    pub fn queue_rows(
        &mut self,
        columns: Vec<ColumnDescriptor>,
        rows: Vec<Vec<Value>>,
    ) -> &mut Self {
        self.outcomes.push_back(MemOutcome::Rows { columns, rows });
        self
    }

    /// Queue an update-count outcome.
    pub fn queue_updated(&mut self, count: u64) -> &mut Self {
        self.outcomes.push_back(MemOutcome::Updated(count));
        self
    }

    /// Statements executed so far, in order.
    pub fn executed(&self) -> &[CompiledStatement] {
        &self.executed
    }
}

impl Executor for MemExecutor {
    type Cursor = MemCursor;

    fn execute(&mut self, statement: &CompiledStatement) -> RowsetResult<Outcome<MemCursor>> {
        self.executed.push(statement.clone());
        match self.outcomes.pop_front() {
            Some(MemOutcome::Rows { columns, rows }) => {
                Ok(Outcome::Rows(MemCursor::new(columns, rows)))
            }
            Some(MemOutcome::Updated(count)) => Ok(Outcome::Updated(count)),
            None => Err(RowsetError::driver("no scripted outcome queued")),
        }
    }
}
