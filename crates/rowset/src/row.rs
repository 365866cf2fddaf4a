//! Lazy, cursor-position-bound row facade.
//!
//! A [`RowView`] presents one row without materializing it: keyed and
//! indexed reads go straight through the cursor adapter and the active
//! column reader. The view is valid only while the cursor stays on the row
//! it was created for — it captures the adapter's generation at creation,
//! and any cursor-touching access after an advance fails with
//! [`RowsetError::StaleRow`]. Converting to a [`Record`] before the advance
//! detaches the data: the conversion happens exactly once and is cached for
//! this instance, and a materialized view keeps answering from its record.

use crate::cursor::{CursorAdapter, DriverCursor, RowAccess};
use crate::error::{RowsetError, RowsetResult};
use crate::mapping::RowBuilder;
use crate::record::Record;
use crate::value::Value;
use std::cell::OnceCell;

/// Lazy view over the cursor's current row.
pub struct RowView<'a, C> {
    cursor: &'a CursorAdapter<C>,
    builder: &'a dyn RowBuilder,
    bound: u64,
    materialized: OnceCell<Record>,
}

impl<'a, C: DriverCursor> RowView<'a, C> {
    pub(crate) fn new(cursor: &'a CursorAdapter<C>, builder: &'a dyn RowBuilder) -> Self {
        Self {
            cursor,
            builder,
            bound: cursor.generation(),
            materialized: OnceCell::new(),
        }
    }

    /// Number of columns. Cheap; never materializes.
    pub fn column_count(&self) -> usize {
        self.builder.column_count()
    }

    /// Resolved exposed names in column order. Cheap; never materializes.
    pub fn column_names(&self) -> Vec<String> {
        (0..self.builder.column_count())
            .map(|i| self.builder.column_name(i))
            .collect()
    }

    /// Whether this view has already been converted to a record.
    pub fn is_materialized(&self) -> bool {
        self.materialized.get().is_some()
    }

    fn ensure_fresh(&self) -> RowsetResult<()> {
        let current = self.cursor.generation();
        if current != self.bound {
            return Err(RowsetError::StaleRow {
                bound: self.bound,
                current,
            });
        }
        Ok(())
    }

    /// Value of the column whose exposed (policy-resolved) name matches.
    ///
    /// Reads on demand through the column reader; results are not cached
    /// per key — only full materialization is cached. A materialized view
    /// answers from its record instead of the cursor.
    pub fn get(&self, key: &str) -> RowsetResult<Option<Value>> {
        if let Some(record) = self.materialized.get() {
            return Ok(record.get(key).cloned());
        }
        self.ensure_fresh()?;
        match self.builder.resolve(key) {
            Some(index) => Ok(Some(self.builder.read_column(self.cursor, index)?)),
            None => Ok(None),
        }
    }

    /// Value of column `index`.
    pub fn get_by_index(&self, index: usize) -> RowsetResult<Value> {
        if let Some(record) = self.materialized.get() {
            return record
                .get_index(index)
                .cloned()
                .ok_or_else(|| RowsetError::column_not_found(index.to_string()));
        }
        self.ensure_fresh()?;
        self.builder.read_column(self.cursor, index)
    }

    /// Convert to an immutable [`Record`] via the active row builder.
    ///
    /// Materializes exactly once; repeated calls return the cached record
    /// without re-reading the cursor, even after the cursor has advanced.
    pub fn to_concrete(&self) -> RowsetResult<&Record> {
        if let Some(record) = self.materialized.get() {
            return Ok(record);
        }
        self.ensure_fresh()?;
        let record = self.builder.build_row(self.cursor)?;
        Ok(self.materialized.get_or_init(|| record))
    }
}
