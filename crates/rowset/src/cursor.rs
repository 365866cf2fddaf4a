//! The external cursor boundary and its adapter.
//!
//! [`DriverCursor`] is the contract a driver implements: a mutable,
//! forward-only pointer into one statement's result stream. The core never
//! retries a failed cursor operation — faults are wrapped into
//! [`RowsetError::Driver`] at the boundary and surfaced unchanged; retry
//! policy belongs to the connection layer.
//!
//! [`CursorAdapter`] is the thin façade the reduction engine works against.
//! It derives the column descriptors once per statement and maintains a
//! generation counter that moves on every advance; lazy row views capture
//! the generation at creation, which is how retained views are detected as
//! stale at runtime.

use crate::error::{RowsetError, RowsetResult};
use crate::value::Value;
use serde::Serialize;
use std::cell::{Cell, RefCell};
use std::sync::Arc;

/// Coarse, driver-neutral column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SqlType {
    Boolean,
    Integer,
    Float,
    Text,
    Binary,
    Date,
    Time,
    Timestamp,
    Uuid,
    Json,
    Other,
}

/// Per-column metadata, derived once per statement from cursor metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnDescriptor {
    pub index: usize,
    pub label: String,
    /// Source-table qualifier; empty when the driver does not know it.
    pub qualifier: String,
    pub sql_type: SqlType,
}

impl ColumnDescriptor {
    pub fn new(
        index: usize,
        label: impl Into<String>,
        qualifier: impl Into<String>,
        sql_type: SqlType,
    ) -> Self {
        Self {
            index,
            label: label.into(),
            qualifier: qualifier.into(),
            sql_type,
        }
    }
}

/// External, mutable, forward-only cursor over one statement's results.
///
/// Implementations wrap any underlying I/O or protocol fault in
/// [`RowsetError::Driver`]; the core propagates such errors without retrying.
pub trait DriverCursor {
    /// Column metadata for this result. Called once, before the first advance.
    fn column_meta(&self) -> RowsetResult<Vec<ColumnDescriptor>>;

    /// Move to the next row. Returns `false` once the result is exhausted.
    fn advance(&mut self) -> RowsetResult<bool>;

    /// Raw value of column `index` in the current row.
    fn value_at(&self, index: usize) -> RowsetResult<Value>;
}

/// Object-safe read surface over the cursor's current row.
///
/// Row-builder strategies take this instead of a concrete adapter so they
/// stay usable as trait objects.
pub trait RowAccess {
    fn column_count(&self) -> usize;
    fn descriptor(&self, index: usize) -> RowsetResult<&ColumnDescriptor>;
    fn raw(&self, index: usize) -> RowsetResult<Value>;
}

/// Thin façade over a [`DriverCursor`].
///
/// Owned by the reduction engine for the duration of one statement
/// execution. Interior mutability lets lazily retained row views share the
/// adapter; the generation counter is what turns them stale when the cursor
/// moves on. Deliberately not `Sync` — one active cursor per logical
/// operation, serialized by the connection layer.
pub struct CursorAdapter<C> {
    inner: RefCell<C>,
    columns: Arc<[ColumnDescriptor]>,
    generation: Cell<u64>,
}

impl<C: DriverCursor> CursorAdapter<C> {
    /// Wrap a cursor, deriving its column descriptors once.
    pub fn new(cursor: C) -> RowsetResult<Self> {
        let columns: Arc<[ColumnDescriptor]> = cursor.column_meta()?.into();
        Ok(Self {
            inner: RefCell::new(cursor),
            columns,
            generation: Cell::new(0),
        })
    }

    /// Advance to the next row. Every call moves the generation, including
    /// the one that exhausts the cursor.
    pub fn advance(&self) -> RowsetResult<bool> {
        let more = self.inner.borrow_mut().advance()?;
        self.generation.set(self.generation.get() + 1);
        Ok(more)
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// The once-derived descriptor slice, shared with builder strategies.
    pub fn columns(&self) -> &Arc<[ColumnDescriptor]> {
        &self.columns
    }

    pub fn descriptor(&self, index: usize) -> RowsetResult<&ColumnDescriptor> {
        self.columns
            .get(index)
            .ok_or_else(|| RowsetError::column_not_found(index.to_string()))
    }

    /// Raw value of column `index` in the current row.
    pub fn value_by_index(&self, index: usize) -> RowsetResult<Value> {
        self.descriptor(index)?;
        self.inner.borrow().value_at(index)
    }

    /// Raw value of the first column whose label matches.
    pub fn value_by_label(&self, label: &str) -> RowsetResult<Value> {
        let column = self
            .columns
            .iter()
            .find(|c| c.label == label)
            .ok_or_else(|| RowsetError::column_not_found(label))?;
        self.inner.borrow().value_at(column.index)
    }

    /// Current position token. Row views capture this at creation.
    pub fn generation(&self) -> u64 {
        self.generation.get()
    }
}

impl<C: DriverCursor> RowAccess for CursorAdapter<C> {
    fn column_count(&self) -> usize {
        CursorAdapter::column_count(self)
    }

    fn descriptor(&self, index: usize) -> RowsetResult<&ColumnDescriptor> {
        CursorAdapter::descriptor(self, index)
    }

    fn raw(&self, index: usize) -> RowsetResult<Value> {
        self.value_by_index(index)
    }
}
