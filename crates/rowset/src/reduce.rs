//! Statement execution and row reduction.
//!
//! [`Executor`] is the opaque statement-execution primitive supplied by the
//! connection layer: it consumes a [`CompiledStatement`] and yields either a
//! cursor or an affected-row count. The engine drives the cursor forward,
//! sequentially and single-threaded — the only blocking point is the driver
//! call itself.
//!
//! Two consumption paths:
//!
//! - **eager** ([`fetch_all`], [`fetch_one`]): every row is materialized
//!   through the configured strategies. No back-pressure exists between the
//!   driver and the caller; a slow consumer buffers the whole result.
//! - **lazy** ([`reduce_rows`]): each row is handed to the caller's step as
//!   a [`RowView`] that dies on the next advance unless converted. Nothing
//!   is materialized unless the step asks for it.

use crate::builder::CompiledStatement;
use crate::cursor::{CursorAdapter, DriverCursor};
use crate::error::RowsetResult;
use crate::mapping::{ArrayRows, CollectAll, MapRows, ResultSetBuilder, RowBuilderFactory};
use crate::record::{Record, ResultSet};
use crate::row::RowView;
use std::ops::ControlFlow;
use std::sync::Arc;

/// What a statement execution produced.
pub enum Outcome<C> {
    /// A result cursor positioned before the first row.
    Rows(C),
    /// No row data; the driver-reported affected-row count.
    Updated(u64),
}

/// The opaque statement-execution primitive.
///
/// Implementations live in the connection layer; they receive only compiled
/// statements (SQL text plus ordered parameters), never statement specs or
/// builder internals.
pub trait Executor {
    type Cursor: DriverCursor;

    fn execute(&mut self, statement: &CompiledStatement) -> RowsetResult<Outcome<Self::Cursor>>;
}

/// Per-call configuration for the reduction engine.
#[derive(Clone)]
pub struct FetchOptions {
    pub row: Arc<dyn RowBuilderFactory>,
    pub result: Arc<dyn ResultSetBuilder>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            row: Arc::new(MapRows::new()),
            result: Arc::new(CollectAll),
        }
    }
}

impl FetchOptions {
    /// Map-shaped records with qualified names (the default).
    pub fn map_rows() -> Self {
        Self::default()
    }

    /// Array-shaped records with per-statement shared names.
    pub fn array_rows() -> Self {
        Self::default().with_row(Arc::new(ArrayRows::new()))
    }

    pub fn with_row(mut self, row: Arc<dyn RowBuilderFactory>) -> Self {
        self.row = row;
        self
    }

    pub fn with_result(mut self, result: Arc<dyn ResultSetBuilder>) -> Self {
        self.result = result;
        self
    }
}

/// Execute and materialize every row through the configured strategies.
///
/// A statement without row data yields the single synthetic update-count
/// record; builder options never alter its shape.
pub fn fetch_all<E: Executor>(
    executor: &mut E,
    statement: &CompiledStatement,
    options: &FetchOptions,
) -> RowsetResult<ResultSet> {
    match executor.execute(statement)? {
        Outcome::Updated(count) => Ok(ResultSet::new(vec![Record::update_count(count)])),
        Outcome::Rows(cursor) => {
            let adapter = CursorAdapter::new(cursor)?;
            let builder = options.row.bind(adapter.columns())?;
            let results = &*options.result;
            let mut state = results.new_result_set();
            while adapter.advance()? {
                let record = builder.build_row(&adapter)?;
                state = results.add_row(state, record);
            }
            #[cfg(feature = "tracing")]
            tracing::debug!(
                target: "rowset.fetch",
                rows = state.len(),
                "materialized result set"
            );
            Ok(results.finalize(state))
        }
    }
}

/// Execute and materialize the first row, if any.
///
/// A statement without row data yields the synthetic update-count record.
pub fn fetch_one<E: Executor>(
    executor: &mut E,
    statement: &CompiledStatement,
    options: &FetchOptions,
) -> RowsetResult<Option<Record>> {
    match executor.execute(statement)? {
        Outcome::Updated(count) => Ok(Some(Record::update_count(count))),
        Outcome::Rows(cursor) => {
            let adapter = CursorAdapter::new(cursor)?;
            let builder = options.row.bind(adapter.columns())?;
            if adapter.advance()? {
                Ok(Some(builder.build_row(&adapter)?))
            } else {
                Ok(None)
            }
        }
    }
}

/// Execute and reduce the rows lazily.
///
/// Each row reaches `step` as a [`RowView`]; nothing is materialized unless
/// the step converts the view. `ControlFlow::Break` stops the reduction
/// early with the given accumulator. A statement without row data feeds the
/// step zero rows and returns `init` unchanged.
pub fn reduce_rows<E, T, F>(
    executor: &mut E,
    statement: &CompiledStatement,
    options: &FetchOptions,
    init: T,
    mut step: F,
) -> RowsetResult<T>
where
    E: Executor,
    F: FnMut(T, &RowView<'_, E::Cursor>) -> RowsetResult<ControlFlow<T, T>>,
{
    match executor.execute(statement)? {
        Outcome::Updated(_) => Ok(init),
        Outcome::Rows(cursor) => {
            let adapter = CursorAdapter::new(cursor)?;
            let builder = options.row.bind(adapter.columns())?;
            let mut acc = init;
            while adapter.advance()? {
                let view = RowView::new(&adapter, &*builder);
                match step(acc, &view)? {
                    ControlFlow::Continue(next) => acc = next,
                    ControlFlow::Break(done) => return Ok(done),
                }
            }
            Ok(acc)
        }
    }
}
