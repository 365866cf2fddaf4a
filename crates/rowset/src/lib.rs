//! # rowset
//!
//! A driver-agnostic data-access core: compile structured statement specs
//! into parameterized SQL, execute them through an opaque [`Executor`], and
//! turn the resulting forward-only cursor into application data — eagerly
//! materialized records, or a lazily-reduced stream that never materializes
//! rows the caller does not touch.
//!
//! ## Features
//!
//! - **Statement builders**: insert / multi-row insert / update / delete /
//!   select specs compiled to SQL text plus an ordered `?` parameter list,
//!   with identifier-injection defenses and dialect-specific pagination
//! - **Safe defaults**: full validation before any SQL text exists; DELETE
//!   requires WHERE, UPDATE requires SET
//! - **Pluggable row building**: map-shaped or array-shaped records, column
//!   naming policies, per-column reader hooks
//! - **Lazy row views**: cursor-position-bound access with runtime stale
//!   detection, memoized materialization
//! - **Driver-neutral**: the driver boundary is two small traits
//!   ([`DriverCursor`], [`Executor`]); an in-memory implementation ships in
//!   [`mem`] for tests and demos
//!
//! ## Quick start
//!
//! ```ignore
//! use rowset::{fetch_all, select, FetchOptions, StatementBuilder};
//!
//! let stmt = {
//!     let mut s = select("person");
//!     s.and_eq("active", true).order_by("name").limit(10);
//!     s.build()?
//! };
//! let people = fetch_all(&mut executor, &stmt, &FetchOptions::default())?;
//! for person in &people {
//!     println!("{:?}", person.get("person/name"));
//! }
//! # Ok::<(), rowset::RowsetError>(())
//! ```
//!
//! Streaming callers reduce lazily instead:
//!
//! ```ignore
//! use std::ops::ControlFlow;
//! use rowset::reduce_rows;
//!
//! let names = reduce_rows(&mut executor, &stmt, &options, Vec::new(), |mut acc, row| {
//!     if let Some(name) = row.get("person/name")? {
//!         acc.push(name);
//!     }
//!     Ok(ControlFlow::Continue(acc))
//! })?;
//! # Ok::<(), rowset::RowsetError>(())
//! ```

pub mod builder;
pub mod cursor;
pub mod error;
pub mod ident;
pub mod mapping;
pub mod mem;
pub mod naming;
pub mod prelude;
pub mod record;
pub mod reduce;
pub mod row;
pub mod value;

pub use builder::{
    CompiledBatch, CompiledStatement, DeleteBuilder, Direction, InsertBuilder, InsertManyBuilder,
    PageDialect, Pagination, SelectBuilder, SelectColumn, StatementBuilder, UpdateBuilder,
    WhereClause, delete, insert, insert_many, select, update,
};
pub use cursor::{ColumnDescriptor, CursorAdapter, DriverCursor, RowAccess, SqlType};
pub use error::{RowsetError, RowsetResult};
pub use ident::EntityTransform;
pub use mapping::{
    ArrayRows, CollectAll, ColumnReader, MapRows, ResultSetBuilder, RowBuilder, RowBuilderFactory,
    RowState, default_reader,
};
pub use naming::{Casing, NamingPolicy, lower, upper};
pub use record::{Record, ResultSet, UPDATE_COUNT};
pub use reduce::{Executor, FetchOptions, Outcome, fetch_all, fetch_one, reduce_rows};
pub use row::RowView;
pub use value::Value;
