//! Convenient imports for typical `rowset` usage.
//!
//! This module is intentionally small and focused on the most common APIs so
//! examples can start with:
//!
//! ```ignore
//! use rowset::prelude::*;
//! ```

pub use crate::{
    CompiledStatement, DriverCursor, Executor, FetchOptions, NamingPolicy, Outcome, Record,
    ResultSet, RowView, RowsetError, RowsetResult, StatementBuilder, Value, delete, fetch_all,
    fetch_one, insert, insert_many, reduce_rows, select, update,
};
