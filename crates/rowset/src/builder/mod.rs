//! Structured SQL statement builder.
//!
//! Pure compilation from statement specs to SQL text plus an ordered
//! parameter list — nothing here talks to a driver.
//!
//! ## Design
//!
//! - Placeholders are positional `?`, managed automatically; parameter order
//!   always matches placeholder order in the text.
//! - Specs validate fully before any SQL text is assembled: entity names go
//!   through the injection denylist, structural requirements (non-empty
//!   inserts, equal-length row lists, coherent pagination options) are
//!   checked first, and nothing partial is ever produced.
//! - Safe defaults: DELETE requires WHERE unless explicitly allowed;
//!   UPDATE requires SET.

pub mod delete;
pub mod insert;
pub mod select;
pub mod traits;
pub mod update;
pub mod where_clause;

pub use delete::DeleteBuilder;
pub use insert::{InsertBuilder, InsertManyBuilder};
pub use select::{Direction, PageDialect, Pagination, SelectBuilder, SelectColumn};
pub use traits::StatementBuilder;
pub use update::UpdateBuilder;
pub use where_clause::WhereClause;

use crate::value::Value;

/// SQL text plus its ordered parameter list.
///
/// Parameter order exactly matches `?` placeholder order in the text.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledStatement {
    pub sql: String,
    pub params: Vec<Value>,
}

impl CompiledStatement {
    pub fn new(sql: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }

    /// Raw SQL with no parameters.
    pub fn raw(sql: impl Into<String>) -> Self {
        Self::new(sql, Vec::new())
    }
}

/// A single value-group template with parameters grouped per row, for
/// batched submission of a multi-row insert.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledBatch {
    pub sql: String,
    pub param_groups: Vec<Vec<Value>>,
}

/// Start an INSERT spec for `table`.
pub fn insert(table: &str) -> InsertBuilder {
    InsertBuilder::new(table)
}

/// Start a multi-row INSERT spec for `table` over `columns`.
pub fn insert_many(table: &str, columns: &[&str]) -> InsertManyBuilder {
    InsertManyBuilder::new(table, columns)
}

/// Start an UPDATE spec for `table`.
pub fn update(table: &str) -> UpdateBuilder {
    UpdateBuilder::new(table)
}

/// Start a DELETE spec for `table`.
pub fn delete(table: &str) -> DeleteBuilder {
    DeleteBuilder::new(table)
}

/// Start a SELECT spec for `table`.
pub fn select(table: &str) -> SelectBuilder {
    SelectBuilder::new(table)
}

#[cfg(test)]
mod tests;
