//! Shared WHERE composition for SELECT, UPDATE and DELETE.

use crate::error::{RowsetError, RowsetResult};
use crate::ident::{EntityTransform, ensure_safe, render_entity};
use crate::value::Value;

enum Condition {
    /// `col = ?`, or `col IS NULL` when the value is null (no parameter).
    Eq(String, Value),
    /// Caller-supplied clause with `?` placeholders, taken verbatim.
    Raw { clause: String, params: Vec<Value> },
}

/// Reusable WHERE specification.
///
/// Equality entries AND-join; a null value compiles to `IS NULL` and
/// contributes no parameter. Raw clauses are appended verbatim with their
/// parameters in order — the caller bears responsibility for their text.
#[derive(Default)]
pub struct WhereClause {
    conditions: Vec<Condition>,
}

impl WhereClause {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Add an AND equality condition.
    pub fn and_eq(&mut self, column: &str, value: impl Into<Value>) {
        self.conditions
            .push(Condition::Eq(column.to_string(), value.into()));
    }

    /// Add a raw AND condition with positional `?` placeholders.
    pub fn and_raw(&mut self, clause: &str, params: Vec<Value>) {
        self.conditions.push(Condition::Raw {
            clause: clause.to_string(),
            params,
        });
    }

    /// Check entity names and raw placeholder arity. No text is produced.
    pub fn validate(&self) -> RowsetResult<()> {
        for condition in &self.conditions {
            match condition {
                Condition::Eq(column, _) => ensure_safe(column)?,
                Condition::Raw { clause, params } => {
                    let placeholders = clause.matches('?').count();
                    if placeholders != params.len() {
                        return Err(RowsetError::malformed(format!(
                            "where clause '{clause}' has {placeholders} '?', but {} params provided",
                            params.len()
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    /// Append ` WHERE …` (or nothing) to `sql`, pushing parameters in
    /// clause order.
    pub fn render(
        &self,
        column_fn: Option<&EntityTransform>,
        sql: &mut String,
        params: &mut Vec<Value>,
    ) -> RowsetResult<()> {
        if self.conditions.is_empty() {
            return Ok(());
        }
        sql.push_str(" WHERE ");
        for (i, condition) in self.conditions.iter().enumerate() {
            if i > 0 {
                sql.push_str(" AND ");
            }
            match condition {
                Condition::Eq(column, value) => {
                    let column = render_entity(column, column_fn)?;
                    if value.is_null() {
                        sql.push_str(&column);
                        sql.push_str(" IS NULL");
                    } else {
                        sql.push_str(&column);
                        sql.push_str(" = ?");
                        params.push(value.clone());
                    }
                }
                Condition::Raw {
                    clause,
                    params: raw_params,
                } => {
                    sql.push_str(clause);
                    params.extend(raw_params.iter().cloned());
                }
            }
        }
        Ok(())
    }
}
