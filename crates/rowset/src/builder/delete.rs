use super::traits::StatementBuilder;
use super::where_clause::WhereClause;
use super::CompiledStatement;
use crate::error::{RowsetError, RowsetResult};
use crate::ident::{EntityTransform, ensure_safe, render_entity};
use crate::value::Value;

/// DELETE builder.
///
/// A delete without any WHERE condition is rejected unless
/// [`allow_all`](DeleteBuilder::allow_all) was called.
pub struct DeleteBuilder {
    table: String,
    where_clause: WhereClause,
    allow_all: bool,
    table_fn: Option<EntityTransform>,
    column_fn: Option<EntityTransform>,
    suffix: Option<String>,
}

impl DeleteBuilder {
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            where_clause: WhereClause::new(),
            allow_all: false,
            table_fn: None,
            column_fn: None,
            suffix: None,
        }
    }

    /// Permit a whole-table delete (no WHERE).
    pub fn allow_all(&mut self) -> &mut Self {
        self.allow_all = true;
        self
    }

    /// Add an AND equality condition (null => `IS NULL`).
    pub fn and_eq(&mut self, column: &str, value: impl Into<Value>) -> &mut Self {
        self.where_clause.and_eq(column, value);
        self
    }

    /// Add a raw AND condition with positional `?` placeholders.
    pub fn and_raw(&mut self, clause: &str, params: Vec<Value>) -> &mut Self {
        self.where_clause.and_raw(clause, params);
        self
    }

    /// Transform applied to the table name.
    pub fn table_entities(&mut self, transform: EntityTransform) -> &mut Self {
        self.table_fn = Some(transform);
        self
    }

    /// Transform applied to column names.
    pub fn column_entities(&mut self, transform: EntityTransform) -> &mut Self {
        self.column_fn = Some(transform);
        self
    }

    /// Trailing text appended verbatim, no validation.
    pub fn suffix(&mut self, text: &str) -> &mut Self {
        self.suffix = Some(text.to_string());
        self
    }
}

impl StatementBuilder for DeleteBuilder {
    fn validate(&self) -> RowsetResult<()> {
        ensure_safe(&self.table)?;
        self.where_clause.validate()?;
        if self.where_clause.is_empty() && !self.allow_all {
            return Err(RowsetError::malformed(
                "delete without WHERE requires allow_all",
            ));
        }
        Ok(())
    }

    fn compile(&self) -> RowsetResult<CompiledStatement> {
        let table = render_entity(&self.table, self.table_fn.as_ref())?;
        let mut sql = format!("DELETE FROM {table}");
        let mut params = Vec::new();
        self.where_clause
            .render(self.column_fn.as_ref(), &mut sql, &mut params)?;
        if let Some(suffix) = &self.suffix {
            sql.push(' ');
            sql.push_str(suffix);
        }
        Ok(CompiledStatement::new(sql, params))
    }
}
