use super::traits::StatementBuilder;
use super::where_clause::WhereClause;
use super::CompiledStatement;
use crate::error::{RowsetError, RowsetResult};
use crate::ident::{EntityTransform, ensure_safe, render_entity};
use crate::value::Value;

/// UPDATE builder.
///
/// Parameter order is SET params followed by WHERE params. A null SET value
/// binds as a parameter (`col = ?`); only WHERE equality treats null as
/// `IS NULL`.
pub struct UpdateBuilder {
    table: String,
    set_pairs: Vec<(String, Value)>,
    where_clause: WhereClause,
    table_fn: Option<EntityTransform>,
    column_fn: Option<EntityTransform>,
    suffix: Option<String>,
}

impl UpdateBuilder {
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            set_pairs: Vec::new(),
            where_clause: WhereClause::new(),
            table_fn: None,
            column_fn: None,
            suffix: None,
        }
    }

    /// Set a column.
    pub fn set(&mut self, column: &str, value: impl Into<Value>) -> &mut Self {
        self.set_pairs.push((column.to_string(), value.into()));
        self
    }

    /// Set an optional column (None => skip).
    pub fn set_opt<T: Into<Value>>(&mut self, column: &str, value: Option<T>) -> &mut Self {
        if let Some(v) = value {
            self.set(column, v);
        }
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

impl StatementBuilder for UpdateBuilder {
    fn validate(&self) -> RowsetResult<()> {
        ensure_safe(&self.table)?;
        for (column, _) in &self.set_pairs {
            ensure_safe(column)?;
        }
        self.where_clause.validate()?;
        if self.set_pairs.is_empty() {
            return Err(RowsetError::malformed("update requires a SET clause"));
        }
        Ok(())
    }

    fn compile(&self) -> RowsetResult<CompiledStatement> {
        let table = render_entity(&self.table, self.table_fn.as_ref())?;
        let mut params = Vec::with_capacity(self.set_pairs.len());
        let mut assignments = Vec::with_capacity(self.set_pairs.len());
        for (column, value) in &self.set_pairs {
            let column = render_entity(column, self.column_fn.as_ref())?;
            assignments.push(format!("{column} = ?"));
            params.push(value.clone());
        }
        let mut sql = format!("UPDATE {} SET {}", table, assignments.join(", "));
        self.where_clause
            .render(self.column_fn.as_ref(), &mut sql, &mut params)?;
        if let Some(suffix) = &self.suffix {
            sql.push(' ');
            sql.push_str(suffix);
        }
        Ok(CompiledStatement::new(sql, params))
    }
}
