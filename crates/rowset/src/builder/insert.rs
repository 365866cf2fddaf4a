use super::traits::StatementBuilder;
use super::{CompiledBatch, CompiledStatement};
use crate::error::{RowsetError, RowsetResult};
use crate::ident::{EntityTransform, ensure_safe, render_entity};
use crate::value::Value;

/// Single-row INSERT builder.
pub struct InsertBuilder {
    table: String,
    columns: Vec<String>,
    values: Vec<Value>,
    table_fn: Option<EntityTransform>,
    column_fn: Option<EntityTransform>,
    suffix: Option<String>,
}

impl InsertBuilder {
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            columns: Vec::new(),
            values: Vec::new(),
            table_fn: None,
            column_fn: None,
            suffix: None,
        }
    }

    /// Set a column value. Placeholder and parameter order follow insertion
    /// order.
    pub fn set(&mut self, column: &str, value: impl Into<Value>) -> &mut Self {
        self.columns.push(column.to_string());
        self.values.push(value.into());
        self
    }

    /// Set an optional column value (None => skip the column entirely).
    pub fn set_opt<T: Into<Value>>(&mut self, column: &str, value: Option<T>) -> &mut Self {
        if let Some(v) = value {
            self.set(column, v);
        }
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

    /// Trailing text appended verbatim, no validation. The caller bears
    /// correctness responsibility.
    pub fn suffix(&mut self, text: &str) -> &mut Self {
        self.suffix = Some(text.to_string());
        self
    }
}

impl StatementBuilder for InsertBuilder {
    fn validate(&self) -> RowsetResult<()> {
        ensure_safe(&self.table)?;
        for column in &self.columns {
            ensure_safe(column)?;
        }
        if self.columns.is_empty() {
            return Err(RowsetError::malformed(
                "insert requires at least one column/value pair",
            ));
        }
        Ok(())
    }

    fn compile(&self) -> RowsetResult<CompiledStatement> {
        let table = render_entity(&self.table, self.table_fn.as_ref())?;
        let columns = self
            .columns
            .iter()
            .map(|c| render_entity(c, self.column_fn.as_ref()))
            .collect::<RowsetResult<Vec<_>>>()?;
        let placeholders = vec!["?"; columns.len()].join(", ");
        let mut sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            table,
            columns.join(", "),
            placeholders
        );
        if let Some(suffix) = &self.suffix {
            sql.push(' ');
            sql.push_str(suffix);
        }
        Ok(CompiledStatement::new(sql, self.values.clone()))
    }
}

/// Multi-row INSERT builder.
///
/// Two compilation modes:
/// - [`build`](StatementBuilder::build): one value group per row, parameters
///   flattened in row-major order;
/// - [`build_batched`](InsertManyBuilder::build_batched): a single
///   value-group template with parameters grouped per row, for drivers that
///   submit batches themselves.
pub struct InsertManyBuilder {
    table: String,
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
    table_fn: Option<EntityTransform>,
    column_fn: Option<EntityTransform>,
    suffix: Option<String>,
}

impl InsertManyBuilder {
    pub fn new(table: &str, columns: &[&str]) -> Self {
        Self {
            table: table.to_string(),
            columns: columns.iter().map(|s| s.to_string()).collect(),
            rows: Vec::new(),
            table_fn: None,
            column_fn: None,
            suffix: None,
        }
    }

    /// Append one row of values. Length must match the column list.
    pub fn row<I>(&mut self, values: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.rows
            .push(values.into_iter().map(Into::into).collect());
        self
    }

    /// Append many rows at once.
    pub fn rows(&mut self, rows: Vec<Vec<Value>>) -> &mut Self {
        self.rows.extend(rows);
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

    fn sql_with_groups(&self, groups: usize) -> RowsetResult<String> {
        let table = render_entity(&self.table, self.table_fn.as_ref())?;
        let columns = self
            .columns
            .iter()
            .map(|c| render_entity(c, self.column_fn.as_ref()))
            .collect::<RowsetResult<Vec<_>>>()?;
        let group = format!("({})", vec!["?"; columns.len()].join(", "));
        let mut sql = format!(
            "INSERT INTO {} ({}) VALUES {}",
            table,
            columns.join(", "),
            vec![group; groups].join(", ")
        );
        if let Some(suffix) = &self.suffix {
            sql.push(' ');
            sql.push_str(suffix);
        }
        Ok(sql)
    }

    /// Compile the batched form: one value-group template, parameters
    /// grouped per row for separate submission.
    pub fn build_batched(&self) -> RowsetResult<CompiledBatch> {
        self.validate()?;
        Ok(CompiledBatch {
            sql: self.sql_with_groups(1)?,
            param_groups: self.rows.clone(),
        })
    }
}

impl StatementBuilder for InsertManyBuilder {
    fn validate(&self) -> RowsetResult<()> {
        ensure_safe(&self.table)?;
        for column in &self.columns {
            ensure_safe(column)?;
        }
        if self.columns.is_empty() {
            return Err(RowsetError::malformed(
                "multi-row insert requires a non-empty column list",
            ));
        }
        if self.rows.is_empty() {
            return Err(RowsetError::malformed(
                "multi-row insert requires at least one row",
            ));
        }
        for (i, row) in self.rows.iter().enumerate() {
            if row.len() != self.columns.len() {
                return Err(RowsetError::malformed(format!(
                    "row {i} has {} values, expected {}",
                    row.len(),
                    self.columns.len()
                )));
            }
        }
        Ok(())
    }

    fn compile(&self) -> RowsetResult<CompiledStatement> {
        let sql = self.sql_with_groups(self.rows.len())?;
        let params = self.rows.iter().flatten().cloned().collect();
        Ok(CompiledStatement::new(sql, params))
    }
}
