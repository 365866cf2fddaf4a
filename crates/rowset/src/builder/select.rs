use super::traits::StatementBuilder;
use super::where_clause::WhereClause;
use super::CompiledStatement;
use crate::error::{RowsetError, RowsetResult};
use crate::ident::{EntityTransform, ensure_safe, render_entity};
use crate::value::Value;

/// One projection entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectColumn {
    /// Plain column; the column entity transform applies to both the name
    /// and the alias.
    Column {
        name: String,
        alias: Option<String>,
    },
    /// Caller-supplied expression. The expression text is never transformed;
    /// only the alias gets the column entity transform.
    Expression {
        expr: String,
        alias: Option<String>,
    },
}

/// Sort direction. Dynamic strings parse via [`std::str::FromStr`];
/// anything but ascending/descending is a malformed spec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    fn as_sql(self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

impl std::str::FromStr for Direction {
    type Err = RowsetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Direction::Asc),
            "desc" | "descending" => Ok(Direction::Desc),
            other => Err(RowsetError::malformed(format!(
                "unrecognized order direction: {other:?}"
            ))),
        }
    }
}

/// Pagination dialect. Exactly one per statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageDialect {
    /// Dialect-prefix row limiting: `SELECT TOP(?) …`; the parameter
    /// precedes every row-body parameter.
    Top,
    /// `LIMIT ? OFFSET ?` suffix; each clause appears only when its option
    /// is present, parameters trailing in that order.
    LimitOffset,
    /// ANSI `OFFSET ? ROWS FETCH NEXT ? ROWS ONLY` suffix; parameters
    /// trailing as offset then fetch.
    OffsetFetch,
}

/// Pagination options, validated against the chosen dialect before any SQL
/// text exists. With no explicit dialect, one is inferred from which options
/// are present; options foreign to the dialect are a malformed spec.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pagination {
    pub dialect: Option<PageDialect>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub fetch: Option<i64>,
    pub top: Option<i64>,
}

impl Pagination {
    fn is_empty(&self) -> bool {
        self.limit.is_none() && self.offset.is_none() && self.fetch.is_none() && self.top.is_none()
    }

    /// Resolve and validate the effective dialect.
    pub fn resolve(&self) -> RowsetResult<Option<PageDialect>> {
        let dialect = match self.dialect {
            Some(d) => Some(d),
            None => {
                if self.top.is_some() {
                    Some(PageDialect::Top)
                } else if self.fetch.is_some() {
                    Some(PageDialect::OffsetFetch)
                } else if self.limit.is_some() || self.offset.is_some() {
                    Some(PageDialect::LimitOffset)
                } else {
                    None
                }
            }
        };
        match dialect {
            None => {
                if !self.is_empty() {
                    return Err(RowsetError::malformed("pagination options without a dialect"));
                }
            }
            Some(PageDialect::Top) => {
                if self.top.is_none() {
                    return Err(RowsetError::malformed("top dialect requires a top value"));
                }
                if self.limit.is_some() || self.offset.is_some() || self.fetch.is_some() {
                    return Err(RowsetError::malformed(
                        "top dialect conflicts with limit/offset/fetch",
                    ));
                }
            }
            Some(PageDialect::LimitOffset) => {
                if self.limit.is_none() && self.offset.is_none() {
                    return Err(RowsetError::malformed(
                        "limit/offset dialect requires a limit or an offset",
                    ));
                }
                if self.top.is_some() || self.fetch.is_some() {
                    return Err(RowsetError::malformed(
                        "limit/offset dialect conflicts with top/fetch",
                    ));
                }
            }
            Some(PageDialect::OffsetFetch) => {
                if self.offset.is_none() || self.fetch.is_none() {
                    return Err(RowsetError::malformed(
                        "offset/fetch dialect requires both offset and fetch",
                    ));
                }
                if self.top.is_some() || self.limit.is_some() {
                    return Err(RowsetError::malformed(
                        "offset/fetch dialect conflicts with top/limit",
                    ));
                }
            }
        }
        Ok(dialect)
    }
}

/// Structured SELECT builder.
pub struct SelectBuilder {
    table: String,
    columns: Vec<SelectColumn>,
    where_clause: WhereClause,
    order: Vec<(String, Option<Direction>)>,
    page: Pagination,
    suffix: Option<String>,
    table_fn: Option<EntityTransform>,
    column_fn: Option<EntityTransform>,
}

impl SelectBuilder {
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            columns: Vec::new(),
            where_clause: WhereClause::new(),
            order: Vec::new(),
            page: Pagination::default(),
            suffix: None,
            table_fn: None,
            column_fn: None,
        }
    }

    /// Project one column.
    pub fn column(&mut self, name: &str) -> &mut Self {
        self.columns.push(SelectColumn::Column {
            name: name.to_string(),
            alias: None,
        });
        self
    }

    /// Project one aliased column.
    pub fn column_as(&mut self, name: &str, alias: &str) -> &mut Self {
        self.columns.push(SelectColumn::Column {
            name: name.to_string(),
            alias: Some(alias.to_string()),
        });
        self
    }

    /// Project several columns.
    pub fn columns(&mut self, names: &[&str]) -> &mut Self {
        for name in names {
            self.column(name);
        }
        self
    }

    /// Project a caller-supplied expression. Its text is never transformed;
    /// only the alias gets the column entity transform.
    pub fn expression(&mut self, expr: &str, alias: &str) -> &mut Self {
        self.columns.push(SelectColumn::Expression {
            expr: expr.to_string(),
            alias: Some(alias.to_string()),
        });
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

    /// Order by a column, direction left to the database.
    pub fn order_by(&mut self, column: &str) -> &mut Self {
        self.order.push((column.to_string(), None));
        self
    }

    /// Order by a column with an explicit direction.
    pub fn order_by_dir(&mut self, column: &str, direction: Direction) -> &mut Self {
        self.order.push((column.to_string(), Some(direction)));
        self
    }

    pub fn limit(&mut self, limit: i64) -> &mut Self {
        self.page.limit = Some(limit);
        self
    }

    pub fn offset(&mut self, offset: i64) -> &mut Self {
        self.page.offset = Some(offset);
        self
    }

    pub fn fetch(&mut self, fetch: i64) -> &mut Self {
        self.page.fetch = Some(fetch);
        self
    }

    pub fn top(&mut self, top: i64) -> &mut Self {
        self.page.top = Some(top);
        self
    }

    /// Force a pagination dialect instead of inferring one.
    pub fn dialect(&mut self, dialect: PageDialect) -> &mut Self {
        self.page.dialect = Some(dialect);
        self
    }

    /// Trailing text appended verbatim, no validation. The caller bears
    /// correctness responsibility.
    pub fn suffix(&mut self, text: &str) -> &mut Self {
        self.suffix = Some(text.to_string());
        self
    }

    /// Transform applied to the table name.
    pub fn table_entities(&mut self, transform: EntityTransform) -> &mut Self {
        self.table_fn = Some(transform);
        self
    }

    /// Transform applied to column names and aliases.
    pub fn column_entities(&mut self, transform: EntityTransform) -> &mut Self {
        self.column_fn = Some(transform);
        self
    }

    fn render_projection(&self) -> RowsetResult<String> {
        if self.columns.is_empty() {
            return Ok("*".to_string());
        }
        let mut parts = Vec::with_capacity(self.columns.len());
        for column in &self.columns {
            match column {
                SelectColumn::Column { name, alias } => {
                    let mut part = render_entity(name, self.column_fn.as_ref())?;
                    if let Some(alias) = alias {
                        part.push_str(" AS ");
                        part.push_str(&render_entity(alias, self.column_fn.as_ref())?);
                    }
                    parts.push(part);
                }
                SelectColumn::Expression { expr, alias } => {
                    let mut part = expr.clone();
                    if let Some(alias) = alias {
                        part.push_str(" AS ");
                        part.push_str(&render_entity(alias, self.column_fn.as_ref())?);
                    }
                    parts.push(part);
                }
            }
        }
        Ok(parts.join(", "))
    }
}

impl StatementBuilder for SelectBuilder {
    fn validate(&self) -> RowsetResult<()> {
        ensure_safe(&self.table)?;
        for column in &self.columns {
            match column {
                SelectColumn::Column { name, alias } => {
                    ensure_safe(name)?;
                    if let Some(alias) = alias {
                        ensure_safe(alias)?;
                    }
                }
                // Expression text is the caller's responsibility; the alias
                // is still an identifier.
                SelectColumn::Expression { alias, .. } => {
                    if let Some(alias) = alias {
                        ensure_safe(alias)?;
                    }
                }
            }
        }
        for (column, _) in &self.order {
            ensure_safe(column)?;
        }
        self.where_clause.validate()?;
        self.page.resolve()?;
        Ok(())
    }

    fn compile(&self) -> RowsetResult<CompiledStatement> {
        let dialect = self.page.resolve()?;
        let table = render_entity(&self.table, self.table_fn.as_ref())?;
        let mut params = Vec::new();

        let mut sql = String::from("SELECT ");
        if dialect == Some(PageDialect::Top) {
            sql.push_str("TOP(?) ");
            params.push(Value::Int(self.page.top.unwrap_or_default()));
        }
        sql.push_str(&self.render_projection()?);
        sql.push_str(" FROM ");
        sql.push_str(&table);

        self.where_clause
            .render(self.column_fn.as_ref(), &mut sql, &mut params)?;

        if !self.order.is_empty() {
            sql.push_str(" ORDER BY ");
            for (i, (column, direction)) in self.order.iter().enumerate() {
                if i > 0 {
                    sql.push_str(", ");
                }
                sql.push_str(&render_entity(column, self.column_fn.as_ref())?);
                if let Some(direction) = direction {
                    sql.push(' ');
                    sql.push_str(direction.as_sql());
                }
            }
        }

        match dialect {
            Some(PageDialect::LimitOffset) => {
                if let Some(limit) = self.page.limit {
                    sql.push_str(" LIMIT ?");
                    params.push(Value::Int(limit));
                }
                if let Some(offset) = self.page.offset {
                    sql.push_str(" OFFSET ?");
                    params.push(Value::Int(offset));
                }
            }
            Some(PageDialect::OffsetFetch) => {
                sql.push_str(" OFFSET ? ROWS FETCH NEXT ? ROWS ONLY");
                params.push(Value::Int(self.page.offset.unwrap_or_default()));
                params.push(Value::Int(self.page.fetch.unwrap_or_default()));
            }
            Some(PageDialect::Top) | None => {}
        }

        if let Some(suffix) = &self.suffix {
            sql.push(' ');
            sql.push_str(suffix);
        }

        Ok(CompiledStatement::new(sql, params))
    }
}
