//! Row and result-set builder strategies.
//!
//! Strategies are per-call configuration values ([`crate::reduce::FetchOptions`]):
//! a [`RowBuilderFactory`] binds to one statement's column descriptors and
//! produces the [`RowBuilder`] that turns each cursor row into a
//! [`Record`]; a [`ResultSetBuilder`] accumulates records on the eager
//! materialization path. The lazy reduction path never touches the
//! result-set builder.

use crate::cursor::{ColumnDescriptor, RowAccess, SqlType};
use crate::error::{RowsetError, RowsetResult};
use crate::naming::NamingPolicy;
use crate::record::{Record, ResultSet};
use crate::value::Value;
use std::sync::Arc;

/// Per-column conversion hook applied to every raw value read from the
/// cursor.
///
/// Callers may register type-specific readers (e.g. to resolve large-object
/// handles). Such handles are only valid while the cursor has not advanced
/// past their row: resolving them later is a caller error, surfaced by the
/// driver — never silently tolerated here. Readers that can fail should
/// return [`RowsetError::Decode`] naming the column.
pub type ColumnReader = Arc<dyn Fn(Value, &ColumnDescriptor) -> RowsetResult<Value> + Send + Sync>;

/// The default reader: values pass through unchanged, except that null stays
/// null and boolean-like values in boolean columns are normalized to a
/// canonical [`Value::Bool`] (drivers are not trusted to return one).
pub fn default_reader() -> ColumnReader {
    Arc::new(read_default)
}

fn read_default(value: Value, column: &ColumnDescriptor) -> RowsetResult<Value> {
    if column.sql_type != SqlType::Boolean {
        return Ok(value);
    }
    normalize_bool(value, column)
}

fn normalize_bool(value: Value, column: &ColumnDescriptor) -> RowsetResult<Value> {
    match value {
        Value::Null => Ok(Value::Null),
        Value::Bool(b) => Ok(Value::Bool(b)),
        Value::Int(n) => Ok(Value::Bool(n != 0)),
        Value::Text(s) => match s.as_str() {
            "t" | "T" | "true" | "TRUE" | "1" => Ok(Value::Bool(true)),
            "f" | "F" | "false" | "FALSE" | "0" => Ok(Value::Bool(false)),
            other => Err(RowsetError::decode(
                &column.label,
                format!("cannot read {other:?} as boolean"),
            )),
        },
        other => Err(RowsetError::decode(
            &column.label,
            format!("cannot read {other:?} as boolean"),
        )),
    }
}

/// Accumulating state threaded through [`RowBuilder::set_column`].
#[derive(Debug, Default)]
pub struct RowState {
    names: Vec<String>,
    values: Vec<Value>,
}

impl RowState {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            names: Vec::new(),
            values: Vec::with_capacity(capacity),
        }
    }

    /// Merge a named column (map-shaped strategies).
    pub fn push_named(&mut self, name: String, value: Value) {
        self.names.push(name);
        self.values.push(value);
    }

    /// Merge a value only (array-shaped strategies).
    pub fn push(&mut self, value: Value) {
        self.values.push(value);
    }

    pub fn into_parts(self) -> (Vec<String>, Vec<Value>) {
        (self.names, self.values)
    }
}

/// Strategy that turns one cursor row into a [`Record`].
///
/// Instances are bound to a single statement's columns by a
/// [`RowBuilderFactory`] and reused for every row of that statement.
pub trait RowBuilder {
    /// Fresh accumulating state for one row.
    fn new_row(&self) -> RowState;

    fn column_count(&self) -> usize;

    /// Resolved exposed name of column `index` (`index < column_count`).
    fn column_name(&self, index: usize) -> String;

    /// Read column `index` from the current row and run it through the
    /// column reader.
    fn read_column(&self, row: &dyn RowAccess, index: usize) -> RowsetResult<Value>;

    /// Read, convert and merge column `index` into the row state.
    fn set_column(
        &self,
        state: RowState,
        row: &dyn RowAccess,
        index: usize,
    ) -> RowsetResult<RowState>;

    /// Seal the accumulated state into an immutable record.
    fn finalize_row(&self, state: RowState) -> Record;

    /// Index of the column whose exposed name matches, if any.
    fn resolve(&self, name: &str) -> Option<usize> {
        (0..self.column_count()).find(|&i| self.column_name(i) == name)
    }

    /// Build a whole row with the column fold every strategy shares.
    fn build_row(&self, row: &dyn RowAccess) -> RowsetResult<Record> {
        let mut state = self.new_row();
        for index in 0..self.column_count() {
            state = self.set_column(state, row, index)?;
        }
        Ok(self.finalize_row(state))
    }
}

/// Chooses and binds a row-building strategy for one statement.
pub trait RowBuilderFactory: Send + Sync {
    fn bind(&self, columns: &Arc<[ColumnDescriptor]>) -> RowsetResult<Box<dyn RowBuilder>>;
}

/// Map-shaped rows: ordered name→value pairs.
///
/// Name resolution runs per column of every row, so per-row cost scales with
/// the naming policy. For wide, repeatedly scanned results prefer
/// [`ArrayRows`].
#[derive(Clone)]
pub struct MapRows {
    policy: NamingPolicy,
    reader: ColumnReader,
}

impl MapRows {
    /// Qualified names, default reader.
    pub fn new() -> Self {
        Self::with_policy(NamingPolicy::qualified())
    }

    /// Bare labels, default reader.
    pub fn unqualified() -> Self {
        Self::with_policy(NamingPolicy::unqualified())
    }

    pub fn with_policy(policy: NamingPolicy) -> Self {
        Self {
            policy,
            reader: default_reader(),
        }
    }

    /// Replace the column reader.
    pub fn reader(mut self, reader: ColumnReader) -> Self {
        self.reader = reader;
        self
    }
}

impl Default for MapRows {
    fn default() -> Self {
        Self::new()
    }
}

impl RowBuilderFactory for MapRows {
    fn bind(&self, columns: &Arc<[ColumnDescriptor]>) -> RowsetResult<Box<dyn RowBuilder>> {
        Ok(Box::new(BoundMapRows {
            columns: columns.clone(),
            policy: self.policy.clone(),
            reader: self.reader.clone(),
        }))
    }
}

struct BoundMapRows {
    columns: Arc<[ColumnDescriptor]>,
    policy: NamingPolicy,
    reader: ColumnReader,
}

impl RowBuilder for BoundMapRows {
    fn new_row(&self) -> RowState {
        RowState::with_capacity(self.columns.len())
    }

    fn column_count(&self) -> usize {
        self.columns.len()
    }

    fn column_name(&self, index: usize) -> String {
        let column = &self.columns[index];
        self.policy.name_of(&column.qualifier, &column.label)
    }

    fn read_column(&self, row: &dyn RowAccess, index: usize) -> RowsetResult<Value> {
        let value = row.raw(index)?;
        (self.reader)(value, &self.columns[index])
    }

    fn set_column(
        &self,
        mut state: RowState,
        row: &dyn RowAccess,
        index: usize,
    ) -> RowsetResult<RowState> {
        let value = self.read_column(row, index)?;
        state.push_named(self.column_name(index), value);
        Ok(state)
    }

    fn finalize_row(&self, state: RowState) -> Record {
        let (names, values) = state.into_parts();
        Record::Map(names.into_iter().zip(values).collect())
    }
}

/// Array-shaped rows: ordered values with names computed once per statement
/// and shared across every record.
///
/// The faster shape for wide, repeatedly scanned result sets — per-row work
/// is value reads only.
#[derive(Clone)]
pub struct ArrayRows {
    policy: NamingPolicy,
    reader: ColumnReader,
}

impl ArrayRows {
    /// Qualified names, default reader.
    pub fn new() -> Self {
        Self::with_policy(NamingPolicy::qualified())
    }

    /// Bare labels, default reader.
    pub fn unqualified() -> Self {
        Self::with_policy(NamingPolicy::unqualified())
    }

    pub fn with_policy(policy: NamingPolicy) -> Self {
        Self {
            policy,
            reader: default_reader(),
        }
    }

    /// Replace the column reader.
    pub fn reader(mut self, reader: ColumnReader) -> Self {
        self.reader = reader;
        self
    }
}

impl Default for ArrayRows {
    fn default() -> Self {
        Self::new()
    }
}

impl RowBuilderFactory for ArrayRows {
    fn bind(&self, columns: &Arc<[ColumnDescriptor]>) -> RowsetResult<Box<dyn RowBuilder>> {
        let names: Arc<[String]> = columns
            .iter()
            .map(|c| self.policy.name_of(&c.qualifier, &c.label))
            .collect::<Vec<_>>()
            .into();
        Ok(Box::new(BoundArrayRows {
            columns: columns.clone(),
            names,
            reader: self.reader.clone(),
        }))
    }
}

struct BoundArrayRows {
    columns: Arc<[ColumnDescriptor]>,
    names: Arc<[String]>,
    reader: ColumnReader,
}

impl RowBuilder for BoundArrayRows {
    fn new_row(&self) -> RowState {
        RowState::with_capacity(self.columns.len())
    }

    fn column_count(&self) -> usize {
        self.columns.len()
    }

    fn column_name(&self, index: usize) -> String {
        self.names[index].clone()
    }

    fn read_column(&self, row: &dyn RowAccess, index: usize) -> RowsetResult<Value> {
        let value = row.raw(index)?;
        (self.reader)(value, &self.columns[index])
    }

    fn set_column(
        &self,
        mut state: RowState,
        row: &dyn RowAccess,
        index: usize,
    ) -> RowsetResult<RowState> {
        let value = self.read_column(row, index)?;
        state.push(value);
        Ok(state)
    }

    fn finalize_row(&self, state: RowState) -> Record {
        let (_, values) = state.into_parts();
        Record::Array {
            names: self.names.clone(),
            values,
        }
    }
}

/// Accumulates records into the final collection on the eager path.
pub trait ResultSetBuilder: Send + Sync {
    fn new_result_set(&self) -> Vec<Record>;
    fn add_row(&self, state: Vec<Record>, row: Record) -> Vec<Record>;
    fn finalize(&self, state: Vec<Record>) -> ResultSet;
}

/// Collects every record in order (the default).
#[derive(Debug, Clone, Copy, Default)]
pub struct CollectAll;

impl ResultSetBuilder for CollectAll {
    fn new_result_set(&self) -> Vec<Record> {
        Vec::new()
    }

    fn add_row(&self, mut state: Vec<Record>, row: Record) -> Vec<Record> {
        state.push(row);
        state
    }

    fn finalize(&self, state: Vec<Record>) -> ResultSet {
        ResultSet::new(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::lower;

    fn person_columns() -> Arc<[ColumnDescriptor]> {
        vec![
            ColumnDescriptor::new(0, "ID", "PERSON", SqlType::Integer),
            ColumnDescriptor::new(1, "NAME", "PERSON", SqlType::Text),
            ColumnDescriptor::new(2, "ACTIVE", "PERSON", SqlType::Boolean),
        ]
        .into()
    }

    struct OneRow(Vec<Value>, Arc<[ColumnDescriptor]>);

    impl RowAccess for OneRow {
        fn column_count(&self) -> usize {
            self.0.len()
        }

        fn descriptor(&self, index: usize) -> RowsetResult<&ColumnDescriptor> {
            self.1
                .get(index)
                .ok_or_else(|| RowsetError::column_not_found(index.to_string()))
        }

        fn raw(&self, index: usize) -> RowsetResult<Value> {
            self.0
                .get(index)
                .cloned()
                .ok_or_else(|| RowsetError::column_not_found(index.to_string()))
        }
    }

    fn one_row() -> OneRow {
        OneRow(
            vec![Value::Int(1), Value::Text("ada".into()), Value::Int(1)],
            person_columns(),
        )
    }

    #[test]
    fn map_rows_qualified_names_and_bool_normalization() {
        let columns = person_columns();
        let builder = MapRows::with_policy(NamingPolicy::qualified_with(lower()))
            .bind(&columns)
            .unwrap();
        let record = builder.build_row(&one_row()).unwrap();
        assert_eq!(record.get("person/id"), Some(&Value::Int(1)));
        assert_eq!(record.get("person/active"), Some(&Value::Bool(true)));
    }

    #[test]
    fn array_rows_share_names_across_rows() {
        let columns = person_columns();
        let builder = ArrayRows::unqualified().bind(&columns).unwrap();
        let first = builder.build_row(&one_row()).unwrap();
        let second = builder.build_row(&one_row()).unwrap();
        match (&first, &second) {
            (Record::Array { names: a, .. }, Record::Array { names: b, .. }) => {
                assert!(Arc::ptr_eq(a, b));
            }
            _ => panic!("expected array-shaped records"),
        }
        assert_eq!(first.get("NAME"), Some(&Value::Text("ada".into())));
    }

    #[test]
    fn default_reader_rejects_garbage_booleans() {
        let column = ColumnDescriptor::new(0, "flag", "", SqlType::Boolean);
        let err = read_default(Value::Text("maybe".into()), &column).unwrap_err();
        assert!(matches!(err, RowsetError::Decode { .. }));
    }

    #[test]
    fn default_reader_keeps_null() {
        let column = ColumnDescriptor::new(0, "flag", "", SqlType::Boolean);
        assert_eq!(read_default(Value::Null, &column).unwrap(), Value::Null);
    }

    #[test]
    fn default_reader_passes_non_boolean_columns_through() {
        let column = ColumnDescriptor::new(0, "n", "", SqlType::Integer);
        assert_eq!(
            read_default(Value::Int(0), &column).unwrap(),
            Value::Int(0)
        );
    }

    #[test]
    fn custom_reader_sees_descriptor() {
        let columns = person_columns();
        let reader: ColumnReader = Arc::new(|value, column| {
            if column.sql_type == SqlType::Text {
                match value {
                    Value::Text(s) => Ok(Value::Text(s.to_uppercase())),
                    other => Ok(other),
                }
            } else {
                read_default(value, column)
            }
        });
        let builder = MapRows::unqualified().reader(reader).bind(&columns).unwrap();
        let record = builder.build_row(&one_row()).unwrap();
        assert_eq!(record.get("NAME"), Some(&Value::Text("ADA".into())));
    }

    #[test]
    fn resolve_finds_first_matching_column() {
        let columns = person_columns();
        let builder = MapRows::unqualified().bind(&columns).unwrap();
        assert_eq!(builder.resolve("NAME"), Some(1));
        assert_eq!(builder.resolve("nope"), None);
    }
}
