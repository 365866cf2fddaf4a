//! Materialized rows and result sets.
//!
//! A [`Record`] is an immutable snapshot of one row with no cursor
//! dependency: either an ordered name→value mapping, or an ordered value
//! list whose names are held once per statement and shared across rows.
//! A [`ResultSet`] is an ordered sequence of records, or the single
//! synthetic update-count record for statements that produced no row data.

use crate::value::Value;
use std::sync::Arc;

/// Key of the synthetic record produced for statements without row data.
pub const UPDATE_COUNT: &str = "update_count";

/// An immutable, fully materialized row.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    /// Ordered name→value pairs.
    Map(Vec<(String, Value)>),
    /// Ordered values with a per-statement shared name list.
    Array {
        names: Arc<[String]>,
        values: Vec<Value>,
    },
}

impl Record {
    /// The synthetic record for a statement that produced only an affected-row
    /// count. Builder options never alter its shape.
    pub fn update_count(count: u64) -> Self {
        Record::Map(vec![(UPDATE_COUNT.to_string(), Value::Int(count as i64))])
    }

    pub fn len(&self) -> usize {
        match self {
            Record::Map(pairs) => pairs.len(),
            Record::Array { values, .. } => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Value of the first column whose exposed name matches.
    pub fn get(&self, name: &str) -> Option<&Value> {
        match self {
            Record::Map(pairs) => pairs.iter().find(|(n, _)| n == name).map(|(_, v)| v),
            Record::Array { names, values } => {
                names.iter().position(|n| n == name).map(|i| &values[i])
            }
        }
    }

    pub fn get_index(&self, index: usize) -> Option<&Value> {
        match self {
            Record::Map(pairs) => pairs.get(index).map(|(_, v)| v),
            Record::Array { values, .. } => values.get(index),
        }
    }

    /// Exposed names, in column order.
    pub fn names(&self) -> Vec<&str> {
        match self {
            Record::Map(pairs) => pairs.iter().map(|(n, _)| n.as_str()).collect(),
            Record::Array { names, .. } => names.iter().map(String::as_str).collect(),
        }
    }

    /// Iterate `(name, value)` in column order.
    pub fn iter(&self) -> Box<dyn Iterator<Item = (&str, &Value)> + '_> {
        match self {
            Record::Map(pairs) => Box::new(pairs.iter().map(|(n, v)| (n.as_str(), v))),
            Record::Array { names, values } => {
                Box::new(names.iter().map(String::as_str).zip(values.iter()))
            }
        }
    }

    /// The affected-row count if this is the synthetic update-count record.
    pub fn as_update_count(&self) -> Option<u64> {
        match self {
            Record::Map(pairs) => match pairs.as_slice() {
                [(name, Value::Int(n))] if name == UPDATE_COUNT && *n >= 0 => Some(*n as u64),
                _ => None,
            },
            Record::Array { .. } => None,
        }
    }

    /// Export as a JSON object keyed by exposed column name.
    ///
    /// Duplicate names collapse to the last occurrence (JSON objects cannot
    /// hold both); use [`Record::iter`] when collisions matter.
    pub fn to_json(&self) -> serde_json::Value {
        let mut object = serde_json::Map::with_capacity(self.len());
        for (name, value) in self.iter() {
            let json = serde_json::to_value(value).unwrap_or(serde_json::Value::Null);
            object.insert(name.to_string(), json);
        }
        serde_json::Value::Object(object)
    }
}

/// Ordered collection of records produced by eager materialization.
///
/// Records are plain data (`Send + Sync`); once a result set exists, no
/// cursor interaction remains and callers may fan work out over it freely.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResultSet {
    rows: Vec<Record>,
}

impl ResultSet {
    pub fn new(rows: Vec<Record>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.rows.get(index)
    }

    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Record> {
        self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.rows.iter()
    }

    /// The affected-row count if this set is the single synthetic
    /// update-count record.
    pub fn update_count(&self) -> Option<u64> {
        match self.rows.as_slice() {
            [record] => record.as_update_count(),
            _ => None,
        }
    }
}

impl From<Vec<Record>> for ResultSet {
    fn from(rows: Vec<Record>) -> Self {
        Self::new(rows)
    }
}

impl IntoIterator for ResultSet {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
