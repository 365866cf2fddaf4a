//! Eager materialization over the in-memory driver.

use rowset::mem::MemExecutor;
use rowset::{
    ArrayRows, ColumnDescriptor, FetchOptions, MapRows, NamingPolicy, Record, SqlType,
    StatementBuilder, Value, fetch_all, fetch_one, lower, select, update,
};
use std::sync::Arc;

fn person_columns() -> Vec<ColumnDescriptor> {
    vec![
        ColumnDescriptor::new(0, "id", "person", SqlType::Integer),
        ColumnDescriptor::new(1, "name", "person", SqlType::Text),
        ColumnDescriptor::new(2, "active", "person", SqlType::Boolean),
    ]
}

fn person_rows() -> Vec<Vec<Value>> {
    vec![
        vec![Value::Int(1), Value::Text("ada".into()), Value::Int(1)],
        vec![Value::Int(2), Value::Text("grace".into()), Value::Int(0)],
    ]
}

fn select_people() -> rowset::CompiledStatement {
    let mut builder = select("person");
    builder.and_eq("active", true);
    builder.build().unwrap()
}

#[test]
fn fetch_all_map_shaped_with_qualified_keys() {
    let mut executor = MemExecutor::new();
    executor.queue_rows(person_columns(), person_rows());

    let people = fetch_all(&mut executor, &select_people(), &FetchOptions::default()).unwrap();
    assert_eq!(people.len(), 2);
    assert_eq!(
        people.get(0).unwrap().get("person/name"),
        Some(&Value::Text("ada".into()))
    );
    // The default reader canonicalizes driver booleans.
    assert_eq!(
        people.get(1).unwrap().get("person/active"),
        Some(&Value::Bool(false))
    );
}

#[test]
fn fetch_all_array_shaped_shares_names() {
    let mut executor = MemExecutor::new();
    executor.queue_rows(person_columns(), person_rows());

    let options = FetchOptions::array_rows();
    let people = fetch_all(&mut executor, &select_people(), &options).unwrap();
    let (first, second) = (people.get(0).unwrap(), people.get(1).unwrap());
    match (first, second) {
        (Record::Array { names: a, .. }, Record::Array { names: b, .. }) => {
            assert!(Arc::ptr_eq(a, b));
            assert_eq!(
                a.as_ref(),
                &["person/id", "person/name", "person/active"][..]
            );
        }
        other => panic!("expected array-shaped records, got {other:?}"),
    }
    assert_eq!(first.get_index(1), Some(&Value::Text("ada".into())));
}

#[test]
fn lower_casing_policy_applies_to_both_segments() {
    let columns = vec![
        ColumnDescriptor::new(0, "ID", "PERSON", SqlType::Integer),
        ColumnDescriptor::new(1, "NAME", "", SqlType::Text),
    ];
    let rows = vec![vec![Value::Int(1), Value::Text("ada".into())]];
    let mut executor = MemExecutor::new();
    executor.queue_rows(columns, rows);

    let options = FetchOptions::default().with_row(Arc::new(MapRows::with_policy(
        NamingPolicy::qualified_with(lower()),
    )));
    let people = fetch_all(&mut executor, &select_people(), &options).unwrap();
    let record = people.get(0).unwrap();
    assert_eq!(record.get("person/id"), Some(&Value::Int(1)));
    // Unknown qualifier falls back to the bare label.
    assert_eq!(record.get("name"), Some(&Value::Text("ada".into())));
}

#[test]
fn update_outcome_yields_synthetic_record_regardless_of_options() {
    let statement = {
        let mut builder = update("person");
        builder.set("active", false).and_eq("id", 1);
        builder.build().unwrap()
    };

    for options in [FetchOptions::default(), FetchOptions::array_rows()] {
        let mut executor = MemExecutor::new();
        executor.queue_updated(3);
        let result = fetch_all(&mut executor, &statement, &options).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result.update_count(), Some(3));
        assert_eq!(result.get(0).unwrap(), &Record::update_count(3));
    }
}

#[test]
fn fetch_one_returns_first_row_only() {
    let mut executor = MemExecutor::new();
    executor.queue_rows(person_columns(), person_rows());

    let record = fetch_one(&mut executor, &select_people(), &FetchOptions::default())
        .unwrap()
        .unwrap();
    assert_eq!(record.get("person/id"), Some(&Value::Int(1)));
}

#[test]
fn fetch_one_on_empty_result_is_none() {
    let mut executor = MemExecutor::new();
    executor.queue_rows(person_columns(), Vec::new());

    let record = fetch_one(&mut executor, &select_people(), &FetchOptions::default()).unwrap();
    assert!(record.is_none());
}

#[test]
fn fetch_one_on_update_outcome_is_the_synthetic_record() {
    let mut executor = MemExecutor::new();
    executor.queue_updated(1);

    let record = fetch_one(&mut executor, &select_people(), &FetchOptions::default())
        .unwrap()
        .unwrap();
    assert_eq!(record.as_update_count(), Some(1));
}

#[test]
fn executor_receives_the_compiled_statement_verbatim() {
    let mut executor = MemExecutor::new();
    executor.queue_rows(person_columns(), Vec::new());

    let statement = select_people();
    fetch_all(&mut executor, &statement, &FetchOptions::default()).unwrap();
    assert_eq!(executor.executed(), &[statement]);
}

#[test]
fn driver_faults_surface_unchanged() {
    let mut executor = MemExecutor::new();
    let err = fetch_all(&mut executor, &select_people(), &FetchOptions::default()).unwrap_err();
    assert!(err.is_driver());
}

#[test]
fn custom_reader_runs_on_the_eager_path() {
    let mut executor = MemExecutor::new();
    executor.queue_rows(person_columns(), person_rows());

    let reader: rowset::ColumnReader = Arc::new(|value, column| {
        if column.label == "name" {
            match value {
                Value::Text(s) => Ok(Value::Text(s.to_uppercase())),
                other => Ok(other),
            }
        } else {
            rowset::default_reader()(value, column)
        }
    });
    let options =
        FetchOptions::default().with_row(Arc::new(MapRows::unqualified().reader(reader)));
    let people = fetch_all(&mut executor, &select_people(), &options).unwrap();
    assert_eq!(
        people.get(0).unwrap().get("name"),
        Some(&Value::Text("ADA".into()))
    );
}

#[test]
fn array_rows_factory_is_reusable_across_statements() {
    let mut executor = MemExecutor::new();
    executor.queue_rows(person_columns(), person_rows());
    executor.queue_rows(person_columns(), person_rows());

    let options = FetchOptions::default().with_row(Arc::new(ArrayRows::unqualified()));
    let first = fetch_all(&mut executor, &select_people(), &options).unwrap();
    let second = fetch_all(&mut executor, &select_people(), &options).unwrap();
    assert_eq!(first, second);
}
