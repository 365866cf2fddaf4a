use super::*;
use crate::value::Value;
use std::sync::Arc;

#[test]
fn insert_placeholders_match_params_in_order() {
    let mut builder = insert("person");
    builder.set("id", 5).set("name", "ada").set("active", true);
    let compiled = builder.build().unwrap();
    assert_eq!(
        compiled.sql,
        "INSERT INTO person (id, name, active) VALUES (?, ?, ?)"
    );
    assert_eq!(compiled.sql.matches('?').count(), compiled.params.len());
    assert_eq!(
        compiled.params,
        vec![Value::Int(5), Value::Text("ada".into()), Value::Bool(true)]
    );
}

#[test]
fn insert_requires_a_column() {
    let err = insert("person").build().unwrap_err();
    assert!(err.is_malformed());
}

#[test]
fn insert_null_binds_as_param() {
    let mut builder = insert("person");
    builder.set("name", Value::Null);
    let compiled = builder.build().unwrap();
    assert_eq!(compiled.sql, "INSERT INTO person (name) VALUES (?)");
    assert_eq!(compiled.params, vec![Value::Null]);
}

#[test]
fn insert_set_opt_skips_none() {
    let mut builder = insert("person");
    builder.set("id", 1).set_opt("nickname", Option::<&str>::None);
    let compiled = builder.build().unwrap();
    assert_eq!(compiled.sql, "INSERT INTO person (id) VALUES (?)");
}

#[test]
fn insert_many_flattens_row_major() {
    let mut builder = insert_many("t", &["a", "b"]);
    builder.row([1, 2]).row([3, 4]);
    let compiled = builder.build().unwrap();
    assert_eq!(compiled.sql, "INSERT INTO t (a, b) VALUES (?, ?), (?, ?)");
    assert_eq!(
        compiled.params,
        vec![Value::Int(1), Value::Int(2), Value::Int(3), Value::Int(4)]
    );
}

#[test]
fn insert_many_batched_groups_per_row() {
    let mut builder = insert_many("t", &["a", "b"]);
    builder.row([1, 2]).row([3, 4]);
    let batch = builder.build_batched().unwrap();
    assert_eq!(batch.sql, "INSERT INTO t (a, b) VALUES (?, ?)");
    assert_eq!(
        batch.param_groups,
        vec![
            vec![Value::Int(1), Value::Int(2)],
            vec![Value::Int(3), Value::Int(4)]
        ]
    );
}

#[test]
fn insert_many_rejects_ragged_rows() {
    let mut builder = insert_many("t", &["a", "b"]);
    builder.row([1, 2]).row([3]);
    assert!(builder.build().unwrap_err().is_malformed());
    assert!(builder.build_batched().unwrap_err().is_malformed());
}

#[test]
fn insert_many_rejects_empty_rows() {
    assert!(insert_many("t", &["a"]).build().unwrap_err().is_malformed());
}

#[test]
fn insert_many_rejects_empty_columns() {
    let mut builder = insert_many("t", &[]);
    builder.row(Vec::<Value>::new());
    assert!(builder.build().unwrap_err().is_malformed());
}

#[test]
fn update_params_are_set_then_where() {
    let mut builder = update("person");
    builder.set("name", "grace").set("active", false).and_eq("id", 5);
    let compiled = builder.build().unwrap();
    assert_eq!(
        compiled.sql,
        "UPDATE person SET name = ?, active = ? WHERE id = ?"
    );
    assert_eq!(
        compiled.params,
        vec![
            Value::Text("grace".into()),
            Value::Bool(false),
            Value::Int(5)
        ]
    );
}

#[test]
fn update_requires_set() {
    let mut builder = update("person");
    builder.and_eq("id", 5);
    assert!(builder.build().unwrap_err().is_malformed());
}

#[test]
fn update_set_null_binds_as_param() {
    let mut builder = update("person");
    builder.set("nickname", Value::Null).and_eq("id", 1);
    let compiled = builder.build().unwrap();
    assert_eq!(
        compiled.sql,
        "UPDATE person SET nickname = ? WHERE id = ?"
    );
    assert_eq!(compiled.params, vec![Value::Null, Value::Int(1)]);
}

#[test]
fn where_eq_binds_param() {
    let mut builder = delete("person");
    builder.and_eq("id", 5);
    let compiled = builder.build().unwrap();
    assert_eq!(compiled.sql, "DELETE FROM person WHERE id = ?");
    assert_eq!(compiled.params, vec![Value::Int(5)]);
}

#[test]
fn where_null_becomes_is_null_without_param() {
    let mut builder = delete("person");
    builder.and_eq("deleted_at", Value::Null).and_eq("id", 5);
    let compiled = builder.build().unwrap();
    assert_eq!(
        compiled.sql,
        "DELETE FROM person WHERE deleted_at IS NULL AND id = ?"
    );
    assert_eq!(compiled.params, vec![Value::Int(5)]);
}

#[test]
fn where_raw_is_verbatim_with_params_in_order() {
    let mut builder = select("person");
    builder.and_raw("age > ? OR age < ?", vec![Value::Int(65), Value::Int(18)]);
    let compiled = builder.build().unwrap();
    assert_eq!(
        compiled.sql,
        "SELECT * FROM person WHERE age > ? OR age < ?"
    );
    assert_eq!(compiled.params, vec![Value::Int(65), Value::Int(18)]);
}

#[test]
fn where_raw_placeholder_arity_is_checked() {
    let mut builder = select("person");
    builder.and_raw("age > ?", vec![Value::Int(65), Value::Int(18)]);
    assert!(builder.build().unwrap_err().is_malformed());
}

#[test]
fn delete_without_where_requires_allow_all() {
    assert!(delete("person").build().unwrap_err().is_malformed());
    let mut builder = delete("person");
    builder.allow_all();
    assert_eq!(builder.build().unwrap().sql, "DELETE FROM person");
}

#[test]
fn unsafe_table_name_fails_before_any_text() {
    let mut builder = insert("person; DROP TABLE person");
    builder.set("id", 1);
    let err = builder.build().unwrap_err();
    assert!(err.is_unsafe_identifier());
    assert!(err.to_string().contains("person; DROP TABLE person"));
}

#[test]
fn unsafe_column_name_is_rejected() {
    let mut builder = insert("person");
    builder.set("id; --", 1);
    assert!(builder.build().unwrap_err().is_unsafe_identifier());
}

#[test]
fn unsafe_alias_is_rejected() {
    let mut builder = select("person");
    builder.column_as("id", "x;y");
    assert!(builder.build().unwrap_err().is_unsafe_identifier());

    let mut builder = select("person");
    builder.expression("count(*)", "n;");
    assert!(builder.build().unwrap_err().is_unsafe_identifier());
}

#[test]
fn unsafe_order_column_is_rejected() {
    let mut builder = select("person");
    builder.order_by("id; --");
    assert!(builder.build().unwrap_err().is_unsafe_identifier());
}

#[test]
fn select_defaults_to_star() {
    assert_eq!(select("person").build().unwrap().sql, "SELECT * FROM person");
}

#[test]
fn select_projection_and_aliases() {
    let mut builder = select("person");
    builder.column("id").column_as("name", "full_name");
    assert_eq!(
        builder.build().unwrap().sql,
        "SELECT id, name AS full_name FROM person"
    );
}

#[test]
fn expression_text_is_never_transformed() {
    let mut builder = select("person");
    builder
        .column("id")
        .expression("count(*)", "total")
        .column_entities(Arc::new(|s: &str| s.to_uppercase()));
    assert_eq!(
        builder.build().unwrap().sql,
        "SELECT ID, count(*) AS TOTAL FROM person"
    );
}

#[test]
fn entity_transforms_apply_independently() {
    let mut builder = select("person");
    builder
        .column("name")
        .table_entities(Arc::new(|s: &str| format!("\"{s}\"")))
        .column_entities(Arc::new(|s: &str| s.to_uppercase()));
    assert_eq!(builder.build().unwrap().sql, "SELECT NAME FROM \"person\"");
}

#[test]
fn order_by_directions() {
    let mut builder = select("person");
    builder
        .order_by_dir("age", Direction::Desc)
        .order_by("name")
        .order_by_dir("id", Direction::Asc);
    assert_eq!(
        builder.build().unwrap().sql,
        "SELECT * FROM person ORDER BY age DESC, name, id ASC"
    );
}

#[test]
fn direction_parses_only_asc_and_desc() {
    assert_eq!("asc".parse::<Direction>().unwrap(), Direction::Asc);
    assert_eq!("DESC".parse::<Direction>().unwrap(), Direction::Desc);
    assert!("sideways".parse::<Direction>().unwrap_err().is_malformed());
}

#[test]
fn limit_offset_appends_trailing_params() {
    let mut builder = select("person");
    builder.and_eq("active", true).limit(10).offset(5);
    let compiled = builder.build().unwrap();
    assert_eq!(
        compiled.sql,
        "SELECT * FROM person WHERE active = ? LIMIT ? OFFSET ?"
    );
    assert_eq!(
        compiled.params,
        vec![Value::Bool(true), Value::Int(10), Value::Int(5)]
    );
}

#[test]
fn limit_without_offset_stands_alone() {
    let mut builder = select("person");
    builder.limit(10);
    let compiled = builder.build().unwrap();
    assert_eq!(compiled.sql, "SELECT * FROM person LIMIT ?");
    assert_eq!(compiled.params, vec![Value::Int(10)]);
}

#[test]
fn offset_fetch_appends_trailing_params() {
    let mut builder = select("person");
    builder.and_eq("active", true).offset(5).fetch(10);
    let compiled = builder.build().unwrap();
    assert_eq!(
        compiled.sql,
        "SELECT * FROM person WHERE active = ? OFFSET ? ROWS FETCH NEXT ? ROWS ONLY"
    );
    assert_eq!(
        compiled.params,
        vec![Value::Bool(true), Value::Int(5), Value::Int(10)]
    );
}

#[test]
fn top_param_precedes_row_body_params() {
    let mut builder = select("person");
    builder.and_eq("active", true).top(3);
    let compiled = builder.build().unwrap();
    assert_eq!(compiled.sql, "SELECT TOP(?) * FROM person WHERE active = ?");
    assert_eq!(compiled.params, vec![Value::Int(3), Value::Bool(true)]);
}

#[test]
fn conflicting_pagination_options_are_malformed() {
    let mut builder = select("person");
    builder.top(3).limit(10);
    assert!(builder.build().unwrap_err().is_malformed());

    let mut builder = select("person");
    builder.limit(10).fetch(5);
    assert!(builder.build().unwrap_err().is_malformed());
}

#[test]
fn explicit_dialect_missing_options_is_malformed() {
    let mut builder = select("person");
    builder.dialect(PageDialect::OffsetFetch).offset(5);
    assert!(builder.build().unwrap_err().is_malformed());

    let mut builder = select("person");
    builder.dialect(PageDialect::Top);
    assert!(builder.build().unwrap_err().is_malformed());
}

#[test]
fn suffix_is_verbatim() {
    let mut builder = select("person");
    builder.and_eq("id", 1).suffix("FOR UPDATE");
    assert_eq!(
        builder.build().unwrap().sql,
        "SELECT * FROM person WHERE id = ? FOR UPDATE"
    );
}

#[test]
fn every_compiled_statement_has_matching_arity() {
    let mut ins = insert("t");
    ins.set("a", 1).set("b", Value::Null);
    let mut upd = update("t");
    upd.set("a", 1).and_eq("b", Value::Null).and_eq("c", 2);
    let mut del = delete("t");
    del.and_eq("a", Value::Null).and_eq("b", 9);
    let mut sel = select("t");
    sel.and_eq("a", 1).limit(10).offset(5);

    for compiled in [
        ins.build().unwrap(),
        upd.build().unwrap(),
        del.build().unwrap(),
        sel.build().unwrap(),
    ] {
        assert_eq!(compiled.sql.matches('?').count(), compiled.params.len());
    }
}
