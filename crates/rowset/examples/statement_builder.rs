//! Tour of the statement builders: inserts, updates, deletes and selects
//! with entity transforms and pagination dialects.
//!
//! Run with:
//!   cargo run --example statement_builder -p rowset

use rowset::prelude::*;
use std::sync::Arc;

fn show(label: &str, statement: &CompiledStatement) {
    println!("{label}:");
    println!("  sql:    {}", statement.sql);
    println!("  params: {:?}", statement.params);
}

fn main() -> RowsetResult<()> {
    let mut ins = insert("person");
    ins.set("name", "ada").set("email", Option::<&str>::None);
    show("insert", &ins.build()?);

    let mut many = insert_many("person", &["name", "active"]);
    many.row(vec![Value::Text("ada".into()), Value::Bool(true)])
        .row(vec![Value::Text("grace".into()), Value::Bool(false)]);
    show("insert_many", &many.build()?);
    let batch = many.build_batched()?;
    println!("insert_many (batched):");
    println!("  sql:    {}", batch.sql);
    println!("  groups: {:?}", batch.param_groups);

    let mut upd = update("person");
    upd.set("active", false).and_eq("id", 5);
    show("update", &upd.build()?);

    let mut del = delete("person");
    del.and_eq("deleted_at", Value::Null).and_eq("active", false);
    show("delete", &del.build()?);

    // Quoting via an entity transform, limit/offset pagination.
    let mut sel = select("person");
    sel.columns(&["id", "name"])
        .expression("count(*) OVER ()", "total")
        .and_eq("active", true)
        .order_by("name")
        .limit(10)
        .offset(5)
        .table_entities(Arc::new(|s: &str| format!("\"{s}\"")));
    show("select (limit/offset)", &sel.build()?);

    // The same spec under the ANSI offset/fetch dialect.
    let mut sel = select("person");
    sel.and_eq("active", true).offset(5).fetch(10);
    show("select (offset/fetch)", &sel.build()?);

    // Dialect-prefix row limiting: the parameter comes first.
    let mut sel = select("person");
    sel.and_eq("active", true).top(3);
    show("select (top)", &sel.build()?);

    // Injection attempts fail before any SQL text exists.
    let mut bad = select("person; DROP TABLE person");
    bad.column("id");
    println!("unsafe table: {:?}", bad.build().unwrap_err());

    Ok(())
}
