//! Basic usage: compile a statement, execute it against the in-memory
//! driver, and materialize the result.
//!
//! Run with:
//!   cargo run --example basic -p rowset

use rowset::mem::MemExecutor;
use rowset::prelude::*;
use rowset::{ColumnDescriptor, SqlType};

fn main() -> RowsetResult<()> {
    // The connection layer normally supplies the executor; here the mem
    // driver plays that role with a scripted result.
    let mut executor = MemExecutor::new();
    executor.queue_rows(
        vec![
            ColumnDescriptor::new(0, "id", "person", SqlType::Integer),
            ColumnDescriptor::new(1, "name", "person", SqlType::Text),
            ColumnDescriptor::new(2, "active", "person", SqlType::Boolean),
        ],
        vec![
            vec![Value::Int(1), Value::Text("ada".into()), Value::Int(1)],
            vec![Value::Int(2), Value::Text("grace".into()), Value::Int(1)],
        ],
    );

    let statement = {
        let mut builder = select("person");
        builder.and_eq("active", true).order_by("name").limit(10);
        builder.build()?
    };
    println!("sql:    {}", statement.sql);
    println!("params: {:?}", statement.params);

    let people = fetch_all(&mut executor, &statement, &FetchOptions::default())?;
    for person in &people {
        println!(
            "{:?} -> {:?}",
            person.get("person/id"),
            person.get("person/name")
        );
    }

    Ok(())
}
