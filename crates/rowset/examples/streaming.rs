//! Lazy reduction: fold over row views without materializing them.
//!
//! Run with:
//!   cargo run --example streaming -p rowset

use rowset::mem::MemExecutor;
use rowset::prelude::*;
use rowset::{ColumnDescriptor, SqlType};
use std::ops::ControlFlow;

fn main() -> RowsetResult<()> {
    let mut executor = MemExecutor::new();
    executor.queue_rows(
        vec![
            ColumnDescriptor::new(0, "id", "event", SqlType::Integer),
            ColumnDescriptor::new(1, "kind", "event", SqlType::Text),
            ColumnDescriptor::new(2, "payload", "event", SqlType::Json),
        ],
        (1..=100)
            .map(|i| {
                vec![
                    Value::Int(i),
                    Value::Text((if i % 2 == 0 { "even" } else { "odd" }).into()),
                    Value::Json(serde_json::json!({ "seq": i })),
                ]
            })
            .collect(),
    );

    let statement = select("event").build()?;
    let options = FetchOptions::default();

    // Sum one column; the payload column is never read, and no row is
    // materialized. Stop as soon as the sum passes 100.
    let sum = reduce_rows(&mut executor, &statement, &options, 0i64, |acc, row| {
        let id = row.get("event/id")?.and_then(|v| v.as_i64()).unwrap_or(0);
        let next = acc + id;
        if next > 100 {
            Ok(ControlFlow::Break(next))
        } else {
            Ok(ControlFlow::Continue(next))
        }
    })?;
    println!("sum at early stop: {sum}");

    Ok(())
}
