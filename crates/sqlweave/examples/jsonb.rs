//! PostgreSQL JSON/JSONB operators
//!
//! Run with: cargo run --example jsonb -p sqlweave

use sqlweave::prelude::*;

fn main() -> Result<(), QueryError> {
    let events = Table::new("events");
    let payload = || events.field("payload");

    let queries = [
        // member access by key and by index
        payload().get_json_value("user"),
        payload().get_text_value(0),
        // path access
        payload().get_path_text_value("{user,name}"),
        payload().get_path_json_value(values!["items", 0]),
        // containment
        payload().contains(Value::mapping([("kind", "signup")])),
        payload().contained_by(vec!["a", "b", "c"]),
        // key existence
        payload().has_key("user"),
        payload().has_keys(vec!["user", "ts"]),
        payload().has_any_keys(vec!["error", "warning"]),
    ];

    for criterion in queries {
        let sql = PostgreSqlQuery::from_(&events)
            .select(["*"])
            .where_(criterion)
            .to_sql()?;
        println!("{sql}");
    }

    // JSON documents as literals
    let doc = serde_json::json!({"kind": "signup", "tags": ["new", "web"]});
    let sql = PostgreSqlQuery::into(&events)
        .columns(["payload"])
        .insert([json(doc)])
        .to_sql()?;
    println!("{sql}");

    // Operators are rejected by dialects without JSON support
    let err = Query::from_(&events)
        .select(["*"])
        .where_(payload().has_key("user"))
        .to_sql()
        .unwrap_err();
    println!("ansi: {err}");

    Ok(())
}
