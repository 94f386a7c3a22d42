//! Basic usage example for sqlweave
//!
//! Run with: cargo run --example basic -p sqlweave

use sqlweave::functions::count_star;
use sqlweave::prelude::*;

fn main() -> Result<(), QueryError> {
    let users = Table::new("users");
    let orders = Table::new("orders").as_("o");

    // SELECT with chained WHERE calls (AND-folded in call order)
    let sql = PostgreSqlQuery::from_(&users)
        .select(["id", "username"])
        .where_(users.field("status").eq("active"))
        .where_(users.field("age").gte(18) | users.field("verified").eq(true))
        .order_by_desc("created_at")
        .paginate(2, 20)
        .to_sql()?;
    println!("{sql}");

    // JOIN: fields are qualified once more than one table is in scope
    let sql = PostgreSqlQuery::from_(&users)
        .select([users.field("username").into(), count_star().as_("order_count")])
        .left_join(&orders, orders.field("user_id").eq(users.field("id")))
        .group_by([users.field("username")])
        .having(count_star().gt(5))
        .to_sql()?;
    println!("{sql}");

    // INSERT ... ON CONFLICT ... RETURNING
    let sql = PostgreSqlQuery::into(&users)
        .columns(["email", "username", "tags"])
        .insert(values!["alice@example.com", "alice", values!["admin", "ops"]])
        .insert(values!["bob@example.com", "bob", Vec::<&str>::new()])
        .on_conflict(["email"])
        .do_update_excluded("username")
        .returning(["id"])
        .to_sql()?;
    println!("{sql}");

    // UPDATE
    let sql = PostgreSqlQuery::update(&users)
        .set("visits", users.field("visits") + 1)
        .where_(users.field("id").eq(42))
        .to_sql()?;
    println!("{sql}");

    // DELETE
    let sql = PostgreSqlQuery::from_(&users)
        .delete()
        .where_(users.field("status").isin(["banned", "deleted"]))
        .to_sql()?;
    println!("{sql}");

    // The same builder rendered for another dialect
    let qb = Query::from_(&users)
        .select(["id"])
        .where_(users.field("active").eq(true));
    println!("{}", qb.render(&Dialect::mysql())?);
    println!("{}", qb.render(&Dialect::sqlite())?);

    Ok(())
}
