use std::collections::{BTreeSet, HashMap};

use sqlweave::{PostgreSqlQuery, Table, Term, TermOps, Value, json, values};

fn abc() -> Table {
    Table::new("abc")
}

fn select_where(criterion: sqlweave::Criterion) -> String {
    let abc = abc();
    PostgreSqlQuery::from_(&abc)
        .select(["*"])
        .where_(criterion)
        .to_sql()
        .unwrap()
}

/// Split `prefix{members}suffix` and return the member set.
///
/// Members built from a hash map have no stable order.
fn members<'a>(sql: &'a str, prefix: &str, suffix: &str) -> BTreeSet<&'a str> {
    assert!(sql.starts_with(prefix), "{sql} does not start with {prefix}");
    assert!(sql.ends_with(suffix), "{sql} does not end with {suffix}");
    sql[prefix.len()..sql.len() - suffix.len()].split(',').collect()
}

// ==================== INSERT ====================

#[test]
fn insert_array_keyword() {
    let sql = PostgreSqlQuery::into(&abc())
        .insert(values![1, values![1, "a", true]])
        .to_sql()
        .unwrap();
    assert_eq!(sql, r#"INSERT INTO "abc" VALUES (1,ARRAY[1,'a',true])"#);
}

// ==================== JSON documents ====================

#[test]
fn json_value_from_mapping() {
    let sql = PostgreSqlQuery::select([json(Value::mapping([("a", "foo")]))])
        .to_sql()
        .unwrap();
    assert_eq!(sql, r#"SELECT '{"a":"foo"}'"#);
}

#[test]
fn json_value_from_number_array() {
    let sql = PostgreSqlQuery::select([json(vec![1, 2, 3])]).to_sql().unwrap();
    assert_eq!(sql, "SELECT '[1,2,3]'");
}

#[test]
fn json_value_from_string_array() {
    let sql = PostgreSqlQuery::select([json(vec!["a", "b", "c"])])
        .to_sql()
        .unwrap();
    assert_eq!(sql, r#"SELECT '["a","b","c"]'"#);
}

#[test]
fn json_value_from_nested_hash_map() {
    let mut inner = HashMap::new();
    inner.insert("c", Value::from("foo"));
    let mut doc = HashMap::new();
    doc.insert("a", Value::from("z"));
    doc.insert("b", Value::from(inner));
    doc.insert("d", Value::from(1));

    let sql = PostgreSqlQuery::select([json(doc)]).to_sql().unwrap();
    assert_eq!(
        members(&sql, "SELECT '{", "}'"),
        BTreeSet::from([r#""a":"z""#, r#""b":{"c":"foo"}"#, r#""d":1"#])
    );
}

// ==================== JSON operators ====================

#[test]
fn get_json_value_by_key() {
    let sql = select_where(abc().field("json").get_json_value("dates"));
    assert_eq!(sql, r#"SELECT * FROM "abc" WHERE "json"->'dates'"#);
}

#[test]
fn get_json_value_by_index() {
    let sql = select_where(abc().field("json").get_json_value(1));
    assert_eq!(sql, r#"SELECT * FROM "abc" WHERE "json"->1"#);
}

#[test]
fn get_text_value_by_key() {
    let sql = select_where(abc().field("json").get_text_value("dates"));
    assert_eq!(sql, r#"SELECT * FROM "abc" WHERE "json"->>'dates'"#);
}

#[test]
fn get_text_value_by_index() {
    let sql = select_where(abc().field("json").get_text_value(1));
    assert_eq!(sql, r#"SELECT * FROM "abc" WHERE "json"->>1"#);
}

#[test]
fn get_path_json_value() {
    let sql = select_where(abc().field("json").get_path_json_value("{a,b}"));
    assert_eq!(sql, r##"SELECT * FROM "abc" WHERE "json"#>'{a,b}'"##);
}

#[test]
fn get_path_text_value() {
    let sql = select_where(abc().field("json").get_path_text_value("{a,b}"));
    assert_eq!(sql, r##"SELECT * FROM "abc" WHERE "json"#>>'{a,b}'"##);
}

#[test]
fn get_path_from_sequence() {
    let sql = select_where(abc().field("json").get_path_text_value(values!["a", 2]));
    assert_eq!(sql, r##"SELECT * FROM "abc" WHERE "json"#>>'{a,2}'"##);
}

// ==================== JSONB operators ====================

#[test]
fn json_contains_for_json() {
    let mut doc = HashMap::new();
    doc.insert("a", 1);
    doc.insert("b", 2);

    let sql = PostgreSqlQuery::select([json(doc).contains(Value::mapping([("a", 1)]))])
        .to_sql()
        .unwrap();
    assert_eq!(
        members(&sql, "SELECT '{", r#"}'@>'{"a":1}'"#),
        BTreeSet::from([r#""a":1"#, r#""b":2"#])
    );
}

#[test]
fn json_contains_for_field() {
    let sql = select_where(
        abc()
            .field("json")
            .contains(Value::mapping([("dates", "2018-07-10 - 2018-07-17")])),
    );
    assert_eq!(
        sql,
        r#"SELECT * FROM "abc" WHERE "json"@>'{"dates":"2018-07-10 - 2018-07-17"}'"#
    );
}

#[test]
fn json_contained_by_ordered_mapping() {
    let sql = select_where(abc().field("json").contained_by(Value::mapping([
        ("dates", "2018-07-10 - 2018-07-17"),
        ("imported", "8"),
    ])));
    assert_eq!(
        sql,
        r#"SELECT * FROM "abc" WHERE "json"<@'{"dates":"2018-07-10 - 2018-07-17","imported":"8"}'"#
    );
}

#[test]
fn json_contained_by_list() {
    let sql = select_where(abc().field("json").contained_by(vec!["One", "Two", "Three"]));
    assert_eq!(sql, r#"SELECT * FROM "abc" WHERE "json"<@'["One","Two","Three"]'"#);
}

#[test]
fn json_contained_by_with_complex_criterion() {
    let abc = abc();
    let sql = select_where(
        abc.field("json").contained_by(vec!["One", "Two", "Three"]) & abc.field("id").eq(26),
    );
    assert_eq!(
        sql,
        r#"SELECT * FROM "abc" WHERE "json"<@'["One","Two","Three"]' AND "id"=26"#
    );
}

#[test]
fn json_has_key() {
    let sql = select_where(abc().field("json").has_key("dates"));
    assert_eq!(sql, r#"SELECT * FROM "abc" WHERE "json"?'dates'"#);
}

#[test]
fn json_has_keys() {
    let sql = select_where(abc().field("json").has_keys(vec!["dates", "imported"]));
    assert_eq!(
        sql,
        r#"SELECT * FROM "abc" WHERE "json"?&ARRAY['dates','imported']"#
    );
}

#[test]
fn json_has_any_keys() {
    let sql = select_where(abc().field("json").has_any_keys(vec!["dates", "imported"]));
    assert_eq!(
        sql,
        r#"SELECT * FROM "abc" WHERE "json"?|ARRAY['dates','imported']"#
    );
}

#[test]
fn json_operator_in_disjunction() {
    let abc = abc();
    let sql = select_where(
        abc.field("json").has_key("a") | abc.field("json").get_text_value("b").eq("x"),
    );
    assert_eq!(
        sql,
        r#"SELECT * FROM "abc" WHERE "json"?'a' OR "json"->>'b'='x'"#
    );
}

// ==================== DISTINCT ON ====================

#[test]
fn distinct_on() {
    let abc = abc();
    let sql = PostgreSqlQuery::from_(&abc)
        .distinct_on([Term::field("lname"), abc.field("fname").into()])
        .select(["lname", "id"])
        .to_sql()
        .unwrap();
    assert_eq!(sql, r#"SELECT DISTINCT ON("lname","fname") "lname","id" FROM "abc""#);
}
