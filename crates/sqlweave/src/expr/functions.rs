//! SQL function calls.
//!
//! ```ignore
//! use sqlweave::functions::{count_star, lower};
//! use sqlweave::Table;
//!
//! let users = Table::new("users");
//! let expr = lower(users.field("email"));
//! ```

use super::Term;

/// Generic `NAME(arg,...)` call; the name is written as given.
pub fn function<I, T>(name: impl Into<String>, args: I) -> Term
where
    I: IntoIterator<Item = T>,
    T: Into<Term>,
{
    Term::Function {
        name: name.into(),
        args: args.into_iter().map(Into::into).collect(),
    }
}

pub fn count(term: impl Into<Term>) -> Term {
    function("COUNT", [term.into()])
}

/// `COUNT(*)`
pub fn count_star() -> Term {
    function("COUNT", [Term::star()])
}

pub fn sum(term: impl Into<Term>) -> Term {
    function("SUM", [term.into()])
}

pub fn avg(term: impl Into<Term>) -> Term {
    function("AVG", [term.into()])
}

pub fn min(term: impl Into<Term>) -> Term {
    function("MIN", [term.into()])
}

pub fn max(term: impl Into<Term>) -> Term {
    function("MAX", [term.into()])
}

pub fn lower(term: impl Into<Term>) -> Term {
    function("LOWER", [term.into()])
}

pub fn upper(term: impl Into<Term>) -> Term {
    function("UPPER", [term.into()])
}

pub fn coalesce<I, T>(terms: I) -> Term
where
    I: IntoIterator<Item = T>,
    T: Into<Term>,
{
    function("COALESCE", terms)
}

pub fn now() -> Term {
    function("NOW", Vec::<Term>::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::Dialect;
    use crate::table::Table;

    fn pg(t: Term) -> String {
        t.to_sql(&Dialect::postgres()).unwrap()
    }

    #[test]
    fn calls() {
        let t = Table::new("t");
        assert_eq!(pg(count_star()), "COUNT(*)");
        assert_eq!(pg(lower(t.field("email"))), r#"LOWER("email")"#);
        assert_eq!(pg(coalesce([Term::from(t.field("a")), Term::from(0)])), r#"COALESCE("a",0)"#);
        assert_eq!(pg(now()), "NOW()");
    }

    #[test]
    fn arithmetic_inside_arguments() {
        let t = Table::new("t");
        assert_eq!(pg(sum(t.field("a") * t.field("b"))), r#"SUM("a"*"b")"#);
    }
}
