use std::ops::{BitAnd, BitOr, Not};

use super::{BinaryOperator, Term, UnaryOperator};
use crate::dialect::Dialect;
use crate::error::QueryResult;
use crate::table::Field;

/// A boolean-valued term used in WHERE/HAVING/ON.
///
/// Criteria combine with `&` (AND), `|` (OR) and `!` (NOT):
///
/// ```ignore
/// use sqlweave::{Table, TermOps};
///
/// let abc = Table::new("abc");
/// let c = abc.field("a").eq(1) & (abc.field("b").gt(2) | abc.field("c").is_null());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Criterion(pub(crate) Term);

impl Criterion {
    pub fn new(term: impl Into<Term>) -> Self {
        Criterion(term.into())
    }

    pub fn and(self, other: impl Into<Criterion>) -> Self {
        Criterion(Term::binary(BinaryOperator::And, self.0, other.into().0))
    }

    pub fn or(self, other: impl Into<Criterion>) -> Self {
        Criterion(Term::binary(BinaryOperator::Or, self.0, other.into().0))
    }

    pub fn negate(self) -> Self {
        Criterion(Term::unary(UnaryOperator::Not, self.0))
    }

    /// AND of all criteria; `None` when empty.
    pub fn all<I>(criteria: I) -> Option<Self>
    where
        I: IntoIterator<Item = Criterion>,
    {
        criteria.into_iter().reduce(Criterion::and)
    }

    /// OR of all criteria; `None` when empty.
    pub fn any<I>(criteria: I) -> Option<Self>
    where
        I: IntoIterator<Item = Criterion>,
    {
        criteria.into_iter().reduce(Criterion::or)
    }

    pub fn as_term(&self) -> &Term {
        &self.0
    }

    pub fn into_term(self) -> Term {
        self.0
    }

    pub fn to_sql(&self, dialect: &Dialect) -> QueryResult<String> {
        self.0.to_sql(dialect)
    }
}

impl From<Term> for Criterion {
    fn from(term: Term) -> Self {
        Criterion(term)
    }
}

impl From<Field> for Criterion {
    fn from(field: Field) -> Self {
        Criterion(Term::Field(field))
    }
}

impl From<Criterion> for Term {
    fn from(c: Criterion) -> Self {
        c.0
    }
}

impl<R: Into<Criterion>> BitAnd<R> for Criterion {
    type Output = Criterion;

    fn bitand(self, rhs: R) -> Criterion {
        self.and(rhs)
    }
}

impl<R: Into<Criterion>> BitOr<R> for Criterion {
    type Output = Criterion;

    fn bitor(self, rhs: R) -> Criterion {
        self.or(rhs)
    }
}

impl Not for Criterion {
    type Output = Criterion;

    fn not(self) -> Criterion {
        self.negate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::TermOps;
    use crate::table::Table;

    fn pg(c: &Criterion) -> String {
        c.to_sql(&Dialect::postgres()).unwrap()
    }

    #[test]
    fn and_or_nesting_is_parenthesized() {
        let t = Table::new("t");
        let c = t.field("a").eq(1) & (t.field("b").eq(2) | t.field("c").eq(3));
        assert_eq!(pg(&c), r#""a"=1 AND ("b"=2 OR "c"=3)"#);

        let c = (t.field("a").eq(1) & t.field("b").eq(2)) | t.field("c").eq(3);
        assert_eq!(pg(&c), r#"("a"=1 AND "b"=2) OR "c"=3"#);
    }

    #[test]
    fn chained_and_is_flat() {
        let t = Table::new("t");
        let c = t.field("a").eq(1) & t.field("b").eq(2) & t.field("c").eq(3);
        assert_eq!(pg(&c), r#""a"=1 AND "b"=2 AND "c"=3"#);
    }

    #[test]
    fn not_wraps_compound() {
        let t = Table::new("t");
        assert_eq!(pg(&!t.field("a").eq(1)), r#"NOT "a"=1"#);
        let c = !(t.field("a").eq(1) & t.field("b").eq(2));
        assert_eq!(pg(&c), r#"NOT ("a"=1 AND "b"=2)"#);
    }

    #[test]
    fn all_and_any() {
        let t = Table::new("t");
        assert!(Criterion::all(Vec::new()).is_none());
        let c = Criterion::any([t.field("a").eq(1), t.field("a").eq(2)]).unwrap();
        assert_eq!(pg(&c), r#""a"=1 OR "a"=2"#);
    }
}
