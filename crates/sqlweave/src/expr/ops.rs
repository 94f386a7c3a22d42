use super::{BinaryOperator, Criterion, JsonOperator, Term, UnaryOperator};
use crate::table::Field;
use crate::value::Value;

/// Comparison, pattern, membership and JSON operators.
///
/// Every method consumes the receiver and returns a new [`Criterion`]; the
/// receiver is never mutated. Right-hand sides accept anything convertible to
/// a [`Term`], so plain Rust values become literals and [`Field`]s stay
/// column references.
pub trait TermOps: Into<Term> + Sized {
    fn eq(self, other: impl Into<Term>) -> Criterion {
        compare(BinaryOperator::Eq, self, other)
    }

    fn ne(self, other: impl Into<Term>) -> Criterion {
        compare(BinaryOperator::Ne, self, other)
    }

    fn lt(self, other: impl Into<Term>) -> Criterion {
        compare(BinaryOperator::Lt, self, other)
    }

    fn lte(self, other: impl Into<Term>) -> Criterion {
        compare(BinaryOperator::Lte, self, other)
    }

    fn gt(self, other: impl Into<Term>) -> Criterion {
        compare(BinaryOperator::Gt, self, other)
    }

    fn gte(self, other: impl Into<Term>) -> Criterion {
        compare(BinaryOperator::Gte, self, other)
    }

    fn like(self, pattern: impl Into<Term>) -> Criterion {
        compare(BinaryOperator::Like, self, pattern)
    }

    fn not_like(self, pattern: impl Into<Term>) -> Criterion {
        compare(BinaryOperator::NotLike, self, pattern)
    }

    /// Case-insensitive LIKE (PostgreSQL).
    fn ilike(self, pattern: impl Into<Term>) -> Criterion {
        compare(BinaryOperator::ILike, self, pattern)
    }

    fn not_ilike(self, pattern: impl Into<Term>) -> Criterion {
        compare(BinaryOperator::NotILike, self, pattern)
    }

    /// `||` string concatenation.
    fn concat(self, other: impl Into<Term>) -> Term {
        Term::binary(BinaryOperator::Concat, self.into(), other.into())
    }

    fn is_null(self) -> Criterion {
        Criterion(Term::unary(UnaryOperator::IsNull, self.into()))
    }

    fn is_not_null(self) -> Criterion {
        Criterion(Term::unary(UnaryOperator::IsNotNull, self.into()))
    }

    /// `IN (...)`; an empty list renders as a false condition.
    fn isin<I, T>(self, items: I) -> Criterion
    where
        I: IntoIterator<Item = T>,
        T: Into<Term>,
    {
        membership(self, items, false)
    }

    /// `NOT IN (...)`; an empty list renders as a true condition.
    fn notin<I, T>(self, items: I) -> Criterion
    where
        I: IntoIterator<Item = T>,
        T: Into<Term>,
    {
        membership(self, items, true)
    }

    fn between(self, low: impl Into<Term>, high: impl Into<Term>) -> Criterion {
        range(self, low, high, false)
    }

    fn not_between(self, low: impl Into<Term>, high: impl Into<Term>) -> Criterion {
        range(self, low, high, true)
    }

    /// Alias for SELECT lists: `"a" "total"`.
    fn as_(self, alias: impl Into<String>) -> Term {
        Term::Alias {
            term: Box::new(self.into()),
            alias: alias.into(),
        }
    }

    /// `->`: JSON member by key (text) or element by index (number).
    fn get_json_value(self, key_or_index: impl Into<Value>) -> Criterion {
        json_op(JsonOperator::GetJsonValue, self, key_or_index)
    }

    /// `->>`: like [`get_json_value`](TermOps::get_json_value) but yields text.
    fn get_text_value(self, key_or_index: impl Into<Value>) -> Criterion {
        json_op(JsonOperator::GetTextValue, self, key_or_index)
    }

    /// `#>`: JSON value at a path such as `"{a,b}"` or `["a", "b"]`.
    fn get_path_json_value(self, path: impl Into<Value>) -> Criterion {
        json_op(JsonOperator::GetPathJsonValue, self, path)
    }

    /// `#>>`: text value at a path.
    fn get_path_text_value(self, path: impl Into<Value>) -> Criterion {
        json_op(JsonOperator::GetPathTextValue, self, path)
    }

    /// `@>`: left document contains the right one.
    fn contains(self, document: impl Into<Value>) -> Criterion {
        json_op(JsonOperator::Contains, self, document)
    }

    /// `<@`: left document is contained by the right one.
    fn contained_by(self, document: impl Into<Value>) -> Criterion {
        json_op(JsonOperator::ContainedBy, self, document)
    }

    /// `?`: top-level key exists.
    fn has_key(self, key: impl Into<Value>) -> Criterion {
        json_op(JsonOperator::HasKey, self, key)
    }

    /// `?&`: all keys exist.
    fn has_keys(self, keys: impl Into<Value>) -> Criterion {
        json_op(JsonOperator::HasKeys, self, keys)
    }

    /// `?|`: any of the keys exists.
    fn has_any_keys(self, keys: impl Into<Value>) -> Criterion {
        json_op(JsonOperator::HasAnyKeys, self, keys)
    }
}

impl TermOps for Term {}
impl TermOps for Field {}
impl TermOps for Criterion {}

fn compare(op: BinaryOperator, left: impl Into<Term>, right: impl Into<Term>) -> Criterion {
    Criterion(Term::binary(op, left.into(), right.into()))
}

fn membership<I, T>(term: impl Into<Term>, items: I, negated: bool) -> Criterion
where
    I: IntoIterator<Item = T>,
    T: Into<Term>,
{
    Criterion(Term::In {
        term: Box::new(term.into()),
        list: items.into_iter().map(Into::into).collect(),
        negated,
    })
}

fn range(
    term: impl Into<Term>,
    low: impl Into<Term>,
    high: impl Into<Term>,
    negated: bool,
) -> Criterion {
    Criterion(Term::Between {
        term: Box::new(term.into()),
        low: Box::new(low.into()),
        high: Box::new(high.into()),
        negated,
    })
}

fn json_op(op: JsonOperator, target: impl Into<Term>, arg: impl Into<Value>) -> Criterion {
    Criterion(Term::JsonOp {
        op,
        target: Box::new(target.into()),
        arg: arg.into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::Dialect;
    use crate::table::Table;

    fn pg(c: impl Into<Term>) -> String {
        c.into().to_sql(&Dialect::postgres()).unwrap()
    }

    #[test]
    fn comparisons_render_without_spaces() {
        let t = Table::new("t");
        assert_eq!(pg(t.field("id").eq(26)), r#""id"=26"#);
        assert_eq!(pg(t.field("id").ne(26)), r#""id"<>26"#);
        assert_eq!(pg(t.field("a").lte(t.field("b"))), r#""a"<="b""#);
    }

    #[test]
    fn pattern_operators_are_spaced() {
        let t = Table::new("t");
        assert_eq!(pg(t.field("name").like("a%")), r#""name" LIKE 'a%'"#);
        assert_eq!(pg(t.field("name").not_ilike("a%")), r#""name" NOT ILIKE 'a%'"#);
    }

    #[test]
    fn null_checks() {
        let t = Table::new("t");
        assert_eq!(pg(t.field("a").is_null()), r#""a" IS NULL"#);
        assert_eq!(pg(t.field("a").is_not_null()), r#""a" IS NOT NULL"#);
    }

    #[test]
    fn membership() {
        let t = Table::new("t");
        assert_eq!(pg(t.field("id").isin([1, 2, 3])), r#""id" IN (1,2,3)"#);
        assert_eq!(pg(t.field("id").notin(["a"])), r#""id" NOT IN ('a')"#);
        assert_eq!(pg(t.field("id").isin(Vec::<i32>::new())), "1=0");
        assert_eq!(pg(t.field("id").notin(Vec::<i32>::new())), "1=1");
    }

    #[test]
    fn between() {
        let t = Table::new("t");
        assert_eq!(pg(t.field("n").between(1, 10)), r#""n" BETWEEN 1 AND 10"#);
        assert_eq!(pg(t.field("n").not_between(1, 10)), r#""n" NOT BETWEEN 1 AND 10"#);
    }

    #[test]
    fn concat() {
        let t = Table::new("t");
        assert_eq!(pg(t.field("a").concat("-").concat(t.field("b"))), r#""a"||'-'||"b""#);
    }

    #[test]
    fn comparison_of_comparisons_is_grouped() {
        let t = Table::new("t");
        let c = t.field("a").eq(1).eq(true);
        assert_eq!(pg(c), r#"("a"=1)=true"#);
    }
}
