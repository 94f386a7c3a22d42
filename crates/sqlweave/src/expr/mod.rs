//! Expression tree.
//!
//! This module provides the [`Term`] enum, the node type of every expression:
//! - field references, literals, JSON documents and array literals
//! - function calls
//! - binary/unary operators (comparison, logical, arithmetic)
//! - PostgreSQL JSON operators, `IN`, `BETWEEN` and aliases
//!
//! Terms are immutable trees: every node owns its children. Precedence is
//! encoded by the tree shape; the renderer adds parentheses where the SQL
//! text would otherwise parse differently.

mod criterion;
pub mod functions;
mod json;
mod ops;

pub use criterion::Criterion;
pub use json::{JsonOperator, json, parse_json};
pub use ops::TermOps;

use crate::dialect::Dialect;
use crate::error::QueryResult;
use crate::render::RenderCtx;
use crate::table::Field;
use crate::value::Value;

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    And,
    Or,
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
    Like,
    NotLike,
    ILike,
    NotILike,
    Concat,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

impl BinaryOperator {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOperator::And => "AND",
            BinaryOperator::Or => "OR",
            BinaryOperator::Eq => "=",
            BinaryOperator::Ne => "<>",
            BinaryOperator::Lt => "<",
            BinaryOperator::Lte => "<=",
            BinaryOperator::Gt => ">",
            BinaryOperator::Gte => ">=",
            BinaryOperator::Like => "LIKE",
            BinaryOperator::NotLike => "NOT LIKE",
            BinaryOperator::ILike => "ILIKE",
            BinaryOperator::NotILike => "NOT ILIKE",
            BinaryOperator::Concat => "||",
            BinaryOperator::Add => "+",
            BinaryOperator::Sub => "-",
            BinaryOperator::Mul => "*",
            BinaryOperator::Div => "/",
            BinaryOperator::Mod => "%",
        }
    }

    /// Keyword operators are written with surrounding spaces.
    pub(crate) fn is_keyword(self) -> bool {
        matches!(
            self,
            BinaryOperator::And
                | BinaryOperator::Or
                | BinaryOperator::Like
                | BinaryOperator::NotLike
                | BinaryOperator::ILike
                | BinaryOperator::NotILike
        )
    }

    pub(crate) fn is_logical(self) -> bool {
        matches!(self, BinaryOperator::And | BinaryOperator::Or)
    }

    pub(crate) fn precedence(self) -> u8 {
        match self {
            BinaryOperator::Or => prec::OR,
            BinaryOperator::And => prec::AND,
            BinaryOperator::Eq
            | BinaryOperator::Ne
            | BinaryOperator::Lt
            | BinaryOperator::Lte
            | BinaryOperator::Gt
            | BinaryOperator::Gte => prec::COMPARISON,
            BinaryOperator::Like
            | BinaryOperator::NotLike
            | BinaryOperator::ILike
            | BinaryOperator::NotILike => prec::PATTERN,
            BinaryOperator::Concat => prec::OTHER,
            BinaryOperator::Add | BinaryOperator::Sub => prec::ADDITIVE,
            BinaryOperator::Mul | BinaryOperator::Div | BinaryOperator::Mod => {
                prec::MULTIPLICATIVE
            }
        }
    }

    pub(crate) fn associativity(self) -> Assoc {
        match self {
            BinaryOperator::And
            | BinaryOperator::Or
            | BinaryOperator::Concat
            | BinaryOperator::Add
            | BinaryOperator::Mul => Assoc::Full,
            BinaryOperator::Sub | BinaryOperator::Div | BinaryOperator::Mod => Assoc::Left,
            _ => Assoc::None,
        }
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Not,
    Neg,
    IsNull,
    IsNotNull,
}

impl UnaryOperator {
    pub(crate) fn precedence(self) -> u8 {
        match self {
            UnaryOperator::Not => prec::NOT,
            UnaryOperator::Neg => prec::NEG,
            UnaryOperator::IsNull | UnaryOperator::IsNotNull => prec::IS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Assoc {
    /// `a op (b op c)` == `(a op b) op c` for the same operator.
    Full,
    Left,
    None,
}

/// Binding strength, loosest first.
pub(crate) mod prec {
    pub const OR: u8 = 1;
    pub const AND: u8 = 2;
    pub const NOT: u8 = 3;
    pub const IS: u8 = 4;
    pub const COMPARISON: u8 = 5;
    /// LIKE, IN, BETWEEN
    pub const PATTERN: u8 = 6;
    /// JSON operators and `||`
    pub const OTHER: u8 = 7;
    pub const ADDITIVE: u8 = 8;
    pub const MULTIPLICATIVE: u8 = 9;
    pub const NEG: u8 = 10;
    pub const ATOM: u8 = 11;
}

/// A node in the expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    /// `*`, optionally for one table
    Star { table: Option<String> },
    Field(Field),
    /// Literal rendered with SQL rules (sequences become array literals)
    Literal(Value),
    /// Literal rendered as a JSON document text
    Json(Value),
    /// Array literal of arbitrary terms
    Array(Vec<Term>),
    Function {
        name: String,
        args: Vec<Term>,
    },
    Binary {
        op: BinaryOperator,
        left: Box<Term>,
        right: Box<Term>,
    },
    Unary {
        op: UnaryOperator,
        operand: Box<Term>,
    },
    JsonOp {
        op: JsonOperator,
        target: Box<Term>,
        arg: Value,
    },
    In {
        term: Box<Term>,
        list: Vec<Term>,
        negated: bool,
    },
    Between {
        term: Box<Term>,
        low: Box<Term>,
        high: Box<Term>,
        negated: bool,
    },
    /// Projection alias; only rendered in SELECT lists
    Alias { term: Box<Term>, alias: String },
}

impl Term {
    /// Unqualified `*`.
    pub fn star() -> Self {
        Term::Star { table: None }
    }

    pub fn literal(value: impl Into<Value>) -> Self {
        Term::Literal(value.into())
    }

    pub fn field(name: impl Into<String>) -> Self {
        Term::Field(Field::new(name))
    }

    pub(crate) fn binary(op: BinaryOperator, left: Term, right: Term) -> Self {
        Term::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub(crate) fn unary(op: UnaryOperator, operand: Term) -> Self {
        Term::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    /// Strip a projection alias.
    pub(crate) fn unaliased(&self) -> &Term {
        match self {
            Term::Alias { term, .. } => term.unaliased(),
            other => other,
        }
    }

    pub(crate) fn precedence(&self) -> u8 {
        match self {
            Term::Binary { op, .. } => op.precedence(),
            Term::Unary { op, .. } => op.precedence(),
            Term::JsonOp { .. } => prec::OTHER,
            Term::In { .. } | Term::Between { .. } => prec::PATTERN,
            Term::Alias { term, .. } => term.precedence(),
            Term::Literal(Value::Number(n)) if n.to_string().starts_with('-') => prec::NEG,
            _ => prec::ATOM,
        }
    }

    /// Render this term on its own (fields unqualified).
    pub fn to_sql(&self, dialect: &Dialect) -> QueryResult<String> {
        RenderCtx::new(dialect, false).term(self)
    }
}

/// Arrays of terms: `array([abc.field("a"), Term::literal(1)])` → `ARRAY["a",1]`.
pub fn array<I, T>(items: I) -> Term
where
    I: IntoIterator<Item = T>,
    T: Into<Term>,
{
    Term::Array(items.into_iter().map(Into::into).collect())
}

impl From<Field> for Term {
    fn from(field: Field) -> Self {
        Term::Field(field)
    }
}

impl From<&Field> for Term {
    fn from(field: &Field) -> Self {
        Term::Field(field.clone())
    }
}

impl From<Value> for Term {
    fn from(value: Value) -> Self {
        Term::Literal(value)
    }
}

impl From<&Term> for Term {
    fn from(term: &Term) -> Self {
        term.clone()
    }
}

macro_rules! impl_term_from_literal {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Term {
                fn from(v: $t) -> Self {
                    Term::Literal(Value::from(v))
                }
            }
        )*
    };
}

impl_term_from_literal!(
    bool, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64, char, &str, String
);

impl<T: Into<Value>> From<Vec<T>> for Term {
    fn from(items: Vec<T>) -> Self {
        Term::Literal(Value::from(items))
    }
}

impl<T: Into<Value>> From<Option<T>> for Term {
    fn from(v: Option<T>) -> Self {
        Term::Literal(Value::from(v))
    }
}

/// Conversion for column positions (SELECT lists, GROUP BY, ORDER BY, ...).
///
/// Strings name fields here, and `"*"` is the wildcard; everywhere else a
/// string is a text literal.
pub trait IntoColumn {
    fn into_column(self) -> Term;
}

impl IntoColumn for &str {
    fn into_column(self) -> Term {
        if self == "*" {
            Term::star()
        } else {
            Term::field(self)
        }
    }
}

impl IntoColumn for String {
    fn into_column(self) -> Term {
        self.as_str().into_column()
    }
}

impl IntoColumn for Field {
    fn into_column(self) -> Term {
        Term::Field(self)
    }
}

impl IntoColumn for &Field {
    fn into_column(self) -> Term {
        Term::Field(self.clone())
    }
}

impl IntoColumn for Term {
    fn into_column(self) -> Term {
        self
    }
}

impl IntoColumn for &Term {
    fn into_column(self) -> Term {
        self.clone()
    }
}

impl IntoColumn for Criterion {
    fn into_column(self) -> Term {
        self.into_term()
    }
}

macro_rules! impl_arith {
    ($ty:ty) => {
        impl<R: Into<Term>> std::ops::Add<R> for $ty {
            type Output = Term;
            fn add(self, rhs: R) -> Term {
                Term::binary(BinaryOperator::Add, self.into(), rhs.into())
            }
        }

        impl<R: Into<Term>> std::ops::Sub<R> for $ty {
            type Output = Term;
            fn sub(self, rhs: R) -> Term {
                Term::binary(BinaryOperator::Sub, self.into(), rhs.into())
            }
        }

        impl<R: Into<Term>> std::ops::Mul<R> for $ty {
            type Output = Term;
            fn mul(self, rhs: R) -> Term {
                Term::binary(BinaryOperator::Mul, self.into(), rhs.into())
            }
        }

        impl<R: Into<Term>> std::ops::Div<R> for $ty {
            type Output = Term;
            fn div(self, rhs: R) -> Term {
                Term::binary(BinaryOperator::Div, self.into(), rhs.into())
            }
        }

        impl<R: Into<Term>> std::ops::Rem<R> for $ty {
            type Output = Term;
            fn rem(self, rhs: R) -> Term {
                Term::binary(BinaryOperator::Mod, self.into(), rhs.into())
            }
        }

        impl std::ops::Neg for $ty {
            type Output = Term;
            fn neg(self) -> Term {
                Term::unary(UnaryOperator::Neg, self.into())
            }
        }
    };
}

impl_arith!(Term);
impl_arith!(Field);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Table;

    fn pg(term: &Term) -> String {
        term.to_sql(&Dialect::postgres()).unwrap()
    }

    #[test]
    fn arithmetic_precedence() {
        let t = Table::new("t");
        let sum = (t.field("a") + t.field("b")) * 2;
        assert_eq!(pg(&sum), r#"("a"+"b")*2"#);

        let no_parens = t.field("a") + t.field("b") * 2;
        assert_eq!(pg(&no_parens), r#""a"+"b"*2"#);
    }

    #[test]
    fn right_operand_of_subtraction_is_grouped() {
        let t = Table::new("t");
        let diff = t.field("a") - (t.field("b") - t.field("c"));
        assert_eq!(pg(&diff), r#""a"-("b"-"c")"#);

        let left = (t.field("a") - t.field("b")) - t.field("c");
        assert_eq!(pg(&left), r#""a"-"b"-"c""#);
    }

    #[test]
    fn negative_literal_after_minus_is_grouped() {
        let t = Table::new("t");
        assert_eq!(pg(&(t.field("a") - -1)), r#""a"-(-1)"#);
        assert_eq!(pg(&-(t.field("a") + 1)), r#"-("a"+1)"#);
    }

    #[test]
    fn string_is_field_only_in_column_position() {
        assert_eq!(pg(&"id".into_column()), r#""id""#);
        assert_eq!(pg(&"*".into_column()), "*");
        assert_eq!(pg(&Term::from("id")), "'id'");
    }

    #[test]
    fn array_of_terms() {
        let t = Table::new("t");
        let arr = array([Term::from(t.field("a")), Term::from(1)]);
        assert_eq!(pg(&arr), r#"ARRAY["a",1]"#);
    }
}
