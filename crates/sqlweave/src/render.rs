//! Term rendering.
//!
//! Every term is written into a single `String` buffer. Parentheses are
//! derived from the tree: a child is grouped when writing it bare would let
//! the surrounding operator bind differently.

use crate::dialect::{ArrayStyle, Dialect};
use crate::error::{QueryError, QueryResult};
use crate::expr::{Assoc, BinaryOperator, Term, UnaryOperator, prec};
use crate::literal::{LiteralMode, write_value};

#[derive(Debug, Clone, Copy)]
pub(crate) struct RenderCtx<'a> {
    pub dialect: &'a Dialect,
    /// Qualify fields with their table name or alias.
    pub qualify: bool,
}

#[derive(Clone, Copy)]
enum Side {
    Left,
    Right,
}

impl<'a> RenderCtx<'a> {
    pub fn new(dialect: &'a Dialect, qualify: bool) -> Self {
        Self { dialect, qualify }
    }

    pub fn term(&self, term: &Term) -> QueryResult<String> {
        let mut out = String::new();
        self.write_term(&mut out, term)?;
        Ok(out)
    }

    /// SELECT-list entry: the term plus its alias, if any.
    pub fn write_projection(&self, out: &mut String, term: &Term) -> QueryResult<()> {
        match term {
            Term::Alias { term, alias } => {
                self.write_term(out, term)?;
                out.push_str(if self.dialect.alias_keyword { " AS " } else { " " });
                crate::ident::write_ident(out, alias, self.dialect);
                Ok(())
            }
            other => self.write_term(out, other),
        }
    }

    /// Comma-separated terms, no spaces.
    pub fn write_list(&self, out: &mut String, terms: &[Term]) -> QueryResult<()> {
        for (i, term) in terms.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            self.write_term(out, term)?;
        }
        Ok(())
    }

    pub fn write_term(&self, out: &mut String, term: &Term) -> QueryResult<()> {
        match term {
            Term::Star { table } => {
                if let (true, Some(table)) = (self.qualify, table) {
                    crate::ident::write_ident(out, table, self.dialect);
                    out.push('.');
                }
                out.push('*');
            }
            Term::Field(field) => field.write_sql(out, self.dialect, self.qualify),
            Term::Literal(value) => write_value(out, value, self.dialect, LiteralMode::Sql)?,
            Term::Json(value) => write_value(out, value, self.dialect, LiteralMode::Json)?,
            Term::Array(items) => self.write_array(out, items)?,
            Term::Function { name, args } => {
                out.push_str(name);
                out.push('(');
                self.write_list(out, args)?;
                out.push(')');
            }
            Term::Binary { op, left, right } => self.write_binary(out, *op, left, right)?,
            Term::Unary { op, operand } => self.write_unary(out, *op, operand)?,
            Term::JsonOp { op, target, arg } => {
                self.dialect
                    .require(self.dialect.capabilities.json_operators, "JSON operators")?;
                self.write_operand(out, target, target.precedence() < prec::OTHER)?;
                out.push_str(op.symbol());
                write_value(out, arg, self.dialect, op.operand_mode())?;
            }
            Term::In {
                term,
                list,
                negated,
            } => {
                if list.is_empty() {
                    out.push_str(if *negated { "1=1" } else { "1=0" });
                    return Ok(());
                }
                self.write_operand(out, term, term.precedence() <= prec::PATTERN)?;
                out.push_str(if *negated { " NOT IN (" } else { " IN (" });
                self.write_list(out, list)?;
                out.push(')');
            }
            Term::Between {
                term,
                low,
                high,
                negated,
            } => {
                self.write_operand(out, term, term.precedence() <= prec::PATTERN)?;
                out.push_str(if *negated { " NOT BETWEEN " } else { " BETWEEN " });
                self.write_operand(out, low, low.precedence() <= prec::PATTERN)?;
                out.push_str(" AND ");
                self.write_operand(out, high, high.precedence() <= prec::PATTERN)?;
            }
            // Aliases only show up in projections.
            Term::Alias { term, .. } => self.write_term(out, term)?,
        }
        Ok(())
    }

    fn write_array(&self, out: &mut String, items: &[Term]) -> QueryResult<()> {
        let (open, close) = match self.dialect.array_style {
            ArrayStyle::Keyword if items.is_empty() => {
                out.push_str("'{}'");
                return Ok(());
            }
            ArrayStyle::Keyword => ("ARRAY[", "]"),
            ArrayStyle::Brackets => ("[", "]"),
            ArrayStyle::Unsupported => {
                return Err(QueryError::unsupported_value(format!(
                    "array has no literal form in the {} dialect",
                    self.dialect.name
                )));
            }
        };
        out.push_str(open);
        self.write_list(out, items)?;
        out.push_str(close);
        Ok(())
    }

    fn write_binary(
        &self,
        out: &mut String,
        op: BinaryOperator,
        left: &Term,
        right: &Term,
    ) -> QueryResult<()> {
        if matches!(op, BinaryOperator::ILike | BinaryOperator::NotILike) {
            self.dialect.require(self.dialect.capabilities.ilike, "ILIKE")?;
        }

        self.write_operand(out, left, needs_parens(op, left, Side::Left))?;
        if op.is_keyword() {
            out.push(' ');
            out.push_str(op.symbol());
            out.push(' ');
        } else {
            out.push_str(op.symbol());
        }

        let rhs = self.term(right)?;
        let group = needs_parens(op, right, Side::Right) || fuses_with_operator(op, &rhs);
        push_grouped(out, &rhs, group);
        Ok(())
    }

    fn write_unary(&self, out: &mut String, op: UnaryOperator, operand: &Term) -> QueryResult<()> {
        match op {
            UnaryOperator::Not => {
                out.push_str("NOT ");
                self.write_operand(out, operand, operand.precedence() < prec::NOT)?;
            }
            UnaryOperator::Neg => {
                let inner = self.term(operand)?;
                out.push('-');
                let group = operand.precedence() < prec::NEG || inner.starts_with('-');
                push_grouped(out, &inner, group);
            }
            UnaryOperator::IsNull | UnaryOperator::IsNotNull => {
                self.write_operand(out, operand, operand.precedence() <= prec::IS)?;
                out.push_str(if op == UnaryOperator::IsNull {
                    " IS NULL"
                } else {
                    " IS NOT NULL"
                });
            }
        }
        Ok(())
    }

    fn write_operand(&self, out: &mut String, term: &Term, group: bool) -> QueryResult<()> {
        if group {
            out.push('(');
            self.write_term(out, term)?;
            out.push(')');
        } else {
            self.write_term(out, term)?;
        }
        Ok(())
    }
}

fn push_grouped(out: &mut String, sql: &str, group: bool) {
    if group {
        out.push('(');
        out.push_str(sql);
        out.push(')');
    } else {
        out.push_str(sql);
    }
}

/// Whether `rhs` written directly after `op` would lex as something else:
/// `--` and `/*` open comments, and PostgreSQL keeps a trailing `-` as part
/// of an operator that contains `%` or `|`.
fn fuses_with_operator(op: BinaryOperator, rhs: &str) -> bool {
    match op {
        BinaryOperator::Sub | BinaryOperator::Mod | BinaryOperator::Concat => rhs.starts_with('-'),
        BinaryOperator::Div => rhs.starts_with('*'),
        _ => false,
    }
}

fn needs_parens(parent: BinaryOperator, child: &Term, side: Side) -> bool {
    let child = child.unaliased();
    let parent_prec = parent.precedence();
    let child_prec = child.precedence();

    // Mixed AND/OR is always grouped, even where precedence would do.
    if let Term::Binary { op, .. } = child {
        if parent.is_logical() && op.is_logical() && *op != parent {
            return true;
        }
    }

    if child_prec < parent_prec {
        return true;
    }
    if child_prec > parent_prec {
        return false;
    }

    match (parent.associativity(), side) {
        (Assoc::None, _) => true,
        (_, Side::Left) => false,
        (Assoc::Full, Side::Right) => !matches!(child, Term::Binary { op, .. } if *op == parent),
        (Assoc::Left, Side::Right) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{Criterion, TermOps, array};
    use crate::table::Table;

    #[test]
    fn qualified_fields_and_star() {
        let abc = Table::new("abc");
        let pg = Dialect::postgres();
        let ctx = RenderCtx::new(&pg, true);
        assert_eq!(ctx.term(&abc.field("id").into()).unwrap(), r#""abc"."id""#);
        assert_eq!(ctx.term(&abc.star()).unwrap(), r#""abc".*"#);

        let ctx = RenderCtx::new(&pg, false);
        assert_eq!(ctx.term(&abc.star()).unwrap(), "*");
    }

    #[test]
    fn projection_alias() {
        let abc = Table::new("abc");
        let pg = Dialect::postgres();
        let mut out = String::new();
        RenderCtx::new(&pg, false)
            .write_projection(&mut out, &abc.field("id").as_("ident"))
            .unwrap();
        assert_eq!(out, r#""id" "ident""#);
    }

    #[test]
    fn json_operators_need_capability() {
        let abc = Table::new("abc");
        let err = abc
            .field("json")
            .has_key("a")
            .to_sql(&Dialect::ansi())
            .unwrap_err();
        assert!(err.is_unsupported_feature());
    }

    #[test]
    fn ilike_needs_capability() {
        let abc = Table::new("abc");
        let c: Criterion = abc.field("name").ilike("a%");
        assert!(c.to_sql(&Dialect::ansi()).unwrap_err().is_unsupported_feature());
        assert_eq!(c.to_sql(&Dialect::postgres()).unwrap(), r#""name" ILIKE 'a%'"#);
    }

    #[test]
    fn empty_term_array() {
        assert_eq!(array(Vec::<Term>::new()).to_sql(&Dialect::postgres()).unwrap(), "'{}'");
        assert_eq!(array(Vec::<Term>::new()).to_sql(&Dialect::ansi()).unwrap(), "[]");
    }

    #[test]
    fn right_operand_never_fuses_into_operator_or_comment() {
        let t = Table::new("t");
        let pg = Dialect::postgres();
        let render = |term: Term| term.to_sql(&pg).unwrap();

        assert_eq!(render(t.field("a") % -1), r#""a"%(-1)"#);
        assert_eq!(render(t.field("a") % -t.field("b")), r#""a"%(-"b")"#);
        assert_eq!(render(t.field("a").concat(-1)), r#""a"||(-1)"#);
        assert_eq!(render(t.field("a") - -1), r#""a"-(-1)"#);
        assert_eq!(render(t.field("a") / Term::star()), r#""a"/(*)"#);
    }

    #[test]
    fn leading_minus_is_kept_bare_where_it_cannot_fuse() {
        let t = Table::new("t");
        let pg = Dialect::postgres();
        assert_eq!((t.field("a") * -1).to_sql(&pg).unwrap(), r#""a"*-1"#);
        assert_eq!((t.field("a") + -1).to_sql(&pg).unwrap(), r#""a"+-1"#);
        assert_eq!(t.field("a").eq(-1).to_sql(&pg).unwrap(), r#""a"=-1"#);
    }

    #[test]
    fn in_list_operand_is_grouped_when_loose() {
        let abc = Table::new("abc");
        let c = (abc.field("a") + 1).isin([2, 3]);
        assert_eq!(c.to_sql(&Dialect::postgres()).unwrap(), r#""a"+1 IN (2,3)"#);
    }
}
