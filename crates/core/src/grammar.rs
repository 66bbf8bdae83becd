//! The grammar table: process-wide, immutable, constant data.
//!
//! Alternative order is semantics, not style. The parser commits to the
//! first alternative that matches, so `Rhs` must try its binary form
//! before its single-operand form -- the language has no operator
//! precedence, and chaining operators requires parenthesized groups.

use crate::lexer::TokenKind;

/// Non-terminals of the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleName {
    Scope,
    ExprList,
    Expr,
    Increment,
    Set,
    Export,
    Import,
    Rhs,
    Lookup,
    Group,
}

/// One slot of a production: a terminal token kind or a rule to recurse
/// into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    Tok(TokenKind),
    Rule(RuleName),
}

/// Ordered alternative productions for a rule.
pub fn alternatives(rule: RuleName) -> &'static [&'static [Symbol]] {
    use RuleName::*;
    use Symbol::{Rule as R, Tok as T};
    use TokenKind::*;

    match rule {
        Scope => &[&[T(LBrace), T(ScopeName), R(ExprList), T(RBrace)]],
        ExprList => &[&[R(Expr), R(ExprList)], &[R(Expr)]],
        Expr => &[
            &[R(Increment)],
            &[R(Set)],
            &[R(Scope)],
            &[R(Export)],
            &[R(Import)],
        ],
        Increment => &[&[T(Name), T(PlusEqual), T(Number)]],
        Set => &[&[T(Name), T(Equal), T(Number)]],
        Export => &[&[T(Name), T(CaretEqual), R(Rhs)]],
        Import => &[&[T(Name), T(VEqual), R(Rhs)]],
        Rhs => &[&[R(Lookup), T(ArithOp), R(Lookup)], &[R(Lookup)]],
        Lookup => &[&[T(Name)], &[T(Number)], &[R(Group)], &[R(Rhs)]],
        Group => &[&[T(LParen), R(Rhs), T(RParen)]],
    }
}
