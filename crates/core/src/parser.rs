//! Ordered backtracking recursive descent over the grammar table.
//!
//! No lookahead, no memoization: for a rule, alternatives are tried in
//! declaration order; a production matches its symbols in sequence from
//! the current index; any symbol failure abandons the whole production
//! and the next alternative retries from the original start index. The
//! first fully-matching production wins.

use crate::error::SourceError;
use crate::grammar::{alternatives, RuleName, Symbol};
use crate::lexer::Token;
use crate::tree::{ParseChild, ParseNode};

/// Parse a token sequence as a single top-level `Scope`.
///
/// The root rule must consume the entire sequence; trailing tokens are a
/// parse error, as is any failure to match, reported with the rule and
/// token index the matcher got furthest with.
pub fn parse(tokens: &[Token], filename: &str) -> Result<ParseNode, SourceError> {
    let mut matcher = Matcher::new(tokens);
    match matcher.match_rule(0, RuleName::Scope) {
        Some((end, node)) if end == tokens.len() => Ok(node),
        Some((end, _)) => Err(SourceError::parse(
            filename,
            matcher.line_at(end),
            format!("trailing tokens after the outermost scope, at token index {}", end),
        )),
        None => Err(SourceError::parse(
            filename,
            matcher.line_at(matcher.furthest),
            format!(
                "no production for rule {:?} matched at token index {}",
                matcher.furthest_rule, matcher.furthest
            ),
        )),
    }
}

struct Matcher<'a> {
    tokens: &'a [Token],
    /// `(rule, index)` pairs currently being matched, outermost first.
    active: Vec<(RuleName, usize)>,
    /// High-water mark of terminal-match failures, for error reporting.
    furthest: usize,
    furthest_rule: RuleName,
}

impl<'a> Matcher<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Matcher {
            tokens,
            active: Vec::new(),
            furthest: 0,
            furthest_rule: RuleName::Scope,
        }
    }

    /// Line of the token at `index`, for error reporting. `index` may sit
    /// one past the end when the input ran out.
    fn line_at(&self, index: usize) -> u32 {
        match self.tokens.get(index) {
            Some(tok) => tok.line,
            None => self.tokens.last().map_or(1, |tok| tok.line),
        }
    }

    /// Try each alternative of `rule` in declaration order at `index`;
    /// return the end index and node of the first that matches.
    ///
    /// Re-entering a rule at an index it is already being matched at is
    /// refused: such a derivation can never consume more than the attempt
    /// already underway, and `Lookup`'s final alternative recurses back
    /// into `Rhs` at the same index whenever its earlier alternatives
    /// have failed. The refusal turns that cycle into an ordinary match
    /// failure.
    fn match_rule(&mut self, index: usize, rule: RuleName) -> Option<(usize, ParseNode)> {
        if self.active.contains(&(rule, index)) {
            return None;
        }
        self.active.push((rule, index));
        let mut matched = None;
        for production in alternatives(rule) {
            if let Some((end, children)) = self.match_production(index, rule, production) {
                matched = Some((end, ParseNode { rule, children }));
                break;
            }
        }
        self.active.pop();
        matched
    }

    /// Match every symbol of one production in sequence. A single failure
    /// abandons the production; no partial result is kept.
    fn match_production(
        &mut self,
        index: usize,
        rule: RuleName,
        production: &[Symbol],
    ) -> Option<(usize, Vec<ParseChild>)> {
        let mut pos = index;
        let mut children = Vec::with_capacity(production.len());
        for symbol in production {
            match symbol {
                Symbol::Tok(kind) => match self.tokens.get(pos) {
                    Some(tok) if tok.kind == *kind => {
                        children.push(ParseChild::Leaf(tok.clone()));
                        pos += 1;
                    }
                    _ => {
                        self.note_failure(pos, rule);
                        return None;
                    }
                },
                Symbol::Rule(sub) => {
                    let (end, node) = self.match_rule(pos, *sub)?;
                    children.push(ParseChild::Node(node));
                    pos = end;
                }
            }
        }
        Some((pos, children))
    }

    fn note_failure(&mut self, pos: usize, rule: RuleName) {
        if pos >= self.furthest {
            self.furthest = pos;
            self.furthest_rule = rule;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Stage;
    use crate::lexer::{lex, TokenKind};

    fn parse_src(src: &str) -> Result<ParseNode, SourceError> {
        let tokens = lex(src, "test.rill").expect("lex should succeed");
        parse(&tokens, "test.rill")
    }

    #[test]
    fn minimal_program_round_trip() {
        let root = parse_src("{ :root\n x = 5\n }").expect("parse");
        assert_eq!(root.rule, RuleName::Scope);
        let scope_name = root.leaf(1).expect("scope name leaf");
        assert_eq!(scope_name.kind, TokenKind::ScopeName);
        assert_eq!(scope_name.text, ":root\n");

        let exprlist = root.node(2).expect("expr list");
        assert_eq!(exprlist.rule, RuleName::ExprList);
        let expr = exprlist.node(0).expect("expr");
        assert_eq!(expr.rule, RuleName::Expr);
        let set = expr.node(0).expect("set");
        assert_eq!(set.rule, RuleName::Set);
        assert_eq!(set.leaf(0).expect("name").text, "x");
        assert_eq!(set.leaf(2).expect("number").text, "5");
        assert_eq!(
            set.leaf(2).expect("number").text.parse::<f64>().expect("f64"),
            5.0
        );
    }

    #[test]
    fn statement_list_nests_to_the_right() {
        let root = parse_src("{ :root\n x = 5\n y += 2\n }").expect("parse");
        let exprlist = root.node(2).expect("expr list");
        assert_eq!(exprlist.children.len(), 2);
        let rest = exprlist.node(1).expect("nested expr list");
        assert_eq!(rest.rule, RuleName::ExprList);
        assert_eq!(rest.children.len(), 1);
        let increment = rest.node(0).and_then(|e| e.node(0)).expect("increment");
        assert_eq!(increment.rule, RuleName::Increment);
    }

    #[test]
    fn nested_scope_parses_as_statement() {
        let root = parse_src("{ :outer\n b = 100\n { :inner\n a v= b\n }\n }").expect("parse");
        let exprlist = root.node(2).expect("expr list");
        let inner = exprlist
            .node(1)
            .and_then(|rest| rest.node(0))
            .and_then(|expr| expr.node(0))
            .expect("inner scope");
        assert_eq!(inner.rule, RuleName::Scope);
        assert_eq!(inner.leaf(1).expect("name").text, ":inner\n");
        let import = inner
            .node(2)
            .and_then(|el| el.node(0))
            .and_then(|e| e.node(0))
            .expect("import");
        assert_eq!(import.rule, RuleName::Import);
    }

    #[test]
    fn binary_rhs_alternative_wins_over_single_operand() {
        let root = parse_src("{ :root\n a ^= b + c\n }").expect("parse");
        let export = root
            .node(2)
            .and_then(|el| el.node(0))
            .and_then(|e| e.node(0))
            .expect("export");
        assert_eq!(export.rule, RuleName::Export);
        let rhs = export.node(2).expect("rhs");
        assert_eq!(rhs.rule, RuleName::Rhs);
        assert_eq!(rhs.children.len(), 3);
        assert_eq!(rhs.leaf(1).expect("op").text, "+");
    }

    #[test]
    fn chained_operators_require_groups() {
        // No precedence, no associativity: the binary alternative only
        // holds one operator slot, so an unparenthesized chain fails.
        assert!(parse_src("{ :root\n a ^= b + c + d\n }").is_err());
        let root = parse_src("{ :root\n a ^= (b + c) + d\n }").expect("parse");
        let rhs = root
            .node(2)
            .and_then(|el| el.node(0))
            .and_then(|e| e.node(0))
            .and_then(|ex| ex.node(2))
            .expect("rhs");
        assert_eq!(rhs.children.len(), 3);
        let group = rhs
            .node(0)
            .and_then(|lookup| lookup.node(0))
            .expect("group operand");
        assert_eq!(group.rule, RuleName::Group);
    }

    #[test]
    fn incomplete_scope_is_a_parse_error() {
        let err = parse_src("{ :root\n x = 5\n").expect_err("should fail");
        assert_eq!(err.stage, Stage::Parse);
        assert!(err.message.contains("token index"), "message: {}", err.message);
    }

    #[test]
    fn trailing_tokens_are_a_parse_error() {
        let err = parse_src("{ :root\n x = 5\n } y").expect_err("should fail");
        assert_eq!(err.stage, Stage::Parse);
        assert!(err.message.contains("trailing"), "message: {}", err.message);
    }

    #[test]
    fn malformed_transfer_expression_fails_instead_of_recursing() {
        // Rhs -> Lookup -> Rhs at a token none of Lookup's leaf
        // alternatives accept; the active-pair refusal must surface an
        // ordinary parse error.
        let err = parse_src("{ :root\n x ^= }\n }").expect_err("should fail");
        assert_eq!(err.stage, Stage::Parse);
    }

    #[test]
    fn empty_input_is_a_parse_error() {
        let err = parse(&[], "test.rill").expect_err("should fail");
        assert_eq!(err.stage, Stage::Parse);
        assert!(err.message.contains("Scope"), "message: {}", err.message);
    }

    #[test]
    fn render_lists_rules_indented() {
        let root = parse_src("{ :root\n x = 5\n }").expect("parse");
        let rendered = root.render();
        assert!(rendered.starts_with("Scope\n"));
        assert!(rendered.contains("\n      Set\n"), "rendered:\n{}", rendered);
    }
}
