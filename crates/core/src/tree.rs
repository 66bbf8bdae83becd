//! Parse tree types, shared between the parser and downstream crates.
//!
//! Nodes are built once by the parser, never mutated, and reused
//! unmodified across every evaluation pass. Each node owns its children;
//! the root is owned by the caller.

use crate::grammar::RuleName;
use crate::lexer::Token;

/// One matched element of a production: a sub-rule's node or a consumed
/// token.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseChild {
    Node(ParseNode),
    Leaf(Token),
}

/// A node of the parse tree: the rule that matched and its children in
/// production order.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseNode {
    pub rule: RuleName,
    pub children: Vec<ParseChild>,
}

impl ParseNode {
    /// The token at child position `i`, if that child is a leaf.
    pub fn leaf(&self, i: usize) -> Option<&Token> {
        match self.children.get(i) {
            Some(ParseChild::Leaf(tok)) => Some(tok),
            _ => None,
        }
    }

    /// The sub-node at child position `i`, if that child is a rule match.
    pub fn node(&self, i: usize) -> Option<&ParseNode> {
        match self.children.get(i) {
            Some(ParseChild::Node(node)) => Some(node),
            _ => None,
        }
    }

    /// Indented rendering of the tree, one rule or token kind per line.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out, 0);
        out
    }

    fn render_into(&self, out: &mut String, depth: usize) {
        out.push_str(&"  ".repeat(depth));
        out.push_str(&format!("{:?}\n", self.rule));
        for child in &self.children {
            match child {
                ParseChild::Node(node) => node.render_into(out, depth + 1),
                ParseChild::Leaf(tok) => {
                    out.push_str(&"  ".repeat(depth + 1));
                    out.push_str(&format!("{:?}\n", tok.kind));
                }
            }
        }
    }
}
