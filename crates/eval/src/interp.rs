//! Tree walks for the initial pass and the stepped pass.
//!
//! Both passes are the same structural walk over the parse tree; they
//! differ only in which statement kinds act. The stepped pass freezes a
//! [`Snapshot`] of the live store first and resolves every read against
//! it, so the relative order of sibling statements within a scope cannot
//! change a step's result, and every transfer adds to one scope exactly
//! what it subtracts from the other.

use rill_core::{ParseChild, ParseNode, RuleName, Token, TokenKind};

use crate::error::EvalError;
use crate::scope::ScopeStack;
use crate::store::{Snapshot, Store};

/// Which statement kinds a walk acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pass {
    /// Establishes starting values: `Set` acts, everything else is a
    /// deliberate no-op.
    Initial,
    /// One time tick: every statement kind acts.
    Stepped,
}

/// Run the program once to establish starting values. Called exactly
/// once, before any stepped pass, and never again.
pub fn run_initial(tree: &ParseNode, live: &mut Store) -> Result<(), EvalError> {
    let snapshot = live.snapshot();
    let mut scopes = ScopeStack::new();
    walk(tree, &mut scopes, live, &snapshot, Pass::Initial)
}

/// Advance the simulation by one tick: freeze a snapshot of the live
/// store, apply every statement in tree order against it, and leave the
/// live store holding the post-step state.
pub fn run_step(tree: &ParseNode, live: &mut Store) -> Result<(), EvalError> {
    let snapshot = live.snapshot();
    let mut scopes = ScopeStack::new();
    walk(tree, &mut scopes, live, &snapshot, Pass::Stepped)
}

fn walk(
    node: &ParseNode,
    scopes: &mut ScopeStack,
    live: &mut Store,
    snapshot: &Snapshot,
    pass: Pass,
) -> Result<(), EvalError> {
    match node.rule {
        RuleName::Scope => {
            let name = leaf_text(node, 1)?;
            scopes.push(name);
            let result = walk(child_node(node, 2)?, scopes, live, snapshot, pass);
            scopes.pop();
            result
        }
        RuleName::ExprList => {
            walk(child_node(node, 0)?, scopes, live, snapshot, pass)?;
            if let Some(rest) = node.node(1) {
                walk(rest, scopes, live, snapshot, pass)?;
            }
            Ok(())
        }
        RuleName::Expr => walk(child_node(node, 0)?, scopes, live, snapshot, pass),
        RuleName::Set => {
            // Acts in both passes; re-pinning the value every step is legal.
            let name = leaf_text(node, 0)?;
            let value = leaf_number(node, 2)?;
            live.set(scopes.current(), name, value);
            Ok(())
        }
        RuleName::Increment => {
            // A per-step constant drift: the literal is used directly,
            // never a store read.
            if pass == Pass::Stepped {
                let name = leaf_text(node, 0)?;
                let delta = leaf_number(node, 2)?;
                live.add(scopes.current(), name, delta);
            }
            Ok(())
        }
        RuleName::Export => {
            if pass == Pass::Stepped {
                let name = leaf_text(node, 0)?;
                let value = eval_rhs(child_node(node, 2)?, scopes, snapshot)?;
                live.add(scopes.parent(), name, value);
                live.add(scopes.current(), name, -value);
            }
            Ok(())
        }
        RuleName::Import => {
            if pass == Pass::Stepped {
                let name = leaf_text(node, 0)?;
                // The right-hand side resolves as if standing one level
                // up: bare names read the parent scope's snapshot values.
                let value = eval_rhs(
                    child_node(node, 2)?,
                    &scopes.shifted_to_parent(),
                    snapshot,
                )?;
                live.add(scopes.parent(), name, -value);
                live.add(scopes.current(), name, value);
            }
            Ok(())
        }
        RuleName::Rhs | RuleName::Lookup | RuleName::Group => Err(EvalError::MalformedTree {
            message: format!("{:?} node reached the statement walk", node.rule),
        }),
    }
}

/// Pure expression evaluation. Reads go to the snapshot only, resolved
/// at the scope context in effect for this evaluation (current for
/// exports, parent-shifted for imports).
fn eval_rhs(node: &ParseNode, scopes: &ScopeStack, snapshot: &Snapshot) -> Result<f64, EvalError> {
    match node.rule {
        RuleName::Rhs => match node.children.len() {
            1 => eval_rhs(child_node(node, 0)?, scopes, snapshot),
            3 => {
                let left = eval_rhs(child_node(node, 0)?, scopes, snapshot)?;
                let op = leaf(node, 1)?;
                let right = eval_rhs(child_node(node, 2)?, scopes, snapshot)?;
                apply_op(op, left, right)
            }
            n => Err(EvalError::MalformedTree {
                message: format!("Rhs node with {} children", n),
            }),
        },
        RuleName::Lookup => match node.children.first() {
            Some(ParseChild::Leaf(tok)) => match tok.kind {
                TokenKind::Name => Ok(snapshot.get(scopes.current(), &tok.text)),
                TokenKind::Number => parse_number(tok),
                other => Err(EvalError::MalformedTree {
                    message: format!("lookup of a {:?} token", other),
                }),
            },
            Some(ParseChild::Node(inner)) => eval_rhs(inner, scopes, snapshot),
            None => Err(EvalError::MalformedTree {
                message: "empty Lookup node".to_owned(),
            }),
        },
        RuleName::Group => eval_rhs(child_node(node, 1)?, scopes, snapshot),
        other => Err(EvalError::MalformedTree {
            message: format!("{:?} node inside an expression", other),
        }),
    }
}

fn apply_op(op: &Token, left: f64, right: f64) -> Result<f64, EvalError> {
    match op.text.as_str() {
        "+" => Ok(left + right),
        "-" => Ok(left - right),
        "*" => Ok(left * right),
        "/" => {
            if right == 0.0 {
                Err(EvalError::DivisionByZero { line: op.line })
            } else {
                Ok(left / right)
            }
        }
        other => Err(EvalError::MalformedTree {
            message: format!("unknown arithmetic operator '{}'", other),
        }),
    }
}

fn child_node<'a>(node: &'a ParseNode, i: usize) -> Result<&'a ParseNode, EvalError> {
    node.node(i).ok_or_else(|| EvalError::MalformedTree {
        message: format!("{:?} node missing sub-rule child {}", node.rule, i),
    })
}

fn leaf<'a>(node: &'a ParseNode, i: usize) -> Result<&'a Token, EvalError> {
    node.leaf(i).ok_or_else(|| EvalError::MalformedTree {
        message: format!("{:?} node missing token child {}", node.rule, i),
    })
}

fn leaf_text<'a>(node: &'a ParseNode, i: usize) -> Result<&'a str, EvalError> {
    Ok(leaf(node, i)?.text.as_str())
}

fn leaf_number(node: &ParseNode, i: usize) -> Result<f64, EvalError> {
    parse_number(leaf(node, i)?)
}

fn parse_number(tok: &Token) -> Result<f64, EvalError> {
    tok.text.parse::<f64>().map_err(|_| EvalError::MalformedTree {
        message: format!("invalid numeric literal '{}' on line {}", tok.text, tok.line),
    })
}
