//! rill-eval: stepped interpreter for parsed rill programs.
//!
//! The driver runs [`run_initial`] exactly once to establish starting
//! values, then [`run_step`] once per simulation tick. The [`Store`] is
//! the long-lived simulation state; each stepped pass freezes it into a
//! [`Snapshot`], resolves every read against that snapshot, and writes
//! only to the live store, so updates within a step are simultaneous
//! and transfers between a scope and its parent conserve their total.
//!
//! This crate never prints; errors carry enough context for the caller
//! to report.

pub mod error;
pub mod interp;
pub mod scope;
pub mod store;

pub use error::EvalError;
pub use interp::{run_initial, run_step};
pub use scope::ScopeStack;
pub use store::{Snapshot, Store};
