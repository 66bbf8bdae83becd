//! The live variable store and its per-step frozen snapshot.
//!
//! Key invariant: during a stepped pass, every expression read resolves
//! against the [`Snapshot`] taken before the pass began and every write
//! goes to the live [`Store`]. The snapshot type exposes reads only, so
//! a write through it does not typecheck.

use std::collections::BTreeMap;

use serde::Serialize;

/// The authoritative variable store: scope name to variable name to
/// value. Scope keys are the literal scope-name token payload (leading
/// `:` and trailing newline included). Reading an unset key yields 0.0;
/// that is the language's defaulting rule, not a fault.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Store {
    scopes: BTreeMap<String, BTreeMap<String, f64>>,
}

impl Store {
    pub fn new() -> Self {
        Store::default()
    }

    /// Value at `(scope, name)`. The sentinel above the root backs no
    /// variables, so it always reads 0.0.
    pub fn get(&self, scope: Option<&str>, name: &str) -> f64 {
        let Some(scope) = scope else { return 0.0 };
        self.scopes
            .get(scope)
            .and_then(|vars| vars.get(name))
            .copied()
            .unwrap_or(0.0)
    }

    /// Overwrite `(scope, name)`. Writes aimed at the sentinel are
    /// permitted but observationally inert.
    pub fn set(&mut self, scope: Option<&str>, name: &str, value: f64) {
        if let Some(scope) = scope {
            self.scopes
                .entry(scope.to_owned())
                .or_default()
                .insert(name.to_owned(), value);
        }
    }

    /// Add `delta` to `(scope, name)`, treating an unset key as 0.0.
    /// Sentinel writes are dropped, as in `set`.
    pub fn add(&mut self, scope: Option<&str>, name: &str, delta: f64) {
        if let Some(scope) = scope {
            *self
                .scopes
                .entry(scope.to_owned())
                .or_default()
                .entry(name.to_owned())
                .or_insert(0.0) += delta;
        }
    }

    /// Value-copy of the whole store, frozen for one step's reads.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot(self.clone())
    }

    /// Every `(scope, variable, value)` in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, f64)> {
        self.scopes.iter().flat_map(|(scope, vars)| {
            vars.iter()
                .map(move |(name, value)| (scope.as_str(), name.as_str(), *value))
        })
    }
}

/// Read-only copy of the store as of the start of a step.
///
/// Created by [`Store::snapshot`] at the start of every pass and
/// discarded at its end; never mutated in place, never reused across
/// steps.
#[derive(Debug)]
pub struct Snapshot(Store);

impl Snapshot {
    pub fn get(&self, scope: Option<&str>, name: &str) -> f64 {
        self.0.get(scope, name)
    }
}
