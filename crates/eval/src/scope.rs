//! The scope addressing structure for the tree walk.

/// The nesting path of the walk, innermost scope last.
///
/// Seeded with two sentinels so the outermost scope always has a parent
/// slot to address; there is no scope above the outermost one, and the
/// store drops writes aimed at a sentinel. Pushing happens on entering a
/// scope node and popping symmetrically on leaving it, so the stack
/// mirrors the active nesting path at every point of the walk.
#[derive(Debug, Clone)]
pub struct ScopeStack {
    stack: Vec<Option<String>>,
}

impl ScopeStack {
    pub fn new() -> Self {
        ScopeStack {
            stack: vec![None, None],
        }
    }

    pub fn push(&mut self, scope: &str) {
        self.stack.push(Some(scope.to_owned()));
    }

    pub fn pop(&mut self) {
        self.stack.pop();
    }

    /// Innermost scope of the walk; `None` above the root.
    pub fn current(&self) -> Option<&str> {
        self.stack.last().and_then(|s| s.as_deref())
    }

    /// Immediate parent of the current scope; `None` at the sentinel.
    pub fn parent(&self) -> Option<&str> {
        self.stack
            .len()
            .checked_sub(2)
            .and_then(|i| self.stack.get(i))
            .and_then(|s| s.as_deref())
    }

    /// A copy of the stack standing one level up, with the current scope
    /// discarded. Used only to evaluate an import's right-hand side as if
    /// from the parent; the real walk's position is untouched.
    pub fn shifted_to_parent(&self) -> ScopeStack {
        let mut shifted = self.clone();
        shifted.stack.pop();
        shifted
    }
}

impl Default for ScopeStack {
    fn default() -> Self {
        ScopeStack::new()
    }
}
