//! Key-value abstraction over clarification contexts.

use crate::session::context::ClarificationContext;

/// A key-value store of clarification contexts, keyed by conversation id.
///
/// Expiry is not the store's concern: [`ClarificationSessions`](super::ClarificationSessions)
/// applies its [`ExpiryPolicy`](super::ExpiryPolicy) on top of these primitives, so an
/// in-process map and an external cache can back the same dialogue logic.
///
/// Every method must be atomic with respect to a single key.
pub trait ContextStore: Send + Sync + std::fmt::Debug {
    /// Insert or overwrite the context for `key`.
    fn put(&self, key: &str, context: ClarificationContext);

    /// Copy of the context for `key`, without removing it.
    fn get(&self, key: &str) -> Option<ClarificationContext>;

    /// Remove and return the context for `key`.
    fn take(&self, key: &str) -> Option<ClarificationContext>;

    /// Remove and return the context for `key` only if `predicate` holds for it.
    fn take_if(
        &self,
        key: &str,
        predicate: &dyn Fn(&ClarificationContext) -> bool,
    ) -> Option<ClarificationContext>;

    /// Remove the context for `key`. Returns whether one was present.
    fn delete(&self, key: &str) -> bool;

    /// Remove every context matching `predicate`. Returns the number removed.
    fn evict_where(&self, predicate: &dyn Fn(&ClarificationContext) -> bool) -> usize;

    /// Number of stored contexts, expired or not.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
