//! In-memory, sharded context store.

use std::hash::BuildHasher;

use ahash::{AHashMap, RandomState};
use parking_lot::RwLock;

use crate::session::context::ClarificationContext;
use crate::session::store::ContextStore;

type Shard = RwLock<AHashMap<String, ClarificationContext>>;

/// A process-local [`ContextStore`].
///
/// Keys are spread over independently locked shards, so conversations that
/// land in different shards never contend. All operations on one key serialize
/// on its shard lock, and no lock is held beyond a single map operation.
#[derive(Debug)]
pub struct MemoryContextStore {
    shards: Box<[Shard]>,
    hash_builder: RandomState,
}

impl MemoryContextStore {
    /// Create a store with `shard_count` shards (at least one).
    pub fn new(shard_count: usize) -> Self {
        let shards = (0..shard_count.max(1))
            .map(|_| RwLock::new(AHashMap::new()))
            .collect::<Vec<_>>()
            .into_boxed_slice();

        Self {
            shards,
            hash_builder: RandomState::new(),
        }
    }

    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    fn shard(&self, key: &str) -> &Shard {
        let hash = BuildHasher::hash_one(&self.hash_builder, key);
        &self.shards[(hash % self.shards.len() as u64) as usize]
    }
}

impl Default for MemoryContextStore {
    fn default() -> Self {
        Self::new(16)
    }
}

impl ContextStore for MemoryContextStore {
    fn put(&self, key: &str, context: ClarificationContext) {
        self.shard(key).write().insert(key.to_string(), context);
    }

    fn get(&self, key: &str) -> Option<ClarificationContext> {
        self.shard(key).read().get(key).cloned()
    }

    fn take(&self, key: &str) -> Option<ClarificationContext> {
        self.shard(key).write().remove(key)
    }

    fn take_if(
        &self,
        key: &str,
        predicate: &dyn Fn(&ClarificationContext) -> bool,
    ) -> Option<ClarificationContext> {
        let mut shard = self.shard(key).write();
        if shard.get(key).is_some_and(predicate) {
            shard.remove(key)
        } else {
            None
        }
    }

    fn delete(&self, key: &str) -> bool {
        self.shard(key).write().remove(key).is_some()
    }

    fn evict_where(&self, predicate: &dyn Fn(&ClarificationContext) -> bool) -> usize {
        // One shard at a time so foreground calls on other shards proceed.
        self.shards
            .iter()
            .map(|shard| {
                let mut guard = shard.write();
                let before = guard.len();
                guard.retain(|_, ctx| !predicate(ctx));
                before - guard.len()
            })
            .sum()
    }

    fn len(&self) -> usize {
        self.shards.iter().map(|shard| shard.read().len()).sum()
    }
}
