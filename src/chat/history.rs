use std::collections::HashMap;

use tokio::sync::{RwLock, RwLockReadGuard};

use super::message::Message;

/// Identifies one independent conversation thread. The command surface maps
/// a guild invocation to its channel id and everything else to the user id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContextId(pub u64);

impl From<u64> for ContextId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ContextId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Messages kept per context after a completed turn: the leading system
/// message plus the 9 most recent others.
pub const HISTORY_CAP: usize = 10;

/// All conversation histories, one inner lock per context so turns on the
/// same context serialize while distinct contexts stay independent.
#[derive(Default)]
pub struct HistoryStore {
    contexts: RwLock<HashMap<ContextId, RwLock<Vec<Message>>>>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self {
            contexts: RwLock::new(HashMap::new()),
        }
    }

    /// Hands out the guard for a context, creating it on first use.
    pub async fn context(&self, id: ContextId) -> ContextGuard<'_> {
        {
            let contexts = self.contexts.read().await;
            if contexts.contains_key(&id) {
                return ContextGuard { map: contexts, id };
            }
        }

        let mut contexts = self.contexts.write().await;
        contexts.entry(id).or_default();

        // downgrading keeps the entry pinned, reset() needs the write lock
        ContextGuard {
            map: contexts.downgrade(),
            id,
        }
    }

    /// Drops a context's history entirely. Idempotent; returns how many
    /// messages were discarded.
    pub async fn reset(&self, id: ContextId) -> usize {
        let mut contexts = self.contexts.write().await;

        match contexts.remove(&id) {
            Some(messages) => messages.into_inner().len(),
            None => 0,
        }
    }
}

/// Keeps the outer map borrowed for as long as the per-context lock is in
/// someone's hands.
pub struct ContextGuard<'a> {
    map: RwLockReadGuard<'a, HashMap<ContextId, RwLock<Vec<Message>>>>,
    id: ContextId,
}

impl ContextGuard<'_> {
    pub fn lock(&self) -> &RwLock<Vec<Message>> {
        // the entry is inserted before the guard is constructed and cannot
        // be removed while the outer read lock is held
        self.map
            .get(&self.id)
            .expect("context entry outlives its guard")
    }
}

/// Applies the retention cap in place: keep the first message and the 9
/// most recent others, discard everything in between wholesale.
pub fn apply_cap(messages: &mut Vec<Message>) {
    if messages.len() > HISTORY_CAP {
        let keep_from = messages.len() - (HISTORY_CAP - 1);
        messages.drain(1..keep_from);
    }
}
