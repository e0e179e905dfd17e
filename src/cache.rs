//! Local entity cache
//!
//! Entities are stored behind `Arc` so lookups hand out cheap shared
//! snapshots. A put replaces the whole slot; the last completed put for a
//! key wins. Updates that derive the new entry from the current one go
//! through [`CacheStore::upsert`] or [`CacheStore::alter`], which hold the
//! slot for the whole read-modify-write.

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serenity::model::id::{ChannelId, GuildId, MessageId, StageInstanceId};
use std::hash::Hash;
use std::sync::Arc;

use crate::entity::{Channel, Message, StageInstance};
use crate::model::Guild;

/// Key to entity storage
pub trait CacheStore<K, V>: Send + Sync {
    fn get(&self, key: &K) -> Option<Arc<V>>;

    /// Insert or replace the entry for `key`, returning the stored handle
    fn put(&self, key: K, value: V) -> Arc<V>;

    /// Store `f` applied to the current entry for `key`, if any
    ///
    /// `f` runs with the slot locked and must not touch this store.
    fn upsert(&self, key: K, f: &dyn Fn(Option<&V>) -> V) -> Arc<V>;

    /// Replace an existing entry with `f` of it; `None` keeps the entry
    ///
    /// Returns the entry as stored afterwards, or `None` when `key` is absent.
    /// `f` runs with the slot locked and must not touch this store.
    fn alter(&self, key: &K, f: &dyn Fn(&V) -> Option<V>) -> Option<Arc<V>>;

    fn remove(&self, key: &K) -> Option<Arc<V>>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn clear(&self);
}

/// Unbounded concurrent map with no eviction
pub struct MapCache<K, V> {
    entries: DashMap<K, Arc<V>>,
}

impl<K: Eq + Hash, V> MapCache<K, V> {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }
}

impl<K: Eq + Hash, V> Default for MapCache<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> CacheStore<K, V> for MapCache<K, V>
where
    K: Eq + Hash + Send + Sync,
    V: Send + Sync,
{
    fn get(&self, key: &K) -> Option<Arc<V>> {
        self.entries.get(key).map(|entry| Arc::clone(entry.value()))
    }

    fn put(&self, key: K, value: V) -> Arc<V> {
        let value = Arc::new(value);
        self.entries.insert(key, Arc::clone(&value));
        value
    }

    fn upsert(&self, key: K, f: &dyn Fn(Option<&V>) -> V) -> Arc<V> {
        match self.entries.entry(key) {
            Entry::Occupied(mut entry) => {
                let value = Arc::new(f(Some(entry.get().as_ref())));
                entry.insert(Arc::clone(&value));
                value
            }
            Entry::Vacant(entry) => {
                let value = Arc::new(f(None));
                entry.insert(Arc::clone(&value));
                value
            }
        }
    }

    fn alter(&self, key: &K, f: &dyn Fn(&V) -> Option<V>) -> Option<Arc<V>> {
        let mut entry = self.entries.get_mut(key)?;
        if let Some(value) = f(entry.value().as_ref()) {
            *entry.value_mut() = Arc::new(value);
        }
        Some(Arc::clone(entry.value()))
    }

    fn remove(&self, key: &K) -> Option<Arc<V>> {
        self.entries.remove(key).map(|(_, value)| value)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn clear(&self) {
        self.entries.clear();
    }
}

/// Whether a constructed entity is registered in the cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheStrategy {
    Yes,
    No,
    /// Cache only when no gateway session keeps the cache fresh
    #[default]
    NoWs,
}

impl CacheStrategy {
    pub fn should_cache(self, gateway_connected: bool) -> bool {
        match self {
            CacheStrategy::Yes => true,
            CacheStrategy::No => false,
            CacheStrategy::NoWs => !gateway_connected,
        }
    }
}

/// Per-resource caches shared by one client context
pub struct Caches {
    pub guilds: Box<dyn CacheStore<GuildId, Guild>>,
    pub channels: Box<dyn CacheStore<ChannelId, Channel>>,
    pub messages: Box<dyn CacheStore<MessageId, Message>>,
    pub stage_instances: Box<dyn CacheStore<StageInstanceId, StageInstance>>,
}

impl Caches {
    /// Drop every cached entity
    pub fn clear(&self) {
        self.guilds.clear();
        self.channels.clear();
        self.messages.clear();
        self.stage_instances.clear();
    }
}

impl Default for Caches {
    fn default() -> Self {
        Self {
            guilds: Box::new(MapCache::new()),
            channels: Box::new(MapCache::new()),
            messages: Box::new(MapCache::new()),
            stage_instances: Box::new(MapCache::new()),
        }
    }
}
