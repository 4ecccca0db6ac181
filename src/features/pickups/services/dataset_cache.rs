use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Memo of previously computed results keyed by request parameters.
///
/// Entries stay until the caller drops them with [`LoadCache::invalidate`] or
/// [`LoadCache::clear`]; nothing expires on its own.
pub struct LoadCache<K, V> {
    entries: RwLock<HashMap<K, Arc<V>>>,
}

impl<K, V> LoadCache<K, V>
where
    K: Eq + Hash + Copy,
{
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub async fn get(&self, key: K) -> Option<Arc<V>> {
        self.entries.read().await.get(&key).cloned()
    }

    /// Return the cached value for `key`, running `load` on a miss.
    ///
    /// Two concurrent misses may both load; the first stored value wins and
    /// both callers receive it.
    pub async fn get_or_load<F, Fut, E>(&self, key: K, load: F) -> Result<Arc<V>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(hit) = self.get(key).await {
            return Ok(hit);
        }

        let loaded = Arc::new(load().await?);

        let mut entries = self.entries.write().await;
        Ok(Arc::clone(entries.entry(key).or_insert(loaded)))
    }

    /// Drop one entry. Returns whether it was present.
    pub async fn invalidate(&self, key: K) -> bool {
        self.entries.write().await.remove(&key).is_some()
    }

    /// Drop every entry. Returns how many were removed.
    pub async fn clear(&self) -> usize {
        let mut entries = self.entries.write().await;
        let count = entries.len();
        entries.clear();
        count
    }
}

impl<K, V> Default for LoadCache<K, V>
where
    K: Eq + Hash + Copy,
{
    fn default() -> Self {
        Self::new()
    }
}
