use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Per-slot memo: recomputes only when the hash of the inputs changes, and
/// otherwise hands back the same `Arc`.
#[derive(Debug)]
pub struct MemoCache<K, V> {
    inner: RwLock<HashMap<K, MemoEntry<V>>>,
}

#[derive(Debug)]
struct MemoEntry<V> {
    input_hash: u64,
    value: Arc<V>,
}

pub fn input_hash<T: Hash + ?Sized>(input: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    input.hash(&mut hasher);
    hasher.finish()
}

impl<K: Eq + Hash + Clone, V> MemoCache<K, V> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }

    pub async fn get_or_compute<F>(&self, key: &K, input_hash: u64, compute: F) -> Arc<V>
    where
        F: FnOnce() -> V,
    {
        {
            let lock = self.inner.read().await;
            if let Some(entry) = lock.get(key) {
                if entry.input_hash == input_hash {
                    return entry.value.clone();
                }
            }
        }

        let value = Arc::new(compute());
        let mut lock = self.inner.write().await;
        lock.insert(
            key.clone(),
            MemoEntry {
                input_hash,
                value: value.clone(),
            },
        );
        value
    }

    pub async fn delete(&self, key: &K) {
        let mut lock = self.inner.write().await;
        lock.remove(key);
    }
}

impl<K: Eq + Hash + Clone, V> Default for MemoCache<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
