//! Bounded, insertion-ordered descriptor cache.
//!
//! The cache is the only state shared across concurrent requests. It maps a
//! canonical request path to its resolved [`ImageDescriptor`] and evicts in
//! strict insertion order: the oldest-inserted entry goes first, regardless
//! of how often it has been looked up since.
//!
//! Lookups use `LruCache::peek`, which does not promote recency; only
//! inserts establish order. With that discipline the LRU list degenerates to
//! a FIFO over insertions, which is exactly the required eviction policy.

use lru::LruCache;
use tokio::sync::RwLock;

use super::descriptor::ImageDescriptor;

/// Default maximum number of cached descriptors.
pub const DEFAULT_DESCRIPTOR_CACHE_CAPACITY: usize = 500;

/// Insertion-ordered bounded map from canonical path to descriptor.
///
/// Shared across all requests for the process lifetime via `Arc`; all
/// methods serialize internally. Descriptors are handed out by clone so a
/// request's copy is unaffected by later evictions.
pub struct DescriptorCache {
    inner: RwLock<LruCache<String, ImageDescriptor>>,
}

impl DescriptorCache {
    /// Create a cache with the default capacity (500 descriptors).
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_DESCRIPTOR_CACHE_CAPACITY)
    }

    /// Create a cache with a custom capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero; callers validate configuration first.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: RwLock::new(LruCache::new(
                std::num::NonZeroUsize::new(capacity).expect("cache capacity must be non-zero"),
            )),
        }
    }

    /// Look up a descriptor by canonical path.
    ///
    /// Never mutates eviction order.
    pub async fn lookup(&self, path: &str) -> Option<ImageDescriptor> {
        let cache = self.inner.read().await;
        cache.peek(path).cloned()
    }

    /// Whether the cache holds no descriptors.
    pub async fn is_empty(&self) -> bool {
        let cache = self.inner.read().await;
        cache.is_empty()
    }

    /// Number of cached descriptors.
    pub async fn len(&self) -> usize {
        let cache = self.inner.read().await;
        cache.len()
    }

    /// Maximum number of descriptors.
    pub async fn capacity(&self) -> usize {
        let cache = self.inner.read().await;
        cache.cap().get()
    }

    /// Insert a resolved descriptor, keyed by its canonical path.
    ///
    /// When the cache is full, exactly one entry — the oldest-inserted — is
    /// evicted first. The new entry becomes the newest.
    pub async fn insert(&self, descriptor: ImageDescriptor) {
        let mut cache = self.inner.write().await;
        cache.put(descriptor.path.clone(), descriptor);
    }
}

impl Default for DescriptorCache {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================
