//! Node-kind classification.
//!
//! Deciding *whether* a node is a null-producing store or a dereferencing
//! load is the analysis frontend's job, not the kernel's. The kernel asks a
//! [`NodeClassifier`] oracle and treats the answer as ground truth.
//!
//! Classification is resolved at most once per node: the propagation engine
//! queries a node's kind on every incoming edge visit, so [`KindCache`]
//! memoizes answers behind an LRU cache and reports hit/miss stats.

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};

use lru::LruCache;
use parking_lot::RwLock;

use crate::types::{IcfgNodeId, NodeKind, VfgNodeId};

/// Oracle reporting what a value-flow node does.
///
/// `classify` must be stable within one run: the same node always gets the
/// same kind. For `StoreNull` the oracle has already confirmed the stored
/// value is a null constant; the kernel never re-derives that. `None` means
/// the node is unknown to the oracle, which the search treats as a
/// malformed-graph fault.
pub trait NodeClassifier {
    /// Report the kind of a node, or `None` if the node is unknown.
    fn classify(&self, node: VfgNodeId) -> Option<NodeKind>;

    /// Map a value-flow node to its interprocedural control-flow
    /// counterpart, if it has one. Presentation-only.
    fn icfg_node(&self, node: VfgNodeId) -> Option<IcfgNodeId>;
}

/// Configuration for the classification cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of entries in the cache.
    pub max_entries: usize,
    /// Whether to enable the cache.
    pub enabled: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 10_000,
            enabled: true,
        }
    }
}

/// Cache hit/miss counters.
#[derive(Debug, Clone, Copy, Default)]
pub struct CacheStats {
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Lookups that reached the underlying classifier.
    pub misses: u64,
}

/// Caching adapter around a [`NodeClassifier`].
///
/// Thread-safe; a single cache may serve a shared classifier. Lookups take
/// the write lock because the LRU updates recency on reads.
pub struct KindCache<'a, C: NodeClassifier> {
    classifier: &'a C,
    cache: Option<RwLock<LruCache<VfgNodeId, Option<NodeKind>>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<'a, C: NodeClassifier> KindCache<'a, C> {
    /// Wrap a classifier with the default cache configuration.
    pub fn new(classifier: &'a C) -> Self {
        Self::with_config(classifier, CacheConfig::default())
    }

    /// Wrap a classifier with an explicit cache configuration.
    pub fn with_config(classifier: &'a C, config: CacheConfig) -> Self {
        let cache = if config.enabled {
            let size = NonZeroUsize::new(config.max_entries)
                .unwrap_or_else(|| NonZeroUsize::new(1).expect("1 is nonzero"));
            Some(RwLock::new(LruCache::new(size)))
        } else {
            None
        };

        Self {
            classifier,
            cache,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Report the kind of a node, consulting the cache first.
    pub fn classify(&self, node: VfgNodeId) -> Option<NodeKind> {
        let Some(cache) = &self.cache else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            return self.classifier.classify(node);
        };

        let mut guard = cache.write();
        if let Some(kind) = guard.get(&node) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return *kind;
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let kind = self.classifier.classify(node);
        guard.put(node, kind);
        kind
    }

    /// Map a node to its control-flow counterpart (not cached; only the
    /// reporter asks, once per path node).
    pub fn icfg_node(&self, node: VfgNodeId) -> Option<IcfgNodeId> {
        self.classifier.icfg_node(node)
    }

    /// Current hit/miss counters.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}
