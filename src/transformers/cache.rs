//! Bounded memoization of transforms.
use std::{
    num::NonZeroUsize,
    sync::{Mutex, PoisonError},
};

use log::debug;
use lru::LruCache;

use super::Transform;

/// Inputs larger than this are transformed without being cached.
pub const MAX_ENTRY_SIZE: usize = 16 * 1024;

/// Caches results of a [Transform] in a least-recently-used cache of fixed capacity.
///
/// The lock is only held while looking up or inserting, never while transforming.
pub struct Memoized<T> {
    inner: T,
    cache: Mutex<LruCache<String, String>>,
}

impl<T: Transform> Memoized<T> {
    /// Wrap `inner` with a cache holding at most `capacity` entries (at least one).
    pub fn new(inner: T, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        debug!("memoizing transform with {} entries", capacity);
        Self {
            inner,
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get a reference to the wrapped transform.
    pub fn inner(&self) -> &T {
        &self.inner
    }
}

impl<T: Transform> Transform for Memoized<T> {
    fn transform_own(&self, text: String) -> String {
        if text.len() > MAX_ENTRY_SIZE {
            return self.inner.transform_own(text);
        }

        if let Some(cached) = self
            .cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&text)
        {
            return cached.clone();
        }

        let transformed = self.inner.transform_own(text.clone());
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .put(text, transformed.clone());
        transformed
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::{Memoized, MAX_ENTRY_SIZE};
    use crate::transformers::Transform;

    #[derive(Default)]
    struct Upper {
        calls: AtomicUsize,
    }

    impl Transform for Upper {
        fn transform_own(&self, text: String) -> String {
            self.calls.fetch_add(1, Ordering::SeqCst);
            text.to_uppercase()
        }
    }

    #[test]
    fn hits() {
        let m = Memoized::new(Upper::default(), 4);
        assert_eq!(m.transform_own("abc".to_string()), "ABC");
        assert_eq!(m.transform_own("abc".to_string()), "ABC");
        assert_eq!(m.inner().calls.load(Ordering::SeqCst), 1);
        assert_eq!(m.len(), 1);
    }

    #[test]
    fn bounded() {
        let m = Memoized::new(Upper::default(), 2);
        for text in ["a", "b", "c", "d"] {
            m.transform_own(text.to_string());
        }
        assert_eq!(m.len(), 2);

        // "a" was evicted
        m.transform_own("a".to_string());
        assert_eq!(m.inner().calls.load(Ordering::SeqCst), 5);
    }

    #[test]
    fn zero_capacity() {
        let m = Memoized::new(Upper::default(), 0);
        m.transform_own("a".to_string());
        assert_eq!(m.len(), 1);
    }

    #[test]
    fn large_inputs_bypass() {
        let m = Memoized::new(Upper::default(), 2);
        let large = "a".repeat(MAX_ENTRY_SIZE + 1);
        m.transform_own(large.clone());
        m.transform_own(large);
        assert!(m.is_empty());
        assert_eq!(m.inner().calls.load(Ordering::SeqCst), 2);
    }
}
