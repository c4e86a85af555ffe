//! Local cart cache: staging area for a cart that has not reached the server.
//!
//! The cache mirrors the last cart snapshot the server returned so a cart
//! survives reloads and a detour through login. It is best effort. The
//! `try_*` methods report failures; the plain methods log them and fall back
//! (nothing stored, empty snapshot) so the page keeps working without
//! persistence.

use std::sync::Arc;

use thiserror::Error;
use tracing::warn;

use crate::domain::CartSnapshot;
use crate::domain::ports::{KeyValueStore, KeyValueStoreError};

/// Storage key holding the serialised snapshot.
pub const CART_CACHE_KEY: &str = "carrinho_temp";

/// Failures reading or writing the cached cart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartCacheError {
    /// The storage backend failed.
    #[error(transparent)]
    Store(#[from] KeyValueStoreError),
    /// The stored value is not a cart snapshot.
    #[error("cached cart is not valid JSON: {0}")]
    Corrupt(String),
}

/// Best-effort cart cache over a [`KeyValueStore`].
#[derive(Clone)]
pub struct LocalCartCache {
    store: Arc<dyn KeyValueStore>,
}

impl LocalCartCache {
    /// Cache backed by `store`.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Serialise and store `snapshot`.
    ///
    /// # Errors
    ///
    /// Returns an error when serialisation or the store write fails.
    pub fn try_save(&self, snapshot: &CartSnapshot) -> Result<(), CartCacheError> {
        let raw = serde_json::to_string(snapshot)
            .map_err(|error| CartCacheError::Corrupt(error.to_string()))?;
        self.store.set(CART_CACHE_KEY, &raw)?;
        Ok(())
    }

    /// Read the stored snapshot; an absent key is an empty snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error when the store read fails or the value does not parse.
    pub fn try_load(&self) -> Result<CartSnapshot, CartCacheError> {
        match self.store.get(CART_CACHE_KEY)? {
            Some(raw) => serde_json::from_str(&raw)
                .map_err(|error| CartCacheError::Corrupt(error.to_string())),
            None => Ok(CartSnapshot::default()),
        }
    }

    /// Delete the stored snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error when the store delete fails.
    pub fn try_clear(&self) -> Result<(), CartCacheError> {
        self.store.remove(CART_CACHE_KEY)?;
        Ok(())
    }

    /// Store `snapshot`, logging and ignoring any failure.
    pub fn save(&self, snapshot: &CartSnapshot) {
        if let Err(error) = self.try_save(snapshot) {
            warn!(%error, items = snapshot.len(), "failed to cache cart");
        }
    }

    /// Read the stored snapshot, falling back to empty on any failure.
    pub fn load(&self) -> CartSnapshot {
        self.try_load().unwrap_or_else(|error| {
            warn!(%error, "failed to load cached cart");
            CartSnapshot::default()
        })
    }

    /// Delete the stored snapshot, logging and ignoring any failure.
    pub fn clear(&self) {
        if let Err(error) = self.try_clear() {
            warn!(%error, "failed to clear cached cart");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockKeyValueStore;
    use crate::domain::{CartLineItem, ItemKind};
    use crate::outbound::storage::{DisabledKeyValueStore, MemoryKeyValueStore};
    use rstest::{fixture, rstest};

    #[fixture]
    fn snapshot() -> CartSnapshot {
        CartSnapshot::new(vec![
            CartLineItem::new(ItemKind::Servico, 7, 1),
            CartLineItem::new(ItemKind::Produto, 12, 3),
        ])
    }

    fn memory_cache() -> (Arc<MemoryKeyValueStore>, LocalCartCache) {
        let store = Arc::new(MemoryKeyValueStore::default());
        let cache = LocalCartCache::new(store.clone());
        (store, cache)
    }

    #[rstest]
    fn load_returns_what_was_saved(snapshot: CartSnapshot) {
        let (_, cache) = memory_cache();
        cache.save(&snapshot);
        assert_eq!(cache.load(), snapshot);
    }

    #[rstest]
    fn saved_value_lives_under_the_well_known_key(snapshot: CartSnapshot) {
        let (store, cache) = memory_cache();
        cache.save(&snapshot);

        let raw = store
            .get(CART_CACHE_KEY)
            .expect("memory store reads")
            .expect("key present");
        assert!(raw.starts_with('['), "snapshot should be a bare array: {raw}");
    }

    #[rstest]
    fn clear_then_load_is_empty(snapshot: CartSnapshot) {
        let (_, cache) = memory_cache();
        cache.save(&snapshot);
        cache.clear();
        assert!(cache.load().is_empty());
    }

    #[test]
    fn absent_key_loads_as_empty() {
        let (_, cache) = memory_cache();
        assert_eq!(cache.try_load(), Ok(CartSnapshot::default()));
    }

    #[test]
    fn corrupt_value_is_reported_and_loads_as_empty() {
        let (store, cache) = memory_cache();
        store
            .set(CART_CACHE_KEY, "{not json")
            .expect("memory store writes");

        assert!(matches!(cache.try_load(), Err(CartCacheError::Corrupt(_))));
        assert!(cache.load().is_empty());
    }

    #[rstest]
    fn disabled_storage_never_raises(snapshot: CartSnapshot) {
        let cache = LocalCartCache::new(Arc::new(DisabledKeyValueStore));

        cache.save(&snapshot);
        cache.clear();
        assert!(cache.load().is_empty());
        assert!(matches!(
            cache.try_save(&snapshot),
            Err(CartCacheError::Store(KeyValueStoreError::Unavailable { .. }))
        ));
    }

    #[rstest]
    fn quota_failures_are_swallowed_by_save(snapshot: CartSnapshot) {
        let mut store = MockKeyValueStore::new();
        store
            .expect_set()
            .times(1)
            .returning(|key, _| Err(KeyValueStoreError::quota_exceeded(key)));
        let cache = LocalCartCache::new(Arc::new(store));

        cache.save(&snapshot);
    }
}
