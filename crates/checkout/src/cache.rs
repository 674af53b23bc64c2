//! Read-through product cache.
//!
//! Every add-to-cart re-reads the product for fresh pricing and stock, and
//! popular products get re-read far more often than the catalog changes.
//! [`CachedCatalog`] wraps any [`ProductCatalog`] with an in-memory `moka`
//! cache (capacity 1000, 5-minute TTL). Errors are never cached.

use std::time::Duration;

use async_trait::async_trait;
use kade_core::{Product, ProductId};
use moka::future::Cache;
use tracing::debug;

use crate::gateway::{GatewayError, ProductCatalog};

/// Maximum number of products held in memory.
const CACHE_CAPACITY: u64 = 1000;

/// How long a cached product stays fresh.
const CACHE_TTL: Duration = Duration::from_secs(300); // 5 minutes

/// Read-through cache over a [`ProductCatalog`].
pub struct CachedCatalog<C> {
    upstream: C,
    cache: Cache<ProductId, Product>,
}

impl<C: ProductCatalog> CachedCatalog<C> {
    /// Wrap a catalog with the default cache policy.
    #[must_use]
    pub fn new(upstream: C) -> Self {
        Self {
            upstream,
            cache: Cache::builder()
                .max_capacity(CACHE_CAPACITY)
                .time_to_live(CACHE_TTL)
                .build(),
        }
    }

    /// Drop a cached product (after an admin price or stock edit).
    pub async fn invalidate(&self, id: ProductId) {
        self.cache.invalidate(&id).await;
    }

    /// Drop everything cached.
    pub async fn invalidate_all(&self) {
        self.cache.invalidate_all();
        self.cache.run_pending_tasks().await;
    }
}

#[async_trait]
impl<C: ProductCatalog> ProductCatalog for CachedCatalog<C> {
    async fn product(&self, id: ProductId) -> Result<Product, GatewayError> {
        if let Some(product) = self.cache.get(&id).await {
            debug!(product = %id, "Cache hit for product");
            return Ok(product);
        }

        let product = self.upstream.product(id).await?;
        self.cache.insert(id, product.clone()).await;
        Ok(product)
    }
}
