use crate::domain::error::Result;
use crate::domain::model::{MenuRecord, RestaurantRecord};
use async_trait::async_trait;

/// Read access to restaurant and menu records
///
/// Implementations are shared across tasks, so they must be `Send + Sync`.
/// `find_all_restaurants` returns records in storage order; search results
/// keep that order.
#[async_trait]
pub trait RestaurantRepository: Send + Sync {
    async fn find_all_restaurants(&self) -> Result<Vec<RestaurantRecord>>;

    /// Case-sensitive exact match on the restaurant name
    async fn find_restaurants_by_exact_name(&self, name: &str) -> Result<Vec<RestaurantRecord>>;

    async fn find_menu_by_restaurant_id(&self, restaurant_id: &str) -> Result<Option<MenuRecord>>;
}

/// Raw key-value store behind the search cache
///
/// Payloads are opaque strings; expiry is the store's responsibility.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Whether the store is configured on. A store that reports `false` is
    /// never read or written.
    fn is_available(&self) -> bool;

    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// A ttl too large to represent never expires.
    async fn set_with_expiry(&self, key: &str, value: String, ttl_seconds: u64) -> Result<()>;

    /// Number of entries that have not yet expired
    async fn entry_count(&self) -> Result<usize>;
}
