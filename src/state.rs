use crate::application::aggregator::QueryAggregator;
use crate::application::finder::RestaurantFinder;
use crate::application::search_cache::SearchCache;
use crate::domain::traits::CacheStore;
use crate::infrastructure::config::{CacheBackend, Config};
use crate::infrastructure::storage::cache::{DisabledCache, MemoryCache, SqliteCache};
use crate::infrastructure::storage::db::SqliteRepository;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio_rusqlite::Connection;

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Connection>,
    pub repository: SqliteRepository,
    pub cache_store: Arc<dyn CacheStore>,
    pub config: Arc<RwLock<Config>>,
}

impl AppState {
    pub fn new(db: Connection, config: Config) -> Self {
        let db = Arc::new(db);
        let repository = SqliteRepository::new(db.clone());
        let cache_store: Arc<dyn CacheStore> = match config.cache.backend {
            CacheBackend::Memory => Arc::new(MemoryCache::new()),
            CacheBackend::Sqlite => Arc::new(SqliteCache::new(db.clone())),
            CacheBackend::Disabled => Arc::new(DisabledCache),
        };

        Self {
            db,
            repository,
            cache_store,
            config: Arc::new(RwLock::new(config)),
        }
    }

    /// Aggregator over this state's repository; `no_cache` swaps in a disabled cache.
    pub async fn aggregator(&self, no_cache: bool) -> QueryAggregator {
        let config = self.config.read().await;
        let cache = if no_cache {
            SearchCache::disabled()
        } else {
            SearchCache::new(self.cache_store.clone(), config.cache.ttl_seconds)
        };
        let finder = RestaurantFinder::new(Arc::new(self.repository.clone()), cache);

        QueryAggregator::with_radii(
            finder,
            config.search.peak_radius_km,
            config.search.normal_radius_km,
        )
    }
}
