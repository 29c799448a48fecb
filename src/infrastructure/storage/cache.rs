// Cache stores backing the search cache
use crate::domain::error::{FinderError, Result};
use crate::domain::traits::CacheStore;
use async_trait::async_trait;
use dashmap::DashMap;
use rusqlite::OptionalExtension;
use std::io::Cursor;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_rusqlite::{params, Connection};

/// Thread-safe in-memory store with per-entry expiry
///
/// Expired entries are evicted lazily when read. A deadline of `None` means
/// the ttl ran past what `Instant` can represent; such entries never expire.
pub struct MemoryCache {
    map: DashMap<String, (String, Option<Instant>)>,
}

fn is_live(expires_at: Option<Instant>, now: Instant) -> bool {
    expires_at.map_or(true, |deadline| now < deadline)
}

impl MemoryCache {
    pub fn new() -> Self {
        Self {
            map: DashMap::new(),
        }
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheStore for MemoryCache {
    fn is_available(&self) -> bool {
        true
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let now = Instant::now();
        let value = match self.map.get(key) {
            Some(entry) if is_live(entry.value().1, now) => {
                return Ok(Some(entry.value().0.clone()))
            }
            Some(_) => None,
            None => return Ok(None),
        };
        // Guard dropped above; removing while holding it would deadlock the shard.
        self.map.remove_if(key, |_, (_, expires_at)| !is_live(*expires_at, now));
        Ok(value)
    }

    async fn set_with_expiry(&self, key: &str, value: String, ttl_seconds: u64) -> Result<()> {
        let expires_at = Instant::now().checked_add(Duration::from_secs(ttl_seconds));
        self.map.insert(key.to_string(), (value, expires_at));
        Ok(())
    }

    async fn entry_count(&self) -> Result<usize> {
        let now = Instant::now();
        Ok(self
            .map
            .iter()
            .filter(|entry| is_live(entry.value().1, now))
            .count())
    }
}

/// Store in the `search_cache` table, zstd-compressed
pub struct SqliteCache {
    conn: Arc<Connection>,
}

impl SqliteCache {
    pub fn new(conn: Arc<Connection>) -> Self {
        Self { conn }
    }
}

/// Unix deadline `ttl_seconds` from `now`, saturating at `i64::MAX`
fn expiry_timestamp(now: i64, ttl_seconds: u64) -> i64 {
    now.saturating_add(i64::try_from(ttl_seconds).unwrap_or(i64::MAX))
}

#[async_trait]
impl CacheStore for SqliteCache {
    fn is_available(&self) -> bool {
        true
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        use zstd::stream::decode_all;

        let key = key.to_string();
        let now = chrono::Utc::now().timestamp();
        let compressed = self
            .conn
            .call(move |conn| -> rusqlite::Result<Option<Vec<u8>>> {
                conn.query_row(
                    "SELECT data FROM search_cache WHERE key = ? AND expires_at > ?",
                    params![key, now],
                    |row| row.get(0),
                )
                .optional()
            })
            .await?;

        let Some(compressed) = compressed else {
            return Ok(None);
        };

        let decompressed = decode_all(Cursor::new(&compressed))
            .map_err(|e| FinderError::Compression(e.to_string()))?;
        let payload =
            String::from_utf8(decompressed).map_err(|e| FinderError::Compression(e.to_string()))?;

        Ok(Some(payload))
    }

    async fn set_with_expiry(&self, key: &str, value: String, ttl_seconds: u64) -> Result<()> {
        use zstd::stream::encode_all;

        let compressed = encode_all(Cursor::new(value.as_bytes()), 0)?;
        let expires_at = expiry_timestamp(chrono::Utc::now().timestamp(), ttl_seconds);
        let key = key.to_string();

        self.conn
            .call(move |conn| -> rusqlite::Result<usize> {
                conn.execute(
                    "INSERT OR REPLACE INTO search_cache (key, data, expires_at) VALUES (?, ?, ?)",
                    params![key, compressed, expires_at],
                )
            })
            .await?;

        Ok(())
    }

    async fn entry_count(&self) -> Result<usize> {
        let now = chrono::Utc::now().timestamp();
        let count: i64 = self
            .conn
            .call(move |conn| -> rusqlite::Result<i64> {
                conn.query_row(
                    "SELECT COUNT(*) FROM search_cache WHERE expires_at > ?",
                    params![now],
                    |row| row.get(0),
                )
            })
            .await?;

        Ok(count as usize)
    }
}

/// Store that is switched off: never read, never written
pub struct DisabledCache;

#[async_trait]
impl CacheStore for DisabledCache {
    fn is_available(&self) -> bool {
        false
    }

    async fn get(&self, _key: &str) -> Result<Option<String>> {
        Ok(None)
    }

    async fn set_with_expiry(&self, _key: &str, _value: String, _ttl_seconds: u64) -> Result<()> {
        Ok(())
    }

    async fn entry_count(&self) -> Result<usize> {
        Ok(0)
    }
}
