use crate::domain::error::Result;
use crate::domain::model::{time_of_day, ItemRecord, MenuRecord, RestaurantRecord};
use crate::domain::traits::RestaurantRepository;
use async_trait::async_trait;
use rusqlite::types::Type;
use rusqlite::{OptionalExtension, Row};
use std::path::Path;
use std::sync::Arc;
use tokio_rusqlite::{params, Connection};

const RESTAURANT_COLUMNS: &str =
    "restaurant_id, name, city, image_url, latitude, longitude, opens_at, closes_at, attributes";

pub async fn init_database(db_path: &Path) -> Result<Connection> {
    let db = Connection::open(db_path.to_path_buf())
        .await
        .map_err(tokio_rusqlite::Error::from)?;
    create_schema(&db).await?;
    Ok(db)
}

/// Fresh private in-memory database with the full schema.
pub async fn init_memory_database() -> Result<Connection> {
    let db = Connection::open_in_memory()
        .await
        .map_err(tokio_rusqlite::Error::from)?;
    create_schema(&db).await?;
    Ok(db)
}

async fn create_schema(db: &Connection) -> Result<()> {
    db.call(|conn| -> rusqlite::Result<()> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS restaurants (
                restaurant_id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                city TEXT NOT NULL DEFAULT '',
                image_url TEXT NOT NULL DEFAULT '',
                latitude REAL NOT NULL,
                longitude REAL NOT NULL,
                opens_at TEXT NOT NULL,
                closes_at TEXT NOT NULL,
                attributes TEXT NOT NULL DEFAULT '[]'
            )",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_restaurants_name ON restaurants(name)",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS menus (
                restaurant_id TEXT PRIMARY KEY,
                items TEXT NOT NULL DEFAULT '[]'
            )",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS search_cache (
                key TEXT PRIMARY KEY,
                data BLOB NOT NULL,
                expires_at INTEGER NOT NULL
            )",
            [],
        )?;

        Ok(())
    })
    .await?;

    Ok(())
}

fn conversion_error<E>(column: usize, e: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(e))
}

fn restaurant_from_row(row: &Row<'_>) -> rusqlite::Result<RestaurantRecord> {
    let opens_at: String = row.get(6)?;
    let closes_at: String = row.get(7)?;
    let attributes: String = row.get(8)?;

    Ok(RestaurantRecord {
        restaurant_id: row.get(0)?,
        name: row.get(1)?,
        city: row.get(2)?,
        image_url: row.get(3)?,
        latitude: row.get(4)?,
        longitude: row.get(5)?,
        opens_at: time_of_day::parse(&opens_at).map_err(|e| conversion_error(6, e))?,
        closes_at: time_of_day::parse(&closes_at).map_err(|e| conversion_error(7, e))?,
        attributes: serde_json::from_str(&attributes).map_err(|e| conversion_error(8, e))?,
    })
}

/// Restaurant and menu storage in SQLite
///
/// Attribute lists and menu items are stored as JSON text. Storage order is
/// rowid order; upserts keep a record's original position.
#[derive(Clone)]
pub struct SqliteRepository {
    conn: Arc<Connection>,
}

impl SqliteRepository {
    pub fn new(conn: Arc<Connection>) -> Self {
        Self { conn }
    }

    pub async fn insert_restaurants(&self, records: Vec<RestaurantRecord>) -> Result<usize> {
        let prepared = records
            .into_iter()
            .map(|r| -> Result<(RestaurantRecord, String)> {
                let attributes = serde_json::to_string(&r.attributes)?;
                Ok((r, attributes))
            })
            .collect::<Result<Vec<_>>>()?;

        if prepared.is_empty() {
            return Ok(0);
        }

        let written = self
            .conn
            .call(move |conn| -> rusqlite::Result<usize> {
                let tx = conn.transaction()?;
                let mut count = 0;
                {
                    let mut stmt = tx.prepare(
                        "INSERT INTO restaurants (restaurant_id, name, city, image_url, latitude, longitude, opens_at, closes_at, attributes)
                         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
                         ON CONFLICT(restaurant_id) DO UPDATE SET
                            name = excluded.name,
                            city = excluded.city,
                            image_url = excluded.image_url,
                            latitude = excluded.latitude,
                            longitude = excluded.longitude,
                            opens_at = excluded.opens_at,
                            closes_at = excluded.closes_at,
                            attributes = excluded.attributes",
                    )?;
                    for (r, attributes) in prepared {
                        count += stmt.execute(params![
                            r.restaurant_id,
                            r.name,
                            r.city,
                            r.image_url,
                            r.latitude,
                            r.longitude,
                            time_of_day::format(&r.opens_at),
                            time_of_day::format(&r.closes_at),
                            attributes
                        ])?;
                    }
                }
                tx.commit()?;
                Ok(count)
            })
            .await?;

        Ok(written)
    }

    pub async fn insert_menus(&self, menus: Vec<MenuRecord>) -> Result<usize> {
        let prepared = menus
            .into_iter()
            .map(|m| -> Result<(String, String)> {
                let items = serde_json::to_string(&m.items)?;
                Ok((m.restaurant_id, items))
            })
            .collect::<Result<Vec<_>>>()?;

        if prepared.is_empty() {
            return Ok(0);
        }

        let written = self
            .conn
            .call(move |conn| -> rusqlite::Result<usize> {
                let tx = conn.transaction()?;
                let mut count = 0;
                {
                    let mut stmt = tx.prepare(
                        "INSERT OR REPLACE INTO menus (restaurant_id, items) VALUES (?, ?)",
                    )?;
                    for (restaurant_id, items) in prepared {
                        count += stmt.execute(params![restaurant_id, items])?;
                    }
                }
                tx.commit()?;
                Ok(count)
            })
            .await?;

        Ok(written)
    }

    pub async fn count_restaurants(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .call(|conn| -> rusqlite::Result<i64> {
                conn.query_row("SELECT COUNT(*) FROM restaurants", [], |row| row.get(0))
            })
            .await?;

        Ok(count as usize)
    }
}

#[async_trait]
impl RestaurantRepository for SqliteRepository {
    async fn find_all_restaurants(&self) -> Result<Vec<RestaurantRecord>> {
        let records = self
            .conn
            .call(|conn| -> rusqlite::Result<Vec<RestaurantRecord>> {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {RESTAURANT_COLUMNS} FROM restaurants ORDER BY rowid"
                ))?;
                let records = stmt
                    .query_map([], restaurant_from_row)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                Ok(records)
            })
            .await?;

        Ok(records)
    }

    async fn find_restaurants_by_exact_name(&self, name: &str) -> Result<Vec<RestaurantRecord>> {
        let name = name.to_string();
        let records = self
            .conn
            .call(move |conn| -> rusqlite::Result<Vec<RestaurantRecord>> {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {RESTAURANT_COLUMNS} FROM restaurants WHERE name = ? ORDER BY rowid"
                ))?;
                let records = stmt
                    .query_map(params![name], restaurant_from_row)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                Ok(records)
            })
            .await?;

        Ok(records)
    }

    async fn find_menu_by_restaurant_id(&self, restaurant_id: &str) -> Result<Option<MenuRecord>> {
        let id = restaurant_id.to_string();
        let items = self
            .conn
            .call(move |conn| -> rusqlite::Result<Option<Vec<ItemRecord>>> {
                conn.query_row(
                    "SELECT items FROM menus WHERE restaurant_id = ?",
                    params![id],
                    |row| {
                        let raw: String = row.get(0)?;
                        serde_json::from_str(&raw).map_err(|e| conversion_error(0, e))
                    },
                )
                .optional()
            })
            .await?;

        Ok(items.map(|items| MenuRecord {
            restaurant_id: restaurant_id.to_string(),
            items,
        }))
    }
}
