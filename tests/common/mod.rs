//! 测试共用工具：餐厅构造、固定数据仓库、故障缓存
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveTime;
use dinefind::domain::error::{FinderError, Result};
use dinefind::domain::geo::EARTH_RADIUS_KM;
use dinefind::domain::model::{ItemRecord, MenuRecord, RestaurantRecord};
use dinefind::domain::traits::{CacheStore, RestaurantRepository};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

// 测试原点（班加罗尔）
pub const ORIGIN: (f64, f64) = (12.9716, 77.5946);

pub fn t(h: u32, m: u32, s: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, s).unwrap()
}

/// Point `km` due north of `ORIGIN`
pub fn north_of_origin(km: f64) -> (f64, f64) {
    (ORIGIN.0 + (km / EARTH_RADIUS_KM).to_degrees(), ORIGIN.1)
}

pub fn restaurant(
    id: &str,
    name: &str,
    km_north: f64,
    opens_at: NaiveTime,
    closes_at: NaiveTime,
    attributes: &[&str],
) -> RestaurantRecord {
    let (latitude, longitude) = north_of_origin(km_north);
    RestaurantRecord {
        restaurant_id: id.to_string(),
        name: name.to_string(),
        city: "Bengaluru".to_string(),
        image_url: format!("https://images.example/{id}.jpg"),
        latitude,
        longitude,
        opens_at,
        closes_at,
        attributes: attributes.iter().map(|a| a.to_string()).collect(),
    }
}

pub fn item(name: &str, attributes: &[&str]) -> ItemRecord {
    ItemRecord {
        item_id: format!("item-{}", name.to_lowercase().replace(' ', "-")),
        name: name.to_string(),
        price: 120.0,
        attributes: attributes.iter().map(|a| a.to_string()).collect(),
    }
}

pub fn menu(restaurant_id: &str, items: Vec<ItemRecord>) -> MenuRecord {
    MenuRecord {
        restaurant_id: restaurant_id.to_string(),
        items,
    }
}

pub fn ids(results: &[dinefind::domain::model::SearchResult]) -> Vec<String> {
    results.iter().map(|r| r.restaurant_id.clone()).collect()
}

/// In-memory repository that counts full scans
#[derive(Default)]
pub struct FixtureRepository {
    restaurants: Vec<RestaurantRecord>,
    menus: HashMap<String, MenuRecord>,
    fail_scans: bool,
    scans: AtomicUsize,
}

impl FixtureRepository {
    pub fn new(restaurants: Vec<RestaurantRecord>) -> Self {
        Self {
            restaurants,
            ..Self::default()
        }
    }

    pub fn with_menus(mut self, menus: Vec<MenuRecord>) -> Self {
        self.menus = menus
            .into_iter()
            .map(|m| (m.restaurant_id.clone(), m))
            .collect();
        self
    }

    pub fn failing() -> Self {
        Self {
            fail_scans: true,
            ..Self::default()
        }
    }

    pub fn scans(&self) -> usize {
        self.scans.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RestaurantRepository for FixtureRepository {
    async fn find_all_restaurants(&self) -> Result<Vec<RestaurantRecord>> {
        self.scans.fetch_add(1, Ordering::SeqCst);
        if self.fail_scans {
            return Err(FinderError::Config("storage offline".to_string()));
        }
        Ok(self.restaurants.clone())
    }

    async fn find_restaurants_by_exact_name(&self, name: &str) -> Result<Vec<RestaurantRecord>> {
        Ok(self
            .restaurants
            .iter()
            .filter(|r| r.name == name)
            .cloned()
            .collect())
    }

    async fn find_menu_by_restaurant_id(&self, restaurant_id: &str) -> Result<Option<MenuRecord>> {
        Ok(self.menus.get(restaurant_id).cloned())
    }
}

/// Cache store that is "on" but fails every call
pub struct BrokenCache;

#[async_trait]
impl CacheStore for BrokenCache {
    fn is_available(&self) -> bool {
        true
    }

    async fn get(&self, _key: &str) -> Result<Option<String>> {
        Err(FinderError::Config("cache connection refused".to_string()))
    }

    async fn set_with_expiry(&self, _key: &str, _value: String, _ttl_seconds: u64) -> Result<()> {
        Err(FinderError::Config("cache connection refused".to_string()))
    }

    async fn entry_count(&self) -> Result<usize> {
        Err(FinderError::Config("cache connection refused".to_string()))
    }
}
