use crate::application::dedup::OrderedResultSet;
use crate::application::filter::is_candidate;
use crate::application::search_cache::SearchCache;
use crate::domain::error::Result;
use crate::domain::geo::GeoIndexKey;
use crate::domain::model::{MenuRecord, SearchResult};
use crate::domain::traits::RestaurantRepository;
use chrono::NaiveTime;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// Proximity search over the repository, fronted by the geohash bucket cache.
///
/// Cheap to clone: both collaborators sit behind `Arc`.
#[derive(Clone)]
pub struct RestaurantFinder {
    repository: Arc<dyn RestaurantRepository>,
    cache: SearchCache,
}

impl RestaurantFinder {
    pub fn new(repository: Arc<dyn RestaurantRepository>, cache: SearchCache) -> Self {
        Self { repository, cache }
    }

    /// Open restaurants strictly within `radius_km`, in storage order.
    ///
    /// Results are cached per geohash bucket only. A hit is returned as-is,
    /// even if it was produced for a different time or radius.
    pub async fn find_nearby(
        &self,
        latitude: f64,
        longitude: f64,
        current: NaiveTime,
        radius_km: f64,
    ) -> Result<Vec<SearchResult>> {
        let key = GeoIndexKey::from_coordinates(latitude, longitude);

        // 1. Bucket cache
        if let Some(cached) = self.cache.get(key.as_str()).await {
            return Ok(cached);
        }

        // 2. Full scan
        let records = self.repository.find_all_restaurants().await?;
        let scanned = records.len();
        let results: Vec<SearchResult> = records
            .iter()
            .filter(|r| is_candidate(r, current, latitude, longitude, radius_km))
            .map(SearchResult::from)
            .collect();
        debug!(
            key = %key,
            scanned,
            matched = results.len(),
            radius_km,
            "scanned restaurants"
        );

        // 3. Write back
        self.cache.set(key.as_str(), &results).await;

        Ok(results)
    }

    /// Exact-name matches from storage, then substring matches from the nearby pool.
    ///
    /// The exact stage bypasses the bucket cache but still applies the
    /// open/radius predicate to each stored match, so a closed or distant
    /// restaurant is dropped even when its name matches exactly.
    pub async fn find_by_name(
        &self,
        latitude: f64,
        longitude: f64,
        query: &str,
        current: NaiveTime,
        radius_km: f64,
    ) -> Result<Vec<SearchResult>> {
        let mut set = OrderedResultSet::new();

        let exact = self.repository.find_restaurants_by_exact_name(query).await?;
        set.extend(
            exact
                .iter()
                .filter(|r| is_candidate(r, current, latitude, longitude, radius_km))
                .map(SearchResult::from),
        );

        let nearby = self
            .find_nearby(latitude, longitude, current, radius_km)
            .await?;
        set.extend(nearby.into_iter().filter(|r| r.name.contains(query)));

        Ok(set.into_vec())
    }

    /// Nearby restaurants listing `query` as one of their cuisines (case-sensitive).
    pub async fn find_by_attributes(
        &self,
        latitude: f64,
        longitude: f64,
        query: &str,
        current: NaiveTime,
        radius_km: f64,
    ) -> Result<Vec<SearchResult>> {
        let nearby = self
            .find_nearby(latitude, longitude, current, radius_km)
            .await?;

        Ok(nearby
            .into_iter()
            .filter(|r| r.attributes.iter().any(|a| a == query))
            .collect::<OrderedResultSet>()
            .into_vec())
    }

    /// Nearby restaurants serving an item named `query` (ignoring case),
    /// followed by those with an item name containing `query`.
    pub async fn find_by_item_name(
        &self,
        latitude: f64,
        longitude: f64,
        query: &str,
        current: NaiveTime,
        radius_km: f64,
    ) -> Result<Vec<SearchResult>> {
        let nearby = self
            .find_nearby(latitude, longitude, current, radius_km)
            .await?;

        let mut menus = Vec::with_capacity(nearby.len());
        for restaurant in nearby {
            let menu = self.menu_for(&restaurant.restaurant_id).await?;
            menus.push((restaurant, menu));
        }

        let lowered = query.to_lowercase();
        let mut set = OrderedResultSet::new();
        for (restaurant, menu) in &menus {
            if menu.items.iter().any(|i| i.name.to_lowercase() == lowered) {
                set.insert(restaurant.clone());
            }
        }
        for (restaurant, menu) in &menus {
            if menu.items.iter().any(|i| i.name.contains(query)) {
                set.insert(restaurant.clone());
            }
        }

        Ok(set.into_vec())
    }

    /// Nearby restaurants with any menu item tagged `query` (ignoring case).
    pub async fn find_by_item_attributes(
        &self,
        latitude: f64,
        longitude: f64,
        query: &str,
        current: NaiveTime,
        radius_km: f64,
    ) -> Result<Vec<SearchResult>> {
        let nearby = self
            .find_nearby(latitude, longitude, current, radius_km)
            .await?;

        let lowered = query.to_lowercase();
        let mut set = OrderedResultSet::new();
        for restaurant in nearby {
            let menu = self.menu_for(&restaurant.restaurant_id).await?;
            let tags: HashSet<String> = menu
                .items
                .iter()
                .flat_map(|i| i.attributes.iter().map(|a| a.to_lowercase()))
                .collect();
            if tags.contains(&lowered) {
                set.insert(restaurant);
            }
        }

        Ok(set.into_vec())
    }

    // A restaurant without a stored menu has nothing to match against.
    async fn menu_for(&self, restaurant_id: &str) -> Result<MenuRecord> {
        match self.repository.find_menu_by_restaurant_id(restaurant_id).await? {
            Some(menu) => Ok(menu),
            None => {
                debug!(restaurant_id, "no menu stored, treating as empty");
                Ok(MenuRecord::empty(restaurant_id))
            }
        }
    }
}
