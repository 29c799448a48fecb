use crate::application::dedup::OrderedResultSet;
use crate::application::finder::RestaurantFinder;
use crate::domain::error::Result;
use crate::domain::model::{SearchRequest, SearchResponse, SearchResult};
use chrono::NaiveTime;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use tracing::{debug, info, warn};

pub const PEAK_HOURS_RADIUS_KM: f64 = 3.0;
pub const NORMAL_HOURS_RADIUS_KM: f64 = 5.0;

// Open intervals: the bounds themselves are off-peak.
static PEAK_WINDOWS: Lazy<[(NaiveTime, NaiveTime); 3]> = Lazy::new(|| {
    let t = |h, m, s| NaiveTime::from_hms_opt(h, m, s).unwrap_or_default();
    [
        (t(7, 59, 59), t(10, 0, 1)),
        (t(12, 59, 59), t(14, 0, 1)),
        (t(18, 59, 59), t(21, 0, 1)),
    ]
});

pub fn is_peak_hour(current: NaiveTime) -> bool {
    PEAK_WINDOWS
        .iter()
        .any(|(start, end)| *start < current && current < *end)
}

/// Combines the finder's searches into one de-duplicated response.
#[derive(Clone)]
pub struct QueryAggregator {
    finder: RestaurantFinder,
    peak_radius_km: f64,
    normal_radius_km: f64,
}

impl QueryAggregator {
    pub fn new(finder: RestaurantFinder) -> Self {
        Self::with_radii(finder, PEAK_HOURS_RADIUS_KM, NORMAL_HOURS_RADIUS_KM)
    }

    pub fn with_radii(finder: RestaurantFinder, peak_radius_km: f64, normal_radius_km: f64) -> Self {
        Self {
            finder,
            peak_radius_km,
            normal_radius_km,
        }
    }

    pub fn serving_radius(&self, current: NaiveTime) -> f64 {
        if is_peak_hour(current) {
            self.peak_radius_km
        } else {
            self.normal_radius_km
        }
    }

    /// Every open restaurant within the serving radius for `current`.
    pub async fn find_close_by(
        &self,
        request: &SearchRequest,
        current: NaiveTime,
    ) -> Result<SearchResponse> {
        let radius_km = self.serving_radius(current);
        let restaurants = self
            .finder
            .find_nearby(request.latitude, request.longitude, current, radius_km)
            .await?;
        info!(count = restaurants.len(), radius_km, "close-by restaurants");
        Ok(SearchResponse::new(restaurants))
    }

    /// Name, cuisine, item-name and item-tag matches, in that order, each
    /// restaurant kept at its first position.
    ///
    /// An empty query matches nothing.
    pub async fn search(&self, request: &SearchRequest, current: NaiveTime) -> Result<SearchResponse> {
        let query = match request.search_for.as_deref() {
            Some(q) if !q.is_empty() => q,
            _ => return Ok(SearchResponse::default()),
        };
        let (lat, lon) = (request.latitude, request.longitude);
        let radius_km = self.serving_radius(current);

        let by_name = self.finder.find_by_name(lat, lon, query, current, radius_km).await?;
        let by_attributes = self
            .finder
            .find_by_attributes(lat, lon, query, current, radius_km)
            .await?;
        let by_item_name = self
            .finder
            .find_by_item_name(lat, lon, query, current, radius_km)
            .await?;
        let by_item_attributes = self
            .finder
            .find_by_item_attributes(lat, lon, query, current, radius_km)
            .await?;

        let set: OrderedResultSet = by_name
            .into_iter()
            .chain(by_attributes)
            .chain(by_item_name)
            .chain(by_item_attributes)
            .collect();
        debug!(query, radius_km, count = set.len(), "aggregated search");

        Ok(SearchResponse::new(set.into_vec()))
    }

    /// Runs the name and cuisine searches as two tasks and merges them by id.
    ///
    /// Later results replace earlier ones for the same id and the output
    /// follows map iteration order, not first-seen order. Item searches are
    /// not part of this variant. Any failure yields an empty response. There
    /// is no timeout: a stalled collaborator stalls the call.
    pub async fn search_concurrent(&self, request: &SearchRequest, current: NaiveTime) -> SearchResponse {
        let query = match request.search_for.as_deref() {
            Some(q) if !q.is_empty() => q.to_string(),
            _ => return SearchResponse::default(),
        };
        let (lat, lon) = (request.latitude, request.longitude);
        let radius_km = self.serving_radius(current);

        let name_task = {
            let finder = self.finder.clone();
            let query = query.clone();
            tokio::spawn(async move {
                finder.find_by_name(lat, lon, &query, current, radius_km).await
            })
        };
        let attributes_task = {
            let finder = self.finder.clone();
            let query = query.clone();
            tokio::spawn(async move {
                finder
                    .find_by_attributes(lat, lon, &query, current, radius_km)
                    .await
            })
        };

        let (by_name, by_attributes) = match tokio::join!(name_task, attributes_task) {
            (Ok(Ok(by_name)), Ok(Ok(by_attributes))) => (by_name, by_attributes),
            (Err(e), _) | (_, Err(e)) => {
                warn!(error = %e, "search task did not complete");
                return SearchResponse::default();
            }
            (Ok(Err(e)), _) | (_, Ok(Err(e))) => {
                warn!(error = %e, "search task failed");
                return SearchResponse::default();
            }
        };

        let mut merged: HashMap<String, SearchResult> = HashMap::new();
        for restaurant in by_name.into_iter().chain(by_attributes) {
            merged.insert(restaurant.restaurant_id.clone(), restaurant);
        }
        debug!(query = %query, radius_km, count = merged.len(), "concurrent search");

        SearchResponse::new(merged.into_values().collect())
    }
}
