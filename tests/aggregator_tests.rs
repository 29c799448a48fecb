//! 聚合搜索测试：高峰时段半径、去重、并发变体

mod common;

use common::{ids, item, menu, restaurant, t, FixtureRepository, ORIGIN};
use dinefind::application::aggregator::{is_peak_hour, QueryAggregator};
use dinefind::application::finder::RestaurantFinder;
use dinefind::application::search_cache::SearchCache;
use dinefind::domain::model::SearchRequest;
use std::collections::HashSet;
use std::sync::Arc;

fn aggregator(repo: FixtureRepository) -> QueryAggregator {
    QueryAggregator::new(RestaurantFinder::new(Arc::new(repo), SearchCache::disabled()))
}

fn request(query: &str) -> SearchRequest {
    SearchRequest::new(ORIGIN.0, ORIGIN.1).with_query(query)
}

fn search_fixture() -> FixtureRepository {
    FixtureRepository::new(vec![
        restaurant("r1", "Chinese Wok", 1.0, t(9, 0, 0), t(23, 0, 0), &["Chinese"]),
        restaurant("r2", "Dragon Bowl", 1.5, t(9, 0, 0), t(23, 0, 0), &["Chinese"]),
        restaurant("r3", "Spice Route", 2.0, t(9, 0, 0), t(23, 0, 0), &["Indian"]),
        restaurant("r4", "Corner Cafe", 2.5, t(9, 0, 0), t(23, 0, 0), &["Cafe"]),
    ])
    .with_menus(vec![
        menu("r3", vec![item("Chinese Fried Rice", &["spicy"])]),
        menu("r4", vec![item("Sandwich", &["chinese"])]),
    ])
}

#[test]
fn test_peak_hour_boundaries() {
    assert!(!is_peak_hour(t(7, 59, 59)));
    assert!(is_peak_hour(t(8, 0, 0)));
    assert!(is_peak_hour(t(10, 0, 0)));
    assert!(!is_peak_hour(t(10, 0, 1)));

    assert!(!is_peak_hour(t(12, 59, 59)));
    assert!(is_peak_hour(t(13, 30, 0)));
    assert!(is_peak_hour(t(14, 0, 0)));
    assert!(!is_peak_hour(t(14, 0, 1)));

    assert!(!is_peak_hour(t(18, 59, 59)));
    assert!(is_peak_hour(t(19, 0, 0)));
    assert!(is_peak_hour(t(21, 0, 0)));
    assert!(!is_peak_hour(t(21, 0, 1)));

    assert!(!is_peak_hour(t(11, 0, 0)));
    assert!(!is_peak_hour(t(3, 0, 0)));
}

#[test]
fn test_serving_radius() {
    let agg = aggregator(FixtureRepository::default());
    assert_eq!(agg.serving_radius(t(8, 30, 0)), 3.0);
    assert_eq!(agg.serving_radius(t(11, 0, 0)), 5.0);
}

#[tokio::test]
async fn test_close_by_uses_peak_radius() {
    let repo = FixtureRepository::new(vec![
        restaurant("near", "Near", 2.9, t(8, 0, 0), t(22, 0, 0), &[]),
        restaurant("mid", "Mid", 4.0, t(8, 0, 0), t(22, 0, 0), &[]),
    ]);
    let agg = aggregator(repo);
    let req = SearchRequest::new(ORIGIN.0, ORIGIN.1);

    let peak = agg.find_close_by(&req, t(8, 30, 0)).await.unwrap();
    assert_eq!(ids(&peak.restaurants), vec!["near"]);

    let normal = agg.find_close_by(&req, t(11, 0, 0)).await.unwrap();
    assert_eq!(ids(&normal.restaurants), vec!["near", "mid"]);
}

#[tokio::test]
async fn test_restaurant_opening_at_nine_is_closed_at_half_eight() {
    let repo = FixtureRepository::new(vec![restaurant(
        "r1",
        "Breakfast Club",
        2.9,
        t(9, 0, 0),
        t(22, 0, 0),
        &[],
    )]);
    let agg = aggregator(repo);
    let req = SearchRequest::new(ORIGIN.0, ORIGIN.1);

    assert!(agg
        .find_close_by(&req, t(8, 30, 0))
        .await
        .unwrap()
        .restaurants
        .is_empty());
    assert_eq!(
        ids(&agg.find_close_by(&req, t(11, 0, 0)).await.unwrap().restaurants),
        vec!["r1"]
    );
}

#[tokio::test]
async fn test_empty_query_returns_nothing() {
    let agg = aggregator(search_fixture());

    let empty = agg.search(&request(""), t(11, 0, 0)).await.unwrap();
    assert!(empty.restaurants.is_empty());

    let missing = SearchRequest::new(ORIGIN.0, ORIGIN.1);
    assert!(agg
        .search(&missing, t(11, 0, 0))
        .await
        .unwrap()
        .restaurants
        .is_empty());

    assert!(agg
        .search_concurrent(&request(""), t(11, 0, 0))
        .await
        .restaurants
        .is_empty());
}

#[tokio::test]
async fn test_search_merges_in_fixed_order_without_duplicates() {
    let agg = aggregator(search_fixture());

    let response = agg.search(&request("Chinese"), t(11, 0, 0)).await.unwrap();

    // 名称 (r1) -> 菜系 (r1 重复, r2) -> 菜品名 (r3) -> 菜品标签 (r4)
    assert_eq!(ids(&response.restaurants), vec!["r1", "r2", "r3", "r4"]);
}

#[tokio::test]
async fn test_name_and_attribute_match_appears_once() {
    let repo = FixtureRepository::new(vec![restaurant(
        "r1",
        "Chinese",
        1.0,
        t(9, 0, 0),
        t(23, 0, 0),
        &["Chinese"],
    )])
    .with_menus(vec![menu("r1", vec![item("Chinese", &["Chinese"])])]);
    let agg = aggregator(repo);

    let response = agg.search(&request("Chinese"), t(11, 0, 0)).await.unwrap();
    assert_eq!(ids(&response.restaurants), vec!["r1"]);

    let concurrent = agg.search_concurrent(&request("Chinese"), t(11, 0, 0)).await;
    assert_eq!(ids(&concurrent.restaurants), vec!["r1"]);
}

#[tokio::test]
async fn test_concurrent_search_covers_name_and_attributes_only() {
    let agg = aggregator(search_fixture());

    let response = agg.search_concurrent(&request("Chinese"), t(11, 0, 0)).await;

    // 输出顺序不保证，只比较集合
    let found: HashSet<String> = ids(&response.restaurants).into_iter().collect();
    let expected: HashSet<String> = ["r1", "r2"].iter().map(|s| s.to_string()).collect();
    assert_eq!(found, expected);
    assert_eq!(response.restaurants.len(), 2);
}

#[tokio::test]
async fn test_storage_failure_handling() {
    let agg = aggregator(FixtureRepository::failing());

    assert!(agg.search(&request("Chinese"), t(11, 0, 0)).await.is_err());

    // 并发变体降级为空结果
    let response = agg.search_concurrent(&request("Chinese"), t(11, 0, 0)).await;
    assert!(response.restaurants.is_empty());
}

#[test]
fn test_request_validation() {
    assert!(SearchRequest::new(90.0, -180.0).validate().is_ok());
    assert!(SearchRequest::new(-90.0, 180.0).validate().is_ok());
    assert!(SearchRequest::new(90.1, 0.0).validate().is_err());
    assert!(SearchRequest::new(0.0, -180.5).validate().is_err());
}
