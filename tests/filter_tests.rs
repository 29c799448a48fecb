//! 营业时间与距离过滤测试

mod common;

use common::{north_of_origin, restaurant, t, ORIGIN};
use dinefind::application::filter::{is_candidate, is_open_now, is_within_radius};
use dinefind::domain::geo::haversine_km;

#[test]
fn test_open_now_excludes_boundaries() {
    let opens = t(9, 0, 0);
    let closes = t(22, 0, 0);

    assert!(!is_open_now(opens, opens, closes));
    assert!(!is_open_now(closes, opens, closes));
    assert!(is_open_now(t(9, 0, 1), opens, closes));
    assert!(is_open_now(t(21, 59, 59), opens, closes));
    assert!(!is_open_now(t(8, 30, 0), opens, closes));
    assert!(!is_open_now(t(23, 0, 0), opens, closes));
}

#[test]
fn test_within_radius_is_strict() {
    let (lat, lon) = north_of_origin(2.0);
    let exact = haversine_km(ORIGIN.0, ORIGIN.1, lat, lon);

    assert!(!is_within_radius(ORIGIN.0, ORIGIN.1, lat, lon, exact));
    assert!(is_within_radius(ORIGIN.0, ORIGIN.1, lat, lon, exact + 1e-9));
    assert!(!is_within_radius(ORIGIN.0, ORIGIN.1, lat, lon, 1.9));
}

#[test]
fn test_candidate_needs_open_and_near() {
    let near_open = restaurant("r1", "Near", 2.9, t(8, 0, 0), t(22, 0, 0), &[]);
    let far_open = restaurant("r2", "Far", 4.0, t(8, 0, 0), t(22, 0, 0), &[]);
    let near_closed = restaurant("r3", "Shut", 1.0, t(12, 0, 0), t(15, 0, 0), &[]);

    let now = t(8, 30, 0);
    assert!(is_candidate(&near_open, now, ORIGIN.0, ORIGIN.1, 3.0));
    assert!(!is_candidate(&far_open, now, ORIGIN.0, ORIGIN.1, 3.0));
    assert!(is_candidate(&far_open, now, ORIGIN.0, ORIGIN.1, 5.0));
    assert!(!is_candidate(&near_closed, now, ORIGIN.0, ORIGIN.1, 5.0));
}
