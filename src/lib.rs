//! Nearby restaurant discovery.
//!
//! Proximity searches are bucketed by a 7-character geohash and served
//! cache-aside: a bucket hit is returned as stored, a miss scans every
//! restaurant through the open-hours and radius filter and repopulates the
//! bucket. Text searches by name, cuisine, dish and dish tag are layered on
//! the nearby pool and merged by [`application::aggregator::QueryAggregator`].
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod presentation;
pub mod state;
