pub mod aggregator;
pub mod dedup;
pub mod filter;
pub mod finder;
pub mod import;
pub mod search_cache;
