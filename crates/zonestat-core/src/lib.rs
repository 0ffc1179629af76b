//! zonestat-core — library for reading Linux memory-zone statistics.
//!
//! Provides:
//! - `collector` — `/proc/zoneinfo` parser and collector, filesystem abstraction
//! - `models` — node and zone records produced by the collector

pub mod collector;
pub mod models;

pub use collector::{CollectError, ZoneinfoCollector};
pub use models::{NodeStats, ZoneStats, Zoneinfo};
