//! Data models produced by collectors.

pub mod zoneinfo;

pub use zoneinfo::{NodeStats, ZoneStats, Zoneinfo};
