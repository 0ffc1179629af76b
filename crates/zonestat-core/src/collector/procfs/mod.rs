//! Collectors for Linux `/proc` filesystem.
//!
//! This module provides parsers and collectors for reading memory-zone
//! information from the `/proc` virtual filesystem.

pub mod parser;
pub mod system;
pub mod zoneinfo;

pub use parser::ParseError;
pub use system::{CollectError, DEFAULT_PROC_PATH, ZoneinfoCollector};
pub use zoneinfo::parse_zoneinfo;
