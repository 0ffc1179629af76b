//! Memory-zone metrics collector for Linux.
//!
//! This module reads `/proc/zoneinfo` through a [`FileSystem`] abstraction,
//! with support for mocking for testing on macOS.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │              ZoneinfoCollector               │
//! │   <proc_path>/zoneinfo ──► parse_zoneinfo    │
//! └──────────────────────┬───────────────────────┘
//!                        │
//!                 ┌──────▼──────┐
//!                 │  FileSystem │ (trait)
//!                 └──────┬──────┘
//!              ┌─────────┼──────────┐
//!       ┌──────▼──────┐  │   ┌──────▼──────┐
//!       │   RealFs    │  │   │  Scenarios  │
//!       │  (Linux)    │  │   │ (Fixtures)  │
//!       └─────────────┘  │   └─────────────┘
//!                 ┌──────▼──────┐
//!                 │   MockFs    │
//!                 │ (Testing)   │
//!                 └─────────────┘
//! ```
//!
//! # Usage
//!
//! ## Production (Linux)
//!
//! ```ignore
//! use zonestat_core::collector::{RealFs, ZoneinfoCollector};
//!
//! let collector = ZoneinfoCollector::new(RealFs::new(), "/proc");
//! let zoneinfo = collector.collect().unwrap();
//! ```
//!
//! ## Testing (with MockFs)
//!
//! ```
//! use zonestat_core::collector::{MockFs, ZoneinfoCollector};
//!
//! let fs = MockFs::single_node_system();
//! let collector = ZoneinfoCollector::new(fs, "/proc");
//! let zoneinfo = collector.collect().unwrap();
//! assert_eq!(zoneinfo.zones.len(), 5);
//! ```

pub mod mock;
pub mod procfs;
pub mod traits;

pub use mock::MockFs;
pub use procfs::{CollectError, DEFAULT_PROC_PATH, ParseError, ZoneinfoCollector};
pub use traits::{FileSystem, RealFs};
