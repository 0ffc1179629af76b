//! Collector for system-wide memory-zone statistics.

use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::debug;

use crate::collector::procfs::zoneinfo::parse_zoneinfo;
use crate::collector::traits::FileSystem;
use crate::models::Zoneinfo;

/// Default mount point of the proc filesystem.
pub const DEFAULT_PROC_PATH: &str = "/proc";

/// Error type for collection failures.
#[derive(Debug)]
pub enum CollectError {
    /// The file could not be read. Parsing was not attempted.
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The content could not be processed at all.
    Parse { path: PathBuf, message: String },
}

impl std::fmt::Display for CollectError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CollectError::Read { path, source } => {
                write!(f, "error reading {}: {}", path.display(), source)
            }
            CollectError::Parse { path, message } => {
                write!(f, "error parsing {}: {}", path.display(), message)
            }
        }
    }
}

impl std::error::Error for CollectError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CollectError::Read { source, .. } => Some(source),
            CollectError::Parse { .. } => None,
        }
    }
}

/// Collects memory-zone statistics from `<proc_path>/zoneinfo`.
///
/// Holds no snapshot state: every [`collect`](Self::collect) reads and parses
/// the file afresh.
pub struct ZoneinfoCollector<F: FileSystem> {
    fs: F,
    proc_path: PathBuf,
}

impl<F: FileSystem> ZoneinfoCollector<F> {
    /// Creates a new zoneinfo collector.
    ///
    /// # Arguments
    /// * `fs` - Filesystem implementation (real or mock)
    /// * `proc_path` - Base path to proc filesystem (usually "/proc")
    pub fn new(fs: F, proc_path: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            proc_path: proc_path.into(),
        }
    }

    /// Base path of the proc filesystem.
    pub fn proc_path(&self) -> &Path {
        &self.proc_path
    }

    /// Resolved path of the zoneinfo file.
    pub fn zoneinfo_path(&self) -> PathBuf {
        self.proc_path.join("zoneinfo")
    }

    /// Reads and parses the zoneinfo file.
    pub fn collect(&self) -> Result<Zoneinfo, CollectError> {
        let path = self.zoneinfo_path();
        let content = self
            .fs
            .read_to_string(&path)
            .map_err(|source| CollectError::Read {
                path: path.clone(),
                source,
            })?;

        let start = Instant::now();
        let zoneinfo = parse_zoneinfo(&content).map_err(|e| CollectError::Parse {
            path: path.clone(),
            message: e.message,
        })?;

        debug!(
            path = %path.display(),
            nodes = zoneinfo.nodes.len(),
            zones = zoneinfo.zones.len(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "zoneinfo collected"
        );

        Ok(zoneinfo)
    }
}

impl<F: FileSystem + Default> Default for ZoneinfoCollector<F> {
    fn default() -> Self {
        Self::new(F::default(), DEFAULT_PROC_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::mock::MockFs;
    use crate::collector::traits::RealFs;
    use std::error::Error;

    #[test]
    fn test_collect_single_node_system() {
        let fs = MockFs::single_node_system();
        let collector = ZoneinfoCollector::new(fs, "/proc");
        let info = collector.collect().unwrap();

        assert_eq!(info.nodes.len(), 1);
        let zones: Vec<&str> = info.zones.iter().map(|z| z.zone.as_str()).collect();
        assert_eq!(zones, vec!["DMA", "DMA32", "Normal", "Movable", "Device"]);
    }

    #[test]
    fn test_collect_custom_proc_path() {
        let mut fs = MockFs::new();
        fs.add_file(
            "/host/proc/zoneinfo",
            "Node 3, zone   Normal\n  pages free 12\n",
        );
        let collector = ZoneinfoCollector::new(fs, "/host/proc");
        assert_eq!(collector.zoneinfo_path(), PathBuf::from("/host/proc/zoneinfo"));

        let info = collector.collect().unwrap();
        assert_eq!(info.zones[0].node, "3");
        assert_eq!(info.zones[0].free, Some(12));
    }

    #[test]
    fn test_collect_missing_file() {
        let collector = ZoneinfoCollector::new(MockFs::new(), "/proc");
        let err = collector.collect().unwrap_err();

        match &err {
            CollectError::Read { path, source } => {
                assert_eq!(path, &PathBuf::from("/proc/zoneinfo"));
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().contains("/proc/zoneinfo"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_collect_reads_afresh() {
        let mut fs = MockFs::new();
        fs.add_file("/proc/zoneinfo", "Node 0, zone DMA\n  pages free 1\n");
        let collector = ZoneinfoCollector::new(&fs, "/proc");
        assert_eq!(collector.collect().unwrap().zones[0].free, Some(1));

        let mut fs2 = fs.clone();
        fs2.add_file("/proc/zoneinfo", "Node 0, zone DMA\n  pages free 2\n");
        let collector = ZoneinfoCollector::new(&fs2, "/proc");
        assert_eq!(collector.collect().unwrap().zones[0].free, Some(2));
    }

    #[test]
    fn test_default_collector_uses_proc() {
        let collector: ZoneinfoCollector<RealFs> = ZoneinfoCollector::default();
        assert_eq!(collector.proc_path(), Path::new(DEFAULT_PROC_PATH));
    }

    #[test]
    fn test_parse_error_display() {
        let err = CollectError::Parse {
            path: PathBuf::from("/proc/zoneinfo"),
            message: "bad".to_string(),
        };
        assert_eq!(err.to_string(), "error parsing /proc/zoneinfo: bad");
        assert!(err.source().is_none());
    }
}
