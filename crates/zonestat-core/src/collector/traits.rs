//! Filesystem abstraction used by collectors.
//!
//! Collectors never touch `std::fs` directly. They go through [`FileSystem`],
//! so the same parsing path runs against the real `/proc` in production and
//! against [`MockFs`](crate::collector::MockFs) fixtures in tests.

use std::io;
use std::path::Path;

/// Read-only view of a filesystem.
pub trait FileSystem {
    /// Reads the whole file at `path` into a string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

/// Filesystem backed by the host operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealFs;

impl RealFs {
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for RealFs {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }
}

impl<F: FileSystem + ?Sized> FileSystem for &F {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        (**self).read_to_string(path)
    }
}
