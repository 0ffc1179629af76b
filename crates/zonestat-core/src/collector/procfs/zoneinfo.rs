//! Parser for `/proc/zoneinfo`.
//!
//! Format (abridged):
//!
//! ```text
//! Node 0, zone      DMA
//!   per-node stats
//!       nr_inactive_anon 230981
//!       ...
//!   pages free     3952
//!         min      33
//!         ...
//!         protection: (0, 2877, 7826, 7826, 7826)
//!       nr_free_pages 3952
//!       ...
//! Node 0, zone    DMA32
//!   pages free     204252
//!   ...
//! ```
//!
//! The content is split on `"\nNode"`, which eats the `Node` word of every
//! header except the first one. The header pattern therefore only anchors on
//! `<digits>, zone <name>` and accepts any leading text.
//!
//! Inside a block the parser alternates between zone-level and node-level
//! lines: `per-node stats` switches to node mode, `pages free` switches back.
//! Unknown fields and malformed values are dropped silently, since the field
//! set varies between kernel versions.

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use crate::collector::procfs::parser::{ParseError, parse_pint64, parse_pint64s};
use crate::models::{NodeStats, ZoneStats, Zoneinfo};

const BLOCK_DELIMITER: &str = "\nNode";
const NODE_STATS_SENTINEL: &str = "per-node stats";
const PAGES_FREE_PREFIX: &str = "pages free";

static NODE_ZONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?-u)(\d+), zone\s+(\w+)").expect("node/zone header pattern is valid")
});

/// Which record the current body line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineMode {
    Zone,
    Node,
}

impl NodeStats {
    /// Applies one `name value` line of the per-node sub-section.
    ///
    /// Lines with fewer than two tokens and unknown names are ignored.
    pub fn parse_line(&mut self, line: &str) {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 2 {
            return;
        }
        let value = parse_pint64(parts[1]);

        match parts[0] {
            "nr_inactive_anon" => self.nr_inactive_anon = value,
            "nr_active_anon" => self.nr_active_anon = value,
            "nr_inactive_file" => self.nr_inactive_file = value,
            "nr_active_file" => self.nr_active_file = value,
            "nr_unevictable" => self.nr_unevictable = value,
            "nr_slab_reclaimable" => self.nr_slab_reclaimable = value,
            "nr_slab_unreclaimable" => self.nr_slab_unreclaimable = value,
            "nr_isolated_anon" => self.nr_isolated_anon = value,
            "nr_isolated_file" => self.nr_isolated_file = value,
            "workingset_refault" => self.workingset_refault = value,
            "workingset_activate" => self.workingset_activate = value,
            "workingset_nodereclaim" => self.workingset_nodereclaim = value,
            "nr_anon_pages" => self.nr_anon_pages = value,
            "nr_mapped" => self.nr_mapped = value,
            "nr_file_pages" => self.nr_file_pages = value,
            "nr_dirty" => self.nr_dirty = value,
            "nr_writeback" => self.nr_writeback = value,
            "nr_writeback_temp" => self.nr_writeback_temp = value,
            "nr_shmem" => self.nr_shmem = value,
            "nr_shmem_hugepages" => self.nr_shmem_hugepages = value,
            "nr_shmem_pmdmapped" => self.nr_shmem_pmdmapped = value,
            "nr_anon_transparent_hugepages" => self.nr_anon_transparent_hugepages = value,
            "nr_unstable" => self.nr_unstable = value,
            "nr_vmscan_write" => self.nr_vmscan_write = value,
            "nr_vmscan_immediate_reclaim" => self.nr_vmscan_immediate_reclaim = value,
            "nr_dirtied" => self.nr_dirtied = value,
            "nr_written" => self.nr_written = value,
            _ => {}
        }
    }
}

impl ZoneStats {
    /// Applies one line of the zone section.
    ///
    /// `pages free N` takes its value from the third token and `protection:`
    /// carries a list; every other field is `name value`.
    pub fn parse_line(&mut self, line: &str) {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 2 {
            return;
        }

        if parts[0] == "pages" && parts[1] == "free" {
            self.free = parts.get(2).and_then(|s| parse_pint64(s));
            return;
        }

        if parts[0] == "protection:" {
            if let Some(values) = parse_protection(line) {
                self.protection = Some(values);
            }
            return;
        }

        let value = parse_pint64(parts[1]);

        match parts[0] {
            "min" => self.min = value,
            "low" => self.low = value,
            "high" => self.high = value,
            "scanned" => self.scanned = value,
            "spanned" => self.spanned = value,
            "present" => self.present = value,
            "managed" => self.managed = value,
            "nr_zone_inactive_anon" => self.nr_inactive_anon = value,
            "nr_zone_active_anon" => self.nr_active_anon = value,
            "nr_zone_inactive_file" => self.nr_inactive_file = value,
            "nr_zone_active_file" => self.nr_active_file = value,
            "nr_zone_unevictable" => self.nr_unevictable = value,
            "nr_zone_write_pending" => self.nr_write_pending = value,
            "nr_mlock" => self.nr_mlock = value,
            "nr_page_table_pages" => self.nr_page_table_pages = value,
            "nr_kernel_stack" => self.nr_kernel_stack = value,
            "nr_bounce" => self.nr_bounce = value,
            "nr_zspages" => self.nr_zspages = value,
            "nr_free_cma" => self.nr_free_cma = value,
            "numa_hit" => self.numa_hit = value,
            "numa_miss" => self.numa_miss = value,
            "numa_foreign" => self.numa_foreign = value,
            "numa_interleave" => self.numa_interleave = value,
            "numa_local" => self.numa_local = value,
            "numa_other" => self.numa_other = value,
            _ => {}
        }
    }
}

/// Parses `protection: (a, b, c)` into its values.
///
/// Returns `None` if any element is malformed; a partial list is never kept.
fn parse_protection(line: &str) -> Option<Vec<Option<i64>>> {
    let values = line.split(':').nth(1)?;
    let values = values.replacen('(', "", 1).replacen(')', "", 1);
    let tokens: Vec<&str> = values.trim().split(", ").collect();

    match parse_pint64s(&tokens) {
        Ok(values) => Some(values),
        Err(e) => {
            trace!(error = %e, "discarding protection list");
            None
        }
    }
}

/// Extracts `(node, zone)` from a block header.
fn parse_header(header: &str) -> Option<(&str, &str)> {
    let caps = NODE_ZONE_RE.captures(header)?;
    Some((caps.get(1)?.as_str(), caps.get(2)?.as_str()))
}

/// Parses `/proc/zoneinfo` content.
///
/// Blocks with an unrecognized header are skipped. Every recognized block
/// yields one [`ZoneStats`], plus one [`NodeStats`] if it contains a
/// `per-node stats` sub-section.
pub fn parse_zoneinfo(content: &str) -> Result<Zoneinfo, ParseError> {
    let mut zoneinfo = Zoneinfo::default();

    for block in content.split(BLOCK_DELIMITER) {
        let lines: Vec<&str> = block.split('\n').collect();
        if lines.len() < 2 {
            trace!(block = block, "skipping zoneinfo block without body");
            continue;
        }
        let (header, body) = (lines[0], &lines[1..]);

        let Some((node, zone)) = parse_header(header) else {
            trace!(header = header, "skipping zoneinfo block with unrecognized header");
            continue;
        };

        let mut zone_stats = ZoneStats::new(node, zone);
        let mut node_stats: Option<NodeStats> = None;
        let mut mode = LineMode::Zone;

        for line in body {
            let line = line.trim();

            if line.starts_with(NODE_STATS_SENTINEL) {
                mode = LineMode::Node;
                node_stats = Some(NodeStats::new(node));
                continue;
            } else if line.starts_with(PAGES_FREE_PREFIX) {
                mode = LineMode::Zone;
            }

            match (mode, node_stats.as_mut()) {
                (LineMode::Node, Some(stats)) => stats.parse_line(line),
                _ => zone_stats.parse_line(line),
            }
        }

        if let Some(stats) = node_stats {
            zoneinfo.nodes.push(stats);
        }
        zoneinfo.zones.push(zone_stats);
    }

    Ok(zoneinfo)
}
