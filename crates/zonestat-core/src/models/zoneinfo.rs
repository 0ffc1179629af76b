//! Memory-zone statistics collected from `/proc/zoneinfo`.
//!
//! The kernel prints one block per (NUMA node, zone) pair. Each block carries
//! zone-level counters and, in the first zone of every node on recent kernels,
//! a `per-node stats` sub-section with node-level counters.
//!
//! Every counter is optional: fields come and go between kernel versions and a
//! missing field must stay distinguishable from an observed zero.

use serde::{Deserialize, Serialize};

/// Counters for a single memory zone of a NUMA node.
///
/// Source: one `Node N, zone NAME` block of `/proc/zoneinfo`.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq, Default)]
#[serde(default)]
pub struct ZoneStats {
    /// NUMA node id as printed by the kernel.
    pub node: String,
    /// Zone name (DMA, DMA32, Normal, Movable, Device, ...).
    pub zone: String,

    // Watermarks, in pages.
    /// Source: `pages free N`
    pub free: Option<i64>,
    pub min: Option<i64>,
    pub low: Option<i64>,
    pub high: Option<i64>,

    // Zone sizing, in pages.
    /// Only present on old kernels.
    pub scanned: Option<i64>,
    pub spanned: Option<i64>,
    pub present: Option<i64>,
    pub managed: Option<i64>,

    // Per-zone LRU and accounting counters.
    #[serde(rename = "nr_zone_inactive_anon")]
    pub nr_inactive_anon: Option<i64>,
    #[serde(rename = "nr_zone_active_anon")]
    pub nr_active_anon: Option<i64>,
    #[serde(rename = "nr_zone_inactive_file")]
    pub nr_inactive_file: Option<i64>,
    #[serde(rename = "nr_zone_active_file")]
    pub nr_active_file: Option<i64>,
    #[serde(rename = "nr_zone_unevictable")]
    pub nr_unevictable: Option<i64>,
    #[serde(rename = "nr_zone_write_pending")]
    pub nr_write_pending: Option<i64>,
    pub nr_mlock: Option<i64>,
    pub nr_page_table_pages: Option<i64>,
    pub nr_kernel_stack: Option<i64>,
    pub nr_bounce: Option<i64>,
    pub nr_zspages: Option<i64>,
    pub nr_free_cma: Option<i64>,

    // NUMA allocation locality.
    pub numa_hit: Option<i64>,
    pub numa_miss: Option<i64>,
    pub numa_foreign: Option<i64>,
    pub numa_interleave: Option<i64>,
    pub numa_local: Option<i64>,
    pub numa_other: Option<i64>,

    /// Pages reserved against allocations targeting higher zones, indexed by
    /// zone index. Holds exactly as many entries as the kernel printed.
    ///
    /// Source: `protection: (0, 2877, 7826, 7826, 7826)`
    pub protection: Option<Vec<Option<i64>>>,
}

impl ZoneStats {
    /// Creates an empty record for the given node and zone.
    pub fn new(node: impl Into<String>, zone: impl Into<String>) -> Self {
        Self {
            node: node.into(),
            zone: zone.into(),
            ..Self::default()
        }
    }
}

/// Node-level counters from the `per-node stats` sub-section.
///
/// Source: lines following `per-node stats` inside a zone block, up to the
/// next `pages free` line.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq, Default)]
#[serde(default)]
pub struct NodeStats {
    /// NUMA node id, same string as the enclosing [`ZoneStats::node`].
    pub node: String,

    pub nr_inactive_anon: Option<i64>,
    pub nr_active_anon: Option<i64>,
    pub nr_inactive_file: Option<i64>,
    pub nr_active_file: Option<i64>,
    pub nr_unevictable: Option<i64>,
    pub nr_slab_reclaimable: Option<i64>,
    pub nr_slab_unreclaimable: Option<i64>,
    pub nr_isolated_anon: Option<i64>,
    pub nr_isolated_file: Option<i64>,

    /// Refaults of previously evicted pages.
    pub workingset_refault: Option<i64>,
    /// Refaulted pages that were immediately activated.
    pub workingset_activate: Option<i64>,
    /// Shadow nodes reclaimed.
    pub workingset_nodereclaim: Option<i64>,

    pub nr_anon_pages: Option<i64>,
    pub nr_mapped: Option<i64>,
    pub nr_file_pages: Option<i64>,
    pub nr_dirty: Option<i64>,
    pub nr_writeback: Option<i64>,
    pub nr_writeback_temp: Option<i64>,
    pub nr_shmem: Option<i64>,
    pub nr_shmem_hugepages: Option<i64>,
    pub nr_shmem_pmdmapped: Option<i64>,
    pub nr_anon_transparent_hugepages: Option<i64>,
    pub nr_unstable: Option<i64>,
    pub nr_vmscan_write: Option<i64>,
    pub nr_vmscan_immediate_reclaim: Option<i64>,
    pub nr_dirtied: Option<i64>,
    pub nr_written: Option<i64>,
}

impl NodeStats {
    /// Creates an empty record for the given node.
    pub fn new(node: impl Into<String>) -> Self {
        Self {
            node: node.into(),
            ..Self::default()
        }
    }
}

/// Parsed `/proc/zoneinfo` snapshot.
///
/// Both vectors keep block order. Node records are not de-duplicated: a node
/// whose sub-section appears in several zone blocks yields one record each.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq, Default)]
pub struct Zoneinfo {
    pub nodes: Vec<NodeStats>,
    pub zones: Vec<ZoneStats>,
}

impl Zoneinfo {
    /// Returns true if no block was recognized.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.zones.is_empty()
    }

    /// Zones belonging to `node`, in block order.
    pub fn zones_for_node<'a>(&'a self, node: &'a str) -> impl Iterator<Item = &'a ZoneStats> {
        self.zones.iter().filter(move |z| z.node == node)
    }

    /// First node-level record emitted for `node`.
    pub fn node_stats(&self, node: &str) -> Option<&NodeStats> {
        self.nodes.iter().find(|n| n.node == node)
    }
}
