//! Pre-built mock filesystem scenarios for testing.
//!
//! These scenarios provide realistic `/proc/zoneinfo` contents for the
//! layouts collectors have to cope with.

use super::filesystem::MockFs;

/// Single NUMA node, five zones, per-node stats in the DMA block (4.x kernel).
const SINGLE_NODE_ZONEINFO: &str = "\
Node 0, zone      DMA
  per-node stats
      nr_inactive_anon 230981
      nr_active_anon 547580
      nr_inactive_file 316904
      nr_active_file 346282
      nr_unevictable 115467
      nr_slab_reclaimable 131220
      nr_slab_unreclaimable 47320
      nr_isolated_anon 0
      nr_isolated_file 0
      workingset_nodes 11627
      workingset_refault 466886
      workingset_activate 276925
      workingset_restore 84055
      workingset_nodereclaim 487
      nr_anon_pages 795576
      nr_mapped     215483
      nr_file_pages 761874
      nr_dirty      908
      nr_writeback  0
      nr_writeback_temp 0
      nr_shmem      224925
      nr_shmem_hugepages 0
      nr_shmem_pmdmapped 0
      nr_anon_transparent_hugepages 0
      nr_unstable   0
      nr_vmscan_write 12950
      nr_vmscan_immediate_reclaim 3033
      nr_dirtied    8007423
      nr_written    7752121
      nr_kernel_misc_reclaimable 0
  pages free     3952
        min      33
        low      41
        high     49
        spanned  4095
        present  3975
        managed  3956
        protection: (0, 2877, 7826, 7826, 7826)
      nr_free_pages 3952
      nr_zone_inactive_anon 0
      nr_zone_active_anon 0
      nr_zone_inactive_file 0
      nr_zone_active_file 0
      nr_zone_unevictable 0
      nr_zone_write_pending 0
      nr_mlock     0
      nr_page_table_pages 0
      nr_kernel_stack 0
      nr_bounce    0
      nr_zspages   0
      nr_free_cma  0
      numa_hit     1
      numa_miss    0
      numa_foreign 0
      numa_interleave 0
      numa_local   1
      numa_other   0
  pagesets
    cpu: 0
              count: 0
              high:  0
              batch: 1
  vm stats threshold: 8
    cpu: 1
              count: 0
              high:  0
              batch: 1
  vm stats threshold: 8
  node_unreclaimable:  0
  start_pfn:           1
Node 0, zone    DMA32
  pages free     204252
        min      19510
        low      21059
        high     22608
        spanned  1044480
        present  759231
        managed  742806
        protection: (0, 0, 4949, 4949, 4949)
      nr_free_pages 204252
      nr_zone_inactive_anon 118558
      nr_zone_active_anon 106598
      nr_zone_inactive_file 75475
      nr_zone_active_file 70293
      nr_zone_unevictable 66195
      nr_zone_write_pending 64
      nr_mlock     4
      nr_page_table_pages 1756
      nr_kernel_stack 2208
      nr_bounce    0
      nr_zspages   0
      nr_free_cma  0
      numa_hit     113952967
      numa_miss    0
      numa_foreign 0
      numa_interleave 0
      numa_local   113952967
      numa_other   0
  pagesets
    cpu: 0
              count: 345
              high:  378
              batch: 63
  vm stats threshold: 48
  node_unreclaimable:  0
  start_pfn:           4096
Node 0, zone   Normal
  pages free     18553
        min      11176
        low      13842
        high     16508
        spanned  1308160
        present  1308160
        managed  1268711
        protection: (0, 0, 0, 0, 0)
      nr_free_pages 18553
      nr_zone_inactive_anon 112423
      nr_zone_active_anon 440982
      nr_zone_inactive_file 241429
      nr_zone_active_file 275989
      nr_zone_unevictable 49272
      nr_zone_write_pending 844
      nr_mlock     154
      nr_page_table_pages 9750
      nr_kernel_stack 15136
      nr_bounce    0
      nr_zspages   0
      nr_free_cma  0
      numa_hit     162718019
      numa_miss    0
      numa_foreign 0
      numa_interleave 26812
      numa_local   162718019
      numa_other   0
  pagesets
    cpu: 0
              count: 316
              high:  378
              batch: 63
  vm stats threshold: 56
  node_unreclaimable:  0
  start_pfn:           1048576
Node 0, zone  Movable
  pages free     0
        min      0
        low      0
        high     0
        spanned  0
        present  0
        managed  0
        protection: (0, 0, 0, 0, 0)
Node 0, zone   Device
  pages free     0
        min      0
        low      0
        high     0
        spanned  0
        present  0
        managed  0
        protection: (0, 0, 0, 0, 0)
";

/// Two NUMA nodes, each carrying per-node stats in its first zone.
const TWO_NODE_ZONEINFO: &str = "\
Node 0, zone      DMA
  per-node stats
      nr_inactive_anon 1200
      nr_active_anon 3400
      nr_dirty      12
      nr_written    9001
  pages free     3968
        min      5
        low      8
        high     11
        spanned  4095
        present  3998
        managed  3968
        protection: (0, 1836, 15842, 15842)
      nr_free_pages 3968
      numa_hit     0
      numa_local   0
  pagesets
    cpu: 0
              count: 0
              high:  0
              batch: 1
  node_unreclaimable:  0
  start_pfn:           1
Node 0, zone   Normal
  pages free     812345
        min      8211
        low      10263
        high     12315
        spanned  3670016
        present  3670016
        managed  3585232
        protection: (0, 0, 0, 0)
      nr_free_pages 812345
      numa_hit     99112233
      numa_miss    1024
      numa_foreign 2048
      numa_local   99000000
      numa_other   112233
Node 1, zone   Normal
  per-node stats
      nr_inactive_anon 5600
      nr_active_anon 7800
      nr_dirty      34
      nr_written    12345
  pages free     1048576
        min      11285
        low      14106
        high     16927
        spanned  4194304
        present  4194304
        managed  4124540
        protection: (0, 0, 0, 0)
      nr_free_pages 1048576
      numa_hit     55443322
      numa_miss    2048
      numa_foreign 1024
      numa_local   55000000
      numa_other   443322
";

/// 3.x kernel layout: no per-node sub-section, `scanned` present, four zones.
const LEGACY_KERNEL_ZONEINFO: &str = "\
Node 0, zone      DMA
  pages free     3975
        min      33
        low      41
        high     49
        scanned  0
        spanned  4095
        present  3994
        managed  3975
    nr_free_pages 3975
    nr_inactive_anon 0
    nr_mlock     0
    numa_hit     2
        protection: (0, 2815, 7812, 7812)
  pagesets
    cpu: 0
              count: 0
              high:  0
              batch: 1
  vm stats threshold: 8
  all_unreclaimable: 1
  start_pfn:         1
  inactive_ratio:    1
Node 0, zone    DMA32
  pages free     61218
        min      6236
        low      7795
        high     9354
        scanned  0
        spanned  1044480
        present  782288
        managed  720986
    nr_free_pages 61218
    nr_mlock     0
    numa_hit     51277331
        protection: (0, 0, 4996, 4996)
";

#[allow(dead_code)]
impl MockFs {
    /// Creates a single-node system with DMA, DMA32, Normal, Movable and
    /// Device zones. Only the DMA block carries per-node stats.
    pub fn single_node_system() -> Self {
        let mut fs = Self::new();
        fs.add_file("/proc/zoneinfo", SINGLE_NODE_ZONEINFO);
        fs
    }

    /// Creates a two-node NUMA system. Node 0 has DMA and Normal zones,
    /// node 1 only Normal; each node's first zone has per-node stats.
    pub fn two_node_system() -> Self {
        let mut fs = Self::new();
        fs.add_file("/proc/zoneinfo", TWO_NODE_ZONEINFO);
        fs
    }

    /// Creates a system running an old kernel without the per-node
    /// sub-section.
    pub fn legacy_kernel() -> Self {
        let mut fs = Self::new();
        fs.add_file("/proc/zoneinfo", LEGACY_KERNEL_ZONEINFO);
        fs
    }

    /// Creates a system whose zoneinfo file is empty.
    pub fn empty_zoneinfo() -> Self {
        let mut fs = Self::new();
        fs.add_file("/proc/zoneinfo", "");
        fs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::procfs::parse_zoneinfo;
    use crate::collector::traits::FileSystem;
    use crate::models::{NodeStats, ZoneStats};
    use std::path::Path;

    fn zoneinfo(fs: &MockFs) -> crate::models::Zoneinfo {
        let content = fs.read_to_string(Path::new("/proc/zoneinfo")).unwrap();
        parse_zoneinfo(&content).unwrap()
    }

    #[test]
    fn test_single_node_system() {
        let info = zoneinfo(&MockFs::single_node_system());

        let expected_node = NodeStats {
            node: "0".to_string(),
            nr_inactive_anon: Some(230981),
            nr_active_anon: Some(547580),
            nr_inactive_file: Some(316904),
            nr_active_file: Some(346282),
            nr_unevictable: Some(115467),
            nr_slab_reclaimable: Some(131220),
            nr_slab_unreclaimable: Some(47320),
            nr_isolated_anon: Some(0),
            nr_isolated_file: Some(0),
            workingset_refault: Some(466886),
            workingset_activate: Some(276925),
            workingset_nodereclaim: Some(487),
            nr_anon_pages: Some(795576),
            nr_mapped: Some(215483),
            nr_file_pages: Some(761874),
            nr_dirty: Some(908),
            nr_writeback: Some(0),
            nr_writeback_temp: Some(0),
            nr_shmem: Some(224925),
            nr_shmem_hugepages: Some(0),
            nr_shmem_pmdmapped: Some(0),
            nr_anon_transparent_hugepages: Some(0),
            nr_unstable: Some(0),
            nr_vmscan_write: Some(12950),
            nr_vmscan_immediate_reclaim: Some(3033),
            nr_dirtied: Some(8007423),
            nr_written: Some(7752121),
        };
        assert_eq!(info.nodes, vec![expected_node]);
        assert_eq!(info.zones.len(), 5);

        let dma32 = &info.zones[1];
        assert_eq!(dma32.zone, "DMA32");
        assert_eq!(dma32.free, Some(204252));
        assert_eq!(dma32.min, Some(19510));
        assert_eq!(dma32.nr_inactive_anon, Some(118558));
        assert_eq!(dma32.nr_write_pending, Some(64));
        assert_eq!(dma32.nr_kernel_stack, Some(2208));
        assert_eq!(dma32.numa_hit, Some(113952967));
        assert_eq!(
            dma32.protection,
            Some(vec![Some(0), Some(0), Some(4949), Some(4949), Some(4949)])
        );

        let zero = || Some(0);
        let movable = ZoneStats {
            free: zero(),
            min: zero(),
            low: zero(),
            high: zero(),
            spanned: zero(),
            present: zero(),
            managed: zero(),
            protection: Some(vec![Some(0); 5]),
            ..ZoneStats::new("0", "Movable")
        };
        assert_eq!(info.zones[3], movable);
        assert_eq!(info.zones[4].zone, "Device");
    }

    #[test]
    fn test_two_node_system() {
        let info = zoneinfo(&MockFs::two_node_system());

        let nodes: Vec<&str> = info.nodes.iter().map(|n| n.node.as_str()).collect();
        assert_eq!(nodes, vec!["0", "1"]);
        let zones: Vec<(&str, &str)> = info
            .zones
            .iter()
            .map(|z| (z.node.as_str(), z.zone.as_str()))
            .collect();
        assert_eq!(zones, vec![("0", "DMA"), ("0", "Normal"), ("1", "Normal")]);

        assert_eq!(info.node_stats("1").unwrap().nr_written, Some(12345));
        assert_eq!(info.zones[2].numa_miss, Some(2048));
        assert_eq!(info.zones[0].protection.as_ref().map(Vec::len), Some(4));
    }

    #[test]
    fn test_legacy_kernel() {
        let info = zoneinfo(&MockFs::legacy_kernel());

        assert!(info.nodes.is_empty());
        assert_eq!(info.zones.len(), 2);
        let dma = &info.zones[0];
        assert_eq!(dma.scanned, Some(0));
        assert_eq!(dma.nr_mlock, Some(0));
        assert_eq!(dma.numa_hit, Some(2));
        // nr_inactive_anon is not a zone-level name
        assert_eq!(dma.nr_inactive_anon, None);
        assert_eq!(
            dma.protection,
            Some(vec![Some(0), Some(2815), Some(7812), Some(7812)])
        );
    }

    #[test]
    fn test_empty_zoneinfo() {
        assert!(zoneinfo(&MockFs::empty_zoneinfo()).is_empty());
    }
}
