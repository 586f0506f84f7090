use crate::constants::DISJOINT_STRIDE_LINES;
use crate::error::{Error, Result};
use crate::utils;
use cache_size::CacheType;
use crossbeam_utils::CachePadded;
use log::{debug, warn};
use std::fmt;

/// Linux exposes the L1 data cache line size here.
const SYSFS_LINE_SIZE: &str = "/sys/devices/system/cpu/cpu0/cache/index0/coherency_line_size";

/// Cache line size and logical core count of the host.
///
/// Computed once before any worker starts and passed by value into the
/// [`Harness`](crate::harness::Harness). Never mutated afterwards.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CacheGeometry {
    cache_line_size: usize,
    core_count: usize,
}

impl CacheGeometry {
    /// Build a geometry from explicit values.
    ///
    /// Both values must be positive and the resulting counter array length must
    /// fit in `usize`.
    pub fn new(cache_line_size: usize, core_count: usize) -> Result<Self> {
        let invalid = || Error::InvalidGeometry { cache_line_size, core_count };
        if cache_line_size == 0 || core_count == 0 {
            return Err(invalid());
        }

        cache_line_size
            .checked_mul(DISJOINT_STRIDE_LINES)
            .and_then(|stride| stride.checked_mul(core_count))
            .and_then(|len| len.checked_add(1))
            .ok_or_else(invalid)?;

        Ok(Self { cache_line_size, core_count })
    }

    /// Detect the geometry of the current host.
    ///
    /// The cache line size is the L1 data cache line reported by the CPU, see
    /// [`host_cache_line_size`]. The core count is the parallelism available to
    /// this process. Failing to query it is fatal for the benchmark and is
    /// returned as [`Error::Probe`].
    pub fn probe() -> Result<Self> {
        let cache_line_size = host_cache_line_size();
        let core_count = std::thread::available_parallelism()
            .map_err(Error::Probe)?
            .get();

        debug!("probed cache geometry: cache_line_size={cache_line_size} core_count={core_count}");
        Self::new(cache_line_size, core_count)
    }

    pub fn cache_line_size(&self) -> usize {
        self.cache_line_size
    }

    pub fn core_count(&self) -> usize {
        self.core_count
    }

    /// Length of the shared counter array: `cache_line_size * 4 * core_count + 1`.
    pub fn counter_len(&self) -> usize {
        self.disjoint_stride() * self.core_count + 1
    }

    /// Distance, in counters, between two neighbouring workers of the disjoint scenario.
    pub fn disjoint_stride(&self) -> usize {
        self.cache_line_size * DISJOINT_STRIDE_LINES
    }

    #[inline]
    pub fn disjoint_index(&self, worker: usize) -> usize {
        worker * self.disjoint_stride()
    }

    #[inline]
    pub fn shared_index(&self, worker: usize) -> usize {
        worker
    }

    /// Cache line, counted from the start of the counter array, that holds `index`.
    pub fn cache_line_of(&self, index: usize) -> usize {
        utils::cache_line_of(index, self.cache_line_size)
    }
}

/// Line size of the host's L1 data cache in bytes.
///
/// Asks the CPU first (`cpuid` on x86), then the Linux sysfs cache topology.
/// When neither answers, falls back to the alignment `crossbeam-utils` uses for
/// [`CachePadded`] on the target architecture, which may be twice the real line.
pub fn host_cache_line_size() -> usize {
    if let Some(size) = cache_size::cache_line_size(1, CacheType::Data).filter(|&s| s > 0) {
        return size;
    }
    if let Some(size) = sysfs_cache_line_size() {
        debug!("cache line size read from {SYSFS_LINE_SIZE}");
        return size;
    }

    let fallback = align_of::<CachePadded<u8>>();
    warn!("could not detect the cache line size, assuming {fallback} bytes");
    fallback
}

fn sysfs_cache_line_size() -> Option<usize> {
    parse_line_size(&std::fs::read_to_string(SYSFS_LINE_SIZE).ok()?)
}

fn parse_line_size(raw: &str) -> Option<usize> {
    raw.trim().parse::<usize>().ok().filter(|&size| size > 0)
}

impl fmt::Display for CacheGeometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Cache line size bytes: {} -- CPUs num: {}",
            self.cache_line_size, self.core_count
        )
    }
}
