/// Number of cache lines placed between two workers in the disjoint-access scenario.
///
/// Worker `i` touches counter `i * cache_line_size * DISJOINT_STRIDE_LINES`. The stride is
/// counted in elements, so with 8-byte counters consecutive workers land
/// `8 * DISJOINT_STRIDE_LINES` cache lines apart, never on the same line.
pub const DISJOINT_STRIDE_LINES: usize = 4;

/// Size of a single counter slot in bytes.
///
/// Counters are `u64`, so this is 8 on every target.
///
/// # Examples
///
/// ```
/// # use false_sharing::constants::COUNTER_SIZE;
/// assert_eq!(COUNTER_SIZE, 8);
/// ```
pub const COUNTER_SIZE: usize = size_of::<u64>();

/// Increments performed by every worker when nothing else is configured.
pub const DEFAULT_ITERATION_COUNT: u64 = 100_000_000;

/// Environment variable read by [`HarnessConfig::from_env`](crate::config::HarnessConfig::from_env).
pub const ITERATION_COUNT_ENV: &str = "FALSE_SHARING_ITERATIONS";
