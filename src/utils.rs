use crate::constants::COUNTER_SIZE;

#[inline(always)]
pub fn byte_offset(index: usize) -> usize {
    index * COUNTER_SIZE
}

#[inline(always)]
pub fn cache_line_of(index: usize, cache_line_size: usize) -> usize {
    byte_offset(index) / cache_line_size
}
