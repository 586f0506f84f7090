use crate::geometry::CacheGeometry;
use crate::sync::UnsafeCell;

/// Flat array of `u64` counters shared by every worker of a scenario.
///
/// The array is deliberately unsynchronized: increments are plain volatile
/// loads and stores, with no locks and no atomics, so that neighbouring
/// counters written by different threads fight over the same cache line.
/// Soundness rests on each worker of a scenario owning a distinct index.
pub struct CounterArray {
    slots: Box<[UnsafeCell<u64>]>,
}

impl CounterArray {
    pub fn new(len: usize) -> Self {
        CounterArray {
            slots: (0..len).map(|_| UnsafeCell::new(0)).collect(),
        }
    }

    /// Allocate `geometry.counter_len()` zeroed counters.
    pub fn for_geometry(geometry: &CacheGeometry) -> Self {
        Self::new(geometry.counter_len())
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Add one to the counter at `index`, wrapping on overflow.
    ///
    /// # Safety
    /// No other thread may access `index` while this call runs. Other indices,
    /// including ones on the same cache line, may be written concurrently.
    #[inline(always)]
    pub(crate) unsafe fn increment(&self, index: usize) {
        self.slots[index].with_mut(|slot| unsafe {
            slot.write_volatile(slot.read_volatile().wrapping_add(1));
        })
    }

    /// Copy the current counter values.
    ///
    /// Only meaningful between scenario runs; the harness joins all workers
    /// before handing out a shared reference.
    pub fn snapshot(&self) -> Vec<u64> {
        self.slots
            .iter()
            .map(|cell| cell.with(|slot| unsafe { slot.read_volatile() }))
            .collect()
    }

    /// Reset every counter to zero.
    ///
    /// Callers must hold the array while no worker runs; the harness only calls
    /// this through `&mut Harness`.
    pub(crate) fn clear(&self) {
        for cell in self.slots.iter() {
            cell.with_mut(|slot| unsafe { slot.write_volatile(0) });
        }
    }
}

unsafe impl Sync for CounterArray {}

unsafe impl Send for CounterArray {}
