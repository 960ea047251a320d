//! Guard-band fixtures for bulk-write tests.

use crate::{all_sentinel, all_zero, fill_sentinel};

/// Element counts that cover the head/body/tail cases of a 32-byte
/// streaming zero over `i32` slots: empty, head-only, one short of a
/// chunk, exactly one chunk, chunk plus tail, and large mixed buffers.
pub const ZERO_FILL_SIZES: &[usize] = &[0, 1, 7, 8, 9, 31, 32, 33, 10_000_000];

/// A slice split into `[guard | target | guard]`, all filled with the
/// sentinel on construction.
///
/// Write into [`target`](Self::target), then check
/// [`guards_intact`](Self::guards_intact) to prove nothing spilled over.
pub struct GuardedBuffer<'a> {
    buf: &'a mut [i32],
    guard: usize,
}

impl<'a> GuardedBuffer<'a> {
    /// Wrap `buf`, reserving `guard` slots at each end.
    ///
    /// # Panics
    ///
    /// Panics if `buf` is shorter than `2 * guard`.
    pub fn new(buf: &'a mut [i32], guard: usize) -> Self {
        assert!(
            buf.len() >= 2 * guard,
            "buffer of {} slots cannot hold two guards of {guard}",
            buf.len()
        );
        fill_sentinel(buf);
        Self { buf, guard }
    }

    /// Number of slots a backing slice needs for a target of `len`.
    pub fn backing_len(len: usize, guard: usize) -> usize {
        len + 2 * guard
    }

    /// The region under test.
    pub fn target(&mut self) -> &mut [i32] {
        let end = self.buf.len() - self.guard;
        &mut self.buf[self.guard..end]
    }

    /// Whether both guard bands still hold the sentinel.
    pub fn guards_intact(&self) -> bool {
        let end = self.buf.len() - self.guard;
        all_sentinel(&self.buf[..self.guard]) && all_sentinel(&self.buf[end..])
    }

    /// Whether the target region reads back as all zero.
    pub fn target_is_zero(&self) -> bool {
        let end = self.buf.len() - self.guard;
        all_zero(&self.buf[self.guard..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_fills_everything_with_sentinel() {
        let mut backing = vec![0; GuardedBuffer::backing_len(4, 2)];
        let mut g = GuardedBuffer::new(&mut backing, 2);
        assert_eq!(g.target().len(), 4);
        assert!(g.guards_intact());
        assert!(!g.target_is_zero());
    }

    #[test]
    fn detects_spill_into_guard() {
        let mut backing = vec![0; 8];
        {
            let mut g = GuardedBuffer::new(&mut backing, 2);
            g.target().fill(0);
            assert!(g.target_is_zero());
            assert!(g.guards_intact());
        }
        backing[6] = 0;
        let g = GuardedBuffer { buf: &mut backing, guard: 2 };
        assert!(!g.guards_intact());
    }

    #[test]
    #[should_panic(expected = "cannot hold two guards")]
    fn rejects_undersized_backing() {
        let mut backing = vec![0; 3];
        let _ = GuardedBuffer::new(&mut backing, 2);
    }
}
