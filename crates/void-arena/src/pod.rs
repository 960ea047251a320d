//! Plain-old-data marker for arena element types.

#![allow(unsafe_code)]

/// Types that can be viewed over arbitrary region bytes.
///
/// The arena hands out slices over memory that is zero on first use and
/// holds stale bytes after a reset, and the bulk zeroer writes raw zero
/// bytes. Both are only sound for element types where every bit pattern
/// is a valid value and no byte is padding.
///
/// # Safety
///
/// Implementors must be inhabited by every bit pattern of
/// `size_of::<Self>()` bytes (all-zero included) and contain no padding.
pub unsafe trait Pod: Copy + 'static {}

macro_rules! impl_pod {
    ($($t:ty),* $(,)?) => {
        // SAFETY: primitive integers and floats accept every bit pattern
        // and have no padding.
        $(unsafe impl Pod for $t {})*
    };
}

impl_pod!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64);

// SAFETY: arrays have no padding between elements, and each element
// accepts every bit pattern.
unsafe impl<T: Pod, const N: usize> Pod for [T; N] {}
