//! Bulk zero-fill with non-temporal vector stores.
//!
//! A buffer is split into three parts:
//!
//! ```text
//! [ head: scalar ][ body: N × vector-width streaming stores ][ tail: scalar ]
//!                 ^ first vector-aligned address
//! ```
//!
//! The body is written with cache-bypassing stores, which suits write-once
//! bulk fills. Streaming stores are weakly ordered, so every routine that
//! issues them ends with an `sfence` before returning; callers can rely on
//! the zeroes being globally visible once the call returns.

#![allow(unsafe_code)]

use crate::pod::Pod;

/// How the body of a buffer is zeroed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ZeroStrategy {
    /// 32-byte `vmovntdq` stores (AVX2).
    Avx2Stream,
    /// 16-byte `movntdq` stores (SSE2).
    Sse2Stream,
    /// Ordinary stores; the compiler is free to vectorise them.
    Portable,
}

impl ZeroStrategy {
    /// The widest strategy supported by the running CPU.
    pub fn detect() -> Self {
        #[cfg(target_arch = "x86_64")]
        {
            if std::is_x86_feature_detected!("avx2") {
                Self::Avx2Stream
            } else {
                Self::Sse2Stream
            }
        }
        #[cfg(not(target_arch = "x86_64"))]
        {
            Self::Portable
        }
    }

    /// Whether this strategy can run on the current CPU.
    pub fn is_supported(self) -> bool {
        match self {
            #[cfg(target_arch = "x86_64")]
            Self::Avx2Stream => std::is_x86_feature_detected!("avx2"),
            // SSE2 is part of the x86_64 baseline.
            #[cfg(target_arch = "x86_64")]
            Self::Sse2Stream => true,
            #[cfg(not(target_arch = "x86_64"))]
            Self::Avx2Stream | Self::Sse2Stream => false,
            Self::Portable => true,
        }
    }

    /// Width in bytes of one streaming store, or 0 for [`Portable`](Self::Portable).
    pub fn vector_bytes(self) -> usize {
        match self {
            Self::Avx2Stream => 32,
            Self::Sse2Stream => 16,
            Self::Portable => 0,
        }
    }
}

/// Zero every element of `buf` using the best strategy for this CPU.
pub fn zero_fill<T: Pod>(buf: &mut [T]) {
    zero_fill_with(ZeroStrategy::detect(), buf);
}

/// Zero every element of `buf` using `strategy`.
///
/// Falls back to [`ZeroStrategy::Portable`] when `strategy` is not
/// supported. Only the bytes of `buf` are written.
pub fn zero_fill_with<T: Pod>(strategy: ZeroStrategy, buf: &mut [T]) {
    let len = std::mem::size_of_val(buf);
    if len == 0 {
        return;
    }
    // SAFETY: `T: Pod` has no padding, so the slice covers exactly `len`
    // initialised bytes, and all-zero bytes form a valid `T`.
    let bytes = unsafe { std::slice::from_raw_parts_mut(buf.as_mut_ptr().cast::<u8>(), len) };

    let strategy = if strategy.is_supported() {
        strategy
    } else {
        ZeroStrategy::Portable
    };

    match strategy {
        #[cfg(target_arch = "x86_64")]
        ZeroStrategy::Avx2Stream => {
            let (head, body, tail) = split(bytes, 32);
            head.fill(0);
            // SAFETY: AVX2 support was checked above; `body` is 32-byte
            // aligned and a whole number of 32-byte chunks.
            unsafe { x86::stream_avx2(body) };
            tail.fill(0);
        }
        #[cfg(target_arch = "x86_64")]
        ZeroStrategy::Sse2Stream => {
            let (head, body, tail) = split(bytes, 16);
            head.fill(0);
            // SAFETY: SSE2 is baseline on x86_64; `body` is 16-byte aligned
            // and a whole number of 16-byte chunks.
            unsafe { x86::stream_sse2(body) };
            tail.fill(0);
        }
        _ => bytes.fill(0),
    }
}

/// Head/body/tail byte counts for a buffer at `addr` of `len` bytes.
#[cfg_attr(not(target_arch = "x86_64"), allow(dead_code))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Plan {
    head: usize,
    body: usize,
    tail: usize,
}

#[cfg_attr(not(target_arch = "x86_64"), allow(dead_code))]
fn plan(addr: usize, len: usize, width: usize) -> Plan {
    debug_assert!(width.is_power_of_two());
    let to_boundary = width.wrapping_sub(addr & (width - 1)) & (width - 1);
    let head = to_boundary.min(len);
    let rest = len - head;
    let body = rest - rest % width;
    Plan {
        head,
        body,
        tail: rest - body,
    }
}

#[cfg_attr(not(target_arch = "x86_64"), allow(dead_code))]
fn split(bytes: &mut [u8], width: usize) -> (&mut [u8], &mut [u8], &mut [u8]) {
    let p = plan(bytes.as_ptr() as usize, bytes.len(), width);
    let (head, rest) = bytes.split_at_mut(p.head);
    let (body, tail) = rest.split_at_mut(p.body);
    (head, body, tail)
}

#[cfg(target_arch = "x86_64")]
mod x86 {
    use std::arch::x86_64::{
        __m128i, __m256i, _mm256_setzero_si256, _mm256_stream_si256, _mm_setzero_si128,
        _mm_sfence, _mm_stream_si128,
    };

    /// # Safety
    ///
    /// The CPU must support AVX2. `body` must start on a 32-byte boundary
    /// and its length must be a multiple of 32.
    #[target_feature(enable = "avx2")]
    pub(super) unsafe fn stream_avx2(body: &mut [u8]) {
        // A head-only split leaves an empty body at an unaligned address.
        if body.is_empty() {
            return;
        }
        debug_assert_eq!(body.as_ptr() as usize % 32, 0);
        debug_assert_eq!(body.len() % 32, 0);
        let zero = _mm256_setzero_si256();
        for chunk in body.chunks_exact_mut(32) {
            // SAFETY: each chunk is 32 writable bytes on a 32-byte boundary.
            unsafe { _mm256_stream_si256(chunk.as_mut_ptr().cast::<__m256i>(), zero) };
        }
        _mm_sfence();
    }

    /// # Safety
    ///
    /// `body` must start on a 16-byte boundary and its length must be a
    /// multiple of 16.
    #[target_feature(enable = "sse2")]
    pub(super) unsafe fn stream_sse2(body: &mut [u8]) {
        // A head-only split leaves an empty body at an unaligned address.
        if body.is_empty() {
            return;
        }
        debug_assert_eq!(body.as_ptr() as usize % 16, 0);
        debug_assert_eq!(body.len() % 16, 0);
        let zero = _mm_setzero_si128();
        for chunk in body.chunks_exact_mut(16) {
            // SAFETY: each chunk is 16 writable bytes on a 16-byte boundary.
            unsafe { _mm_stream_si128(chunk.as_mut_ptr().cast::<__m128i>(), zero) };
        }
        _mm_sfence();
    }
}
