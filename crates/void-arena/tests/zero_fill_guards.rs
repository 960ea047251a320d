//! Integration test: bulk zero-fill over arena memory with guard bands.
//!
//! Every target buffer sits between two sentinel-filled guard bands carved
//! from the same arena allocation, so any store outside the target range
//! shows up as a clobbered guard.

use void_arena::{Arena, ArenaConfig, ZeroStrategy};
use void_test_utils::{first_nonzero, GuardedBuffer, ZERO_FILL_SIZES};

const GUARD: usize = 16;
const CAPACITY: usize = 64 << 20;

fn strategies() -> Vec<ZeroStrategy> {
    [
        ZeroStrategy::Avx2Stream,
        ZeroStrategy::Sse2Stream,
        ZeroStrategy::Portable,
    ]
    .into_iter()
    .filter(|s| s.is_supported())
    .collect()
}

/// Zero a guarded buffer of `n` ints whose start is shifted by `skew`
/// ints from the region base.
fn check(arena: &mut Arena, n: usize, skew: usize) {
    arena.reset();
    if skew > 0 {
        arena.allocate::<i32>(skew).unwrap();
    }
    let backing = arena
        .allocate::<i32>(GuardedBuffer::backing_len(n, GUARD))
        .unwrap();
    let mut guarded = GuardedBuffer::new(backing, GUARD);
    arena.zero_fill(guarded.target());

    let strategy = arena.zero_strategy();
    assert!(
        guarded.target_is_zero(),
        "{strategy:?} n={n} skew={skew}: first non-zero {:?}",
        first_nonzero(guarded.target())
    );
    assert!(
        guarded.guards_intact(),
        "{strategy:?} n={n} skew={skew}: guard band clobbered"
    );
}

#[test]
fn zero_fill_sizes_with_guards() {
    for strategy in strategies() {
        let mut arena = Arena::new(ArenaConfig::new(CAPACITY).with_zero_strategy(strategy));
        assert_eq!(arena.zero_strategy(), strategy);
        for &n in ZERO_FILL_SIZES {
            let skews: &[usize] = if n > 1000 { &[0, 3] } else { &[0, 1, 2, 3, 4, 5, 6, 7] };
            for &skew in skews {
                check(&mut arena, n, skew);
            }
        }
    }
}

#[test]
fn zero_fill_clears_stale_data_after_reset() {
    let mut arena = Arena::with_capacity(1 << 20);
    arena.allocate::<i32>(1000).unwrap().fill(-1);
    arena.reset();
    let stale = arena.allocate::<i32>(1000).unwrap();
    assert!(stale.iter().all(|&v| v == -1));
    arena.zero_fill(stale);
    assert!(stale.iter().all(|&v| v == 0));
}
