//! Console harness: arena streaming zero vs `Vec` + `fill`.
//!
//! Reserves a 1 GiB arena, allocates N ints, zero-fills them and compares
//! the time against filling an equally sized `Vec<i32>`. N defaults to
//! 100M and can be overridden by the first argument.
//!
//! ```text
//! cargo run --release -p void-bench --example void_vs_vec -- 50000000
//! RUST_LOG=void_arena=debug cargo run --release -p void-bench --example void_vs_vec
//! ```

use std::time::Instant;

use tracing_subscriber::EnvFilter;
use void_arena::Arena;
use void_bench::{reference_fill, ZeroFillProfile};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let n = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(ZeroFillProfile::reference().elements);

    println!("=== void-arena zero-fill comparison ({n} ints) ===\n");

    let arena = Arena::default();
    println!("arena: {:?}", arena.zero_strategy());

    let start = Instant::now();
    let zeroed = match arena.allocate::<i32>(n) {
        Ok(buf) => {
            arena.zero_fill(buf);
            Some(buf)
        }
        Err(err) => {
            eprintln!("arena allocation failed: {err}");
            None
        }
    };
    let arena_secs = start.elapsed().as_secs_f64();

    let mut std_vec = vec![1i32; n];
    let start = Instant::now();
    reference_fill(&mut std_vec);
    let std_secs = start.elapsed().as_secs_f64();

    if let Some(buf) = zeroed {
        assert!(buf.iter().all(|&v| v == 0));
    }
    assert!(std_vec.iter().all(|&v| v == 0));

    println!("arena + zero_fill time: {arena_secs:>8.3} s");
    println!("Vec + fill time:        {std_secs:>8.3} s");
    if arena_secs > 0.0 {
        println!("Speedup:                {:>8.2}x", std_secs / arena_secs);
    }
}
