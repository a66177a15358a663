//! Sortedness check
//!
//! Inserts random `(v, v)` pairs, lowers each key by one right after inserting
//! it, drains the heap and verifies that the payloads come out sorted.
//!
//! ## Running
//!
//! ```bash
//! cargo run --release --example sortedness -- --count 500000
//!
//! # with consolidation / cascading-cut events
//! RUST_LOG=fibonacci_arena_heap=trace cargo run --example sortedness -- --count 100
//! ```

use clap::Parser;
use fibonacci_arena_heap::fibonacci::FibonacciHeap;
use fibonacci_arena_heap::HeapError;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::process::ExitCode;
use std::time::Instant;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about)]
struct Options {
    /// Number of values to insert.
    #[arg(short, long, default_value_t = 500_000)]
    count: usize,

    /// Values are drawn uniformly from `0..=max_value`.
    #[arg(short, long, default_value_t = 100)]
    max_value: i32,

    /// Seed for the random generator. A random seed is used when omitted.
    #[arg(short, long)]
    seed: Option<u64>,
}

fn run(options: &Options) -> Result<Vec<i32>, HeapError> {
    let seed = options.seed.unwrap_or_else(rand::random);
    info!(seed, count = options.count, max_value = options.max_value, "generating values");
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let mut heap = FibonacciHeap::with_capacity(options.count);
    let start = Instant::now();
    for _ in 0..options.count {
        let x = rng.gen_range(0..=options.max_value);
        let handle = heap.insert(x, x);
        heap.decrease_key(&handle, x - 1)?;
    }
    info!(elapsed = ?start.elapsed(), "inserted and decreased");

    let start = Instant::now();
    let mut out = Vec::with_capacity(options.count);
    while !heap.is_empty() {
        out.push(heap.extract_min()?);
    }
    info!(elapsed = ?start.elapsed(), "drained");
    Ok(out)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let options = Options::parse();
    let out = match run(&options) {
        Ok(out) => out,
        Err(e) => {
            error!(%e, "heap operation failed");
            return ExitCode::FAILURE;
        }
    };

    if let Some(i) = out.windows(2).position(|w| w[0] > w[1]) {
        error!(index = i, prev = out[i], next = out[i + 1], "output is not sorted");
        return ExitCode::FAILURE;
    }
    info!(values = out.len(), "output is sorted");
    ExitCode::SUCCESS
}
