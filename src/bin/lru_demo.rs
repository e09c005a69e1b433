//! Demo driver for lrukit.
//!
//! Run with: cargo run --bin lru_demo
//!
//! Fills a capacity-5 integer cache with keys 2..=7 (evicting key 2), prints
//! the recency order, reads key 5 and prints the order again:
//!
//! ```text
//! [7 6 5 4 3]
//! [5 7 6 4 3]
//! ```

use std::process::ExitCode;

use lrukit::error::ConfigError;
use lrukit::policy::lru::IntLruCache;

const CAPACITY: usize = 5;

fn run() -> Result<(), ConfigError> {
    let mut cache = IntLruCache::try_new(CAPACITY)?;

    for key in 2..=7 {
        cache.put(key, key);
    }
    println!("{}", cache);

    cache.get(&5);
    println!("{}", cache);

    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("lru_demo: {}", err);
            ExitCode::FAILURE
        },
    }
}
