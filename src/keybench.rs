//! Timing of composite keys against their flat encodings.
//!
//! Each run fills one [`InfiniteVector`] per [`KeyLayout`] with the full grid
//! of keys and then reads every key back (plus one row of absent keys), so
//! the cost of the key comparison dominates.

use std::fmt;
use std::hash::Hash;
use std::hint::black_box;
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{debug, info};

use crate::backend::Backend;
use crate::config::{ConfigError, KeyBenchConfig};
use crate::index::{ByFlat, FlatIndex, IndexError, PairKey, TripleKey};
use crate::vector::{HashedVector, InfiniteVector, OrderedVector};

/// Errors raised by a timing run.
#[derive(Debug, Error)]
pub enum KeyBenchError {
    /// Rejected configuration.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// A grid key could not be flattened.
    #[error("key encoding failed: {0}")]
    Index(#[from] IndexError),
}

/// Storage layout being timed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyLayout {
    /// Tree keyed by the composite key, lexicographic order.
    Lexicographic,
    /// Tree keyed by the composite key ordered by its flat number.
    FlatOrdered,
    /// Tree keyed directly by the flat `u64`.
    FlatInteger,
    /// Hash table keyed by the composite key.
    Hashed,
}

impl KeyLayout {
    /// Every layout, in report order.
    pub const ALL: [KeyLayout; 4] = [
        KeyLayout::Lexicographic,
        KeyLayout::FlatOrdered,
        KeyLayout::FlatInteger,
        KeyLayout::Hashed,
    ];

    /// Short label used in reports.
    pub fn label(self) -> &'static str {
        match self {
            KeyLayout::Lexicographic => "key, lexicographic",
            KeyLayout::FlatOrdered => "key, flat order",
            KeyLayout::FlatInteger => "u64 flat index",
            KeyLayout::Hashed => "key, hashed",
        }
    }
}

/// Best write/read timing of one layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutTiming {
    /// Layout measured.
    pub layout: KeyLayout,
    /// Time to insert the full grid.
    pub write: Duration,
    /// Time to read the full grid back.
    pub read: Duration,
}

/// Result of a timing run.
#[derive(Debug, Clone)]
pub struct KeyBenchReport {
    /// Configuration used.
    pub config: KeyBenchConfig,
    /// One timing per layout, in [`KeyLayout::ALL`] order.
    pub timings: Vec<LayoutTiming>,
}

impl fmt::Display for KeyBenchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} keys (grid {}, arity {}), best of {}",
            self.config.key_count(),
            self.config.grid,
            self.config.arity,
            self.config.repeats
        )?;
        writeln!(f, "{:>20} | {:>12} | {:>12}", "layout", "write", "read")?;
        writeln!(f, "{}", "-".repeat(50))?;
        for timing in &self.timings {
            writeln!(
                f,
                "{:>20} | {:>10.3}ms | {:>10.3}ms",
                timing.layout.label(),
                timing.write.as_secs_f64() * 1e3,
                timing.read.as_secs_f64() * 1e3
            )?;
        }
        Ok(())
    }
}

/// Composite key that can enumerate a cubic grid.
pub trait GridKey: FlatIndex + Ord + Hash + Copy + fmt::Display {
    /// All keys with every component below `grid`, in lexicographic order.
    fn grid(grid: u32) -> Vec<Self>;

    /// Keys just outside the grid (first component equal to `grid`).
    fn outside(grid: u32) -> Vec<Self>;
}

impl GridKey for PairKey {
    fn grid(grid: u32) -> Vec<Self> {
        (0..grid)
            .flat_map(|j| (0..grid).map(move |k| PairKey::new(j, k)))
            .collect()
    }

    fn outside(grid: u32) -> Vec<Self> {
        (0..grid).map(|k| PairKey::new(grid, k)).collect()
    }
}

impl GridKey for TripleKey {
    fn grid(grid: u32) -> Vec<Self> {
        (0..grid)
            .flat_map(|j| {
                (0..grid).flat_map(move |k| (0..grid).map(move |l| TripleKey::new(j, k, l)))
            })
            .collect()
    }

    fn outside(grid: u32) -> Vec<Self> {
        (0..grid).map(|k| TripleKey::new(grid, k, 0)).collect()
    }
}

/// Run the timing described by `config`.
pub fn run_key_bench(config: &KeyBenchConfig) -> Result<KeyBenchReport, KeyBenchError> {
    config.validate()?;
    let grid = config.grid as u32;
    let timings = match config.arity {
        2 => time_layouts::<PairKey>(grid, config.repeats)?,
        3 => time_layouts::<TripleKey>(grid, config.repeats)?,
        other => return Err(ConfigError::InvalidArity(other).into()),
    };
    info!(keys = config.key_count(), "key timing finished");
    Ok(KeyBenchReport {
        config: config.clone(),
        timings,
    })
}

fn time_layouts<K: GridKey>(grid: u32, repeats: usize) -> Result<Vec<LayoutTiming>, IndexError> {
    let keys = K::grid(grid);
    let misses = K::outside(grid);

    let by_flat = keys
        .iter()
        .map(|key| ByFlat::new(*key))
        .collect::<Result<Vec<_>, _>>()?;
    let by_flat_misses = misses
        .iter()
        .map(|key| ByFlat::new(*key))
        .collect::<Result<Vec<_>, _>>()?;
    let flat = by_flat.iter().map(ByFlat::flat).collect::<Vec<_>>();
    let flat_misses = by_flat_misses.iter().map(ByFlat::flat).collect::<Vec<_>>();

    let mut timings = Vec::with_capacity(KeyLayout::ALL.len());
    for layout in KeyLayout::ALL {
        let mut best: Option<(Duration, Duration)> = None;
        for _ in 0..repeats {
            let run = match layout {
                KeyLayout::Lexicographic => {
                    time_one(OrderedVector::<K, f32>::new(), &keys, &misses)
                }
                KeyLayout::FlatOrdered => {
                    time_one(OrderedVector::<ByFlat<K>, f32>::new(), &by_flat, &by_flat_misses)
                }
                KeyLayout::FlatInteger => {
                    time_one(OrderedVector::<u64, f32>::new(), &flat, &flat_misses)
                }
                KeyLayout::Hashed => time_one(HashedVector::<K, f32>::new(), &keys, &misses),
            };
            best = Some(match best {
                Some((write, read)) => (write.min(run.0), read.min(run.1)),
                None => run,
            });
        }
        let (write, read) = best.unwrap_or_default();
        debug!(layout = layout.label(), ?write, ?read, "layout timed");
        timings.push(LayoutTiming {
            layout,
            write,
            read,
        });
    }
    Ok(timings)
}

fn time_one<B>(
    mut vector: InfiniteVector<B>,
    keys: &[B::Index],
    misses: &[B::Index],
) -> (Duration, Duration)
where
    B: Backend<Value = f32>,
    B::Index: Copy,
{
    let start = Instant::now();
    for key in keys {
        vector.set(*key, 1.0);
    }
    let write = start.elapsed();

    let start = Instant::now();
    let mut sum = 0.0f32;
    for key in keys.iter().chain(misses) {
        sum += vector.get(key);
    }
    black_box(sum);
    let read = start.elapsed();

    (write, read)
}
