use std::collections::BTreeMap;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use infvec::config::KeyBenchConfig;
use infvec::keybench::run_key_bench;
use infvec::primes::PrimeSieve;
use infvec::{HashedVector, OrderedVector};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "infvec", about = "Finitely supported sparse sequences")]
struct Cli {
    /// Log at debug level (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Walk through construction, rendering, equality and counting.
    Demo {
        /// Value counted by the predicate demo.
        #[arg(long, default_value_t = 23.0)]
        number: f64,
    },
    /// Enumerate primes and compare two prime sets as sequences.
    Primes {
        /// Upper bound of the sieve.
        #[arg(long, default_value_t = 23)]
        limit: usize,
        /// Upper bound of a second sieve to compare against (default: limit - 1).
        #[arg(long)]
        compare: Option<usize>,
    },
    /// Time composite keys against their flat integer encodings.
    Keys {
        /// Points per axis (default: 500 for pairs, 50 for triples).
        #[arg(long)]
        grid: Option<usize>,
        /// Number of key components (2 or 3).
        #[arg(long, default_value_t = 2)]
        arity: usize,
        /// Repetitions per layout (fastest is reported).
        #[arg(long, default_value_t = 1)]
        repeats: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    match cli.command {
        Commands::Demo { number } => run_demo(number),
        Commands::Primes { limit, compare } => run_primes(limit, compare)?,
        Commands::Keys {
            grid,
            arity,
            repeats,
        } => run_keys(grid, arity, repeats)?,
    }

    Ok(())
}

fn init_tracing(verbose: bool) -> Result<()> {
    let default = if verbose { "infvec=debug" } else { "infvec=info" };
    let filter = match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(_) => EnvFilter::try_from_default_env().context("invalid RUST_LOG filter")?,
        Err(_) => EnvFilter::new(default),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn run_demo(number: f64) {
    let v: OrderedVector<i32, f64> = OrderedVector::new();
    println!("- a zero vector v:");
    print!("{v}");

    let w = OrderedVector::from(BTreeMap::from([(42, 23.0), (123, 23.0)]));
    println!("- a vector w created from a map:");
    print!("{w}");

    let a: OrderedVector<i32, f64> = [(1, 2.5)].into_iter().collect();
    let b: OrderedVector<i32, f64> = [(2, 2.5)].into_iter().collect();
    println!("- are the vectors a and b equal?");
    println!("  ... {}", yes_no(a == b));

    let ay: HashedVector<i32, f64> = HashedVector::new();
    let by: HashedVector<i32, f64> = HashedVector::new();
    println!("- are the vectors ay and by equal?");
    println!("  ... {}", yes_no(ay == by));

    println!("- are the vectors v and w equal?");
    println!("  ... {}", yes_no(v == w));

    let h: HashedVector<i32, f64> = w.iter().map(|e| (*e.index(), *e.value())).collect();
    println!("- is w equal to its hashed copy h?");
    println!("  ... {}", yes_no(w == h));

    println!("- w contains {} times the number {number}", w.count_value(&number));
    println!("- h contains {} times the number {number}", h.count_value(&number));
}

fn run_primes(limit: usize, compare: Option<usize>) -> Result<()> {
    let other = compare.unwrap_or_else(|| limit.saturating_sub(1));
    let p = PrimeSieve::new(limit).with_context(|| format!("cannot sieve up to {limit}"))?;
    let q = PrimeSieve::new(other).with_context(|| format!("cannot sieve up to {other}"))?;

    for sieve in [&p, &q] {
        println!("- the primes from 2 to {}:", sieve.limit());
        println!("{sieve}");
        println!("- these are {} prime numbers", sieve.len());
    }

    let same = p.len() == q.len() && p.iter().eq(q.iter());
    println!(
        "- these two sets of primes are {}",
        if same { "equal!" } else { "different!" }
    );
    Ok(())
}

fn run_keys(grid: Option<usize>, arity: usize, repeats: usize) -> Result<()> {
    let grid = grid.unwrap_or_else(|| KeyBenchConfig::default_grid(arity));
    let config = KeyBenchConfig::new(grid)
        .with_arity(arity)
        .with_repeats(repeats);
    info!(grid, arity, repeats, "timing composite keys");
    let report = run_key_bench(&config).context("key timing failed")?;
    print!("{report}");
    Ok(())
}

fn yes_no(answer: bool) -> &'static str {
    if answer {
        "yes!"
    } else {
        "no!"
    }
}
