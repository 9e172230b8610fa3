//! Configuration for the composite-key timing runs.

use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Grid must have at least one point per axis.
    #[error("invalid grid size: {0}")]
    InvalidGrid(usize),

    /// Only pair and triple keys are supported.
    #[error("unsupported key arity {0} (expected 2 or 3)")]
    InvalidArity(usize),

    /// At least one repetition is required.
    #[error("repeat count must be > 0")]
    InvalidRepeats,

    /// The grid would hold more keys than [`KeyBenchConfig::MAX_KEYS`].
    #[error("{keys} keys exceed the limit of {max}")]
    TooManyKeys {
        /// Keys the grid would hold.
        keys: usize,
        /// Configured limit.
        max: usize,
    },
}

/// Parameters for [`run_key_bench`](crate::keybench::run_key_bench).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBenchConfig {
    /// Points per axis; the grid holds `grid^arity` keys.
    pub grid: usize,
    /// Number of key components (2 or 3).
    pub arity: usize,
    /// Repetitions per layout; the fastest run is reported.
    pub repeats: usize,
}

impl KeyBenchConfig {
    /// Upper bound on `grid^arity`. Every layout keeps its own copy of the
    /// keys, so this bounds memory as well as run time.
    pub const MAX_KEYS: usize = 4_000_000;

    /// Default points per axis: 500 for pairs, 50 for triples.
    pub fn default_grid(arity: usize) -> usize {
        if arity >= 3 {
            50
        } else {
            500
        }
    }

    /// Keys of the given arity on the default grid for that arity.
    pub fn for_arity(arity: usize) -> Self {
        Self::new(Self::default_grid(arity)).with_arity(arity)
    }

    /// Pair keys on a `grid x grid` square, one repetition.
    pub fn new(grid: usize) -> Self {
        Self {
            grid,
            arity: 2,
            repeats: 1,
        }
    }

    /// Set the key arity.
    pub fn with_arity(mut self, arity: usize) -> Self {
        self.arity = arity;
        self
    }

    /// Set the repetition count.
    pub fn with_repeats(mut self, repeats: usize) -> Self {
        self.repeats = repeats;
        self
    }

    /// Total number of keys written per layout.
    pub fn key_count(&self) -> usize {
        self.grid.saturating_pow(self.arity as u32)
    }

    /// Check the parameters before running.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid == 0 || u32::try_from(self.grid).is_err() {
            return Err(ConfigError::InvalidGrid(self.grid));
        }
        if !matches!(self.arity, 2 | 3) {
            return Err(ConfigError::InvalidArity(self.arity));
        }
        if self.repeats == 0 {
            return Err(ConfigError::InvalidRepeats);
        }
        let keys = self.key_count();
        if keys > Self::MAX_KEYS {
            return Err(ConfigError::TooManyKeys {
                keys,
                max: Self::MAX_KEYS,
            });
        }
        Ok(())
    }
}

impl Default for KeyBenchConfig {
    fn default() -> Self {
        Self::new(500)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_fields() {
        let config = KeyBenchConfig::new(10).with_arity(3).with_repeats(4);
        assert_eq!(config.key_count(), 1_000);
        assert_eq!(config.repeats, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validation_rejects_bad_values() {
        assert_eq!(
            KeyBenchConfig::new(0).validate(),
            Err(ConfigError::InvalidGrid(0))
        );
        assert_eq!(
            KeyBenchConfig::new(4).with_arity(4).validate(),
            Err(ConfigError::InvalidArity(4))
        );
        assert_eq!(
            KeyBenchConfig::new(4).with_repeats(0).validate(),
            Err(ConfigError::InvalidRepeats)
        );
    }

    #[test]
    fn default_grid_depends_on_arity() {
        let pairs = KeyBenchConfig::for_arity(2);
        let triples = KeyBenchConfig::for_arity(3);
        assert_eq!(pairs.grid, 500);
        assert_eq!(triples.grid, 50);
        assert_eq!(triples.key_count(), 125_000);
        assert!(pairs.validate().is_ok());
        assert!(triples.validate().is_ok());
        assert_eq!(KeyBenchConfig::default(), pairs);
    }

    #[test]
    fn oversized_grids_are_rejected() {
        assert_eq!(
            KeyBenchConfig::new(500).with_arity(3).validate(),
            Err(ConfigError::TooManyKeys {
                keys: 125_000_000,
                max: KeyBenchConfig::MAX_KEYS,
            })
        );
        assert!(KeyBenchConfig::new(2_000).validate().is_ok());
        assert!(matches!(
            KeyBenchConfig::new(2_001).validate(),
            Err(ConfigError::TooManyKeys { keys: 4_004_001, .. })
        ));
    }
}
