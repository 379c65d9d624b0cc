use crate::error::{Error, Result};

/// Default maximum node height.
pub const DEFAULT_MAX_HEIGHT: usize = 28;

/// Largest height the engine accepts. The geometric generator needs one
/// coin flip per level, so anything above this is wasted work.
pub const HEIGHT_LIMIT: usize = 64;

/// Default probability that a node present at level `n` also appears at `n + 1`.
pub const DEFAULT_PROBABILITY: f64 = 0.5;

/// Construction-time configuration for a [`SkipList`](crate::SkipList).
///
/// ```
/// use skiplist_engine::Options;
///
/// let opts = Options::default().with_max_height(12).with_seed(23);
/// assert!(opts.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    /// Number of forward slots in the head sentinel; no node is taller.
    pub max_height: usize,
    /// Per-level promotion probability, in `(0, 1)`.
    pub probability: f64,
    /// Generator seed. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            max_height: DEFAULT_MAX_HEIGHT,
            probability: DEFAULT_PROBABILITY,
            seed: None,
        }
    }
}

impl Options {
    #[must_use]
    pub fn with_max_height(mut self, max_height: usize) -> Self {
        self.max_height = max_height;
        self
    }

    #[must_use]
    pub fn with_probability(mut self, probability: f64) -> Self {
        self.probability = probability;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Reject out-of-range heights and probabilities.
    pub fn validate(&self) -> Result<()> {
        if self.max_height == 0 || self.max_height > HEIGHT_LIMIT {
            return Err(Error::InvalidOptions(format!(
                "max_height must be in 1..={HEIGHT_LIMIT}, got {}",
                self.max_height
            )));
        }
        // NaN fails both comparisons
        if !(self.probability > 0.0 && self.probability < 1.0) {
            return Err(Error::InvalidOptions(format!(
                "probability must be in (0, 1), got {}",
                self.probability
            )));
        }
        Ok(())
    }
}
