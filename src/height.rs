//! Randomized node heights.
//!
//! A skip list stays balanced only if tall nodes are geometrically rarer than
//! short ones: every level should hold roughly `p` times as many nodes as the
//! level beneath it.
//!
//! ```text
//! P(height >= 1) = 1
//! P(height >= 2) = p
//! P(height >= 3) = p^2
//! ...capped at max_height
//! ```

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::config::Options;
use crate::error::Result;

/// Source of node heights.
///
/// Implementations must return a height in `[1, max_height()]` and keep the
/// geometric decay above. The list panics on any height outside that range.
pub trait HeightGenerator {
    /// Tallest height this generator can return.
    fn max_height(&self) -> usize;

    /// Draw the height for the next node.
    fn next_height(&mut self) -> usize;

    /// Restart the height sequence. Equal seeds replay equal sequences.
    fn reseed(&mut self, seed: u64);
}

/// Coin-flip generator: keep growing while a `p`-weighted coin lands heads.
#[derive(Debug, Clone)]
pub struct Geometric {
    max_height: usize,
    probability: f64,
    rng: SmallRng,
}

impl Geometric {
    /// Build from validated options. Without a seed the generator draws
    /// from OS entropy.
    pub fn from_options(opts: &Options) -> Result<Self> {
        opts.validate()?;
        let rng = match opts.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Ok(Geometric {
            max_height: opts.max_height,
            probability: opts.probability,
            rng,
        })
    }

    /// Default options with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Geometric {
            max_height: crate::config::DEFAULT_MAX_HEIGHT,
            probability: crate::config::DEFAULT_PROBABILITY,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }
}

impl Default for Geometric {
    fn default() -> Self {
        Geometric {
            max_height: crate::config::DEFAULT_MAX_HEIGHT,
            probability: crate::config::DEFAULT_PROBABILITY,
            rng: SmallRng::from_entropy(),
        }
    }
}

impl HeightGenerator for Geometric {
    fn max_height(&self) -> usize {
        self.max_height
    }

    fn next_height(&mut self) -> usize {
        let mut height = 1;
        while height < self.max_height && self.rng.gen_bool(self.probability) {
            height += 1;
        }
        height
    }

    fn reseed(&mut self, seed: u64) {
        self.rng = SmallRng::seed_from_u64(seed);
    }
}
