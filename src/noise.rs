//! Gaussian measurement-noise source
//!
//! Each simulated device owns its generators, so seeding one device never
//! perturbs the random stream of another device in the same process.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

/// Additive Gaussian noise with an instance-owned seeded RNG.
///
/// # Example
///
/// ```ignore
/// let mut noise = GaussianNoise::new(1e-9, Some(42));
/// let sample = noise.sample();
/// ```
#[derive(Debug, Clone)]
pub struct GaussianNoise {
    std_dev: f64,
    rng: StdRng,
    distribution: Normal<f64>,
}

impl GaussianNoise {
    /// Create a noise source with the given standard deviation.
    ///
    /// A non-finite or negative `std_dev` is coerced to 0 (noiseless).
    /// With `seed = None` the generator is seeded from entropy.
    pub fn new(std_dev: f64, seed: Option<u64>) -> Self {
        let std_dev = if std_dev.is_finite() && std_dev > 0.0 {
            std_dev
        } else {
            0.0
        };

        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };

        let distribution = Normal::new(0.0, std_dev).unwrap();

        Self {
            std_dev,
            rng,
            distribution,
        }
    }

    /// Current standard deviation
    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }

    /// Draw one sample.
    ///
    /// A zero-sigma source returns 0.0 without touching the RNG stream,
    /// so noiseless channels stay reproducible alongside noisy ones.
    pub fn sample(&mut self) -> f64 {
        if self.std_dev == 0.0 {
            return 0.0;
        }
        self.distribution.sample(&mut self.rng)
    }

    /// Reset with a new seed
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }
}
