//! Simulation configuration.

use crate::error::ConfigError;

/// Maximum number of trials per run.
pub const MAX_ITERATIONS: usize = 300_000;

/// Immutable runner configuration. Build with [`SimulationConfig::builder`].
///
/// ```rust
/// use sim_engine::mc::SimulationConfig;
///
/// let config = SimulationConfig::builder()
///     .iterations(10_000)
///     .seed(42)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.iterations(), 10_000);
/// assert_eq!(config.seed(), Some(42));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimulationConfig {
    iterations: usize,
    seed: Option<u64>,
}

impl SimulationConfig {
    /// Creates a builder.
    #[inline]
    pub fn builder() -> SimulationConfigBuilder {
        SimulationConfigBuilder::default()
    }

    /// Number of trials.
    #[inline]
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Seed for a reproducible run.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Same seed, different trial count.
    pub fn with_iterations(&self, iterations: usize) -> Result<Self, ConfigError> {
        let config = Self {
            iterations,
            seed: self.seed,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks `1 <= iterations <= MAX_ITERATIONS`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.iterations == 0 || self.iterations > MAX_ITERATIONS {
            return Err(ConfigError::InvalidIterations(self.iterations));
        }
        Ok(())
    }
}

/// Builder for [`SimulationConfig`].
#[derive(Clone, Debug, Default)]
pub struct SimulationConfigBuilder {
    iterations: Option<usize>,
    seed: Option<u64>,
}

impl SimulationConfigBuilder {
    /// Sets the trial count, in `[1, MAX_ITERATIONS]`.
    #[inline]
    pub fn iterations(mut self, iterations: usize) -> Self {
        self.iterations = Some(iterations);
        self
    }

    /// Sets the seed.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets or clears the seed.
    #[inline]
    pub fn maybe_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    ///
    /// `ConfigError` if `iterations` is missing, zero, or above
    /// [`MAX_ITERATIONS`].
    pub fn build(self) -> Result<SimulationConfig, ConfigError> {
        let iterations = self.iterations.ok_or(ConfigError::InvalidParameter {
            name: "iterations",
            reason: "must be specified".to_string(),
        })?;

        let config = SimulationConfig {
            iterations,
            seed: self.seed,
        };

        config.validate()?;
        Ok(config)
    }
}
