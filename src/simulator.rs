use crate::config::SimulationConfig;
use crate::core::entropy::{EntropySource, RngEntropy};
use crate::core::errors::SimulationError;
use crate::protocols::qkd::bb84::{self, ensure_positive_slots};
use crate::protocols::qkd::RunResult;

/// A configured BB84 pipeline.
///
/// The interceptor flag is fixed when the simulator is built; each run
/// allocates fresh records and shares nothing with earlier runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Simulator {
    slots: usize,
    interceptor: bool,
    seed: Option<u64>,
}

impl Simulator {
    /// Creates a simulator over `slots` symbols with an interceptor on the channel.
    pub fn new(slots: usize) -> Result<Self, SimulationError> {
        ensure_positive_slots(slots)?;

        Ok(Self {
            slots,
            interceptor: true,
            seed: None,
        })
    }

    pub fn from_config(config: &SimulationConfig) -> Result<Self, SimulationError> {
        config.validate()?;

        let simulator = Self::new(config.slots)?.with_interceptor(config.interceptor);
        Ok(match config.seed {
            Some(seed) => simulator.with_seed(seed),
            None => simulator,
        })
    }

    /// Places or removes the interceptor between transmitter and receiver.
    pub fn with_interceptor(mut self, present: bool) -> Self {
        self.interceptor = present;
        self
    }

    /// Makes [`Simulator::run`] reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn slots(&self) -> usize {
        self.slots
    }

    pub fn interceptor(&self) -> bool {
        self.interceptor
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Runs once, drawing from `entropy`.
    pub fn run_with(
        &self,
        entropy: &mut impl EntropySource,
    ) -> Result<RunResult, SimulationError> {
        bb84::run(self.slots, self.interceptor, entropy)
    }

    /// Runs once from the configured seed, or from the thread generator if
    /// no seed was set.
    pub fn run(&self) -> Result<RunResult, SimulationError> {
        match self.seed {
            Some(seed) => self.run_with(&mut RngEntropy::seeded(seed)),
            None => self.run_with(&mut RngEntropy::thread()),
        }
    }
}

/// Runs a single exchange of `n` symbols with an interceptor present.
pub fn run_simulation(n: usize) -> Result<RunResult, SimulationError> {
    Simulator::new(n)?.run()
}
