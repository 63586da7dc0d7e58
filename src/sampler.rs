use crate::core::entropy::{EntropySource, RngEntropy};
use crate::core::errors::SimulationError;
use crate::simulator::Simulator;
use serde::Serialize;
use tracing::{info, warn};

/// Aggregate outcome of many independent runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DetectionStats {
    /// Number of runs performed.
    pub runs: usize,
    /// Runs whose reconciliation flagged the channel as compromised.
    pub compromised_runs: usize,
    /// Basis-matched slots over all runs.
    pub sifted_bits: usize,
    /// Basis-matched slots whose bits disagreed, over all runs.
    pub errors: usize,
}

impl DetectionStats {
    /// Fraction of runs in which interception was detected.
    pub fn detection_rate(&self) -> f64 {
        if self.runs > 0 {
            self.compromised_runs as f64 / self.runs as f64
        } else {
            0.0
        }
    }

    /// Pooled error rate over every sifted slot.
    pub fn mean_qber(&self) -> f64 {
        if self.sifted_bits > 0 {
            self.errors as f64 / self.sifted_bits as f64
        } else {
            0.0
        }
    }
}

/// Repeats a simulation to estimate how often interception is detected.
///
/// A single run either flags the channel or not; sampling many of them shows
/// the detection rate and the error rate an interceptor induces.
#[derive(Debug, Clone)]
pub struct Sampler {
    /// The pipeline to repeat.
    pub simulator: Simulator,
}

impl Sampler {
    pub fn new(simulator: Simulator) -> Self {
        Self { simulator }
    }

    /// Runs the simulation `runs` times, drawing from one shared `entropy`
    /// stream so that every run is independent.
    ///
    /// # Arguments
    ///
    /// * `entropy` - Source of every random draw across the batch.
    /// * `runs` - Number of runs. Must be positive.
    pub fn run(
        &self,
        entropy: &mut impl EntropySource,
        runs: usize,
    ) -> Result<DetectionStats, SimulationError> {
        if runs == 0 {
            warn!(runs, "rejecting empty sample batch");
            return Err(SimulationError::InvalidConfiguration(
                "sample count must be positive".to_string(),
            ));
        }

        let mut stats = DetectionStats::default();

        for _ in 0..runs {
            let result = self.simulator.run_with(entropy)?;

            stats.runs += 1;
            stats.sifted_bits += result.sifted_length();
            stats.errors += result.errors();
            if result.channel_compromised() {
                stats.compromised_runs += 1;
            }
        }

        info!(
            runs = stats.runs,
            interceptor = self.simulator.interceptor(),
            detection_rate = stats.detection_rate(),
            mean_qber = stats.mean_qber(),
            "sampling finished"
        );

        Ok(stats)
    }

    /// Like [`Sampler::run`], seeding the stream from the simulator's seed
    /// when one is set.
    pub fn run_default(&self, runs: usize) -> Result<DetectionStats, SimulationError> {
        match self.simulator.seed() {
            Some(seed) => self.run(&mut RngEntropy::seeded(seed), runs),
            None => self.run(&mut RngEntropy::thread(), runs),
        }
    }
}
