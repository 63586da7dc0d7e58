//! Randomness sources for the simulation.
//!
//! Every random decision the parties make goes through [`EntropySource`],
//! so a run can be driven by the thread generator, a seeded ChaCha stream,
//! or a fixed script.

use crate::core::basis::{Basis, Bit};
use rand::rngs::ThreadRng;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;

/// Uniform draws over the two-element domains used by the protocol.
///
/// Each call must be an independent draw.
pub trait EntropySource {
    fn choose_basis(&mut self) -> Basis;

    fn choose_bit(&mut self) -> Bit;

    /// Bit obtained when measuring in the wrong basis.
    fn coin_flip(&mut self) -> Bit;
}

/// [`EntropySource`] backed by any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngEntropy<R> {
    rng: R,
}

impl<R: Rng> RngEntropy<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngEntropy<ThreadRng> {
    /// Uses the OS-seeded thread generator.
    pub fn thread() -> Self {
        Self::new(rand::rng())
    }
}

impl RngEntropy<ChaCha8Rng> {
    /// Reproducible stream derived from `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> EntropySource for RngEntropy<R> {
    fn choose_basis(&mut self) -> Basis {
        if self.rng.random_bool(0.5) {
            Basis::Diagonal
        } else {
            Basis::Rectilinear
        }
    }

    fn choose_bit(&mut self) -> Bit {
        Bit::from(self.rng.random_bool(0.5))
    }

    fn coin_flip(&mut self) -> Bit {
        Bit::from(self.rng.random_bool(0.5))
    }
}

/// Replays fixed sequences of draws.
///
/// Bases, bits and coin flips come from three independent queues, consumed
/// in the order the parties request them.
///
/// # Panics
///
/// [`EntropySource::choose_basis`], [`EntropySource::choose_bit`] and
/// [`EntropySource::coin_flip`] panic when their queue is empty, i.e. the
/// script is shorter than the run it drives. Check [`ScriptedEntropy::remaining`]
/// to size a script.
#[derive(Debug, Clone, Default)]
pub struct ScriptedEntropy {
    bases: VecDeque<Basis>,
    bits: VecDeque<Bit>,
    flips: VecDeque<Bit>,
}

impl ScriptedEntropy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bases(mut self, bases: impl IntoIterator<Item = Basis>) -> Self {
        self.bases.extend(bases);
        self
    }

    pub fn with_bits(mut self, bits: impl IntoIterator<Item = Bit>) -> Self {
        self.bits.extend(bits);
        self
    }

    pub fn with_flips(mut self, flips: impl IntoIterator<Item = Bit>) -> Self {
        self.flips.extend(flips);
        self
    }

    /// Number of scripted draws not yet consumed, as (bases, bits, flips).
    pub fn remaining(&self) -> (usize, usize, usize) {
        (self.bases.len(), self.bits.len(), self.flips.len())
    }
}

impl EntropySource for ScriptedEntropy {
    fn choose_basis(&mut self) -> Basis {
        self.bases
            .pop_front()
            .unwrap_or_else(|| panic!("scripted entropy ran out of bases"))
    }

    fn choose_bit(&mut self) -> Bit {
        self.bits
            .pop_front()
            .unwrap_or_else(|| panic!("scripted entropy ran out of bits"))
    }

    fn coin_flip(&mut self) -> Bit {
        self.flips
            .pop_front()
            .unwrap_or_else(|| panic!("scripted entropy ran out of coin flips"))
    }
}
