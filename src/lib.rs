//! Discrete BB84 quantum key distribution simulation.
//!
//! A transmitter prepares random symbols, an optional interceptor measures
//! and re-sends them, and a receiver measures what arrives. Reconciliation
//! compares bases and bits and flags the channel as compromised when any
//! basis-matched slot disagrees.

pub mod config;
mod core;
pub mod protocols;
mod sampler;
mod simulator;

pub use crate::config::SimulationConfig;
pub use crate::core::{
    Basis, Bit, Decoded, EntropySource, Polarization, ReceiveRecord, RngEntropy,
    ScriptedEntropy, TransmitRecord, decode, encode, errors,
};
pub use crate::protocols::qkd::{ReconciliationRecord, RunResult, Verdict};
pub use crate::sampler::{DetectionStats, Sampler};
pub use crate::simulator::{Simulator, run_simulation};
