//! Quantum Cryptography Protocols.
//!
//! This module contains the simulated QKD protocols and their reconciliation
//! stage.

pub mod qkd;
pub use qkd::bb84;
