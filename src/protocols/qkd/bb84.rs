//! BB84 exchange between a transmitter, an optional interceptor and a receiver.
//!
//! Parties run one after another over the whole slot range: the transmitter
//! prepares every slot, then the interceptor (if any) measures and re-sends
//! every slot, then the receiver measures. Each slot draws its basis first
//! and its bit or coin flip second.

use crate::core::basis::{Basis, Bit, Decoded, Polarization, decode, encode};
use crate::core::entropy::EntropySource;
use crate::core::errors::SimulationError;
use crate::core::records::{ReceiveRecord, TransmitRecord};
use crate::protocols::qkd::result::RunResult;
use tracing::{debug, info, warn};

/// Rejects an empty run with [`SimulationError::InvalidConfiguration`].
pub(crate) fn ensure_positive_slots(slots: usize) -> Result<(), SimulationError> {
    if slots == 0 {
        warn!(slots, "rejecting non-positive slot count");
        return Err(SimulationError::InvalidConfiguration(
            "slot count must be positive".to_string(),
        ));
    }
    Ok(())
}

/// Reads `symbol` in `basis`, falling back to a coin flip on basis mismatch.
pub fn measure(basis: Basis, symbol: Polarization, entropy: &mut impl EntropySource) -> Bit {
    match decode(basis, symbol) {
        Decoded::Bit(bit) => bit,
        Decoded::Incompatible => entropy.coin_flip(),
    }
}

/// Prepares `slots` random symbols.
pub fn transmit(slots: usize, entropy: &mut impl EntropySource) -> Vec<TransmitRecord> {
    (1..=slots)
        .map(|slot| {
            let basis = entropy.choose_basis();
            let bit = entropy.choose_bit();

            TransmitRecord {
                slot,
                basis,
                bit,
                polarization: encode(basis, bit),
            }
        })
        .collect()
}

/// Measures every incoming symbol in a random basis and re-sends a fresh
/// symbol encoding what was measured.
pub fn intercept(
    incoming: &[TransmitRecord],
    entropy: &mut impl EntropySource,
) -> Vec<TransmitRecord> {
    incoming
        .iter()
        .map(|record| {
            let basis = entropy.choose_basis();
            let bit = measure(basis, record.polarization, entropy);

            TransmitRecord {
                slot: record.slot,
                basis,
                bit,
                polarization: encode(basis, bit),
            }
        })
        .collect()
}

/// Measures every incoming symbol in a random basis.
pub fn receive(
    incoming: &[TransmitRecord],
    entropy: &mut impl EntropySource,
) -> Vec<ReceiveRecord> {
    incoming
        .iter()
        .map(|record| {
            let basis = entropy.choose_basis();
            let bit = measure(basis, record.polarization, entropy);

            ReceiveRecord {
                slot: record.slot,
                basis,
                bit,
            }
        })
        .collect()
}

/// Runs one BB84 exchange over `slots` symbols.
///
/// # Arguments
///
/// * `slots` - Number of symbols to transmit. Must be positive.
/// * `interceptor` - Whether an interceptor sits between transmitter and receiver.
/// * `entropy` - Source of every random draw in the run.
///
/// # Returns
///
/// The assembled [`RunResult`], or [`SimulationError::InvalidConfiguration`]
/// when `slots` is zero.
pub fn run(
    slots: usize,
    interceptor: bool,
    entropy: &mut impl EntropySource,
) -> Result<RunResult, SimulationError> {
    ensure_positive_slots(slots)?;

    debug!(slots, interceptor, "starting BB84 run");

    let transmitted = transmit(slots, entropy);
    let intercepted = interceptor.then(|| intercept(&transmitted, entropy));

    // The receiver reads whatever reached the end of the channel.
    let channel = intercepted.as_deref().unwrap_or(transmitted.as_slice());
    let received = receive(channel, entropy);

    let result = RunResult::assemble(transmitted, intercepted, received)?;

    debug!(
        sifted = result.sifted_length(),
        errors = result.errors(),
        "reconciliation finished"
    );
    info!(
        compromised = result.channel_compromised(),
        qber = result.qber(),
        "BB84 run complete"
    );

    Ok(result)
}
