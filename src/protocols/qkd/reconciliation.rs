//! Public comparison of transmitter and receiver records.
//!
//! For every slot the two bases are compared. Slots measured in different
//! bases are discarded; slots measured in the same basis must agree on the
//! bit, and a single disagreement marks the channel as compromised.

use crate::core::errors::SimulationError;
use crate::core::records::{ReceiveRecord, TransmitRecord};
use serde::Serialize;

/// Outcome of comparing one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Verdict {
    /// Same basis, same bit.
    Match,
    /// Same basis, different bit: evidence of interception.
    MismatchDetected,
    /// Different bases; the slot carries no key material.
    BasisMismatch,
}

impl Verdict {
    pub fn glyph(self) -> &'static str {
        match self {
            Verdict::Match => "☑",
            Verdict::MismatchDetected => "✗",
            Verdict::BasisMismatch => "-",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReconciliationRecord {
    pub slot: usize,
    pub basis_match: bool,
    pub verdict: Verdict,
}

impl ReconciliationRecord {
    pub fn basis_match_marker(&self) -> char {
        if self.basis_match { '〇' } else { '-' }
    }
}

/// Compares the transmitter's records against the receiver's, slot by slot.
///
/// Both sequences must have the same length and carry slots `1..=n` in
/// order; anything else is an [`SimulationError::InternalInvariantViolation`].
pub fn reconcile(
    transmitted: &[TransmitRecord],
    received: &[ReceiveRecord],
) -> Result<Vec<ReconciliationRecord>, SimulationError> {
    let n = transmitted.len();
    ensure_aligned("transmitter", n, transmitted.iter().map(|r| r.slot))?;
    ensure_aligned("receiver", n, received.iter().map(|r| r.slot))?;

    let records = transmitted
        .iter()
        .zip(received)
        .map(|(tx, rx)| {
            let basis_match = tx.basis == rx.basis;
            let verdict = match (basis_match, tx.bit == rx.bit) {
                (false, _) => Verdict::BasisMismatch,
                (true, true) => Verdict::Match,
                (true, false) => Verdict::MismatchDetected,
            };

            ReconciliationRecord {
                slot: tx.slot,
                basis_match,
                verdict,
            }
        })
        .collect();

    Ok(records)
}

/// True iff any basis-matched slot disagrees on the bit.
///
/// There is no sampling or tolerance threshold: one mismatch is enough.
pub fn channel_compromised(records: &[ReconciliationRecord]) -> bool {
    records
        .iter()
        .any(|r| r.verdict == Verdict::MismatchDetected)
}

/// Checks that `slots` has `expected` entries numbered `1..=expected`.
pub(crate) fn ensure_aligned(
    stage: &'static str,
    expected: usize,
    slots: impl ExactSizeIterator<Item = usize>,
) -> Result<(), SimulationError> {
    if slots.len() != expected {
        return Err(SimulationError::InternalInvariantViolation {
            stage,
            expected,
            got: slots.len(),
        });
    }

    for (i, slot) in slots.enumerate() {
        if slot != i + 1 {
            return Err(SimulationError::InternalInvariantViolation {
                stage,
                expected: i + 1,
                got: slot,
            });
        }
    }

    Ok(())
}
