use crate::core::basis::Bit;
use crate::core::errors::SimulationError;
use crate::core::records::{ReceiveRecord, TransmitRecord};
use crate::protocols::qkd::reconciliation::{
    ReconciliationRecord, Verdict, channel_compromised, ensure_aligned, reconcile,
};
use serde::Serialize;

/// Everything a BB84 run produced, ready to hand to a display.
///
/// Built only through [`RunResult::assemble`], which runs reconciliation
/// itself; verdicts and `channel_compromised` cannot be set directly.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunResult {
    slots: usize,
    transmitter: Vec<TransmitRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    interceptor: Option<Vec<TransmitRecord>>,
    receiver: Vec<ReceiveRecord>,
    reconciliation: Vec<ReconciliationRecord>,
    channel_compromised: bool,
}

impl RunResult {
    /// Reconciles the party records and packs everything into one result.
    ///
    /// Verdicts and `channel_compromised` are always derived here from the
    /// transmitter and receiver records; callers cannot supply them.
    ///
    /// # Errors
    ///
    /// [`SimulationError::InternalInvariantViolation`] when any sequence has
    /// a different length than the transmitter's or a slot out of order.
    pub fn assemble(
        transmitter: Vec<TransmitRecord>,
        interceptor: Option<Vec<TransmitRecord>>,
        receiver: Vec<ReceiveRecord>,
    ) -> Result<Self, SimulationError> {
        let slots = transmitter.len();

        if let Some(records) = &interceptor {
            ensure_aligned("interceptor", slots, records.iter().map(|r| r.slot))?;
        }
        let reconciliation = reconcile(&transmitter, &receiver)?;
        let channel_compromised = channel_compromised(&reconciliation);

        Ok(Self {
            slots,
            transmitter,
            interceptor,
            receiver,
            reconciliation,
            channel_compromised,
        })
    }

    pub fn slots(&self) -> usize {
        self.slots
    }

    pub fn transmitter(&self) -> &[TransmitRecord] {
        &self.transmitter
    }

    /// `None` when the run had no interceptor.
    pub fn interceptor(&self) -> Option<&[TransmitRecord]> {
        self.interceptor.as_deref()
    }

    pub fn receiver(&self) -> &[ReceiveRecord] {
        &self.receiver
    }

    pub fn reconciliation(&self) -> &[ReconciliationRecord] {
        &self.reconciliation
    }

    pub fn channel_compromised(&self) -> bool {
        self.channel_compromised
    }

    /// Transmitter bits on the slots where both bases matched.
    pub fn sifted_key(&self) -> Vec<Bit> {
        self.transmitter
            .iter()
            .zip(&self.reconciliation)
            .filter(|(_, r)| r.basis_match)
            .map(|(tx, _)| tx.bit)
            .collect()
    }

    pub fn sifted_length(&self) -> usize {
        self.reconciliation.iter().filter(|r| r.basis_match).count()
    }

    /// Number of basis-matched slots whose bits disagree.
    pub fn errors(&self) -> usize {
        self.reconciliation
            .iter()
            .filter(|r| r.verdict == Verdict::MismatchDetected)
            .count()
    }

    /// Quantum bit error rate as a fraction of the sifted slots.
    pub fn qber(&self) -> f64 {
        let sifted = self.sifted_length();
        if sifted > 0 {
            self.errors() as f64 / sifted as f64
        } else {
            0.0
        }
    }
}
