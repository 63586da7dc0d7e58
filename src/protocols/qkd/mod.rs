//! Quantum Key Distribution (QKD) Protocols.
//!
//! - **BB84**: prepare-and-measure exchange in two conjugate bases, with an
//!   optional intercept-resend eavesdropper.
//! - **Reconciliation**: public basis comparison and interception detection.

pub mod bb84;
pub mod reconciliation;
pub mod result;

pub use reconciliation::{ReconciliationRecord, Verdict};
pub use result::RunResult;
