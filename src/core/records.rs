use crate::core::basis::{Basis, Bit, Polarization};
use serde::Serialize;

/// Slot of a party that sends a symbol downstream (transmitter, interceptor).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TransmitRecord {
    /// 1-based slot index.
    pub slot: usize,
    pub basis: Basis,
    pub bit: Bit,
    pub polarization: Polarization,
}

/// Slot of the terminal party. It only measures, so it carries no symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReceiveRecord {
    /// 1-based slot index.
    pub slot: usize,
    pub basis: Basis,
    pub bit: Bit,
}
