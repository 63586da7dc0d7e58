pub mod basis;
pub mod entropy;
pub mod errors;
pub mod records;

pub use basis::{Basis, Bit, Decoded, Polarization, decode, encode};
pub use entropy::{EntropySource, RngEntropy, ScriptedEntropy};
pub use records::{ReceiveRecord, TransmitRecord};
