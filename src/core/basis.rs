//! Bases, bits and polarization symbols.
//!
//! The alphabet is closed: two bases times two bits give exactly four
//! polarization symbols. Encoding is total and injective. Decoding only
//! recovers the bit when the measuring basis matches the encoding basis,
//! otherwise it reports [`Decoded::Incompatible`] and the caller has to
//! fall back to a coin flip.

use serde::Serialize;
use std::fmt;

/// Encoding/measurement frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Basis {
    /// The `+` frame: horizontal and vertical polarizations.
    Rectilinear,
    /// The `×` frame: the two diagonal polarizations.
    Diagonal,
}

impl Basis {
    pub const ALL: [Basis; 2] = [Basis::Rectilinear, Basis::Diagonal];

    /// The opposite frame.
    pub fn other(self) -> Basis {
        match self {
            Basis::Rectilinear => Basis::Diagonal,
            Basis::Diagonal => Basis::Rectilinear,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Basis::Rectilinear => '+',
            Basis::Diagonal => '×',
        }
    }
}

impl fmt::Display for Basis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A classical bit. Serialized as `0` / `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bit {
    Zero,
    One,
}

impl Bit {
    pub const ALL: [Bit; 2] = [Bit::Zero, Bit::One];

    pub fn as_u8(self) -> u8 {
        match self {
            Bit::Zero => 0,
            Bit::One => 1,
        }
    }
}

impl From<bool> for Bit {
    fn from(value: bool) -> Self {
        if value { Bit::One } else { Bit::Zero }
    }
}

impl fmt::Display for Bit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

impl Serialize for Bit {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_u8())
    }
}

/// One of the four polarization symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarization {
    /// Rectilinear, bit 0 (`→`).
    Horizontal,
    /// Rectilinear, bit 1 (`↑`).
    Vertical,
    /// Diagonal, bit 0 (`╲`).
    AntiDiagonal,
    /// Diagonal, bit 1 (`╱`).
    Diagonal,
}

impl Polarization {
    pub const ALL: [Polarization; 4] = [
        Polarization::Horizontal,
        Polarization::Vertical,
        Polarization::AntiDiagonal,
        Polarization::Diagonal,
    ];

    /// Basis the symbol was prepared in.
    pub fn basis(self) -> Basis {
        match self {
            Polarization::Horizontal | Polarization::Vertical => Basis::Rectilinear,
            Polarization::AntiDiagonal | Polarization::Diagonal => Basis::Diagonal,
        }
    }

    pub fn glyph(self) -> char {
        match self {
            Polarization::Horizontal => '→',
            Polarization::Vertical => '↑',
            Polarization::AntiDiagonal => '╲',
            Polarization::Diagonal => '╱',
        }
    }
}

impl fmt::Display for Polarization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

/// Outcome of reading a symbol in a given basis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoded {
    /// The measuring basis matched; the bit is recovered with certainty.
    Bit(Bit),
    /// The measuring basis differs from the encoding basis.
    Incompatible,
}

/// Maps a (basis, bit) pair onto its polarization symbol.
pub fn encode(basis: Basis, bit: Bit) -> Polarization {
    match (basis, bit) {
        (Basis::Rectilinear, Bit::Zero) => Polarization::Horizontal,
        (Basis::Rectilinear, Bit::One) => Polarization::Vertical,
        (Basis::Diagonal, Bit::Zero) => Polarization::AntiDiagonal,
        (Basis::Diagonal, Bit::One) => Polarization::Diagonal,
    }
}

/// Reads `symbol` in `basis`.
///
/// Returns [`Decoded::Incompatible`] when `symbol` does not belong to the
/// sub-alphabet of `basis`. That is the expected outcome of a basis
/// mismatch, not an error.
pub fn decode(basis: Basis, symbol: Polarization) -> Decoded {
    match (basis, symbol) {
        (Basis::Rectilinear, Polarization::Horizontal) => Decoded::Bit(Bit::Zero),
        (Basis::Rectilinear, Polarization::Vertical) => Decoded::Bit(Bit::One),
        (Basis::Diagonal, Polarization::AntiDiagonal) => Decoded::Bit(Bit::Zero),
        (Basis::Diagonal, Polarization::Diagonal) => Decoded::Bit(Bit::One),
        _ => Decoded::Incompatible,
    }
}
