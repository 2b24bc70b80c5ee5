use std::fmt;

use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Frequency lands outside the `0..=EFFECTIVE_BITS` raster.
    FrequencyOutOfRange { frequency: Decimal },
    /// Collected granularities cannot be reconciled to an exact common multiple.
    NoLeastCommonMultiple(String),
    InvalidGranularity(String),
    MissingSlotNumbers,
    SlotOutOfRange { slot: u32 },
    InvalidWavelength(u32),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::FrequencyOutOfRange { frequency } => {
                write!(f, "frequency not in range: {frequency}")
            }
            GridError::NoLeastCommonMultiple(msg) => {
                write!(f, "no least common multiple: {msg}")
            }
            GridError::InvalidGranularity(msg) => write!(f, "invalid granularity: {msg}"),
            GridError::MissingSlotNumbers => {
                write!(f, "low and higher spectral slot numbers cannot be null")
            }
            GridError::SlotOutOfRange { slot } => write!(f, "spectral slot out of range: {slot}"),
            GridError::InvalidWavelength(n) => {
                write!(f, "wavelength number {n} not in fixed grid plan")
            }
        }
    }
}

impl std::error::Error for GridError {}

pub type Result<T> = std::result::Result<T, GridError>;
