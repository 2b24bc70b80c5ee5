//! Immutable grid configuration handed to [`GridMath`](crate::GridMath).
//!
//! Holds the (rate, modulation) → width table and the device precisions.
//! Built once, then only read.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{
    FIXED_GRID_FREQUENCY_PRECISION, FLEX_GRID_FREQUENCY_PRECISION, WIDTH_40, WIDTH_80,
};
use crate::grid::FrequencyGhz;
use crate::modulation::ModulationFormat;

/// One row of the width table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidthEntry {
    /// Service rate in Gbit/s.
    pub rate: u32,
    pub modulation: ModulationFormat,
    pub width: FrequencyGhz,
}

impl WidthEntry {
    pub fn new(rate: u32, modulation: ModulationFormat, width: Decimal) -> Self {
        Self {
            rate,
            modulation,
            width,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Width returned when the table has no entry for a (rate, modulation) pair.
    pub default_width: FrequencyGhz,
    pub fixed_grid_precision: u32,
    pub flex_grid_precision: u32,
    pub widths: Vec<WidthEntry>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            default_width: WIDTH_40,
            fixed_grid_precision: FIXED_GRID_FREQUENCY_PRECISION,
            flex_grid_precision: FLEX_GRID_FREQUENCY_PRECISION,
            widths: default_width_table(),
        }
    }
}

/// Widths for the standard OpenROADM transponder rates.
pub fn default_width_table() -> Vec<WidthEntry> {
    vec![
        WidthEntry::new(100, ModulationFormat::DpQpsk, WIDTH_40),
        WidthEntry::new(200, ModulationFormat::DpQpsk, WIDTH_80),
        WidthEntry::new(300, ModulationFormat::DpQam8, WIDTH_80),
        WidthEntry::new(400, ModulationFormat::DpQam16, WIDTH_80),
    ]
}
