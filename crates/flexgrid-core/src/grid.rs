//! Conversions between absolute frequency, raster slot index and N value.
//!
//! All frequency arithmetic is exact decimal. Rounding only happens where a
//! device expects a fixed number of decimals, and is always half-to-even.

use std::collections::HashMap;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::config::GridConfig;
use crate::constants::{
    CENTRAL_FREQUENCY, EFFECTIVE_BITS, GRANULARITY, NB_SLOTS_100G, ZERO_OFFSET,
};
use crate::error::{GridError, Result};
use crate::fixed_grid::FixedGridChannel;
use crate::modulation::ModulationFormat;

/// Frequency in THz.
pub type FrequencyThz = Decimal;

/// Frequency or width in GHz.
pub type FrequencyGhz = Decimal;

/// Position on the raster, `0..=EFFECTIVE_BITS`.
pub type SlotIndex = u16;

const GHZ_PER_THZ: Decimal = dec!(1000);
const MHZ_PER_THZ: Decimal = dec!(1000000);

/// Start frequency of the slot at `index`.
pub fn start_frequency_of_index(index: SlotIndex) -> FrequencyThz {
    CENTRAL_FREQUENCY + GRANULARITY * Decimal::from(n_from_index(index)) / GHZ_PER_THZ
}

/// Stop frequency of the slot at `index`, one granularity above its start.
pub fn stop_frequency_of_index(index: SlotIndex) -> FrequencyThz {
    start_frequency_of_index(index) + GRANULARITY / GHZ_PER_THZ
}

/// Start frequency of index 0.
pub fn start_edge_frequency() -> FrequencyThz {
    start_frequency_of_index(0)
}

/// Raster index of `frequency`, rounded half-to-even.
///
/// Fails with [`GridError::FrequencyOutOfRange`] when the index falls outside
/// `0..=EFFECTIVE_BITS`.
pub fn index_of_frequency(frequency: FrequencyThz) -> Result<SlotIndex> {
    let out_of_range = || GridError::FrequencyOutOfRange { frequency };
    let offset = frequency
        .checked_sub(CENTRAL_FREQUENCY)
        .and_then(|d| d.checked_mul(GHZ_PER_THZ))
        .and_then(|d| d.checked_div(GRANULARITY))
        .and_then(|d| d.checked_add(Decimal::from(ZERO_OFFSET)))
        .ok_or_else(out_of_range)?;

    let index = offset
        .round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven)
        .to_i64()
        .ok_or_else(out_of_range)?;
    if !(0..=i64::from(EFFECTIVE_BITS)).contains(&index) {
        return Err(out_of_range());
    }
    Ok(index as SlotIndex)
}

/// Lower spectral index for `frequency`: one above the raster index.
///
/// Device models number a slot's lower edge one step above its higher edge,
/// so the two helpers below are deliberately not symmetric.
pub fn lower_slot_index(frequency: FrequencyThz) -> Result<SlotIndex> {
    index_of_frequency(frequency).map(|i| i + 1)
}

/// Higher spectral index for `frequency`: the raster index itself.
pub fn higher_slot_index(frequency: FrequencyThz) -> Result<SlotIndex> {
    index_of_frequency(frequency)
}

/// N value of `index`, in `-284..=484`.
pub fn n_from_index(index: SlotIndex) -> i32 {
    i32::from(index) - i32::from(ZERO_OFFSET)
}

/// Human-readable channel label, e.g. `N+0` or `N-12`.
pub fn channel_name(index: SlotIndex) -> String {
    format!("N{:+}", n_from_index(index))
}

/// Legacy 1.2.1 wavelength number for a spectrum assignment starting at `index`.
pub fn wavelength_index_from_spectrum_assignment(index: SlotIndex) -> u16 {
    EFFECTIVE_BITS.saturating_sub(index) / NB_SLOTS_100G
}

/// Midpoint of `min` and `max`, optionally fixed to `precision` decimals.
///
/// Fails with [`GridError::FrequencyOutOfRange`] when the inputs are too
/// large to add exactly.
pub fn central_frequency(
    min: FrequencyThz,
    max: FrequencyThz,
    precision: Option<u32>,
) -> Result<FrequencyThz> {
    let center = midpoint(min, max)?;
    Ok(match precision {
        Some(p) => round_half_even(center, p),
        None => center,
    })
}

/// Midpoint expressed in MHz for OpenConfig devices.
pub fn central_frequency_open_config(
    min: FrequencyThz,
    max: FrequencyThz,
    precision: Option<u32>,
) -> Result<Decimal> {
    let center = midpoint(min, max)?
        .checked_mul(MHZ_PER_THZ)
        .ok_or_else(|| out_of_range(min, max))?;
    Ok(match precision {
        Some(p) => round_half_even(center, p),
        None => center,
    })
}

/// Convert optical power from dBm to watts.
pub fn dbm_to_watts(dbm: f64) -> f64 {
    10f64.powf((dbm - 30.0) / 10.0)
}

fn midpoint(min: FrequencyThz, max: FrequencyThz) -> Result<FrequencyThz> {
    min.checked_add(max)
        .and_then(|sum| sum.checked_div(dec!(2)))
        .ok_or_else(|| out_of_range(min, max))
}

/// Blame whichever bound is further from zero.
fn out_of_range(min: FrequencyThz, max: FrequencyThz) -> GridError {
    let frequency = if min.abs() >= max.abs() { min } else { max };
    GridError::FrequencyOutOfRange { frequency }
}

/// Round half-to-even and pad to exactly `precision` decimals.
pub(crate) fn round_half_even(value: Decimal, precision: u32) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(precision, RoundingStrategy::MidpointNearestEven);
    rounded.rescale(precision);
    rounded
}

/// Grid arithmetic bound to one immutable [`GridConfig`].
#[derive(Clone, Debug)]
pub struct GridMath {
    config: GridConfig,
    widths: HashMap<(u32, ModulationFormat), FrequencyGhz>,
}

impl GridMath {
    pub fn new(config: GridConfig) -> Self {
        let widths = config
            .widths
            .iter()
            .map(|e| ((e.rate, e.modulation), e.width))
            .collect();
        Self { config, widths }
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Spectrum width for a service rate (Gbit/s) and modulation format.
    ///
    /// Unknown pairs fall back to the configured default width; this never fails.
    pub fn width_for_rate_and_modulation(
        &self,
        rate: u32,
        modulation: ModulationFormat,
    ) -> FrequencyGhz {
        match self.widths.get(&(rate, modulation)) {
            Some(width) => *width,
            None => {
                let width = self.config.default_width;
                tracing::warn!(
                    "no width found for service rate {rate} and modulation format {modulation}, set width to {width}"
                );
                width
            }
        }
    }

    /// Central frequency at the precision of 1.2.1 fixed-grid devices.
    pub fn fixed_grid_central_frequency(
        &self,
        min: FrequencyThz,
        max: FrequencyThz,
    ) -> Result<FrequencyThz> {
        central_frequency(min, max, Some(self.config.fixed_grid_precision))
    }

    /// Central frequency at the precision of flex-grid devices.
    pub fn flex_grid_central_frequency(
        &self,
        min: FrequencyThz,
        max: FrequencyThz,
    ) -> Result<FrequencyThz> {
        central_frequency(min, max, Some(self.config.flex_grid_precision))
    }

    /// Fixed-grid channel for `wavelength_number` at the configured precision.
    pub fn fixed_grid_channel(&self, wavelength_number: u32) -> Result<FixedGridChannel> {
        FixedGridChannel::from_wavelength(wavelength_number, self.config.fixed_grid_precision)
    }
}

impl Default for GridMath {
    fn default() -> Self {
        Self::new(GridConfig::default())
    }
}
