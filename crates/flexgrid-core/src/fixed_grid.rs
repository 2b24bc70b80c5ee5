//! 50 GHz, 96-channel fixed grid used by 1.2.1 devices.
//!
//! Wavelength 1 sits at 196.1 THz, wavelength 96 at 191.35 THz.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::Serialize;

use crate::constants::CENTRAL_FREQUENCY;
use crate::error::{GridError, Result};
use crate::grid::{FrequencyThz, round_half_even};

/// Number of channels in the fixed-grid plan.
pub const FIXED_GRID_CHANNELS: u32 = 96;

/// Wavelength number whose center sits on `CENTRAL_FREQUENCY`.
const PLAN_OFFSET: u32 = 61;

const CHANNEL_SPACING: Decimal = dec!(0.05);

/// Half of the 40 GHz signal width, in THz.
const HALF_SIGNAL_WIDTH: Decimal = dec!(0.02);

/// Speed of light expressed in nm·THz.
const SPEED_OF_LIGHT: Decimal = dec!(299792.458);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct FixedGridChannel {
    pub wavelength_number: u32,
    pub center_frequency: FrequencyThz,
    pub start_frequency: FrequencyThz,
    pub stop_frequency: FrequencyThz,
    /// Wavelength in nm.
    pub wavelength: Decimal,
}

impl FixedGridChannel {
    /// Channel for `wavelength_number` (1..=96), frequencies at `precision` decimals.
    pub fn from_wavelength(wavelength_number: u32, precision: u32) -> Result<Self> {
        if !(1..=FIXED_GRID_CHANNELS).contains(&wavelength_number) {
            return Err(GridError::InvalidWavelength(wavelength_number));
        }
        let steps = i64::from(PLAN_OFFSET) - i64::from(wavelength_number);
        let center = CENTRAL_FREQUENCY + CHANNEL_SPACING * Decimal::from(steps);
        let wavelength = (SPEED_OF_LIGHT / center)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);

        Ok(Self {
            wavelength_number,
            center_frequency: round_half_even(center, precision),
            start_frequency: round_half_even(center - HALF_SIGNAL_WIDTH, precision),
            stop_frequency: round_half_even(center + HALF_SIGNAL_WIDTH, precision),
            wavelength,
        })
    }

    /// Channel whose center is exactly `frequency`.
    pub fn from_center_frequency(frequency: FrequencyThz, precision: u32) -> Result<Self> {
        let out_of_range = || GridError::FrequencyOutOfRange { frequency };
        let steps = frequency
            .checked_sub(CENTRAL_FREQUENCY)
            .and_then(|d| d.checked_div(CHANNEL_SPACING))
            .ok_or_else(out_of_range)?;
        if !steps.fract().is_zero() {
            return Err(out_of_range());
        }
        let number = Decimal::from(PLAN_OFFSET)
            .checked_sub(steps)
            .and_then(|n| n.to_u32())
            .ok_or_else(out_of_range)?;
        Self::from_wavelength(number, precision).map_err(|_| out_of_range())
    }
}
