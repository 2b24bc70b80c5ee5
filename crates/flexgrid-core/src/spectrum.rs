//! Spectrum of one service, built from a service-path request.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::constants::{
    EFFECTIVE_BITS, NAME_PARAMETERS_SEPARATOR, SPECTRAL_SLOT_SEPARATOR, WIDTH_40,
};
use crate::error::{GridError, Result};
use crate::grid::{
    FrequencyGhz, FrequencyThz, SlotIndex, central_frequency, start_frequency_of_index,
    stop_frequency_of_index,
};
use crate::modulation::ModulationFormat;

/// Spectrum fields of a service-path request. Anything but the slot numbers may be absent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ServicePathSpectrum {
    pub lower_spectral_slot_number: Option<u32>,
    pub higher_spectral_slot_number: Option<u32>,
    pub wave_number: Option<u32>,
    pub min_freq: Option<FrequencyThz>,
    pub max_freq: Option<FrequencyThz>,
    pub center_freq: Option<FrequencyThz>,
    pub nmc_width: Option<FrequencyGhz>,
    pub modulation_format: Option<ModulationFormat>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct SpectrumInformation {
    lower_spectral_slot_number: SlotIndex,
    higher_spectral_slot_number: SlotIndex,
    wave_length: Option<u32>,
    min_frequency: FrequencyThz,
    max_frequency: FrequencyThz,
    center_frequency: FrequencyThz,
    width: FrequencyGhz,
    modulation_format: ModulationFormat,
}

impl SpectrumInformation {
    /// Resolve the spectrum of a service path, deriving any missing
    /// frequency from the spectral slot numbers.
    pub fn from_service_path(input: &ServicePathSpectrum) -> Result<Self> {
        let (Some(lower), Some(higher)) = (
            input.lower_spectral_slot_number,
            input.higher_spectral_slot_number,
        ) else {
            tracing::error!("low and higher spectral slot numbers cannot be null");
            return Err(GridError::MissingSlotNumbers);
        };
        let lower = spectral_slot(lower)?;
        let higher = spectral_slot(higher)?;

        let min_frequency = input
            .min_freq
            .unwrap_or_else(|| start_frequency_of_index(lower - 1));
        let max_frequency = input
            .max_freq
            .unwrap_or_else(|| stop_frequency_of_index(higher - 1));
        let center_frequency = match input.center_freq {
            Some(center) => center,
            None => central_frequency(min_frequency, max_frequency, None)?,
        };

        Ok(Self {
            lower_spectral_slot_number: lower,
            higher_spectral_slot_number: higher,
            wave_length: input.wave_number,
            min_frequency,
            max_frequency,
            center_frequency,
            width: input.nmc_width.map_or(WIDTH_40, |w| w.normalize()),
            modulation_format: input.modulation_format.unwrap_or(ModulationFormat::DpQpsk),
        })
    }

    pub fn lower_spectral_slot_number(&self) -> SlotIndex {
        self.lower_spectral_slot_number
    }

    pub fn higher_spectral_slot_number(&self) -> SlotIndex {
        self.higher_spectral_slot_number
    }

    pub fn wave_length(&self) -> Option<u32> {
        self.wave_length
    }

    pub fn min_frequency(&self) -> FrequencyThz {
        self.min_frequency
    }

    pub fn max_frequency(&self) -> FrequencyThz {
        self.max_frequency
    }

    pub fn center_frequency(&self) -> FrequencyThz {
        self.center_frequency
    }

    pub fn width(&self) -> FrequencyGhz {
        self.width
    }

    pub fn modulation_format(&self) -> ModulationFormat {
        self.modulation_format
    }

    /// `"<lower>:<higher>"`.
    pub fn spectral_slot_name(&self) -> String {
        format!(
            "{}{SPECTRAL_SLOT_SEPARATOR}{}",
            self.lower_spectral_slot_number, self.higher_spectral_slot_number
        )
    }

    /// Interface identifier: `params` joined by `-`, then the slot name.
    pub fn identifier(&self, params: &[&str]) -> String {
        let mut parts: Vec<String> = params.iter().map(|p| p.to_string()).collect();
        parts.push(self.spectral_slot_name());
        parts.join(NAME_PARAMETERS_SEPARATOR)
    }

    /// Raster indices (0-based) covered by the spectral slots, for an
    /// [`AvailFreqMap`](crate::AvailFreqMap).
    pub fn occupied_slots(&self) -> RangeInclusive<SlotIndex> {
        let first = self.lower_spectral_slot_number - 1;
        let last = self.higher_spectral_slot_number.max(self.lower_spectral_slot_number) - 1;
        first..=last
    }
}

/// Spectral slot numbers are 1-based over the raster.
fn spectral_slot(number: u32) -> Result<SlotIndex> {
    if !(1..=u32::from(EFFECTIVE_BITS)).contains(&number) {
        return Err(GridError::SlotOutOfRange { slot: number });
    }
    Ok(number as SlotIndex)
}
