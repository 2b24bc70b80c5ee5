//! Occupancy of the C-band raster, one byte per slot.

use std::ops::RangeInclusive;

use serde::Serialize;

use crate::constants::{
    AVAILABLE_SLOT_VALUE, C_BAND, EFFECTIVE_BITS, GRANULARITY, NB_OCTECTS, USED_SLOT_VALUE,
};
use crate::error::{GridError, Result};
use crate::grid::{FrequencyGhz, FrequencyThz, SlotIndex, start_edge_frequency};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct AvailFreqMap {
    map_name: String,
    freq_map_granularity: FrequencyGhz,
    start_edge_freq: FrequencyThz,
    effective_bits: u16,
    slots: Vec<u8>,
}

impl AvailFreqMap {
    /// A `cband` map with every slot available.
    pub fn fully_available() -> Self {
        Self {
            map_name: C_BAND.to_string(),
            freq_map_granularity: GRANULARITY,
            start_edge_freq: start_edge_frequency(),
            effective_bits: EFFECTIVE_BITS,
            slots: vec![AVAILABLE_SLOT_VALUE; usize::from(EFFECTIVE_BITS)],
        }
    }

    pub fn map_name(&self) -> &str {
        &self.map_name
    }

    pub fn granularity(&self) -> FrequencyGhz {
        self.freq_map_granularity
    }

    pub fn start_edge_frequency(&self) -> FrequencyThz {
        self.start_edge_freq
    }

    pub fn effective_bits(&self) -> u16 {
        self.effective_bits
    }

    pub fn slots(&self) -> &[u8] {
        &self.slots
    }

    pub fn is_available(&self, slot: SlotIndex) -> Result<bool> {
        let slot = self.checked(slot)?;
        Ok(self.slots[slot] == AVAILABLE_SLOT_VALUE)
    }

    /// Whether every slot of `range` is free.
    pub fn is_range_available(&self, range: RangeInclusive<SlotIndex>) -> Result<bool> {
        let range = self.checked_range(range)?;
        Ok(self.slots[range].iter().all(|&b| b == AVAILABLE_SLOT_VALUE))
    }

    pub fn mark_used(&mut self, range: RangeInclusive<SlotIndex>) -> Result<()> {
        self.fill(range, USED_SLOT_VALUE)
    }

    pub fn mark_available(&mut self, range: RangeInclusive<SlotIndex>) -> Result<()> {
        self.fill(range, AVAILABLE_SLOT_VALUE)
    }

    pub fn available_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|&&b| b == AVAILABLE_SLOT_VALUE)
            .count()
    }

    /// Device-model bitmap: bit `i % 8` of byte `i / 8` set when slot `i` is free.
    pub fn to_octets(&self) -> Vec<u8> {
        let mut octets = vec![0u8; NB_OCTECTS];
        for (i, &slot) in self.slots.iter().enumerate() {
            if slot == AVAILABLE_SLOT_VALUE {
                octets[i / 8] |= 1 << (i % 8);
            }
        }
        octets
    }

    fn fill(&mut self, range: RangeInclusive<SlotIndex>, value: u8) -> Result<()> {
        let range = self.checked_range(range)?;
        self.slots[range].fill(value);
        Ok(())
    }

    fn checked(&self, slot: SlotIndex) -> Result<usize> {
        let index = usize::from(slot);
        if index >= self.slots.len() {
            return Err(GridError::SlotOutOfRange {
                slot: u32::from(slot),
            });
        }
        Ok(index)
    }

    fn checked_range(&self, range: RangeInclusive<SlotIndex>) -> Result<RangeInclusive<usize>> {
        let (start, end) = range.into_inner();
        if start > end {
            return Err(GridError::SlotOutOfRange {
                slot: u32::from(start),
            });
        }
        Ok(self.checked(start)?..=self.checked(end)?)
    }
}

impl Default for AvailFreqMap {
    fn default() -> Self {
        Self::fully_available()
    }
}
