//! OpenROADM DWDM flex-grid arithmetic.
//!
//! Converts between absolute frequency, raster slot index and N value on the
//! 12.5 GHz C-band raster anchored at 193.1 THz, and reconciles the
//! center-frequency granularities of every node on a path through their
//! least common multiple.
//!
//! Zero I/O. Every frequency is an exact decimal so results agree bit for bit
//! with the fixed-precision strings devices expect.

pub mod capabilities;
pub mod config;
pub mod constants;
pub mod error;
pub mod fixed_grid;
pub mod freq_map;
pub mod granularity;
pub mod grid;
pub mod modulation;
pub mod spectrum;

pub use capabilities::{McCapabilities, McNode};
pub use config::{GridConfig, WidthEntry, default_width_table};
pub use constants::{
    AVAILABLE_SLOT_VALUE, CENTRAL_FREQUENCY, EFFECTIVE_BITS, GRANULARITY, MAX_FREQUENCY_PRECISION,
    MIN_USABLE_CHANNEL_WIDTH, NB_OCTECTS, USED_SLOT_VALUE, WIDTH_40, ZERO_OFFSET,
};
pub use error::{GridError, Result};
pub use fixed_grid::FixedGridChannel;
pub use freq_map::AvailFreqMap;
pub use granularity::{GranularityCollection, IntoGranularity};
pub use grid::{
    FrequencyGhz, FrequencyThz, GridMath, SlotIndex, central_frequency,
    central_frequency_open_config, channel_name, dbm_to_watts, higher_slot_index,
    index_of_frequency, lower_slot_index, n_from_index, start_edge_frequency,
    start_frequency_of_index, stop_frequency_of_index, wavelength_index_from_spectrum_assignment,
};
pub use modulation::ModulationFormat;
pub use spectrum::{ServicePathSpectrum, SpectrumInformation};
