use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Raster slot width in GHz.
pub const GRANULARITY: Decimal = dec!(12.5);

/// Anchor of the raster in THz (N = 0).
pub const CENTRAL_FREQUENCY: Decimal = dec!(193.1);

/// Highest valid slot index; the raster spans `0..=EFFECTIVE_BITS`.
pub const EFFECTIVE_BITS: u16 = 768;

/// Slot index sitting exactly on `CENTRAL_FREQUENCY`.
pub const ZERO_OFFSET: u16 = 284;

/// Bytes needed to pack one bit per raster slot.
pub const NB_OCTECTS: usize = EFFECTIVE_BITS as usize / 8;

/// Occupancy marker for a free slot.
pub const AVAILABLE_SLOT_VALUE: u8 = 255;

/// Occupancy marker for a used slot.
pub const USED_SLOT_VALUE: u8 = 0;

/// Name of the single frequency map a node carries.
pub const C_BAND: &str = "cband";

/// Width substituted when the width table has no entry (GHz).
pub const WIDTH_40: Decimal = dec!(40);

/// Width of a 200G/300G/400G channel in the default table (GHz).
pub const WIDTH_80: Decimal = dec!(80);

/// Fixed-grid channel spacing (GHz).
pub const SLOT_WIDTH_50: Decimal = dec!(50);

/// Raster slots covered by one 50 GHz fixed-grid channel.
pub const NB_SLOTS_100G: u16 = 4;

/// Smallest media channel (slot width × max slots) able to carry a service (GHz).
pub const MIN_USABLE_CHANNEL_WIDTH: Decimal = dec!(37.5);

/// Decimal places expected by 1.2.1 fixed-grid devices.
pub const FIXED_GRID_FREQUENCY_PRECISION: u32 = 4;

/// Decimal places expected by flex-grid devices.
pub const FLEX_GRID_FREQUENCY_PRECISION: u32 = 5;

/// Largest number of decimals a frequency can be rounded to.
pub const MAX_FREQUENCY_PRECISION: u32 = 28;

/// Separator between the lower and higher slot number in a slot name.
pub const SPECTRAL_SLOT_SEPARATOR: &str = ":";

/// Separator between parameters of a spectrum identifier.
pub const NAME_PARAMETERS_SEPARATOR: &str = "-";
