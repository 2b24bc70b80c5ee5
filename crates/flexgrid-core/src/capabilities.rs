//! Media-channel capabilities reported by ROADM degrees and SRGs.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{MIN_USABLE_CHANNEL_WIDTH, SLOT_WIDTH_50};
use crate::grid::FrequencyGhz;

/// Node carrying media-channel capabilities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum McNode {
    Degree(u16),
    Srg(u16),
}

impl McNode {
    /// Name of the MC node in the port mapping, e.g. `DEG1-TTP` or `SRG2-PP`.
    pub fn name(&self) -> String {
        match self {
            Self::Degree(n) => format!("DEG{n}-TTP"),
            Self::Srg(n) => format!("SRG{n}-PP"),
        }
    }
}

impl fmt::Display for McNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Degree(n) => write!(f, "degree {n}"),
            Self::Srg(n) => write!(f, "SRG {n}"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct McCapabilities {
    pub center_freq_granularity: FrequencyGhz,
    pub slot_width_granularity: FrequencyGhz,
    pub min_slots: u32,
    pub max_slots: u32,
}

impl McCapabilities {
    pub fn new(
        center_freq_granularity: FrequencyGhz,
        slot_width_granularity: FrequencyGhz,
        min_slots: u32,
        max_slots: u32,
    ) -> Self {
        Self {
            center_freq_granularity,
            slot_width_granularity,
            min_slots,
            max_slots,
        }
    }

    /// Capabilities assumed for a node that reports none: one 50 GHz slot.
    pub fn default_for_missing() -> Self {
        Self::new(SLOT_WIDTH_50, SLOT_WIDTH_50, 1, 1)
    }

    /// Use `reported` if present, otherwise the 50 GHz default. Logs when the
    /// default is substituted or when the result cannot carry a channel.
    pub fn resolve(node_id: &str, node: McNode, reported: Option<McCapabilities>) -> Self {
        let caps = reported.unwrap_or_else(|| {
            tracing::warn!(
                "no mc-capabilities found on {node_id} for {node}, using default 50 GHz grid"
            );
            Self::default_for_missing()
        });
        if !caps.is_usable() {
            tracing::warn!(
                "mc-capabilities of {node_id} {node} unusable: slot width granularity {} GHz x {} max slots < {MIN_USABLE_CHANNEL_WIDTH} GHz",
                caps.slot_width_granularity,
                caps.max_slots
            );
        }
        caps
    }

    /// Widest media channel the node can build.
    pub fn max_channel_width(&self) -> FrequencyGhz {
        self.slot_width_granularity * Decimal::from(self.max_slots)
    }

    /// Whether the widest media channel reaches the minimum usable width.
    pub fn is_usable(&self) -> bool {
        self.max_channel_width() >= MIN_USABLE_CHANNEL_WIDTH
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_is_single_50ghz_slot() {
        let caps = McCapabilities::default_for_missing();
        assert_eq!(caps.center_freq_granularity, dec!(50));
        assert_eq!(caps.slot_width_granularity, dec!(50));
        assert_eq!((caps.min_slots, caps.max_slots), (1, 1));
        assert!(caps.is_usable());
    }

    #[test]
    fn test_usable_threshold() {
        assert!(McCapabilities::new(dec!(6.25), dec!(12.5), 1, 3).is_usable());
        assert!(!McCapabilities::new(dec!(6.25), dec!(12.5), 1, 2).is_usable());
        assert_eq!(
            McCapabilities::new(dec!(6.25), dec!(12.5), 1, 14).max_channel_width(),
            dec!(175)
        );
    }

    #[test]
    fn test_resolve_prefers_reported() {
        let reported = McCapabilities::new(dec!(6.25), dec!(12.5), 1, 14);
        assert_eq!(
            McCapabilities::resolve("ROADM-A", McNode::Degree(1), Some(reported)),
            reported
        );
        assert_eq!(
            McCapabilities::resolve("ROADM-A", McNode::Srg(1), None),
            McCapabilities::default_for_missing()
        );
    }

    #[test]
    fn test_node_names() {
        assert_eq!(McNode::Degree(1).name(), "DEG1-TTP");
        assert_eq!(McNode::Srg(3).name(), "SRG3-PP");
    }
}
