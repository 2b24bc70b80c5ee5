use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// OpenROADM modulation formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModulationFormat {
    Bpsk,
    DcDpBpsk,
    Qpsk,
    DpQpsk,
    Qam16,
    DpQam16,
    DcDpQam16,
    Qam8,
    DpQam8,
    DcDpQam8,
}

impl ModulationFormat {
    pub const ALL: [ModulationFormat; 10] = [
        Self::Bpsk,
        Self::DcDpBpsk,
        Self::Qpsk,
        Self::DpQpsk,
        Self::Qam16,
        Self::DpQam16,
        Self::DcDpQam16,
        Self::Qam8,
        Self::DpQam8,
        Self::DcDpQam8,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bpsk => "bpsk",
            Self::DcDpBpsk => "dc-dp-bpsk",
            Self::Qpsk => "qpsk",
            Self::DpQpsk => "dp-qpsk",
            Self::Qam16 => "qam16",
            Self::DpQam16 => "dp-qam16",
            Self::DcDpQam16 => "dc-dp-qam16",
            Self::Qam8 => "qam8",
            Self::DpQam8 => "dp-qam8",
            Self::DcDpQam8 => "dc-dp-qam8",
        }
    }
}

impl fmt::Display for ModulationFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModulationFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == lowered)
            .ok_or_else(|| format!("unknown modulation format: {s}"))
    }
}
