use std::fmt;

use serde::{Deserialize, Serialize};

/// Character-density preset for the camera mirror.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "ts-bindings", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts-bindings", ts(export))]
pub enum MirrorVariant {
    #[default]
    V1,
    V2,
    V3,
}

impl MirrorVariant {
    pub const ALL: [MirrorVariant; 3] = [Self::V1, Self::V2, Self::V3];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::V1 => "v1",
            Self::V2 => "v2",
            Self::V3 => "v3",
        }
    }

    /// The command-line flag selecting this variant, e.g. `--v2`.
    pub fn flag(self) -> &'static str {
        match self {
            Self::V1 => "--v1",
            Self::V2 => "--v2",
            Self::V3 => "--v3",
        }
    }

    /// Parse a `--vN` flag, ignoring case.
    pub fn from_flag(flag: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|v| v.flag().eq_ignore_ascii_case(flag))
    }

    /// Density ramp from dark to bright. Indexed by brightness.
    pub fn density(self) -> &'static str {
        match self {
            Self::V1 => "        .:░▒▓█",
            Self::V2 => "       .:-i|=+%O#@",
            Self::V3 => "Ñ@#W$9876543210?!abc;:+=-,._          ",
        }
    }

    /// All flags joined for error and help messages: `--v1, --v2, --v3`.
    pub fn flag_list() -> String {
        Self::ALL
            .iter()
            .map(|v| v.flag())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for MirrorVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
