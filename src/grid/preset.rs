//! Fixed grid shapes offered to end users.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::partition::GridSpec;

/// The grid shapes offered by the upload form.
///
/// The core accepts any [`GridSpec`]; presets only constrain what the UI
/// offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GridPreset {
    /// 2 rows x 5 columns, ten tiles for a carousel post.
    #[default]
    TwoByFive,

    /// 3 rows x 3 columns, the standard nine-tile grid.
    ThreeByThree,
}

impl GridPreset {
    /// Every preset, in display order.
    pub const ALL: [GridPreset; 2] = [GridPreset::TwoByFive, GridPreset::ThreeByThree];

    /// Grid shape for this preset.
    pub fn spec(self) -> GridSpec {
        match self {
            GridPreset::TwoByFive => GridSpec::new_unchecked(2, 5),
            GridPreset::ThreeByThree => GridSpec::new_unchecked(3, 3),
        }
    }

    /// Short identifier, e.g. `"2x5"`.
    pub fn name(self) -> &'static str {
        match self {
            GridPreset::TwoByFive => "2x5",
            GridPreset::ThreeByThree => "3x3",
        }
    }

    /// Human-readable label for selection lists.
    pub fn label(self) -> &'static str {
        match self {
            GridPreset::TwoByFive => "10 tiles (2x5), carousel",
            GridPreset::ThreeByThree => "9 tiles (3x3), standard grid",
        }
    }
}

impl fmt::Display for GridPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GridPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let spec: GridSpec = s.parse()?;
        GridPreset::ALL
            .into_iter()
            .find(|preset| preset.spec() == spec)
            .ok_or_else(|| {
                format!(
                    "grid '{}' is not a preset (available: {})",
                    s,
                    GridPreset::ALL.map(|p| p.name()).join(", ")
                )
            })
    }
}

impl From<GridPreset> for GridSpec {
    fn from(preset: GridPreset) -> Self {
        preset.spec()
    }
}
