use serde::{Deserialize, Serialize};

/// Where a crossing token is placed relative to the interpolated chord.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrossingMethod {
    /// The chord itself, oriented from its first to its second crossing.
    #[default]
    One,
    /// Unit token centred on the chord midpoint, perpendicular to the gradient.
    Two,
    /// Unit token centred on the chord's first crossing, perpendicular to the
    /// gradient.
    Three,
}
