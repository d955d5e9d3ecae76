//! Scalar style values shared by several facets.

use serde::{Deserialize, Serialize};

/// A corner radius: unitless pixels, or a percentage string such as `"50%"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Radius {
    Px(f64),
    Percent(String),
}

impl Radius {
    pub fn percent(value: f64) -> Self {
        Radius::Percent(format!("{}%", format_number(value)))
    }

    pub fn is_zero(&self) -> bool {
        matches!(self, Radius::Px(v) if *v == 0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalKeyword {
    Normal,
}

/// Line height in pixels, or `normal` when no exact value can be computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LineHeight {
    Px(f64),
    Normal(NormalKeyword),
}

impl LineHeight {
    pub const NORMAL: LineHeight = LineHeight::Normal(NormalKeyword::Normal);
}

/// Rounds to two decimals, the precision emitted for geometry.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Formats a number without a trailing `.0`.
pub fn format_number(value: f64) -> String {
    let rounded = round2(value);
    if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        format!("{}", rounded)
    }
}
