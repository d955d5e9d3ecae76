//! Raw design node types, in the JSON shape the Figma REST API and plugin
//! walkers emit.

use palette::Srgb;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A raw design node as produced by the external walker.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawNode {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default = "default_true")]
    pub visible: bool,
    /// Each child is parsed on its own; see [`RawNode::schema_error`].
    #[serde(default, deserialize_with = "lenient_children")]
    pub children: Vec<RawNode>,
    pub absolute_bounding_box: Option<RawBoundingBox>,
    pub characters: Option<String>,
    pub style: Option<RawTypeStyle>,
    #[serde(default)]
    pub fills: Vec<RawPaint>,
    #[serde(default)]
    pub strokes: Vec<RawPaint>,
    pub stroke_weight: Option<f64>,
    pub individual_stroke_weights: Option<RawStrokeWeights>,
    #[serde(default)]
    pub stroke_dashes: Vec<f64>,
    pub corner_radius: Option<f64>,
    /// Top-left, top-right, bottom-right, bottom-left.
    pub rectangle_corner_radii: Option<[f64; 4]>,
    #[serde(default)]
    pub effects: Vec<RawEffect>,
    pub opacity: Option<f64>,
    /// Degrees, counter-clockwise.
    pub rotation: Option<f64>,
    #[serde(default)]
    pub clips_content: bool,
    pub layout_mode: Option<String>,
    pub layout_wrap: Option<String>,
    pub primary_axis_align_items: Option<String>,
    pub counter_axis_align_items: Option<String>,
    pub item_spacing: Option<f64>,
    pub counter_axis_spacing: Option<f64>,
    pub padding_top: Option<f64>,
    pub padding_right: Option<f64>,
    pub padding_bottom: Option<f64>,
    pub padding_left: Option<f64>,
    pub layout_positioning: Option<String>,
    pub layout_grow: Option<f64>,
    pub layout_align: Option<String>,
    /// Main component name for `INSTANCE` nodes.
    pub component_name: Option<String>,
    #[serde(default)]
    pub component_properties: BTreeMap<String, RawComponentProperty>,
    /// Set on a child that did not match the node schema. Only `id`, `name`,
    /// `type` and `visible` are recovered from it.
    #[serde(skip)]
    pub schema_error: Option<String>,
}

fn default_true() -> bool {
    true
}

fn lenient_children<'de, D>(deserializer: D) -> Result<Vec<RawNode>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(values.into_iter().map(RawNode::from_child_value).collect())
}

impl RawNode {
    /// Parses one child, keeping what can be recovered when it is malformed.
    fn from_child_value(value: Value) -> RawNode {
        let text = |key: &str| {
            value
                .get(key)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        let id = text("id");
        let name = text("name");
        let node_type = text("type");
        let visible = value
            .get("visible")
            .and_then(Value::as_bool)
            .unwrap_or(true);

        match serde_json::from_value::<RawNode>(value) {
            Ok(node) => node,
            Err(err) => {
                log::debug!("child '{}' does not match the node schema: {}", id, err);
                RawNode {
                    id,
                    name,
                    node_type,
                    visible,
                    schema_error: Some(err.to_string()),
                    ..RawNode::default()
                }
            }
        }
    }

    pub fn is_text(&self) -> bool {
        self.node_type == "TEXT"
    }

    pub fn is_auto_layout(&self) -> bool {
        matches!(
            self.layout_mode.as_deref(),
            Some("HORIZONTAL") | Some("VERTICAL")
        )
    }

    pub fn is_absolutely_positioned(&self) -> bool {
        self.layout_positioning.as_deref() == Some("ABSOLUTE")
    }

    pub fn visible_fills(&self) -> impl Iterator<Item = &RawPaint> {
        self.fills.iter().filter(|p| p.visible)
    }

    /// The first image fill, if any.
    pub fn image_fill(&self) -> Option<&RawPaint> {
        self.visible_fills().find(|p| p.paint_type == "IMAGE")
    }

    /// Characters of the first text node in this subtree (pre-order).
    pub fn first_text(&self) -> Option<&str> {
        if self.is_text() {
            return self.characters.as_deref();
        }
        self.children
            .iter()
            .filter(|c| c.visible)
            .find_map(RawNode::first_text)
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawBoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawStrokeWeights {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTypeStyle {
    pub font_family: Option<String>,
    pub font_size: Option<f64>,
    pub font_weight: Option<f64>,
    #[serde(default)]
    pub italic: bool,
    pub line_height_px: Option<f64>,
    pub line_height_unit: Option<String>,
    pub letter_spacing: Option<f64>,
    pub text_align_horizontal: Option<String>,
    pub text_align_vertical: Option<String>,
    pub text_case: Option<String>,
    pub text_decoration: Option<String>,
    pub text_truncation: Option<String>,
    pub max_lines: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPaint {
    #[serde(rename = "type")]
    pub paint_type: String,
    #[serde(default = "default_true")]
    pub visible: bool,
    pub color: Option<RawColor>,
    pub opacity: Option<f64>,
    /// Resolved image URL for `IMAGE` paints.
    pub image_ref: Option<String>,
    pub scale_mode: Option<String>,
    #[serde(default)]
    pub gradient_stops: Vec<RawColorStop>,
    /// Gradient angle in degrees, CSS convention.
    pub gradient_angle: Option<f64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawColorStop {
    pub color: RawColor,
    pub position: f64,
}

/// RGBA color with 0.0-1.0 channels.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawColor {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    #[serde(default = "default_alpha")]
    pub a: f64,
}

fn default_alpha() -> f64 {
    1.0
}

impl RawColor {
    /// Convert to a hex color string (e.g., "#ff8000").
    pub fn to_hex(&self) -> String {
        let rgb: Srgb<u8> = self.srgb().into_format();
        format!("#{:02x}{:02x}{:02x}", rgb.red, rgb.green, rgb.blue)
    }

    /// CSS color with `extra_opacity` applied: hex when opaque, `rgba()` otherwise.
    pub fn to_css(&self, extra_opacity: Option<f64>) -> String {
        let alpha = (self.a * extra_opacity.unwrap_or(1.0)).clamp(0.0, 1.0);
        if alpha >= 1.0 {
            return self.to_hex();
        }
        let rgb: Srgb<u8> = self.srgb().into_format();
        format!(
            "rgba({}, {}, {}, {})",
            rgb.red,
            rgb.green,
            rgb.blue,
            crate::style::value::format_number(alpha)
        )
    }

    fn srgb(&self) -> Srgb<f32> {
        Srgb::new(
            self.r.clamp(0.0, 1.0) as f32,
            self.g.clamp(0.0, 1.0) as f32,
            self.b.clamp(0.0, 1.0) as f32,
        )
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEffect {
    #[serde(rename = "type")]
    pub effect_type: String,
    #[serde(default = "default_true")]
    pub visible: bool,
    pub color: Option<RawColor>,
    pub offset: Option<RawVector>,
    #[serde(default)]
    pub radius: f64,
    pub spread: Option<f64>,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct RawVector {
    pub x: f64,
    pub y: f64,
}

/// A component property value as exposed on instances.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawComponentProperty {
    #[serde(rename = "type")]
    pub property_type: String,
    pub value: serde_json::Value,
}
