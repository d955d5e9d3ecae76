//! The eight disjoint style facets and their keyword value types.
//!
//! Field names serialize to camelCase CSS property names, except the
//! `Webkit*` keys which keep their React-style capitalization.

use serde::{Deserialize, Serialize};

use super::value::{LineHeight, Radius};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Display {
    #[serde(rename = "flex")]
    Flex,
    #[serde(rename = "inline-flex")]
    InlineFlex,
    #[serde(rename = "-webkit-box")]
    WebkitBox,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Relative,
    Absolute,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BoxSizing {
    ContentBox,
    BorderBox,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    Solid,
    Dashed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackgroundRepeat {
    Repeat,
    NoRepeat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundClip {
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Overflow {
    Visible,
    Hidden,
    Scroll,
    Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    Normal,
    Italic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextOverflow {
    Ellipsis,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WhiteSpace {
    Normal,
    Nowrap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlign {
    Top,
    Middle,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Right,
    Center,
    Justify,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TextTransform {
    Uppercase,
    Lowercase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextDecoration {
    LineThrough,
    Underline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoxOrient {
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlexDirection {
    Row,
    Column,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlexWrap {
    Nowrap,
    Wrap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JustifyContent {
    FlexStart,
    FlexEnd,
    Center,
    SpaceBetween,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlignItems {
    FlexStart,
    FlexEnd,
    Center,
    Baseline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlignSelf {
    Auto,
    FlexStart,
    FlexEnd,
    Center,
    Baseline,
    Stretch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlignContent {
    FlexStart,
    FlexEnd,
    Center,
    SpaceBetween,
    Stretch,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<Display>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub box_sizing: Option<BoxSizing>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_top: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_right: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_bottom: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_left: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_top: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_right: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_bottom: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_left: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_top_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_right_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_left_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_bottom_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_left_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_right_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_top_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_bottom_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_style: Option<LineStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outline_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outline_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outline_style: Option<LineStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_top_left_radius: Option<Radius>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_top_right_radius: Option<Radius>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_bottom_left_radius: Option<Radius>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_bottom_right_radius: Option<Radius>,
    /// Used when the only paint is a single color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    /// Image or gradient layers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
    /// Color beneath `background_image` when both are present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_repeat: Option<BackgroundRepeat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_clip: Option<BackgroundClip>,
    #[serde(
        rename = "WebkitBackgroundClip",
        skip_serializing_if = "Option::is_none"
    )]
    pub webkit_background_clip: Option<BackgroundClip>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overflow: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overflow_x: Option<Overflow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overflow_y: Option<Overflow>,
}

/// Outcome of [`BoxStyle::normalize_background`] when two paint values collided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackgroundCollision {
    pub kept: &'static str,
    pub discarded: &'static str,
    pub discarded_value: String,
}

impl BoxStyle {
    /// Enforces the background precedence: a pure color lives in `background`;
    /// once an image is present the color moves to `backgroundColor`.
    ///
    /// Returns the collision when a value had to be dropped.
    pub fn normalize_background(&mut self) -> Option<BackgroundCollision> {
        if self.background_image.is_some() {
            let color = self.background.take()?;
            if let Some(existing) = &self.background_color {
                if *existing != color {
                    return Some(BackgroundCollision {
                        kept: "backgroundColor",
                        discarded: "background",
                        discarded_value: color,
                    });
                }
                return None;
            }
            self.background_color = Some(color);
            return None;
        }

        let color = self.background_color.take()?;
        match &self.background {
            Some(existing) if *existing != color => Some(BackgroundCollision {
                kept: "background",
                discarded: "backgroundColor",
                discarded_value: color,
            }),
            Some(_) => None,
            None => {
                self.background = Some(color);
                None
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_style: Option<FontStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height: Option<LineHeight>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_overflow: Option<TextOverflow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub white_space: Option<WhiteSpace>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertical_align: Option<VerticalAlign>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align: Option<TextAlign>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_transform: Option<TextTransform>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_decoration: Option<TextDecoration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(rename = "WebkitLineClamp", skip_serializing_if = "Option::is_none")]
    pub webkit_line_clamp: Option<u32>,
    #[serde(rename = "WebkitBoxOrient", skip_serializing_if = "Option::is_none")]
    pub webkit_box_orient: Option<BoxOrient>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlexStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flex_grow: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flex_shrink: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flex_basis: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flex_direction: Option<FlexDirection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flex_wrap: Option<FlexWrap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub justify_content: Option<JustifyContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align_items: Option<AlignItems>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align_self: Option<AlignSelf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align_content: Option<AlignContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_gap: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_gap: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibilityStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transform: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShadowStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub box_shadow: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backdrop_filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pure_color_stays_in_background() {
        let mut style = BoxStyle {
            background_color: Some("#ffffff".to_string()),
            ..Default::default()
        };
        assert!(style.normalize_background().is_none());
        assert_eq!(style.background.as_deref(), Some("#ffffff"));
        assert!(style.background_color.is_none());
    }

    #[test]
    fn color_moves_to_background_color_when_image_present() {
        let mut style = BoxStyle {
            background: Some("#000000".to_string()),
            background_image: Some("url(a.png)".to_string()),
            ..Default::default()
        };
        assert!(style.normalize_background().is_none());
        assert!(style.background.is_none());
        assert_eq!(style.background_color.as_deref(), Some("#000000"));
    }

    #[test]
    fn conflicting_colors_report_collision() {
        let mut style = BoxStyle {
            background: Some("#000000".to_string()),
            background_color: Some("#ff0000".to_string()),
            ..Default::default()
        };
        let collision = style.normalize_background().expect("collision");
        assert_eq!(collision.kept, "background");
        assert_eq!(collision.discarded_value, "#ff0000");
        assert_eq!(style.background.as_deref(), Some("#000000"));
        assert!(style.background_color.is_none());
    }

    #[test]
    fn webkit_keys_keep_historical_capitalization() {
        let text = TextStyle {
            webkit_line_clamp: Some(2),
            webkit_box_orient: Some(BoxOrient::Vertical),
            ..Default::default()
        };
        let json = serde_json::to_value(&text).unwrap();
        assert_eq!(json["WebkitLineClamp"], 2);
        assert_eq!(json["WebkitBoxOrient"], "vertical");

        let boxed = BoxStyle {
            webkit_background_clip: Some(BackgroundClip::Text),
            ..Default::default()
        };
        let json = serde_json::to_value(&boxed).unwrap();
        assert_eq!(json["WebkitBackgroundClip"], "text");
    }

    #[test]
    fn keyword_spellings_match_css() {
        assert_eq!(
            serde_json::to_value(Display::WebkitBox).unwrap(),
            "-webkit-box"
        );
        assert_eq!(
            serde_json::to_value(TextTransform::Uppercase).unwrap(),
            "UPPERCASE"
        );
        assert_eq!(
            serde_json::to_value(JustifyContent::SpaceBetween).unwrap(),
            "space-between"
        );
        assert_eq!(
            serde_json::to_value(TextDecoration::LineThrough).unwrap(),
            "line-through"
        );
    }
}
