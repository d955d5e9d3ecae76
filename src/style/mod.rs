//! Style model: one flat, CSS-like record per node built from eight facets.
//!
//! - [`facets`] - the facet structs and keyword enums
//! - [`value`] - radius / line-height value types
//! - [`resolve`] - raw design paint/layout to [`TreeNodeStyle`]
//!
//! Facets own disjoint key sets. [`TreeNodeStyle`] flattens them into one
//! object when serialized; unknown keys survive in [`TreeNodeStyle::extra`]
//! but may never shadow a facet key.

pub mod facets;
pub mod resolve;
pub mod value;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use facets::{
    AlignContent, AlignItems, AlignSelf, BackgroundClip, BackgroundCollision, BackgroundRepeat,
    BoxOrient, BoxSizing, BoxStyle, Display, FilterStyle, FlexDirection, FlexStyle, FlexWrap,
    FontStyle, JustifyContent, LayoutStyle, LineStyle, Overflow, Position, ShadowStyle,
    TextAlign, TextDecoration, TextOverflow, TextStyle, TextTransform, TransformStyle,
    VerticalAlign, VisibilityStyle, WhiteSpace,
};
pub use resolve::{resolve_style, ParentFrame, ResolvedStyle, StyleTarget};
pub use value::{LineHeight, Radius};

/// A style category. Each key of [`TreeNodeStyle`] belongs to exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facet {
    Layout,
    Box,
    Text,
    Flex,
    Visibility,
    Transform,
    Shadow,
    Filter,
}

impl Facet {
    pub const fn all() -> [Facet; 8] {
        [
            Facet::Layout,
            Facet::Box,
            Facet::Text,
            Facet::Flex,
            Facet::Visibility,
            Facet::Transform,
            Facet::Shadow,
            Facet::Filter,
        ]
    }

    /// Serialized key names owned by this facet.
    pub fn keys(self) -> &'static [&'static str] {
        match self {
            Facet::Layout => &["display", "position", "top", "right", "bottom", "left"],
            Facet::Box => &[
                "boxSizing",
                "width",
                "height",
                "minWidth",
                "minHeight",
                "maxHeight",
                "maxWidth",
                "paddingTop",
                "paddingRight",
                "paddingBottom",
                "paddingLeft",
                "marginTop",
                "marginRight",
                "marginBottom",
                "marginLeft",
                "borderTopWidth",
                "borderRightWidth",
                "borderLeftWidth",
                "borderBottomWidth",
                "borderLeftColor",
                "borderRightColor",
                "borderTopColor",
                "borderBottomColor",
                "borderStyle",
                "outlineWidth",
                "outlineColor",
                "outlineStyle",
                "borderTopLeftRadius",
                "borderTopRightRadius",
                "borderBottomLeftRadius",
                "borderBottomRightRadius",
                "background",
                "backgroundImage",
                "backgroundColor",
                "backgroundPosition",
                "backgroundSize",
                "backgroundRepeat",
                "backgroundClip",
                "WebkitBackgroundClip",
                "overflow",
                "overflowX",
                "overflowY",
            ],
            Facet::Text => &[
                "fontSize",
                "fontFamily",
                "fontWeight",
                "fontStyle",
                "lineHeight",
                "textOverflow",
                "letterSpacing",
                "whiteSpace",
                "verticalAlign",
                "textAlign",
                "textTransform",
                "textDecoration",
                "color",
                "WebkitLineClamp",
                "WebkitBoxOrient",
            ],
            Facet::Flex => &[
                "flexGrow",
                "flexShrink",
                "flexBasis",
                "flexDirection",
                "flexWrap",
                "justifyContent",
                "alignItems",
                "alignSelf",
                "alignContent",
                "columnGap",
                "rowGap",
            ],
            Facet::Visibility => &["opacity", "zIndex"],
            Facet::Transform => &["transform"],
            Facet::Shadow => &["boxShadow"],
            Facet::Filter => &["backdropFilter", "filter"],
        }
    }
}

/// The facet that owns `key`, if any.
pub fn facet_of(key: &str) -> Option<Facet> {
    Facet::all()
        .into_iter()
        .find(|facet| facet.keys().contains(&key))
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StyleKeyError {
    #[error("Style key '{key}' belongs to the {facet:?} facet; set it through the facet")]
    Reserved { key: String, facet: Facet },
    #[error("Style key must not be empty")]
    Empty,
}

/// The merged per-node style record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TreeNodeStyle {
    #[serde(flatten)]
    pub layout: LayoutStyle,
    #[serde(flatten)]
    pub box_: BoxStyle,
    #[serde(flatten)]
    pub text: TextStyle,
    #[serde(flatten)]
    pub flex: FlexStyle,
    #[serde(flatten)]
    pub visibility: VisibilityStyle,
    #[serde(flatten)]
    pub transform: TransformStyle,
    #[serde(flatten)]
    pub shadow: ShadowStyle,
    #[serde(flatten)]
    pub filter: FilterStyle,
    /// Keys outside every facet. Must stay last so facets claim their keys first.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl TreeNodeStyle {
    /// Merges independently computed facets into one record.
    #[allow(clippy::too_many_arguments)]
    pub fn from_facets(
        layout: LayoutStyle,
        box_: BoxStyle,
        text: TextStyle,
        flex: FlexStyle,
        visibility: VisibilityStyle,
        transform: TransformStyle,
        shadow: ShadowStyle,
        filter: FilterStyle,
    ) -> Self {
        Self {
            layout,
            box_,
            text,
            flex,
            visibility,
            transform,
            shadow,
            filter,
            extra: BTreeMap::new(),
        }
    }

    /// Adds a key outside the facet vocabulary.
    pub fn insert_extra(
        &mut self,
        key: impl Into<String>,
        value: serde_json::Value,
    ) -> Result<(), StyleKeyError> {
        let key = key.into();
        if key.is_empty() {
            return Err(StyleKeyError::Empty);
        }
        if let Some(facet) = facet_of(&key) {
            return Err(StyleKeyError::Reserved { key, facet });
        }
        self.extra.insert(key, value);
        Ok(())
    }

    /// The emitted style object, keyed by the exact property spellings.
    pub fn declarations(&self) -> serde_json::Map<String, serde_json::Value> {
        match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(map)) => map,
            _ => serde_json::Map::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.declarations().is_empty()
    }

    /// Drops values equal to what the browser applies anyway.
    pub fn prune_defaults(&mut self) {
        fn drop_if<T: PartialEq>(slot: &mut Option<T>, default: T) {
            if slot.as_ref() == Some(&default) {
                *slot = None;
            }
        }

        drop_if(&mut self.visibility.opacity, 1.0);
        drop_if(&mut self.text.font_weight, 400.0);
        drop_if(&mut self.text.font_style, FontStyle::Normal);
        drop_if(&mut self.text.letter_spacing, 0.0);
        drop_if(&mut self.text.white_space, WhiteSpace::Normal);
        drop_if(&mut self.text.text_align, TextAlign::Left);
        drop_if(&mut self.flex.flex_grow, 0.0);
        drop_if(&mut self.flex.flex_direction, FlexDirection::Row);
        drop_if(&mut self.flex.flex_wrap, FlexWrap::Nowrap);
        drop_if(&mut self.flex.justify_content, JustifyContent::FlexStart);
        drop_if(&mut self.flex.align_self, AlignSelf::Auto);
        drop_if(&mut self.flex.column_gap, 0.0);
        drop_if(&mut self.flex.row_gap, 0.0);
        drop_if(&mut self.box_.box_sizing, BoxSizing::ContentBox);
        drop_if(&mut self.box_.overflow_x, Overflow::Visible);
        drop_if(&mut self.box_.overflow_y, Overflow::Visible);
        drop_if(&mut self.box_.background_repeat, BackgroundRepeat::Repeat);

        for slot in [
            &mut self.box_.padding_top,
            &mut self.box_.padding_right,
            &mut self.box_.padding_bottom,
            &mut self.box_.padding_left,
            &mut self.box_.margin_top,
            &mut self.box_.margin_right,
            &mut self.box_.margin_bottom,
            &mut self.box_.margin_left,
        ] {
            drop_if(slot, 0.0);
        }

        for slot in [
            &mut self.box_.border_top_left_radius,
            &mut self.box_.border_top_right_radius,
            &mut self.box_.border_bottom_left_radius,
            &mut self.box_.border_bottom_right_radius,
        ] {
            if slot.as_ref().is_some_and(Radius::is_zero) {
                *slot = None;
            }
        }

        if self.box_.overflow.as_deref() == Some("visible") {
            self.box_.overflow = None;
        }
        if self.transform.transform.as_deref() == Some("none") {
            self.transform.transform = None;
        }
    }
}
