//! Resolve a raw design node's paint and layout into a [`TreeNodeStyle`].
//!
//! Each facet is computed on its own from the raw node and the parent frame,
//! then the facets are merged, defaults pruned and the background precedence
//! applied.

use crate::figma::{RawBoundingBox, RawColor, RawEffect, RawNode, RawPaint};

use super::facets::*;
use super::value::{format_number, round2, LineHeight, Radius};
use super::{BackgroundCollision, TreeNodeStyle};

/// Geometry and layout mode of the parent a node is placed in.
#[derive(Debug, Clone, Copy)]
pub struct ParentFrame {
    pub bounds: RawBoundingBox,
    pub auto_layout: bool,
}

impl ParentFrame {
    pub fn of(node: &RawNode) -> Option<Self> {
        node.absolute_bounding_box.map(|bounds| ParentFrame {
            bounds,
            auto_layout: node.is_auto_layout(),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct ResolvedStyle {
    pub style: TreeNodeStyle,
    /// Background values that collided and were dropped.
    pub collisions: Vec<BackgroundCollision>,
}

/// How the node will be emitted; decides which facets apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleTarget {
    Container,
    Text,
    /// Replaced visual (`img`): image paint is the asset, not a background.
    Asset,
}

pub fn resolve_style(
    node: &RawNode,
    parent: Option<&ParentFrame>,
    target: StyleTarget,
) -> ResolvedStyle {
    let mut style = TreeNodeStyle::from_facets(
        layout_facet(node, parent),
        box_facet(node, parent, target),
        text_facet(node, target),
        flex_facet(node, parent),
        visibility_facet(node),
        transform_facet(node),
        shadow_facet(node, target),
        filter_facet(node),
    );
    style.prune_defaults();

    let mut collisions = Vec::new();
    if let Some(collision) = style.box_.normalize_background() {
        collisions.push(collision);
    }
    ResolvedStyle { style, collisions }
}

fn layout_facet(node: &RawNode, parent: Option<&ParentFrame>) -> LayoutStyle {
    let mut layout = LayoutStyle::default();

    if node.is_auto_layout() {
        layout.display = Some(Display::Flex);
    }
    if node.is_text() && clamp_lines(node).is_some() {
        layout.display = Some(Display::WebkitBox);
    }

    let absolute = parent.is_some_and(|p| !p.auto_layout || node.is_absolutely_positioned());
    match (parent, node.absolute_bounding_box) {
        (Some(parent), Some(bounds)) if absolute => {
            layout.position = Some(Position::Absolute);
            layout.left = Some(round2(bounds.x - parent.bounds.x));
            layout.top = Some(round2(bounds.y - parent.bounds.y));
        }
        _ => {
            let positions_children = !node.children.is_empty()
                && (!node.is_auto_layout()
                    || node.children.iter().any(RawNode::is_absolutely_positioned));
            if positions_children {
                layout.position = Some(Position::Relative);
            }
        }
    }
    layout
}

fn box_facet(node: &RawNode, parent: Option<&ParentFrame>, target: StyleTarget) -> BoxStyle {
    let mut style = BoxStyle::default();

    if target != StyleTarget::Text {
        if let Some(bounds) = node.absolute_bounding_box {
            let stretched = parent.is_some_and(|p| p.auto_layout)
                && node.layout_align.as_deref() == Some("STRETCH");
            style.width = Some(round2(bounds.width));
            style.height = Some(round2(bounds.height));
            if stretched {
                // cross-axis size comes from the flex container
                style.height = None;
            }
        }
    }

    if node.is_auto_layout() {
        style.padding_top = node.padding_top;
        style.padding_right = node.padding_right;
        style.padding_bottom = node.padding_bottom;
        style.padding_left = node.padding_left;
    }

    apply_strokes(node, &mut style);
    apply_radius(node, &mut style);

    let has_padding = [
        style.padding_top,
        style.padding_right,
        style.padding_bottom,
        style.padding_left,
    ]
    .iter()
    .any(|p| p.is_some_and(|v| v > 0.0));
    if has_padding || style.border_style.is_some() {
        style.box_sizing = Some(BoxSizing::BorderBox);
    }

    match target {
        StyleTarget::Container => apply_background(node, &mut style),
        StyleTarget::Text => apply_text_gradient(node, &mut style),
        StyleTarget::Asset => {}
    }

    if node.clips_content && !node.children.is_empty() {
        style.overflow = Some("hidden".to_string());
    }
    if node.is_text() && truncates(node) {
        style.overflow = Some("hidden".to_string());
    }
    style
}

fn apply_strokes(node: &RawNode, style: &mut BoxStyle) {
    let Some(stroke) = node.strokes.iter().find(|p| p.visible && p.paint_type == "SOLID") else {
        return;
    };
    let Some(color) = stroke.color.map(|c| c.to_css(stroke.opacity)) else {
        return;
    };
    let (top, right, bottom, left) = match node.individual_stroke_weights {
        Some(w) => (w.top, w.right, w.bottom, w.left),
        None => {
            let w = node.stroke_weight.unwrap_or(1.0);
            (w, w, w, w)
        }
    };
    if [top, right, bottom, left].iter().all(|w| *w <= 0.0) {
        return;
    }

    let sides = [
        (top, &mut style.border_top_width, &mut style.border_top_color),
        (right, &mut style.border_right_width, &mut style.border_right_color),
        (bottom, &mut style.border_bottom_width, &mut style.border_bottom_color),
        (left, &mut style.border_left_width, &mut style.border_left_color),
    ];
    for (weight, width_slot, color_slot) in sides {
        if weight > 0.0 {
            *width_slot = Some(round2(weight));
            *color_slot = Some(color.clone());
        }
    }
    style.border_style = Some(if node.stroke_dashes.is_empty() {
        LineStyle::Solid
    } else {
        LineStyle::Dashed
    });
}

fn apply_radius(node: &RawNode, style: &mut BoxStyle) {
    if node.node_type == "ELLIPSE" {
        let half = Radius::percent(50.0);
        style.border_top_left_radius = Some(half.clone());
        style.border_top_right_radius = Some(half.clone());
        style.border_bottom_right_radius = Some(half.clone());
        style.border_bottom_left_radius = Some(half);
        return;
    }
    let radii = node
        .rectangle_corner_radii
        .or_else(|| node.corner_radius.map(|r| [r, r, r, r]));
    if let Some([tl, tr, br, bl]) = radii {
        style.border_top_left_radius = Some(Radius::Px(round2(tl)));
        style.border_top_right_radius = Some(Radius::Px(round2(tr)));
        style.border_bottom_right_radius = Some(Radius::Px(round2(br)));
        style.border_bottom_left_radius = Some(Radius::Px(round2(bl)));
    }
}

fn apply_background(node: &RawNode, style: &mut BoxStyle) {
    let mut layers = Vec::new();
    let mut color = None;
    let mut has_image = false;

    // Paints are listed bottom-up; CSS lists the top layer first.
    for paint in node.visible_fills().collect::<Vec<_>>().into_iter().rev() {
        match paint.paint_type.as_str() {
            "SOLID" => {
                if color.is_none() {
                    color = paint.color.map(|c| c.to_css(paint.opacity));
                }
            }
            "IMAGE" => {
                if let Some(url) = &paint.image_ref {
                    layers.push(format!("url({url})"));
                    has_image = true;
                }
            }
            kind if kind.starts_with("GRADIENT_") => {
                if let Some(gradient) = gradient_css(paint) {
                    layers.push(gradient);
                }
            }
            _ => {}
        }
    }

    if layers.is_empty() {
        style.background = color;
        return;
    }
    style.background_image = Some(layers.join(", "));
    style.background_color = color;
    if has_image {
        let scale_mode = node
            .image_fill()
            .and_then(|p| p.scale_mode.as_deref())
            .unwrap_or("FILL");
        style.background_size = Some(
            match scale_mode {
                "FIT" => "contain",
                "TILE" => "auto",
                _ => "cover",
            }
            .to_string(),
        );
        style.background_position = Some("center".to_string());
        style.background_repeat = Some(if scale_mode == "TILE" {
            BackgroundRepeat::Repeat
        } else {
            BackgroundRepeat::NoRepeat
        });
    }
}

fn apply_text_gradient(node: &RawNode, style: &mut BoxStyle) {
    let gradient = node
        .visible_fills()
        .filter(|p| p.paint_type.starts_with("GRADIENT_"))
        .last()
        .and_then(gradient_css);
    if let Some(gradient) = gradient {
        style.background_image = Some(gradient);
        style.background_clip = Some(BackgroundClip::Text);
        style.webkit_background_clip = Some(BackgroundClip::Text);
    }
}

fn gradient_css(paint: &RawPaint) -> Option<String> {
    if paint.gradient_stops.is_empty() {
        return None;
    }
    let stops = paint
        .gradient_stops
        .iter()
        .map(|s| {
            format!(
                "{} {}%",
                s.color.to_css(paint.opacity),
                format_number(s.position * 100.0)
            )
        })
        .collect::<Vec<_>>()
        .join(", ");
    let css = match paint.paint_type.as_str() {
        "GRADIENT_RADIAL" | "GRADIENT_DIAMOND" => format!("radial-gradient({stops})"),
        "GRADIENT_ANGULAR" => format!("conic-gradient({stops})"),
        _ => format!(
            "linear-gradient({}deg, {stops})",
            format_number(paint.gradient_angle.unwrap_or(180.0))
        ),
    };
    Some(css)
}

fn clamp_lines(node: &RawNode) -> Option<u32> {
    let style = node.style.as_ref()?;
    match style.max_lines {
        Some(lines) if lines > 1 && truncates(node) => Some(lines),
        _ => None,
    }
}

fn truncates(node: &RawNode) -> bool {
    node.style
        .as_ref()
        .is_some_and(|s| s.text_truncation.as_deref() == Some("ENDING"))
}

fn text_facet(node: &RawNode, target: StyleTarget) -> TextStyle {
    let mut text = TextStyle::default();
    if target != StyleTarget::Text {
        return text;
    }

    if let Some(style) = &node.style {
        text.font_size = style.font_size;
        text.font_family = style.font_family.clone();
        text.font_weight = style.font_weight;
        if style.italic {
            text.font_style = Some(FontStyle::Italic);
        }
        text.line_height = match (style.line_height_unit.as_deref(), style.line_height_px) {
            (Some("INTRINSIC_%"), _) => Some(LineHeight::NORMAL),
            (_, Some(px)) => Some(LineHeight::Px(round2(px))),
            (_, None) => None,
        };
        text.letter_spacing = style.letter_spacing.map(round2);
        text.text_align = match style.text_align_horizontal.as_deref() {
            Some("RIGHT") => Some(TextAlign::Right),
            Some("CENTER") => Some(TextAlign::Center),
            Some("JUSTIFIED") => Some(TextAlign::Justify),
            _ => None,
        };
        text.vertical_align = match style.text_align_vertical.as_deref() {
            Some("CENTER") => Some(VerticalAlign::Middle),
            Some("BOTTOM") => Some(VerticalAlign::Bottom),
            _ => None,
        };
        text.text_transform = match style.text_case.as_deref() {
            Some("UPPER") => Some(TextTransform::Uppercase),
            Some("LOWER") => Some(TextTransform::Lowercase),
            _ => None,
        };
        text.text_decoration = match style.text_decoration.as_deref() {
            Some("STRIKETHROUGH") => Some(TextDecoration::LineThrough),
            Some("UNDERLINE") => Some(TextDecoration::Underline),
            _ => None,
        };
        if truncates(node) {
            text.text_overflow = Some(TextOverflow::Ellipsis);
            match clamp_lines(node) {
                Some(lines) => {
                    text.webkit_line_clamp = Some(lines);
                    text.webkit_box_orient = Some(BoxOrient::Vertical);
                }
                None => text.white_space = Some(WhiteSpace::Nowrap),
            }
        }
    }

    let has_gradient = node
        .visible_fills()
        .any(|p| p.paint_type.starts_with("GRADIENT_"));
    text.color = if has_gradient {
        Some("transparent".to_string())
    } else {
        node.visible_fills()
            .filter(|p| p.paint_type == "SOLID")
            .last()
            .and_then(|p| p.color.map(|c| c.to_css(p.opacity)))
    };
    text
}

fn flex_facet(node: &RawNode, parent: Option<&ParentFrame>) -> FlexStyle {
    let mut flex = FlexStyle::default();

    if node.is_auto_layout() {
        let vertical = node.layout_mode.as_deref() == Some("VERTICAL");
        flex.flex_direction = Some(if vertical {
            FlexDirection::Column
        } else {
            FlexDirection::Row
        });
        let wraps = node.layout_wrap.as_deref() == Some("WRAP");
        if wraps {
            flex.flex_wrap = Some(FlexWrap::Wrap);
        }
        flex.justify_content = match node.primary_axis_align_items.as_deref() {
            Some("MAX") => Some(JustifyContent::FlexEnd),
            Some("CENTER") => Some(JustifyContent::Center),
            Some("SPACE_BETWEEN") => Some(JustifyContent::SpaceBetween),
            _ => None,
        };
        flex.align_items = Some(match node.counter_axis_align_items.as_deref() {
            Some("MAX") => AlignItems::FlexEnd,
            Some("CENTER") => AlignItems::Center,
            Some("BASELINE") => AlignItems::Baseline,
            _ => AlignItems::FlexStart,
        });

        let spaced = flex.justify_content != Some(JustifyContent::SpaceBetween);
        let main_gap = node.item_spacing.filter(|_| spaced).map(round2);
        let cross_gap = node.counter_axis_spacing.filter(|_| wraps).map(round2);
        if vertical {
            flex.row_gap = main_gap;
            flex.column_gap = cross_gap;
        } else {
            flex.column_gap = main_gap;
            flex.row_gap = cross_gap;
        }
    }

    let in_flow = parent.is_some_and(|p| p.auto_layout) && !node.is_absolutely_positioned();
    if in_flow {
        if node.layout_grow.unwrap_or(0.0) > 0.0 {
            flex.flex_grow = Some(1.0);
        } else {
            flex.flex_shrink = Some(0.0);
        }
        if node.layout_align.as_deref() == Some("STRETCH") {
            flex.align_self = Some(AlignSelf::Stretch);
        }
    }
    flex
}

fn visibility_facet(node: &RawNode) -> VisibilityStyle {
    VisibilityStyle {
        opacity: node.opacity.map(round2),
        z_index: None,
    }
}

fn transform_facet(node: &RawNode) -> TransformStyle {
    let transform = node
        .rotation
        .filter(|deg| deg.abs() > f64::EPSILON)
        .map(|deg| format!("rotate({}deg)", format_number(-deg)));
    TransformStyle { transform }
}

fn shadow_facet(node: &RawNode, target: StyleTarget) -> ShadowStyle {
    if target == StyleTarget::Text {
        return ShadowStyle::default();
    }
    let shadows = node
        .effects
        .iter()
        .filter(|e| e.visible)
        .filter_map(shadow_css)
        .collect::<Vec<_>>();
    ShadowStyle {
        box_shadow: (!shadows.is_empty()).then(|| shadows.join(", ")),
    }
}

fn shadow_css(effect: &RawEffect) -> Option<String> {
    let inset = match effect.effect_type.as_str() {
        "DROP_SHADOW" => "",
        "INNER_SHADOW" => "inset ",
        _ => return None,
    };
    let offset = effect.offset.unwrap_or(crate::figma::RawVector { x: 0.0, y: 0.0 });
    let color = effect
        .color
        .unwrap_or(RawColor {
            r: 0.0,
            g: 0.0,
            b: 0.0,
            a: 0.25,
        })
        .to_css(None);
    Some(format!(
        "{inset}{}px {}px {}px {}px {color}",
        format_number(offset.x),
        format_number(offset.y),
        format_number(effect.radius),
        format_number(effect.spread.unwrap_or(0.0)),
    ))
}

fn filter_facet(node: &RawNode) -> FilterStyle {
    let blur = |kind: &str| {
        node.effects
            .iter()
            .find(|e| e.visible && e.effect_type == kind)
            .map(|e| format!("blur({}px)", format_number(e.radius)))
    };
    FilterStyle {
        filter: blur("LAYER_BLUR"),
        backdrop_filter: blur("BACKGROUND_BLUR"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figma::{RawColorStop, RawEffect, RawTypeStyle, RawVector};

    fn bbox(x: f64, y: f64, width: f64, height: f64) -> Option<RawBoundingBox> {
        Some(RawBoundingBox {
            x,
            y,
            width,
            height,
        })
    }

    fn solid(r: f64, g: f64, b: f64) -> RawPaint {
        RawPaint {
            paint_type: "SOLID".to_string(),
            visible: true,
            color: Some(RawColor { r, g, b, a: 1.0 }),
            opacity: None,
            image_ref: None,
            scale_mode: None,
            gradient_stops: vec![],
            gradient_angle: None,
        }
    }

    fn image(url: &str) -> RawPaint {
        RawPaint {
            paint_type: "IMAGE".to_string(),
            image_ref: Some(url.to_string()),
            color: None,
            ..solid(0.0, 0.0, 0.0)
        }
    }

    fn frame() -> RawNode {
        RawNode {
            id: "1:1".to_string(),
            name: "Frame".to_string(),
            node_type: "FRAME".to_string(),
            visible: true,
            absolute_bounding_box: bbox(0.0, 0.0, 320.0, 200.0),
            ..Default::default()
        }
    }

    #[test]
    fn solid_fill_becomes_background() {
        let mut node = frame();
        node.fills = vec![solid(1.0, 1.0, 1.0)];
        let resolved = resolve_style(&node, None, StyleTarget::Container);
        assert_eq!(resolved.style.box_.background.as_deref(), Some("#ffffff"));
        assert!(resolved.style.box_.background_color.is_none());
        assert!(resolved.collisions.is_empty());
    }

    #[test]
    fn image_with_color_splits_background() {
        let mut node = frame();
        node.fills = vec![solid(0.0, 0.0, 0.0), image("https://cdn.test/a.png")];
        let style = resolve_style(&node, None, StyleTarget::Container).style;
        assert_eq!(
            style.box_.background_image.as_deref(),
            Some("url(https://cdn.test/a.png)")
        );
        assert_eq!(style.box_.background_color.as_deref(), Some("#000000"));
        assert!(style.box_.background.is_none());
        assert_eq!(style.box_.background_size.as_deref(), Some("cover"));
        assert_eq!(
            style.box_.background_repeat,
            Some(BackgroundRepeat::NoRepeat)
        );
    }

    #[test]
    fn child_of_plain_frame_is_absolute() {
        let parent = frame();
        let mut child = frame();
        child.absolute_bounding_box = bbox(10.0, 24.5, 50.0, 50.0);
        let frame = ParentFrame::of(&parent).unwrap();
        let style = resolve_style(&child, Some(&frame), StyleTarget::Container).style;
        assert_eq!(style.layout.position, Some(Position::Absolute));
        assert_eq!(style.layout.left, Some(10.0));
        assert_eq!(style.layout.top, Some(24.5));
    }

    #[test]
    fn auto_layout_maps_to_flex() {
        let mut node = frame();
        node.layout_mode = Some("VERTICAL".to_string());
        node.item_spacing = Some(12.0);
        node.padding_top = Some(8.0);
        node.primary_axis_align_items = Some("CENTER".to_string());
        let style = resolve_style(&node, None, StyleTarget::Container).style;
        assert_eq!(style.layout.display, Some(Display::Flex));
        assert_eq!(style.flex.flex_direction, Some(FlexDirection::Column));
        assert_eq!(style.flex.row_gap, Some(12.0));
        assert!(style.flex.column_gap.is_none());
        assert_eq!(style.flex.justify_content, Some(JustifyContent::Center));
        assert_eq!(style.flex.align_items, Some(AlignItems::FlexStart));
        assert_eq!(style.box_.padding_top, Some(8.0));
        assert_eq!(style.box_.box_sizing, Some(BoxSizing::BorderBox));
    }

    #[test]
    fn horizontal_direction_is_omitted_as_default() {
        let mut node = frame();
        node.layout_mode = Some("HORIZONTAL".to_string());
        let style = resolve_style(&node, None, StyleTarget::Container).style;
        assert!(style.flex.flex_direction.is_none());
    }

    #[test]
    fn auto_layout_child_stays_in_flow() {
        let mut parent = frame();
        parent.layout_mode = Some("HORIZONTAL".to_string());
        let mut child = frame();
        child.layout_grow = Some(1.0);
        let frame = ParentFrame::of(&parent).unwrap();
        let style = resolve_style(&child, Some(&frame), StyleTarget::Container).style;
        assert!(style.layout.position.is_none());
        assert_eq!(style.flex.flex_grow, Some(1.0));
    }

    #[test]
    fn ellipse_radius_is_percentage_and_rect_radius_is_number() {
        let mut ellipse = frame();
        ellipse.node_type = "ELLIPSE".to_string();
        let style = resolve_style(&ellipse, None, StyleTarget::Container).style;
        assert_eq!(
            style.box_.border_top_left_radius,
            Some(Radius::Percent("50%".to_string()))
        );

        let mut rect = frame();
        rect.corner_radius = Some(6.0);
        let style = resolve_style(&rect, None, StyleTarget::Container).style;
        assert_eq!(style.box_.border_bottom_right_radius, Some(Radius::Px(6.0)));
    }

    #[test]
    fn text_style_omits_defaults_and_clamps_lines() {
        let node = RawNode {
            id: "2:1".to_string(),
            node_type: "TEXT".to_string(),
            visible: true,
            characters: Some("Long text".to_string()),
            style: Some(RawTypeStyle {
                font_family: Some("Inter".to_string()),
                font_size: Some(14.0),
                font_weight: Some(400.0),
                letter_spacing: Some(0.0),
                text_align_horizontal: Some("LEFT".to_string()),
                text_truncation: Some("ENDING".to_string()),
                max_lines: Some(2),
                line_height_unit: Some("INTRINSIC_%".to_string()),
                ..Default::default()
            }),
            fills: vec![solid(0.2, 0.2, 0.2)],
            ..Default::default()
        };
        let style = resolve_style(&node, None, StyleTarget::Text).style;
        assert_eq!(style.text.font_size, Some(14.0));
        assert!(style.text.font_weight.is_none());
        assert!(style.text.letter_spacing.is_none());
        assert!(style.text.text_align.is_none());
        assert_eq!(style.text.line_height, Some(LineHeight::NORMAL));
        assert_eq!(style.text.webkit_line_clamp, Some(2));
        assert_eq!(style.text.webkit_box_orient, Some(BoxOrient::Vertical));
        assert_eq!(style.layout.display, Some(Display::WebkitBox));
        assert_eq!(style.box_.overflow.as_deref(), Some("hidden"));
        assert_eq!(style.text.color.as_deref(), Some("#333333"));
        assert!(style.box_.width.is_none());
    }

    #[test]
    fn gradient_text_clips_background() {
        let node = RawNode {
            id: "2:2".to_string(),
            node_type: "TEXT".to_string(),
            visible: true,
            fills: vec![RawPaint {
                paint_type: "GRADIENT_LINEAR".to_string(),
                gradient_stops: vec![
                    RawColorStop {
                        color: RawColor {
                            r: 1.0,
                            g: 0.0,
                            b: 0.0,
                            a: 1.0,
                        },
                        position: 0.0,
                    },
                    RawColorStop {
                        color: RawColor {
                            r: 0.0,
                            g: 0.0,
                            b: 1.0,
                            a: 1.0,
                        },
                        position: 1.0,
                    },
                ],
                gradient_angle: Some(90.0),
                ..solid(0.0, 0.0, 0.0)
            }],
            ..Default::default()
        };
        let style = resolve_style(&node, None, StyleTarget::Text).style;
        assert_eq!(
            style.box_.background_image.as_deref(),
            Some("linear-gradient(90deg, #ff0000 0%, #0000ff 100%)")
        );
        assert_eq!(style.box_.webkit_background_clip, Some(BackgroundClip::Text));
        assert_eq!(style.text.color.as_deref(), Some("transparent"));
    }

    #[test]
    fn effects_map_to_shadow_and_filters() {
        let mut node = frame();
        node.opacity = Some(0.5);
        node.rotation = Some(90.0);
        node.effects = vec![
            RawEffect {
                effect_type: "DROP_SHADOW".to_string(),
                visible: true,
                color: Some(RawColor {
                    r: 0.0,
                    g: 0.0,
                    b: 0.0,
                    a: 0.5,
                }),
                offset: Some(RawVector { x: 0.0, y: 2.0 }),
                radius: 4.0,
                spread: None,
            },
            RawEffect {
                effect_type: "BACKGROUND_BLUR".to_string(),
                visible: true,
                color: None,
                offset: None,
                radius: 10.0,
                spread: None,
            },
        ];
        let style = resolve_style(&node, None, StyleTarget::Container).style;
        assert_eq!(
            style.shadow.box_shadow.as_deref(),
            Some("0px 2px 4px 0px rgba(0, 0, 0, 0.5)")
        );
        assert_eq!(style.filter.backdrop_filter.as_deref(), Some("blur(10px)"));
        assert!(style.filter.filter.is_none());
        assert_eq!(style.visibility.opacity, Some(0.5));
        assert_eq!(style.transform.transform.as_deref(), Some("rotate(-90deg)"));
    }

    #[test]
    fn dashed_strokes_become_borders() {
        let mut node = frame();
        node.strokes = vec![solid(1.0, 0.0, 0.0)];
        node.stroke_weight = Some(2.0);
        node.stroke_dashes = vec![4.0, 2.0];
        let style = resolve_style(&node, None, StyleTarget::Container).style;
        assert_eq!(style.box_.border_top_width, Some(2.0));
        assert_eq!(style.box_.border_left_color.as_deref(), Some("#ff0000"));
        assert_eq!(style.box_.border_style, Some(LineStyle::Dashed));
        assert_eq!(style.box_.box_sizing, Some(BoxSizing::BorderBox));
    }
}
