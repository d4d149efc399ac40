//! Zone style records.
//!
//! A style is a shared geometry record plus one variant per rendering
//! strategy, so text fields never carry path data and shapes never carry
//! typography.

use super::SerializableColor;
use serde::{Deserialize, Serialize};

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Vertical text alignment inside the zone box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlign {
    Top,
    #[default]
    Middle,
    Bottom,
}

/// Font weight options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

/// How a bitmap is placed inside its zone box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFit {
    /// Fill the box, cropping overflow.
    #[default]
    Cover,
    /// Fit inside the box, letterboxing.
    Contain,
}

/// A gradient color stop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    /// Position along the gradient (0.0..=1.0).
    pub offset: f64,
    pub color: SerializableColor,
}

/// Fill paint for shapes and text backgrounds.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Fill {
    #[default]
    None,
    Solid { color: SerializableColor },
    /// Linear gradient; `angle` in degrees, 0 = left to right.
    Gradient { angle: f64, stops: Vec<GradientStop> },
}

impl Fill {
    pub fn solid(color: SerializableColor) -> Self {
        Fill::Solid { color }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Fill::None)
    }
}

/// Outline paint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stroke {
    pub color: SerializableColor,
    pub width: f64,
    /// Dash pattern in pixels; empty for solid.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dash: Vec<f64>,
}

impl Stroke {
    pub fn none() -> Self {
        Self {
            color: SerializableColor::black(),
            width: 0.0,
            dash: Vec::new(),
        }
    }

    pub fn solid(color: SerializableColor, width: f64) -> Self {
        Self {
            color,
            width,
            dash: Vec::new(),
        }
    }

    /// Whether the stroke paints anything.
    pub fn is_visible(&self) -> bool {
        self.width > 0.0 && self.color.a > 0
    }
}

impl Default for Stroke {
    fn default() -> Self {
        Self::none()
    }
}

fn default_opacity() -> f64 {
    1.0
}

/// Geometry properties shared by every zone kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommonStyle {
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    /// Rotation in degrees (mirrors `Zone::rotation`).
    #[serde(default)]
    pub rotation: f64,
    /// Corner radius in pixels; applied as a clip.
    #[serde(default)]
    pub corner_radius: f64,
    /// Inner padding in pixels.
    #[serde(default)]
    pub padding: f64,
}

impl Default for CommonStyle {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            rotation: 0.0,
            corner_radius: 0.0,
            padding: 0.0,
        }
    }
}

/// Typography for text-like zones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    pub font_family: String,
    /// Font size in pixels.
    pub font_size: f64,
    #[serde(default)]
    pub align: TextAlign,
    #[serde(default)]
    pub vertical_align: VerticalAlign,
    #[serde(default)]
    pub font_weight: FontWeight,
    #[serde(default)]
    pub italic: bool,
    #[serde(default)]
    pub underline: bool,
    #[serde(default)]
    pub strikethrough: bool,
    #[serde(default)]
    pub uppercase: bool,
    #[serde(default)]
    pub letter_spacing: f64,
    /// Line height as a multiple of font size.
    pub line_height: f64,
    pub color: SerializableColor,
    #[serde(default)]
    pub background: Fill,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: "Inter".to_string(),
            font_size: 14.0,
            align: TextAlign::Left,
            vertical_align: VerticalAlign::Middle,
            font_weight: FontWeight::Normal,
            italic: false,
            underline: false,
            strikethrough: false,
            uppercase: false,
            letter_spacing: 0.0,
            line_height: 1.2,
            color: SerializableColor::black(),
            background: Fill::None,
        }
    }
}

/// Fill/stroke/outline for vector shapes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeStyle {
    #[serde(default)]
    pub fill: Fill,
    #[serde(default)]
    pub stroke: Stroke,
    /// SVG-like path in normalized 0–100 coordinates of the zone box.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_data: Option<String>,
    /// Flat `[x0, y0, x1, y1, ...]` polyline in normalized 0–100 coordinates.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub points: Vec<f64>,
}

/// Presentation for bitmap zones.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageStyle {
    #[serde(default)]
    pub fit: ImageFit,
    #[serde(default)]
    pub border: Stroke,
}

/// Per-strategy style variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "variant", rename_all = "camelCase")]
pub enum StyleKind {
    Text(TextStyle),
    Shape(ShapeStyle),
    Image(ImageStyle),
}

/// Complete style of a zone.
///
/// Serialized flat: the common fields and the variant's fields share one
/// object, discriminated by `variant`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneStyle {
    #[serde(flatten)]
    pub common: CommonStyle,
    #[serde(flatten)]
    pub kind: StyleKind,
}

impl ZoneStyle {
    pub fn text(style: TextStyle) -> Self {
        Self {
            common: CommonStyle::default(),
            kind: StyleKind::Text(style),
        }
    }

    pub fn shape(style: ShapeStyle) -> Self {
        Self {
            common: CommonStyle::default(),
            kind: StyleKind::Shape(style),
        }
    }

    pub fn image(style: ImageStyle) -> Self {
        Self {
            common: CommonStyle::default(),
            kind: StyleKind::Image(style),
        }
    }

    pub fn as_text(&self) -> Option<&TextStyle> {
        match &self.kind {
            StyleKind::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_shape(&self) -> Option<&ShapeStyle> {
        match &self.kind {
            StyleKind::Shape(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_image(&self) -> Option<&ImageStyle> {
        match &self.kind {
            StyleKind::Image(i) => Some(i),
            _ => None,
        }
    }

    /// Apply a single-field update.
    ///
    /// Returns false when the field has no meaning for this style variant;
    /// the style is left untouched in that case.
    pub fn apply(&mut self, patch: StylePatch) -> bool {
        match (patch, &mut self.kind) {
            (StylePatch::Opacity(v), _) => self.common.opacity = v.clamp(0.0, 1.0),
            (StylePatch::Rotation(v), _) => self.common.rotation = v,
            (StylePatch::CornerRadius(v), _) => self.common.corner_radius = v.max(0.0),
            (StylePatch::Padding(v), _) => self.common.padding = v.max(0.0),

            (StylePatch::FontFamily(v), StyleKind::Text(t)) => t.font_family = v,
            (StylePatch::FontSize(v), StyleKind::Text(t)) => t.font_size = v.max(1.0),
            (StylePatch::Align(v), StyleKind::Text(t)) => t.align = v,
            (StylePatch::VerticalAlign(v), StyleKind::Text(t)) => t.vertical_align = v,
            (StylePatch::FontWeight(v), StyleKind::Text(t)) => t.font_weight = v,
            (StylePatch::Italic(v), StyleKind::Text(t)) => t.italic = v,
            (StylePatch::Underline(v), StyleKind::Text(t)) => t.underline = v,
            (StylePatch::Strikethrough(v), StyleKind::Text(t)) => t.strikethrough = v,
            (StylePatch::Uppercase(v), StyleKind::Text(t)) => t.uppercase = v,
            (StylePatch::LetterSpacing(v), StyleKind::Text(t)) => t.letter_spacing = v,
            (StylePatch::LineHeight(v), StyleKind::Text(t)) => t.line_height = v.max(0.1),
            (StylePatch::TextColor(v), StyleKind::Text(t)) => t.color = v,
            (StylePatch::Fill(v), StyleKind::Text(t)) => t.background = v,

            (StylePatch::Fill(v), StyleKind::Shape(s)) => s.fill = v,
            (StylePatch::Stroke(v), StyleKind::Shape(s)) => s.stroke = v,
            (StylePatch::PathData(v), StyleKind::Shape(s)) => s.path_data = Some(v),

            (StylePatch::Stroke(v), StyleKind::Image(i)) => i.border = v,
            (StylePatch::ImageFit(v), StyleKind::Image(i)) => i.fit = v,

            _ => return false,
        }
        true
    }
}

/// A single-field style update.
#[derive(Debug, Clone, PartialEq)]
pub enum StylePatch {
    Opacity(f64),
    Rotation(f64),
    CornerRadius(f64),
    Padding(f64),
    FontFamily(String),
    FontSize(f64),
    Align(TextAlign),
    VerticalAlign(VerticalAlign),
    FontWeight(FontWeight),
    Italic(bool),
    Underline(bool),
    Strikethrough(bool),
    Uppercase(bool),
    LetterSpacing(f64),
    LineHeight(f64),
    TextColor(SerializableColor),
    /// Shape fill, or text background.
    Fill(Fill),
    /// Shape outline, or image border.
    Stroke(Stroke),
    PathData(String),
    ImageFit(ImageFit),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_matching_variant() {
        let mut style = ZoneStyle::text(TextStyle::default());
        assert!(style.apply(StylePatch::FontSize(22.0)));
        assert!(style.apply(StylePatch::FontWeight(FontWeight::Bold)));
        let text = style.as_text().unwrap();
        assert_eq!(text.font_size, 22.0);
        assert_eq!(text.font_weight, FontWeight::Bold);
    }

    #[test]
    fn test_apply_mismatched_variant_is_rejected() {
        let mut style = ZoneStyle::shape(ShapeStyle::default());
        let before = style.clone();
        assert!(!style.apply(StylePatch::FontSize(22.0)));
        assert!(!style.apply(StylePatch::ImageFit(ImageFit::Contain)));
        assert_eq!(style, before);
    }

    #[test]
    fn test_common_fields_apply_everywhere() {
        let mut style = ZoneStyle::image(ImageStyle::default());
        assert!(style.apply(StylePatch::Opacity(1.5)));
        assert!(style.apply(StylePatch::CornerRadius(-3.0)));
        assert_eq!(style.common.opacity, 1.0);
        assert_eq!(style.common.corner_radius, 0.0);
    }

    #[test]
    fn test_fill_serialization_tagged() {
        let fill = Fill::Gradient {
            angle: 90.0,
            stops: vec![
                GradientStop { offset: 0.0, color: SerializableColor::white() },
                GradientStop { offset: 1.0, color: SerializableColor::black() },
            ],
        };
        let json = serde_json::to_value(&fill).unwrap();
        assert_eq!(json["type"], "gradient");
        assert_eq!(json["stops"][1]["color"], "#000000");

        let none: Fill = serde_json::from_str(r#"{"type":"none"}"#).unwrap();
        assert!(none.is_none());
    }
}
