//! Zone definitions for card templates.

mod kind;
mod path;
mod style;

pub use kind::{ContentKind, ZoneKind};
pub use path::{PathError, normalize_polyline, parse_path_data, polyline_to_path_data};
pub use style::{
    CommonStyle, Fill, FontWeight, GradientStop, ImageFit, ImageStyle, ShapeStyle, Stroke,
    StyleKind, StylePatch, TextAlign, TextStyle, VerticalAlign, ZoneStyle,
};

use kurbo::Rect;
use peniko::Color;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for zones.
pub type ZoneId = Uuid;

/// Card face a zone belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Side {
    #[default]
    Front,
    Back,
}

impl Side {
    /// The opposite face.
    pub fn flip(self) -> Self {
        match self {
            Side::Front => Side::Back,
            Side::Back => Side::Front,
        }
    }
}

/// Serializable color representation (RGBA8), stored as a CSS hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub const fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    pub const fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Parse `#rgb`, `#rrggbb`, `#rrggbbaa` or `transparent`.
    pub fn from_hex(color: &str) -> Option<Self> {
        let color = color.trim();
        if color.eq_ignore_ascii_case("transparent") {
            return Some(Self::transparent());
        }
        let hex = color.strip_prefix('#').filter(|h| h.is_ascii())?;
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        match hex.len() {
            3 => {
                let r = channel(&hex[0..1])? * 17;
                let g = channel(&hex[1..2])? * 17;
                let b = channel(&hex[2..3])? * 17;
                Some(Self::new(r, g, b, 255))
            }
            6 => Some(Self::new(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
                255,
            )),
            8 => Some(Self::new(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
                channel(&hex[6..8])?,
            )),
            _ => None,
        }
    }

    /// Format as `#rrggbb`, or `#rrggbbaa` when not fully opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    /// Multiply the alpha channel by `opacity` (0.0..=1.0).
    pub fn with_opacity(&self, opacity: f64) -> Self {
        let alpha = (self.a as f64 * opacity.clamp(0.0, 1.0)).round() as u8;
        Self { a: alpha, ..*self }
    }
}

impl TryFrom<String> for SerializableColor {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value).ok_or_else(|| format!("Invalid color: {}", value))
    }
}

impl From<SerializableColor> for String {
    fn from(color: SerializableColor) -> Self {
        color.to_hex()
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

fn default_visible() -> bool {
    true
}

/// A single placeable element on one face of a card.
///
/// Geometry is stored as percentages (0–100) of the trim-area box so that it
/// stays valid across unit and zoom changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "ZoneRecord")]
pub struct Zone {
    pub id: ZoneId,
    #[serde(rename = "type")]
    pub kind: ZoneKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Rotation in degrees. Mirrored into `style.common.rotation`.
    #[serde(default)]
    pub rotation: f64,
    pub style: ZoneStyle,
    #[serde(default)]
    pub mock_content: String,
    #[serde(default)]
    pub side: Side,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i32>,
    #[serde(default)]
    pub locked: bool,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

/// Wire form of a zone. `style` may omit its `variant` tag, in which case the
/// variant follows the zone type.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ZoneRecord {
    id: ZoneId,
    #[serde(rename = "type")]
    kind: ZoneKind,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    #[serde(default)]
    rotation: f64,
    style: serde_json::Value,
    #[serde(default)]
    mock_content: String,
    #[serde(default)]
    side: Side,
    #[serde(default)]
    z_index: Option<i32>,
    #[serde(default)]
    locked: bool,
    #[serde(default = "default_visible")]
    visible: bool,
}

impl TryFrom<ZoneRecord> for Zone {
    type Error = serde_json::Error;

    fn try_from(record: ZoneRecord) -> Result<Self, Self::Error> {
        let mut style = record.style;
        if let Some(fields) = style.as_object_mut() {
            if !fields.contains_key("variant") {
                let variant = match record.kind.content_kind() {
                    ContentKind::Text => "text",
                    ContentKind::Shape => "shape",
                    ContentKind::Image => "image",
                };
                fields.insert("variant".to_string(), variant.into());
            }
        }
        Ok(Self {
            id: record.id,
            kind: record.kind,
            x: record.x,
            y: record.y,
            width: record.width,
            height: record.height,
            rotation: record.rotation,
            style: serde_json::from_value(style)?,
            mock_content: record.mock_content,
            side: record.side,
            z_index: record.z_index,
            locked: record.locked,
            visible: record.visible,
        })
    }
}

impl Zone {
    /// Create a zone of the given kind with its default style and placeholder.
    pub fn new(kind: ZoneKind, side: Side) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            rotation: 0.0,
            style: kind.default_style(),
            mock_content: kind.placeholder().to_string(),
            side,
            z_index: None,
            locked: false,
            visible: true,
        }
    }

    /// Builder-style geometry setter (percentages).
    pub fn with_bounds(mut self, x: f64, y: f64, width: f64, height: f64) -> Self {
        self.x = x;
        self.y = y;
        self.width = width;
        self.height = height;
        self
    }

    /// Bounding box in percentage space.
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    /// Set geometry from a percentage-space rectangle.
    pub fn set_bounds(&mut self, rect: Rect) {
        self.x = rect.x0;
        self.y = rect.y0;
        self.width = rect.width();
        self.height = rect.height();
    }

    /// Set rotation on the zone and in its style record.
    pub fn set_rotation(&mut self, degrees: f64) {
        self.rotation = degrees;
        self.style.common.rotation = degrees;
    }

    /// Duplicate with a fresh id.
    pub fn duplicate(&self) -> Self {
        Self {
            id: Uuid::new_v4(),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_hex_roundtrip() {
        let color = SerializableColor::from_hex("#1e40af").unwrap();
        assert_eq!(color, SerializableColor::new(0x1e, 0x40, 0xaf, 255));
        assert_eq!(color.to_hex(), "#1e40af");

        let short = SerializableColor::from_hex("#fff").unwrap();
        assert_eq!(short, SerializableColor::white());

        assert!(SerializableColor::from_hex("blue").is_none());
        assert!(SerializableColor::from_hex("#12345").is_none());
    }

    #[test]
    fn test_zone_defaults_on_deserialize() {
        let zone = Zone::new(ZoneKind::Text, Side::Front).with_bounds(1.0, 2.0, 3.0, 4.0);
        let mut value = serde_json::to_value(&zone).unwrap();
        let obj = value.as_object_mut().unwrap();
        obj.remove("side");
        obj.remove("visible");

        let back: Zone = serde_json::from_value(value).unwrap();
        assert_eq!(back.side, Side::Front);
        assert!(back.visible);
        assert_eq!(back.bounds(), Rect::new(1.0, 2.0, 4.0, 6.0));
    }

    #[test]
    fn test_style_variant_follows_zone_type() {
        for kind in [ZoneKind::Circle, ZoneKind::StudentName, ZoneKind::SchoolLogo] {
            let zone = Zone::new(kind, Side::Front).with_bounds(1.0, 2.0, 3.0, 4.0);
            let mut value = serde_json::to_value(&zone).unwrap();
            value["style"].as_object_mut().unwrap().remove("variant");

            let back: Zone = serde_json::from_value(value).unwrap();
            assert_eq!(back, zone);
        }
    }

    #[test]
    fn test_zone_json_field_names() {
        let zone = Zone::new(ZoneKind::StudentPhoto, Side::Back);
        let value = serde_json::to_value(&zone).unwrap();
        assert_eq!(value["type"], "STUDENT_PHOTO");
        assert_eq!(value["side"], "BACK");
        assert!(value.get("mockContent").is_some());
    }

    #[test]
    fn test_set_rotation_syncs_style() {
        let mut zone = Zone::new(ZoneKind::Rectangle, Side::Front);
        zone.set_rotation(45.0);
        assert_eq!(zone.rotation, 45.0);
        assert_eq!(zone.style.common.rotation, 45.0);
    }
}
