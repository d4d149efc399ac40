//! Zone kinds and their defaults.

use super::style::{
    Fill, FontWeight, ImageStyle, ShapeStyle, Stroke, TextAlign, TextStyle, ZoneStyle,
};
use super::SerializableColor;
use serde::{Deserialize, Serialize};

/// How a zone kind is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Text,
    Image,
    Shape,
}

/// The closed set of zone kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ZoneKind {
    StudentPhoto,
    StudentName,
    AdmissionNumber,
    Grade,
    BloodGroup,
    SchoolName,
    #[serde(alias = "LOGO")]
    SchoolLogo,
    QrCode,
    Signature,
    Text,
    Rectangle,
    Circle,
    Path,
    Image,
}

impl ZoneKind {
    /// All zone kinds, in palette order.
    pub fn all() -> &'static [ZoneKind] {
        &[
            ZoneKind::StudentPhoto,
            ZoneKind::StudentName,
            ZoneKind::AdmissionNumber,
            ZoneKind::Grade,
            ZoneKind::BloodGroup,
            ZoneKind::SchoolName,
            ZoneKind::SchoolLogo,
            ZoneKind::QrCode,
            ZoneKind::Signature,
            ZoneKind::Text,
            ZoneKind::Rectangle,
            ZoneKind::Circle,
            ZoneKind::Path,
            ZoneKind::Image,
        ]
    }

    /// Display name for palettes and layer lists.
    pub fn label(&self) -> &'static str {
        match self {
            ZoneKind::StudentPhoto => "Student Photo",
            ZoneKind::StudentName => "Student Name",
            ZoneKind::AdmissionNumber => "Admission Number",
            ZoneKind::Grade => "Grade",
            ZoneKind::BloodGroup => "Blood Group",
            ZoneKind::SchoolName => "School Name",
            ZoneKind::SchoolLogo => "School Logo",
            ZoneKind::QrCode => "QR Code",
            ZoneKind::Signature => "Signature",
            ZoneKind::Text => "Text",
            ZoneKind::Rectangle => "Rectangle",
            ZoneKind::Circle => "Circle",
            ZoneKind::Path => "Path",
            ZoneKind::Image => "Image",
        }
    }

    pub fn content_kind(&self) -> ContentKind {
        match self {
            ZoneKind::StudentPhoto
            | ZoneKind::SchoolLogo
            | ZoneKind::QrCode
            | ZoneKind::Signature
            | ZoneKind::Image => ContentKind::Image,
            ZoneKind::Rectangle | ZoneKind::Circle | ZoneKind::Path => ContentKind::Shape,
            ZoneKind::StudentName
            | ZoneKind::AdmissionNumber
            | ZoneKind::Grade
            | ZoneKind::BloodGroup
            | ZoneKind::SchoolName
            | ZoneKind::Text => ContentKind::Text,
        }
    }

    /// Kinds whose height is derived from width to stay physically square.
    pub fn is_photo(&self) -> bool {
        matches!(self, ZoneKind::StudentPhoto)
    }

    /// Kinds whose resize handles keep the width/height ratio.
    pub fn is_aspect_locked(&self) -> bool {
        self.content_kind() == ContentKind::Image
    }

    /// Whether the rotation handle is offered.
    pub fn allows_rotation(&self) -> bool {
        !self.is_photo()
    }

    /// Whether a crop step runs before an uploaded image is placed.
    pub fn wants_crop(&self) -> bool {
        matches!(self, ZoneKind::StudentPhoto | ZoneKind::Image)
    }

    /// Placeholder content shown in the designer.
    pub fn placeholder(&self) -> &'static str {
        match self {
            ZoneKind::StudentName => "John Doe",
            ZoneKind::AdmissionNumber => "ADM-2024-001",
            ZoneKind::Grade => "Grade 10 - A",
            ZoneKind::BloodGroup => "O+",
            ZoneKind::SchoolName => "Springfield High School",
            ZoneKind::Text => "Text",
            _ => "",
        }
    }

    /// Default style for newly created zones of this kind.
    pub fn default_style(&self) -> ZoneStyle {
        match self.content_kind() {
            ContentKind::Text => {
                let mut text = TextStyle::default();
                match self {
                    ZoneKind::SchoolName => {
                        text.font_size = 18.0;
                        text.font_weight = FontWeight::Bold;
                        text.align = TextAlign::Center;
                        text.uppercase = true;
                    }
                    ZoneKind::StudentName => {
                        text.font_size = 16.0;
                        text.font_weight = FontWeight::Bold;
                        text.align = TextAlign::Center;
                    }
                    ZoneKind::BloodGroup => {
                        text.color = SerializableColor::new(0xb9, 0x1c, 0x1c, 255);
                        text.font_weight = FontWeight::Bold;
                    }
                    _ => {}
                }
                ZoneStyle::text(text)
            }
            ContentKind::Image => ZoneStyle::image(ImageStyle::default()),
            ContentKind::Shape => {
                let fill = match self {
                    ZoneKind::Path => Fill::None,
                    _ => Fill::solid(SerializableColor::new(0xe5, 0xe7, 0xeb, 255)),
                };
                ZoneStyle::shape(ShapeStyle {
                    fill,
                    stroke: Stroke::solid(SerializableColor::new(0x37, 0x41, 0x51, 255), 1.0),
                    path_data: None,
                    points: Vec::new(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_kinds_are_aspect_locked() {
        for kind in ZoneKind::all() {
            assert_eq!(
                kind.is_aspect_locked(),
                kind.content_kind() == ContentKind::Image,
                "{:?}",
                kind
            );
        }
        assert!(!ZoneKind::StudentPhoto.allows_rotation());
        assert!(ZoneKind::SchoolLogo.allows_rotation());
    }

    #[test]
    fn test_default_style_variant_matches_content() {
        for kind in ZoneKind::all() {
            let style = kind.default_style();
            match kind.content_kind() {
                ContentKind::Text => assert!(style.as_text().is_some()),
                ContentKind::Image => assert!(style.as_image().is_some()),
                ContentKind::Shape => assert!(style.as_shape().is_some()),
            }
        }
    }

    #[test]
    fn test_logo_alias() {
        let kind: ZoneKind = serde_json::from_str("\"LOGO\"").unwrap();
        assert_eq!(kind, ZoneKind::SchoolLogo);
        assert_eq!(serde_json::to_string(&kind).unwrap(), "\"SCHOOL_LOGO\"");
    }
}
