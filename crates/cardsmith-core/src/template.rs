//! Persisted template document.

use crate::geometry::{CanvasSettings, Orientation};
use crate::zone::Zone;
use serde::{Deserialize, Serialize};

/// A saved template: both faces' zones plus card settings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedTemplate {
    pub zones: Vec<Zone>,
    #[serde(default)]
    pub orientation: Orientation,
    #[serde(default)]
    pub canvas_settings: CanvasSettings,
}

impl PersistedTemplate {
    pub fn new(zones: Vec<Zone>, orientation: Orientation, canvas_settings: CanvasSettings) -> Self {
        Self {
            zones,
            orientation,
            canvas_settings,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zone::{Side, ZoneKind};

    #[test]
    fn test_json_shape() {
        let template = PersistedTemplate::new(
            vec![Zone::new(ZoneKind::Grade, Side::Back)],
            Orientation::Horizontal,
            CanvasSettings::default(),
        );
        let value: serde_json::Value = serde_json::from_str(&template.to_json().unwrap()).unwrap();
        assert_eq!(value["orientation"], "HORIZONTAL");
        assert_eq!(value["canvasSettings"]["safeMargin"], 3.0);
        assert_eq!(value["zones"][0]["side"], "BACK");
    }

    #[test]
    fn test_minimal_document_uses_defaults() {
        let json = r#"{
            "zones": [
                { "id": "6f1c0a5e-8a43-4c0b-9d7e-3f1e4b2a9c10", "type": "LOGO",
                  "x": 5, "y": 5, "width": 20, "height": 10,
                  "style": { "opacity": 1.0, "variant": "image" } }
            ]
        }"#;
        let template = PersistedTemplate::from_json(json).unwrap();
        assert_eq!(template.orientation, Orientation::Vertical);
        assert_eq!(template.canvas_settings, CanvasSettings::default());
        assert_eq!(template.zones[0].kind, ZoneKind::SchoolLogo);
        assert_eq!(template.zones[0].side, Side::Front);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(PersistedTemplate::from_json("{ \"zones\": 3 }").is_err());
    }
}
