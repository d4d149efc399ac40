//! Cardsmith App Library
//!
//! Headless shell around the designer: loads persisted templates, renders a
//! card face to SVG and moves templates in and out of the template store.

use cardsmith_core::storage::{StorageError, TemplateStore};
use cardsmith_core::{
    CanvasSettings, Designer, Orientation, PersistedTemplate, ShortcutRegistry, Side, ZoneKind,
};
use cardsmith_render::{ImageCache, RenderContext, RendererError, SvgRenderer};
use std::path::Path;
use std::time::Instant;
use thiserror::Error;

/// Errors surfaced by the command-line shell.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid template: {0}")]
    Template(#[from] serde_json::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Render(#[from] RendererError),
}

pub type AppResult<T> = Result<T, AppError>;

/// Card face selector for the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum FaceArg {
    #[default]
    Front,
    Back,
}

impl From<FaceArg> for Side {
    fn from(face: FaceArg) -> Self {
        match face {
            FaceArg::Front => Side::Front,
            FaceArg::Back => Side::Back,
        }
    }
}

/// Orientation selector for the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OrientationArg {
    #[default]
    Vertical,
    Horizontal,
}

impl From<OrientationArg> for Orientation {
    fn from(arg: OrientationArg) -> Self {
        match arg {
            OrientationArg::Vertical => Orientation::Vertical,
            OrientationArg::Horizontal => Orientation::Horizontal,
        }
    }
}

/// Zones placed on the front of a starter template.
const STARTER_FRONT: &[ZoneKind] = &[
    ZoneKind::SchoolLogo,
    ZoneKind::SchoolName,
    ZoneKind::StudentPhoto,
    ZoneKind::StudentName,
    ZoneKind::AdmissionNumber,
    ZoneKind::Grade,
];

/// Zones placed on the back of a starter template.
const STARTER_BACK: &[ZoneKind] = &[ZoneKind::BloodGroup, ZoneKind::QrCode, ZoneKind::Signature];

pub fn read_template(path: &Path) -> AppResult<PersistedTemplate> {
    let json = std::fs::read_to_string(path)?;
    Ok(PersistedTemplate::from_json(&json)?)
}

pub fn write_template(path: &Path, template: &PersistedTemplate) -> AppResult<()> {
    std::fs::write(path, template.to_json()?)?;
    Ok(())
}

/// A new CR80 template, optionally populated with the standard zones.
pub fn new_template(orientation: Orientation, starter: bool) -> PersistedTemplate {
    let mut designer = Designer::new(CanvasSettings::default());
    designer.set_orientation(orientation, Instant::now());
    if starter {
        for kind in STARTER_FRONT {
            designer.add_zone(*kind);
        }
        designer.switch_side(Side::Back);
        for kind in STARTER_BACK {
            designer.add_zone(*kind);
        }
    }
    designer.template()
}

/// Natural sizes for every inline image referenced by the template.
pub fn image_cache(template: &PersistedTemplate) -> ImageCache {
    let mut cache = ImageCache::new();
    for zone in &template.zones {
        if zone.mock_content.starts_with("data:") && cache.insert_data_url(&zone.mock_content).is_none() {
            log::warn!("Zone {} has an unreadable inline image", zone.id);
        }
    }
    cache
}

/// Render one face of a template as an SVG document.
pub fn render_face(template: PersistedTemplate, face: Side, show_guides: bool) -> AppResult<String> {
    let images = image_cache(&template);
    let mut designer = Designer::from_template(template);
    designer.switch_side(face);
    let zones = designer.live_zones();
    log::info!("Rendering {} zone(s) on the {:?} face", zones.len(), face);

    let ctx = RenderContext::for_designer(&designer, &zones)
        .with_guides(show_guides)
        .with_zoom(1.0)
        .with_images(&images);
    Ok(SvgRenderer::new().render_to_string(&ctx)?)
}

/// Store a template file under `id`.
pub async fn import_template(store: &dyn TemplateStore, path: &Path, id: &str) -> AppResult<()> {
    let template = read_template(path)?;
    store.save(id, &template).await?;
    log::info!("Imported {} as '{}'", path.display(), id);
    Ok(())
}

/// Write the stored template `id` to a file.
pub async fn export_template(store: &dyn TemplateStore, id: &str, path: &Path) -> AppResult<()> {
    let template = store.load(id).await?;
    write_template(path, &template)?;
    log::info!("Exported '{}' to {}", id, path.display());
    Ok(())
}

/// The keyboard shortcut reference as aligned text.
pub fn shortcut_table() -> String {
    let shortcuts = ShortcutRegistry::all();
    let width = shortcuts.iter().map(|s| s.format().len()).max().unwrap_or(0);
    shortcuts
        .iter()
        .map(|s| format!("{:<width$}  {}\n", s.format(), s.description, width = width))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardsmith_core::MemoryStore;

    #[test]
    fn test_starter_template_fills_both_faces() {
        let template = new_template(Orientation::Vertical, true);
        let front = template.zones.iter().filter(|z| z.side == Side::Front).count();
        let back = template.zones.iter().filter(|z| z.side == Side::Back).count();
        assert_eq!(front, STARTER_FRONT.len());
        assert_eq!(back, STARTER_BACK.len());
    }

    #[test]
    fn test_horizontal_template_swaps_dimensions() {
        let template = new_template(Orientation::Horizontal, false);
        assert!(template.zones.is_empty());
        assert_eq!(template.orientation, Orientation::Horizontal);
        assert!(template.canvas_settings.width > template.canvas_settings.height);
    }

    #[test]
    fn test_render_face_only_draws_that_face() {
        let template = new_template(Orientation::Vertical, true);
        let back_ids: Vec<String> = template
            .zones
            .iter()
            .filter(|z| z.side == Side::Back)
            .map(|z| z.id.to_string())
            .collect();

        let svg = render_face(template.clone(), Side::Front, true).unwrap();
        assert!(svg.contains("SPRINGFIELD HIGH SCHOOL"));
        assert!(back_ids.iter().all(|id| !svg.contains(id.as_str())));

        let svg = render_face(template, Side::Back, false).unwrap();
        assert!(back_ids.iter().all(|id| svg.contains(id.as_str())));
        assert!(!svg.contains(r#"class="bleed""#));
    }

    #[test]
    fn test_template_file_roundtrip_through_store() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("in.json");
        let target = dir.path().join("out.json");
        let template = new_template(Orientation::Vertical, true);
        write_template(&source, &template).unwrap();

        let store = MemoryStore::new();
        pollster::block_on(import_template(&store, &source, "school")).unwrap();
        pollster::block_on(export_template(&store, "school", &target)).unwrap();
        assert_eq!(read_template(&target).unwrap(), template);
    }

    #[test]
    fn test_missing_template_file() {
        let err = read_template(Path::new("/nonexistent/cardsmith.json")).unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
    }

    #[test]
    fn test_shortcut_table_lists_every_shortcut() {
        let table = shortcut_table();
        assert_eq!(table.lines().count(), ShortcutRegistry::all().len());
        assert!(table.contains("Ctrl+Z"));
    }
}
