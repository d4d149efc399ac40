//! Cardsmith Core Library
//!
//! Headless data model and logic for the Cardsmith ID-card template designer:
//! zones on the front and back faces of a card, percentage geometry, bounded
//! undo/redo, zone operations, and the designer controller.

pub mod designer;
pub mod geometry;
pub mod handles;
pub mod history;
pub mod input;
pub mod media;
pub mod ops;
pub mod selection;
pub mod shortcuts;
pub mod storage;
pub mod template;
pub mod tools;
pub mod viewport;
pub mod zone;

pub use designer::{Designer, DesignerError};
pub use geometry::{CanvasSettings, CardGeometry, Orientation, PX_PER_MM, Unit};
pub use handles::{Handle, HandleKind, Manipulation};
pub use history::{CommitOptions, History, MAX_HISTORY};
pub use input::{KeyEvent, Modifiers};
pub use media::{CropError, ImageCropper, ImageUploader, MemoryUploader, UploadError};
pub use ops::{AlignMode, Axis, Direction, GeometryPatch, TransformEnd};
pub use selection::{KeyElement, Selection};
pub use shortcuts::{Command, Shortcut, ShortcutRegistry};
pub use storage::{MemoryStore, StorageError, StorageResult, TemplateStore};
pub use template::PersistedTemplate;
pub use tools::{Mode, ToolManager};
pub use viewport::Viewport;
pub use zone::{SerializableColor, Side, Zone, ZoneId, ZoneKind, ZoneStyle};

#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStore;
