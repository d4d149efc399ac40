//! Cardsmith Render Library
//!
//! Turns a card face into a backend-neutral [`Scene`] and ships an SVG
//! renderer plus bitmap helpers for cropping and natural-size lookup.

pub mod bitmap;
mod renderer;
pub mod scene;
mod svg;

pub use bitmap::{BitmapCropper, ImageCache, decode_data_url, encode_data_url};
pub use renderer::{ImageResolver, RenderContext, RenderResult, Renderer, RendererError};
pub use scene::{Overlay, Scene, SceneBuilder, SceneItem, ZoneContent, ZoneGroup};
pub use svg::SvgRenderer;
