//! Bitmap decoding, natural-size lookup and cropping.

use crate::renderer::ImageResolver;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use cardsmith_core::media::{CropError, ImageCropper, MemoryUploader};
use cardsmith_core::storage::BoxFuture;
use image::{DynamicImage, ImageFormat, ImageReader};
use kurbo::Size;
use std::collections::HashMap;
use std::io::Cursor;
use std::sync::Arc;

/// Decode the payload of a base64 `data:` URL.
///
/// Returns `None` for anything that is not a base64 data URL.
pub fn decode_data_url(url: &str) -> Option<Vec<u8>> {
    let rest = url.strip_prefix("data:")?;
    let (meta, payload) = rest.split_once(',')?;
    if !meta.ends_with(";base64") {
        return None;
    }
    STANDARD.decode(payload.trim()).ok()
}

/// Encode bytes as a `data:` URL.
pub fn encode_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Natural pixel size of encoded image bytes, without decoding pixels.
pub fn image_dimensions(bytes: &[u8]) -> Option<Size> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .ok()?;
    let (w, h) = reader.into_dimensions().ok()?;
    Some(Size::new(w as f64, h as f64))
}

/// Cache of natural image sizes keyed by URL.
#[derive(Debug, Default)]
pub struct ImageCache {
    sizes: HashMap<String, Size>,
}

impl ImageCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the size of `bytes` under `url`. Returns the size if the bytes
    /// are a recognizable image.
    pub fn insert_bytes(&mut self, url: impl Into<String>, bytes: &[u8]) -> Option<Size> {
        let url = url.into();
        match image_dimensions(bytes) {
            Some(size) => {
                self.sizes.insert(url, size);
                Some(size)
            }
            None => {
                log::warn!("Could not read image dimensions for {}", url);
                None
            }
        }
    }

    /// Record the size of an inline data URL.
    pub fn insert_data_url(&mut self, url: &str) -> Option<Size> {
        let bytes = decode_data_url(url)?;
        self.insert_bytes(url, &bytes)
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }
}

impl ImageResolver for ImageCache {
    fn image_size(&self, url: &str) -> Option<Size> {
        self.sizes.get(url).copied()
    }
}

/// Center-crops bitmaps to a width/height ratio and returns PNG data URLs.
///
/// Reads `data:` URLs directly; `memory://` URLs are resolved through an
/// attached [`MemoryUploader`].
#[derive(Default)]
pub struct BitmapCropper {
    memory: Option<Arc<MemoryUploader>>,
}

impl BitmapCropper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_memory(memory: Arc<MemoryUploader>) -> Self {
        Self {
            memory: Some(memory),
        }
    }

    fn fetch(&self, url: &str) -> Result<Vec<u8>, CropError> {
        if url.starts_with("data:") {
            return decode_data_url(url)
                .ok_or_else(|| CropError::Decode(format!("malformed data URL: {}", truncate(url))));
        }
        if url.starts_with("memory://") {
            if let Some(bytes) = self.memory.as_ref().and_then(|m| m.get(url)) {
                return Ok(bytes);
            }
        }
        Err(CropError::UnsupportedSource(truncate(url).to_string()))
    }

    /// Synchronous crop used by the [`ImageCropper`] impl.
    pub fn crop_bytes(bytes: &[u8], ratio: f64) -> Result<Vec<u8>, CropError> {
        if !ratio.is_finite() || ratio <= 0.0 {
            return Err(CropError::InvalidRatio(ratio));
        }
        let img = image::load_from_memory(bytes).map_err(|e| CropError::Decode(e.to_string()))?;
        let cropped = center_crop(&img, ratio);
        let mut out = Vec::new();
        cropped
            .write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
            .map_err(|e| CropError::Encode(e.to_string()))?;
        Ok(out)
    }
}

impl ImageCropper for BitmapCropper {
    fn crop(&self, url: &str, ratio: f64) -> BoxFuture<'_, Result<String, CropError>> {
        let url = url.to_string();
        Box::pin(async move {
            let bytes = self.fetch(&url)?;
            let png = Self::crop_bytes(&bytes, ratio)?;
            log::debug!("Cropped {} to ratio {:.3}", truncate(&url), ratio);
            Ok(encode_data_url("image/png", &png))
        })
    }
}

fn center_crop(img: &DynamicImage, ratio: f64) -> DynamicImage {
    let (w, h) = (img.width(), img.height());
    if w == 0 || h == 0 {
        return img.clone();
    }
    let current = w as f64 / h as f64;
    let (cw, ch) = if current > ratio {
        (((h as f64 * ratio).round() as u32).clamp(1, w), h)
    } else {
        (w, ((w as f64 / ratio).round() as u32).clamp(1, h))
    };
    img.crop_imm((w - cw) / 2, (h - ch) / 2, cw, ch)
}

/// Keep log and error messages short for inline data URLs.
fn truncate(url: &str) -> &str {
    match url.char_indices().nth(64) {
        Some((i, _)) => &url[..i],
        None => url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardsmith_core::media::ImageUploader;
    use image::{Rgba, RgbaImage};

    fn png(width: u32, height: u32) -> Vec<u8> {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba([200, 10, 10, 255])));
        let mut out = Vec::new();
        img.write_to(&mut Cursor::new(&mut out), ImageFormat::Png).unwrap();
        out
    }

    #[test]
    fn test_data_url_roundtrip() {
        let url = encode_data_url("image/png", &[1, 2, 3]);
        assert_eq!(url, "data:image/png;base64,AQID");
        assert_eq!(decode_data_url(&url), Some(vec![1, 2, 3]));
        assert_eq!(decode_data_url("data:text/plain,hello"), None);
        assert_eq!(decode_data_url("https://example.com/a.png"), None);
    }

    #[test]
    fn test_cache_records_dimensions() {
        let mut cache = ImageCache::new();
        let url = encode_data_url("image/png", &png(40, 20));
        assert_eq!(cache.insert_data_url(&url), Some(Size::new(40.0, 20.0)));
        assert_eq!(cache.image_size(&url), Some(Size::new(40.0, 20.0)));
        assert_eq!(cache.insert_bytes("memory://junk", b"not an image"), None);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_crop_to_square() {
        let url = encode_data_url("image/png", &png(40, 20));
        let cropped = pollster::block_on(BitmapCropper::new().crop(&url, 1.0)).unwrap();
        assert!(cropped.starts_with("data:image/png;base64,"));
        let bytes = decode_data_url(&cropped).unwrap();
        assert_eq!(image_dimensions(&bytes), Some(Size::new(20.0, 20.0)));
    }

    #[test]
    fn test_crop_tall_to_wide() {
        let out = BitmapCropper::crop_bytes(&png(30, 60), 1.5).unwrap();
        assert_eq!(image_dimensions(&out), Some(Size::new(30.0, 20.0)));
    }

    #[test]
    fn test_crop_from_memory_upload() {
        let memory = Arc::new(MemoryUploader::new());
        let url = pollster::block_on(memory.upload(&png(20, 40), "photos/a.png")).unwrap();
        let cropper = BitmapCropper::with_memory(memory.clone());
        let cropped = pollster::block_on(cropper.crop(&url, 1.0)).unwrap();
        let bytes = decode_data_url(&cropped).unwrap();
        assert_eq!(image_dimensions(&bytes), Some(Size::new(20.0, 20.0)));
    }

    #[test]
    fn test_crop_errors() {
        let cropper = BitmapCropper::new();
        let err = pollster::block_on(cropper.crop("https://example.com/a.png", 1.0)).unwrap_err();
        assert!(matches!(err, CropError::UnsupportedSource(_)));

        let url = encode_data_url("image/png", b"garbage");
        let err = pollster::block_on(cropper.crop(&url, 1.0)).unwrap_err();
        assert!(matches!(err, CropError::Decode(_)));

        let url = encode_data_url("image/png", &png(4, 4));
        let err = pollster::block_on(cropper.crop(&url, 0.0)).unwrap_err();
        assert!(matches!(err, CropError::InvalidRatio(_)));
    }
}
