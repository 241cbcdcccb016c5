use std::{path::Path, sync::Arc};

use anyhow::Context;

use crate::{
    error::{LunetteError, LunetteResult},
    geometry::FrameGeometry,
};

/// Decoded raster photo in premultiplied RGBA8 form.
#[derive(Clone, Debug)]
pub struct DecodedPhoto {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

/// A user-selected photo file: MIME type plus raw bytes.
///
/// Reads are front-loaded here so the editor and compositor stay IO-free.
#[derive(Clone, Debug)]
pub struct PhotoFile {
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl PhotoFile {
    pub fn new(mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime: mime.into(),
            bytes,
        }
    }

    /// Read a file from disk, guessing the MIME type from its extension.
    pub fn from_path(path: impl AsRef<Path>) -> LunetteResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .with_context(|| format!("read photo file '{}'", path.display()))?;
        let mime = path
            .extension()
            .and_then(|s| s.to_str())
            .and_then(mime_for_extension)
            .unwrap_or("application/octet-stream");
        Ok(Self::new(mime, bytes))
    }

    /// Whether the MIME type carries the `image/` prefix required for loading.
    pub fn is_image(&self) -> bool {
        self.mime.starts_with("image/")
    }
}

fn mime_for_extension(ext: &str) -> Option<&'static str> {
    match ext.to_ascii_lowercase().as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "bmp" => Some("image/bmp"),
        "tif" | "tiff" => Some("image/tiff"),
        _ => None,
    }
}

/// Decode encoded photo bytes and convert to premultiplied RGBA8.
pub fn decode_photo(bytes: &[u8]) -> LunetteResult<DecodedPhoto> {
    let dyn_img = image::load_from_memory(bytes).map_err(|e| {
        tracing::warn!(error = %e, "photo decode failed");
        LunetteError::decode(e.to_string())
    })?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(DecodedPhoto {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

/// The pre-authored frame overlay, composited last on every render.
///
/// Loaded once at startup and shared read-only across renders. Opaque pixels
/// form the visible frame; transparent regions let the photo show through.
#[derive(Clone, Debug)]
pub struct FrameAsset {
    pub image: DecodedPhoto,
    pub geometry: FrameGeometry,
}

impl FrameAsset {
    pub fn new(image: DecodedPhoto, geometry: FrameGeometry) -> LunetteResult<Self> {
        geometry.validate()?;
        Ok(Self { image, geometry })
    }

    /// Load the overlay from disk with the stock cutout geometry.
    ///
    /// Any failure maps to [`LunetteError::AssetLoad`]: the overlay is a
    /// deployment-provided asset, so its absence is not a user input error.
    pub fn load(path: impl AsRef<Path>) -> LunetteResult<Self> {
        Self::load_with_geometry(path, FrameGeometry::default())
    }

    pub fn load_with_geometry(
        path: impl AsRef<Path>,
        geometry: FrameGeometry,
    ) -> LunetteResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| {
            LunetteError::asset_load(format!("read frame overlay '{}': {e}", path.display()))
        })?;
        Self::from_bytes(&bytes, geometry)
    }

    pub fn from_bytes(bytes: &[u8], geometry: FrameGeometry) -> LunetteResult<Self> {
        let image = decode_photo(bytes)
            .map_err(|e| LunetteError::asset_load(format!("decode frame overlay: {e}")))?;
        Self::new(image, geometry)
    }
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}
