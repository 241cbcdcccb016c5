use std::path::Path;

use anyhow::Context;

use crate::{error::LunetteResult, surface::OutputSurface};

/// Encode the surface as PNG bytes (straight alpha, exactly 1080x1080).
///
/// The result is handed to an external save/download collaborator; nothing is
/// persisted here.
pub fn encode_png(surface: &OutputSurface) -> LunetteResult<Vec<u8>> {
    let mut data = surface.data().to_vec();
    unpremultiply_rgba8_in_place(&mut data);

    let side = surface.size();
    let mut out = std::io::Cursor::new(Vec::new());
    image::write_buffer_with_format(
        &mut out,
        &data,
        side,
        side,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .context("encode surface as png")?;
    Ok(out.into_inner())
}

/// Encode and write the surface to `path`, creating parent directories.
pub fn save_png(surface: &OutputSurface, path: impl AsRef<Path>) -> LunetteResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let bytes = encode_png(surface)?;
    std::fs::write(path, bytes).with_context(|| format!("write png '{}'", path.display()))?;
    tracing::info!(path = %path.display(), "exported composite");
    Ok(())
}

fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u32;
        if a == 0 || a == 255 {
            continue;
        }
        px[0] = (((px[0] as u32) * 255 + a / 2) / a).min(255) as u8;
        px[1] = (((px[1] as u32) * 255 + a / 2) / a).min(255) as u8;
        px[2] = (((px[2] as u32) * 255 + a / 2) / a).min(255) as u8;
    }
}
