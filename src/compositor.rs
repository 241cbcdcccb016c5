use std::sync::Arc;

use crate::{
    assets::{DecodedPhoto, FrameAsset},
    editor::EditorState,
    error::{LunetteError, LunetteResult},
    geometry::{CANVAS_SIZE, photo_draw_rect},
    surface::OutputSurface,
};

/// Options controlling the composite pass.
#[derive(Clone, Copy, Debug)]
pub struct RenderOptions {
    /// Straight-alpha background color, visible as the border outside the
    /// photo and wherever the overlay is transparent past the photo's edge.
    pub background_rgba: [u8; 4],
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            background_rgba: [255, 255, 255, 255],
        }
    }
}

/// Composite the current editor state onto `surface`.
///
/// Paint order: background fill, then the scaled/panned photo, then the frame
/// overlay stretched to the full surface. The photo rectangle may extend
/// beyond the surface; clipping is implicit. The overlay's transparency alone
/// shapes the cutout: no ellipse clipping happens here.
///
/// Pure with respect to its inputs: the same state and assets always produce
/// the same pixels.
#[tracing::instrument(skip_all, fields(scale = state.scale(), has_photo = state.photo().is_some()))]
pub fn render(
    state: &EditorState,
    frame: Option<&FrameAsset>,
    surface: &mut OutputSurface,
    options: &RenderOptions,
) -> LunetteResult<()> {
    let Some(photo) = state.photo() else {
        // idle: background only
        surface.fill(options.background_rgba);
        return Ok(());
    };

    let side = surface.size() as u16;
    let mut ctx = vello_cpu::RenderContext::new(side, side);

    // The scene replaces the pixmap content wholesale, so the background must
    // be the first op rather than a pre-fill of the surface.
    draw_background(&mut ctx, options.background_rgba, surface.size());
    draw_photo(&mut ctx, photo, state)?;
    if let Some(frame) = frame {
        draw_overlay(&mut ctx, &frame.image)?;
    }

    ctx.flush();
    ctx.render_to_pixmap(surface.pixmap_mut());
    Ok(())
}

fn draw_background(ctx: &mut vello_cpu::RenderContext, rgba: [u8; 4], side: u32) {
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
        rgba[0], rgba[1], rgba[2], rgba[3],
    ));
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
        0.0,
        0.0,
        f64::from(side),
        f64::from(side),
    ));
}

fn draw_photo(
    ctx: &mut vello_cpu::RenderContext,
    photo: &DecodedPhoto,
    state: &EditorState,
) -> LunetteResult<()> {
    let rect = photo_draw_rect(photo.width, photo.height, state.scale(), state.offset());
    let transform =
        kurbo::Affine::translate((rect.x0, rect.y0)) * kurbo::Affine::scale(state.scale());
    draw_image(ctx, photo, transform)
}

fn draw_overlay(ctx: &mut vello_cpu::RenderContext, overlay: &DecodedPhoto) -> LunetteResult<()> {
    // The overlay is logically 1080x1080 but is stretched to the surface
    // regardless of its native dimensions.
    let sx = f64::from(CANVAS_SIZE) / f64::from(overlay.width.max(1));
    let sy = f64::from(CANVAS_SIZE) / f64::from(overlay.height.max(1));
    draw_image(ctx, overlay, kurbo::Affine::scale_non_uniform(sx, sy))
}

fn draw_image(
    ctx: &mut vello_cpu::RenderContext,
    image: &DecodedPhoto,
    transform: kurbo::Affine,
) -> LunetteResult<()> {
    let paint = image_paint(image)?;
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_transform(affine_to_cpu(transform));
    ctx.set_paint(paint);
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
        0.0,
        0.0,
        f64::from(image.width),
        f64::from(image.height),
    ));
    Ok(())
}

fn image_paint(image: &DecodedPhoto) -> LunetteResult<vello_cpu::Image> {
    let pixmap =
        premul_bytes_to_pixmap(image.rgba8_premul.as_slice(), image.width, image.height)?;
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

fn premul_bytes_to_pixmap(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> LunetteResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| LunetteError::validation("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| LunetteError::validation("image height exceeds u16"))?;
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(LunetteError::validation("image byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for px in rgba8_premul.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

fn affine_to_cpu(a: kurbo::Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}
