use crate::error::{LunetteError, LunetteResult};

pub use kurbo::{Affine, Point, Rect, Vec2};

/// Side length of the square output surface, in pixels.
pub const CANVAS_SIZE: u32 = 1080;

/// Ellipse cutout geometry of a frame overlay, in the overlay's logical
/// 1080x1080 coordinate space.
///
/// Consumed only by the default-scale computation; the compositor never clips
/// to this ellipse. The overlay's own transparency shapes the cutout.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FrameGeometry {
    pub center: Point,
    pub radius_x: f64,
    pub radius_y: f64,
}

impl Default for FrameGeometry {
    fn default() -> Self {
        Self {
            center: Point::new(540.0, 340.0),
            radius_x: 480.0,
            radius_y: 420.0,
        }
    }
}

impl FrameGeometry {
    pub fn validate(&self) -> LunetteResult<()> {
        if !(self.radius_x > 0.0 && self.radius_y > 0.0) {
            return Err(LunetteError::validation("frame radii must be > 0"));
        }
        if !self.center.x.is_finite() || !self.center.y.is_finite() {
            return Err(LunetteError::validation("frame center must be finite"));
        }
        Ok(())
    }
}

/// Canvas-space rectangle the photo is drawn into: the photo is scaled
/// uniformly, centered on the surface, then panned by `offset`.
pub fn photo_draw_rect(width: u32, height: u32, scale: f64, offset: Vec2) -> Rect {
    let w = f64::from(width) * scale;
    let h = f64::from(height) * scale;
    let half = f64::from(CANVAS_SIZE) / 2.0;
    let x0 = half - w / 2.0 + offset.x;
    let y0 = half - h / 2.0 + offset.y;
    Rect::new(x0, y0, x0 + w, y0 + h)
}
