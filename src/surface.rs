use crate::geometry::CANVAS_SIZE;

/// Fixed-size square render target backed by a premultiplied RGBA8 pixmap.
///
/// Content is fully recomputed on every render call; there is no incremental
/// drawing or double buffering.
pub struct OutputSurface {
    pixmap: vello_cpu::Pixmap,
}

impl Default for OutputSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputSurface {
    pub fn new() -> Self {
        let side = CANVAS_SIZE as u16;
        Self {
            pixmap: vello_cpu::Pixmap::new(side, side),
        }
    }

    /// Side length in pixels.
    pub fn size(&self) -> u32 {
        CANVAS_SIZE
    }

    /// Overwrite every pixel with a straight-alpha RGBA color.
    pub fn fill(&mut self, rgba: [u8; 4]) {
        let premul = premul_rgba8(rgba[0], rgba[1], rgba[2], rgba[3]);
        for px in self.pixmap.data_as_u8_slice_mut().chunks_exact_mut(4) {
            px.copy_from_slice(&premul);
        }
    }

    /// Row-major premultiplied RGBA8 pixel bytes.
    pub fn data(&self) -> &[u8] {
        self.pixmap.data_as_u8_slice()
    }

    pub(crate) fn pixmap_mut(&mut self) -> &mut vello_cpu::Pixmap {
        &mut self.pixmap
    }
}

fn premul_rgba8(r: u8, g: u8, b: u8, a: u8) -> [u8; 4] {
    let af = (a as u16) + 1;
    let premul = |c: u8| -> u8 { (((c as u16) * af) >> 8) as u8 };
    [premul(r), premul(g), premul(b), a]
}
