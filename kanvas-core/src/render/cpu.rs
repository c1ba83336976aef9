use crate::{
    foundation::core::{Affine, Rect, Rgba8Premul},
    foundation::error::{KanvasError, KanvasResult},
    render::surface::{OffscreenSurface, Raster, Surface},
};

/// Surface drawing through `vello_cpu`.
pub struct CpuSurface {
    width: u16,
    height: u16,
    ctx: vello_cpu::RenderContext,
    transform: Affine,
    layers: usize,
    saved: Vec<(Affine, usize)>,
}

impl CpuSurface {
    pub fn new(width: u32, height: u32) -> KanvasResult<Self> {
        let width_u16: u16 = width
            .try_into()
            .map_err(|_| KanvasError::raster(format!("surface width {width} exceeds u16")))?;
        let height_u16: u16 = height
            .try_into()
            .map_err(|_| KanvasError::raster(format!("surface height {height} exceeds u16")))?;
        if width_u16 == 0 || height_u16 == 0 {
            return Err(KanvasError::raster("surface must not be empty"));
        }
        Ok(Self {
            width: width_u16,
            height: height_u16,
            ctx: vello_cpu::RenderContext::new(width_u16, height_u16),
            transform: Affine::IDENTITY,
            layers: 0,
            saved: Vec::new(),
        })
    }

    pub fn width(&self) -> u32 {
        u32::from(self.width)
    }

    pub fn height(&self) -> u32 {
        u32::from(self.height)
    }

    /// Paint the whole surface, ignoring the current transform.
    pub fn clear(&mut self, color: Rgba8Premul) {
        let rect = Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height));
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(color_to_cpu(color));
        self.ctx.fill_rect(&rect_to_cpu(rect));
    }

    /// Rasterize everything drawn so far.
    pub fn into_raster(mut self) -> KanvasResult<Raster> {
        self.pop_layers_to(0);
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);
        Raster::new(
            u32::from(self.width),
            u32::from(self.height),
            pixmap.data_as_u8_slice().to_vec(),
        )
    }

    fn pop_layers_to(&mut self, depth: usize) {
        while self.layers > depth {
            self.ctx.pop_layer();
            self.layers -= 1;
        }
    }

    fn sync_transform(&mut self) {
        self.ctx.set_transform(affine_to_cpu(self.transform));
    }
}

impl Surface for CpuSurface {
    fn transform(&self) -> Affine {
        self.transform
    }

    fn set_transform(&mut self, transform: Affine) {
        self.transform = transform;
    }

    fn save(&mut self) {
        self.saved.push((self.transform, self.layers));
    }

    fn restore(&mut self) {
        if let Some((transform, depth)) = self.saved.pop() {
            self.pop_layers_to(depth);
            self.transform = transform;
        }
    }

    fn push_clip(&mut self, rect: Rect) {
        use vello_cpu::kurbo::Shape as _;

        self.sync_transform();
        self.ctx.push_clip_layer(&rect_to_cpu(rect).to_path(0.1));
        self.layers += 1;
    }

    fn push_opacity(&mut self, opacity: f64) {
        self.ctx.push_opacity_layer(opacity.clamp(0.0, 1.0) as f32);
        self.layers += 1;
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba8Premul) {
        self.sync_transform();
        self.ctx.set_paint(color_to_cpu(color));
        self.ctx.fill_rect(&rect_to_cpu(rect));
    }

    fn stroke_rect(&mut self, rect: Rect, width: f64, color: Rgba8Premul) {
        let h = width * 0.5;
        let edges = [
            Rect::new(rect.x0 - h, rect.y0 - h, rect.x1 + h, rect.y0 + h),
            Rect::new(rect.x0 - h, rect.y1 - h, rect.x1 + h, rect.y1 + h),
            Rect::new(rect.x0 - h, rect.y0 + h, rect.x0 + h, rect.y1 - h),
            Rect::new(rect.x1 - h, rect.y0 + h, rect.x1 + h, rect.y1 - h),
        ];
        for edge in edges {
            self.fill_rect(edge, color);
        }
    }

    fn draw_raster(&mut self, raster: &Raster) {
        let pixmap = match raster_to_pixmap(raster) {
            Ok(p) => p,
            Err(err) => {
                tracing::warn!(%err, "skipping raster blit");
                return;
            }
        };
        let paint = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(std::sync::Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };
        self.sync_transform();
        self.ctx
            .set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(paint);
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(raster.width()),
            f64::from(raster.height()),
        ));
    }

    fn create_offscreen(
        &self,
        width: u32,
        height: u32,
    ) -> KanvasResult<Box<dyn OffscreenSurface>> {
        Ok(Box::new(CpuSurface::new(width, height)?))
    }
}

impl OffscreenSurface for CpuSurface {
    fn finish(self: Box<Self>) -> KanvasResult<Raster> {
        (*self).into_raster()
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn color_to_cpu(c: Rgba8Premul) -> vello_cpu::peniko::Color {
    let [r, g, b, a] = c.to_straight_rgba();
    vello_cpu::peniko::Color::from_rgba8(r, g, b, a)
}

fn raster_to_pixmap(raster: &Raster) -> KanvasResult<vello_cpu::Pixmap> {
    let w: u16 = raster
        .width()
        .try_into()
        .map_err(|_| KanvasError::raster("raster width exceeds u16"))?;
    let h: u16 = raster
        .height()
        .try_into()
        .map_err(|_| KanvasError::raster("raster height exceeds u16"))?;

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(raster.byte_len() / 4);
    for px in raster.data().chunks_exact(4) {
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

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
