//! Cairo image-surface backend with optional PNG snapshots

use std::f64::consts::PI;
use std::fs::File;
use std::path::{Path, PathBuf};

use cairo::{Context, Format, ImageSurface};
use gauges_core::{GaugeError, Result, Shape, Stroke, Surface, SurfaceBackend, WindowSpec};
use gauges_types::{Color, Point, Rect, Size};

const FONT_FAMILY: &str = "Sans";
const FONT_SIZE: f64 = 16.0;

#[derive(Debug, Clone)]
struct Snapshots {
    dir: PathBuf,
    every: u64,
}

/// Off-screen ARGB32 surface rendered with Cairo
pub struct CairoSurface {
    surface: ImageSurface,
    cr: Context,
    size: Size,
    snapshots: Option<Snapshots>,
    frames: u64,
}

impl CairoSurface {
    pub fn new(size: Size) -> Result<Self> {
        let width = size.width.round() as i32;
        let height = size.height.round() as i32;
        if width <= 0 || height <= 0 {
            return Err(GaugeError::SurfaceUnavailable {
                reason: format!("invalid surface size {}x{}", size.width, size.height),
            });
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height).map_err(|e| {
            GaugeError::SurfaceUnavailable {
                reason: format!("failed to create {}x{} image surface: {}", width, height, e),
            }
        })?;
        let cr = Context::new(&surface).map_err(|e| GaugeError::SurfaceUnavailable {
            reason: format!("failed to create cairo context: {}", e),
        })?;
        cr.select_font_face(FONT_FAMILY, cairo::FontSlant::Normal, cairo::FontWeight::Bold);
        cr.set_font_size(FONT_SIZE);

        Ok(Self {
            surface,
            cr,
            size: Size::new(f64::from(width), f64::from(height)),
            snapshots: None,
            frames: 0,
        })
    }

    /// Write a PNG into `dir` every `every` presented frames
    pub fn with_snapshots(mut self, dir: impl Into<PathBuf>, every: u64) -> Self {
        self.snapshots = Some(Snapshots {
            dir: dir.into(),
            every: every.max(1),
        });
        self
    }

    /// Number of frames presented so far
    pub fn frames_presented(&self) -> u64 {
        self.frames
    }

    pub fn write_png(&self, path: &Path) -> Result<()> {
        self.surface.flush();
        let mut file = File::create(path)
            .map_err(|e| GaugeError::render(format!("create {}: {}", path.display(), e)))?;
        self.surface
            .write_to_png(&mut file)
            .map_err(|e| GaugeError::render(format!("write {}: {}", path.display(), e)))
    }

    /// Color of one pixel, for inspection in tests and tooling
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        let width = self.surface.width();
        let height = self.surface.height();
        if x < 0 || y < 0 || x >= width || y >= height {
            return None;
        }
        let stride = self.surface.stride() as usize;
        let offset = y as usize * stride + x as usize * 4;
        let mut px = None;
        self.surface
            .with_data(|data| {
                px = data
                    .get(offset..offset + 4)
                    .map(|b| u32::from_ne_bytes([b[0], b[1], b[2], b[3]]));
            })
            .ok()?;
        // ARGB32 is native-endian premultiplied 0xAARRGGBB
        let px = px?;
        let a = (px >> 24) as u8;
        let unpremultiply = |c: u32| -> u8 {
            if a == 0 {
                0
            } else {
                ((c & 0xff) * 255 / u32::from(a)) as u8
            }
        };
        Some(Color::from_rgba8(
            unpremultiply(px >> 16),
            unpremultiply(px >> 8),
            unpremultiply(px),
            a,
        ))
    }

    fn trace_shape(&self, shape: &Shape) {
        let cr = &self.cr;
        match shape {
            Shape::Line { from, to, width } => {
                cr.move_to(from.x, from.y);
                cr.line_to(to.x, to.y);
                cr.set_line_width(*width);
            }
            Shape::Polyline { points, width } => {
                if let Some((first, rest)) = points.split_first() {
                    cr.move_to(first.x, first.y);
                    for p in rest {
                        cr.line_to(p.x, p.y);
                    }
                }
                cr.set_line_width(*width);
            }
            Shape::Circle { center, radius, .. } => {
                cr.new_sub_path();
                cr.arc(center.x, center.y, radius.max(0.0), 0.0, 2.0 * PI);
            }
            Shape::Rect { rect, .. } => {
                cr.rectangle(rect.x, rect.y, rect.width, rect.height);
            }
        }
    }

    fn paint_shape(&self, shape: &Shape) -> std::result::Result<(), cairo::Error> {
        let stroke = match shape {
            Shape::Line { .. } | Shape::Polyline { .. } => None,
            Shape::Circle { stroke, .. } | Shape::Rect { stroke, .. } => Some(*stroke),
        };
        self.trace_shape(shape);
        match stroke {
            Some(Stroke::Fill) => self.cr.fill(),
            Some(Stroke::Outline(width)) => {
                self.cr.set_line_width(width);
                self.cr.stroke()
            }
            None => self.cr.stroke(),
        }
    }

    fn snapshot_if_due(&self) -> Result<()> {
        if let Some(snapshots) = &self.snapshots {
            if self.frames % snapshots.every == 0 {
                let path = snapshots.dir.join(format!("frame-{:06}.png", self.frames));
                self.write_png(&path)?;
                log::debug!("Wrote snapshot {}", path.display());
            }
        }
        Ok(())
    }
}

impl Surface for CairoSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn clear(&mut self, color: Color) -> Result<()> {
        color.apply_to_cairo(&self.cr);
        self.cr
            .paint()
            .map_err(|e| GaugeError::render(format!("clear: {}", e)))
    }

    fn draw_primitive(&mut self, shape: &Shape, color: Color, bounds: Rect) -> Result<()> {
        self.cr
            .save()
            .map_err(|e| GaugeError::render(format!("save: {}", e)))?;
        self.cr.rectangle(bounds.x, bounds.y, bounds.width, bounds.height);
        self.cr.clip();
        self.cr.translate(bounds.x, bounds.y);
        color.apply_to_cairo(&self.cr);
        let painted = self.paint_shape(shape);
        self.cr.restore().ok();
        painted.map_err(|e| GaugeError::render(format!("draw {:?}: {}", shape, e)))
    }

    fn draw_text(&mut self, text: &str, position: Point, color: Color) -> Result<()> {
        color.apply_to_cairo(&self.cr);
        self.cr.move_to(position.x, position.y);
        self.cr
            .show_text(text)
            .map_err(|e| GaugeError::render(format!("text '{}': {}", text, e)))
    }

    fn measure_text(&self, text: &str) -> Size {
        match self.cr.text_extents(text) {
            Ok(extents) => Size::new(extents.x_advance(), FONT_SIZE),
            Err(_) => Size::new(text.chars().count() as f64 * FONT_SIZE * 0.6, FONT_SIZE),
        }
    }

    fn present(&mut self) -> Result<()> {
        self.surface.flush();
        self.frames += 1;
        self.snapshot_if_due()
    }
}

/// Backend producing [`CairoSurface`]s, optionally with PNG snapshots
#[derive(Debug, Clone, Default)]
pub struct CairoBackend {
    snapshot_dir: Option<PathBuf>,
    snapshot_every: u64,
}

impl CairoBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshots(mut self, dir: impl Into<PathBuf>, every: u64) -> Self {
        self.snapshot_dir = Some(dir.into());
        self.snapshot_every = every.max(1);
        self
    }
}

impl SurfaceBackend for CairoBackend {
    fn create_surface(&mut self, spec: &WindowSpec) -> Result<Box<dyn Surface>> {
        let mut surface = CairoSurface::new(spec.size)?;
        if let Some(dir) = &self.snapshot_dir {
            std::fs::create_dir_all(dir).map_err(|e| GaugeError::SurfaceUnavailable {
                reason: format!("cannot create snapshot directory {}: {}", dir.display(), e),
            })?;
            surface = surface.with_snapshots(dir.clone(), self.snapshot_every);
        }
        log::info!(
            "Created {}x{} cairo surface for '{}'",
            spec.size.width,
            spec.size.height,
            spec.title
        );
        Ok(Box::new(surface))
    }
}
