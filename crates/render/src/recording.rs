//! Surface that records draw operations instead of rasterizing them
//!
//! Used for headless runs and for asserting exactly what a frame drew.

use std::sync::{Arc, Mutex};

use gauges_core::{DrawOp, GaugeError, Result, Shape, Surface, SurfaceBackend, WindowSpec};
use gauges_types::{Color, Point, Rect, Size};

/// Operations between two `present` calls
pub type Frame = Vec<DrawOp>;

/// Shared view of every presented frame
#[derive(Debug, Clone, Default)]
pub struct Recording {
    frames: Arc<Mutex<Vec<Frame>>>,
}

impl Recording {
    pub fn frames(&self) -> Vec<Frame> {
        self.frames.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn frame_count(&self) -> usize {
        self.frames.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn frame(&self, index: usize) -> Option<Frame> {
        self.frames
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(index)
            .cloned()
    }

    pub fn last_frame(&self) -> Option<Frame> {
        self.frames
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .last()
            .cloned()
    }

    /// Primitives of frame `index` drawn into `bounds`
    pub fn ops_within(&self, index: usize, bounds: Rect) -> Vec<DrawOp> {
        self.frame(index)
            .unwrap_or_default()
            .into_iter()
            .filter(|op| op.bounds() == Some(bounds))
            .collect()
    }

    fn push(&self, frame: Frame) {
        self.frames
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(frame);
    }
}

pub struct RecordingSurface {
    size: Size,
    current: Frame,
    recording: Recording,
}

impl RecordingSurface {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            current: Vec::new(),
            recording: Recording::default(),
        }
    }

    pub fn recording(&self) -> Recording {
        self.recording.clone()
    }

    /// Operations drawn since the last `present`
    pub fn pending(&self) -> &[DrawOp] {
        &self.current
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn clear(&mut self, color: Color) -> Result<()> {
        self.current.push(DrawOp::Clear(color));
        Ok(())
    }

    fn draw_primitive(&mut self, shape: &Shape, color: Color, bounds: Rect) -> Result<()> {
        self.current.push(DrawOp::Primitive {
            shape: shape.clone(),
            color,
            bounds,
        });
        Ok(())
    }

    fn draw_text(&mut self, text: &str, position: Point, color: Color) -> Result<()> {
        self.current.push(DrawOp::Text {
            text: text.to_string(),
            position,
            color,
        });
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        self.recording.push(std::mem::take(&mut self.current));
        Ok(())
    }
}

/// Backend handing out [`RecordingSurface`]s that share one [`Recording`]
#[derive(Debug, Clone, Default)]
pub struct RecordingBackend {
    recording: Recording,
    failure: Option<String>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend whose `create_surface` always fails with `SurfaceUnavailable`
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            recording: Recording::default(),
            failure: Some(reason.into()),
        }
    }

    pub fn recording(&self) -> Recording {
        self.recording.clone()
    }
}

impl SurfaceBackend for RecordingBackend {
    fn create_surface(&mut self, spec: &WindowSpec) -> Result<Box<dyn Surface>> {
        if let Some(reason) = &self.failure {
            return Err(GaugeError::SurfaceUnavailable {
                reason: reason.clone(),
            });
        }
        log::debug!("Created recording surface for '{}'", spec.title);
        Ok(Box::new(RecordingSurface {
            size: spec.size,
            current: Vec::new(),
            recording: self.recording.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gauges_core::Stroke;

    #[test]
    fn test_frames_are_split_at_present() {
        let mut backend = RecordingBackend::new();
        let recording = backend.recording();
        let mut surface = backend
            .create_surface(&WindowSpec {
                title: "test".into(),
                size: Size::new(100.0, 100.0),
            })
            .unwrap();

        let bounds = Rect::new(0.0, 0.0, 50.0, 50.0);
        surface.clear(Color::BLACK).unwrap();
        surface
            .draw_primitive(
                &Shape::Rect {
                    rect: bounds,
                    stroke: Stroke::Fill,
                },
                Color::WHITE,
                bounds,
            )
            .unwrap();
        surface.present().unwrap();
        surface.present().unwrap();

        assert_eq!(recording.frame_count(), 2);
        assert_eq!(recording.frame(0).unwrap().len(), 2);
        assert_eq!(recording.ops_within(0, bounds).len(), 1);
        assert!(recording.last_frame().unwrap().is_empty());
    }

    #[test]
    fn test_failing_backend() {
        let mut backend = RecordingBackend::failing("no display");
        let result = backend.create_surface(&WindowSpec {
            title: "test".into(),
            size: Size::new(10.0, 10.0),
        });
        assert!(matches!(
            result,
            Err(GaugeError::SurfaceUnavailable { reason }) if reason == "no display"
        ));
    }
}
