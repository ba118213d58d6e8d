//! Frame-rate overlay drawn over every display

use gauges_core::{
    Palette, Point, Rect, Result, Shape, Stroke, Surface, FPS_GOOD_THRESHOLD, FPS_WARN_THRESHOLD,
};
use gauges_types::{roles, Color};

const MARGIN: f64 = 4.0;
const PADDING: f64 = 4.0;

/// Theme role for the overlay badge at `fps`
pub fn fps_role(fps: f64) -> &'static str {
    if fps >= FPS_GOOD_THRESHOLD {
        roles::FPS_GOOD
    } else if fps >= FPS_WARN_THRESHOLD {
        roles::FPS_WARN
    } else {
        roles::FPS_BAD
    }
}

/// Badge in the bottom-left corner showing the measured frame rate
#[derive(Debug, Clone, Default)]
pub struct FpsOverlay {
    enabled: bool,
}

impl FpsOverlay {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn draw(&self, surface: &mut dyn Surface, palette: &Palette, fps: f64) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }
        let label = format!("{:.0} fps", fps);
        let text_size = surface.measure_text(&label);
        let badge_height = text_size.height + 2.0 * PADDING;
        let badge = Rect::new(
            MARGIN,
            surface.size().height - MARGIN - badge_height,
            text_size.width + 2.0 * PADDING,
            badge_height,
        );

        let background = palette.resolve_or(fps_role(fps), Color::BLACK);
        let text = palette.resolve_or(roles::FPS_TEXT, Color::WHITE);
        surface.draw_primitive(
            &Shape::Rect {
                rect: Rect::from_size(badge.size()),
                stroke: Stroke::Fill,
            },
            background,
            badge,
        )?;
        // Text is placed at its baseline
        surface.draw_text(
            &label,
            Point::new(badge.x + PADDING, badge.y + PADDING + text_size.height),
            text,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gauges_core::Theme;
    use gauges_render::{DrawOp, RecordingSurface};
    use gauges_types::Size;

    #[test]
    fn test_fps_thresholds() {
        assert_eq!(fps_role(60.0), roles::FPS_GOOD);
        assert_eq!(fps_role(40.0), roles::FPS_GOOD);
        assert_eq!(fps_role(39.9), roles::FPS_WARN);
        assert_eq!(fps_role(25.0), roles::FPS_WARN);
        assert_eq!(fps_role(24.9), roles::FPS_BAD);
        assert_eq!(fps_role(0.0), roles::FPS_BAD);
    }

    #[test]
    fn test_overlay_draws_badge_and_label() {
        let palette = Palette::from_theme(Theme::solarized_dark());
        let mut surface = RecordingSurface::new(Size::new(200.0, 100.0));

        FpsOverlay::new(false)
            .draw(&mut surface, &palette, 30.0)
            .unwrap();
        assert!(surface.pending().is_empty());

        FpsOverlay::new(true)
            .draw(&mut surface, &palette, 30.0)
            .unwrap();
        let ops = surface.pending();
        assert_eq!(ops.len(), 2);
        assert!(matches!(
            &ops[0],
            DrawOp::Primitive { color, .. } if *color == palette.resolve(roles::FPS_WARN).unwrap()
        ));
        assert!(matches!(&ops[1], DrawOp::Text { text, .. } if text == "30 fps"));

        // Anchored to the bottom-left corner
        let badge = ops[0].bounds().unwrap();
        assert_eq!(badge.x, 4.0);
        assert_eq!(badge.y + badge.height, 96.0);
        assert!(matches!(&ops[1], DrawOp::Text { position, .. } if position.y == 92.0));
    }
}
