//! Screen/logical transform: `screen = logical * scale + offset`.

use serde::{Deserialize, Serialize};
use trellis_graph::{Bounds, Position};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    pub scale: f64,
    pub offset: Position,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset: Position::ORIGIN,
        }
    }
}

impl ViewTransform {
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.offset = self.offset.translated(dx, dy);
    }

    /// Multiplies the scale by `1 + delta`, clamped to `[min, max]`.
    pub fn zoom(&mut self, delta: f64, min: f64, max: f64) {
        let next = self.scale * (1.0 + delta);
        if next.is_finite() {
            self.scale = next.clamp(min, max);
        }
    }

    /// Picks a scale that fits `bounds` into `budget` units on the longer axis, never above 1,
    /// and resets the offset.
    pub fn fit(&mut self, bounds: Option<Bounds>, budget: f64) {
        let max_dim = bounds
            .map(|b| b.width().max(b.height()))
            .unwrap_or(0.0)
            .max(1.0);
        self.scale = (budget / max_dim).min(1.0);
        self.offset = Position::ORIGIN;
    }

    pub fn to_screen(&self, p: Position) -> Position {
        Position::new(
            p.x * self.scale + self.offset.x,
            p.y * self.scale + self.offset.y,
        )
    }

    pub fn to_logical(&self, p: Position) -> Position {
        Position::new(
            (p.x - self.offset.x) / self.scale,
            (p.y - self.offset.y) / self.scale,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_is_clamped() {
        let mut view = ViewTransform::default();
        for _ in 0..50 {
            view.zoom(0.5, 0.01, 3.0);
        }
        assert_eq!(view.scale, 3.0);
        for _ in 0..50 {
            view.zoom(-0.9, 0.01, 3.0);
        }
        assert_eq!(view.scale, 0.01);
    }

    #[test]
    fn fit_never_scales_up() {
        let mut view = ViewTransform::default();
        view.pan(5.0, 5.0);
        let small = Bounds::of(&[Position::new(0.0, 0.0), Position::new(10.0, 10.0)]);
        view.fit(small, 800.0);
        assert_eq!(view.scale, 1.0);
        assert_eq!(view.offset, Position::ORIGIN);

        let large = Bounds::of(&[Position::new(0.0, 0.0), Position::new(1600.0, 10.0)]);
        view.fit(large, 800.0);
        assert_eq!(view.scale, 0.5);
    }

    #[test]
    fn screen_and_logical_are_inverse() {
        let view = ViewTransform {
            scale: 2.0,
            offset: Position::new(10.0, -4.0),
        };
        let p = Position::new(3.0, 7.0);
        assert_eq!(view.to_screen(p), Position::new(16.0, 10.0));
        assert_eq!(view.to_logical(view.to_screen(p)), p);
    }
}
