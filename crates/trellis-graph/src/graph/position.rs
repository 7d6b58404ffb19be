//! 2-D vertex positions.

/// A point in logical graph coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Position) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Axis-aligned bounds of a set of positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Returns `None` for an empty input.
    pub fn of<'a>(positions: impl IntoIterator<Item = &'a Position>) -> Option<Self> {
        let mut it = positions.into_iter();
        let first = it.next()?;
        let mut b = Bounds {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        for p in it {
            b.min_x = b.min_x.min(p.x);
            b.min_y = b.min_y.min(p.y);
            b.max_x = b.max_x.max(p.x);
            b.max_y = b.max_y.max(p.y);
        }
        Some(b)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Arithmetic mean of a set of positions, `None` when empty.
pub fn centroid<'a>(positions: impl IntoIterator<Item = &'a Position>) -> Option<Position> {
    let mut n = 0usize;
    let (mut sx, mut sy) = (0.0, 0.0);
    for p in positions {
        sx += p.x;
        sy += p.y;
        n += 1;
    }
    if n == 0 {
        return None;
    }
    Some(Position::new(sx / n as f64, sy / n as f64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_euclidean() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(3.0, 4.0);
        assert_eq!(a.distance_to(&b), 5.0);
        assert_eq!(b.translated(-3.0, -4.0), a);
    }

    #[test]
    fn bounds_and_centroid() {
        let pts = [
            Position::new(-1.0, 2.0),
            Position::new(3.0, -2.0),
            Position::new(1.0, 0.0),
        ];
        let b = Bounds::of(&pts).unwrap();
        assert_eq!(b.width(), 4.0);
        assert_eq!(b.height(), 4.0);
        assert_eq!(centroid(&pts), Some(Position::new(1.0, 0.0)));
        let empty: [Position; 0] = [];
        assert_eq!(Bounds::of(&empty), None);
        assert_eq!(centroid(&empty), None);
    }
}
