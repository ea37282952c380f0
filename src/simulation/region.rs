//! Axis-aligned square regions.
//!
//! A `Region` is used twice: as the boundary that bodies bounce off, and as
//! the extent of every Barnes–Hut tree node.
//!
//! Containment is half-open on both axes: the left and bottom edges belong to
//! the region, the right and top edges do not. Quadrant selection compares
//! against the center (`x >= cx` is east, `y >= cy` is north), which is the
//! same split, so every point of a parent belongs to exactly one child.
//!
//! A tree root is the exception: it also owns its right and top edges (see
//! [`Region::contains_closed`]), since wall collisions treat the boundary as
//! closed. Points on those edges fall into the east or north children.

use crate::simulation::states::NVec2;

/// One of the four children produced by [`Region::subdivide`].
///
/// The discriminant is the child slot in a tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quadrant {
    NW = 0,
    NE = 1,
    SW = 2,
    SE = 3,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [Quadrant::NW, Quadrant::NE, Quadrant::SW, Quadrant::SE];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub center: NVec2, // (cx, cy)
    pub length: f64, // side length L
}

impl Region {
    pub fn new(cx: f64, cy: f64, length: f64) -> Self {
        Self {
            center: NVec2::new(cx, cy),
            length,
        }
    }

    /// The square `[0, length) x [0, length)`.
    pub fn from_origin(length: f64) -> Self {
        Self::new(length * 0.5, length * 0.5, length)
    }

    #[inline]
    pub fn half(&self) -> f64 {
        self.length * 0.5
    }

    #[inline]
    pub fn min(&self) -> NVec2 {
        self.center.add_scalar(-self.half())
    }

    #[inline]
    pub fn max(&self) -> NVec2 {
        self.center.add_scalar(self.half())
    }

    /// Half-open containment test.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let min = self.min();
        let max = self.max();
        x >= min.x && x < max.x && y >= min.y && y < max.y
    }

    pub fn contains_point(&self, p: &NVec2) -> bool {
        self.contains(p.x, p.y)
    }

    /// Closed containment, all four edges included. Used for a tree root so
    /// a point on the boundary's right or top edge still gets a node.
    pub fn contains_closed(&self, p: &NVec2) -> bool {
        let min = self.min();
        let max = self.max();
        p.x >= min.x && p.x <= max.x && p.y >= min.y && p.y <= max.y
    }

    /// The child region for `q`: half the side, center offset by L/4.
    pub fn quadrant(&self, q: Quadrant) -> Region {
        let offset = self.length * 0.25;
        let (dx, dy) = match q {
            Quadrant::NW => (-offset, offset),
            Quadrant::NE => (offset, offset),
            Quadrant::SW => (-offset, -offset),
            Quadrant::SE => (offset, -offset),
        };
        Region::new(self.center.x + dx, self.center.y + dy, self.length * 0.5)
    }

    /// Split into four equal children, indexed by [`Quadrant::index`].
    pub fn subdivide(&self) -> [Region; 4] {
        Quadrant::ALL.map(|q| self.quadrant(q))
    }

    /// Which child of this region claims `(x, y)`.
    ///
    /// Does not check that the point lies inside the region. Returns `None`
    /// only when a coordinate is unordered (NaN).
    pub fn quadrant_of(&self, x: f64, y: f64) -> Option<Quadrant> {
        let east = if x >= self.center.x {
            true
        } else if x < self.center.x {
            false
        } else {
            return None;
        };
        let north = if y >= self.center.y {
            true
        } else if y < self.center.y {
            false
        } else {
            return None;
        };

        Some(match (north, east) {
            (true, false) => Quadrant::NW,
            (true, true) => Quadrant::NE,
            (false, false) => Quadrant::SW,
            (false, true) => Quadrant::SE,
        })
    }
}
