//! Collision detection and response.
//!
//! Collisions are found after the fact: at the start of a step some bodies
//! overlap each other or stick out of the boundary. Each contact is turned
//! into a rewind time (how long ago the bodies first touched, from overlap
//! depth and speed), the bodies are backed up to that instant, the elastic
//! response is applied, and they are moved forward again by the same time
//! with their new velocities.
//!
//! The boundary is always passed in explicitly.

use crate::simulation::region::Region;
use crate::simulation::states::{Body, NVec2};

/// Which boundary walls a body is crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wall {
    Vertical, // left or right edge, flips vx
    Horizontal, // bottom or top edge, flips vy
    Both,
}

/// Result of [`Body::time_to_boundary_collision`].
///
/// Each time is how long ago the body first touched a wall on that axis. An
/// axis is present only if the body crosses that wall while moving outward,
/// and at least one axis always is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundaryHit {
    Vertical(f64),
    Horizontal(f64),
    Both { vertical: f64, horizontal: f64 },
}

impl BoundaryHit {
    /// Combine per-axis contact times; `None` if neither axis was hit.
    pub fn from_axes(vertical: Option<f64>, horizontal: Option<f64>) -> Option<Self> {
        match (vertical, horizontal) {
            (Some(vertical), Some(horizontal)) => Some(BoundaryHit::Both { vertical, horizontal }),
            (Some(tv), None) => Some(BoundaryHit::Vertical(tv)),
            (None, Some(th)) => Some(BoundaryHit::Horizontal(th)),
            (None, None) => None,
        }
    }

    pub fn wall(&self) -> Wall {
        match self {
            BoundaryHit::Vertical(_) => Wall::Vertical,
            BoundaryHit::Horizontal(_) => Wall::Horizontal,
            BoundaryHit::Both { .. } => Wall::Both,
        }
    }

    pub fn vertical(&self) -> Option<f64> {
        match *self {
            BoundaryHit::Vertical(t) | BoundaryHit::Both { vertical: t, .. } => Some(t),
            BoundaryHit::Horizontal(_) => None,
        }
    }

    pub fn horizontal(&self) -> Option<f64> {
        match *self {
            BoundaryHit::Horizontal(t) | BoundaryHit::Both { horizontal: t, .. } => Some(t),
            BoundaryHit::Vertical(_) => None,
        }
    }

    /// Rewind to the first wall contact.
    pub fn time(&self) -> f64 {
        match *self {
            BoundaryHit::Vertical(t) | BoundaryHit::Horizontal(t) => t,
            BoundaryHit::Both { vertical, horizontal } => vertical.max(horizontal),
        }
    }
}

/// The earliest contact found for one body during a resolution pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CollisionEvent {
    /// Contact with the body at this index, `time` ago.
    Body { other: usize, time: f64 },
    Boundary(BoundaryHit),
}

impl CollisionEvent {
    pub fn time(&self) -> f64 {
        match self {
            CollisionEvent::Body { time, .. } => *time,
            CollisionEvent::Boundary(hit) => hit.time(),
        }
    }
}

impl Body {
    /// Touching counts as colliding.
    pub fn collides_with_body(&self, other: &Body) -> bool {
        self.distance_to(other) <= self.radius + other.radius
    }

    /// True if any part of the body's disc lies outside `region`.
    pub fn collides_with_boundary(&self, region: &Region) -> bool {
        let min = region.min();
        let max = region.max();
        self.x.x - self.radius < min.x
            || self.x.x + self.radius > max.x
            || self.x.y - self.radius < min.y
            || self.x.y + self.radius > max.y
    }

    /// Rate at which the gap between the two centers shrinks. Positive means
    /// approaching, zero or negative means holding or separating.
    pub fn closing_speed(&self, other: &Body) -> f64 {
        let dx = other.x - self.x;
        let dist = dx.norm();
        if dist == 0.0 {
            return 0.0;
        }
        -(other.v - self.v).dot(&dx) / dist
    }

    /// How long ago two overlapping, approaching bodies first touched.
    ///
    /// `None` if they do not overlap or are not closing in; zero closing
    /// speed means no collision this step.
    pub fn time_since_contact(&self, other: &Body) -> Option<f64> {
        if !self.collides_with_body(other) || self.closing_speed(other) <= 0.0 {
            return None;
        }
        let speed = self.relative_speed_to(other);
        if speed == 0.0 {
            return None;
        }
        let overlap = self.radius + other.radius - self.distance_to(other);
        Some(overlap / speed)
    }

    /// Which walls the body crosses and how long ago it touched each one.
    ///
    /// An axis counts only when its velocity component carries the body
    /// further out; a body already heading back in is left alone. Returns
    /// `None` if no axis qualifies.
    pub fn time_to_boundary_collision(&self, region: &Region) -> Option<BoundaryHit> {
        let min = region.min();
        let max = region.max();

        let vertical = axis_contact(self.x.x, self.v.x, self.radius, min.x, max.x);
        let horizontal = axis_contact(self.x.y, self.v.y, self.radius, min.y, max.y);

        BoundaryHit::from_axes(vertical, horizontal)
    }

    /// Move the body back along its current velocity by `t`.
    pub fn reverse_in_time(&mut self, t: f64) {
        self.x -= t * self.v;
    }

    fn advance_in_time(&mut self, t: f64) {
        self.x += t * self.v;
    }

    /// Elastic collision along the line of centers, then both bodies move
    /// forward by `t` with their new velocities.
    ///
    /// Momentum and kinetic energy are conserved for any positive masses.
    /// Coincident centers have no line of centers; velocities are kept.
    pub fn elastic_bounce(&mut self, other: &mut Body, t: f64) {
        let dx = other.x - self.x;
        let dist = dx.norm();

        if dist > 0.0 {
            let n: NVec2 = dx / dist;
            let dvn = (other.v - self.v).dot(&n);

            // impulse magnitude, J = 2 m1 m2 (dv . n) / (m1 + m2)
            let j = 2.0 * self.m * other.m * dvn / (self.m + other.m);

            self.v += (j / self.m) * n;
            other.v -= (j / other.m) * n;
        }

        self.advance_in_time(t);
        other.advance_in_time(t);
    }

    pub fn reflect_off_vertical_wall(&mut self, t: f64) {
        self.v.x = -self.v.x;
        self.advance_in_time(t);
    }

    pub fn reflect_off_horizontal_wall(&mut self, t: f64) {
        self.v.y = -self.v.y;
        self.advance_in_time(t);
    }

    /// Rewind to each wall contact and reflect.
    ///
    /// Axis-aligned walls act on independent velocity components, so each
    /// crossed axis is handled with its own contact time.
    pub fn resolve_boundary_hit(&mut self, hit: &BoundaryHit) {
        if let Some(t) = hit.vertical() {
            self.reverse_in_time(t);
            self.reflect_off_vertical_wall(t);
        }
        if let Some(t) = hit.horizontal() {
            self.reverse_in_time(t);
            self.reflect_off_horizontal_wall(t);
        }
    }
}

/// Contact time along one axis, if the disc pokes through a wall on that axis
/// while moving outward.
fn axis_contact(p: f64, v: f64, radius: f64, min: f64, max: f64) -> Option<f64> {
    if p + radius > max && v > 0.0 {
        Some((p + radius - max) / v)
    } else if p - radius < min && v < 0.0 {
        Some((p - radius - min) / v)
    } else {
        None
    }
}

/// Find the earliest contact of body `i`: overlaps with later bodies and the
/// boundary. "Earliest" is the contact with the largest rewind time. On a tie
/// the lower body index wins, and any body beats the boundary.
pub fn earliest_event(bodies: &[Body], i: usize, boundary: &Region) -> Option<CollisionEvent> {
    let bi = &bodies[i];
    let mut best: Option<CollisionEvent> = None;

    for (j, bj) in bodies.iter().enumerate().skip(i + 1) {
        if let Some(time) = bi.time_since_contact(bj) {
            if best.map_or(true, |b| time > b.time()) {
                best = Some(CollisionEvent::Body { other: j, time });
            }
        }
    }

    if let Some(hit) = bi.time_to_boundary_collision(boundary) {
        if best.map_or(true, |b| hit.time() > b.time()) {
            best = Some(CollisionEvent::Boundary(hit));
        }
    }

    best
}

/// One in-order collision pass over all bodies. Returns how many events were
/// resolved.
pub fn resolve_collisions(bodies: &mut [Body], boundary: &Region) -> usize {
    let mut resolved = 0;

    for i in 0..bodies.len() {
        let Some(event) = earliest_event(bodies, i, boundary) else {
            continue;
        };

        match event {
            CollisionEvent::Body { other, time } => {
                // other > i, so split between them
                let (head, tail) = bodies.split_at_mut(other);
                let a = &mut head[i];
                let b = &mut tail[0];
                a.reverse_in_time(time);
                b.reverse_in_time(time);
                a.elastic_bounce(b, time);
                log::trace!("bounce {} <-> {} rewound {:.3e}", i, other, time);
            }
            CollisionEvent::Boundary(hit) => {
                bodies[i].resolve_boundary_hit(&hit);
                log::trace!("body {} hit {:?} wall rewound {:.3e}", i, hit.wall(), hit.time());
            }
        }
        resolved += 1;
    }

    resolved
}
