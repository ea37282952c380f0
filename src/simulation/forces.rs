//! Gravitational force for the particle system
//!
//! `NewtonianGravity` is the softened pair law. `BarnesHutGravity` builds a
//! quadtree over the bodies inside the root region and fills every body's
//! force accumulator from it.

use anyhow::Result;

use crate::simulation::barnes_hut::QuadTree;
use crate::simulation::states::{BodyId, System};

/// 2D Newtonian gravity with softening
/// `eps2` keeps the force finite when two bodies get arbitrarily close
#[allow(non_snake_case)]
#[derive(Debug, Clone, Copy)]
pub struct NewtonianGravity {
    pub G: f64, // gravitational constant
    pub eps2: f64, // softening squared
}

/// Newtonian gravity evaluated through a Barnes–Hut quadtree
/// controlled by `theta` (opening angle)
#[derive(Debug, Clone, Copy)]
pub struct BarnesHutGravity {
    pub gravity: NewtonianGravity,
    pub theta: f64,
}

impl BarnesHutGravity {
    /// Rebuild `tree` from the bodies of `sys` and set each body's force.
    ///
    /// Bodies outside the tree's root region are not inserted, so they
    /// neither pull on others nor feel any pull this step; their force is
    /// left at zero. Returns how many bodies made it into the tree.
    pub fn apply(&self, sys: &mut System, tree: &mut QuadTree) -> Result<usize> {
        tree.clear();

        let mut in_tree = Vec::with_capacity(sys.bodies.len());
        for (i, b) in sys.bodies.iter().enumerate() {
            in_tree.push(tree.insert(BodyId(i), b.x, b.m)?);
        }

        for (i, b) in sys.bodies.iter_mut().enumerate() {
            b.reset_force();
            if in_tree[i] {
                tree.accumulate_force_on(BodyId(i), b, &self.gravity, self.theta);
            }
        }

        Ok(in_tree.iter().filter(|&&inside| inside).count())
    }
}
