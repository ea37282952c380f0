//! # Barnes–Hut Quadtree (2D)
//!
//! This module implements a **2D Barnes–Hut quadtree** for approximating the
//! gravitational force on every body of the system. Distant groups of bodies
//! are replaced by a single pseudo-body located at their center of mass,
//! turning the `O(N²)` all-pairs sum into roughly `O(N log N)`.
//!
//! ## Layout
//!
//! Nodes live in one `Vec` (the arena) and refer to their four children by
//! index. The arena is cleared and refilled every step, so its allocation is
//! reused for the whole run.
//!
//! Each node is in one of three states, and only ever moves forward:
//!
//! - **empty**: no occupant
//! - **external**: holds exactly one real body
//! - **internal**: has four children and holds an aggregate of its subtree
//!
//! Unlike an offline build that computes mass and COM bottom-up after all
//! insertions, the aggregates here are folded in incrementally along the
//! insertion path, so the tree is consistent after every `insert`.
//!
//! ## Depth cap
//!
//! Two bodies at (nearly) the same position would otherwise subdivide forever.
//! A node at `max_depth` never subdivides: extra bodies are merged into it and
//! it remembers the members, so a body still never pulls on itself.

use anyhow::{anyhow, bail, Context, Result};

use crate::simulation::forces::NewtonianGravity;
use crate::simulation::region::Region;
use crate::simulation::states::{Body, BodyId, NVec2};

/// Default cap on tree depth. At depth 64 a node's side is `L / 2^64`, far
/// below any meaningful separation.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// A real body folded into a depth-capped leaf.
#[derive(Debug, Clone, Copy)]
pub struct Member {
    pub id: BodyId,
    pub m: f64,
    pub x: NVec2,
}

/// What a node currently stands for.
#[derive(Debug, Clone)]
pub enum Occupant {
    Empty,
    /// Exactly one real body; `mass`/`com` of the node are that body's.
    Real(BodyId),
    /// Aggregate pseudo-body of an internal node's subtree.
    Aggregate,
    /// Several real bodies piled into one leaf at the depth cap.
    Merged(Vec<Member>),
}

pub struct QuadNode {
    pub region: Region,
    pub mass: f64,
    pub com: NVec2,
    pub occupant: Occupant,
    pub children: [Option<usize>; 4], // indices into QuadTree::nodes, by Quadrant
    pub depth: usize,
}

impl QuadNode {
    fn empty(region: Region, depth: usize) -> Self {
        Self {
            region,
            mass: 0.0,
            com: NVec2::zeros(),
            occupant: Occupant::Empty,
            children: [None; 4],
            depth,
        }
    }

    pub fn is_external(&self) -> bool {
        self.children.iter().all(|c| c.is_none())
    }

    /// Fold a point mass into this node's aggregate: masses add, the position
    /// becomes the mass-weighted centroid.
    fn absorb(&mut self, x: NVec2, m: f64) {
        let total = self.mass + m;
        self.com = (self.com * self.mass + x * m) / total;
        self.mass = total;
    }
}

/// A quadtree over one root region, rebuilt from scratch each step.
pub struct QuadTree {
    pub nodes: Vec<QuadNode>,
    pub root: usize,
    pub max_depth: usize,
}

impl QuadTree {
    pub fn new(region: Region) -> Self {
        Self::with_max_depth(region, DEFAULT_MAX_DEPTH)
    }

    pub fn with_max_depth(region: Region, max_depth: usize) -> Self {
        Self {
            nodes: vec![QuadNode::empty(region, 0)],
            root: 0,
            max_depth,
        }
    }

    /// Drop every node except an empty root over the same region.
    pub fn clear(&mut self) {
        let region = self.region();
        self.nodes.clear();
        self.nodes.push(QuadNode::empty(region, 0));
        self.root = 0;
    }

    pub fn region(&self) -> Region {
        self.nodes[self.root].region
    }

    pub fn root_node(&self) -> &QuadNode {
        &self.nodes[self.root]
    }

    /// Total mass of everything inserted so far.
    pub fn total_mass(&self) -> f64 {
        self.root_node().mass
    }

    /// Center of mass of everything inserted so far.
    pub fn center_of_mass(&self) -> NVec2 {
        self.root_node().com
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.root_node().occupant, Occupant::Empty)
    }

    /// Deepest node depth currently in the arena.
    pub fn depth(&self) -> usize {
        self.nodes.iter().map(|n| n.depth).max().unwrap_or(0)
    }

    /// Insert a real body with mass `m` at `x`.
    ///
    /// Returns `Ok(false)` and leaves the tree untouched if `x` lies outside
    /// the root region. The root keeps its outer edges, matching the closed
    /// boundary used for wall collisions. Non-finite positions are an error.
    pub fn insert(&mut self, id: BodyId, x: NVec2, m: f64) -> Result<bool> {
        if !x.iter().all(|c| c.is_finite()) {
            bail!("body {} has non-finite position ({}, {})", id.0, x.x, x.y);
        }
        if !self.region().contains_closed(&x) {
            log::trace!("body {} at ({}, {}) outside tree root, skipped", id.0, x.x, x.y);
            return Ok(false);
        }
        self.insert_body(self.root, Member { id, m, x })?;
        Ok(true)
    }

    /// Add the approximate pull of every inserted body onto `body`.
    ///
    /// `id` identifies `body` among the inserted bodies so that its own
    /// entry is skipped. Internal nodes whose `side / distance` ratio is
    /// below `theta` are applied as a single mass at their center of mass;
    /// the rest are opened and their children visited.
    pub fn accumulate_force_on(&self, id: BodyId, body: &mut Body, gravity: &NewtonianGravity, theta: f64) {
        self.traverse_node(self.root, id, body, gravity, theta);
    }

    // helpers ==============================================================================

    fn insert_body(&mut self, node_idx: usize, new: Member) -> Result<()> {
        let depth = self.nodes[node_idx].depth;
        let occupant = std::mem::replace(&mut self.nodes[node_idx].occupant, Occupant::Empty);

        match occupant {
            // Case 1: empty -> external
            Occupant::Empty => {
                let node = &mut self.nodes[node_idx];
                node.occupant = Occupant::Real(new.id);
                node.mass = new.m;
                node.com = new.x;
            }

            // Case 2: external at the depth cap -> merged leaf
            Occupant::Real(existing) if depth >= self.max_depth => {
                let node = &mut self.nodes[node_idx];
                let held = Member { id: existing, m: node.mass, x: node.com };
                node.absorb(new.x, new.m);
                node.occupant = Occupant::Merged(vec![held, new]);
            }

            Occupant::Merged(mut members) => {
                let node = &mut self.nodes[node_idx];
                node.absorb(new.x, new.m);
                members.push(new);
                node.occupant = Occupant::Merged(members);
            }

            // Case 3: external -> subdivide and push both bodies down
            Occupant::Real(existing) => {
                let held = {
                    let node = &self.nodes[node_idx];
                    Member { id: existing, m: node.mass, x: node.com }
                };
                self.subdivide(node_idx);
                self.nodes[node_idx].occupant = Occupant::Aggregate;
                self.nodes[node_idx].absorb(new.x, new.m);

                self.put_in_child(node_idx, held)?;
                self.put_in_child(node_idx, new)?;
            }

            // Case 4: internal -> update the aggregate and descend
            Occupant::Aggregate => {
                self.nodes[node_idx].occupant = Occupant::Aggregate;
                self.nodes[node_idx].absorb(new.x, new.m);
                self.put_in_child(node_idx, new)?;
            }
        }

        Ok(())
    }

    fn put_in_child(&mut self, node_idx: usize, member: Member) -> Result<()> {
        let node = &self.nodes[node_idx];
        let quadrant = node.region.quadrant_of(member.x.x, member.x.y).ok_or_else(|| {
            anyhow!(
                "body {} at ({}, {}) is claimed by no quadrant of {:?}",
                member.id.0,
                member.x.x,
                member.x.y,
                node.region
            )
        })?;
        let child = node.children[quadrant.index()]
            .with_context(|| format!("internal node {} has no {:?} child", node_idx, quadrant))?;

        self.insert_body(child, member)
    }

    fn subdivide(&mut self, node_idx: usize) {
        let depth = self.nodes[node_idx].depth + 1;
        let regions = self.nodes[node_idx].region.subdivide();
        for (slot, region) in regions.into_iter().enumerate() {
            let new_idx = self.nodes.len();
            self.nodes.push(QuadNode::empty(region, depth));
            self.nodes[node_idx].children[slot] = Some(new_idx);
        }
    }

    fn traverse_node(&self, node_idx: usize, id: BodyId, body: &mut Body, gravity: &NewtonianGravity, theta: f64) {
        let node = &self.nodes[node_idx];

        match &node.occupant {
            Occupant::Empty => {}

            // Leaf with a single body: direct interaction, skipping self
            Occupant::Real(other) => {
                if *other != id {
                    body.add_force_from(node.mass, node.com, gravity);
                }
            }

            Occupant::Merged(members) => {
                for member in members.iter().filter(|member| member.id != id) {
                    body.add_force_from(member.m, member.x, gravity);
                }
            }

            // Internal node: approximate or open.
            // A zero distance gives an infinite ratio, so the node is opened.
            Occupant::Aggregate => {
                let s = node.region.length;
                let d = (node.com - body.x).norm();

                if s / d < theta {
                    body.add_force_from(node.mass, node.com, gravity);
                } else {
                    for child in node.children.iter().flatten() {
                        self.traverse_node(*child, id, body, gravity, theta);
                    }
                }
            }
        }
    }
}
