//! High-level runtime engine settings
//!
//! Barnes–Hut options and the fixed region the tree is built over,
//! used when building and running a `Scenario`

use crate::simulation::region::Region;

#[derive(Debug, Clone)]
pub struct Engine {
    pub theta: f64, // parameter to determine if use center of mass
    pub max_depth: usize, // tree nodes at this depth stop subdividing
    pub root: Region, // bodies outside it feel and exert no gravity
}
