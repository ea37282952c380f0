pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod benchmark;

pub use simulation::states::{Body, BodyId, DisplayTag, System, NVec2};
pub use simulation::region::{Region, Quadrant};
pub use simulation::forces::{NewtonianGravity, BarnesHutGravity};
pub use simulation::barnes_hut::{QuadTree, Occupant, DEFAULT_MAX_DEPTH};
pub use simulation::collision::{BoundaryHit, CollisionEvent, Wall, resolve_collisions};
pub use simulation::integrator::euler_integrator;
pub use simulation::observer::{Observer, NullObserver};
pub use simulation::scenario::{Scenario, StepReport, RunSummary};

pub use configuration::config::{EngineConfig, ParametersConfig, BoundaryConfig, BodyConfig, RegionConfig, ScenarioConfig};
pub use configuration::loader::{load_scenario, parse_plain, parse_yaml};

pub use visualization::trace::CsvTrace;

pub use benchmark::benchmark::{bench_tree, bench_step_curve};
