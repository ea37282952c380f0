pub mod states;
pub mod params;
pub mod engine;
pub mod region;
pub mod forces;
pub mod barnes_hut;
pub mod collision;
pub mod integrator;
pub mod observer;
pub mod scenario;
