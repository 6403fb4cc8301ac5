//! kds-sim
//!
//! Seeded kitchen simulator: random order feed, efficiency drift and a crew
//! that works orders through their lifecycle, all on a logical clock.

mod crew;
mod driver;
pub mod menu;

pub use crew::{crew_pass, CrewReport};
pub use driver::{SimConfig, SimSummary, Simulation, StepReport};
