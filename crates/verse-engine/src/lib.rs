//! `verse-engine` — scenario orchestration: owns agents, drives
//! `simulate()`/`verify()` over the per-node transition engine, and builds
//! the analysis tree (§6).
//!
//! | Module        | Contents                                  |
//! |---------------|--------------------------------------------|
//! | [`scenario`]  | `Scenario`, `LANE_MODE_CATEGORY`          |
//! | [`builder`]   | `ScenarioBuilder`                          |
//! | [`tree`]      | `AnalysisTree`, `AnalysisTreeNode`        |
//! | [`integrator`]| `Integrator`, `ConstantIntegrator`        |
//! | [`sensor`]    | `Sensor`, `DefaultSensor`                  |
//! | [`observer`]  | `ScenarioObserver`, `NoopObserver`         |
//! | [`error`]     | `EngineError`, `EngineResult`             |

pub mod builder;
pub mod error;
pub mod integrator;
pub mod observer;
pub mod scenario;
pub mod sensor;
pub mod tree;


pub use builder::ScenarioBuilder;
pub use error::{EngineError, EngineResult};
pub use integrator::{ConstantIntegrator, Integrator};
pub use observer::{NoopObserver, ScenarioObserver};
pub use scenario::{Scenario, LANE_MODE_CATEGORY};
pub use sensor::{DefaultSensor, Sensor};
pub use tree::{AnalysisTree, AnalysisTreeNode};
