//! `ScenarioBuilder` — a fluent construction path mirroring
//! `dt_sim::SimBuilder`.

use std::sync::Arc;

use verse_ir::Agent;
use verse_sensor::Map;

use crate::scenario::Scenario;
use crate::sensor::Sensor;

#[derive(Default)]
pub struct ScenarioBuilder {
    scenario: Scenario,
}

impl ScenarioBuilder {
    pub fn new() -> Self {
        Self { scenario: Scenario::new() }
    }

    pub fn agent(mut self, agent: Agent) -> Self {
        self.scenario.add_agent(agent);
        self
    }

    pub fn agents(mut self, agents: impl IntoIterator<Item = Agent>) -> Self {
        for agent in agents {
            self.scenario.add_agent(agent);
        }
        self
    }

    pub fn map(mut self, map: Arc<dyn Map>) -> Self {
        self.scenario.set_map(map);
        self
    }

    pub fn sensor(mut self, sensor: Box<dyn Sensor>) -> Self {
        self.scenario.set_sensor(sensor);
        self
    }

    pub fn build(self) -> Scenario {
        self.scenario
    }
}
