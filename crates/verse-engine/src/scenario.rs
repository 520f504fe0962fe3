//! `Scenario` — owns agents and orchestrates `simulate`/`verify` over the
//! transition engine, producing an [`AnalysisTree`] (§6).

use std::collections::HashMap;
use std::sync::Arc;

use verse_core::{AgentId, AgentRng, AnalysisConfig, Destination, ModeTuple, Region};
use verse_ir::{build_agent, Agent};
use verse_sensor::Map;
use verse_transition::{
    get_transition_simulate, get_transition_verify, NodeAgent, NodeView, SimOutcome, SimTransition, TraceRow,
    VerifyOutcome,
};

use crate::error::{EngineError, EngineResult};
use crate::integrator::Integrator;
use crate::observer::ScenarioObserver;
use crate::sensor::{DefaultSensor, Sensor};
use crate::tree::{AnalysisTree, AnalysisTreeNode};

/// The mode category `Scenario::set_map` backfills with lane identifiers
/// (§9 "Supplemented features" — renamed from the original's `LaneMode`).
pub const LANE_MODE_CATEGORY: &str = "TrackMode";

/// Owns every agent of one scenario and drives `simulate()`/`verify()`
/// (§6). Build with [`crate::ScenarioBuilder`] or the plain methods below.
pub struct Scenario {
    agents: Vec<Agent>,
    map: Option<Arc<dyn Map>>,
    sensor: Box<dyn Sensor>,
}

impl Default for Scenario {
    fn default() -> Self {
        Self::new()
    }
}

impl Scenario {
    pub fn new() -> Self {
        Self {
            agents: Vec::new(),
            map: None,
            sensor: Box::new(DefaultSensor),
        }
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Register an agent. If a map is already attached, its lane ids are
    /// backfilled into the agent's `LANE_MODE_CATEGORY` immediately (§9,
    /// mirroring `Scenario.add_agent`'s `update_agent_lane_mode` call).
    pub fn add_agent(&mut self, mut agent: Agent) {
        if let Some(map) = &self.map {
            backfill_lane_mode(&mut agent, map);
        }
        self.agents.push(agent);
    }

    /// Attach the map collaborator, backfilling lane ids into every
    /// already-registered agent's `LANE_MODE_CATEGORY` (§9).
    pub fn set_map(&mut self, map: Arc<dyn Map>) {
        for agent in &mut self.agents {
            backfill_lane_mode(agent, &map);
        }
        self.map = Some(map);
    }

    pub fn set_sensor(&mut self, sensor: Box<dyn Sensor>) {
        self.sensor = sensor;
    }

    /// Overwrite every agent's initial region, mode, and (optionally)
    /// static data, in registration order. Reuses `build_agent`'s
    /// validation so a bad mode value or dimension mismatch is reported
    /// the same way agent construction reports it (§7 "Configuration
    /// errors ... surfaced synchronously before analysis begins").
    pub fn set_init(
        &mut self,
        inits: Vec<Region>,
        modes: Vec<ModeTuple>,
        static_data: Option<Vec<Vec<f64>>>,
    ) -> EngineResult<()> {
        let n = self.agents.len();
        if inits.len() != n {
            return Err(EngineError::Config(format!("init count {} does not match agent count {n}", inits.len())));
        }
        if modes.len() != n {
            return Err(EngineError::Config(format!(
                "init mode count {} does not match agent count {n}",
                modes.len()
            )));
        }
        if let Some(s) = &static_data {
            if s.len() != n {
                return Err(EngineError::Config(format!(
                    "static data count {} does not match agent count {n}",
                    s.len()
                )));
            }
        }
        for (i, agent) in self.agents.iter_mut().enumerate() {
            let static_vec = static_data.as_ref().map(|s| s[i].clone()).unwrap_or_else(|| agent.static_data.clone());
            let rebuilt = build_agent(agent.id.clone(), agent.controller.clone(), inits[i].clone(), modes[i].clone(), static_vec)
                .map_err(|e| EngineError::Config(e.to_string()))?;
            *agent = rebuilt;
        }
        Ok(())
    }

    /// Compute one concrete trajectory per agent over `config.horizon`,
    /// branching at every transition (§4.4, §6 `simulate`).
    pub fn simulate(
        &self,
        config: &AnalysisConfig,
        integrator: &dyn Integrator,
        observer: &mut dyn ScenarioObserver,
    ) -> EngineResult<AnalysisTree> {
        let mut tree = AnalysisTree::new();
        if self.agents.is_empty() {
            return Ok(tree);
        }

        let root = tree.alloc(0.0);
        for agent in &self.agents {
            let mut rng = AgentRng::new(config.seed, &agent.id);
            let point = rng.sample_rect(&agent.init_region.as_rect());
            let row = TraceRow(std::iter::once(0.0).chain(point.into_iter()).collect());
            tree.node_mut(root).push_agent(
                agent.id.clone(),
                Arc::new(agent.clone()),
                agent.init_mode.clone(),
                agent.static_data.clone(),
                vec![row],
            );
        }
        self.preflight_sense(tree.node(root))?;

        let mut frontier = vec![root];
        while let Some(node_id) = frontier.pop() {
            self.expand_sim_node(&mut tree, node_id, config, integrator, observer)?;
            frontier.extend(tree.node(node_id).children.iter().copied());
        }
        Ok(tree)
    }

    /// Compute an over-approximating reach tube per agent over
    /// `config.horizon`, branching at every reported hit (§4.5, §6 `verify`).
    pub fn verify(
        &self,
        config: &AnalysisConfig,
        integrator: &dyn Integrator,
        observer: &mut dyn ScenarioObserver,
    ) -> EngineResult<AnalysisTree> {
        let mut tree = AnalysisTree::new();
        if self.agents.is_empty() {
            return Ok(tree);
        }

        let root = tree.alloc(0.0);
        let mut init_map = HashMap::new();
        for agent in &self.agents {
            // `tmp.ndim < 2` promotion: a point init becomes a degenerate
            // `[x, x]` rectangle (§9 "Supplemented features").
            let rect = agent.init_region.as_rect();
            init_map.insert(agent.id.clone(), agent.init_region.clone());
            let lo: Vec<f64> = rect.0.iter().map(|i| i.low).collect();
            let hi: Vec<f64> = rect.0.iter().map(|i| i.high).collect();
            let lo_row = TraceRow(std::iter::once(0.0).chain(lo).collect());
            let hi_row = TraceRow(std::iter::once(0.0).chain(hi).collect());
            tree.node_mut(root).push_agent(
                agent.id.clone(),
                Arc::new(agent.clone()),
                agent.init_mode.clone(),
                agent.static_data.clone(),
                vec![lo_row, hi_row],
            );
        }
        tree.node_mut(root).init = Some(init_map);
        self.preflight_sense(tree.node(root))?;

        let mut frontier = vec![root];
        while let Some(node_id) = frontier.pop() {
            self.expand_verify_node(&mut tree, node_id, config, integrator, observer)?;
            frontier.extend(tree.node(node_id).children.iter().copied());
        }
        Ok(tree)
    }

    // ── Internal: one round of simulation expansion ───────────────────────

    fn expand_sim_node(
        &self,
        tree: &mut AnalysisTree,
        node_id: usize,
        config: &AnalysisConfig,
        integrator: &dyn Integrator,
        observer: &mut dyn ScenarioObserver,
    ) -> EngineResult<()> {
        let start_time = tree.node(node_id).start_time;
        if start_time >= config.horizon - f64::EPSILON {
            observer.on_node_done(node_id);
            return Ok(());
        }
        let remaining = config.horizon - start_time;
        let order = tree.node(node_id).order.clone();

        for id in &order {
            let (mode, static_data, last_point) = {
                let node = tree.node(node_id);
                (
                    node.mode[id].clone(),
                    node.static_data[id].clone(),
                    node.trace[id].last().expect("node agent has at least one row").fields().to_vec(),
                )
            };
            let advanced = integrator.advance(id, &mode, &last_point, &static_data, start_time, remaining, config.step);
            tree.node_mut(node_id).trace.get_mut(id).expect("agent present").extend(advanced);
        }

        let view = build_node_view(tree.node(node_id));
        match get_transition_simulate(&view, self.sensor.as_ref())? {
            SimOutcome::NoTransition => {
                observer.on_node_done(node_id);
            }
            SimOutcome::AssertsFired { hits, at: _ } => {
                for hit in &hits {
                    observer.on_assert_fired(hit);
                }
                tree.node_mut(node_id).assert_hits = hits;
                observer.on_node_done(node_id);
            }
            SimOutcome::Transitioned { transitions, at } => {
                for id in &order {
                    tree.node_mut(node_id).trace.get_mut(id).expect("agent present").truncate(at.0 + 1);
                }
                let hit_time = tree.node(node_id).trace[&order[0]][at.0].time();

                let mut by_agent: HashMap<AgentId, Vec<&SimTransition>> = HashMap::new();
                for t in &transitions {
                    observer.on_sim_transition(t);
                    if matches!(t.dst_mode, Destination::None) {
                        observer.on_no_successor_warning(&t.agent_id);
                    }
                    by_agent.entry(t.agent_id.clone()).or_default().push(t);
                }

                for combo in cartesian_sim_combos(&order, &by_agent) {
                    let child = tree.alloc(hit_time);
                    for id in &order {
                        let agent = tree.node(node_id).agents[id].clone();
                        let static_data = tree.node(node_id).static_data[id].clone();
                        if let Some(t) = combo.get(id) {
                            let row = TraceRow(std::iter::once(hit_time).chain(t.successor_point.iter().copied()).collect());
                            let mode = match &t.dst_mode {
                                Destination::Mode(m) => m.clone(),
                                Destination::None => tree.node(node_id).mode[id].clone(),
                            };
                            tree.node_mut(child).push_agent(id.clone(), agent, mode, static_data, vec![row]);
                        } else {
                            let mode = tree.node(node_id).mode[id].clone();
                            let last_row = tree.node(node_id).trace[id].last().expect("truncated trace is non-empty").clone();
                            tree.node_mut(child).push_agent(id.clone(), agent, mode, static_data, vec![last_row]);
                        }
                    }
                    tree.node_mut(node_id).children.push(child);
                }
                observer.on_node_done(node_id);
            }
        }
        Ok(())
    }

    // ── Internal: one round of verification expansion ─────────────────────

    fn expand_verify_node(
        &self,
        tree: &mut AnalysisTree,
        node_id: usize,
        config: &AnalysisConfig,
        integrator: &dyn Integrator,
        observer: &mut dyn ScenarioObserver,
    ) -> EngineResult<()> {
        let start_time = tree.node(node_id).start_time;
        if start_time >= config.horizon - f64::EPSILON {
            observer.on_node_done(node_id);
            return Ok(());
        }
        let remaining = config.horizon - start_time;
        let order = tree.node(node_id).order.clone();

        for id in &order {
            let (mode, static_data, lo, hi) = {
                let node = tree.node(node_id);
                let trace = &node.trace[id];
                let lo = trace[trace.len() - 2].fields().to_vec();
                let hi = trace[trace.len() - 1].fields().to_vec();
                (node.mode[id].clone(), node.static_data[id].clone(), lo, hi)
            };
            let advanced = integrator.advance_tube(id, &mode, &lo, &hi, &static_data, start_time, remaining, config.step);
            tree.node_mut(node_id).trace.get_mut(id).expect("agent present").extend(advanced);
        }

        let view = build_node_view(tree.node(node_id));
        let transitions = match get_transition_verify(&view, self.sensor.as_ref())? {
            VerifyOutcome::NoTransition => {
                observer.on_node_done(node_id);
                return Ok(());
            }
            VerifyOutcome::AssertsFired { hits, at: _ } => {
                for hit in &hits {
                    observer.on_assert_fired(hit);
                }
                tree.node_mut(node_id).assert_hits = hits;
                observer.on_node_done(node_id);
                return Ok(());
            }
            VerifyOutcome::Transitioned { transitions } => transitions,
        };

        // Each reported (agent, destination) transition becomes its own
        // branch; other agents carry their interval state forward unchanged
        // at the same step index. A full cross-product across every
        // simultaneously-firing agent is a further (unbounded) branching
        // factor out of scope here (§1 "Non-goals: unbounded verification"),
        // recorded as an open-question decision in DESIGN.md.
        for t in &transitions {
            observer.on_verify_transition(t);
            if matches!(t.dst_mode, Destination::None) {
                observer.on_no_successor_warning(&t.agent_id);
            }

            let hit_idx = t.hit_range.max.0;
            let hit_time = {
                let trace = &tree.node(node_id).trace[&t.agent_id];
                let pair = (2 * hit_idx).min(trace.len() - 2);
                trace[pair].time()
            };

            let child = tree.alloc(hit_time);
            for id in &order {
                let agent = tree.node(node_id).agents[id].clone();
                let static_data = tree.node(node_id).static_data[id].clone();
                if id == &t.agent_id {
                    let mode = match &t.dst_mode {
                        Destination::Mode(m) => m.clone(),
                        Destination::None => tree.node(node_id).mode[id].clone(),
                    };
                    let lo: Vec<f64> = t.successor_rect.0.iter().map(|i| i.low).collect();
                    let hi: Vec<f64> = t.successor_rect.0.iter().map(|i| i.high).collect();
                    let lo_row = TraceRow(std::iter::once(hit_time).chain(lo).collect());
                    let hi_row = TraceRow(std::iter::once(hit_time).chain(hi).collect());
                    tree.node_mut(child).push_agent(id.clone(), agent, mode, static_data, vec![lo_row, hi_row]);
                } else {
                    let trace = &tree.node(node_id).trace[id];
                    let pair = (2 * hit_idx).min(trace.len() - 2);
                    let lo_row = trace[pair].clone();
                    let hi_row = trace[pair + 1].clone();
                    let mode = tree.node(node_id).mode[id].clone();
                    tree.node_mut(child).push_agent(id.clone(), agent, mode, static_data, vec![lo_row, hi_row]);
                }
            }
            tree.node_mut(node_id).children.push(child);
        }
        observer.on_node_done(node_id);
        Ok(())
    }

    /// Sense every agent's row at the node's first step as a pre-flight
    /// check, surfacing a misconfigured node (e.g. a missing ego row)
    /// before any integrator time is spent. A custom `Sensor` can add its
    /// own validation here.
    fn preflight_sense(&self, node: &AnalysisTreeNode) -> EngineResult<()> {
        let view = build_node_view(node);
        let joint = view.point_joint_state(0);
        for id in &node.order {
            self.sensor.sense(&node.agents[id], &joint)?;
        }
        Ok(())
    }
}

fn build_node_view(node: &AnalysisTreeNode) -> NodeView {
    let mut view = NodeView::new();
    for id in &node.order {
        view.push(NodeAgent {
            agent: node.agents[id].clone(),
            mode: node.mode[id].clone(),
            static_data: node.static_data[id].clone(),
            trace: node.trace[id].clone(),
        });
    }
    view
}

/// Cross-product of every firing agent's candidate transitions, keyed by
/// agent id, in `order`'s iteration order.
fn cartesian_sim_combos<'a>(
    order: &[AgentId],
    by_agent: &HashMap<AgentId, Vec<&'a SimTransition>>,
) -> Vec<HashMap<AgentId, &'a SimTransition>> {
    let mut combos: Vec<HashMap<AgentId, &SimTransition>> = vec![HashMap::new()];
    for id in order {
        let Some(options) = by_agent.get(id) else { continue };
        let mut next = Vec::with_capacity(combos.len() * options.len());
        for combo in &combos {
            for opt in options {
                let mut c = combo.clone();
                c.insert(id.clone(), *opt);
                next.push(c);
            }
        }
        combos = next;
    }
    combos
}

/// Backfill lane ids into `agent`'s [`LANE_MODE_CATEGORY`], if it declares
/// one, skipping ids already present (§9).
fn backfill_lane_mode(agent: &mut Agent, map: &Arc<dyn Map>) {
    let mut lane_ids: Vec<&String> = map.lane_dict().keys().collect();
    lane_ids.sort();
    let controller = Arc::make_mut(&mut agent.controller);
    if let Some(category) = controller.mode_defs.iter_mut().find(|c| c.name == LANE_MODE_CATEGORY) {
        for lane_id in lane_ids {
            if !category.contains(lane_id) {
                category.values.push(lane_id.clone());
            }
        }
    }
}
