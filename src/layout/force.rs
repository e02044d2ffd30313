use std::collections::HashMap;

use crate::config::SimulationConfig;
use crate::ir::AttachmentGraph;

const INITIAL_RADIUS: f32 = 10.0;
const GOLDEN_ANGLE: f32 = std::f32::consts::PI * (3.0 - 2.236_068);
const DRAG_ALPHA_TARGET: f32 = 0.3;

/// A simulated body. `fx`/`fy` hold a pinned position while the pointer
/// drags the node; integration snaps the node there and zeroes its
/// velocity until the pin is released.
#[derive(Debug, Clone)]
pub struct SimNode {
    pub id: String,
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub fx: Option<f32>,
    pub fy: Option<f32>,
    /// Collision radius, grown by node degree.
    pub radius: f32,
}

#[derive(Debug, Clone)]
struct Link {
    source: usize,
    target: usize,
    strength: f32,
    bias: f32,
}

/// Owned force-simulation state: link attraction, many-body charge,
/// centering and degree-sized collision, cooled by an alpha schedule.
///
/// All state lives here and is advanced explicitly through [`tick`]; there
/// is no global simulation. Node order and the jiggle applied to
/// coincident bodies are deterministic, so the same graph and config
/// always produce the same positions.
///
/// [`tick`]: Simulation::tick
#[derive(Debug, Clone)]
pub struct Simulation {
    nodes: Vec<SimNode>,
    index: HashMap<String, usize>,
    links: Vec<Link>,
    center: (f32, f32),
    alpha: f32,
    alpha_target: f32,
    config: SimulationConfig,
}

impl Simulation {
    pub fn new(graph: &AttachmentGraph, config: &SimulationConfig, center: (f32, f32)) -> Self {
        let mut nodes = Vec::with_capacity(graph.nodes.len());
        let mut index = HashMap::with_capacity(graph.nodes.len());

        for (i, node) in graph.nodes.values().enumerate() {
            // Phyllotaxis seeding spreads the bodies around the center so
            // the first ticks do not start from a degenerate pile.
            let radius = INITIAL_RADIUS * (0.5 + i as f32).sqrt();
            let angle = i as f32 * GOLDEN_ANGLE;
            index.insert(node.id.clone(), i);
            nodes.push(SimNode {
                id: node.id.clone(),
                x: center.0 + radius * angle.cos(),
                y: center.1 + radius * angle.sin(),
                vx: 0.0,
                vy: 0.0,
                fx: None,
                fy: None,
                radius: config.collide_base_radius
                    + config.collide_degree_step * node.degree as f32
                    + config.collide_padding,
            });
        }

        let mut incident = vec![0usize; nodes.len()];
        let endpoints: Vec<(usize, usize)> = graph
            .edges
            .iter()
            .map(|edge| (index[&edge.source], index[&edge.target]))
            .collect();
        for &(source, target) in &endpoints {
            incident[source] += 1;
            incident[target] += 1;
        }
        let links = endpoints
            .into_iter()
            .map(|(source, target)| Link {
                source,
                target,
                strength: 1.0 / incident[source].min(incident[target]).max(1) as f32,
                bias: incident[source] as f32
                    / (incident[source] + incident[target]).max(1) as f32,
            })
            .collect();

        Self {
            nodes,
            index,
            links,
            center,
            alpha: 1.0,
            alpha_target: 0.0,
            config: config.clone(),
        }
    }

    pub fn nodes(&self) -> &[SimNode] {
        &self.nodes
    }

    pub fn node(&self, id: &str) -> Option<&SimNode> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Advance the simulation one step: cool alpha, apply forces, then
    /// integrate. Returns the alpha after the step.
    pub fn tick(&mut self) -> f32 {
        self.alpha += (self.alpha_target - self.alpha) * self.config.alpha_decay;

        self.apply_link_force();
        self.apply_charge_force();
        self.apply_center_force();
        self.apply_collide_force();
        self.integrate();

        self.alpha
    }

    /// Run ticks until the given cap or until alpha cools below
    /// `alpha_min`, whichever comes first.
    pub fn run(&mut self, max_ticks: usize) {
        for _ in 0..max_ticks {
            if self.alpha < self.config.alpha_min && self.alpha_target < self.config.alpha_min {
                break;
            }
            self.tick();
        }
    }

    /// Pointer went down on a node: reheat the simulation and pin the node
    /// where it currently sits.
    pub fn drag_start(&mut self, id: &str) {
        self.alpha_target = DRAG_ALPHA_TARGET;
        if self.alpha < DRAG_ALPHA_TARGET {
            self.alpha = DRAG_ALPHA_TARGET;
        }
        if let Some(&i) = self.index.get(id) {
            let node = &mut self.nodes[i];
            node.fx = Some(node.x);
            node.fy = Some(node.y);
        }
    }

    /// Pointer moved while dragging: the pin follows the pointer.
    pub fn drag_move(&mut self, id: &str, x: f32, y: f32) {
        if let Some(&i) = self.index.get(id) {
            self.nodes[i].fx = Some(x);
            self.nodes[i].fy = Some(y);
        }
    }

    /// Pointer released: clear the pin and let the simulation cool again.
    pub fn drag_end(&mut self, id: &str) {
        self.alpha_target = 0.0;
        if let Some(&i) = self.index.get(id) {
            self.nodes[i].fx = None;
            self.nodes[i].fy = None;
        }
    }

    fn apply_link_force(&mut self) {
        for link in &self.links {
            let source = &self.nodes[link.source];
            let target = &self.nodes[link.target];
            let mut dx = target.x + target.vx - source.x - source.vx;
            let mut dy = target.y + target.vy - source.y - source.vy;
            if dx == 0.0 && dy == 0.0 {
                let (jx, jy) = jiggle(link.source, link.target);
                dx = jx;
                dy = jy;
            }
            let length = (dx * dx + dy * dy).sqrt();
            let scale =
                (length - self.config.link_distance) / length * self.alpha * link.strength;
            let (push_x, push_y) = (dx * scale, dy * scale);
            let bias = link.bias;

            let target = &mut self.nodes[link.target];
            target.vx -= push_x * bias;
            target.vy -= push_y * bias;
            let source = &mut self.nodes[link.source];
            source.vx += push_x * (1.0 - bias);
            source.vy += push_y * (1.0 - bias);
        }
    }

    fn apply_charge_force(&mut self) {
        let strength = self.config.charge_strength;
        for i in 0..self.nodes.len() {
            for j in (i + 1)..self.nodes.len() {
                let mut dx = self.nodes[j].x - self.nodes[i].x;
                let mut dy = self.nodes[j].y - self.nodes[i].y;
                if dx == 0.0 && dy == 0.0 {
                    let (jx, jy) = jiggle(i, j);
                    dx = jx;
                    dy = jy;
                }
                let dist_sq = dx * dx + dy * dy;
                let w = strength * self.alpha / dist_sq;
                self.nodes[i].vx += dx * w;
                self.nodes[i].vy += dy * w;
                self.nodes[j].vx -= dx * w;
                self.nodes[j].vy -= dy * w;
            }
        }
    }

    fn apply_center_force(&mut self) {
        if self.nodes.is_empty() {
            return;
        }
        let count = self.nodes.len() as f32;
        let mean_x = self.nodes.iter().map(|n| n.x).sum::<f32>() / count;
        let mean_y = self.nodes.iter().map(|n| n.y).sum::<f32>() / count;
        let shift_x = mean_x - self.center.0;
        let shift_y = mean_y - self.center.1;
        for node in &mut self.nodes {
            node.x -= shift_x;
            node.y -= shift_y;
        }
    }

    fn apply_collide_force(&mut self) {
        for i in 0..self.nodes.len() {
            for j in (i + 1)..self.nodes.len() {
                let combined = self.nodes[i].radius + self.nodes[j].radius;
                let mut dx = self.nodes[j].x - self.nodes[i].x;
                let mut dy = self.nodes[j].y - self.nodes[i].y;
                let mut dist_sq = dx * dx + dy * dy;
                if dist_sq >= combined * combined {
                    continue;
                }
                if dx == 0.0 && dy == 0.0 {
                    let (jx, jy) = jiggle(i, j);
                    dx = jx;
                    dy = jy;
                    dist_sq = dx * dx + dy * dy;
                }
                let dist = dist_sq.sqrt();
                let overlap = (combined - dist) / dist;
                let ri = self.nodes[i].radius * self.nodes[i].radius;
                let rj = self.nodes[j].radius * self.nodes[j].radius;
                // Heavier (larger) bodies give way less.
                let share_i = rj / (ri + rj);
                let push_x = dx * overlap;
                let push_y = dy * overlap;
                self.nodes[i].vx -= push_x * share_i;
                self.nodes[i].vy -= push_y * share_i;
                self.nodes[j].vx += push_x * (1.0 - share_i);
                self.nodes[j].vy += push_y * (1.0 - share_i);
            }
        }
    }

    fn integrate(&mut self) {
        let decay = self.config.velocity_decay;
        for node in &mut self.nodes {
            match (node.fx, node.fy) {
                (Some(fx), Some(fy)) => {
                    node.x = fx;
                    node.y = fy;
                    node.vx = 0.0;
                    node.vy = 0.0;
                }
                _ => {
                    node.vx *= decay;
                    node.vy *= decay;
                    node.x += node.vx;
                    node.y += node.vy;
                }
            }
        }
    }
}

/// Deterministic stand-in for the random nudge force simulations give to
/// coincident bodies.
fn jiggle(i: usize, j: usize) -> (f32, f32) {
    let angle = (i as f32 * 0.618_034 + j as f32 * 0.414_214) * std::f32::consts::TAU;
    (1e-6 * angle.cos(), 1e-6 * angle.sin())
}
