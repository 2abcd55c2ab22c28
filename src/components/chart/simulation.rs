//! Iterative force layout with d3-force semantics: per-node positional
//! targets, pairwise charge, one-pass collision resolution, and alpha
//! relaxation. Exact pairwise evaluation is fine at this scale (one
//! node per country, ~230).

/// Transient per-record position state owned by the simulation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SimNode {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
}

/// One layout's force field: per-node targets and collision radii plus
/// shared strengths.
#[derive(Clone, Debug, Default)]
pub struct ForceConfig {
	pub x_targets: Vec<f64>,
	pub x_strength: f64,
	pub y_targets: Vec<f64>,
	pub y_strength: f64,
	pub collide_radii: Vec<f64>,
	pub collide_strength: f64,
	pub charge: f64,
}

const ALPHA_MIN: f64 = 0.001;
const VELOCITY_RETAIN: f64 = 0.6;

pub struct Simulation {
	alpha: f64,
	alpha_decay: f64,
	config: ForceConfig,
}

impl Simulation {
	pub fn new(config: ForceConfig, alpha: f64) -> Self {
		Self {
			alpha,
			// decays to alpha_min over ~300 ticks
			alpha_decay: 1.0 - ALPHA_MIN.powf(1.0 / 300.0),
			config,
		}
	}

	/// Swap in a new force field and restart with fresh energy. No
	/// smoothing between the old and new fields.
	pub fn reconfigure(&mut self, config: ForceConfig, alpha: f64) {
		self.config = config;
		self.alpha = alpha;
	}

	pub fn active(&self) -> bool {
		self.alpha >= ALPHA_MIN
	}

	pub fn alpha(&self) -> f64 {
		self.alpha
	}

	/// One tick: relax alpha, accumulate forces into velocities, then
	/// integrate with velocity decay.
	pub fn step(&mut self, nodes: &mut [SimNode]) {
		if !self.active() {
			return;
		}
		self.alpha += (0.0 - self.alpha) * self.alpha_decay;

		self.apply_position_forces(nodes);
		self.apply_charge(nodes);
		self.apply_collision(nodes);

		for node in nodes.iter_mut() {
			node.vx *= VELOCITY_RETAIN;
			node.vy *= VELOCITY_RETAIN;
			node.x += node.vx;
			node.y += node.vy;
		}
	}

	fn apply_position_forces(&self, nodes: &mut [SimNode]) {
		let cfg = &self.config;
		for (i, node) in nodes.iter_mut().enumerate() {
			if let Some(&tx) = cfg.x_targets.get(i) {
				node.vx += (tx - node.x) * cfg.x_strength * self.alpha;
			}
			if let Some(&ty) = cfg.y_targets.get(i) {
				node.vy += (ty - node.y) * cfg.y_strength * self.alpha;
			}
		}
	}

	fn apply_charge(&self, nodes: &mut [SimNode]) {
		let strength = self.config.charge;
		if strength == 0.0 {
			return;
		}
		let n = nodes.len();
		for i in 0..n {
			for j in (i + 1)..n {
				let mut dx = nodes[j].x - nodes[i].x;
				let mut dy = nodes[j].y - nodes[i].y;
				if dx == 0.0 && dy == 0.0 {
					dx = 1e-6;
					dy = 1e-6;
				}
				let mut l = dx * dx + dy * dy;
				// distance floor keeps coincident nodes from exploding
				if l < 1.0 {
					l = l.sqrt();
				}
				// negative strength repels, positive attracts
				let w = strength * self.alpha / l;
				nodes[i].vx += dx * w;
				nodes[i].vy += dy * w;
				nodes[j].vx -= dx * w;
				nodes[j].vy -= dy * w;
			}
		}
	}

	fn apply_collision(&self, nodes: &mut [SimNode]) {
		let cfg = &self.config;
		if cfg.collide_radii.len() < nodes.len() {
			return;
		}
		let n = nodes.len();
		for i in 0..n {
			for j in (i + 1)..n {
				let ri = cfg.collide_radii[i];
				let rj = cfg.collide_radii[j];
				let r = ri + rj;
				// extrapolated positions, as collision resolves after
				// the other forces have written velocities
				let mut dx = (nodes[j].x + nodes[j].vx) - (nodes[i].x + nodes[i].vx);
				let mut dy = (nodes[j].y + nodes[j].vy) - (nodes[i].y + nodes[i].vy);
				let mut l = dx * dx + dy * dy;
				if l >= r * r {
					continue;
				}
				if dx == 0.0 && dy == 0.0 {
					dx = 1e-6;
					dy = 1e-6;
					l = dx * dx + dy * dy;
				}
				l = l.sqrt();
				let d = (r - l) / l * cfg.collide_strength;
				let (sx, sy) = (dx * d, dy * d);
				let share = rj * rj / (ri * ri + rj * rj);
				nodes[j].vx += sx * share;
				nodes[j].vy += sy * share;
				nodes[i].vx -= sx * (1.0 - share);
				nodes[i].vy -= sy * (1.0 - share);
			}
		}
	}
}

/// Phyllotaxis seed positions around the canvas center, so the first
/// frames fan outward instead of stacking every node on one point.
pub fn seed_positions(count: usize, cx: f64, cy: f64) -> Vec<SimNode> {
	let golden = std::f64::consts::PI * (3.0 - 5.0_f64.sqrt());
	(0..count)
		.map(|i| {
			let radius = 10.0 * (0.5 + i as f64).sqrt();
			let angle = i as f64 * golden;
			SimNode {
				x: cx + radius * angle.cos(),
				y: cy + radius * angle.sin(),
				vx: 0.0,
				vy: 0.0,
			}
		})
		.collect()
}
