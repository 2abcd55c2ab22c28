use std::collections::HashMap;

use super::scales::{self, NEUTRAL_FILL, Rgb, Scales};
use super::simulation::{ForceConfig, SimNode, Simulation, seed_positions};
use super::types::{BorderFeature, CountryRecord, Dataset, RegionLabel, Tooltip, ViewMode};
use crate::geo::Projection;
use crate::geo::geometry;

/// Canvas margins, left and right.
pub const MARGIN: f64 = 20.0;

const MAP_REVEAL_DELAY: f64 = 0.5;
const BUBBLE_FADE_DELAY: f64 = 1.0;
const MAP_COLOR_DURATION: f64 = 1.0;
const BUBBLE_FADE_DURATION: f64 = 1.5;
const BORDER_FADE_DURATION: f64 = 0.5;
const RADIUS_MORPH_TO_MAP: f64 = 0.9;
const RADIUS_MORPH_FROM_MAP: f64 = 1.0;
const ZOOM_DURATION: f64 = 0.75;
const ZOOM_SCALE: f64 = 5.0;

const DEFAULT_COLLIDE_STRENGTH: f64 = 0.7;
/// Minimum hover hit radius; small bubbles are hard to point at.
const HIT_RADIUS: f64 = 4.0;

/// Linear tween toward a target over a fixed duration. Interruption
/// freezes the value where it is.
#[derive(Clone, Copy, Debug)]
pub struct Tween {
	from: f64,
	target: f64,
	duration: f64,
	elapsed: f64,
}

impl Tween {
	fn fixed(value: f64) -> Self {
		Self {
			from: value,
			target: value,
			duration: 0.0,
			elapsed: 0.0,
		}
	}

	fn set(&mut self, value: f64) {
		*self = Self::fixed(value);
	}

	fn to(&mut self, target: f64, duration: f64) {
		self.from = self.value();
		self.target = target;
		self.duration = duration;
		self.elapsed = 0.0;
	}

	fn interrupt(&mut self) {
		let value = self.value();
		self.set(value);
	}

	fn advance(&mut self, dt: f64) {
		self.elapsed = (self.elapsed + dt).min(self.duration);
	}

	pub fn value(&self) -> f64 {
		if self.duration <= 0.0 {
			return self.target;
		}
		let t = (self.elapsed / self.duration).clamp(0.0, 1.0);
		self.from + (self.target - self.from) * t
	}

	pub fn target(&self) -> f64 {
		self.target
	}

	fn done(&self) -> bool {
		self.duration <= 0.0 || self.elapsed >= self.duration
	}
}

/// Whole-scene zoom transform: `screen = world * k + (x, y)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

impl ViewTransform {
	pub const IDENTITY: Self = Self {
		x: 0.0,
		y: 0.0,
		k: 1.0,
	};
}

/// One country outline in screen space, cross-referenced into the
/// record set at construction. A shape whose name has no matching
/// record keeps `rate: None` and draws neutral with no label.
#[derive(Clone, Debug)]
pub struct BorderShape {
	pub name: Option<String>,
	pub code: Option<String>,
	pub rate: Option<f64>,
	pub rings: Vec<Vec<(f64, f64)>>,
	pub centroid: (f64, f64),
	pub label_pos: Option<(f64, f64)>,
}

/// Interaction state that used to be module globals in the original
/// visualization, owned by the scene instead.
#[derive(Clone, Copy, Debug, Default)]
pub struct ViewState {
	/// Border shape the scene is zoomed into, if any.
	pub centered: Option<usize>,
	pub on_a_map: bool,
	/// Clock deadline for coloring border paths after a Map entry.
	pub map_reveal_at: Option<f64>,
	/// Clock deadline for starting the bubble fade after a Map entry.
	pub bubble_fade_at: Option<f64>,
}

/// Something under the pointer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hit {
	Bubble(usize),
	Border(usize),
}

pub struct ChartState {
	pub records: Vec<CountryRecord>,
	pub nodes: Vec<SimNode>,
	pub borders: Vec<BorderShape>,
	pub region_labels: Vec<RegionLabel>,
	pub scales: Scales,
	pub projection: Projection,
	pub mode: ViewMode,
	pub view: ViewState,
	pub width: f64,
	pub height: f64,

	simulation: Simulation,
	clock: f64,

	// layer visibility
	pub border_displayed: bool,
	pub border_opacity: Tween,
	pub bubble_opacity: Tween,
	/// Border fill: 0 = neutral gray, 1 = rate color.
	pub map_color_mix: Tween,
	/// Bubble radius: 0 = bubble scale, 1 = map scale.
	pub radius_morph: Tween,
	pub path_labels_visible: bool,
	pub bubble_labels_visible: bool,
	pub region_labels_visible: bool,

	zoom_from: ViewTransform,
	zoom_to: ViewTransform,
	zoom_t: Tween,
}

impl ChartState {
	pub fn new(dataset: &Dataset, width: f64, height: f64) -> Self {
		let scales = Scales::new(width);
		let projection = Projection::new(width, height);

		let by_name: HashMap<&str, &CountryRecord> = dataset
			.records
			.iter()
			.map(|r| (r.country.as_str(), r))
			.collect();
		let borders = dataset
			.borders
			.iter()
			.map(|feature| project_border(feature, &by_name, &projection))
			.collect();

		let records = dataset.records.clone();
		let nodes = seed_positions(records.len(), width / 2.0, height / 2.0);

		let mut state = Self {
			simulation: Simulation::new(ForceConfig::default(), 0.4),
			records,
			nodes,
			borders,
			region_labels: Vec::new(),
			scales,
			projection,
			mode: ViewMode::Combine,
			view: ViewState::default(),
			width,
			height,
			clock: 0.0,
			border_displayed: false,
			border_opacity: Tween::fixed(0.0),
			bubble_opacity: Tween::fixed(1.0),
			map_color_mix: Tween::fixed(0.0),
			radius_morph: Tween::fixed(0.0),
			path_labels_visible: false,
			bubble_labels_visible: true,
			region_labels_visible: false,
			zoom_from: ViewTransform::IDENTITY,
			zoom_to: ViewTransform::IDENTITY,
			zoom_t: Tween::fixed(1.0),
		};
		state
			.simulation
			.reconfigure(state.initial_force_config(), 0.4);
		state
	}

	pub fn set_region_labels(&mut self, labels: Vec<RegionLabel>) {
		self.region_labels = labels;
	}

	/// Mode transition: cancel pending reveals from a previous Map
	/// entry, interrupt in-flight tweens, retarget layer visibility,
	/// then reconfigure and restart the simulation.
	pub fn set_mode(&mut self, mode: ViewMode) {
		self.view.map_reveal_at = None;
		self.view.bubble_fade_at = None;
		self.interrupt_transitions();

		let was_on_map = self.view.on_a_map;
		match mode {
			ViewMode::Map => {
				self.view.on_a_map = true;
				self.border_displayed = true;
				self.border_opacity.set(1.0);
				self.map_color_mix.set(0.0);
				self.radius_morph.to(1.0, RADIUS_MORPH_TO_MAP);
				self.bubble_labels_visible = false;
				self.path_labels_visible = false;
				self.region_labels_visible = false;
				self.view.map_reveal_at = Some(self.clock + MAP_REVEAL_DELAY);
				self.view.bubble_fade_at = Some(self.clock + BUBBLE_FADE_DELAY);
			}
			ViewMode::Combine | ViewMode::Divide | ViewMode::Sort => {
				self.view.on_a_map = false;
				self.bubble_labels_visible = true;
				self.path_labels_visible = false;
				self.region_labels_visible = mode == ViewMode::Divide;
				self.map_color_mix.set(0.0);
				if self.border_displayed {
					self.border_opacity.to(0.0, BORDER_FADE_DURATION);
				}
				self.radius_morph.to(0.0, RADIUS_MORPH_FROM_MAP);
				if was_on_map && mode != ViewMode::Sort {
					self.bubble_opacity.to(1.0, RADIUS_MORPH_FROM_MAP);
				} else {
					self.bubble_opacity.set(1.0);
				}
				// leaving the map drops any zoom
				if self.view.centered.take().is_some() {
					self.start_zoom(ViewTransform::IDENTITY);
				}
			}
		}
		self.mode = mode;

		let alpha = if mode == ViewMode::Combine { 0.4 } else { 0.5 };
		self.simulation.reconfigure(self.force_config(mode), alpha);
	}

	fn interrupt_transitions(&mut self) {
		self.border_opacity.interrupt();
		self.bubble_opacity.interrupt();
		self.map_color_mix.interrupt();
		self.radius_morph.interrupt();
	}

	/// Per-frame update: clock, tweens, due reveals, then one
	/// simulation step while it still has energy.
	pub fn tick(&mut self, dt: f64) {
		self.clock += dt;
		self.border_opacity.advance(dt);
		self.bubble_opacity.advance(dt);
		self.map_color_mix.advance(dt);
		self.radius_morph.advance(dt);
		self.zoom_t.advance(dt);

		if self.border_displayed
			&& self.border_opacity.target() == 0.0
			&& self.border_opacity.done()
		{
			self.border_displayed = false;
		}

		if let Some(at) = self.view.map_reveal_at {
			if self.clock >= at {
				self.view.map_reveal_at = None;
				self.map_color_mix.to(1.0, MAP_COLOR_DURATION);
				self.path_labels_visible = true;
			}
		}
		if let Some(at) = self.view.bubble_fade_at {
			if self.clock >= at {
				self.view.bubble_fade_at = None;
				self.bubble_opacity.to(0.0, BUBBLE_FADE_DURATION);
			}
		}

		if self.simulation.active() {
			self.simulation.step(&mut self.nodes);
		}
	}

	/// Force field at construction; the All button re-applies Combine
	/// with slightly different strengths.
	fn initial_force_config(&self) -> ForceConfig {
		ForceConfig {
			x_targets: vec![self.width / 2.0; self.records.len()],
			x_strength: 0.1,
			y_targets: vec![self.height / 2.0 + 20.0; self.records.len()],
			y_strength: 0.1,
			collide_radii: self.bubble_radii(0.0),
			collide_strength: DEFAULT_COLLIDE_STRENGTH,
			charge: -15.0,
		}
	}

	fn force_config(&self, mode: ViewMode) -> ForceConfig {
		let (w, h) = (self.width, self.height);
		match mode {
			ViewMode::Combine => ForceConfig {
				x_targets: vec![w / 2.0; self.records.len()],
				x_strength: 0.07,
				y_targets: vec![h / 2.0 + 20.0; self.records.len()],
				y_strength: 0.07,
				collide_radii: self.bubble_radii(0.5),
				collide_strength: DEFAULT_COLLIDE_STRENGTH,
				charge: -10.0,
			},
			ViewMode::Divide => {
				let anchors: Vec<(f64, f64)> = self
					.records
					.iter()
					.map(|r| r.region.anchor(w, h))
					.collect();
				ForceConfig {
					x_targets: anchors.iter().map(|a| a.0).collect(),
					x_strength: 0.11,
					y_targets: anchors.iter().map(|a| a.1).collect(),
					y_strength: 0.11,
					collide_radii: self.bubble_radii(0.0),
					collide_strength: DEFAULT_COLLIDE_STRENGTH,
					charge: -20.0,
				}
			}
			ViewMode::Sort => ForceConfig {
				x_targets: self
					.records
					.iter()
					.map(|r| self.scales.sort_x.map(r.rank as f64))
					.collect(),
				x_strength: 0.21,
				y_targets: self
					.records
					.iter()
					.map(|r| h / 2.0 + (r.rank % 5) as f64 * 5.0)
					.collect(),
				y_strength: 0.11,
				collide_radii: self.bubble_radii(5.0),
				collide_strength: 0.21,
				charge: -25.0,
			},
			ViewMode::Map => {
				let targets: Vec<(f64, f64)> = self
					.records
					.iter()
					.map(|r| self.projection.project(r.long, r.lat))
					.collect();
				ForceConfig {
					x_targets: targets.iter().map(|t| t.0).collect(),
					x_strength: 0.1,
					y_targets: targets.iter().map(|t| t.1).collect(),
					y_strength: 0.1,
					collide_radii: self
						.records
						.iter()
						.map(|r| self.scales.map_radius.map(r.birth))
						.collect(),
					collide_strength: DEFAULT_COLLIDE_STRENGTH,
					charge: 1.0,
				}
			}
		}
	}

	fn bubble_radii(&self, padding: f64) -> Vec<f64> {
		self.records
			.iter()
			.map(|r| self.scales.radius.map(r.birth) + padding)
			.collect()
	}

	/// Current drawn radius of one bubble, morphing between the bubble
	/// and map scales.
	pub fn bubble_radius(&self, index: usize) -> f64 {
		let birth = self.records[index].birth;
		let normal = self.scales.radius.map(birth);
		let map = self.scales.map_radius.map(birth);
		normal + (map - normal) * self.radius_morph.value()
	}

	/// Fill color of one border path, mixing from neutral toward the
	/// rate color as the map reveal progresses.
	pub fn border_fill(&self, index: usize) -> Rgb {
		let mix = self.map_color_mix.value();
		match self.borders[index].rate {
			Some(rate) if mix > 0.0 => {
				scales::mix(NEUTRAL_FILL, self.scales.color.map(rate), mix)
			}
			_ => NEUTRAL_FILL,
		}
	}

	pub fn transform(&self) -> ViewTransform {
		let t = self.zoom_t.value();
		ViewTransform {
			x: self.zoom_from.x + (self.zoom_to.x - self.zoom_from.x) * t,
			y: self.zoom_from.y + (self.zoom_to.y - self.zoom_from.y) * t,
			k: self.zoom_from.k + (self.zoom_to.k - self.zoom_from.k) * t,
		}
	}

	pub fn screen_to_world(&self, sx: f64, sy: f64) -> (f64, f64) {
		let t = self.transform();
		((sx - t.x) / t.k, (sy - t.y) / t.k)
	}

	fn start_zoom(&mut self, target: ViewTransform) {
		self.zoom_from = self.transform();
		self.zoom_to = target;
		self.zoom_t = Tween::fixed(0.0);
		self.zoom_t.to(1.0, ZOOM_DURATION);
	}

	/// Clicking a border path zooms onto its centroid; clicking the
	/// same path again resets to the identity transform.
	pub fn toggle_zoom(&mut self, index: usize) {
		if self.view.centered == Some(index) {
			self.view.centered = None;
			self.start_zoom(ViewTransform::IDENTITY);
			return;
		}
		self.view.centered = Some(index);
		let (cx, cy) = self.borders[index].centroid;
		self.start_zoom(ViewTransform {
			x: self.width / 2.0 - ZOOM_SCALE * cx,
			y: self.height / 2.0 - ZOOM_SCALE * cy,
			k: ZOOM_SCALE,
		});
	}

	/// What is under the pointer, in screen coordinates. Bubbles win
	/// over border paths while both are visible.
	pub fn hit_test(&self, sx: f64, sy: f64) -> Option<Hit> {
		let (wx, wy) = self.screen_to_world(sx, sy);
		if self.bubble_opacity.value() > 0.05 {
			if let Some(index) = self.bubble_at(wx, wy) {
				return Some(Hit::Bubble(index));
			}
		}
		if self.border_displayed {
			return self.border_at(wx, wy).map(Hit::Border);
		}
		None
	}

	fn bubble_at(&self, wx: f64, wy: f64) -> Option<usize> {
		let mut best: Option<(usize, f64)> = None;
		for (index, node) in self.nodes.iter().enumerate() {
			let r = self.bubble_radius(index).max(HIT_RADIUS);
			let d = (node.x - wx).hypot(node.y - wy);
			if d < r && best.is_none_or(|(_, bd)| d < bd) {
				best = Some((index, d));
			}
		}
		best.map(|(index, _)| index)
	}

	fn border_at(&self, wx: f64, wy: f64) -> Option<usize> {
		self.borders
			.iter()
			.position(|shape| geometry::point_in_rings(&shape.rings, wx, wy))
	}

	/// Tooltip for a hit, anchored at the pointer's page position.
	pub fn tooltip_for(&self, hit: Hit, page_x: f64, page_y: f64) -> Tooltip {
		match hit {
			Hit::Bubble(index) => {
				let record = &self.records[index];
				Tooltip::show(&record.country, Some(record.birth), page_x, page_y)
			}
			Hit::Border(index) => {
				let shape = &self.borders[index];
				let name = shape.name.as_deref().unwrap_or("unknown");
				Tooltip::show(name, shape.rate, page_x, page_y)
			}
		}
	}

	/// A click on the canvas: in map mode, toggles the border zoom.
	pub fn click(&mut self, sx: f64, sy: f64) {
		if !self.border_displayed {
			return;
		}
		let (wx, wy) = self.screen_to_world(sx, sy);
		if let Some(index) = self.border_at(wx, wy) {
			self.toggle_zoom(index);
		}
	}

	pub fn simulation_active(&self) -> bool {
		self.simulation.active()
	}
}

fn project_border(
	feature: &BorderFeature,
	by_name: &HashMap<&str, &CountryRecord>,
	projection: &Projection,
) -> BorderShape {
	let record = feature
		.name
		.as_deref()
		.and_then(|name| by_name.get(name).copied());
	let rings: Vec<Vec<(f64, f64)>> = feature
		.rings
		.iter()
		.map(|ring| {
			ring.iter()
				.map(|&(lon, lat)| projection.project(lon, lat))
				.collect()
		})
		.collect();
	let centroid = geometry::centroid(&rings);
	BorderShape {
		name: feature.name.clone(),
		code: record.map(|r| r.code.clone()),
		rate: record.map(|r| r.birth),
		label_pos: record.map(|r| projection.project(r.long, r.lat)),
		rings,
		centroid,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::chart::types::Region;

	fn record(country: &str, birth: f64, region: Region, rank: usize) -> CountryRecord {
		CountryRecord {
			country: country.to_string(),
			code: country[..country.len().min(3)].to_ascii_uppercase(),
			birth,
			lat: 10.0,
			long: 20.0,
			region,
			rank,
		}
	}

	fn dataset() -> Dataset {
		Dataset {
			records: vec![
				record("Monaco", 6.5, Region::Europe, 1),
				record("Chile", 13.0, Region::America, 2),
				record("India", 19.0, Region::Asia, 3),
				record("Niger", 49.7, Region::Africa, 4),
			],
			borders: vec![
				BorderFeature {
					name: Some("Niger".to_string()),
					rings: vec![vec![
						(0.0, 0.0),
						(20.0, 0.0),
						(20.0, 20.0),
						(0.0, 20.0),
						(0.0, 0.0),
					]],
				},
				BorderFeature {
					name: Some("Terra Incognita".to_string()),
					rings: vec![vec![
						(-30.0, -10.0),
						(-20.0, -10.0),
						(-20.0, -20.0),
						(-30.0, -10.0),
					]],
				},
			],
		}
	}

	fn state() -> ChartState {
		ChartState::new(&dataset(), 1000.0, 800.0)
	}

	fn run(state: &mut ChartState, seconds: f64) {
		let mut t = 0.0;
		while t < seconds {
			state.tick(0.016);
			t += 0.016;
		}
	}

	#[test]
	fn starts_with_bubbles_visible_and_borders_hidden() {
		let s = state();
		assert!(!s.border_displayed);
		assert!(s.bubble_opacity.value() >= 1.0);
		assert!(s.bubble_labels_visible);
		assert!(!s.view.on_a_map);
	}

	#[test]
	fn map_mode_reveals_borders_and_fades_bubbles() {
		let mut s = state();
		s.set_mode(ViewMode::Map);
		assert!(s.border_displayed);
		assert!(s.view.map_reveal_at.is_some());
		assert!(s.view.bubble_fade_at.is_some());
		// before the reveal the fill is still neutral
		assert_eq!(s.border_fill(0), NEUTRAL_FILL);

		run(&mut s, 3.5);
		assert!(s.view.map_reveal_at.is_none());
		assert!(s.view.bubble_fade_at.is_none());
		assert!(s.path_labels_visible);
		assert!(s.bubble_opacity.value() < 0.01);
		assert_ne!(s.border_fill(0), NEUTRAL_FILL);
		// the unmatched border stays neutral even after the reveal
		assert_eq!(s.border_fill(1), NEUTRAL_FILL);
	}

	#[test]
	fn leaving_map_restores_bubbles_and_hides_borders() {
		let mut s = state();
		s.set_mode(ViewMode::Map);
		run(&mut s, 3.5);
		s.set_mode(ViewMode::Combine);
		assert!(!s.view.on_a_map);
		assert_eq!(s.bubble_opacity.target(), 1.0);
		assert_eq!(s.border_opacity.target(), 0.0);
		run(&mut s, 2.0);
		assert!(!s.border_displayed);
		assert!(s.bubble_opacity.value() >= 1.0);
		assert!(s.bubble_labels_visible);
		assert!(!s.path_labels_visible);
	}

	#[test]
	fn reentering_map_cancels_previous_deadlines() {
		let mut s = state();
		s.set_mode(ViewMode::Map);
		run(&mut s, 0.2);
		s.set_mode(ViewMode::Map);
		// exactly one pending deadline of each kind, rescheduled
		let reveal = s.view.map_reveal_at.unwrap();
		let fade = s.view.bubble_fade_at.unwrap();
		assert!(reveal > 0.2 + MAP_REVEAL_DELAY - 0.05);
		assert!(fade > 0.2 + BUBBLE_FADE_DELAY - 0.05);
		// and switching away leaves none
		s.set_mode(ViewMode::Sort);
		assert!(s.view.map_reveal_at.is_none());
		assert!(s.view.bubble_fade_at.is_none());
	}

	#[test]
	fn switching_away_before_the_reveal_never_colors_borders() {
		let mut s = state();
		s.set_mode(ViewMode::Map);
		run(&mut s, 0.2);
		s.set_mode(ViewMode::Divide);
		run(&mut s, 3.0);
		assert_eq!(s.border_fill(0), NEUTRAL_FILL);
		assert!(s.bubble_opacity.value() >= 1.0);
	}

	#[test]
	fn sort_targets_are_monotone_in_rate() {
		let s = state();
		let cfg = s.force_config(ViewMode::Sort);
		let mut by_rate: Vec<usize> = (0..s.records.len()).collect();
		by_rate.sort_by(|&a, &b| s.records[a].birth.total_cmp(&s.records[b].birth));
		let mut prev = f64::NEG_INFINITY;
		for index in by_rate {
			assert!(cfg.x_targets[index] > prev);
			prev = cfg.x_targets[index];
		}
	}

	#[test]
	fn divide_targets_are_the_region_anchors() {
		let s = state();
		let cfg = s.force_config(ViewMode::Divide);
		for (index, record) in s.records.iter().enumerate() {
			let (ax, ay) = record.region.anchor(1000.0, 800.0);
			assert_eq!(cfg.x_targets[index], ax);
			assert_eq!(cfg.y_targets[index], ay);
		}
	}

	#[test]
	fn map_targets_are_the_projected_positions() {
		let s = state();
		let cfg = s.force_config(ViewMode::Map);
		for (index, record) in s.records.iter().enumerate() {
			let (px, py) = s.projection.project(record.long, record.lat);
			assert_eq!(cfg.x_targets[index], px);
			assert_eq!(cfg.y_targets[index], py);
		}
	}

	#[test]
	fn region_labels_show_only_in_divide() {
		let mut s = state();
		for (mode, visible) in [
			(ViewMode::Divide, true),
			(ViewMode::Combine, false),
			(ViewMode::Divide, true),
			(ViewMode::Sort, false),
			(ViewMode::Map, false),
		] {
			s.set_mode(mode);
			assert_eq!(s.region_labels_visible, visible);
		}
	}

	#[test]
	fn border_click_toggles_centroid_zoom() {
		let mut s = state();
		s.set_mode(ViewMode::Map);
		run(&mut s, 2.0);

		let (cx, cy) = s.borders[0].centroid;
		s.click(cx, cy);
		assert_eq!(s.view.centered, Some(0));
		run(&mut s, 1.0);
		let t = s.transform();
		assert!((t.k - 5.0).abs() < 1e-9);
		assert!((t.x - (500.0 - 5.0 * cx)).abs() < 1e-6);
		assert!((t.y - (400.0 - 5.0 * cy)).abs() < 1e-6);

		// second click on the same country resets to identity;
		// the centroid is now at the screen center
		s.click(500.0, 400.0);
		assert_eq!(s.view.centered, None);
		run(&mut s, 1.0);
		assert_eq!(s.transform(), ViewTransform::IDENTITY);
	}

	#[test]
	fn clicks_do_nothing_outside_map_mode() {
		let mut s = state();
		let (cx, cy) = s.borders[0].centroid;
		s.click(cx, cy);
		assert_eq!(s.view.centered, None);
		assert_eq!(s.transform(), ViewTransform::IDENTITY);
	}

	#[test]
	fn hovering_a_bubble_reports_the_record() {
		let mut s = state();
		run(&mut s, 1.0);
		let node = s.nodes[3];
		let hit = s.hit_test(node.x, node.y).expect("bubble under pointer");
		assert_eq!(hit, Hit::Bubble(3));
		let tooltip = s.tooltip_for(hit, 10.0, 20.0);
		assert!(tooltip.visible);
		assert!(tooltip.text.contains("Niger"));
		assert!(tooltip.text.contains("49.7"));
	}

	#[test]
	fn hovering_an_unmatched_border_has_no_rate() {
		let mut s = state();
		s.set_mode(ViewMode::Map);
		run(&mut s, 4.0);
		let tooltip = s.tooltip_for(Hit::Border(1), 0.0, 0.0);
		assert_eq!(tooltip.text, "Terra Incognita");
	}

	#[test]
	fn unmatched_border_has_no_label() {
		let s = state();
		assert!(s.borders[1].code.is_none());
		assert!(s.borders[1].label_pos.is_none());
		assert!(s.borders[0].code.is_some());
	}

	#[test]
	fn simulation_settles_and_restarts_on_mode_change() {
		let mut s = state();
		run(&mut s, 60.0);
		assert!(!s.simulation_active());
		s.set_mode(ViewMode::Sort);
		assert!(s.simulation_active());
	}
}
