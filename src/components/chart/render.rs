use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::ChartState;

const BACKGROUND: &str = "#ffffff";
const BORDER_STROKE: &str = "#ffffff";
const ACTIVE_STROKE: &str = "#333333";
const LABEL_FILL: &str = "#222222";
const REGION_LABEL_FILL: &str = "#777777";

pub fn render(state: &ChartState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);

	ctx.save();
	let t = state.transform();
	let _ = ctx.translate(t.x, t.y);
	let _ = ctx.scale(t.k, t.k);

	if state.border_displayed {
		draw_borders(state, ctx, t.k);
	}
	if state.path_labels_visible {
		draw_path_labels(state, ctx);
	}
	if state.region_labels_visible {
		draw_region_labels(state, ctx);
	}
	if state.bubble_opacity.value() > 0.0 {
		draw_bubbles(state, ctx);
	}

	ctx.restore();
}

fn trace_rings(ctx: &CanvasRenderingContext2d, rings: &[Vec<(f64, f64)>]) {
	ctx.begin_path();
	for ring in rings {
		let mut points = ring.iter();
		let Some(&(x, y)) = points.next() else {
			continue;
		};
		ctx.move_to(x, y);
		for &(x, y) in points {
			ctx.line_to(x, y);
		}
		ctx.close_path();
	}
}

fn draw_borders(state: &ChartState, ctx: &CanvasRenderingContext2d, k: f64) {
	ctx.set_global_alpha(state.border_opacity.value());
	ctx.set_line_width(0.5 / k);
	for (index, shape) in state.borders.iter().enumerate() {
		trace_rings(ctx, &shape.rings);
		ctx.set_fill_style_str(&state.border_fill(index).css());
		ctx.fill();
		ctx.set_stroke_style_str(if state.view.centered == Some(index) {
			ACTIVE_STROKE
		} else {
			BORDER_STROKE
		});
		ctx.stroke();
	}
	ctx.set_global_alpha(1.0);
}

fn draw_path_labels(state: &ChartState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(LABEL_FILL);
	ctx.set_font("8px sans-serif");
	for shape in &state.borders {
		let (Some(code), Some((x, y))) = (&shape.code, shape.label_pos) else {
			continue;
		};
		let _ = ctx.fill_text(code, x, y + 1.0);
	}
}

fn draw_region_labels(state: &ChartState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(REGION_LABEL_FILL);
	ctx.set_font("16px sans-serif");
	for label in &state.region_labels {
		let x = (label.posx * state.width).round();
		let y = (label.posy * state.height).round();
		let _ = ctx.fill_text(&label.region, x, y);
	}
}

fn draw_bubbles(state: &ChartState, ctx: &CanvasRenderingContext2d) {
	ctx.set_global_alpha(state.bubble_opacity.value());
	for (index, node) in state.nodes.iter().enumerate() {
		let radius = state.bubble_radius(index).max(0.0);
		if radius <= 0.0 {
			continue;
		}
		ctx.begin_path();
		let _ = ctx.arc(node.x, node.y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&state.scales.color.map(state.records[index].birth).css());
		ctx.fill();
	}

	if state.bubble_labels_visible {
		ctx.set_fill_style_str(LABEL_FILL);
		for (index, node) in state.nodes.iter().enumerate() {
			let record = &state.records[index];
			let size = state.scales.text_size.map(record.birth).round();
			ctx.set_font(&format!("{size}px sans-serif"));
			let _ = ctx.fill_text(&record.code, node.x - 12.0, node.y + 5.0);
		}
	}
	ctx.set_global_alpha(1.0);
}
