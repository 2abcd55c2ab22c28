use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window};

use super::render;
use super::state::{ChartState, MARGIN};
use super::types::{Dataset, RegionLabel, Tooltip, ViewMode};

/// Full-window canvas hosting the bubble chart. The page owns the mode
/// buttons and the tooltip element; this component owns the chart
/// state, the animation loop, and the pointer interactions.
#[component]
pub fn BirthRateCanvas(
	dataset: Dataset,
	#[prop(into)] mode: Signal<ViewMode>,
	#[prop(into)] region_labels: Signal<Vec<RegionLabel>>,
	tooltip: RwSignal<Tooltip>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<ChartState>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (state_init, animate_init) = (state.clone(), animate.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if state_init.borrow().is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		let window: Window = web_sys::window().unwrap();
		let (w, h) = (
			window.inner_width().unwrap().as_f64().unwrap() - 2.0 * MARGIN,
			window.inner_height().unwrap().as_f64().unwrap(),
		);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.unwrap()
			.unwrap()
			.dyn_into()
			.unwrap();
		let mut chart = ChartState::new(&dataset, w, h);
		// captions may have landed before the canvas mounted
		chart.set_region_labels(region_labels.get_untracked());
		*state_init.borrow_mut() = Some(chart);

		let (state_anim, animate_inner) = (state_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				s.tick(0.016);
				render::render(s, &ctx);
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				let _ = web_sys::window()
					.unwrap()
					.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	// Reapply the layout whenever a mode button fires; the initial
	// state already carries the entry configuration.
	let state_mode = state.clone();
	Effect::new(move |prev: Option<()>| {
		let mode = mode.get();
		if prev.is_some() {
			if let Some(ref mut s) = *state_mode.borrow_mut() {
				s.set_mode(mode);
			}
		}
	});

	// Region captions arrive from their own uncoordinated fetch.
	let state_regions = state.clone();
	Effect::new(move |_| {
		let labels = region_labels.get();
		if let Some(ref mut s) = *state_regions.borrow_mut() {
			s.set_region_labels(labels);
		}
	});

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		if let Some(ref s) = *state_mm.borrow() {
			match s.hit_test(x, y) {
				Some(hit) => {
					tooltip.set(s.tooltip_for(hit, ev.page_x() as f64, ev.page_y() as f64));
				}
				None => tooltip.update(|t| t.visible = false),
			}
		}
	};

	let state_click = state.clone();
	let on_click = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);
		if let Some(ref mut s) = *state_click.borrow_mut() {
			s.click(x, y);
		}
	};

	let on_mouseleave = move |_: MouseEvent| {
		tooltip.update(|t| t.visible = false);
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="chart__canvas"
			on:mousemove=on_mousemove
			on:click=on_click
			on:mouseleave=on_mouseleave
		/>
	}
}
