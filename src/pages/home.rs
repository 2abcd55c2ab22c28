use leptos::prelude::*;
use leptos::task::spawn_local;
use log::warn;

use crate::components::chart::{BirthRateCanvas, Dataset, RegionLabel, Tooltip, ViewMode};
use crate::data::{self, LoadError};

/// The visualization page: kicks off the data loads and renders a
/// loading, error, or chart state.
#[component]
pub fn Home() -> impl IntoView {
	let dataset: RwSignal<Option<Result<Dataset, LoadError>>> = RwSignal::new(None);
	let region_labels: RwSignal<Vec<RegionLabel>> = RwSignal::new(Vec::new());

	spawn_local(async move {
		dataset.set(Some(data::load_dataset().await));
	});
	// independent of the main load; the chart works without captions
	spawn_local(async move {
		match data::fetch_region_labels().await {
			Ok(labels) => region_labels.set(labels),
			Err(error) => warn!("region captions unavailable: {error}"),
		}
	});

	view! {
		<div class="chart">
			{move || match dataset.get() {
				None => view! { <p class="chart__status">"Loading data..."</p> }.into_any(),
				Some(Err(error)) => {
					view! {
						<div class="chart__error">
							<h1>"The visualization could not load its data"</h1>
							<p>{error.to_string()}</p>
						</div>
					}
					.into_any()
				}
				Some(Ok(data)) => {
					view! { <ChartView data region_labels=region_labels /> }.into_any()
				}
			}}
		</div>
	}
}

/// Everything shown once both required sources have arrived: the mode
/// buttons, the legend header with the min/max info box, the canvas,
/// and the tooltip.
#[component]
fn ChartView(data: Dataset, region_labels: RwSignal<Vec<RegionLabel>>) -> impl IntoView {
	let mode = RwSignal::new(ViewMode::Combine);
	let tooltip = RwSignal::new(Tooltip::default());
	let legend_hidden = RwSignal::new(false);

	let extremes = data::rate_extremes(&data.records);

	view! {
		<div class="chart__container">
			<button class="chart__button" on:click=move |_| mode.set(ViewMode::Combine)>
				"All"
			</button>
			<button class="chart__button" on:click=move |_| mode.set(ViewMode::Divide)>
				"By region"
			</button>
			<button class="chart__button" on:click=move |_| mode.set(ViewMode::Sort)>
				"By rate"
			</button>
			<button class="chart__button" on:click=move |_| mode.set(ViewMode::Map)>
				"On a map"
			</button>
			<button
				class="chart__button"
				on:click=move |_| legend_hidden.update(|hidden| *hidden = !*hidden)
			>
				{move || if legend_hidden.get() { "Show legend" } else { "Hide legend" }}
			</button>

			<header
				class="chart__header"
				style:opacity=move || if legend_hidden.get() { "0" } else { "1" }
			>
				<div>"Countries birth rate visualization per 1000 population"</div>
				{extremes.map(|e| {
					view! {
						<div class="info">
							<div class="info__caption">"Bound birth rate values:"</div>
							<div class="info__value">
								{format!("maximal value: {} {}", e.max_country, e.max_rate)}
							</div>
							<div class="info__value">
								{format!("minimal value: {} {}", e.min_country, e.min_rate)}
							</div>
							<div class="info__ref">
								"Data for visualization was taken from "
								<a
									class="info__link"
									href="http://apps.who.int/gho/data/node.main.CBDR107?lang=en"
								>
									"World Health Organization"
								</a>
							</div>
						</div>
					}
				})}
			</header>

			<BirthRateCanvas
				dataset=data
				mode=mode
				region_labels=region_labels
				tooltip=tooltip
			/>

			<div
				class="chart__tooltip"
				style:left=move || format!("{}px", tooltip.get().x)
				style:top=move || format!("{}px", tooltip.get().y)
				style:opacity=move || if tooltip.get().visible { "0.9" } else { "0" }
			>
				{move || tooltip.get().text}
			</div>
		</div>
	}
}
