mod component;
mod render;
mod scales;
mod simulation;
mod state;
pub mod types;

pub use component::BirthRateCanvas;
pub use types::{Dataset, RegionLabel, Tooltip, ViewMode};
