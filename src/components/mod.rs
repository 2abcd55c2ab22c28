//! UI components.

pub mod chart;
