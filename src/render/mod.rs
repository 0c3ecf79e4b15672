//! Chart rendering and the post-render preview.

pub mod chart;

pub use chart::{render_scaling_chart, show_chart};
