//! Rendering for the showcase and the catalog.

mod render;

pub use render::{render, render_catalog};
