//! Terminal presentation: per-section view state, decorative effects and text rendering.

pub mod effects;
pub mod render;
pub mod state;

pub use state::ViewState;
