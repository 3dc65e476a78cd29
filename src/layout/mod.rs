//! Card layout.
//!
//! This module places words on the card grid:
//! - [`placement`]: slot arithmetic and the placement index
//! - [`engine`]: drawing cards, decorations and fold lines onto a canvas

pub mod engine;
pub mod placement;

// Re-export main types
pub use engine::CardLayout;
pub use placement::{mirror_column, CardHalf, Placement, Slot};
