//! # SYLVAN
//!
//! Walks a player through the terrain streamed by `sylvan_procedural`.
//!
//! ## Frame Order
//!
//! ```text
//! input   -> Walker::try_move   (blocked by trees and rocks unless noclip)
//! frame   -> Walker::settle     (wrap across seams, stand on the ground)
//! render  -> World::window + ViewFlags
//! ```
//!
//! ## Modules
//!
//! - `view`: Presentation toggles
//! - `walker`: Player position tracking

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod view;
pub mod walker;

pub use sylvan_procedural as procedural;

pub use view::{FillMode, ViewFlags};
pub use walker::{Walker, DEFAULT_EYE_HEIGHT};
