//! # Sylvan Shared
//!
//! Value types used by both the terrain generator and whatever presents it.
//!
//! ## Rule
//!
//! This crate must NEVER depend on a GPU, window or asset crate.
//! Renderers consume these types; they do not define them.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod math;

pub use math::Vec3;
