//! Rendering services built on the domain model: traversal entry points,
//! resource emission and template adapters.

pub mod error;
pub mod render;
pub mod resources;
pub mod templates;
