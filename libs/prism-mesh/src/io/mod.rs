//! # Mesh Interchange
//!
//! Text formats for handing indexed meshes to downstream tools.

pub mod legacy;

pub use legacy::{load_legacy, read_legacy, save_legacy, write_legacy};
