//! # Config Crate
//!
//! Centralized configuration constants for the prism mesher.
//! Every default, validation bound, scoring weight and numeric guard used by
//! `prism-mesh` is defined here so that the meshing engine stays free of
//! scattered literals.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{DEFAULT_TARGET_EDGE_LENGTH_XY, MIN_TARGET_EDGE_LENGTH};
//!
//! let requested = 0.5;
//! let target = if requested >= MIN_TARGET_EDGE_LENGTH {
//!     requested
//! } else {
//!     DEFAULT_TARGET_EDGE_LENGTH_XY
//! };
//! assert_eq!(target, 0.5);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Bounded**: Every user-facing length has a finite valid range
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;
