//! Geometric Primitives and Operations

pub mod bezpath;

pub use bezpath::{outline_bounds, BezPathPen};
