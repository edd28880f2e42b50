//! Combat types, math, and the battle engine.

#![allow(unused_imports)]

pub mod engine;
pub mod math;
pub mod types;

pub use engine::*;
pub use math::*;
pub use types::*;
