//! Progression systems: experience, encounters, and level runs.

#![allow(unused_imports)]

pub mod constants;
pub mod encounter;
pub mod experience;
pub mod level;

pub use constants::*;
pub use encounter::*;
pub use experience::*;
pub use level::*;
