//! Characters: stats, classes, abilities, and party operations.

#![allow(unused_imports)]

pub mod ability;
pub mod class;
pub mod roster;
pub mod stats;

pub use ability::*;
pub use class::*;
pub use roster::*;
pub use stats::*;
