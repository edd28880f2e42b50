//! Game data: built-in class and foe catalogs plus text-format loaders.

#![allow(unused_imports)]

pub mod classes;
pub mod foes;
pub mod loader;

pub use classes::*;
pub use foes::*;
pub use loader::*;
