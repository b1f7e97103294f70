//! Secret resolution.

pub mod env;
