//! Hosted inference provider implementations.

pub mod hosted;
