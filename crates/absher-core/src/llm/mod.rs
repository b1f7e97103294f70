//! Free-form assistant backed by a hosted text-generation endpoint.

pub mod gateway;
pub mod provider;
