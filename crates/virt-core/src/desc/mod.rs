//! Typed domain descriptions and the incremental builder.

pub mod builder;
pub mod domain;
