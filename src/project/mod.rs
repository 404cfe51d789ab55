//! Authored project graph: plain data plus builders.

pub(crate) mod dsl;
pub(crate) mod model;
