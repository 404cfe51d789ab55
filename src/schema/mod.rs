//! Boundary of the project graph: JSON encoding and structural validation.
//!
//! Both halves are pure and never touch playback state.

pub(crate) mod codec;
pub(crate) mod validate;
