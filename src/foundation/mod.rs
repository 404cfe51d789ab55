//! Shared building blocks: the error taxonomy and the opaque value type.

pub(crate) mod error;
pub(crate) mod value;
