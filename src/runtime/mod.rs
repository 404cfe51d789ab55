//! Playback engine: variable store, layer state, trigger evaluation and action execution,
//! coordinated by [`session::PlaybackEngine`].

pub(crate) mod executor;
pub(crate) mod layers;
pub(crate) mod observer;
pub(crate) mod session;
pub(crate) mod triggers;
pub(crate) mod variables;
