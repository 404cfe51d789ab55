//! slidekit models, validates and plays interactive slide projects.
//!
//! A [`Project`] is a declarative graph of slides, layers, objects, triggers and actions.
//! This crate gives that graph executable meaning.
//!
//! # Pipeline overview
//!
//! 1. **Decode**: JSON document -> [`Project`] ([`decode`], [`Project::from_path`])
//! 2. **Validate**: [`Project`] -> ordered [`Diagnostic`]s ([`validate`]); empty means playable
//! 3. **Play**: [`PlaybackEngine`] interprets the project, reacting to clicks and slide entries
//!    by running trigger action lists against session-owned state
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Read-only projects**: playback never mutates a [`Project`]; session state lives in the
//!   engine, so one project can back many sessions.
//! - **Deterministic playback**: triggers run in document order through a FIFO work queue;
//!   every action list completes before the next one starts.
//! - **Recoverable faults**: a dangling reference during play skips that one action and is
//!   reported as a [`RuntimeFault`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;
mod project;
mod runtime;
mod schema;

pub use foundation::error::{ReferenceKind, SlideError, SlideResult};
pub use foundation::value::Value;
pub use project::dsl::{
    LayerBuilder, ObjectBuilder, ProjectBuilder, SlideBuilder, TriggerBuilder, variable,
};
pub use project::model::{
    Action, ButtonObject, HideLayerAction, ImageObject, Layer, NavigateToSlideAction, ObjectHit,
    ObjectKind, Project, SetOperation, SetVariableAction, ShowLayerAction, Slide, SlideObject,
    TextObject, Trigger, TriggerType, Variable, VariableType,
};
pub use runtime::executor::RuntimeFault;
pub use runtime::layers::LayerState;
pub use runtime::observer::{PlaybackEvent, PlaybackObserver, RecordingObserver};
pub use runtime::session::{PlaybackEngine, PlaybackState, SessionOpts, SessionSnapshot};
pub use runtime::variables::VariableStore;
pub use schema::codec::{decode, decode_path, decode_reader, encode};
pub use schema::validate::{Diagnostic, DiagnosticKind, PathElem, validate};

pub use kurbo::{Point, Size};
