use std::cell::RefCell;
use std::rc::Rc;

use crate::foundation::value::Value;
use crate::runtime::executor::RuntimeFault;

/// Receiver of playback changes, typically the presentation layer.
///
/// Every method has an empty default body so observers only implement what they consume.
/// Calls happen synchronously, in the order the changes are applied.
pub trait PlaybackObserver {
    /// A variable was written.
    fn variable_changed(&mut self, _id: &str, _old: Option<&Value>, _new: &Value) {}
    /// A layer of the current slide changed visibility through an action.
    fn layer_visibility_changed(&mut self, _layer_id: &str, _visible: bool) {}
    /// The current slide changed. Layer visibility has already been reset to its defaults.
    fn slide_changed(&mut self, _from: Option<&str>, _to: &str) {}
    /// A recoverable fault was hit; the offending action was skipped.
    fn fault(&mut self, _fault: &RuntimeFault) {}
}

/// One recorded playback change.
#[derive(Clone, Debug, PartialEq)]
pub enum PlaybackEvent {
    /// See [`PlaybackObserver::variable_changed`].
    VariableChanged {
        /// Variable id.
        id: String,
        /// New value.
        value: Value,
    },
    /// See [`PlaybackObserver::layer_visibility_changed`].
    LayerVisibilityChanged {
        /// Layer id.
        layer_id: String,
        /// New visibility.
        visible: bool,
    },
    /// See [`PlaybackObserver::slide_changed`].
    SlideChanged {
        /// Previous slide, if any.
        from: Option<String>,
        /// New current slide.
        to: String,
    },
    /// See [`PlaybackObserver::fault`].
    Fault(RuntimeFault),
}

/// In-memory observer for tests and debugging.
///
/// Clones share the same log, so keep one handle and give another to the engine.
#[derive(Clone, Debug, Default)]
pub struct RecordingObserver {
    events: Rc<RefCell<Vec<PlaybackEvent>>>,
}

impl RecordingObserver {
    /// Create an observer with an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far.
    pub fn events(&self) -> Vec<PlaybackEvent> {
        self.events.borrow().clone()
    }

    /// Drop everything recorded so far.
    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    fn push(&self, event: PlaybackEvent) {
        self.events.borrow_mut().push(event);
    }
}

impl PlaybackObserver for RecordingObserver {
    fn variable_changed(&mut self, id: &str, _old: Option<&Value>, new: &Value) {
        self.push(PlaybackEvent::VariableChanged {
            id: id.to_owned(),
            value: new.clone(),
        });
    }

    fn layer_visibility_changed(&mut self, layer_id: &str, visible: bool) {
        self.push(PlaybackEvent::LayerVisibilityChanged {
            layer_id: layer_id.to_owned(),
            visible,
        });
    }

    fn slide_changed(&mut self, from: Option<&str>, to: &str) {
        self.push(PlaybackEvent::SlideChanged {
            from: from.map(str::to_owned),
            to: to.to_owned(),
        });
    }

    fn fault(&mut self, fault: &RuntimeFault) {
        self.push(PlaybackEvent::Fault(fault.clone()));
    }
}
