use crate::foundation::error::{ReferenceKind, SlideError};
use crate::foundation::value::Value;
use crate::project::model::{Action, Project};
use crate::runtime::layers::LayerState;
use crate::runtime::variables::{VariableStore, apply_operation};

/// Recoverable problem hit while playing a session.
///
/// Faults never abort playback: the offending action is skipped, the rest of its action list
/// still runs, and the fault is logged and forwarded to observers.
#[derive(thiserror::Error, Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "fault", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum RuntimeFault {
    /// An action named an id that does not resolve in the current session.
    #[error("trigger '{trigger_id}': {kind} '{id}' does not resolve")]
    DanglingReference {
        /// Trigger whose action was skipped.
        trigger_id: String,
        /// What the id was expected to name.
        kind: ReferenceKind,
        /// The unresolved id.
        id: String,
    },
    /// A set-variable action could not be applied to the current value.
    #[error("trigger '{trigger_id}': variable '{variable_id}': {detail}")]
    TypeMismatch {
        /// Trigger whose action was skipped.
        trigger_id: String,
        /// Target variable.
        variable_id: String,
        /// Reason the operation was rejected.
        detail: String,
    },
    /// Too many queued trigger runs for a single event; the rest were dropped.
    #[error("work queue exceeded {limit} steps for one event; remaining work dropped")]
    StepLimitExceeded {
        /// Configured limit.
        limit: usize,
    },
}

/// Observable outcome of one executed action.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Effect {
    /// Nothing changed (e.g. showing a layer that is already visible).
    Unchanged,
    /// A variable was written.
    VariableChanged {
        id: String,
        old: Option<Value>,
        new: Value,
    },
    /// A layer's visibility flipped.
    LayerChanged { id: String, visible: bool },
    /// The session must make this slide (by index) current before the next action runs.
    Navigate(usize),
}

/// Executes single actions against the session's variable store and layer state.
///
/// Navigation is returned as [`Effect::Navigate`] so the session can switch slides itself.
pub(crate) struct ActionExecutor<'a> {
    pub(crate) project: &'a Project,
    pub(crate) variables: &'a mut VariableStore,
    pub(crate) layers: &'a mut LayerState,
}

impl ActionExecutor<'_> {
    pub(crate) fn execute(
        &mut self,
        trigger_id: &str,
        action: &Action,
    ) -> Result<Effect, RuntimeFault> {
        let dangling = |kind, id: &str| RuntimeFault::DanglingReference {
            trigger_id: trigger_id.to_owned(),
            kind,
            id: id.to_owned(),
        };

        match action {
            Action::NavigateToSlide(nav) => self
                .project
                .slide_index(&nav.target_slide_id)
                .map(Effect::Navigate)
                .ok_or_else(|| dangling(ReferenceKind::Slide, &nav.target_slide_id)),
            Action::SetVariable(set) => {
                if !self.variables.contains(&set.variable_id) {
                    return Err(dangling(ReferenceKind::Variable, &set.variable_id));
                }
                let new = apply_operation(
                    self.variables.get(&set.variable_id),
                    set.operation,
                    set.value.as_ref(),
                )
                .map_err(|detail| RuntimeFault::TypeMismatch {
                    trigger_id: trigger_id.to_owned(),
                    variable_id: set.variable_id.clone(),
                    detail,
                })?;
                let old = self
                    .variables
                    .set(&set.variable_id, new)
                    .map_err(|_| dangling(ReferenceKind::Variable, &set.variable_id))?;
                let new = self
                    .variables
                    .get(&set.variable_id)
                    .cloned()
                    .unwrap_or(Value::Null);
                if old.as_ref() == Some(&new) {
                    return Ok(Effect::Unchanged);
                }
                Ok(Effect::VariableChanged {
                    id: set.variable_id.clone(),
                    old,
                    new,
                })
            }
            Action::ShowLayer(show) => self.set_layer(&show.layer_id, true, dangling),
            Action::HideLayer(hide) => self.set_layer(&hide.layer_id, false, dangling),
        }
    }

    fn set_layer(
        &mut self,
        layer_id: &str,
        visible: bool,
        dangling: impl Fn(ReferenceKind, &str) -> RuntimeFault,
    ) -> Result<Effect, RuntimeFault> {
        match self.layers.set_visible(layer_id, visible) {
            Ok(true) => Ok(Effect::LayerChanged {
                id: layer_id.to_owned(),
                visible,
            }),
            Ok(false) => Ok(Effect::Unchanged),
            Err(SlideError::DanglingReference { kind, id }) => Err(dangling(kind, &id)),
            Err(_) => Err(dangling(ReferenceKind::Layer, layer_id)),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/executor.rs"]
mod tests;
