use std::collections::{BTreeMap, VecDeque};
use std::sync::Arc;

use kurbo::Point;

use crate::foundation::error::{ReferenceKind, SlideError, SlideResult};
use crate::foundation::value::Value;
use crate::project::model::{Action, Project};
use crate::runtime::executor::{ActionExecutor, Effect, RuntimeFault};
use crate::runtime::layers::LayerState;
use crate::runtime::observer::PlaybackObserver;
use crate::runtime::triggers::{
    ObjectLoc, TriggerRef, click_triggers, entry_triggers, locate_object,
};
use crate::runtime::variables::VariableStore;

/// Options controlling a [`PlaybackEngine`].
#[derive(Clone, Debug)]
pub struct SessionOpts {
    /// Run the validator in [`PlaybackEngine::load_project`] and refuse projects with diagnostics.
    pub validate_on_load: bool,
    /// Upper bound on work-queue items drained for one external event.
    ///
    /// Guards against navigation cycles between slides whose entry triggers navigate to each
    /// other. On overflow the remaining work is dropped and a
    /// [`RuntimeFault::StepLimitExceeded`] is reported.
    pub max_queue_steps: usize,
}

impl Default for SessionOpts {
    fn default() -> Self {
        Self {
            validate_on_load: true,
            max_queue_steps: 10_000,
        }
    }
}

/// Playback state machine.
///
/// `Idle -> SlideActive(first)` on session start; `SlideActive(s) -> Navigating -> SlideActive(t)`
/// on navigation. `Navigating` is only observable from observers while entry triggers of the
/// target slide are still pending.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "state", content = "slideId", rename_all = "camelCase")]
pub enum PlaybackState {
    /// No slide loaded.
    Idle,
    /// The named slide is current and all queued work has run.
    SlideActive(String),
    /// The named slide is current but its entry triggers have not all run yet.
    Navigating(String),
}

/// Serializable view of a session's mutable state.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    /// State machine position.
    pub state: PlaybackState,
    /// Current slide id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_slide_id: Option<String>,
    /// Every variable; `null` means "no value".
    pub variables: BTreeMap<String, Option<Value>>,
    /// Visibility of the current slide's layers.
    pub layers: BTreeMap<String, bool>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum WorkItem {
    /// Run one trigger's action list to completion.
    Fire(TriggerRef),
    /// Finish the navigation to this slide index, if it is still current.
    Settle(usize),
}

/// Runtime engine interpreting a validated [`Project`].
///
/// The project is shared read-only (`Arc`) and never mutated; variable values, layer
/// visibility and the current slide live in the engine, so any number of engines can play
/// the same project independently.
///
/// Everything runs synchronously on the caller's thread. Each external event is processed to
/// completion: triggers are queued FIFO and every action list finishes before the next queued
/// list starts, including lists enqueued by navigation during an earlier list.
pub struct PlaybackEngine {
    opts: SessionOpts,
    project: Option<Arc<Project>>,
    state: PlaybackState,
    current: Option<usize>,
    variables: VariableStore,
    layers: LayerState,
    queue: VecDeque<WorkItem>,
    observers: Vec<Box<dyn PlaybackObserver>>,
    faults: Vec<RuntimeFault>,
}

impl Default for PlaybackEngine {
    fn default() -> Self {
        Self::new(SessionOpts::default())
    }
}

impl PlaybackEngine {
    /// Create an idle engine.
    pub fn new(opts: SessionOpts) -> Self {
        Self {
            opts,
            project: None,
            state: PlaybackState::Idle,
            current: None,
            variables: VariableStore::default(),
            layers: LayerState::default(),
            queue: VecDeque::new(),
            observers: Vec::new(),
            faults: Vec::new(),
        }
    }

    /// Register an observer. Observers are called in registration order.
    pub fn add_observer(&mut self, observer: impl PlaybackObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Load a project and start a session on its first slide.
    ///
    /// With [`SessionOpts::validate_on_load`] (the default) a project with diagnostics is
    /// refused with [`SlideError::Validation`] and the engine is left untouched.
    #[tracing::instrument(skip(self, project))]
    pub fn load_project(&mut self, project: impl Into<Arc<Project>>) -> SlideResult<()> {
        let project = project.into();
        if self.opts.validate_on_load {
            project.validate()?;
        }
        self.load_project_unchecked(project);
        Ok(())
    }

    /// Load a project without validation and start a session.
    ///
    /// Dangling references inside such a project surface as [`RuntimeFault`]s during play.
    pub fn load_project_unchecked(&mut self, project: impl Into<Arc<Project>>) {
        let project = project.into();
        tracing::debug!(project = %project.id, slides = project.slides.len(), "load project");
        self.project = Some(project);
        self.restart();
    }

    /// Start a fresh session over the loaded project: reseed variables, enter the first slide
    /// and fire its entry triggers. No-op when nothing is loaded.
    pub fn restart(&mut self) {
        self.reset_session();
        let Some(project) = self.project.clone() else {
            return;
        };
        self.variables = VariableStore::seed(&project);
        if project.slides.is_empty() {
            tracing::debug!("project has no slides; staying idle");
            return;
        }
        self.enter_slide(&project, 0);
        self.drain(&project);
    }

    /// Return to `Idle`, keeping the loaded project.
    pub fn stop(&mut self) {
        self.reset_session();
    }

    fn reset_session(&mut self) {
        self.state = PlaybackState::Idle;
        self.current = None;
        self.layers.clear();
        self.queue.clear();
        self.variables = VariableStore::default();
    }

    /// Dispatch a click on the object with `object_id` on the current slide.
    ///
    /// Fires the object's `OnClick` triggers in order and returns how many fired. Objects are
    /// resolved across all layers of the current slide, regardless of visibility.
    #[tracing::instrument(skip(self))]
    pub fn on_object_clicked(&mut self, object_id: &str) -> SlideResult<usize> {
        let (project, slide_index) = self.active()?;
        let slide = &project.slides[slide_index];
        let loc = locate_object(slide, object_id)
            .ok_or_else(|| SlideError::dangling(ReferenceKind::Object, object_id))?;
        Ok(self.dispatch_click(&project, slide_index, loc))
    }

    /// Hit-test `point` on the current slide and dispatch a click on the topmost visible object
    /// in a visible layer. Returns the clicked object's id, if any.
    pub fn on_pointer_down(&mut self, point: Point) -> SlideResult<Option<String>> {
        let (project, slide_index) = self.active()?;
        let slide = &project.slides[slide_index];
        let layers = &self.layers;
        let Some(hit) = slide.hit_test(point, |l| layers.is_visible(&l.id).unwrap_or(l.visible))
        else {
            return Ok(None);
        };
        let id = hit.object.id.clone();
        let loc = ObjectLoc {
            layer: hit.layer,
            object: hit.index,
        };
        self.dispatch_click(&project, slide_index, loc);
        Ok(Some(id))
    }

    /// Make `slide_id` current (as if navigated to) and fire its entry triggers.
    ///
    /// When the engine is idle (after [`PlaybackEngine::stop`]) variables are reseeded first.
    #[tracing::instrument(skip(self))]
    pub fn on_slide_entered(&mut self, slide_id: &str) -> SlideResult<()> {
        let project = self
            .project
            .clone()
            .ok_or_else(|| SlideError::state("no project loaded"))?;
        let index = project
            .slide_index(slide_id)
            .ok_or_else(|| SlideError::dangling(ReferenceKind::Slide, slide_id))?;
        if self.current.is_none() {
            // Entering from `Idle` starts a fresh session on that slide.
            self.variables = VariableStore::seed(&project);
        }
        self.enter_slide(&project, index);
        self.drain(&project);
        Ok(())
    }

    /// Current value of a variable; `None` if undeclared or without a value.
    pub fn variable(&self, id: &str) -> Option<&Value> {
        self.variables.get(id)
    }

    /// Runtime visibility of a layer on the current slide.
    pub fn is_layer_visible(&self, id: &str) -> Option<bool> {
        self.layers.is_visible(id)
    }

    /// Id of the current slide.
    pub fn current_slide_id(&self) -> Option<&str> {
        let project = self.project.as_ref()?;
        project.slides.get(self.current?).map(|s| s.id.as_str())
    }

    /// State machine position.
    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// Loaded project, if any.
    pub fn project(&self) -> Option<&Arc<Project>> {
        self.project.as_ref()
    }

    /// Session variable store.
    pub fn variables(&self) -> &VariableStore {
        &self.variables
    }

    /// Session layer state.
    pub fn layers(&self) -> &LayerState {
        &self.layers
    }

    /// Faults reported since the engine was created (or last drained).
    pub fn faults(&self) -> &[RuntimeFault] {
        &self.faults
    }

    /// Drain the recorded faults.
    pub fn take_faults(&mut self) -> Vec<RuntimeFault> {
        std::mem::take(&mut self.faults)
    }

    /// Serializable copy of the session state.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            state: self.state.clone(),
            current_slide_id: self.current_slide_id().map(str::to_owned),
            variables: self
                .variables
                .iter()
                .map(|(k, v)| (k.to_owned(), v.cloned()))
                .collect(),
            layers: self
                .layers
                .iter()
                .map(|(k, v)| (k.to_owned(), v))
                .collect(),
        }
    }

    fn active(&self) -> SlideResult<(Arc<Project>, usize)> {
        let project = self
            .project
            .clone()
            .ok_or_else(|| SlideError::state("no project loaded"))?;
        let index = self
            .current
            .ok_or_else(|| SlideError::state("no slide is active"))?;
        Ok((project, index))
    }

    fn dispatch_click(&mut self, project: &Project, slide_index: usize, loc: ObjectLoc) -> usize {
        let fired = click_triggers(&project.slides[slide_index], slide_index, loc);
        tracing::debug!(triggers = fired.len(), "click");
        self.queue.extend(fired.iter().copied().map(WorkItem::Fire));
        self.drain(project);
        fired.len()
    }

    /// Switch the current slide, reset its layers and queue its entry triggers.
    fn enter_slide(&mut self, project: &Project, index: usize) {
        let slide = &project.slides[index];
        let from = self.current_slide_id().map(str::to_owned);
        tracing::debug!(from = ?from, to = %slide.id, "enter slide");

        self.state = PlaybackState::Navigating(slide.id.clone());
        self.current = Some(index);
        self.layers.reset_for(slide);
        for o in &mut self.observers {
            o.slide_changed(from.as_deref(), &slide.id);
        }

        let entries = entry_triggers(slide, index);
        self.queue.extend(entries.into_iter().map(WorkItem::Fire));
        self.queue.push_back(WorkItem::Settle(index));
    }

    fn drain(&mut self, project: &Project) {
        let mut steps = 0usize;
        while let Some(item) = self.queue.pop_front() {
            steps += 1;
            if steps > self.opts.max_queue_steps {
                self.queue.clear();
                self.report(RuntimeFault::StepLimitExceeded {
                    limit: self.opts.max_queue_steps,
                });
                break;
            }
            match item {
                WorkItem::Fire(tref) => self.run_trigger(project, tref),
                WorkItem::Settle(index) => {
                    if self.current == Some(index) {
                        self.state = PlaybackState::SlideActive(project.slides[index].id.clone());
                    }
                }
            }
        }
        if let (PlaybackState::Navigating(id), Some(_)) = (&self.state, self.current) {
            // Only reachable when the step limit cut the queue short.
            self.state = PlaybackState::SlideActive(id.clone());
        }
    }

    /// Run one action list to completion. Faulting actions are skipped, and so are show/hide
    /// actions once the trigger's own slide is no longer current.
    fn run_trigger(&mut self, project: &Project, tref: TriggerRef) {
        let Some(trigger) = tref.resolve(project) else {
            tracing::error!(?tref, "queued trigger does not resolve");
            return;
        };
        tracing::debug!(trigger = %trigger.id, actions = trigger.actions.len(), "fire");

        for action in &trigger.actions {
            if matches!(action, Action::ShowLayer(_) | Action::HideLayer(_))
                && self.current != Some(tref.slide)
            {
                // Addresses layers of a slide that is no longer current.
                tracing::debug!(trigger = %trigger.id, "layer action of a left slide skipped");
                continue;
            }
            let mut exec = ActionExecutor {
                project,
                variables: &mut self.variables,
                layers: &mut self.layers,
            };
            match exec.execute(&trigger.id, action) {
                Ok(Effect::Unchanged) => {}
                Ok(Effect::VariableChanged { id, old, new }) => {
                    for o in &mut self.observers {
                        o.variable_changed(&id, old.as_ref(), &new);
                    }
                }
                Ok(Effect::LayerChanged { id, visible }) => {
                    for o in &mut self.observers {
                        o.layer_visibility_changed(&id, visible);
                    }
                }
                Ok(Effect::Navigate(index)) => self.enter_slide(project, index),
                Err(fault) => self.report(fault),
            }
        }
    }

    fn report(&mut self, fault: RuntimeFault) {
        tracing::warn!(%fault, "runtime fault; action skipped");
        for o in &mut self.observers {
            o.fault(&fault);
        }
        self.faults.push(fault);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/session.rs"]
mod tests;
