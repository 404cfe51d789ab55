use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::foundation::error::{SlideError, SlideResult};
use crate::project::model::{Action, Project, Slide, SlideObject, Trigger};

/// One step of a JSON-path-like location inside a project document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathElem {
    /// Object field (wire name).
    Field(&'static str),
    /// Array index.
    Index(usize),
}

/// Category of a [`Diagnostic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// No project was supplied.
    MissingProject,
    /// Project name is empty or whitespace.
    BlankProjectName,
    /// A slide id occurs more than once.
    DuplicateSlideId,
    /// A variable id occurs more than once.
    DuplicateVariableId,
    /// Slide title is empty or whitespace.
    BlankSlideTitle,
    /// Slide width is not > 0.
    InvalidSlideWidth,
    /// Slide height is not > 0.
    InvalidSlideHeight,
    /// A layer id occurs more than once within a slide.
    DuplicateLayerId,
    /// An object id occurs more than once within a layer.
    DuplicateObjectId,
    /// A trigger has no actions.
    EmptyTrigger,
    /// A set-variable action names an undeclared variable.
    MissingVariable,
    /// A navigation names an unknown slide.
    MissingSlide,
    /// A show/hide action names a layer that is not on the action's slide.
    MissingLayer,
    /// A trigger target names an object that is not on the trigger's slide.
    MissingObject,
}

/// A single structural or referential problem found by [`validate`].
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// Problem category.
    pub kind: DiagnosticKind,
    /// Location of the offending field.
    pub path: Vec<PathElem>,
    /// Human-readable description.
    pub message: String,
}

impl Diagnostic {
    fn at(path: &[PathElem], kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.to_vec(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            return write!(f, "{}", self.message);
        }
        write!(f, "{}: {}", format_path(&self.path), self.message)
    }
}

fn format_path(path: &[PathElem]) -> String {
    let mut s = String::from("$");
    for p in path {
        match *p {
            PathElem::Field(name) => {
                s.push('.');
                s.push_str(name);
            }
            PathElem::Index(i) => {
                s.push('[');
                s.push_str(&i.to_string());
                s.push(']');
            }
        }
    }
    s
}

/// Validate a project graph and return every diagnostic in a fixed order.
///
/// An empty result means the project is playable. `None` yields a single
/// [`DiagnosticKind::MissingProject`] diagnostic. Otherwise all checks run: a broken project
/// reports all of its problems at once.
pub fn validate(project: Option<&Project>) -> Vec<Diagnostic> {
    let Some(project) = project else {
        return vec![Diagnostic::at(
            &[],
            DiagnosticKind::MissingProject,
            "project is missing",
        )];
    };

    let mut out = Vec::new();

    if project.name.trim().is_empty() {
        out.push(Diagnostic::at(
            &[PathElem::Field("name")],
            DiagnosticKind::BlankProjectName,
            "project name must be non-blank",
        ));
    }

    for id in duplicate_ids(project.slides.iter().map(|s| s.id.as_str())) {
        out.push(Diagnostic::at(
            &[PathElem::Field("slides")],
            DiagnosticKind::DuplicateSlideId,
            format!("duplicate slide id \"{id}\""),
        ));
    }

    for id in duplicate_ids(project.variables.iter().map(|v| v.id.as_str())) {
        out.push(Diagnostic::at(
            &[PathElem::Field("variables")],
            DiagnosticKind::DuplicateVariableId,
            format!("duplicate variable id \"{id}\""),
        ));
    }

    for (i, slide) in project.slides.iter().enumerate() {
        validate_slide_structure(slide, i, &mut out);
    }

    validate_variable_refs(project, &mut out);
    validate_slide_refs(project, &mut out);
    for (i, slide) in project.slides.iter().enumerate() {
        validate_layer_refs(slide, i, &mut out);
    }
    for (i, slide) in project.slides.iter().enumerate() {
        validate_object_refs(slide, i, &mut out);
    }

    out
}

impl Project {
    /// Run [`validate`] and fold any diagnostics into [`SlideError::Validation`].
    pub fn validate(&self) -> SlideResult<()> {
        let diagnostics = validate(Some(self));
        if diagnostics.is_empty() {
            Ok(())
        } else {
            Err(SlideError::Validation(diagnostics))
        }
    }
}

/// Ids that occur more than once, each reported once, in order of first occurrence.
fn duplicate_ids<'a>(ids: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let ids: Vec<&str> = ids.collect();
    let mut counts = HashMap::<&str, usize>::new();
    for id in &ids {
        *counts.entry(*id).or_default() += 1;
    }
    let mut reported = HashSet::new();
    ids.into_iter()
        .filter(|id| counts[id] > 1 && reported.insert(*id))
        .collect()
}

fn slide_path(i: usize) -> Vec<PathElem> {
    vec![PathElem::Field("slides"), PathElem::Index(i)]
}

fn validate_slide_structure(slide: &Slide, i: usize, out: &mut Vec<Diagnostic>) {
    let path = slide_path(i);

    if slide.title.trim().is_empty() {
        out.push(Diagnostic::at(
            &[path.as_slice(), &[PathElem::Field("title")]].concat(),
            DiagnosticKind::BlankSlideTitle,
            format!("slide \"{}\": title must be non-blank", slide.id),
        ));
    }
    // Written as negations so NaN is rejected too.
    if !(slide.width > 0.0) {
        out.push(Diagnostic::at(
            &[path.as_slice(), &[PathElem::Field("width")]].concat(),
            DiagnosticKind::InvalidSlideWidth,
            format!("slide \"{}\": width must be > 0", slide.id),
        ));
    }
    if !(slide.height > 0.0) {
        out.push(Diagnostic::at(
            &[path.as_slice(), &[PathElem::Field("height")]].concat(),
            DiagnosticKind::InvalidSlideHeight,
            format!("slide \"{}\": height must be > 0", slide.id),
        ));
    }

    for id in duplicate_ids(slide.layers.iter().map(|l| l.id.as_str())) {
        out.push(Diagnostic::at(
            &[path.as_slice(), &[PathElem::Field("layers")]].concat(),
            DiagnosticKind::DuplicateLayerId,
            format!("slide \"{}\": duplicate layer id \"{id}\"", slide.id),
        ));
    }

    for (j, layer) in slide.layers.iter().enumerate() {
        let layer_path = [
            path.as_slice(),
            &[PathElem::Field("layers"), PathElem::Index(j)],
        ]
        .concat();

        for id in duplicate_ids(layer.objects.iter().map(|o| o.id.as_str())) {
            out.push(Diagnostic::at(
                &[layer_path.as_slice(), &[PathElem::Field("objects")]].concat(),
                DiagnosticKind::DuplicateObjectId,
                format!("layer \"{}\": duplicate object id \"{id}\"", layer.id),
            ));
        }

        for (k, object) in layer.objects.iter().enumerate() {
            for (t, trigger) in object.triggers.iter().enumerate() {
                if trigger.actions.is_empty() {
                    out.push(Diagnostic::at(
                        &[
                            layer_path.as_slice(),
                            &[
                                PathElem::Field("objects"),
                                PathElem::Index(k),
                                PathElem::Field("triggers"),
                                PathElem::Index(t),
                                PathElem::Field("actions"),
                            ],
                        ]
                        .concat(),
                        DiagnosticKind::EmptyTrigger,
                        format!(
                            "trigger \"{}\" on object \"{}\" has no actions",
                            trigger.id, object.id
                        ),
                    ));
                }
            }
        }
    }
}

/// A trigger located in the document, with its path and hosting object.
struct TriggerSite<'a> {
    path: Vec<PathElem>,
    host: &'a SlideObject,
    trigger: &'a Trigger,
}

fn trigger_sites(slide: &Slide, slide_index: usize) -> Vec<TriggerSite<'_>> {
    let mut sites = Vec::new();
    for (j, layer) in slide.layers.iter().enumerate() {
        for (k, host) in layer.objects.iter().enumerate() {
            for (t, trigger) in host.triggers.iter().enumerate() {
                let path = [
                    slide_path(slide_index).as_slice(),
                    &[
                        PathElem::Field("layers"),
                        PathElem::Index(j),
                        PathElem::Field("objects"),
                        PathElem::Index(k),
                        PathElem::Field("triggers"),
                        PathElem::Index(t),
                    ],
                ]
                .concat();
                sites.push(TriggerSite {
                    path,
                    host,
                    trigger,
                });
            }
        }
    }
    sites
}

fn action_path(site: &TriggerSite<'_>, a: usize, field: &'static str) -> Vec<PathElem> {
    [
        site.path.as_slice(),
        &[
            PathElem::Field("actions"),
            PathElem::Index(a),
            PathElem::Field(field),
        ],
    ]
    .concat()
}

fn validate_variable_refs(project: &Project, out: &mut Vec<Diagnostic>) {
    let known: HashSet<&str> = project.variables.iter().map(|v| v.id.as_str()).collect();
    for (i, slide) in project.slides.iter().enumerate() {
        for site in trigger_sites(slide, i) {
            for (a, action) in site.trigger.actions.iter().enumerate() {
                if let Action::SetVariable(set) = action
                    && !known.contains(set.variable_id.as_str())
                {
                    out.push(Diagnostic::at(
                        &action_path(&site, a, "variableId"),
                        DiagnosticKind::MissingVariable,
                        format!(
                            "trigger \"{}\" references missing variable \"{}\"",
                            site.trigger.id, set.variable_id
                        ),
                    ));
                }
            }
        }
    }
}

fn validate_slide_refs(project: &Project, out: &mut Vec<Diagnostic>) {
    let known: HashSet<&str> = project.slides.iter().map(|s| s.id.as_str()).collect();
    for (i, slide) in project.slides.iter().enumerate() {
        for site in trigger_sites(slide, i) {
            for (a, action) in site.trigger.actions.iter().enumerate() {
                if let Action::NavigateToSlide(nav) = action
                    && !known.contains(nav.target_slide_id.as_str())
                {
                    out.push(Diagnostic::at(
                        &action_path(&site, a, "targetSlideId"),
                        DiagnosticKind::MissingSlide,
                        format!(
                            "trigger \"{}\" references missing slide \"{}\"",
                            site.trigger.id, nav.target_slide_id
                        ),
                    ));
                }
            }
        }
    }
}

/// Layer references resolve against the layers of the slide that contains the action.
fn validate_layer_refs(slide: &Slide, i: usize, out: &mut Vec<Diagnostic>) {
    let known: HashSet<&str> = slide.layers.iter().map(|l| l.id.as_str()).collect();
    for site in trigger_sites(slide, i) {
        for (a, action) in site.trigger.actions.iter().enumerate() {
            let layer_id = match action {
                Action::ShowLayer(show) => &show.layer_id,
                Action::HideLayer(hide) => &hide.layer_id,
                Action::NavigateToSlide(_) | Action::SetVariable(_) => continue,
            };
            if !known.contains(layer_id.as_str()) {
                out.push(Diagnostic::at(
                    &action_path(&site, a, "layerId"),
                    DiagnosticKind::MissingLayer,
                    format!(
                        "trigger \"{}\" references layer \"{layer_id}\" which is not on slide \"{}\"",
                        site.trigger.id, slide.id
                    ),
                ));
            }
        }
    }
}

/// Trigger targets resolve against the objects of every layer of the trigger's slide.
fn validate_object_refs(slide: &Slide, i: usize, out: &mut Vec<Diagnostic>) {
    let known: HashSet<&str> = slide.objects().map(|(_, o)| o.id.as_str()).collect();
    for site in trigger_sites(slide, i) {
        if let Some(target) = &site.trigger.object_id
            && !known.contains(target.as_str())
        {
            out.push(Diagnostic::at(
                &[site.path.as_slice(), &[PathElem::Field("objectId")]].concat(),
                DiagnosticKind::MissingObject,
                format!(
                    "trigger \"{}\" on object \"{}\" targets object \"{target}\" which is not on slide \"{}\"",
                    site.trigger.id, site.host.id, slide.id
                ),
            ));
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schema/validate.rs"]
mod tests;
