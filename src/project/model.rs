use kurbo::{Point, Rect, Size};

use crate::foundation::value::{Value, deserialize_present};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Root aggregate of an interactive presentation.
///
/// A project is a pure data model that can be:
/// - built programmatically (see [`crate::ProjectBuilder`])
/// - encoded/decoded as JSON (see [`crate::encode`] / [`crate::decode`])
///
/// Playback never mutates a project; all session state lives in [`crate::PlaybackEngine`].
pub struct Project {
    /// Project identifier.
    pub id: String,
    /// Display name; must be non-blank.
    pub name: String,
    /// Slides in presentation order. The first slide is entered on session start.
    pub slides: Vec<Slide>,
    /// Project-wide variables.
    pub variables: Vec<Variable>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// A single slide with its layer stack.
pub struct Slide {
    /// Slide identifier (unique within the project).
    pub id: String,
    /// Slide title; must be non-blank.
    pub title: String,
    /// Slide width; must be > 0.
    pub width: f64,
    /// Slide height; must be > 0.
    pub height: f64,
    /// Layers in back-to-front order.
    #[serde(default)]
    pub layers: Vec<Layer>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// A named group of objects whose visibility is toggled as a unit.
pub struct Layer {
    /// Layer identifier (unique within its slide).
    pub id: String,
    /// Layer name for authoring/debugging.
    pub name: String,
    /// Authored visibility; restored every time the slide is entered.
    #[serde(default = "default_visible")]
    pub visible: bool,
    /// Objects in back-to-front order.
    #[serde(default)]
    pub objects: Vec<SlideObject>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// A visual object placed on a layer. Hosts the triggers that fire on its behalf.
pub struct SlideObject {
    /// Object identifier (unique within its layer).
    pub id: String,
    /// Object name for authoring/debugging.
    pub name: String,
    /// Top-left corner in slide coordinates.
    pub position: Point,
    /// Extent in slide units.
    pub size: Size,
    /// Authored visibility. Does not gate trigger evaluation.
    #[serde(default = "default_visible")]
    pub visible: bool,
    /// Kind-specific payload, tagged by `type` on the wire.
    #[serde(flatten)]
    pub kind: ObjectKind,
    /// Triggers hosted by this object, in evaluation order.
    #[serde(default)]
    pub triggers: Vec<Trigger>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
/// Kind-specific object payload.
pub enum ObjectKind {
    /// Static text.
    Text(TextObject),
    /// Raster image.
    Image(ImageObject),
    /// Clickable button.
    Button(ButtonObject),
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Text object payload.
pub struct TextObject {
    /// UTF-8 text content.
    pub text: String,
    /// Font size in points.
    pub font_size: f64,
    /// CSS-style color string.
    pub color: String,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Image object payload.
pub struct ImageObject {
    /// Path of the image source, relative to the project document.
    pub source_path: String,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Button object payload.
pub struct ButtonObject {
    /// Button caption.
    pub label: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Event that fires a trigger.
pub enum TriggerType {
    /// Pointer click on the hosting object.
    OnClick,
    /// The hosting object's slide was entered.
    OnTimelineStart,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Event-to-action binding hosted by a [`SlideObject`].
pub struct Trigger {
    /// Trigger identifier.
    pub id: String,
    /// Event that fires this trigger.
    pub trigger_type: TriggerType,
    /// Optional semantic target: an object id on the same slide (weak reference).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_id: Option<String>,
    /// Actions executed in order when the trigger fires; must be non-empty.
    #[serde(default)]
    pub actions: Vec<Action>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
/// A single step of an action list. Target fields are weak references (ids).
pub enum Action {
    /// Make another slide current.
    NavigateToSlide(NavigateToSlideAction),
    /// Write a project variable.
    SetVariable(SetVariableAction),
    /// Make a layer of the current slide visible.
    ShowLayer(ShowLayerAction),
    /// Hide a layer of the current slide.
    HideLayer(HideLayerAction),
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Navigate to the slide named by `target_slide_id`.
pub struct NavigateToSlideAction {
    /// Target slide id.
    pub target_slide_id: String,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Update the variable named by `variable_id`.
pub struct SetVariableAction {
    /// Target variable id.
    pub variable_id: String,
    /// How `value` is combined with the current value.
    #[serde(default)]
    pub operation: SetOperation,
    /// Operand; required for every operation except [`SetOperation::Toggle`].
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_present"
    )]
    pub value: Option<Value>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Operation applied by a [`SetVariableAction`].
pub enum SetOperation {
    /// Replace the current value.
    #[default]
    Assign,
    /// Numeric addition.
    Add,
    /// Numeric subtraction.
    Subtract,
    /// Boolean negation; ignores the operand.
    Toggle,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Show the layer named by `layer_id`.
pub struct ShowLayerAction {
    /// Target layer id (same slide as the action).
    pub layer_id: String,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Hide the layer named by `layer_id`.
pub struct HideLayerAction {
    /// Target layer id (same slide as the action).
    pub layer_id: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Declared type of a [`Variable`].
pub enum VariableType {
    /// `true` / `false`.
    Boolean,
    /// Integer or floating point number.
    Number,
    /// UTF-8 text.
    Text,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Project-scoped variable.
pub struct Variable {
    /// Variable identifier (unique within the project).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Declared type.
    #[serde(rename = "type")]
    pub var_type: VariableType,
    /// Initial value seeded into every playback session; absent means "no value".
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_present"
    )]
    pub value: Option<Value>,
}

/// Result of [`Slide::hit_test`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObjectHit<'a> {
    /// Index of the hosting layer in [`Slide::layers`].
    pub layer: usize,
    /// Index of the object in its layer's [`Layer::objects`].
    pub index: usize,
    /// The object itself.
    pub object: &'a SlideObject,
}

fn default_visible() -> bool {
    true
}

impl Project {
    /// Look up a slide by id.
    pub fn slide(&self, id: &str) -> Option<&Slide> {
        self.slides.iter().find(|s| s.id == id)
    }

    /// Position of a slide in presentation order.
    pub fn slide_index(&self, id: &str) -> Option<usize> {
        self.slides.iter().position(|s| s.id == id)
    }

    /// Look up a variable by id.
    pub fn variable(&self, id: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.id == id)
    }
}

impl Slide {
    /// Look up a layer of this slide by id.
    pub fn layer(&self, id: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id == id)
    }

    /// All objects of this slide in document order (layer order, then object order).
    pub fn objects(&self) -> impl Iterator<Item = (&Layer, &SlideObject)> {
        self.layers
            .iter()
            .flat_map(|layer| layer.objects.iter().map(move |obj| (layer, obj)))
    }

    /// First object with the given id across all layers of this slide.
    pub fn find_object(&self, id: &str) -> Option<&SlideObject> {
        self.objects().map(|(_, o)| o).find(|o| o.id == id)
    }

    /// Topmost visible object under `point`, honoring layer visibility.
    ///
    /// Later layers and later objects paint on top, so the search walks document order in
    /// reverse. `layer_visible` supplies the current (runtime) visibility of each layer.
    pub fn hit_test(
        &self,
        point: Point,
        mut layer_visible: impl FnMut(&Layer) -> bool,
    ) -> Option<ObjectHit<'_>> {
        for (layer, l) in self.layers.iter().enumerate().rev() {
            if !layer_visible(l) {
                continue;
            }
            for (index, object) in l.objects.iter().enumerate().rev() {
                if object.visible && object.bounds().contains(point) {
                    return Some(ObjectHit {
                        layer,
                        index,
                        object,
                    });
                }
            }
        }
        None
    }
}

impl SlideObject {
    /// Axis-aligned bounds in slide coordinates.
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/project/model.rs"]
mod tests;
