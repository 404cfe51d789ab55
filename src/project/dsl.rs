use kurbo::{Point, Size};

use crate::{
    foundation::error::{SlideError, SlideResult},
    foundation::value::Value,
    project::model::{
        Action, ButtonObject, HideLayerAction, ImageObject, Layer, NavigateToSlideAction,
        ObjectKind, Project, SetOperation, SetVariableAction, ShowLayerAction, Slide, SlideObject,
        TextObject, Trigger, TriggerType, Variable, VariableType,
    },
    schema::validate::validate,
};

const DEFAULT_SLIDE_SIZE: Size = Size::new(1280.0, 720.0);
const DEFAULT_OBJECT_SIZE: Size = Size::new(100.0, 40.0);

/// Fluent builder for [`Project`].
pub struct ProjectBuilder {
    id: String,
    name: String,
    slides: Vec<Slide>,
    variables: Vec<Variable>,
}

impl ProjectBuilder {
    /// Start a project with the given id and display name.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            slides: Vec::new(),
            variables: Vec::new(),
        }
    }

    /// Append a slide.
    pub fn slide(mut self, slide: Slide) -> Self {
        self.slides.push(slide);
        self
    }

    /// Declare a variable.
    pub fn variable(mut self, variable: Variable) -> Self {
        self.variables.push(variable);
        self
    }

    /// Build and validate. Any diagnostic turns into [`SlideError::Validation`].
    pub fn build(self) -> SlideResult<Project> {
        let project = self.build_unchecked();
        let diagnostics = validate(Some(&project));
        if !diagnostics.is_empty() {
            return Err(SlideError::Validation(diagnostics));
        }
        Ok(project)
    }

    /// Build without running the validator.
    pub fn build_unchecked(self) -> Project {
        Project {
            id: self.id,
            name: self.name,
            slides: self.slides,
            variables: self.variables,
        }
    }
}

/// Build a [`Variable`].
pub fn variable(
    id: impl Into<String>,
    var_type: VariableType,
    initial: impl Into<Value>,
) -> Variable {
    let id = id.into();
    Variable {
        name: id.clone(),
        id,
        var_type,
        value: Some(initial.into()),
    }
}

/// Fluent builder for [`Slide`].
pub struct SlideBuilder {
    id: String,
    title: String,
    size: Size,
    layers: Vec<Layer>,
}

impl SlideBuilder {
    /// Start a slide; the title defaults to the id and the size to 1280x720.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            title: id.clone(),
            id,
            size: DEFAULT_SLIDE_SIZE,
            layers: Vec::new(),
        }
    }

    /// Override the title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Override the slide size.
    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.size = Size::new(width, height);
        self
    }

    /// Append a layer (back-to-front).
    pub fn layer(mut self, layer: Layer) -> Self {
        self.layers.push(layer);
        self
    }

    /// Finish the slide.
    pub fn build(self) -> Slide {
        Slide {
            id: self.id,
            title: self.title,
            width: self.size.width,
            height: self.size.height,
            layers: self.layers,
        }
    }
}

/// Fluent builder for [`Layer`].
pub struct LayerBuilder {
    id: String,
    name: String,
    visible: bool,
    objects: Vec<SlideObject>,
}

impl LayerBuilder {
    /// Start a visible layer named after its id.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            visible: true,
            objects: Vec::new(),
        }
    }

    /// Override the name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Author the layer as hidden.
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Append an object (back-to-front).
    pub fn object(mut self, object: SlideObject) -> Self {
        self.objects.push(object);
        self
    }

    /// Finish the layer.
    pub fn build(self) -> Layer {
        Layer {
            id: self.id,
            name: self.name,
            visible: self.visible,
            objects: self.objects,
        }
    }
}

/// Fluent builder for [`SlideObject`].
pub struct ObjectBuilder {
    id: String,
    name: String,
    position: Point,
    size: Size,
    visible: bool,
    kind: ObjectKind,
    triggers: Vec<Trigger>,
}

impl ObjectBuilder {
    fn new(id: impl Into<String>, kind: ObjectKind) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            position: Point::ORIGIN,
            size: DEFAULT_OBJECT_SIZE,
            visible: true,
            kind,
            triggers: Vec::new(),
        }
    }

    /// Start a button object.
    pub fn button(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(
            id,
            ObjectKind::Button(ButtonObject {
                label: label.into(),
            }),
        )
    }

    /// Start a text object (24pt, black).
    pub fn text(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(
            id,
            ObjectKind::Text(TextObject {
                text: text.into(),
                font_size: 24.0,
                color: "#000000".to_owned(),
            }),
        )
    }

    /// Start an image object.
    pub fn image(id: impl Into<String>, source_path: impl Into<String>) -> Self {
        Self::new(
            id,
            ObjectKind::Image(ImageObject {
                source_path: source_path.into(),
            }),
        )
    }

    /// Override the name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Place the top-left corner.
    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.position = Point::new(x, y);
        self
    }

    /// Override the size.
    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.size = Size::new(width, height);
        self
    }

    /// Author the object as hidden.
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Attach a trigger.
    pub fn trigger(mut self, trigger: Trigger) -> Self {
        self.triggers.push(trigger);
        self
    }

    /// Finish the object.
    pub fn build(self) -> SlideObject {
        SlideObject {
            id: self.id,
            name: self.name,
            position: self.position,
            size: self.size,
            visible: self.visible,
            kind: self.kind,
            triggers: self.triggers,
        }
    }
}

/// Fluent builder for [`Trigger`].
pub struct TriggerBuilder {
    id: String,
    trigger_type: TriggerType,
    object_id: Option<String>,
    actions: Vec<Action>,
}

impl TriggerBuilder {
    /// Start a trigger of the given type.
    pub fn new(id: impl Into<String>, trigger_type: TriggerType) -> Self {
        Self {
            id: id.into(),
            trigger_type,
            object_id: None,
            actions: Vec::new(),
        }
    }

    /// Start an [`TriggerType::OnClick`] trigger.
    pub fn on_click(id: impl Into<String>) -> Self {
        Self::new(id, TriggerType::OnClick)
    }

    /// Start an [`TriggerType::OnTimelineStart`] trigger.
    pub fn on_timeline_start(id: impl Into<String>) -> Self {
        Self::new(id, TriggerType::OnTimelineStart)
    }

    /// Set the semantic target object.
    pub fn target(mut self, object_id: impl Into<String>) -> Self {
        self.object_id = Some(object_id.into());
        self
    }

    /// Append an arbitrary action.
    pub fn action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    /// Append a navigation.
    pub fn navigate(self, target_slide_id: impl Into<String>) -> Self {
        self.action(Action::NavigateToSlide(NavigateToSlideAction {
            target_slide_id: target_slide_id.into(),
        }))
    }

    /// Append an assignment.
    pub fn set_variable(self, variable_id: impl Into<String>, value: impl Into<Value>) -> Self {
        self.update_variable(variable_id, SetOperation::Assign, Some(value.into()))
    }

    /// Append a numeric increment.
    pub fn add_to(self, variable_id: impl Into<String>, value: impl Into<Value>) -> Self {
        self.update_variable(variable_id, SetOperation::Add, Some(value.into()))
    }

    /// Append a boolean toggle.
    pub fn toggle(self, variable_id: impl Into<String>) -> Self {
        self.update_variable(variable_id, SetOperation::Toggle, None)
    }

    fn update_variable(
        self,
        variable_id: impl Into<String>,
        operation: SetOperation,
        value: Option<Value>,
    ) -> Self {
        self.action(Action::SetVariable(SetVariableAction {
            variable_id: variable_id.into(),
            operation,
            value,
        }))
    }

    /// Append a show-layer step.
    pub fn show_layer(self, layer_id: impl Into<String>) -> Self {
        self.action(Action::ShowLayer(ShowLayerAction {
            layer_id: layer_id.into(),
        }))
    }

    /// Append a hide-layer step.
    pub fn hide_layer(self, layer_id: impl Into<String>) -> Self {
        self.action(Action::HideLayer(HideLayerAction {
            layer_id: layer_id.into(),
        }))
    }

    /// Finish the trigger. An empty action list is left for the validator to report.
    pub fn build(self) -> Trigger {
        Trigger {
            id: self.id,
            trigger_type: self.trigger_type,
            object_id: self.object_id,
            actions: self.actions,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/project/dsl.rs"]
mod tests;
