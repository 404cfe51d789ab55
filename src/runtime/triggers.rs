use crate::project::model::{Project, Slide, Trigger, TriggerType};

/// Location of a trigger inside a project: slide, layer, object and trigger indices.
///
/// Queued work refers to triggers by location so that the queue never borrows the project.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct TriggerRef {
    pub(crate) slide: usize,
    pub(crate) layer: usize,
    pub(crate) object: usize,
    pub(crate) trigger: usize,
}

impl TriggerRef {
    pub(crate) fn resolve<'a>(&self, project: &'a Project) -> Option<&'a Trigger> {
        project
            .slides
            .get(self.slide)?
            .layers
            .get(self.layer)?
            .objects
            .get(self.object)?
            .triggers
            .get(self.trigger)
    }
}

/// Location of an object on a slide: layer and object indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct ObjectLoc {
    pub(crate) layer: usize,
    pub(crate) object: usize,
}

/// First object with `id` in document order.
pub(crate) fn locate_object(slide: &Slide, id: &str) -> Option<ObjectLoc> {
    slide.layers.iter().enumerate().find_map(|(layer, l)| {
        l.objects
            .iter()
            .position(|o| o.id == id)
            .map(|object| ObjectLoc { layer, object })
    })
}

/// `OnClick` triggers hosted by the clicked object, in trigger order.
pub(crate) fn click_triggers(slide: &Slide, index: usize, loc: ObjectLoc) -> Vec<TriggerRef> {
    let Some(object) = slide
        .layers
        .get(loc.layer)
        .and_then(|l| l.objects.get(loc.object))
    else {
        return Vec::new();
    };
    object
        .triggers
        .iter()
        .enumerate()
        .filter(|(_, t)| t.trigger_type == TriggerType::OnClick)
        .map(|(trigger, _)| TriggerRef {
            slide: index,
            layer: loc.layer,
            object: loc.object,
            trigger,
        })
        .collect()
}

/// `OnTimelineStart` triggers of every object on the slide, in document order.
///
/// Object and layer visibility are ignored: triggers are object-scoped logic.
pub(crate) fn entry_triggers(slide: &Slide, slide_index: usize) -> Vec<TriggerRef> {
    let mut out = Vec::new();
    for (layer, l) in slide.layers.iter().enumerate() {
        for (object, o) in l.objects.iter().enumerate() {
            for (trigger, t) in o.triggers.iter().enumerate() {
                if t.trigger_type == TriggerType::OnTimelineStart {
                    out.push(TriggerRef {
                        slide: slide_index,
                        layer,
                        object,
                        trigger,
                    });
                }
            }
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/triggers.rs"]
mod tests;
