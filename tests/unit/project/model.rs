use super::*;
use crate::project::dsl::{LayerBuilder, ObjectBuilder, SlideBuilder};

fn two_layer_slide() -> Slide {
    SlideBuilder::new("s1")
        .layer(
            LayerBuilder::new("back")
                .object(ObjectBuilder::image("bg", "bg.png").size(1280.0, 720.0).build())
                .object(ObjectBuilder::button("ok", "OK").at(100.0, 100.0).build())
                .build(),
        )
        .layer(
            LayerBuilder::new("popup")
                .hidden()
                .object(
                    ObjectBuilder::text("msg", "hello")
                        .at(90.0, 90.0)
                        .size(50.0, 50.0)
                        .build(),
                )
                .build(),
        )
        .build()
}

#[test]
fn objects_iterate_in_document_order() {
    let slide = two_layer_slide();
    let ids: Vec<(&str, &str)> = slide
        .objects()
        .map(|(l, o)| (l.id.as_str(), o.id.as_str()))
        .collect();
    assert_eq!(ids, vec![("back", "bg"), ("back", "ok"), ("popup", "msg")]);
    assert_eq!(slide.find_object("msg").map(|o| o.name.as_str()), Some("msg"));
    assert!(slide.find_object("nope").is_none());
}

#[test]
fn hit_test_prefers_topmost_visible_layer() {
    let slide = two_layer_slide();
    let p = Point::new(110.0, 110.0);

    let hit = slide.hit_test(p, |l| l.visible).map(|h| h.object.id.as_str());
    assert_eq!(hit, Some("ok"));

    let hit = slide.hit_test(p, |_| true).map(|h| h.object.id.as_str());
    assert_eq!(hit, Some("msg"));

    let hit = slide
        .hit_test(Point::new(5.0, 5.0), |_| true)
        .map(|h| h.object.id.as_str());
    assert_eq!(hit, Some("bg"));

    assert!(slide.hit_test(Point::new(5000.0, 5.0), |_| true).is_none());
}

#[test]
fn hit_test_reports_object_location() {
    let slide = two_layer_slide();
    let hit = slide.hit_test(Point::new(110.0, 110.0), |_| true).unwrap();
    let object = &slide.layers[hit.layer].objects[hit.index];
    assert!(std::ptr::eq(object, hit.object));
    assert_eq!(object.id, "msg");
}

#[test]
fn hidden_objects_are_not_hit() {
    let slide = SlideBuilder::new("s")
        .layer(
            LayerBuilder::new("l")
                .object(ObjectBuilder::button("b", "B").hidden().build())
                .build(),
        )
        .build();
    assert!(slide.hit_test(Point::new(1.0, 1.0), |_| true).is_none());
}

#[test]
fn object_wire_format_is_flat_and_tagged() {
    let obj = ObjectBuilder::button("b1", "Go").at(1.0, 2.0).build();
    let json = serde_json::to_value(&obj).unwrap();
    assert_eq!(json["type"], "button");
    assert_eq!(json["label"], "Go");
    assert_eq!(json["position"], serde_json::json!({"x": 1.0, "y": 2.0}));
    assert_eq!(json["size"]["width"], 100.0);
    assert!(json.get("kind").is_none());
}

#[test]
fn optional_fields_take_defaults() {
    let layer: Layer = serde_json::from_str(r#"{"id":"l","name":"L"}"#).unwrap();
    assert!(layer.visible);
    assert!(layer.objects.is_empty());

    let trigger: Trigger =
        serde_json::from_str(r#"{"id":"t","triggerType":"onTimelineStart"}"#).unwrap();
    assert_eq!(trigger.trigger_type, TriggerType::OnTimelineStart);
    assert_eq!(trigger.object_id, None);
    assert!(trigger.actions.is_empty());

    let action: Action =
        serde_json::from_str(r#"{"type":"setVariable","variableId":"v"}"#).unwrap();
    assert_eq!(
        action,
        Action::SetVariable(SetVariableAction {
            variable_id: "v".to_owned(),
            operation: SetOperation::Assign,
            value: None,
        })
    );
}

#[test]
fn lookups_resolve_by_id() {
    let project = Project {
        id: "p".to_owned(),
        name: "P".to_owned(),
        slides: vec![two_layer_slide()],
        variables: vec![Variable {
            id: "v".to_owned(),
            name: "V".to_owned(),
            var_type: VariableType::Number,
            value: Some(Value::I32(1)),
        }],
    };
    assert_eq!(project.slide_index("s1"), Some(0));
    assert!(project.slide("s2").is_none());
    assert_eq!(project.variable("v").map(|v| v.var_type), Some(VariableType::Number));
    assert!(project.slides[0].layer("popup").is_some_and(|l| !l.visible));
}
